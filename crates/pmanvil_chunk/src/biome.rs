use crate::COLUMN_COUNT;

/// Converts the packed biome colors written by very old worlds into plain
/// biome ids.
///
/// Each entry packs the biome id into the top byte and an RGB grass color into
/// the rest. Only the id survives the conversion.
pub fn convert_biome_colors(colors: &[i32; COLUMN_COUNT]) -> [u8; COLUMN_COUNT] {
    let mut biome_ids = [0; COLUMN_COUNT];

    for (id, &color) in biome_ids.iter_mut().zip(colors) {
        *id = (color as u32 >> 24) as u8;
    }

    biome_ids
}
