use pmanvil_chunk::SubChunk;
use valence_nbt::{compound, Compound};

use super::{
    default_block_light, default_sky_light, SubChunkCodec, BLOCKS, BLOCK_LIGHT, DATA, SKY_LIGHT,
};
use crate::nbt_ext::{to_nbt_bytes, CompoundExt};
use crate::CorruptedChunk;

/// Sub-chunk layout of the legacy PMAnvil format. Arrays are written in the
/// same XZY order [`SubChunk`] keeps them in.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct PmAnvilSubChunks;

impl SubChunkCodec for PmAnvilSubChunks {
    fn serialize_sub_chunk(&self, sub_chunk: &SubChunk) -> Compound {
        compound! {
            BLOCKS => to_nbt_bytes(sub_chunk.block_id_array()),
            DATA => to_nbt_bytes(sub_chunk.block_data_array()),
            SKY_LIGHT => to_nbt_bytes(sub_chunk.sky_light_array()),
            BLOCK_LIGHT => to_nbt_bytes(sub_chunk.block_light_array()),
        }
    }

    fn deserialize_sub_chunk(&self, nbt: &Compound) -> Result<SubChunk, CorruptedChunk> {
        Ok(SubChunk::from_arrays(
            nbt.fixed_byte_array(BLOCKS)?,
            nbt.fixed_byte_array(DATA)?,
            nbt.opt_fixed_byte_array(SKY_LIGHT)?
                .unwrap_or_else(default_sky_light),
            nbt.opt_fixed_byte_array(BLOCK_LIGHT)?
                .unwrap_or_else(default_block_light),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pmanvil_chunk::{BLOCK_COUNT, NIBBLE_ARRAY_LEN};
    use pretty_assertions::assert_eq;
    use valence_nbt::Value;

    use super::*;

    fn sample() -> SubChunk {
        let mut sub_chunk = SubChunk::new();
        sub_chunk.set_block(0, 0, 0, 7, 0);
        sub_chunk.set_block(15, 15, 15, 89, 3);
        sub_chunk.set_block_light(15, 15, 15, 15);
        sub_chunk.set_sky_light(2, 3, 4, 6);
        sub_chunk
    }

    #[test]
    fn writes_xzy_arrays_verbatim() {
        let sub_chunk = sample();
        let nbt = PmAnvilSubChunks.serialize_sub_chunk(&sub_chunk);

        let Some(Value::ByteArray(blocks)) = nbt.get(BLOCKS) else {
            panic!("missing {BLOCKS}");
        };
        assert_eq!(blocks.len(), BLOCK_COUNT);
        assert_eq!(blocks[0xfff], 89);

        let Some(Value::ByteArray(data)) = nbt.get(DATA) else {
            panic!("missing {DATA}");
        };
        assert_eq!(data.len(), NIBBLE_ARRAY_LEN);
        assert_eq!(data[0xfff >> 1] as u8, 0x30);
    }

    #[test]
    fn reads_back_what_it_writes() {
        let sub_chunk = sample();
        let nbt = PmAnvilSubChunks.serialize_sub_chunk(&sub_chunk);

        assert_eq!(PmAnvilSubChunks.deserialize_sub_chunk(&nbt).unwrap(), sub_chunk);
    }

    #[test]
    fn missing_light_is_defaulted() {
        let mut nbt = PmAnvilSubChunks.serialize_sub_chunk(&sample());
        nbt.remove(SKY_LIGHT);
        nbt.remove(BLOCK_LIGHT);

        let sub_chunk = PmAnvilSubChunks.deserialize_sub_chunk(&nbt).unwrap();
        assert_eq!(sub_chunk.block_id(15, 15, 15), 89);
        assert_eq!(sub_chunk.sky_light(2, 3, 4), 15);
        assert_eq!(sub_chunk.block_light(15, 15, 15), 0);
    }

    #[test]
    fn missing_blocks_is_corruption() {
        let mut nbt = PmAnvilSubChunks.serialize_sub_chunk(&sample());
        nbt.remove(BLOCKS);

        assert!(matches!(
            PmAnvilSubChunks.deserialize_sub_chunk(&nbt),
            Err(CorruptedChunk::MissingKey { key: BLOCKS })
        ));
    }

    #[test]
    fn truncated_data_is_corruption() {
        let mut nbt = PmAnvilSubChunks.serialize_sub_chunk(&sample());
        nbt.insert(DATA, vec![0_i8; 100]);

        assert!(matches!(
            PmAnvilSubChunks.deserialize_sub_chunk(&nbt),
            Err(CorruptedChunk::InvalidLength { key: DATA, len: 100, .. })
        ));
    }
}
