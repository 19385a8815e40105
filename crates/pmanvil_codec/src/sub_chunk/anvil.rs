use pmanvil_chunk::{
    reorder_byte_array, reorder_nibble_array, SubChunk, BLOCK_COUNT, NIBBLE_ARRAY_LEN,
};
use valence_nbt::{compound, Compound};

use super::{
    default_block_light, default_sky_light, SubChunkCodec, BLOCKS, BLOCK_LIGHT, DATA, SKY_LIGHT,
};
use crate::nbt_ext::{to_nbt_bytes, CompoundExt};
use crate::CorruptedChunk;

/// Sub-chunk layout of PC Anvil worlds, which store blocks in YZX order.
/// Arrays are reordered on the way in and out.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct AnvilSubChunks;

impl SubChunkCodec for AnvilSubChunks {
    fn serialize_sub_chunk(&self, sub_chunk: &SubChunk) -> Compound {
        compound! {
            BLOCKS => to_nbt_bytes(&*reorder_byte_array(sub_chunk.block_id_array())),
            DATA => to_nbt_bytes(&*reorder_nibble_array(sub_chunk.block_data_array())),
            SKY_LIGHT => to_nbt_bytes(&*reorder_nibble_array(sub_chunk.sky_light_array())),
            BLOCK_LIGHT => to_nbt_bytes(&*reorder_nibble_array(sub_chunk.block_light_array())),
        }
    }

    fn deserialize_sub_chunk(&self, nbt: &Compound) -> Result<SubChunk, CorruptedChunk> {
        let ids: Box<[u8; BLOCK_COUNT]> = nbt.fixed_byte_array(BLOCKS)?;
        let data: Box<[u8; NIBBLE_ARRAY_LEN]> = nbt.fixed_byte_array(DATA)?;
        let sky_light: Option<Box<[u8; NIBBLE_ARRAY_LEN]>> = nbt.opt_fixed_byte_array(SKY_LIGHT)?;
        let block_light: Option<Box<[u8; NIBBLE_ARRAY_LEN]>> =
            nbt.opt_fixed_byte_array(BLOCK_LIGHT)?;

        Ok(SubChunk::from_arrays(
            reorder_byte_array(&ids),
            reorder_nibble_array(&data),
            sky_light.map_or_else(default_sky_light, |light| reorder_nibble_array(&light)),
            block_light.map_or_else(default_block_light, |light| reorder_nibble_array(&light)),
        ))
    }
}
