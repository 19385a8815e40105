use pmanvil_chunk::{SubChunk, NIBBLE_ARRAY_LEN};
use valence_nbt::Compound;

pub use self::anvil::AnvilSubChunks;
pub use self::pm_anvil::PmAnvilSubChunks;
use crate::CorruptedChunk;

mod anvil;
mod pm_anvil;

const BLOCKS: &str = "Blocks";
const DATA: &str = "Data";
const SKY_LIGHT: &str = "SkyLight";
const BLOCK_LIGHT: &str = "BlockLight";

/// How a single sub-chunk is laid out inside its `Sections` entry.
///
/// [`LegacyChunkCodec`](crate::LegacyChunkCodec) handles everything else in
/// the record and stamps the `Y` key onto whatever compound
/// `serialize_sub_chunk` returns.
pub trait SubChunkCodec {
    /// Encodes a non-empty sub-chunk. Must not fail.
    fn serialize_sub_chunk(&self, sub_chunk: &SubChunk) -> Compound;

    /// Decodes a `Sections` entry.
    ///
    /// Block ids and block data must be present. Light is cosmetic and may
    /// be defaulted when missing.
    fn deserialize_sub_chunk(&self, nbt: &Compound) -> Result<SubChunk, CorruptedChunk>;
}

impl<T: SubChunkCodec + ?Sized> SubChunkCodec for &T {
    fn serialize_sub_chunk(&self, sub_chunk: &SubChunk) -> Compound {
        (**self).serialize_sub_chunk(sub_chunk)
    }

    fn deserialize_sub_chunk(&self, nbt: &Compound) -> Result<SubChunk, CorruptedChunk> {
        (**self).deserialize_sub_chunk(nbt)
    }
}

fn default_sky_light() -> Box<[u8; NIBBLE_ARRAY_LEN]> {
    Box::new([0xff; NIBBLE_ARRAY_LEN])
}

fn default_block_light() -> Box<[u8; NIBBLE_ARRAY_LEN]> {
    Box::new([0; NIBBLE_ARRAY_LEN])
}
