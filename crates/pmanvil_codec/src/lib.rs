#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

use std::collections::BTreeMap;

use pmanvil_chunk::{convert_biome_colors, Chunk, ChunkPos, COLUMN_COUNT, SUB_CHUNK_COUNT};
use tracing::{debug, trace, warn};
use valence_nbt::{compound, Compound, List, Value};

pub use crate::compression::{CodecOptions, Compression, DEFAULT_COMPRESSION_LEVEL};
pub use crate::error::{CorruptedChunk, CorruptionKind, SerializeChunkError};
use crate::nbt_ext::{to_nbt_bytes, CompoundExt};
pub use crate::sub_chunk::{AnvilSubChunks, PmAnvilSubChunks, SubChunkCodec};

mod compression;
mod error;
pub mod nbt_ext;
mod sub_chunk;

/// Value of the `V` key in every record this crate writes.
pub const RECORD_VERSION: i8 = 1;

const LEVEL: &str = "Level";
const X_POS: &str = "xPos";
const Z_POS: &str = "zPos";
const SECTIONS: &str = "Sections";
const SECTION_Y: &str = "Y";
const BIOMES: &str = "Biomes";
const BIOME_COLORS: &str = "BiomeColors";
const TERRAIN_POPULATED: &str = "TerrainPopulated";
const ENTITIES: &str = "Entities";
const TILE_ENTITIES: &str = "TileEntities";

/// Legacy PMAnvil chunks.
pub type PmAnvilChunkCodec = LegacyChunkCodec<PmAnvilSubChunks>;

/// Legacy chunks with PC Anvil sub-chunks.
pub type AnvilChunkCodec = LegacyChunkCodec<AnvilSubChunks>;

/// Reads and writes whole chunk records in the legacy Anvil layout.
///
/// The sub-chunk layout is delegated to `S`. The codec holds no mutable
/// state, so a single instance can serve any number of threads as long as `S`
/// is [`Sync`].
#[derive(Clone, Default, Debug)]
pub struct LegacyChunkCodec<S> {
    sub_chunks: S,
    options: CodecOptions,
}

impl<S: SubChunkCodec> LegacyChunkCodec<S> {
    /// Creates a codec writing zlib records at
    /// [`DEFAULT_COMPRESSION_LEVEL`].
    pub fn new(sub_chunks: S) -> Self {
        Self::with_options(sub_chunks, CodecOptions::default())
    }

    pub fn with_options(sub_chunks: S, options: CodecOptions) -> Self {
        Self {
            sub_chunks,
            options,
        }
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    pub fn sub_chunk_codec(&self) -> &S {
        &self.sub_chunks
    }

    /// Encodes and compresses `chunk`.
    ///
    /// Empty sub-chunks are left out. The biome array is always written as
    /// `Biomes`, never as the legacy `BiomeColors`.
    pub fn serialize(&self, chunk: &Chunk) -> Result<Vec<u8>, SerializeChunkError> {
        let nbt = self.chunk_to_nbt(chunk);
        let bytes = compression::compress(&nbt, self.options)?;

        debug!(
            pos = %chunk.pos(),
            len = bytes.len(),
            "serialized chunk"
        );

        Ok(bytes)
    }

    /// Builds the record for `chunk`: an unnamed root holding the `Level`
    /// compound.
    pub fn chunk_to_nbt(&self, chunk: &Chunk) -> Compound {
        let mut sections = vec![];

        for (&y, sub_chunk) in chunk.sub_chunks() {
            if sub_chunk.is_empty() {
                trace!(pos = %chunk.pos(), y, "skipping empty sub-chunk");
                continue;
            }

            let mut section = self.sub_chunks.serialize_sub_chunk(sub_chunk);
            section.insert(SECTION_Y, y as i8);
            sections.push(section);
        }

        let level = compound! {
            X_POS => chunk.x(),
            Z_POS => chunk.z(),
            "V" => RECORD_VERSION,
            "LastUpdate" => 0_i64,
            "InhabitedTime" => 0_i64,
            TERRAIN_POPULATED => i8::from(chunk.is_populated()),
            "LightPopulated" => 0_i8,
            SECTIONS => List::Compound(sections),
            BIOMES => to_nbt_bytes(chunk.biome_ids()),
            "HeightMap" => vec![0_i32; COLUMN_COUNT],
            ENTITIES => List::Compound(chunk.entities().to_vec()),
            TILE_ENTITIES => List::Compound(chunk.block_entities().to_vec()),
        };

        compound! {
            LEVEL => level,
        }
    }

    /// Decompresses and decodes a chunk record.
    ///
    /// The returned chunk is always marked as generated.
    pub fn deserialize(&self, data: &[u8]) -> Result<Chunk, CorruptedChunk> {
        let nbt = compression::decompress(data).map_err(CorruptedChunk::Decompress)?;

        let mut nbt_slice = nbt.as_slice();
        let (root, _) = Compound::from_binary(&mut nbt_slice)?;

        if !nbt_slice.is_empty() {
            return Err(CorruptedChunk::TrailingNbtData);
        }

        let chunk = self.chunk_from_nbt(root)?;

        debug!(
            pos = %chunk.pos(),
            sections = chunk.sub_chunks().len(),
            len = data.len(),
            "deserialized chunk"
        );

        Ok(chunk)
    }

    /// Like [`LegacyChunkCodec::deserialize`], but also checks the record
    /// belongs to the chunk at `pos`.
    pub fn deserialize_at(&self, data: &[u8], pos: ChunkPos) -> Result<Chunk, CorruptedChunk> {
        let chunk = self.deserialize(data)?;

        if chunk.pos() != pos {
            return Err(CorruptedChunk::PositionMismatch {
                expected: pos,
                found: chunk.pos(),
            });
        }

        Ok(chunk)
    }

    /// Decodes an already parsed record.
    pub fn chunk_from_nbt(&self, mut root: Compound) -> Result<Chunk, CorruptedChunk> {
        let mut level = match root.remove(LEVEL) {
            Some(Value::Compound(level)) => level,
            Some(_) => {
                return Err(CorruptedChunk::InvalidType {
                    key: LEVEL,
                    expected: "a compound",
                })
            }
            None => return Err(CorruptedChunk::MissingLevel),
        };

        let pos = ChunkPos::new(level.int(X_POS)?, level.int(Z_POS)?);

        let mut sub_chunks = BTreeMap::new();

        match level.remove(SECTIONS) {
            Some(Value::List(List::Compound(sections))) => {
                for section in sections {
                    let y = section.byte(SECTION_Y)?;

                    let idx = u8::try_from(y)
                        .ok()
                        .filter(|&idx| idx < SUB_CHUNK_COUNT)
                        .ok_or(CorruptedChunk::SubChunkIndexOutOfBounds(y))?;

                    // A repeated Y replaces the earlier section.
                    sub_chunks.insert(idx, self.sub_chunks.deserialize_sub_chunk(&section)?);
                }
            }
            // Empty lists may come back with any element type.
            Some(Value::List(_)) | None => {}
            Some(_) => {
                return Err(CorruptedChunk::InvalidType {
                    key: SECTIONS,
                    expected: "a list",
                })
            }
        }

        let biome_ids = read_biome_ids(&level, pos)?;
        let entities = take_blobs(&mut level, ENTITIES, pos);
        let block_entities = take_blobs(&mut level, TILE_ENTITIES, pos);

        let mut chunk = Chunk::new(
            pos.x,
            pos.z,
            sub_chunks,
            entities,
            block_entities,
            biome_ids,
        )?;

        chunk.set_populated(level.byte_or(TERRAIN_POPULATED, 0)? != 0);
        // The record exists, so generation must have happened.
        chunk.set_generated(true);

        Ok(chunk)
    }
}

/// Picks the biome ids out of a `Level` compound.
///
/// `BiomeColors` wins over `Biomes`: only records that predate `Biomes` carry
/// it, so a `Biomes` array next to it cannot be trusted.
fn read_biome_ids(level: &Compound, pos: ChunkPos) -> Result<[u8; COLUMN_COUNT], CorruptedChunk> {
    if let Some(Value::IntArray(colors)) = level.get(BIOME_COLORS) {
        if level.contains_key(BIOMES) {
            warn!(%pos, "chunk has both {BIOME_COLORS} and {BIOMES}, using {BIOME_COLORS}");
        } else {
            debug!(%pos, "converting legacy {BIOME_COLORS}");
        }

        let colors: &[i32; COLUMN_COUNT] =
            colors
                .as_slice()
                .try_into()
                .map_err(|_| CorruptedChunk::InvalidLength {
                    key: BIOME_COLORS,
                    len: colors.len(),
                    expected: COLUMN_COUNT,
                })?;

        return Ok(convert_biome_colors(colors));
    }

    let mut biome_ids = [0; COLUMN_COUNT];

    match level.get(BIOMES) {
        Some(Value::ByteArray(ids)) if ids.is_empty() => {}
        Some(Value::ByteArray(ids)) => {
            if ids.len() != COLUMN_COUNT {
                return Err(CorruptedChunk::InvalidLength {
                    key: BIOMES,
                    len: ids.len(),
                    expected: COLUMN_COUNT,
                });
            }

            for (dst, &src) in biome_ids.iter_mut().zip(ids) {
                *dst = src as u8;
            }
        }
        Some(_) => debug!(%pos, "ignoring {BIOMES} of unexpected type"),
        None => {}
    }

    Ok(biome_ids)
}

/// Removes a list of raw entity compounds from `level`. Anything that is not
/// a list of compounds is dropped.
fn take_blobs(level: &mut Compound, key: &'static str, pos: ChunkPos) -> Vec<Compound> {
    match level.remove(key) {
        Some(Value::List(List::Compound(blobs))) => blobs,
        Some(Value::List(List::End)) | None => vec![],
        Some(_) => {
            warn!(%pos, "dropping {key} of unexpected type");
            vec![]
        }
    }
}
