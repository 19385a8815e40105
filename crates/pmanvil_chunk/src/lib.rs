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
use std::fmt;

use thiserror::Error;
use valence_nbt::Compound;

pub use crate::biome::convert_biome_colors;
pub use crate::reorder::{reorder_byte_array, reorder_nibble_array};
pub use crate::sub_chunk::{SubChunk, BLOCK_COUNT, NIBBLE_ARRAY_LEN};

mod biome;
mod reorder;
mod sub_chunk;

/// The number of sub-chunks stacked in a chunk column. Valid sub-chunk
/// indices are `0..SUB_CHUNK_COUNT`.
pub const SUB_CHUNK_COUNT: u8 = 16;

/// The number of block columns in a chunk, which is also the length of the
/// biome array.
pub const COLUMN_COUNT: usize = 16 * 16;

/// The X and Z position of a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Debug)]
pub struct ChunkPos {
    /// The X position of the chunk.
    pub x: i32,
    /// The Z position of the chunk.
    pub z: i32,
}

impl ChunkPos {
    /// Constructs a new chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl From<(i32, i32)> for ChunkPos {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

impl From<ChunkPos> for (i32, i32) {
    fn from(pos: ChunkPos) -> Self {
        (pos.x, pos.z)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ChunkError {
    #[error("sub-chunk index {0} is out of bounds (must be less than {SUB_CHUNK_COUNT})")]
    SubChunkIndexOutOfBounds(u8),
}

/// A column of terrain: up to [`SUB_CHUNK_COUNT`] sub-chunks, a biome id per
/// block column, and the raw NBT of the entities and block entities inside
/// it.
///
/// Sub-chunks are stored sparsely. An index with no entry reads as air.
#[derive(Clone, PartialEq)]
pub struct Chunk {
    pos: ChunkPos,
    sub_chunks: BTreeMap<u8, SubChunk>,
    biome_ids: Box<[u8; COLUMN_COUNT]>,
    entities: Vec<Compound>,
    block_entities: Vec<Compound>,
    populated: bool,
    generated: bool,
}

impl Chunk {
    /// Creates a chunk from its parts. The chunk starts out neither populated
    /// nor generated.
    ///
    /// Fails if any sub-chunk index is not below [`SUB_CHUNK_COUNT`].
    pub fn new(
        x: i32,
        z: i32,
        sub_chunks: BTreeMap<u8, SubChunk>,
        entities: Vec<Compound>,
        block_entities: Vec<Compound>,
        biome_ids: [u8; COLUMN_COUNT],
    ) -> Result<Self, ChunkError> {
        if let Some((&idx, _)) = sub_chunks.range(SUB_CHUNK_COUNT..).next() {
            return Err(ChunkError::SubChunkIndexOutOfBounds(idx));
        }

        Ok(Self {
            pos: ChunkPos::new(x, z),
            sub_chunks,
            biome_ids: Box::new(biome_ids),
            entities,
            block_entities,
            populated: false,
            generated: false,
        })
    }

    /// Creates a chunk with no sub-chunks, no entities and all biome ids set
    /// to zero.
    pub fn empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            sub_chunks: BTreeMap::new(),
            biome_ids: Box::new([0; COLUMN_COUNT]),
            entities: vec![],
            block_entities: vec![],
            populated: false,
            generated: false,
        }
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn z(&self) -> i32 {
        self.pos.z
    }

    /// Whether terrain decoration (trees, ores, ...) has run for this chunk.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn set_populated(&mut self, populated: bool) {
        self.populated = populated;
    }

    /// Whether base terrain generation has run for this chunk.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn set_generated(&mut self, generated: bool) {
        self.generated = generated;
    }

    /// The stored sub-chunks in ascending index order.
    pub fn sub_chunks(&self) -> &BTreeMap<u8, SubChunk> {
        &self.sub_chunks
    }

    pub fn sub_chunk(&self, idx: u8) -> Option<&SubChunk> {
        self.sub_chunks.get(&idx)
    }

    /// Returns the sub-chunk at `idx`, inserting an empty one first if there
    /// is none.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`SUB_CHUNK_COUNT`].
    #[track_caller]
    pub fn sub_chunk_mut(&mut self, idx: u8) -> &mut SubChunk {
        check_sub_chunk_oob(idx);
        self.sub_chunks.entry(idx).or_default()
    }

    /// Replaces the sub-chunk at `idx`, returning the previous one. Passing
    /// `None` removes it.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`SUB_CHUNK_COUNT`].
    #[track_caller]
    pub fn set_sub_chunk(&mut self, idx: u8, sub_chunk: Option<SubChunk>) -> Option<SubChunk> {
        check_sub_chunk_oob(idx);

        match sub_chunk {
            Some(sub_chunk) => self.sub_chunks.insert(idx, sub_chunk),
            None => self.sub_chunks.remove(&idx),
        }
    }

    /// Gets the block id at the given chunk-local position. `x` and `z` are
    /// in `0..16` and `y` in `0..256`.
    #[track_caller]
    pub fn block_id(&self, x: u32, y: u32, z: u32) -> u8 {
        check_column_oob(x, z);
        self.sub_chunk(section_of(y))
            .map_or(0, |sub_chunk| sub_chunk.block_id(x, y % 16, z))
    }

    /// Sets the block id and data at the given chunk-local position, creating
    /// the sub-chunk if needed.
    #[track_caller]
    pub fn set_block(&mut self, x: u32, y: u32, z: u32, id: u8, data: u8) {
        check_column_oob(x, z);
        self.sub_chunk_mut(section_of(y)).set_block(x, y % 16, z, id, data);
    }

    /// The biome ids of every column, indexed by `(z << 4) | x`.
    pub fn biome_ids(&self) -> &[u8; COLUMN_COUNT] {
        &self.biome_ids
    }

    #[track_caller]
    pub fn biome_id(&self, x: u32, z: u32) -> u8 {
        check_column_oob(x, z);
        self.biome_ids[column_idx(x, z)]
    }

    #[track_caller]
    pub fn set_biome_id(&mut self, x: u32, z: u32, biome_id: u8) {
        check_column_oob(x, z);
        self.biome_ids[column_idx(x, z)] = biome_id;
    }

    /// Raw NBT of the entities in this chunk, in storage order.
    pub fn entities(&self) -> &[Compound] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Vec<Compound> {
        &mut self.entities
    }

    /// Raw NBT of the block entities (tiles) in this chunk, in storage order.
    pub fn block_entities(&self) -> &[Compound] {
        &self.block_entities
    }

    pub fn block_entities_mut(&mut self) -> &mut Vec<Compound> {
        &mut self.block_entities
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("pos", &self.pos)
            .field("sub_chunks", &self.sub_chunks)
            .field("entities", &self.entities.len())
            .field("block_entities", &self.block_entities.len())
            .field("populated", &self.populated)
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}

const fn column_idx(x: u32, z: u32) -> usize {
    ((z << 4) | x) as usize
}

#[track_caller]
fn section_of(y: u32) -> u8 {
    assert!(
        y < u32::from(SUB_CHUNK_COUNT) * 16,
        "chunk block y of {y} is out of bounds"
    );
    (y / 16) as u8
}

#[track_caller]
fn check_column_oob(x: u32, z: u32) {
    assert!(
        x < 16 && z < 16,
        "chunk column offsets of ({x}, {z}) are out of bounds"
    );
}

#[track_caller]
fn check_sub_chunk_oob(idx: u8) {
    assert!(
        idx < SUB_CHUNK_COUNT,
        "sub-chunk index of {idx} is out of bounds"
    );
}
