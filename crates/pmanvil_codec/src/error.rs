use std::io;

use pmanvil_chunk::{ChunkError, ChunkPos};
use thiserror::Error;

/// Broad classification of a [`CorruptedChunk`] error.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CorruptionKind {
    /// The bytes could not be decompressed or parsed as NBT at all.
    Unreadable,
    /// The bytes are valid NBT, but not a valid chunk record.
    StructurallyInvalid,
}

/// A stored chunk record could not be turned into a [`Chunk`].
///
/// Every variant is terminal for the chunk being loaded and says nothing
/// about other chunks.
///
/// [`Chunk`]: pmanvil_chunk::Chunk
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CorruptedChunk {
    #[error("failed to decompress chunk data: {0}")]
    Decompress(#[source] io::Error),
    #[error("failed to parse chunk NBT: {0}")]
    Nbt(#[from] valence_nbt::binary::Error),
    #[error("not all chunk NBT data was read")]
    TrailingNbtData,
    #[error("'Level' key is missing from chunk NBT")]
    MissingLevel,
    #[error("missing key `{key}`")]
    MissingKey { key: &'static str },
    #[error("expected `{key}` to be {expected}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },
    #[error("`{key}` has a length of {len}, expected {expected}")]
    InvalidLength {
        key: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("sub-chunk Y of {0} is out of bounds")]
    SubChunkIndexOutOfBounds(i8),
    #[error("expected chunk {expected}, but the record is for chunk {found}")]
    PositionMismatch { expected: ChunkPos, found: ChunkPos },
}

impl CorruptedChunk {
    pub fn kind(&self) -> CorruptionKind {
        match self {
            Self::Decompress(_) | Self::Nbt(_) | Self::TrailingNbtData => CorruptionKind::Unreadable,
            Self::MissingLevel
            | Self::MissingKey { .. }
            | Self::InvalidType { .. }
            | Self::InvalidLength { .. }
            | Self::SubChunkIndexOutOfBounds(_)
            | Self::PositionMismatch { .. } => CorruptionKind::StructurallyInvalid,
        }
    }

    /// Returns `true` if the data never made it to a parsed NBT tree.
    pub fn is_unreadable(&self) -> bool {
        self.kind() == CorruptionKind::Unreadable
    }
}

impl From<ChunkError> for CorruptedChunk {
    fn from(err: ChunkError) -> Self {
        match err {
            ChunkError::SubChunkIndexOutOfBounds(idx) => {
                Self::SubChunkIndexOutOfBounds(i8::try_from(idx).unwrap_or(i8::MAX))
            }
        }
    }
}

/// Failure while turning a chunk into bytes. Nothing is returned to the caller
/// when this happens.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializeChunkError {
    #[error("failed to encode chunk NBT: {0}")]
    Nbt(#[from] valence_nbt::binary::Error),
    #[error("failed to compress chunk data: {0}")]
    Compress(#[from] io::Error),
}
