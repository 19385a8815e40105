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


pub use pmanvil_chunk as chunk;
pub use pmanvil_codec as codec;
pub use valence_nbt as nbt;

/// Contains the most frequently used items.
pub mod prelude {
    pub use pmanvil_chunk::{Chunk, ChunkPos, SubChunk};
    pub use pmanvil_codec::{
        AnvilChunkCodec, AnvilSubChunks, CodecOptions, Compression, CorruptedChunk,
        CorruptionKind, LegacyChunkCodec, PmAnvilChunkCodec, PmAnvilSubChunks, SubChunkCodec,
    };
    pub use valence_nbt::{compound, Compound, List, Value};

    pub use super::*;
}
