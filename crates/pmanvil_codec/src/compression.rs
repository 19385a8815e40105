use std::io::Read;

use flate2::bufread::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use valence_nbt::Compound;

use crate::error::SerializeChunkError;

/// The compression level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 7;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Container used to compress written records.
///
/// Reading does not need to be told which one was used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Compression {
    Gzip,
    #[default]
    Zlib,
}

/// Settings for writing chunk records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub compression: Compression,
    /// Compression effort from 0 (store only) to 9 (smallest output).
    /// Larger values are treated as 9.
    pub compression_level: u32,
}

impl CodecOptions {
    fn level(self) -> flate2::Compression {
        flate2::Compression::new(self.compression_level.min(9))
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

/// Encodes `nbt` as an unnamed root compound and compresses the result.
pub(crate) fn compress(nbt: &Compound, options: CodecOptions) -> Result<Vec<u8>, SerializeChunkError> {
    match options.compression {
        Compression::Gzip => {
            let mut z = GzEncoder::new(Vec::new(), options.level());
            nbt.to_binary(&mut z, "")?;
            Ok(z.finish()?)
        }
        Compression::Zlib => {
            let mut z = ZlibEncoder::new(Vec::new(), options.level());
            nbt.to_binary(&mut z, "")?;
            Ok(z.finish()?)
        }
    }
}

/// Decompresses a gzip or zlib stream, picking the container from the
/// leading bytes.
pub(crate) fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();

    if data.starts_with(&GZIP_MAGIC) {
        GzDecoder::new(data).read_to_end(&mut buf)?;
    } else {
        ZlibDecoder::new(data).read_to_end(&mut buf)?;
    }

    Ok(buf)
}
