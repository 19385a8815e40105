//! Typed access to chunk record fields.
//!
//! Every getter tells a missing key ([`CorruptedChunk::MissingKey`]) apart
//! from a key holding the wrong kind of tag
//! ([`CorruptedChunk::InvalidType`]).

use valence_nbt::{Compound, Value};

use crate::CorruptedChunk;

/// Extension methods for reading chunk record fields out of a [`Compound`].
pub trait CompoundExt {
    fn int(&self, key: &'static str) -> Result<i32, CorruptedChunk>;

    fn byte(&self, key: &'static str) -> Result<i8, CorruptedChunk>;

    /// Like [`CompoundExt::byte`], but a missing key yields `default`.
    fn byte_or(&self, key: &'static str, default: i8) -> Result<i8, CorruptedChunk>;

    /// Reads a byte array of exactly `N` bytes.
    fn fixed_byte_array<const N: usize>(
        &self,
        key: &'static str,
    ) -> Result<Box<[u8; N]>, CorruptedChunk>;

    /// Like [`CompoundExt::fixed_byte_array`], but a missing key yields
    /// `None`.
    fn opt_fixed_byte_array<const N: usize>(
        &self,
        key: &'static str,
    ) -> Result<Option<Box<[u8; N]>>, CorruptedChunk>;
}

impl CompoundExt for Compound {
    fn int(&self, key: &'static str) -> Result<i32, CorruptedChunk> {
        match self.get(key) {
            Some(Value::Int(i)) => Ok(*i),
            Some(_) => Err(invalid_type(key, "an int")),
            None => Err(CorruptedChunk::MissingKey { key }),
        }
    }

    fn byte(&self, key: &'static str) -> Result<i8, CorruptedChunk> {
        match self.get(key) {
            Some(Value::Byte(b)) => Ok(*b),
            Some(_) => Err(invalid_type(key, "a byte")),
            None => Err(CorruptedChunk::MissingKey { key }),
        }
    }

    fn byte_or(&self, key: &'static str, default: i8) -> Result<i8, CorruptedChunk> {
        match self.byte(key) {
            Err(CorruptedChunk::MissingKey { .. }) => Ok(default),
            res => res,
        }
    }

    fn fixed_byte_array<const N: usize>(
        &self,
        key: &'static str,
    ) -> Result<Box<[u8; N]>, CorruptedChunk> {
        self.opt_fixed_byte_array(key)?
            .ok_or(CorruptedChunk::MissingKey { key })
    }

    fn opt_fixed_byte_array<const N: usize>(
        &self,
        key: &'static str,
    ) -> Result<Option<Box<[u8; N]>>, CorruptedChunk> {
        let bytes = match self.get(key) {
            Some(Value::ByteArray(bytes)) => bytes,
            Some(_) => return Err(invalid_type(key, "a byte array")),
            None => return Ok(None),
        };

        if bytes.len() != N {
            return Err(CorruptedChunk::InvalidLength {
                key,
                len: bytes.len(),
                expected: N,
            });
        }

        let mut array = Box::new([0; N]);
        for (dst, &src) in array.iter_mut().zip(bytes) {
            *dst = src as u8;
        }

        Ok(Some(array))
    }
}

/// Converts unsigned bytes into the signed form NBT byte arrays are made of.
pub fn to_nbt_bytes(bytes: &[u8]) -> Vec<i8> {
    bytes.iter().map(|&b| b as i8).collect()
}

fn invalid_type(key: &'static str, expected: &'static str) -> CorruptedChunk {
    CorruptedChunk::InvalidType { key, expected }
}

#[cfg(test)]
mod tests {
    use valence_nbt::compound;

    use super::*;

    #[test]
    fn missing_and_mistyped_keys_differ() {
        let nbt = compound! { "xPos" => 5_i64 };

        assert!(matches!(
            nbt.int("xPos"),
            Err(CorruptedChunk::InvalidType { key: "xPos", .. })
        ));
        assert!(matches!(
            nbt.int("zPos"),
            Err(CorruptedChunk::MissingKey { key: "zPos" })
        ));
    }

    #[test]
    fn byte_or_defaults_only_when_missing() {
        let nbt = compound! { "a" => 1_i8, "b" => "nope" };

        assert_eq!(nbt.byte_or("a", 0).unwrap(), 1);
        assert_eq!(nbt.byte_or("c", 7).unwrap(), 7);
        assert!(nbt.byte_or("b", 0).is_err());
    }

    #[test]
    fn fixed_byte_array_checks_length() {
        let nbt = compound! {
            "ok" => vec![-1_i8, 0, 127],
            "short" => vec![1_i8],
        };

        let ok: Box<[u8; 3]> = nbt.fixed_byte_array("ok").unwrap();
        assert_eq!(*ok, [255, 0, 127]);

        assert!(matches!(
            nbt.fixed_byte_array::<3>("short"),
            Err(CorruptedChunk::InvalidLength {
                key: "short",
                len: 1,
                expected: 3
            })
        ));
        assert!(nbt.opt_fixed_byte_array::<3>("absent").unwrap().is_none());
    }
}
