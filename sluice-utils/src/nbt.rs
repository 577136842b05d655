//! Helpers for reading loosely typed values out of owned NBT compounds.

use simdnbt::owned::{NbtCompound, NbtTag};
use thiserror::Error;

/// Errors raised while reading persisted state back out of NBT.
///
/// Readers return these so callers can decide how to fall back; nothing in
/// the persistence path panics on malformed data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NbtReadError {
    /// A tag was present but had the wrong type.
    #[error("tag `{key}` has the wrong type, expected {expected}")]
    WrongType {
        /// The offending key.
        key: &'static str,
        /// The expected tag type.
        expected: &'static str,
    },
    /// An integer tag was outside its valid range.
    #[error("tag `{key}` value {value} is outside {min}..={max}")]
    OutOfRange {
        /// The offending key.
        key: &'static str,
        /// The stored value.
        value: i32,
        /// Smallest accepted value.
        min: i32,
        /// Largest accepted value.
        max: i32,
    },
    /// A string tag did not hold an accepted value.
    #[error("tag `{key}` has invalid value `{value}`")]
    InvalidValue {
        /// The offending key.
        key: &'static str,
        /// The stored value.
        value: String,
    },
}

/// Helper to parse boolean from NBT (accepts Byte or Int)
#[must_use]
pub fn nbt_bool(tag: &NbtTag) -> Option<bool> {
    match tag {
        NbtTag::Byte(b) => Some(*b != 0),
        NbtTag::Int(i) => Some(*i != 0),
        _ => None,
    }
}

/// Helper to parse i32 from NBT
#[must_use]
pub fn nbt_i32(tag: &NbtTag) -> Option<i32> {
    match tag {
        NbtTag::Byte(b) => Some(i32::from(*b)),
        NbtTag::Short(s) => Some(i32::from(*s)),
        NbtTag::Int(i) => Some(*i),
        _ => None,
    }
}

/// Helper to parse a string from NBT
#[must_use]
pub fn nbt_string(tag: &NbtTag) -> Option<String> {
    match tag {
        NbtTag::String(s) => Some(s.to_str().to_string()),
        _ => None,
    }
}

/// Reads an optional integer. A missing key is `Ok(None)`, a present key of another type is an error.
pub fn read_i32(nbt: &NbtCompound, key: &'static str) -> Result<Option<i32>, NbtReadError> {
    nbt.get(key)
        .map(|tag| {
            nbt_i32(tag).ok_or(NbtReadError::WrongType {
                key,
                expected: "int",
            })
        })
        .transpose()
}

/// Reads an optional boolean stored as a byte or int.
pub fn read_bool(nbt: &NbtCompound, key: &'static str) -> Result<Option<bool>, NbtReadError> {
    nbt.get(key)
        .map(|tag| {
            nbt_bool(tag).ok_or(NbtReadError::WrongType {
                key,
                expected: "byte",
            })
        })
        .transpose()
}

/// Reads an optional string.
pub fn read_string(nbt: &NbtCompound, key: &'static str) -> Result<Option<String>, NbtReadError> {
    nbt.get(key)
        .map(|tag| {
            nbt_string(tag).ok_or(NbtReadError::WrongType {
                key,
                expected: "string",
            })
        })
        .transpose()
}

/// Reads an optional nested compound.
pub fn read_compound<'a>(
    nbt: &'a NbtCompound,
    key: &'static str,
) -> Result<Option<&'a NbtCompound>, NbtReadError> {
    match nbt.get(key) {
        None => Ok(None),
        Some(NbtTag::Compound(compound)) => Ok(Some(compound)),
        Some(_) => Err(NbtReadError::WrongType {
            key,
            expected: "compound",
        }),
    }
}
