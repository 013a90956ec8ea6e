//! 32-byte keccak256 digests.
//!
//! Digests seal the authority set (author versions), identify contract code
//! and feed address derivation. They travel as lowercase hex wherever they
//! leave the process.

use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

/// Size of a digest in bytes.
pub const HASH_SIZE: usize = 32;

#[derive(Error, Debug, Clone)]
pub enum HashError {
    #[error("Invalid hash length: expected {} hex characters, got {}", HASH_SIZE * 2, _0)]
    InvalidLength(usize),
    #[error("Invalid hex string")]
    InvalidHex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0; HASH_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; HASH_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        if s.len() != HASH_SIZE * 2 {
            return Err(HashError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| HashError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

/// Hash a byte array with keccak256.
#[inline(always)]
pub fn keccak256(value: &[u8]) -> Hash {
    Hash(Keccak256::digest(value).into())
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serializer for Hash {
    fn write(&self, writer: &mut Writer) {
        writer.write_hash(self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_hash()
    }

    fn size(&self) -> usize {
        HASH_SIZE
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'a> Deserialize<'a> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let hex = String::deserialize(deserializer)?;
        Hash::from_hex(&hex).map_err(SerdeError::custom)
    }
}
