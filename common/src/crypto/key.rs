//! Public key and address types used by the authority system.
//!
//! Signature recovery itself lives outside this crate: callers hand over
//! already-recovered public keys. An address is the last 20 bytes of the
//! keccak256 hash of the uncompressed key without its format prefix.

use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    str::FromStr,
};
use thiserror::Error;

use super::keccak256;
use crate::serializer::{Reader, ReaderError, Serializer, Writer};

/// Size of an uncompressed public key in bytes, including the 0x04 prefix.
pub const PUBLIC_KEY_SIZE: usize = 65;

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

#[derive(Error, Debug, Clone)]
pub enum KeyError {
    #[error("Invalid public key length: expected {PUBLIC_KEY_SIZE}, got {0}")]
    InvalidPublicKeyLength(usize),
    #[error("Invalid address length: expected {ADDRESS_SIZE}, got {0}")]
    InvalidAddressLength(usize),
    #[error("Invalid hex string")]
    InvalidHex,
}

/// Uncompressed public key (65 bytes).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0; PUBLIC_KEY_SIZE])
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_SIZE] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKeyLength(slice.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Derive the address of this key: keccak256 over the key material
    /// without the one-byte format prefix, keeping the low 20 bytes.
    pub fn to_address(&self) -> Address {
        let hash = keccak256(&self.0[1..]);
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(&hash.as_bytes()[12..]);
        Address::new(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidHex)?;
        Self::from_slice(&bytes)
    }
}

impl Serializer for PublicKey {
    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self(reader.read_bytes_65()?))
    }

    fn size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'a> Deserialize<'a> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let hex = String::deserialize(deserializer)?;
        PublicKey::from_str(&hex).map_err(SerdeError::custom)
    }
}

/// Account address derived from a public key (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; ADDRESS_SIZE] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidAddressLength(slice.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidHex)?;
        Self::from_slice(&bytes)
    }
}

impl Serializer for Address {
    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self(reader.read_bytes_20()?))
    }

    fn size(&self) -> usize {
        ADDRESS_SIZE
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'a> Deserialize<'a> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let hex = String::deserialize(deserializer)?;
        Address::from_str(&hex).map_err(SerdeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> PublicKey {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes[0] = 0x04;
        for (i, b) in bytes.iter_mut().enumerate().skip(1) {
            *b = i as u8;
        }
        PublicKey::new(bytes)
    }

    #[test]
    fn test_address_derivation_skips_prefix() {
        let key = test_key();
        let addr = key.to_address();

        let expected = keccak256(&key.as_bytes()[1..]);
        assert_eq!(addr.as_bytes(), &expected.as_bytes()[12..]);
    }

    #[test]
    fn test_hex_roundtrip() {
        let key = test_key();
        assert_eq!(PublicKey::from_str(&key.to_hex()).unwrap(), key);

        let addr = key.to_address();
        assert_eq!(Address::from_str(&addr.to_hex()).unwrap(), addr);
    }
}
