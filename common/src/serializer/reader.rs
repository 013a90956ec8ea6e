use thiserror::Error;

use crate::crypto::{Hash, HASH_SIZE};

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Not enough bytes left to read")]
    InvalidSize,
    #[error("Invalid value in byte stream")]
    InvalidValue,
    #[error("Invalid string bytes")]
    InvalidString,
    #[error("Error on try into")]
    ErrorTryInto,
}

// Reader to deserialize values from a canonical byte stream.
// Tracks how many bytes were consumed so callers can detect trailing data.
pub struct Reader<'a> {
    bytes: &'a [u8],
    total: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, total: 0 }
    }

    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            // any other byte would break canonical round-trips
            _ => Err(ReaderError::InvalidValue),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReaderError> {
        Ok(self.read_bytes_ref(n)?.to_vec())
    }

    pub fn read_bytes_ref(&mut self, n: usize) -> Result<&'a [u8], ReaderError> {
        if n > self.size() {
            return Err(ReaderError::InvalidSize);
        }

        let bytes = &self.bytes[self.total..self.total + n];
        self.total += n;
        Ok(bytes)
    }

    pub fn read_bytes_20(&mut self) -> Result<[u8; 20], ReaderError> {
        let bytes = self.read_bytes_ref(20)?;
        bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)
    }

    pub fn read_bytes_32(&mut self) -> Result<[u8; 32], ReaderError> {
        let bytes = self.read_bytes_ref(32)?;
        bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)
    }

    pub fn read_bytes_65(&mut self) -> Result<[u8; 65], ReaderError> {
        let bytes = self.read_bytes_ref(65)?;
        bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)
    }

    pub fn read_hash(&mut self) -> Result<Hash, ReaderError> {
        let bytes = self.read_bytes_ref(HASH_SIZE)?;
        let bytes: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)?;
        Ok(Hash::new(bytes))
    }

    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        let bytes = self.read_bytes_ref(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        let bytes = self.read_bytes_ref(2)?;
        Ok(u16::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)?,
        ))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        let bytes = self.read_bytes_ref(4)?;
        Ok(u32::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)?,
        ))
    }

    pub fn read_u64(&mut self) -> Result<u64, ReaderError> {
        let bytes = self.read_bytes_ref(8)?;
        Ok(u64::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)?,
        ))
    }

    pub fn read_u128(&mut self) -> Result<u128, ReaderError> {
        let bytes = self.read_bytes_ref(16)?;
        Ok(u128::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::ErrorTryInto)?,
        ))
    }

    pub fn read_string_with_size(&mut self, size: usize) -> Result<String, ReaderError> {
        let bytes = self.read_bytes(size)?;
        String::from_utf8(bytes).map_err(|_| ReaderError::InvalidString)
    }

    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        let size = self.read_u16()? as usize;
        self.read_string_with_size(size)
    }

    // Remaining bytes left to read
    pub fn size(&self) -> usize {
        self.bytes.len() - self.total
    }

    pub fn total_size(&self) -> usize {
        self.bytes.len()
    }

    pub fn total_read(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
