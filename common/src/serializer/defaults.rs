use std::collections::BTreeMap;

use primitive_types::U256;

use super::{Reader, ReaderError, Serializer, Writer};

impl Serializer for u8 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u8()
    }

    fn size(&self) -> usize {
        1
    }
}

impl Serializer for u16 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u16(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u16()
    }

    fn size(&self) -> usize {
        2
    }
}

impl Serializer for u32 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u32(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u32()
    }

    fn size(&self) -> usize {
        4
    }
}

impl Serializer for u64 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u64()
    }

    fn size(&self) -> usize {
        8
    }
}

impl Serializer for u128 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u128(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u128()
    }

    fn size(&self) -> usize {
        16
    }
}

impl Serializer for bool {
    fn write(&self, writer: &mut Writer) {
        writer.write_bool(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_bool()
    }

    fn size(&self) -> usize {
        1
    }
}

impl Serializer for String {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_string()
    }

    fn size(&self) -> usize {
        2 + self.len()
    }
}

impl<T: Serializer> Serializer for Option<T> {
    fn write(&self, writer: &mut Writer) {
        match self {
            Some(value) => {
                writer.write_bool(true);
                value.write(writer);
            }
            None => writer.write_bool(false),
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        if reader.read_bool()? {
            Ok(Some(T::read(reader)?))
        } else {
            Ok(None)
        }
    }

    fn size(&self) -> usize {
        1 + self.as_ref().map(Serializer::size).unwrap_or(0)
    }
}

impl<T: Serializer> Serializer for Vec<T> {
    fn write(&self, writer: &mut Writer) {
        debug_assert!(self.len() <= u32::MAX as usize);
        writer.write_u32(self.len() as u32);
        for item in self {
            item.write(writer);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let count = reader.read_u32()? as usize;
        // each element consumes at least one byte, cheap bound against bogus counts
        if count > reader.size() {
            return Err(ReaderError::InvalidSize);
        }

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::read(reader)?);
        }
        Ok(items)
    }

    fn size(&self) -> usize {
        4 + self.iter().map(Serializer::size).sum::<usize>()
    }
}

// Keys are written in ascending order, which makes the encoding canonical
impl<K: Serializer + Ord, V: Serializer> Serializer for BTreeMap<K, V> {
    fn write(&self, writer: &mut Writer) {
        debug_assert!(self.len() <= u32::MAX as usize);
        writer.write_u32(self.len() as u32);
        for (key, value) in self {
            key.write(writer);
            value.write(writer);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let count = reader.read_u32()? as usize;
        if count > reader.size() {
            return Err(ReaderError::InvalidSize);
        }

        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = K::read(reader)?;
            let value = V::read(reader)?;
            // keys must be strictly ascending or the encoding would not round-trip
            if let Some((last, _)) = map.last_key_value() {
                if *last >= key {
                    return Err(ReaderError::InvalidValue);
                }
            }
            map.insert(key, value);
        }
        Ok(map)
    }

    fn size(&self) -> usize {
        4 + self.iter().map(|(k, v)| k.size() + v.size()).sum::<usize>()
    }
}

// Big integers are written as a length byte followed by the minimal
// big-endian representation. Non-minimal encodings (leading zero) are
// rejected so a given value has exactly one byte form.
impl Serializer for U256 {
    fn write(&self, writer: &mut Writer) {
        let bytes = self.to_big_endian();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        let minimal = &bytes[skip..];
        writer.write_u8(minimal.len() as u8);
        writer.write_bytes(minimal);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let len = reader.read_u8()? as usize;
        if len > 32 {
            return Err(ReaderError::InvalidValue);
        }

        let bytes = reader.read_bytes_ref(len)?;
        if !bytes.is_empty() && bytes[0] == 0 {
            return Err(ReaderError::InvalidValue);
        }
        Ok(U256::from_big_endian(bytes))
    }

    fn size(&self) -> usize {
        1 + (32 - self
            .to_big_endian()
            .iter()
            .take_while(|b| **b == 0)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serializer + PartialEq + std::fmt::Debug>(value: T) {
        let bytes = value.to_bytes();
        let decoded = T::from_bytes(&bytes).unwrap();
        assert_eq!(value, decoded);
        assert_eq!(bytes.len(), value.size());
    }

    #[test]
    fn test_primitives_roundtrip() {
        roundtrip(42u8);
        roundtrip(0xBEEFu16);
        roundtrip(u32::MAX);
        roundtrip(u64::MAX);
        roundtrip(true);
        roundtrip(String::from("meridian"));
        roundtrip(Some(7u64));
        roundtrip(Option::<u64>::None);
        roundtrip(vec![1u64, 2, 3]);
    }

    #[test]
    fn test_u256_minimal_encoding() {
        roundtrip(U256::zero());
        roundtrip(U256::from(1u64));
        roundtrip(U256::from(u64::MAX));
        roundtrip(U256::MAX);

        // zero is encoded as a single zero-length byte
        assert_eq!(U256::zero().to_bytes(), vec![0]);
        // 256 = 0x0100, two bytes
        assert_eq!(U256::from(256u64).to_bytes(), vec![2, 1, 0]);
    }

    #[test]
    fn test_u256_rejects_leading_zero() {
        // value 1 padded to two bytes is not canonical
        let bytes = vec![2, 0, 1];
        assert!(U256::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_map_rejects_duplicate_keys() {
        let mut writer = Writer::new();
        writer.write_u32(2);
        writer.write_u64(5);
        writer.write_u64(10);
        writer.write_u64(5);
        writer.write_u64(20);
        assert!(BTreeMap::<u64, u64>::from_bytes(writer.as_bytes()).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = 9u64.to_bytes();
        bytes.push(0);
        assert!(u64::from_bytes(&bytes).is_err());
    }
}
