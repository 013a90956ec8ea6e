use serde::{Deserialize, Serialize};

use crate::{
    crypto::{Address, PublicKey},
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Identity controlling one slot of an account's authority set.
///
/// A `Name` owner is a delegation link to another account; `PublicKey` and
/// `Address` are terminal signers. The wire tag is part of consensus and
/// must never be renumbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Name(Name),
    PublicKey(PublicKey),
    Address(Address),
}

impl Owner {
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Owner::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_delegation(&self) -> bool {
        matches!(self, Owner::Name(_))
    }
}

impl Serializer for Owner {
    fn write(&self, writer: &mut Writer) {
        match self {
            Owner::Name(name) => {
                writer.write_u8(0);
                name.write(writer);
            }
            Owner::PublicKey(key) => {
                writer.write_u8(1);
                key.write(writer);
            }
            Owner::Address(address) => {
                writer.write_u8(2);
                address.write(writer);
            }
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        match reader.read_u8()? {
            0 => Ok(Owner::Name(Name::read(reader)?)),
            1 => Ok(Owner::PublicKey(PublicKey::read(reader)?)),
            2 => Ok(Owner::Address(Address::read(reader)?)),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1 + match self {
            Owner::Name(name) => name.size(),
            Owner::PublicKey(key) => key.size(),
            Owner::Address(address) => address.size(),
        }
    }
}

/// One entry of an account's authority set: an owner identity and the weight
/// it contributes towards the account's thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub owner: Owner,
    pub weight: u64,
    // Opaque status byte carried through the wire format
    pub status: u8,
}

impl Author {
    pub fn new(owner: Owner, weight: u64) -> Self {
        Self {
            owner,
            weight,
            status: 0,
        }
    }
}

impl Serializer for Author {
    fn write(&self, writer: &mut Writer) {
        self.owner.write(writer);
        writer.write_u64(self.weight);
        writer.write_u8(self.status);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            owner: Owner::read(reader)?,
            weight: reader.read_u64()?,
            status: reader.read_u8()?,
        })
    }

    fn size(&self) -> usize {
        self.owner.size() + 8 + 1
    }
}
