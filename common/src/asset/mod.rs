//! Fungible asset metadata.
//!
//! Asset names share the hierarchical grammar of account names; the parent
//! asset's owner gates issuance of sub-assets. The registry driving these
//! records lives in the chain crate.

mod error;

pub use error::AssetError;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    account::{AssetId, BlockHeight},
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetObject {
    pub id: AssetId,
    pub name: Name,
    pub symbol: String,
    /// Current total supply: issuance and increases add, destruction subtracts
    pub amount: U256,
    pub decimals: u64,
    pub founder: Name,
    pub owner: Name,
    /// Maximum total supply; zero means unlimited
    pub upper_limit: U256,
    /// Optional contract account gating transfers of this asset
    pub contract: Name,
    pub description: String,
    /// Block height the asset was issued at
    pub number: BlockHeight,
}

impl AssetObject {
    pub fn has_upper_limit(&self) -> bool {
        !self.upper_limit.is_zero()
    }

    /// Transfers of a contract-gated asset must touch the contract account.
    pub fn grants_access(&self, from: &Name, to: &Name) -> bool {
        self.contract.is_empty() || self.contract == *from || self.contract == *to
    }
}

impl Serializer for AssetObject {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.id);
        self.name.write(writer);
        self.symbol.write(writer);
        self.amount.write(writer);
        writer.write_u64(self.decimals);
        self.founder.write(writer);
        self.owner.write(writer);
        self.upper_limit.write(writer);
        self.contract.write(writer);
        self.description.write(writer);
        writer.write_u64(self.number);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            id: reader.read_u64()?,
            name: Name::read(reader)?,
            symbol: String::read(reader)?,
            amount: U256::read(reader)?,
            decimals: reader.read_u64()?,
            founder: Name::read(reader)?,
            owner: Name::read(reader)?,
            upper_limit: U256::read(reader)?,
            contract: Name::read(reader)?,
            description: String::read(reader)?,
            number: reader.read_u64()?,
        })
    }

    fn size(&self) -> usize {
        8 + self.name.size()
            + self.symbol.size()
            + self.amount.size()
            + 8
            + self.founder.size()
            + self.owner.size()
            + self.upper_limit.size()
            + self.contract.size()
            + self.description.size()
            + 8
    }
}
