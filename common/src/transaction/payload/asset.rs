use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    account::AssetId,
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Payload of an `IssueAsset` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAssetPayload {
    pub asset_name: Name,
    pub symbol: String,
    /// Initial supply, credited to the owner
    pub amount: U256,
    pub decimals: u64,
    /// Empty defaults to the owner
    pub founder: Name,
    pub owner: Name,
    /// Zero means unlimited
    pub upper_limit: U256,
    /// Optional contract account gating transfers
    pub contract: Name,
    pub description: String,
}

impl Serializer for IssueAssetPayload {
    fn write(&self, writer: &mut Writer) {
        self.asset_name.write(writer);
        self.symbol.write(writer);
        self.amount.write(writer);
        writer.write_u64(self.decimals);
        self.founder.write(writer);
        self.owner.write(writer);
        self.upper_limit.write(writer);
        self.contract.write(writer);
        self.description.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            asset_name: Name::read(reader)?,
            symbol: String::read(reader)?,
            amount: U256::read(reader)?,
            decimals: reader.read_u64()?,
            founder: Name::read(reader)?,
            owner: Name::read(reader)?,
            upper_limit: U256::read(reader)?,
            contract: Name::read(reader)?,
            description: String::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        self.asset_name.size()
            + self.symbol.size()
            + self.amount.size()
            + 8
            + self.founder.size()
            + self.owner.size()
            + self.upper_limit.size()
            + self.contract.size()
            + self.description.size()
    }
}

/// Payload of an `IncreaseAsset` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncreaseAssetPayload {
    pub asset_id: AssetId,
    pub amount: U256,
    /// Account credited with the newly minted amount
    pub to: Name,
}

impl Serializer for IncreaseAssetPayload {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.asset_id);
        self.amount.write(writer);
        self.to.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            asset_id: reader.read_u64()?,
            amount: U256::read(reader)?,
            to: Name::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        8 + self.amount.size() + self.to.size()
    }
}

/// Payload of an `UpdateAsset` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetPayload {
    pub asset_id: AssetId,
    pub founder: Name,
}

impl Serializer for UpdateAssetPayload {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.asset_id);
        self.founder.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            asset_id: reader.read_u64()?,
            founder: Name::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        8 + self.founder.size()
    }
}

/// Payload of a `SetAssetOwner` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAssetOwnerPayload {
    pub asset_id: AssetId,
    pub owner: Name,
}

impl Serializer for SetAssetOwnerPayload {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.asset_id);
        self.owner.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            asset_id: reader.read_u64()?,
            owner: Name::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        8 + self.owner.size()
    }
}
