//! Action envelope.
//!
//! A transaction carries a vector of actions; each action is the smallest
//! unit of intent, with a sender, a recipient, an asset value moved between
//! them and a type-dependent payload. Signature material is recovered by the
//! signer primitive outside this crate.

mod payload;

pub use payload::*;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    account::{AssetId, Nonce},
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// All action types the state manager can execute. The numeric identifiers
/// are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CreateAccount,
    UpdateAccount,
    UpdateAccountAuthor,
    IncreaseAsset,
    IssueAsset,
    DestroyAsset,
    SetAssetOwner,
    UpdateAsset,
    Transfer,
}

impl ActionType {
    pub const fn type_id(self) -> u64 {
        match self {
            ActionType::CreateAccount => 0x100,
            ActionType::UpdateAccount => 0x101,
            ActionType::UpdateAccountAuthor => 0x102,
            ActionType::IncreaseAsset => 0x200,
            ActionType::IssueAsset => 0x201,
            ActionType::DestroyAsset => 0x202,
            ActionType::SetAssetOwner => 0x203,
            ActionType::UpdateAsset => 0x204,
            ActionType::Transfer => 0x205,
        }
    }

    pub const fn from_type_id(id: u64) -> Option<Self> {
        match id {
            0x100 => Some(ActionType::CreateAccount),
            0x101 => Some(ActionType::UpdateAccount),
            0x102 => Some(ActionType::UpdateAccountAuthor),
            0x200 => Some(ActionType::IncreaseAsset),
            0x201 => Some(ActionType::IssueAsset),
            0x202 => Some(ActionType::DestroyAsset),
            0x203 => Some(ActionType::SetAssetOwner),
            0x204 => Some(ActionType::UpdateAsset),
            0x205 => Some(ActionType::Transfer),
            _ => None,
        }
    }
}

/// One action of a transaction.
///
/// The type is kept as its raw wire identifier so that an action with an
/// unknown type still decodes and is rejected by the dispatcher rather than
/// by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    type_id: u64,
    nonce: Nonce,
    sender: Name,
    recipient: Name,
    asset_id: AssetId,
    value: U256,
    data: Vec<u8>,
}

impl Action {
    pub fn new(
        action_type: ActionType,
        sender: Name,
        recipient: Name,
        nonce: Nonce,
        asset_id: AssetId,
        value: U256,
        data: Vec<u8>,
    ) -> Self {
        Self {
            type_id: action_type.type_id(),
            nonce,
            sender,
            recipient,
            asset_id,
            value,
            data,
        }
    }

    pub fn type_id(&self) -> u64 {
        self.type_id
    }

    pub fn action_type(&self) -> Option<ActionType> {
        ActionType::from_type_id(self.type_id)
    }

    pub fn sender(&self) -> &Name {
        &self.sender
    }

    pub fn recipient(&self) -> &Name {
        &self.recipient
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Serializer for Action {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.type_id);
        writer.write_u64(self.nonce);
        self.sender.write(writer);
        self.recipient.write(writer);
        writer.write_u64(self.asset_id);
        self.value.write(writer);
        self.data.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            type_id: reader.read_u64()?,
            nonce: reader.read_u64()?,
            sender: Name::read(reader)?,
            recipient: Name::read(reader)?,
            asset_id: reader.read_u64()?,
            value: U256::read(reader)?,
            data: Vec::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        8 + 8
            + self.sender.size()
            + self.recipient.size()
            + 8
            + self.value.size()
            + self.data.size()
    }
}

/// Side-effect transfer performed by a handler on behalf of a system
/// account, reported back to the host for receipts and indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalAction {
    action: Action,
}

impl InternalAction {
    /// Record a system transfer of `value` of `asset_id` from `from` to `to`.
    pub fn transfer(from: Name, to: Name, asset_id: AssetId, value: U256) -> Self {
        Self {
            action: Action::new(
                ActionType::Transfer,
                from,
                to,
                0,
                asset_id,
                value,
                Vec::new(),
            ),
        }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}
