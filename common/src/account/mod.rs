//! In-memory account record.
//!
//! An account is decoded from the store, mutated by exactly one handler and
//! re-encoded; nothing here performs I/O. The field order of the canonical
//! encoding is wire-stable: changing it is a hard fork.

mod author;
mod error;

pub use author::{Author, Owner};
pub use error::AccountError;

use std::collections::BTreeMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    crypto::{keccak256, Hash, PublicKey},
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Unique account identifier, assigned from the global counter
pub type AccountId = u64;
/// Fungible asset identifier, assigned by the asset registry
pub type AssetId = u64;
/// Replay protection counter
pub type Nonce = u64;
/// Block height
pub type BlockHeight = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: Name,
    pub id: AccountId,
    /// Block height the account was created at
    pub number: BlockHeight,
    pub nonce: Nonce,
    pub founder: Name,
    pub authors: Vec<Author>,
    /// Minimum summed author weight for a general action
    pub threshold: u64,
    /// Minimum summed author weight for mutating the authority set itself.
    /// Zero falls back to `threshold`.
    pub update_author_threshold: u64,
    /// Content hash of (authors, threshold, update_author_threshold)
    pub author_version: Hash,
    /// Balances ordered by asset ID. An absent entry means the asset was
    /// never held; an explicit zero means held and drained.
    pub balances: BTreeMap<AssetId, U256>,
    pub code: Vec<u8>,
    pub code_hash: Hash,
    pub code_size: u64,
    pub destroyed: bool,
    pub description: String,
}

impl Account {
    pub fn new(
        name: Name,
        founder: Name,
        number: BlockHeight,
        public_key: PublicKey,
        description: String,
    ) -> Self {
        let mut account = Self {
            name,
            id: 0,
            number,
            nonce: 0,
            founder,
            authors: vec![Author::new(Owner::PublicKey(public_key), 1)],
            threshold: 1,
            update_author_threshold: 1,
            author_version: Hash::zero(),
            balances: BTreeMap::new(),
            code: Vec::new(),
            code_hash: Hash::zero(),
            code_size: 0,
            destroyed: false,
            description,
        };
        account.recompute_author_version();
        account
    }

    // ===== Balances =====

    pub fn get_balance(&self, asset: AssetId) -> Result<U256, AccountError> {
        self.balances
            .get(&asset)
            .copied()
            .ok_or(AccountError::AssetNotHeld(asset))
    }

    pub fn has_asset(&self, asset: AssetId) -> bool {
        self.balances.contains_key(&asset)
    }

    pub fn balances(&self) -> &BTreeMap<AssetId, U256> {
        &self.balances
    }

    /// Overwrite the balance of an asset the account already holds.
    pub fn set_balance(&mut self, asset: AssetId, value: U256) -> Result<(), AccountError> {
        match self.balances.get_mut(&asset) {
            Some(balance) => {
                *balance = value;
                Ok(())
            }
            None => Err(AccountError::AssetNotHeld(asset)),
        }
    }

    /// Insert the first balance entry for an asset.
    pub fn add_new_asset(&mut self, asset: AssetId, value: U256) -> Result<(), AccountError> {
        if self.balances.contains_key(&asset) {
            return Err(AccountError::AssetAlreadyHeld(asset));
        }
        self.balances.insert(asset, value);
        Ok(())
    }

    /// Add to the balance of an asset, inserting the entry on first touch.
    pub fn add_balance(&mut self, asset: AssetId, value: U256) -> Result<(), AccountError> {
        match self.balances.get_mut(&asset) {
            Some(balance) => {
                *balance = balance
                    .checked_add(value)
                    .ok_or(AccountError::BalanceOverflow(asset))?;
            }
            None => {
                self.balances.insert(asset, value);
            }
        }
        Ok(())
    }

    /// Subtract from the balance of an asset. Underflow is an error, the
    /// entry itself is kept even when drained to zero.
    pub fn sub_balance(&mut self, asset: AssetId, value: U256) -> Result<(), AccountError> {
        let balance = self
            .balances
            .get_mut(&asset)
            .ok_or(AccountError::AssetNotHeld(asset))?;
        *balance = balance
            .checked_sub(value)
            .ok_or(AccountError::InsufficientBalance {
                asset,
                need: value,
                have: *balance,
            })?;
        Ok(())
    }

    pub fn enough_balance(&self, asset: AssetId, value: U256) -> Result<(), AccountError> {
        let balance = self.get_balance(asset)?;
        if balance < value {
            return Err(AccountError::InsufficientBalance {
                asset,
                need: value,
                have: balance,
            });
        }
        Ok(())
    }

    // ===== Authority set =====

    fn author_position(&self, owner: &Owner) -> Option<usize> {
        self.authors.iter().position(|author| author.owner == *owner)
    }

    pub fn add_author(&mut self, author: Author) -> Result<(), AccountError> {
        if self.author_position(&author.owner).is_some() {
            return Err(AccountError::AuthorAlreadyExists);
        }
        self.authors.push(author);
        Ok(())
    }

    /// Replace the author with the same owner identity.
    pub fn update_author(&mut self, author: Author) -> Result<(), AccountError> {
        let position = self
            .author_position(&author.owner)
            .ok_or(AccountError::AuthorNotFound)?;
        self.authors[position] = author;
        Ok(())
    }

    pub fn delete_author(&mut self, owner: &Owner) -> Result<(), AccountError> {
        let position = self
            .author_position(owner)
            .ok_or(AccountError::AuthorNotFound)?;
        self.authors.remove(position);
        Ok(())
    }

    pub fn set_threshold(&mut self, threshold: u64) {
        self.threshold = threshold;
    }

    pub fn set_update_author_threshold(&mut self, threshold: u64) {
        self.update_author_threshold = threshold;
    }

    /// Recompute the authority version hash. Must be called after every
    /// change to the authors or the thresholds; readers assert against it.
    pub fn recompute_author_version(&mut self) {
        let mut writer = Writer::new();
        self.authors.write(&mut writer);
        writer.write_u64(self.threshold);
        writer.write_u64(self.update_author_threshold);
        self.author_version = keccak256(writer.as_bytes());
    }

    // ===== Code =====

    pub fn set_code(&mut self, code: Vec<u8>) -> Result<(), AccountError> {
        if code.is_empty() {
            return Err(AccountError::CodeIsEmpty);
        }
        self.code_hash = keccak256(&code);
        self.code_size = code.len() as u64;
        self.code = code;
        Ok(())
    }

    pub fn get_code(&self) -> Result<&[u8], AccountError> {
        if self.code.is_empty() {
            return Err(AccountError::CodeIsEmpty);
        }
        Ok(&self.code)
    }

    pub fn has_code(&self) -> bool {
        self.code_size > 0
    }

    pub fn get_code_size(&self) -> u64 {
        self.code_size
    }

    pub fn get_code_hash(&self) -> &Hash {
        &self.code_hash
    }

    // ===== Lifecycle =====

    /// Mark the account destroyed. The flag is sticky: the record stays
    /// readable for audit but refuses every further mutation.
    pub fn set_destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_empty(&self) -> bool {
        !self.has_code() && self.balances.is_empty() && self.nonce == 0
    }
}

impl Serializer for Account {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        writer.write_u64(self.id);
        writer.write_u64(self.number);
        writer.write_u64(self.nonce);
        self.founder.write(writer);
        self.authors.write(writer);
        writer.write_u64(self.threshold);
        writer.write_u64(self.update_author_threshold);
        self.author_version.write(writer);
        self.balances.write(writer);
        self.code.write(writer);
        self.code_hash.write(writer);
        writer.write_u64(self.code_size);
        writer.write_bool(self.destroyed);
        self.description.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            name: Name::read(reader)?,
            id: reader.read_u64()?,
            number: reader.read_u64()?,
            nonce: reader.read_u64()?,
            founder: Name::read(reader)?,
            authors: Vec::read(reader)?,
            threshold: reader.read_u64()?,
            update_author_threshold: reader.read_u64()?,
            author_version: Hash::read(reader)?,
            balances: BTreeMap::read(reader)?,
            code: Vec::read(reader)?,
            code_hash: Hash::read(reader)?,
            code_size: reader.read_u64()?,
            destroyed: reader.read_bool()?,
            description: String::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        self.name.size()
            + 8 // id
            + 8 // number
            + 8 // nonce
            + self.founder.size()
            + self.authors.size()
            + 8 // threshold
            + 8 // update_author_threshold
            + self.author_version.size()
            + self.balances.size()
            + self.code.size()
            + self.code_hash.size()
            + 8 // code_size
            + 1 // destroyed
            + self.description.size()
    }
}
