//! Account manager.
//!
//! Single entry point for every mutation a transaction makes to accounts and
//! assets. Each action is processed inside a snapshot boundary of the
//! underlying store: either the whole set of writes lands, or the store is
//! reverted to its pre-action state.

use std::collections::BTreeMap;

use anyhow::anyhow;
use log::debug;
use primitive_types::U256;

use meridian_common::{
    account::{Account, AccountError, AccountId, AssetId, BlockHeight, Nonce},
    asset::{AssetError, AssetObject},
    config::{ChainConfig, ACCOUNT_ID_SEED, ACCOUNT_NAME_ID_PREFIX, ACCT_INFO_PREFIX, COUNTER_PREFIX},
    crypto::{Hash, PublicKey},
    name::Name,
    serializer::Serializer,
    transaction::{
        Action, ActionType, AuthorOpKind, CreateAccountPayload, IncreaseAssetPayload,
        InternalAction, IssueAssetPayload, SetAssetOwnerPayload, UpdateAccountAuthorPayload,
        UpdateAccountPayload, UpdateAssetPayload,
    },
};

use crate::{
    error::StateError,
    registry::AssetRegistry,
    storage::{SnapshotReader, StateStore},
};

/// Authoritative manager of account records, the name index and asset
/// balances. Owns the store; the embedded [`AssetRegistry`] shares it.
pub struct AccountManager<S: StateStore> {
    store: S,
    registry: AssetRegistry,
    config: ChainConfig,
}

impl<S: StateStore> AccountManager<S> {
    pub fn new(store: S, config: ChainConfig) -> Result<Self, StateError> {
        if config.account_manager_scope.is_empty() {
            return Err(StateError::Store(anyhow!("account manager scope is empty")));
        }

        let registry = AssetRegistry::new(config.name_config);
        let mut manager = Self {
            store,
            registry,
            config,
        };
        manager.init_account_counter()?;
        manager.registry.init(&mut manager.store)?;
        Ok(manager)
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn scope(&self) -> &str {
        &self.config.account_manager_scope
    }

    fn info_key(id: AccountId) -> String {
        format!("{ACCT_INFO_PREFIX}{id}")
    }

    fn name_id_key(name: &Name) -> String {
        format!("{ACCOUNT_NAME_ID_PREFIX}{name}")
    }

    // ===== Counter =====

    fn init_account_counter(&mut self) -> Result<(), StateError> {
        match self.get_account_counter() {
            Ok(_) => Ok(()),
            Err(StateError::Account(AccountError::CounterNotExist)) => {
                let scope = self.config.account_manager_scope.clone();
                self.store
                    .put(&scope, COUNTER_PREFIX, ACCOUNT_ID_SEED.to_bytes())?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn get_account_counter(&self) -> Result<u64, StateError> {
        let bytes = self
            .store
            .get(self.scope(), COUNTER_PREFIX)?
            .ok_or(AccountError::CounterNotExist)?;
        Ok(u64::from_bytes(&bytes)?)
    }

    // ===== Lookups =====

    pub fn account_exists(&self, name: &Name) -> Result<bool, StateError> {
        if name.is_empty() {
            return Err(AccountError::InvalidName(name.clone()).into());
        }
        Ok(self.store.get(self.scope(), &Self::name_id_key(name))?.is_some())
    }

    pub fn get_account_id_by_name(&self, name: &Name) -> Result<AccountId, StateError> {
        if name.is_empty() {
            return Err(AccountError::InvalidName(name.clone()).into());
        }

        let bytes = self
            .store
            .get(self.scope(), &Self::name_id_key(name))?
            .ok_or_else(|| AccountError::NotFound(name.clone()))?;
        Ok(u64::from_bytes(&bytes)?)
    }

    pub fn get_account_by_id(&self, id: AccountId) -> Result<Account, StateError> {
        if id == 0 {
            return Err(AccountError::InvalidId(id).into());
        }

        let bytes = self
            .store
            .get(self.scope(), &Self::info_key(id))?
            .ok_or(AccountError::IdNotFound(id))?;
        Ok(Account::from_bytes(&bytes)?)
    }

    pub fn get_account_by_name(&self, name: &Name) -> Result<Account, StateError> {
        let id = self.get_account_id_by_name(name)?;
        self.get_account_by_id(id)
    }

    /// Persist an account record. Destroyed accounts refuse every mutation.
    pub fn set_account(&mut self, account: &Account) -> Result<(), StateError> {
        if account.is_destroyed() {
            return Err(AccountError::Destroyed(account.name.clone()).into());
        }

        let scope = self.config.account_manager_scope.clone();
        self.store
            .put(&scope, &Self::info_key(account.id), account.to_bytes())?;
        Ok(())
    }

    // ===== Creation =====

    /// Create an account, allowing dotted names only when `from` is the
    /// immediate parent.
    pub fn create_any_account(
        &mut self,
        from: &Name,
        name: Name,
        founder: Name,
        number: BlockHeight,
        public_key: PublicKey,
        description: String,
    ) -> Result<(), StateError> {
        if let Some((_, sublevels)) = name.parse(&self.config.name_config) {
            if !sublevels.is_empty() && !from.is_parent_of(&name, &self.config.name_config) {
                return Err(AccountError::AccountInvalid(name).into());
            }
        }

        self.create_account(name, founder, number, public_key, description)
    }

    pub fn create_account(
        &mut self,
        name: Name,
        founder: Name,
        number: BlockHeight,
        public_key: PublicKey,
        description: String,
    ) -> Result<(), StateError> {
        if !name.is_valid(&self.config.name_config) {
            return Err(AccountError::InvalidName(name).into());
        }
        if self.account_exists(&name)? {
            return Err(AccountError::AlreadyExists(name).into());
        }
        // account and asset names live in one namespace
        if self.registry.asset_exists(&self.store, &name)? {
            return Err(AccountError::NameIsExist(name).into());
        }

        let founder = if !founder.is_empty() && founder != name {
            if !self.account_exists(&founder)? {
                return Err(AccountError::NotFound(founder).into());
            }
            founder
        } else {
            name.clone()
        };

        let mut account = Account::new(name.clone(), founder, number, public_key, description);
        let id = self.get_account_counter()? + 1;
        account.id = id;
        debug!("creating account '{name}' with id {id}");

        self.set_account(&account)?;
        // the counter key deliberately receives the same encoded bytes as the
        // name index entry: both hold the new account's id
        let encoded_id = id.to_bytes();
        let scope = self.config.account_manager_scope.clone();
        self.store
            .put(&scope, &Self::name_id_key(&name), encoded_id.clone())?;
        self.store.put(&scope, COUNTER_PREFIX, encoded_id)?;
        Ok(())
    }

    /// Destroy an account. The record is marked and additionally written
    /// under the legacy `<name>` scope, which older tooling still reads.
    pub fn delete_account_by_name(&mut self, name: &Name) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;
        account.set_destroy();

        let bytes = account.to_bytes();
        let scope = self.config.account_manager_scope.clone();
        self.store
            .put(&scope, &Self::info_key(account.id), bytes.clone())?;
        self.store.put(name.as_str(), ACCT_INFO_PREFIX, bytes)?;
        Ok(())
    }

    // ===== Record updates =====

    pub fn update_account(
        &mut self,
        name: &Name,
        payload: &UpdateAccountPayload,
    ) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;

        let founder = if payload.founder.is_empty() {
            name.clone()
        } else {
            if !self.account_exists(&payload.founder)? {
                return Err(AccountError::NotFound(payload.founder.clone()).into());
            }
            payload.founder.clone()
        };

        account.founder = founder;
        self.set_account(&account)
    }

    /// Apply authority-set mutations in payload order, then the non-zero
    /// threshold updates, and reseal the author version.
    pub fn update_account_author(
        &mut self,
        name: &Name,
        payload: &UpdateAccountAuthorPayload,
    ) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;

        for op in &payload.author_ops {
            match op.kind {
                AuthorOpKind::Add => account.add_author(op.author.clone())?,
                AuthorOpKind::Update => account.update_author(op.author.clone())?,
                AuthorOpKind::Delete => account.delete_author(&op.author.owner)?,
            }
        }

        if payload.threshold != 0 {
            account.set_threshold(payload.threshold);
        }
        if payload.update_author_threshold != 0 {
            account.set_update_author_threshold(payload.update_author_threshold);
        }
        account.recompute_author_version();
        self.set_account(&account)
    }

    pub fn get_nonce(&self, name: &Name) -> Result<Nonce, StateError> {
        Ok(self.get_account_by_name(name)?.nonce)
    }

    pub fn set_nonce(&mut self, name: &Name, nonce: Nonce) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;
        account.nonce = nonce;
        self.set_account(&account)
    }

    pub fn get_founder(&self, name: &Name) -> Result<Name, StateError> {
        Ok(self.get_account_by_name(name)?.founder)
    }

    pub fn get_author_version(&self, name: &Name) -> Result<Hash, StateError> {
        Ok(self.get_account_by_name(name)?.author_version)
    }

    // ===== Code =====

    pub fn account_has_code(&self, name: &Name) -> Result<bool, StateError> {
        Ok(self.get_account_by_name(name)?.has_code())
    }

    pub fn account_is_empty(&self, name: &Name) -> Result<bool, StateError> {
        Ok(self.get_account_by_name(name)?.is_empty())
    }

    pub fn get_code(&self, name: &Name) -> Result<Vec<u8>, StateError> {
        Ok(self.get_account_by_name(name)?.get_code()?.to_vec())
    }

    pub fn get_code_size(&self, name: &Name) -> Result<u64, StateError> {
        Ok(self.get_account_by_name(name)?.get_code_size())
    }

    pub fn get_code_hash(&self, name: &Name) -> Result<Hash, StateError> {
        Ok(self.get_account_by_name(name)?.get_code_hash().clone())
    }

    pub fn set_code(&mut self, name: &Name, code: Vec<u8>) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;
        account.set_code(code)?;
        self.set_account(&account)
    }

    /// Height of the account's last modification.
    pub fn get_account_last_change(&self, _name: &Name) -> Result<BlockHeight, StateError> {
        // TODO: needs a per-record height column next to acctInfo, fill in
        // once the storage layout grows one
        Ok(0)
    }

    // ===== Balances =====

    pub fn get_account_balance_by_id(
        &self,
        name: &Name,
        asset_id: AssetId,
        type_id: u64,
    ) -> Result<U256, StateError> {
        let account = self.get_account_by_name(name)?;
        match type_id {
            0 => Ok(account.get_balance(asset_id)?),
            1 => self.get_all_balance_by_asset_id(&account, asset_id),
            other => Err(StateError::InvalidTypeId(other)),
        }
    }

    pub fn add_account_balance_by_id(
        &mut self,
        name: &Name,
        asset_id: AssetId,
        value: U256,
    ) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;
        account.add_balance(asset_id, value)?;
        self.set_account(&account)
    }

    pub fn add_account_balance_by_name(
        &mut self,
        name: &Name,
        asset_name: &Name,
        value: U256,
    ) -> Result<(), StateError> {
        let asset_id = self
            .registry
            .get_asset_id_by_name(&self.store, asset_name)?
            .ok_or_else(|| AssetError::NotFound(asset_name.clone()))?;
        self.add_account_balance_by_id(name, asset_id, value)
    }

    pub fn sub_account_balance_by_id(
        &mut self,
        name: &Name,
        asset_id: AssetId,
        value: U256,
    ) -> Result<(), StateError> {
        let mut account = self.get_account_by_name(name)?;
        account.sub_balance(asset_id, value)?;
        self.set_account(&account)
    }

    pub fn enough_account_balance(
        &self,
        name: &Name,
        asset_id: AssetId,
        value: U256,
    ) -> Result<(), StateError> {
        Ok(self.get_account_by_name(name)?.enough_balance(asset_id, value)?)
    }

    pub fn can_transfer(
        &self,
        name: &Name,
        asset_id: AssetId,
        value: U256,
    ) -> Result<bool, StateError> {
        Ok(self.enough_account_balance(name, asset_id, value).is_ok())
    }

    /// Move `value` of `asset_id` from `from` to `to`.
    ///
    /// Zero amounts and self-transfers are no-ops; the recipient must exist,
    /// must not be destroyed, and its first touch of the asset inserts a
    /// fresh balance entry.
    pub fn transfer_asset(
        &mut self,
        from: &Name,
        to: &Name,
        asset_id: AssetId,
        value: U256,
    ) -> Result<(), StateError> {
        if value.is_zero() {
            return Ok(());
        }
        if !self.registry.has_access(&self.store, asset_id, from, to)? {
            return Err(AssetError::NoAccess(asset_id).into());
        }

        let mut from_account = self.get_account_by_name(from)?;
        from_account.enough_balance(asset_id, value)?;
        if from == to {
            return Ok(());
        }
        from_account.sub_balance(asset_id, value)?;

        let mut to_account = self.get_account_by_name(to)?;
        if to_account.is_destroyed() {
            return Err(AccountError::Destroyed(to.clone()).into());
        }
        if to_account.has_asset(asset_id) {
            to_account.add_balance(asset_id, value)?;
        } else {
            to_account.add_new_asset(asset_id, value)?;
        }

        self.set_account(&from_account)?;
        self.set_account(&to_account)
    }

    // ===== Assets =====

    pub fn get_asset_info_by_name(&self, asset_name: &Name) -> Result<AssetObject, StateError> {
        self.registry.get_asset_by_name(&self.store, asset_name)
    }

    pub fn get_asset_info_by_id(&self, asset_id: AssetId) -> Result<AssetObject, StateError> {
        self.registry.get_asset_by_id(&self.store, asset_id)
    }

    pub fn get_asset_founder(&self, asset_id: AssetId) -> Result<Name, StateError> {
        self.registry.get_founder_by_id(&self.store, asset_id)
    }

    /// Issue an asset on behalf of `from`, who must own the parent asset for
    /// dotted names.
    pub fn issue_any_asset(
        &mut self,
        from: &Name,
        payload: IssueAssetPayload,
        number: BlockHeight,
    ) -> Result<AssetId, StateError> {
        if !self
            .registry
            .is_valid_owner(&self.store, from, &payload.asset_name)?
        {
            return Err(AssetError::NotValidOwner {
                from: from.clone(),
                name: payload.asset_name,
            }
            .into());
        }

        self.issue_asset(payload, number)
    }

    pub fn issue_asset(
        &mut self,
        payload: IssueAssetPayload,
        number: BlockHeight,
    ) -> Result<AssetId, StateError> {
        if !self.account_exists(&payload.owner)? {
            return Err(AccountError::NotFound(payload.owner).into());
        }

        let founder = if payload.founder.is_empty() {
            payload.owner.clone()
        } else {
            if !self.account_exists(&payload.founder)? {
                return Err(AccountError::NotFound(payload.founder).into());
            }
            payload.founder
        };

        if !payload.contract.is_empty() && !payload.contract.is_valid(&self.config.name_config) {
            return Err(AccountError::InvalidName(payload.contract).into());
        }
        // asset and account names share one namespace
        if self.account_exists(&payload.asset_name)? {
            return Err(AccountError::NameIsExist(payload.asset_name).into());
        }

        let owner = payload.owner.clone();
        let amount = payload.amount;
        let asset_id = self.registry.issue(
            &mut self.store,
            payload.asset_name,
            number,
            payload.symbol,
            payload.amount,
            payload.decimals,
            founder,
            owner.clone(),
            payload.upper_limit,
            payload.contract,
            payload.description,
        )?;

        // the freshly issued supply lands on the owner
        self.add_account_balance_by_id(&owner, asset_id, amount)?;
        Ok(asset_id)
    }

    /// Increase an asset's supply and credit the minted amount to `to`.
    pub fn inc_asset_to_account(
        &mut self,
        from: &Name,
        to: &Name,
        asset_id: AssetId,
        amount: U256,
    ) -> Result<(), StateError> {
        self.registry
            .increase(&mut self.store, from, asset_id, amount)?;
        self.add_account_balance_by_id(to, asset_id, amount)
    }

    /// Balances of `asset_id` and of every direct sub-asset held by the
    /// account, keyed by asset ID.
    pub fn get_all_assets_by_asset_id(
        &self,
        account: &Account,
        asset_id: AssetId,
    ) -> Result<BTreeMap<AssetId, U256>, StateError> {
        let mut balances = BTreeMap::new();
        balances.insert(asset_id, account.get_balance(asset_id)?);

        let asset = self.registry.get_asset_by_id(&self.store, asset_id)?;
        for (id, balance) in account.balances() {
            if *id == asset_id {
                continue;
            }
            let sub_asset = self.registry.get_asset_by_id(&self.store, *id)?;
            if sub_asset.name.is_child_of(&asset.name, &self.config.name_config) {
                balances.insert(*id, *balance);
            }
        }
        Ok(balances)
    }

    /// Aggregate balance of an asset: the asset itself plus every direct
    /// sub-asset held by the account. Iteration is over the ordered balance
    /// map, so the fold is deterministic.
    pub fn get_all_balance_by_asset_id(
        &self,
        account: &Account,
        asset_id: AssetId,
    ) -> Result<U256, StateError> {
        let mut total = account.get_balance(asset_id).unwrap_or_default();

        let asset = self.registry.get_asset_by_id(&self.store, asset_id)?;
        for (id, balance) in account.balances() {
            if *id == asset_id {
                continue;
            }
            let sub_asset = self.registry.get_asset_by_id(&self.store, *id)?;
            if sub_asset.name.is_child_of(&asset.name, &self.config.name_config) {
                total = total
                    .checked_add(*balance)
                    .ok_or(AccountError::BalanceOverflow(asset_id))?;
            }
        }
        Ok(total)
    }

    // ===== Action pipeline =====

    /// Process one action inside a snapshot boundary. On any error the store
    /// is reverted to its pre-action state before the error is returned.
    pub fn process(
        &mut self,
        action: &Action,
        number: BlockHeight,
    ) -> Result<Vec<InternalAction>, StateError> {
        let snap = self.store.snapshot();
        match self.execute(action, number) {
            Ok(internal_actions) => Ok(internal_actions),
            Err(err) => {
                debug!(
                    "action type {:#x} from '{}' failed, reverting: {err}",
                    action.type_id(),
                    action.sender()
                );
                self.store.revert_to_snapshot(snap);
                Err(err)
            }
        }
    }

    fn execute(
        &mut self,
        action: &Action,
        number: BlockHeight,
    ) -> Result<Vec<InternalAction>, StateError> {
        // every action starts with the value transfer it carries
        self.transfer_asset(
            action.sender(),
            action.recipient(),
            action.asset_id(),
            action.value(),
        )?;

        let mut internal_actions = Vec::new();
        let Some(action_type) = action.action_type() else {
            return Err(StateError::UnknownTxType(action.type_id()));
        };

        match action_type {
            ActionType::CreateAccount => {
                let payload = CreateAccountPayload::from_bytes(action.data())?;
                let name = payload.account_name.clone();
                self.create_any_account(
                    action.sender(),
                    payload.account_name,
                    payload.founder,
                    number,
                    payload.public_key,
                    payload.description,
                )?;

                // fund the newborn from the system chain account
                if !action.value().is_zero() {
                    let system = self.config.system_account.clone();
                    self.transfer_asset(&system, &name, action.asset_id(), action.value())?;
                    internal_actions.push(InternalAction::transfer(
                        system,
                        name,
                        action.asset_id(),
                        action.value(),
                    ));
                }
            }
            ActionType::UpdateAccount => {
                let payload = UpdateAccountPayload::from_bytes(action.data())?;
                self.update_account(action.sender(), &payload)?;
            }
            ActionType::UpdateAccountAuthor => {
                let payload = UpdateAccountAuthorPayload::from_bytes(action.data())?;
                self.update_account_author(action.sender(), &payload)?;
            }
            ActionType::IssueAsset => {
                let payload = IssueAssetPayload::from_bytes(action.data())?;
                let owner = payload.owner.clone();
                let amount = payload.amount;
                let asset_id = self.issue_any_asset(action.sender(), payload, number)?;
                internal_actions.push(InternalAction::transfer(
                    self.config.chain_name.clone(),
                    owner,
                    asset_id,
                    amount,
                ));
            }
            ActionType::IncreaseAsset => {
                let payload = IncreaseAssetPayload::from_bytes(action.data())?;
                self.inc_asset_to_account(
                    action.sender(),
                    &payload.to,
                    payload.asset_id,
                    payload.amount,
                )?;
                internal_actions.push(InternalAction::transfer(
                    self.config.chain_name.clone(),
                    payload.to,
                    payload.asset_id,
                    payload.amount,
                ));
            }
            ActionType::DestroyAsset => {
                let burn_account = self.config.system_asset_account.clone();
                self.sub_account_balance_by_id(&burn_account, action.asset_id(), action.value())?;
                self.registry.destroy(
                    &mut self.store,
                    &burn_account,
                    action.asset_id(),
                    action.value(),
                )?;
                internal_actions.push(InternalAction::transfer(
                    burn_account,
                    self.config.chain_name.clone(),
                    action.asset_id(),
                    action.value(),
                ));
            }
            ActionType::UpdateAsset => {
                let payload = UpdateAssetPayload::from_bytes(action.data())?;
                if !payload.founder.is_empty() && !self.account_exists(&payload.founder)? {
                    return Err(AccountError::NotFound(payload.founder).into());
                }
                self.registry.update(
                    &mut self.store,
                    action.sender(),
                    payload.asset_id,
                    payload.founder,
                )?;
            }
            ActionType::SetAssetOwner => {
                let payload = SetAssetOwnerPayload::from_bytes(action.data())?;
                if !self.account_exists(&payload.owner)? {
                    return Err(AccountError::NotFound(payload.owner).into());
                }
                self.registry.set_owner(
                    &mut self.store,
                    action.sender(),
                    payload.asset_id,
                    payload.owner,
                )?;
            }
            ActionType::Transfer => {
                // nothing beyond the implicit transfer above
            }
        }

        Ok(internal_actions)
    }
}

impl<S: StateStore + SnapshotReader> AccountManager<S> {
    /// Account record as of the most recent snapshot at or before `time`.
    pub fn get_account_by_time(
        &self,
        name: &Name,
        time: u64,
    ) -> Result<Option<Account>, StateError> {
        let id = self.get_account_id_by_name(name)?;
        match self
            .store
            .get_snapshot_msg(self.scope(), &Self::info_key(id), time)?
        {
            Some(bytes) => Ok(Some(Account::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_balance_by_time(
        &self,
        name: &Name,
        asset_id: AssetId,
        type_id: u64,
        time: u64,
    ) -> Result<U256, StateError> {
        let account = self
            .get_account_by_time(name, time)?
            .ok_or_else(|| AccountError::NotFound(name.clone()))?;
        match type_id {
            0 => Ok(account.get_balance(asset_id)?),
            1 => self.get_all_balance_by_asset_id(&account, asset_id),
            other => Err(StateError::InvalidTypeId(other)),
        }
    }

    pub fn get_asset_amount_by_time(
        &self,
        asset_id: AssetId,
        time: u64,
    ) -> Result<U256, StateError> {
        self.registry.get_amount_at(&self.store, asset_id, time)
    }

    /// Navigate the snapshot timeline.
    ///
    /// `num` 0 returns the latest snapshot time (and `time` must be 0),
    /// 1 the snapshot before `time`, 2 the earliest snapshot after `time`.
    pub fn get_snapshot_time(&self, num: u64, time: u64) -> Result<u64, StateError> {
        match num {
            0 => {
                if time != 0 {
                    return Err(StateError::InvalidTimeParam);
                }
                self.store
                    .get_last_snapshot_time()?
                    .ok_or(StateError::SnapshotTimeNotExist)
            }
            1 => self
                .store
                .get_prev_snapshot_time(time)?
                .ok_or(StateError::SnapshotTimeNotExist),
            2 => {
                let mut current = self
                    .store
                    .get_last_snapshot_time()?
                    .ok_or(StateError::SnapshotTimeNotExist)?;
                if current <= time {
                    return Err(StateError::SnapshotTimeNotExist);
                }
                loop {
                    match self.store.get_prev_snapshot_time(current)? {
                        Some(previous) if previous > time => current = previous,
                        _ => return Ok(current),
                    }
                }
            }
            other => Err(StateError::InvalidTimeType(other)),
        }
    }
}
