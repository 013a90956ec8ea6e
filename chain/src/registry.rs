//! Asset registry.
//!
//! Owns the mapping between asset names, asset IDs and their metadata, in its
//! own store scope. The registry validates per-asset permissions (founder may
//! increase, owner may change metadata); account-side effects such as
//! crediting balances stay in the account manager.

use log::debug;
use primitive_types::U256;

use meridian_common::{
    account::{AssetId, BlockHeight},
    asset::{AssetError, AssetObject},
    config::{ASSET_COUNTER_PREFIX, ASSET_INFO_PREFIX, ASSET_MANAGER_SCOPE, ASSET_NAME_ID_PREFIX},
    name::{Name, NameConfig},
    serializer::Serializer,
};

use crate::{
    error::StateError,
    storage::{SnapshotReader, StateStore},
};

#[derive(Debug, Clone)]
pub struct AssetRegistry {
    scope: String,
    name_config: NameConfig,
}

impl AssetRegistry {
    pub fn new(name_config: NameConfig) -> Self {
        Self {
            scope: ASSET_MANAGER_SCOPE.to_string(),
            name_config,
        }
    }

    fn info_key(id: AssetId) -> String {
        format!("{ASSET_INFO_PREFIX}{id}")
    }

    fn name_id_key(name: &Name) -> String {
        format!("{ASSET_NAME_ID_PREFIX}{name}")
    }

    /// Seed the asset counter on first use.
    pub fn init<S: StateStore>(&self, store: &mut S) -> Result<(), StateError> {
        if store.get(&self.scope, ASSET_COUNTER_PREFIX)?.is_none() {
            store.put(&self.scope, ASSET_COUNTER_PREFIX, 0u64.to_bytes())?;
        }
        Ok(())
    }

    fn get_counter<S: StateStore>(&self, store: &S) -> Result<u64, StateError> {
        let bytes = store
            .get(&self.scope, ASSET_COUNTER_PREFIX)?
            .ok_or(AssetError::CounterNotExist)?;
        Ok(u64::from_bytes(&bytes)?)
    }

    pub fn asset_exists<S: StateStore>(&self, store: &S, name: &Name) -> Result<bool, StateError> {
        Ok(self.get_asset_id_by_name(store, name)?.is_some())
    }

    pub fn get_asset_id_by_name<S: StateStore>(
        &self,
        store: &S,
        name: &Name,
    ) -> Result<Option<AssetId>, StateError> {
        match store.get(&self.scope, &Self::name_id_key(name))? {
            Some(bytes) => Ok(Some(u64::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_asset_by_name<S: StateStore>(
        &self,
        store: &S,
        name: &Name,
    ) -> Result<AssetObject, StateError> {
        let id = self
            .get_asset_id_by_name(store, name)?
            .ok_or_else(|| AssetError::NotFound(name.clone()))?;
        self.get_asset_by_id(store, id)
    }

    pub fn get_asset_by_id<S: StateStore>(
        &self,
        store: &S,
        id: AssetId,
    ) -> Result<AssetObject, StateError> {
        if id == 0 {
            return Err(AssetError::InvalidId(id).into());
        }

        let bytes = store
            .get(&self.scope, &Self::info_key(id))?
            .ok_or(AssetError::IdNotFound(id))?;
        Ok(AssetObject::from_bytes(&bytes)?)
    }

    pub fn get_founder_by_id<S: StateStore>(
        &self,
        store: &S,
        id: AssetId,
    ) -> Result<Name, StateError> {
        Ok(self.get_asset_by_id(store, id)?.founder)
    }

    fn set_asset<S: StateStore>(
        &self,
        store: &mut S,
        asset: &AssetObject,
    ) -> Result<(), StateError> {
        store.put(&self.scope, &Self::info_key(asset.id), asset.to_bytes())?;
        Ok(())
    }

    /// Register a new asset and return its fresh ID.
    pub fn issue<S: StateStore>(
        &self,
        store: &mut S,
        name: Name,
        number: BlockHeight,
        symbol: String,
        amount: U256,
        decimals: u64,
        founder: Name,
        owner: Name,
        upper_limit: U256,
        contract: Name,
        description: String,
    ) -> Result<AssetId, StateError> {
        if !name.is_valid(&self.name_config) {
            return Err(AssetError::InvalidName(name).into());
        }
        if self.asset_exists(store, &name)? {
            return Err(AssetError::NameIsExist(name).into());
        }
        if !upper_limit.is_zero() && amount > upper_limit {
            return Err(AssetError::UpperLimitExceeded {
                asset: 0,
                limit: upper_limit,
                total: amount,
            }
            .into());
        }

        let id = self.get_counter(store)? + 1;
        let asset = AssetObject {
            id,
            name,
            symbol,
            amount,
            decimals,
            founder,
            owner,
            upper_limit,
            contract,
            description,
            number,
        };
        debug!("issuing asset '{}' with id {}", asset.name, id);

        self.set_asset(store, &asset)?;
        let encoded_id = id.to_bytes();
        store.put(&self.scope, &Self::name_id_key(&asset.name), encoded_id.clone())?;
        store.put(&self.scope, ASSET_COUNTER_PREFIX, encoded_id)?;
        Ok(id)
    }

    /// Mint `delta` more of an existing asset. Only the founder may increase
    /// supply, and a non-zero upper limit caps the new total.
    pub fn increase<S: StateStore>(
        &self,
        store: &mut S,
        caller: &Name,
        id: AssetId,
        delta: U256,
    ) -> Result<(), StateError> {
        let mut asset = self.get_asset_by_id(store, id)?;
        if asset.founder != *caller {
            return Err(AssetError::NoPermission {
                account: caller.clone(),
                asset: id,
            }
            .into());
        }

        let total = asset
            .amount
            .checked_add(delta)
            .ok_or(AssetError::SupplyOverflow(id))?;
        if asset.has_upper_limit() && total > asset.upper_limit {
            return Err(AssetError::UpperLimitExceeded {
                asset: id,
                limit: asset.upper_limit,
                total,
            }
            .into());
        }

        asset.amount = total;
        self.set_asset(store, &asset)
    }

    /// Burn `amount` of an asset's supply. The state manager only calls this
    /// for the designated burn account, after debiting it.
    pub fn destroy<S: StateStore>(
        &self,
        store: &mut S,
        caller: &Name,
        id: AssetId,
        amount: U256,
    ) -> Result<(), StateError> {
        let mut asset = self.get_asset_by_id(store, id)?;
        asset.amount = asset
            .amount
            .checked_sub(amount)
            .ok_or(AssetError::SupplyUnderflow {
                asset: id,
                amount,
                supply: asset.amount,
            })?;
        debug!(
            "account '{}' destroyed {} of asset {}",
            caller, amount, id
        );
        self.set_asset(store, &asset)
    }

    /// Change the founder. Only the owner may update asset metadata; an
    /// empty founder resets it to the owner.
    pub fn update<S: StateStore>(
        &self,
        store: &mut S,
        caller: &Name,
        id: AssetId,
        founder: Name,
    ) -> Result<(), StateError> {
        let mut asset = self.get_asset_by_id(store, id)?;
        if asset.owner != *caller {
            return Err(AssetError::NoPermission {
                account: caller.clone(),
                asset: id,
            }
            .into());
        }

        asset.founder = if founder.is_empty() {
            asset.owner.clone()
        } else {
            founder
        };
        self.set_asset(store, &asset)
    }

    /// Hand the asset over to a new owner.
    pub fn set_owner<S: StateStore>(
        &self,
        store: &mut S,
        caller: &Name,
        id: AssetId,
        owner: Name,
    ) -> Result<(), StateError> {
        let mut asset = self.get_asset_by_id(store, id)?;
        if asset.owner != *caller {
            return Err(AssetError::NoPermission {
                account: caller.clone(),
                asset: id,
            }
            .into());
        }

        asset.owner = owner;
        self.set_asset(store, &asset)
    }

    /// Capability check for a transfer of this asset.
    pub fn has_access<S: StateStore>(
        &self,
        store: &S,
        id: AssetId,
        from: &Name,
        to: &Name,
    ) -> Result<bool, StateError> {
        let asset = self.get_asset_by_id(store, id)?;
        Ok(asset.grants_access(from, to))
    }

    /// True iff `from` is allowed to issue an asset called `name`:
    /// root names are open, sub-asset names require owning the parent asset.
    pub fn is_valid_owner<S: StateStore>(
        &self,
        store: &S,
        from: &Name,
        name: &Name,
    ) -> Result<bool, StateError> {
        let Some((_, sublevels)) = name.parse(&self.name_config) else {
            return Ok(false);
        };
        if sublevels.is_empty() {
            return Ok(true);
        }

        let parent = match name.as_str().rsplit_once('.') {
            Some((parent, _)) => Name::new(parent),
            None => return Ok(false),
        };
        match self.get_asset_id_by_name(store, &parent)? {
            Some(parent_id) => {
                let parent_asset = self.get_asset_by_id(store, parent_id)?;
                Ok(parent_asset.owner == *from)
            }
            None => Ok(false),
        }
    }

    /// Total supply of the asset in the most recent recorded snapshot at or
    /// before `time`.
    pub fn get_amount_at<S: StateStore + SnapshotReader>(
        &self,
        store: &S,
        id: AssetId,
        time: u64,
    ) -> Result<U256, StateError> {
        if id == 0 {
            return Err(AssetError::InvalidId(id).into());
        }

        match store.get_snapshot_msg(&self.scope, &Self::info_key(id), time)? {
            Some(bytes) => Ok(AssetObject::from_bytes(&bytes)?.amount),
            None => Err(AssetError::IdNotFound(id).into()),
        }
    }
}
