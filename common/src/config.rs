use serde::{Deserialize, Serialize};

use crate::name::{Name, NameConfig};

// Account IDs below this value are reserved for system accounts.
// The global counter is seeded with it, so the first user account gets 4097.
pub const ACCOUNT_ID_SEED: u64 = 4096;

// Name grammar bounds. The minimum root length is fixed, the maxima and the
// nesting depth seed the default `NameConfig` and may be overridden per
// chain at construction.
pub const ROOT_NAME_MIN: usize = 7;
pub const DEFAULT_ROOT_NAME_MAX: usize = 16;
pub const DEFAULT_SUB_NAME_MAX: usize = 8;
pub const DEFAULT_NAME_LEVELS: usize = 1;

// Maximum number of recovered keys a single action may carry
pub const MAX_SIGN_LENGTH: u64 = 50;
// Maximum length of a single sign-index path through the delegation graph
pub const MAX_SIGN_DEPTH: u64 = 10;

// Store scope holding account records, the name index and the counter
pub const ACCOUNT_MANAGER_SCOPE: &str = "sysAccount";
// Store scope holding the asset registry
pub const ASSET_MANAGER_SCOPE: &str = "sysAsset";

// Key layout inside the account scope
pub const ACCT_INFO_PREFIX: &str = "acctInfo";
pub const ACCOUNT_NAME_ID_PREFIX: &str = "accountNameId";
pub const COUNTER_PREFIX: &str = "accountCounter";

// Key layout inside the asset scope
pub const ASSET_INFO_PREFIX: &str = "assetInfo";
pub const ASSET_NAME_ID_PREFIX: &str = "assetNameId";
pub const ASSET_COUNTER_PREFIX: &str = "assetCounter";

// System account names
pub const SYSTEM_ACCOUNT: &str = "meridian.account";
pub const SYSTEM_ASSET_ACCOUNT: &str = "meridian.asset";
pub const CHAIN_NAME: &str = "meridian";

/// Chain-wide configuration for the account and asset state manager.
///
/// Built once at startup and threaded through construction; nothing in this
/// crate reads process-wide mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Store scope for account records, name index and counter
    pub account_manager_scope: String,
    /// Chain account funding newly created accounts
    pub system_account: Name,
    /// Account that burned assets are debited from
    pub system_asset_account: Name,
    /// Mint source recorded on issuance internal actions
    pub chain_name: Name,
    /// Name grammar bounds, shared by accounts and assets
    pub name_config: NameConfig,
    pub max_sign_length: u64,
    pub max_sign_depth: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            account_manager_scope: ACCOUNT_MANAGER_SCOPE.to_string(),
            system_account: Name::new(SYSTEM_ACCOUNT),
            system_asset_account: Name::new(SYSTEM_ASSET_ACCOUNT),
            chain_name: Name::new(CHAIN_NAME),
            name_config: NameConfig::default(),
            max_sign_length: MAX_SIGN_LENGTH,
            max_sign_depth: MAX_SIGN_DEPTH,
        }
    }
}
