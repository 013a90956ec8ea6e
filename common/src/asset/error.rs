use primitive_types::U256;
use thiserror::Error;

use crate::{account::AssetId, name::Name};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset name '{0}' is invalid")]
    InvalidName(Name),

    #[error("Asset ID {0} is invalid")]
    InvalidId(u64),

    #[error("Asset '{0}' does not exist")]
    NotFound(Name),

    #[error("Asset ID {0} does not exist")]
    IdNotFound(AssetId),

    #[error("Asset name '{0}' is already taken")]
    NameIsExist(Name),

    #[error("Asset counter is missing")]
    CounterNotExist,

    #[error("Account '{account}' has no permission on asset {asset}")]
    NoPermission { account: Name, asset: AssetId },

    #[error("Account '{from}' may not issue asset '{name}'")]
    NotValidOwner { from: Name, name: Name },

    #[error("No transfer access on asset {0}")]
    NoAccess(AssetId),

    #[error("Upper limit exceeded on asset {asset}: limit {limit}, requested total {total}")]
    UpperLimitExceeded {
        asset: AssetId,
        limit: U256,
        total: U256,
    },

    #[error("Supply overflow on asset {0}")]
    SupplyOverflow(AssetId),

    #[error("Cannot destroy {amount} of asset {asset}, supply is {supply}")]
    SupplyUnderflow {
        asset: AssetId,
        amount: U256,
        supply: U256,
    },
}
