use primitive_types::U256;
use thiserror::Error;

use crate::name::Name;

use super::AssetId;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account name '{0}' is invalid")]
    InvalidName(Name),

    // Sender is not entitled to act on this account name
    #[error("Account '{0}' is invalid")]
    AccountInvalid(Name),

    #[error("Account ID {0} is invalid")]
    InvalidId(u64),

    #[error("Account '{0}' does not exist")]
    NotFound(Name),

    #[error("Account ID {0} does not exist")]
    IdNotFound(u64),

    #[error("Account '{0}' already exists")]
    AlreadyExists(Name),

    #[error("Name '{0}' is already taken")]
    NameIsExist(Name),

    #[error("Account '{0}' is destroyed")]
    Destroyed(Name),

    #[error("Account counter is missing")]
    CounterNotExist,

    #[error("Asset {0} is not held by the account")]
    AssetNotHeld(AssetId),

    #[error("Asset {0} is already held by the account")]
    AssetAlreadyHeld(AssetId),

    #[error("Insufficient balance of asset {asset}: need {need}, have {have}")]
    InsufficientBalance {
        asset: AssetId,
        need: U256,
        have: U256,
    },

    #[error("Balance overflow on asset {0}")]
    BalanceOverflow(AssetId),

    #[error("Account has no code")]
    CodeIsEmpty,

    #[error("Author already exists")]
    AuthorAlreadyExists,

    #[error("Author does not exist")]
    AuthorNotFound,
}
