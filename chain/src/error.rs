use thiserror::Error;

use meridian_common::{account::AccountError, asset::AssetError, serializer::ReaderError};

use crate::resolver::AuthError;

/// Umbrella error of the state manager. Every error returned from
/// `AccountManager::process` triggers a rollback to the pre-action snapshot.
#[derive(Error, Debug)]
pub enum StateError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Decode error: {0}")]
    Decode(#[from] ReaderError),

    // Store failures imply corruption and are treated as fatal by callers
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Unknown transaction type {0}")]
    UnknownTxType(u64),

    #[error("Balance type ID {0} is invalid")]
    InvalidTypeId(u64),

    #[error("Param time error, time must be 0")]
    InvalidTimeParam,

    #[error("Snapshot time does not exist")]
    SnapshotTimeNotExist,

    #[error("Time type {0} is invalid")]
    InvalidTimeType(u64),
}
