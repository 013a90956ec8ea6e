//! Multi-signature authority resolver.
//!
//! An account's authority set may delegate slots to other accounts, forming
//! a DAG of signers. Each recovered key carries a sign-index path naming, at
//! every step, which author slot of the current account it descends through.
//! The resolver walks those paths iteratively, accumulates the weight each
//! `(account, author slot)` pair contributes at most once, and checks every
//! visited account against its required threshold.

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use meridian_common::{
    account::{Account, AccountError, Owner},
    crypto::{Hash, PublicKey},
    name::Name,
    transaction::{Action, ActionType},
};

use crate::{error::StateError, manager::AccountManager, storage::StateStore};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Exceeded max sign length, want at most {max}, actual is {actual}")]
    SignLengthExceeded { max: u64, actual: usize },

    #[error("Exceeded max sign depth, want at most {max}, actual is {actual}")]
    SignDepthExceeded { max: u64, actual: usize },

    #[error("Sign index path is empty")]
    EmptySignPath,

    // the authority set changed between sign time and verify time
    #[error("Account '{0}' authors modified")]
    AuthorsModified(Name),

    #[error("Account '{account}' author {index} is not a delegation")]
    DelegationExpected { account: Name, index: u64 },

    #[error("Account '{account}' key mismatch, have {have}, expected {expected}")]
    KeyMismatch {
        account: Name,
        have: String,
        expected: String,
    },

    #[error("Account '{account}' address mismatch, have {have}, expected {expected}")]
    AddressMismatch {
        account: Name,
        have: String,
        expected: String,
    },

    #[error("Account '{account}' wants threshold {threshold}, but actual is {actual}")]
    ThresholdNotMet {
        account: Name,
        threshold: u64,
        actual: u64,
    },
}

/// A public key recovered from an action signature, together with the
/// sign-index path locating it in the sender's delegation graph.
#[derive(Debug, Clone)]
pub struct RecoveredSigner {
    pub public_key: PublicKey,
    pub path: Vec<u64>,
}

impl RecoveredSigner {
    pub fn new(public_key: PublicKey, path: Vec<u64>) -> Self {
        Self { public_key, path }
    }
}

/// Author versions of every account visited during resolution, in visit
/// order. Attached to the action so downstream consumers can assert the
/// authority sets they execute against are the ones that were verified.
pub type AuthorVersionCache = IndexMap<Name, Hash>;

// Per-account accumulator: authority snapshot at visit time plus the weight
// contributed per author slot (deduplicated by slot index).
struct AccountAuthorState {
    version: Hash,
    threshold: u64,
    update_author_threshold: u64,
    index_weight: IndexMap<u64, u64>,
}

impl AccountAuthorState {
    fn of(account: &Account) -> Self {
        Self {
            version: account.author_version.clone(),
            threshold: account.threshold,
            update_author_threshold: account.update_author_threshold,
            index_weight: IndexMap::new(),
        }
    }
}

impl<S: StateStore> AccountManager<S> {
    /// Verify that `signers` sufficiently authorize `action` for its sender.
    ///
    /// On success, returns the author-version cache of every account whose
    /// weight participated in the decision.
    pub fn authorize_action(
        &self,
        action: &Action,
        signers: &[RecoveredSigner],
    ) -> Result<AuthorVersionCache, StateError> {
        let max_length = self.config().max_sign_length;
        if signers.len() as u64 > max_length {
            return Err(AuthError::SignLengthExceeded {
                max: max_length,
                actual: signers.len(),
            }
            .into());
        }

        let mut visited: IndexMap<Name, AccountAuthorState> = IndexMap::new();
        for signer in signers {
            let max_depth = self.config().max_sign_depth;
            if signer.path.len() as u64 > max_depth {
                return Err(AuthError::SignDepthExceeded {
                    max: max_depth,
                    actual: signer.path.len(),
                }
                .into());
            }

            self.valid_sign(action.sender(), signer, &mut visited)?;
        }

        let is_author_update = action.action_type() == Some(ActionType::UpdateAccountAuthor);
        let mut versions = AuthorVersionCache::with_capacity(visited.len());
        for (name, state) in &visited {
            // sum in u128, a forged weight table must not wrap around
            let weight: u128 = state.index_weight.values().map(|w| u128::from(*w)).sum();

            let mut required = state.threshold;
            if is_author_update && name == action.sender() && state.update_author_threshold != 0 {
                required = state.update_author_threshold;
            }
            trace!("account '{name}' collected weight {weight}, required {required}");

            if weight < u128::from(required) {
                return Err(AuthError::ThresholdNotMet {
                    account: name.clone(),
                    threshold: required,
                    actual: weight.min(u128::from(u64::MAX)) as u64,
                }
                .into());
            }
            versions.insert(name.clone(), state.version.clone());
        }

        Ok(versions)
    }

    /// Walk one signer's path from `name` through the delegation graph,
    /// recording the weight contributed at every step.
    fn valid_sign(
        &self,
        name: &Name,
        signer: &RecoveredSigner,
        visited: &mut IndexMap<Name, AccountAuthorState>,
    ) -> Result<(), StateError> {
        if signer.path.is_empty() {
            return Err(AuthError::EmptySignPath.into());
        }

        let mut account = self.get_account_by_name(name)?;
        if account.is_destroyed() {
            return Err(AccountError::Destroyed(account.name).into());
        }

        let (last, intermediate) = signer.path.split_last().expect("path checked non-empty");
        for index in intermediate {
            let author = usize::try_from(*index)
                .ok()
                .and_then(|i| account.authors.get(i))
                .ok_or_else(|| AuthError::AuthorsModified(account.name.clone()))?;

            let Owner::Name(next) = &author.owner else {
                return Err(AuthError::DelegationExpected {
                    account: account.name.clone(),
                    index: *index,
                }
                .into());
            };

            let next_account = self.get_account_by_name(next)?;
            if next_account.is_destroyed() {
                return Err(AccountError::Destroyed(next_account.name).into());
            }

            Self::record_weight(visited, &account, *index, author.weight);
            account = next_account;
        }

        self.valid_one_sign(&account, *last, &signer.public_key, visited)
    }

    /// Check the terminal author slot against the recovered key and record
    /// its weight.
    fn valid_one_sign(
        &self,
        account: &Account,
        index: u64,
        public_key: &PublicKey,
        visited: &mut IndexMap<Name, AccountAuthorState>,
    ) -> Result<(), StateError> {
        let author = usize::try_from(index)
            .ok()
            .and_then(|i| account.authors.get(i))
            .ok_or_else(|| AuthError::AuthorsModified(account.name.clone()))?;

        match &author.owner {
            Owner::PublicKey(expected) => {
                if expected != public_key {
                    return Err(AuthError::KeyMismatch {
                        account: account.name.clone(),
                        have: public_key.to_hex(),
                        expected: expected.to_hex(),
                    }
                    .into());
                }
            }
            Owner::Address(expected) => {
                let address = public_key.to_address();
                if address != *expected {
                    return Err(AuthError::AddressMismatch {
                        account: account.name.clone(),
                        have: address.to_hex(),
                        expected: expected.to_hex(),
                    }
                    .into());
                }
            }
            Owner::Name(_) => {
                return Err(AuthError::DelegationExpected {
                    account: account.name.clone(),
                    index,
                }
                .into());
            }
        }

        Self::record_weight(visited, account, index, author.weight);
        Ok(())
    }

    fn record_weight(
        visited: &mut IndexMap<Name, AccountAuthorState>,
        account: &Account,
        index: u64,
        weight: u64,
    ) {
        visited
            .entry(account.name.clone())
            .or_insert_with(|| AccountAuthorState::of(account))
            .index_weight
            .insert(index, weight);
    }

    /// Direct single-key check: is `public_key` an author of the account
    /// with enough weight to clear the general threshold on its own?
    pub fn is_valid_sign(&self, name: &Name, public_key: &PublicKey) -> Result<(), StateError> {
        let account = self.get_account_by_name(name)?;
        if account.is_destroyed() {
            return Err(AccountError::Destroyed(account.name).into());
        }

        for author in &account.authors {
            if let Owner::PublicKey(key) = &author.owner {
                if key == public_key && author.weight >= account.threshold {
                    return Ok(());
                }
            }
        }

        Err(AuthError::KeyMismatch {
            account: account.name,
            have: public_key.to_hex(),
            expected: "any author with sufficient weight".to_string(),
        }
        .into())
    }
}
