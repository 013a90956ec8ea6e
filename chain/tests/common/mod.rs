#![allow(dead_code)]

use primitive_types::U256;

use meridian_chain::{AccountManager, MemoryStore};
use meridian_common::{
    account::{AssetId, Nonce},
    config::ChainConfig,
    crypto::{PublicKey, PUBLIC_KEY_SIZE},
    name::Name,
    serializer::Serializer,
    transaction::{Action, ActionType, CreateAccountPayload, IssueAssetPayload},
};

pub fn key(seed: u8) -> PublicKey {
    let mut bytes = [seed; PUBLIC_KEY_SIZE];
    bytes[0] = 0x04;
    PublicKey::new(bytes)
}

pub fn name(s: &str) -> Name {
    Name::new(s)
}

pub fn manager() -> AccountManager<MemoryStore> {
    AccountManager::new(MemoryStore::new(), ChainConfig::default()).unwrap()
}

/// Create the system accounts genesis would normally install.
pub fn bootstrap(manager: &mut AccountManager<MemoryStore>) {
    for system in ["meridian", "meridian.account", "meridian.asset"] {
        manager
            .create_account(name(system), Name::default(), 0, key(0), String::new())
            .unwrap();
    }
}

pub fn action(
    action_type: ActionType,
    sender: &str,
    recipient: &str,
    asset_id: AssetId,
    value: u64,
    data: Vec<u8>,
) -> Action {
    action_with_nonce(action_type, sender, recipient, 0, asset_id, value, data)
}

pub fn action_with_nonce(
    action_type: ActionType,
    sender: &str,
    recipient: &str,
    nonce: Nonce,
    asset_id: AssetId,
    value: u64,
    data: Vec<u8>,
) -> Action {
    Action::new(
        action_type,
        name(sender),
        name(recipient),
        nonce,
        asset_id,
        U256::from(value),
        data,
    )
}

pub fn create_account_action(sender: &str, new_name: &str, founder: &str, seed: u8) -> Action {
    let payload = CreateAccountPayload {
        account_name: name(new_name),
        founder: name(founder),
        public_key: key(seed),
        description: String::new(),
    };
    action(
        ActionType::CreateAccount,
        sender,
        "meridian.account",
        0,
        0,
        payload.to_bytes(),
    )
}

pub fn issue_asset_action(sender: &str, asset_name: &str, owner: &str, amount: u64) -> Action {
    issue_asset_action_with_limit(sender, asset_name, owner, amount, 0)
}

pub fn issue_asset_action_with_limit(
    sender: &str,
    asset_name: &str,
    owner: &str,
    amount: u64,
    upper_limit: u64,
) -> Action {
    let payload = IssueAssetPayload {
        asset_name: name(asset_name),
        symbol: asset_name.to_uppercase(),
        amount: U256::from(amount),
        decimals: 8,
        founder: Name::default(),
        owner: name(owner),
        upper_limit: U256::from(upper_limit),
        contract: Name::default(),
        description: String::new(),
    };
    action(
        ActionType::IssueAsset,
        sender,
        "meridian.account",
        0,
        0,
        payload.to_bytes(),
    )
}

pub fn transfer_action(sender: &str, recipient: &str, asset_id: AssetId, value: u64) -> Action {
    action(ActionType::Transfer, sender, recipient, asset_id, value, Vec::new())
}

/// Create an account through the pipeline and return its id.
pub fn create_account(
    manager: &mut AccountManager<MemoryStore>,
    sender: &str,
    new_name: &str,
    seed: u8,
) -> u64 {
    manager
        .process(&create_account_action(sender, new_name, "", seed), 1)
        .unwrap();
    manager.get_account_id_by_name(&name(new_name)).unwrap()
}

/// Issue an asset through the pipeline and return its id.
pub fn issue_asset(
    manager: &mut AccountManager<MemoryStore>,
    sender: &str,
    asset_name: &str,
    amount: u64,
) -> AssetId {
    manager
        .process(&issue_asset_action(sender, asset_name, sender, amount), 1)
        .unwrap();
    manager
        .get_asset_info_by_name(&name(asset_name))
        .unwrap()
        .id
}
