mod common;

use common::*;

use primitive_types::U256;

use meridian_chain::{StateError, StateStore};
use meridian_common::{
    account::AccountError,
    asset::AssetError,
    config::ACCOUNT_ID_SEED,
    serializer::Serializer,
    transaction::{Action, ActionType, UpdateAccountPayload},
};

#[test]
fn test_create_root_account() {
    let mut manager = manager();

    let internal = manager
        .process(&create_account_action("meridian", "alice01", "", 1), 1)
        .unwrap();
    assert!(internal.is_empty());

    let account = manager.get_account_by_name(&name("alice01")).unwrap();
    assert_eq!(account.id, ACCOUNT_ID_SEED + 1);
    assert_eq!(account.founder, name("alice01"));
    assert_eq!(account.number, 1);
    assert_eq!(account.authors.len(), 1);
    assert_eq!(account.authors[0].weight, 1);
    assert_eq!(account.threshold, 1);
}

#[test]
fn test_account_ids_strictly_increase() {
    let mut manager = manager();
    let first = create_account(&mut manager, "meridian", "alice01", 1);
    let second = create_account(&mut manager, "meridian", "bob0001", 2);
    let third = create_account(&mut manager, "meridian", "carol01", 3);

    assert_eq!(first, ACCOUNT_ID_SEED + 1);
    assert_eq!(second, ACCOUNT_ID_SEED + 2);
    assert_eq!(third, ACCOUNT_ID_SEED + 3);

    // a failed creation burns no id
    let err = manager
        .process(&create_account_action("meridian", "alice01", "", 1), 1)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::AlreadyExists(_))
    ));
    let fourth = create_account(&mut manager, "meridian", "dave001", 4);
    assert_eq!(fourth, ACCOUNT_ID_SEED + 4);
}

#[test]
fn test_child_creation_requires_parent() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);

    manager
        .process(&create_account_action("alice01", "alice01.sub", "", 3), 1)
        .unwrap();
    assert!(manager.account_exists(&name("alice01.sub")).unwrap());

    let err = manager
        .process(&create_account_action("bob0001", "alice01.sub2", "", 4), 1)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::AccountInvalid(_))
    ));
}

#[test]
fn test_create_rejects_invalid_names() {
    let mut manager = manager();

    for bad in ["short", "Alice01", "1alice0", "alice01.toolongsub"] {
        let err = manager
            .process(&create_account_action("meridian", bad, "", 1), 1)
            .unwrap_err();
        assert!(
            matches!(
                err,
                StateError::Account(
                    AccountError::InvalidName(_) | AccountError::AccountInvalid(_)
                )
            ),
            "name {bad:?} should be rejected, got {err}"
        );
    }
}

#[test]
fn test_founder_must_exist() {
    let mut manager = manager();
    let err = manager
        .process(
            &create_account_action("meridian", "alice01", "missing1", 1),
            1,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::NotFound(_))
    ));

    create_account(&mut manager, "meridian", "bob0001", 2);
    manager
        .process(&create_account_action("meridian", "alice01", "bob0001", 1), 1)
        .unwrap();
    assert_eq!(
        manager.get_founder(&name("alice01")).unwrap(),
        name("bob0001")
    );
}

#[test]
fn test_update_account_founder() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);

    let payload = UpdateAccountPayload {
        founder: name("bob0001"),
    };
    manager
        .process(
            &action(
                ActionType::UpdateAccount,
                "alice01",
                "meridian.account",
                0,
                0,
                payload.to_bytes(),
            ),
            2,
        )
        .unwrap();
    assert_eq!(
        manager.get_founder(&name("alice01")).unwrap(),
        name("bob0001")
    );

    // empty founder falls back to self
    let payload = UpdateAccountPayload {
        founder: name(""),
    };
    manager
        .process(
            &action(
                ActionType::UpdateAccount,
                "alice01",
                "meridian.account",
                0,
                0,
                payload.to_bytes(),
            ),
            3,
        )
        .unwrap();
    assert_eq!(
        manager.get_founder(&name("alice01")).unwrap(),
        name("alice01")
    );
}

#[test]
fn test_name_asset_collision_both_ways() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);

    // an asset may not take an existing account name
    let err = manager
        .process(&issue_asset_action("alice01", "alice01", "alice01", 100), 1)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::NameIsExist(_))
    ));

    // and an account may not take an existing asset name
    issue_asset(&mut manager, "alice01", "goldcoin", 100);
    let err = manager
        .process(&create_account_action("meridian", "goldcoin", "", 2), 1)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::NameIsExist(_))
    ));
}

#[test]
fn test_issue_asset_credits_owner_and_reports_mint() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);

    let internal = manager
        .process(&issue_asset_action("alice01", "goldcoin", "alice01", 500), 1)
        .unwrap();

    let asset = manager.get_asset_info_by_name(&name("goldcoin")).unwrap();
    assert_eq!(asset.amount, U256::from(500));
    assert_eq!(asset.founder, name("alice01"));
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), asset.id, 0)
            .unwrap(),
        U256::from(500)
    );

    assert_eq!(internal.len(), 1);
    let mint = internal[0].action();
    assert_eq!(mint.action_type(), Some(ActionType::Transfer));
    assert_eq!(mint.sender(), &name("meridian"));
    assert_eq!(mint.recipient(), &name("alice01"));
    assert_eq!(mint.value(), U256::from(500));
}

#[test]
fn test_transfer_moves_balance() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 1000);

    manager
        .process(&transfer_action("alice01", "bob0001", asset_id, 300), 2)
        .unwrap();

    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), asset_id, 0)
            .unwrap(),
        U256::from(700)
    );
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("bob0001"), asset_id, 0)
            .unwrap(),
        U256::from(300)
    );
}

#[test]
fn test_transfer_inverse_restores_balances() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 1000);

    manager
        .process(&transfer_action("alice01", "bob0001", asset_id, 250), 2)
        .unwrap();
    manager
        .process(&transfer_action("bob0001", "alice01", asset_id, 250), 2)
        .unwrap();

    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), asset_id, 0)
            .unwrap(),
        U256::from(1000)
    );
    // drained but held: bob keeps an explicit zero entry
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("bob0001"), asset_id, 0)
            .unwrap(),
        U256::zero()
    );
}

#[test]
fn test_transfer_insufficient_balance() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 100);

    let err = manager
        .process(&transfer_action("alice01", "bob0001", asset_id, 101), 2)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::InsufficientBalance { .. })
    ));

    // never-held asset is a distinct failure
    let err = manager
        .process(&transfer_action("bob0001", "alice01", asset_id, 1), 2)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::AssetNotHeld(_))
    ));
}

#[test]
fn test_failed_action_reverts_store() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "carol01", 3);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 1000);

    manager.delete_account_by_name(&name("carol01")).unwrap();
    let before = manager.store().dump();

    // transfer into a destroyed account must fail...
    let err = manager
        .process(&transfer_action("alice01", "carol01", asset_id, 10), 2)
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::Destroyed(_))
    ));

    // ...and leave the store byte-identical
    assert_eq!(manager.store().dump(), before);
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), asset_id, 0)
            .unwrap(),
        U256::from(1000)
    );
}

#[test]
fn test_destroyed_account_is_still_readable() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "carol01", 3);
    manager.delete_account_by_name(&name("carol01")).unwrap();

    let account = manager.get_account_by_name(&name("carol01")).unwrap();
    assert!(account.is_destroyed());

    // the legacy record under the name scope is written as well
    let legacy = manager
        .store()
        .get("carol01", "acctInfo")
        .unwrap()
        .expect("legacy destroyed record");
    assert_eq!(legacy, account.to_bytes());

    // mutations against the record are refused
    let err = manager.set_account(&account).unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::Destroyed(_))
    ));
}

#[test]
fn test_unknown_action_type() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);

    // patch the wire type id to something undefined
    let mut bytes = transfer_action("alice01", "alice01", 0, 0).to_bytes();
    bytes[..8].copy_from_slice(&0x999u64.to_be_bytes());
    let unknown = Action::from_bytes(&bytes).unwrap();

    let err = manager.process(&unknown, 2).unwrap_err();
    assert!(matches!(err, StateError::UnknownTxType(0x999)));
}

#[test]
fn test_hierarchical_balance_aggregation() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    let parent_id = issue_asset(&mut manager, "alice01", "usdtoken", 1000);
    let child_id = issue_asset(&mut manager, "alice01", "usdtoken.gold", 200);
    let other_id = issue_asset(&mut manager, "alice01", "silvercn", 5000);

    let account = manager.get_account_by_name(&name("alice01")).unwrap();

    // aggregate = asset + its direct sub-assets, nothing else
    assert_eq!(
        manager
            .get_all_balance_by_asset_id(&account, parent_id)
            .unwrap(),
        U256::from(1200)
    );
    let map = manager
        .get_all_assets_by_asset_id(&account, parent_id)
        .unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map[&parent_id], U256::from(1000));
    assert_eq!(map[&child_id], U256::from(200));

    assert_eq!(
        manager
            .get_all_balance_by_asset_id(&account, other_id)
            .unwrap(),
        U256::from(5000)
    );

    // type id 1 selects the aggregate form
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), parent_id, 1)
            .unwrap(),
        U256::from(1200)
    );
    let err = manager
        .get_account_balance_by_id(&name("alice01"), parent_id, 2)
        .unwrap_err();
    assert!(matches!(err, StateError::InvalidTypeId(2)));
}

#[test]
fn test_sub_asset_requires_parent_owner() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    issue_asset(&mut manager, "alice01", "usdtoken", 1000);

    let err = manager
        .process(
            &issue_asset_action("bob0001", "usdtoken.gold", "bob0001", 10),
            2,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Asset(AssetError::NotValidOwner { .. })
    ));
}

#[test]
fn test_increase_asset_founder_gated() {
    let mut manager = manager();
    bootstrap(&mut manager);
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 100);

    use meridian_common::transaction::IncreaseAssetPayload;
    let payload = IncreaseAssetPayload {
        asset_id,
        amount: U256::from(50),
        to: name("bob0001"),
    };

    // only the founder may mint
    let err = manager
        .process(
            &action(
                ActionType::IncreaseAsset,
                "bob0001",
                "meridian.account",
                0,
                0,
                payload.to_bytes(),
            ),
            2,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Asset(AssetError::NoPermission { .. })
    ));

    let internal = manager
        .process(
            &action(
                ActionType::IncreaseAsset,
                "alice01",
                "meridian.account",
                0,
                0,
                payload.to_bytes(),
            ),
            2,
        )
        .unwrap();
    assert_eq!(internal.len(), 1);
    assert_eq!(
        manager.get_asset_info_by_id(asset_id).unwrap().amount,
        U256::from(150)
    );
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("bob0001"), asset_id, 0)
            .unwrap(),
        U256::from(50)
    );
}

#[test]
fn test_increase_asset_respects_upper_limit() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    manager
        .process(
            &issue_asset_action_with_limit("alice01", "goldcoin", "alice01", 900, 1000),
            1,
        )
        .unwrap();
    let asset_id = manager.get_asset_info_by_name(&name("goldcoin")).unwrap().id;

    use meridian_common::transaction::IncreaseAssetPayload;
    let over = IncreaseAssetPayload {
        asset_id,
        amount: U256::from(101),
        to: name("alice01"),
    };
    let err = manager
        .process(
            &action(
                ActionType::IncreaseAsset,
                "alice01",
                "meridian.account",
                0,
                0,
                over.to_bytes(),
            ),
            2,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Asset(AssetError::UpperLimitExceeded { .. })
    ));

    let exact = IncreaseAssetPayload {
        asset_id,
        amount: U256::from(100),
        to: name("alice01"),
    };
    manager
        .process(
            &action(
                ActionType::IncreaseAsset,
                "alice01",
                "meridian.account",
                0,
                0,
                exact.to_bytes(),
            ),
            2,
        )
        .unwrap();
    assert_eq!(
        manager.get_asset_info_by_id(asset_id).unwrap().amount,
        U256::from(1000)
    );
}

#[test]
fn test_destroy_asset_burns_from_system_account() {
    let mut manager = manager();
    bootstrap(&mut manager);
    create_account(&mut manager, "meridian", "alice01", 1);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 1000);

    // park supply on the burn account first
    manager
        .process(&transfer_action("alice01", "meridian.asset", asset_id, 400), 2)
        .unwrap();

    // burning more than the burn account holds fails before supply changes
    let too_much = action(
        ActionType::DestroyAsset,
        "meridian.asset",
        "meridian.asset",
        asset_id,
        500,
        Vec::new(),
    );
    let err = manager.process(&too_much, 2).unwrap_err();
    assert!(matches!(
        err,
        StateError::Account(AccountError::InsufficientBalance { .. })
    ));

    let burn = action(
        ActionType::DestroyAsset,
        "meridian.asset",
        "meridian.asset",
        asset_id,
        400,
        Vec::new(),
    );
    manager.process(&burn, 2).unwrap();
    assert_eq!(
        manager.get_asset_info_by_id(asset_id).unwrap().amount,
        U256::from(600)
    );
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("meridian.asset"), asset_id, 0)
            .unwrap(),
        U256::zero()
    );
}

#[test]
fn test_update_asset_and_set_owner() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);
    create_account(&mut manager, "meridian", "bob0001", 2);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 100);

    use meridian_common::transaction::{SetAssetOwnerPayload, UpdateAssetPayload};

    let update = UpdateAssetPayload {
        asset_id,
        founder: name("bob0001"),
    };
    manager
        .process(
            &action(
                ActionType::UpdateAsset,
                "alice01",
                "meridian.account",
                0,
                0,
                update.to_bytes(),
            ),
            2,
        )
        .unwrap();
    assert_eq!(manager.get_asset_founder(asset_id).unwrap(), name("bob0001"));

    // only the owner may hand the asset over
    let steal = SetAssetOwnerPayload {
        asset_id,
        owner: name("bob0001"),
    };
    let err = manager
        .process(
            &action(
                ActionType::SetAssetOwner,
                "bob0001",
                "meridian.account",
                0,
                0,
                steal.to_bytes(),
            ),
            2,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::Asset(AssetError::NoPermission { .. })
    ));

    manager
        .process(
            &action(
                ActionType::SetAssetOwner,
                "alice01",
                "meridian.account",
                0,
                0,
                steal.to_bytes(),
            ),
            2,
        )
        .unwrap();
    assert_eq!(
        manager.get_asset_info_by_id(asset_id).unwrap().owner,
        name("bob0001")
    );
}

#[test]
fn test_create_account_with_funding_value() {
    let mut manager = manager();
    bootstrap(&mut manager);
    create_account(&mut manager, "meridian", "alice01", 1);
    let asset_id = issue_asset(&mut manager, "alice01", "goldcoin", 1000);

    // give the system funding account some balance
    manager
        .process(
            &transfer_action("alice01", "meridian.account", asset_id, 500),
            2,
        )
        .unwrap();

    let mut create = create_account_action("meridian", "newbie01", "", 5);
    create = Action::new(
        ActionType::CreateAccount,
        name("alice01"),
        name("meridian.account"),
        0,
        asset_id,
        U256::from(120),
        create.data().to_vec(),
    );

    let internal = manager.process(&create, 3).unwrap();
    assert_eq!(internal.len(), 1);
    let funding = internal[0].action();
    assert_eq!(funding.sender(), &name("meridian.account"));
    assert_eq!(funding.recipient(), &name("newbie01"));
    assert_eq!(funding.value(), U256::from(120));

    // implicit transfer paid 120 to the recipient, then the system account
    // funded the newborn with the same amount
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("newbie01"), asset_id, 0)
            .unwrap(),
        U256::from(120)
    );
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("meridian.account"), asset_id, 0)
            .unwrap(),
        U256::from(500)
    );
    assert_eq!(
        manager
            .get_account_balance_by_id(&name("alice01"), asset_id, 0)
            .unwrap(),
        U256::from(380)
    );
}

#[test]
fn test_account_code_surface() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);

    assert!(!manager.account_has_code(&name("alice01")).unwrap());
    assert!(manager.account_is_empty(&name("alice01")).unwrap());

    manager.set_code(&name("alice01"), vec![1, 2, 3, 4]).unwrap();
    assert!(manager.account_has_code(&name("alice01")).unwrap());
    assert_eq!(manager.get_code(&name("alice01")).unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(manager.get_code_size(&name("alice01")).unwrap(), 4);
    assert!(!manager.account_is_empty(&name("alice01")).unwrap());

    assert_eq!(
        manager.get_account_last_change(&name("alice01")).unwrap(),
        0
    );
}

#[test]
fn test_nonce_roundtrip() {
    let mut manager = manager();
    create_account(&mut manager, "meridian", "alice01", 1);

    assert_eq!(manager.get_nonce(&name("alice01")).unwrap(), 0);
    manager.set_nonce(&name("alice01"), 7).unwrap();
    assert_eq!(manager.get_nonce(&name("alice01")).unwrap(), 7);
}
