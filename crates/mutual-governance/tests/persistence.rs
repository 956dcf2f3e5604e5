// crates/mutual-governance/tests/persistence.rs
//
// Claim lifecycle across a RocksDB reopen: state committed by one engine is
// visible to a fresh engine over the same path.

use mutual_core::claim::ClaimStatus;
use mutual_core::identity::AccountId;
use mutual_core::params::PoolParams;
use mutual_governance::ClaimEngine;
use mutual_store::RocksStore;

fn temp_db_path() -> String {
    let dir = std::env::temp_dir().join(format!("mutual_governance_test_{}", uuid::Uuid::now_v7()));
    dir.to_string_lossy().to_string()
}

fn params() -> PoolParams {
    PoolParams {
        voting_period: 10,
        ..PoolParams::default()
    }
}

#[test]
fn test_claim_survives_reopen_and_finalizes() {
    let path = temp_db_path();
    let claimant = AccountId::from_label("claimant");
    let voter = AccountId::from_label("voter");

    let id = {
        let store = RocksStore::open(&path).unwrap();
        let mut engine = ClaimEngine::new(store, params()).unwrap();
        engine.credit(&claimant, 200_000).unwrap();
        engine.join(&claimant, 100_000).unwrap();
        engine.credit(&voter, 2_000_000).unwrap();
        engine.join(&voter, 2_000_000).unwrap();

        let id = engine.file_claim(&claimant, 400_000, "burst pipe", 1).unwrap();
        engine.vote_on_claim(&voter, id, true, 3).unwrap();
        id
    };

    let store = RocksStore::open(&path).unwrap();
    let mut engine = ClaimEngine::new(store, params()).unwrap();

    let claim = engine.claim(id).unwrap();
    assert_eq!(claim.status, ClaimStatus::Active);
    assert_eq!(claim.description, "burst pipe");
    assert_eq!(engine.tally(id).unwrap().approve_weight, 2_000_000);
    assert!(engine.has_voted(id, &voter).unwrap());
    assert_eq!(engine.voting_power(&voter).unwrap(), 2_000_000);

    let claimant_before = engine.balance_of(&claimant).unwrap();
    let f = engine.finalize_claim(&voter, id, 12).unwrap();
    assert_eq!(f.status, ClaimStatus::Approved);
    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_before + 400_000);

    let stats = engine.audit().unwrap();
    assert_eq!(stats.total_paid_out, 400_000);

    // Next id continues after the persisted counter.
    let next = engine.file_claim(&claimant, 1, "follow-up", 20).unwrap();
    assert_eq!(next, id + 1);

    drop(engine);
    let _ = std::fs::remove_dir_all(&path);
}

#[test]
fn test_reopen_with_different_params_refused() {
    let path = temp_db_path();
    let claimant = AccountId::from_label("claimant");
    let yes = AccountId::from_label("yes");
    let no = AccountId::from_label("no");

    let id = {
        let store = RocksStore::open(&path).unwrap();
        let mut engine = ClaimEngine::new(store, params()).unwrap();
        for (account, deposit) in [(claimant, 10u64), (yes, 600_000), (no, 400_000)] {
            engine.credit(&account, deposit + 100_000).unwrap();
            engine.join(&account, deposit).unwrap();
        }
        let id = engine.file_claim(&claimant, 300_000, "split vote", 1).unwrap();
        engine.vote_on_claim(&yes, id, true, 2).unwrap();
        engine.vote_on_claim(&no, id, false, 2).unwrap();
        id
    };

    // 60% approval passes a 50% threshold but not the 70% the pool was created with.
    let looser = PoolParams {
        approval_threshold_pct: 50,
        ..params()
    };
    let store = RocksStore::open(&path).unwrap();
    let err = ClaimEngine::new(store, looser).err().unwrap();
    assert_eq!(err.code(), "INVALID_PARAMS");

    let store = RocksStore::open(&path).unwrap();
    let mut engine = ClaimEngine::new(store, params()).unwrap();
    let f = engine.finalize_claim(&claimant, id, 20).unwrap();
    assert_eq!(f.status, ClaimStatus::Rejected);

    drop(engine);
    let _ = std::fs::remove_dir_all(&path);
}

#[test]
fn test_observed_height_survives_reopen() {
    let path = temp_db_path();
    let member = AccountId::from_label("member");
    {
        let store = RocksStore::open(&path).unwrap();
        let mut engine = ClaimEngine::new(store, params()).unwrap();
        engine.credit(&member, 500_000).unwrap();
        engine.join(&member, 100_000).unwrap();
        let id = engine.file_claim(&member, 1, "early", 5).unwrap();
        // Fails (window still open) but records height 8.
        assert!(engine.finalize_claim(&member, id, 8).is_err());
    }

    let store = RocksStore::open(&path).unwrap();
    let mut engine = ClaimEngine::new(store, params()).unwrap();
    assert_eq!(engine.last_height().unwrap(), 8);
    let err = engine.file_claim(&member, 1, "backdated", 7).unwrap_err();
    assert_eq!(err.code(), "STALE_HEIGHT");

    drop(engine);
    let _ = std::fs::remove_dir_all(&path);
}
