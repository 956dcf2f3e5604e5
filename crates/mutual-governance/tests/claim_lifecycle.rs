// crates/mutual-governance/tests/claim_lifecycle.rs
//
// End-to-end claim lifecycle tests against the in-memory store: filing,
// voting, finalization, payout, and the pool accounting invariants.

use mutual_core::claim::ClaimStatus;
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::params::PoolParams;
use mutual_core::vote::Tally;
use mutual_governance::{ClaimEngine, RejectReason};
use mutual_store::MemoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const FEE: u64 = 50_000;
const PERIOD: u64 = 100;

fn params() -> PoolParams {
    PoolParams {
        max_claim_amount: 5_000_000,
        claim_fee: FEE,
        voting_period: PERIOD,
        approval_threshold_pct: 70,
    }
}

fn account(label: &str) -> AccountId {
    AccountId::from_label(label)
}

fn new_engine() -> ClaimEngine<MemoryStore> {
    ClaimEngine::new(MemoryStore::new(), params()).unwrap()
}

/// Credit `label` with enough to cover `deposit` plus a few claim fees, then join.
fn add_member(engine: &mut ClaimEngine<MemoryStore>, label: &str, deposit: u64) -> AccountId {
    let id = account(label);
    engine.credit(&id, deposit + 10 * FEE).unwrap();
    engine.join(&id, deposit).unwrap();
    id
}

/// Claimant plus two voters holding 700,000 and 300,000 of voting power.
struct Pool {
    engine: ClaimEngine<MemoryStore>,
    claimant: AccountId,
    big: AccountId,
    small: AccountId,
}

fn weighted_pool(big_power: u64, small_power: u64) -> Pool {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 10);
    let big = add_member(&mut engine, "big", big_power);
    let small = add_member(&mut engine, "small", small_power);
    Pool {
        engine,
        claimant,
        big,
        small,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_filing_moves_fee_from_claimant_to_pool() {
    let mut engine = new_engine();
    let member = account("member");
    engine.credit(&member, 1_100_000).unwrap();
    engine.join(&member, 1_000_000).unwrap();

    let balance_before = engine.balance_of(&member).unwrap();
    let pool_before = engine.pool_balance().unwrap();
    assert_eq!(pool_before, 1_000_000);

    engine.file_claim(&member, 500_000, "hail damage", 1).unwrap();

    assert_eq!(engine.balance_of(&member).unwrap(), balance_before - FEE);
    assert_eq!(engine.pool_balance().unwrap(), pool_before + FEE);
    // Filing does not touch the deposit.
    assert_eq!(engine.voting_power(&member).unwrap(), 1_000_000);
}

#[test]
fn test_exact_threshold_at_window_close_approves() {
    let Pool {
        mut engine,
        claimant,
        big,
        small,
    } = weighted_pool(700_000, 300_000);

    let id = engine.file_claim(&claimant, 500_000, "fire", 0).unwrap();
    let ends = engine.claim(id).unwrap().voting_ends_at;

    // Votes land exactly on the last block of the window.
    engine.vote_on_claim(&big, id, true, ends).unwrap();
    engine.vote_on_claim(&small, id, false, ends).unwrap();

    let claimant_before = engine.balance_of(&claimant).unwrap();
    let pool_before = engine.pool_balance().unwrap();

    let f = engine.finalize_claim(&big, id, ends + 1).unwrap();
    assert_eq!(f.status, ClaimStatus::Approved);
    assert_eq!(f.payout, 500_000);
    assert_eq!(
        f.tally,
        Tally {
            approve_weight: 700_000,
            reject_weight: 300_000
        }
    );
    assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Approved);
    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_before + 500_000);
    assert_eq!(engine.pool_balance().unwrap(), pool_before - 500_000);
}

#[test]
fn test_just_below_threshold_rejects() {
    let Pool {
        mut engine,
        claimant,
        big,
        small,
    } = weighted_pool(699_999, 300_001);

    let id = engine.file_claim(&claimant, 500_000, "flood", 0).unwrap();
    engine.vote_on_claim(&big, id, true, 10).unwrap();
    engine.vote_on_claim(&small, id, false, 10).unwrap();

    let pool_before = engine.pool_balance().unwrap();
    let f = engine.finalize_claim(&small, id, PERIOD + 1).unwrap();
    assert_eq!(f.status, ClaimStatus::Rejected);
    assert_eq!(f.reject_reason, Some(RejectReason::BelowThreshold));
    assert_eq!(engine.pool_balance().unwrap(), pool_before);
}

#[test]
fn test_no_votes_rejects() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 1_000);
    let id = engine.file_claim(&claimant, 100, "quiet claim", 5).unwrap();

    let f = engine.finalize_claim(&claimant, id, 5 + PERIOD + 1).unwrap();
    assert_eq!(f.status, ClaimStatus::Rejected);
    assert_eq!(f.reject_reason, Some(RejectReason::NoVotes));
    assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Rejected);
}

#[test]
fn test_insufficient_pool_funds_leaves_claim_active_for_retry() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 100);
    let voter = add_member(&mut engine, "voter", 100);

    let id = engine.file_claim(&claimant, 500_000, "total loss", 0).unwrap();
    engine.vote_on_claim(&voter, id, true, 1).unwrap();

    let pool_before = engine.pool_balance().unwrap();
    assert!(pool_before < 500_000);
    let claimant_before = engine.balance_of(&claimant).unwrap();

    let err = engine.finalize_claim(&voter, id, PERIOD + 1).unwrap_err();
    assert_eq!(
        err,
        MutualError::InsufficientPoolFunds {
            requested: 500_000,
            available: pool_before
        }
    );
    assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Active);
    assert_eq!(engine.pool_balance().unwrap(), pool_before);
    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_before);
    assert_eq!(engine.stats().unwrap().total_paid_out, 0);

    // Replenish the pool with a new member's deposit, then retry.
    add_member(&mut engine, "benefactor", 1_000_000);
    let f = engine.finalize_claim(&voter, id, PERIOD + 50).unwrap();
    assert_eq!(f.status, ClaimStatus::Approved);
    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_before + 500_000);
}

#[test]
fn test_vote_after_window_rejected_and_tally_unchanged() {
    let Pool {
        mut engine,
        claimant,
        big,
        small,
    } = weighted_pool(700_000, 300_000);

    let id = engine.file_claim(&claimant, 1_000, "late votes", 0).unwrap();
    engine.vote_on_claim(&small, id, false, PERIOD).unwrap();
    let before = engine.tally(id).unwrap();

    let err = engine.vote_on_claim(&big, id, true, PERIOD + 1).unwrap_err();
    assert!(matches!(err, MutualError::VotingClosed { .. }));
    assert!(err.is_claim_not_active());
    assert_eq!(engine.tally(id).unwrap(), before);
    assert!(!engine.has_voted(id, &big).unwrap());
}

#[test]
fn test_window_stays_closed_after_failed_finalize() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 100);
    let voter = add_member(&mut engine, "voter", 100);
    let late = add_member(&mut engine, "late", 100);

    let id = engine.file_claim(&claimant, 500_000, "washed out", 0).unwrap();
    engine.vote_on_claim(&voter, id, true, 1).unwrap();

    let err = engine.finalize_claim(&voter, id, PERIOD + 1).unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_POOL_FUNDS");
    assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Active);
    let tally_before = engine.tally(id).unwrap();

    // A vote stamped inside the window arrives after the close was observed.
    let err = engine.vote_on_claim(&late, id, false, PERIOD).unwrap_err();
    assert_eq!(
        err,
        MutualError::StaleHeight {
            now: PERIOD,
            last_height: PERIOD + 1
        }
    );
    assert_eq!(engine.tally(id).unwrap(), tally_before);
    assert!(!engine.has_voted(id, &late).unwrap());

    // At the current height the window is closed as usual.
    let err = engine.vote_on_claim(&late, id, false, PERIOD + 1).unwrap_err();
    assert!(matches!(err, MutualError::VotingClosed { .. }));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_voting_power_zero_iff_not_member() {
    let mut engine = new_engine();
    let a = add_member(&mut engine, "a", 500);
    let outsider = account("outsider");

    assert!(engine.is_member(&a).unwrap());
    assert_eq!(engine.voting_power(&a).unwrap(), 500);
    assert!(!engine.is_member(&outsider).unwrap());
    assert_eq!(engine.voting_power(&outsider).unwrap(), 0);

    engine.withdraw(&a, 500).unwrap();
    assert!(!engine.is_member(&a).unwrap());
    assert_eq!(engine.voting_power(&a).unwrap(), 0);
}

#[test]
fn test_double_vote_rejected() {
    let Pool {
        mut engine,
        claimant,
        big,
        ..
    } = weighted_pool(700_000, 300_000);

    let id = engine.file_claim(&claimant, 1_000, "double vote", 0).unwrap();
    engine.vote_on_claim(&big, id, true, 1).unwrap();
    let err = engine.vote_on_claim(&big, id, false, 2).unwrap_err();
    assert_eq!(err, MutualError::AlreadyVoted { claim_id: id, voter: big });
    assert_eq!(
        engine.tally(id).unwrap(),
        Tally {
            approve_weight: 700_000,
            reject_weight: 0
        }
    );
    assert_eq!(engine.votes(id).unwrap().len(), 1);
}

#[test]
fn test_non_member_cannot_vote() {
    let Pool {
        mut engine, claimant, ..
    } = weighted_pool(700_000, 300_000);
    let id = engine.file_claim(&claimant, 1_000, "outsider vote", 0).unwrap();
    let err = engine.vote_on_claim(&account("outsider"), id, true, 1).unwrap_err();
    assert_eq!(err.code(), "NOT_MEMBER");
}

#[test]
fn test_cast_weight_survives_withdrawal() {
    let Pool {
        mut engine,
        claimant,
        big,
        small,
    } = weighted_pool(700_000, 300_000);

    let id = engine.file_claim(&claimant, 100_000, "snapshot", 0).unwrap();
    engine.vote_on_claim(&big, id, true, 1).unwrap();
    engine.vote_on_claim(&small, id, false, 1).unwrap();

    // The approving voter leaves the pool entirely after voting.
    engine.withdraw(&big, 700_000).unwrap();
    assert_eq!(engine.voting_power(&big).unwrap(), 0);

    let tally = engine.tally(id).unwrap();
    assert_eq!(tally.approve_weight, 700_000);
    assert_eq!(tally.reject_weight, 300_000);

    let f = engine.finalize_claim(&small, id, PERIOD + 1).unwrap();
    assert_eq!(f.status, ClaimStatus::Approved);
}

#[test]
fn test_tally_matches_snapshotted_vote_weights() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 10);
    let voters: Vec<(AccountId, bool)> = (0..6)
        .map(|i| {
            let v = add_member(&mut engine, &format!("voter{}", i), 1_000 * (i + 1));
            (v, i % 2 == 0)
        })
        .collect();

    let id = engine.file_claim(&claimant, 1_000, "weights", 0).unwrap();
    for (voter, approve) in &voters {
        engine.vote_on_claim(voter, id, *approve, 5).unwrap();
    }
    // Top up a deposit after voting; the tally must not move.
    engine.deposit(&voters[0].0, 9_999).unwrap();

    let tally = engine.tally(id).unwrap();
    let records = engine.votes(id).unwrap();
    let approve: u64 = records.iter().filter(|r| r.approve).map(|r| r.weight).sum();
    let reject: u64 = records.iter().filter(|r| !r.approve).map(|r| r.weight).sum();
    assert_eq!(tally.approve_weight, approve);
    assert_eq!(tally.reject_weight, reject);
    assert_eq!(tally.total(), (1..=6).map(|i| 1_000u128 * i).sum::<u128>());
}

#[test]
fn test_second_finalize_is_already_finalized_without_transfer() {
    let Pool {
        mut engine,
        claimant,
        big,
        ..
    } = weighted_pool(700_000, 300_000);

    let id = engine.file_claim(&claimant, 200_000, "twice", 0).unwrap();
    engine.vote_on_claim(&big, id, true, 1).unwrap();
    engine.finalize_claim(&big, id, PERIOD + 1).unwrap();

    let pool_after_first = engine.pool_balance().unwrap();
    let claimant_after_first = engine.balance_of(&claimant).unwrap();

    let err = engine.finalize_claim(&big, id, PERIOD + 2).unwrap_err();
    assert_eq!(
        err,
        MutualError::AlreadyFinalized {
            claim_id: id,
            status: ClaimStatus::Approved
        }
    );
    assert!(err.is_claim_not_active());
    assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Approved);
    assert_eq!(engine.pool_balance().unwrap(), pool_after_first);
    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_after_first);
}

#[test]
fn test_anyone_can_finalize() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 1_000);
    let id = engine.file_claim(&claimant, 10, "permissionless", 0).unwrap();
    let stranger = account("stranger");
    assert!(!engine.is_member(&stranger).unwrap());
    let f = engine.finalize_claim(&stranger, id, PERIOD + 1).unwrap();
    assert_eq!(f.status, ClaimStatus::Rejected);
}

#[test]
fn test_finalize_missing_claim() {
    let mut engine = new_engine();
    let err = engine.finalize_claim(&account("x"), 7, 1_000).unwrap_err();
    assert_eq!(err, MutualError::ClaimNotFound(7));
}

#[test]
fn test_pool_conservation_over_mixed_history() {
    let Pool {
        mut engine,
        claimant,
        big,
        small,
    } = weighted_pool(700_000, 300_000);
    let initial = engine.pool_balance().unwrap();

    let a = engine.file_claim(&claimant, 400_000, "approved", 0).unwrap();
    let b = engine.file_claim(&big, 300_000, "rejected", 0).unwrap();
    let c = engine.file_claim(&small, 50_000, "ignored", 0).unwrap();
    engine.vote_on_claim(&big, a, true, 1).unwrap();
    engine.vote_on_claim(&small, b, false, 1).unwrap();

    for id in [a, b, c] {
        engine.finalize_claim(&claimant, id, PERIOD + 1).unwrap();
    }

    let expected = initial + 3 * FEE - 400_000;
    assert_eq!(engine.pool_balance().unwrap(), expected);

    let stats = engine.audit().unwrap();
    assert_eq!(stats.fees_collected, 3 * FEE);
    assert_eq!(stats.total_paid_out, 400_000);
    assert_eq!(stats.total_deposits, 1_000_010);
}

#[test]
fn test_rejected_claim_costs_only_the_fee() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 1_000);
    let voter = add_member(&mut engine, "voter", 5_000);

    let claimant_before = engine.balance_of(&claimant).unwrap();
    let pool_before = engine.pool_balance().unwrap();

    let id = engine.file_claim(&claimant, 900, "denied", 0).unwrap();
    engine.vote_on_claim(&voter, id, false, 1).unwrap();
    engine.finalize_claim(&voter, id, PERIOD + 1).unwrap();

    assert_eq!(engine.balance_of(&claimant).unwrap(), claimant_before - FEE);
    assert_eq!(engine.pool_balance().unwrap(), pool_before + FEE);
}

#[test]
fn test_terminal_status_never_reverts() {
    let mut engine = new_engine();
    let claimant = add_member(&mut engine, "claimant", 1_000);
    let id = engine.file_claim(&claimant, 10, "final", 0).unwrap();
    engine.finalize_claim(&claimant, id, PERIOD + 1).unwrap();

    for now in [PERIOD + 2, PERIOD * 10, u64::MAX] {
        assert!(engine.finalize_claim(&claimant, id, now).is_err());
        assert!(engine.vote_on_claim(&claimant, id, true, now).is_err());
        assert_eq!(engine.claim(id).unwrap().status, ClaimStatus::Rejected);
    }
}
