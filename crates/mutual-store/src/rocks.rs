// crates/mutual-store/src/rocks.rs
//
// RocksDB-backed persistent storage for the claim pool.
//
// Key format (values are JSON):
//   - `claim:{id:020}`               -> Claim
//   - `vote:{id:020}:{voter_hex}`    -> VoteRecord
//   - `tally:{id:020}`               -> Tally
//   - `balance:{account_hex}`        -> u64
//   - `deposit:{account_hex}`        -> u64 (absent for non-members)
//   - `meta:pool_balance`            -> u64
//   - `meta:next_claim_id`           -> u64
//   - `meta:stats`                   -> PoolStats
//   - `meta:last_height`             -> u64
//   - `meta:params`                  -> PoolParams
//
// Claim ids are zero-padded so prefix iteration yields them in id order.
// `commit` writes a whole WriteSet as one WriteBatch.

use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};
use serde::de::DeserializeOwned;
use serde::Serialize;

use mutual_core::batch::WriteSet;
use mutual_core::claim::{Claim, ClaimId};
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::params::PoolParams;
use mutual_core::pool::PoolStats;
use mutual_core::traits::PoolStore;
use mutual_core::vote::{Tally, VoteRecord};

const POOL_BALANCE_KEY: &[u8] = b"meta:pool_balance";
const NEXT_CLAIM_ID_KEY: &[u8] = b"meta:next_claim_id";
const STATS_KEY: &[u8] = b"meta:stats";
const LAST_HEIGHT_KEY: &[u8] = b"meta:last_height";
const PARAMS_KEY: &[u8] = b"meta:params";

/// RocksDB wrapper implementing the `PoolStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, MutualError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path)
            .map_err(|e| MutualError::Storage(format!("Failed to open RocksDB at {}: {}", path, e)))?;

        Ok(Self { db })
    }

    fn claim_key(id: ClaimId) -> Vec<u8> {
        format!("claim:{:020}", id).into_bytes()
    }

    fn vote_prefix(claim_id: ClaimId) -> Vec<u8> {
        format!("vote:{:020}:", claim_id).into_bytes()
    }

    fn vote_key(claim_id: ClaimId, voter: &AccountId) -> Vec<u8> {
        format!("vote:{:020}:{}", claim_id, voter.to_hex()).into_bytes()
    }

    fn tally_key(claim_id: ClaimId) -> Vec<u8> {
        format!("tally:{:020}", claim_id).into_bytes()
    }

    fn balance_key(account: &AccountId) -> Vec<u8> {
        format!("balance:{}", account.to_hex()).into_bytes()
    }

    fn deposit_key(account: &AccountId) -> Vec<u8> {
        format!("deposit:{}", account.to_hex()).into_bytes()
    }

    /// Get raw bytes from RocksDB, mapping errors to MutualError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, MutualError> {
        self.db
            .get(key)
            .map_err(|e| MutualError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Get and decode a JSON value.
    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, MutualError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Decode every value whose key starts with `prefix`, in key order.
    fn scan_json<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, MutualError> {
        let mut out = Vec::new();
        for item in self.db.prefix_iterator(prefix) {
            let (key, value) =
                item.map_err(|e| MutualError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }
            out.push(serde_json::from_slice(&value)?);
        }
        Ok(out)
    }
}

fn put_json<T: Serialize>(batch: &mut WriteBatch, key: &[u8], value: &T) -> Result<(), MutualError> {
    let bytes = serde_json::to_vec(value)?;
    batch.put(key, bytes);
    Ok(())
}

impl PoolStore for RocksStore {
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, MutualError> {
        self.get_json(&Self::claim_key(id))
    }

    fn list_claims(&self) -> Result<Vec<Claim>, MutualError> {
        self.scan_json(b"claim:")
    }

    fn get_vote(&self, claim_id: ClaimId, voter: &AccountId) -> Result<Option<VoteRecord>, MutualError> {
        self.get_json(&Self::vote_key(claim_id, voter))
    }

    fn list_votes(&self, claim_id: ClaimId) -> Result<Vec<VoteRecord>, MutualError> {
        self.scan_json(&Self::vote_prefix(claim_id))
    }

    fn get_tally(&self, claim_id: ClaimId) -> Result<Option<Tally>, MutualError> {
        self.get_json(&Self::tally_key(claim_id))
    }

    fn next_claim_id(&self) -> Result<ClaimId, MutualError> {
        Ok(self.get_json(NEXT_CLAIM_ID_KEY)?.unwrap_or(1))
    }

    fn balance(&self, account: &AccountId) -> Result<u64, MutualError> {
        if account.is_pool() {
            return self.pool_balance();
        }
        Ok(self.get_json(&Self::balance_key(account))?.unwrap_or(0))
    }

    fn pool_balance(&self) -> Result<u64, MutualError> {
        Ok(self.get_json(POOL_BALANCE_KEY)?.unwrap_or(0))
    }

    fn deposit(&self, account: &AccountId) -> Result<u64, MutualError> {
        Ok(self.get_json(&Self::deposit_key(account))?.unwrap_or(0))
    }

    fn stats(&self) -> Result<PoolStats, MutualError> {
        Ok(self.get_json(STATS_KEY)?.unwrap_or_default())
    }

    fn last_height(&self) -> Result<u64, MutualError> {
        Ok(self.get_json(LAST_HEIGHT_KEY)?.unwrap_or(0))
    }

    fn params(&self) -> Result<Option<PoolParams>, MutualError> {
        self.get_json(PARAMS_KEY)
    }

    fn commit(&mut self, writes: WriteSet) -> Result<(), MutualError> {
        let mut batch = WriteBatch::default();

        for (id, claim) in &writes.claims {
            put_json(&mut batch, &Self::claim_key(*id), claim)?;
        }
        for ((claim_id, voter), vote) in &writes.votes {
            put_json(&mut batch, &Self::vote_key(*claim_id, voter), vote)?;
        }
        for (claim_id, tally) in &writes.tallies {
            put_json(&mut batch, &Self::tally_key(*claim_id), tally)?;
        }
        for (account, balance) in &writes.balances {
            put_json(&mut batch, &Self::balance_key(account), balance)?;
        }
        for (account, deposit) in &writes.deposits {
            if *deposit == 0 {
                batch.delete(Self::deposit_key(account));
            } else {
                put_json(&mut batch, &Self::deposit_key(account), deposit)?;
            }
        }
        if let Some(balance) = writes.pool_balance {
            put_json(&mut batch, POOL_BALANCE_KEY, &balance)?;
        }
        if let Some(next) = writes.next_claim_id {
            put_json(&mut batch, NEXT_CLAIM_ID_KEY, &next)?;
        }
        if let Some(stats) = writes.stats {
            put_json(&mut batch, STATS_KEY, &stats)?;
        }
        if let Some(height) = writes.last_height {
            put_json(&mut batch, LAST_HEIGHT_KEY, &height)?;
        }
        if let Some(params) = &writes.params {
            put_json(&mut batch, PARAMS_KEY, params)?;
        }

        self.db
            .write(batch)
            .map_err(|e| MutualError::Storage(format!("RocksDB batch write failed: {}", e)))
    }
}
