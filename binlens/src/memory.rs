//! An in-memory liquidity book snapshot
//!
//! [`MemoryBook`] answers every oracle trait from ordered maps. It suits
//! off-chain callers that already hold a full snapshot, and tests.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::ops::Bound;

use alloy_primitives::U256;

use crate::{BinId, BinIndex, Direction, OracleError, ReserveOracle, ShareOracle};

/// Snapshot of a book held in ordered maps
#[derive(Clone, Debug)]
pub struct MemoryBook<H> {
    /// Bin the book currently trades in
    active_id: BinId,
    /// Only bins with nonzero reserves are kept here.
    reserves: BTreeMap<BinId, (u128, u128)>,
    /// Outstanding shares per bin, summed over holders
    total_shares: BTreeMap<BinId, U256>,
    /// Each holder's shares, by bin
    shares: HashMap<H, BTreeMap<BinId, U256>>,
}

impl<H: Eq + Hash> MemoryBook<H> {
    /// An empty book centered on `active_id`.
    pub fn new(active_id: BinId) -> Self {
        Self {
            active_id,
            reserves: BTreeMap::new(),
            total_shares: BTreeMap::new(),
            shares: HashMap::new(),
        }
    }

    /// Move the active bin to `active_id`.
    pub fn set_active_id(&mut self, active_id: BinId) {
        self.active_id = active_id;
    }

    /// Set a bin's reserves. A bin with both reserves at zero is unpopulated.
    pub fn set_reserves(&mut self, id: BinId, reserve_x: u128, reserve_y: u128) {
        if reserve_x == 0 && reserve_y == 0 {
            self.reserves.remove(&id);
        } else {
            self.reserves.insert(id, (reserve_x, reserve_y));
        }
    }

    /// Builder form of [`Self::set_reserves`].
    pub fn with_bin(mut self, id: BinId, reserve_x: u128, reserve_y: u128) -> Self {
        self.set_reserves(id, reserve_x, reserve_y);
        self
    }

    /// Give `holder` `amount` shares in bin `id`, adjusting the bin total.
    pub fn set_shares(&mut self, holder: H, id: BinId, amount: U256) {
        let held = self.shares.entry(holder).or_default();
        let previous = held.insert(id, amount).unwrap_or(U256::ZERO);
        let total = self.total_shares.entry(id).or_insert(U256::ZERO);
        *total = total.saturating_sub(previous).saturating_add(amount);
    }

    /// Builder form of [`Self::set_shares`].
    pub fn with_shares(mut self, holder: H, id: BinId, amount: U256) -> Self {
        self.set_shares(holder, id, amount);
        self
    }

    /// Number of populated bins.
    pub fn populated_len(&self) -> usize {
        self.reserves.len()
    }
}

impl<H> BinIndex for MemoryBook<H> {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        let next = match direction {
            Direction::Ascending => self
                .reserves
                .range((Bound::Excluded(from), Bound::Unbounded))
                .next(),
            Direction::Descending => self.reserves.range(..from).next_back(),
        };
        Ok(next.map(|(id, _)| *id))
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        Ok(self.active_id)
    }
}

impl<H> ReserveOracle for MemoryBook<H> {
    fn reserves(&self, id: BinId) -> Result<(u128, u128), OracleError> {
        Ok(self.reserves.get(&id).copied().unwrap_or_default())
    }
}

impl<H: Eq + Hash> ShareOracle for MemoryBook<H> {
    type Holder = H;

    fn shares(&self, holder: &H, id: BinId) -> Result<U256, OracleError> {
        Ok(self
            .shares
            .get(holder)
            .and_then(|held| held.get(&id))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    fn total_shares(&self, id: BinId) -> Result<U256, OracleError> {
        Ok(self.total_shares.get(&id).copied().unwrap_or(U256::ZERO))
    }
}
