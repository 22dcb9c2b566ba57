#![allow(dead_code)]

use std::cell::Cell;

use binlens::memory::MemoryBook;
use binlens::{
    BinId, BinIndex, Direction, OracleError, ReserveOracle, ShareOracle, U256,
};

pub fn id(raw: u32) -> BinId {
    BinId::new(raw).unwrap()
}

pub fn ids(raw: &[u32]) -> Vec<BinId> {
    raw.iter().map(|&raw| id(raw)).collect()
}

/// A book with every id in `populated` holding `(id, 2 * id)` reserves.
pub fn book(active: u32, populated: &[u32]) -> MemoryBook<&'static str> {
    populated.iter().fold(MemoryBook::new(id(active)), |book, &raw| {
        book.with_bin(id(raw), raw.into(), u128::from(raw) * 2 + 1)
    })
}

/// Forwards to a [`MemoryBook`] and counts the calls made to it.
pub struct Counting<'a, H> {
    pub inner: &'a MemoryBook<H>,
    pub next_calls: Cell<u32>,
    pub reserve_calls: Cell<u32>,
    pub share_calls: Cell<u32>,
}

impl<'a, H> Counting<'a, H> {
    pub fn new(inner: &'a MemoryBook<H>) -> Self {
        Self {
            inner,
            next_calls: Cell::new(0),
            reserve_calls: Cell::new(0),
            share_calls: Cell::new(0),
        }
    }
}

impl<H> BinIndex for Counting<'_, H> {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        self.next_calls.set(self.next_calls.get() + 1);
        self.inner.next_populated(direction, from)
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        self.inner.active_id()
    }
}

impl<H> ReserveOracle for Counting<'_, H> {
    fn reserves(&self, id: BinId) -> Result<(u128, u128), OracleError> {
        self.reserve_calls.set(self.reserve_calls.get() + 1);
        self.inner.reserves(id)
    }
}

impl<H: Eq + std::hash::Hash> ShareOracle for Counting<'_, H> {
    type Holder = H;

    fn shares(&self, holder: &H, id: BinId) -> Result<U256, OracleError> {
        self.share_calls.set(self.share_calls.get() + 1);
        self.inner.shares(holder, id)
    }

    fn total_shares(&self, id: BinId) -> Result<U256, OracleError> {
        self.inner.total_shares(id)
    }
}

/// Speaks the sentinel convention: `0` below, `MAX_ID` above, when empty.
pub struct SentinelIndex(pub Vec<u32>);

impl BinIndex for SentinelIndex {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        let from = from.get();
        let raw = match direction {
            Direction::Ascending => self.0.iter().copied().filter(|&id| id > from).min(),
            Direction::Descending => self.0.iter().copied().filter(|&id| id < from).max(),
        }
        .unwrap_or(direction.sentinel().get());
        BinId::from_sentinel(direction, raw).map_err(|err| OracleError::Unavailable(err.to_string()))
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        Ok(BinId::MIN)
    }
}

/// Always fails, as a book behind a dropped connection would.
pub struct Unreachable;

impl BinIndex for Unreachable {
    fn next_populated(&self, _: Direction, _: BinId) -> Result<Option<BinId>, OracleError> {
        Err(OracleError::Unavailable("connection reset".into()))
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "book account missing").into())
    }
}

/// Answers every step with the same id.
pub struct Stuck(pub BinId);

impl BinIndex for Stuck {
    fn next_populated(&self, _: Direction, _: BinId) -> Result<Option<BinId>, OracleError> {
        Ok(Some(self.0))
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        Ok(self.0)
    }
}

/// Every id is populated.
pub struct Dense;

impl BinIndex for Dense {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        let next = match direction {
            Direction::Ascending => from.get().checked_add(1).filter(|&n| n <= binlens::MAX_ID),
            Direction::Descending => from.get().checked_sub(1),
        };
        Ok(next.map(id))
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        Ok(BinId::MIN)
    }
}
