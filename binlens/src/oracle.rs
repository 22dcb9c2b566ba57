//! Read-only views of the liquidity book
//!
//! The lens never owns the book. It reaches it through these traits, which
//! are expected to answer from one consistent snapshot for the duration of a
//! call. Every method is fallible so that remote or storage-backed books can
//! report [`OracleError`] without overloading "nothing found".

use alloy_primitives::U256;

use crate::{BinId, Direction, OracleError};

/// Ordered index of populated bins
pub trait BinIndex {
    /// Next populated bin strictly beyond `from` in `direction`, or `None` if
    /// the book holds nothing further that way.
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError>;

    /// The book's current active bin.
    fn active_id(&self) -> Result<BinId, OracleError>;
}

/// Per-bin reserves
pub trait ReserveOracle {
    /// `(reserve_x, reserve_y)` held in bin `id`.
    fn reserves(&self, id: BinId) -> Result<(u128, u128), OracleError>;
}

/// Per-holder stakes in each bin
pub trait ShareOracle {
    /// Identity of a stake holder.
    type Holder: ?Sized;

    /// Shares `holder` owns in bin `id`.
    fn shares(&self, holder: &Self::Holder, id: BinId) -> Result<U256, OracleError>;

    /// Total outstanding shares of bin `id`.
    fn total_shares(&self, id: BinId) -> Result<U256, OracleError>;
}

impl<T: BinIndex + ?Sized> BinIndex for &T {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        (**self).next_populated(direction, from)
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        (**self).active_id()
    }
}

impl<T: ReserveOracle + ?Sized> ReserveOracle for &T {
    fn reserves(&self, id: BinId) -> Result<(u128, u128), OracleError> {
        (**self).reserves(id)
    }
}

impl<T: ShareOracle + ?Sized> ShareOracle for &T {
    type Holder = T::Holder;

    fn shares(&self, holder: &Self::Holder, id: BinId) -> Result<U256, OracleError> {
        (**self).shares(holder, id)
    }

    fn total_shares(&self, id: BinId) -> Result<U256, OracleError> {
        (**self).total_shares(id)
    }
}
