//! Turning scanned ids into reserve records.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    scan_growing, BinId, BinIndex, Error, ReserveOracle, ScanConfig, ScanRange, ShareOracle,
    StopReason,
};

/// A populated bin and its reserves
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct PopulatedBin {
    /// Bin the reserves belong to
    pub id: BinId,
    /// Amount of token X held in the bin
    pub reserve_x: u128,
    /// Amount of token Y held in the bin
    pub reserve_y: u128,
}

/// A populated bin in which a holder has a nonzero stake
///
/// Always satisfies `0 < shares <= total_shares`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct PopulatedBinUser {
    /// Bin the stake is held in
    pub id: BinId,
    /// Amount of token X held in the bin
    pub reserve_x: u128,
    /// Amount of token Y held in the bin
    pub reserve_y: u128,
    /// Holder's stake in the bin
    pub shares: U256,
    /// All outstanding stake in the bin
    pub total_shares: U256,
}

/// Parameters of a per-holder window query
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct WindowQuery {
    /// Center of the window; the book's active bin when `None`
    pub reference: Option<BinId>,
    /// Budget of populated bins below the reference
    pub length_left: u32,
    /// Budget of populated bins from the reference upward
    pub length_right: u32,
}

/// Result of [`resolve_window`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct WindowReserves {
    /// Reference the window was centered on
    pub reference_id: BinId,
    /// Holder bins across the whole window, strictly ascending by id
    pub bins: Vec<PopulatedBinUser>,
    /// How the left scan ended, if it ran
    pub left_stop: Option<StopReason>,
    /// How the right scan ended, if it ran
    pub right_stop: Option<StopReason>,
}

/// Look up the reserves of every id, keeping the order of `ids`.
pub fn resolve_reserves<R>(reserves: &R, ids: &[BinId]) -> Result<Vec<PopulatedBin>, Error>
where
    R: ReserveOracle + ?Sized,
{
    ids.iter()
        .map(|&id| -> Result<PopulatedBin, Error> {
            let (reserve_x, reserve_y) = reserves.reserves(id)?;
            Ok(PopulatedBin {
                id,
                reserve_x,
                reserve_y,
            })
        })
        .collect()
}

/// Collect the bins around a reference in which `holder` has a stake.
///
/// The left side is scanned downward from just below the reference (from the
/// reference itself when `length_right` is zero), the right side upward from
/// the reference. Both sides are merged into one ascending list, dropping
/// bins where the holder owns no shares.
pub fn resolve_window<B>(
    book: &B,
    holder: &B::Holder,
    query: WindowQuery,
    config: &ScanConfig,
) -> Result<WindowReserves, Error>
where
    B: BinIndex + ReserveOracle + ShareOracle + ?Sized,
{
    let reference_id = match query.reference {
        Some(id) => id,
        None => book.active_id()?,
    };

    let left = match query.length_left {
        0 => None,
        length => {
            let start = match query.length_right {
                0 => reference_id,
                _ => reference_id.saturating_pred(),
            };
            let range = ScanRange::normalize(start, BinId::MIN);
            Some(scan_growing(book, range, length, config)?)
        }
    };
    let right = match query.length_right {
        0 => None,
        length => {
            let range = ScanRange::normalize(reference_id, BinId::MAX);
            Some(scan_growing(book, range, length, config)?)
        }
    };

    let left_ids = left.as_ref().map_or(&[][..], |outcome| outcome.ids.as_slice());
    let right_ids = right.as_ref().map_or(&[][..], |outcome| outcome.ids.as_slice());

    let mut bins = Vec::with_capacity(left_ids.len() + right_ids.len());
    for &id in left_ids.iter().rev().chain(right_ids) {
        if let Some(bin) = holder_bin(book, holder, id)? {
            bins.push(bin);
        }
    }

    debug!(
        reference = %reference_id,
        scanned = left_ids.len() + right_ids.len(),
        kept = bins.len(),
        "window resolved"
    );

    Ok(WindowReserves {
        reference_id,
        bins,
        left_stop: left.map(|outcome| outcome.stop),
        right_stop: right.map(|outcome| outcome.stop),
    })
}

/// The holder's view of one bin, or `None` if they have no stake in it.
fn holder_bin<B>(book: &B, holder: &B::Holder, id: BinId) -> Result<Option<PopulatedBinUser>, Error>
where
    B: ReserveOracle + ShareOracle + ?Sized,
{
    let shares = book.shares(holder, id)?;
    if shares.is_zero() {
        return Ok(None);
    }
    let total_shares = book.total_shares(id)?;
    if shares > total_shares {
        return Err(Error::SharesExceedTotal(id));
    }
    let (reserve_x, reserve_y) = book.reserves(id)?;
    Ok(Some(PopulatedBinUser {
        id,
        reserve_x,
        reserve_y,
        shares,
        total_shares,
    }))
}
