//! Directional walks over the populated bins of a book.
//!
//! Both scanners share one stepping loop. They differ only in how they store
//! what they find: [`scan_bounded`] reserves room for its whole budget up
//! front and never reallocates, while [`scan_growing`] starts small, grows
//! geometrically with a capped step, and gives up after a fixed number of
//! oracle calls.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use crate::buffer::ScanBuffer;
use crate::{BinId, BinIndex, Error, ScanConfig, ScanRange};

/// Why a scan stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StopReason {
    /// The requested number of bins was found.
    Filled,
    /// The next populated bin lies at or past the range end.
    BoundaryReached,
    /// The book holds no further populated bin in the scan direction.
    IndexExhausted,
    /// The oracle call budget ran out first.
    CeilingReached,
}

/// Ids found by one scan and the reason it ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct ScanOutcome {
    /// Populated bin ids in traversal order
    pub ids: Vec<BinId>,
    /// Why the scan stopped
    pub stop: StopReason,
    /// Number of `next_populated` calls made
    pub oracle_calls: u32,
}

/// Walk `range` into a buffer pre-sized for the whole budget.
///
/// A `length` of zero means "up to the span of the range", which is a cheap
/// upper bound rather than an exact count. Larger lengths are clamped to that
/// bound before anything is reserved. Use this when that bound is small
/// or the caller already knows it; otherwise prefer [`scan_growing`].
pub fn scan_bounded<I>(index: &I, range: ScanRange, length: u32) -> Result<ScanOutcome, Error>
where
    I: BinIndex + ?Sized,
{
    let budget = budget(range, length);
    let mut ids = Vec::with_capacity(budget);
    let (stop, oracle_calls) = walk(index, range, budget, None, |id| ids.push(id))?;
    debug!(
        direction = %range.direction,
        found = ids.len(),
        oracle_calls,
        stop = %stop,
        "bounded scan finished"
    );
    Ok(ScanOutcome {
        ids,
        stop,
        oracle_calls,
    })
}

/// Walk `range` into a buffer that grows as bins are found.
///
/// Stops after `config.iteration_ceiling` oracle calls with
/// [`StopReason::CeilingReached`], returning whatever was found.
pub fn scan_growing<I>(
    index: &I,
    range: ScanRange,
    length: u32,
    config: &ScanConfig,
) -> Result<ScanOutcome, Error>
where
    I: BinIndex + ?Sized,
{
    let initial = match length {
        0 => config.initial_capacity,
        n => config.initial_capacity.min(n as usize),
    };
    let mut buffer = ScanBuffer::with_capacity(initial, config.growth_cap);
    let (stop, oracle_calls) = walk(
        index,
        range,
        budget(range, length),
        Some(config.iteration_ceiling),
        |id| buffer.push(id),
    )?;
    debug!(
        direction = %range.direction,
        found = buffer.len(),
        oracle_calls,
        stop = %stop,
        "growing scan finished"
    );
    Ok(ScanOutcome {
        ids: buffer.into_ids(),
        stop,
        oracle_calls,
    })
}

/// Number of bins a scan may return.
///
/// Never more than the span: fewer ids than that lie strictly between the
/// normalized endpoints, so a larger `length` only inflates allocations.
fn budget(range: ScanRange, length: u32) -> usize {
    let span = range.span();
    match length {
        0 => span as usize,
        n => n.min(span) as usize,
    }
}

/// The stepping loop shared by both scanners.
///
/// Returns the stop reason and the number of oracle calls made.
fn walk<I, F>(
    index: &I,
    range: ScanRange,
    budget: usize,
    ceiling: Option<u32>,
    mut emit: F,
) -> Result<(StopReason, u32), Error>
where
    I: BinIndex + ?Sized,
    F: FnMut(BinId),
{
    let direction = range.direction;
    let mut current = range.start;
    let mut found = 0;
    let mut calls = 0;
    if range.span() == 0 {
        return Ok((StopReason::BoundaryReached, calls));
    }
    loop {
        if found == budget {
            return Ok((StopReason::Filled, calls));
        }
        if ceiling.is_some_and(|ceiling| calls >= ceiling) {
            return Ok((StopReason::CeilingReached, calls));
        }

        calls += 1;
        let Some(next) = index.next_populated(direction, current)? else {
            return Ok((StopReason::IndexExhausted, calls));
        };
        if !direction.is_beyond(next, current) {
            return Err(Error::NonMonotonic {
                from: current,
                returned: next,
            });
        }
        if direction.reached(next, range.end) {
            return Ok((StopReason::BoundaryReached, calls));
        }

        emit(next);
        found += 1;
        current = next;
    }
}
