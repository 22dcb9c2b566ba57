//! Error types for the `binlens` crate

use std::sync::Arc;

use crate::BinId;

/// Errors that can occur while walking or resolving a liquidity book
///
/// Running out of populated bins, reaching the scan boundary, or hitting the
/// iteration ceiling are not errors. Those are reported as a
/// [`crate::StopReason`] next to a shorter result.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A caller supplied an id outside of `[0, MAX_ID]`.
    #[error("bin id {0} is outside of the 24-bit id domain")]
    IdOutOfRange(u64),

    /// One of the book oracles could not answer.
    #[error("liquidity book oracle unavailable: {0}")]
    Oracle(#[from] OracleError),

    /// The index oracle answered with an id that is not strictly beyond the
    /// id it was asked about.
    #[error("index oracle stepped from bin {from} to bin {returned}, which is not strictly beyond it")]
    NonMonotonic {
        /// Id the oracle was asked to step from
        from: BinId,
        /// Id the oracle answered with
        returned: BinId,
    },

    /// A packed id buffer is not a whole number of 3-byte ids.
    #[error("packed id buffer of {0} bytes is not a multiple of 3")]
    PackedLength(usize),

    /// The share oracle reported a holder stake larger than the bin total.
    #[error("holder shares in bin {0} exceed the bin's total shares")]
    SharesExceedTotal(BinId),
}

/// Failure reported by an oracle implementation
///
/// This is always distinct from "no more populated bins", which oracles
/// express as `Ok(None)`.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OracleError {
    /// The backing book could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// Reading the backing book failed with a [`std::io::Error`].
    #[error("storage error while reading the book: {0}")]
    Storage(#[source] Arc<std::io::Error>),
}

impl From<std::io::Error> for OracleError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(Arc::new(err))
    }
}
