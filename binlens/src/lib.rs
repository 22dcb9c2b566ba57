#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::checked_conversions)]
#![warn(clippy::cognitive_complexity)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::exhaustive_structs)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![deny(clippy::fallible_impl_from)]
#![deny(clippy::implicit_clone)]
#![warn(clippy::manual_ok_or)]
#![deny(clippy::missing_docs_in_private_items)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::option_option)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::mod_module_files)]
#![allow(clippy::uninlined_format_args)]

mod buffer;
mod config;
mod err;
mod id;
pub mod memory;
mod oracle;
mod packed;
mod resolve;
mod scan;

pub use alloy_primitives::U256;

pub use config::ScanConfig;
pub use err::{Error, OracleError};
pub use id::{BinId, Direction, ScanRange, MAX_ID};
pub use oracle::{BinIndex, ReserveOracle, ShareOracle};
pub use packed::PackedIds;
pub use resolve::{
    resolve_reserves, resolve_window, PopulatedBin, PopulatedBinUser, WindowQuery, WindowReserves,
};
pub use scan::{scan_bounded, scan_growing, ScanOutcome, StopReason};

/// Query front end over a liquidity book, carrying the scan tunables
///
/// Every query normalizes its caller range, walks the book with the
/// growing scanner unless noted otherwise, and resolves the ids it found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lens {
    /// Limits applied by the growing scanner
    config: ScanConfig,
}

impl Lens {
    /// Make a new [`Lens`] with default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tunables in effect.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Populated bin ids from `start` (inclusive) toward `end` (exclusive).
    ///
    /// Walks downward when `start >= end`. A `length` of zero lets the scan
    /// run up to the span of the range, still bounded by the iteration
    /// ceiling.
    pub fn populated_ids<I>(
        &self,
        index: &I,
        start: BinId,
        end: BinId,
        length: u32,
    ) -> Result<ScanOutcome, Error>
    where
        I: BinIndex + ?Sized,
    {
        scan_growing(index, ScanRange::normalize(start, end), length, &self.config)
    }

    /// Like [`Self::populated_ids`], but reserves room for the whole budget
    /// up front and never reallocates. Not subject to the iteration ceiling.
    pub fn populated_ids_bounded<I>(
        &self,
        index: &I,
        start: BinId,
        end: BinId,
        length: u32,
    ) -> Result<ScanOutcome, Error>
    where
        I: BinIndex + ?Sized,
    {
        scan_bounded(index, ScanRange::normalize(start, end), length)
    }

    /// Populated bins and their reserves, in traversal order.
    pub fn populated_reserves<B>(
        &self,
        book: &B,
        start: BinId,
        end: BinId,
        length: u32,
    ) -> Result<Vec<PopulatedBin>, Error>
    where
        B: BinIndex + ReserveOracle + ?Sized,
    {
        let outcome = self.populated_ids(book, start, end, length)?;
        resolve_reserves(book, &outcome.ids)
    }

    /// Bins around a reference in which `holder` has a stake, ascending.
    pub fn reserves_of<B>(
        &self,
        book: &B,
        holder: &B::Holder,
        query: WindowQuery,
    ) -> Result<WindowReserves, Error>
    where
        B: BinIndex + ReserveOracle + ShareOracle + ?Sized,
    {
        resolve_window(book, holder, query, &self.config)
    }
}

/// Builder for creating [`Lens`] instances with custom tunables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LensBuilder {
    /// Tunables handed to the built [`Lens`]
    config: ScanConfig,
}

impl LensBuilder {
    /// Create a new [`LensBuilder`] with default settings.
    ///
    /// Immediately calling [`Self::build()`] would be equivalent to using
    /// [`Lens::new()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing, possibly deserialized, [`ScanConfig`].
    pub fn from_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Buffer capacity reserved before the first step of a growing scan.
    pub fn initial_capacity(&mut self, capacity: usize) -> &mut Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Largest number of slots one buffer growth step may add.
    pub fn growth_cap(&mut self, cap: usize) -> &mut Self {
        self.config.growth_cap = cap;
        self
    }

    /// Oracle calls after which a growing scan stops early.
    pub fn iteration_ceiling(&mut self, ceiling: u32) -> &mut Self {
        self.config.iteration_ceiling = ceiling;
        self
    }

    /// Construct a [`Lens`] with the tunables set so far.
    pub fn build(&self) -> Lens {
        Lens {
            config: self.config,
        }
    }
}

/// Populated bin ids between `start` and `end`, using default tunables.
pub fn populated_ids<I>(index: &I, start: BinId, end: BinId, length: u32) -> Result<ScanOutcome, Error>
where
    I: BinIndex + ?Sized,
{
    Lens::new().populated_ids(index, start, end, length)
}

/// Populated bins and reserves between `start` and `end`, using default
/// tunables.
pub fn populated_reserves<B>(
    book: &B,
    start: BinId,
    end: BinId,
    length: u32,
) -> Result<Vec<PopulatedBin>, Error>
where
    B: BinIndex + ReserveOracle + ?Sized,
{
    Lens::new().populated_reserves(book, start, end, length)
}

/// Holder bins around a reference, using default tunables.
pub fn reserves_of<B>(book: &B, holder: &B::Holder, query: WindowQuery) -> Result<WindowReserves, Error>
where
    B: BinIndex + ReserveOracle + ShareOracle + ?Sized,
{
    Lens::new().reserves_of(book, holder, query)
}
