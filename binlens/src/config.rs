//! Tunables for the growing scanner

use serde::{Deserialize, Serialize};

/// Memory and work limits applied by [`crate::scan_growing`]
///
/// Deserializes from partial input, filling missing fields with defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::exhaustive_structs)]
pub struct ScanConfig {
    /// Buffer capacity reserved before the first step
    pub initial_capacity: usize,
    /// Largest number of slots a single growth step may add
    pub growth_cap: usize,
    /// Oracle calls after which a scan gives up and returns what it found
    pub iteration_ceiling: u32,
}

impl ScanConfig {
    /// Default [`Self::initial_capacity`]
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1000;

    /// Default [`Self::growth_cap`]
    pub const DEFAULT_GROWTH_CAP: usize = 5000;

    /// Default [`Self::iteration_ceiling`]
    pub const DEFAULT_ITERATION_CEILING: u32 = 50_000;
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            growth_cap: Self::DEFAULT_GROWTH_CAP,
            iteration_ceiling: Self::DEFAULT_ITERATION_CEILING,
        }
    }
}
