//! Bin ids, scan directions and range normalization
//!
//! Bins live in a 24-bit ordered id space. Every scan walks that space in one
//! [`Direction`], asking the book for the next populated bin strictly beyond
//! the current one. [`ScanRange::normalize`] turns a caller's inclusive start
//! into the exclusive form that stepping expects.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::Error;

/// Largest valid bin id, `2^24 - 1`
pub const MAX_ID: u32 = (1 << 24) - 1;

/// Identifier of one bin in the book, restricted to `[0, MAX_ID]`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BinId(u32);

impl BinId {
    /// Lowest bin, also the descending sentinel of sentinel-speaking books.
    pub const MIN: BinId = BinId(0);

    /// Highest bin, also the ascending sentinel of sentinel-speaking books.
    pub const MAX: BinId = BinId(MAX_ID);

    /// Build a [`BinId`], rejecting values outside the 24-bit domain.
    pub fn new(id: u32) -> Result<Self, Error> {
        if id > MAX_ID {
            return Err(Error::IdOutOfRange(id.into()));
        }
        Ok(BinId(id))
    }

    /// The raw id value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Convert the answer of a book that signals "nothing further" with the
    /// direction's sentinel id (`0` descending, `MAX_ID` ascending).
    pub fn from_sentinel(direction: Direction, raw: u32) -> Result<Option<Self>, Error> {
        let id = Self::new(raw)?;
        if id == direction.sentinel() {
            Ok(None)
        } else {
            Ok(Some(id))
        }
    }

    /// Decode a little endian 24-bit id; every such value is in range.
    pub const fn from_le_bytes(bytes: [u8; 3]) -> Self {
        BinId(bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16)
    }

    /// Little endian 24-bit encoding of this id.
    pub const fn to_le_bytes(self) -> [u8; 3] {
        let [b0, b1, b2, _] = self.0.to_le_bytes();
        [b0, b1, b2]
    }

    /// The next id below this one, or this id if it is already the lowest.
    pub(crate) const fn saturating_pred(self) -> Self {
        BinId(self.0.saturating_sub(1))
    }

    /// The next id above this one, or this id if it is already the highest.
    pub(crate) const fn saturating_succ(self) -> Self {
        if self.0 == MAX_ID {
            self
        } else {
            BinId(self.0 + 1)
        }
    }
}

impl TryFrom<u32> for BinId {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self, Error> {
        Self::new(id)
    }
}

impl From<BinId> for u32 {
    fn from(id: BinId) -> u32 {
        id.0
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Direction of travel through the id space
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[allow(clippy::exhaustive_enums)]
pub enum Direction {
    /// Toward higher ids
    Ascending,
    /// Toward lower ids
    Descending,
}

impl Direction {
    /// Direction implied by a pair of endpoints. Equal endpoints are a
    /// zero-span descending range.
    pub fn between(start: BinId, end: BinId) -> Self {
        if start < end {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    /// Id a sentinel-speaking book returns when nothing lies further on.
    pub const fn sentinel(self) -> BinId {
        match self {
            Direction::Ascending => BinId::MAX,
            Direction::Descending => BinId::MIN,
        }
    }

    /// True if `id` is at `bound` or further along in this direction.
    pub fn reached(self, id: BinId, bound: BinId) -> bool {
        match self {
            Direction::Ascending => id >= bound,
            Direction::Descending => id <= bound,
        }
    }

    /// True if `id` lies strictly beyond `from` in this direction.
    pub fn is_beyond(self, id: BinId, from: BinId) -> bool {
        match self {
            Direction::Ascending => id > from,
            Direction::Descending => id < from,
        }
    }
}

/// Normalized arguments for a directional scan
///
/// `start` is exclusive: stepping never returns it. `end` is exclusive too:
/// a step landing on or past it ends the scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct ScanRange {
    /// Id the first step is taken from
    pub start: BinId,
    /// Boundary the scan must not reach
    pub end: BinId,
    /// Direction of travel
    pub direction: Direction,
}

impl ScanRange {
    /// Turn an inclusive caller `start` into the exclusive predecessor the
    /// stepping oracle expects, without wrapping at either edge of the domain.
    pub fn normalize(start: BinId, end: BinId) -> Self {
        let direction = Direction::between(start, end);
        let start = match direction {
            Direction::Ascending => start.saturating_pred(),
            Direction::Descending => start.saturating_succ(),
        };
        ScanRange {
            start,
            end,
            direction,
        }
    }

    /// Distance between the normalized endpoints, an upper bound on how many
    /// populated bins the scan could find.
    pub fn span(&self) -> u32 {
        self.start.get().abs_diff(self.end.get())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn id(raw: u32) -> BinId {
        BinId::new(raw).unwrap()
    }

    #[test]
    fn rejects_ids_past_max() {
        assert!(BinId::new(MAX_ID).is_ok());
        assert!(matches!(
            BinId::new(MAX_ID + 1),
            Err(Error::IdOutOfRange(v)) if v == u64::from(MAX_ID) + 1
        ));
    }

    #[test]
    fn normalize_ascending_steps_back() {
        let range = ScanRange::normalize(id(5), id(25));
        assert_eq!(range.direction, Direction::Ascending);
        assert_eq!(range.start, id(4));
        assert_eq!(range.end, id(25));
        assert_eq!(range.span(), 21);
    }

    #[test]
    fn normalize_descending_steps_forward() {
        let range = ScanRange::normalize(id(25), id(5));
        assert_eq!(range.direction, Direction::Descending);
        assert_eq!(range.start, id(26));
    }

    #[test]
    fn normalize_never_wraps() {
        let range = ScanRange::normalize(BinId::MIN, id(10));
        assert_eq!(range.start, BinId::MIN);
        assert_eq!(range.direction, Direction::Ascending);

        let range = ScanRange::normalize(BinId::MAX, id(10));
        assert_eq!(range.start, BinId::MAX);
        assert_eq!(range.direction, Direction::Descending);
    }

    #[test]
    fn equal_endpoints_are_descending() {
        let range = ScanRange::normalize(id(7), id(7));
        assert_eq!(range.direction, Direction::Descending);
        assert_eq!(range.start, id(8));
        assert_eq!(range.span(), 1);
    }

    #[test]
    fn sentinels_map_to_none() {
        assert_eq!(BinId::from_sentinel(Direction::Ascending, MAX_ID).unwrap(), None);
        assert_eq!(BinId::from_sentinel(Direction::Descending, 0).unwrap(), None);
        assert_eq!(
            BinId::from_sentinel(Direction::Ascending, 0).unwrap(),
            Some(BinId::MIN)
        );
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Ascending.to_string(), "ascending");
        assert_eq!(Direction::Descending.to_string(), "descending");
    }
}
