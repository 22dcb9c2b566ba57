//! Growable id storage for unbounded scans
//!
//! [`ScanBuffer`] keeps its own logical capacity instead of trusting
//! [`Vec`]'s growth policy, so that one growth step on a huge unbounded scan
//! never reserves more than `growth_cap` extra slots.

use tracing::trace;

use crate::BinId;

/// Id buffer with doubling growth, capped per step
#[derive(Debug)]
pub(crate) struct ScanBuffer {
    /// Ids found so far, in traversal order
    ids: Vec<BinId>,
    /// Slots reserved for `ids`; always `>= ids.len()`
    capacity: usize,
    /// Largest number of slots one growth step may add
    growth_cap: usize,
}

impl ScanBuffer {
    /// Reserve `capacity` slots up front.
    pub(crate) fn with_capacity(capacity: usize, growth_cap: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
            growth_cap,
        }
    }

    /// Append an id, growing first if the buffer is full.
    pub(crate) fn push(&mut self, id: BinId) {
        if self.ids.len() == self.capacity {
            self.grow();
        }
        self.ids.push(id);
    }

    /// `min(2 * capacity, capacity + growth_cap)`, and at least one more slot.
    fn grow(&mut self) {
        let doubled = self.capacity.saturating_mul(2);
        let capped = self.capacity.saturating_add(self.growth_cap);
        let next = doubled.min(capped).max(self.capacity + 1);
        trace!(from = self.capacity, to = next, "growing scan buffer");
        self.ids.reserve_exact(next - self.ids.len());
        self.capacity = next;
    }

    /// Number of ids stored.
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    /// Slots currently reserved.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hand back the found ids; the vector's length is the found count.
    pub(crate) fn into_ids(self) -> Vec<BinId> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn fill(buffer: &mut ScanBuffer, n: u32) {
        for raw in 0..n {
            buffer.push(BinId::new(raw).unwrap());
        }
    }

    #[test]
    fn doubles_while_small() {
        let mut buffer = ScanBuffer::with_capacity(4, 5000);
        fill(&mut buffer, 5);
        assert_eq!(buffer.capacity(), 8);
        fill(&mut buffer, 4);
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.len(), 9);
    }

    #[test]
    fn growth_step_is_capped() {
        let mut buffer = ScanBuffer::with_capacity(1000, 300);
        fill(&mut buffer, 1001);
        assert_eq!(buffer.capacity(), 1300);
        fill(&mut buffer, 300);
        assert_eq!(buffer.capacity(), 1600);
    }

    #[test]
    fn zero_capacity_still_grows() {
        let mut buffer = ScanBuffer::with_capacity(0, 0);
        fill(&mut buffer, 3);
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.into_ids().len(), 3);
    }
}
