//! Dense byte form of an id sequence
//!
//! Scans work on plain `Vec<BinId>`. This codec exists for boundaries that
//! want the compact wire shape: each id occupies exactly three little endian
//! bytes with no padding, so `len == bytes.len() / 3`.

use crate::{BinId, Error};

/// Packed sequence of bin ids, in the order they were added
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedIds {
    /// Three bytes per id
    bytes: Vec<u8>,
}

impl PackedIds {
    /// Size of each packed id, in bytes
    pub const ID_SIZE: usize = 3;

    /// Pack a sequence of ids.
    pub fn from_ids(ids: &[BinId]) -> Self {
        let mut bytes = Vec::with_capacity(ids.len() * Self::ID_SIZE);
        for id in ids {
            bytes.extend_from_slice(&id.to_le_bytes());
        }
        Self { bytes }
    }

    /// Adopt an already packed buffer, checking that it holds whole ids.
    pub fn try_from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        if bytes.len() % Self::ID_SIZE != 0 {
            return Err(Error::PackedLength(bytes.len()));
        }
        Ok(Self { bytes })
    }

    /// Number of packed ids.
    pub fn len(&self) -> usize {
        self.bytes.len() / Self::ID_SIZE
    }

    /// True if no ids are packed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The packed representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the ids in packing order.
    pub fn iter(&self) -> impl Iterator<Item = BinId> + '_ {
        self.bytes
            .chunks_exact(Self::ID_SIZE)
            .map(|chunk| BinId::from_le_bytes([chunk[0], chunk[1], chunk[2]]))
    }

    /// Decode every id into a vector.
    pub fn to_ids(&self) -> Vec<BinId> {
        self.iter().collect()
    }
}

impl From<PackedIds> for Vec<u8> {
    fn from(packed: PackedIds) -> Vec<u8> {
        packed.bytes
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::MAX_ID;

    #[test]
    fn round_trip_keeps_order() {
        let ids: Vec<BinId> = [8_388_608, 0, MAX_ID, 513]
            .into_iter()
            .map(|raw| BinId::new(raw).unwrap())
            .collect();
        let packed = PackedIds::from_ids(&ids);
        assert_eq!(packed.len(), 4);
        assert_eq!(packed.as_bytes().len(), 12);
        assert_eq!(&packed.as_bytes()[9..12], &[0x01, 0x02, 0x00]);

        let reread = PackedIds::try_from_bytes(packed.into()).unwrap();
        assert_eq!(reread.to_ids(), ids);
    }

    #[test]
    fn rejects_partial_ids() {
        assert!(matches!(
            PackedIds::try_from_bytes(vec![0; 7]),
            Err(Error::PackedLength(7))
        ));
        assert!(PackedIds::try_from_bytes(Vec::new()).unwrap().is_empty());
    }
}
