//! Read-only view of a liquidity book snapshot account
//!
//! Layout: one [`BookHeader`], then `bin_count` [`BookBin`] records sorted by
//! id, then `share_count` [`BookShare`] records sorted by `(id, holder)`.
//! Every field is a little endian byte array, so the view needs no alignment.

use std::mem::size_of;

use binlens::{BinId, BinIndex, Direction, OracleError, ReserveOracle, ShareOracle, U256};
use bytemuck::{Pod, Zeroable};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::LensProgramError;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BookHeader {
    pub active_id: [u8; 4],
    pub bin_count: [u8; 4],
    pub share_count: [u8; 4],
    pub _reserved: [u8; 4],
}

impl BookHeader {
    pub fn new(active_id: u32, bin_count: u32, share_count: u32) -> Self {
        Self {
            active_id: active_id.to_le_bytes(),
            bin_count: bin_count.to_le_bytes(),
            share_count: share_count.to_le_bytes(),
            _reserved: [0; 4],
        }
    }
}

/// One bin of the book; a bin with both reserves zero is unpopulated.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BookBin {
    pub id: [u8; 4],
    pub reserve_x: [u8; 16],
    pub reserve_y: [u8; 16],
    pub total_shares: [u8; 32],
}

impl BookBin {
    pub fn new(id: u32, reserve_x: u128, reserve_y: u128, total_shares: U256) -> Self {
        Self {
            id: id.to_le_bytes(),
            reserve_x: reserve_x.to_le_bytes(),
            reserve_y: reserve_y.to_le_bytes(),
            total_shares: total_shares.to_le_bytes::<32>(),
        }
    }

    fn id(&self) -> u32 {
        u32::from_le_bytes(self.id)
    }

    fn reserves(&self) -> (u128, u128) {
        (
            u128::from_le_bytes(self.reserve_x),
            u128::from_le_bytes(self.reserve_y),
        )
    }

    fn is_populated(&self) -> bool {
        self.reserves() != (0, 0)
    }
}

/// One holder's stake in one bin.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BookShare {
    pub holder: [u8; 32],
    pub id: [u8; 4],
    pub amount: [u8; 32],
}

impl BookShare {
    pub fn new(holder: Pubkey, id: u32, amount: U256) -> Self {
        Self {
            holder: holder.to_bytes(),
            id: id.to_le_bytes(),
            amount: amount.to_le_bytes::<32>(),
        }
    }

    fn key(&self) -> (u32, &[u8; 32]) {
        (u32::from_le_bytes(self.id), &self.holder)
    }
}

/// Borrowed view over book account data
#[derive(Clone, Copy, Debug)]
pub struct Book<'a> {
    header: &'a BookHeader,
    bins: &'a [BookBin],
    shares: &'a [BookShare],
}

impl<'a> Book<'a> {
    /// Parse and validate account data. Records must be strictly sorted.
    pub fn try_from_bytes(data: &'a [u8]) -> Result<Self, ProgramError> {
        let (header, rest) = split::<BookHeader>(data, 1)?;
        let header = &header[0];
        let bin_count = u32::from_le_bytes(header.bin_count) as usize;
        let share_count = u32::from_le_bytes(header.share_count) as usize;
        let (bins, rest) = split::<BookBin>(rest, bin_count)?;
        let (shares, _) = split::<BookShare>(rest, share_count)?;

        BinId::new(u32::from_le_bytes(header.active_id)).map_err(LensProgramError::from)?;
        if let Some(last) = bins.last() {
            BinId::new(last.id()).map_err(LensProgramError::from)?;
        }
        let bins_sorted = bins.windows(2).all(|pair| pair[0].id() < pair[1].id());
        let shares_sorted = shares.windows(2).all(|pair| pair[0].key() < pair[1].key());
        if !bins_sorted || !shares_sorted {
            return Err(LensProgramError::UnsortedBook.into());
        }

        Ok(Self {
            header,
            bins,
            shares,
        })
    }

    fn bin(&self, id: BinId) -> Option<&BookBin> {
        self.bins
            .binary_search_by_key(&id.get(), BookBin::id)
            .ok()
            .map(|index| &self.bins[index])
    }
}

/// Take `count` records of `T` off the front of `data`.
fn split<T: Pod>(data: &[u8], count: usize) -> Result<(&[T], &[u8]), ProgramError> {
    let len = count
        .checked_mul(size_of::<T>())
        .filter(|&len| len <= data.len())
        .ok_or(ProgramError::InvalidAccountData)?;
    let (head, tail) = data.split_at(len);
    let records = bytemuck::try_cast_slice(head).or(Err(ProgramError::InvalidAccountData))?;
    Ok((records, tail))
}

/// Ids in account data were validated against the domain on load.
fn bin_id(raw: u32) -> Result<BinId, OracleError> {
    BinId::new(raw).map_err(|err| OracleError::Unavailable(err.to_string()))
}

impl BinIndex for Book<'_> {
    fn next_populated(&self, direction: Direction, from: BinId) -> Result<Option<BinId>, OracleError> {
        let from = from.get();
        let next = match direction {
            Direction::Ascending => {
                let first = self.bins.partition_point(|bin| bin.id() <= from);
                self.bins[first..].iter().find(|bin| bin.is_populated())
            }
            Direction::Descending => {
                let end = self.bins.partition_point(|bin| bin.id() < from);
                self.bins[..end].iter().rev().find(|bin| bin.is_populated())
            }
        };
        next.map(|bin| bin_id(bin.id())).transpose()
    }

    fn active_id(&self) -> Result<BinId, OracleError> {
        bin_id(u32::from_le_bytes(self.header.active_id))
    }
}

impl ReserveOracle for Book<'_> {
    fn reserves(&self, id: BinId) -> Result<(u128, u128), OracleError> {
        Ok(self.bin(id).map_or((0, 0), BookBin::reserves))
    }
}

impl ShareOracle for Book<'_> {
    type Holder = Pubkey;

    fn shares(&self, holder: &Pubkey, id: BinId) -> Result<U256, OracleError> {
        let holder = holder.to_bytes();
        let found = self
            .shares
            .binary_search_by(|share| share.key().cmp(&(id.get(), &holder)));
        Ok(match found {
            Ok(index) => U256::from_le_bytes(self.shares[index].amount),
            Err(_) => U256::ZERO,
        })
    }

    fn total_shares(&self, id: BinId) -> Result<U256, OracleError> {
        Ok(self
            .bin(id)
            .map_or(U256::ZERO, |bin| U256::from_le_bytes(bin.total_shares)))
    }
}

/// Serialize a book snapshot into account data.
pub fn pack_book(active_id: u32, bins: &[BookBin], shares: &[BookShare]) -> Vec<u8> {
    let header = BookHeader::new(active_id, bins.len() as u32, shares.len() as u32);
    let mut data = bytemuck::bytes_of(&header).to_vec();
    data.extend_from_slice(bytemuck::cast_slice(bins));
    data.extend_from_slice(bytemuck::cast_slice(shares));
    data
}
