use bytemuck::{Pod, Zeroable};
use solana_program::program_error::ProgramError;
use strum::FromRepr;

/// First byte of instruction data
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
pub enum LensInstruction {
    PopulatedIds = 0,
    PopulatedReserves = 1,
    ReservesOf = 2,
}

impl LensInstruction {
    /// Split instruction data into its discriminator and argument bytes.
    pub fn unpack(data: &[u8]) -> Result<(Self, &[u8]), ProgramError> {
        let (tag, rest) = data
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;
        let ix = Self::from_repr(*tag).ok_or(ProgramError::InvalidInstructionData)?;
        Ok((ix, rest))
    }
}

/// Arguments of the range queries
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RangeArgs {
    pub start: [u8; 4],
    pub end: [u8; 4],
    pub length: [u8; 4],
}

impl RangeArgs {
    pub fn new(start: u32, end: u32, length: u32) -> Self {
        Self {
            start: start.to_le_bytes(),
            end: end.to_le_bytes(),
            length: length.to_le_bytes(),
        }
    }
}

/// Arguments of the holder window query
///
/// A `reference` of `u32::MAX` centers the window on the book's active bin.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct WindowArgs {
    pub holder: [u8; 32],
    pub reference: [u8; 4],
    pub length_left: [u8; 4],
    pub length_right: [u8; 4],
}

impl WindowArgs {
    /// Marker for "use the active bin".
    pub const ACTIVE: u32 = u32::MAX;

    pub fn new(holder: [u8; 32], reference: Option<u32>, length_left: u32, length_right: u32) -> Self {
        Self {
            holder,
            reference: reference.unwrap_or(Self::ACTIVE).to_le_bytes(),
            length_left: length_left.to_le_bytes(),
            length_right: length_right.to_le_bytes(),
        }
    }
}

/// Read a Pod argument struct from instruction bytes of exactly its size.
pub(crate) fn args<T: Pod>(data: &[u8]) -> Result<&T, ProgramError> {
    bytemuck::try_from_bytes::<T>(data).or(Err(ProgramError::InvalidInstructionData))
}

/// Instruction data for `ix` carrying `args`.
pub(crate) fn pack<T: Pod>(ix: LensInstruction, args: &T) -> Vec<u8> {
    let mut data = vec![ix as u8];
    data.extend_from_slice(bytemuck::bytes_of(args));
    data
}
