mod error;
mod instruction;
mod state;

use binlens::{BinId, Lens, PackedIds, WindowQuery};
use bytemuck::{Pod, Zeroable};
use solana_program::{
    self, account_info::AccountInfo, declare_id, entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction}, msg, program::set_return_data,
    program::MAX_RETURN_DATA, program_error::ProgramError, pubkey::Pubkey,
};

pub use error::LensProgramError;
pub use instruction::{LensInstruction, RangeArgs, WindowArgs};
pub use state::{pack_book, Book, BookBin, BookHeader, BookShare};

declare_id!("DV1J1tBiRCSs8czHAJT449nP569c7eCTHQK4sK9NeWRP");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

pub fn process_instruction(
    _program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [book_info, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let book_data = book_info.try_borrow_data()?;
    let book = Book::try_from_bytes(&book_data)?;

    let output = execute(&book, data)?;
    set_return_data(&output);
    Ok(())
}

/// Run one lens query against `book`, returning the return-data payload.
pub fn execute(book: &Book, data: &[u8]) -> Result<Vec<u8>, ProgramError> {
    let lens = Lens::new();
    let (ix, args) = LensInstruction::unpack(data)?;
    let output: Vec<u8> = match ix {
        LensInstruction::PopulatedIds => {
            let args = instruction::args::<RangeArgs>(args)?;
            let (start, end, length) = range(args)?;
            let outcome = lens
                .populated_ids(book, start, end, length)
                .map_err(LensProgramError::from)?;
            msg!("populated ids: {} found, {}", outcome.ids.len(), outcome.stop);
            PackedIds::from_ids(&outcome.ids).into()
        }
        LensInstruction::PopulatedReserves => {
            let args = instruction::args::<RangeArgs>(args)?;
            let (start, end, length) = range(args)?;
            let bins = lens
                .populated_reserves(book, start, end, length)
                .map_err(LensProgramError::from)?;
            msg!("populated reserves: {} bins", bins.len());
            let records: Vec<BinRecord> = bins
                .iter()
                .map(|bin| BinRecord {
                    id: bin.id.get().to_le_bytes(),
                    reserve_x: bin.reserve_x.to_le_bytes(),
                    reserve_y: bin.reserve_y.to_le_bytes(),
                })
                .collect();
            bytemuck::cast_slice(&records).to_vec()
        }
        LensInstruction::ReservesOf => {
            let args = instruction::args::<WindowArgs>(args)?;
            let holder = Pubkey::new_from_array(args.holder);
            let reference = match u32::from_le_bytes(args.reference) {
                WindowArgs::ACTIVE => None,
                raw => Some(BinId::new(raw).map_err(LensProgramError::from)?),
            };
            let query = WindowQuery {
                reference,
                length_left: u32::from_le_bytes(args.length_left),
                length_right: u32::from_le_bytes(args.length_right),
            };
            let window = lens
                .reserves_of(book, &holder, query)
                .map_err(LensProgramError::from)?;
            msg!(
                "reserves of {}: {} bins around {}",
                holder,
                window.bins.len(),
                window.reference_id
            );
            let records: Vec<UserBinRecord> = window
                .bins
                .iter()
                .map(|bin| UserBinRecord {
                    id: bin.id.get().to_le_bytes(),
                    reserve_x: bin.reserve_x.to_le_bytes(),
                    reserve_y: bin.reserve_y.to_le_bytes(),
                    shares: bin.shares.to_le_bytes::<32>(),
                    total_shares: bin.total_shares.to_le_bytes::<32>(),
                })
                .collect();
            let mut output = window.reference_id.get().to_le_bytes().to_vec();
            output.extend_from_slice(bytemuck::cast_slice(&records));
            output
        }
    };

    if output.len() > MAX_RETURN_DATA {
        msg!("result of {} bytes exceeds return data limit", output.len());
        return Err(LensProgramError::ReturnDataTooLarge.into());
    }
    Ok(output)
}

fn range(args: &RangeArgs) -> Result<(BinId, BinId, u32), LensProgramError> {
    let start = BinId::new(u32::from_le_bytes(args.start))?;
    let end = BinId::new(u32::from_le_bytes(args.end))?;
    Ok((start, end, u32::from_le_bytes(args.length)))
}

/// Return-data record of `PopulatedReserves`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BinRecord {
    pub id: [u8; 4],
    pub reserve_x: [u8; 16],
    pub reserve_y: [u8; 16],
}

/// Return-data record of `ReservesOf`, after the 4-byte reference id
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct UserBinRecord {
    pub id: [u8; 4],
    pub reserve_x: [u8; 16],
    pub reserve_y: [u8; 16],
    pub shares: [u8; 32],
    pub total_shares: [u8; 32],
}

pub fn populated_ids(book: Pubkey, start: u32, end: u32, length: u32) -> Instruction {
    query(
        book,
        instruction::pack(LensInstruction::PopulatedIds, &RangeArgs::new(start, end, length)),
    )
}

pub fn populated_reserves(book: Pubkey, start: u32, end: u32, length: u32) -> Instruction {
    query(
        book,
        instruction::pack(
            LensInstruction::PopulatedReserves,
            &RangeArgs::new(start, end, length),
        ),
    )
}

pub fn reserves_of(
    book: Pubkey,
    holder: Pubkey,
    reference: Option<u32>,
    length_left: u32,
    length_right: u32,
) -> Instruction {
    let args = WindowArgs::new(holder.to_bytes(), reference, length_left, length_right);
    query(book, instruction::pack(LensInstruction::ReservesOf, &args))
}

fn query(book: Pubkey, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: crate::id(),
        accounts: vec![AccountMeta::new_readonly(book, false)],
        data,
    }
}
