use solana_program::program_error::ProgramError;

/// Failures surfaced by the lens program as `ProgramError::Custom` codes
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[repr(u32)]
pub enum LensProgramError {
    #[error("bin id outside of the 24-bit id domain")]
    IdOutOfRange = 0,
    #[error("liquidity book could not be read")]
    OracleUnavailable = 1,
    #[error("book index is not strictly ordered")]
    NonMonotonicIndex = 2,
    #[error("holder shares exceed bin total shares")]
    SharesExceedTotal = 3,
    #[error("book records are not sorted")]
    UnsortedBook = 4,
    #[error("query result does not fit in return data")]
    ReturnDataTooLarge = 5,
    #[error("packed id buffer is not a whole number of ids")]
    MalformedPackedIds = 6,
    #[error("lens query failed")]
    QueryFailed = 7,
}

impl From<LensProgramError> for ProgramError {
    fn from(err: LensProgramError) -> Self {
        ProgramError::Custom(err as u32)
    }
}

impl From<binlens::Error> for LensProgramError {
    fn from(err: binlens::Error) -> Self {
        match err {
            binlens::Error::IdOutOfRange(_) => LensProgramError::IdOutOfRange,
            binlens::Error::Oracle(_) => LensProgramError::OracleUnavailable,
            binlens::Error::NonMonotonic { .. } => LensProgramError::NonMonotonicIndex,
            binlens::Error::PackedLength(_) => LensProgramError::MalformedPackedIds,
            binlens::Error::SharesExceedTotal(_) => LensProgramError::SharesExceedTotal,
            _ => LensProgramError::QueryFailed,
        }
    }
}
