use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

/// Error types for the Token Crowdsale Program.
///
/// Variants are fieldless so that every error maps onto a stable
/// `ProgramError::Custom` code and can be decoded back by clients. Amounts and
/// keys relevant to a failure are logged with `msg!` where the error is raised.
///
/// The variants fall into four groups:
/// - caller errors (`InvalidParameters`, `InvalidAmount`, `SaleFinalized`, ...),
///   which should not be retried with the same inputs;
/// - derivation collisions (`DuplicateSale`, `DuplicateIndex`);
/// - accounting invariant violations (`AccountingUnderflow`,
///   `InsufficientEscrow`, `TreasuryMismatch`), which indicate a bug and are
///   never swallowed;
/// - external failures (`ExternalServiceFailure`, `FinalizePartial`).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum SaleError {
    /// Malformed creation input (zero supply/target, bounds exceeded)
    #[error("Invalid sale parameters")]
    InvalidParameters = 2001,

    /// A sale already exists for this (creator, ticker)
    #[error("Sale already exists for this creator and ticker")]
    DuplicateSale = 2002,

    /// A ledger entry already exists at the derived address for this index
    #[error("Contribution record already exists for this index")]
    DuplicateIndex = 2003,

    /// Operation attempted after the sale reached its terminal state
    #[error("Sale is finalized")]
    SaleFinalized = 2004,

    /// Contribution amount is zero or above the per-contribution cap
    #[error("Invalid contribution amount")]
    InvalidAmount = 2005,

    /// The contribution record holds no active amount
    #[error("Nothing to refund")]
    NothingToRefund = 2006,

    /// The contribution record was already refunded
    #[error("Contribution already refunded")]
    AlreadyRefunded = 2007,

    /// Refund would drive raised_amount below zero
    #[error("Accounting underflow: raised amount below refund")]
    AccountingUnderflow = 2008,

    /// Treasury escrow holds less than the requested debit
    #[error("Insufficient escrow balance")]
    InsufficientEscrow = 2009,

    /// Escrowed funds disagree with the sale's raised amount
    #[error("Treasury balance does not match raised amount")]
    TreasuryMismatch = 2010,

    /// Raised amount is below the sale target
    #[error("Sale target not met")]
    TargetNotMet = 2011,

    /// Finalize called on an already finalized sale
    #[error("Sale already finalized")]
    AlreadyFinalized = 2012,

    /// The balance service or the liquidity-pool service failed
    #[error("External service failure")]
    ExternalServiceFailure = 2013,

    /// Sale committed as finalized but the pool could not be created
    #[error("Sale finalized without a liquidity pool; retry pool creation")]
    FinalizePartial = 2014,

    /// Contribution would push raised_amount above the target
    #[error("Contribution exceeds sale target")]
    TargetExceeded = 2015,

    /// Arithmetic overflow
    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 2016,

    /// Sale account does not match its derived address or is not initialized
    #[error("Invalid sale account")]
    InvalidSaleAccount = 2017,

    /// Contribution record does not match its derived address or owner
    #[error("Invalid contribution account")]
    InvalidContributionAccount = 2018,

    /// Treasury, mint or token account does not match its derived address
    #[error("Invalid treasury account")]
    InvalidTreasuryAccount = 2019,

    /// Signer is not allowed to perform this operation
    #[error("Unauthorized")]
    Unauthorized = 2020,

    /// Pool creation retry requested while no pool creation is pending
    #[error("Pool creation is not pending")]
    PoolNotPending = 2021,

    /// Contribution record was rolled into the pool at finalize
    #[error("Contribution already consumed by finalize")]
    ContributionConsumed = 2022,

    /// Ledger index 0 is reserved for the sale creator
    #[error("The first contribution to a sale must come from its creator")]
    CreatorContributionRequired = 2023,

    /// Token claim attempted before the sale was finalized
    #[error("Sale is not finalized")]
    SaleNotFinalized = 2024,

    /// The contribution's token share was already claimed
    #[error("Tokens already claimed")]
    AlreadyClaimed = 2025,
}

impl SaleError {
    /// Returns the stable numeric code of the variant.
    pub fn error_code(&self) -> u32 {
        *self as u32
    }

    /// Decodes a custom program error code back into a `SaleError`.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }

    /// True for the accounting invariant violations that indicate a bug.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SaleError::AccountingUnderflow
                | SaleError::InsufficientEscrow
                | SaleError::TreasuryMismatch
        )
    }
}

impl From<SaleError> for ProgramError {
    fn from(e: SaleError) -> Self {
        ProgramError::Custom(e.error_code())
    }
}

impl<T> DecodeError<T> for SaleError {
    fn type_of() -> &'static str {
        "SaleError"
    }
}

impl PrintProgramError for SaleError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        if self.is_invariant_violation() {
            msg!("🚨 ACCOUNTING INVARIANT VIOLATED: {}", self);
        } else {
            msg!("Error: {}", self);
        }
    }
}
