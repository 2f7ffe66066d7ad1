//! Input Validation Utilities
//!
//! Common checks on the accounts handed to a processor. Every helper logs the
//! failing account with a context string before returning.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::constants::*;
use crate::error::SaleError;
use crate::state::{ContributionRecord, SaleRecord};
use crate::utils::address::LedgerSeed;
use crate::utils::serialization::load_account;

/// Validates that an account is a signer.
pub fn validate_signer(account: &AccountInfo, context: &str) -> ProgramResult {
    if !account.is_signer {
        msg!("{} must be a signer", context);
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

/// Validates that an account is writable.
pub fn validate_writable(account: &AccountInfo, context: &str) -> ProgramResult {
    if !account.is_writable {
        msg!("{} must be writable", context);
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Validates that an account is the expected program.
pub fn validate_program_id(account: &AccountInfo, expected_program_id: &Pubkey) -> ProgramResult {
    if account.key != expected_program_id {
        msg!("Expected program {}, got {}", expected_program_id, account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Validates that an account sits at the expected derived address.
///
/// # Arguments
/// * `account` - The account to validate
/// * `expected` - The derived address
/// * `error` - Error returned on mismatch
/// * `context` - Context string for error messages
pub fn validate_pda<E: Into<ProgramError>>(
    account: &AccountInfo,
    expected: &Pubkey,
    error: E,
    context: &str,
) -> ProgramResult {
    if account.key != expected {
        msg!("❌ {}: address mismatch", context);
        msg!("   Expected: {}", expected);
        msg!("   Provided: {}", account.key);
        return Err(error.into());
    }
    Ok(())
}

/// True when nothing has been created at the account's address yet.
pub fn is_vacant(account: &AccountInfo) -> bool {
    account.data_is_empty() && account.owner == &solana_program::system_program::id()
}

/// **SECURITY CRITICAL**: Loads a sale record and verifies it sits at the
/// address derived from its own creator, ticker and bump.
pub fn validate_and_load_sale(
    sale_account: &AccountInfo,
    program_id: &Pubkey,
) -> Result<SaleRecord, ProgramError> {
    let sale: SaleRecord = load_account(sale_account, program_id)
        .map_err(|_| ProgramError::from(SaleError::InvalidSaleAccount))?;
    if !sale.is_initialized {
        msg!("❌ Sale {} is not initialized", sale_account.key);
        return Err(SaleError::InvalidSaleAccount.into());
    }
    let expected = Pubkey::create_program_address(
        &[
            SALE_SEED_PREFIX,
            sale.creator.as_ref(),
            sale.ticker.as_bytes(),
            &[sale.bump],
        ],
        program_id,
    )
    .map_err(|_| ProgramError::from(SaleError::InvalidSaleAccount))?;
    validate_pda(sale_account, &expected, SaleError::InvalidSaleAccount, "Sale record")?;
    Ok(sale)
}

/// Verifies the treasury vault of a sale: derived address, system owned, no data.
pub fn validate_treasury_account(
    treasury_account: &AccountInfo,
    program_id: &Pubkey,
    sale_key: &Pubkey,
    sale: &SaleRecord,
) -> ProgramResult {
    let expected = Pubkey::create_program_address(
        &[TREASURY_SEED_PREFIX, sale_key.as_ref(), &[sale.treasury_bump]],
        program_id,
    )
    .map_err(|_| ProgramError::from(SaleError::InvalidTreasuryAccount))?;
    validate_pda(treasury_account, &expected, SaleError::InvalidTreasuryAccount, "Treasury")?;
    if !is_vacant(treasury_account) {
        msg!("❌ Treasury {} holds data or is not system owned", treasury_account.key);
        return Err(SaleError::InvalidTreasuryAccount.into());
    }
    Ok(())
}

/// Verifies the pool token account of a sale against its stored bump.
pub fn validate_pool_token_account(
    pool_token_account: &AccountInfo,
    program_id: &Pubkey,
    sale_key: &Pubkey,
    sale: &SaleRecord,
) -> ProgramResult {
    let expected = Pubkey::create_program_address(
        &[POOL_TOKEN_SEED_PREFIX, sale_key.as_ref(), &[sale.pool_token_bump]],
        program_id,
    )
    .map_err(|_| ProgramError::from(SaleError::InvalidSaleAccount))?;
    validate_pda(pool_token_account, &expected, SaleError::InvalidSaleAccount, "Pool token account")
}

/// Loads a contribution record and verifies that it belongs to `sale_key` and
/// sits at the ledger address derived for its own contributor and index.
pub fn validate_and_load_contribution(
    record_account: &AccountInfo,
    program_id: &Pubkey,
    sale_key: &Pubkey,
    sale: &SaleRecord,
) -> Result<ContributionRecord, ProgramError> {
    let record: ContributionRecord = load_account(record_account, program_id)
        .map_err(|_| ProgramError::from(SaleError::InvalidContributionAccount))?;
    if !record.is_initialized || record.sale != *sale_key {
        msg!("❌ Contribution {} does not belong to sale {}", record_account.key, sale_key);
        return Err(SaleError::InvalidContributionAccount.into());
    }
    let (key_component, index_component) =
        LedgerSeed::for_index(&sale.ticker, sale_key, record.index).components();
    let expected = Pubkey::create_program_address(
        &[
            CONTRIBUTION_SEED_PREFIX,
            record.contributor.as_ref(),
            &key_component,
            &index_component,
            &[record.bump],
        ],
        program_id,
    )
    .map_err(|_| ProgramError::from(SaleError::InvalidContributionAccount))?;
    validate_pda(record_account, &expected, SaleError::InvalidContributionAccount, "Contribution record")?;
    Ok(record)
}
