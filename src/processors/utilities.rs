//! Utility Processors
//!
//! View operations that log sale information for clients and debugging.

use crate::state::SaleStatus;
use crate::utils::validate_and_load_sale;
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError, pubkey::Pubkey};

/// **VIEW INSTRUCTION**: Logs the full state of a sale.
///
/// # Arguments
/// * `accounts` - Must contain the sale record PDA as first account
pub fn process_get_sale_status(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let sale_account = accounts.first().ok_or(ProgramError::NotEnoughAccountKeys)?;
    let sale = validate_and_load_sale(sale_account, program_id)?;

    msg!("=== SALE INFORMATION ===");
    msg!("Sale PDA: {}", sale_account.key);
    msg!("Name: {}", sale.name);
    msg!("Ticker: {}", sale.ticker);
    msg!("Creator: {}", sale.creator);
    msg!("Mint: {} ({} decimals)", sale.mint, sale.decimals);
    msg!("Fee Destination: {}", sale.fee_destination);
    msg!("Total Supply: {}", sale.total_supply);
    msg!("Target: {}", sale.target);
    msg!("Raised: {}", sale.raised_amount);
    msg!("Fee Rate (bps): {}", sale.fee_rate_bps);
    msg!("Contribution Count: {}", sale.contribution_count);
    msg!("Created At: {}", sale.creation_time);
    match sale.status() {
        SaleStatus::Open => msg!("Status: Open"),
        SaleStatus::FinalizedPoolPending => {
            msg!("Status: Finalized, pool creation pending");
            msg!("Finalized At: {}", sale.finalized_at);
        }
        SaleStatus::Finalized => {
            msg!("Status: Finalized");
            msg!("Finalized At: {}", sale.finalized_at);
            msg!("Pool Base Reserve: {}", sale.pool_base_reserve);
            msg!("Pool Token Reserve: {}", sale.pool_token_reserve);
        }
    }
    msg!("========================");
    Ok(())
}
