//! Token Claim Processor
//!
//! After finalize, the part of the supply not seeded into the pool stays in
//! the sale's pool token account. Each non-refunded ledger entry claims its
//! `projected_tokens` from there exactly once.

use crate::constants::*;
use crate::error::SaleError;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
};
use spl_token::{instruction as token_instruction, state::Account as TokenAccount};

/// Processes a token claim for the contributor's ledger entry at
/// `contribution_index`.
///
/// # Account Order:
/// 0. **Contributor** (signer) - Must own the ledger entry
/// 1. **Sale Record PDA** (readable) - Signs the token transfer
/// 2. **Contribution Record PDA** (writable)
/// 3. **Pool Token PDA** (writable) - Source of the claimed tokens
/// 4. **Destination Token Account** (writable) - Any token account of the sale mint
/// 5. **SPL Token Program** (readable)
pub fn process_claim_tokens(
    program_id: &Pubkey,
    contribution_index: u32,
    accounts: &[AccountInfo],
) -> ProgramResult {
    msg!("🎁 Processing ClaimTokens for contribution #{}", contribution_index);
    let account_info_iter = &mut accounts.iter();
    let contributor = next_account_info(account_info_iter)?;
    let sale_account = next_account_info(account_info_iter)?;
    let record_account = next_account_info(account_info_iter)?;
    let pool_token_account = next_account_info(account_info_iter)?;
    let destination = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    validate_signer(contributor, "Contributor")?;
    validate_writable(record_account, "Contribution record")?;
    validate_writable(pool_token_account, "Pool token account")?;
    validate_writable(destination, "Destination token account")?;
    validate_program_id(token_program, &spl_token::id())?;

    let sale = validate_and_load_sale(sale_account, program_id)?;
    if !sale.finalized {
        return Err(SaleError::SaleNotFinalized.into());
    }
    validate_pool_token_account(pool_token_account, program_id, sale_account.key, &sale)?;

    let mut record = validate_and_load_contribution(record_account, program_id, sale_account.key, &sale)?;
    if record.index != contribution_index {
        msg!("❌ Record holds contribution #{}, not #{}", record.index, contribution_index);
        return Err(SaleError::InvalidContributionAccount.into());
    }
    if record.contributor != *contributor.key {
        msg!("❌ Contribution #{} belongs to {}", record.index, record.contributor);
        return Err(SaleError::Unauthorized.into());
    }

    if destination.owner != &spl_token::id() {
        msg!("❌ Destination {} is not a token account", destination.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    let destination_state = TokenAccount::unpack(&destination.try_borrow_data()?)?;
    if destination_state.mint != sale.mint {
        msg!("❌ Destination holds mint {}, expected {}", destination_state.mint, sale.mint);
        return Err(ProgramError::InvalidAccountData);
    }

    let tokens = record.claim()?;
    if tokens > 0 {
        let sale_seeds: &[&[u8]] = &[
            SALE_SEED_PREFIX,
            sale.creator.as_ref(),
            sale.ticker.as_bytes(),
            &[sale.bump],
        ];
        invoke_signed(
            &token_instruction::transfer(
                token_program.key,
                pool_token_account.key,
                destination.key,
                sale_account.key,
                &[],
                tokens,
            )?,
            &[
                pool_token_account.clone(),
                destination.clone(),
                sale_account.clone(),
                token_program.clone(),
            ],
            &[sale_seeds],
        )?;
    }
    serialize_to_account(&record, record_account)?;

    msg!("✅ Claimed {} tokens for contribution #{} into {}", tokens, record.index, destination.key);
    Ok(())
}
