//! Contribution and Refund Processors
//!
//! A contribution reads the sale's running count as its sequence index,
//! increments it, credits the escrow and opens the ledger entry at the address
//! derived for that index. A refund zeroes one ledger entry and returns its
//! amount from the escrow. Both write the sale record last, and each runs as a
//! single transaction, so either every write lands or none does.

use crate::constants::*;
use crate::error::SaleError;
use crate::state::{ContributionRecord, EscrowTreasury, SaleRecord, VaultTreasury};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};

/// Processes a contribution of `amount` lamports. The sale's first
/// contribution must come from its creator.
///
/// # Account Order:
/// 0. **Contributor** (signer, writable)
/// 1. **Sale Record PDA** (writable)
/// 2. **Contribution Record PDA** (writable) - derived for the next index
/// 3. **Treasury PDA** (writable)
/// 4. **System Program** (readable)
pub fn process_contribute(program_id: &Pubkey, amount: u64, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("💰 Processing Contribute: {} lamports", amount);
    let account_info_iter = &mut accounts.iter();
    let contributor = next_account_info(account_info_iter)?;
    let sale_account = next_account_info(account_info_iter)?;
    let record_account = next_account_info(account_info_iter)?;
    let treasury_account = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;

    validate_signer(contributor, "Contributor")?;
    validate_writable(contributor, "Contributor")?;
    validate_writable(sale_account, "Sale record")?;
    validate_writable(record_account, "Contribution record")?;
    validate_writable(treasury_account, "Treasury")?;
    validate_program_id(system_program, &solana_program::system_program::id())?;

    let sale = validate_and_load_sale(sale_account, program_id)?;
    validate_treasury_account(treasury_account, program_id, sale_account.key, &sale)?;
    if sale.finalized {
        return Err(SaleError::SaleFinalized.into());
    }

    sale.check_ledger_opener(contributor.key)?;
    let index = sale.contribution_count;
    let seed = LedgerSeed::for_index(&sale.ticker, sale_account.key, index);
    let (record_key, record_bump) = derive_contribution_address(program_id, contributor.key, &seed);
    validate_pda(record_account, &record_key, SaleError::InvalidContributionAccount, "Contribution record")?;
    if !is_vacant(record_account) {
        msg!("🚨 Ledger entry #{} already exists at {}", index, record_key);
        return Err(SaleError::DuplicateIndex.into());
    }

    let mut staged: SaleRecord = sale.clone();
    let assigned = staged.record_contribution(amount)?;
    debug_assert_eq!(assigned, index);
    let projected_tokens = staged.projected_tokens(amount)?;

    let mut treasury = VaultTreasury::new(
        treasury_account,
        system_program,
        *sale_account.key,
        sale.treasury_bump,
        sale.treasury_rent_reserve,
    )
    .with_party(contributor);
    treasury.credit(contributor.key, amount)?;

    let rent = Rent::get()?;
    let clock = Clock::get()?;
    let (key_component, index_component) = seed.components();
    let record_seeds: &[&[u8]] = &[
        CONTRIBUTION_SEED_PREFIX,
        contributor.key.as_ref(),
        &key_component,
        &index_component,
        &[record_bump],
    ];
    create_pda_account(
        contributor,
        record_account,
        system_program,
        &rent,
        ContributionRecord::get_packed_len(),
        program_id,
        record_seeds,
    )?;

    let record = ContributionRecord::open(
        *sale_account.key,
        *contributor.key,
        index,
        amount,
        projected_tokens,
        clock.unix_timestamp,
        record_bump,
    );
    serialize_to_account(&record, record_account)?;
    serialize_to_account(&staged, sale_account)?;

    msg!("✅ Contribution #{} recorded at {}", index, record_key);
    msg!("   Raised: {} / {}", staged.raised_amount, staged.target);
    msg!("   Projected tokens: {}", projected_tokens);
    Ok(())
}

/// Processes a refund of the contributor's ledger entry at `contribution_index`.
///
/// # Account Order:
/// 0. **Contributor** (signer, writable) - Must own the ledger entry
/// 1. **Sale Record PDA** (writable)
/// 2. **Contribution Record PDA** (writable)
/// 3. **Treasury PDA** (writable)
/// 4. **System Program** (readable)
pub fn process_refund(program_id: &Pubkey, contribution_index: u32, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("↩️ Processing Refund of contribution #{}", contribution_index);
    let account_info_iter = &mut accounts.iter();
    let contributor = next_account_info(account_info_iter)?;
    let sale_account = next_account_info(account_info_iter)?;
    let record_account = next_account_info(account_info_iter)?;
    let treasury_account = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;

    validate_signer(contributor, "Contributor")?;
    validate_writable(contributor, "Contributor")?;
    validate_writable(sale_account, "Sale record")?;
    validate_writable(record_account, "Contribution record")?;
    validate_writable(treasury_account, "Treasury")?;
    validate_program_id(system_program, &solana_program::system_program::id())?;

    let mut sale = validate_and_load_sale(sale_account, program_id)?;
    validate_treasury_account(treasury_account, program_id, sale_account.key, &sale)?;
    if sale.finalized {
        return Err(SaleError::SaleFinalized.into());
    }

    let mut record = validate_and_load_contribution(record_account, program_id, sale_account.key, &sale)?;
    if record.index != contribution_index {
        msg!("❌ Record holds contribution #{}, not #{}", record.index, contribution_index);
        return Err(SaleError::InvalidContributionAccount.into());
    }
    if record.contributor != *contributor.key {
        msg!("❌ Contribution #{} belongs to {}", record.index, record.contributor);
        return Err(SaleError::Unauthorized.into());
    }

    let amount = record.refund()?;
    sale.record_refund(amount)?;

    let mut treasury = VaultTreasury::new(
        treasury_account,
        system_program,
        *sale_account.key,
        sale.treasury_bump,
        sale.treasury_rent_reserve,
    )
    .with_party(contributor);
    treasury.debit(amount, contributor.key)?;

    serialize_to_account(&record, record_account)?;
    serialize_to_account(&sale, sale_account)?;

    msg!("✅ Refunded {} lamports to {}", amount, contributor.key);
    msg!("   Raised: {} / {}", sale.raised_amount, sale.target);
    Ok(())
}
