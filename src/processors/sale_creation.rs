//! Sale Creation Processor
//!
//! Registers a sale: the sale record, its token mint with the full supply
//! minted into the pool token account, and the SOL escrow vault. All accounts
//! live at addresses derived from (creator, ticker) so a second sale with the
//! same pair collides and is rejected.

use crate::constants::*;
use crate::error::SaleError;
use crate::state::{SaleBumps, SaleParams, SaleRecord};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_pack::Pack,
    pubkey::Pubkey,
    system_instruction,
    sysvar::{rent::Rent, Sysvar},
};
use spl_token::{
    instruction as token_instruction,
    state::{Account as TokenAccount, Mint as MintAccount},
};

/// Processes sale creation.
///
/// # Account Order:
/// 0. **Creator** (signer, writable) - Pays rent for every new account
/// 1. **Sale Record PDA** (writable) - `["token", creator, ticker]`
/// 2. **Mint PDA** (writable) - `["mint", creator, ticker]`
/// 3. **Pool Token PDA** (writable) - `["pool-token", sale]`
/// 4. **Treasury PDA** (writable) - `["treasury", sale]`
/// 5. **Fee Destination** (readable) - Receives the finalize fee
/// 6. **System Program** (readable)
/// 7. **SPL Token Program** (readable)
///
/// # Returns
/// * `ProgramResult` - Fails with `InvalidParameters` on bad input and
///   `DuplicateSale` when a sale already exists for (creator, ticker)
pub fn process_create_sale(
    program_id: &Pubkey,
    params: SaleParams,
    accounts: &[AccountInfo],
) -> ProgramResult {
    msg!("🚀 Processing CreateSale: {} ({})", params.name, params.ticker);
    let account_info_iter = &mut accounts.iter();
    let creator = next_account_info(account_info_iter)?;
    let sale_account = next_account_info(account_info_iter)?;
    let mint_account = next_account_info(account_info_iter)?;
    let pool_token_account = next_account_info(account_info_iter)?;
    let treasury_account = next_account_info(account_info_iter)?;
    let fee_destination = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    validate_signer(creator, "Creator")?;
    validate_writable(creator, "Creator")?;
    validate_writable(sale_account, "Sale record")?;
    validate_writable(mint_account, "Mint")?;
    validate_writable(pool_token_account, "Pool token account")?;
    validate_writable(treasury_account, "Treasury")?;
    validate_program_id(system_program, &solana_program::system_program::id())?;
    validate_program_id(token_program, &spl_token::id())?;

    // The ticker is a seed, so bounds are checked before any derivation.
    params.validate()?;
    if *fee_destination.key == Pubkey::default() {
        msg!("Fee destination must be set");
        return Err(SaleError::InvalidParameters.into());
    }

    let (sale_key, sale_bump) = derive_sale_address(program_id, creator.key, &params.ticker);
    let (mint_key, mint_bump) = derive_mint_address(program_id, creator.key, &params.ticker);
    let (pool_token_key, pool_token_bump) = derive_pool_token_address(program_id, &sale_key);
    let (treasury_key, treasury_bump) = derive_treasury_address(program_id, &sale_key);

    validate_pda(sale_account, &sale_key, SaleError::InvalidSaleAccount, "Sale record")?;
    validate_pda(mint_account, &mint_key, SaleError::InvalidSaleAccount, "Mint")?;
    validate_pda(pool_token_account, &pool_token_key, SaleError::InvalidSaleAccount, "Pool token account")?;
    validate_pda(treasury_account, &treasury_key, SaleError::InvalidTreasuryAccount, "Treasury")?;

    if !is_vacant(sale_account) {
        msg!("❌ A sale already exists for creator {} and ticker {}", creator.key, params.ticker);
        return Err(SaleError::DuplicateSale.into());
    }
    if !is_vacant(mint_account) || !is_vacant(pool_token_account) || !is_vacant(treasury_account) {
        msg!("❌ Sale accounts for ticker {} are already in use", params.ticker);
        return Err(SaleError::DuplicateSale.into());
    }

    let rent = Rent::get()?;
    let clock = Clock::get()?;

    let sale_seeds: &[&[u8]] = &[
        SALE_SEED_PREFIX,
        creator.key.as_ref(),
        params.ticker.as_bytes(),
        &[sale_bump],
    ];
    let mint_seeds: &[&[u8]] = &[
        MINT_SEED_PREFIX,
        creator.key.as_ref(),
        params.ticker.as_bytes(),
        &[mint_bump],
    ];
    let pool_token_seeds: &[&[u8]] = &[POOL_TOKEN_SEED_PREFIX, sale_key.as_ref(), &[pool_token_bump]];

    create_pda_account(
        creator,
        sale_account,
        system_program,
        &rent,
        SaleRecord::get_packed_len(),
        program_id,
        sale_seeds,
    )?;
    msg!("✅ Sale record created: {}", sale_key);

    create_pda_account(
        creator,
        mint_account,
        system_program,
        &rent,
        MintAccount::LEN,
        &spl_token::id(),
        mint_seeds,
    )?;
    invoke(
        &token_instruction::initialize_mint2(
            token_program.key,
            mint_account.key,
            &sale_key,
            None,
            params.decimals,
        )?,
        &[mint_account.clone(), token_program.clone()],
    )?;

    create_pda_account(
        creator,
        pool_token_account,
        system_program,
        &rent,
        TokenAccount::LEN,
        &spl_token::id(),
        pool_token_seeds,
    )?;
    invoke(
        &token_instruction::initialize_account3(
            token_program.key,
            pool_token_account.key,
            mint_account.key,
            &sale_key,
        )?,
        &[pool_token_account.clone(), mint_account.clone(), token_program.clone()],
    )?;

    invoke_signed(
        &token_instruction::mint_to(
            token_program.key,
            mint_account.key,
            pool_token_account.key,
            &sale_key,
            &[],
            params.total_supply,
        )?,
        &[
            mint_account.clone(),
            pool_token_account.clone(),
            sale_account.clone(),
            token_program.clone(),
        ],
        &[sale_seeds],
    )?;
    msg!("✅ Minted {} tokens into {}", params.total_supply, pool_token_key);

    // Anything already sitting at the vault address becomes part of the rent
    // reserve so the escrow starts at zero.
    let reserve_floor = rent.minimum_balance(0);
    let shortfall = reserve_floor.saturating_sub(treasury_account.lamports());
    if shortfall > 0 {
        invoke(
            &system_instruction::transfer(creator.key, treasury_account.key, shortfall),
            &[creator.clone(), treasury_account.clone(), system_program.clone()],
        )?;
    }
    let treasury_rent_reserve = treasury_account.lamports();

    let sale = SaleRecord::new(
        params,
        *creator.key,
        mint_key,
        *fee_destination.key,
        SaleBumps {
            sale: sale_bump,
            mint: mint_bump,
            pool_token: pool_token_bump,
            treasury: treasury_bump,
        },
        clock.unix_timestamp,
        treasury_rent_reserve,
    )?;
    serialize_to_account(&sale, sale_account)?;

    msg!("✅ Sale {} open", sale_key);
    msg!("   Target: {} lamports", sale.target);
    msg!("   Total supply: {}", sale.total_supply);
    msg!("   Fee: {} bps", sale.fee_rate_bps);
    msg!("   Treasury: {} (rent reserve {})", treasury_key, treasury_rent_reserve);
    Ok(())
}
