//! Finalize Processors
//!
//! Wires the on-chain accounts into the finalization orchestrator: the SOL
//! vault becomes the escrow treasury and the external AMM program becomes the
//! liquidity pool gateway.

use crate::constants::amm_program::ID as AMM_PROGRAM_ID;
use crate::constants::*;
use crate::error::SaleError;
use crate::finalization::{finalize_sale, retry_pool_creation, LiquidityPoolGateway};
use crate::state::{SaleRecord, VaultTreasury};
use crate::types::{AmmInstruction, PoolSeedRequest};
use crate::utils::*;
use borsh::BorshSerialize;
use solana_program::{
    account_info::AccountInfo,
    clock::Clock,
    entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction},
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::Sysvar,
};
use spl_token::{instruction as token_instruction, state::Account as TokenAccount};

/// Liquidity pool gateway backed by the external AMM program.
///
/// Moves the token reserve out of the sale's pool token account and calls the
/// AMM's `InitializePool`, both signed by the sale PDA.
pub struct AmmPoolGateway<'a, 'info> {
    sale_account: &'a AccountInfo<'info>,
    pool_token_account: &'a AccountInfo<'info>,
    amm_pool: &'a AccountInfo<'info>,
    amm_token_vault: &'a AccountInfo<'info>,
    fee_destination: &'a AccountInfo<'info>,
    lp_recipient: &'a AccountInfo<'info>,
    lp_receipt: &'a AccountInfo<'info>,
    amm_program: &'a AccountInfo<'info>,
    token_program: &'a AccountInfo<'info>,
    creator: Pubkey,
    ticker: String,
    sale_bump: u8,
    mint: Pubkey,
}

impl<'a, 'info> AmmPoolGateway<'a, 'info> {
    fn sale_seeds(&self) -> [&[u8]; 4] {
        [
            SALE_SEED_PREFIX,
            self.creator.as_ref(),
            self.ticker.as_bytes(),
            std::slice::from_ref(&self.sale_bump),
        ]
    }

    fn validate_token_vault(&self) -> ProgramResult {
        if self.amm_token_vault.owner != &spl_token::id() {
            msg!("❌ AMM token vault is not a token account");
            return Err(ProgramError::IncorrectProgramId);
        }
        let vault = TokenAccount::unpack(&self.amm_token_vault.try_borrow_data()?)?;
        if vault.mint != self.mint || vault.owner != *self.amm_pool.key {
            msg!("❌ AMM token vault must hold mint {} for pool {}", self.mint, self.amm_pool.key);
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(())
    }
}

impl<'a, 'info> LiquidityPoolGateway for AmmPoolGateway<'a, 'info> {
    fn create_pool(&mut self, request: &PoolSeedRequest) -> ProgramResult {
        self.validate_token_vault()?;
        let seeds = self.sale_seeds();

        invoke_signed(
            &token_instruction::transfer(
                self.token_program.key,
                self.pool_token_account.key,
                self.amm_token_vault.key,
                self.sale_account.key,
                &[],
                request.token_reserve,
            )?,
            &[
                self.pool_token_account.clone(),
                self.amm_token_vault.clone(),
                self.sale_account.clone(),
                self.token_program.clone(),
            ],
            &[&seeds[..]],
        )?;

        let data = AmmInstruction::InitializePool {
            base_reserve: request.base_reserve,
            token_reserve: request.token_reserve,
        }
        .try_to_vec()
        .map_err(|e| ProgramError::BorshIoError(e.to_string()))?;
        let instruction = Instruction {
            program_id: *self.amm_program.key,
            accounts: vec![
                AccountMeta::new(*self.amm_pool.key, false),
                AccountMeta::new(*self.amm_token_vault.key, false),
                AccountMeta::new_readonly(*self.sale_account.key, true),
                AccountMeta::new_readonly(request.fee_destination, false),
                AccountMeta::new_readonly(request.lp_recipient, false),
                AccountMeta::new_readonly(*self.lp_receipt.key, false),
            ],
            data,
        };
        invoke_signed(
            &instruction,
            &[
                self.amm_pool.clone(),
                self.amm_token_vault.clone(),
                self.sale_account.clone(),
                self.fee_destination.clone(),
                self.lp_recipient.clone(),
                self.lp_receipt.clone(),
                self.amm_program.clone(),
            ],
            &[&seeds[..]],
        )
    }
}

/// Accounts shared by `Finalize` and `RetryPoolCreation`, validated against
/// the loaded sale.
struct FinalizeAccounts<'a, 'info> {
    sale_account: &'a AccountInfo<'info>,
    treasury_account: &'a AccountInfo<'info>,
    pool_token_account: &'a AccountInfo<'info>,
    fee_destination: &'a AccountInfo<'info>,
    amm_pool: &'a AccountInfo<'info>,
    amm_token_vault: &'a AccountInfo<'info>,
    creator: &'a AccountInfo<'info>,
    lp_receipt: &'a AccountInfo<'info>,
    amm_program: &'a AccountInfo<'info>,
    system_program: &'a AccountInfo<'info>,
    token_program: &'a AccountInfo<'info>,
    sale: SaleRecord,
}

impl<'a, 'info> FinalizeAccounts<'a, 'info> {
    fn load(program_id: &Pubkey, accounts: &'a [AccountInfo<'info>]) -> Result<Self, ProgramError> {
        if accounts.len() < 12 {
            return Err(ProgramError::NotEnoughAccountKeys);
        }
        let caller = &accounts[0];
        let sale_account = &accounts[1];
        let treasury_account = &accounts[2];
        let pool_token_account = &accounts[3];
        let fee_destination = &accounts[4];
        let amm_pool = &accounts[5];
        let amm_token_vault = &accounts[6];
        let creator = &accounts[7];
        let lp_receipt = &accounts[8];
        let amm_program = &accounts[9];
        let system_program = &accounts[10];
        let token_program = &accounts[11];

        validate_signer(caller, "Caller")?;
        validate_writable(sale_account, "Sale record")?;
        validate_writable(treasury_account, "Treasury")?;
        validate_writable(pool_token_account, "Pool token account")?;
        validate_writable(fee_destination, "Fee destination")?;
        validate_writable(amm_pool, "AMM pool")?;
        validate_writable(amm_token_vault, "AMM token vault")?;
        validate_program_id(amm_program, &AMM_PROGRAM_ID)?;
        validate_program_id(system_program, &solana_program::system_program::id())?;
        validate_program_id(token_program, &spl_token::id())?;

        let sale = validate_and_load_sale(sale_account, program_id)?;
        validate_treasury_account(treasury_account, program_id, sale_account.key, &sale)?;
        validate_pool_token_account(pool_token_account, program_id, sale_account.key, &sale)?;

        if *fee_destination.key != sale.fee_destination {
            msg!("❌ Fee destination {} does not match sale ({})", fee_destination.key, sale.fee_destination);
            return Err(SaleError::Unauthorized.into());
        }
        if *creator.key != sale.creator {
            msg!("❌ LP recipient must be the sale creator {}", sale.creator);
            return Err(SaleError::Unauthorized.into());
        }
        let (lp_receipt_key, _) = derive_user_token_address(program_id, creator.key, sale_account.key);
        validate_pda(lp_receipt, &lp_receipt_key, ProgramError::InvalidArgument, "LP receipt address")?;
        if amm_pool.owner != &AMM_PROGRAM_ID {
            msg!("❌ AMM pool {} is not owned by the AMM program", amm_pool.key);
            return Err(ProgramError::IncorrectProgramId);
        }

        Ok(Self {
            sale_account,
            treasury_account,
            pool_token_account,
            fee_destination,
            amm_pool,
            amm_token_vault,
            creator,
            lp_receipt,
            amm_program,
            system_program,
            token_program,
            sale,
        })
    }

    fn gateway(&self) -> AmmPoolGateway<'a, 'info> {
        AmmPoolGateway {
            sale_account: self.sale_account,
            pool_token_account: self.pool_token_account,
            amm_pool: self.amm_pool,
            amm_token_vault: self.amm_token_vault,
            fee_destination: self.fee_destination,
            lp_recipient: self.creator,
            lp_receipt: self.lp_receipt,
            amm_program: self.amm_program,
            token_program: self.token_program,
            creator: self.sale.creator,
            ticker: self.sale.ticker.clone(),
            sale_bump: self.sale.bump,
            mint: self.sale.mint,
        }
    }

    fn treasury(&self) -> VaultTreasury<'a, 'info> {
        VaultTreasury::new(
            self.treasury_account,
            self.system_program,
            *self.sale_account.key,
            self.sale.treasury_bump,
            self.sale.treasury_rent_reserve,
        )
        .with_party(self.fee_destination)
        .with_party(self.amm_pool)
    }
}

/// Processes sale finalization. Permissionless once the target is reached.
///
/// Contribution records passed after the fixed accounts are marked consumed.
/// A pool creation failure after the commit returns `FinalizePartial`; the
/// runtime then discards the transaction as a whole, so the sale stays open on
/// chain and the finalize can be submitted again.
pub fn process_finalize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("🏁 Processing Finalize");
    let ctx = FinalizeAccounts::load(program_id, accounts)?;
    let mut sale = ctx.sale.clone();
    let mut treasury = ctx.treasury();
    let mut gateway = ctx.gateway();
    let clock = Clock::get()?;

    let result = finalize_sale(
        &mut sale,
        &mut treasury,
        &mut gateway,
        ctx.amm_pool.key,
        clock.unix_timestamp,
    );
    if sale.finalized {
        serialize_to_account(&sale, ctx.sale_account)?;
    }
    let outcome = result?;

    let mut consumed = 0u32;
    for record_account in &accounts[12..] {
        validate_writable(record_account, "Contribution record")?;
        let mut record =
            validate_and_load_contribution(record_account, program_id, ctx.sale_account.key, &sale)?;
        if record.mark_consumed() {
            serialize_to_account(&record, record_account)?;
            consumed += 1;
        }
    }

    msg!("✅ Sale {} finalized", ctx.sale_account.key);
    msg!("   Raised: {}", outcome.snapshot.raised_amount);
    msg!("   Fee paid: {}", outcome.reserves.fee);
    msg!("   Pool base reserve: {}", outcome.reserves.base_reserve);
    msg!("   Pool token reserve: {}", outcome.reserves.token_reserve);
    msg!("   Contribution records consumed: {}", consumed);
    Ok(())
}

/// Processes a retry of the pool creation step for a sale left in
/// `FinalizedPoolPending`. Accounts as for `Finalize`.
pub fn process_retry_pool_creation(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("🔁 Processing RetryPoolCreation");
    let ctx = FinalizeAccounts::load(program_id, accounts)?;
    let mut sale = ctx.sale.clone();
    let mut gateway = ctx.gateway();

    retry_pool_creation(&mut sale, &mut gateway)?;
    serialize_to_account(&sale, ctx.sale_account)?;
    msg!("✅ Pool seeded for sale {}", ctx.sale_account.key);
    Ok(())
}
