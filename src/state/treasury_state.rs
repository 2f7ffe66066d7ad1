//! Sale Treasury
//!
//! The treasury is the escrow that holds a sale's raised funds until
//! finalize. On chain it is a data-less, system-owned PDA (`["treasury", sale]`)
//! that keeps a rent reserve on top of the escrowed lamports; the escrow
//! balance is everything above that reserve.
//!
//! Every contribution credits it, every refund debits it, and finalize drains
//! it. The sale record's `raised_amount` must equal `escrow_balance()` at every
//! observation point.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction,
};

use crate::constants::TREASURY_SEED_PREFIX;
use crate::error::SaleError;

/// Escrow operations the sale logic needs from a treasury.
///
/// Parties are addressed by key; implementations resolve them to whatever
/// balance service moves the funds.
pub trait EscrowTreasury {
    /// Funds currently held in escrow
    fn escrow_balance(&self) -> u64;

    /// Moves `amount` from `from` into escrow.
    fn credit(&mut self, from: &Pubkey, amount: u64) -> ProgramResult;

    /// Moves `amount` out of escrow to `destination`.
    /// Fails with `InsufficientEscrow` when the escrow holds less.
    fn debit(&mut self, amount: u64, destination: &Pubkey) -> ProgramResult;

    /// Moves the whole escrow to `destination` and returns the amount moved.
    fn drain(&mut self, destination: &Pubkey) -> Result<u64, ProgramError> {
        let amount = self.escrow_balance();
        if amount > 0 {
            self.debit(amount, destination)?;
        }
        Ok(amount)
    }
}

/// On-chain treasury backed by the sale's SOL vault PDA and the system program.
pub struct VaultTreasury<'a, 'info> {
    vault: &'a AccountInfo<'info>,
    system_program: &'a AccountInfo<'info>,
    parties: Vec<&'a AccountInfo<'info>>,
    sale: Pubkey,
    bump: u8,
    rent_reserve: u64,
}

impl<'a, 'info> VaultTreasury<'a, 'info> {
    pub fn new(
        vault: &'a AccountInfo<'info>,
        system_program: &'a AccountInfo<'info>,
        sale: Pubkey,
        bump: u8,
        rent_reserve: u64,
    ) -> Self {
        Self {
            vault,
            system_program,
            parties: Vec::new(),
            sale,
            bump,
            rent_reserve,
        }
    }

    /// Registers an account funds may move from or to.
    pub fn with_party(mut self, party: &'a AccountInfo<'info>) -> Self {
        self.parties.push(party);
        self
    }

    fn party(&self, key: &Pubkey) -> Result<&'a AccountInfo<'info>, ProgramError> {
        self.parties
            .iter()
            .find(|account| account.key == key)
            .copied()
            .ok_or_else(|| {
                msg!("Treasury party {} was not provided", key);
                ProgramError::NotEnoughAccountKeys
            })
    }
}

impl<'a, 'info> EscrowTreasury for VaultTreasury<'a, 'info> {
    fn escrow_balance(&self) -> u64 {
        self.vault.lamports().saturating_sub(self.rent_reserve)
    }

    fn credit(&mut self, from: &Pubkey, amount: u64) -> ProgramResult {
        let source = self.party(from)?;
        invoke(
            &system_instruction::transfer(source.key, self.vault.key, amount),
            &[source.clone(), self.vault.clone(), self.system_program.clone()],
        )
        .map_err(|e| {
            msg!("Balance service rejected credit of {} from {}: {:?}", amount, from, e);
            SaleError::ExternalServiceFailure
        })?;
        Ok(())
    }

    fn debit(&mut self, amount: u64, destination: &Pubkey) -> ProgramResult {
        let available = self.escrow_balance();
        if available < amount {
            msg!("Escrow holds {} but {} was requested", available, amount);
            return Err(SaleError::InsufficientEscrow.into());
        }
        let target = self.party(destination)?;
        let treasury_seeds: &[&[u8]] = &[TREASURY_SEED_PREFIX, self.sale.as_ref(), &[self.bump]];
        invoke_signed(
            &system_instruction::transfer(self.vault.key, target.key, amount),
            &[self.vault.clone(), target.clone(), self.system_program.clone()],
            &[treasury_seeds],
        )
        .map_err(|e| {
            msg!("Balance service rejected debit of {} to {}: {:?}", amount, destination, e);
            SaleError::ExternalServiceFailure
        })?;
        Ok(())
    }
}
