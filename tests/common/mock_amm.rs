/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Mock AMM Program
//!
//! Stands in for the external AMM during integration tests. `InitializePool`
//! checks the seed it was handed and records it in the pool account.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
};
use spl_token::state::Account as TokenAccount;
use token_crowdsale::types::AmmInstruction;

/// State the mock AMM writes into a seeded pool account
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MockPoolState {
    pub is_initialized: bool,
    pub seeded_by: Pubkey,
    pub base_reserve: u64,
    pub token_reserve: u64,
    pub fee_destination: Pubkey,
    pub lp_recipient: Pubkey,
    pub lp_receipt: Pubkey,
}

impl MockPoolState {
    pub const LEN: usize = 1 + 32 + 8 + 8 + 32 + 32 + 32;
}

pub fn process_mock_amm(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = AmmInstruction::try_from_slice(instruction_data)
        .map_err(|_| ProgramError::InvalidInstructionData)?;
    match instruction {
        AmmInstruction::InitializePool {
            base_reserve,
            token_reserve,
        } => initialize_pool(program_id, accounts, base_reserve, token_reserve),
    }
}

fn initialize_pool(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    base_reserve: u64,
    token_reserve: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let pool = next_account_info(account_info_iter)?;
    let token_vault = next_account_info(account_info_iter)?;
    let seeder = next_account_info(account_info_iter)?;
    let fee_destination = next_account_info(account_info_iter)?;
    let lp_recipient = next_account_info(account_info_iter)?;
    let lp_receipt = next_account_info(account_info_iter)?;

    if !seeder.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }
    if pool.owner != program_id {
        return Err(ProgramError::IncorrectProgramId);
    }
    if pool.data.borrow().first().copied().unwrap_or(0) != 0 {
        msg!("mock amm: pool {} already initialized", pool.key);
        return Err(ProgramError::AccountAlreadyInitialized);
    }
    let vault = TokenAccount::unpack(&token_vault.data.borrow())?;
    if vault.owner != *pool.key || vault.amount < token_reserve {
        msg!("mock amm: vault holds {} tokens, {} required", vault.amount, token_reserve);
        return Err(ProgramError::InsufficientFunds);
    }
    if pool.lamports() < base_reserve {
        msg!("mock amm: pool holds {} lamports, {} required", pool.lamports(), base_reserve);
        return Err(ProgramError::InsufficientFunds);
    }

    let state = MockPoolState {
        is_initialized: true,
        seeded_by: *seeder.key,
        base_reserve,
        token_reserve,
        fee_destination: *fee_destination.key,
        lp_recipient: *lp_recipient.key,
        lp_receipt: *lp_receipt.key,
    };
    let data = state.try_to_vec().map_err(|e| ProgramError::BorshIoError(e.to_string()))?;
    pool.data.borrow_mut()[..data.len()].copy_from_slice(&data);
    msg!("mock amm: pool {} seeded with {} / {}", pool.key, base_reserve, token_reserve);
    Ok(())
}
