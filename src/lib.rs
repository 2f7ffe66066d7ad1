//! Token Crowdsale Program
//!
//! A creator registers a sale for a freshly minted token with a fixed supply
//! and a base-currency target. Contributors deposit into the sale's escrow and
//! may take their deposit back until the sale is finalized. Once the target is
//! met, anyone may finalize: the escrow pays the sale fee, and the rest of the
//! escrow plus half of the token supply seed a pool in an external AMM
//! program. Contributors then claim the other half pro rata.

use borsh::BorshDeserialize;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

pub mod client_sdk;
pub mod constants;
pub mod error;
pub mod finalization;
pub mod processors;
pub mod state;
pub mod types;
pub mod utils;

pub use error::SaleError;
pub use state::{ContributionRecord, SaleRecord, SaleStatus};
pub use types::SaleInstruction;

use crate::state::SaleParams;

solana_program::declare_id!("7RWoC1N6QBQYJTSfwEioHi3xgD3rtaKxvmGAuVgyyPRj");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = SaleInstruction::try_from_slice(instruction_data).map_err(|e| {
        msg!("❌ Invalid instruction data: {:?}", e);
        ProgramError::InvalidInstructionData
    })?;

    match instruction {
        SaleInstruction::CreateSale {
            name,
            ticker,
            total_supply,
            target,
            fee_rate_bps,
            decimals,
        } => processors::process_create_sale(
            program_id,
            SaleParams {
                name,
                ticker,
                total_supply,
                target,
                fee_rate_bps,
                decimals,
            },
            accounts,
        ),
        SaleInstruction::Contribute { amount } => {
            processors::process_contribute(program_id, amount, accounts)
        }
        SaleInstruction::Refund { contribution_index } => {
            processors::process_refund(program_id, contribution_index, accounts)
        }
        SaleInstruction::Finalize => processors::process_finalize(program_id, accounts),
        SaleInstruction::RetryPoolCreation => {
            processors::process_retry_pool_creation(program_id, accounts)
        }
        SaleInstruction::GetSaleStatus => processors::process_get_sale_status(program_id, accounts),
        SaleInstruction::GetVersion => processors::process_get_version(accounts),
        SaleInstruction::ClaimTokens { contribution_index } => {
            processors::process_claim_tokens(program_id, contribution_index, accounts)
        }
    }
}
