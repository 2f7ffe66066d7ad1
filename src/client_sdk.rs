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

//! # Token Crowdsale - Client SDK
//!
//! Helpers for clients of the crowdsale program: address derivation for every
//! sale account and instruction builders with the account order each
//! processor expects.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use token_crowdsale::client_sdk::{SaleClient, SaleConfig};
//! use solana_program::pubkey::Pubkey;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SaleClient::new(token_crowdsale::id());
//! let creator = Pubkey::new_unique();
//! let fee_destination = Pubkey::new_unique();
//!
//! let config = SaleConfig::new("Pump Token", "PUMP", 1_000, 5_000_000_000, 10, 6)?;
//! let create = client.create_sale_instruction(&creator, &fee_destination, &config)?;
//!
//! let contributor = Pubkey::new_unique();
//! let contribute = client.contribute_instruction(&contributor, &creator, "PUMP", 0, 1_000_000_000)?;
//! # Ok(())
//! # }
//! ```

use borsh::BorshSerialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::constants::amm_program;
use crate::state::SaleParams;
use crate::types::SaleInstruction;
use crate::utils::address::*;

/// Errors that can occur when using the sale client
#[derive(Debug)]
pub enum SaleClientError {
    /// Sale parameters would be rejected by the program
    InvalidParameters,
    /// Error during instruction serialization
    SerializationError,
}

impl From<std::io::Error> for SaleClientError {
    fn from(_error: std::io::Error) -> Self {
        Self::SerializationError
    }
}

impl std::fmt::Display for SaleClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleClientError::InvalidParameters => write!(f, "Invalid sale parameters"),
            SaleClientError::SerializationError => write!(f, "Failed to serialize instruction data"),
        }
    }
}

impl std::error::Error for SaleClientError {}

/// Parameters of a sale to create, checked with the program's own rules.
#[derive(Debug, Clone)]
pub struct SaleConfig {
    params: SaleParams,
}

impl SaleConfig {
    /// # Errors
    /// * `InvalidParameters` - zero supply or target, or name/ticker/fee/decimals out of bounds
    pub fn new(
        name: &str,
        ticker: &str,
        total_supply: u64,
        target: u64,
        fee_rate_bps: u16,
        decimals: u8,
    ) -> Result<Self, SaleClientError> {
        let params = SaleParams {
            name: name.to_string(),
            ticker: ticker.to_string(),
            total_supply,
            target,
            fee_rate_bps,
            decimals,
        };
        params.validate().map_err(|_| SaleClientError::InvalidParameters)?;
        Ok(Self { params })
    }

    pub fn ticker(&self) -> &str {
        &self.params.ticker
    }
}

/// Every address tied to one sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleAddresses {
    pub sale: Pubkey,
    pub sale_bump: u8,
    pub mint: Pubkey,
    pub pool_token: Pubkey,
    pub treasury: Pubkey,
    /// Creator's LP receipt address handed to the AMM
    pub lp_receipt: Pubkey,
}

/// External AMM accounts a finalize seeds.
#[derive(Debug, Clone, Copy)]
pub struct AmmPoolAccounts {
    /// Pool account, owned by the AMM program
    pub pool: Pubkey,
    /// Token account for the sale mint, owned by `pool`
    pub token_vault: Pubkey,
}

/// Client for the crowdsale program
pub struct SaleClient {
    program_id: Pubkey,
}

impl SaleClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Derives every address of the sale registered by `creator` under `ticker`.
    pub fn derive_sale_addresses(&self, creator: &Pubkey, ticker: &str) -> SaleAddresses {
        let (sale, sale_bump) = derive_sale_address(&self.program_id, creator, ticker);
        let (mint, _) = derive_mint_address(&self.program_id, creator, ticker);
        let (pool_token, _) = derive_pool_token_address(&self.program_id, &sale);
        let (treasury, _) = derive_treasury_address(&self.program_id, &sale);
        let (lp_receipt, _) = derive_user_token_address(&self.program_id, creator, &sale);
        SaleAddresses {
            sale,
            sale_bump,
            mint,
            pool_token,
            treasury,
            lp_receipt,
        }
    }

    /// Derives the ledger entry of `contributor` at `index` in a sale.
    pub fn derive_contribution_address(
        &self,
        contributor: &Pubkey,
        sale: &Pubkey,
        ticker: &str,
        index: u32,
    ) -> Pubkey {
        derive_contribution_address(&self.program_id, contributor, &LedgerSeed::for_index(ticker, sale, index)).0
    }

    pub fn create_sale_instruction(
        &self,
        creator: &Pubkey,
        fee_destination: &Pubkey,
        config: &SaleConfig,
    ) -> Result<Instruction, SaleClientError> {
        let addresses = self.derive_sale_addresses(creator, &config.params.ticker);
        let data = SaleInstruction::CreateSale {
            name: config.params.name.clone(),
            ticker: config.params.ticker.clone(),
            total_supply: config.params.total_supply,
            target: config.params.target,
            fee_rate_bps: config.params.fee_rate_bps,
            decimals: config.params.decimals,
        }
        .try_to_vec()?;
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*creator, true),
                AccountMeta::new(addresses.sale, false),
                AccountMeta::new(addresses.mint, false),
                AccountMeta::new(addresses.pool_token, false),
                AccountMeta::new(addresses.treasury, false),
                AccountMeta::new_readonly(*fee_destination, false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            data,
        })
    }

    /// Builds a contribution. `next_index` must be the sale's current
    /// `contribution_count`; a stale value is rejected on chain.
    pub fn contribute_instruction(
        &self,
        contributor: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        next_index: u32,
        amount: u64,
    ) -> Result<Instruction, SaleClientError> {
        let addresses = self.derive_sale_addresses(creator, ticker);
        let record = self.derive_contribution_address(contributor, &addresses.sale, ticker, next_index);
        let data = SaleInstruction::Contribute { amount }.try_to_vec()?;
        Ok(self.ledger_instruction(contributor, &addresses, record, data))
    }

    pub fn refund_instruction(
        &self,
        contributor: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        contribution_index: u32,
    ) -> Result<Instruction, SaleClientError> {
        let addresses = self.derive_sale_addresses(creator, ticker);
        let record = self.derive_contribution_address(contributor, &addresses.sale, ticker, contribution_index);
        let data = SaleInstruction::Refund { contribution_index }.try_to_vec()?;
        Ok(self.ledger_instruction(contributor, &addresses, record, data))
    }

    /// Builds a token claim for a finalized sale. `destination` is any token
    /// account of the sale mint.
    pub fn claim_tokens_instruction(
        &self,
        contributor: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        contribution_index: u32,
        destination: &Pubkey,
    ) -> Result<Instruction, SaleClientError> {
        let addresses = self.derive_sale_addresses(creator, ticker);
        let record = self.derive_contribution_address(contributor, &addresses.sale, ticker, contribution_index);
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(*contributor, true),
                AccountMeta::new_readonly(addresses.sale, false),
                AccountMeta::new(record, false),
                AccountMeta::new(addresses.pool_token, false),
                AccountMeta::new(*destination, false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            data: SaleInstruction::ClaimTokens { contribution_index }.try_to_vec()?,
        })
    }

    fn ledger_instruction(
        &self,
        contributor: &Pubkey,
        addresses: &SaleAddresses,
        record: Pubkey,
        data: Vec<u8>,
    ) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*contributor, true),
                AccountMeta::new(addresses.sale, false),
                AccountMeta::new(record, false),
                AccountMeta::new(addresses.treasury, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            data,
        }
    }

    /// Builds a finalize. Ledger entries in `consumed_records` are marked
    /// consumed in the same transaction.
    #[allow(clippy::too_many_arguments)]
    pub fn finalize_instruction(
        &self,
        caller: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        fee_destination: &Pubkey,
        amm: &AmmPoolAccounts,
        consumed_records: &[Pubkey],
    ) -> Result<Instruction, SaleClientError> {
        let data = SaleInstruction::Finalize.try_to_vec()?;
        let mut instruction = self.pool_instruction(caller, creator, ticker, fee_destination, amm, data);
        instruction
            .accounts
            .extend(consumed_records.iter().map(|record| AccountMeta::new(*record, false)));
        Ok(instruction)
    }

    pub fn retry_pool_creation_instruction(
        &self,
        caller: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        fee_destination: &Pubkey,
        amm: &AmmPoolAccounts,
    ) -> Result<Instruction, SaleClientError> {
        let data = SaleInstruction::RetryPoolCreation.try_to_vec()?;
        Ok(self.pool_instruction(caller, creator, ticker, fee_destination, amm, data))
    }

    fn pool_instruction(
        &self,
        caller: &Pubkey,
        creator: &Pubkey,
        ticker: &str,
        fee_destination: &Pubkey,
        amm: &AmmPoolAccounts,
        data: Vec<u8>,
    ) -> Instruction {
        let addresses = self.derive_sale_addresses(creator, ticker);
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*caller, true),
                AccountMeta::new(addresses.sale, false),
                AccountMeta::new(addresses.treasury, false),
                AccountMeta::new(addresses.pool_token, false),
                AccountMeta::new(*fee_destination, false),
                AccountMeta::new(amm.pool, false),
                AccountMeta::new(amm.token_vault, false),
                AccountMeta::new_readonly(*creator, false),
                AccountMeta::new_readonly(addresses.lp_receipt, false),
                AccountMeta::new_readonly(amm_program::id(), false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            data,
        }
    }

    pub fn get_sale_status_instruction(&self, sale: &Pubkey) -> Result<Instruction, SaleClientError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![AccountMeta::new_readonly(*sale, false)],
            data: SaleInstruction::GetSaleStatus.try_to_vec()?,
        })
    }

    pub fn get_version_instruction(&self) -> Result<Instruction, SaleClientError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![],
            data: SaleInstruction::GetVersion.try_to_vec()?,
        })
    }
}
