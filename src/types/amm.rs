//! Liquidity Pool Interface
//!
//! The AMM is an external program. The sale only needs to hand it a fixed
//! parameter set and learn whether pool creation succeeded; it never reads the
//! AMM's internal account layout.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Instruction understood by the AMM program.
///
/// Accounts:
/// 0. `[writable]` Pool account (owned by the AMM program, credited with the base reserve)
/// 1. `[writable]` Pool token vault (credited with the token reserve)
/// 2. `[signer]` Sale record PDA (pool initializer)
/// 3. `[]` Fee destination
/// 4. `[]` Initial liquidity provider
/// 5. `[]` Liquidity provider token receipt address
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum AmmInstruction {
    InitializePool { base_reserve: u64, token_reserve: u64 },
}

/// Parameters of the one pool creation call made at finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSeedRequest {
    pub base_reserve: u64,
    pub token_reserve: u64,
    pub fee_destination: Pubkey,
    pub lp_recipient: Pubkey,
}
