//! Sale Instructions
//!
//! This module contains the instruction definitions for the Token Crowdsale Program.

use borsh::{BorshDeserialize, BorshSerialize};

/// All supported instructions for the Token Crowdsale Program.
///
/// Each instruction executes as one transaction: either every account write
/// it makes is committed or none is.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum SaleInstruction {
    /// Registers a new sale, its escrow vault, its mint and the minted supply.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Creator (pays rent)
    /// 1. `[writable]` Sale record PDA `["token", creator, ticker]`
    /// 2. `[writable]` Mint PDA `["mint", creator, ticker]`
    /// 3. `[writable]` Pool token PDA `["pool-token", sale]`
    /// 4. `[writable]` Treasury PDA `["treasury", sale]`
    /// 5. `[]` Fee destination
    /// 6. `[]` System program
    /// 7. `[]` SPL Token program
    CreateSale {
        name: String,
        ticker: String,
        total_supply: u64,
        target: u64,
        fee_rate_bps: u16,
        decimals: u8,
    },

    /// Deposits `amount` lamports into the sale escrow and opens a ledger entry
    /// at the next sequence index.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Contributor
    /// 1. `[writable]` Sale record PDA
    /// 2. `[writable]` Contribution record PDA for the next index
    /// 3. `[writable]` Treasury PDA
    /// 4. `[]` System program
    Contribute { amount: u64 },

    /// Returns the active amount of the contributor's ledger entry at
    /// `contribution_index`.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Contributor
    /// 1. `[writable]` Sale record PDA
    /// 2. `[writable]` Contribution record PDA
    /// 3. `[writable]` Treasury PDA
    /// 4. `[]` System program
    Refund { contribution_index: u32 },

    /// Commits the sale as finalized and seeds the external liquidity pool.
    ///
    /// Accounts:
    /// 0. `[signer]` Caller
    /// 1. `[writable]` Sale record PDA
    /// 2. `[writable]` Treasury PDA
    /// 3. `[writable]` Pool token PDA
    /// 4. `[writable]` Fee destination (must match the sale)
    /// 5. `[writable]` AMM pool account (owned by the AMM program)
    /// 6. `[writable]` AMM token vault (token account owned by the AMM pool)
    /// 7. `[]` Creator (LP recipient)
    /// 8. `[]` Creator LP receipt address `["user-token", creator, sale]`
    /// 9. `[]` AMM program
    /// 10. `[]` System program
    /// 11. `[]` SPL Token program
    /// 12.. `[writable]` Optional contribution records to mark consumed
    Finalize,

    /// Re-attempts only the pool creation step of a sale stuck in
    /// `FinalizedPoolPending`. Accounts 0..=11 as for `Finalize`.
    RetryPoolCreation,

    /// Logs the current status of a sale.
    ///
    /// Accounts:
    /// 0. `[]` Sale record PDA
    GetSaleStatus,

    /// Logs the program name and version.
    GetVersion,

    /// Transfers the contributor share of a finalized sale's supply owed to
    /// the ledger entry at `contribution_index`.
    ///
    /// Accounts:
    /// 0. `[signer]` Contributor
    /// 1. `[]` Sale record PDA
    /// 2. `[writable]` Contribution record PDA
    /// 3. `[writable]` Pool token PDA
    /// 4. `[writable]` Destination token account for the sale mint
    /// 5. `[]` SPL Token program
    ClaimTokens { contribution_index: u32 },
}
