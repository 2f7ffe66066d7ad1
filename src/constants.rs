//! Constants for the Token Crowdsale Program
//!
//! This module contains the configuration constants, sale bounds, fee limits,
//! and PDA seed prefixes used throughout the program.

/// PDA seed prefix for sale record accounts
pub const SALE_SEED_PREFIX: &[u8] = b"token";

/// PDA seed prefix for contribution ledger entries
pub const CONTRIBUTION_SEED_PREFIX: &[u8] = b"user-contribution";

/// PDA seed prefix for the token account holding a sale's minted supply
pub const POOL_TOKEN_SEED_PREFIX: &[u8] = b"pool-token";

/// PDA seed prefix for the creator's LP receipt address handed to the AMM
pub const USER_TOKEN_SEED_PREFIX: &[u8] = b"user-token";

/// PDA seed prefix for sale token mints
pub const MINT_SEED_PREFIX: &[u8] = b"mint";

/// PDA seed prefix for the SOL escrow vault of a sale
pub const TREASURY_SEED_PREFIX: &[u8] = b"treasury";

/// Placeholder seed used in place of the index for the very first ledger entry
pub const BOOTSTRAP_INDEX_SEED: &[u8] = &[0];

/// Maximum length of a sale name in bytes
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum length of a sale ticker in bytes (the ticker is also a PDA seed)
pub const MAX_TICKER_LENGTH: usize = 10;

/// Maximum decimals accepted for a sale mint
pub const MAX_DECIMALS: u8 = 9;

/// Denominator for basis point calculations (1 basis point = 0.01%)
pub const FEE_BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Maximum sale fee in basis points (10%)
pub const MAX_FEE_RATE_BPS: u16 = 1_000;

/// Share of the total supply seeded into the liquidity pool at finalize; the
/// rest is claimable by contributors
pub const LIQUIDITY_SUPPLY_BPS: u64 = 5_000;

/// Maximum amount accepted by a single contribution
pub const MAX_CONTRIBUTION_LAMPORTS: u64 = 10 * 1_000_000_000; // 10 SOL

/// External AMM program that receives the pool seed at finalize
pub mod amm_program {
    solana_program::declare_id!("2a8XNzH8DSYCLEFucJ39tw2GAo3x98VqVGk9MXkrd9aF");
}
