//! Address Derivation
//!
//! Every account the program owns or signs for lives at a program derived
//! address. This module is the single place where seed layouts are defined;
//! processors and the client SDK both derive through it so the two can never
//! drift apart.

use solana_program::pubkey::Pubkey;

use crate::constants::*;

/// Account kinds with a derived address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Sale record, owned by (creator, ticker)
    Token,
    /// Contribution ledger entry, owned by (contributor, ledger seed)
    UserContribution,
    /// Token account holding the sale's minted supply, owned by the sale
    PoolToken,
    /// Creator's LP receipt address handed to the AMM, owned by (creator, sale)
    UserToken,
    /// Sale token mint, owned by (creator, ticker)
    Mint,
    /// SOL escrow vault, owned by the sale
    Treasury,
}

impl AddressKind {
    pub fn seed_prefix(&self) -> &'static [u8] {
        match self {
            AddressKind::Token => SALE_SEED_PREFIX,
            AddressKind::UserContribution => CONTRIBUTION_SEED_PREFIX,
            AddressKind::PoolToken => POOL_TOKEN_SEED_PREFIX,
            AddressKind::UserToken => USER_TOKEN_SEED_PREFIX,
            AddressKind::Mint => MINT_SEED_PREFIX,
            AddressKind::Treasury => TREASURY_SEED_PREFIX,
        }
    }
}

/// Distinguishing seed of a contribution ledger entry.
///
/// Index 0 is keyed by the ticker with a single zero byte, every later index
/// by the sale address and the 4-byte little-endian index. The two layouts are
/// structurally different seed sets for the same logical sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSeed<'a> {
    Bootstrap { ticker: &'a str },
    Indexed { sale: Pubkey, index: u32 },
}

impl<'a> LedgerSeed<'a> {
    /// Picks the seed variant for a sequence index.
    pub fn for_index(ticker: &'a str, sale: &Pubkey, index: u32) -> Self {
        if index == 0 {
            LedgerSeed::Bootstrap { ticker }
        } else {
            LedgerSeed::Indexed { sale: *sale, index }
        }
    }

    /// Returns the (key component, index component) seed pair.
    pub fn components(&self) -> (Vec<u8>, Vec<u8>) {
        match self {
            LedgerSeed::Bootstrap { ticker } => {
                (ticker.as_bytes().to_vec(), BOOTSTRAP_INDEX_SEED.to_vec())
            }
            LedgerSeed::Indexed { sale, index } => {
                (sale.to_bytes().to_vec(), index.to_le_bytes().to_vec())
            }
        }
    }
}

/// Derives an address from a kind tag, an owner identity and ordered seed
/// components. Seeds are `[kind prefix, owner, components...]`.
pub fn derive_address(
    program_id: &Pubkey,
    kind: AddressKind,
    owner: &Pubkey,
    components: &[&[u8]],
) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(components.len() + 2);
    seeds.push(kind.seed_prefix());
    seeds.push(owner.as_ref());
    seeds.extend_from_slice(components);
    Pubkey::find_program_address(&seeds, program_id)
}

pub fn derive_sale_address(program_id: &Pubkey, creator: &Pubkey, ticker: &str) -> (Pubkey, u8) {
    derive_address(program_id, AddressKind::Token, creator, &[ticker.as_bytes()])
}

pub fn derive_mint_address(program_id: &Pubkey, creator: &Pubkey, ticker: &str) -> (Pubkey, u8) {
    derive_address(program_id, AddressKind::Mint, creator, &[ticker.as_bytes()])
}

pub fn derive_pool_token_address(program_id: &Pubkey, sale: &Pubkey) -> (Pubkey, u8) {
    derive_address(program_id, AddressKind::PoolToken, sale, &[])
}

pub fn derive_treasury_address(program_id: &Pubkey, sale: &Pubkey) -> (Pubkey, u8) {
    derive_address(program_id, AddressKind::Treasury, sale, &[])
}

pub fn derive_user_token_address(program_id: &Pubkey, creator: &Pubkey, sale: &Pubkey) -> (Pubkey, u8) {
    derive_address(program_id, AddressKind::UserToken, creator, &[sale.as_ref()])
}

pub fn derive_contribution_address(
    program_id: &Pubkey,
    contributor: &Pubkey,
    seed: &LedgerSeed,
) -> (Pubkey, u8) {
    let (key_component, index_component) = seed.components();
    derive_address(
        program_id,
        AddressKind::UserContribution,
        contributor,
        &[&key_component, &index_component],
    )
}
