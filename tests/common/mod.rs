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

//! # Common Test Utilities
//!
//! Shared helpers for the integration tests:
//!
//! - Program test setup with the crowdsale program and a mock AMM
//! - Sale creation, contribution, refund and finalize helpers
//! - Account readers and error assertions

#![allow(dead_code)]

pub mod mock_amm;
pub mod sale_helpers;
pub mod setup;

#[allow(unused_imports)]
pub use mock_amm::*;
#[allow(unused_imports)]
pub use sale_helpers::*;
#[allow(unused_imports)]
pub use setup::*;

#[allow(unused_imports)]
pub use borsh::{BorshDeserialize, BorshSerialize};
#[allow(unused_imports)]
pub use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
#[allow(unused_imports)]
pub use solana_program_test::*;
#[allow(unused_imports)]
pub use solana_sdk::{
    program_pack::Pack,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

pub use token_crowdsale::ID as PROGRAM_ID;

/// Test constants
pub mod constants {
    /// SOL handed to every funded test user
    pub const DEFAULT_SOL_AIRDROP: u64 = 100_000_000_000;
    /// Scenario sale: 5 SOL target, 1000 tokens, 10 bps fee
    pub const SCENARIO_TARGET: u64 = 5_000_000_000;
    pub const SCENARIO_SUPPLY: u64 = 1_000;
    pub const SCENARIO_FEE_BPS: u16 = 10;
}
