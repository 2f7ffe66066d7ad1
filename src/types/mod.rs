//! Types Module
//!
//! Instruction definitions and the external liquidity pool interface.

pub mod amm;
pub mod instructions;

pub use amm::*;
pub use instructions::*;
