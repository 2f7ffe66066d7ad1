//! State Module
//!
//! Account state of the program: sale records, contribution ledger entries and
//! the treasury escrow.

pub mod contribution_state;
pub mod sale_state;
pub mod treasury_state;

pub use contribution_state::*;
pub use sale_state::*;
pub use treasury_state::*;
