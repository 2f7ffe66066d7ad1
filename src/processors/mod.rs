//! Processors Module
//!
//! This module contains all processor functions organized by functionality.

pub mod claim;
pub mod contribution;
pub mod finalize;
pub mod sale_creation;
pub mod system;
pub mod utilities;

// Re-export sale creation functions
pub use sale_creation::*;

// Re-export contribution and refund functions
pub use contribution::*;

// Re-export finalize and claim functions
pub use claim::*;
pub use finalize::*;

// Re-export system and view functions
pub use system::*;
pub use utilities::*;
