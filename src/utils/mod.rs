//! Utility Functions
//!
//! Shared helpers used throughout the program: address derivation, account
//! validation, serialization and rent-funded account creation.

pub mod address;
pub mod rent;
pub mod serialization;
pub mod validation;

// Re-export commonly used items for convenience
pub use address::*;
pub use rent::*;
pub use serialization::*;
pub use validation::*;
