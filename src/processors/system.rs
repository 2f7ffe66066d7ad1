//! System Processors

use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg};

/// Logs the program name and version. Takes no accounts.
pub fn process_get_version(_accounts: &[AccountInfo]) -> ProgramResult {
    msg!("=== SMART CONTRACT VERSION ===");
    msg!("Contract Name: {}", env!("CARGO_PKG_NAME"));
    msg!("Contract Version: {}", env!("CARGO_PKG_VERSION"));
    msg!("Contract Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    msg!("License: {}", env!("CARGO_PKG_LICENSE"));
    msg!("Program ID: {}", crate::id());
    msg!("===============================");
    Ok(())
}
