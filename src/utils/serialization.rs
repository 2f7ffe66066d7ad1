//! Serialization Utilities
//!
//! Account data is written through a temporary buffer and copied into the
//! account in one step, so a failed serialization never leaves a half-written
//! record behind. Accounts are sized for their maximum encoded length, so
//! reads tolerate trailing bytes.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Safe buffer serialization into an account.
///
/// # Arguments
/// * `data` - The data to serialize (must implement BorshSerialize)
/// * `account` - The account to write the data to
///
/// # Returns
/// * `ProgramResult` - Success or error code
pub fn serialize_to_account<T: BorshSerialize>(data: &T, account: &AccountInfo) -> ProgramResult {
    let mut serialized_data = Vec::new();
    data.serialize(&mut serialized_data).map_err(|e| {
        msg!("serialize_to_account: buffer serialization failed: {:?}", e);
        ProgramError::BorshIoError(e.to_string())
    })?;
    #[cfg(feature = "debug-logs")]
    msg!("DEBUG: serialize_to_account: buffer len {}", serialized_data.len());

    let account_data_len = account.data_len();
    if serialized_data.len() > account_data_len {
        msg!(
            "serialize_to_account: data too large for account. Need: {}, Have: {}",
            serialized_data.len(),
            account_data_len
        );
        return Err(ProgramError::AccountDataTooSmall);
    }

    {
        let mut account_data = account.try_borrow_mut_data()?;
        account_data[..serialized_data.len()].copy_from_slice(&serialized_data);
    }
    #[cfg(feature = "debug-logs")]
    msg!("DEBUG: serialize_to_account: copied into {}", account.key);
    Ok(())
}

/// Deserializes program-owned account data.
///
/// Fails with `IncorrectProgramId` when the account is not owned by
/// `program_id` and `UninitializedAccount` when it holds no data.
pub fn load_account<T: BorshDeserialize>(
    account: &AccountInfo,
    program_id: &Pubkey,
) -> Result<T, ProgramError> {
    if account.owner != program_id {
        msg!("❌ Account {} is not owned by this program", account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    let data = account.try_borrow_data()?;
    if data.is_empty() {
        return Err(ProgramError::UninitializedAccount);
    }
    T::deserialize(&mut &data[..]).map_err(|e| {
        msg!("❌ Failed to deserialize {}: {:?}", account.key, e);
        ProgramError::InvalidAccountData
    })
}
