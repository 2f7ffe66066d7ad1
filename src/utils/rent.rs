//! Rent-Funded Account Creation
//!
//! Creates accounts at program derived addresses. An address can be funded by
//! anyone before it is created, which makes a plain `create_account` fail; in
//! that case only the rent shortfall is transferred and the account is
//! allocated and assigned directly.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
    system_instruction,
    sysvar::rent::Rent,
};

/// Creates a rent-exempt account of `space` bytes owned by `owner` at the PDA
/// signed for by `signer_seeds`.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    rent: &Rent,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let required_lamports = rent.minimum_balance(space);

    if new_account.lamports() == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                new_account.key,
                required_lamports,
                space as u64,
                owner,
            ),
            &[payer.clone(), new_account.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    msg!("Address {} was pre-funded, topping up", new_account.key);
    let shortfall = required_lamports.saturating_sub(new_account.lamports());
    if shortfall > 0 {
        invoke(
            &system_instruction::transfer(payer.key, new_account.key, shortfall),
            &[payer.clone(), new_account.clone(), system_program.clone()],
        )?;
    }
    if space > 0 {
        invoke_signed(
            &system_instruction::allocate(new_account.key, space as u64),
            &[new_account.clone(), system_program.clone()],
            &[signer_seeds],
        )?;
    }
    if owner != system_program.key {
        invoke_signed(
            &system_instruction::assign(new_account.key, owner),
            &[new_account.clone(), system_program.clone()],
            &[signer_seeds],
        )?;
    }
    Ok(())
}
