//! Sale Finalization
//!
//! Finalize is the one-time transition of a sale from `Open` to its terminal
//! state. The local unit of work validates the sale, computes the pool seed,
//! cross-checks the escrow against `raised_amount`, releases the escrow and
//! commits the record with `finalized = true`. Only then is the external pool
//! created.
//!
//! The commit is irreversible. If pool creation fails afterwards the sale is
//! left `FinalizedPoolPending` and the call reports `FinalizePartial`; callers
//! must persist the committed record and may re-attempt only the pool creation
//! step through [`retry_pool_creation`]. When the gateway is a cross-program
//! invocation the runtime aborts the whole transaction on failure, so on chain
//! this window collapses into an ordinary rollback.

use solana_program::{entrypoint::ProgramResult, msg, program_error::ProgramError, pubkey::Pubkey};

use crate::constants::FEE_BASIS_POINTS_DENOMINATOR;
use crate::error::SaleError;
use crate::state::{EscrowTreasury, FinalizeSnapshot, SaleRecord, SaleStatus, SupplySplit};
use crate::types::PoolSeedRequest;

/// External liquidity pool creation service.
pub trait LiquidityPoolGateway {
    /// Creates the pool and seeds it with the requested reserves.
    fn create_pool(&mut self, request: &PoolSeedRequest) -> ProgramResult;
}

/// Split of the raised funds and supply at finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    /// Lamports paid to the fee destination
    pub fee: u64,
    /// Lamports seeded into the pool: `raised - fee`
    pub base_reserve: u64,
    /// Tokens seeded into the pool
    pub token_reserve: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub snapshot: FinalizeSnapshot,
    pub reserves: PoolReserves,
}

/// Computes the pool seed from a finalize snapshot. The fee is rounded down.
pub fn compute_pool_reserves(snapshot: &FinalizeSnapshot) -> Result<PoolReserves, SaleError> {
    let fee = (snapshot.raised_amount as u128)
        .checked_mul(snapshot.fee_rate_bps as u128)
        .ok_or(SaleError::ArithmeticOverflow)?
        / FEE_BASIS_POINTS_DENOMINATOR as u128;
    let fee = u64::try_from(fee).map_err(|_| SaleError::ArithmeticOverflow)?;
    let base_reserve = snapshot
        .raised_amount
        .checked_sub(fee)
        .ok_or(SaleError::ArithmeticOverflow)?;
    let token_reserve = SupplySplit::of(snapshot.total_supply)?.liquidity;
    Ok(PoolReserves {
        fee,
        base_reserve,
        token_reserve,
    })
}

fn pool_seed_request(sale: &SaleRecord) -> PoolSeedRequest {
    PoolSeedRequest {
        base_reserve: sale.pool_base_reserve,
        token_reserve: sale.pool_token_reserve,
        fee_destination: sale.fee_destination,
        lp_recipient: sale.creator,
    }
}

/// Finalizes a sale and seeds its liquidity pool.
///
/// Failures before the commit leave `sale` and the treasury untouched. After
/// the commit, a gateway failure returns `FinalizePartial` with `sale` already
/// mutated to its terminal, poolless state.
pub fn finalize_sale<T: EscrowTreasury, G: LiquidityPoolGateway>(
    sale: &mut SaleRecord,
    treasury: &mut T,
    gateway: &mut G,
    pool_base_account: &Pubkey,
    now: i64,
) -> Result<FinalizeOutcome, ProgramError> {
    let mut staged = sale.clone();
    let snapshot = staged.finalize(now)?;
    let reserves = compute_pool_reserves(&snapshot)?;

    let escrowed = treasury.escrow_balance();
    if escrowed != snapshot.raised_amount {
        msg!(
            "🚨 Escrow {} does not match raised amount {}",
            escrowed,
            snapshot.raised_amount
        );
        return Err(SaleError::TreasuryMismatch.into());
    }

    if reserves.fee > 0 {
        treasury.debit(reserves.fee, &staged.fee_destination)?;
    }
    let drained = treasury.drain(pool_base_account)?;
    if drained != reserves.base_reserve {
        msg!(
            "🚨 Drained {} but the pool base reserve is {}",
            drained,
            reserves.base_reserve
        );
        return Err(SaleError::TreasuryMismatch.into());
    }

    staged.pool_base_reserve = reserves.base_reserve;
    staged.pool_token_reserve = reserves.token_reserve;
    *sale = staged;
    msg!(
        "✅ Sale committed as finalized: fee {}, base reserve {}, token reserve {}",
        reserves.fee,
        reserves.base_reserve,
        reserves.token_reserve
    );

    if let Err(e) = gateway.create_pool(&pool_seed_request(sale)) {
        msg!("❌ Pool creation failed after commit: {:?}", e);
        msg!("Sale is finalized without a pool; retry pool creation only");
        return Err(SaleError::FinalizePartial.into());
    }
    sale.mark_pool_seeded()?;
    msg!("✅ Liquidity pool seeded");

    Ok(FinalizeOutcome { snapshot, reserves })
}

/// Re-attempts pool creation for a sale stuck in `FinalizedPoolPending`,
/// using the reserves recorded at commit.
pub fn retry_pool_creation<G: LiquidityPoolGateway>(
    sale: &mut SaleRecord,
    gateway: &mut G,
) -> ProgramResult {
    if sale.status() != SaleStatus::FinalizedPoolPending {
        msg!("Sale status is {:?}", sale.status());
        return Err(SaleError::PoolNotPending.into());
    }
    gateway.create_pool(&pool_seed_request(sale)).map_err(|e| {
        msg!("❌ Pool creation retry failed: {:?}", e);
        ProgramError::from(SaleError::ExternalServiceFailure)
    })?;
    sale.mark_pool_seeded()?;
    msg!("✅ Liquidity pool seeded on retry");
    Ok(())
}
