//! Sale Record State
//!
//! The sale record is the single authoritative account of a token sale. It is
//! created once per (creator, ticker), tracks the running contribution count
//! and raised total, and carries the one-way `finalized` flag.
//!
//! Invariants kept by the transitions below:
//! - `raised_amount` equals the sum of active (non-refunded) contribution
//!   amounts and the escrowed treasury balance.
//! - `contribution_count` equals the number of ledger entries ever created;
//!   refunds never decrement it.
//! - `finalized` moves from false to true exactly once.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::constants::*;
use crate::error::SaleError;

/// Progress of the external pool creation step.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStatus {
    /// Sale has not been finalized
    NotStarted,
    /// Sale committed as finalized, pool creation has not succeeded yet
    Pending,
    /// Pool created and seeded
    Seeded,
}

/// Externally visible sale status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Open,
    /// Terminal but poolless; only pool creation may be re-attempted
    FinalizedPoolPending,
    Finalized,
}

/// Creation parameters of a sale, fixed for its lifetime.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaleParams {
    pub name: String,
    pub ticker: String,
    pub total_supply: u64,
    pub target: u64,
    pub fee_rate_bps: u16,
    pub decimals: u8,
}

impl SaleParams {
    /// Validates creation input. Any violation is `InvalidParameters`.
    pub fn validate(&self) -> Result<(), SaleError> {
        if self.total_supply == 0 {
            msg!("Total supply must be greater than zero");
            return Err(SaleError::InvalidParameters);
        }
        if self.target == 0 {
            msg!("Target must be greater than zero");
            return Err(SaleError::InvalidParameters);
        }
        if self.name.is_empty() || self.name.len() > MAX_NAME_LENGTH {
            msg!("Name must be 1..={} bytes, got {}", MAX_NAME_LENGTH, self.name.len());
            return Err(SaleError::InvalidParameters);
        }
        if self.ticker.is_empty() || self.ticker.len() > MAX_TICKER_LENGTH {
            msg!("Ticker must be 1..={} bytes, got {}", MAX_TICKER_LENGTH, self.ticker.len());
            return Err(SaleError::InvalidParameters);
        }
        if self.fee_rate_bps > MAX_FEE_RATE_BPS {
            msg!("Fee rate {} bps exceeds maximum {} bps", self.fee_rate_bps, MAX_FEE_RATE_BPS);
            return Err(SaleError::InvalidParameters);
        }
        if self.decimals > MAX_DECIMALS {
            msg!("Decimals {} exceed maximum {}", self.decimals, MAX_DECIMALS);
            return Err(SaleError::InvalidParameters);
        }
        Ok(())
    }
}

/// Bump seeds of every PDA tied to a sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleBumps {
    pub sale: u8,
    pub mint: u8,
    pub pool_token: u8,
    pub treasury: u8,
}

/// Immutable view of a sale taken at the finalize commit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeSnapshot {
    pub raised_amount: u64,
    pub total_supply: u64,
    pub fee_rate_bps: u16,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    pub is_initialized: bool,
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub fee_destination: Pubkey,
    pub name: String,
    pub ticker: String,
    pub decimals: u8,
    pub total_supply: u64,
    pub target: u64,
    pub fee_rate_bps: u16,
    pub contribution_count: u32,
    pub raised_amount: u64,
    pub finalized: bool,
    pub pool_status: PoolStatus,
    pub pool_base_reserve: u64,
    pub pool_token_reserve: u64,
    pub creation_time: i64,
    pub finalized_at: i64,
    /// Lamports kept in the treasury vault for rent; never part of the escrow
    pub treasury_rent_reserve: u64,
    pub bump: u8,
    pub mint_bump: u8,
    pub pool_token_bump: u8,
    pub treasury_bump: u8,
}

impl SaleRecord {
    pub const LEN: usize =
        1 +                          // is_initialized
        32 +                         // creator
        32 +                         // mint
        32 +                         // fee_destination
        4 + MAX_NAME_LENGTH +        // name
        4 + MAX_TICKER_LENGTH +      // ticker
        1 +                          // decimals
        8 +                          // total_supply
        8 +                          // target
        2 +                          // fee_rate_bps
        4 +                          // contribution_count
        8 +                          // raised_amount
        1 +                          // finalized
        1 +                          // pool_status
        8 +                          // pool_base_reserve
        8 +                          // pool_token_reserve
        8 +                          // creation_time
        8 +                          // finalized_at
        8 +                          // treasury_rent_reserve
        4;                           // bumps

    pub fn get_packed_len() -> usize {
        Self::LEN
    }

    /// Builds a fresh sale record. Fails with `InvalidParameters` on bad input.
    pub fn new(
        params: SaleParams,
        creator: Pubkey,
        mint: Pubkey,
        fee_destination: Pubkey,
        bumps: SaleBumps,
        creation_time: i64,
        treasury_rent_reserve: u64,
    ) -> Result<Self, SaleError> {
        params.validate()?;
        Ok(Self {
            is_initialized: true,
            creator,
            mint,
            fee_destination,
            name: params.name,
            ticker: params.ticker,
            decimals: params.decimals,
            total_supply: params.total_supply,
            target: params.target,
            fee_rate_bps: params.fee_rate_bps,
            contribution_count: 0,
            raised_amount: 0,
            finalized: false,
            pool_status: PoolStatus::NotStarted,
            pool_base_reserve: 0,
            pool_token_reserve: 0,
            creation_time,
            finalized_at: 0,
            treasury_rent_reserve,
            bump: bumps.sale,
            mint_bump: bumps.mint,
            pool_token_bump: bumps.pool_token,
            treasury_bump: bumps.treasury,
        })
    }

    pub fn status(&self) -> SaleStatus {
        match (self.finalized, self.pool_status) {
            (false, _) => SaleStatus::Open,
            (true, PoolStatus::Seeded) => SaleStatus::Finalized,
            (true, _) => SaleStatus::FinalizedPoolPending,
        }
    }

    /// Records a contribution and returns the sequence index assigned to it
    /// (the count observed before the increment).
    pub fn record_contribution(&mut self, amount: u64) -> Result<u32, SaleError> {
        if self.finalized {
            return Err(SaleError::SaleFinalized);
        }
        if amount == 0 || amount > MAX_CONTRIBUTION_LAMPORTS {
            msg!("Contribution of {} outside 1..={}", amount, MAX_CONTRIBUTION_LAMPORTS);
            return Err(SaleError::InvalidAmount);
        }
        let raised_amount = self
            .raised_amount
            .checked_add(amount)
            .ok_or(SaleError::ArithmeticOverflow)?;
        if raised_amount > self.target {
            msg!("Contribution of {} would raise {} above target {}", amount, raised_amount, self.target);
            return Err(SaleError::TargetExceeded);
        }
        let index = self.contribution_count;
        self.contribution_count = index
            .checked_add(1)
            .ok_or(SaleError::ArithmeticOverflow)?;
        self.raised_amount = raised_amount;
        Ok(index)
    }

    /// Removes a refunded amount from the raised total.
    pub fn record_refund(&mut self, amount: u64) -> Result<(), SaleError> {
        if self.finalized {
            return Err(SaleError::SaleFinalized);
        }
        self.raised_amount = self.raised_amount.checked_sub(amount).ok_or_else(|| {
            msg!("Refund of {} exceeds raised amount {}", amount, self.raised_amount);
            SaleError::AccountingUnderflow
        })?;
        Ok(())
    }

    /// Flips the sale to its terminal state and returns the snapshot the pool
    /// seed is computed from. This is the single commit point of finalize.
    pub fn finalize(&mut self, now: i64) -> Result<FinalizeSnapshot, SaleError> {
        if self.finalized {
            return Err(SaleError::AlreadyFinalized);
        }
        if self.raised_amount < self.target {
            msg!("Raised {} of target {}", self.raised_amount, self.target);
            return Err(SaleError::TargetNotMet);
        }
        self.finalized = true;
        self.finalized_at = now;
        self.pool_status = PoolStatus::Pending;
        Ok(FinalizeSnapshot {
            raised_amount: self.raised_amount,
            total_supply: self.total_supply,
            fee_rate_bps: self.fee_rate_bps,
        })
    }

    pub fn mark_pool_seeded(&mut self) -> Result<(), SaleError> {
        if self.status() != SaleStatus::FinalizedPoolPending {
            return Err(SaleError::PoolNotPending);
        }
        self.pool_status = PoolStatus::Seeded;
        Ok(())
    }

    /// Ledger index 0 is addressed by (contributor, ticker) only, which is
    /// unique per sale only for the creator. Any other opener is rejected.
    pub fn check_ledger_opener(&self, contributor: &Pubkey) -> Result<(), SaleError> {
        if self.contribution_count == 0 && *contributor != self.creator {
            msg!("Ledger entry #0 of sale {} is reserved for creator {}", self.ticker, self.creator);
            return Err(SaleError::CreatorContributionRequired);
        }
        Ok(())
    }

    /// Contributor share of the supply a deposit earns at the target price.
    /// Finalize requires `raised_amount == target`, so this is also the amount
    /// claimable after finalize.
    pub fn projected_tokens(&self, amount: u64) -> Result<u64, SaleError> {
        if self.target == 0 {
            return Ok(0);
        }
        let split = SupplySplit::of(self.total_supply)?;
        let tokens = (amount as u128)
            .checked_mul(split.contributors as u128)
            .ok_or(SaleError::ArithmeticOverflow)?
            / (self.target as u128);
        u64::try_from(tokens).map_err(|_| SaleError::ArithmeticOverflow)
    }
}

/// Division of a sale's minted supply between the liquidity pool and the
/// contributors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplySplit {
    pub liquidity: u64,
    pub contributors: u64,
}

impl SupplySplit {
    pub fn of(total_supply: u64) -> Result<Self, SaleError> {
        let liquidity = (total_supply as u128)
            .checked_mul(LIQUIDITY_SUPPLY_BPS as u128)
            .ok_or(SaleError::ArithmeticOverflow)?
            / (FEE_BASIS_POINTS_DENOMINATOR as u128);
        let liquidity = u64::try_from(liquidity).map_err(|_| SaleError::ArithmeticOverflow)?;
        Ok(Self {
            liquidity,
            contributors: total_supply - liquidity,
        })
    }
}
