//! Contribution Ledger State
//!
//! One record per contribution event, stored at an address derived from
//! (contributor, ledger seed, index). Records are append-only: they are never
//! closed, only moved from active to refunded, or marked consumed once the
//! sale is finalized. A finalized record's token share is claimed once.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::error::SaleError;

/// Lifecycle position of a contribution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionStatus {
    Active,
    Refunded,
    Consumed,
    Claimed,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    pub is_initialized: bool,
    pub sale: Pubkey,
    pub contributor: Pubkey,
    /// Currently active deposit; zero after refund
    pub amount: u64,
    /// Amount deposited at creation, kept for audit
    pub contributed_amount: u64,
    /// Tokens this deposit represents at the target price; zero after refund
    pub projected_tokens: u64,
    /// Sale contribution count observed when the record was opened
    pub index: u32,
    pub refunded: bool,
    pub consumed: bool,
    pub claimed: bool,
    pub timestamp: i64,
    pub bump: u8,
}

impl ContributionRecord {
    pub const LEN: usize =
        1 +     // is_initialized
        32 +    // sale
        32 +    // contributor
        8 +     // amount
        8 +     // contributed_amount
        8 +     // projected_tokens
        4 +     // index
        1 +     // refunded
        1 +     // consumed
        1 +     // claimed
        8 +     // timestamp
        1;      // bump

    pub fn get_packed_len() -> usize {
        Self::LEN
    }

    pub fn open(
        sale: Pubkey,
        contributor: Pubkey,
        index: u32,
        amount: u64,
        projected_tokens: u64,
        timestamp: i64,
        bump: u8,
    ) -> Self {
        Self {
            is_initialized: true,
            sale,
            contributor,
            amount,
            contributed_amount: amount,
            projected_tokens,
            index,
            refunded: false,
            consumed: false,
            claimed: false,
            timestamp,
            bump,
        }
    }

    pub fn status(&self) -> ContributionStatus {
        if self.refunded {
            ContributionStatus::Refunded
        } else if self.claimed {
            ContributionStatus::Claimed
        } else if self.consumed {
            ContributionStatus::Consumed
        } else {
            ContributionStatus::Active
        }
    }

    /// Zeroes the record and returns the amount owed back to the contributor.
    pub fn refund(&mut self) -> Result<u64, SaleError> {
        if self.refunded {
            return Err(SaleError::AlreadyRefunded);
        }
        if self.consumed {
            return Err(SaleError::ContributionConsumed);
        }
        if self.amount == 0 {
            return Err(SaleError::NothingToRefund);
        }
        let amount = self.amount;
        self.amount = 0;
        self.projected_tokens = 0;
        self.refunded = true;
        Ok(amount)
    }

    /// Notes that the record was rolled into the pool. The amount is kept.
    /// Returns false when the record was already inert.
    pub fn mark_consumed(&mut self) -> bool {
        if self.status() != ContributionStatus::Active {
            msg!("Contribution #{} is {:?}, not consuming", self.index, self.status());
            return false;
        }
        self.consumed = true;
        true
    }

    /// Marks the record's token share as paid out and returns it. Only valid
    /// once the sale is finalized, which the caller checks.
    pub fn claim(&mut self) -> Result<u64, SaleError> {
        match self.status() {
            ContributionStatus::Refunded => Err(SaleError::AlreadyRefunded),
            ContributionStatus::Claimed => Err(SaleError::AlreadyClaimed),
            ContributionStatus::Active | ContributionStatus::Consumed => {
                self.consumed = true;
                self.claimed = true;
                Ok(self.projected_tokens)
            }
        }
    }
}
