//! Circuit breakers consulted before any value moves.
//!
//! Both guards are plain values built from live state at call time; neither
//! caches anything between invocations.

use crate::error::VaultError;

/// Admission check for deposit and mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityGuard {
    pub paused: bool,
    pub ceiling: i128,
}

impl CapacityGuard {
    pub fn new(paused: bool, ceiling: i128) -> Self {
        Self { paused, ceiling }
    }

    /// Admits `delta` more assets on top of `total_assets`.
    pub fn admit(&self, total_assets: i128, delta: i128) -> Result<(), VaultError> {
        if self.paused {
            return Err(VaultError::VaultPaused);
        }

        let projected = total_assets
            .checked_add(delta)
            .ok_or(VaultError::MathOverflow)?;
        if projected > self.ceiling {
            return Err(VaultError::CapacityExceeded);
        }

        Ok(())
    }

    /// Assets that can still be accepted; zero while paused or over the ceiling.
    pub fn headroom(&self, total_assets: i128) -> i128 {
        if self.paused {
            return 0;
        }
        self.ceiling.saturating_sub(total_assets).max(0)
    }
}

/// Admission check for withdraw and redeem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityGuard {
    pub paused: bool,
    /// Assets the vault could hand out right now.
    pub available: i128,
}

impl LiquidityGuard {
    pub fn new(paused: bool, available: i128) -> Self {
        Self { paused, available }
    }

    pub fn admit(&self, requested: i128) -> Result<(), VaultError> {
        if self.paused {
            return Err(VaultError::VaultPaused);
        }
        if requested > self.available {
            return Err(VaultError::InsufficientLiquidity);
        }

        Ok(())
    }

    /// Liquidity visible to max queries; zero while paused.
    pub fn headroom(&self) -> i128 {
        if self.paused {
            0
        } else {
            self.available.max(0)
        }
    }
}

/// Redeemable liquidity: idle custody plus whatever part of the position the
/// facility could return right now.
pub fn available_liquidity(idle: i128, position: i128, facility_liquidity: i128) -> i128 {
    let from_facility = position.min(facility_liquidity).max(0);
    idle.max(0).saturating_add(from_facility)
}
