//! Ledger core: the four value-moving operations and the queries that
//! preview them.
//!
//! Every operation runs validate → compute → guard → mutate shares → move
//! assets → emit. Share mutation (and allowance consumption) is committed
//! before the first call out of the contract, so anything the facility or the
//! asset token does in between observes the post-operation ledger. Any error
//! aborts the invocation and the host discards all of its effects.

use soroban_sdk::{log, Address, Env};

use crate::{
    error::VaultError,
    events,
    facility::Facility,
    guards::{CapacityGuard, LiquidityGuard},
    math::{PoolState, Rounding},
    share,
    storage,
};

pub struct Ledger<'a> {
    env: &'a Env,
    facility: Facility<'a>,
}

impl<'a> Ledger<'a> {
    pub fn load(env: &'a Env) -> Result<Self, VaultError> {
        let config = storage::read_config(env)?;
        Ok(Self {
            env,
            facility: Facility::new(env, &config),
        })
    }

    pub fn facility(&self) -> &Facility<'a> {
        &self.facility
    }

    /// Live `(total_assets, total_supply)`; never cached.
    pub fn pool_state(&self) -> Result<PoolState, VaultError> {
        Ok(PoolState::new(
            self.facility.total_assets()?,
            storage::read_total_supply(self.env),
        ))
    }

    pub fn capacity_guard(&self) -> CapacityGuard {
        CapacityGuard::new(
            storage::is_paused(self.env),
            storage::read_capacity_ceiling(self.env),
        )
    }

    pub fn liquidity_guard(&self) -> LiquidityGuard {
        LiquidityGuard::new(storage::is_paused(self.env), self.facility.available())
    }

    // ==========================================================================
    // VALUE-MOVING OPERATIONS
    // ==========================================================================

    /// Deposits exactly `assets` from `caller`, minting shares (floor) to `receiver`.
    pub fn deposit(
        &self,
        caller: &Address,
        assets: i128,
        receiver: &Address,
    ) -> Result<i128, VaultError> {
        require_active(self.env)?;
        require_positive(assets)?;

        let state = self.pool_state()?;
        let shares = state.to_shares(assets, Rounding::Floor)?;
        self.admit_capacity(state.total_assets, assets)?;
        if shares == 0 {
            return Err(VaultError::ZeroConversion);
        }

        share::mint(self.env, receiver, shares)?;
        self.facility.pull(caller, assets)?;
        self.facility.supply(assets)?;

        events::deposit(self.env, caller, receiver, assets, shares);
        Ok(shares)
    }

    /// Mints exactly `shares` to `receiver`, charging `caller` the assets (ceiling).
    pub fn mint(
        &self,
        caller: &Address,
        shares: i128,
        receiver: &Address,
    ) -> Result<i128, VaultError> {
        require_active(self.env)?;
        require_positive(shares)?;

        let state = self.pool_state()?;
        let assets = state.to_assets(shares, Rounding::Ceiling)?;
        // Shares outstanding against an empty pool would be minted for free.
        if assets == 0 {
            return Err(VaultError::ZeroConversion);
        }
        self.admit_capacity(state.total_assets, assets)?;

        share::mint(self.env, receiver, shares)?;
        self.facility.pull(caller, assets)?;
        self.facility.supply(assets)?;

        events::deposit(self.env, caller, receiver, assets, shares);
        Ok(assets)
    }

    /// Pays exactly `assets` to `receiver`, burning shares (ceiling) from `owner`.
    pub fn withdraw(
        &self,
        caller: &Address,
        assets: i128,
        receiver: &Address,
        owner: &Address,
    ) -> Result<i128, VaultError> {
        require_active(self.env)?;
        require_positive(assets)?;

        let state = self.pool_state()?;
        let shares = state.to_shares(assets, Rounding::Ceiling)?;
        self.admit_liquidity(caller, assets)?;

        if caller != owner {
            share::spend_allowance(self.env, owner, caller, shares)?;
        }
        share::burn(self.env, owner, shares)?;
        self.facility.release(receiver, assets)?;

        events::withdraw(self.env, caller, receiver, owner, assets, shares);
        Ok(shares)
    }

    /// Burns exactly `shares` from `owner`, paying the assets (floor) to `receiver`.
    pub fn redeem(
        &self,
        caller: &Address,
        shares: i128,
        receiver: &Address,
        owner: &Address,
    ) -> Result<i128, VaultError> {
        require_active(self.env)?;
        require_positive(shares)?;

        let state = self.pool_state()?;
        let assets = state.to_assets(shares, Rounding::Floor)?;
        if assets == 0 {
            return Err(VaultError::ZeroConversion);
        }
        self.admit_liquidity(caller, assets)?;

        if caller != owner {
            share::spend_allowance(self.env, owner, caller, shares)?;
        }
        share::burn(self.env, owner, shares)?;
        self.facility.release(receiver, assets)?;

        events::withdraw(self.env, caller, receiver, owner, assets, shares);
        Ok(assets)
    }

    // ==========================================================================
    // PREVIEWS AND LIMITS
    // ==========================================================================

    pub fn preview_deposit(&self, assets: i128) -> Result<i128, VaultError> {
        self.pool_state()?.to_shares(assets, Rounding::Floor)
    }

    pub fn preview_mint(&self, shares: i128) -> Result<i128, VaultError> {
        self.pool_state()?.to_assets(shares, Rounding::Ceiling)
    }

    pub fn preview_withdraw(&self, assets: i128) -> Result<i128, VaultError> {
        self.pool_state()?.to_shares(assets, Rounding::Ceiling)
    }

    pub fn preview_redeem(&self, shares: i128) -> Result<i128, VaultError> {
        self.pool_state()?.to_assets(shares, Rounding::Floor)
    }

    pub fn max_deposit(&self) -> Result<i128, VaultError> {
        let state = self.pool_state()?;
        // No deposit can be priced against shares backed by nothing.
        if state.total_supply > 0 && state.total_assets == 0 {
            return Ok(0);
        }
        Ok(self.capacity_guard().headroom(state.total_assets))
    }

    pub fn max_mint(&self) -> Result<i128, VaultError> {
        let state = self.pool_state()?;
        let headroom = self.capacity_guard().headroom(state.total_assets);
        match state.to_shares(headroom, Rounding::Floor) {
            Err(VaultError::Insolvent) => Ok(0),
            other => other,
        }
    }

    pub fn max_withdraw(&self, owner: &Address) -> Result<i128, VaultError> {
        let liquidity = self.liquidity_guard().headroom();
        if liquidity == 0 {
            return Ok(0);
        }
        let owned = self
            .pool_state()?
            .to_assets(storage::read_balance(self.env, owner), Rounding::Floor)?;
        Ok(owned.min(liquidity))
    }

    pub fn max_redeem(&self, owner: &Address) -> Result<i128, VaultError> {
        let liquidity = self.liquidity_guard().headroom();
        if liquidity == 0 {
            return Ok(0);
        }
        let redeemable = self.pool_state()?.to_shares(liquidity, Rounding::Floor)?;
        Ok(storage::read_balance(self.env, owner).min(redeemable))
    }

    // ==========================================================================
    // GUARDS
    // ==========================================================================

    fn admit_capacity(&self, total_assets: i128, delta: i128) -> Result<(), VaultError> {
        let guard = self.capacity_guard();
        guard.admit(total_assets, delta).map_err(|err| {
            if err == VaultError::CapacityExceeded {
                log!(self.env, "capacity exceeded", total_assets, delta, guard.ceiling);
            }
            err
        })
    }

    /// Runs the liquidity guard; a shortfall is announced before it is returned.
    fn admit_liquidity(&self, caller: &Address, requested: i128) -> Result<(), VaultError> {
        let guard = self.liquidity_guard();
        match guard.admit(requested) {
            Err(VaultError::InsufficientLiquidity) => {
                log!(self.env, "liquidity crisis", requested, guard.available);
                events::liquidity_crisis(self.env, caller, requested, guard.available);
                Err(VaultError::InsufficientLiquidity)
            }
            other => other,
        }
    }
}

/// Fails with `VaultPaused` while the vault is paused.
pub fn require_active(env: &Env) -> Result<(), VaultError> {
    if storage::is_paused(env) {
        return Err(VaultError::VaultPaused);
    }
    Ok(())
}

pub fn require_positive(amount: i128) -> Result<(), VaultError> {
    if amount < 0 {
        return Err(VaultError::NegativeAmount);
    }
    if amount == 0 {
        return Err(VaultError::ZeroAmount);
    }
    Ok(())
}
