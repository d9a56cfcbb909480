//! # Yield Vault Contract
//!
//! A share-based custodial vault for Stellar. Users deposit a single asset, the
//! vault supplies it to an external lending facility, and depositors receive
//! shares: a proportional claim on the vault's position, which grows as the
//! facility accrues yield.
//!
//! ## Share Accounting Model
//!
//! `total_assets` is always read live: the vault's idle balance of the asset
//! plus its claim-token balance at the facility. Nothing about the position is
//! cached, so yield shows up in the share price as soon as the facility
//! reports it.
//!
//! - Empty vault: 1 asset unit = 1 share
//! - Otherwise: shares = assets × total_supply / total_assets
//!
//! Every conversion rounds in favour of the holders already in the vault:
//! deposits and redeems round down, mints and withdraws round up.
//!
//! ## Asset Flow
//!
//! ```text
//! Deposit / Mint:
//! User → [Vault.deposit()] → shares minted to receiver
//!                          → [Asset Token] user → vault
//!                          → [Lending Pool.supply()] vault → pool
//!
//! Withdraw / Redeem:
//! User → [Vault.withdraw()] → shares burned from owner
//!                           → [Lending Pool.withdraw()] pool → vault (shortfall only)
//!                           → [Asset Token] vault → receiver
//! ```
//!
//! Shares are minted or burned before the first call out of the contract; a
//! failure anywhere rolls the whole invocation back.
//!
//! ## Circuit Breakers
//!
//! - Capacity ceiling: deposits and mints that would push `total_assets` past it fail.
//! - Liquidity guard: withdrawals larger than what can be redeemed right now fail
//!   with `InsufficientLiquidity`. The `liq_cris` event published on the way out
//!   is rolled back with the failed call, and the matching `log!` line only
//!   exists in builds with debug assertions, so on a release build the error
//!   code is the signal.
//! - Pause: blocks all four value-moving operations and zeroes the max queries.
//!
//! ## Storage Layout
//!
//! ### Instance Storage
//! - `Owner`, `Asset`, `Pool`, `ClaimToken`: fixed at initialization
//! - `Paused`, `CapacityCeiling`: circuit-breaker state
//! - `TotalSupply`: outstanding shares
//! - `Name`, `Symbol`, `Decimals`: share token metadata
//!
//! ### Persistent Storage
//! - `Balance(holder)`: share balance
//! - `Allowance(from, spender)`: share spending allowance
//!
//! # Examples
//!
//! ```ignore
//! let shares = vault_client.deposit(&user, &1_000_0000000, &user);
//! let assets = vault_client.redeem(&user, &shares, &user, &user);
//! ```

#![no_std]

use soroban_sdk::{contract, contractimpl, token, Address, Env, String};

pub mod admin;
pub mod constants;
pub mod error;
pub mod events;
pub mod facility;
pub mod guards;
pub mod ledger;
pub mod math;
pub mod share;
pub mod storage;

#[cfg(test)]
mod mock_pool;

pub use error::VaultError;

use constants::DEFAULT_CAPACITY_CEILING;
use facility::{Facility, LendingPoolClient};
use ledger::Ledger;
use math::Rounding;
use storage::VaultConfig;

#[contract]
pub struct YieldVault;

#[contractimpl]
impl YieldVault {
    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Initializes the vault with required configuration.
    ///
    /// Must be called exactly once after deployment. Resolves the facility's
    /// claim token for `asset` and copies the asset's decimals onto the share
    /// token.
    ///
    /// # Arguments
    /// * `owner` - Administrator of the vault (must authorize)
    /// * `asset` - The underlying token contract
    /// * `pool` - The lending facility the asset is supplied to
    /// * `name`, `symbol` - Share token metadata
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    ///
    /// # Events
    /// Emits `VaultInitializedEvent`
    pub fn initialize(
        env: Env,
        owner: Address,
        asset: Address,
        pool: Address,
        name: String,
        symbol: String,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();

        let claim_token = LendingPoolClient::new(&env, &pool).claim_token(&asset);
        let decimals = token::Client::new(&env, &asset).decimals();

        storage::write_config(
            &env,
            &VaultConfig {
                owner: owner.clone(),
                asset: asset.clone(),
                pool: pool.clone(),
                claim_token,
            },
        );
        storage::set_paused(&env, false);
        storage::write_capacity_ceiling(&env, DEFAULT_CAPACITY_CEILING);
        storage::write_total_supply(&env, 0);
        storage::write_metadata(&env, &name, &symbol, decimals);

        events::initialized(&env, &owner, &asset, &pool, DEFAULT_CAPACITY_CEILING);
        Ok(())
    }

    // ==========================================================================
    // CORE LIFECYCLE - DEPOSIT / MINT
    // ==========================================================================

    /// Deposits exactly `assets` from `caller` and mints shares to `receiver`.
    ///
    /// # Returns
    /// Shares minted (floor rounding)
    ///
    /// # Errors
    /// - `VaultPaused`, `ZeroAmount`, `NegativeAmount`
    /// - `CapacityExceeded` if the deposit would pass the capacity ceiling
    /// - `ZeroConversion` if `assets` is worth less than one share
    /// - `AssetTransferFailed`, `SupplyFailed`
    ///
    /// # Events
    /// Emits `DepositEvent`
    pub fn deposit(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        Ledger::load(&env)?.deposit(&caller, assets, &receiver)
    }

    /// Mints exactly `shares` to `receiver`, paying the required assets from
    /// `caller`.
    ///
    /// # Returns
    /// Assets charged (ceiling rounding)
    pub fn mint(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        Ledger::load(&env)?.mint(&caller, shares, &receiver)
    }

    // ==========================================================================
    // CORE LIFECYCLE - WITHDRAW / REDEEM
    // ==========================================================================

    /// Sends exactly `assets` to `receiver`, burning shares from `owner`.
    ///
    /// When `caller` is not `owner` the burned shares are charged against the
    /// allowance `owner` granted `caller`.
    ///
    /// # Returns
    /// Shares burned (ceiling rounding)
    ///
    /// # Errors
    /// - `VaultPaused`, `ZeroAmount`, `NegativeAmount`
    /// - `InsufficientLiquidity` if the vault cannot pay `assets` right now
    /// - `InsufficientAllowance`, `InsufficientShares`
    /// - `WithdrawFailed`, `AssetTransferFailed`
    ///
    /// # Events
    /// Emits `WithdrawEvent`
    pub fn withdraw(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        Ledger::load(&env)?.withdraw(&caller, assets, &receiver, &owner)
    }

    /// Burns exactly `shares` from `owner` and sends the assets to `receiver`.
    ///
    /// # Returns
    /// Assets paid out (floor rounding)
    pub fn redeem(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        Ledger::load(&env)?.redeem(&caller, shares, &receiver, &owner)
    }

    // ==========================================================================
    // ADMINISTRATIVE
    // ==========================================================================

    /// Sets the capacity ceiling. Takes effect immediately; lowering it below
    /// current assets only blocks new deposits.
    ///
    /// # Events
    /// Emits `CapacityCeilingChangedEvent` with old and new values
    pub fn set_capacity_ceiling(env: Env, ceiling: i128) -> Result<(), VaultError> {
        admin::set_capacity_ceiling(&env, ceiling)
    }

    /// Pauses the vault, disabling deposit, mint, withdraw and redeem.
    pub fn pause(env: Env) -> Result<(), VaultError> {
        admin::pause(&env)
    }

    pub fn unpause(env: Env) -> Result<(), VaultError> {
        admin::unpause(&env)
    }

    /// Pauses the vault and withdraws as much of the facility position as the
    /// facility can pay out right now. The rest stays as claim tokens.
    ///
    /// # Returns
    /// Assets pulled back from the facility
    ///
    /// # Errors
    /// - `VaultPaused` if the vault is already paused
    /// - `WithdrawFailed` if the facility rejects the withdrawal
    pub fn emergency_exit(env: Env) -> Result<i128, VaultError> {
        admin::emergency_exit(&env)
    }

    /// Sweeps all raw asset and all facility claim tokens to `recipient`,
    /// bypassing share accounting. Only available while paused.
    pub fn emergency_withdraw(env: Env, recipient: Address) -> Result<(), VaultError> {
        admin::emergency_withdraw(&env, &recipient)
    }

    /// Supplies idle custody back to the facility, e.g. after an emergency
    /// exit has been resolved.
    pub fn reinvest(env: Env) -> Result<i128, VaultError> {
        admin::reinvest(&env)
    }

    // ==========================================================================
    // READ FUNCTIONS - ACCOUNTING
    // ==========================================================================

    /// Idle asset plus the facility position, yield included.
    pub fn total_assets(env: Env) -> Result<i128, VaultError> {
        Ledger::load(&env)?.facility().total_assets()
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::read_total_supply(&env)
    }

    pub fn convert_to_shares(env: Env, assets: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?
            .pool_state()?
            .to_shares(assets, Rounding::Floor)
    }

    pub fn convert_to_assets(env: Env, shares: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?
            .pool_state()?
            .to_assets(shares, Rounding::Floor)
    }

    pub fn preview_deposit(env: Env, assets: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?.preview_deposit(assets)
    }

    pub fn preview_mint(env: Env, shares: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?.preview_mint(shares)
    }

    pub fn preview_withdraw(env: Env, assets: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?.preview_withdraw(assets)
    }

    pub fn preview_redeem(env: Env, shares: i128) -> Result<i128, VaultError> {
        Ledger::load(&env)?.preview_redeem(shares)
    }

    /// Remaining headroom below the capacity ceiling; 0 while paused.
    pub fn max_deposit(env: Env) -> Result<i128, VaultError> {
        Ledger::load(&env)?.max_deposit()
    }

    pub fn max_mint(env: Env) -> Result<i128, VaultError> {
        Ledger::load(&env)?.max_mint()
    }

    /// Lesser of `owner`'s redeemable value and current liquidity; 0 while paused.
    pub fn max_withdraw(env: Env, owner: Address) -> Result<i128, VaultError> {
        Ledger::load(&env)?.max_withdraw(&owner)
    }

    pub fn max_redeem(env: Env, owner: Address) -> Result<i128, VaultError> {
        Ledger::load(&env)?.max_redeem(&owner)
    }

    /// Assets a withdrawal could be paid from right now.
    pub fn available_liquidity(env: Env) -> Result<i128, VaultError> {
        Ok(Ledger::load(&env)?.facility().available())
    }

    /// The facility's current supply rate in basis points.
    pub fn yield_rate_bps(env: Env) -> Result<i128, VaultError> {
        let config = storage::read_config(&env)?;
        facility::ray_to_bps(Facility::new(&env, &config).supply_rate())
    }

    // ==========================================================================
    // READ FUNCTIONS - CONFIGURATION
    // ==========================================================================

    pub fn capacity_ceiling(env: Env) -> i128 {
        storage::read_capacity_ceiling(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn owner(env: Env) -> Result<Address, VaultError> {
        storage::read_owner(&env)
    }

    pub fn asset(env: Env) -> Result<Address, VaultError> {
        Ok(storage::read_config(&env)?.asset)
    }

    pub fn pool(env: Env) -> Result<Address, VaultError> {
        Ok(storage::read_config(&env)?.pool)
    }

    pub fn claim_token(env: Env) -> Result<Address, VaultError> {
        Ok(storage::read_config(&env)?.claim_token)
    }

    // ==========================================================================
    // SHARE TOKEN
    // ==========================================================================

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::read_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &from, &spender).amount
    }

    /// Lets `spender` move or redeem up to `amount` of `from`'s shares until
    /// `expiration_ledger`.
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), VaultError> {
        from.require_auth();
        storage::require_initialized(&env)?;
        share::approve(&env, &from, &spender, amount, expiration_ledger)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        storage::require_initialized(&env)?;
        share::transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        storage::require_initialized(&env)?;
        share::spend_allowance(&env, &from, &spender, amount)?;
        share::transfer(&env, &from, &to, amount)
    }

    pub fn decimals(env: Env) -> Result<u32, VaultError> {
        storage::read_decimals(&env)
    }

    pub fn name(env: Env) -> Result<String, VaultError> {
        storage::read_name(&env)
    }

    pub fn symbol(env: Env) -> Result<String, VaultError> {
        storage::read_symbol(&env)
    }
}
