//! Vault notifications.
//!
//! Every event is published under a single short-symbol topic with a typed
//! payload so indexers and auditors can decode the exact quantities moved.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Emitted once when the vault is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultInitializedEvent {
    pub owner: Address,
    pub asset: Address,
    pub pool: Address,
    pub capacity_ceiling: i128,
}

/// Emitted by deposit and mint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    /// Account that paid the assets
    pub caller: Address,
    /// Account credited with the shares
    pub receiver: Address,
    pub assets: i128,
    pub shares: i128,
}

/// Emitted by withdraw and redeem.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub caller: Address,
    pub receiver: Address,
    /// Account whose shares were burned
    pub owner: Address,
    pub assets: i128,
    pub shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapacityCeilingChangedEvent {
    pub caller: Address,
    pub old_ceiling: i128,
    pub new_ceiling: i128,
}

/// Emitted when a withdrawal asks for more than the vault can currently
/// return. The request itself is rejected.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityCrisisEvent {
    pub caller: Address,
    pub requested: i128,
    pub available: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyExitEvent {
    pub caller: Address,
    /// Assets pulled back from the facility into vault custody
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub caller: Address,
    pub recipient: Address,
    /// Raw underlying asset swept
    pub assets: i128,
    /// Facility claim tokens swept
    pub claims: i128,
}

/// Emitted when the vault is paused or unpaused.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    /// True if vault is now paused, false if unpaused
    pub paused: bool,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReinvestEvent {
    pub caller: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApproveEvent {
    pub from: Address,
    pub spender: Address,
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

pub fn initialized(
    env: &Env,
    owner: &Address,
    asset: &Address,
    pool: &Address,
    capacity_ceiling: i128,
) {
    env.events().publish(
        (symbol_short!("init"),),
        VaultInitializedEvent {
            owner: owner.clone(),
            asset: asset.clone(),
            pool: pool.clone(),
            capacity_ceiling,
        },
    );
}

pub fn deposit(env: &Env, caller: &Address, receiver: &Address, assets: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("deposit"),),
        DepositEvent {
            caller: caller.clone(),
            receiver: receiver.clone(),
            assets,
            shares,
        },
    );
}

pub fn withdraw(
    env: &Env,
    caller: &Address,
    receiver: &Address,
    owner: &Address,
    assets: i128,
    shares: i128,
) {
    env.events().publish(
        (symbol_short!("withdraw"),),
        WithdrawEvent {
            caller: caller.clone(),
            receiver: receiver.clone(),
            owner: owner.clone(),
            assets,
            shares,
        },
    );
}

pub fn capacity_ceiling_changed(env: &Env, caller: &Address, old_ceiling: i128, new_ceiling: i128) {
    env.events().publish(
        (symbol_short!("cap_set"),),
        CapacityCeilingChangedEvent {
            caller: caller.clone(),
            old_ceiling,
            new_ceiling,
        },
    );
}

pub fn liquidity_crisis(env: &Env, caller: &Address, requested: i128, available: i128) {
    env.events().publish(
        (symbol_short!("liq_cris"),),
        LiquidityCrisisEvent {
            caller: caller.clone(),
            requested,
            available,
        },
    );
}

pub fn emergency_exit(env: &Env, caller: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("em_exit"),),
        EmergencyExitEvent {
            caller: caller.clone(),
            amount,
        },
    );
}

pub fn emergency_withdraw(
    env: &Env,
    caller: &Address,
    recipient: &Address,
    assets: i128,
    claims: i128,
) {
    env.events().publish(
        (symbol_short!("em_wdraw"),),
        EmergencyWithdrawEvent {
            caller: caller.clone(),
            recipient: recipient.clone(),
            assets,
            claims,
        },
    );
}

pub fn pause_changed(env: &Env, caller: &Address, paused: bool) {
    env.events().publish(
        (symbol_short!("pause"),),
        PauseEvent {
            paused,
            caller: caller.clone(),
        },
    );
}

pub fn reinvest(env: &Env, caller: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("reinvest"),),
        ReinvestEvent {
            caller: caller.clone(),
            amount,
        },
    );
}

pub fn approve(env: &Env, from: &Address, spender: &Address, amount: i128, expiration_ledger: u32) {
    env.events().publish(
        (symbol_short!("approve"),),
        ApproveEvent {
            from: from.clone(),
            spender: spender.clone(),
            amount,
            expiration_ledger,
        },
    );
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("transfer"),),
        TransferEvent {
            from: from.clone(),
            to: to.clone(),
            amount,
        },
    );
}
