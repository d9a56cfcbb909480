use soroban_sdk::{contracttype, Address, Env, String};

use crate::error::VaultError;

/// Storage keys for vault state.
///
/// Contract-wide configuration and counters live in instance storage;
/// per-holder share balances and allowances live in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Administrator allowed to tune limits and trigger emergency paths
    Owner,
    /// Underlying asset token accepted by the vault
    Asset,
    /// Lending facility the asset is supplied to
    Pool,
    /// The facility's receipt token for `Asset`
    ClaimToken,
    Paused,
    CapacityCeiling,
    /// Sum of all holder balances
    TotalSupply,
    Name,
    Symbol,
    Decimals,
    /// Share balance of a holder
    Balance(Address),
    Allowance(AllowanceKey),
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

/// Immutable references fixed at initialization.
#[derive(Clone)]
pub struct VaultConfig {
    pub owner: Address,
    pub asset: Address,
    pub pool: Address,
    pub claim_token: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn require_initialized(env: &Env) -> Result<(), VaultError> {
    if !is_initialized(env) {
        return Err(VaultError::NotInitialized);
    }
    Ok(())
}

pub fn write_config(env: &Env, config: &VaultConfig) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, &config.owner);
    instance.set(&DataKey::Asset, &config.asset);
    instance.set(&DataKey::Pool, &config.pool);
    instance.set(&DataKey::ClaimToken, &config.claim_token);
}

pub fn read_config(env: &Env) -> Result<VaultConfig, VaultError> {
    let instance = env.storage().instance();
    let owner = instance
        .get(&DataKey::Owner)
        .ok_or(VaultError::NotInitialized)?;
    let asset = instance
        .get(&DataKey::Asset)
        .ok_or(VaultError::NotInitialized)?;
    let pool = instance
        .get(&DataKey::Pool)
        .ok_or(VaultError::NotInitialized)?;
    let claim_token = instance
        .get(&DataKey::ClaimToken)
        .ok_or(VaultError::NotInitialized)?;

    Ok(VaultConfig {
        owner,
        asset,
        pool,
        claim_token,
    })
}

pub fn read_owner(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(VaultError::NotInitialized)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn read_capacity_ceiling(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::CapacityCeiling)
        .unwrap_or(0)
}

pub fn write_capacity_ceiling(env: &Env, ceiling: i128) {
    env.storage()
        .instance()
        .set(&DataKey::CapacityCeiling, &ceiling);
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn read_balance(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(holder.clone()))
        .unwrap_or(0)
}

/// Zero balances are written, not removed: a holder's entry outlives a full burn.
pub fn write_balance(env: &Env, holder: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(holder.clone()), &amount);
}

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    match env
        .storage()
        .persistent()
        .get::<_, AllowanceValue>(&key)
    {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        _ => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, value: &AllowanceValue) {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().set(&key, value);
}

pub fn write_metadata(env: &Env, name: &String, symbol: &String, decimals: u32) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Name, name);
    instance.set(&DataKey::Symbol, symbol);
    instance.set(&DataKey::Decimals, &decimals);
}

pub fn read_name(env: &Env) -> Result<String, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Name)
        .ok_or(VaultError::NotInitialized)
}

pub fn read_symbol(env: &Env) -> Result<String, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Symbol)
        .ok_or(VaultError::NotInitialized)
}

pub fn read_decimals(env: &Env) -> Result<u32, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Decimals)
        .ok_or(VaultError::NotInitialized)
}
