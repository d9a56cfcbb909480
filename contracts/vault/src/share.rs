//! Share ledger: supply, holder balances and spending allowances.
//!
//! `total_supply` is only ever moved together with a holder balance, so the
//! supply always equals the sum of balances.

use soroban_sdk::{Address, Env};

use crate::{
    error::VaultError,
    events,
    storage::{self, AllowanceValue},
};

pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
    let balance = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(VaultError::MathOverflow)?;
    let supply = storage::read_total_supply(env)
        .checked_add(amount)
        .ok_or(VaultError::MathOverflow)?;

    storage::write_balance(env, to, balance);
    storage::write_total_supply(env, supply);
    Ok(())
}

pub fn burn(env: &Env, from: &Address, amount: i128) -> Result<(), VaultError> {
    let balance = storage::read_balance(env, from);
    if balance < amount {
        return Err(VaultError::InsufficientShares);
    }
    let supply = storage::read_total_supply(env)
        .checked_sub(amount)
        .ok_or(VaultError::MathOverflow)?;

    storage::write_balance(env, from, balance - amount);
    storage::write_total_supply(env, supply);
    Ok(())
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
    require_non_negative(amount)?;

    let from_balance = storage::read_balance(env, from);
    if from_balance < amount {
        return Err(VaultError::InsufficientShares);
    }
    storage::write_balance(env, from, from_balance - amount);

    let to_balance = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(VaultError::MathOverflow)?;
    storage::write_balance(env, to, to_balance);

    events::transfer(env, from, to, amount);
    Ok(())
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), VaultError> {
    require_non_negative(amount)?;

    storage::write_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount,
            expiration_ledger,
        },
    );

    events::approve(env, from, spender, amount, expiration_ledger);
    Ok(())
}

/// Consumes `amount` of `spender`'s allowance over `from`'s shares.
pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    require_non_negative(amount)?;

    let allowance = storage::read_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(VaultError::InsufficientAllowance);
    }

    storage::write_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount: allowance.amount - amount,
            expiration_ledger: allowance.expiration_ledger,
        },
    );
    Ok(())
}

fn require_non_negative(amount: i128) -> Result<(), VaultError> {
    if amount < 0 {
        return Err(VaultError::NegativeAmount);
    }
    Ok(())
}
