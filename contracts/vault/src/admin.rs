//! Owner-gated control plane: capacity ceiling, pause switch and the two
//! emergency paths.

use soroban_sdk::{Address, Env};

use crate::{
    error::VaultError,
    events,
    facility::Facility,
    ledger::require_active,
    storage,
};

/// Validates that the stored owner authorized this invocation.
///
/// # Panics
/// - If the owner's authorization is missing (host auth error)
pub fn require_owner(env: &Env) -> Result<Address, VaultError> {
    let owner = storage::read_owner(env)?;
    owner.require_auth();
    Ok(owner)
}

pub fn set_capacity_ceiling(env: &Env, new_ceiling: i128) -> Result<(), VaultError> {
    let owner = require_owner(env)?;
    if new_ceiling < 0 {
        return Err(VaultError::NegativeAmount);
    }

    let old_ceiling = storage::read_capacity_ceiling(env);
    storage::write_capacity_ceiling(env, new_ceiling);

    events::capacity_ceiling_changed(env, &owner, old_ceiling, new_ceiling);
    Ok(())
}

pub fn pause(env: &Env) -> Result<(), VaultError> {
    let owner = require_owner(env)?;
    require_active(env)?;

    storage::set_paused(env, true);
    events::pause_changed(env, &owner, true);
    Ok(())
}

pub fn unpause(env: &Env) -> Result<(), VaultError> {
    let owner = require_owner(env)?;
    if !storage::is_paused(env) {
        return Err(VaultError::VaultNotPaused);
    }

    storage::set_paused(env, false);
    events::pause_changed(env, &owner, false);
    Ok(())
}

/// Pauses the vault and pulls as much of the facility position back into
/// vault custody as the facility can pay out right now. Whatever stays lent
/// out remains as claim tokens for `emergency_withdraw` to sweep. Shares are
/// untouched.
///
/// Returns the amount actually recovered.
pub fn emergency_exit(env: &Env) -> Result<i128, VaultError> {
    let owner = require_owner(env)?;
    require_active(env)?;

    storage::set_paused(env, true);
    events::pause_changed(env, &owner, true);

    let config = storage::read_config(env)?;
    let facility = Facility::new(env, &config);
    let recovered = facility.recoverable();
    if recovered > 0 {
        facility.withdraw(recovered)?;
    }

    events::emergency_exit(env, &owner, recovered);
    Ok(recovered)
}

/// Sends every unit of raw asset and every facility claim token the vault
/// holds to `recipient`, ignoring share accounting entirely.
pub fn emergency_withdraw(env: &Env, recipient: &Address) -> Result<(), VaultError> {
    let owner = require_owner(env)?;
    if !storage::is_paused(env) {
        return Err(VaultError::VaultNotPaused);
    }

    let config = storage::read_config(env)?;
    let facility = Facility::new(env, &config);

    let assets = facility.idle();
    if assets > 0 {
        facility.push(recipient, assets)?;
    }
    let claims = facility.position();
    if claims > 0 {
        facility.sweep_claims(recipient, claims)?;
    }

    events::emergency_withdraw(env, &owner, recipient, assets, claims);
    Ok(())
}

/// Supplies all idle custody back to the facility.
pub fn reinvest(env: &Env) -> Result<i128, VaultError> {
    let owner = require_owner(env)?;
    require_active(env)?;

    let config = storage::read_config(env)?;
    let facility = Facility::new(env, &config);
    let idle = facility.idle();
    if idle <= 0 {
        return Err(VaultError::ZeroAmount);
    }
    facility.supply(idle)?;

    events::reinvest(env, &owner, idle);
    Ok(idle)
}
