//! Boundary with the external lending facility.
//!
//! This is the only module that calls out of the vault. Every call that can
//! fail on the far side goes through the generated `try_*` path and comes back
//! as a [`VaultError`]; nothing from the facility is swallowed. Callers must
//! have committed their own bookkeeping before reaching any method here that
//! moves value.

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contractclient, log, token, vec, Address, Env, IntoVal, Symbol,
};

use crate::{error::VaultError, guards, storage::VaultConfig};

/// Interface the vault consumes from the lending facility.
#[contractclient(name = "LendingPoolClient")]
pub trait LendingPool {
    /// Pulls `amount` of `asset` from `from` and credits `on_behalf_of`'s position.
    fn supply(env: Env, from: Address, asset: Address, amount: i128, on_behalf_of: Address);

    /// Debits `from`'s position and sends the proceeds to `to`. Returns the
    /// amount actually sent.
    fn withdraw(env: Env, from: Address, asset: Address, amount: i128, to: Address) -> i128;

    /// Receipt token whose balance is a holder's position, yield included.
    fn claim_token(env: Env, asset: Address) -> Address;

    /// Underlying the facility could hand out right now.
    fn available_liquidity(env: Env, asset: Address) -> i128;

    /// Current supply rate in ray (1e27 = 100%).
    fn supply_rate(env: Env, asset: Address) -> i128;
}

pub struct Facility<'a> {
    env: &'a Env,
    vault: Address,
    pool_address: Address,
    pool: LendingPoolClient<'a>,
    asset: token::Client<'a>,
    claim: token::Client<'a>,
}

impl<'a> Facility<'a> {
    pub fn new(env: &'a Env, config: &VaultConfig) -> Self {
        Self {
            env,
            vault: env.current_contract_address(),
            pool_address: config.pool.clone(),
            pool: LendingPoolClient::new(env, &config.pool),
            asset: token::Client::new(env, &config.asset),
            claim: token::Client::new(env, &config.claim_token),
        }
    }

    /// Underlying held directly by the vault.
    pub fn idle(&self) -> i128 {
        self.asset.balance(&self.vault)
    }

    /// The vault's claim on the facility, accrued yield included.
    pub fn position(&self) -> i128 {
        self.claim.balance(&self.vault)
    }

    pub fn total_assets(&self) -> Result<i128, VaultError> {
        self.idle()
            .checked_add(self.position())
            .ok_or(VaultError::MathOverflow)
    }

    /// What a withdrawal could be paid out of right now.
    pub fn available(&self) -> i128 {
        let facility_liquidity = self.pool.available_liquidity(&self.asset.address);
        guards::available_liquidity(self.idle(), self.position(), facility_liquidity)
    }

    /// Part of the position the facility could return right now.
    pub fn recoverable(&self) -> i128 {
        let facility_liquidity = self.pool.available_liquidity(&self.asset.address);
        guards::available_liquidity(0, self.position(), facility_liquidity)
    }

    pub fn supply_rate(&self) -> i128 {
        self.pool.supply_rate(&self.asset.address)
    }

    /// Moves underlying from `from` into vault custody.
    pub fn pull(&self, from: &Address, amount: i128) -> Result<(), VaultError> {
        match self.asset.try_transfer(from, &self.vault, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "asset pull failed", from.clone(), amount);
                Err(VaultError::AssetTransferFailed)
            }
        }
    }

    /// Moves underlying from vault custody to `to`.
    pub fn push(&self, to: &Address, amount: i128) -> Result<(), VaultError> {
        match self.asset.try_transfer(&self.vault, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "asset push failed", to.clone(), amount);
                Err(VaultError::AssetTransferFailed)
            }
        }
    }

    /// Supplies `amount` of idle custody to the facility.
    pub fn supply(&self, amount: i128) -> Result<(), VaultError> {
        // The facility pulls the asset itself, one level below our call.
        self.env.authorize_as_current_contract(vec![
            self.env,
            InvokerContractAuthEntry::Contract(SubContractInvocation {
                context: ContractContext {
                    contract: self.asset.address.clone(),
                    fn_name: Symbol::new(self.env, "transfer"),
                    args: (self.vault.clone(), self.pool_address.clone(), amount)
                        .into_val(self.env),
                },
                sub_invocations: vec![self.env],
            }),
        ]);

        match self
            .pool
            .try_supply(&self.vault, &self.asset.address, &amount, &self.vault)
        {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "facility rejected supply", amount);
                Err(VaultError::SupplyFailed)
            }
        }
    }

    /// Withdraws exactly `amount` from the position into vault custody.
    pub fn withdraw(&self, amount: i128) -> Result<i128, VaultError> {
        match self
            .pool
            .try_withdraw(&self.vault, &self.asset.address, &amount, &self.vault)
        {
            Ok(Ok(actual)) if actual == amount => Ok(actual),
            Ok(Ok(actual)) => {
                log!(self.env, "facility returned short withdraw", amount, actual);
                Err(VaultError::WithdrawFailed)
            }
            _ => {
                log!(self.env, "facility rejected withdraw", amount);
                Err(VaultError::WithdrawFailed)
            }
        }
    }

    /// Pays `amount` to `to`, drawing on idle custody first and withdrawing
    /// only the shortfall from the facility.
    pub fn release(&self, to: &Address, amount: i128) -> Result<(), VaultError> {
        let idle = self.idle();
        let shortfall = amount.saturating_sub(idle.max(0)).max(0);
        if shortfall > 0 {
            self.withdraw(shortfall)?;
        }
        self.push(to, amount)
    }

    /// Hands claim-token custody to `to` without redeeming it.
    pub fn sweep_claims(&self, to: &Address, amount: i128) -> Result<(), VaultError> {
        match self.claim.try_transfer(&self.vault, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "claim sweep failed", to.clone(), amount);
                Err(VaultError::WithdrawFailed)
            }
        }
    }
}

/// Ray-denominated rate expressed in basis points, rounded down.
pub fn ray_to_bps(rate_ray: i128) -> Result<i128, VaultError> {
    crate::math::mul_div(
        rate_ray.max(0),
        crate::constants::BPS_DENOMINATOR,
        crate::constants::RAY,
        crate::math::Rounding::Floor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAY;

    #[test]
    fn test_ray_to_bps() {
        assert_eq!(ray_to_bps(RAY).unwrap(), 10_000);
        assert_eq!(ray_to_bps(RAY / 20).unwrap(), 500);
        // 3.456% truncates to 345 bps
        let rate = RAY / 1_000 * 34 + RAY / 10_000 * 5 + RAY / 100_000 * 6;
        assert_eq!(ray_to_bps(rate).unwrap(), 345);
        assert_eq!(ray_to_bps(0).unwrap(), 0);
    }
}
