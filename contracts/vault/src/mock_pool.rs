//! Lending facility stand-in for tests.
//!
//! Positions are plain balances keyed by holder, and the pool doubles as its
//! own claim token (`balance` / `transfer`). Knobs simulate yield, borrowed-out
//! liquidity, outright rejection, short payouts and a facility that calls back
//! into the vault.

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

use crate::YieldVaultClient;

#[contracttype]
#[derive(Clone)]
enum PoolKey {
    Asset,
    Position(Address),
    Liquidity,
    Rate,
    FailSupply,
    FailWithdraw,
    Haircut,
    Reenter,
}

fn position(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&PoolKey::Position(holder.clone()))
        .unwrap_or(0)
}

fn credit(env: &Env, holder: &Address, amount: i128) {
    let balance = position(env, holder) + amount;
    env.storage()
        .instance()
        .set(&PoolKey::Position(holder.clone()), &balance);
}

fn debit(env: &Env, holder: &Address, amount: i128) {
    let balance = position(env, holder);
    if balance < amount {
        panic!("position too small");
    }
    env.storage()
        .instance()
        .set(&PoolKey::Position(holder.clone()), &(balance - amount));
}

fn flag(env: &Env, key: &PoolKey) -> bool {
    env.storage().instance().get(key).unwrap_or(false)
}

#[contract]
pub struct MockLendingPool;

#[contractimpl]
impl MockLendingPool {
    pub fn init(env: Env, asset: Address) {
        env.storage().instance().set(&PoolKey::Asset, &asset);
    }

    pub fn supply(env: Env, from: Address, asset: Address, amount: i128, on_behalf_of: Address) {
        if flag(&env, &PoolKey::FailSupply) {
            panic!("supply disabled");
        }
        from.require_auth();

        token::Client::new(&env, &asset).transfer(&from, &env.current_contract_address(), &amount);
        credit(&env, &on_behalf_of, amount);
    }

    pub fn withdraw(env: Env, from: Address, asset: Address, amount: i128, to: Address) -> i128 {
        if flag(&env, &PoolKey::FailWithdraw) {
            panic!("withdraw disabled");
        }
        if let Some(vault) = env.storage().instance().get::<_, Address>(&PoolKey::Reenter) {
            YieldVaultClient::new(&env, &vault).total_assets();
        }
        from.require_auth();

        if amount > Self::available_liquidity(env.clone(), asset.clone()) {
            panic!("insufficient liquidity");
        }
        debit(&env, &from, amount);

        let haircut: i128 = env.storage().instance().get(&PoolKey::Haircut).unwrap_or(0);
        let paid = amount - haircut;
        token::Client::new(&env, &asset).transfer(&env.current_contract_address(), &to, &paid);
        paid
    }

    pub fn claim_token(env: Env, _asset: Address) -> Address {
        env.current_contract_address()
    }

    pub fn available_liquidity(env: Env, asset: Address) -> i128 {
        let cash = token::Client::new(&env, &asset).balance(&env.current_contract_address());
        match env.storage().instance().get::<_, i128>(&PoolKey::Liquidity) {
            Some(limit) => limit.min(cash),
            None => cash,
        }
    }

    pub fn supply_rate(env: Env, _asset: Address) -> i128 {
        env.storage().instance().get(&PoolKey::Rate).unwrap_or(0)
    }

    // claim token surface

    pub fn balance(env: Env, id: Address) -> i128 {
        position(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        debit(&env, &from, amount);
        credit(&env, &to, amount);
    }

    // knobs

    /// Grows `holder`'s position without a supply. The test must also fund
    /// the pool with the matching underlying.
    pub fn accrue(env: Env, holder: Address, amount: i128) {
        credit(&env, &holder, amount);
    }

    pub fn set_liquidity(env: Env, limit: i128) {
        env.storage().instance().set(&PoolKey::Liquidity, &limit);
    }

    pub fn set_rate(env: Env, rate_ray: i128) {
        env.storage().instance().set(&PoolKey::Rate, &rate_ray);
    }

    pub fn set_fail_supply(env: Env, fail: bool) {
        env.storage().instance().set(&PoolKey::FailSupply, &fail);
    }

    pub fn set_fail_withdraw(env: Env, fail: bool) {
        env.storage().instance().set(&PoolKey::FailWithdraw, &fail);
    }

    pub fn set_haircut(env: Env, haircut: i128) {
        env.storage().instance().set(&PoolKey::Haircut, &haircut);
    }

    pub fn set_reenter(env: Env, vault: Address) {
        env.storage().instance().set(&PoolKey::Reenter, &vault);
    }
}
