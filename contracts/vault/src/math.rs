use crate::error::VaultError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rounding {
    Floor,
    Ceiling,
}

/// The pair every conversion is evaluated against. Built fresh from live
/// balances for each call and never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PoolState {
    pub total_assets: i128,
    pub total_supply: i128,
}

impl PoolState {
    pub fn new(total_assets: i128, total_supply: i128) -> Self {
        Self {
            total_assets,
            total_supply,
        }
    }

    pub fn to_shares(&self, assets: i128, rounding: Rounding) -> Result<i128, VaultError> {
        convert_to_shares(assets, self.total_assets, self.total_supply, rounding)
    }

    pub fn to_assets(&self, shares: i128, rounding: Rounding) -> Result<i128, VaultError> {
        convert_to_assets(shares, self.total_assets, self.total_supply, rounding)
    }
}

/// Convert assets to shares.
///
/// Formula: shares = assets × total_supply / total_assets
///
/// With no shares outstanding the vault bootstraps at 1:1. That branch also
/// covers assets left behind with no holders (a donation): the next depositor
/// is priced at 1:1 and absorbs them. Shares outstanding against zero assets
/// have no defined price and fail with `Insolvent`.
pub fn convert_to_shares(
    assets: i128,
    total_assets: i128,
    total_supply: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    if total_supply == 0 {
        return Ok(assets);
    }
    if total_assets == 0 {
        return Err(VaultError::Insolvent);
    }

    mul_div(assets, total_supply, total_assets, rounding)
}

/// Convert shares to assets.
///
/// Formula: assets = shares × total_assets / total_supply
pub fn convert_to_assets(
    shares: i128,
    total_assets: i128,
    total_supply: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    if total_supply == 0 {
        return Ok(shares);
    }

    mul_div(shares, total_assets, total_supply, rounding)
}

/// Computes (value × numerator) / denominator over non-negative operands with
/// the requested rounding.
pub fn mul_div(
    value: i128,
    numerator: i128,
    denominator: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    if value < 0 || numerator < 0 || denominator <= 0 {
        return Err(VaultError::MathOverflow);
    }

    let product = value
        .checked_mul(numerator)
        .ok_or(VaultError::MathOverflow)?;

    let result = match rounding {
        Rounding::Floor => product / denominator,
        Rounding::Ceiling => {
            product
                .checked_add(denominator - 1)
                .ok_or(VaultError::MathOverflow)?
                / denominator
        }
    };

    Ok(result)
}

/// Upper bound on what a deposit immediately followed by a full redeem can
/// lose to rounding, given the pool state before the deposit.
///
/// The floor on shares forfeits less than one share, worth at most
/// ceil(total_assets / total_supply); the floor on assets forfeits less than
/// one unit. An empty vault round-trips exactly.
pub fn round_trip_tolerance(total_assets: i128, total_supply: i128) -> Result<i128, VaultError> {
    if total_supply == 0 {
        return Ok(0);
    }

    mul_div(1, total_assets, total_supply, Rounding::Ceiling)?
        .checked_add(1)
        .ok_or(VaultError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor() {
        assert_eq!(mul_div(100, 3, 2, Rounding::Floor).unwrap(), 150);
        assert_eq!(mul_div(100, 1, 3, Rounding::Floor).unwrap(), 33);
    }

    #[test]
    fn test_mul_div_ceiling() {
        assert_eq!(mul_div(100, 3, 2, Rounding::Ceiling).unwrap(), 150);
        assert_eq!(mul_div(100, 1, 3, Rounding::Ceiling).unwrap(), 34);
    }

    #[test]
    fn test_mul_div_rejects_bad_operands() {
        assert_eq!(mul_div(100, 100, 0, Rounding::Floor), Err(VaultError::MathOverflow));
        assert_eq!(mul_div(-1, 100, 3, Rounding::Floor), Err(VaultError::MathOverflow));
        assert_eq!(
            mul_div(i128::MAX, 2, 1, Rounding::Floor),
            Err(VaultError::MathOverflow)
        );
    }

    #[test]
    fn test_bootstrap_is_one_to_one() {
        let empty = PoolState::new(0, 0);
        assert_eq!(empty.to_shares(50, Rounding::Floor).unwrap(), 50);
        assert_eq!(empty.to_shares(50, Rounding::Ceiling).unwrap(), 50);
        assert_eq!(empty.to_assets(50, Rounding::Ceiling).unwrap(), 50);
    }

    #[test]
    fn test_donation_without_holders_prices_at_one_to_one() {
        // assets present, nobody holds shares
        let pool = PoolState::new(1_000, 0);
        assert_eq!(pool.to_shares(10, Rounding::Floor).unwrap(), 10);
        assert_eq!(pool.to_assets(10, Rounding::Floor).unwrap(), 10);
    }

    #[test]
    fn test_supply_without_assets_is_insolvent() {
        let pool = PoolState::new(0, 1_000);
        assert_eq!(pool.to_shares(10, Rounding::Floor), Err(VaultError::Insolvent));
        assert_eq!(pool.to_assets(10, Rounding::Floor).unwrap(), 0);
    }

    #[test]
    fn test_yield_raises_share_price() {
        // 50 shares backed by 60 assets after yield
        let pool = PoolState::new(60, 50);
        assert_eq!(pool.to_assets(50, Rounding::Floor).unwrap(), 60);
        // 12 assets buy exactly 10 shares
        assert_eq!(pool.to_shares(12, Rounding::Floor).unwrap(), 10);
        // 13 assets buy 10.83 shares
        assert_eq!(pool.to_shares(13, Rounding::Floor).unwrap(), 10);
        assert_eq!(pool.to_shares(13, Rounding::Ceiling).unwrap(), 11);
    }

    #[test]
    fn test_rounding_favors_vault() {
        let pool = PoolState::new(1_001, 1_000);

        let deposit_shares = pool.to_shares(100, Rounding::Floor).unwrap();
        let withdraw_shares = pool.to_shares(100, Rounding::Ceiling).unwrap();
        let redeem_assets = pool.to_assets(100, Rounding::Floor).unwrap();
        let mint_assets = pool.to_assets(100, Rounding::Ceiling).unwrap();

        assert!(withdraw_shares > deposit_shares);
        assert!(mint_assets > redeem_assets);

        // Depositing what a mint costs never yields more than was minted.
        let reminted = pool.to_shares(mint_assets, Rounding::Floor).unwrap();
        assert!(reminted <= 100);
        // Withdrawing what a redeem pays never burns fewer shares than redeemed.
        let reburned = pool.to_shares(redeem_assets, Rounding::Ceiling).unwrap();
        assert!(reburned <= 100);
    }

    #[test]
    fn test_dust_deposit_rounds_to_zero_shares() {
        // one share is worth 1000 assets
        let pool = PoolState::new(1_000_000, 1_000);
        assert_eq!(pool.to_shares(999, Rounding::Floor).unwrap(), 0);
        assert_eq!(pool.to_shares(999, Rounding::Ceiling).unwrap(), 1);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let states = [(0, 0), (1_000, 1_000), (1_337, 1_000), (999_999, 7), (10, 333)];
        for (total_assets, total_supply) in states {
            let tolerance = round_trip_tolerance(total_assets, total_supply).unwrap();
            for deposit in [1_i128, 7, 100, 12_345] {
                let before = PoolState::new(total_assets, total_supply);
                let shares = before.to_shares(deposit, Rounding::Floor).unwrap();
                let after = PoolState::new(total_assets + deposit, total_supply + shares);
                let back = after.to_assets(shares, Rounding::Floor).unwrap();
                assert!(back <= deposit);
                assert!(deposit - back <= tolerance);
            }
        }
    }

    #[test]
    fn test_full_supply_never_exceeds_assets() {
        for (total_assets, total_supply) in [(1, 3), (10, 3), (1_000_003, 999_999)] {
            let pool = PoolState::new(total_assets, total_supply);
            assert!(pool.to_assets(total_supply, Rounding::Floor).unwrap() <= total_assets);
        }
    }

    #[test]
    fn test_large_values() {
        let large = i64::MAX as i128;
        assert!(convert_to_shares(large, large, large, Rounding::Floor).is_ok());
    }
}
