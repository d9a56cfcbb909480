use soroban_sdk::contracterror;

/// Failure reasons surfaced by every fallible vault entry point.
///
/// Codes are part of the contract ABI and must stay stable; new variants are
/// appended.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 1,
    NotInitialized = 2,

    /// Requested amount is zero.
    ZeroAmount = 3,
    /// Requested amount is negative.
    NegativeAmount = 4,
    /// The counterpart quantity rounds down to zero.
    ZeroConversion = 5,

    /// Deposit or mint would push total assets past the capacity ceiling.
    CapacityExceeded = 6,
    /// Withdraw or redeem needs more than can be redeemed right now.
    InsufficientLiquidity = 7,

    InsufficientAllowance = 8,
    InsufficientShares = 9,

    VaultPaused = 10,
    VaultNotPaused = 11,

    /// The lending facility rejected a supply.
    SupplyFailed = 12,
    /// The lending facility rejected a withdraw or returned a short amount.
    WithdrawFailed = 13,
    /// Moving the underlying asset into or out of the vault failed.
    AssetTransferFailed = 14,

    MathOverflow = 15,
    /// Shares are outstanding but back no assets, so no exchange rate exists.
    Insolvent = 16,
}
