/// Capacity ceiling seeded at initialization: 1M units of a 7-decimal asset.
pub const DEFAULT_CAPACITY_CEILING: i128 = 1_000_000_0000000;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Fixed-point scale the lending facility quotes rates in (1e27 = 100%).
pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;
