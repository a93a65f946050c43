use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Opening cash for a newly registered account when none is given
pub const DEFAULT_INITIAL_CASH: Decimal = dec!(10000.00);

/// Largest opening cash an account may be registered with
pub const MAX_INITIAL_CASH: Decimal = dec!(1000000000000.00);

/// The only currency the ledger accounts in
pub const BASE_CURRENCY: &str = "USD";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Longest symbol accepted before a quote lookup is attempted
pub const MAX_SYMBOL_LENGTH: usize = 16;
