//! Currency display helpers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Formats an amount as US dollars: `$1,234.56`, `-$1.00`.
///
/// Rounds half away from zero to cents.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!(
        "{:.prec$}",
        rounded.abs(),
        prec = DISPLAY_DECIMAL_PRECISION as usize
    );
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(5)), "$5.00");
        assert_eq!(format_usd(dec!(999.9)), "$999.90");
        assert_eq!(format_usd(dec!(1234.56)), "$1,234.56");
        assert_eq!(format_usd(dec!(10000.00)), "$10,000.00");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
    }

    #[test]
    fn test_format_usd_negative_and_rounding() {
        assert_eq!(format_usd(dec!(-1)), "-$1.00");
        assert_eq!(format_usd(dec!(-1234.5)), "-$1,234.50");
        assert_eq!(format_usd(dec!(0.005)), "$0.01");
        assert_eq!(format_usd(dec!(-0.004)), "$0.00");
    }
}
