use alloy::primitives::U256;
use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use std::str::FromStr;

use crate::error::AppError;

/// uint256 max has 78 decimal digits.
const MAX_UINT256_DIGITS: i64 = 78;
const MAX_FRACTION_DIGITS: usize = 78;

/// Parse a human-readable, non-negative decimal amount such as `"100"` or `"0.25"`.
///
/// Only plain `digits[.digits]` is accepted; exponents, signs and separators
/// are rejected before any big-number arithmetic happens.
pub fn parse_amount(raw: &str) -> Result<BigDecimal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("amount is empty".to_string()));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (trimmed, None),
    };
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(AppError::InvalidInput(format!(
            "invalid amount '{}': expected a non-negative decimal number",
            trimmed
        )));
    }

    let significant_whole = whole.trim_start_matches('0').len();
    if significant_whole as i64 > MAX_UINT256_DIGITS
        || fraction.map_or(0, str::len) > MAX_FRACTION_DIGITS
    {
        return Err(AppError::InvalidInput(format!("amount '{}' has too many digits", trimmed)));
    }

    BigDecimal::from_str(trimmed)
        .map_err(|e| AppError::InvalidInput(format!("invalid amount '{}': {}", trimmed, e)))
}

/// Convert a human-unit amount into the token's smallest unit:
/// `round(amount * 10^decimals)`, rounding half away from zero.
pub fn to_base_units(amount: &BigDecimal, decimals: u8) -> Result<U256, AppError> {
    let (digits, scale) = amount.as_bigint_and_exponent();
    if digits.sign() == Sign::Minus {
        return Err(AppError::InvalidInput("amount must not be negative".to_string()));
    }
    if digits.is_zero() {
        return Ok(U256::ZERO);
    }

    // Result magnitude is digits * 10^shift. Bound it before rescaling so that
    // an extreme exponent never materializes as a huge integer.
    let shift = i64::from(decimals).saturating_sub(scale);
    if shift >= MAX_UINT256_DIGITS {
        return Err(AppError::InvalidInput("amount does not fit in uint256".to_string()));
    }
    let max_digit_count = i64::try_from(digits.bits() / 3 + 1).unwrap_or(i64::MAX);
    if shift.saturating_neg() > max_digit_count {
        // Below 0.1 smallest units, rounds to zero.
        return Ok(U256::ZERO);
    }

    let scaled = BigDecimal::new(digits, -shift).with_scale_round(0, RoundingMode::HalfUp);
    let (digits, _) = scaled.into_bigint_and_exponent();

    U256::from_str_radix(&digits.to_string(), 10)
        .map_err(|_| AppError::InvalidInput(format!("amount {} does not fit in uint256", amount)))
}

/// Inverse of [`to_base_units`] as an exact plain decimal string, trailing
/// fractional zeros trimmed (`100000000`, 6 -> `"100"`).
pub fn format_base_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::num_bigint::BigInt;

    fn units(raw: &str, decimals: u8) -> U256 {
        to_base_units(&parse_amount(raw).unwrap(), decimals).unwrap()
    }

    #[test]
    fn test_to_base_units_exact() {
        assert_eq!(units("100", 6), U256::from(100_000_000u64));
        assert_eq!(units("0.002", 18), U256::from(2_000_000_000_000_000u64));
        assert_eq!(units("1.5", 18), U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(units("0", 6), U256::ZERO);
        assert_eq!(units("42", 0), U256::from(42u64));
    }

    #[test]
    fn test_to_base_units_rounds_excess_precision() {
        assert_eq!(units("1.0000005", 6), U256::from(1_000_001u64));
        assert_eq!(units("1.0000004", 6), U256::from(1_000_000u64));
    }

    #[test]
    fn test_to_base_units_large_values() {
        let expected = U256::from(10u64).pow(U256::from(40u64));
        assert_eq!(units("10000000000000000000000", 18), expected);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(parse_amount(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("abc"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("-1"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("1."), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount(".5"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("+1"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("1_000"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_amount_rejects_exponents() {
        for raw in ["1e4000000000", "1E100000000", "1e-4000000000", "2.5e3"] {
            assert!(matches!(parse_amount(raw), Err(AppError::InvalidInput(_))), "{}", raw);
        }
    }

    #[test]
    fn test_parse_amount_bounds_digit_count() {
        let too_long = "9".repeat(79);
        assert!(matches!(parse_amount(&too_long), Err(AppError::InvalidInput(_))));

        let padded = format!("{}1", "0".repeat(200));
        assert_eq!(units(&padded, 6), U256::from(1_000_000u64));

        let long_fraction = format!("0.{}", "1".repeat(79));
        assert!(matches!(parse_amount(&long_fraction), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_to_base_units_bounds_extreme_exponents() {
        let huge = BigDecimal::new(BigInt::from(1), -4_000_000_000);
        assert!(matches!(to_base_units(&huge, 6), Err(AppError::InvalidInput(_))));

        let tiny = BigDecimal::new(BigInt::from(1), 4_000_000_000);
        assert_eq!(to_base_units(&tiny, 18).unwrap(), U256::ZERO);

        let just_over = BigDecimal::new(BigInt::from(12), 1);
        assert_eq!(to_base_units(&just_over, 0).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_to_base_units_rejects_uint256_overflow() {
        let too_big = parse_amount(&"9".repeat(78)).unwrap();
        assert!(matches!(to_base_units(&too_big, 0), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_format_base_units() {
        assert_eq!(format_base_units(U256::from(100_000_000u64), 6), "100");
        assert_eq!(format_base_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_base_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_base_units(U256::ZERO, 18), "0");
        assert_eq!(format_base_units(U256::from(1234u64), 0), "1234");
    }
}
