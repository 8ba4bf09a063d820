//! Fixed-point asset amount formatting and parsing.
//!
//! Candy amounts are stored as raw integer units; each asset carries its own
//! decimal precision and unit string, so every conversion happens against the
//! precision of the row being rendered.

use thiserror::Error;

/// Largest per-asset decimal precision accepted anywhere in the application.
pub const MAX_ASSET_DECIMALS: u8 = 10;

/// Whether thousands separators are inserted into the integer part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeparatorStyle {
    Always,
    Never,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount contains an invalid character")]
    InvalidCharacter,
    #[error("amount has more than {0} decimal places")]
    TooManyDecimals(u8),
    #[error("amount is out of range")]
    OutOfRange,
}

/// Format a raw amount at the given precision.
///
/// The fractional part is always padded to the full precision of the asset
/// (`decimals == 0` produces no decimal point at all). A `-` sign is always
/// shown for negative amounts; `plus_sign` adds a `+` for positive ones.
pub fn format_amount(
    amount: i64,
    decimals: u8,
    plus_sign: bool,
    separators: SeparatorStyle,
) -> String {
    let magnitude = (amount as i128).unsigned_abs();
    let divisor = 10u128.pow(decimals as u32);
    let whole = magnitude / divisor;
    let fraction = magnitude % divisor;

    let whole_str = match separators {
        SeparatorStyle::Always => group_thousands(&whole.to_string()),
        SeparatorStyle::Never => whole.to_string(),
    };

    let sign = if amount < 0 {
        "-"
    } else if plus_sign && amount > 0 {
        "+"
    } else {
        ""
    };

    if decimals == 0 {
        format!("{}{}", sign, whole_str)
    } else {
        format!(
            "{}{}.{:0width$}",
            sign,
            whole_str,
            fraction,
            width = decimals as usize
        )
    }
}

/// Format a raw amount and append its unit string.
pub fn format_with_unit(
    amount: i64,
    decimals: u8,
    unit: &str,
    plus_sign: bool,
    separators: SeparatorStyle,
) -> String {
    format!(
        "{} {}",
        format_amount(amount, decimals, plus_sign, separators),
        unit
    )
}

/// Parse a non-negative decimal string into raw units at the given precision.
///
/// Accepts plain digits with an optional fractional part (`"12"`, `"12.5"`,
/// `".5"`). Signs, separators, and exponents are rejected. A fractional part
/// longer than `decimals` is an error rather than silently rounded.
pub fn parse_amount(text: &str, decimals: u8) -> Result<i64, ParseAmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (whole_part, frac_part) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole_part.is_empty() && frac_part.is_empty() {
        return Err(ParseAmountError::InvalidCharacter);
    }
    if !whole_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidCharacter);
    }
    if frac_part.len() > decimals as usize {
        return Err(ParseAmountError::TooManyDecimals(decimals));
    }

    let whole: i128 = if whole_part.is_empty() {
        0
    } else {
        whole_part
            .parse()
            .map_err(|_| ParseAmountError::OutOfRange)?
    };
    let frac: i128 = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse().map_err(|_| ParseAmountError::OutOfRange)?
    };

    let scale = 10i128.pow(decimals as u32);
    let frac_scale = 10i128.pow((decimals as usize - frac_part.len()) as u32);
    let value = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac * frac_scale))
        .ok_or(ParseAmountError::OutOfRange)?;

    i64::try_from(value).map_err(|_| ParseAmountError::OutOfRange)
}

/// Parse a user-typed minimum amount against a row's precision.
///
/// Extra fractional digits are truncated to the row's precision instead of
/// failing, so a single threshold string can be compared against assets of
/// differing precision. Unparseable input yields `None` (no threshold).
pub fn parse_amount_lossy(text: &str, decimals: u8) -> Option<i64> {
    match parse_amount(text, decimals) {
        Ok(value) => Some(value),
        Err(ParseAmountError::TooManyDecimals(_)) => {
            let trimmed = text.trim();
            let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
            let truncated = &frac[..decimals as usize];
            parse_amount(&format!("{}.{}", whole, truncated), decimals).ok()
        }
        Err(_) => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== format_amount tests ====================

    #[test]
    fn test_format_amount_zero() {
        assert_eq!(format_amount(0, 8, false, SeparatorStyle::Never), "0.00000000");
    }

    #[test]
    fn test_format_amount_zero_has_no_plus_sign() {
        assert_eq!(format_amount(0, 2, true, SeparatorStyle::Never), "0.00");
    }

    #[test]
    fn test_format_amount_pads_fraction_to_precision() {
        // 1.5 at 8 decimals = 150_000_000 raw units
        assert_eq!(
            format_amount(150_000_000, 8, false, SeparatorStyle::Never),
            "1.50000000"
        );
    }

    #[test]
    fn test_format_amount_zero_decimals_has_no_point() {
        assert_eq!(format_amount(42, 0, false, SeparatorStyle::Never), "42");
    }

    #[test]
    fn test_format_amount_plus_sign() {
        assert_eq!(format_amount(1_500, 2, true, SeparatorStyle::Never), "+15.00");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(
            format_amount(-1_500, 2, true, SeparatorStyle::Never),
            "-15.00"
        );
    }

    #[test]
    fn test_format_amount_separators_group_thousands() {
        // 12,345,678.9 at 8 decimals
        assert_eq!(
            format_amount(1_234_567_890_000_000, 8, false, SeparatorStyle::Always),
            "12,345,678.90000000"
        );
    }

    #[test]
    fn test_format_amount_separators_small_whole_part() {
        assert_eq!(
            format_amount(99_999, 2, false, SeparatorStyle::Always),
            "999.99"
        );
    }

    #[test]
    fn test_format_amount_min_i64_does_not_panic() {
        let text = format_amount(i64::MIN, 8, false, SeparatorStyle::Always);
        assert_eq!(text, "-92,233,720,368.54775808");
    }

    #[test]
    fn test_format_with_unit_appends_unit() {
        assert_eq!(
            format_with_unit(1_500, 2, "CANDY", true, SeparatorStyle::Always),
            "+15.00 CANDY"
        );
    }

    // ==================== parse_amount tests ====================

    #[test]
    fn test_parse_amount_whole_number() {
        assert_eq!(parse_amount("12", 2).unwrap(), 1_200);
    }

    #[test]
    fn test_parse_amount_fractional() {
        assert_eq!(parse_amount("1.5", 2).unwrap(), 150);
    }

    #[test]
    fn test_parse_amount_full_precision() {
        assert_eq!(parse_amount("0.12345678", 8).unwrap(), 12_345_678);
    }

    #[test]
    fn test_parse_amount_leading_dot() {
        assert_eq!(parse_amount(".5", 1).unwrap(), 5);
    }

    #[test]
    fn test_parse_amount_trailing_dot() {
        // A bare trailing dot parses as the whole number
        assert_eq!(parse_amount("12.", 2).unwrap(), 1_200);
    }

    #[test]
    fn test_parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  3  ", 0).unwrap(), 3);
    }

    #[test]
    fn test_parse_amount_empty_fails() {
        assert_eq!(parse_amount("", 2), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("   ", 2), Err(ParseAmountError::Empty));
    }

    #[test]
    fn test_parse_amount_bare_dot_fails() {
        assert_eq!(parse_amount(".", 2), Err(ParseAmountError::InvalidCharacter));
    }

    #[test]
    fn test_parse_amount_rejects_sign_and_letters() {
        assert_eq!(
            parse_amount("-5", 2),
            Err(ParseAmountError::InvalidCharacter)
        );
        assert_eq!(
            parse_amount("12a", 2),
            Err(ParseAmountError::InvalidCharacter)
        );
        assert_eq!(
            parse_amount("1.2.3", 2),
            Err(ParseAmountError::InvalidCharacter)
        );
    }

    #[test]
    fn test_parse_amount_too_many_decimals_fails() {
        assert_eq!(
            parse_amount("1.234", 2),
            Err(ParseAmountError::TooManyDecimals(2))
        );
    }

    #[test]
    fn test_parse_amount_overflow_fails() {
        assert_eq!(
            parse_amount("99999999999999999999", 8),
            Err(ParseAmountError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_amount_round_trips_format() {
        let raw = 987_654_321;
        let text = format_amount(raw, 8, false, SeparatorStyle::Never);
        assert_eq!(parse_amount(&text, 8).unwrap(), raw);
    }

    // ==================== parse_amount_lossy tests ====================

    #[test]
    fn test_parse_amount_lossy_valid_input() {
        assert_eq!(parse_amount_lossy("1.5", 2), Some(150));
    }

    #[test]
    fn test_parse_amount_lossy_truncates_extra_digits() {
        // "1.509" against a 2-decimal asset compares as 1.50
        assert_eq!(parse_amount_lossy("1.509", 2), Some(150));
    }

    #[test]
    fn test_parse_amount_lossy_zero_decimals() {
        assert_eq!(parse_amount_lossy("5.9", 0), Some(5));
    }

    #[test]
    fn test_parse_amount_lossy_garbage_is_none() {
        assert_eq!(parse_amount_lossy("abc", 2), None);
        assert_eq!(parse_amount_lossy("", 2), None);
    }
}
