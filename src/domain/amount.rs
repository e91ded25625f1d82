use std::fmt;

/// Quantities and prices are non-negative reals. Quantities are grams or item
/// counts depending on the price type; prices are per kilogram or per unit.
pub type Amount = f64;

/// Format an amount with a fixed number of decimals.
/// Example: (1.5, 2) -> "1.50", (0.125, 3) -> "0.125"
pub fn format_amount(amount: Amount, decimals: usize) -> String {
    // Avoid printing "-0.00" for tiny negative rounding noise
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.*}", decimals, amount)
}

/// Parse a decimal string into a non-negative amount.
/// Example: "2.00" -> 2.0, "500" -> 500.0, ".5" -> 0.5, "1,25" -> 1.25
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let normalized = normalize_decimal_comma(input)?;
    let amount: Amount = normalized
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if amount < 0.0 {
        return Err(ParseAmountError::Negative);
    }
    Ok(amount)
}

/// A single decimal comma followed by one or two digits ("1,5", "2,25") reads as a
/// decimal point. Any other comma, such as a thousands separator, is rejected.
fn normalize_decimal_comma(input: &str) -> Result<String, ParseAmountError> {
    let Some((whole, fraction)) = input.split_once(',') else {
        return Ok(input.to_string());
    };

    let valid = !whole.contains('.')
        && (1..=2).contains(&fraction.len())
        && fraction.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ParseAmountError::InvalidFormat);
    }
    Ok(format!("{}.{}", whole, fraction))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    Negative,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid number format"),
            ParseAmountError::Negative => write!(f, "amount must not be negative"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
