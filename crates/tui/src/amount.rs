use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("too many decimals")]
    TooManyDecimals,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount too large")]
    TooLarge,
}

/// Positive money amount typed into the edit form, stored as integer cents.
///
/// Input normalisation:
/// - every whitespace character is removed (`"1 234"` is `1234`)
/// - a `,` decimal separator is read as `.`
/// - at most two fractional digits
///
/// ```rust
/// use wallet_tui::amount::Amount;
///
/// assert_eq!(Amount::parse("1 234,56").unwrap().as_f64(), 1234.56);
/// assert_eq!(Amount::parse("12.50").unwrap().as_f64(), 12.5);
/// assert!(Amount::parse("0").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Parses raw form input.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        raw.parse()
    }

    /// Value in major units, as the backend expects it.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        if cleaned.is_empty() {
            return Err(AmountError::Empty);
        }

        let mut parts = cleaned.split('.');
        let units_str = parts.next().ok_or(AmountError::Invalid)?;
        let cents_str = parts.next();
        if parts.next().is_some() {
            return Err(AmountError::Invalid);
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }
        let units: i64 = units_str.parse().map_err(|_| AmountError::TooLarge)?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(AmountError::Invalid);
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)? * 10,
                    2 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)?,
                    _ => return Err(AmountError::TooManyDecimals),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(AmountError::TooLarge)?;
        if total == 0 {
            return Err(AmountError::NotPositive);
        }

        Ok(Self(total))
    }
}

/// Keeps only the characters the amount field accepts: digits, `,` and `.`.
pub fn accepts_amount_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == ',' || ch == '.'
}

/// Renders a backend amount the way the form shows it as a placeholder.
pub fn placeholder(amount: f64) -> String {
    amount.to_string()
}
