//! Decimal quantities in the ledger's `Numeric` text form.
//!
//! The JSON API encodes `Numeric 10` values as strings such as `"5.0"`.
//! [`Amount`] keeps the original text for display and a fixed-point
//! value (scaled by 10^10) for comparison and arithmetic. Nothing here
//! passes through floating point.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of fractional digits a ledger `Numeric` carries.
pub const NUMERIC_SCALE: u32 = 10;

/// `Numeric 10` has 38 digits of precision, 10 of them fractional.
const MAX_INTEGER_DIGITS: usize = 28;

const UNIT: i128 = 10_i128.pow(NUMERIC_SCALE);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount {
    text: String,
    scaled: i128,
}

impl Amount {
    /// Parse a decimal string like `"5.0"`, `"100000"` or `"-2.25"`.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let scaled = parse_scaled(text)?;
        Ok(Self {
            text: text.to_string(),
            scaled,
        })
    }

    pub fn zero() -> Self {
        Self::from_scaled(0)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_negative(&self) -> bool {
        self.scaled < 0
    }

    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.scaled
            .checked_add(other.scaled)
            .filter(|v| within_precision(*v))
            .map(Self::from_scaled)
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.scaled
            .checked_sub(other.scaled)
            .filter(|v| within_precision(*v))
            .map(Self::from_scaled)
    }

    fn from_scaled(scaled: i128) -> Self {
        Self {
            text: format_scaled(scaled),
            scaled,
        }
    }
}

fn within_precision(scaled: i128) -> bool {
    let limit = 10_u128.pow(MAX_INTEGER_DIGITS as u32 + NUMERIC_SCALE);
    scaled.unsigned_abs() < limit
}

fn parse_scaled(text: &str) -> Result<i128, CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid decimal amount '{text}'"));

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) if !frac_part.is_empty() => (int_part, frac_part),
        Some(_) => return Err(invalid()),
        None => (digits, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    if int_part.len() > MAX_INTEGER_DIGITS {
        return Err(CoreError::Validation(format!(
            "Amount '{text}' exceeds {MAX_INTEGER_DIGITS} integer digits"
        )));
    }
    if frac_part.len() > NUMERIC_SCALE as usize {
        return Err(CoreError::Validation(format!(
            "Amount '{text}' exceeds {NUMERIC_SCALE} fractional digits"
        )));
    }

    let int: i128 = int_part.parse().map_err(|_| invalid())?;
    let frac: i128 = if frac_part.is_empty() {
        0
    } else {
        let raw: i128 = frac_part.parse().map_err(|_| invalid())?;
        raw * 10_i128.pow(NUMERIC_SCALE - frac_part.len() as u32)
    };

    let value = int * UNIT + frac;
    Ok(if negative { -value } else { value })
}

/// Render with trailing fractional zeros trimmed but at least one kept,
/// matching how the ledger echoes `"5.0"`.
fn format_scaled(scaled: i128) -> String {
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.unsigned_abs();
    let unit = UNIT as u128;

    let mut frac = format!("{:0width$}", abs % unit, width = NUMERIC_SCALE as usize);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }
    format!("{sign}{}.{frac}", abs / unit)
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.scaled == other.scaled
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scaled.cmp(&other.scaled)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = CoreError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let scaled = parse_scaled(&text)?;
        Ok(Self { text, scaled })
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.text
    }
}
