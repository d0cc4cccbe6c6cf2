//! Decimal handling for `Number` attributes.
//!
//! Numbers travel as their decimal text so that integers of any width and floats keep
//! their full precision. Floats are formatted with the shortest representation that
//! parses back to the same value.

use crate::errors::{EncodeError, EncodeReason};
use std::cmp::Ordering;

/// Format a float as a document number.
///
/// NaN and infinities have no decimal form and are rejected. `-0.0` is written as `0`
/// because the decimal text cannot carry the sign of zero back.
pub(crate) fn format_f64(value: f64) -> Result<String, EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::new(EncodeReason::NonFiniteNumber));
    }

    if value == 0.0 {
        return Ok("0".to_string());
    }

    Ok(value.to_string())
}

pub(crate) fn format_f32(value: f32) -> Result<String, EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::new(EncodeReason::NonFiniteNumber));
    }

    if value == 0.0 {
        return Ok("0".to_string());
    }

    Ok(value.to_string())
}

/// A parsed decimal in scientific form: `digits * 10^exponent`.
///
/// `digits` carries no leading or trailing zeros, zero is represented by empty digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub negative: bool,
    pub digits: String,
    pub exponent: i64,
}

impl Decimal {
    /// Parse the decimal text of a `Number` attribute, e.g. `-12.50`, `1e-7` or `+3E+2`.
    pub fn parse(value: &str) -> Option<Self> {
        let (negative, unsigned) = match value.as_bytes().first()? {
            b'-' => (true, &value[1..]),
            b'+' => (false, &value[1..]),
            _ => (false, value),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..])?),
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let all_digits = format!("{int_part}{frac_part}");
        let exponent = exponent.checked_sub(frac_part.len() as i64)?;

        let trimmed_leading = all_digits.trim_start_matches('0');
        let digits = trimmed_leading.trim_end_matches('0');
        let exponent = exponent.checked_add((trimmed_leading.len() - digits.len()) as i64)?;

        if digits.is_empty() {
            return Some(Self {
                negative: false,
                digits: String::new(),
                exponent: 0,
            });
        }

        Some(Self {
            negative,
            digits: digits.to_string(),
            exponent,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn significant_digits(&self) -> usize {
        self.digits.len()
    }

    /// Exponent of the number written as `d.ddd * 10^e`, saturating at the bounds of
    /// `i64`.
    pub fn scientific_exponent(&self) -> i64 {
        self.exponent.saturating_add(self.digits.len() as i64 - 1)
    }
}

/// Orders decimals by value.
impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = |d: &Decimal| match (d.is_zero(), d.negative) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        };

        match sign(self).cmp(&sign(other)) {
            Ordering::Equal if self.is_zero() => Ordering::Equal,
            Ordering::Equal => {
                // Digits carry no trailing zeros, so text order is value order once the
                // exponents agree
                let magnitude = self
                    .scientific_exponent()
                    .cmp(&other.scientific_exponent())
                    .then_with(|| self.digits.cmp(&other.digits));

                if self.negative {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
            ordering => ordering,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_exponent(value: &str) -> Option<i64> {
    let digits = match value.strip_prefix('+') {
        Some(rest) if rest.starts_with(['+', '-']) => return None,
        Some(rest) => rest,
        None => value,
    };
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    digits.parse().ok()
}

/// Whether two `Number` texts denote the same value, e.g. `1` and `1.0`.
pub(crate) fn same_number(a: &str, b: &str) -> bool {
    match (Decimal::parse(a), Decimal::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

pub(crate) fn is_valid_number(value: &str) -> bool {
    Decimal::parse(value).is_some()
}
