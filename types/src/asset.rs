//! Token asset types.
//!
//! Amounts are fixed-point integers (`i64` raw units) tagged with a symbol that
//! carries the precision. `10.0000 EOS` is 100_000 raw units of a 4-decimal symbol.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest supported precision; `10^18` still fits in an `i64`.
const MAX_PRECISION: u8 = 18;

/// A token symbol: an upper-case code plus its decimal precision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub code: String,
    pub precision: u8,
}

impl Symbol {
    pub fn new(code: impl Into<String>, precision: u8) -> Self {
        Self {
            code: code.into(),
            precision,
        }
    }

    /// Validate the code (1 to 7 upper-case letters) and precision.
    pub fn is_valid(&self) -> bool {
        (1..=7).contains(&self.code.len())
            && self.code.chars().all(|c| c.is_ascii_uppercase())
            && self.precision <= MAX_PRECISION
    }

    /// Number of raw units in one whole token.
    pub fn unit(&self) -> i64 {
        10i64.pow(u32::from(self.precision))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// An amount of a specific token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Self::new(0, symbol)
    }

    /// Raw amount in the smallest unit of the symbol.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn checked_add(&self, other: &Asset) -> Result<Asset, TypesError> {
        self.ensure_same_symbol(other)?;
        self.amount
            .checked_add(other.amount)
            .map(|amount| Asset::new(amount, self.symbol.clone()))
            .ok_or(TypesError::Overflow)
    }

    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, TypesError> {
        self.ensure_same_symbol(other)?;
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Asset::new(amount, self.symbol.clone()))
            .ok_or(TypesError::Overflow)
    }

    fn ensure_same_symbol(&self, other: &Asset) -> Result<(), TypesError> {
        if self.symbol != other.symbol {
            return Err(TypesError::SymbolMismatch {
                left: self.symbol.to_string(),
                right: other.symbol.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let precision = usize::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{sign}{abs} {}", self.symbol.code);
        }
        let unit = 10u64.pow(u32::from(self.symbol.precision));
        write!(
            f,
            "{sign}{}.{:0precision$} {}",
            abs / unit,
            abs % unit,
            self.symbol.code
        )
    }
}

impl FromStr for Asset {
    type Err = TypesError;

    /// Parse `"<amount> <CODE>"`; the precision is the number of fraction digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidAsset(s.to_string());
        let (number, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if digits.contains('.') && fraction.is_empty() {
            return Err(invalid());
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
        let symbol = Symbol::new(code.trim(), precision);
        if !symbol.is_valid() {
            return Err(TypesError::InvalidSymbol(code.to_string()));
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| invalid())?
        };
        let magnitude = whole
            .checked_mul(symbol.unit())
            .and_then(|w| w.checked_add(fraction))
            .ok_or(TypesError::Overflow)?;
        let amount = if negative { -magnitude } else { magnitude };
        Ok(Asset::new(amount, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}
