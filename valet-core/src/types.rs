//! Coin, gas price and fee arithmetic.
//!
//! Fee amounts are integers in the chain's minimal denomination. Gas prices
//! are fractional, so they are carried as fixed-point decimals (18 fractional
//! digits, the same resolution cosmos-sdk uses for `Dec`) and multiplied out
//! with checked integer arithmetic. No floats touch an amount.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::proto;

/// Number of fractional digits a [`GasPrice`] can carry.
pub const GAS_PRICE_FRACTIONAL_DIGITS: u32 = 18;

const ATOMICS_PER_UNIT: u128 = 10u128.pow(GAS_PRICE_FRACTIONAL_DIGITS);

/// Errors produced by coin and fee arithmetic.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoinError {
    /// The amount was not a non-negative integer.
    #[error("invalid coin amount {0:?}: expected a non-negative integer")]
    InvalidAmount(String),
    /// The denomination was empty or started with a digit.
    #[error("invalid denomination {0:?}")]
    InvalidDenom(String),
    /// The gas price string could not be parsed.
    #[error("invalid gas price {0:?}")]
    InvalidGasPrice(String),
    /// An intermediate product exceeded 128 bits.
    #[error("amount arithmetic overflowed")]
    Overflow,
}

/// An amount of a specific denomination, e.g. `3750uatom`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    /// Minimal denomination, e.g. `uatom`.
    pub denom: String,
    /// Integer amount in the minimal denomination.
    pub amount: u128,
}

impl Coin {
    /// Creates a coin, validating the denomination.
    pub fn new(amount: u128, denom: impl Into<String>) -> Result<Self, CoinError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self { denom, amount })
    }

    /// Parses a bare amount string, rejecting negative, fractional or
    /// non-numeric input.
    pub fn parse_amount(s: &str) -> Result<u128, CoinError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoinError::InvalidAmount(s.to_owned()));
        }
        s.parse::<u128>()
            .map_err(|_| CoinError::InvalidAmount(s.to_owned()))
    }

    pub(crate) fn to_proto(&self) -> proto::base::Coin {
        proto::base::Coin { denom: self.denom.clone(), amount: self.amount.to_string() }
    }

    pub(crate) fn from_proto(coin: &proto::base::Coin) -> Result<Self, CoinError> {
        Ok(Self { denom: coin.denom.clone(), amount: Self::parse_amount(&coin.amount)? })
    }
}

fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let valid = denom
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_owned()))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinError::InvalidDenom(s.to_owned()))?;
        let (amount, denom) = s.split_at(split);
        Ok(Self { amount: Self::parse_amount(amount)?, denom: denom.to_owned() })
    }
}

// The REST and Amino JSON representations carry amounts as strings.
impl Serialize for Coin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            amount: String,
            denom: &'a str,
        }
        Repr { amount: self.amount.to_string(), denom: &self.denom }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            amount: String,
            denom: String,
        }
        let repr = Repr::deserialize(deserializer)?;
        let amount = Coin::parse_amount(&repr.amount).map_err(serde::de::Error::custom)?;
        validate_denom(&repr.denom).map_err(serde::de::Error::custom)?;
        Ok(Coin { denom: repr.denom, amount })
    }
}

/// A price per unit of gas, e.g. `0.025uatom`.
///
/// Stored as fixed-point atomics so that fee computation stays in integer
/// arithmetic regardless of magnitude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasPrice {
    /// Minimal denomination the price is quoted in.
    pub denom: String,
    /// Price in units of 10^-18 of the denomination.
    pub atomics: u128,
}

impl GasPrice {
    /// Creates a gas price from whole atomics.
    pub fn from_atomics(atomics: u128, denom: impl Into<String>) -> Result<Self, CoinError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self { denom, atomics })
    }
}

impl FromStr for GasPrice {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(|| CoinError::InvalidGasPrice(s.to_owned()))?;
        let (number, denom) = s.split_at(split);
        validate_denom(denom)?;

        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CoinError::InvalidGasPrice(s.to_owned()));
        }
        if frac_part.len() as u32 > GAS_PRICE_FRACTIONAL_DIGITS || frac_part.contains('.') {
            return Err(CoinError::InvalidGasPrice(s.to_owned()));
        }
        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| CoinError::InvalidGasPrice(s.to_owned()))?
        };
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse()
                .map_err(|_| CoinError::InvalidGasPrice(s.to_owned()))?
        };
        let scale = 10u128.pow(GAS_PRICE_FRACTIONAL_DIGITS - frac_part.len() as u32);
        let atomics = int
            .checked_mul(ATOMICS_PER_UNIT)
            .and_then(|i| i.checked_add(frac * scale))
            .ok_or(CoinError::Overflow)?;
        Ok(Self { denom: denom.to_owned(), atomics })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.atomics / ATOMICS_PER_UNIT;
        let frac = self.atomics % ATOMICS_PER_UNIT;
        if frac == 0 {
            write!(f, "{}{}", int, self.denom)
        } else {
            let frac = format!("{:018}", frac);
            write!(f, "{}.{}{}", int, frac.trim_end_matches('0'), self.denom)
        }
    }
}

/// The fee attached to a transaction: integer amounts plus a gas limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fee {
    /// One amount per denomination.
    pub amount: Vec<Coin>,
    /// Gas the transaction is allowed to consume.
    pub gas_limit: u64,
}

impl Fee {
    /// Computes the fee for `gas_limit` units of gas at `gas_price`,
    /// rounding the amount up to the next whole minimal-denomination unit.
    pub fn from_gas(gas_limit: u64, gas_price: &GasPrice) -> Result<Self, CoinError> {
        let product = gas_price
            .atomics
            .checked_mul(gas_limit as u128)
            .ok_or(CoinError::Overflow)?;
        // ceil(product / 10^18)
        let amount = product / ATOMICS_PER_UNIT + u128::from(product % ATOMICS_PER_UNIT != 0);
        Ok(Self {
            amount: vec![Coin { denom: gas_price.denom.clone(), amount }],
            gas_limit,
        })
    }

    /// Renders into the protobuf `Fee` used inside `AuthInfo`.
    pub fn to_proto(&self) -> proto::tx::Fee {
        proto::tx::Fee {
            amount: self.amount.iter().map(Coin::to_proto).collect(),
            gas_limit: self.gas_limit,
            payer: String::new(),
            granter: String::new(),
        }
    }
}
