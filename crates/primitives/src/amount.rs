//! Arbitrary-precision amounts counted in pips.
//!
//! One pip is 10^-18 of the human-readable base unit. All conversion between
//! decimal strings and pip counts is exact integer arithmetic; floating point
//! is never involved.

use crate::constants::PIP_DECIMALS;
use crate::error::{PrimitiveError, PrimitiveResult};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative value counted in pips (10^-18 of the base unit).
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Amount(BigUint);

/// Returns 10^18 as a big integer.
fn pip_scale() -> BigUint {
    BigUint::from(10u8).pow(PIP_DECIMALS)
}

impl Amount {
    /// Returns the zero amount.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Checks whether the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Wraps a raw pip count.
    #[inline]
    #[must_use]
    pub fn from_pips(pips: BigUint) -> Self {
        Self(pips)
    }

    /// Returns the raw pip count.
    #[inline]
    #[must_use]
    pub fn as_pips(&self) -> &BigUint {
        &self.0
    }

    /// Consumes the amount, returning the raw pip count.
    #[inline]
    #[must_use]
    pub fn into_pips(self) -> BigUint {
        self.0
    }

    /// Converts a whole number of base units into pips.
    #[must_use]
    pub fn from_base_units(units: u64) -> Self {
        Self(BigUint::from(units) * pip_scale())
    }

    /// Parses a decimal base-unit string into an exact pip count.
    ///
    /// Accepts plain digits with an optional fractional part of up to 18
    /// significant digits (`"1"`, `"0.012345"`, `".5"`). Fractional digits
    /// past the 18th must be zero.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` for non-digit input and
    /// `PrimitiveError::PrecisionLoss` when the value cannot be represented
    /// in pips without rounding.
    pub fn from_decimal(value: &str) -> PrimitiveResult<Self> {
        let (integer_part, fraction_part) = match value.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (value, ""),
        };
        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(PrimitiveError::InvalidFormat {
                message: format!("empty decimal amount: {value:?}"),
            });
        }
        if !integer_part.bytes().all(|b| b.is_ascii_digit())
            || !fraction_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PrimitiveError::InvalidFormat {
                message: format!("invalid decimal amount: {value:?}"),
            });
        }

        let decimals = PIP_DECIMALS as usize;
        if fraction_part.len() > decimals
            && fraction_part.bytes().skip(decimals).any(|b| b != b'0')
        {
            return Err(PrimitiveError::PrecisionLoss {
                value: value.to_string(),
            });
        }

        let integer = if integer_part.is_empty() {
            BigUint::zero()
        } else {
            // Digits are pre-validated, so the parse cannot fail.
            BigUint::from_str(integer_part).map_err(|e| PrimitiveError::InvalidFormat {
                message: format!("invalid decimal amount: {e}"),
            })?
        };

        let significant = &fraction_part[..fraction_part.len().min(decimals)];
        let mut fraction = if significant.is_empty() {
            BigUint::zero()
        } else {
            BigUint::from_str(significant).map_err(|e| PrimitiveError::InvalidFormat {
                message: format!("invalid decimal amount: {e}"),
            })?
        };
        fraction *= BigUint::from(10u8).pow((decimals - significant.len()) as u32);

        Ok(Self(integer * pip_scale() + fraction))
    }

    /// Formats the amount as an exact decimal base-unit string.
    ///
    /// Trailing fractional zeros are trimmed; whole values print with no
    /// fractional part. This is the exact inverse of [`Amount::from_decimal`].
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        let scale = pip_scale();
        let integer = &self.0 / &scale;
        let fraction = &self.0 % &scale;
        if fraction.is_zero() {
            return integer.to_string();
        }
        let digits = format!("{:0>width$}", fraction, width = PIP_DECIMALS as usize);
        format!("{}.{}", integer, digits.trim_end_matches('0'))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl From<BigUint> for Amount {
    fn from(pips: BigUint) -> Self {
        Self(pips)
    }
}

impl From<u64> for Amount {
    fn from(pips: u64) -> Self {
        Self(BigUint::from(pips))
    }
}

impl FromStr for Amount {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> PrimitiveResult<Self> {
        Self::from_decimal(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn pips(text: &str) -> BigUint {
        BigUint::from_str(text).unwrap()
    }

    #[test]
    fn parses_integer_and_fraction() {
        assert_eq!(
            pips("12345000000000000"),
            Amount::from_decimal("0.012345").unwrap().into_pips()
        );
        assert_eq!(
            pips("1000000000000000000"),
            Amount::from_decimal("1").unwrap().into_pips()
        );
        assert_eq!(
            pips("1500000000000000000"),
            Amount::from_decimal("1.5").unwrap().into_pips()
        );
        assert_eq!(
            pips("500000000000000000"),
            Amount::from_decimal(".5").unwrap().into_pips()
        );
    }

    #[test]
    fn smallest_pip_survives_round_trip() {
        let one_pip = Amount::from_decimal("0.000000000000000001").unwrap();
        assert_eq!(BigUint::one(), *one_pip.as_pips());
        assert_eq!("0.000000000000000001", one_pip.to_decimal_string());
    }

    #[test]
    fn normalize_humanize_is_identity() {
        let two_pow_256_minus_one = (BigUint::one() << 256u32) - BigUint::one();
        let cases = [
            BigUint::zero(),
            BigUint::one(),
            pip_scale() - BigUint::one(),
            pip_scale(),
            two_pow_256_minus_one,
        ];
        for raw in cases {
            let amount = Amount::from_pips(raw.clone());
            let round_tripped = Amount::from_decimal(&amount.to_decimal_string()).unwrap();
            assert_eq!(raw, round_tripped.into_pips());
        }
    }

    #[test]
    fn nineteenth_nonzero_digit_is_precision_loss() {
        assert!(matches!(
            Amount::from_decimal("0.0000000000000000001"),
            Err(PrimitiveError::PrecisionLoss { .. })
        ));
        // Zeros past the 18th place carry no information and are accepted.
        assert_eq!(
            Amount::from_decimal("0.5").unwrap(),
            Amount::from_decimal("0.5000000000000000000000").unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", ".", "1.2.3", "1e5", "-1", "12a", "0x10"] {
            assert!(Amount::from_decimal(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!("1.5", Amount::from_decimal("1.500000").unwrap().to_string());
        assert_eq!("42", Amount::from_decimal("42.000").unwrap().to_string());
        assert_eq!("0", Amount::zero().to_string());
    }
}
