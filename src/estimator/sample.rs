//! Sample values and their exact-equality keys.
//!
//! Distinct counting never uses tolerances. Two samples are the same
//! value only if they are numerically identical, which is what lets the
//! estimator notice continuous noise added to integer-valued data.

use std::fmt;
use thiserror::Error;

/// 2^127, the first float magnitude outside the `i128` range.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Reasons a single sample cannot take part in an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("{0:?} is not a number")]
    NotNumeric(String),
    #[error("value is not finite")]
    NonFinite,
}

/// Hashable key identifying a sample's exact value.
///
/// Integral floats inside the `i128` range key as integers, so `3` and
/// `3.0` count once. `-0.0` folds onto `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKey {
    /// Exact integer value.
    Integer(i128),
    /// Bit pattern of a finite, non-integral (or out of range) float.
    Float(u64),
}

impl SampleKey {
    /// Keys a float, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, SampleError> {
        if !value.is_finite() {
            return Err(SampleError::NonFinite);
        }

        if value.fract() == 0.0 && (-I128_BOUND..I128_BOUND).contains(&value) {
            return Ok(SampleKey::Integer(value as i128));
        }

        Ok(SampleKey::Float(value.to_bits()))
    }
}

/// A numeric value that can be counted by the estimator.
pub trait Sample: Copy {
    /// Returns the exact-equality key for this value.
    fn key(self) -> Result<SampleKey, SampleError>;
}

macro_rules! impl_integer_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn key(self) -> Result<SampleKey, SampleError> {
                    Ok(SampleKey::Integer(self as i128))
                }
            }
        )*
    };
}

impl_integer_sample!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Sample for f64 {
    #[inline]
    fn key(self) -> Result<SampleKey, SampleError> {
        SampleKey::from_f64(self)
    }
}

impl Sample for f32 {
    #[inline]
    fn key(self) -> Result<SampleKey, SampleError> {
        // f32 -> f64 is exact, so equality is preserved.
        SampleKey::from_f64(f64::from(self))
    }
}

/// A dynamically typed numeric sample, as parsed from text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Integer literal.
    Integer(i128),
    /// Finite floating point literal.
    Float(f64),
}

impl Numeric {
    /// Parses a token as an integer, falling back to a float.
    pub fn parse(token: &str) -> Result<Self, SampleError> {
        let token = token.trim();

        if let Ok(value) = token.parse::<i128>() {
            return Ok(Numeric::Integer(value));
        }

        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Numeric::Float(value)),
            Ok(_) => Err(SampleError::NonFinite),
            Err(_) => Err(SampleError::NotNumeric(token.to_string())),
        }
    }
}

impl Sample for Numeric {
    fn key(self) -> Result<SampleKey, SampleError> {
        match self {
            Numeric::Integer(value) => Ok(SampleKey::Integer(value)),
            Numeric::Float(value) => SampleKey::from_f64(value),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(i128::from(value))
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Numeric::Integer(i128::from(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(value) => write!(f, "{}", value),
            Numeric::Float(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_float_keys_as_integer() {
        assert_eq!(3.0f64.key().unwrap(), 3u8.key().unwrap());
        assert_eq!(Numeric::Float(3.0).key().unwrap(), Numeric::Integer(3).key().unwrap());
    }

    #[test]
    fn test_negative_zero_folds() {
        assert_eq!((-0.0f64).key().unwrap(), 0.0f64.key().unwrap());
    }

    #[test]
    fn test_nearby_floats_are_distinct() {
        let a = 100.0f64;
        let b = 100.0f64 + 1e-9;
        assert_ne!(a.key().unwrap(), b.key().unwrap());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(f64::NAN.key(), Err(SampleError::NonFinite));
        assert_eq!(f64::INFINITY.key(), Err(SampleError::NonFinite));
        assert_eq!(f32::NEG_INFINITY.key(), Err(SampleError::NonFinite));
    }

    #[test]
    fn test_extreme_integers() {
        assert_eq!(u64::MAX.key().unwrap(), SampleKey::Integer(u64::MAX as i128));
        assert_eq!(i64::MIN.key().unwrap(), SampleKey::Integer(i64::MIN as i128));
        // Beyond i128, floats key by bit pattern.
        assert!(matches!(1e39f64.key().unwrap(), SampleKey::Float(_)));
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Numeric::parse(" 42 ").unwrap(), Numeric::Integer(42));
        assert_eq!(Numeric::parse("-1.5").unwrap(), Numeric::Float(-1.5));
        assert_eq!(Numeric::parse("1e3").unwrap(), Numeric::Float(1000.0));
        assert_eq!(Numeric::parse("nan"), Err(SampleError::NonFinite));
        assert_eq!(Numeric::parse("inf"), Err(SampleError::NonFinite));
        assert_eq!(
            Numeric::parse("abc"),
            Err(SampleError::NotNumeric("abc".to_string()))
        );
        assert!(matches!(Numeric::parse(""), Err(SampleError::NotNumeric(_))));
    }
}
