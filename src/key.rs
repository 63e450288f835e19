use crate::error::{Result, ShapeError, StellarError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Shared secret added after the forward transform and removed before the inverse
///
/// A scalar is broadcast to every element. A vector must match the data length.
/// A single number always parses as a scalar, which acts the same as a one-element
/// vector on a vector of length 1.
/// Decrypting with a different key does not fail, it just produces the wrong values.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Key {
    /// Random vector key with elements uniform in [0, 1)
    /// A seed makes the key reproducible; without one it comes from OS entropy.
    pub fn random(len: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::Vector((0..len).map(|_| rng.gen::<f64>()).collect())
    }

    /// Check the key can be combined with a vector of length `len`
    pub fn check_len(&self, len: usize) -> std::result::Result<(), ShapeError> {
        match self {
            Self::Scalar(_) => Ok(()),
            Self::Vector(k) if k.len() == len => Ok(()),
            Self::Vector(k) => Err(ShapeError::KeyLength {
                expected: len,
                actual: k.len(),
            }),
        }
    }

    /// Key value for element `i`. Callers check the length first.
    fn at(&self, i: usize) -> f64 {
        match self {
            Self::Scalar(k) => *k,
            Self::Vector(k) => k[i],
        }
    }

    /// Element-wise `data + key`
    pub fn add_to(&self, data: &mut [f64]) -> std::result::Result<(), ShapeError> {
        self.check_len(data.len())?;
        for (i, value) in data.iter_mut().enumerate() {
            *value += self.at(i);
        }
        Ok(())
    }

    /// Element-wise `data - key`
    pub fn subtract_from(&self, data: &mut [f64]) -> std::result::Result<(), ShapeError> {
        self.check_len(data.len())?;
        for (i, value) in data.iter_mut().enumerate() {
            *value -= self.at(i);
        }
        Ok(())
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Key {
    fn from(values: Vec<f64>) -> Self {
        Self::Vector(values)
    }
}

/// `"42"` is a scalar key, `"0.5,1.25,3"` a vector key
impl std::str::FromStr for Key {
    type Err = StellarError;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StellarError::InvalidKey("empty key".into()));
        }

        let parse = |part: &str| -> Result<f64> {
            let value: f64 = part
                .trim()
                .parse()
                .map_err(|_| StellarError::InvalidKey(format!("not a number: {:?}", part)))?;
            if !value.is_finite() {
                return Err(StellarError::InvalidKey(format!("not finite: {}", part)));
            }
            Ok(value)
        };

        if s.contains(',') {
            let values = s.split(',').map(parse).collect::<Result<Vec<f64>>>()?;
            Ok(Self::Vector(values))
        } else {
            Ok(Self::Scalar(parse(s)?))
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(k) => write!(f, "{}", k),
            Self::Vector(k) => {
                let parts: Vec<String> = k.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_and_vector() {
        assert_eq!("42".parse::<Key>().unwrap(), Key::Scalar(42.0));
        assert_eq!(
            " 1.5, -2 ,3".parse::<Key>().unwrap(),
            Key::Vector(vec![1.5, -2.0, 3.0])
        );
    }

    #[test]
    fn test_single_number_is_scalar() {
        let key: Key = "0.5".parse().unwrap();
        assert_eq!(key, Key::Scalar(0.5));
        let (mut a, mut b) = (vec![2.0], vec![2.0]);
        key.add_to(&mut a).unwrap();
        Key::Vector(vec![0.5]).add_to(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Key>().is_err());
        assert!("abc".parse::<Key>().is_err());
        assert!("1,,2".parse::<Key>().is_err());
        assert!("inf".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let key = Key::random(8, Some(7));
        let restored: Key = key.to_string().parse().unwrap();
        assert_eq!(key, restored);
    }

    #[test]
    fn test_scalar_broadcast() {
        let mut data = vec![1.0, 2.0, 3.0];
        Key::Scalar(10.0).add_to(&mut data).unwrap();
        assert_eq!(data, vec![11.0, 12.0, 13.0]);
        Key::Scalar(10.0).subtract_from(&mut data).unwrap();
        assert_eq!(data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_vector_length_mismatch() {
        let mut data = vec![0.0; 4];
        let err = Key::Vector(vec![1.0; 3]).add_to(&mut data).unwrap_err();
        assert_eq!(
            err,
            ShapeError::KeyLength {
                expected: 4,
                actual: 3
            }
        );
        // untouched on failure
        assert_eq!(data, vec![0.0; 4]);
    }

    #[test]
    fn test_random_key_range_and_seed() {
        let Key::Vector(values) = Key::random(64, Some(1)) else {
            panic!("random key must be a vector");
        };
        assert_eq!(values.len(), 64);
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));

        assert_eq!(Key::random(16, Some(9)), Key::random(16, Some(9)));
        assert_ne!(Key::random(16, Some(9)), Key::random(16, Some(10)));
    }
}
