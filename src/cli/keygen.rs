use crate::error::{Result, ShapeError};
use crate::key::Key;

/// Generate a random vector key for a transform of order `length`
/// `length` must be the padded vector length, a power of two.
pub fn generate_key(length: usize, seed: Option<u64>) -> Result<Key> {
    if length == 0 || !length.is_power_of_two() {
        return Err(ShapeError::NotPowerOfTwo(length).into());
    }
    Ok(Key::random(length, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key() {
        let key = generate_key(8, Some(3)).unwrap();
        assert!(key.check_len(8).is_ok());
        assert_eq!(key, generate_key(8, Some(3)).unwrap());
    }

    #[test]
    fn test_generate_key_rejects_bad_length() {
        assert!(generate_key(0, None).unwrap_err().is_shape());
        assert!(generate_key(12, None).unwrap_err().is_shape());
    }
}
