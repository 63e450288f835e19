use crate::error::ShapeError;

/// Append zeros until the vector has `target_length` elements
/// Shrinking is refused rather than truncating silently.
pub fn pad(vector: &[f64], target_length: usize) -> Result<Vec<f64>, ShapeError> {
    if target_length < vector.len() {
        return Err(ShapeError::PadTarget {
            len: vector.len(),
            target: target_length,
        });
    }
    let mut padded = Vec::with_capacity(target_length);
    padded.extend_from_slice(vector);
    padded.resize(target_length, 0.0);
    Ok(padded)
}

/// Smallest power of two that can hold `len` elements
/// Both 0 and 1 map to 1.
pub fn next_power_of_two(len: usize) -> usize {
    len.next_power_of_two()
}

/// Pad with zeros up to the next power of two
///
/// A single element needs no padding. An empty vector becomes `[0.0]`.
pub fn pad_to_power_of_two(vector: &[f64]) -> Vec<f64> {
    let target = next_power_of_two(vector.len());
    let mut padded = Vec::with_capacity(target);
    padded.extend_from_slice(vector);
    padded.resize(target, 0.0);
    padded
}

/// Keep the first `original_length` elements
/// The discarded tail is not checked for zeros.
pub fn unpad(vector: &[f64], original_length: usize) -> Result<Vec<f64>, ShapeError> {
    if original_length > vector.len() {
        return Err(ShapeError::UnpadLength {
            len: vector.len(),
            original: original_length,
        });
    }
    Ok(vector[..original_length].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_appends_zeros() {
        let padded = pad(&[1.0, 2.0], 5).unwrap();
        assert_eq!(padded, vec![1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(pad(&[1.0, 2.0], 2).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_pad_refuses_to_shrink() {
        assert_eq!(
            pad(&[1.0, 2.0, 3.0], 2).unwrap_err(),
            ShapeError::PadTarget { len: 3, target: 2 }
        );
    }

    #[test]
    fn test_pad_to_power_of_two() {
        let padded = pad_to_power_of_two(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(padded.len(), 8);
        assert_eq!(&padded[..5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(&padded[5..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pad_to_power_of_two_small() {
        assert_eq!(pad_to_power_of_two(&[]), vec![0.0]);
        assert_eq!(pad_to_power_of_two(&[7.0]), vec![7.0]);
        assert_eq!(pad_to_power_of_two(&[7.0, 8.0]), vec![7.0, 8.0]);
        assert_eq!(pad_to_power_of_two(&[7.0, 8.0, 9.0]).len(), 4);
    }

    #[test]
    fn test_exact_power_not_padded() {
        let v: Vec<f64> = (0..64).map(|i| i as f64).collect();
        assert_eq!(pad_to_power_of_two(&v), v);
        assert_eq!(pad_to_power_of_two(&v[..33]).len(), 64);
    }

    #[test]
    fn test_unpad_ignores_tail() {
        assert_eq!(unpad(&[1.0, 2.0, 9.0, 9.0], 2).unwrap(), vec![1.0, 2.0]);
        assert_eq!(unpad(&[1.0, 2.0], 0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_unpad_too_long() {
        assert_eq!(
            unpad(&[1.0], 2).unwrap_err(),
            ShapeError::UnpadLength { len: 1, original: 2 }
        );
    }

    #[test]
    fn test_pad_unpad_roundtrip() {
        let v = vec![3.5, -1.0, 0.25];
        for target in 3..12 {
            assert_eq!(unpad(&pad(&v, target).unwrap(), v.len()).unwrap(), v);
        }
    }
}
