use crate::config::{Normalization, Transform};
use crate::error::{EncodingError, Result, ShapeError};
use crate::key::Key;
use log::debug;

/// Square ±1 matrix of power-of-two order built by Sylvester doubling
///
/// `H(1) = [1]`, `H(2N) = [[H(N), H(N)], [H(N), -H(N)]]`. Satisfies `H·H = N·I`.
/// Built per call and thrown away; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadamardMatrix {
    order: usize,
    /// Row-major entries
    entries: Vec<i8>,
}

impl HadamardMatrix {
    pub fn sylvester(order: usize) -> std::result::Result<Self, ShapeError> {
        check_order(order)?;

        let mut entries = vec![1i8];
        let mut n = 1;
        while n < order {
            let m = n * 2;
            let mut next = vec![0i8; m * m];
            for r in 0..n {
                for c in 0..n {
                    let h = entries[r * n + c];
                    next[r * m + c] = h;
                    next[r * m + c + n] = h;
                    next[(r + n) * m + c] = h;
                    next[(r + n) * m + c + n] = -h;
                }
            }
            entries = next;
            n = m;
        }

        Ok(Self { order, entries })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.entries[row * self.order + col]
    }

    pub fn row(&self, row: usize) -> &[i8] {
        &self.entries[row * self.order..(row + 1) * self.order]
    }

    /// Naive matrix-vector product `H · v`
    pub fn mul_vec(&self, vector: &[f64]) -> std::result::Result<Vec<f64>, ShapeError> {
        if vector.len() != self.order {
            return Err(ShapeError::MatrixOrder {
                order: self.order,
                len: vector.len(),
            });
        }
        Ok((0..self.order)
            .map(|r| {
                self.row(r)
                    .iter()
                    .zip(vector)
                    .map(|(&h, &v)| h as f64 * v)
                    .sum::<f64>()
            })
            .collect())
    }
}

fn check_order(order: usize) -> std::result::Result<(), ShapeError> {
    if order == 0 || !order.is_power_of_two() {
        return Err(ShapeError::NotPowerOfTwo(order));
    }
    Ok(())
}

/// In-place fast Walsh-Hadamard transform, same result as `H · v` in Sylvester order
pub fn fwht(data: &mut [f64]) -> std::result::Result<(), ShapeError> {
    let n = data.len();
    check_order(n)?;

    let mut half = 1;
    while half < n {
        for start in (0..n).step_by(half * 2) {
            for i in start..start + half {
                let a = data[i];
                let b = data[i + half];
                data[i] = a + b;
                data[i + half] = a - b;
            }
        }
        half *= 2;
    }
    Ok(())
}

/// Unkeyed transform `scale · H · v`
pub fn hadamard_transform(
    data: &[f64],
    transform: Transform,
    normalization: Normalization,
) -> std::result::Result<Vec<f64>, ShapeError> {
    let mut out = match transform {
        Transform::Matrix => HadamardMatrix::sylvester(data.len())?.mul_vec(data)?,
        Transform::Fast => {
            let mut out = data.to_vec();
            fwht(&mut out)?;
            out
        }
    };

    let scale = normalization.scale(data.len());
    if scale != 1.0 {
        for v in out.iter_mut() {
            *v *= scale;
        }
    }
    Ok(out)
}

/// `encrypted = H · data + key`
///
/// `data` must have power-of-two length. Decrypt with the same key, transform
/// and normalization. Fails if any output element overflows to a non-finite value.
pub fn hadamard_encrypt(
    data: &[f64],
    key: &Key,
    transform: Transform,
    normalization: Normalization,
) -> Result<Vec<f64>> {
    check_order(data.len())?;
    key.check_len(data.len())?;
    debug!(
        "hadamard encrypt: order {}, {:?}, {:?}",
        data.len(),
        transform,
        normalization
    );

    let mut encrypted = hadamard_transform(data, transform, normalization)?;
    key.add_to(&mut encrypted)?;
    // JSON has no representation for inf or NaN
    if let Some(index) = encrypted.iter().position(|v| !v.is_finite()) {
        return Err(EncodingError::NonFinite { index }.into());
    }
    Ok(encrypted)
}

/// `decrypted = H · (encrypted - key)`
///
/// Only an exact inverse of [`hadamard_encrypt`] under
/// [`Normalization::Orthonormal`]; unnormalized, the result is `N · data`.
pub fn hadamard_decrypt(
    encrypted: &[f64],
    key: &Key,
    transform: Transform,
    normalization: Normalization,
) -> Result<Vec<f64>> {
    check_order(encrypted.len())?;
    key.check_len(encrypted.len())?;
    debug!(
        "hadamard decrypt: order {}, {:?}, {:?}",
        encrypted.len(),
        transform,
        normalization
    );

    let mut centered = encrypted.to_vec();
    key.subtract_from(&mut centered)?;
    Ok(hadamard_transform(&centered, transform, normalization)?)
}
