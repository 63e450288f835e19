use crate::config::RecordRescale;
use crate::error::{Result, ShapeError};
use crate::record::Record;

/// Project record values into a vector in insertion order. Keys are dropped.
pub fn encode_record(record: &Record) -> Vec<f64> {
    record.values().collect()
}

/// Zip a key order back onto a vector
///
/// The vector carries no key information, so the caller must supply the same
/// keys, in the same order, that were used to encode it.
pub fn decode_record<S: AsRef<str>>(vector: &[f64], keys: &[S]) -> Result<Record> {
    if keys.len() != vector.len() {
        return Err(ShapeError::RecordKeys {
            keys: keys.len(),
            values: vector.len(),
        }
        .into());
    }

    Ok(keys
        .iter()
        .zip(vector)
        .map(|(k, &v)| (k.as_ref(), v))
        .collect())
}

/// Divide every value by `rescale.divisor` and round to `rescale.decimals` places
///
/// Applied after [`decode_record`] for payload layouts that need it.
pub fn rescale_record(record: &mut Record, rescale: RecordRescale) {
    let factor = 10f64.powi(rescale.decimals as i32);
    for value in record.values_mut() {
        *value = (*value / rescale.divisor * factor).round() / factor;
    }
}
