use crate::config::PipelineConfig;
use crate::error::{Result, ShapeError, StellarError};
use crate::key::Key;
use crate::pipeline::{
    decode_record, decode_text, encode_record, encode_text, hadamard_decrypt, hadamard_encrypt,
    pad_to_power_of_two, rescale_record, unpad,
};
use crate::record::Record;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current envelope format version
pub const ENVELOPE_VERSION: u32 = 1;

/// Where each part of a combined payload lives in the transformed vector
///
/// Layout: `[record values..][text elements..][zero padding..]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadLayout {
    /// Record field names in vector order
    pub record_keys: Vec<String>,
    /// Number of text elements (one per char)
    pub text_len: usize,
    /// Length after padding to a power of two
    pub padded_len: usize,
}

impl PayloadLayout {
    /// Length of record + text before padding, None on overflow
    pub fn combined_len(&self) -> Option<usize> {
        self.record_keys.len().checked_add(self.text_len)
    }

    /// Check the layout describes a vector of `len` elements and return the unpadded length
    pub fn check(&self, len: usize) -> std::result::Result<usize, ShapeError> {
        if len != self.padded_len {
            return Err(ShapeError::Payload {
                expected: self.padded_len,
                actual: len,
            });
        }
        match self.combined_len() {
            Some(combined) if combined <= self.padded_len => Ok(combined),
            _ => Err(ShapeError::Layout {
                record: self.record_keys.len(),
                text: self.text_len,
                padded: self.padded_len,
            }),
        }
    }
}

/// A transformed payload plus what is needed to undo it, minus the key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub version: u32,
    pub config: PipelineConfig,
    pub layout: PayloadLayout,
    pub vector: Vec<f64>,
}

impl EncryptedPayload {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let payload: Self = serde_json::from_slice(data)?;
        if payload.version != ENVELOPE_VERSION {
            return Err(StellarError::UnsupportedVersion(payload.version));
        }
        Ok(payload)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

/// Reconstructed record and message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptedPayload {
    pub record: Record,
    pub message: String,
}

/// How closely a decrypted payload matches the original
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fidelity {
    /// Largest per-field error, None when the field names differ
    pub max_record_error: Option<f64>,
    pub message_matches: bool,
}

impl Fidelity {
    pub fn within(&self, tolerance: f64) -> bool {
        self.message_matches && self.max_record_error.is_some_and(|e| e <= tolerance)
    }
}

impl DecryptedPayload {
    pub fn fidelity(&self, record: &Record, message: &str) -> Fidelity {
        Fidelity {
            max_record_error: self.record.max_abs_diff(record),
            message_matches: self.message == message,
        }
    }
}

/// Encode, pad and transform a record together with a text message
///
/// Applies: Record → vector, Text → vector, concatenate, pad to 2^k, `H · v + key`.
pub fn encrypt_payload(
    record: &Record,
    message: &str,
    key: &Key,
    config: &PipelineConfig,
) -> Result<EncryptedPayload> {
    // Step 1: Encode both parts
    let mut combined = encode_record(record);
    let text = encode_text(message, config.text_codec);
    let text_len = text.len();
    combined.extend(text);

    // Step 2: Pad so the Hadamard order is defined
    let padded = pad_to_power_of_two(&combined);
    debug!(
        "payload: {} record fields + {} text elements padded to {}",
        record.len(),
        text_len,
        padded.len()
    );

    // Step 3: Keyed transform
    let vector = hadamard_encrypt(&padded, key, config.transform, config.normalization)?;

    Ok(EncryptedPayload {
        version: ENVELOPE_VERSION,
        config: *config,
        layout: PayloadLayout {
            record_keys: record.keys().map(str::to_string).collect(),
            text_len,
            padded_len: padded.len(),
        },
        vector,
    })
}

/// Undo [`encrypt_payload`]
///
/// A wrong key is not detected: it yields a record and message that differ from
/// the originals, or an encoding error if the text no longer decodes.
pub fn decrypt_payload(payload: &EncryptedPayload, key: &Key) -> Result<DecryptedPayload> {
    let layout = &payload.layout;
    let config = &payload.config;

    let combined_len = layout.check(payload.vector.len())?;

    // Step 1: Inverse transform
    let decrypted = hadamard_decrypt(&payload.vector, key, config.transform, config.normalization)?;

    // Step 2: Drop padding and split at the record boundary
    let combined = unpad(&decrypted, combined_len)?;
    let (record_part, text_part) = combined.split_at(layout.record_keys.len());

    // Step 3: Decode both parts
    let mut record = decode_record(record_part, &layout.record_keys)?;
    if let Some(rescale) = config.record_rescale {
        rescale_record(&mut record, rescale);
    }
    let message = decode_text(text_part, config.text_codec)?;

    Ok(DecryptedPayload { record, message })
}
