use crate::config::TextCodec;
use crate::error::{EncodingError, Result};
use log::warn;

/// Number of code points in the Unicode code space (U+0000..=U+10FFFF)
pub const CODE_SPACE: f64 = 1_114_112.0;

/// Encode text with the selected codec, one element per char
pub fn encode_text(text: &str, codec: TextCodec) -> Vec<f64> {
    match codec {
        TextCodec::Byte => encode_text_bytes(text),
        TextCodec::Normalized => encode_text_normalized(text),
    }
}

/// Decode a vector produced by [`encode_text`] with the same codec
pub fn decode_text(vector: &[f64], codec: TextCodec) -> Result<String> {
    match codec {
        TextCodec::Byte => Ok(decode_text_bytes(vector)),
        TextCodec::Normalized => decode_text_normalized(vector),
    }
}

/// Byte-range codec: each char becomes its code point as a float
pub fn encode_text_bytes(text: &str) -> Vec<f64> {
    let vector: Vec<f64> = text.chars().map(|c| u32::from(c) as f64).collect();
    let wide = vector.iter().filter(|&&v| v > 255.0).count();
    if wide > 0 {
        warn!(
            "{} of {} chars lie above U+00FF and will not survive the byte codec",
            wide,
            vector.len()
        );
    }
    vector
}

/// Byte-range decode: round, clamp into 0..=255, then read the bytes as UTF-8
///
/// Invalid sequences are dropped rather than replaced. Code points above 255
/// therefore come back as something else, or not at all. NaN decodes as 0.
pub fn decode_text_bytes(vector: &[f64]) -> String {
    let bytes: Vec<u8> = vector
        .iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();

    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Normalized codec: code point / 1,114,112, so every element is in [0, 1)
pub fn encode_text_normalized(text: &str) -> Vec<f64> {
    text.chars()
        .map(|c| u32::from(c) as f64 / CODE_SPACE)
        .collect()
}

/// Normalized decode: scale back up, round, and require a Unicode scalar value
pub fn decode_text_normalized(vector: &[f64]) -> Result<String> {
    vector
        .iter()
        .enumerate()
        .map(|(index, &value)| -> Result<char> {
            let scaled = (value * CODE_SPACE).round();
            let invalid = EncodingError::InvalidScalar { index, value };
            if !scaled.is_finite() || scaled < 0.0 || scaled > u32::MAX as f64 {
                return Err(invalid.into());
            }
            char::from_u32(scaled as u32).ok_or_else(|| invalid.into())
        })
        .collect()
}
