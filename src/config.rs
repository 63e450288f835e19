use crate::error::{Result, StellarError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text codec options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextCodec {
    /// One element per char, decoded through a clamped byte. Lossy above U+00FF.
    #[default]
    Byte,
    /// Code point divided by the size of the code space. Lossless.
    Normalized,
}

impl std::str::FromStr for TextCodec {
    type Err = StellarError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "byte" => Ok(Self::Byte),
            "normalized" | "normalised" => Ok(Self::Normalized),
            _ => Err(StellarError::UnsupportedAlgorithm(format!(
                "text codec: {}",
                s
            ))),
        }
    }
}

/// How the Hadamard product is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Materialise the Sylvester matrix, O(N^2)
    Matrix,
    /// In-place Walsh-Hadamard butterfly, O(N log N)
    #[default]
    Fast,
}

impl std::str::FromStr for Transform {
    type Err = StellarError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "matrix" => Ok(Self::Matrix),
            "fast" | "fwht" => Ok(Self::Fast),
            _ => Err(StellarError::UnsupportedAlgorithm(format!(
                "transform: {}",
                s
            ))),
        }
    }
}

/// Scaling applied to the ±1 matrix on both sides of the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// H / sqrt(N): encrypt and decrypt are exact inverses
    #[default]
    Orthonormal,
    /// Raw ±1 entries: decrypt(encrypt(v)) == N * v
    Unnormalized,
}

impl Normalization {
    /// Factor applied to every output element for a transform of order `n`
    pub fn scale(self, n: usize) -> f64 {
        match self {
            Self::Orthonormal => 1.0 / (n as f64).sqrt(),
            Self::Unnormalized => 1.0,
        }
    }
}

impl std::str::FromStr for Normalization {
    type Err = StellarError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "orthonormal" => Ok(Self::Orthonormal),
            "unnormalized" | "none" => Ok(Self::Unnormalized),
            _ => Err(StellarError::UnsupportedAlgorithm(format!(
                "normalization: {}",
                s
            ))),
        }
    }
}

/// Post-decode rescaling of record values
///
/// Divides each value by `divisor` and rounds to `decimals` places. This is a
/// convention of a particular payload layout, never part of the record codec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordRescale {
    pub divisor: f64,
    pub decimals: u32,
}

impl RecordRescale {
    /// The 64-element unnormalized planet payload: divide by 64, keep 4 places
    pub const LEGACY: Self = Self {
        divisor: 64.0,
        decimals: 4,
    };
}

/// Everything that must match between encryption and decryption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub text_codec: TextCodec,
    pub transform: Transform,
    pub normalization: Normalization,
    pub record_rescale: Option<RecordRescale>,
}

impl PipelineConfig {
    /// Serialize config to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Deserialize config from JSON bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
