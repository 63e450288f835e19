use thiserror::Error;

/// Two operands whose lengths must agree do not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("vector length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("key length {actual} does not match data length {expected}")]
    KeyLength { expected: usize, actual: usize },

    #[error("vector of length {len} cannot be multiplied by a matrix of order {order}")]
    MatrixOrder { order: usize, len: usize },

    #[error("{keys} record keys supplied for a vector of length {values}")]
    RecordKeys { keys: usize, values: usize },

    #[error("cannot pad a vector of length {len} down to {target}")]
    PadTarget { len: usize, target: usize },

    #[error("cannot unpad a vector of length {len} to original length {original}")]
    UnpadLength { len: usize, original: usize },

    #[error("payload vector has length {actual}, layout expects {expected}")]
    Payload { expected: usize, actual: usize },

    #[error("{record} record fields and {text} text elements do not fit in {padded} elements")]
    Layout {
        record: usize,
        text: usize,
        padded: usize,
    },
}

/// A decoded vector does not describe valid text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("value {value} at index {index} is not a Unicode scalar value")]
    InvalidScalar { index: usize, value: f64 },

    #[error("transformed value at index {index} is not finite")]
    NonFinite { index: usize },
}

#[derive(Error, Debug)]
pub enum StellarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u32),
}

impl StellarError {
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }
}

pub type Result<T> = std::result::Result<T, StellarError>;
