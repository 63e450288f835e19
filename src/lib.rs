//! Stellar - keyed Hadamard transform for text and numeric records
//!
//! Encodes a fixed-schema numeric record and a text message into one vector
//! of floats, pads it to a power of two and applies a keyed Hadamard
//! transform. The transform is linear and offers obfuscation only, not
//! confidentiality.
//!
//! ## Transform Pipeline
//!
//! ```text
//! Record + Text → Encode → Concatenate → Pad (2^k) → H·v + key → Output
//! ```
//!
//! - **Encode**: record values in field order; text through the byte or
//!   normalized codec
//! - **Pad**: zeros up to the next power of two
//! - **Transform**: Sylvester Hadamard matrix (naive or fast), then add the key
//!
//! Decryption runs the same steps backwards with the same configuration,
//! which travels inside the envelope. Only the key is supplied separately.
//!
//! ## Example
//!
//! ```
//! use stellar::{decrypt_payload, encrypt_payload, Key, PipelineConfig, Record};
//!
//! let record: Record = [("mass", 1.0), ("radius", 6371.0)].into_iter().collect();
//! let key = Key::Scalar(42.0);
//!
//! let envelope = encrypt_payload(&record, "Hi", &key, &PipelineConfig::default()).unwrap();
//! let decrypted = decrypt_payload(&envelope, &key).unwrap();
//!
//! assert_eq!(decrypted.message, "Hi");
//! assert!(decrypted.fidelity(&record, "Hi").within(1e-9));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod payload;
pub mod pipeline;
pub mod record;

pub use config::{Normalization, PipelineConfig, RecordRescale, TextCodec, Transform};
pub use error::{EncodingError, Result, ShapeError, StellarError};
pub use key::Key;
pub use payload::{decrypt_payload, encrypt_payload, DecryptedPayload, EncryptedPayload};
pub use record::Record;
