use crate::error::Result;
use crate::key::Key;
use crate::payload::{decrypt_payload, DecryptedPayload, EncryptedPayload};
use std::path::Path;

/// Options for the decrypt command
#[derive(Debug, Clone)]
pub struct DecryptOptions {
    pub key: Key,
}

/// Decrypt an envelope file
/// The configuration comes from the envelope, only the key is supplied.
pub fn decrypt_file(input_path: &Path, options: &DecryptOptions) -> Result<DecryptedPayload> {
    let payload = EncryptedPayload::read(input_path)?;
    decrypt_payload(&payload, &options.key)
}

/// Write `{ "record": {...}, "message": "..." }` as JSON
pub fn write_decrypted(output_path: &Path, decrypted: &DecryptedPayload) -> Result<()> {
    std::fs::write(output_path, serde_json::to_vec_pretty(decrypted)?)?;
    Ok(())
}

/// Human-readable form for the terminal
pub fn format_decrypted(decrypted: &DecryptedPayload) -> String {
    let mut output = String::new();
    output.push_str(&format!("Message: {}\n", decrypted.message));
    output.push_str("Record:\n");
    for (key, value) in decrypted.record.iter() {
        output.push_str(&format!("  {}: {}\n", key, value));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::encrypt::{encrypt_to_file, EncryptOptions};
    use crate::record::Record;
    use tempfile::tempdir;

    fn earth() -> Record {
        [("mass", 1.0), ("radius", 6371.0)].into_iter().collect()
    }

    #[test]
    fn test_decrypt_roundtrip() {
        let dir = tempdir().unwrap();
        let envelope = dir.path().join("earth.stellar.json");
        let options = EncryptOptions {
            key: Key::Scalar(42.0),
            ..Default::default()
        };
        encrypt_to_file(&earth(), "Hi", &envelope, &options).unwrap();

        let decrypted = decrypt_file(
            &envelope,
            &DecryptOptions {
                key: Key::Scalar(42.0),
            },
        )
        .unwrap();
        assert_eq!(decrypted.message, "Hi");
        assert!(decrypted.record.max_abs_diff(&earth()).unwrap() < 1e-9);
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let dir = tempdir().unwrap();
        let envelope = dir.path().join("earth.stellar.json");
        let options = EncryptOptions {
            key: Key::Scalar(42.0),
            ..Default::default()
        };
        encrypt_to_file(&earth(), "Hi", &envelope, &options).unwrap();

        let decrypted = decrypt_file(
            &envelope,
            &DecryptOptions {
                key: Key::Scalar(-42.0),
            },
        )
        .unwrap();
        assert!(!decrypted.fidelity(&earth(), "Hi").within(1e-9));
    }

    #[test]
    fn test_write_and_format() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("plain.json");
        let decrypted = DecryptedPayload {
            record: earth(),
            message: "Hi".into(),
        };
        write_decrypted(&output, &decrypted).unwrap();

        let restored: DecryptedPayload =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(restored, decrypted);

        let text = format_decrypted(&decrypted);
        assert!(text.contains("Message: Hi"));
        assert!(text.contains("  radius: 6371"));
    }
}
