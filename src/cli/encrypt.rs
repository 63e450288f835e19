use crate::config::PipelineConfig;
use crate::error::Result;
use crate::key::Key;
use crate::payload::encrypt_payload;
use crate::record::Record;
use std::path::{Path, PathBuf};

/// Extension appended to an input path when no output is given
pub const ENVELOPE_EXTENSION: &str = ".stellar.json";

/// Options for the encrypt command
#[derive(Debug, Clone)]
pub struct EncryptOptions {
    pub key: Key,
    pub config: PipelineConfig,
}

impl Default for EncryptOptions {
    fn default() -> Self {
        Self {
            key: Key::Scalar(0.0),
            config: PipelineConfig::default(),
        }
    }
}

/// Read a record from a JSON object of numbers, keeping field order
pub fn read_record(path: &Path) -> Result<Record> {
    let data = std::fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// `<input>.stellar.json` next to the input, or `payload.stellar.json`
pub fn default_output_path(input: Option<&Path>) -> PathBuf {
    match input {
        Some(path) => {
            let mut os = path.as_os_str().to_os_string();
            os.push(ENVELOPE_EXTENSION);
            PathBuf::from(os)
        }
        None => PathBuf::from(format!("payload{}", ENVELOPE_EXTENSION)),
    }
}

/// Encrypt a record and message into an envelope file
/// Returns the length of the transformed vector
pub fn encrypt_to_file(
    record: &Record,
    message: &str,
    output_path: &Path,
    options: &EncryptOptions,
) -> Result<usize> {
    let payload = encrypt_payload(record, message, &options.key, &options.config)?;
    payload.write(output_path)?;
    Ok(payload.vector.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::EncryptedPayload;
    use tempfile::tempdir;

    #[test]
    fn test_read_record_keeps_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("planet.json");
        std::fs::write(&path, r#"{"radius": 6371, "mass": 1.0}"#).unwrap();

        let record = read_record(&path).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["radius", "mass"]);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Some(Path::new("data/planet.json"))),
            PathBuf::from("data/planet.json.stellar.json")
        );
        assert_eq!(
            default_output_path(None),
            PathBuf::from("payload.stellar.json")
        );
    }

    #[test]
    fn test_encrypt_to_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.stellar.json");
        let record: Record = [("mass", 1.0), ("radius", 6371.0)].into_iter().collect();
        let options = EncryptOptions {
            key: Key::Scalar(42.0),
            ..Default::default()
        };

        let len = encrypt_to_file(&record, "Hi", &output, &options).unwrap();
        assert_eq!(len, 4);

        let payload = EncryptedPayload::read(&output).unwrap();
        assert_eq!(payload.layout.text_len, 2);
        assert_eq!(payload.vector.len(), 4);
    }
}
