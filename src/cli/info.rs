use crate::error::Result;
use crate::payload::EncryptedPayload;
use std::path::Path;

/// Display information about an envelope file
pub fn show_info(path: &Path) -> Result<String> {
    let payload = EncryptedPayload::read(path)?;
    let config = &payload.config;
    let layout = &payload.layout;

    let mut output = String::new();

    output.push_str("Stellar Envelope Information\n");
    output.push_str("============================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Version: {}\n", payload.version));
    output.push('\n');

    output.push_str("Configuration:\n");
    output.push_str(&format!("  Text codec: {:?}\n", config.text_codec));
    output.push_str(&format!("  Transform: {:?}\n", config.transform));
    output.push_str(&format!("  Normalization: {:?}\n", config.normalization));
    match config.record_rescale {
        Some(r) => output.push_str(&format!(
            "  Record rescale: divide by {}, {} decimals\n",
            r.divisor, r.decimals
        )),
        None => output.push_str("  Record rescale: none\n"),
    }
    output.push('\n');

    output.push_str("Layout:\n");
    output.push_str(&format!("  Record fields: {}\n", layout.record_keys.len()));
    for key in &layout.record_keys {
        output.push_str(&format!("    - {}\n", key));
    }
    output.push_str(&format!("  Text elements: {}\n", layout.text_len));
    output.push_str(&format!(
        "  Padding: {}\n",
        layout
            .combined_len()
            .map_or(0, |len| layout.padded_len.saturating_sub(len))
    ));
    output.push_str(&format!("  Vector length: {}\n", payload.vector.len()));
    output.push('\n');

    output.push_str("Key:\n");
    output.push_str("  Scalar, or a vector of exactly the vector length.\n");
    output.push_str("  A wrong key is not detected; it yields wrong values.\n");

    Ok(output)
}
