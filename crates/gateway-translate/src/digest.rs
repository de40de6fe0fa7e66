use sha2::{Digest, Sha256};

/// Synthesizes the per-model digest the Ollama wire shape expects, per
/// spec §4.2.1 step 4. The upstream listing carries no real digest; this
/// one is a gateway invention, but it is deterministic over the model id
/// so repeated calls are byte-identical (invariant I8, law L2).
pub fn synthesize(model_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"openai:");
    hasher.update(model_id.as_bytes());
    let digest = hasher.finalize();
    let hex = hex_encode(&digest);
    format!("sha256:{}", &hex[..12])
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        assert_eq!(synthesize("gpt-4"), synthesize("gpt-4"));
    }

    #[test]
    fn has_expected_shape() {
        let digest = synthesize("gpt-3.5-turbo");
        assert!(digest.starts_with("sha256:"));
        assert_eq!(digest.len(), "sha256:".len() + 12);
    }

    #[test]
    fn differs_across_models() {
        assert_ne!(synthesize("gpt-4"), synthesize("gpt-3.5-turbo"));
    }
}
