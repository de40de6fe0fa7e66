use rand::Rng;
use std::fmt;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const LEN: usize = 8;

/// An opaque 8-character token attached to every log record produced while
/// handling one request. Has no effect on business logic — purely for
/// tying together the "metadata log record" entries the resilience layer
/// and router both emit for the same request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let token: String = (0..LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    /// Adopts a caller-supplied id (e.g. from an inbound `X-Request-Id`
    /// header) verbatim, trimmed to a sane length so a hostile client can't
    /// bloat every log line that follows.
    pub fn from_caller(raw: &str) -> Self {
        let trimmed: String = raw.chars().take(64).collect();
        if trimmed.is_empty() {
            Self::new()
        } else {
            Self(trimmed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_eight_char_tokens() {
        let id = CorrelationId::new();
        assert_eq!(id.as_str().len(), LEN);
    }

    #[test]
    fn adopts_caller_id() {
        let id = CorrelationId::from_caller("req-123");
        assert_eq!(id.as_str(), "req-123");
    }

    #[test]
    fn falls_back_when_caller_id_empty() {
        let id = CorrelationId::from_caller("");
        assert_eq!(id.as_str().len(), LEN);
    }
}
