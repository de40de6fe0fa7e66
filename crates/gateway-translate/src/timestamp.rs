use chrono::{Local, TimeZone};

/// Formats an epoch-seconds timestamp as RFC 3339 with the gateway's local
/// timezone offset (invariant I2). Falls back to the Unix epoch if the
/// upstream backend ever reports an out-of-range timestamp.
pub fn rfc3339_local(epoch_secs: i64) -> String {
    Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .unwrap_or_else(|| Local.timestamp_opt(0, 0).unwrap())
        .to_rfc3339()
}

/// The current instant, formatted the same way, for `created_at` fields on
/// unary responses and streaming frames.
pub fn rfc3339_now() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `modified_at`/`created_at` MUST carry an explicit numeric offset
    /// (invariant I2) — a bare `Z` suffix is not acceptable here.
    fn has_explicit_numeric_offset(ts: &str) -> bool {
        let tail = &ts[ts.len().saturating_sub(6)..];
        (tail.starts_with('+') || tail.starts_with('-')) && tail.contains(':')
    }

    #[test]
    fn carries_explicit_offset() {
        assert!(has_explicit_numeric_offset(&rfc3339_local(1_680_000_000)));
        assert!(has_explicit_numeric_offset(&rfc3339_now()));
    }

    #[test]
    fn is_deterministic_over_input() {
        assert_eq!(rfc3339_local(1_680_000_000), rfc3339_local(1_680_000_000));
    }
}
