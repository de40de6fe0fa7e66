//! The Model Registry: a read-only, in-process table of known model
//! identifiers plus default-size heuristics for unknown ones. Immutable
//! after construction; safe for unsynchronized concurrent reads.

use once_cell::sync::Lazy;

/// The category a model belongs to, used to pick a size heuristic for
/// identifiers the registry doesn't know by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCategory {
    Chat,
    Embedding,
}

/// Metadata the registry knows about one specific model identifier.
#[derive(Debug, Clone, Copy)]
pub struct ModelRegistryEntry {
    pub id: &'static str,
    pub category: ModelCategory,
    pub size: u64,
    pub context_length: u32,
}

/// Prefixes a model identifier must start with (case-insensitively) to be
/// listed in `/api/tags` at all, per spec §4.2.1 step 6.
const INCLUDED_PREFIXES: &[&str] = &["gpt-", "chatgpt-", "text-embedding-", "o1-", "o3-"];

/// Substrings that exclude a model from `/api/tags` unless it is one of the
/// registry's explicitly known identifiers, per spec §4.2.1 step 5.
const EXCLUDED_SUBSTRINGS: &[&str] = &[
    "davinci",
    "curie",
    "babbage",
    "ada",
    "instruct",
    "deprecated",
    "preview",
];

/// Default byte size to report for a model of this category when the
/// identifier isn't in the registry's known table, per spec §4.2.1 step 3.
const EMBEDDING_DEFAULT_SIZE: u64 = 500_000_000;
const GPT4_FAMILY_DEFAULT_SIZE: u64 = 20_000_000_000;
const GPT35_FAMILY_DEFAULT_SIZE: u64 = 1_500_000_000;
const OTHER_DEFAULT_SIZE: u64 = 1_000_000_000;

static KNOWN_MODELS: Lazy<Vec<ModelRegistryEntry>> = Lazy::new(|| {
    vec![
        ModelRegistryEntry {
            id: "gpt-4o",
            category: ModelCategory::Chat,
            size: GPT4_FAMILY_DEFAULT_SIZE,
            context_length: 128_000,
        },
        ModelRegistryEntry {
            id: "gpt-4o-mini",
            category: ModelCategory::Chat,
            size: 8_000_000_000,
            context_length: 128_000,
        },
        ModelRegistryEntry {
            id: "gpt-4-turbo",
            category: ModelCategory::Chat,
            size: GPT4_FAMILY_DEFAULT_SIZE,
            context_length: 128_000,
        },
        ModelRegistryEntry {
            id: "gpt-4",
            category: ModelCategory::Chat,
            size: GPT4_FAMILY_DEFAULT_SIZE,
            context_length: 8_192,
        },
        ModelRegistryEntry {
            id: "gpt-3.5-turbo",
            category: ModelCategory::Chat,
            size: GPT35_FAMILY_DEFAULT_SIZE,
            context_length: 16_385,
        },
        ModelRegistryEntry {
            id: "o1-mini",
            category: ModelCategory::Chat,
            size: GPT35_FAMILY_DEFAULT_SIZE,
            context_length: 128_000,
        },
        ModelRegistryEntry {
            id: "o1-preview",
            category: ModelCategory::Chat,
            size: GPT4_FAMILY_DEFAULT_SIZE,
            context_length: 128_000,
        },
        ModelRegistryEntry {
            id: "o3-mini",
            category: ModelCategory::Chat,
            size: GPT35_FAMILY_DEFAULT_SIZE,
            context_length: 200_000,
        },
        ModelRegistryEntry {
            id: "text-embedding-3-small",
            category: ModelCategory::Embedding,
            size: 100_000_000,
            context_length: 8_191,
        },
        ModelRegistryEntry {
            id: "text-embedding-3-large",
            category: ModelCategory::Embedding,
            size: 1_200_000_000,
            context_length: 8_191,
        },
        ModelRegistryEntry {
            id: "text-embedding-ada-002",
            category: ModelCategory::Embedding,
            size: EMBEDDING_DEFAULT_SIZE,
            context_length: 8_191,
        },
    ]
});

fn find(id: &str) -> Option<&'static ModelRegistryEntry> {
    KNOWN_MODELS.iter().find(|e| e.id.eq_ignore_ascii_case(id))
}

fn guess_category(id: &str) -> ModelCategory {
    let lower = id.to_ascii_lowercase();
    if lower.starts_with("text-embedding-") {
        ModelCategory::Embedding
    } else {
        ModelCategory::Chat
    }
}

/// Returns the category of a model, falling back to a name-based guess for
/// unknown identifiers.
pub fn category(id: &str) -> ModelCategory {
    find(id).map(|e| e.category).unwrap_or_else(|| guess_category(id))
}

/// Returns the nominal byte size to report for a model, applying the
/// category-based default heuristic from spec §4.2.1 step 3 when the
/// identifier is unknown.
pub fn size(id: &str) -> u64 {
    if let Some(entry) = find(id) {
        return entry.size;
    }
    let lower = id.to_ascii_lowercase();
    match guess_category(id) {
        ModelCategory::Embedding => EMBEDDING_DEFAULT_SIZE,
        ModelCategory::Chat if lower.starts_with("gpt-4") => GPT4_FAMILY_DEFAULT_SIZE,
        ModelCategory::Chat if lower.starts_with("gpt-3.5") => GPT35_FAMILY_DEFAULT_SIZE,
        ModelCategory::Chat => OTHER_DEFAULT_SIZE,
    }
}

/// Returns the known context window length in tokens, if the registry has
/// an entry for this identifier.
pub fn context_length(id: &str) -> Option<u32> {
    find(id).map(|e| e.context_length)
}

/// Returns true if this identifier is explicitly known to the registry
/// (used to override the substring exclusion filter, per spec §4.2.1
/// step 5: explicitly-known models are never excluded).
pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

/// Prefixes of model identifiers known to accept multi-modal (image)
/// content parts upstream. Used by the Translator to decide whether an
/// image-bearing chat message can be forwarded or must be rejected (spec
/// §4.2.3) — the wire shapes in spec.md don't name a capability table for
/// this, so this list is this gateway's own judgment call, kept here next
/// to the rest of the per-model metadata rather than hardcoded in the
/// Translator.
const VISION_CAPABLE_PREFIXES: &[&str] = &["gpt-4o", "gpt-4-turbo", "gpt-4-vision"];

/// Returns true if this model is known to accept image content parts.
pub fn supports_images(id: &str) -> bool {
    let lower = id.to_ascii_lowercase();
    VISION_CAPABLE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Returns true if a model identifier should appear in `/api/tags`, per
/// the inclusion/exclusion rules of spec §4.2.1 steps 5-6.
pub fn included(id: &str) -> bool {
    let lower = id.to_ascii_lowercase();

    if !is_known(id) {
        let excluded = EXCLUDED_SUBSTRINGS.iter().any(|s| lower.contains(s));
        if excluded {
            return false;
        }
    }

    INCLUDED_PREFIXES.iter().any(|p| lower.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_reports_its_own_size() {
        assert_eq!(size("gpt-3.5-turbo"), GPT35_FAMILY_DEFAULT_SIZE);
    }

    #[test]
    fn unknown_gpt4_family_gets_family_default() {
        assert_eq!(size("gpt-4-exotic"), GPT4_FAMILY_DEFAULT_SIZE);
    }

    #[test]
    fn unknown_embedding_gets_embedding_default() {
        assert_eq!(size("text-embedding-custom"), EMBEDDING_DEFAULT_SIZE);
    }

    #[test]
    fn unknown_other_gets_other_default() {
        assert_eq!(size("chatgpt-4o-latest"), OTHER_DEFAULT_SIZE);
    }

    #[test]
    fn excludes_deprecated_substring_matches() {
        assert!(!included("gpt-3-deprecated"));
        assert!(!included("davinci-002"));
    }

    #[test]
    fn known_model_survives_substring_exclusion() {
        // "ada" is an excluded substring but this id is explicitly known.
        assert!(included("text-embedding-ada-002"));
    }

    #[test]
    fn requires_included_prefix() {
        assert!(!included("llama-3"));
        assert!(included("gpt-4o"));
        assert!(included("o1-preview"));
    }

    #[test]
    fn case_insensitive_matching() {
        assert!(included("GPT-4O"));
        assert!(!included("DAVINCI-002"));
    }

    #[test]
    fn vision_capable_models_support_images() {
        assert!(supports_images("gpt-4o"));
        assert!(supports_images("gpt-4-turbo"));
    }

    #[test]
    fn text_only_models_reject_images() {
        assert!(!supports_images("gpt-3.5-turbo"));
        assert!(!supports_images("text-embedding-3-small"));
    }
}
