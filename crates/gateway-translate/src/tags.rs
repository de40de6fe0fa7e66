use gateway_core::upstream::UpstreamModelInfo;
use gateway_core::wire::{ModelEntry, TagsResponse};

use crate::digest;
use crate::timestamp;

/// Converts the upstream backend's model listing into the Ollama
/// `/api/tags` shape, per spec §4.2.1. Pure and deterministic given the
/// same input and local timezone (law L2): filtering, size/digest
/// synthesis and sort order never depend on anything but the model id.
pub fn translate_tags(models: &[UpstreamModelInfo]) -> TagsResponse {
    let mut entries: Vec<ModelEntry> = models
        .iter()
        .filter(|m| gateway_registry::included(&m.id))
        .map(|m| ModelEntry {
            name: m.id.clone(),
            model: m.id.clone(),
            modified_at: timestamp::rfc3339_local(m.created),
            size: gateway_registry::size(&m.id),
            digest: digest::synthesize(&m.id),
            details: None,
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    TagsResponse { models: entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, created: i64) -> UpstreamModelInfo {
        UpstreamModelInfo { id: id.to_string(), created }
    }

    #[test]
    fn empty_list_yields_empty_models() {
        let resp = translate_tags(&[]);
        assert!(resp.models.is_empty());
    }

    #[test]
    fn name_equals_model_on_every_entry() {
        let resp = translate_tags(&[model("gpt-4o", 1_680_000_000)]);
        for entry in &resp.models {
            assert_eq!(entry.name, entry.model);
        }
    }

    #[test]
    fn filters_excluded_and_unprefixed_ids() {
        let resp = translate_tags(&[
            model("gpt-4o", 1_680_000_000),
            model("davinci-002", 1_680_000_000),
            model("llama-3", 1_680_000_000),
        ]);
        let names: Vec<&str> = resp.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["gpt-4o"]);
    }

    #[test]
    fn sorts_lexicographically_by_name() {
        let resp = translate_tags(&[
            model("gpt-4o", 1_680_000_004),
            model("gpt-3.5-turbo", 1_680_000_000),
        ]);
        let names: Vec<&str> = resp.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["gpt-3.5-turbo", "gpt-4o"]);
    }

    #[test]
    fn scenario_two_known_models() {
        let resp = translate_tags(&[
            model("gpt-3.5-turbo", 1_680_000_000),
            model("text-embedding-3-small", 1_680_000_004),
        ]);
        assert_eq!(resp.models.len(), 2);
        assert_eq!(resp.models[0].name, "gpt-3.5-turbo");
        assert_eq!(resp.models[0].size, 1_500_000_000);
        assert_eq!(resp.models[1].name, "text-embedding-3-small");
        assert_eq!(resp.models[1].size, 100_000_000);
    }
}
