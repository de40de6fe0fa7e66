use gateway_core::upstream::UpstreamEmbedParams;
use gateway_core::wire::{EmbedRequest, EmbedResponse};

/// Converts an `EmbedRequest` into upstream embedding parameters, per spec
/// §4.2.4. The Ollama shape takes a single string prompt even though the
/// upstream API accepts arrays.
pub fn translate_embed(req: &EmbedRequest) -> UpstreamEmbedParams {
    UpstreamEmbedParams {
        model: req.model.clone(),
        input: req.effective_prompt().to_string(),
    }
}

/// Wraps the upstream embedding vector in the Ollama shape. Length is
/// never altered (invariant I6).
pub fn build_embed_response(embedding: Vec<f32>) -> EmbedResponse {
    EmbedResponse { embedding }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_prompt_as_single_input_string() {
        let req = EmbedRequest {
            model: "text-embedding-3-small".to_string(),
            prompt: "foo".to_string(),
            input: None,
        };
        let params = translate_embed(&req);
        assert_eq!(params.input, "foo");
    }

    #[test]
    fn preserves_embedding_length_exactly() {
        let vector = vec![0.0_f32; 3072];
        let resp = build_embed_response(vector);
        assert_eq!(resp.embedding.len(), 3072);
    }
}
