//! Shared application state, built once at startup and injected into every
//! handler via axum's `State` extractor.

use std::sync::Arc;

use gateway_config::Config;
use gateway_upstream::UpstreamClient;

/// Everything a handler needs beyond the request itself. Cheap to clone —
/// everything inside is already behind an `Arc` or is plain data, matching
/// the teacher's `ServerState` shape (models/presets/db) but with the
/// gateway's own seams: a config snapshot and the upstream capability
/// interface named in spec §9.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn UpstreamClient>,
}
