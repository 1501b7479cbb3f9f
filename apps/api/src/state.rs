use std::sync::Arc;

use tokio::sync::Mutex;

use crate::extract::ResumeExtractor;
use crate::form::session::Session;
use crate::store::KvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one applicant session. There is no authentication and no
    /// multi-user concurrency; every handler goes through this record.
    pub session: Arc<Mutex<Session>>,
    pub store: Arc<dyn KvStore>,
    /// Pluggable document-understanding backend. Default: `GeminiExtractor`;
    /// tests swap in a stub.
    pub extractor: Arc<dyn ResumeExtractor>,
}
