use std::sync::Arc;

use crate::bom::pipeline::ResolutionPipeline;
use crate::config::Config;
use crate::suppliers::SupplierDirectory;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is read-only after startup; requests share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings; kept on state for handlers that grow a need for
    /// them, nothing reads it today.
    #[allow(dead_code)]
    pub config: Config,
    pub pipeline: Arc<ResolutionPipeline>,
    pub suppliers: &'static SupplierDirectory,
}
