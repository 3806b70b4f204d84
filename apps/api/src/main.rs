mod bom;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod suppliers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bom::pipeline::{RandomPicker, ResolutionPipeline};
use crate::bom::samples::SampleLibrary;
use crate::config::Config;
use crate::llm_client::{LlmClient, ModelAdapter};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suppliers::SupplierDirectory;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BOMForge API v{}", env!("CARGO_PKG_VERSION"));

    // Sample library and supplier directory are embedded, immutable data.
    let library = SampleLibrary::get();
    info!("Sample library loaded: {} entries", library.len());

    let suppliers = SupplierDirectory::get();
    info!("Supplier directory loaded: {} suppliers", suppliers.all().len());

    // Without credentials the pipeline serves sample data only.
    let adapter: Option<Arc<dyn ModelAdapter>> = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmClient::new(key.clone())))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; running in sample-data fallback mode");
            None
        }
    };

    let pipeline = Arc::new(ResolutionPipeline::new(
        library,
        adapter,
        Arc::new(RandomPicker),
    ));

    let state = AppState {
        config: config.clone(),
        pipeline,
        suppliers,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
