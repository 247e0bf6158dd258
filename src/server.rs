//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::rendering::SvgRenderer;
use crate::services::{AnalyzerService, ContentStore, DocumentService, FsContentStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<AnalyzerService>,
    pub documents: Arc<DocumentService>,
    pub store: Arc<dyn ContentStore>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<AnalyzerService> {
    fn from_ref(state: &AppState) -> Self {
        state.analyzer.clone()
    }
}

impl FromRef<AppState> for Arc<DocumentService> {
    fn from_ref(state: &AppState) -> Self {
        state.documents.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ContentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

/// Create application state writing artifacts under `config.content_dir`.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(config.content_dir.clone()));
    create_app_state_with_store(config, store)
}

/// Create application state with a caller-supplied artifact store.
pub fn create_app_state_with_store(
    config: AppConfig,
    store: Arc<dyn ContentStore>,
) -> anyhow::Result<AppState> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let analyzer = Arc::new(AnalyzerService::from_config(&config.analysis)?);
    let documents = Arc::new(DocumentService::new(
        config.document.clone(),
        config.bucket_palette()?,
        Arc::new(SvgRenderer::new()),
    ));

    tracing::info!(
        policy = %config.analysis.policy,
        filter = %config.analysis.filter,
        page_size = ?config.document.page_size,
        content_dir = %config.content_dir.display(),
        "Application state ready"
    );

    Ok(AppState {
        config: Arc::new(config),
        analyzer,
        documents,
        store,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.analysis.max_upload_bytes;

    Router::new()
        .route("/analyze", post(api::handle_analyze))
        .route("/analyze/styles", post(api::handle_analyze_styles))
        .route("/render", post(api::handle_render))
        .route("/content/:name", get(api::handle_content))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
