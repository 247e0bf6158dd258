use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use pip_grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use super::analyze::counts_map;
use crate::error::ApiError;
use crate::models::{AppConfig, RenderLayout};
use crate::services::{content_url, ContentStore, DocumentService};

/// Request body for document rendering
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenderRequest {
    /// Rows of bucket values 0..=6, all the same length
    pub grid: Vec<Vec<i64>>,
    /// Title printed on every page
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub layout: Option<RenderLayout>,
}

/// Response from the /render endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderResponse {
    /// "success"
    pub status: String,
    /// URL of the printable PDF
    pub document_url: String,
    /// URL of the PNG mosaic preview
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Pages in the document, legend included
    pub pages: usize,
    /// Dice per bucket value, keyed "0" to "6"
    pub counts: BTreeMap<String, u64>,
    /// Total dice
    pub total: u64,
    /// RFC 3339 time the document was stored
    pub created_at: String,
}

/// Render a grid as a printable document
///
/// Lays the grid out on pages (optionally split into quadrants), draws a
/// legend with the dice count per value, and stores the PDF and a mosaic
/// preview. Nothing is stored when any part fails.
#[utoipa::path(
    post,
    path = "/render",
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Document rendered and stored", body = RenderResponse),
        (status = 400, description = "Ragged or empty grid, or impossible layout"),
        (status = 500, description = "Grid holds a value outside 0..=6, or rendering failed"),
    ),
    tag = "Documents"
)]
pub async fn handle_render(
    State(config): State<Arc<AppConfig>>,
    State(documents): State<Arc<DocumentService>>,
    State(store): State<Arc<dyn ContentStore>>,
    JsonExtractor(request): JsonExtractor<RenderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let grid = Grid::from_int_rows(request.grid)?;

    tracing::info!(
        project = %request.project_name,
        width = grid.width(),
        height = grid.height(),
        layout = ?request.layout,
        "Render request received"
    );

    let published = documents
        .publish(
            store,
            grid,
            request.project_name,
            request.layout.unwrap_or_default(),
        )
        .await?;

    let base_url = config.public_base_url.as_deref();
    Ok(Json(RenderResponse {
        status: "success".to_string(),
        document_url: content_url(base_url, &published.document.name),
        preview_url: published
            .preview
            .as_ref()
            .map(|p| content_url(base_url, &p.name)),
        pages: published.pages,
        counts: counts_map(&published.counts),
        total: published.counts.total(),
        created_at: published.document.created_at.to_rfc3339(),
    }))
}
