use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Json},
};
use pip_grid::BucketCounts;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::GridOptions;
use crate::services::AnalyzerService;

/// Multipart upload form
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Image file (PNG, JPEG, GIF, BMP or WebP)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Response from the /analyze endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Rows of bucket values 0..=6, top row first
    pub grid: Vec<Vec<u8>>,
    pub width: usize,
    pub height: usize,
    /// Cells per bucket value, keyed "0" to "6"
    pub counts: BTreeMap<String, u64>,
    /// Total cells (dice)
    pub total: u64,
}

/// One preset's grid in the /analyze/styles response
#[derive(Debug, Serialize, ToSchema)]
pub struct StyleEntry {
    pub style_id: u8,
    pub name: String,
    pub grid: Vec<Vec<u8>>,
}

/// Response from the /analyze/styles endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct StylesResponse {
    pub styles: Vec<StyleEntry>,
}

/// Counts keyed by bucket value, zeros included.
pub fn counts_map(counts: &BucketCounts) -> BTreeMap<String, u64> {
    counts
        .iter()
        .map(|(bucket, n)| (bucket.value().to_string(), n))
        .collect()
}

/// Bytes of the `file` field, or of the first field carrying a file name.
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
        }
        tracing::debug!(size_bytes = bytes.len(), "Upload received");
        return Ok(bytes.to_vec());
    }
    Err(ApiError::MissingField("file"))
}

/// Convert an uploaded image into a dice grid
///
/// The image is converted to luminance, optionally equalized and enhanced,
/// resampled to exactly `grid_width` x `grid_height` cells and bucketed into
/// die faces 0 (darkest) to 6 (brightest).
#[utoipa::path(
    post,
    path = "/analyze",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    params(GridOptions),
    responses(
        (status = 200, description = "Grid built", body = AnalyzeResponse),
        (status = 400, description = "Missing upload, undecodable image or invalid parameters"),
    ),
    tag = "Analysis"
)]
pub async fn handle_analyze(
    State(analyzer): State<Arc<AnalyzerService>>,
    Query(options): Query<GridOptions>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = read_upload(multipart).await?;

    tracing::info!(
        size_bytes = bytes.len(),
        grid_width = ?options.grid_width,
        grid_height = ?options.grid_height,
        preset = ?options.preset,
        "Analyze request received"
    );

    let analysis = analyzer.analyze_blocking(bytes, options).await?;

    Ok(Json(AnalyzeResponse {
        width: analysis.grid.width(),
        height: analysis.grid.height(),
        grid: analysis.grid.to_rows(),
        counts: counts_map(&analysis.counts),
        total: analysis.counts.total(),
    }))
}

/// Build the grid once per style preset
///
/// Returns one grid for every named preset so a client can show them side by
/// side. Enhancement parameters in the query are ignored; size, policy and
/// filter apply to every preset.
#[utoipa::path(
    post,
    path = "/analyze/styles",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    params(GridOptions),
    responses(
        (status = 200, description = "One grid per preset", body = StylesResponse),
        (status = 400, description = "Missing upload, undecodable image or invalid parameters"),
    ),
    tag = "Analysis"
)]
pub async fn handle_analyze_styles(
    State(analyzer): State<Arc<AnalyzerService>>,
    Query(options): Query<GridOptions>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = read_upload(multipart).await?;

    tracing::info!(size_bytes = bytes.len(), "Styles request received");

    let styles = analyzer.analyze_styles_blocking(bytes, options).await?;

    Ok(Json(StylesResponse {
        styles: styles
            .into_iter()
            .map(|s| StyleEntry {
                style_id: s.preset.id(),
                name: s.preset.name().to_string(),
                grid: s.grid.to_rows(),
            })
            .collect(),
    }))
}
