use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{ApiError, StorageError};
use crate::services::{ArtifactKind, ContentStore};

/// Download a stored document or preview
///
/// Names are the ones returned by `/render`. Anything else is a 404.
#[utoipa::path(
    get,
    path = "/content/{name}",
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 200, description = "PNG preview", content_type = "image/png"),
        (status = 404, description = "No such artifact"),
    ),
    params(
        ("name" = String, Path, description = "Artifact name, e.g. 'Xk3...Qz.pdf'"),
    ),
    tag = "Documents"
)]
pub async fn handle_content(
    State(store): State<Arc<dyn ContentStore>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let Some(kind) = ArtifactKind::from_name(&name) else {
        tracing::debug!(name = %name, "Rejected artifact name");
        return Err(ApiError::NotFound);
    };

    let bytes = match store.get(&name).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) | Err(StorageError::InvalidName(_)) => return Err(ApiError::NotFound),
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(name = %name, size_bytes = bytes.len(), "Serving artifact");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, kind.content_type().to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{name}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}
