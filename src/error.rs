use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pip_grid::GridError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing multipart field: {0}")]
    MissingField(&'static str),

    #[error("Not found")]
    NotFound,

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    ///
    /// Malformed uploads and parameters are the caller's fault; a grid holding
    /// a value outside 0..=6 at render time is treated as a server fault, as
    /// are rendering and storage failures.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Grid(e) => match e {
                GridError::UnknownBucket { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                GridError::InvalidIntensity(_)
                | GridError::InvalidDimensions { .. }
                | GridError::ImageDecode(_)
                | GridError::InvalidLayout(_)
                | GridError::InvalidEnhancement(_)
                | GridError::Palette(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::Render(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Grid(e) => e.to_string(),
            ApiError::Render(e) => e.to_string(),
            ApiError::Storage(e) => e.to_string(),
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("grid_width must be a number".to_string());
        assert_eq!(
            error.to_string(),
            "Bad request: grid_width must be a number"
        );
    }

    #[test]
    fn test_api_error_missing_field() {
        let error = ApiError::MissingField("file");
        assert_eq!(error.to_string(), "Missing multipart field: file");
    }

    #[test]
    fn test_api_error_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_render_error_pdf() {
        let error = RenderError::Pdf("font missing".to_string());
        assert_eq!(error.to_string(), "PDF error: font missing");
    }

    #[test]
    fn test_render_error_pixmap_allocation() {
        assert_eq!(
            RenderError::PixmapAllocation.to_string(),
            "Failed to allocate pixmap"
        );
    }

    #[test]
    fn test_storage_error_invalid_name() {
        let error = StorageError::InvalidName("../etc/passwd".to_string());
        assert_eq!(error.to_string(), "Invalid artifact name: ../etc/passwd");
    }

    #[test]
    fn test_api_error_from_grid_error() {
        let api_error: ApiError = GridError::InvalidLayout("no room".to_string()).into();
        assert!(matches!(api_error, ApiError::Grid(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::MissingField("file").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(GridError::InvalidDimensions {
            width: 0,
            height: 40,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(GridError::ImageDecode("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(GridError::InvalidLayout("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(GridError::UnknownBucket {
            value: 9,
            row: 0,
            col: 0,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Render(RenderError::PixmapAllocation).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
