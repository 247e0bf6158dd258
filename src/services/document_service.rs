use crate::error::ApiError;
use crate::models::{DocumentConfig, RenderLayout};
use crate::rendering::{MosaicRenderer, PdfRenderer, SvgRenderer};
use crate::services::storage::{ArtifactKind, ContentStore, StoredArtifact};
use chrono::Utc;
use pip_grid::{BucketCounts, BucketPalette, CellSizing, DocumentRenderer, DocumentStyle, Grid};
use std::sync::Arc;

const DEFAULT_TITLE: &str = "Dice Grid";
const MAX_TITLE_CHARS: usize = 80;

/// Rendered bytes, not yet stored.
#[derive(Debug, Clone)]
pub struct DocumentArtifacts {
    pub pdf: Vec<u8>,
    pub preview: Option<Vec<u8>>,
    pub pages: usize,
    pub counts: BucketCounts,
}

/// Stored document and preview.
#[derive(Debug, Clone)]
pub struct PublishedDocument {
    pub document: StoredArtifact,
    pub preview: Option<StoredArtifact>,
    pub pages: usize,
    pub counts: BucketCounts,
}

/// Renders grids to PDF documents and PNG previews
pub struct DocumentService {
    config: DocumentConfig,
    palette: BucketPalette,
    pdf: PdfRenderer,
    svg: Arc<SvgRenderer>,
}

impl DocumentService {
    pub fn new(config: DocumentConfig, palette: BucketPalette, svg: Arc<SvgRenderer>) -> Self {
        Self {
            config,
            palette,
            pdf: PdfRenderer::new(),
            svg,
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    fn style(&self, layout: &RenderLayout) -> DocumentStyle {
        let mut style = self.config.style();
        if let Some(ghost) = layout.ghost_quadrants {
            style.ghost_quadrants = ghost;
        }
        if let Some(instructions) = layout.instructions {
            style.instructions = instructions;
        }
        style
    }

    fn layout_options(&self, layout: &RenderLayout) -> pip_grid::LayoutOptions {
        let mut options = self.config.layout_options();
        if let Some(page_size) = layout.page_size {
            options.geometry = page_size
                .geometry()
                .margin(self.config.margin)
                .header_height(self.config.header_height);
        }
        if let Some(size) = layout.cell_size {
            options.sizing = CellSizing::Fixed(size);
        }
        if let Some(quadrants) = layout.quadrants {
            options.quadrants = quadrants;
        }
        options
    }

    /// Render the PDF (and optionally the preview) for `grid`.
    ///
    /// Nothing is produced unless the whole document renders.
    pub fn render(
        &self,
        grid: &Grid,
        project_name: &str,
        layout: &RenderLayout,
    ) -> Result<DocumentArtifacts, ApiError> {
        let title = normalize_title(project_name);
        let renderer = DocumentRenderer::new(self.palette.clone(), self.style(layout));
        let mut drawing = renderer.render(grid, &title, &self.layout_options(layout))?;
        drawing.title = format!("{title} ({})", Utc::now().format("%Y-%m-%d"));

        let pdf = self.pdf.render(&drawing)?;

        let preview = if layout.preview.unwrap_or(true) {
            let mosaic = MosaicRenderer::new(self.palette.clone(), self.config.preview_cell_pixels);
            let svg = mosaic.to_svg(grid)?;
            Some(self.svg.render_png(svg.as_bytes())?)
        } else {
            None
        };

        tracing::info!(
            title = %title,
            width = grid.width(),
            height = grid.height(),
            pages = drawing.page_count(),
            preview = preview.is_some(),
            "Document rendered"
        );

        Ok(DocumentArtifacts {
            pdf,
            preview,
            pages: drawing.page_count(),
            counts: drawing.counts,
        })
    }

    /// Render in a blocking context, then store the artifacts.
    pub async fn publish(
        self: Arc<Self>,
        store: Arc<dyn ContentStore>,
        grid: Grid,
        project_name: String,
        layout: RenderLayout,
    ) -> Result<PublishedDocument, ApiError> {
        let artifacts = tokio::task::spawn_blocking(move || {
            self.render(&grid, &project_name, &layout)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

        let document = store.put(ArtifactKind::Pdf, artifacts.pdf).await?;
        let preview = match artifacts.preview {
            Some(png) => match store.put(ArtifactKind::Png, png).await {
                Ok(stored) => Some(stored),
                Err(e) => {
                    // The document alone is not a result
                    if let Err(cleanup) = store.delete(&document.name).await {
                        tracing::warn!(
                            document = %document.name,
                            error = %cleanup,
                            "Failed to remove document after preview store failure"
                        );
                    }
                    return Err(e.into());
                }
            },
            None => None,
        };

        tracing::info!(
            document = %document.name,
            document_bytes = document.size,
            preview = ?preview.as_ref().map(|p| p.name.as_str()),
            "Document stored"
        );

        Ok(PublishedDocument {
            document,
            preview,
            pages: artifacts.pages,
            counts: artifacts.counts,
        })
    }
}

/// Trimmed, length-capped title; a default when blank.
pub fn normalize_title(project_name: &str) -> String {
    let trimmed = project_name.trim();
    if trimmed.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    trimmed.chars().take(MAX_TITLE_CHARS).collect()
}

/// Public URL for a stored artifact.
pub fn content_url(base_url: Option<&str>, name: &str) -> String {
    match base_url {
        Some(base) => format!("{}/content/{name}", base.trim_end_matches('/')),
        None => format!("/content/{name}"),
    }
}
