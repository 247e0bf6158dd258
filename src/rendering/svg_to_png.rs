use crate::error::RenderError;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Rasterizes SVG previews to optimized RGB PNGs.
pub struct SvgRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
    /// Longest edge of a rendered PNG, in pixels
    max_edge: u32,
}

impl SvgRenderer {
    pub const DEFAULT_MAX_EDGE: u32 = 4096;

    /// Create a renderer with system fonts loaded
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for SVG text rendering"
        );

        Self {
            fontdb: Arc::new(fontdb),
            max_edge: Self::DEFAULT_MAX_EDGE,
        }
    }

    /// Cap the longest edge of rendered images.
    pub fn max_edge(mut self, max_edge: u32) -> Self {
        self.max_edge = max_edge.max(1);
        self
    }

    /// Render SVG to PNG at its natural size, scaled down to fit `max_edge`.
    pub fn render_png(&self, svg_data: &[u8]) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg_data)?;
        let (width, height) = (pixmap.width(), pixmap.height());

        // Background is opaque, so the premultiplied RGBA is plain RGB plus alpha
        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        // Encode PNG (fast settings, oxipng re-compresses)
        let png_bytes = encode_png(width, height, &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        tracing::debug!(
            width = width,
            height = height,
            size_bytes = optimized.len(),
            "Preview rasterized"
        );
        Ok(optimized)
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg_data: &[u8]) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let longest = svg_size.width().max(svg_size.height());
        let scale = (self.max_edge as f32 / longest).min(1.0);

        let width = ((svg_size.width() * scale).round() as u32).max(1);
        let height = ((svg_size.height() * scale).round() as u32).max(1);

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(
            &tree,
            Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode 8-bit RGB pixel data as a PNG.
fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
