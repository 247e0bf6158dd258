pub mod mosaic;
pub mod pdf;
pub mod svg_to_png;

pub use mosaic::MosaicRenderer;
pub use pdf::PdfRenderer;
pub use svg_to_png::SvgRenderer;
