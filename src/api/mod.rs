pub mod analyze;
pub mod content;
pub mod render;

pub use analyze::{__path_handle_analyze, __path_handle_analyze_styles};
pub use analyze::{
    handle_analyze, handle_analyze_styles, AnalyzeResponse, StyleEntry, StylesResponse,
    UploadForm,
};
pub use content::{handle_content, __path_handle_content};
pub use render::{handle_render, RenderRequest, RenderResponse, __path_handle_render};
