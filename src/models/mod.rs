pub mod config;
pub mod request;

pub use config::{AnalysisConfig, AppConfig, ConfigError, DocumentConfig, PageSize};
pub use request::{GridOptions, RenderLayout};
