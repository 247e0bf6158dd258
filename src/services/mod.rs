pub mod analyzer;
pub mod document_service;
pub mod storage;

pub use analyzer::{Analysis, AnalyzerService, StyleGrid};
pub use document_service::{
    content_url, normalize_title, DocumentArtifacts, DocumentService, PublishedDocument,
};
pub use storage::{ArtifactKind, ContentStore, FsContentStore, InMemoryStore, StoredArtifact};
