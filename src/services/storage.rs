use crate::error::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

const NAME_LEN: usize = 24;

/// Kinds of artifact the service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Png,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Png => "png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "application/pdf",
            ArtifactKind::Png => "image/png",
        }
    }

    /// Kind of a stored artifact name, `None` for anything this service
    /// could not have generated.
    pub fn from_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.split_once('.')?;
        if stem.len() != NAME_LEN || !stem.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        match ext {
            "pdf" => Some(ArtifactKind::Pdf),
            "png" => Some(ArtifactKind::Png),
            _ => None,
        }
    }
}

/// A stored artifact.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub name: String,
    pub kind: ArtifactKind,
    pub size: usize,
    pub created_at: DateTime<Utc>,
}

/// Generate a fresh artifact name: 24 random alphanumerics plus extension.
pub fn generate_name(kind: ArtifactKind) -> String {
    use rand::Rng;
    let stem: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(NAME_LEN)
        .map(char::from)
        .collect();
    format!("{stem}.{}", kind.extension())
}

fn checked_kind(name: &str) -> Result<ArtifactKind, StorageError> {
    ArtifactKind::from_name(name).ok_or_else(|| StorageError::InvalidName(name.to_string()))
}

/// Trait for rendered artifact storage
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes under a freshly generated name
    async fn put(&self, kind: ArtifactKind, bytes: Vec<u8>) -> Result<StoredArtifact, StorageError>;

    /// Fetch an artifact by name
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove an artifact; `false` when there was nothing to remove
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}

/// Artifacts as files in one directory
pub struct FsContentStore {
    dir: PathBuf,
}

impl FsContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn put(&self, kind: ArtifactKind, bytes: Vec<u8>) -> Result<StoredArtifact, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let name = generate_name(kind);
        let size = bytes.len();
        tokio::fs::write(self.dir.join(&name), bytes).await?;

        tracing::debug!(name = %name, size_bytes = size, dir = %self.dir.display(), "Stored artifact");

        Ok(StoredArtifact {
            name,
            kind,
            size,
            created_at: Utc::now(),
        })
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        checked_kind(name)?;
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        checked_kind(name)?;
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => {
                tracing::debug!(name = %name, "Removed artifact");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory artifact storage
pub struct InMemoryStore {
    artifacts: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            artifacts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn put(&self, kind: ArtifactKind, bytes: Vec<u8>) -> Result<StoredArtifact, StorageError> {
        let name = generate_name(kind);
        let size = bytes.len();
        let mut artifacts = self.artifacts.write().await;
        artifacts.insert(name.clone(), bytes);
        Ok(StoredArtifact {
            name,
            kind,
            size,
            created_at: Utc::now(),
        })
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        checked_kind(name)?;
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.get(name).cloned())
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        checked_kind(name)?;
        Ok(self.artifacts.write().await.remove(name).is_some())
    }
}
