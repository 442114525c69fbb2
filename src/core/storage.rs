use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

use super::config::Config;
use super::utils::ensure_dir;
use crate::api::{BackendError, PromptStore, StoreError};

/// Byte quota used when none is configured (the browser sync-storage limit).
pub const DEFAULT_QUOTA_BYTES: u64 = 102_400;

/// Data for a single, storable prompt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: i64,
    #[serde(default)]
    pub last_used: Option<i64>,
    #[serde(default)]
    pub use_count: u64,
    #[serde(default)]
    pub pinned: bool,
}

/// Fields supplied when creating a prompt. `id` and timestamps are assigned by the store.
#[derive(Clone, Debug, Default)]
pub struct NewPrompt {
    pub title: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewPrompt {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// The fields an update may change. Absent fields leave the stored value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
}

impl PromptPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none() && self.pinned.is_none()
    }

    /// Merge the present fields into `prompt`.
    pub fn apply_to(&self, prompt: &mut Prompt) {
        if let Some(title) = &self.title {
            prompt.title = title.clone();
        }
        if let Some(content) = &self.content {
            prompt.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            prompt.tags = tags.clone();
        }
        if let Some(pinned) = self.pinned {
            prompt.pinned = pinned;
        }
    }
}

/// Bytes used by the stored collection against the store's quota.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageInfo {
    pub bytes_used: u64,
    pub bytes_quota: u64,
}

impl StorageInfo {
    pub fn percentage(&self) -> f64 {
        if self.bytes_quota == 0 {
            return 100.0;
        }
        self.bytes_used as f64 / self.bytes_quota as f64 * 100.0
    }

    pub fn remaining(&self) -> u64 {
        self.bytes_quota.saturating_sub(self.bytes_used)
    }
}

/// Persistence for the single collection of prompts.
///
/// Implementations replace the whole collection on every write; the last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Prompt>, BackendError>;
    async fn set_all(&self, prompts: &[Prompt]) -> Result<(), BackendError>;
    async fn usage(&self) -> Result<StorageInfo, BackendError>;
}

fn check_quota(bytes: &[u8], quota: u64) -> Result<(), BackendError> {
    let needed = bytes.len() as u64;
    if needed > quota {
        return Err(BackendError::QuotaExceeded { needed, quota });
    }
    Ok(())
}

/// Keeps the collection in memory. Usage is measured on its JSON encoding.
pub struct MemoryStore {
    prompts: Mutex<Vec<Prompt>>,
    quota_bytes: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            quota_bytes,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Prompt>>, BackendError> {
        self.prompts
            .lock()
            .map_err(|_| BackendError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Prompt>, BackendError> {
        Ok(self.lock()?.clone())
    }

    async fn set_all(&self, prompts: &[Prompt]) -> Result<(), BackendError> {
        let encoded = serde_json::to_vec(prompts)?;
        check_quota(&encoded, self.quota_bytes)?;
        *self.lock()? = prompts.to_vec();
        Ok(())
    }

    async fn usage(&self) -> Result<StorageInfo, BackendError> {
        let encoded = serde_json::to_vec(&*self.lock()?)?;
        Ok(StorageInfo {
            bytes_used: encoded.len() as u64,
            bytes_quota: self.quota_bytes,
        })
    }
}

/// Stores the collection as a JSON array in a single file.
pub struct JsonFileStore {
    path: PathBuf,
    quota_bytes: u64,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, quota_bytes: u64) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Makes `path` readable by its owner only. A failure is logged, not returned.
async fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await {
            warn!("Could not restrict permissions on {}: {}", path.display(), e);
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn get_all(&self) -> Result<Vec<Prompt>, BackendError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let raw = tokio::fs::read(&self.path).await?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn set_all(&self, prompts: &[Prompt]) -> Result<(), BackendError> {
        let encoded = serde_json::to_vec(prompts)?;
        check_quota(&encoded, self.quota_bytes)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = self.staging_path();
        tokio::fs::write(&staging, &encoded).await?;
        restrict_permissions(&staging).await;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    async fn usage(&self) -> Result<StorageInfo, BackendError> {
        let bytes_used = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        Ok(StorageInfo {
            bytes_used,
            bytes_quota: self.quota_bytes,
        })
    }
}

/// Runtime context holding paths, configuration and the prompt store.
pub struct AppCtx {
    pub base_dir: PathBuf,
    pub config: Config,
    pub store: PromptStore<JsonFileStore>,
}

impl AppCtx {
    /// Resolve the home directory (explicit, or `~/.prompt-recall`), load its
    /// configuration and open the JSON store it points to.
    pub fn init(home: Option<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = match home {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    StoreError::Init("Unable to determine HOME directory".to_string())
                })?;
                PathBuf::from(home).join(".prompt-recall")
            }
        };
        ensure_dir(&base_dir).map_err(StoreError::Init)?;

        let config = Config::load(&base_dir)?;
        let store = PromptStore::new(JsonFileStore::new(
            config.data_path(&base_dir),
            config.quota_bytes,
        ))
        .with_quota_warning(config.quota_warning_percent);

        Ok(Self {
            base_dir,
            config,
            store,
        })
    }
}
