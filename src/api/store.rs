//! The main entry point for reading and changing the prompt collection.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::core::storage::{NewPrompt, Prompt, PromptPatch, RecordStore, StorageInfo};
use crate::core::utils::{default_title, new_id, now_millis};
use crate::core::view::{compute_view, filter_by_query, SortMode};

use super::error::StoreError;

/// CRUD operations over a [`RecordStore`].
///
/// Every mutation reads the whole collection, changes it in memory and writes
/// it back. Reads used for display ([`all`](Self::all), [`search`](Self::search),
/// [`view`](Self::view)) degrade to an empty list when the store cannot be read;
/// everything else propagates the failure.
pub struct PromptStore<S: RecordStore> {
    records: S,
    quota_warning_percent: f64,
}

/// Shape accepted for each element of an import payload.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedPrompt {
    #[serde(default)]
    title: Option<String>,
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    last_used: Option<i64>,
    #[serde(default)]
    use_count: u64,
    #[serde(default)]
    pinned: bool,
}

impl ImportedPrompt {
    fn into_prompt(self, now: i64) -> Prompt {
        let created_at = self.created_at.unwrap_or(now);
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => default_title(&self.content),
        };
        Prompt {
            id: new_id(),
            title,
            content: self.content,
            tags: self.tags,
            created_at,
            last_used: self.last_used.map(|t| t.max(created_at)),
            use_count: self.use_count,
            pinned: self.pinned,
        }
    }
}

impl<S: RecordStore> PromptStore<S> {
    pub fn new(records: S) -> Self {
        Self {
            records,
            quota_warning_percent: 90.0,
        }
    }

    /// Usage percentage above which a write logs a warning.
    pub fn with_quota_warning(mut self, percent: f64) -> Self {
        self.quota_warning_percent = percent;
        self
    }

    /// The underlying record store.
    pub fn records(&self) -> &S {
        &self.records
    }

    /// Every stored prompt, or the backend error.
    pub async fn try_all(&self) -> Result<Vec<Prompt>, StoreError> {
        Ok(self.records.get_all().await?)
    }

    /// Every stored prompt. A read failure is logged and yields an empty list.
    pub async fn all(&self) -> Vec<Prompt> {
        self.try_all().await.unwrap_or_else(|e| {
            warn!("Could not read prompts, showing none: {}", e);
            Vec::new()
        })
    }

    pub async fn get(&self, id: &str) -> Result<Prompt, StoreError> {
        self.try_all()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Stores a new prompt. Blank content is rejected; a blank or missing title
    /// is derived from the content.
    pub async fn create(&self, new: NewPrompt) -> Result<Prompt, StoreError> {
        if new.content.trim().is_empty() {
            return Err(StoreError::Validation("Content is required".to_string()));
        }

        let mut prompts = self.try_all().await?;
        let title = match new.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => default_title(&new.content),
        };
        let prompt = Prompt {
            id: self.unused_id(&prompts),
            title,
            content: new.content,
            tags: new.tags,
            created_at: now_millis(),
            last_used: None,
            use_count: 0,
            pinned: false,
        };

        prompts.push(prompt.clone());
        self.persist(&prompts, "create").await?;
        debug!(id = %prompt.id, "prompt created");
        Ok(prompt)
    }

    /// Merges `patch` into the prompt with `id` and returns the result.
    pub async fn update(&self, id: &str, patch: &PromptPatch) -> Result<Prompt, StoreError> {
        if let Some(content) = &patch.content {
            if content.trim().is_empty() {
                return Err(StoreError::Validation("Content is required".to_string()));
            }
        }

        let mut prompts = self.try_all().await?;
        let prompt = prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        patch.apply_to(prompt);
        if prompt.title.trim().is_empty() {
            prompt.title = default_title(&prompt.content);
        }
        let updated = prompt.clone();

        self.persist(&prompts, "update").await?;
        debug!(id, "prompt updated");
        Ok(updated)
    }

    /// Removes the prompt with `id`. Returns `false`, without writing, when no
    /// such prompt exists.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut prompts = self.try_all().await?;
        let before = prompts.len();
        prompts.retain(|p| p.id != id);
        if prompts.len() == before {
            debug!(id, "delete skipped, prompt not found");
            return Ok(false);
        }

        self.persist(&prompts, "delete").await?;
        debug!(id, "prompt deleted");
        Ok(true)
    }

    /// Records one use: bumps the use count and stamps `last_used`.
    pub async fn mark_used(&self, id: &str) -> Result<Prompt, StoreError> {
        let mut prompts = self.try_all().await?;
        let prompt = prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        prompt.use_count = prompt.use_count.saturating_add(1);
        prompt.last_used = Some(now_millis().max(prompt.created_at));
        let used = prompt.clone();

        self.persist(&prompts, "mark used").await?;
        debug!(id, use_count = used.use_count, "prompt marked as used");
        Ok(used)
    }

    /// Empties the collection.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.persist(&[], "clear").await?;
        debug!("all prompts cleared");
        Ok(())
    }

    /// The whole collection as a pretty-printed JSON array.
    pub async fn export(&self) -> Result<String, StoreError> {
        let prompts = self.try_all().await?;
        let json = serde_json::to_string_pretty(&prompts).map_err(|e| {
            StoreError::Validation(format!("Prompts could not be serialized: {}", e))
        })?;
        debug!(count = prompts.len(), "prompts exported");
        Ok(json)
    }

    /// Adds the prompts in `json` (a JSON array) to the collection, or replaces
    /// the collection when `merge` is false. Every imported prompt gets a new ID.
    /// Returns the size of the resulting collection.
    pub async fn import(&self, json: &str, merge: bool) -> Result<usize, StoreError> {
        let payload: Value = serde_json::from_str(json)
            .map_err(|e| StoreError::Validation(format!("Invalid JSON: {}", e)))?;
        let Value::Array(items) = payload else {
            return Err(StoreError::Validation(
                "Invalid format: expected an array of prompts".to_string(),
            ));
        };

        let now = now_millis();
        let mut incoming = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let imported: ImportedPrompt = serde_json::from_value(item).map_err(|e| {
                StoreError::Validation(format!("Prompt #{} is not usable: {}", index + 1, e))
            })?;
            incoming.push(imported.into_prompt(now));
        }

        let mut prompts = if merge { self.try_all().await? } else { Vec::new() };
        let added = incoming.len();
        for mut prompt in incoming {
            if prompts.iter().any(|p| p.id == prompt.id) {
                prompt.id = self.unused_id(&prompts);
            }
            prompts.push(prompt);
        }

        self.persist(&prompts, "import").await?;
        debug!(added, total = prompts.len(), merge, "prompts imported");
        Ok(prompts.len())
    }

    /// Prompts whose title, content or tags contain `query`, in stored order.
    pub async fn search(&self, query: &str) -> Vec<Prompt> {
        let prompts = self.all().await;
        filter_by_query(&prompts, query).into_iter().cloned().collect()
    }

    /// The display list for `query` under `mode`.
    pub async fn view(&self, query: &str, mode: SortMode) -> Vec<Prompt> {
        compute_view(&self.all().await, query, mode)
    }

    pub async fn storage_info(&self) -> Result<StorageInfo, StoreError> {
        Ok(self.records.usage().await?)
    }

    fn unused_id(&self, prompts: &[Prompt]) -> String {
        loop {
            let id = new_id();
            if !prompts.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }

    async fn persist(&self, prompts: &[Prompt], operation: &str) -> Result<(), StoreError> {
        if let Err(e) = self.records.set_all(prompts).await {
            error!("Failed to {} prompts: {}", operation, e);
            return Err(e.into());
        }

        match self.records.usage().await {
            Ok(info) if info.percentage() > self.quota_warning_percent => warn!(
                "Storage almost full: {} of {} bytes used ({:.0}%). Consider exporting and clearing old prompts.",
                info.bytes_used,
                info.bytes_quota,
                info.percentage()
            ),
            Ok(info) => debug!(
                "Storage usage: {} / {} bytes ({:.2}%)",
                info.bytes_used,
                info.bytes_quota,
                info.percentage()
            ),
            Err(e) => warn!("Error checking storage quota: {}", e),
        }
        Ok(())
    }
}
