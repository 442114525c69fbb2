//! Per-session view state: the loaded collection, the active query and sort
//! mode, and the derived list currently on screen.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::storage::{NewPrompt, Prompt, PromptPatch, RecordStore};
use crate::core::template::render_if_needed;
use crate::core::view::{compute_view, SortMode};

use super::error::StoreError;
use super::store::PromptStore;

/// State owned by one interactive session.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    /// Snapshot of the full collection as last loaded.
    pub prompts: Vec<Prompt>,
    pub query: String,
    pub sort: SortMode,
    /// `prompts` filtered and ordered for display.
    pub view: Vec<Prompt>,
    pub selected_id: Option<String>,
    pub editing_id: Option<String>,
}

/// Drives a [`PromptStore`] on behalf of one user session.
pub struct Session<'a, S: RecordStore> {
    store: &'a PromptStore<S>,
    state: ViewState,
}

impl<'a, S: RecordStore> Session<'a, S> {
    pub fn new(store: &'a PromptStore<S>, sort: SortMode) -> Self {
        Self {
            store,
            state: ViewState {
                sort,
                ..ViewState::default()
            },
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &[Prompt] {
        &self.state.view
    }

    pub fn find(&self, id: &str) -> Option<&Prompt> {
        self.state.prompts.iter().find(|p| p.id == id)
    }

    /// Reloads the collection from the store and rebuilds the view.
    pub async fn load(&mut self) {
        self.state.prompts = self.store.all().await;
        self.refresh();
    }

    /// Rebuilds the view from the in-memory snapshot.
    pub fn refresh(&mut self) {
        self.state.view = compute_view(&self.state.prompts, &self.state.query, self.state.sort);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.state.sort = sort;
        self.refresh();
    }

    /// Clicking a tag searches for it.
    pub fn filter_by_tag(&mut self, tag: &str) {
        self.set_query(tag);
    }

    pub fn select(&mut self, id: Option<String>) {
        self.state.selected_id = id;
    }

    /// Starts editing `id`; returns the prompt being edited.
    pub fn begin_edit(&mut self, id: &str) -> Option<Prompt> {
        let prompt = self.find(id).cloned()?;
        self.state.editing_id = Some(prompt.id.clone());
        Some(prompt)
    }

    /// Starts composing a new prompt.
    pub fn begin_new(&mut self) {
        self.state.editing_id = None;
    }

    /// Saves the editor contents: updates the prompt being edited, or creates a
    /// new one when nothing is being edited. The collection is reloaded afterwards.
    pub async fn save(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> Result<Prompt, StoreError> {
        let title = title.trim();
        let content = content.trim();

        let saved = match self.state.editing_id.clone() {
            Some(id) => {
                let patch = PromptPatch {
                    title: Some(title.to_string()),
                    content: Some(content.to_string()),
                    tags: Some(tags),
                    pinned: None,
                };
                self.store.update(&id, &patch).await?
            }
            None => {
                let mut new = NewPrompt::new(content).tags(tags);
                if !title.is_empty() {
                    new = new.title(title);
                }
                self.store.create(new).await?
            }
        };

        self.state.editing_id = None;
        self.load().await;
        Ok(saved)
    }

    /// Flips the pin flag of `id` and returns the new value.
    ///
    /// The change is applied to the in-memory state and the view is rebuilt
    /// before the store is written. If the write fails, the state is reloaded
    /// from the store and the error returned.
    pub async fn toggle_pin(&mut self, id: &str) -> Result<bool, StoreError> {
        let pinned = {
            let prompt = self
                .state
                .prompts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            prompt.pinned = !prompt.pinned;
            prompt.pinned
        };
        self.refresh();

        let patch = PromptPatch {
            pinned: Some(pinned),
            ..PromptPatch::default()
        };
        if let Err(e) = self.store.update(id, &patch).await {
            warn!(id, "Error toggling pin, reverting: {}", e);
            self.load().await;
            return Err(e);
        }
        debug!(id, pinned, "pin toggled");
        Ok(pinned)
    }

    /// Text to put on the clipboard for `id`, with `values` substituted.
    pub fn copy_text(&self, id: &str, values: &HashMap<String, String>) -> Result<String, StoreError> {
        let prompt = self
            .find(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(render_if_needed(&prompt.content, values))
    }

    /// Records that `id` was copied and refreshes its in-memory copy.
    pub async fn record_copy(&mut self, id: &str) -> Result<Prompt, StoreError> {
        let used = self.store.mark_used(id).await?;
        if let Some(slot) = self.state.prompts.iter_mut().find(|p| p.id == id) {
            *slot = used.clone();
        }
        self.refresh();
        Ok(used)
    }

    /// Deletes `id` and reloads. Returns `false` when it did not exist.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.delete(id).await?;
        if self.state.selected_id.as_deref() == Some(id) {
            self.state.selected_id = None;
        }
        self.load().await;
        Ok(removed)
    }
}
