pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use crate::api::{BackendError, PromptStore, Session, StoreError, ViewState};
pub use crate::core::storage::{
    JsonFileStore, MemoryStore, NewPrompt, Prompt, PromptPatch, RecordStore, StorageInfo,
};
pub use crate::core::template::{extract_variables, substitute};
pub use crate::core::view::{compute_view, SortMode};
