//! Library API: the prompt repository and per-session view state.

mod error;
mod session;
mod store;

pub use error::{BackendError, StoreError};
pub use session::{Session, ViewState};
pub use store::PromptStore;
