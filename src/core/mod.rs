//! Storage, configuration and the pure view/template logic.

pub mod config;
pub mod storage;
pub mod template;
pub mod utils;
pub mod view;
