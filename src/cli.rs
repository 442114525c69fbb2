//! Defines the command-line interface structure using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::view::SortMode;

#[derive(Parser)]
#[command(name = "prompt-recall", version, about = "Save, search and copy reusable prompts")]
pub struct Cli {
    /// Directory holding prompts.json and config.toml (defaults to ~/.prompt-recall)
    #[arg(long, global = true, env = "PROMPT_RECALL_HOME")]
    pub home: Option<PathBuf>,

    /// Log store operations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List prompts, pinned first, optionally filtered by a search query
    List {
        /// Only show prompts whose title, content or tags contain this text
        query: Option<String>,
        #[arg(long, value_enum, help = "Sort order (defaults to the configured one)")]
        sort: Option<SortMode>,
    },
    /// Search prompts by title, content and tags
    Search {
        query: String,
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
    },
    /// Create a new prompt
    New {
        #[arg(long, help = "Title (derived from the content when omitted)")]
        title: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Comma-separated tags")]
        tags: Vec<String>,
        #[arg(long, help = "Prompt text; opens an editor when omitted")]
        content: Option<String>,
    },
    /// Show a prompt by ID
    Get { id: String },
    /// Edit a prompt's title, tags and content
    Edit { id: String },
    /// Rename a prompt's title
    Rename {
        id: String,
        #[arg(long, help = "New title for the prompt")]
        title: String,
    },
    /// Add (+tag or tag) or remove (-tag) tags
    Tag {
        id: String,
        #[arg(allow_hyphen_values = true, num_args = 1.., required = true)]
        changes: Vec<String>,
    },
    /// Pin or unpin a prompt
    Pin { id: String },
    /// Copy a prompt to the clipboard, filling in its {{variables}}
    Copy {
        id: String,
        #[arg(long = "var", help = "Variable assignments in key=value format")]
        vars: Vec<String>,
    },
    /// Print a prompt with variable substitution
    Render {
        id: String,
        #[arg(long = "var", help = "Variable assignments in key=value format")]
        vars: Vec<String>,
    },
    /// Delete a prompt by ID
    Delete {
        id: String,
        #[arg(long, short, help = "Skip the confirmation")]
        yes: bool,
    },
    /// Delete every prompt
    Clear {
        #[arg(long, short, help = "Skip the confirmation")]
        yes: bool,
    },
    /// Export all prompts as JSON
    Export {
        #[arg(long, help = "Output file path, or '-' for stdout")]
        out: Option<String>,
    },
    /// Import prompts from a JSON export
    Import {
        file: String,
        #[arg(long, help = "Replace the stored prompts instead of adding to them")]
        replace: bool,
    },
    /// Show store statistics
    Stats,
    /// Start an interactive session (REPL)
    Interactive,
}
