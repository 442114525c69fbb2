use crate::core::storage::{AppCtx, PromptPatch};
use console::style;

/// Rename a prompt.
pub async fn run(ctx: &AppCtx, id: &str, title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    let patch = PromptPatch {
        title: Some(title.trim().to_string()),
        ..PromptPatch::default()
    };
    ctx.store
        .update(id, &patch)
        .await
        .map_err(|e| e.to_string())?;
    println!("{} prompt {} renamed", style("•").green().bold(), id);
    Ok(())
}
