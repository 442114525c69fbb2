use crate::core::storage::{AppCtx, PromptPatch};
use console::style;

/// Apply `+tag` / `tag` (add) and `-tag` (remove) changes to a prompt.
pub async fn run(ctx: &AppCtx, id: &str, changes: &[String]) -> Result<(), String> {
    let pd = ctx.store.get(id).await.map_err(|e| e.to_string())?;
    let tags = apply_changes(pd.tags, changes);

    let patch = PromptPatch {
        tags: Some(tags),
        ..PromptPatch::default()
    };
    let updated = ctx
        .store
        .update(id, &patch)
        .await
        .map_err(|e| e.to_string())?;

    if updated.tags.is_empty() {
        println!("{} prompt {} has no tags", style("•").green().bold(), id);
    } else {
        println!(
            "{} prompt {} tagged: {}",
            style("•").green().bold(),
            id,
            updated.tags.join(", ")
        );
    }
    Ok(())
}

fn apply_changes(mut tags: Vec<String>, changes: &[String]) -> Vec<String> {
    for change in changes {
        if let Some(removed) = change.strip_prefix('-') {
            let removed = removed.trim();
            tags.retain(|t| t != removed);
        } else {
            let added = change.strip_prefix('+').unwrap_or(change).trim();
            if !added.is_empty() && !tags.iter().any(|t| t == added) {
                tags.push(added.to_string());
            }
        }
    }
    tags
}
