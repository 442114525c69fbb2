use crate::core::storage::AppCtx;
use console::style;

/// Import prompts from a JSON export, adding to or replacing the stored ones.
pub async fn run(ctx: &AppCtx, file: &str, replace: bool) -> Result<(), String> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| format!("Read error: {}", e))?;
    let total = ctx
        .store
        .import(&text, !replace)
        .await
        .map_err(|e| format!("Failed to import prompts. Check file format. {}", e))?;

    println!(
        "{} imported, {} prompts stored",
        style("•").green().bold(),
        total
    );
    Ok(())
}
