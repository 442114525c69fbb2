use crate::core::storage::AppCtx;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Delete every stored prompt.
pub async fn run(ctx: &AppCtx, yes: bool) -> Result<(), String> {
    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure you want to delete ALL prompts? This cannot be undone.")
            .default(false)
            .interact()
            .map_err(|e| format!("Confirm error: {}", e))?
    {
        return Ok(());
    }

    ctx.store.clear_all().await.map_err(|e| e.to_string())?;
    println!("{}", style("All prompts cleared").green().bold());
    Ok(())
}
