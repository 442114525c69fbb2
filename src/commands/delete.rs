use crate::core::storage::AppCtx;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Delete a prompt.
pub async fn run(ctx: &AppCtx, id: &str, yes: bool) -> Result<(), String> {
    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure you want to delete this prompt?")
            .default(false)
            .interact()
            .map_err(|e| format!("Confirm error: {}", e))?
    {
        return Ok(());
    }

    if ctx.store.delete(id).await.map_err(|e| e.to_string())? {
        println!("{} prompt {} deleted", style("•").green().bold(), id);
        Ok(())
    } else {
        Err(format!("No prompt with ID {}", id))
    }
}
