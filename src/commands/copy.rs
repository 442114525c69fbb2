use crate::api::Session;
use crate::core::storage::AppCtx;
use crate::core::template::{extract_variables, parse_assignments};
use console::style;
use copypasta::{ClipboardContext, ClipboardProvider};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::warn;

/// Copy prompt content to clipboard, asking for any variable not given with `--var`.
pub async fn run(ctx: &AppCtx, id: &str, vars: &[String]) -> Result<(), String> {
    let mut session = Session::new(&ctx.store, ctx.config.default_sort);
    session.load().await;
    let pd = session
        .find(id)
        .cloned()
        .ok_or_else(|| format!("No prompt with ID {}", id))?;

    let mut values = parse_assignments(vars).map_err(|e| e.to_string())?;
    let theme = ColorfulTheme::default();
    for variable in extract_variables(&pd.content) {
        if values.contains_key(&variable) {
            continue;
        }
        let value: String = Input::with_theme(&theme)
            .with_prompt(format!("Enter value for {}", variable))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;
        values.insert(variable, value);
    }

    let text = session.copy_text(id, &values).map_err(|e| e.to_string())?;

    let mut ctx_clip = ClipboardContext::new().map_err(|e| format!("Clipboard error: {}", e))?;
    ctx_clip
        .set_contents(text)
        .map_err(|e| format!("Clipboard set error: {}", e))?;

    match session.record_copy(id).await {
        Ok(used) => println!(
            "{} copied to clipboard • Used {}x",
            style("•").green().bold(),
            used.use_count
        ),
        Err(e) => {
            warn!("Error marking prompt as used: {}", e);
            println!("{} copied to clipboard", style("•").green().bold());
        }
    }
    Ok(())
}
