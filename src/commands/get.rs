use crate::core::storage::AppCtx;
use crate::core::template::extract_variables;
use crate::core::utils::{format_relative_time, now_millis};
use console::style;

/// Display a prompt.
pub async fn run(ctx: &AppCtx, id: &str) -> Result<(), String> {
    let pd = ctx.store.get(id).await.map_err(|e| e.to_string())?;
    let now = now_millis();

    println!("{} {}", style("Title:").green().bold(), pd.title);
    if pd.pinned {
        println!("{} yes", style("Pinned:").green().bold());
    }
    if !pd.tags.is_empty() {
        println!("{} {}", style("Tags:").green().bold(), pd.tags.join(", "));
    }
    println!(
        "{} {}",
        style("Created:").green().bold(),
        format_relative_time(pd.created_at, now)
    );
    if let Some(last_used) = pd.last_used {
        println!(
            "{} {} ({}x)",
            style("Last used:").green().bold(),
            format_relative_time(last_used, now),
            pd.use_count
        );
    }

    let variables = extract_variables(&pd.content);
    if !variables.is_empty() {
        println!("{} {}", style("Variables:").green().bold(), variables.join(", "));
    }
    println!("{}", style("Content:").green().bold());
    println!("{}", pd.content);
    Ok(())
}
