use crate::core::storage::AppCtx;
use crate::core::utils::now_millis;
use console::style;

/// Export prompts as a JSON array, to a file or to stdout (`-`).
pub async fn run(ctx: &AppCtx, out_path: Option<&str>) -> Result<(), String> {
    let json = ctx.store.export().await.map_err(|e| e.to_string())?;

    let out_path = match out_path {
        Some("-") => {
            println!("{}", json);
            return Ok(());
        }
        Some(path) => path.to_string(),
        None => format!("ai-prompts-{}.json", now_millis()),
    };

    tokio::fs::write(&out_path, json)
        .await
        .map_err(|e| format!("Write error: {}", e))?;
    println!("{} exported to {}", style("•").green().bold(), out_path);
    Ok(())
}
