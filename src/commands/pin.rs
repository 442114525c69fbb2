use crate::api::Session;
use crate::core::storage::AppCtx;
use console::style;

/// Toggle the pin flag of a prompt.
pub async fn run(ctx: &AppCtx, id: &str) -> Result<(), String> {
    let mut session = Session::new(&ctx.store, ctx.config.default_sort);
    session.load().await;
    let pinned = session.toggle_pin(id).await.map_err(|e| e.to_string())?;

    let label = if pinned { "pinned" } else { "unpinned" };
    println!("{} prompt {} {}", style("★").yellow().bold(), id, label);
    Ok(())
}
