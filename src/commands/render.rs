use crate::core::storage::AppCtx;
use crate::core::template::{parse_assignments, substitute};

/// Render a template prompt with variables and print it to stdout.
pub async fn run(ctx: &AppCtx, id: &str, vars: &[String]) -> Result<(), String> {
    let map = parse_assignments(vars).map_err(|e| e.to_string())?;
    let pd = ctx.store.get(id).await.map_err(|e| e.to_string())?;

    println!("{}", substitute(&pd.content, &map));
    Ok(())
}
