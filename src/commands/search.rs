use crate::core::storage::AppCtx;
use crate::core::view::{compute_view, SortMode};

use super::list::print_prompts;

/// Search prompts by title, content and tags.
pub async fn run(ctx: &AppCtx, query: &str, sort: Option<SortMode>) -> Result<(), String> {
    let mode = sort.unwrap_or(ctx.config.default_sort);
    let hits = ctx.store.search(query).await;
    print_prompts(&compute_view(&hits, "", mode), mode, "No match");
    Ok(())
}
