use crate::cli::Cmd;
use crate::core::storage::AppCtx;

pub mod clear;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod export;
pub mod get;
pub mod import;
pub mod interactive;
pub mod list;
pub mod new;
pub mod pin;
pub mod rename;
pub mod render;
pub mod search;
pub mod stats;
pub mod tag;

/// Dispatches the parsed command to the appropriate handler.
pub async fn dispatch(command: Cmd, ctx: &AppCtx) -> Result<(), String> {
    match command {
        Cmd::List { query, sort } => list::run(ctx, query.as_deref(), sort).await,
        Cmd::Search { query, sort } => search::run(ctx, &query, sort).await,
        Cmd::New {
            title,
            tags,
            content,
        } => new::run(ctx, title, tags, content).await,
        Cmd::Get { id } => get::run(ctx, &id).await,
        Cmd::Edit { id } => edit::run(ctx, &id).await,
        Cmd::Rename { id, title } => rename::run(ctx, &id, &title).await,
        Cmd::Tag { id, changes } => tag::run(ctx, &id, &changes).await,
        Cmd::Pin { id } => pin::run(ctx, &id).await,
        Cmd::Copy { id, vars } => copy::run(ctx, &id, &vars).await,
        Cmd::Render { id, vars } => render::run(ctx, &id, &vars).await,
        Cmd::Delete { id, yes } => delete::run(ctx, &id, yes).await,
        Cmd::Clear { yes } => clear::run(ctx, yes).await,
        Cmd::Export { out } => export::run(ctx, out.as_deref()).await,
        Cmd::Import { file, replace } => import::run(ctx, &file, replace).await,
        Cmd::Stats => stats::run(ctx).await,
        Cmd::Interactive => interactive::run(ctx).await,
    }
}
