use crate::api::Session;
use crate::core::storage::AppCtx;
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input};

use super::new::parse_tags;

/// Edit a prompt's title, tags and content.
pub async fn run(ctx: &AppCtx, id: &str) -> Result<(), String> {
    let mut session = Session::new(&ctx.store, ctx.config.default_sort);
    session.load().await;
    let pd = session
        .begin_edit(id)
        .ok_or_else(|| format!("No prompt with ID '{}'", id))?;
    let theme = ColorfulTheme::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title")
        .with_initial_text(pd.title.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| format!("Title error: {}", e))?;

    let tags_line: String = Input::with_theme(&theme)
        .with_prompt("Tags (comma‑separated)")
        .with_initial_text(pd.tags.join(", "))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| format!("Tags error: {}", e))?;
    let tags = parse_tags(&tags_line);

    let content = Editor::new()
        .edit(&pd.content)
        .map_err(|e| format!("Editor error: {}", e))?
        .unwrap_or_else(|| pd.content.clone());

    if title.trim() == pd.title && tags == pd.tags && content.trim() == pd.content {
        println!("{}", style("No changes detected. Nothing to save.").yellow());
        return Ok(());
    }

    session
        .save(&title, &content, tags)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{} Prompt '{}' updated successfully.",
        style("✔").green().bold(),
        id
    );
    Ok(())
}
