use crate::api::Session;
use crate::core::storage::AppCtx;
use console::style;
use copypasta::{ClipboardContext, ClipboardProvider};
use dialoguer::{theme::ColorfulTheme, Editor, Input};
use tracing::warn;

/// Create a new prompt, interactively unless `content` is given.
pub async fn run(
    ctx: &AppCtx,
    title: Option<String>,
    tags: Vec<String>,
    content: Option<String>,
) -> Result<(), String> {
    let (title, tags, content) = match content {
        Some(content) => (title.unwrap_or_default(), clean_tags(tags), content),
        None => ask(title, tags)?,
    };

    let mut session = Session::new(&ctx.store, ctx.config.default_sort);
    session.begin_new();
    let prompt = session
        .save(&title, &content, tags)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{} Prompt saved with ID {} and title '{}'",
        style("•").green().bold(),
        style(&prompt.id).yellow(),
        prompt.title
    );
    Ok(())
}

fn ask(title: Option<String>, tags: Vec<String>) -> Result<(String, Vec<String>, String), String> {
    let theme = ColorfulTheme::default();

    let title: String = match title {
        Some(t) => t,
        None => Input::with_theme(&theme)
            .with_prompt("Title (optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Title error: {}", e))?,
    };

    let tags = if tags.is_empty() {
        let tags_line: String = Input::with_theme(&theme)
            .with_prompt("Tags (comma‑separated, optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Tags error: {}", e))?;
        parse_tags(&tags_line)
    } else {
        clean_tags(tags)
    };

    let initial = clipboard_text().unwrap_or_else(|| "Enter your prompt content here.".to_string());
    let content = Editor::new()
        .edit(&initial)
        .map_err(|e| format!("Editor error: {}", e))?
        .unwrap_or_default();

    Ok((title, tags, content))
}

/// Clipboard contents used to pre-fill the editor, when there are any.
fn clipboard_text() -> Option<String> {
    let mut clip = match ClipboardContext::new() {
        Ok(clip) => clip,
        Err(e) => {
            warn!("Failed to open clipboard: {}", e);
            return None;
        }
    };
    match clip.get_contents() {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to read clipboard or clipboard is empty: {}", e);
            None
        }
    }
}

/// Splits a comma-separated tag line, dropping blanks.
pub(crate) fn parse_tags(line: &str) -> Vec<String> {
    line.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
