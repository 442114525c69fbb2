use crate::api::Session;
use crate::core::storage::{AppCtx, Prompt};
use crate::core::utils::{format_relative_time, now_millis};
use crate::core::view::SortMode;
use console::style;

const PREVIEW_CHARS: usize = 80;

/// List prompts in display order, optionally narrowed by a query.
pub async fn run(ctx: &AppCtx, query: Option<&str>, sort: Option<SortMode>) -> Result<(), String> {
    let mode = sort.unwrap_or(ctx.config.default_sort);
    let mut session = Session::new(&ctx.store, mode);
    session.set_query(query.unwrap_or_default());
    session.load().await;

    let filtered = !session.state().query.trim().is_empty() || mode == SortMode::Favorites;
    let empty_message = if filtered {
        "No match"
    } else {
        "No saved prompts. Create one with 'prompt-recall new'."
    };
    print_prompts(session.view(), mode, empty_message);
    Ok(())
}

/// Prints one block per prompt, or `empty_message` when there are none.
pub(crate) fn print_prompts(prompts: &[Prompt], mode: SortMode, empty_message: &str) {
    if prompts.is_empty() {
        println!("{}", style(empty_message).yellow());
        return;
    }

    println!(
        "{} {}",
        style("Prompts").green().bold(),
        style(format!("({}, {})", prompts.len(), mode)).dim()
    );
    let now = now_millis();
    for prompt in prompts {
        print_prompt(prompt, now);
    }
}

fn print_prompt(prompt: &Prompt, now: i64) {
    let marker = if prompt.pinned {
        style("★").yellow().bold()
    } else {
        style("•").green()
    };
    println!("  {} {} - {}", marker, style(&prompt.id).yellow(), prompt.title);

    let mut meta = format_relative_time(prompt.created_at, now);
    if prompt.use_count > 0 {
        meta.push_str(&format!(" • Used {}x", prompt.use_count));
    }
    if !prompt.tags.is_empty() {
        let tags: Vec<String> = prompt.tags.iter().map(|t| format!("#{}", t)).collect();
        meta.push_str(&format!("  {}", tags.join(" ")));
    }
    println!("      {}", style(meta).dim());
    println!("      {}", preview(&prompt.content));
}

fn preview(content: &str) -> String {
    let line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() > PREVIEW_CHARS {
        let head: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        line.to_string()
    }
}
