use crate::core::storage::AppCtx;
use crate::core::template::extract_variables;
use crate::core::utils::format_bytes;
use console::style;
use std::collections::HashMap;

const STORAGE_WARNING_PERCENT: f64 = 80.0;

/// Display statistics about the prompt store.
pub async fn run(ctx: &AppCtx) -> Result<(), String> {
    let prompts = ctx.store.try_all().await.map_err(|e| e.to_string())?;

    let pinned = prompts.iter().filter(|p| p.pinned).count();
    let with_variables = prompts
        .iter()
        .filter(|p| !extract_variables(&p.content).is_empty())
        .count();
    let total_uses: u64 = prompts.iter().map(|p| p.use_count).sum();
    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for tag in prompts.iter().flat_map(|p| p.tags.iter()) {
        *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    println!("{}", style("Prompt Recall Statistics").bold().underlined());
    println!("{}: {}", style("Total Prompts").cyan(), style(prompts.len()).yellow());
    println!("{}: {}", style("Pinned").cyan(), style(pinned).yellow());
    println!("{}: {}", style("With Variables").cyan(), style(with_variables).yellow());
    println!("{}: {}", style("Total Copies").cyan(), style(total_uses).yellow());

    if let Some(top) = prompts.iter().filter(|p| p.use_count > 0).max_by_key(|p| p.use_count) {
        println!(
            "{}: {} ({}x)",
            style("Most Used").cyan(),
            top.title,
            top.use_count
        );
    }

    if !tag_counts.is_empty() {
        let mut sorted_tags: Vec<_> = tag_counts.into_iter().collect();
        sorted_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        println!("\n{}", style("Top Tags:").bold().underlined());
        for (tag, count) in sorted_tags.iter().take(10) {
            println!("  - {} ({})", style(tag).green(), count);
        }
    }

    let info = ctx.store.storage_info().await.map_err(|e| e.to_string())?;
    let line = format!(
        "Storage: {} / {} ({:.2}%)",
        format_bytes(info.bytes_used),
        format_bytes(info.bytes_quota),
        info.percentage()
    );
    println!();
    if info.percentage() > STORAGE_WARNING_PERCENT {
        println!("{}", style(line).yellow().bold());
    } else {
        println!("{}", style(line).dim());
    }
    Ok(())
}
