//! Filtering and ordering of the prompt list shown to the user.
//!
//! The view is always derived from the full record set and handed back as a
//! fresh vector; the records passed in are never modified.

use clap::ValueEnum;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::storage::Prompt;

/// How the view orders its records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SortMode {
    /// Newest first.
    #[default]
    Recent,
    /// By title.
    Alphabetical,
    /// Highest use count first.
    #[value(name = "mostUsed", alias = "most-used")]
    MostUsed,
    /// Most recently copied first; never-used prompts last.
    #[value(name = "lastUsed", alias = "last-used")]
    LastUsed,
    /// Pinned prompts only, newest first.
    Favorites,
}

impl SortMode {
    /// Parses a mode name. Unknown names fall back to [`SortMode::Recent`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "alphabetical" => SortMode::Alphabetical,
            "mostUsed" | "most-used" => SortMode::MostUsed,
            "lastUsed" | "last-used" => SortMode::LastUsed,
            "favorites" => SortMode::Favorites,
            _ => SortMode::Recent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Alphabetical => "alphabetical",
            SortMode::MostUsed => "mostUsed",
            SortMode::LastUsed => "lastUsed",
            SortMode::Favorites => "favorites",
        }
    }
}

impl From<String> for SortMode {
    fn from(name: String) -> Self {
        SortMode::from_name(&name)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring match against title, content and every tag.
/// `needle` must already be lowercased.
pub fn matches_query(prompt: &Prompt, needle: &str) -> bool {
    prompt.title.to_lowercase().contains(needle)
        || prompt.content.to_lowercase().contains(needle)
        || prompt.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Keeps the records matching `query`, in their original order.
/// A blank query keeps everything.
pub fn filter_by_query<'a>(prompts: &'a [Prompt], query: &str) -> Vec<&'a Prompt> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return prompts.iter().collect();
    }
    prompts
        .iter()
        .filter(|p| matches_query(p, &needle))
        .collect()
}

/// Builds the display list for `query` under `mode`.
pub fn compute_view(prompts: &[Prompt], query: &str, mode: SortMode) -> Vec<Prompt> {
    let mut view: Vec<Prompt> = filter_by_query(prompts, query)
        .into_iter()
        .filter(|p| mode != SortMode::Favorites || p.pinned)
        .cloned()
        .collect();

    let mut collator = Collator::default();
    // `sort_by` is stable: ties keep their input order.
    view.sort_by(|a, b| compare(a, b, mode, &mut collator));
    view
}

fn compare(a: &Prompt, b: &Prompt, mode: SortMode, collator: &mut Collator) -> Ordering {
    if mode != SortMode::Favorites {
        let pinned_first = b.pinned.cmp(&a.pinned);
        if pinned_first != Ordering::Equal {
            return pinned_first;
        }
    }

    match mode {
        SortMode::Alphabetical => compare_titles(collator, &a.title, &b.title),
        SortMode::MostUsed => b.use_count.cmp(&a.use_count),
        SortMode::LastUsed => match (a.last_used, b.last_used) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortMode::Recent | SortMode::Favorites => b.created_at.cmp(&a.created_at),
    }
}

/// Dictionary-style title order using the Unicode Collation Algorithm: accents
/// and case are secondary to the base letters, and a lowercase spelling sorts
/// before its uppercase twin.
pub fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(id: &str, title: &str, created_at: i64) -> Prompt {
        Prompt {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("content of {}", id),
            tags: Vec::new(),
            created_at,
            last_used: None,
            use_count: 0,
            pinned: false,
        }
    }

    fn ids(view: &[Prompt]) -> Vec<&str> {
        view.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_set_gives_empty_view() {
        assert!(compute_view(&[], "anything", SortMode::Recent).is_empty());
        assert!(compute_view(&[], "", SortMode::Favorites).is_empty());
    }

    #[test]
    fn recent_orders_newest_first_with_pins_on_top() {
        let mut old = prompt("old", "Old", 1);
        old.pinned = true;
        let all = vec![old, prompt("mid", "Mid", 2), prompt("new", "New", 3)];
        assert_eq!(ids(&compute_view(&all, "", SortMode::Recent)), ["old", "new", "mid"]);
    }

    #[test]
    fn query_matches_title_content_and_tags_case_insensitively() {
        let mut tagged = prompt("t", "Plain", 1);
        tagged.tags = vec!["Rust".to_string()];
        let mut body = prompt("b", "Other", 2);
        body.content = "Explain RUSTACEANS".to_string();
        let all = vec![tagged, body, prompt("x", "Unrelated", 3), prompt("r", "rusty title", 4)];

        let view = compute_view(&all, "  rust ", SortMode::Recent);
        assert_eq!(ids(&view), ["r", "b", "t"]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let all = vec![prompt("a", "A", 1), prompt("b", "B", 2)];
        assert_eq!(compute_view(&all, "   ", SortMode::Recent).len(), 2);
    }

    #[test]
    fn favorites_only_shows_pinned_by_recency() {
        let mut a = prompt("a", "A", 1);
        a.pinned = true;
        let mut c = prompt("c", "C", 3);
        c.pinned = true;
        let all = vec![a, prompt("b", "B", 2), c];
        assert_eq!(ids(&compute_view(&all, "", SortMode::Favorites)), ["c", "a"]);

        let none_pinned = vec![prompt("b", "B", 2)];
        assert!(compute_view(&none_pinned, "", SortMode::Favorites).is_empty());
    }

    #[test]
    fn alphabetical_is_case_insensitive_and_lowercase_first() {
        let all = vec![
            prompt("1", "banana", 1),
            prompt("2", "Apple", 2),
            prompt("3", "apple", 3),
            prompt("4", "Cherry", 4),
        ];
        assert_eq!(
            ids(&compute_view(&all, "", SortMode::Alphabetical)),
            ["3", "2", "1", "4"]
        );
    }

    #[test]
    fn alphabetical_collates_accented_titles_with_their_base_letter() {
        let all = vec![
            prompt("zebra", "Zebra", 1),
            prompt("eclair", "Éclair", 2),
            prompt("fig", "fig", 3),
            prompt("apple", "äpple", 4),
        ];
        assert_eq!(
            ids(&compute_view(&all, "", SortMode::Alphabetical)),
            ["apple", "eclair", "fig", "zebra"]
        );
    }

    #[test]
    fn title_ties_put_lowercase_first() {
        let mut collator = Collator::default();
        assert_eq!(compare_titles(&mut collator, "apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles(&mut collator, "Apple", "apple"), Ordering::Greater);
        assert_eq!(compare_titles(&mut collator, "same", "same"), Ordering::Equal);
    }

    #[test]
    fn most_used_is_descending_and_stable() {
        let mut a = prompt("a", "A", 1);
        a.use_count = 2;
        let mut b = prompt("b", "B", 2);
        b.use_count = 5;
        let mut c = prompt("c", "C", 3);
        c.use_count = 2;
        let all = vec![a, b, c];
        assert_eq!(ids(&compute_view(&all, "", SortMode::MostUsed)), ["b", "a", "c"]);
    }

    #[test]
    fn last_used_puts_never_used_last() {
        let mut a = prompt("a", "A", 1);
        a.last_used = Some(10);
        let mut c = prompt("c", "C", 3);
        c.last_used = Some(20);
        let all = vec![prompt("never1", "N", 5), a, prompt("never2", "M", 6), c];
        assert_eq!(
            ids(&compute_view(&all, "", SortMode::LastUsed)),
            ["c", "a", "never1", "never2"]
        );
    }

    #[test]
    fn view_does_not_touch_input() {
        let all = vec![prompt("a", "A", 1), prompt("b", "B", 2)];
        let before = all.clone();
        let _ = compute_view(&all, "", SortMode::Recent);
        assert_eq!(all, before);
    }

    #[test]
    fn unknown_mode_names_fall_back_to_recent() {
        assert_eq!(SortMode::from_name("mostUsed"), SortMode::MostUsed);
        assert_eq!(SortMode::from_name("shuffle"), SortMode::Recent);
        let parsed: SortMode = serde_json::from_str("\"lastUsed\"").unwrap();
        assert_eq!(parsed, SortMode::LastUsed);
        let unknown: SortMode = serde_json::from_str("\"byColour\"").unwrap();
        assert_eq!(unknown, SortMode::Recent);
        assert_eq!(serde_json::to_string(&SortMode::MostUsed).unwrap(), "\"mostUsed\"");
    }
}
