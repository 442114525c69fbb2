use chrono::{DateTime, Local, Utc};
use rand::Rng;
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TITLE_PREVIEW_CHARS: usize = 50;

/// Ensure directory exists.
pub fn ensure_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Unable to create directory {}: {}", path.display(), e))?;
    }
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o700)).ok();
    }
    Ok(())
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a fresh prompt ID: `prompt_<millis>_<9 base-36 chars>`.
pub fn new_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("prompt_{}_{}", now_millis(), suffix)
}

/// Title used when none is supplied: the first 50 characters of the content,
/// followed by `...` when the content is longer.
pub fn default_title(content: &str) -> String {
    if content.chars().count() > TITLE_PREVIEW_CHARS {
        let head: String = content.chars().take(TITLE_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Short human description of how long ago `timestamp` was, relative to `now`.
pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 3_600;
    const DAY: i64 = 86_400;

    let diff = now.saturating_sub(timestamp).div_euclid(1000);

    if diff < 10 {
        "just now".to_string()
    } else if diff < MINUTE {
        format!("{}s ago", diff)
    } else if diff < HOUR {
        format!("{}m ago", diff / MINUTE)
    } else if diff < DAY {
        format!("{}h ago", diff / HOUR)
    } else {
        let days = diff / DAY;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{}d ago", days)
        } else {
            DateTime::<Utc>::from_timestamp_millis(timestamp)
                .map(|dt| dt.with_timezone(&Local).format("%b %-d").to_string())
                .unwrap_or_else(|| "long ago".to_string())
        }
    }
}

/// Render a byte count as `Bytes`, `KB` or `MB` with at most two decimals.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}
