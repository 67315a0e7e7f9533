mod load_dotenv;
mod time;

pub use load_dotenv::load_dotenv;
pub use time::{after_secs, now};

/// Shortens a secret for log output, keeping only its first few characters.
pub fn redact(secret: &str) -> String {
    const VISIBLE_CHARS: usize = 6;
    let visible: String = secret.chars().take(VISIBLE_CHARS).collect();
    if visible.len() < secret.len() {
        format!("{visible}…")
    } else {
        visible
    }
}
