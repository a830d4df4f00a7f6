use crate::utils::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_MESSAGE_CHARS: usize = 200;

fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // absolute, home-relative and slash-separated relative paths, then
        // drive-letter paths
        Regex::new(r#"(~|[\w.-]+)?(/[^\s'"/()]+)+/?|[A-Za-z]:\\[^\s'"()]*"#).expect("valid regex")
    })
}

/// Message returned across the gateway boundary: internal details of
/// IO and parse failures are collapsed, filesystem paths are replaced with
/// `<path>` and the result is capped at [`MAX_MESSAGE_CHARS`].
pub fn sanitize_error(error: &AppError) -> String {
    scrub_message(&error.user_friendly_message())
}

pub fn scrub_message(message: &str) -> String {
    let scrubbed = path_pattern().replace_all(message, "<path>");
    let mut chars = scrubbed.chars();
    let capped: String = chars.by_ref().take(MAX_MESSAGE_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", capped)
    } else {
        capped
    }
}
