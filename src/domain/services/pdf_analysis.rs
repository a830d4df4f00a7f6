//! Text-pattern statistics over extracted PDF text.
//!
//! Counts are line based. A line contributes to at most one structural
//! bucket (heading, bullet, code, table), checked in that order; URLs and
//! e-mail addresses are counted per occurrence.

use crate::domain::model::{DocumentComplexity, PdfStats};
use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    numbered_heading: Regex,
    bullet: Regex,
    code: Regex,
    table_separator: Regex,
    url: Regex,
    email: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        numbered_heading: Regex::new(r"^\d+(\.\d+)*\.?\s+\p{Lu}").expect("valid regex"),
        bullet: Regex::new(r"^([-*•▪◦]|\d+[.)]|[a-z][.)])\s+\S").expect("valid regex"),
        code: Regex::new(r"(^(fn|def|class|import|function|const|let|var|return|public|private)\b)|[{};]\s*$|=>|::")
            .expect("valid regex"),
        table_separator: Regex::new(r"\t|\s\|\s|\s{2,}").expect("valid regex"),
        url: Regex::new(r"https?://[^\s)>\]]+").expect("valid regex"),
        email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex"),
    })
}

fn is_caps_heading(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 4 && line.len() <= 80 && letters.iter().all(|c| c.is_uppercase())
}

fn is_table_row(line: &str, separator: &Regex) -> bool {
    separator
        .split(line)
        .filter(|cell| !cell.trim().is_empty())
        .count()
        >= 3
}

pub fn analyze_text(text: &str) -> PdfStats {
    let p = patterns();

    let mut lines = 0;
    let mut headings = 0;
    let mut bullet_items = 0;
    let mut code_lines = 0;
    let mut table_rows = 0;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        lines += 1;

        if (p.numbered_heading.is_match(line) && line.len() <= 120) || is_caps_heading(line) {
            headings += 1;
        } else if p.bullet.is_match(line) {
            bullet_items += 1;
        } else if p.code.is_match(line) {
            code_lines += 1;
        } else if is_table_row(raw.trim_end(), &p.table_separator) {
            table_rows += 1;
        }
    }

    let urls = p.url.find_iter(text).count();
    let emails = p.email.find_iter(text).count();
    let pattern_count = headings + bullet_items + code_lines + table_rows + urls + emails;

    PdfStats {
        words: text.split_whitespace().count(),
        lines,
        headings,
        bullet_items,
        urls,
        emails,
        code_lines,
        table_rows,
        pattern_count,
        complexity: DocumentComplexity::from_pattern_count(pattern_count),
    }
}

/// Whitespace-normalised prefix of at most `max_chars` characters.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let normalised = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalised.chars().count() <= max_chars {
        return normalised;
    }
    let cut: String = normalised.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Truncates `text` to `max_chars` characters, reporting whether it was cut.
pub fn truncate_chars(text: String, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1. Introduction
The agent reviews pull requests.
OVERVIEW
- checks formatting
- checks tests
* flags risky changes
fn review(pr: &Pr) -> Verdict {
Name    Owner    Status
Contact ops@example.com or https://example.com/docs
";

    #[test]
    fn test_analyze_counts_structures() {
        let stats = analyze_text(SAMPLE);
        assert_eq!(stats.headings, 2);
        assert_eq!(stats.bullet_items, 3);
        assert_eq!(stats.code_lines, 1);
        assert_eq!(stats.table_rows, 1);
        assert_eq!(stats.urls, 1);
        assert_eq!(stats.emails, 1);
        assert_eq!(stats.lines, 9);
        assert_eq!(stats.pattern_count, 9);
        assert_eq!(stats.complexity, DocumentComplexity::Low);
    }

    #[test]
    fn test_heavily_structured_text_is_high() {
        let text = "- item\n".repeat(60);
        let stats = analyze_text(&text);
        assert_eq!(stats.bullet_items, 60);
        assert_eq!(stats.complexity, DocumentComplexity::High);
    }

    #[test]
    fn test_empty_text() {
        let stats = analyze_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.pattern_count, 0);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("  short\n text ", 20), "short text");
        assert_eq!(excerpt("héllo wörld", 5), "héllo…");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef".to_string(), 3), ("abc".to_string(), true));
        assert_eq!(truncate_chars("ab".to_string(), 3), ("ab".to_string(), false));
        assert_eq!(truncate_chars("ééé".to_string(), 2), ("éé".to_string(), true));
    }
}
