use crate::domain::model::{ConsultantSuggestion, ExtractedDocument, TemplateData};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Keyword groups mapped to the consultant they suggest, in priority order.
pub const CONSULTANT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "security-auditor",
        &["security", "auth", "authentication", "encryption", "vulnerability", "compliance"],
    ),
    ("api-designer", &["api", "rest", "graphql", "endpoint", "webhook"]),
    ("database-architect", &["database", "sql", "schema", "query", "postgres", "migration"]),
    ("test-engineer", &["test", "testing", "qa", "coverage", "regression"]),
    ("performance-optimizer", &["performance", "latency", "throughput", "optimization", "scaling"]),
    ("frontend-specialist", &["ui", "ux", "frontend", "react", "css", "accessibility"]),
    ("devops-engineer", &["deploy", "deployment", "docker", "kubernetes", "ci", "pipeline"]),
    ("technical-writer", &["documentation", "docs", "readme", "tutorial", "guide"]),
    ("data-analyst", &["data", "analytics", "report", "dashboard", "metrics"]),
    ("ml-engineer", &["ml", "machine learning", "model", "training", "embedding", "llm"]),
];

fn keyword_patterns() -> &'static Vec<(&'static str, Vec<(&'static str, Regex)>)> {
    static PATTERNS: OnceLock<Vec<(&'static str, Vec<(&'static str, Regex)>)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CONSULTANT_KEYWORDS
            .iter()
            .map(|(name, keywords)| {
                let compiled = keywords
                    .iter()
                    .map(|keyword| {
                        let pattern = format!(r"\b{}\b", regex::escape(keyword));
                        let regex = RegexBuilder::new(&pattern)
                            .case_insensitive(true)
                            .build()
                            .expect("keyword patterns are escaped");
                        (*keyword, regex)
                    })
                    .collect();
                (*name, compiled)
            })
            .collect()
    })
}

/// A consultant whose keywords appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultantMatch {
    pub name: String,
    pub matched_keywords: Vec<String>,
}

/// Scans every filled field and every extracted document for consultant
/// keywords. Results follow table order and are capped at `max`.
pub fn suggest(
    template: &TemplateData,
    documents: &[ExtractedDocument],
    max: usize,
) -> Vec<ConsultantMatch> {
    let haystacks: Vec<&str> = template
        .iter_filled()
        .map(|(_, _, value)| value)
        .chain(documents.iter().map(|doc| doc.text.as_str()))
        .collect();

    keyword_patterns()
        .iter()
        .filter_map(|(name, keywords)| {
            let matched: Vec<String> = keywords
                .iter()
                .filter(|(_, regex)| haystacks.iter().any(|text| regex.is_match(text)))
                .map(|(keyword, _)| keyword.to_string())
                .collect();
            (!matched.is_empty()).then(|| ConsultantMatch {
                name: name.to_string(),
                matched_keywords: matched,
            })
        })
        .take(max)
        .collect()
}

/// Marks each match available when `<name>.md` exists among `available_files`.
pub fn consult(matches: Vec<ConsultantMatch>, available_files: &[String]) -> Vec<ConsultantSuggestion> {
    matches
        .into_iter()
        .map(|m| {
            let file_name = format!("{}.md", m.name);
            ConsultantSuggestion {
                available: available_files.iter().any(|f| *f == file_name),
                name: m.name,
                matched_keywords: m.matched_keywords,
            }
        })
        .collect()
}

/// Consultant names derived from markdown file names, sorted.
pub fn names_from_files(files: &[String]) -> Vec<String> {
    let mut names: Vec<String> = files
        .iter()
        .filter_map(|f| f.strip_suffix(".md"))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}
