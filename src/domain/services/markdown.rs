use crate::domain::model::{
    Category, ConsultantSuggestion, GeneratedDocument, GenerationInput, TOTAL_FIELDS,
};
use crate::domain::services::complexity::classify_request;
use crate::domain::services::pdf_analysis::excerpt;
use chrono::{DateTime, Utc};

const UNTITLED: &str = "Untitled Agent";

#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    pub excerpt_chars: usize,
    pub include_documents: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            excerpt_chars: 600,
            include_documents: true,
        }
    }
}

pub fn compose(
    input: &GenerationInput,
    consultants: Vec<ConsultantSuggestion>,
    generated_at: DateTime<Utc>,
    options: ComposeOptions,
) -> GeneratedDocument {
    let template = &input.template;
    let title = template.agent_name().unwrap_or(UNTITLED).to_string();
    let filled_fields = template.filled_count();
    let document_count = input.documents.len();
    let complexity = classify_request(filled_fields, document_count);

    let mut md = format!("# Agent Specification: {}\n\n", title);
    md.push_str("| Property | Value |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!(
        "| Generated | {} |\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("| Complexity | {} |\n", complexity));
    md.push_str(&format!("| Filled fields | {}/{} |\n", filled_fields, TOTAL_FIELDS));
    md.push_str(&format!("| Reference documents | {} |\n", document_count));

    for category in Category::ALL {
        if template.filled_in(category) == 0 {
            continue;
        }
        md.push_str(&format!("\n## {}\n\n", category.title()));
        for value in template.get(category).iter().filter(|v| !v.trim().is_empty()) {
            md.push_str(&format!("- {}\n", single_line(value)));
        }
    }

    if options.include_documents && !input.documents.is_empty() {
        md.push_str("\n## Reference Documents\n");
        for doc in &input.documents {
            let s = &doc.stats;
            md.push_str(&format!("\n### {}\n\n", doc.file_name));
            md.push_str(&format!(
                "- Words: {} | Headings: {} | List items: {} | Tables: {} | Code lines: {}\n",
                s.words, s.headings, s.bullet_items, s.table_rows, s.code_lines
            ));
            md.push_str(&format!("- Links: {} | E-mail addresses: {}\n", s.urls, s.emails));
            md.push_str(&format!("- Document complexity: {}\n", s.complexity));
            if doc.truncated {
                md.push_str("- Extracted text was truncated\n");
            }
            let snippet = excerpt(&doc.text, options.excerpt_chars);
            if !snippet.is_empty() {
                md.push_str(&format!("\n> {}\n", snippet));
            }
        }
    }

    md.push_str("\n## Suggested Consultants\n\n");
    if consultants.is_empty() {
        md.push_str(
            "No specialist consultants matched this specification. A general review is recommended before implementation.\n",
        );
    } else {
        md.push_str(
            "Based on the requirements above, consult the following specialists before implementation:\n\n",
        );
        for consultant in &consultants {
            let status = if consultant.available {
                "available"
            } else {
                "not installed"
            };
            md.push_str(&format!(
                "- **{}** ({}), matched: {}\n",
                consultant.name,
                status,
                consultant.matched_keywords.join(", ")
            ));
        }
    }

    GeneratedDocument {
        title,
        markdown: md,
        complexity,
        filled_fields,
        document_count,
        consultants,
        generated_at,
    }
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
