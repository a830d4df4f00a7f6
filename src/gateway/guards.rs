//! Input checks applied before any gateway operation touches the disk or
//! the PDF parser.

use crate::config::toml_config::LimitsConfig;
use crate::domain::model::{Category, TemplateData};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::has_extension;
use std::path::{Component, Path};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Rejects empty, NUL-carrying, over-long or parent-traversing paths and
/// paths without the expected extension.
pub fn check_path(field: &str, path: &str, extension: &str, limits: &LimitsConfig) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AppError::validation(field, "path is required"));
    }
    if path.contains('\0') {
        return Err(AppError::validation(field, "path contains null bytes"));
    }
    if path.len() > limits.max_path_len {
        return Err(AppError::validation(
            field,
            format!("path exceeds {} bytes", limits.max_path_len),
        ));
    }
    // Backslashes are separators on Windows; treat them as such everywhere.
    let normalised = path.replace('\\', "/");
    if Path::new(&normalised)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(AppError::validation(field, "path must not contain '..'"));
    }
    if !has_extension(path, extension) {
        return Err(AppError::validation(
            field,
            format!("only .{} files are accepted", extension),
        ));
    }
    Ok(())
}

pub fn check_file_size(field: &str, size: u64, max: u64) -> Result<()> {
    if size == 0 {
        return Err(AppError::validation(field, "file is empty"));
    }
    if size > max {
        return Err(AppError::validation(
            field,
            format!("file is {} bytes, limit is {} bytes", size, max),
        ));
    }
    Ok(())
}

pub fn check_pdf_header(field: &str, data: &[u8]) -> Result<()> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(AppError::validation(field, "file is not a PDF document"));
    }
    Ok(())
}

pub fn check_content_length(field: &str, content: &str, max_bytes: usize) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::validation(field, "content is empty"));
    }
    if content.len() > max_bytes {
        return Err(AppError::validation(
            field,
            format!("content exceeds {} bytes", max_bytes),
        ));
    }
    Ok(())
}

/// Every template field must fit within the per-field character limit.
pub fn check_template(template: &TemplateData, limits: &LimitsConfig) -> Result<()> {
    for category in Category::ALL {
        for (slot, value) in template.get(category).iter().enumerate() {
            if value.chars().count() > limits.max_field_chars {
                return Err(AppError::validation(
                    format!("{}[{}]", category.key(), slot),
                    format!("field exceeds {} characters", limits.max_field_chars),
                ));
            }
        }
    }
    Ok(())
}

pub fn check_document_count(count: usize, limits: &LimitsConfig) -> Result<()> {
    if count > limits.max_documents {
        return Err(AppError::validation(
            "documents",
            format!("at most {} PDFs can be attached", limits.max_documents),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_path() {
        let limits = LimitsConfig::default();
        assert!(check_path("pdf", "docs/brief.pdf", "pdf", &limits).is_ok());
        assert!(check_path("pdf", "/abs/brief.PDF", "pdf", &limits).is_ok());
        assert!(check_path("pdf", "", "pdf", &limits).is_err());
        assert!(check_path("pdf", "../etc/brief.pdf", "pdf", &limits).is_err());
        assert!(check_path("pdf", "docs\\..\\brief.pdf", "pdf", &limits).is_err());
        assert!(check_path("pdf", "brief.pdf\0.txt", "pdf", &limits).is_err());
        assert!(check_path("pdf", "brief.exe", "pdf", &limits).is_err());
        // dots inside a name are not traversal
        assert!(check_path("pdf", "v1..2/brief.pdf", "pdf", &limits).is_ok());
    }

    #[test]
    fn test_check_path_length() {
        let limits = LimitsConfig {
            max_path_len: 10,
            ..LimitsConfig::default()
        };
        assert!(check_path("pdf", "a/very/long/brief.pdf", "pdf", &limits).is_err());
    }

    #[test]
    fn test_check_file_size() {
        assert!(check_file_size("pdf", 0, 100).is_err());
        assert!(check_file_size("pdf", 100, 100).is_ok());
        assert!(check_file_size("pdf", 101, 100).is_err());
    }

    #[test]
    fn test_check_pdf_header() {
        assert!(check_pdf_header("pdf", b"%PDF-1.7\n...").is_ok());
        assert!(check_pdf_header("pdf", b"PK\x03\x04").is_err());
    }

    #[test]
    fn test_check_template_field_length() {
        let limits = LimitsConfig {
            max_field_chars: 5,
            ..LimitsConfig::default()
        };
        let mut template = TemplateData::new();
        template.set(Category::Tools, 2, "héllo").unwrap();
        assert!(check_template(&template, &limits).is_ok());

        template.set(Category::Tools, 2, "toolong").unwrap();
        let err = check_template(&template, &limits).unwrap_err();
        assert!(err.to_string().contains("tools[2]"));
    }

    #[test]
    fn test_check_document_count() {
        let limits = LimitsConfig::default();
        assert!(check_document_count(10, &limits).is_ok());
        assert!(check_document_count(11, &limits).is_err());
    }

    #[test]
    fn test_check_content_length() {
        assert!(check_content_length("markdown", "# ok", 10).is_ok());
        assert!(check_content_length("markdown", "   ", 10).is_err());
        assert!(check_content_length("markdown", "# far too long", 10).is_err());
    }
}
