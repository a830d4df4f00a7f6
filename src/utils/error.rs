use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF extraction failed: {message}")]
    PdfError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("{channel}: {message}")]
    Rejected {
        channel: String,
        category: ErrorCategory,
        message: String,
    },

    #[error("Rate limit exceeded for '{channel}', retry in {}s", .retry_after.as_secs().max(1))]
    RateLimited {
        channel: String,
        retry_after: Duration,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    RateLimit,
    Document,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        AppError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::IoError(_) => ErrorCategory::Io,
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. } => ErrorCategory::Validation,
            AppError::RateLimited { .. } => ErrorCategory::RateLimit,
            AppError::PdfError { .. } => ErrorCategory::Document,
            AppError::Rejected { category, .. } => *category,
            AppError::ZipError(_)
            | AppError::CsvError(_)
            | AppError::SerializationError(_)
            | AppError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::RateLimit => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Document | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the file exists and that you have permission to access it",
            ErrorCategory::Configuration => "Review the configuration file and fix the reported value",
            ErrorCategory::Validation => "Correct the highlighted input and try again",
            ErrorCategory::RateLimit => "Wait a moment before repeating the operation",
            ErrorCategory::Document => "Make sure the file is a readable, text-based PDF",
            ErrorCategory::Processing => "Retry the operation; if it keeps failing, run with --verbose",
        }
    }

    /// Short message safe to show to the person driving the tool.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::IoError(e) => match e.kind() {
                std::io::ErrorKind::NotFound => "File not found".to_string(),
                std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
                _ => "A file system error occurred".to_string(),
            },
            AppError::SerializationError(e) => match e.classify() {
                serde_json::error::Category::Data => {
                    "The template does not match the layout of 8 categories with 12 fields each"
                        .to_string()
                }
                serde_json::error::Category::Io => "A file system error occurred".to_string(),
                _ => "The file content is not valid JSON".to_string(),
            },
            AppError::ZipError(_) => "Failed to build the export bundle".to_string(),
            AppError::CsvError(_) => "Failed to export the template fields".to_string(),
            AppError::PdfError { .. } => "Could not extract text from the PDF".to_string(),
            AppError::ProcessingError { .. } => "Document generation failed".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_hide_details() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "/home/alice/secret.pdf: no such file",
        ));
        assert_eq!(err.user_friendly_message(), "File not found");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_json_syntax_and_shape_errors_differ() {
        let syntax = serde_json::from_str::<serde_json::Value>("{\"identity\": [")
            .unwrap_err();
        assert_eq!(
            AppError::from(syntax).user_friendly_message(),
            "The file content is not valid JSON"
        );

        let shape = serde_json::from_str::<crate::domain::model::TemplateData>(
            "{\"identity\": [\"a\", \"b\", \"c\"]}",
        )
        .unwrap_err();
        assert_eq!(
            AppError::from(shape).user_friendly_message(),
            "The template does not match the layout of 8 categories with 12 fields each"
        );
    }

    #[test]
    fn test_rate_limit_message_rounds_up_to_one_second() {
        let err = AppError::RateLimited {
            channel: "extract_pdf".to_string(),
            retry_after: Duration::from_millis(200),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Rate limit exceeded for 'extract_pdf', retry in 1s"
        );
        assert_eq!(err.category(), ErrorCategory::RateLimit);
    }
}
