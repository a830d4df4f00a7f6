use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub limits: LimitsConfig,
    pub rate_limits: RateLimitConfig,
    pub consultants: ConsultantsConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_pdf_bytes: u64,
    pub max_template_bytes: u64,
    pub max_document_bytes: usize,
    pub max_field_chars: usize,
    pub max_documents: usize,
    pub max_extracted_chars: usize,
    pub max_path_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_pdf_bytes: 10 * 1024 * 1024,
            max_template_bytes: 1024 * 1024,
            max_document_bytes: 5 * 1024 * 1024,
            max_field_chars: 5_000,
            max_documents: 10,
            max_extracted_chars: 200_000,
            max_path_len: 4_096,
        }
    }
}

/// Per-minute quotas for each gateway channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub window_seconds: u64,
    pub extract_pdf: u32,
    pub load_template: u32,
    pub save_template: u32,
    pub save_document: u32,
    pub list_consultants: u32,
    pub generate: u32,
    pub export_bundle: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            extract_pdf: 10,
            load_template: 30,
            save_template: 30,
            save_document: 20,
            list_consultants: 60,
            generate: 30,
            export_bundle: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultantsConfig {
    pub directory: String,
    pub max_suggestions: usize,
}

impl Default for ConsultantsConfig {
    fn default() -> Self {
        Self {
            directory: "consultants".to_string(),
            max_suggestions: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root that relative paths handed to the gateway resolve against.
    pub base_path: String,
    pub excerpt_chars: usize,
    pub include_documents: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            excerpt_chars: 600,
            include_documents: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content, |name| std::env::var(name).ok());

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_range("rate_limits.window_seconds", self.rate_limits.window_seconds, 1, 3_600)?;
        validate_positive_number("limits.max_documents", self.limits.max_documents, 1)?;
        validate_positive_number("limits.max_field_chars", self.limits.max_field_chars, 1)?;
        validate_positive_number("limits.max_extracted_chars", self.limits.max_extracted_chars, 1)?;
        validate_positive_number("limits.max_document_bytes", self.limits.max_document_bytes, 1)?;
        validate_range("limits.max_pdf_bytes", self.limits.max_pdf_bytes, 5, 512 * 1024 * 1024)?;
        validate_positive_number("consultants.max_suggestions", self.consultants.max_suggestions, 1)?;
        validate_path("consultants.directory", &self.consultants.directory)?;
        validate_path("output.base_path", &self.output.base_path)?;
        Ok(())
    }
}
