use crate::adapters::export::build_bundle;
use crate::config::toml_config::AppConfig;
use crate::domain::model::{ExtractedDocument, GeneratedDocument, GenerationInput, TemplateData};
use crate::domain::ports::{PdfExtractor, Storage};
use crate::domain::services::consultants::{consult, names_from_files, suggest};
use crate::domain::services::markdown::{compose, ComposeOptions};
use crate::domain::services::pdf_analysis::{analyze_text, truncate_chars};
use crate::gateway::guards;
use crate::gateway::rate_limiter::{Channel, RateLimiter};
use crate::gateway::sanitize::sanitize_error;
use crate::utils::error::{AppError, ErrorCategory, Result};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Failure surfaced across the gateway boundary. The message is already
/// sanitized and safe to display.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct GatewayError {
    pub channel: Channel,
    pub category: ErrorCategory,
    pub message: String,
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError::Rejected {
            channel: e.channel.name().to_string(),
            category: e.category,
            message: e.message,
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Rate-limited, validated entry points to the filesystem and PDF parser.
pub struct Gateway<S: Storage, X: PdfExtractor> {
    storage: S,
    extractor: Arc<X>,
    limiter: RateLimiter,
    config: AppConfig,
}

impl<S: Storage, X: PdfExtractor + 'static> Gateway<S, X> {
    pub fn new(storage: S, extractor: X, config: AppConfig) -> Self {
        Self {
            limiter: RateLimiter::from_config(&config.rate_limits),
            storage,
            extractor: Arc::new(extractor),
            config,
        }
    }

    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn remaining(&self, channel: Channel) -> usize {
        self.limiter.remaining(channel)
    }

    /// Rejects an over-limit attachment list before any PDF is read. Does not
    /// consume rate quota.
    pub fn check_document_count(&self, count: usize) -> GatewayResult<()> {
        guards::check_document_count(count, &self.config.limits)
            .map_err(|e| self.reject(Channel::ExtractPdf, e))
    }

    pub async fn extract_pdf(&self, path: &str) -> GatewayResult<ExtractedDocument> {
        self.guarded(Channel::ExtractPdf, self.extract_pdf_unguarded(path))
            .await
    }

    pub async fn load_template(&self, path: &str) -> GatewayResult<TemplateData> {
        self.guarded(Channel::LoadTemplate, async {
            let limits = &self.config.limits;
            guards::check_path("template_path", path, "json", limits)?;
            let size = self.storage.file_size(path).await?;
            guards::check_file_size("template_path", size, limits.max_template_bytes)?;

            let data = self.storage.read_file(path).await?;
            let template: TemplateData = serde_json::from_slice(&data)?;
            guards::check_template(&template, limits)?;
            tracing::info!(
                "Loaded template {} ({} filled fields)",
                path,
                template.filled_count()
            );
            Ok(template)
        })
        .await
    }

    pub async fn save_template(&self, path: &str, template: &TemplateData) -> GatewayResult<String> {
        self.guarded(Channel::SaveTemplate, async {
            let limits = &self.config.limits;
            guards::check_path("template_path", path, "json", limits)?;
            guards::check_template(template, limits)?;

            let json = serde_json::to_vec_pretty(template)?;
            self.storage.write_file(path, &json).await?;
            tracing::info!("Saved template to {}", path);
            Ok(path.to_string())
        })
        .await
    }

    pub async fn save_document(&self, path: &str, content: &str) -> GatewayResult<String> {
        self.guarded(Channel::SaveDocument, async {
            let limits = &self.config.limits;
            guards::check_path("output_path", path, "md", limits)?;
            guards::check_content_length("markdown", content, limits.max_document_bytes)?;

            self.storage.write_file(path, content.as_bytes()).await?;
            tracing::info!("Saved document to {} ({} bytes)", path, content.len());
            Ok(path.to_string())
        })
        .await
    }

    pub async fn list_consultants(&self) -> GatewayResult<Vec<String>> {
        self.guarded(Channel::ListConsultants, async {
            let files = self
                .storage
                .list_files(&self.config.consultants.directory, "md")
                .await?;
            Ok(names_from_files(&files))
        })
        .await
    }

    pub async fn generate(&self, input: &GenerationInput) -> GatewayResult<GeneratedDocument> {
        self.guarded(Channel::Generate, async {
            let limits = &self.config.limits;
            guards::check_template(&input.template, limits)?;
            guards::check_document_count(input.documents.len(), limits)?;

            let matches = suggest(
                &input.template,
                &input.documents,
                self.config.consultants.max_suggestions,
            );
            let available = self
                .storage
                .list_files(&self.config.consultants.directory, "md")
                .await?;
            let consultants = consult(matches, &available);

            let options = ComposeOptions {
                excerpt_chars: self.config.output.excerpt_chars,
                include_documents: self.config.output.include_documents,
            };
            let document = compose(input, consultants, chrono::Utc::now(), options);
            tracing::info!(
                "Generated '{}' ({} tier, {} fields, {} documents, {} consultants)",
                document.title,
                document.complexity,
                document.filled_fields,
                document.document_count,
                document.consultants.len()
            );
            Ok(document)
        })
        .await
    }

    pub async fn export_bundle(
        &self,
        path: &str,
        document: &GeneratedDocument,
        input: &GenerationInput,
    ) -> GatewayResult<String> {
        self.guarded(Channel::ExportBundle, async {
            guards::check_path("bundle_path", path, "zip", &self.config.limits)?;
            let data = build_bundle(document, input)?;
            self.storage.write_file(path, &data).await?;
            tracing::info!("Exported bundle to {} ({} bytes)", path, data.len());
            Ok(path.to_string())
        })
        .await
    }

    async fn extract_pdf_unguarded(&self, path: &str) -> Result<ExtractedDocument> {
        let limits = &self.config.limits;
        guards::check_path("pdf_path", path, "pdf", limits)?;
        let size = self.storage.file_size(path).await?;
        guards::check_file_size("pdf_path", size, limits.max_pdf_bytes)?;

        let data = self.storage.read_file(path).await?;
        // The file may have changed since the size check.
        guards::check_file_size("pdf_path", data.len() as u64, limits.max_pdf_bytes)?;
        guards::check_pdf_header("pdf_path", &data)?;

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&data))
            .await
            .map_err(|e| AppError::processing(format!("extraction task failed: {}", e)))??;

        if text.trim().is_empty() {
            tracing::warn!("No extractable text in {} (scanned document?)", path);
        }

        let (text, truncated) = truncate_chars(text, limits.max_extracted_chars);
        if truncated {
            tracing::warn!(
                "Extracted text of {} truncated to {} characters",
                path,
                limits.max_extracted_chars
            );
        }

        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        let stats = analyze_text(&text);
        tracing::info!(
            "Extracted {} words from {} ({} complexity)",
            stats.words,
            file_name,
            stats.complexity
        );

        Ok(ExtractedDocument {
            file_name,
            size_bytes: size,
            text,
            truncated,
            stats,
        })
    }

    /// Rate check, then the operation; any failure is logged in full and
    /// returned sanitized.
    async fn guarded<T>(
        &self,
        channel: Channel,
        operation: impl Future<Output = Result<T>>,
    ) -> GatewayResult<T> {
        if let Err(e) = self.limiter.check(channel) {
            return Err(self.reject(channel, e));
        }
        operation.await.map_err(|e| self.reject(channel, e))
    }

    fn reject(&self, channel: Channel, error: AppError) -> GatewayError {
        tracing::warn!(
            "{} rejected: {} (category: {:?})",
            channel,
            error,
            error.category()
        );
        GatewayError {
            channel,
            category: error.category(),
            message: sanitize_error(&error),
        }
    }
}
