use crate::core::{ConfigProvider, PdfExtractor, Pipeline, Storage};
use crate::domain::model::{GeneratedDocument, GenerationInput, TemplateData};
use crate::gateway::Gateway;
use crate::utils::error::Result;

/// Template + PDFs in, markdown (and optionally a bundle) out, with every
/// filesystem and parser call routed through the gateway.
pub struct SpecPipeline<S: Storage, X: PdfExtractor, C: ConfigProvider> {
    gateway: Gateway<S, X>,
    config: C,
}

impl<S: Storage, X: PdfExtractor + 'static, C: ConfigProvider> SpecPipeline<S, X, C> {
    pub fn new(gateway: Gateway<S, X>, config: C) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &Gateway<S, X> {
        &self.gateway
    }
}

#[async_trait::async_trait]
impl<S: Storage, X: PdfExtractor + 'static, C: ConfigProvider> Pipeline for SpecPipeline<S, X, C> {
    async fn extract(&self) -> Result<GenerationInput> {
        let template = match self.config.template_path() {
            Some(path) => self.gateway.load_template(path).await?,
            None => {
                tracing::warn!("No template given, generating from an empty template");
                TemplateData::new()
            }
        };

        self.gateway
            .check_document_count(self.config.pdf_paths().len())?;

        let mut documents = Vec::with_capacity(self.config.pdf_paths().len());
        for path in self.config.pdf_paths() {
            tracing::debug!("Extracting text from {}", path);
            documents.push(self.gateway.extract_pdf(path).await?);
        }

        Ok(GenerationInput {
            template,
            documents,
        })
    }

    async fn transform(&self, input: &GenerationInput) -> Result<GeneratedDocument> {
        Ok(self.gateway.generate(input).await?)
    }

    /// The bundle is built and written first: a failing bundle then leaves
    /// no markdown behind.
    async fn load(&self, input: &GenerationInput, document: GeneratedDocument) -> Result<String> {
        if let Some(bundle_path) = self.config.bundle_path() {
            self.gateway
                .export_bundle(bundle_path, &document, input)
                .await?;
        }

        let output_path = self
            .gateway
            .save_document(self.config.output_path(), &document.markdown)
            .await?;
        Ok(output_path)
    }
}
