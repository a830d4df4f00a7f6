use crate::domain::model::{GeneratedDocument, GenerationInput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn file_size(&self, path: &str) -> impl std::future::Future<Output = Result<u64>> + Send;
    /// File names (not paths) directly inside `dir` carrying `extension`.
    fn list_files(
        &self,
        dir: &str,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait PdfExtractor: Send + Sync {
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn template_path(&self) -> Option<&str>;
    fn pdf_paths(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn bundle_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<GenerationInput>;
    async fn transform(&self, input: &GenerationInput) -> Result<GeneratedDocument>;
    async fn load(&self, input: &GenerationInput, document: GeneratedDocument) -> Result<String>;
}
