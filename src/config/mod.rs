#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;

/// Inputs for a single generation run, independent of how they were collected.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub template_path: Option<String>,
    pub pdf_paths: Vec<String>,
    pub output_path: String,
    pub bundle_path: Option<String>,
}

impl ConfigProvider for GenerationRequest {
    fn template_path(&self) -> Option<&str> {
        self.template_path.as_deref()
    }

    fn pdf_paths(&self) -> &[String] {
        &self.pdf_paths
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn bundle_path(&self) -> Option<&str> {
        self.bundle_path.as_deref()
    }
}
