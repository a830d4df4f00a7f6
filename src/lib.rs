pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod gateway;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command, GenerateArgs};

pub use adapters::{LocalStorage, PdfTextExtractor};
pub use config::{toml_config::AppConfig, GenerationRequest};
pub use core::{engine::GenerationEngine, pipeline::SpecPipeline};
pub use domain::model::{Category, TemplateData};
pub use gateway::{Channel, Gateway, GatewayError};
pub use utils::error::{AppError, Result};
