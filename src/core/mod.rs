pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{GeneratedDocument, GenerationInput};
pub use crate::domain::ports::{ConfigProvider, PdfExtractor, Pipeline, Storage};
pub use crate::utils::error::Result;
