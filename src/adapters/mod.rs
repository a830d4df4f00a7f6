// Adapters layer: concrete implementations for the filesystem, PDF parsing and exports.

pub mod export;
pub mod pdf;
pub mod storage;

pub use pdf::PdfTextExtractor;
pub use storage::LocalStorage;
