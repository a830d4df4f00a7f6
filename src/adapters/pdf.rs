use crate::domain::ports::PdfExtractor;
use crate::utils::error::{AppError, Result};

/// Text extraction backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        // The parser can panic on malformed input; keep that inside the boundary.
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AppError::PdfError {
                message: e.to_string(),
            }),
            Err(_) => Err(AppError::PdfError {
                message: "PDF parser aborted on malformed input".to_string(),
            }),
        }
    }
}
