pub mod complexity;
pub mod consultants;
pub mod markdown;
pub mod pdf_analysis;
