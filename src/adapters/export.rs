use crate::domain::model::{GeneratedDocument, GenerationInput, TemplateData};
use crate::utils::error::{AppError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// Filled fields as `category,slot,value` rows.
pub fn fields_to_csv(template: &TemplateData) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "slot", "value"])?;
    for (category, slot, value) in template.iter_filled() {
        let slot = (slot + 1).to_string();
        writer.write_record([category.key(), slot.as_str(), value])?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::processing(format!("CSV flush failed: {}", e)))
}

/// Zip archive holding the markdown, the template, the field export and
/// each extracted document's text. Document entries carry their 1-based
/// position (`documents/01-brief.txt`) so equal file stems stay distinct.
pub fn build_bundle(document: &GeneratedDocument, input: &GenerationInput) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("specification.md", FileOptions::default())?;
    zip.write_all(document.markdown.as_bytes())?;

    zip.start_file::<_, ()>("template.json", FileOptions::default())?;
    zip.write_all(serde_json::to_string_pretty(&input.template)?.as_bytes())?;

    zip.start_file::<_, ()>("fields.csv", FileOptions::default())?;
    zip.write_all(&fields_to_csv(&input.template)?)?;

    for (index, doc) in input.documents.iter().enumerate() {
        let stem = Path::new(&doc.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        zip.start_file::<_, ()>(document_entry_name(index, stem), FileOptions::default())?;
        zip.write_all(doc.text.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn document_entry_name(index: usize, stem: &str) -> String {
    format!("documents/{:02}-{}.txt", index + 1, stem)
}
