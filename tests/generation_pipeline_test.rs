use agent_forge::core::Pipeline;
use agent_forge::domain::model::ComplexityTier;
use agent_forge::domain::ports::PdfExtractor;
use agent_forge::{
    AppConfig, Category, Gateway, GenerationEngine, GenerationRequest, LocalStorage, SpecPipeline,
    TemplateData,
};
use anyhow::Result;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Stands in for the real parser: returns the bytes after the PDF header as text.
struct HeaderStrippingExtractor;

impl PdfExtractor for HeaderStrippingExtractor {
    fn extract_text(&self, data: &[u8]) -> agent_forge::Result<String> {
        let body = data.strip_prefix(b"%PDF-1.4\n").unwrap_or(data);
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

/// Counts how often the parser is reached.
#[derive(Clone, Default)]
struct CountingExtractor {
    calls: Arc<AtomicUsize>,
}

impl PdfExtractor for CountingExtractor {
    fn extract_text(&self, _data: &[u8]) -> agent_forge::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("parsed".to_string())
    }
}

fn filled_template() -> Result<TemplateData> {
    let mut template = TemplateData::new();
    template.set(Category::Identity, 0, "Migration Pilot")?;
    template.set(Category::Identity, 1, "Senior database engineer persona")?;
    template.set(Category::Purpose, 0, "Plan zero-downtime schema migrations")?;
    template.set(Category::Tools, 0, "psql, pg_dump")?;
    template.set(Category::Constraints, 0, "Never drop a column without a backup")?;
    Ok(template)
}

async fn setup(dir: &TempDir) -> Result<()> {
    let root = dir.path();
    tokio::fs::create_dir_all(root.join("consultants")).await?;
    tokio::fs::write(root.join("consultants/database-architect.md"), "# DB").await?;
    tokio::fs::write(root.join("consultants/technical-writer.md"), "# Docs").await?;

    let template = serde_json::to_string_pretty(&filled_template()?)?;
    tokio::fs::write(root.join("template.json"), template).await?;

    tokio::fs::write(
        root.join("runbook.pdf"),
        "%PDF-1.4\nROLLBACK PLAN\n- snapshot the database\n- run the migration\nSee https://wiki.example.com/runbook",
    )
    .await?;
    Ok(())
}

fn config_for(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.output.base_path = dir.path().to_str().unwrap().to_string();
    config
}

#[tokio::test]
async fn test_end_to_end_generation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    setup(&temp_dir).await?;

    let config = config_for(&temp_dir);
    let storage = LocalStorage::new(config.output.base_path.clone());
    let gateway = Gateway::new(storage, HeaderStrippingExtractor, config);
    let request = GenerationRequest {
        template_path: Some("template.json".to_string()),
        pdf_paths: vec!["runbook.pdf".to_string()],
        output_path: "out/migration-pilot.md".to_string(),
        bundle_path: Some("out/migration-pilot.zip".to_string()),
    };

    let engine = GenerationEngine::new(SpecPipeline::new(gateway, request));
    let output_path = engine.run().await?;
    assert_eq!(output_path, "out/migration-pilot.md");

    let markdown = tokio::fs::read_to_string(temp_dir.path().join("out/migration-pilot.md")).await?;
    assert!(markdown.starts_with("# Agent Specification: Migration Pilot\n"));
    assert!(markdown.contains("| Complexity | simple |"));
    assert!(markdown.contains("| Filled fields | 5/96 |"));
    assert!(markdown.contains("| Reference documents | 1 |"));
    assert!(markdown.contains("## Tools & Integrations\n\n- psql, pg_dump\n"));
    assert!(markdown.contains("### runbook.pdf"));
    assert!(markdown.contains("- Links: 1 | E-mail addresses: 0"));
    assert!(markdown.contains("- **database-architect** (available), matched: database, schema, migration"));
    assert!(!markdown.contains("## Success Criteria"));

    let bundle = std::fs::read(temp_dir.path().join("out/migration-pilot.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle))?;
    let mut csv = String::new();
    archive.by_name("fields.csv")?.read_to_string(&mut csv)?;
    assert!(csv.starts_with("category,slot,value\nidentity,1,Migration Pilot\n"));
    assert!(archive.by_name("documents/01-runbook.txt").is_ok());
    Ok(())
}

#[tokio::test]
async fn test_missing_template_generates_untitled_document() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_for(&temp_dir);
    let storage = LocalStorage::new(config.output.base_path.clone());
    let gateway = Gateway::new(storage, HeaderStrippingExtractor, config);
    let request = GenerationRequest {
        output_path: "spec.md".to_string(),
        ..GenerationRequest::default()
    };
    let pipeline = SpecPipeline::new(gateway, request);

    let input = pipeline.extract().await?;
    assert_eq!(input.template.filled_count(), 0);

    let document = pipeline.transform(&input).await?;
    assert_eq!(document.title, "Untitled Agent");
    assert_eq!(document.complexity, ComplexityTier::Simple);
    assert!(document.consultants.is_empty());

    pipeline.load(&input, document).await?;
    assert!(temp_dir.path().join("spec.md").exists());
    Ok(())
}

#[tokio::test]
async fn test_pipeline_stops_on_invalid_pdf() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("notes.pdf"), "plain text, not a pdf").await?;

    let config = config_for(&temp_dir);
    let storage = LocalStorage::new(config.output.base_path.clone());
    let gateway = Gateway::new(storage, HeaderStrippingExtractor, config);
    let request = GenerationRequest {
        pdf_paths: vec!["notes.pdf".to_string()],
        output_path: "spec.md".to_string(),
        ..GenerationRequest::default()
    };

    let engine = GenerationEngine::new(SpecPipeline::new(gateway, request));
    let err = engine.run().await.unwrap_err();
    assert_eq!(
        err.user_friendly_message(),
        "extract_pdf: Validation error on 'pdf_path': file is not a PDF document"
    );
    assert!(!temp_dir.path().join("spec.md").exists());
    Ok(())
}

#[tokio::test]
async fn test_same_named_pdfs_bundle_together() -> Result<()> {
    let temp_dir = TempDir::new()?;
    for dir in ["a", "b"] {
        tokio::fs::create_dir_all(temp_dir.path().join(dir)).await?;
        tokio::fs::write(
            temp_dir.path().join(dir).join("brief.pdf"),
            format!("%PDF-1.4\nBrief from {}", dir),
        )
        .await?;
    }

    let config = config_for(&temp_dir);
    let storage = LocalStorage::new(config.output.base_path.clone());
    let gateway = Gateway::new(storage, HeaderStrippingExtractor, config);
    let request = GenerationRequest {
        pdf_paths: vec!["a/brief.pdf".to_string(), "b/brief.pdf".to_string()],
        output_path: "spec.md".to_string(),
        bundle_path: Some("spec.zip".to_string()),
        ..GenerationRequest::default()
    };

    let engine = GenerationEngine::new(SpecPipeline::new(gateway, request));
    engine.run().await?;
    assert!(temp_dir.path().join("spec.md").exists());

    let bundle = std::fs::read(temp_dir.path().join("spec.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle))?;
    let mut first = String::new();
    archive.by_name("documents/01-brief.txt")?.read_to_string(&mut first)?;
    let mut second = String::new();
    archive.by_name("documents/02-brief.txt")?.read_to_string(&mut second)?;
    assert_eq!(first, "Brief from a");
    assert_eq!(second, "Brief from b");
    Ok(())
}

#[tokio::test]
async fn test_too_many_pdfs_rejected_before_parsing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut pdf_paths = Vec::new();
    for i in 0..12 {
        let name = format!("doc{}.pdf", i);
        tokio::fs::write(temp_dir.path().join(&name), "%PDF-1.4\nbody").await?;
        pdf_paths.push(name);
    }

    let mut config = config_for(&temp_dir);
    config.rate_limits.extract_pdf = 100;
    let storage = LocalStorage::new(config.output.base_path.clone());
    let extractor = CountingExtractor::default();
    let calls = Arc::clone(&extractor.calls);
    let gateway = Gateway::new(storage, extractor, config);
    let request = GenerationRequest {
        pdf_paths,
        output_path: "spec.md".to_string(),
        ..GenerationRequest::default()
    };

    let engine = GenerationEngine::new(SpecPipeline::new(gateway, request));
    let err = engine.run().await.unwrap_err();
    assert_eq!(
        err.user_friendly_message(),
        "extract_pdf: Validation error on 'documents': at most 10 PDFs can be attached"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!temp_dir.path().join("spec.md").exists());
    Ok(())
}
