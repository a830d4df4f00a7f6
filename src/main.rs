use agent_forge::utils::error::ErrorSeverity;
use agent_forge::utils::{logger, validation::Validate};
use agent_forge::{
    AppConfig, AppError, Cli, Command, Gateway, GenerationEngine, LocalStorage, PdfTextExtractor,
    SpecPipeline, TemplateData,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    logger::init_logger(cli.verbose || config.logging.verbose, config.logging.format);
    tracing::info!("Starting agent-forge");
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output.base_path.clone());
    let gateway = Gateway::new(storage, PdfTextExtractor, config);

    let outcome = match cli.command {
        Command::Generate(args) => {
            let monitor = args.monitor;
            let pipeline = SpecPipeline::new(gateway, args);
            let engine = GenerationEngine::new_with_monitoring(pipeline, monitor);
            engine.run().await.map(|output_path| {
                println!("✅ Specification generated");
                println!("📁 Output saved to: {}", output_path);
            })
        }
        Command::Init { path } => gateway
            .save_template(&path, &TemplateData::new())
            .await
            .map(|path| println!("📝 Empty template written to {}", path))
            .map_err(AppError::from),
        Command::Extract { path, text } => gateway
            .extract_pdf(&path)
            .await
            .map_err(AppError::from)
            .and_then(|doc| {
                if text {
                    println!("{}", doc.text);
                } else {
                    println!("{}", serde_json::to_string_pretty(&doc.stats)?);
                }
                Ok(())
            }),
        Command::Consultants => gateway
            .list_consultants()
            .await
            .map(|names| {
                if names.is_empty() {
                    println!("No consultants installed");
                }
                for name in names {
                    println!("{}", name);
                }
            })
            .map_err(AppError::from),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
