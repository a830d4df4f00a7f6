use crate::domain::ports::ConfigProvider;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "agent-forge")]
#[command(about = "Build agent specification documents from a 96-field template and reference PDFs")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a markdown specification
    Generate(GenerateArgs),
    /// Write an empty template to fill in
    Init {
        #[arg(default_value = "template.json")]
        path: String,
    },
    /// Extract and analyze the text of one PDF
    Extract {
        path: String,
        /// Print the extracted text instead of the statistics
        #[arg(long)]
        text: bool,
    },
    /// List the consultants available in the configured directory
    Consultants,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Filled template (JSON)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Reference PDFs to extract
    #[arg(long = "pdf", value_delimiter = ',')]
    pub pdfs: Vec<String>,

    #[arg(short, long, default_value = "agent-spec.md")]
    pub output: String,

    /// Also write a zip bundle with the template, field export and extracted text
    #[arg(long)]
    pub bundle: Option<String>,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,
}

impl ConfigProvider for GenerateArgs {
    fn template_path(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn pdf_paths(&self) -> &[String] {
        &self.pdfs
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn bundle_path(&self) -> Option<&str> {
        self.bundle.as_deref()
    }
}
