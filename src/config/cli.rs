use crate::config::{AppConfig, SourceKind};
use crate::domain::model::Section;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio-content")]
#[command(about = "Resolve portfolio content from the backend or Notion, with mock fallback")]
pub struct CliArgs {
    /// Path to a TOML configuration file (environment variables are used otherwise)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured content source
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Section to resolve, e.g. `projects` (all sections when omitted)
    #[arg(short, long)]
    pub section: Option<Section>,

    /// Resolve each section separately and print them keyed by name
    #[arg(long, conflicts_with = "section")]
    pub all_sections: bool,

    /// Override the per-step network timeout
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// Loads the file or environment configuration and applies flag overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_env()?,
        };

        if let Some(kind) = self.source {
            tracing::debug!("Source overridden to {:?}", kind);
            config.source.kind = kind;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.resolver.step_timeout_ms = timeout_ms;
        }

        Ok(config)
    }
}
