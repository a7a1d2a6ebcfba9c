#[cfg(feature = "cli")]
pub mod cli;

use crate::adapters::notion::{NOTION_API_BASE, NOTION_VERSION};
use crate::core::resolver::ResolverSettings;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{
    validate_no_placeholder, validate_positive_number, validate_range, validate_required_value,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Through the backend proxy.
    #[default]
    Intermediary,
    /// Straight to the Notion API.
    Notion,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub intermediary: Option<IntermediaryConfig>,
    pub notion: Option<NotionConfig>,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntermediaryConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default)]
    pub database_id: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    #[serde(default = "default_notion_api_base")]
    pub api_base: String,
    #[serde(default = "default_notion_version")]
    pub version: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

// Keeps the token out of logs.
impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_base", &self.api_base)
            .field("version", &self.version)
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("database_id", &self.database_id)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_step_timeout_ms")]
    pub step_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            step_timeout_ms: default_step_timeout_ms(),
        }
    }
}

impl ResolverConfig {
    pub fn settings(&self) -> ResolverSettings {
        ResolverSettings {
            step_timeout: Duration::from_millis(self.step_timeout_ms),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_notion_api_base() -> String {
    NOTION_API_BASE.to_string()
}

fn default_notion_version() -> String {
    NOTION_VERSION.to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10
}

fn default_step_timeout_ms() -> u64 {
    5_000
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Builds the configuration from `FOLIO_*` and `NOTION_*` variables.
    ///
    /// Missing required values are left empty and reported by `validate`.
    pub fn from_env() -> Result<Self> {
        let kind = match env::var("FOLIO_SOURCE") {
            Ok(raw) => parse_source_kind(&raw)?,
            Err(_) => SourceKind::default(),
        };
        let database_id = env::var("NOTION_DB_ID").unwrap_or_default();

        let step_timeout_ms = match env::var("FOLIO_STEP_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ContentError::InvalidConfigValueError {
                    field: "FOLIO_STEP_TIMEOUT_MS".to_string(),
                    value: raw.clone(),
                    reason: "must be a whole number of milliseconds".to_string(),
                })?,
            Err(_) => default_step_timeout_ms(),
        };

        Ok(Self {
            source: SourceConfig { kind },
            intermediary: Some(IntermediaryConfig {
                base_url: env::var("FOLIO_BACKEND_URL").unwrap_or_else(|_| default_backend_url()),
                database_id: database_id.clone(),
            }),
            notion: Some(NotionConfig {
                api_base: env::var("NOTION_API_BASE").unwrap_or_else(|_| default_notion_api_base()),
                version: default_notion_version(),
                token: env::var("NOTION_TOKEN").unwrap_or_default(),
                database_id,
                page_size: default_page_size(),
                max_pages: default_max_pages(),
            }),
            resolver: ResolverConfig { step_timeout_ms },
        })
    }

    /// 替換環境變數 (例如 ${NOTION_TOKEN})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn intermediary(&self) -> Result<&IntermediaryConfig> {
        self.intermediary
            .as_ref()
            .ok_or_else(|| ContentError::MissingConfigError {
                field: "intermediary".to_string(),
            })
    }

    pub fn notion(&self) -> Result<&NotionConfig> {
        self.notion
            .as_ref()
            .ok_or_else(|| ContentError::MissingConfigError {
                field: "notion".to_string(),
            })
    }
}

pub fn parse_source_kind(raw: &str) -> Result<SourceKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "intermediary" | "backend" => Ok(SourceKind::Intermediary),
        "notion" => Ok(SourceKind::Notion),
        _ => Err(ContentError::InvalidConfigValueError {
            field: "source.kind".to_string(),
            value: raw.to_string(),
            reason: "expected 'intermediary' or 'notion'".to_string(),
        }),
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        match self.source.kind {
            SourceKind::Intermediary => {
                let backend = self.intermediary()?;
                validate_url("intermediary.base_url", &backend.base_url)?;
                validate_required_value("intermediary.database_id", &backend.database_id)?;
                validate_no_placeholder("intermediary.database_id", &backend.database_id)?;
            }
            SourceKind::Notion => {
                let notion = self.notion()?;
                validate_url("notion.api_base", &notion.api_base)?;
                validate_required_value("notion.token", &notion.token)?;
                validate_no_placeholder("notion.token", &notion.token)?;
                validate_required_value("notion.database_id", &notion.database_id)?;
                validate_no_placeholder("notion.database_id", &notion.database_id)?;
                validate_required_value("notion.version", &notion.version)?;
                validate_range("notion.page_size", notion.page_size, 1, 100)?;
                validate_positive_number("notion.max_pages", notion.max_pages as usize, 1)?;
            }
        }

        validate_positive_number(
            "resolver.step_timeout_ms",
            self.resolver.step_timeout_ms as usize,
            1,
        )?;

        Ok(())
    }
}
