pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::adapters::{build_source, IntermediarySource, NotionSource};
pub use crate::config::{AppConfig, SourceKind};
pub use crate::core::resolver::{FallbackResolver, Resolution, ResolverSettings, Tier};
pub use crate::domain::model::{ContentItem, Section};
pub use crate::domain::ports::ContentSource;
pub use crate::utils::error::{ContentError, Result};
