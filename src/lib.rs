pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::source::{FileSource, HttpSource, InputFormat};
pub use crate::adapters::storage::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::config::SourceSpec;
pub use crate::core::{etl::StatsEngine, pipeline::StatsPipeline, report::compute_report};
pub use crate::domain::model::{Report, SeriesRecord, SortedFrequencies};
pub use crate::utils::error::{Result, StatsError};
