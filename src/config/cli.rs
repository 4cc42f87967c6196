use crate::adapters::source::{InputFormat, DEFAULT_TIMEOUT_SECONDS};
use crate::config::{parse_headers, SourceSpec, DEFAULT_REPORT_FILENAME};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "series-stats")]
#[command(about = "Summary statistics for a TV series catalog")]
pub struct CliConfig {
    /// JSON or CSV file holding the series collection
    #[arg(long, conflicts_with = "api_endpoint")]
    pub input: Option<String>,

    /// Catalog endpoint returning the series listing as JSON
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Extra request header, `Name: value` (repeatable)
    #[arg(long = "header")]
    pub headers: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
    pub report_filename: String,

    #[arg(long, help = "Write compact JSON instead of pretty-printed")]
    pub compact: bool,

    #[arg(long, help = "Also print the report to stdout")]
    pub print: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn source_spec(&self) -> Result<SourceSpec> {
        match (&self.input, &self.api_endpoint) {
            (Some(path), None) => Ok(SourceSpec::File {
                path: path.clone(),
                format: self.format,
            }),
            (None, Some(endpoint)) => Ok(SourceSpec::Http {
                endpoint: endpoint.clone(),
                timeout_seconds: self.timeout_seconds,
                headers: parse_headers(&self.headers)?,
            }),
            (Some(_), Some(_)) => Err(StatsError::ConfigError {
                message: "--input and --api-endpoint are mutually exclusive".to_string(),
            }),
            (None, None) => Err(StatsError::MissingConfigError {
                field: "--input or --api-endpoint".to_string(),
            }),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_filename(&self) -> &str {
        &self.report_filename
    }

    fn pretty_output(&self) -> bool {
        !self.compact
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.source_spec()?.validate()?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("report_filename", &self.report_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_arguments() {
        let config = CliConfig::parse_from(["series-stats", "--input", "series.csv", "--compact"]);

        assert_eq!(
            config.source_spec().unwrap(),
            SourceSpec::File {
                path: "series.csv".to_string(),
                format: None,
            }
        );
        assert!(!config.pretty_output());
        assert_eq!(config.report_filename(), "series_stats.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_api_arguments() {
        let config = CliConfig::parse_from([
            "series-stats",
            "--api-endpoint",
            "http://localhost:8000/series/export",
            "--header",
            "Authorization: Bearer abc",
            "--timeout-seconds",
            "10",
        ]);

        match config.source_spec().unwrap() {
            SourceSpec::Http {
                endpoint,
                timeout_seconds,
                headers,
            } => {
                assert_eq!(endpoint, "http://localhost:8000/series/export");
                assert_eq!(timeout_seconds, 10);
                assert_eq!(headers.len(), 1);
            }
            other => panic!("expected http source, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_fails_validation() {
        let config = CliConfig::parse_from(["series-stats"]);
        assert!(matches!(
            config.validate(),
            Err(StatsError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_both_sources_rejected_by_parser() {
        let result = CliConfig::try_parse_from([
            "series-stats",
            "--input",
            "series.json",
            "--api-endpoint",
            "http://localhost/series/export",
        ]);
        assert!(result.is_err());
    }
}
