#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::source::{FileSource, HttpSource, InputFormat};
use crate::adapters::storage::LocalStorage;
use crate::core::SeriesSource;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_path, validate_range, validate_url};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_REPORT_FILENAME: &str = "series_stats.json";

/// Where the series collection comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    File {
        path: String,
        format: Option<InputFormat>,
    },
    Http {
        endpoint: String,
        timeout_seconds: u64,
        headers: HashMap<String, String>,
    },
}

impl SourceSpec {
    pub fn validate(&self) -> Result<()> {
        match self {
            SourceSpec::File { path, format } => {
                validate_path("source.path", path)?;
                if format.is_none() {
                    InputFormat::from_path(path)?;
                }
                Ok(())
            }
            SourceSpec::Http {
                endpoint,
                timeout_seconds,
                ..
            } => {
                validate_url("source.endpoint", endpoint)?;
                validate_range("source.timeout_seconds", *timeout_seconds, 1, 300)
            }
        }
    }

    pub fn build(&self) -> Result<Box<dyn SeriesSource>> {
        match self {
            SourceSpec::File { path, format } => {
                let format = match format {
                    Some(format) => *format,
                    None => InputFormat::from_path(path)?,
                };
                // 相對路徑以工作目錄為準
                let storage = LocalStorage::new(".".to_string());
                Ok(Box::new(FileSource::new(storage, path.clone(), format)))
            }
            SourceSpec::Http {
                endpoint,
                timeout_seconds,
                headers,
            } => {
                let source = HttpSource::new(endpoint.clone(), Duration::from_secs(*timeout_seconds))?
                    .with_headers(headers.clone());
                Ok(Box::new(source))
            }
        }
    }
}

/// Parses `Name: value` header arguments.
pub fn parse_headers(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|header| match header.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(StatsError::InvalidConfigValueError {
                field: "header".to_string(),
                value: header.clone(),
                reason: "Expected `Name: value`".to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = vec!["Authorization: Bearer abc".to_string(), "X-Trace:1".to_string()];
        let headers = parse_headers(&raw).unwrap();
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
        assert_eq!(headers.get("X-Trace").map(String::as_str), Some("1"));

        assert!(parse_headers(&["no-colon".to_string()]).is_err());
    }

    #[test]
    fn test_file_source_spec_requires_known_extension() {
        let spec = SourceSpec::File {
            path: "series.txt".to_string(),
            format: None,
        };
        assert!(spec.validate().is_err());

        let spec = SourceSpec::File {
            path: "series.txt".to_string(),
            format: Some(InputFormat::Json),
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_http_source_spec_validation() {
        let spec = SourceSpec::Http {
            endpoint: "http://localhost:8000/series/export".to_string(),
            timeout_seconds: 30,
            headers: HashMap::new(),
        };
        assert!(spec.validate().is_ok());

        let spec = SourceSpec::Http {
            endpoint: "localhost".to_string(),
            timeout_seconds: 30,
            headers: HashMap::new(),
        };
        assert!(spec.validate().is_err());
    }
}
