use crate::core::{SeriesRecord, SeriesSource, Storage};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::validate_file_extension;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Json,
    Csv,
}

impl InputFormat {
    /// 依副檔名推斷輸入格式
    pub fn from_path(path: &str) -> Result<Self> {
        validate_file_extension("input", path, &["json", "csv"])?;
        if path.to_ascii_lowercase().ends_with(".csv") {
            Ok(InputFormat::Csv)
        } else {
            Ok(InputFormat::Json)
        }
    }
}

/// Parses a series listing: either a bare JSON array, or an object wrapping
/// the array under `series`.
pub fn parse_json_records(data: &[u8]) -> Result<Vec<SeriesRecord>> {
    let value: serde_json::Value = serde_json::from_slice(data)?;

    let items = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut obj) => match obj.remove("series") {
            Some(series @ serde_json::Value::Array(_)) => series,
            _ => {
                return Err(StatsError::SourceError {
                    message: "expected a JSON array of series or an object with a `series` array"
                        .to_string(),
                })
            }
        },
        other => {
            return Err(StatsError::SourceError {
                message: format!("expected a JSON array of series, got {}", other),
            })
        }
    };

    Ok(serde_json::from_value(items)?)
}

pub fn parse_csv_records(data: &[u8]) -> Result<Vec<SeriesRecord>> {
    let mut reader = csv::Reader::from_reader(data);
    let records = reader
        .deserialize::<SeriesRecord>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
    Ok(records)
}

/// Series exported to a JSON or CSV file.
pub struct FileSource<S: Storage> {
    storage: S,
    path: String,
    format: InputFormat,
}

impl<S: Storage> FileSource<S> {
    pub fn new(storage: S, path: String, format: InputFormat) -> Self {
        Self {
            storage,
            path,
            format,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> SeriesSource for FileSource<S> {
    async fn fetch(&self) -> Result<Vec<SeriesRecord>> {
        let data = self.storage.read_file(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), self.path);

        match self.format {
            InputFormat::Json => parse_json_records(&data),
            InputFormat::Csv => parse_csv_records(&data),
        }
    }

    fn describe(&self) -> String {
        format!("file {} ({:?})", self.path, self.format)
    }
}

/// Detail the catalog backend sends with a 404 when its series table is empty.
const NO_SERIES_DETAIL: &str = "No series found";

/// Full-record export served by the catalog backend under `/series`.
///
/// The endpoint has to return every stored field. The backend's
/// `/series/all` listing only carries title, year, poster and imdbID, which
/// is not enough to build a report.
pub struct HttpSource {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
}

impl HttpSource {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            headers: HashMap::new(),
        })
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

#[async_trait::async_trait]
impl SeriesSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<SeriesRecord>> {
        tracing::debug!("Making API request to: {}", self.endpoint);

        let mut request = self.client.get(&self.endpoint);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            let body = response.text().await?;
            if body.contains(NO_SERIES_DETAIL) {
                tracing::debug!("{} reports an empty catalog", self.endpoint);
                return Err(StatsError::EmptyCollectionError);
            }
            return Err(StatsError::SourceError {
                message: format!("{} returned status {}", self.endpoint, status),
            });
        }

        if !status.is_success() {
            return Err(StatsError::SourceError {
                message: format!("{} returned status {}", self.endpoint, status),
            });
        }

        let body = response.bytes().await?;
        parse_json_records(&body)
    }

    fn describe(&self) -> String {
        format!("API {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path("series.json").unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_path("dump/Series.CSV").unwrap(), InputFormat::Csv);
        assert!(InputFormat::from_path("series.xml").is_err());
    }

    #[test]
    fn test_parse_json_wrapped_listing() {
        let data = br#"{"series": [{"title": "Dark", "imdbID": "tt5753856", "imdbRating": "8.7"}]}"#;
        let records = parse_json_records(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].imdb_rating.as_deref(), Some("8.7"));
    }

    #[test]
    fn test_parse_json_rejects_scalar() {
        assert!(matches!(
            parse_json_records(b"42"),
            Err(StatsError::SourceError { .. })
        ));
    }

    #[test]
    fn test_parse_csv_records_with_empty_cells() {
        let data = "title,imdbID,released,genre,imdbRating,totalSeasons\n\
                    Dark,tt5753856,01 Dec 2017,\"Crime, Drama, Mystery\",8.7,3\n\
                    Unknown,tt0000001,,,,\n";

        let records = parse_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].genre.as_deref(), Some("Crime, Drama, Mystery"));
        assert_eq!(records[0].total_seasons.as_deref(), Some("3"));
        assert!(records[1].released.is_none());
        assert!(records[1].imdb_rating.is_none());
    }

    #[tokio::test]
    async fn test_file_source_reads_json() {
        let temp_dir = TempDir::new().unwrap();
        let body = serde_json::json!([
            {"title": "Fargo", "imdbID": "tt2802850", "released": "15 Apr 2014", "totalSeasons": "5"}
        ]);
        std::fs::write(temp_dir.path().join("series.json"), body.to_string()).unwrap();

        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let source = FileSource::new(storage, "series.json".to_string(), InputFormat::Json);

        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Fargo");
        assert!(source.describe().contains("series.json"));
    }

    #[tokio::test]
    async fn test_http_source_successful_response() {
        let server = MockServer::start();
        let mock_data = serde_json::json!([
            {"id": 1, "title": "Chernobyl", "imdbID": "tt7366338", "imdbRating": "9.3", "totalSeasons": "1"},
            {"id": 2, "title": "Succession", "imdbID": "tt7660850", "imdbRating": "8.9", "totalSeasons": "4"}
        ]);

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/series/export")
                .header("Authorization", "Bearer token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data);
        });

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer token".to_string());
        let source = HttpSource::new(server.url("/series/export"), Duration::from_secs(5))
            .unwrap()
            .with_headers(headers);

        let records = source.fetch().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].imdb_id, "tt7660850");
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/series/export");
            then.status(500);
        });

        let source = HttpSource::new(server.url("/series/export"), Duration::from_secs(5)).unwrap();
        let result = source.fetch().await;

        api_mock.assert();
        assert!(matches!(result, Err(StatsError::SourceError { .. })));
    }

    #[tokio::test]
    async fn test_http_source_empty_catalog_not_found() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/series/export");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"detail": "No series found"}));
        });

        let source = HttpSource::new(server.url("/series/export"), Duration::from_secs(5)).unwrap();
        let result = source.fetch().await;

        api_mock.assert();
        assert!(matches!(result, Err(StatsError::EmptyCollectionError)));
    }

    #[tokio::test]
    async fn test_http_source_unknown_route_is_source_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/series/export");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"detail": "Not Found"}));
        });

        let source = HttpSource::new(server.url("/series/export"), Duration::from_secs(5)).unwrap();
        let result = source.fetch().await;

        api_mock.assert();
        assert!(matches!(result, Err(StatsError::SourceError { .. })));
    }
}
