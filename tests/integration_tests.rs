use httpmock::prelude::*;
use series_stats::config::SourceSpec;
use series_stats::{CliConfig, LocalStorage, Report, StatsEngine, StatsError, StatsPipeline};
use std::collections::HashMap;
use tempfile::TempDir;

fn cli_config(output_path: &str) -> CliConfig {
    CliConfig {
        input: None,
        api_endpoint: None,
        format: None,
        headers: vec![],
        timeout_seconds: 5,
        output_path: output_path.to_string(),
        report_filename: "series_stats.json".to_string(),
        compact: false,
        print: false,
        verbose: false,
    }
}

#[tokio::test]
async fn test_end_to_end_with_catalog_api() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let mock_data = serde_json::json!([
        {"id": 1, "title": "Severance", "imdbID": "tt11280740", "released": "18 Feb 2022",
         "genre": "Drama, Mystery, Sci-Fi", "imdbRating": "8.7", "totalSeasons": "2", "owner_id": 1},
        {"id": 2, "title": "The Bear", "imdbID": "tt14452776", "released": "23 Jun 2022",
         "genre": "Comedy, Drama", "imdbRating": "8.5", "totalSeasons": "3", "owner_id": 1},
        {"id": 3, "title": "Andor", "imdbID": "tt9253284", "released": "21 Sep 2022",
         "genre": "Action, Adventure, Drama", "imdbRating": "8.4", "totalSeasons": "2", "owner_id": 2}
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/series/export");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let mut config = cli_config(&output_path);
    config.api_endpoint = Some(server.url("/series/export"));

    let source = config.source_spec().unwrap().build().unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = StatsPipeline::new(storage, config, source);
    let engine = StatsEngine::new(pipeline);

    let result = engine.run().await.unwrap();
    api_mock.assert();
    assert!(result.ends_with("series_stats.json"));

    let full_path = temp_dir.path().join("series_stats.json");
    let report: Report = serde_json::from_slice(&std::fs::read(full_path).unwrap()).unwrap();

    assert_eq!(report.total_series_count, 3);
    assert_eq!(report.most_popular_year, "2022");
    assert_eq!(report.series_by_release_year.get("2022"), Some(3));
    assert_eq!(report.series_by_total_seasons.keys().collect::<Vec<_>>(), vec!["2", "3"]);
    assert_eq!(report.average_total_seasons, 2.5);
    assert_eq!(report.series_with_rating_8_or_higher, 3);
    assert_eq!(
        report.series_by_genre.keys().collect::<Vec<_>>(),
        vec!["Action", "Comedy", "Drama"]
    );
}

#[tokio::test]
async fn test_end_to_end_with_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out");
    let input_path = temp_dir.path().join("series.csv");

    std::fs::write(
        &input_path,
        "title,imdbID,released,genre,imdbRating,totalSeasons\n\
         Fleabag,tt5687612,21 Jul 2016,\"Comedy, Drama\",8.7,2\n\
         Ted Lasso,tt10986410,14 Aug 2020,\"Comedy, Drama, Sport\",8.8,3\n\
         Taskmaster,tt4934214,28 Jul 2015,\"Comedy, Game-Show\",8.6,\n",
    )
    .unwrap();

    let mut config = cli_config(output_path.to_str().unwrap());
    config.input = Some(input_path.to_str().unwrap().to_string());
    config.compact = true;

    let spec = config.source_spec().unwrap();
    assert!(matches!(spec, SourceSpec::File { .. }));

    let storage = LocalStorage::new(output_path.to_str().unwrap().to_string());
    let pipeline = StatsPipeline::new(storage, config, spec.build().unwrap());
    let engine = StatsEngine::new(pipeline);

    engine.run().await.unwrap();

    let written = std::fs::read_to_string(output_path.join("series_stats.json")).unwrap();
    assert!(written.starts_with(r#"{"series_by_release_year":{"2015":1,"2016":1,"2020":1}"#));
    assert!(written.contains(r#""series_by_genre":{"Comedy":3}"#));
    assert!(written.contains(r#""total_series_count":3"#));
}

#[tokio::test]
async fn test_end_to_end_with_api_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(503);
    });

    let mut config = cli_config(&output_path);
    config.api_endpoint = Some(server.url("/failed"));

    let source = config.source_spec().unwrap().build().unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let engine = StatsEngine::new(StatsPipeline::new(storage, config, source));

    let error = engine.run().await.unwrap_err();
    api_mock.assert();

    assert!(matches!(error, StatsError::SourceError { .. }));
    assert_eq!(error.exit_code(), 2);
    assert!(!temp_dir.path().join("series_stats.json").exists());
}

#[tokio::test]
async fn test_end_to_end_with_empty_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/series/export").header("Authorization", "Bearer t0ken");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"series": []}));
    });

    let spec = SourceSpec::Http {
        endpoint: server.url("/series/export"),
        timeout_seconds: 5,
        headers: HashMap::from([("Authorization".to_string(), "Bearer t0ken".to_string())]),
    };

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = StatsPipeline::new(storage, cli_config(&output_path), spec.build().unwrap());
    let engine = StatsEngine::new(pipeline);

    let error = engine.run().await.unwrap_err();
    api_mock.assert();
    assert!(matches!(error, StatsError::EmptyCollectionError));
}

#[tokio::test]
async fn test_end_to_end_with_catalog_reporting_no_series() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/series/export");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"detail": "No series found"}));
    });

    let spec = SourceSpec::Http {
        endpoint: server.url("/series/export"),
        timeout_seconds: 5,
        headers: HashMap::new(),
    };

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = StatsPipeline::new(storage, cli_config(&output_path), spec.build().unwrap());
    let engine = StatsEngine::new(pipeline);

    let error = engine.run().await.unwrap_err();
    api_mock.assert();
    assert!(matches!(error, StatsError::EmptyCollectionError));
    assert_eq!(error.exit_code(), 1);
    assert!(!temp_dir.path().join("series_stats.json").exists());
}
