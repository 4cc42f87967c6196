use crate::core::report::compute_report;
use crate::core::{ConfigProvider, Pipeline, Report, SeriesRecord, SeriesSource, Storage};
use crate::utils::error::Result;

pub struct StatsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: Box<dyn SeriesSource>,
}

impl<S: Storage, C: ConfigProvider> StatsPipeline<S, C> {
    pub fn new(storage: S, config: C, source: Box<dyn SeriesSource>) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let bytes = if self.config.pretty_output() {
            serde_json::to_vec_pretty(report)?
        } else {
            serde_json::to_vec(report)?
        };
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StatsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SeriesRecord>> {
        tracing::debug!("Fetching series from {}", self.source.describe());
        let records = self.source.fetch().await?;

        if records.is_empty() {
            tracing::warn!("Source {} returned no series", self.source.describe());
        }

        Ok(records)
    }

    async fn transform(&self, records: Vec<SeriesRecord>) -> Result<Report> {
        compute_report(&records)
    }

    async fn load(&self, report: Report) -> Result<String> {
        let filename = self.config.report_filename();
        let output_path = format!("{}/{}", self.config.output_path(), filename);

        let data = self.render(&report)?;
        tracing::debug!("Writing report ({} bytes) to storage", data.len());
        self.storage.write_file(filename, &data).await?;

        Ok(output_path)
    }
}
