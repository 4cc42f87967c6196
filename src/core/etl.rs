use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct StatsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StatsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting series statistics run...");

        // Extract
        tracing::info!("📥 Loading series...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Loaded {} series", records.len());

        // Transform
        tracing::info!("🧮 Computing statistics...");
        let report = self.pipeline.transform(records).await?;
        tracing::info!(
            "Summarised {} series: average rating {:.2}, most popular year {}",
            report.total_series_count,
            report.average_imdb_rating,
            report.most_popular_year
        );

        // Load
        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
