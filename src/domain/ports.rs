use crate::domain::model::{Report, SeriesRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn report_filename(&self) -> &str;
    fn pretty_output(&self) -> bool;
}

/// Supplies the full, already-materialised series collection.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<SeriesRecord>>;

    fn describe(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SeriesRecord>>;
    async fn transform(&self, records: Vec<SeriesRecord>) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<String>;
}
