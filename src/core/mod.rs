pub mod etl;
pub mod extract;
pub mod frequency;
pub mod pipeline;
pub mod report;
pub mod statistics;

pub use crate::domain::model::{Report, SeriesRecord, SortedFrequencies};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SeriesSource, Storage};
pub use crate::utils::error::Result;
