use crate::core::frequency::{aggregate, FrequencyMap, Frequencies};
use crate::core::statistics::{compute_statistics, Statistics};
use crate::domain::model::{Report, SeriesRecord, SortedFrequencies};
use crate::utils::error::{Result, StatsError};
use std::cmp::Ordering;

/// How the keys of one distribution are ordered in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    Integer,
    Float,
    Lexical,
}

fn compare_numeric<T, F>(a: &str, b: &str, parse: F) -> Ordering
where
    T: PartialOrd,
    F: Fn(&str) -> Option<T>,
{
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        // 非數字 key 排在最後
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn compare_keys(order: KeyOrder, a: &str, b: &str) -> Ordering {
    match order {
        KeyOrder::Integer => compare_numeric(a, b, |key| key.trim().parse::<i64>().ok()),
        KeyOrder::Float => compare_numeric(a, b, |key| key.trim().parse::<f64>().ok()),
        KeyOrder::Lexical => a.cmp(b),
    }
}

pub fn sort_frequencies(map: FrequencyMap, order: KeyOrder) -> SortedFrequencies {
    let mut entries = map.into_entries();
    entries.sort_by(|(a, _), (b, _)| compare_keys(order, a, b));
    SortedFrequencies::new(entries)
}

pub fn assemble_report(frequencies: Frequencies, statistics: Statistics) -> Report {
    Report {
        series_by_release_year: sort_frequencies(frequencies.by_release_year, KeyOrder::Integer),
        series_by_imdb_rating: sort_frequencies(frequencies.by_imdb_rating, KeyOrder::Float),
        series_by_total_seasons: sort_frequencies(frequencies.by_total_seasons, KeyOrder::Integer),
        series_by_genre: sort_frequencies(frequencies.by_genre, KeyOrder::Lexical),
        average_imdb_rating: statistics.average_imdb_rating,
        most_popular_year: statistics.most_popular_year,
        average_total_seasons: statistics.average_total_seasons,
        series_with_rating_8_or_higher: statistics.series_with_rating_8_or_higher,
        total_series_count: statistics.total_series_count,
    }
}

/// Builds the catalog summary report for `records`.
///
/// An empty collection is rejected before anything is aggregated. The input
/// is only read; nothing is kept between calls.
pub fn compute_report(records: &[SeriesRecord]) -> Result<Report> {
    if records.is_empty() {
        return Err(StatsError::EmptyCollectionError);
    }

    let frequencies = aggregate(records)?;
    let statistics = compute_statistics(&frequencies, records.len())?;

    Ok(assemble_report(frequencies, statistics))
}
