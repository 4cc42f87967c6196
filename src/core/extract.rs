//! Per-record signal extraction.

use crate::domain::model::SeriesRecord;
use crate::utils::error::{Result, StatsError};
use regex::Regex;
use std::sync::OnceLock;

const GENRE_SEPARATOR: &str = ", ";

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

/// The signals one record contributes to the frequency maps.
///
/// Rating and season values are passed through untouched; parsing happens
/// only when the statistics are reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals<'a> {
    pub year: Option<&'a str>,
    pub primary_genre: Option<&'a str>,
    pub imdb_rating: Option<&'a str>,
    pub total_seasons: Option<&'a str>,
}

/// Returns the first run of exactly four ASCII digits in `released`.
///
/// Longer digit runs (`"12345"`) are not years and are skipped.
pub fn extract_year(released: &str) -> Option<&str> {
    digit_runs()
        .find_iter(released)
        .map(|m| m.as_str())
        .find(|run| run.len() == 4)
}

pub fn primary_genre(genre: &str) -> &str {
    genre.split(GENRE_SEPARATOR).next().unwrap_or(genre)
}

// 空字串視同未填
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

pub fn extract_signals(record: &SeriesRecord) -> Result<Signals<'_>> {
    let year = match present(&record.released) {
        Some(released) => Some(extract_year(released).ok_or_else(|| StatsError::ExtractionError {
            imdb_id: record.imdb_id.clone(),
            released: released.to_string(),
        })?),
        None => None,
    };

    Ok(Signals {
        year,
        primary_genre: present(&record.genre).map(primary_genre),
        imdb_rating: present(&record.imdb_rating),
        total_seasons: present(&record.total_seasons),
    })
}
