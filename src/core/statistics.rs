//! Reduces the frequency maps to the report's summary scalars.
//!
//! Both means are taken over the *distinct* keys of their map and are not
//! weighted by occurrence count: ratings `{"8.0": 3, "9.0": 1}` average to
//! 8.5. The catalog has always reported it this way, so the quirk is kept.
//! The threshold count, by contrast, is weighted.

use crate::core::frequency::{FrequencyMap, Frequencies};
use crate::utils::error::{Result, StatsError};

pub const RATING_THRESHOLD: f64 = 8.0;

const RATING_FIELD: &str = "imdbRating";
const SEASONS_FIELD: &str = "totalSeasons";
const RELEASED_FIELD: &str = "released";

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub average_imdb_rating: f64,
    pub most_popular_year: String,
    pub average_total_seasons: f64,
    pub series_with_rating_8_or_higher: usize,
    pub total_series_count: usize,
}

/// Parses a rating key. `"NaN"` and `"inf"` are rejected along with
/// non-numeric text, so the mean stays finite.
pub fn parse_rating(key: &str) -> Result<f64> {
    key.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .ok_or_else(|| StatsError::ParseError {
            field: RATING_FIELD.to_string(),
            value: key.to_string(),
        })
}

pub fn parse_seasons(key: &str) -> Result<i64> {
    key.trim().parse::<i64>().map_err(|_| StatsError::ParseError {
        field: SEASONS_FIELD.to_string(),
        value: key.to_string(),
    })
}

fn require_values<'a>(map: &'a FrequencyMap, field: &str) -> Result<&'a FrequencyMap> {
    if map.is_empty() {
        return Err(StatsError::EmptyAggregateError {
            field: field.to_string(),
        });
    }
    Ok(map)
}

/// Unweighted mean of the distinct rating keys.
pub fn average_rating(ratings: &FrequencyMap) -> Result<f64> {
    let ratings = require_values(ratings, RATING_FIELD)?;
    let sum = ratings
        .keys()
        .map(parse_rating)
        .sum::<Result<f64>>()?;
    Ok(sum / ratings.len() as f64)
}

/// Unweighted mean of the distinct season-count keys.
pub fn average_seasons(seasons: &FrequencyMap) -> Result<f64> {
    let seasons = require_values(seasons, SEASONS_FIELD)?;
    // 以 f64 累加，極大的 key 不會溢位
    let sum = seasons
        .keys()
        .map(|key| parse_seasons(key).map(|count| count as f64))
        .sum::<Result<f64>>()?;
    Ok(sum / seasons.len() as f64)
}

/// Year with the highest count; on a tie the earliest-inserted year wins.
pub fn modal_year(years: &FrequencyMap) -> Result<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (year, count) in require_values(years, RELEASED_FIELD)?.iter() {
        // 嚴格大於，平手保留先出現者
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((year, count));
        }
    }
    best.map(|(year, _)| year).ok_or_else(|| StatsError::EmptyAggregateError {
        field: RELEASED_FIELD.to_string(),
    })
}

/// Number of records rated at or above [`RATING_THRESHOLD`], weighted by count.
pub fn count_at_or_above_threshold(ratings: &FrequencyMap) -> Result<usize> {
    let mut total = 0;
    for (key, count) in ratings.iter() {
        if parse_rating(key)? >= RATING_THRESHOLD {
            total += count;
        }
    }
    Ok(total)
}

pub fn compute_statistics(frequencies: &Frequencies, total_series_count: usize) -> Result<Statistics> {
    if total_series_count == 0 {
        return Err(StatsError::EmptyCollectionError);
    }

    let average_imdb_rating = average_rating(&frequencies.by_imdb_rating)?;
    let most_popular_year = modal_year(&frequencies.by_release_year)?.to_string();
    let average_total_seasons = average_seasons(&frequencies.by_total_seasons)?;
    let series_with_rating_8_or_higher = count_at_or_above_threshold(&frequencies.by_imdb_rating)?;

    Ok(Statistics {
        average_imdb_rating,
        most_popular_year,
        average_total_seasons,
        series_with_rating_8_or_higher,
        total_series_count,
    })
}
