use crate::core::extract::extract_signals;
use crate::domain::model::SeriesRecord;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Occurrence counts keyed by raw string, in first-seen order.
///
/// Keys are never normalised: `"8"` and `"8.0"` are separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn into_entries(self) -> Vec<(String, usize)> {
        self.entries
    }
}

impl<'a> FromIterator<&'a str> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for key in iter {
            map.increment(key);
        }
        map
    }
}

/// The four per-dimension distributions of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    pub by_release_year: FrequencyMap,
    pub by_imdb_rating: FrequencyMap,
    pub by_total_seasons: FrequencyMap,
    pub by_genre: FrequencyMap,
}

/// Single pass over `records`, accumulating every dimension at once.
pub fn aggregate(records: &[SeriesRecord]) -> Result<Frequencies> {
    let mut frequencies = Frequencies::default();

    for record in records {
        let signals = extract_signals(record)?;

        if let Some(year) = signals.year {
            frequencies.by_release_year.increment(year);
        }
        if let Some(rating) = signals.imdb_rating {
            frequencies.by_imdb_rating.increment(rating);
        }
        if let Some(seasons) = signals.total_seasons {
            frequencies.by_total_seasons.increment(seasons);
        }
        if let Some(genre) = signals.primary_genre {
            frequencies.by_genre.increment(genre);
        }
    }

    tracing::debug!(
        "Aggregated {} records: {} years, {} ratings, {} season counts, {} genres",
        records.len(),
        frequencies.by_release_year.len(),
        frequencies.by_imdb_rating.len(),
        frequencies.by_total_seasons.len(),
        frequencies.by_genre.len()
    );

    Ok(frequencies)
}
