use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A TV series as stored by the catalog backend.
///
/// Every descriptive field is a loosely-typed string. Input accepts both the
/// catalog's own field names and the capitalised OMDb spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, alias = "Year", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, alias = "Rated", skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(default, alias = "Released", skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(default, alias = "Runtime", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, alias = "Genre", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, alias = "Director", skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, alias = "Writer", skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(default, alias = "Actors", skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(default, alias = "Plot", skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, alias = "Language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, alias = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, alias = "Awards", skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(default, alias = "Poster", skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, alias = "Metascore", skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
    #[serde(default, rename = "imdbRating", skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(default, rename = "imdbVotes", skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(default, rename = "totalSeasons", skip_serializing_if = "Option::is_none")]
    pub total_seasons: Option<String>,
}

impl SeriesRecord {
    pub fn new(title: impl Into<String>, imdb_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            imdb_id: imdb_id.into(),
            ..Default::default()
        }
    }

    pub fn with_released(mut self, released: impl Into<String>) -> Self {
        self.released = Some(released.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_imdb_rating(mut self, rating: impl Into<String>) -> Self {
        self.imdb_rating = Some(rating.into());
        self
    }

    pub fn with_total_seasons(mut self, seasons: impl Into<String>) -> Self {
        self.total_seasons = Some(seasons.into());
        self
    }
}

/// A frequency distribution whose entries are already in report order.
///
/// Serialises as a JSON object, keeping entry order (a plain `serde_json::Map`
/// would re-sort the keys as strings, putting `"10"` before `"2"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedFrequencies(Vec<(String, usize)>);

impl SortedFrequencies {
    pub fn new(entries: Vec<(String, usize)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, count)| *count)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for SortedFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SortedFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SortedFrequencies;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category keys to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, count)) = access.next_entry::<String, usize>()? {
                    entries.push((key, count));
                }
                Ok(SortedFrequencies(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// 統計報表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub series_by_release_year: SortedFrequencies,
    pub series_by_imdb_rating: SortedFrequencies,
    pub series_by_total_seasons: SortedFrequencies,
    pub series_by_genre: SortedFrequencies,
    pub average_imdb_rating: f64,
    pub most_popular_year: String,
    pub average_total_seasons: f64,
    pub series_with_rating_8_or_higher: usize,
    pub total_series_count: usize,
}
