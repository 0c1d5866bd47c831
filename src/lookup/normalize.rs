//! Mapping raw OMDb payloads into the records handed to renderers.

use crate::omdb::{DetailsPayload, SearchItem};

/// OMDb's placeholder for "no value".
pub const NOT_AVAILABLE: &str = "N/A";

/// One cell of the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub kind: String,
    /// `None` when OMDb has no poster; renderers fall back to a default image.
    pub poster_url: Option<String>,
}

/// A successful search, as stored in the search cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultSet {
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl SearchResultSet {
    pub fn from_items(query: &str, items: Vec<SearchItem>) -> Self {
        Self {
            query: query.to_owned(),
            results: items.into_iter().map(SearchResult::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl From<SearchItem> for SearchResult {
    fn from(item: SearchItem) -> Self {
        Self {
            id: item.imdb_id,
            title: item.title.unwrap_or_default(),
            kind: item.kind.unwrap_or_default(),
            poster_url: item.poster.filter(|p| !p.is_empty() && p != NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Extended information shown when hovering a result.
///
/// `director` is dropped when OMDb reports `"N/A"`; `ratings` keeps the raw
/// list, possibly empty. The two rules are independent.
#[derive(custom_debug_derive::Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub id: String,
    #[debug(skip_if = Option::is_none, with = crate::fmt::opt)]
    pub title: Option<String>,
    #[debug(skip_if = Option::is_none, with = crate::fmt::opt)]
    pub year: Option<String>,
    #[debug(skip_if = Option::is_none, with = crate::fmt::opt)]
    pub director: Option<String>,
    pub ratings: Vec<Rating>,
}

impl DetailRecord {
    pub fn from_payload(asset_id: &str, payload: DetailsPayload) -> Self {
        Self {
            id: asset_id.to_owned(),
            title: payload.title.filter(|t| !t.is_empty()),
            year: payload.year.filter(|y| !y.is_empty()),
            director: payload.director.filter(|d| d != NOT_AVAILABLE),
            ratings: payload
                .ratings
                .unwrap_or_default()
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
        }
    }

    /// The rating shown in the detail panel, if any.
    pub fn primary_rating(&self) -> Option<&Rating> {
        self.ratings.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omdb::{ApiStatus, RatingItem};

    fn payload(director: Option<&str>, ratings: Vec<(&str, &str)>) -> DetailsPayload {
        DetailsPayload {
            response: ApiStatus::SUCCESS,
            title: Some("Batman".to_owned()),
            year: Some("1989".to_owned()),
            director: director.map(str::to_owned),
            ratings: Some(
                ratings
                    .into_iter()
                    .map(|(source, value)| RatingItem {
                        source: source.to_owned(),
                        value: value.to_owned(),
                    })
                    .collect(),
            ),
            error: None,
        }
    }

    #[test]
    fn test_poster_na_is_dropped() {
        let result = SearchResult::from(SearchItem {
            imdb_id: "tt1".to_owned(),
            title: Some("Batman".to_owned()),
            year: None,
            kind: Some("movie".to_owned()),
            poster: Some("N/A".to_owned()),
        });
        assert_eq!(result.poster_url, None);
        assert_eq!(result.title, "Batman");
        assert_eq!(result.kind, "movie");
    }

    #[test]
    fn test_poster_url_kept() {
        let result = SearchResult::from(SearchItem {
            poster: Some("https://img.example/p.jpg".to_owned()),
            ..Default::default()
        });
        assert_eq!(result.poster_url.as_deref(), Some("https://img.example/p.jpg"));
    }

    #[test]
    fn test_director_and_ratings_present() {
        let record = DetailRecord::from_payload(
            "tt1",
            payload(Some("Tim Burton"), vec![("Internet Movie Database", "7.5/10")]),
        );
        assert_eq!(record.id, "tt1");
        assert_eq!(record.director.as_deref(), Some("Tim Burton"));
        assert_eq!(record.primary_rating().unwrap().value, "7.5/10");
    }

    #[test]
    fn test_director_na_omitted_ratings_kept() {
        let record = DetailRecord::from_payload(
            "tt1",
            payload(Some("N/A"), vec![("Rotten Tomatoes", "72%")]),
        );
        assert_eq!(record.director, None);
        assert_eq!(record.ratings.len(), 1);
    }

    #[test]
    fn test_empty_ratings_director_kept() {
        let record = DetailRecord::from_payload("tt1", payload(Some("Tim Burton"), vec![]));
        assert_eq!(record.director.as_deref(), Some("Tim Burton"));
        assert!(record.primary_rating().is_none());
    }

    #[test]
    fn test_missing_ratings_is_empty() {
        let mut raw = payload(None, vec![]);
        raw.ratings = None;
        let record = DetailRecord::from_payload("tt1", raw);
        assert!(record.ratings.is_empty());
        assert!(record.director.is_none());
    }

    #[test]
    fn test_debug_skips_missing_fields() {
        let mut raw = payload(Some("N/A"), vec![]);
        raw.year = None;
        let shown = format!("{:?}", DetailRecord::from_payload("tt1", raw));
        assert!(!shown.contains("director"), "{shown}");
        assert!(!shown.contains("year"), "{shown}");
        assert!(shown.contains("\"Batman\""), "{shown}");
    }
}
