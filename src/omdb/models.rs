//! Wire shapes of OMDb responses.
//!
//! Field presence is loose on purpose: OMDb omits fields freely, and the
//! lookup layer decides what a missing field means.

use serde::{Deserialize, Deserializer};

/// The `"Response"` flag. OMDb sends it as the strings `"True"` / `"False"`.
///
/// Only an explicit false (string, any case, or JSON boolean) is a failure;
/// any other value counts as success. A missing or `null` flag decodes as
/// failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiStatus(bool);

impl ApiStatus {
    pub const SUCCESS: Self = Self(true);
    pub const FAILURE: Self = Self(false);

    pub fn is_success(self) -> bool {
        self.0
    }
}

impl<'de> Deserialize<'de> for ApiStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Text(String),
        }

        Ok(match Option::<Flag>::deserialize(deserializer)? {
            None => Self::FAILURE,
            Some(Flag::Bool(b)) => Self(b),
            Some(Flag::Text(s)) => Self(!s.trim().eq_ignore_ascii_case("false")),
        })
    }
}

/// Body of `?s=<title>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(rename = "Response", default)]
    pub response: ApiStatus,
    /// `None` both when the field is missing and when it is `null`.
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchItem>>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

/// Body of `?i=<imdb id>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsPayload {
    #[serde(rename = "Response", default)]
    pub response: ApiStatus,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Option<Vec<RatingItem>>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingItem {
    #[serde(rename = "Source", default)]
    pub source: String,
    #[serde(rename = "Value", default)]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_variants() {
        let parse = |s: &str| serde_json::from_str::<ApiStatus>(s).unwrap();
        assert!(parse(r#""True""#).is_success());
        assert!(!parse(r#""False""#).is_success());
        assert!(!parse(r#""false""#).is_success());
        assert!(parse("true").is_success());
        assert!(!parse("false").is_success());
    }

    #[test]
    fn test_search_payload_success() {
        let body = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;
        let payload: SearchPayload = serde_json::from_str(body).unwrap();
        assert!(payload.response.is_success());
        let items = payload.search.unwrap();
        assert_eq!(items[0].imdb_id, "tt0372784");
        assert_eq!(items[0].kind.as_deref(), Some("movie"));
        assert_eq!(items[0].poster.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_search_payload_failure() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let payload: SearchPayload = serde_json::from_str(body).unwrap();
        assert!(!payload.response.is_success());
        assert!(payload.search.is_none());
        assert_eq!(payload.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_missing_status_is_failure() {
        let payload: SearchPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.response, ApiStatus::FAILURE);
    }

    #[test]
    fn test_null_status_is_failure() {
        let payload: SearchPayload =
            serde_json::from_str(r#"{"Response":null,"Error":"Invalid API key!"}"#).unwrap();
        assert_eq!(payload.response, ApiStatus::FAILURE);
        assert_eq!(payload.error.as_deref(), Some("Invalid API key!"));

        let details: DetailsPayload = serde_json::from_str(r#"{"Response":null}"#).unwrap();
        assert!(!details.response.is_success());
    }

    #[test]
    fn test_null_search_is_absent() {
        let payload: SearchPayload =
            serde_json::from_str(r#"{"Response":"True","Search":null}"#).unwrap();
        assert!(payload.search.is_none());
    }

    #[test]
    fn test_details_payload() {
        let body = r#"{
            "Title": "Batman Begins",
            "Year": "2005",
            "Director": "Christopher Nolan",
            "Ratings": [{"Source": "Internet Movie Database", "Value": "8.2/10"}],
            "Response": "True"
        }"#;
        let payload: DetailsPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.response, ApiStatus::SUCCESS);
        assert_eq!(payload.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(payload.ratings.unwrap()[0].value, "8.2/10");
    }
}
