use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Score bands, highest first. Each lower bound is inclusive.
pub const MATCH_BANDS: [(f64, MatchType); 2] = [
    (0.90, MatchType::ExactMatch),
    (0.75, MatchType::PossibleMatch),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    ExactMatch,
    PossibleMatch,
    NoMatch,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "EXACT_MATCH",
            Self::PossibleMatch => "POSSIBLE_MATCH",
            Self::NoMatch => "NO_MATCH",
        }
    }
}

/// Maps a similarity score in `[0, 1]` onto its match band.
pub fn classify(score: f64) -> MatchType {
    MATCH_BANDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map(|(_, match_type)| *match_type)
        .unwrap_or(MatchType::NoMatch)
}

/// Watchlist identity. Any JSON number or string is accepted; a missing or
/// `null` id is kept as `Null` and all such entries share one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(Number),
    Text(String),
    #[default]
    Null,
}

impl EntryId {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WatchlistEntry {
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// One request's set of names to screen, as stored in `input.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSubject {
    #[serde(default, deserialize_with = "lenient_id")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
}

/// Best score seen so far for one watchlist entry across all screened names.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub entry: &'a WatchlistEntry,
    pub score: f64,
    pub matched_input_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedName {
    pub raw: String,
    pub normalized: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatchDetail {
    pub id: Option<EntryId>,
    pub name: Option<String>,
    pub score: f64,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub id: EntryId,
    pub name: Option<String>,
    pub score: f64,
    pub matched_input_name: Option<String>,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedView {
    pub raw_name: String,
    pub normalized_name: String,
    pub all_names_screened: Vec<ScreenedName>,
    pub best_match: BestMatchDetail,
    pub top3_matches: Vec<RankedMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatchSummary {
    pub id: EntryId,
    pub name: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedView {
    pub request_id: String,
    pub screening_result: MatchType,
    pub best_match: Option<BestMatchSummary>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningViews {
    pub detailed: DetailedView,
    pub consolidated: ConsolidatedView,
}

/// Non-string values in a name position are treated as absent.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

/// Keeps the string members of an array; anything else yields no aliases.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    })
}

/// Request ids may arrive as strings or numbers.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
