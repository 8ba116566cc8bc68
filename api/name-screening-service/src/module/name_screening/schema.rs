use super::model::{ConsolidatedView, ScreeningSubject, lenient_id, lenient_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional inline subject posted to `/process`. Takes precedence over the
/// stored `input.json` when it carries at least one name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRequestBody {
    #[serde(default, deserialize_with = "lenient_id")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<Value>,
    #[serde(default)]
    pub aliases: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
}

impl ScreeningRequestBody {
    pub fn has_names(&self) -> bool {
        let has_full_name = self.full_name.as_ref().is_some_and(|v| !v.is_null());
        let has_aliases = matches!(&self.aliases, Some(Value::Array(items)) if !items.is_empty());
        has_full_name || has_aliases
    }

    pub fn into_subject(self, path_request_id: &str) -> ScreeningSubject {
        let aliases = match self.aliases {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        };
        ScreeningSubject {
            request_id: Some(
                self.request_id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| path_request_id.to_string()),
            ),
            full_name: Some(
                self.full_name
                    .and_then(|v| v.as_str().map(str::to_owned))
                    .unwrap_or_default(),
            ),
            aliases,
            country: self.country,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ConsolidatedView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub watchlist_path: String,
}
