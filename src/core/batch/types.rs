//! Wire types for batch adventurer search

use crate::core::types::{Profile, Region, SearchType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Largest number of queries accepted in one batch
pub const MAX_BATCH_SIZE: usize = 200;

/// Inbound batch search body. Missing and `null` fields take their zero
/// value, as do `null` entries of `queries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchSearchRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub search_type: String,
    #[serde(deserialize_with = "nullable_queries")]
    pub queries: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bypass_cache: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_queries<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let queries: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(queries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Terminal or pending classification of one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Invalid,
    Cached,
    Started,
    Pending,
    Rejected,
    Error,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 6] = [
        ItemStatus::Cached,
        ItemStatus::Started,
        ItemStatus::Pending,
        ItemStatus::Rejected,
        ItemStatus::Invalid,
        ItemStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Invalid => "invalid",
            ItemStatus::Cached => "cached",
            ItemStatus::Started => "started",
            ItemStatus::Pending => "pending",
            ItemStatus::Rejected => "rejected",
            ItemStatus::Error => "error",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result for a single query of the batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    pub query: String,
    pub status: ItemStatus,
    pub http_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Profile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    fn new(query: String, status: ItemStatus, http_status: u16) -> Self {
        Self {
            query,
            status,
            http_status,
            data: None,
            error: None,
        }
    }

    pub fn invalid(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(query.into(), ItemStatus::Invalid, 400)
        }
    }

    pub fn cached(query: impl Into<String>, data: Vec<Profile>) -> Self {
        Self {
            data: Some(data),
            ..Self::new(query.into(), ItemStatus::Cached, 200)
        }
    }

    pub fn cached_failure(query: impl Into<String>, http_status: u16) -> Self {
        Self {
            error: Some("cached non-200 response".to_string()),
            ..Self::new(query.into(), ItemStatus::Error, http_status)
        }
    }

    pub fn started(query: impl Into<String>) -> Self {
        Self::new(query.into(), ItemStatus::Started, 202)
    }

    pub fn pending(query: impl Into<String>) -> Self {
        Self::new(query.into(), ItemStatus::Pending, 202)
    }

    pub fn rejected(query: impl Into<String>) -> Self {
        Self {
            error: Some("You have exceeded the maximum number of concurrent tasks.".to_string()),
            ..Self::new(query.into(), ItemStatus::Rejected, 429)
        }
    }
}

/// Per-status counters. All six keys are always serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub cached: u32,
    pub started: u32,
    pub pending: u32,
    pub rejected: u32,
    pub invalid: u32,
    pub error: u32,
}

impl BatchStats {
    pub fn record(&mut self, status: ItemStatus) {
        *self.slot(status) += 1;
    }

    pub fn get(&self, status: ItemStatus) -> u32 {
        match status {
            ItemStatus::Cached => self.cached,
            ItemStatus::Started => self.started,
            ItemStatus::Pending => self.pending,
            ItemStatus::Rejected => self.rejected,
            ItemStatus::Invalid => self.invalid,
            ItemStatus::Error => self.error,
        }
    }

    pub fn total(&self) -> u32 {
        ItemStatus::ALL.iter().map(|status| self.get(*status)).sum()
    }

    fn slot(&mut self, status: ItemStatus) -> &mut u32 {
        match status {
            ItemStatus::Cached => &mut self.cached,
            ItemStatus::Started => &mut self.started,
            ItemStatus::Pending => &mut self.pending,
            ItemStatus::Rejected => &mut self.rejected,
            ItemStatus::Invalid => &mut self.invalid,
            ItemStatus::Error => &mut self.error,
        }
    }
}

/// Aggregated batch response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSearchResponse {
    pub region: Region,
    #[serde(serialize_with = "serialize_search_type_label")]
    pub search_type: SearchType,
    pub results: Vec<ItemOutcome>,
    pub stats: BatchStats,
}

fn serialize_search_type_label<S: Serializer>(
    search_type: &SearchType,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(search_type.label())
}
