//! Shared search domain types
//!
//! Regions, search types, the cache/in-flight key and the profile record that
//! the cache replays to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Game region a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Eu,
    Na,
    Sa,
    Kr,
}

impl Region {
    /// All supported regions
    pub const ALL: [Region; 4] = [Region::Eu, Region::Na, Region::Sa, Region::Kr];

    /// Upper-case region code
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Na => "NA",
            Region::Sa => "SA",
            Region::Kr => "KR",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == upper)
            .ok_or_else(|| format!("Region {} is not supported.", upper))
    }
}

/// Which name the query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    CharacterName,
    #[default]
    FamilyName,
}

impl SearchType {
    /// Numeric code used by the upstream search page
    pub fn code(&self) -> &'static str {
        match self {
            SearchType::CharacterName => "1",
            SearchType::FamilyName => "2",
        }
    }

    /// Label echoed back to clients
    pub fn label(&self) -> &'static str {
        match self {
            SearchType::CharacterName => "characterName",
            SearchType::FamilyName => "familyName",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one search: used both as cache key and in-flight task key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub region: Region,
    pub query: String,
    pub search_type: SearchType,
}

impl SearchKey {
    pub fn new(region: Region, query: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            region,
            query: query.into(),
            search_type,
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.search_type.code(), self.query)
    }
}

/// One adventurer profile as returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<GuildRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<CharacterSummary>,
    /// Attributes this gateway does not interpret; replayed unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Minimal profile with only a family name
    pub fn named(family_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            region: None,
            profile_target: None,
            guild: None,
            characters: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub main: bool,
}
