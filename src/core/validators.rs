//! Input validation for search parameters
//!
//! Pure functions: each maps raw client input to a normalized value or a
//! human-readable rejection message. The [`SearchValidator`] trait lets the
//! orchestrator take them as an injected dependency.

use crate::core::types::{Region, SearchType};

/// Minimum name length for character-name searches
pub const MIN_CHARACTER_NAME_LEN: usize = 2;
/// Minimum name length for family-name searches
pub const MIN_FAMILY_NAME_LEN: usize = 3;
/// Maximum name length for any search
pub const MAX_NAME_LEN: usize = 16;

/// Validate and normalize a region. Empty input falls back to EU.
pub fn validate_region(raw: &str) -> Result<Region, String> {
    if raw.trim().is_empty() {
        return Ok(Region::Eu);
    }
    raw.parse()
}

/// Normalize a search type. Never fails; unknown values mean family name.
pub fn validate_search_type(raw: &str) -> SearchType {
    match raw.trim() {
        "characterName" | "1" => SearchType::CharacterName,
        _ => SearchType::FamilyName,
    }
}

/// Validate an adventurer name and return its normalized form
pub fn validate_query(raw: &str, region: Region, search_type: SearchType) -> Result<String, String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err("Adventurer name is missing.".to_string());
    }

    let min_len = min_name_len(region, search_type);
    let len = name.chars().count();

    if len < min_len {
        return Err(format!(
            "Adventurer name should be at least {} symbols long.",
            min_len
        ));
    }

    if len > MAX_NAME_LEN {
        return Err(format!(
            "Adventurer name should not be longer than {} symbols.",
            MAX_NAME_LEN
        ));
    }

    // Letters and digits of any script; Hangul names are common in KR.
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err("Adventurer name contains a forbidden symbol.".to_string());
    }

    Ok(name.to_string())
}

fn min_name_len(region: Region, search_type: SearchType) -> usize {
    match (region, search_type) {
        (_, SearchType::CharacterName) | (Region::Kr, SearchType::FamilyName) => {
            MIN_CHARACTER_NAME_LEN
        }
        _ => MIN_FAMILY_NAME_LEN,
    }
}

/// Validation rules consumed by the batch orchestrator
pub trait SearchValidator: Send + Sync {
    fn validate_region(&self, raw: &str) -> Result<Region, String>;

    fn validate_search_type(&self, raw: &str) -> SearchType;

    fn validate_query(
        &self,
        raw: &str,
        region: Region,
        search_type: SearchType,
    ) -> Result<String, String>;
}

/// The gateway's built-in validation rules
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl SearchValidator for DefaultValidator {
    fn validate_region(&self, raw: &str) -> Result<Region, String> {
        validate_region(raw)
    }

    fn validate_search_type(&self, raw: &str) -> SearchType {
        validate_search_type(raw)
    }

    fn validate_query(
        &self,
        raw: &str,
        region: Region,
        search_type: SearchType,
    ) -> Result<String, String> {
        validate_query(raw, region, search_type)
    }
}
