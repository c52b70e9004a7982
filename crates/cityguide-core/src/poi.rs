//! The normalized point-of-interest record and its category taxonomy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic category of a point of interest.
///
/// The wire format is the lowercase tag downstream consumers already match
/// on: `"cafe"`, `"restaurant"`, `"toilet"`, `"parking"`, `"event"`,
/// `"activity"`. [`PoiCategory::Other`] serializes as the `"poi"` catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Cafe,
    Restaurant,
    Toilet,
    Parking,
    Event,
    Activity,
    #[serde(rename = "poi")]
    Other,
}

impl PoiCategory {
    /// Returns the lowercase wire string for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PoiCategory::Cafe => "cafe",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Toilet => "toilet",
            PoiCategory::Parking => "parking",
            PoiCategory::Event => "event",
            PoiCategory::Activity => "activity",
            PoiCategory::Other => "poi",
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category filter string.
#[derive(Debug, thiserror::Error)]
#[error("unknown category '{0}' (expected cafe, restaurant, toilet, parking, event, activity, activity-indoor, activity-outdoor, or poi)")]
pub struct ParseCategoryError(String);

/// A client-side category selector: a plain category, or one of the two
/// indoor/outdoor refinements of the activity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Category(PoiCategory),
    ActivityIndoor,
    ActivityOutdoor,
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = match s {
            "cafe" => CategoryFilter::Category(PoiCategory::Cafe),
            "restaurant" => CategoryFilter::Category(PoiCategory::Restaurant),
            "toilet" => CategoryFilter::Category(PoiCategory::Toilet),
            "parking" => CategoryFilter::Category(PoiCategory::Parking),
            "event" => CategoryFilter::Category(PoiCategory::Event),
            "activity" => CategoryFilter::Category(PoiCategory::Activity),
            "poi" => CategoryFilter::Category(PoiCategory::Other),
            "activity-indoor" => CategoryFilter::ActivityIndoor,
            "activity-outdoor" => CategoryFilter::ActivityOutdoor,
            other => return Err(ParseCategoryError(other.to_string())),
        };
        Ok(filter)
    }
}

/// Display-ready summary carried alongside the raw tags.
///
/// `rating` and `opening_hours` hold the literal `"unknown"` when the source
/// element carries neither value; consumers render the string as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiProperties {
    #[serde(rename = "type")]
    pub category: PoiCategory,
    pub name: String,
    pub rating: String,
    #[serde(rename = "openingHours")]
    pub opening_hours: String,
}

/// A normalized point of interest.
///
/// Constructed exactly once per successful normalization pass and never
/// mutated afterwards; this layer does not persist records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Source element ID, copied verbatim. Uniqueness is not guaranteed here.
    pub id: i64,
    pub lat: f64,
    /// Longitude. Serialized as `lng`, the key downstream consumers read.
    pub lng: f64,
    /// Display name. Always non-empty; unnamed elements are dropped upstream.
    pub name: String,
    #[serde(rename = "type")]
    pub category: PoiCategory,
    /// Raw source tags, passed through for downstream use (cuisine, hours, ...).
    pub tags: BTreeMap<String, String>,
    pub properties: PoiProperties,
}

impl Poi {
    /// Returns `true` when the source tagged this element `indoor=yes`.
    #[must_use]
    pub fn is_indoor(&self) -> bool {
        self.tags.get("indoor").is_some_and(|v| v == "yes")
    }

    /// Returns `true` when this record matches the given category selector.
    ///
    /// The indoor/outdoor refinements match activity records only, split on
    /// [`Poi::is_indoor`].
    #[must_use]
    pub fn matches(&self, filter: CategoryFilter) -> bool {
        match filter {
            CategoryFilter::Category(category) => self.category == category,
            CategoryFilter::ActivityIndoor => {
                self.category == PoiCategory::Activity && self.is_indoor()
            }
            CategoryFilter::ActivityOutdoor => {
                self.category == PoiCategory::Activity && !self.is_indoor()
            }
        }
    }
}
