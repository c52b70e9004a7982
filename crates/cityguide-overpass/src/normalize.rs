//! Normalization of raw Overpass elements into [`Poi`] records.

use std::collections::BTreeMap;

use cityguide_core::{Poi, PoiCategory, PoiProperties};

use crate::types::RawElement;

/// Value substituted when an element carries no rating or opening hours.
const UNKNOWN: &str = "unknown";

type Tags = BTreeMap<String, String>;

/// Classification rules in precedence order; the first matching predicate
/// wins. Specific amenity values come before the presence-based rules, so a
/// cafe inside a park is a cafe, and an event overrides leisure/tourism
/// tagging. Reordering these entries changes classifications.
const CLASSIFICATION_RULES: &[(fn(&Tags) -> bool, PoiCategory)] = &[
    (|tags| tag_is(tags, "amenity", "cafe"), PoiCategory::Cafe),
    (|tags| tag_is(tags, "amenity", "restaurant"), PoiCategory::Restaurant),
    (|tags| tag_is(tags, "amenity", "toilets"), PoiCategory::Toilet),
    (|tags| tag_is(tags, "amenity", "parking"), PoiCategory::Parking),
    (
        |tags| has_tag(tags, "event") || has_tag(tags, "event:type"),
        PoiCategory::Event,
    ),
    (
        |tags| has_tag(tags, "leisure") || has_tag(tags, "tourism"),
        PoiCategory::Activity,
    ),
];

fn tag_is(tags: &Tags, key: &str, value: &str) -> bool {
    tags.get(key).is_some_and(|v| v == value)
}

/// Presence check. An empty value counts as absent.
fn has_tag(tags: &Tags, key: &str) -> bool {
    tags.get(key).is_some_and(|v| !v.is_empty())
}

/// Returns the tag value if present and non-empty.
fn non_empty<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Classifies an element by its tags; elements matching no rule land in the
/// generic catch-all category.
fn classify(tags: &Tags) -> PoiCategory {
    CLASSIFICATION_RULES
        .iter()
        .find(|(matches, _)| matches(tags))
        .map_or(PoiCategory::Other, |(_, category)| *category)
}

/// Normalizes a batch of raw Overpass elements into [`Poi`] records.
///
/// Pure and infallible. Elements are dropped individually when they are
/// structurally malformed, have no resolvable coordinates, or have no
/// non-empty `name` tag; one bad element never affects the rest of the
/// batch. Output order follows input order.
#[must_use]
pub fn normalize_elements(elements: Vec<serde_json::Value>) -> Vec<Poi> {
    elements.into_iter().filter_map(normalize_element).collect()
}

fn normalize_element(value: serde_json::Value) -> Option<Poi> {
    let element: RawElement = serde_json::from_value(value).ok()?;

    // Nodes carry coordinates directly; ways and relations only have the
    // computed center. Each axis falls back independently.
    let lat = element
        .lat
        .or_else(|| element.center.as_ref().and_then(|center| center.lat))?;
    let lng = element
        .lon
        .or_else(|| element.center.as_ref().and_then(|center| center.lon))?;

    let name = non_empty(&element.tags, "name")?.to_string();

    let category = classify(&element.tags);
    let rating = non_empty(&element.tags, "rating")
        .or_else(|| non_empty(&element.tags, "rating:google"))
        .unwrap_or(UNKNOWN)
        .to_string();
    let opening_hours = non_empty(&element.tags, "opening_hours")
        .unwrap_or(UNKNOWN)
        .to_string();

    Some(Poi {
        id: element.id,
        lat,
        lng,
        name: name.clone(),
        category,
        tags: element.tags,
        properties: PoiProperties {
            category,
            name,
            rating,
            opening_hours,
        },
    })
}
