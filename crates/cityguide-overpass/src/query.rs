//! Overpass QL query construction.

use cityguide_core::cities;

/// Food group: restaurants and cafes.
const FOOD_CLAUSES: &[&str] = &[
    r#"nwr["amenity"="restaurant"](area.searchArea);"#,
    r#"nwr["amenity"="cafe"](area.searchArea);"#,
];

const TOILET_CLAUSE: &str = r#"nwr["amenity"="toilets"](area.searchArea);"#;

const PARKING_CLAUSE: &str = r#"nwr["amenity"="parking"](area.searchArea);"#;

/// Activity group: anything tagged for leisure or tourism.
const ACTIVITY_CLAUSES: &[&str] = &[
    r#"nwr["leisure"](area.searchArea);"#,
    r#"nwr["tourism"](area.searchArea);"#,
];

/// Event group: both the plain and the namespaced event key occur in the
/// wild.
const EVENT_CLAUSES: &[&str] = &[
    r#"nwr["event"](area.searchArea);"#,
    r#"nwr["event:type"](area.searchArea);"#,
];

/// Renders a city and a set of category filters into an Overpass QL query.
///
/// The city name is mapped through the local-name registry first, so
/// "Geneva" queries the `Genève` administrative area. Filters select clause
/// groups; several aliases map onto the same group (`food`, `restaurant`
/// and `cafe` all select the food group). An empty filter set, an explicit
/// `all`, or a set containing nothing recognizable selects every group
/// rather than none.
///
/// Always returns a query string; a city with no matching administrative
/// area simply yields zero results downstream.
#[must_use]
pub fn build_query(city: &str, filters: &[&str]) -> String {
    let area_name = cities::resolve_osm_name(city);

    let wants = |tag: &str| filters.iter().any(|filter| *filter == tag);
    let mut clauses: Vec<&str> = Vec::new();

    if wants("food") || wants("restaurant") || wants("cafe") {
        clauses.extend_from_slice(FOOD_CLAUSES);
    }
    if wants("toilet") {
        clauses.push(TOILET_CLAUSE);
    }
    if wants("parking") {
        clauses.push(PARKING_CLAUSE);
    }
    if wants("activity") || wants("activity-indoor") || wants("activity-outdoor") || wants("leisure")
    {
        clauses.extend_from_slice(ACTIVITY_CLAUSES);
    }
    if wants("event") {
        clauses.extend_from_slice(EVENT_CLAUSES);
    }

    // Unfiltered, explicitly unfiltered, or nothing recognized: fetch every
    // group instead of sending an empty union.
    if filters.is_empty() || wants("all") || clauses.is_empty() {
        clauses.clear();
        clauses.extend_from_slice(FOOD_CLAUSES);
        clauses.push(TOILET_CLAUSE);
        clauses.push(PARKING_CLAUSE);
        clauses.extend_from_slice(ACTIVITY_CLAUSES);
        clauses.extend_from_slice(EVENT_CLAUSES);
    }

    format!(
        "[out:json][timeout:25];\n\
         area[\"name\"=\"{area_name}\"][\"boundary\"=\"administrative\"][\"admin_level\"=\"8\"]->.searchArea;\n\
         (\n{}\n);\n\
         out center;",
        clauses.join("\n")
    )
}
