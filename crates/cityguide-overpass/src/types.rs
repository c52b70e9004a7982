//! Wire types for elements of an Overpass JSON response.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One raw result element as the mirrors emit it.
///
/// Only `id` is required. Nodes carry `lat`/`lon` directly; ways and
/// relations carry a computed `center` pair instead (the `out center;`
/// output mode). Everything else the element may contain is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Centroid coordinates attached to non-point geometries.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
