//! The fixed registry of supported Swiss cities.
//!
//! One table serves every consumer: the picker list, the alias map from
//! display names to the administrative names the geodata source indexes
//! cities under, and the centroid coordinates the weather client needs.

use serde::Serialize;

/// A supported city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub id: u32,
    /// Display name shown to users and accepted by lookups.
    pub name: &'static str,
    /// Administrative name under which the geodata source indexes the city.
    pub osm_name: &'static str,
    pub country: &'static str,
    /// Centroid latitude.
    pub lat: f64,
    /// Centroid longitude.
    pub lon: f64,
}

/// Supported cities, in picker order.
pub const CITIES: &[City] = &[
    City {
        id: 1,
        name: "Zürich",
        osm_name: "Zürich",
        country: "Switzerland",
        lat: 47.376_9,
        lon: 8.541_7,
    },
    City {
        id: 2,
        name: "Bern",
        osm_name: "Bern",
        country: "Switzerland",
        lat: 46.948_1,
        lon: 7.447_4,
    },
    City {
        id: 3,
        name: "Basel",
        osm_name: "Basel",
        country: "Switzerland",
        lat: 47.559_6,
        lon: 7.588_6,
    },
    City {
        id: 4,
        name: "Geneva",
        osm_name: "Genève",
        country: "Switzerland",
        lat: 46.204_4,
        lon: 6.143_2,
    },
    City {
        id: 5,
        name: "Lausanne",
        osm_name: "Lausanne",
        country: "Switzerland",
        lat: 46.519_7,
        lon: 6.632_3,
    },
    City {
        id: 6,
        name: "Luzern",
        osm_name: "Luzern",
        country: "Switzerland",
        lat: 47.050_2,
        lon: 8.309_3,
    },
];

/// Looks up a city by display name. Case-sensitive.
#[must_use]
pub fn find(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.name == name)
}

/// Resolves a display name to the administrative name the geodata source
/// expects. Unknown names pass through unchanged.
#[must_use]
pub fn resolve_osm_name(name: &str) -> &str {
    find(name).map_or(name, |city| city.osm_name)
}
