//! Points-of-interest acquisition from the Overpass API.
//!
//! The pipeline is build, execute, normalize: [`query::build_query`] renders
//! a city and its category filters into Overpass QL,
//! [`OverpassClient::execute`] posts the query to each configured mirror in
//! turn until one answers with parseable JSON, and
//! [`normalize::normalize_elements`] turns the raw elements into
//! [`cityguide_core::Poi`] records. [`OverpassClient::fetch_pois`] composes
//! the three and degrades every failure to an empty list.

pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use error::OverpassError;
pub use normalize::normalize_elements;
pub use query::build_query;
