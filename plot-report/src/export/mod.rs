//! Modules d'export (bundle JSON, GeoJSON, PNG)

pub mod files;
pub mod geojson;

pub use files::{write_bundle, WrittenFiles};
