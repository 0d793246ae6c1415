//! GeoJSON `FeatureCollection` parsing.
//!
//! Only `Polygon` features are read, and only their outer ring. Property
//! values are accepted as strings or numbers interchangeably.

use nalgebra::Point2;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::GeoResult;
use crate::record::{BuildingAttributes, GeoBuildingRecord};

/// Property keys read from each feature.
pub mod keys {
    /// Building name.
    pub const NAME: &str = "BldgName";
    /// Building number.
    pub const NUMBER: &str = "BldgNo";
    /// Street address.
    pub const ADDRESS: &str = "Street_Add";
    /// Height.
    pub const HEIGHT: &str = "Height";
    /// Footprint area.
    pub const AREA: &str = "SHAPE_Area";
    /// Zoning.
    pub const ZONE: &str = "Zones";
    /// Global id.
    pub const ID: &str = "GlobalID";
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Other,
}

/// Parse a GeoJSON `FeatureCollection` into building records.
///
/// Features without a `Polygon` geometry are skipped. Positions with fewer
/// than two coordinates are dropped; altitude is ignored.
///
/// # Errors
///
/// Returns [`GeoError::MissingAttributes`] if the text is not a feature
/// collection.
pub fn parse_feature_collection(text: &str) -> GeoResult<Vec<GeoBuildingRecord>> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    let total = collection.features.len();

    let records: Vec<_> = collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let Some(Geometry::Polygon { coordinates }) = feature.geometry else {
                return None;
            };
            let ring = coordinates
                .into_iter()
                .next()
                .unwrap_or_default()
                .into_iter()
                .filter_map(|pos| match pos[..] {
                    [x, y, ..] => Some(Point2::new(x, y)),
                    _ => None,
                })
                .collect();
            let props = feature.properties.unwrap_or_default();
            Some(GeoBuildingRecord::new(attributes(&props), ring))
        })
        .collect();

    if records.len() < total {
        debug!(
            "Skipped {} non-polygon features of {}",
            total - records.len(),
            total
        );
    }

    Ok(records)
}

fn attributes(props: &Map<String, Value>) -> BuildingAttributes {
    BuildingAttributes {
        name: text(props, keys::NAME),
        number: text(props, keys::NUMBER),
        address: text(props, keys::ADDRESS),
        height: number(props, keys::HEIGHT),
        area: number(props, keys::AREA),
        zone: text(props, keys::ZONE),
        id: text(props, keys::ID),
    }
}

fn text(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(props: &Map<String, Value>, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
