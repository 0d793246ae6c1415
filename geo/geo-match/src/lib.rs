//! Geographic attribute matching for campus building meshes.
//!
//! This crate loads a building-footprint dataset (GeoJSON polygons with
//! descriptive properties) and joins it to building meshes:
//!
//! - [`GeoDataset`] holds the parsed [`GeoBuildingRecord`]s
//! - [`CentroidIndex`] maps each record's rounded centroid to the record
//! - [`GeoTransform`] projects model coordinates into geographic space
//! - [`match_bounds`] joins one mesh, by its bounding box, to a record
//! - [`point_in_ring`] answers "which footprint is this point in?"
//!
//! The join is an exact match on centroids rounded to two decimals. It is
//! fragile by nature: unmatched meshes are normal, and are reported through
//! [`MatchStats`] rather than treated as errors.
//!
//! # Example
//!
//! ```
//! use geo_match::{CentroidIndex, GeoDataset, GeoTransform, match_bounds};
//! use mesh_types::{Aabb, Point3};
//!
//! let dataset = GeoDataset::from_geojson_str(r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "BldgName": "Hall" },
//!         "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2]]] }
//!     }]
//! }"#).unwrap();
//! let index = CentroidIndex::build(&dataset);
//!
//! let transform = GeoTransform::uniform(1.0, Default::default());
//! let bounds = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 5.0, 2.0));
//! let joined = match_bounds(&bounds, &index, &transform);
//! assert_eq!(joined.record.unwrap().attributes.name.as_deref(), Some("Hall"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod dataset;
mod error;
pub mod geojson;
mod index;
mod matcher;
mod polygon;
mod record;
mod transform;

pub use dataset::GeoDataset;
pub use error::{GeoError, GeoResult};
pub use index::{CentroidIndex, KeyCollision};
pub use matcher::{BuildingMatch, MatchStats, match_bounds};
pub use polygon::point_in_ring;
pub use record::{BuildingAttributes, CentroidKey, GeoBuildingRecord, ring_centroid};
pub use transform::{DEFAULT_SCALE, GeoTransform};
