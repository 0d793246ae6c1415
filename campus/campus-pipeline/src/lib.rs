//! Campus segmentation pipeline.
//!
//! Ties the workspace together: a merged campus mesh goes in, named
//! per-building meshes with their dataset attributes come out.
//!
//! - [`PipelineConfig`] - clustering and transform settings, JSON loadable
//! - [`SceneNode`] / [`MeshNode`] - what the model loader hands over
//! - [`load_inputs`] - concurrent mesh and dataset loading
//! - [`PipelineContext`] - runs the split and the join
//! - [`BuildingMesh`] / [`Diagnostics`] - the results
//!
//! # Example
//!
//! ```
//! use campus_pipeline::{MeshNode, PipelineConfig, PipelineContext};
//! use geo_match::GeoDataset;
//!
//! let mesh = MeshNode::new(
//!     "campus",
//!     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
//!     vec![0, 2, 1],
//! );
//! let ctx = PipelineContext::new(PipelineConfig::default(), Ok(GeoDataset::empty())).unwrap();
//! let out = ctx.run(&mesh).unwrap();
//! assert_eq!(out.buildings[0].name, "Building_0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod building;
mod config;
mod context;
mod diagnostics;
mod error;
pub mod load;
mod scene;

pub use building::{BuildingMesh, DebugInfo};
pub use config::{PipelineConfig, TransformConfig};
pub use context::{CampusSplit, PipelineContext};
pub use diagnostics::Diagnostics;
pub use error::{PipelineError, PipelineResult};
pub use load::load_inputs;
pub use scene::{MeshNode, SceneNode};
