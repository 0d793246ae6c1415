//! Input loading.
//!
//! The mesh and the geographic dataset are independent, so they are read
//! concurrently and joined before any stage that needs both.

use std::path::Path;

use geo_match::{GeoDataset, GeoError, GeoResult};
use tracing::debug;

use crate::error::PipelineResult;
use crate::scene::{MeshNode, SceneNode};

/// Run both loaders on the rayon pool and wait for both.
///
/// The dataset result is returned as is: a missing dataset is not fatal,
/// and [`crate::PipelineContext::new`] decides how to degrade.
pub fn load_inputs<M, G>(
    load_mesh: M,
    load_dataset: G,
) -> (PipelineResult<SceneNode>, GeoResult<GeoDataset>)
where
    M: FnOnce() -> PipelineResult<SceneNode> + Send,
    G: FnOnce() -> GeoResult<GeoDataset> + Send,
{
    rayon::join(load_mesh, load_dataset)
}

/// Read a mesh from a JSON file.
///
/// Accepts either a tagged scene tree or a bare
/// `{"positions": [...], "indices": [...]}` dump.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is neither form.
pub fn read_scene(path: &Path) -> PipelineResult<SceneNode> {
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    let scene = if value.get("type").is_some() {
        serde_json::from_value(value)?
    } else {
        let mut mesh: MeshNode = serde_json::from_value(value)?;
        if mesh.name.is_empty() {
            mesh.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        SceneNode::Mesh(mesh)
    };

    debug!("Read scene from {}", path.display());
    Ok(scene)
}

/// Read the geographic dataset, if a path was given.
///
/// # Errors
///
/// Returns [`GeoError::MissingAttributes`] if no path was given or the
/// file cannot be used.
pub fn read_dataset(path: Option<&Path>) -> GeoResult<GeoDataset> {
    match path {
        Some(path) => GeoDataset::from_path(path),
        None => Err(GeoError::MissingAttributes {
            reason: "no dataset given".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_both_loaders() {
        let (scene, dataset) = load_inputs(
            || Ok(MeshNode::new("campus", vec![0.0; 9], vec![0, 1, 2]).into()),
            || Ok(GeoDataset::empty()),
        );
        assert_eq!(scene.expect("scene").mesh_count(), 1);
        assert!(dataset.expect("dataset").is_empty());
    }

    #[test]
    fn dataset_failure_is_returned_not_raised() {
        let (scene, dataset) = load_inputs(
            || Ok(MeshNode::default().into()),
            || read_dataset(None),
        );
        assert!(scene.is_ok());
        assert!(matches!(dataset, Err(GeoError::MissingAttributes { .. })));
    }

    #[test]
    fn reads_bare_dump_and_tree() {
        let dir = std::env::temp_dir().join(format!("campus-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");

        let bare = dir.join("merged.json");
        std::fs::write(&bare, r#"{"positions": [0, 0, 0, 1, 0, 0, 0, 0, 1], "indices": [0, 2, 1]}"#)
            .expect("write");
        let scene = read_scene(&bare).expect("bare dump");
        assert_eq!(scene.find_merged_mesh().map(|m| m.name.as_str()), Some("merged"));

        let tree = dir.join("tree.json");
        let json = r#"{"type": "group", "children": [{"type": "light"}]}"#;
        std::fs::write(&tree, json).expect("write");
        let scene = read_scene(&tree).expect("tree");
        assert_eq!(scene.mesh_count(), 0);

        std::fs::remove_dir_all(&dir).ok();
    }
}
