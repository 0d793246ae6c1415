//! Loaded scene graph.
//!
//! Only what the pipeline needs from a loaded model is kept: meshes with
//! their raw buffers and material, nested in groups.

use mesh_types::{Aabb, Material, Point3};
use serde::{Deserialize, Serialize};

/// A mesh as it comes out of the model loader.
///
/// Deserializes from a plain `{"positions": [...], "indices": [...]}` dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshNode {
    /// Node name.
    pub name: String,
    /// Flat vertex positions, three per vertex.
    pub positions: Vec<f32>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
    /// Source material, copied into every building.
    pub material: Material,
}

impl MeshNode {
    /// Create a mesh node with the default material.
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
            material: Material::default(),
        }
    }

    /// Bounding box of every vertex in the buffer, referenced or not.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let points: Vec<_> = self
            .positions
            .chunks_exact(3)
            .map(|p| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
            .collect();
        Aabb::from_points(points.iter())
    }
}

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    /// A mesh.
    Mesh(MeshNode),
    /// A named container.
    Group {
        /// Group name.
        #[serde(default)]
        name: String,
        /// Child nodes in load order.
        #[serde(default)]
        children: Vec<SceneNode>,
    },
    /// A light; carries no geometry.
    Light {
        /// Light name.
        #[serde(default)]
        name: String,
    },
}

impl SceneNode {
    /// The mesh to split: the last mesh in depth-first load order.
    ///
    /// Campus exports hold a single merged mesh; if there are several, the
    /// last one wins.
    #[must_use]
    pub fn find_merged_mesh(&self) -> Option<&MeshNode> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            Self::Group { children, .. } => {
                children.iter().filter_map(Self::find_merged_mesh).last()
            }
            Self::Light { .. } => None,
        }
    }

    /// Number of mesh nodes in the tree.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        match self {
            Self::Mesh(_) => 1,
            Self::Group { children, .. } => children.iter().map(Self::mesh_count).sum(),
            Self::Light { .. } => 0,
        }
    }
}

impl From<MeshNode> for SceneNode {
    fn from(mesh: MeshNode) -> Self {
        Self::Mesh(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(name: &str) -> SceneNode {
        MeshNode::new(name, vec![0.0; 9], vec![0, 1, 2]).into()
    }

    #[test]
    fn last_mesh_wins() {
        let scene = SceneNode::Group {
            name: "root".into(),
            children: vec![
                mesh("first"),
                SceneNode::Light { name: "sun".into() },
                SceneNode::Group {
                    name: "nested".into(),
                    children: vec![mesh("second"), mesh("third")],
                },
                SceneNode::Group {
                    name: "empty".into(),
                    children: vec![],
                },
            ],
        };
        assert_eq!(scene.find_merged_mesh().map(|m| m.name.as_str()), Some("third"));
        assert_eq!(scene.mesh_count(), 3);
    }

    #[test]
    fn scene_without_mesh() {
        let scene = SceneNode::Group {
            name: "root".into(),
            children: vec![SceneNode::Light { name: "sun".into() }],
        };
        assert!(scene.find_merged_mesh().is_none());
    }

    #[test]
    fn mesh_dump_deserializes() {
        let json = r#"{"positions": [0, 0, 0, 1, 0, 0, 0, 0, 1], "indices": [0, 2, 1]}"#;
        let node: MeshNode = serde_json::from_str(json).expect("valid dump");
        assert_eq!(node.positions.len(), 9);
        assert_eq!(node.material, Material::default());
        assert_eq!(node.bounds().max, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn tagged_tree_deserializes() {
        let scene: SceneNode = serde_json::from_str(
            r#"{"type": "group", "children": [
                {"type": "light", "name": "sun"},
                {"type": "mesh", "name": "campus", "positions": [], "indices": []}
            ]}"#,
        )
        .expect("valid tree");
        assert_eq!(scene.find_merged_mesh().map(|m| m.name.as_str()), Some("campus"));
    }
}
