//! Imported model graph.
//!
//! A model is a tree of [`SceneNode`]s, each referencing zero or more
//! meshes. Meshes are shared by reference: two nodes (for example a
//! static and a skinned renderer) may point at the same [`MeshHandle`],
//! and that mesh must only be baked once.

use std::sync::{Arc, Mutex};

use smoothnormal_mesh::Mesh;

/// Shared, mutable reference to a mesh in the model.
pub type MeshHandle = Arc<Mutex<Mesh>>;

/// Wraps a mesh into a new handle.
pub fn mesh_handle(mesh: Mesh) -> MeshHandle {
    Arc::new(Mutex::new(mesh))
}

/// One node of an imported model.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Object name.
    pub name: String,
    /// Meshes rendered by this node.
    pub meshes: Vec<MeshHandle>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a mesh reference.
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Adds a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Every distinct mesh reachable from this node, depth first, in
    /// first-seen order. Handles to the same mesh are returned once.
    pub fn collect_meshes(&self) -> Vec<MeshHandle> {
        let mut found: Vec<MeshHandle> = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for mesh in &node.meshes {
                if !found.iter().any(|m| Arc::ptr_eq(m, mesh)) {
                    found.push(Arc::clone(mesh));
                }
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }

    /// Number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}
