use foundation::arena::Arena;
use foundation::math::Mat4;

use crate::components::{Drawable, Transform};
use crate::entity::NodeId;

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    local: Transform,
    drawable: Option<Drawable>,
    visible: bool,
}

/// Arena-backed transform hierarchy.
///
/// Nodes are addressed by generational [`NodeId`]s; parents are plain ids, so
/// per-frame updates mutate local transforms by value and world matrices are
/// derived on demand.
///
/// Ordering contract:
/// - [`SceneGraph::drawables`] yields nodes in ascending index order.
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Arena<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, parent: Option<NodeId>, local: Transform) -> NodeId {
        NodeId(self.nodes.alloc(Node {
            parent,
            local,
            drawable: None,
            visible: true,
        }))
    }

    pub fn spawn_drawable(
        &mut self,
        parent: Option<NodeId>,
        local: Transform,
        drawable: Drawable,
    ) -> NodeId {
        let id = self.spawn(parent, local);
        self.set_drawable(id, drawable);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node.0)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn transform(&self, node: NodeId) -> Option<&Transform> {
        self.nodes.get(node.0).map(|n| &n.local)
    }

    pub fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(node.0).map(|n| &mut n.local)
    }

    pub fn set_drawable(&mut self, node: NodeId, drawable: Drawable) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.drawable = Some(drawable);
        }
    }

    pub fn drawable(&self, node: NodeId) -> Option<&Drawable> {
        self.nodes.get(node.0).and_then(|n| n.drawable.as_ref())
    }

    pub fn drawable_mut(&mut self, node: NodeId) -> Option<&mut Drawable> {
        self.nodes.get_mut(node.0).and_then(|n| n.drawable.as_mut())
    }

    pub fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.visible = visible;
        }
    }

    /// A node is visible only if it and all its ancestors are.
    pub fn is_visible(&self, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let Some(n) = self.nodes.get(id.0) else {
                return false;
            };
            if !n.visible {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// Composes local transforms from the root down to `node`.
    pub fn world_matrix(&self, node: NodeId) -> Option<Mat4> {
        let n = self.nodes.get(node.0)?;
        let local = n.local.matrix();
        match n.parent {
            Some(parent) => Some(self.world_matrix(parent)?.mul(&local)),
            None => Some(local),
        }
    }

    /// Visible drawables with their world matrices.
    pub fn drawables(&self) -> Vec<(NodeId, Mat4, Drawable)> {
        let mut out = Vec::new();
        for (handle, node) in self.nodes.iter() {
            let Some(drawable) = node.drawable else {
                continue;
            };
            let id = NodeId(handle);
            if !self.is_visible(id) {
                continue;
            }
            let Some(world) = self.world_matrix(id) else {
                continue;
            };
            out.push((id, world, drawable));
        }
        out
    }

    /// Removes `node` and every descendant.
    pub fn despawn(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(node))
            .map(|(h, _)| NodeId(h))
            .collect();
        for child in children {
            self.despawn(child);
        }
        self.nodes.remove(node.0);
    }
}
