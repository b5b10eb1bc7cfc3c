//! Arena storage for the view tree.
//!
//! Views are owned by the [`Tree`]; parent links and child lists hold
//! [`ViewId`]s, so a child never keeps its parent alive and there are no
//! reference cycles.
//!
//! ## Key Features
//!
//! - **Generational Indices**: a `ViewId` is an index plus a generation, so a
//!   stale id never resolves to a view that reused its slot.
//!
//! - **Dense Storage**: nodes are stored contiguously, with a sparse map for
//!   O(1) lookup by id and swap-remove for O(1) removal.
//!
//! - **Geometry**: local bounds are turned into window positions and
//!   rectangles by walking parent links.

use crate::views::{Rect, View};

/// Unique identifier for a view in the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ViewId {
    index: u32,
    generation: u32,
}

impl ViewId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Convert to a u64 for external use (e.g. logging or maps keyed by id).
    /// Combines generation (high bits) with index (low bits).
    pub fn as_u64(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node {
    view: Box<dyn View>,
    /// Bounds relative to the parent's origin
    bounds: Rect,
    /// Parent view, `None` for top-level and detached views
    parent: Option<ViewId>,
    /// Children in paint order (last is topmost)
    children: Vec<ViewId>,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

/// Owner of every view and of the links between them.
pub struct Tree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    /// Generation to hand out next for each sparse slot
    generations: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
            generations: Vec::new(),
        }
    }

    /// Store a detached view with the given local bounds.
    ///
    /// The view takes part in painting and hit testing once it is attached
    /// with [`Tree::add_view`] or `WindowContainer::add_view`.
    pub fn insert(&mut self, bounds: Rect, view: impl View + 'static) -> ViewId {
        self.insert_boxed(bounds, Box::new(view))
    }

    pub fn insert_boxed(&mut self, bounds: Rect, view: Box<dyn View>) -> ViewId {
        let sparse_index = if let Some(idx) = self.free_indices.pop() {
            idx
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            self.generations.push(0);
            idx
        };
        let generation = self.generations[sparse_index as usize];
        let dense_index = self.dense.len();

        self.dense.push(Node {
            view,
            bounds,
            parent: None,
            children: Vec::new(),
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        ViewId::new(sparse_index, generation)
    }

    /// Remove a view and all of its descendants.
    ///
    /// The view is also unlinked from its parent's children. Returns `false`
    /// for a stale id.
    pub fn remove(&mut self, id: ViewId) -> bool {
        let Some(dense_index) = self.get_dense_index(id) else {
            return false;
        };

        if let Some(parent_id) = self.dense[dense_index].parent {
            if let Some(parent_dense) = self.get_dense_index(parent_id) {
                self.dense[parent_dense].children.retain(|&c| c != id);
            }
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.take_node(current) {
                pending.extend(node.children);
            }
        }
        true
    }

    fn take_node(&mut self, id: ViewId) -> Option<Node> {
        let dense_index = self.get_dense_index(id)?;
        let last_dense_index = self.dense.len() - 1;

        let removed = self.dense.swap_remove(dense_index);

        // Fix up the moved node's sparse entry
        if dense_index != last_dense_index {
            let moved_sparse_idx = self.dense[dense_index].sparse_index;
            if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                entry.dense_index = dense_index;
            }
        }

        self.sparse[id.index as usize] = None;
        self.generations[id.index as usize] = id.generation.wrapping_add(1);
        self.free_indices.push(id.index);

        Some(removed)
    }

    /// Get the dense array index for a ViewId, validating generation.
    fn get_dense_index(&self, id: ViewId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation)
            .map(|e| e.dense_index)
    }

    fn node(&self, id: ViewId) -> Option<&Node> {
        self.get_dense_index(id).map(|idx| &self.dense[idx])
    }

    fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.get_dense_index(id).map(move |idx| &mut self.dense[idx])
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.get_dense_index(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.node(id).map(|node| &*node.view)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut (dyn View + 'static)> {
        self.node_mut(id).map(|node| &mut *node.view)
    }

    /// Local bounds, relative to the parent's origin.
    pub fn bounds(&self, id: ViewId) -> Option<Rect> {
        self.node(id).map(|node| node.bounds)
    }

    pub fn set_bounds(&mut self, id: ViewId, bounds: Rect) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Children in paint order. Empty for a stale id.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The `index`-th child of `parent`, or `None` when out of range.
    pub fn child_view(&self, parent: ViewId, index: usize) -> Option<ViewId> {
        self.children(parent).get(index).copied()
    }

    /// Append `child` to `parent`'s children and point its parent link at
    /// `parent`.
    ///
    /// Like the container's variant, this does not check for duplicates and
    /// does not unlink the child from a previous parent's list. Attaching a
    /// view inside its own subtree is refused.
    pub fn add_view(&mut self, parent: ViewId, child: ViewId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.subtree_contains(child, parent) {
            log::warn!(
                "Refusing to add view {:#x} below its own descendant {:#x}",
                child.as_u64(),
                parent.as_u64()
            );
            return false;
        }

        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        self.set_parent_link(child, Some(parent));
        true
    }

    /// Overwrite a view's parent link without touching any child list.
    pub(crate) fn set_parent_link(&mut self, id: ViewId, parent: Option<ViewId>) {
        if let Some(node) = self.node_mut(id) {
            node.parent = parent;
        }
    }

    /// Whether `target` is `root` or reachable from it through child lists.
    fn subtree_contains(&self, root: ViewId, target: ViewId) -> bool {
        let mut pending = vec![root];
        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            pending.extend_from_slice(self.children(current));
        }
        false
    }

    /// Absolute top-left corner: the sum of the local offsets of the view and
    /// every ancestor.
    pub fn window_pos(&self, id: ViewId) -> Option<(i32, i32)> {
        let node = self.node(id)?;
        let (x, y) = (node.bounds.left, node.bounds.top);
        match node.parent.and_then(|parent| self.window_pos(parent)) {
            Some((px, py)) => Some((px.saturating_add(x), py.saturating_add(y))),
            None => Some((x, y)),
        }
    }

    /// Absolute rectangle.
    ///
    /// Local bounds are translated by the parent's absolute top-left. The
    /// right and bottom edges are then clamped to the parent's absolute
    /// right and bottom; left and top are not clamped, so a child with a
    /// negative offset still reaches past its parent's top-left corner.
    pub fn window_rect(&self, id: ViewId) -> Option<Rect> {
        let node = self.node(id)?;
        let local = node.bounds;
        let parent_rect = match node.parent.and_then(|parent| self.window_rect(parent)) {
            Some(rect) => rect,
            None => return Some(local),
        };

        let rect = local.offset(parent_rect.left, parent_rect.top);
        Some(Rect {
            right: rect.right.min(parent_rect.right),
            bottom: rect.bottom.min(parent_rect.bottom),
            ..rect
        })
    }

    /// Whether the point lies strictly inside the view's absolute rectangle.
    /// Points on an edge are outside.
    pub fn point_in_view(&self, id: ViewId, x: i32, y: i32) -> bool {
        self.window_rect(id)
            .map(|rect| rect.contains(x, y))
            .unwrap_or(false)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
