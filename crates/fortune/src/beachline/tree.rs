use tracing::trace;

use super::types::{
    ArcRemoval, BeachlineError, BeachlineLeaf, BeachlineNode, Branch, Breakpoint, NodeId, Side,
    SiteSplit, Slot,
};
use crate::geometry::{Arc, Point, Ray};

/// Arena-backed binary tree of arcs (leaves) and breakpoints (nodes).
///
/// In-order leaf sequence is the beachline from bottom (`y` small) to top.
/// Removed slots stay tombstoned; ids are never reused.
#[derive(Clone, Debug, Default)]
pub struct Beachline {
    slots: Vec<Option<Slot>>,
    root: Option<NodeId>,
}

impl Beachline {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn branch(&self, id: NodeId) -> Option<&Branch> {
        self.slot(id).map(|s| &s.branch)
    }

    pub fn leaf(&self, id: NodeId) -> Option<&BeachlineLeaf> {
        match self.branch(id)? {
            Branch::Leaf(leaf) => Some(leaf),
            Branch::Node(_) => None,
        }
    }

    pub fn leaf_mut(&mut self, id: NodeId) -> Option<&mut BeachlineLeaf> {
        match &mut self.slot_mut(id)?.branch {
            Branch::Leaf(leaf) => Some(leaf),
            Branch::Node(_) => None,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&BeachlineNode> {
        match self.branch(id)? {
            Branch::Node(node) => Some(node),
            Branch::Leaf(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.parent
    }

    /// Arc of a live leaf.
    pub fn arc(&self, id: NodeId) -> Result<Arc, BeachlineError> {
        self.leaf(id)
            .map(|l| l.arc)
            .ok_or(BeachlineError::NoSuchLeaf(id))
    }

    /// Place the first arc.
    pub fn insert_root(&mut self, arc: Arc) -> Result<NodeId, BeachlineError> {
        if self.root.is_some() {
            return Err(BeachlineError::NotEmpty);
        }
        let id = self.alloc(Branch::Leaf(BeachlineLeaf::new(arc)));
        self.root = Some(id);
        Ok(id)
    }

    /// Leaf whose arc is in front at ordinate `y`, and the side on which it
    /// hangs from its parent.
    ///
    /// Each breakpoint is compared at the given directrix; the descent goes
    /// left when the breakpoint lies above `y` and right otherwise.
    pub fn find_arc(&self, y: i64, directrix: i64) -> (Option<NodeId>, Option<Side>) {
        let Some(mut cur) = self.root else {
            return (None, None);
        };
        let target = y as f64;
        let mut side = None;
        while let Some(node) = self.node(cur) {
            let at = self
                .breakpoint_y(cur, directrix)
                .unwrap_or(node.ray.start.y as f64);
            let step = if at > target { Side::Left } else { Side::Right };
            cur = node.child(step);
            side = Some(step);
        }
        match self.leaf(cur) {
            Some(_) => (Some(cur), side),
            None => (None, None),
        }
    }

    /// Ordinate of a breakpoint at the given directrix. `None` if `node` is
    /// not a live node or its two arcs share a focus.
    pub fn breakpoint_y(&self, node: NodeId, directrix: i64) -> Option<f64> {
        let (lower, upper) = self.adjacent_arcs(node)?;
        Arc::breakpoint_y(&lower, &upper, directrix)
    }

    /// Neighboring leaf of `leaf` on `side`, or `None` at the beachline's end.
    pub fn find_next_arc(&self, side: Side, leaf: NodeId) -> Option<NodeId> {
        self.leaf(leaf)?;
        let bp = self.boundary(leaf, side)?;
        let node = self.node(bp)?;
        Some(self.extreme_leaf(node.child(side), side.opposite()))
    }

    /// The breakpoints below and above `leaf`.
    pub fn bounding_breakpoints(&self, leaf: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        if self.leaf(leaf).is_none() {
            return (None, None);
        }
        (
            self.boundary(leaf, Side::Left),
            self.boundary(leaf, Side::Right),
        )
    }

    /// Live leaves in beachline order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(|id, branch| {
            if let Branch::Leaf(_) = branch {
                out.push(id);
            }
        });
        out
    }

    /// Live breakpoints in beachline order.
    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        let mut out = Vec::new();
        self.walk(|id, branch| {
            if let Branch::Node(node) = branch {
                if let Some((lower, upper)) = self.adjacent_arcs(id) {
                    out.push(Breakpoint {
                        node: id,
                        ray: node.ray,
                        lower,
                        upper,
                    });
                }
            }
        });
        out
    }

    /// Replace `leaf` by `Node(lower_ray, copy, Node(upper_ray, new, copy))`.
    ///
    /// `side` is where `leaf` hangs from its parent (as returned by
    /// `find_arc`); `None` means look it up. The old leaf is discarded.
    pub fn split_leaf(
        &mut self,
        leaf: NodeId,
        side: Option<Side>,
        new_arc: Arc,
        lower_ray: Ray,
        upper_ray: Ray,
    ) -> Result<SiteSplit, BeachlineError> {
        let old = self.arc(leaf)?;
        let at = self.attachment(leaf, side)?;

        let lower = self.alloc(Branch::Leaf(BeachlineLeaf::new(old)));
        let new = self.alloc(Branch::Leaf(BeachlineLeaf::new(new_arc)));
        let upper = self.alloc(Branch::Leaf(BeachlineLeaf::new(old)));
        let upper_breakpoint = self.alloc(Branch::Node(BeachlineNode {
            ray: upper_ray,
            left: new,
            right: upper,
        }));
        let lower_breakpoint = self.alloc(Branch::Node(BeachlineNode {
            ray: lower_ray,
            left: lower,
            right: upper_breakpoint,
        }));
        self.attach(at, lower_breakpoint)?;
        self.release(leaf);
        trace!(%leaf, new = %new, focus = %new_arc.focus, "split arc three-way");

        Ok(SiteSplit {
            lower,
            new,
            upper,
            lower_breakpoint,
            upper_breakpoint,
        })
    }

    /// Replace `leaf`, whose focus lies on the sweep line, by one breakpoint
    /// over the old and the new arc in `y` order. Returns the new leaf.
    pub fn split_leaf_on_sweep(
        &mut self,
        leaf: NodeId,
        side: Option<Side>,
        new_arc: Arc,
        ray: Ray,
    ) -> Result<NodeId, BeachlineError> {
        let old = self.arc(leaf)?;
        let at = self.attachment(leaf, side)?;

        let new = self.alloc(Branch::Leaf(BeachlineLeaf::new(new_arc)));
        let (left, right) = if new_arc.focus.y > old.focus.y {
            (leaf, new)
        } else {
            (new, leaf)
        };
        let bp = self.alloc(Branch::Node(BeachlineNode { ray, left, right }));
        self.attach(at, bp)?;
        trace!(%leaf, new = %new, focus = %new_arc.focus, "split arc on sweep line");
        Ok(new)
    }

    /// Remove a vanishing arc whose breakpoints meet at `center`.
    ///
    /// The leaf's sibling takes its parent's place; the other bounding
    /// breakpoint stays where it is and is re-labelled with a ray from
    /// `center` along the bisector of the now adjacent arcs.
    pub fn remove_arc(&mut self, leaf: NodeId, center: Point) -> Result<ArcRemoval, BeachlineError> {
        self.arc(leaf)?;
        let lower_bp = self
            .boundary(leaf, Side::Left)
            .ok_or(BeachlineError::NoNeighbor {
                leaf,
                side: Side::Left,
            })?;
        let upper_bp = self
            .boundary(leaf, Side::Right)
            .ok_or(BeachlineError::NoNeighbor {
                leaf,
                side: Side::Right,
            })?;
        let lower_node = *self.node(lower_bp).ok_or(BeachlineError::NoSuchNode(lower_bp))?;
        let upper_node = *self.node(upper_bp).ok_or(BeachlineError::NoSuchNode(upper_bp))?;
        let lower = self.extreme_leaf(lower_node.left, Side::Right);
        let upper = self.extreme_leaf(upper_node.right, Side::Left);

        // The leaf's parent is one of its two bounding breakpoints.
        let parent = self.parent(leaf).ok_or(BeachlineError::NoSuchNode(leaf))?;
        let (sibling, survivor) = if parent == lower_bp {
            (lower_node.left, upper_bp)
        } else {
            (upper_node.right, lower_bp)
        };
        let at = self.attachment(parent, None)?;
        self.attach(at, sibling)?;

        let merged = Ray::new(
            center,
            Arc::bisector_direction(&self.arc(lower)?, &self.arc(upper)?),
        );
        match self.slot_mut(survivor).map(|s| &mut s.branch) {
            Some(Branch::Node(node)) => node.ray = merged,
            _ => return Err(BeachlineError::NoSuchNode(survivor)),
        }
        self.release(leaf);
        self.release(parent);
        trace!(%leaf, %center, %lower, %upper, "removed arc");

        Ok(ArcRemoval {
            lower,
            upper,
            merged: survivor,
            closed: [lower_node.ray, upper_node.ray],
        })
    }

    // ---- internals ----

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(id.0)?.as_ref()
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Push a detached slot; a node adopts its two children.
    fn alloc(&mut self, branch: Branch) -> NodeId {
        let id = NodeId(self.slots.len());
        if let Branch::Node(node) = branch {
            for child in [node.left, node.right] {
                if let Some(slot) = self.slot_mut(child) {
                    slot.parent = Some(id);
                }
            }
        }
        self.slots.push(Some(Slot {
            branch,
            parent: None,
        }));
        id
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Where `id` currently hangs: `None` for the root, else parent and side.
    fn attachment(
        &self,
        id: NodeId,
        side: Option<Side>,
    ) -> Result<Option<(NodeId, Side)>, BeachlineError> {
        let Some(parent) = self.parent(id) else {
            return Ok(None);
        };
        let node = self.node(parent).ok_or(BeachlineError::NoSuchNode(parent))?;
        let side = match side {
            Some(s) if node.child(s) == id => s,
            Some(_) => return Err(BeachlineError::Detached { id, parent }),
            None => node
                .side_of(id)
                .ok_or(BeachlineError::Detached { id, parent })?,
        };
        Ok(Some((parent, side)))
    }

    /// Hang `child` at `at` (or make it the root).
    fn attach(&mut self, at: Option<(NodeId, Side)>, child: NodeId) -> Result<(), BeachlineError> {
        match at {
            None => self.root = Some(child),
            Some((parent, side)) => match self.slot_mut(parent).map(|s| &mut s.branch) {
                Some(Branch::Node(node)) => *node.child_mut(side) = child,
                _ => return Err(BeachlineError::NoSuchNode(parent)),
            },
        }
        let slot = self.slot_mut(child).ok_or(BeachlineError::NoSuchNode(child))?;
        slot.parent = at.map(|(parent, _)| parent);
        Ok(())
    }

    /// First ancestor of `leaf` reached from its `side.opposite()` child:
    /// the breakpoint on `side` of `leaf`.
    fn boundary(&self, leaf: NodeId, side: Side) -> Option<NodeId> {
        let mut cur = leaf;
        loop {
            let parent = self.parent(cur)?;
            let node = self.node(parent)?;
            if node.child(side.opposite()) == cur {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// Descend from `from` always towards `side` until a leaf.
    fn extreme_leaf(&self, from: NodeId, side: Side) -> NodeId {
        let mut cur = from;
        while let Some(node) = self.node(cur) {
            cur = node.child(side);
        }
        cur
    }

    fn adjacent_arcs(&self, node: NodeId) -> Option<(Arc, Arc)> {
        let n = self.node(node)?;
        let lower = self.leaf(self.extreme_leaf(n.left, Side::Right))?.arc;
        let upper = self.leaf(self.extreme_leaf(n.right, Side::Left))?.arc;
        Some((lower, upper))
    }

    /// In-order traversal over live slots.
    fn walk<'a>(&'a self, mut visit: impl FnMut(NodeId, &'a Branch)) {
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(id) = cur {
                cur = None;
                let Some(branch) = self.branch(id) else {
                    continue;
                };
                match branch {
                    Branch::Node(node) => {
                        stack.push(id);
                        cur = Some(node.left);
                    }
                    Branch::Leaf(_) => visit(id, branch),
                }
            }
            let Some(id) = stack.pop() else { break };
            if let Some(branch) = self.branch(id) {
                if let Branch::Node(node) = branch {
                    visit(id, branch);
                    cur = Some(node.right);
                }
            }
        }
    }
}
