use std::fmt;

use crate::event::EventId;
use crate::geometry::{Arc, Ray};

/// Arena index of a beachline slot (leaf or breakpoint).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction along the beachline. `Left` is towards smaller `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Leaf payload: one arc, plus the circle event in which it vanishes (if any).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeachlineLeaf {
    pub arc: Arc,
    pub circle_event: Option<EventId>,
}

impl BeachlineLeaf {
    #[inline]
    pub fn new(arc: Arc) -> Self {
        Self {
            arc,
            circle_event: None,
        }
    }
}

/// Internal node: the breakpoint between the rightmost arc of `left` and the
/// leftmost arc of `right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeachlineNode {
    pub ray: Ray,
    pub left: NodeId,
    pub right: NodeId,
}

impl BeachlineNode {
    #[inline]
    pub fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut NodeId {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Which side `child` hangs on, if it is a child at all.
    #[inline]
    pub fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == child {
            Some(Side::Left)
        } else if self.right == child {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Leaf(BeachlineLeaf),
    Node(BeachlineNode),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    pub branch: Branch,
    pub parent: Option<NodeId>,
}

/// A breakpoint currently on the beachline together with the arcs it separates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    pub node: NodeId,
    pub ray: Ray,
    pub lower: Arc,
    pub upper: Arc,
}

/// Ids produced by a three-way site split, in beachline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteSplit {
    pub lower: NodeId,
    pub new: NodeId,
    pub upper: NodeId,
    pub lower_breakpoint: NodeId,
    pub upper_breakpoint: NodeId,
}

/// Outcome of removing a vanishing arc.
///
/// `closed` holds the rays of the two breakpoints that met (lower first);
/// `merged` is the surviving breakpoint, now between `lower` and `upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcRemoval {
    pub lower: NodeId,
    pub upper: NodeId,
    pub merged: NodeId,
    pub closed: [Ray; 2],
}

/// Structural misuse of the beachline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BeachlineError {
    /// Id is out of range, was removed, or is not a leaf.
    NoSuchLeaf(NodeId),
    /// Id is out of range, was removed, or is not an internal node.
    NoSuchNode(NodeId),
    /// `insert_root` on a non-empty beachline.
    NotEmpty,
    /// The recorded attachment side does not hold this slot.
    Detached { id: NodeId, parent: NodeId },
    /// The arc has no neighbor on `side`, so it cannot vanish.
    NoNeighbor { leaf: NodeId, side: Side },
}

impl fmt::Display for BeachlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchLeaf(id) => write!(f, "no beachline leaf {id}"),
            Self::NoSuchNode(id) => write!(f, "no beachline breakpoint {id}"),
            Self::NotEmpty => write!(f, "beachline already has a root"),
            Self::Detached { id, parent } => {
                write!(f, "slot {id} is not attached under {parent}")
            }
            Self::NoNeighbor { leaf, side } => {
                write!(f, "arc {leaf} has no {side:?} neighbor")
            }
        }
    }
}

impl std::error::Error for BeachlineError {}
