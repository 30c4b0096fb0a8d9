//! Beachline: the sweep's front of parabolic arcs, as a binary tree.
//!
//! Leaves hold arcs, internal nodes hold the breakpoints between the
//! rightmost arc of their left subtree and the leftmost arc of their right
//! subtree. Slots live in an arena and refer to each other by `NodeId`
//! (children and parent), so splices never move data.
//!
//! Code cross-refs: `geometry::Arc::breakpoint_y` (descent),
//! `fortunes::FortunesAlgorithm` (the only mutator).

mod tree;
mod types;

pub use tree::Beachline;
pub use types::{
    ArcRemoval, BeachlineError, BeachlineLeaf, BeachlineNode, Branch, Breakpoint, NodeId, Side,
    SiteSplit,
};

#[cfg(test)]
mod tests;
