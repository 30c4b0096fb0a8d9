//! Geometry primitives for the sweep (integer points, arcs, small solvers).
//!
//! Purpose
//! - Keep every formula pure: the sweep position is always an argument, never
//!   shared state, so each piece is testable in isolation.
//! - Store coordinates as integers; compute in `f64`; round once (half away
//!   from zero) when a value becomes a coordinate.
//!
//! Code cross-refs: `beachline::Beachline` (consumes `Arc::breakpoint_y`),
//! `fortunes::FortunesAlgorithm` (consumes `Arc::circle_point`, `clip_ray`).

mod arc;
mod solvers;
mod types;

pub use arc::Arc;
pub use solvers::{circle_through, clip_ray, gauss_elimination};
pub use types::{Canvas, Edge, GeometryError, Point, Ray};
pub(crate) use types::round_coord;
