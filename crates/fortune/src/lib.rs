//! Voronoi subdivision of a bounded canvas with Fortune's sweep-line algorithm.
//!
//! The sweep line is vertical and moves towards `+x`; sites are integer
//! points on the canvas `[0,width]×[0,height]`. The result is the set of
//! Voronoi edges, finished ones plus open ones clipped to the canvas.
//!
//! ```no_run
//! use fortune::prelude::*;
//!
//! let canvas = Canvas::new(1000, 1000)?;
//! let sites = ["100,155".parse::<Point>()?, "400,700".parse()?, "800,300".parse()?];
//! let edges = FortunesAlgorithm::new(canvas, &sites)?.get_areas()?;
//! for edge in &edges {
//!     println!("{edge}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod beachline;
pub mod event;
pub mod fortunes;
pub mod geometry;
pub mod sites;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use fortunes::{FortuneError, FortunesAlgorithm};
pub use geometry::{Canvas, Edge, Point};

/// Common exports for callers.
pub mod prelude {
    pub use crate::fortunes::{FortuneError, FortunesAlgorithm};
    pub use crate::geometry::{Arc, Canvas, Edge, GeometryError, Point, Ray};
    pub use crate::sites::{scatter, SiteError};
}
