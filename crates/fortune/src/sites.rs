//! Site validation and seeded random site sets.
//!
//! - `check_site` / `check_sites`: boundary checks applied before any site
//!   reaches the event queue (inside the canvas, distinct, not behind the
//!   sweep line).
//! - `scatter`: reproducible sets of distinct lattice sites for demos and
//!   benchmarks. The same `(canvas, count, seed)` always yields the same
//!   sites in the same order.

use std::collections::BTreeSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Canvas, Point};

/// Rejected site input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteError {
    /// Site lies outside `[0,width]×[0,height]`.
    OutOfCanvas { site: Point, canvas: Canvas },
    /// Site was already accepted.
    Duplicate { site: Point },
    /// Site lies behind the current sweep position.
    BehindSweep { site: Point, directrix: i64 },
    /// More distinct sites requested than the canvas has lattice points.
    TooMany { requested: usize, available: u128 },
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::OutOfCanvas { site, canvas } => write!(
                f,
                "site {site} lies outside the {}x{} canvas",
                canvas.width, canvas.height
            ),
            SiteError::Duplicate { site } => write!(f, "site {site} given more than once"),
            SiteError::BehindSweep { site, directrix } => write!(
                f,
                "site {site} lies behind the sweep line at x={directrix}"
            ),
            SiteError::TooMany {
                requested,
                available,
            } => write!(
                f,
                "cannot scatter {requested} distinct sites over {available} lattice points"
            ),
        }
    }
}

impl std::error::Error for SiteError {}

/// Check one site against the canvas, the accepted set and the sweep line.
pub fn check_site(
    canvas: &Canvas,
    accepted: &BTreeSet<Point>,
    directrix: i64,
    site: Point,
) -> Result<(), SiteError> {
    if !canvas.contains(site) {
        return Err(SiteError::OutOfCanvas {
            site,
            canvas: *canvas,
        });
    }
    if accepted.contains(&site) {
        return Err(SiteError::Duplicate { site });
    }
    if site.x < directrix {
        return Err(SiteError::BehindSweep { site, directrix });
    }
    Ok(())
}

/// Check a batch as a whole: every site valid and no duplicates within the
/// batch either. Returns the batch as a set.
pub fn check_sites(
    canvas: &Canvas,
    accepted: &BTreeSet<Point>,
    directrix: i64,
    sites: &[Point],
) -> Result<BTreeSet<Point>, SiteError> {
    let mut batch = BTreeSet::new();
    for &site in sites {
        check_site(canvas, accepted, directrix, site)?;
        if !batch.insert(site) {
            return Err(SiteError::Duplicate { site });
        }
    }
    Ok(batch)
}

/// `count` distinct lattice sites drawn uniformly from the canvas.
pub fn scatter(canvas: &Canvas, count: usize, seed: u64) -> Result<Vec<Point>, SiteError> {
    let available = canvas.lattice_size();
    if count as u128 > available {
        return Err(SiteError::TooMany {
            requested: count,
            available,
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let p = Point::new(
            rng.gen_range(0..=canvas.width),
            rng.gen_range(0..=canvas.height),
        );
        if seen.insert(p) {
            out.push(p);
        }
    }
    Ok(out)
}
