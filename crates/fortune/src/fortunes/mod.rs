//! Fortune's sweep over integer sites.
//!
//! Purpose
//! - Sweep a vertical line from left to right over the sites, keep the
//!   beachline of parabolic arcs in front of it, and collect the Voronoi
//!   edges traced by the breakpoints.
//!
//! Model
//! - Site events insert arcs; circle events remove arcs whose two
//!   breakpoints meet. Each leaf remembers the circle event in which it would
//!   vanish so that a later split or removal can deactivate it.
//! - Edges that are still open when the queue runs dry are clipped to the
//!   canvas by `get_areas`; they are not stored, so the sweep can continue
//!   with more sites afterwards.
//!
//! Code cross-refs: `beachline::Beachline`, `event::EventQueue`,
//! `geometry::{Arc, clip_ray}`, `sites::check_sites`.

mod handlers;

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, trace};

use crate::beachline::{Beachline, BeachlineError};
use crate::event::{Event, EventQueue, EventType};
use crate::geometry::{clip_ray, Arc, Canvas, Edge, GeometryError, Point};
use crate::sites::{check_site, check_sites, SiteError};

/// Errors surfaced by the sweep.
#[derive(Clone, Debug, PartialEq)]
pub enum FortuneError {
    Geometry(GeometryError),
    Site(SiteError),
    Beachline(BeachlineError),
}

impl fmt::Display for FortuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FortuneError::Geometry(e) => write!(f, "geometry: {e}"),
            FortuneError::Site(e) => write!(f, "invalid site: {e}"),
            FortuneError::Beachline(e) => write!(f, "beachline: {e}"),
        }
    }
}

impl std::error::Error for FortuneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FortuneError::Geometry(e) => Some(e),
            FortuneError::Site(e) => Some(e),
            FortuneError::Beachline(e) => Some(e),
        }
    }
}

impl From<GeometryError> for FortuneError {
    fn from(e: GeometryError) -> Self {
        FortuneError::Geometry(e)
    }
}

impl From<SiteError> for FortuneError {
    fn from(e: SiteError) -> Self {
        FortuneError::Site(e)
    }
}

impl From<BeachlineError> for FortuneError {
    fn from(e: BeachlineError) -> Self {
        FortuneError::Beachline(e)
    }
}

/// Sweep state: canvas, pending events, sweep position, beachline and the
/// edges finished so far.
#[derive(Clone, Debug)]
pub struct FortunesAlgorithm {
    canvas: Canvas,
    queue: EventQueue,
    directrix: i64,
    beachline: Beachline,
    complete: BTreeSet<Edge>,
    sites: BTreeSet<Point>,
}

impl FortunesAlgorithm {
    /// Sweep over `points` on `canvas`. Fails on an invalid canvas or site.
    pub fn new(canvas: Canvas, points: &[Point]) -> Result<Self, FortuneError> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let mut algo = Self {
            canvas,
            queue: EventQueue::new(),
            directrix: 0,
            beachline: Beachline::new(),
            complete: BTreeSet::new(),
            sites: BTreeSet::new(),
        };
        algo.add_points(points)?;
        Ok(algo)
    }

    /// Queue a batch of sites. Nothing is queued if any site is rejected.
    pub fn add_points(&mut self, points: &[Point]) -> Result<(), FortuneError> {
        let batch = check_sites(&self.canvas, &self.sites, self.directrix, points)?;
        for &p in points {
            self.queue.push(Event::site(p));
        }
        self.sites.extend(batch);
        debug!(count = points.len(), "queued sites");
        Ok(())
    }

    pub fn add_point(&mut self, point: Point) -> Result<(), FortuneError> {
        check_site(&self.canvas, &self.sites, self.directrix, point)?;
        self.queue.push(Event::site(point));
        self.sites.insert(point);
        Ok(())
    }

    /// Run the sweep to completion and return every edge: the finished ones
    /// plus the still-open breakpoint rays clipped to the canvas.
    pub fn get_areas(&mut self) -> Result<BTreeSet<Edge>, FortuneError> {
        while self.step()? {}
        let mut edges = self.complete.clone();
        edges.extend(self.boundary_edges());
        debug!(
            complete = self.complete.len(),
            total = edges.len(),
            "sweep finished"
        );
        Ok(edges)
    }

    /// Process one event. Returns `false` once the queue is empty.
    pub fn step(&mut self) -> Result<bool, FortuneError> {
        let Some((id, event)) = self.queue.pop() else {
            return Ok(false);
        };
        self.directrix = self.directrix.max(event.x);
        if !event.active {
            trace!(x = event.x, point = %event.point, "skip inactive event");
            return Ok(true);
        }
        debug!(x = event.x, kind = ?event.kind, point = %event.point, "event");
        match event.kind {
            EventType::Site => self.site_event(event.point)?,
            EventType::Circle => self.circle_event(id, &event)?,
        }
        Ok(true)
    }

    /// Open breakpoint rays clipped to the canvas, in beachline order.
    pub fn boundary_edges(&self) -> Vec<Edge> {
        self.beachline
            .breakpoints()
            .into_iter()
            .filter_map(|bp| {
                let direction = Arc::bisector_direction(&bp.lower, &bp.upper);
                let (from, to) = clip_ray(bp.ray.start, direction, &self.canvas)?;
                (from != to).then_some(Edge::complete(from, to))
            })
            .collect()
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Current sweep position.
    #[inline]
    pub fn directrix(&self) -> i64 {
        self.directrix
    }

    #[inline]
    pub fn beachline(&self) -> &Beachline {
        &self.beachline
    }

    #[inline]
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Events still queued (including deactivated ones).
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Edges finished by circle events so far.
    #[inline]
    pub fn completed_edges(&self) -> &BTreeSet<Edge> {
        &self.complete
    }

    #[inline]
    pub fn sites(&self) -> &BTreeSet<Point> {
        &self.sites
    }
}

#[cfg(test)]
mod tests;
