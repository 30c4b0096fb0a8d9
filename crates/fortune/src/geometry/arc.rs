//! Parabolic arcs of the beachline.
//!
//! The sweep line is vertical (`x = directrix`) and moves towards `+x`; an
//! arc is the parabola of points equidistant from its focus and the sweep
//! line, opening towards `−x`. Every formula takes the directrix explicitly.

use super::solvers::circle_through;
use super::types::{round_coord, GeometryError, Point};

/// A beachline arc, identified by its focal site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Arc {
    pub focus: Point,
}

impl Arc {
    #[inline]
    pub fn new(focus: Point) -> Self {
        Self { focus }
    }

    /// Whether the focus lies on the sweep line (the parabola degenerates
    /// into a horizontal ray at `focus.y`).
    #[inline]
    pub fn on_directrix(&self, directrix: i64) -> bool {
        self.focus.x == directrix
    }

    /// Unrounded abscissa of the parabola at ordinate `y`.
    ///
    /// `x = (y − Fy)² / (2·(Fx − d)) + (Fx + d) / 2`
    pub fn x_exact(&self, y: f64, directrix: i64) -> Result<f64, GeometryError> {
        let denom = self.denom(directrix)?;
        let dy = y - self.focus.y as f64;
        Ok(dy * dy / (2.0 * denom) + (self.focus.x as f64 + directrix as f64) / 2.0)
    }

    /// Abscissa of the parabola at ordinate `y`, rounded to the grid.
    pub fn x(&self, y: i64, directrix: i64) -> Result<i64, GeometryError> {
        self.x_exact(y as f64, directrix).map(round_coord)
    }

    /// Direction `(dx, 1)` of the parabola at ordinate `y`, with
    /// `dx = (y − Fy) / (Fx − d)` rounded to the grid.
    pub fn tangent(&self, y: i64, directrix: i64) -> Result<Point, GeometryError> {
        let denom = self.denom(directrix)?;
        let dx = (y - self.focus.y) as f64 / denom;
        Ok(Point::new(round_coord(dx), 1))
    }

    /// Center and radius of the circle through this focus and the foci of
    /// `a` and `b`, both rounded to the grid.
    pub fn circle_point(&self, a: &Arc, b: &Arc) -> Result<(Point, i64), GeometryError> {
        let (center, r) = circle_through(self.focus, a.focus, b.focus)?;
        Ok((Point::from_vector(center), round_coord(r)))
    }

    /// Ordinate where `lower` hands over to `upper` at the given directrix.
    ///
    /// Below the returned value `lower` is the front arc, above it `upper`.
    /// Two equal foci have no breakpoint; callers fall back to the ray start.
    pub fn breakpoint_y(lower: &Arc, upper: &Arc, directrix: i64) -> Option<f64> {
        let (a, c) = (lower.focus, upper.focus);
        if a == c {
            return None;
        }
        let (ay, cy) = (a.y as f64, c.y as f64);
        match (lower.on_directrix(directrix), upper.on_directrix(directrix)) {
            (true, true) => return Some((ay + cy) / 2.0),
            (true, false) => return Some(ay),
            (false, true) => return Some(cy),
            (false, false) => {}
        }

        let da = 2.0 * (a.x - directrix) as f64;
        let dc = 2.0 * (c.x - directrix) as f64;
        if a.x == c.x {
            return Some((ay + cy) / 2.0);
        }
        // dc·(y−ay)² − da·(y−cy)² + da·dc·(ax−cx)/2 = 0
        let qa = dc - da;
        let qb = 2.0 * (da * cy - dc * ay);
        let qc = dc * ay * ay - da * cy * cy + da * dc * (a.x - c.x) as f64 / 2.0;
        let disc = (qb * qb - 4.0 * qa * qc).max(0.0);
        // The narrower parabola (focus nearer the sweep) is in front between
        // the two roots; this root is the one with `lower` in front below.
        Some((-qb - disc.sqrt()) / (2.0 * qa))
    }

    /// Exact direction in which the breakpoint between `lower` and `upper`
    /// travels as the sweep advances: the bisector of the two foci.
    #[inline]
    pub fn bisector_direction(lower: &Arc, upper: &Arc) -> Point {
        let (a, c) = (lower.focus, upper.focus);
        Point::new(c.y - a.y, a.x - c.x)
    }

    fn denom(&self, directrix: i64) -> Result<f64, GeometryError> {
        if self.on_directrix(directrix) {
            return Err(GeometryError::FocusOnDirectrix {
                focus: self.focus,
                directrix,
            });
        }
        Ok((self.focus.x - directrix) as f64)
    }
}
