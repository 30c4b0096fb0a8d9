//! Integer value types shared by the sweep.
//!
//! - `Point`: integer site/vertex with x-major ordering (x is the sweep key).
//! - `Edge`: finished or pending Voronoi edge; `end` is set exactly once.
//! - `Ray`: a moving breakpoint, born at `start`, travelling along `direction`.
//! - `Canvas`: the bounded rectangle `[0,width]×[0,height]`.
//!
//! Rounding policy
//! - Derived values are computed in `f64` and rounded once, half away from
//!   zero, when they become integer coordinates (see `round_coord`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

/// Errors raised by value constructors and geometric formulas.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A coordinate was not an integer (or not finite).
    NonIntegerCoordinate { value: f64 },
    /// A `"x,y"` token could not be read as two integers.
    MalformedPoint { input: String },
    /// Canvas dimensions must both be positive.
    InvalidCanvas { width: i64, height: i64 },
    /// The parabola is undefined when its focus lies on the directrix.
    FocusOnDirectrix { focus: Point, directrix: i64 },
    /// Elimination met a zero pivot and no later row could be swapped in.
    ZeroPivot { column: usize },
    /// A diagonal vanished during the final normalization.
    NoUniqueSolution { row: usize },
    /// `a² + b² − c < 0`: the three points admit no real circle.
    NegativeDiscriminant { value: f64 },
    /// `Edge::finish` was called on an edge that already has an end.
    EdgeAlreadyComplete { edge: Edge },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonIntegerCoordinate { value } => {
                write!(f, "point coordinates must be integers, got {value}")
            }
            Self::MalformedPoint { input } => {
                write!(f, "expected a point as X,Y with integer coordinates, got {input:?}")
            }
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas must have positive size, got {width}x{height}")
            }
            Self::FocusOnDirectrix { focus, directrix } => write!(
                f,
                "arc with focus {focus} is undefined on its own directrix x={directrix}"
            ),
            Self::ZeroPivot { column } => {
                write!(f, "zero pivot in column {column} with no row to swap in")
            }
            Self::NoUniqueSolution { row } => {
                write!(f, "system has no unique solution (row {row} vanished)")
            }
            Self::NegativeDiscriminant { value } => {
                write!(f, "circle radius is imaginary (a²+b²−c = {value})")
            }
            Self::EdgeAlreadyComplete { edge } => write!(f, "edge {edge} already has an end"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Round a derived value to an integer coordinate (half away from zero).
#[inline]
pub(crate) fn round_coord(v: f64) -> i64 {
    v.round() as i64
}

/// Integer point. Ordered by `x` first (the sweep key), then `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Build a point from floating coordinates, rejecting anything non-integral.
    pub fn try_from_f64(x: f64, y: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(integral(x)?, integral(y)?))
    }

    /// Sweep-key comparison: `x` only.
    #[inline]
    pub fn sweep_cmp(&self, other: &Self) -> Ordering {
        self.x.cmp(&other.x)
    }

    /// Exact z-component of `(b − a) × (c − b)`.
    ///
    /// Negative for a clockwise turn `a → b → c`.
    #[inline]
    pub fn turn(a: Point, b: Point, c: Point) -> i128 {
        let (ux, uy) = ((b.x - a.x) as i128, (b.y - a.y) as i128);
        let (vx, vy) = ((c.x - b.x) as i128, (c.y - b.y) as i128);
        ux * vy - uy * vx
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }

    #[inline]
    pub(crate) fn from_vector(v: Vector2<f64>) -> Self {
        Self::new(round_coord(v.x), round_coord(v.y))
    }
}

fn integral(v: f64) -> Result<i64, GeometryError> {
    if !v.is_finite() || v.fract() != 0.0 || v.abs() > i64::MAX as f64 {
        return Err(GeometryError::NonIntegerCoordinate { value: v });
    }
    Ok(v as i64)
}

impl std::ops::Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Self::Output {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Parses `"x,y"` (surrounding whitespace allowed around each part).
impl FromStr for Point {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::MalformedPoint {
            input: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(malformed)?;
        let x = x.trim().parse::<i64>().map_err(|_| malformed())?;
        let y = y.trim().parse::<i64>().map_err(|_| malformed())?;
        Ok(Point::new(x, y))
    }
}

/// A Voronoi edge. `end` is `None` while the edge is still being traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub start: Point,
    pub end: Option<Point>,
}

impl Edge {
    /// Pending edge, born at `start`.
    #[inline]
    pub fn pending(start: Point) -> Self {
        Self { start, end: None }
    }

    #[inline]
    pub fn complete(start: Point, end: Point) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Set the end point. Fails if the edge is already finished.
    pub fn finish(&mut self, end: Point) -> Result<(), GeometryError> {
        if self.end.is_some() {
            return Err(GeometryError::EdgeAlreadyComplete { edge: *self });
        }
        self.end = Some(end);
        Ok(())
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// True for a finished edge whose ends coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.end == Some(self.start)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} -> {}", self.start, end),
            None => write!(f, "{} -> ?", self.start),
        }
    }
}

/// Breakpoint trajectory: born at `start`, moving along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ray {
    pub start: Point,
    pub direction: Point,
}

impl Ray {
    #[inline]
    pub fn new(start: Point, direction: Point) -> Self {
        Self { start, direction }
    }

    /// The pending edge this breakpoint traces.
    #[inline]
    pub fn edge(&self) -> Edge {
        Edge::pending(self.start)
    }

    /// Whether `p` is not behind `start` along `direction`.
    #[inline]
    pub fn heads_towards(&self, p: Point) -> bool {
        let (dx, dy) = ((p.x - self.start.x) as i128, (p.y - self.start.y) as i128);
        dx * self.direction.x as i128 + dy * self.direction.y as i128 >= 0
    }
}

/// Bounded canvas `[0,width]×[0,height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: i64,
    pub height: i64,
}

impl Canvas {
    pub fn new(width: i64, height: i64) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (0..=self.width).contains(&p.x) && (0..=self.height).contains(&p.y)
    }

    /// Number of integer lattice points on the canvas.
    pub fn lattice_size(&self) -> u128 {
        (self.width as u128 + 1) * (self.height as u128 + 1)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
        }
    }
}
