//! Small numeric solvers used by the sweep.
//!
//! - `gauss_elimination`: 3×3 augmented system, no magnitude pivoting.
//! - `circle_through`: circle `x² + y² + 2ax + 2by + c = 0` through three points.
//! - `clip_ray`: Liang–Barsky clip of a ray against the canvas.
use nalgebra::{Matrix3x4, Vector2, Vector3};

use super::types::{Canvas, GeometryError, Point};

/// Entries this small relative to their column are treated as zero pivots.
const PIVOT_EPS: f64 = 1e-12;

/// Solve a 3×3 system given as an augmented `[A | b]` matrix.
///
/// Gauss–Jordan without partial pivoting: a zero diagonal is replaced by the
/// first later row with a non-zero entry in that column, otherwise the solve
/// fails with `ZeroPivot`. Callers should only pass systems with exactly one
/// solution.
pub fn gauss_elimination(mut m: Matrix3x4<f64>) -> Result<Vector3<f64>, GeometryError> {
    for i in 0..3 {
        let scale = m.column(i).amax();
        let is_zero = |v: f64| v.abs() <= PIVOT_EPS * scale;
        if is_zero(m[(i, i)]) {
            let swap = (i + 1..3)
                .find(|&k| !is_zero(m[(k, i)]))
                .ok_or(GeometryError::ZeroPivot { column: i })?;
            m.swap_rows(i, swap);
        }

        let pivot = m[(i, i)];
        for k in 0..4 {
            m[(i, k)] /= pivot;
        }

        for j in 0..3 {
            if j == i || m[(j, i)] == 0.0 {
                continue;
            }
            let factor = m[(j, i)];
            for k in 0..4 {
                m[(j, k)] -= factor * m[(i, k)];
            }
        }
    }

    // Last two columns only: the diagonal and the constant.
    let mut out = Vector3::zeros();
    for j in 0..3 {
        let diag = m[(j, j)];
        if diag == 0.0 || !diag.is_finite() {
            return Err(GeometryError::NoUniqueSolution { row: j });
        }
        m[(j, 3)] /= diag;
        m[(j, j)] = 1.0;
        if !m[(j, 3)].is_finite() {
            return Err(GeometryError::NoUniqueSolution { row: j });
        }
        out[j] = m[(j, 3)];
    }
    Ok(out)
}

/// Unrounded center and radius of the circle through `p1`, `p2`, `p3`.
pub fn circle_through(
    p1: Point,
    p2: Point,
    p3: Point,
) -> Result<(Vector2<f64>, f64), GeometryError> {
    let row = |p: Point| {
        let (x, y) = (p.x as f64, p.y as f64);
        [2.0 * x, 2.0 * y, 1.0, -(x * x + y * y)]
    };
    let (r1, r2, r3) = (row(p1), row(p2), row(p3));
    #[rustfmt::skip]
    let m = Matrix3x4::new(
        r1[0], r1[1], r1[2], r1[3],
        r2[0], r2[1], r2[2], r2[3],
        r3[0], r3[1], r3[2], r3[3],
    );
    let abc = gauss_elimination(m)?;
    let (a, b, c) = (abc[0], abc[1], abc[2]);
    let disc = a * a + b * b - c;
    if disc.is_nan() || disc < 0.0 {
        return Err(GeometryError::NegativeDiscriminant { value: disc });
    }
    Ok((Vector2::new(-a, -b), disc.sqrt()))
}

/// Clip the ray `start + t·direction`, `t ≥ 0`, to the canvas.
///
/// Returns the entry and exit points, or `None` if the ray misses the canvas
/// or has no direction.
pub fn clip_ray(start: Point, direction: Point, canvas: &Canvas) -> Option<(Point, Point)> {
    if direction == Point::default() {
        return None;
    }
    let s = start.to_vector();
    let d = direction.to_vector();
    let checks = [
        (-d.x, s.x),
        (d.x, canvas.width as f64 - s.x),
        (-d.y, s.y),
        (d.y, canvas.height as f64 - s.y),
    ];
    let mut t0: f64 = 0.0;
    let mut t1 = f64::INFINITY;
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
    }
    if t0 > t1 || !t1.is_finite() {
        return None;
    }
    Some((Point::from_vector(s + d * t0), Point::from_vector(s + d * t1)))
}
