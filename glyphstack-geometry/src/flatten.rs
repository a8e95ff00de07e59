//! Adaptive Bézier flattening.
//!
//! Reduces quadratic and cubic Bézier curves to polylines by recursive
//! De Casteljau subdivision, stopping when the control points are within a
//! distance tolerance of the chord. The subdivision constants are part of
//! the output contract: changing them changes every rendered bitmap.

use kurbo::Point;

/// Hard cap on subdivision depth.
const RECURSION_LIMIT: usize = 32;

/// Below this cross-product magnitude the control point is treated as
/// collinear with the chord.
const COLLINEARITY_EPSILON: f64 = 1e-30;

/// Angle tolerances below this disable the angle test entirely.
const ANGLE_TOLERANCE_EPSILON: f64 = 0.01;

/// Adaptive curve flattener.
///
/// The defaults are the ones every shipped bitmap was rendered with:
/// approximation scale 1.0 (distance tolerance `0.5²` pixels), angle
/// tolerance 0 (disabled), cusp limit 0 (disabled, cubics only).
#[derive(Debug, Clone, Copy)]
pub struct CurveFlattener {
    /// Scale applied to the flatness criterion. Larger values produce
    /// more vertices.
    pub approximation_scale: f64,
    /// Maximum angle (radians) between adjacent chords before further
    /// subdivision. Zero disables the test.
    pub angle_tolerance: f64,
    /// Sharpest turn (radians) tolerated at a cubic cusp. Zero disables
    /// the test.
    pub cusp_limit: f64,
}

impl Default for CurveFlattener {
    fn default() -> Self {
        Self {
            approximation_scale: 1.0,
            angle_tolerance: 0.0,
            cusp_limit: 0.0,
        }
    }
}

impl CurveFlattener {
    fn distance_tolerance_sq(&self) -> f64 {
        let d = 0.5 / self.approximation_scale;
        d * d
    }

    /// Flatten a quadratic Bézier.
    ///
    /// Pushes the start point, zero or more interior vertices, and the end
    /// point onto `out`. Callers tracking a current polyline pop its last
    /// vertex first, since the start point is re-emitted here.
    pub fn quadratic(&self, p0: Point, ctrl: Point, p1: Point, out: &mut Vec<Point>) {
        out.push(p0);
        self.recursive_quadratic(p0, ctrl, p1, 0, out);
        out.push(p1);
    }

    /// Flatten a cubic Bézier. Same emission contract as [`Self::quadratic`].
    pub fn cubic(&self, p0: Point, c1: Point, c2: Point, p1: Point, out: &mut Vec<Point>) {
        out.push(p0);
        self.recursive_cubic(p0, c1, c2, p1, 0, out);
        out.push(p1);
    }

    fn recursive_quadratic(
        &self,
        p1: Point,
        p2: Point,
        p3: Point,
        level: usize,
        out: &mut Vec<Point>,
    ) {
        if level > RECURSION_LIMIT {
            return;
        }

        let p12 = p1.midpoint(p2);
        let p23 = p2.midpoint(p3);
        let p123 = p12.midpoint(p23);

        let dx = p3.x - p1.x;
        let dy = p3.y - p1.y;
        let d = ((p2.x - p3.x) * dy - (p2.y - p3.y) * dx).abs();

        if d > COLLINEARITY_EPSILON {
            // Regular case: control point is off the chord.
            if d * d <= self.distance_tolerance_sq() * dx.mul_add(dx, dy * dy) {
                if self.angle_tolerance < ANGLE_TOLERANCE_EPSILON {
                    out.push(p123);
                    return;
                }
                let mut da =
                    ((p3.y - p2.y).atan2(p3.x - p2.x) - (p2.y - p1.y).atan2(p2.x - p1.x)).abs();
                if da >= std::f64::consts::PI {
                    da = std::f64::consts::TAU - da;
                }
                if da < self.angle_tolerance {
                    out.push(p123);
                    return;
                }
            }
        } else {
            // Collinear case: measure how far the control point sits
            // outside the chord.
            let da = dx.mul_add(dx, dy * dy);
            let d = if da == 0.0 {
                p1.distance_squared(p2)
            } else {
                let t = ((p2.x - p1.x) * dx + (p2.y - p1.y) * dy) / da;
                if t > 0.0 && t < 1.0 {
                    // Control point lies on the chord: nothing to subdivide.
                    return;
                }
                if t <= 0.0 {
                    p2.distance_squared(p1)
                } else if t >= 1.0 {
                    p2.distance_squared(p3)
                } else {
                    p2.distance_squared(Point::new(t.mul_add(dx, p1.x), t.mul_add(dy, p1.y)))
                }
            };
            if d < self.distance_tolerance_sq() {
                out.push(p2);
                return;
            }
        }

        self.recursive_quadratic(p1, p12, p123, level + 1, out);
        self.recursive_quadratic(p123, p23, p3, level + 1, out);
    }

    #[expect(
        clippy::too_many_lines,
        reason = "the four-way collinearity dispatch reads best as one function"
    )]
    fn recursive_cubic(
        &self,
        p1: Point,
        p2: Point,
        p3: Point,
        p4: Point,
        level: usize,
        out: &mut Vec<Point>,
    ) {
        if level > RECURSION_LIMIT {
            return;
        }

        let p12 = p1.midpoint(p2);
        let p23 = p2.midpoint(p3);
        let p34 = p3.midpoint(p4);
        let p123 = p12.midpoint(p23);
        let p234 = p23.midpoint(p34);
        let p1234 = p123.midpoint(p234);

        let dx = p4.x - p1.x;
        let dy = p4.y - p1.y;
        let d2 = ((p2.x - p4.x) * dy - (p2.y - p4.y) * dx).abs();
        let d3 = ((p3.x - p4.x) * dy - (p3.y - p4.y) * dx).abs();

        let chord_sq = dx.mul_add(dx, dy * dy);
        let tol_sq = self.distance_tolerance_sq();

        match (d2 > COLLINEARITY_EPSILON, d3 > COLLINEARITY_EPSILON) {
            (false, false) => {
                // All collinear, or the endpoints coincide.
                let (d2, d3) = if chord_sq == 0.0 {
                    (p1.distance_squared(p2), p4.distance_squared(p3))
                } else {
                    let k = 1.0 / chord_sq;
                    let t2 = k * ((p2.x - p1.x) * dx + (p2.y - p1.y) * dy);
                    let t3 = k * ((p3.x - p1.x) * dx + (p3.y - p1.y) * dy);
                    if t2 > 0.0 && t2 < 1.0 && t3 > 0.0 && t3 < 1.0 {
                        // Both control points lie on the chord.
                        return;
                    }
                    (
                        off_chord_distance_sq(p2, p1, p4, t2, dx, dy),
                        off_chord_distance_sq(p3, p1, p4, t3, dx, dy),
                    )
                };
                if d2 > d3 {
                    if d2 < tol_sq {
                        out.push(p2);
                        return;
                    }
                } else if d3 < tol_sq {
                    out.push(p3);
                    return;
                }
            }
            (false, true) => {
                // p1, p2, p4 collinear; p3 is significant.
                if d3 * d3 <= tol_sq * chord_sq {
                    if self.angle_tolerance < ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let da = turn_angle(p2, p3, p4);
                    if da < self.angle_tolerance {
                        out.push(p2);
                        out.push(p3);
                        return;
                    }
                    if self.cusp_limit != 0.0 && da > self.cusp_limit {
                        out.push(p3);
                        return;
                    }
                }
            }
            (true, false) => {
                // p1, p3, p4 collinear; p2 is significant.
                if d2 * d2 <= tol_sq * chord_sq {
                    if self.angle_tolerance < ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let da = turn_angle(p1, p2, p3);
                    if da < self.angle_tolerance {
                        out.push(p2);
                        out.push(p3);
                        return;
                    }
                    if self.cusp_limit != 0.0 && da > self.cusp_limit {
                        out.push(p2);
                        return;
                    }
                }
            }
            (true, true) => {
                // Regular case.
                let d23 = d2 + d3;
                if d23 * d23 <= tol_sq * chord_sq {
                    if self.angle_tolerance < ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let k = (p3.y - p2.y).atan2(p3.x - p2.x);
                    let mut da1 = (k - (p2.y - p1.y).atan2(p2.x - p1.x)).abs();
                    let mut da2 = ((p4.y - p3.y).atan2(p4.x - p3.x) - k).abs();
                    if da1 >= std::f64::consts::PI {
                        da1 = std::f64::consts::TAU - da1;
                    }
                    if da2 >= std::f64::consts::PI {
                        da2 = std::f64::consts::TAU - da2;
                    }
                    if da1 + da2 < self.angle_tolerance {
                        out.push(p23);
                        return;
                    }
                    if self.cusp_limit != 0.0 {
                        if da1 > self.cusp_limit {
                            out.push(p2);
                            return;
                        }
                        if da2 > self.cusp_limit {
                            out.push(p3);
                            return;
                        }
                    }
                }
            }
        }

        self.recursive_cubic(p1, p12, p123, p1234, level + 1, out);
        self.recursive_cubic(p1234, p234, p34, p4, level + 1, out);
    }
}

/// Squared distance from a control point to the chord `a..b`, given its
/// projection parameter `t` onto the chord.
fn off_chord_distance_sq(ctrl: Point, a: Point, b: Point, t: f64, dx: f64, dy: f64) -> f64 {
    if t <= 0.0 {
        ctrl.distance_squared(a)
    } else if t >= 1.0 {
        ctrl.distance_squared(b)
    } else {
        ctrl.distance_squared(Point::new(t.mul_add(dx, a.x), t.mul_add(dy, a.y)))
    }
}

/// Absolute turn angle at `b` along the polyline `a -> b -> c`, folded
/// into `[0, pi]`.
fn turn_angle(a: Point, b: Point, c: Point) -> f64 {
    let mut da = ((c.y - b.y).atan2(c.x - b.x) - (b.y - a.y).atan2(b.x - a.x)).abs();
    if da >= std::f64::consts::PI {
        da = std::f64::consts::TAU - da;
    }
    da
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    /// Evaluate a quadratic Bézier at `t`.
    fn quad_at(p0: Point, c: Point, p1: Point, t: f64) -> Point {
        let s = 1.0 - t;
        Point::new(
            s * s * p0.x + 2.0 * s * t * c.x + t * t * p1.x,
            s * s * p0.y + 2.0 * s * t * c.y + t * t * p1.y,
        )
    }

    fn max_deviation_from_quad(points: &[Point], p0: Point, c: Point, p1: Point) -> f64 {
        // Sample the true curve densely and measure distance to the polyline.
        let mut worst = 0.0f64;
        for i in 0..=256 {
            let t = f64::from(i) / 256.0;
            let q = quad_at(p0, c, p1, t);
            let d = points
                .windows(2)
                .map(|w| crate::distance::segment_distance_squared(q, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            worst = worst.max(d.sqrt());
        }
        worst
    }

    #[test]
    fn quadratic_starts_and_ends_on_curve() {
        let f = CurveFlattener::default();
        let mut out = Vec::new();
        let (p0, c, p1) = (
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 0.0),
        );
        f.quadratic(p0, c, p1, &mut out);
        assert!(out.len() >= 3, "curved arc should subdivide, got {out:?}");
        assert!((out[0] - p0).hypot() < TOLERANCE);
        assert!((out[out.len() - 1] - p1).hypot() < TOLERANCE);
    }

    #[test]
    fn quadratic_chordal_error_is_bounded() {
        let f = CurveFlattener::default();
        let (p0, c, p1) = (
            Point::new(0.0, 0.0),
            Point::new(12.0, 30.0),
            Point::new(24.0, 0.0),
        );
        let mut out = Vec::new();
        f.quadratic(p0, c, p1, &mut out);
        let dev = max_deviation_from_quad(&out, p0, c, p1);
        assert!(dev <= 0.5 + 1e-6, "deviation {dev} exceeds tolerance");
    }

    #[test]
    fn degenerate_quadratic_stays_short() {
        // Control point on the chord: no interior vertices needed.
        let f = CurveFlattener::default();
        let mut out = Vec::new();
        f.quadratic(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
            &mut out,
        );
        assert_eq!(out.len(), 2, "collinear quadratic: {out:?}");
    }

    #[test]
    fn cubic_starts_and_ends_on_curve() {
        let f = CurveFlattener::default();
        let mut out = Vec::new();
        let (p0, c1, c2, p1) = (
            Point::new(0.0, 0.0),
            Point::new(5.0, 15.0),
            Point::new(15.0, 15.0),
            Point::new(20.0, 0.0),
        );
        f.cubic(p0, c1, c2, p1, &mut out);
        assert!(out.len() >= 3, "curved cubic should subdivide, got {out:?}");
        assert!((out[0] - p0).hypot() < TOLERANCE);
        assert!((out[out.len() - 1] - p1).hypot() < TOLERANCE);
    }

    #[test]
    fn cubic_midpoint_is_near_polyline() {
        let f = CurveFlattener::default();
        let (p0, c1, c2, p1) = (
            Point::new(0.0, 0.0),
            Point::new(0.0, 20.0),
            Point::new(24.0, 20.0),
            Point::new(24.0, 0.0),
        );
        let mut out = Vec::new();
        f.cubic(p0, c1, c2, p1, &mut out);
        // De Casteljau midpoint of this symmetric curve is (12, 15).
        let mid = Point::new(12.0, 15.0);
        let d = out
            .windows(2)
            .map(|w| crate::distance::segment_distance_squared(mid, w[0], w[1]))
            .fold(f64::INFINITY, f64::min)
            .sqrt();
        assert!(d <= 0.5 + 1e-6, "midpoint off polyline by {d}");
    }

    #[test]
    fn collinear_cubic_emits_no_interior_points() {
        let f = CurveFlattener::default();
        let mut out = Vec::new();
        f.cubic(
            Point::new(0.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(7.0, 7.0),
            Point::new(10.0, 10.0),
            &mut out,
        );
        assert_eq!(out.len(), 2, "collinear cubic: {out:?}");
    }

    #[test]
    fn coarser_scale_emits_fewer_vertices() {
        let fine = CurveFlattener::default();
        let coarse = CurveFlattener {
            approximation_scale: 0.1,
            ..CurveFlattener::default()
        };
        let (p0, c, p1) = (
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let mut a = Vec::new();
        let mut b = Vec::new();
        fine.quadratic(p0, c, p1, &mut a);
        coarse.quadratic(p0, c, p1, &mut b);
        assert!(
            b.len() < a.len(),
            "coarse ({}) should be shorter than fine ({})",
            b.len(),
            a.len()
        );
    }
}
