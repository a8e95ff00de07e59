//! Point-to-segment distance.

use kurbo::Point;

/// Project `p` onto the segment `v..w`, clamping to the endpoints.
///
/// A zero-length segment degenerates to `v`.
#[must_use]
pub fn project_on_segment(p: Point, v: Point, w: Point) -> Point {
    let l2 = v.distance_squared(w);
    if l2 == 0.0 {
        return v;
    }

    let t = ((p.x - v.x) * (w.x - v.x) + (p.y - v.y) * (w.y - v.y)) / l2;
    if t < 0.0 {
        return v;
    }
    if t > 1.0 {
        return w;
    }

    Point::new(
        t.mul_add(w.x - v.x, v.x),
        t.mul_add(w.y - v.y, v.y),
    )
}

/// Squared Euclidean distance from `p` to the segment `v..w`.
#[must_use]
pub fn segment_distance_squared(p: Point, v: Point, w: Point) -> f64 {
    p.distance_squared(project_on_segment(p, v, w))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "exact float comparisons are intentional in tests"
)]
mod tests {
    use super::*;

    #[test]
    fn projection_falls_inside_segment() {
        let p = project_on_segment(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(p, Point::new(5.0, 0.0));
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let v = Point::new(0.0, 0.0);
        let w = Point::new(10.0, 0.0);
        assert_eq!(project_on_segment(Point::new(-3.0, 4.0), v, w), v);
        assert_eq!(project_on_segment(Point::new(13.0, 4.0), v, w), w);
    }

    #[test]
    fn zero_length_segment_degenerates_to_point() {
        let v = Point::new(2.0, 2.0);
        assert_eq!(project_on_segment(Point::new(7.0, 2.0), v, v), v);
        assert_eq!(
            segment_distance_squared(Point::new(5.0, 6.0), v, v),
            v.distance_squared(Point::new(5.0, 6.0))
        );
    }

    #[test]
    fn perpendicular_distance() {
        let d = segment_distance_squared(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(d, 9.0);
    }

    #[test]
    fn distance_past_endpoint_is_euclidean() {
        let d = segment_distance_squared(
            Point::new(13.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(d, 25.0);
    }
}
