//! Point-in-polygon test.

use kurbo::Point;

use crate::Rings;

/// Ray-casting containment test over a set of closed rings.
///
/// Toggles on every crossing of a horizontal ray from `p`, XOR-accumulated
/// across all rings. Holes therefore work regardless of winding direction:
/// a point inside an even number of rings is outside the shape.
#[must_use]
pub fn contains(rings: &Rings, p: Point) -> bool {
    let mut inside = false;

    for ring in rings {
        for pair in ring.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if (p1.y > p.y) != (p2.y > p.y)
                && p.x < (p2.x - p1.x) * (p.y - p1.y) / (p2.y - p1.y) + p1.x
            {
                inside = !inside;
            }
        }
    }

    inside
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ring;

    /// Closed axis-aligned rectangle ring.
    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(x0, y0),
        ]
    }

    #[test]
    fn point_inside_square() {
        let rings = vec![rect(0.0, 0.0, 10.0, 10.0)];
        assert!(contains(&rings, Point::new(5.0, 5.0)));
    }

    #[test]
    fn point_outside_square() {
        let rings = vec![rect(0.0, 0.0, 10.0, 10.0)];
        assert!(!contains(&rings, Point::new(15.0, 5.0)));
        assert!(!contains(&rings, Point::new(5.0, -1.0)));
    }

    #[test]
    fn hole_is_outside() {
        // A square with a square hole; the hole ring has the same winding
        // as the outer ring, which must not matter.
        let rings = vec![rect(0.0, 0.0, 12.0, 12.0), rect(4.0, 4.0, 8.0, 8.0)];
        assert!(contains(&rings, Point::new(2.0, 6.0)), "in the band");
        assert!(!contains(&rings, Point::new(6.0, 6.0)), "in the hole");
        assert!(!contains(&rings, Point::new(13.0, 6.0)), "outside");
    }

    #[test]
    fn reversed_hole_winding_behaves_identically() {
        let mut hole = rect(4.0, 4.0, 8.0, 8.0);
        hole.reverse();
        let rings = vec![rect(0.0, 0.0, 12.0, 12.0), hole];
        assert!(contains(&rings, Point::new(2.0, 6.0)));
        assert!(!contains(&rings, Point::new(6.0, 6.0)));
    }

    #[test]
    fn triangle_containment() {
        let rings = vec![vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 0.0),
        ]];
        assert!(contains(&rings, Point::new(5.0, 3.0)));
        assert!(!contains(&rings, Point::new(1.0, 8.0)));
    }

    #[test]
    fn empty_rings_contain_nothing() {
        assert!(!contains(&Rings::new(), Point::new(0.0, 0.0)));
    }
}
