//! Planar geometry primitives and predicates used by the triangulation,
//! Voronoi and largest-empty-circle stages, which might also be useful for
//! users of this library.

use std::cmp::Ordering;

use glam::DVec2;

/// Absolute tolerance for point and radius equality.
pub const EPS: f64 = 1e-4;

/// Tolerance below which a signed area is treated as collinear.
///
/// Deliberately tighter than [`EPS`]: orientation decisions must not flicker
/// for points that still compare unequal.
pub const COLLINEAR_EPS: f64 = 1e-6;

/// The orientation of an ordered point triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Positive,
    Negative,
    Collinear,
}

/// Whether two points coincide within [`EPS`] per coordinate.
pub fn approx_eq(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

/// Total order on points: lexicographic with the y coordinate major and the
/// x coordinate minor.
pub fn lex_cmp(a: DVec2, b: DVec2) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

pub(crate) fn lex_gt(a: DVec2, b: DVec2) -> bool {
    lex_cmp(a, b) == Ordering::Greater
}

/// Compute the signed area of the triangle `p`, `q`, `r`.
///
/// Positive for a counterclockwise triple, negative for a clockwise one.
pub fn signed_area(p: DVec2, q: DVec2, r: DVec2) -> f64 {
    (q - p).perp_dot(r - p) / 2.
}

/// Classify the orientation of the triple `p`, `q`, `r` from the sign of its
/// signed area, reporting [`Orientation::Collinear`] below [`COLLINEAR_EPS`].
pub fn orient(p: DVec2, q: DVec2, r: DVec2) -> Orientation {
    let area = signed_area(p, q, r);
    if area > COLLINEAR_EPS {
        Orientation::Positive
    } else if area < -COLLINEAR_EPS {
        Orientation::Negative
    } else {
        Orientation::Collinear
    }
}

/// Whether `d` lies strictly inside the circumcircle of the counterclockwise
/// triangle `a`, `b`, `c`.
///
/// Sign of the 3×3 determinant of the coordinates shifted by `d` with their
/// squared norms. No tolerance is applied: points on the circle count as
/// outside.
pub fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let ad = a - d;
    let bd = b - d;
    let cd = c - d;

    let det = ad.x * (bd.y * cd.length_squared() - cd.y * bd.length_squared())
        - ad.y * (bd.x * cd.length_squared() - cd.x * bd.length_squared())
        + ad.length_squared() * bd.perp_dot(cd);

    det > 0.
}

/// Rotate `p` by 90 degrees in the positive sense around `around`.
pub fn rotate_90(p: DVec2, around: DVec2) -> DVec2 {
    around + (p - around).perp()
}

/// Denominator of the parametric intersection system of the (infinite) lines
/// `o1 → d1` and `o2 → d2`; vanishes for parallel lines.
fn intersection_denominator(o1: DVec2, d1: DVec2, o2: DVec2, d2: DVec2) -> f64 {
    (d1 - o1).perp_dot(d2 - o2)
}

/// Solve `o1 + t1 (d1 - o1) = o2 + t2 (d2 - o2)` for `(t1, t2)`.
///
/// The lines must not be parallel.
fn solve_intersection(o1: DVec2, d1: DVec2, o2: DVec2, d2: DVec2) -> (f64, f64) {
    if (d1.x - o1.x).abs() < EPS {
        // The first line is (nearly) vertical, solve for t2 via x first.
        let t2 = (o1.x - o2.x) / (d2.x - o2.x);
        let t1 = (o2.y - o1.y + t2 * (d2.y - o2.y)) / (d1.y - o1.y);
        (t1, t2)
    } else {
        let t2 = ((o1.y - o2.y) * (d1.x - o1.x) - (o1.x - o2.x) * (d1.y - o1.y))
            / intersection_denominator(o1, d1, o2, d2);
        let t1 = (o2.x - o1.x + t2 * (d2.x - o2.x)) / (d1.x - o1.x);
        (t1, t2)
    }
}

/// A directed line segment between two points.
#[derive(Clone, Copy, Debug)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Whether this segment and `other` connect the same pair of points
    /// (within [`EPS`]), in either direction.
    pub fn approx_eq(&self, other: &LineSegment) -> bool {
        (approx_eq(self.start, other.start) && approx_eq(self.end, other.end))
            || (approx_eq(self.start, other.end) && approx_eq(self.end, other.start))
    }

    /// Compute the intersection point of two segments, if any.
    ///
    /// For parallel overlapping segments infinitely many intersection points
    /// exist; the first endpoint (of `self`, then of `other`) lying on the
    /// other segment is reported.
    pub fn intersection(&self, other: &LineSegment) -> Option<DVec2> {
        let (o1, d1) = (self.start, self.end);
        let (o2, d2) = (other.start, other.end);

        if intersection_denominator(o1, d1, o2, d2).abs() < EPS {
            // Parallel segments: check the four endpoints for containment.
            if between(o2, d2, o1) {
                return Some(o1);
            }
            if between(o2, d2, d1) {
                return Some(d1);
            }
            if between(o1, d1, o2) {
                return Some(o2);
            }
            if between(o1, d1, d2) {
                return Some(d2);
            }
            return None;
        }

        let (t1, t2) = solve_intersection(o1, d1, o2, d2);
        if (0. ..=1.).contains(&t1) && (0. ..=1.).contains(&t2) {
            Some(o1 + t1 * (d1 - o1))
        } else {
            None
        }
    }
}

/// Whether `c` lies on the segment from `a` to `b`.
fn between(a: DVec2, b: DVec2, c: DVec2) -> bool {
    (b - a).perp_dot(c - a).abs() < EPS
        && c.x <= a.x.max(b.x)
        && c.x >= a.x.min(b.x)
        && c.y <= a.y.max(b.y)
        && c.y >= a.y.min(b.y)
}

/// An infinite line through two points.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub origin: DVec2,
    pub destination: DVec2,
}

impl Line {
    pub fn new(origin: DVec2, destination: DVec2) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Compute the intersection point of two lines, or `None` if they are
    /// parallel.
    pub fn intersection(&self, other: &Line) -> Option<DVec2> {
        let (o1, d1) = (self.origin, self.destination);
        let (o2, d2) = (other.origin, other.destination);

        if intersection_denominator(o1, d1, o2, d2).abs() < EPS {
            return None;
        }

        let (t1, _) = solve_intersection(o1, d1, o2, d2);
        Some(o1 + t1 * (d1 - o1))
    }
}

/// A circle given by its center and radius.
#[derive(Clone, Copy, Debug)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The circumcircle of three non-collinear points.
    ///
    /// The center is found as the intersection of the perpendicular bisectors
    /// of two sides; each bisector runs through the midpoint of a side and
    /// the 90 degree rotation of one endpoint around that midpoint.
    pub fn through(a: DVec2, b: DVec2, c: DVec2) -> Self {
        let ab_middle = (a + b) / 2.;
        let bc_middle = (b + c) / 2.;
        let bisector_ab = Line::new(ab_middle, rotate_90(b, ab_middle));
        let bisector_bc = Line::new(bc_middle, rotate_90(c, bc_middle));

        let center = bisector_ab
            .intersection(&bisector_bc)
            .expect("circumcircle of collinear points");

        Self::new(center, center.distance(a))
    }

    /// Whether this circle and `other` coincide within [`EPS`].
    pub fn approx_eq(&self, other: &Circle) -> bool {
        approx_eq(self.center, other.center) && (self.radius - other.radius).abs() < EPS
    }
}

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// The smallest box containing all given points.
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn test_lex_order() {
        assert_eq!(lex_cmp(p(1., 1.), p(1., 2.)), Ordering::Less);
        assert_eq!(lex_cmp(p(1., 1.), p(3., 2.)), Ordering::Less);
        assert_eq!(lex_cmp(p(3., 1.), p(1., 2.)), Ordering::Less);
        assert_eq!(lex_cmp(p(1., 2.), p(3., 2.)), Ordering::Less);
        assert_eq!(lex_cmp(p(1.3, 2.5), p(1.3, 2.5)), Ordering::Equal);
        assert!(lex_gt(p(5., 8.), p(4., 8.)));
        assert!(!lex_gt(p(3., 8.), p(4., 8.)));
    }

    #[test]
    fn test_signed_area() {
        assert_eq!(signed_area(p(0., 0.), p(2., 0.), p(0., 2.)), 2.);
        assert_eq!(signed_area(p(0., 2.), p(0., 0.), p(2., 0.)), 2.);
        assert_eq!(signed_area(p(0., 0.), p(0., 2.), p(2., 0.)), -2.);

        // Degenerate triples have zero area.
        assert_eq!(signed_area(p(0., 0.), p(0., 0.), p(0., 0.)), 0.);
        assert_eq!(signed_area(p(0., 0.), p(2., 0.), p(3., 0.)), 0.);

        assert_approx_eq!(
            f64,
            signed_area(p(4.5, 8.), p(2.8, 1.), p(10., 3.4)),
            23.16,
            epsilon = EPS
        );
    }

    #[test]
    fn test_orientation() {
        assert_eq!(orient(p(0., 0.), p(2., 0.), p(0., 2.)), Orientation::Positive);
        assert_eq!(orient(p(0., 0.), p(0., 2.), p(2., 0.)), Orientation::Negative);
        assert_eq!(orient(p(0., 0.), p(2., 0.), p(3., 0.)), Orientation::Collinear);
        assert_eq!(orient(p(0., 0.), p(2., 2.), p(3., 3.)), Orientation::Collinear);
        assert_eq!(orient(p(0., 0.), p(1., 1.5), p(1., 1.5)), Orientation::Collinear);
    }

    #[test]
    fn test_orientation_antisymmetric() {
        let (a, b, c) = (p(4.5, 8.), p(2.8, 1.), p(10., 3.4));
        assert_eq!(orient(a, b, c), Orientation::Positive);
        assert_eq!(orient(a, c, b), Orientation::Negative);
        assert_eq!(signed_area(a, b, c), -signed_area(a, c, b));
    }

    #[test]
    fn test_in_circle() {
        let (a, b, c) = (p(0., 0.), p(2., 0.), p(0., 2.));
        assert!(in_circle(a, b, c, p(1., 1.)));
        assert!(!in_circle(a, b, c, p(3., 3.)));
        // Points on the circle count as outside.
        assert!(!in_circle(a, b, c, p(2., 2.)));
    }

    #[test]
    fn test_in_circle_cyclic() {
        let (a, b, c) = (p(0., 0.), p(6., 0.), p(0., 8.));
        for d in [p(3., 4.), p(1., 1.), p(-2., 7.), p(6.1, 0.)] {
            let inside = in_circle(a, b, c, d);
            assert_eq!(in_circle(b, c, a, d), inside);
            assert_eq!(in_circle(c, a, b, d), inside);
        }
    }

    #[test]
    fn test_rotate_90() {
        assert!(approx_eq(rotate_90(p(1., 0.), p(0., 0.)), p(0., 1.)));
        assert!(approx_eq(rotate_90(p(2., 1.), p(1., 1.)), p(1., 2.)));
    }

    #[test]
    fn test_segment_intersection() {
        let seg = |a: DVec2, b: DVec2| LineSegment::new(a, b);

        // Meeting at segment endpoints.
        let i = seg(p(0., 0.), p(1., 0.)).intersection(&seg(p(0., 0.), p(0., 1.)));
        assert!(approx_eq(i.unwrap(), p(0., 0.)));
        let i = seg(p(0., 0.), p(1., 0.)).intersection(&seg(p(1., 2.), p(1., 0.)));
        assert!(approx_eq(i.unwrap(), p(1., 0.)));

        // Crossing at an interior point.
        let i = seg(p(1., 1.), p(3., 8.)).intersection(&seg(p(2., 0.5), p(-2., 5.)));
        assert!(approx_eq(i.unwrap(), p(42. / 37., 109. / 74.)));

        // Touching at one segment's interior.
        let i = seg(p(0., 0.), p(1., 0.)).intersection(&seg(p(0.5, 0.), p(1., 1.)));
        assert!(approx_eq(i.unwrap(), p(0.5, 0.)));

        // Disjoint.
        assert!(seg(p(0.2, 0.), p(1., 0.))
            .intersection(&seg(p(0., 0.), p(0., 1.)))
            .is_none());
        assert!(seg(p(1., 1.), p(3., 8.))
            .intersection(&seg(p(2., -5.), p(-2., -4.)))
            .is_none());
    }

    #[test]
    fn test_segment_intersection_parallel() {
        let seg = |a: DVec2, b: DVec2| LineSegment::new(a, b);

        // Collinear segments sharing one endpoint.
        let i = seg(p(0., 0.), p(1., 0.)).intersection(&seg(p(1., 0.), p(5., 0.)));
        assert!(approx_eq(i.unwrap(), p(1., 0.)));

        // Overlapping collinear segments report an endpoint of the overlap.
        let i = seg(p(0., 0.), p(1., 0.)).intersection(&seg(p(0.5, 0.), p(2., 0.)));
        assert!(approx_eq(i.unwrap(), p(1., 0.)));
        let i = seg(p(0.5, 0.), p(2., 0.)).intersection(&seg(p(0., 0.), p(1., 0.)));
        assert!(approx_eq(i.unwrap(), p(0.5, 0.)));
        let i = seg(p(0., 0.), p(2., 0.)).intersection(&seg(p(0.5, 0.), p(1., 0.)));
        assert!(approx_eq(i.unwrap(), p(0.5, 0.)));

        // Disjoint collinear segments.
        assert!(seg(p(0., 0.), p(1., 0.))
            .intersection(&seg(p(1.2, 0.), p(5., 0.)))
            .is_none());
        assert!(seg(p(4., 4.), p(5., 5.))
            .intersection(&seg(p(0., 0.), p(3., 3.)))
            .is_none());

        // Parallel but not collinear.
        assert!(seg(p(0., 0.), p(1., 0.))
            .intersection(&seg(p(0.5, -1.), p(2., -1.)))
            .is_none());
        assert!(seg(p(2., 1.), p(4., 3.))
            .intersection(&seg(p(0., 0.), p(3., 3.)))
            .is_none());
    }

    #[test]
    fn test_segment_intersection_symmetric() {
        let cases = [
            (
                LineSegment::new(p(1., 1.), p(3., 8.)),
                LineSegment::new(p(2., 0.5), p(-2., 5.)),
            ),
            (
                LineSegment::new(p(0., 0.), p(1., 0.)),
                LineSegment::new(p(0.5, 0.2), p(1., 1.)),
            ),
        ];
        for (a, b) in cases {
            match (a.intersection(&b), b.intersection(&a)) {
                (Some(i), Some(j)) => assert!(approx_eq(i, j)),
                (None, None) => (),
                other => panic!("asymmetric intersection result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_line_intersection() {
        let i = Line::new(p(0.2, 0.), p(1., 0.)).intersection(&Line::new(p(0., 0.), p(0., 1.)));
        assert!(approx_eq(i.unwrap(), p(0., 0.)));

        // Beyond both segments, but lines still meet.
        let i = Line::new(p(1., 1.), p(3., 8.)).intersection(&Line::new(p(2., -5.), p(-2., -4.)));
        assert!(approx_eq(i.unwrap(), p(-8. / 15., -131. / 30.)));

        // Parallel lines never intersect.
        assert!(Line::new(p(0., 0.), p(1., 0.))
            .intersection(&Line::new(p(5., 0.), p(1., 0.)))
            .is_none());
        assert!(Line::new(p(2., 2.), p(4., 4.))
            .intersection(&Line::new(p(0., 0.), p(3., 3.)))
            .is_none());
    }

    #[test]
    fn test_circumcircle() {
        let c = Circle::through(p(0., 0.), p(6., 0.), p(0., 8.));
        assert!(c.approx_eq(&Circle::new(p(3., 4.), 5.)));

        let c = Circle::through(p(1., 10.), p(2., 5.), p(3., 6.));
        assert!(c.approx_eq(&Circle::new(p(2. / 3., 22. / 3.), 2.6874)));
    }

    #[test]
    fn test_aabb() {
        let aabb = Aabb::from_points([p(1., 2.), p(-3., 5.), p(0., -1.)]);
        assert_eq!(aabb.min, p(-3., -1.));
        assert_eq!(aabb.max, p(1., 5.));
    }
}
