//! Convex hull extraction.
//!
//! The hull falls out of the finished triangulation for free: its boundary
//! is the cycle of real edges flanked by the imaginary faces, reachable by
//! walking the DCEL from vertex 1 (the highest input point).

use glam::DVec2;

use crate::dcel::{Dcel, POINT_MINUS_2};
use crate::delaunay::Delaunay;
use crate::geometry::{self, LineSegment, Orientation};

/// The convex hull of the triangulated points, in counterclockwise order.
pub struct ConvexHull {
    edges: Vec<LineSegment>,
}

impl ConvexHull {
    /// Extract the hull from a finished triangulation.
    pub fn new(delaunay: &Delaunay) -> Self {
        let vertices = boundary_vertices(delaunay.dcel());
        let edges = (0..vertices.len())
            .map(|i| LineSegment::new(vertices[i], vertices[(i + 1) % vertices.len()]))
            .collect();
        Self { edges }
    }

    /// The hull edges, counterclockwise, closed back to the first vertex.
    pub fn edges(&self) -> &[LineSegment] {
        &self.edges
    }

    /// Whether `p` lies in the closed region bounded by the hull (boundary
    /// included): no hull edge may see it on its right.
    pub fn contains(&self, p: DVec2) -> bool {
        self.edges
            .iter()
            .all(|edge| geometry::orient(edge.start, edge.end, p) != Orientation::Negative)
    }

    /// All intersection points of `segment` with the hull boundary, dropping
    /// hits coinciding with the segment's own endpoints.
    pub fn intersections(&self, segment: &LineSegment) -> Vec<DVec2> {
        self.edges
            .iter()
            .filter_map(|edge| segment.intersection(edge))
            .filter(|&point| {
                !geometry::approx_eq(point, segment.start)
                    && !geometry::approx_eq(point, segment.end)
            })
            .collect()
    }
}

/// Collect the hull vertices by walking the triangulation boundary.
fn boundary_vertices(dcel: &Dcel) -> Vec<DVec2> {
    // Rotate around vertex 1 until the outgoing edge towards P₋₂ comes up;
    // the edge before it is the first hull edge.
    let mut current = dcel.vertex(1).incident_edge();
    while !(dcel.origin(current) == 1 && dcel.destination(current) == POINT_MINUS_2) {
        current = dcel.twin(dcel.previous(current));
    }
    current = dcel.previous(current);
    let first = current;

    let mut vertices = vec![];
    loop {
        vertices.push(dcel.origin_point(current));
        current = dcel.previous(dcel.twin(dcel.previous(current)));
        if dcel.origin(current) < 0 {
            // Stepped onto a symbolic corner, take the corrective turn.
            current = dcel.previous(dcel.twin(current));
        }
        if current == first {
            break;
        }
    }
    vertices
}

#[cfg(test)]
mod test {
    use super::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    fn hull() -> ConvexHull {
        let del = Delaunay::build(&[
            p(0., 0.),
            p(0., 1.1),
            p(1., 0.),
            p(1., 1.),
            p(2., 3.4),
            p(0.2, 1.6),
        ])
        .unwrap();
        ConvexHull::new(&del)
    }

    #[test]
    fn test_contains() {
        let hull = hull();
        // All input points, hull corners included, are inside.
        for point in [
            p(0., 0.),
            p(0., 1.1),
            p(1., 0.),
            p(1., 1.),
            p(2., 3.4),
            p(0.2, 1.6),
        ] {
            assert!(hull.contains(point));
        }
        // A boundary point and a strictly interior point count as inside.
        assert!(hull.contains(p(0., 0.5)));
        assert!(hull.contains(p(0.5, 0.5)));
        // Far outside.
        assert!(!hull.contains(p(-1., -1.)));
    }

    #[test]
    fn test_intersections() {
        let hull = hull();

        let hits = hull.intersections(&LineSegment::new(p(0.5, 0.5), p(0.5, -1.)));
        assert_eq!(hits.len(), 1);
        assert!(geometry::approx_eq(hits[0], p(0.5, 0.)));

        let hits = hull.intersections(&LineSegment::new(p(-1., 1.5), p(1.5, -1.)));
        assert_eq!(hits.len(), 2);
        assert!(geometry::approx_eq(hits[0], p(0., 0.5)));
        assert!(geometry::approx_eq(hits[1], p(0.5, 0.)));

        // A hit on the query segment's own endpoint does not count.
        assert!(hull
            .intersections(&LineSegment::new(p(0., 0.), p(-1., 0.)))
            .is_empty());

        // Entirely inside, entirely outside.
        assert!(hull
            .intersections(&LineSegment::new(p(0.1, 0.1), p(0.2, 0.2)))
            .is_empty());
        assert!(hull
            .intersections(&LineSegment::new(p(-1., -1.), p(-4., -1.)))
            .is_empty());
    }
}
