//! The largest empty circle: the biggest disc whose interior contains no
//! input point and whose center lies inside the convex hull.
//!
//! The optimum is centered either on a Voronoi vertex inside the hull or on
//! an intersection of a Voronoi edge with the hull boundary; both candidate
//! families are enumerated from the two finished diagrams.

use std::collections::HashMap;

use glam::DVec2;

use crate::convex_hull::ConvexHull;
use crate::dcel::{Dcel, EdgeId, VertexId};
use crate::delaunay::Delaunay;
use crate::geometry::{Circle, LineSegment};
use crate::voronoi::Voronoi;

/// The candidate circles and their maximum.
pub struct LargestEmptyCircle {
    candidates: Vec<Circle>,
}

impl LargestEmptyCircle {
    /// Enumerate the candidate circles of the given diagrams.
    pub fn new(delaunay: &Delaunay, voronoi: &Voronoi) -> Self {
        let hull = ConvexHull::new(delaunay);
        let del = delaunay.dcel();
        let vor = voronoi.dcel();

        let mut candidates = vec![];
        let mut inside_memo = HashMap::new();

        let mut edge: EdgeId = 1;
        while edge <= vor.edge_count() as EdgeId {
            let origin_vertex = vor.origin(edge);
            let origin = vor.origin_point(edge);
            let twin = vor.twin(edge);
            let destination_vertex = vor.origin(twin);
            let destination = vor.origin_point(twin);

            // Both endpoints inside the hull: the endpoints themselves are
            // the candidates and the edge cannot leave the hull. Otherwise
            // the edge may cross the boundary (it can even when both
            // endpoints are outside), and every crossing is a candidate.
            if !check_vertex(&hull, del, &mut inside_memo, &mut candidates, origin_vertex, origin)
                || !check_vertex(
                    &hull,
                    del,
                    &mut inside_memo,
                    &mut candidates,
                    destination_vertex,
                    destination,
                )
            {
                let intersections = hull.intersections(&LineSegment::new(origin, destination));
                if !intersections.is_empty() {
                    let origin_ids = del.face_vertex_ids(origin_vertex);
                    let destination_ids = del.face_vertex_ids(destination_vertex);
                    debug_assert_eq!(origin_ids.len(), 3);
                    debug_assert_eq!(destination_ids.len(), 3);

                    // The two Delaunay faces flank one Delaunay edge; its
                    // endpoints are the shared (real) vertices and both are
                    // equidistant from any point on the Voronoi edge.
                    let shared = origin_ids
                        .iter()
                        .copied()
                        .find(|id| destination_ids.contains(id))
                        .expect("adjacent delaunay faces share no vertex");
                    let site = del.point(shared);

                    for intersection in intersections {
                        candidates.push(Circle::new(intersection, intersection.distance(site)));
                    }
                }
            }

            // Skip the twin slot.
            edge += 2;
        }

        Self { candidates }
    }

    /// All enumerated candidate circles.
    pub fn candidates(&self) -> &[Circle] {
        &self.candidates
    }

    /// The candidate with the greatest radius; ties resolve to the earliest
    /// enumerated one. `None` only if there are no candidates at all.
    pub fn largest(&self) -> Option<Circle> {
        self.candidates.iter().copied().reduce(|best, candidate| {
            if candidate.radius > best.radius {
                candidate
            } else {
                best
            }
        })
    }
}

/// Memoized hull test for a Voronoi vertex. An inside vertex immediately
/// yields a candidate: its id doubles as the Delaunay face id, and every
/// real corner of that face is at circumradius distance.
fn check_vertex(
    hull: &ConvexHull,
    delaunay: &Dcel,
    memo: &mut HashMap<VertexId, bool>,
    candidates: &mut Vec<Circle>,
    vertex: VertexId,
    point: DVec2,
) -> bool {
    if let Some(&inside) = memo.get(&vertex) {
        return inside;
    }

    let inside = hull.contains(point);
    memo.insert(vertex, inside);
    if inside {
        let site = delaunay
            .face_point(vertex)
            .expect("delaunay face without a real corner");
        candidates.push(Circle::new(point, point.distance(site)));
    }
    inside
}
