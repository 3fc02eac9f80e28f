//! The Voronoi diagram, built as the dual of a finished Delaunay
//! triangulation.
//!
//! Every Delaunay face contributes one Voronoi vertex (the circumcenter of
//! its triangle), indexed so that vertex id and face id coincide. Faces
//! touching a symbolic point have no circumcenter; their vertices are placed
//! far along the perpendicular bisector of the hull edge they share with a
//! real face, which keeps unbounded cells representable without a bounding
//! box. Cells are then assembled site by site into a second DCEL.

use glam::DVec2;

use crate::dcel::{Dcel, EdgeId, Face, FaceId, HalfEdge, Vertex, VertexId};
use crate::delaunay::Delaunay;
use crate::geometry::{self, Aabb, Circle, LineSegment, Orientation};

/// How far along their ray the vertices of unbounded cells are placed.
const FAR_SCALE: f64 = 1e5;

/// The Voronoi diagram of the sites of a Delaunay triangulation.
pub struct Voronoi<'t> {
    triangulation: &'t Dcel,
    dcel: Dcel,
}

impl<'t> Voronoi<'t> {
    /// Dualize the given triangulation.
    pub fn build(delaunay: &'t Delaunay) -> Self {
        let mut voronoi = Self {
            triangulation: delaunay.dcel(),
            dcel: Dcel::default(),
        };

        // Placeholder external face so cell faces start at id 1, matching
        // the 1-based site ids.
        voronoi.dcel.push_face(Face::new(-1));

        voronoi.place_vertices();
        for site in 1..=voronoi.triangulation.vertex_count() as VertexId {
            voronoi.add_cell(site);
        }
        voronoi
    }

    /// The Voronoi DCEL.
    pub fn dcel(&self) -> &Dcel {
        &self.dcel
    }

    /// The Voronoi edges, skipping degenerate ones whose endpoints coincide
    /// (adjacent cocircular triangles share a circumcenter).
    pub fn edges(&self) -> Vec<LineSegment> {
        let mut result = vec![];
        let mut edge: EdgeId = 1;
        while edge <= self.dcel.edge_count() as EdgeId {
            let origin = self.dcel.origin_point(edge);
            let destination = self.dcel.origin_point(self.dcel.twin(edge));
            if !geometry::approx_eq(origin, destination) {
                result.push(LineSegment::new(origin, destination));
            }
            // The twin lives in the next slot; step over the pair.
            edge += 2;
        }
        result
    }

    /// The bounding box of the Voronoi vertices, ignoring the far points of
    /// unbounded cells.
    pub fn extent(&self) -> Aabb {
        Aabb::from_points(
            (1..=self.dcel.vertex_count() as VertexId)
                .filter(|&vertex| !self.triangulation.is_imaginary(vertex))
                .map(|vertex| self.dcel.point(vertex)),
        )
    }

    /// Create one Voronoi vertex per Delaunay face.
    fn place_vertices(&mut self) {
        let mut last_imaginary_face = 0;

        for face in 1..self.triangulation.face_count() as FaceId {
            if !self.triangulation.is_imaginary(face) {
                let points = self.triangulation.face_points(face);
                debug_assert_eq!(points.len(), 3);
                let circle = Circle::through(points[0], points[1], points[2]);
                self.dcel.push_vertex(Vertex::new(circle.center));
            } else {
                last_imaginary_face = face;
                // Provisional placeholder, resolved below. The bottom face
                // keeps it, but its vertex is never referenced by any cell.
                self.dcel.push_vertex(Vertex::new(DVec2::splat(FAR_SCALE)));
            }
        }

        for face in 1..=last_imaginary_face {
            if self.triangulation.is_imaginary(face) && !self.triangulation.is_bottom(face) {
                // Walk the face until an edge shared with a real face turns
                // up; that edge is a hull edge with two real endpoints.
                let mut edge = self.triangulation.face(face).edge;
                let mut neighbour = self.triangulation.edge_face(self.triangulation.twin(edge));
                while self.triangulation.is_imaginary(neighbour) {
                    edge = self.triangulation.next(edge);
                    neighbour = self.triangulation.edge_face(self.triangulation.twin(edge));
                }

                let center = self.dcel.point(neighbour);
                let far = self.far_vertex(edge, center);
                self.dcel.vertex_mut(face).set_point(far);
            }
        }
    }

    /// Place the vertex of an unbounded cell far along the perpendicular
    /// bisector of the hull edge, on the outward side of the real face whose
    /// circumcenter is `center`.
    fn far_vertex(&self, edge: EdgeId, center: DVec2) -> DVec2 {
        let origin = self.triangulation.origin_point(edge);
        let destination = self
            .triangulation
            .origin_point(self.triangulation.twin(edge));
        let middle = (origin + destination) / 2.;

        match geometry::orient(origin, destination, center) {
            Orientation::Collinear => {
                // The circumcenter sits on the hull edge itself; head straight
                // out along the rotated edge direction.
                let rotated = geometry::rotate_90(destination, middle);
                center + FAR_SCALE * (rotated - middle)
            }
            direction => {
                // Aim from the interior-side point through the exterior-side
                // one, then far beyond it.
                let (p1, p2) = if direction == Orientation::Negative {
                    (center, middle)
                } else {
                    (middle, center)
                };
                p2 + FAR_SCALE * (p2 - p1)
            }
        }
    }

    /// Assemble the Voronoi cell of one site by walking the Delaunay edges
    /// around it.
    fn add_cell(&mut self, site: VertexId) {
        let del = self.triangulation;
        let new_face = self.dcel.next_face_id();

        // Rotate to a first outgoing edge bounding a real face.
        let mut current = del.vertex(site).incident_edge();
        while del.is_imaginary(del.edge_face(current)) || del.is_external(current) {
            current = del.twin(del.previous(current));
        }
        let first_delaunay_edge = current;

        let mut previous_edge: Option<EdgeId> = None;
        let mut first_edge: Option<EdgeId> = None;

        loop {
            // Delaunay edges to a symbolic point have no dual.
            if !del.has_symbolic_vertex(current) {
                let origin = del.edge_face(del.twin(current));
                let destination = del.edge_face(current);
                let neighbour_site = del.destination(current);

                if neighbour_site < site {
                    // The neighbour's cell is finished and already holds the
                    // reverse edge: find it on that cell's ring and splice
                    // its twin into this cell.
                    let mut existing = self.dcel.face(neighbour_site).edge;
                    while self.dcel.origin(existing) != destination {
                        existing = self.dcel.next(existing);
                    }
                    let existing = self.dcel.twin(existing);

                    let provisional_next = self.dcel.next_edge_id();
                    let edge = self.dcel.half_edge_mut(existing);
                    edge.previous = previous_edge.unwrap_or(-1);
                    edge.next = provisional_next;
                    edge.face = new_face;

                    if let Some(previous) = previous_edge {
                        self.dcel.half_edge_mut(previous).next = existing;
                    }
                    previous_edge = Some(existing);
                    first_edge.get_or_insert(existing);
                } else {
                    // First visit of this dual edge: append a fresh pair.
                    // The twin's cycle fields stay unset until the neighbour
                    // site builds its cell.
                    let id = self.dcel.next_edge_id();
                    first_edge.get_or_insert(id);

                    self.dcel.push_half_edge(HalfEdge::new(
                        origin,
                        id + 1,
                        previous_edge.unwrap_or(-1),
                        id + 2,
                        new_face,
                    ));
                    self.dcel.push_half_edge(HalfEdge::new(destination, id, -1, -1, -1));

                    self.dcel.vertex_mut(origin).set_incident_edge(id);
                    self.dcel.vertex_mut(destination).set_incident_edge(id + 1);
                    previous_edge = Some(id);
                }
            }

            current = del.twin(del.previous(current));
            if current == first_delaunay_edge {
                break;
            }
        }

        // Close the ring and register the cell.
        let first = first_edge.expect("voronoi cell without dual edges");
        let last = previous_edge.expect("voronoi cell without dual edges");
        self.dcel.half_edge_mut(first).previous = last;
        self.dcel.half_edge_mut(last).next = first;
        self.dcel.push_face(Face::new(first));
    }
}
