//! A doubly-connected edge list over integer identifiers.
//!
//! Every cross-reference is a 1-based id indexing into one of three
//! append-only arrays (vertices, half-edges, faces), so the structure carries
//! no reference cycles. Two reserved negative vertex ids stand for the
//! symbolic points at infinity spanning the initial triangle; they never get
//! coordinates. Instead, the orientation predicate dispatches on the id (see
//! [`Dcel::orient_sym`]).

use glam::DVec2;

use crate::geometry::{self, Orientation};

/// Id of a vertex. Real input points get positive 1-based ids; the two
/// negative values [`POINT_MINUS_2`] and [`POINT_MINUS_1`] are the symbolic
/// points at infinity.
pub type VertexId = i32;

/// 1-based id of a half-edge.
pub type EdgeId = i32;

/// Id of a face. Face [`EXTERNAL_FACE`] is the unbounded external face.
pub type FaceId = i32;

/// The symbolic point at infinity with: for real points `a < b` (lexicographic
/// order), the triangle (`P₋₂`, a, b) has positive orientation.
pub const POINT_MINUS_2: VertexId = -2;

/// The symbolic point at infinity with: for real points `a < b`, the triangle
/// (`P₋₁`, a, b) has negative orientation.
pub const POINT_MINUS_1: VertexId = -1;

/// Id of the designated external face.
pub const EXTERNAL_FACE: FaceId = 0;

/// A vertex: a point and one incident outgoing half-edge.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    point: DVec2,
    incident_edge: EdgeId,
}

impl Vertex {
    pub fn new(point: DVec2) -> Self {
        Self {
            point,
            incident_edge: -1,
        }
    }

    pub fn point(&self) -> DVec2 {
        self.point
    }

    /// Get the id of an outgoing half-edge of this vertex.
    pub fn incident_edge(&self) -> EdgeId {
        self.incident_edge
    }

    pub fn set_incident_edge(&mut self, edge: EdgeId) {
        self.incident_edge = edge;
    }

    pub(crate) fn set_point(&mut self, point: DVec2) {
        self.point = point;
    }
}

/// A half-edge: five ids wiring it to its origin vertex, twin, cycle
/// neighbours and incident face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub twin: EdgeId,
    pub previous: EdgeId,
    pub next: EdgeId,
    pub face: FaceId,
}

impl HalfEdge {
    pub fn new(origin: VertexId, twin: EdgeId, previous: EdgeId, next: EdgeId, face: FaceId) -> Self {
        Self {
            origin,
            twin,
            previous,
            next,
            face,
        }
    }
}

/// A face, anchored at one of its bounding half-edges.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub edge: EdgeId,
}

impl Face {
    pub fn new(edge: EdgeId) -> Self {
        Self { edge }
    }
}

/// The edge list itself. See the module docs for the id conventions.
#[derive(Default, Clone, Debug)]
pub struct Dcel {
    vertices: Vec<Vertex>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

fn index(id: i32) -> usize {
    debug_assert!(id > 0, "id {} does not reference an arena slot", id);
    (id - 1) as usize
}

impl Dcel {
    /// Create a DCEL holding the given points as vertices and no topology
    /// yet. Vertex ids are assigned in input order, starting from 1.
    pub fn from_points(points: &[DVec2]) -> Self {
        Self {
            vertices: points.iter().map(|&p| Vertex::new(p)).collect(),
            edges: vec![],
            faces: vec![],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[index(id)]
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[index(id)]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The coordinates of a real vertex.
    pub fn point(&self, id: VertexId) -> DVec2 {
        self.vertex(id).point()
    }

    pub fn half_edge(&self, id: EdgeId) -> HalfEdge {
        self.edges[index(id)]
    }

    pub fn half_edge_mut(&mut self, id: EdgeId) -> &mut HalfEdge {
        &mut self.edges[index(id)]
    }

    pub fn face(&self, id: FaceId) -> Face {
        self.faces[id as usize]
    }

    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id as usize]
    }

    /// The id the next pushed vertex will get.
    pub fn next_vertex_id(&self) -> VertexId {
        self.vertices.len() as VertexId + 1
    }

    /// The id the next pushed half-edge will get.
    pub fn next_edge_id(&self) -> EdgeId {
        self.edges.len() as EdgeId + 1
    }

    /// The id the next pushed face will get.
    pub fn next_face_id(&self) -> FaceId {
        self.faces.len() as FaceId
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.push(vertex);
        self.vertices.len() as VertexId
    }

    pub fn push_half_edge(&mut self, edge: HalfEdge) -> EdgeId {
        self.edges.push(edge);
        self.edges.len() as EdgeId
    }

    pub fn push_face(&mut self, face: Face) -> FaceId {
        self.faces.push(face);
        self.faces.len() as FaceId - 1
    }

    // Navigation shorthands, all by id.

    pub fn twin(&self, e: EdgeId) -> EdgeId {
        self.half_edge(e).twin
    }

    pub fn next(&self, e: EdgeId) -> EdgeId {
        self.half_edge(e).next
    }

    pub fn previous(&self, e: EdgeId) -> EdgeId {
        self.half_edge(e).previous
    }

    pub fn origin(&self, e: EdgeId) -> VertexId {
        self.half_edge(e).origin
    }

    pub fn destination(&self, e: EdgeId) -> VertexId {
        self.origin(self.twin(e))
    }

    pub fn edge_face(&self, e: EdgeId) -> FaceId {
        self.half_edge(e).face
    }

    /// The coordinates of the (real) origin of `e`.
    pub fn origin_point(&self, e: EdgeId) -> DVec2 {
        self.point(self.origin(e))
    }

    /// Whether `e` borders the external face on either side.
    pub fn is_external(&self, e: EdgeId) -> bool {
        self.edge_face(e) == EXTERNAL_FACE || self.edge_face(self.twin(e)) == EXTERNAL_FACE
    }

    /// Whether either endpoint of `e` is a symbolic point at infinity.
    pub fn has_symbolic_vertex(&self, e: EdgeId) -> bool {
        self.origin(e) < 0 || self.destination(e) < 0
    }

    /// Whether the face is the external one or touches a symbolic point.
    pub fn is_imaginary(&self, f: FaceId) -> bool {
        f == EXTERNAL_FACE || self.face_vertex_ids(f).iter().any(|&id| id < 0)
    }

    /// Whether the face contains both symbolic points (the bottom face of the
    /// initial triangle).
    pub fn is_bottom(&self, f: FaceId) -> bool {
        self.face_vertex_ids(f).iter().filter(|&&id| id < 0).count() == 2
    }

    /// The vertex ids around face `f`, in `next` order starting from its
    /// anchor edge.
    pub fn face_vertex_ids(&self, f: FaceId) -> Vec<VertexId> {
        let first = self.face(f).edge;
        let mut ids = vec![];
        let mut e = first;
        loop {
            ids.push(self.origin(e));
            e = self.next(e);
            if e == first {
                break;
            }
        }
        ids
    }

    /// The coordinates of the real vertices around face `f`.
    pub fn face_points(&self, f: FaceId) -> Vec<DVec2> {
        self.face_vertex_ids(f)
            .into_iter()
            .filter(|&id| id > 0)
            .map(|id| self.point(id))
            .collect()
    }

    /// Some real vertex point of face `f`, or `None` if the face has only
    /// symbolic vertices.
    pub fn face_point(&self, f: FaceId) -> Option<DVec2> {
        self.face_vertex_ids(f)
            .into_iter()
            .find(|&id| id > 0)
            .map(|id| self.point(id))
    }

    /// The index of the lexicographically highest vertex (y major, x minor).
    pub fn highest_vertex_index(&self) -> usize {
        self.vertices
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| geometry::lex_cmp(a.point(), b.point()))
            .map(|(i, _)| i)
            .expect("empty vertex set")
    }

    /// Swap the highest vertex to the front so it becomes vertex 1, the real
    /// corner of the initial triangle. Only valid before topology exists.
    pub fn swap_highest_first(&mut self) {
        debug_assert!(self.edges.is_empty() && self.faces.is_empty());
        let highest = self.highest_vertex_index();
        self.vertices.swap(0, highest);
    }

    /// Orientation of point `p` relative to the directed edge from vertex
    /// `source` to vertex `destination`, either of which may be symbolic.
    ///
    /// For two real ids this is the plain coordinate orientation. The
    /// symbolic cases axiomatize the points at infinity: the comparisons use
    /// the lexicographic point order, under which the initial triangle
    /// (1, `P₋₂`, `P₋₁`) contains every input point.
    pub fn orient_sym(&self, p: DVec2, source: VertexId, destination: VertexId) -> Orientation {
        use Orientation::*;

        if source > 0 && destination > 0 {
            return geometry::orient(self.point(source), self.point(destination), p);
        }

        if source > 0 {
            let above = geometry::lex_gt(p, self.point(source));
            return match (destination, above) {
                (POINT_MINUS_2, true) => Negative,
                (POINT_MINUS_2, false) => Positive,
                (_, true) => Positive,
                (_, false) => Negative,
            };
        }

        if source == POINT_MINUS_2 {
            if destination == POINT_MINUS_1 {
                return Positive;
            }
            return if geometry::lex_gt(p, self.point(destination)) {
                Positive
            } else {
                Negative
            };
        }

        // Source is P₋₁.
        if destination == POINT_MINUS_2 {
            return Negative;
        }
        if geometry::lex_gt(p, self.point(destination)) {
            Negative
        } else {
            Positive
        }
    }

    /// The id of a boundary half-edge of face `f` that `p` lies on
    /// (collinear under [`Dcel::orient_sym`]), or `None`.
    pub fn collinear_edge(&self, p: DVec2, f: FaceId) -> Option<EdgeId> {
        let face_edge = self.face(f).edge;
        let id1 = self.origin(self.previous(face_edge));
        let id2 = self.origin(face_edge);
        let id3 = self.origin(self.next(face_edge));

        if self.orient_sym(p, id1, id2) == Orientation::Collinear {
            Some(self.previous(face_edge))
        } else if self.orient_sym(p, id2, id3) == Orientation::Collinear {
            Some(face_edge)
        } else if self.orient_sym(p, id3, id1) == Orientation::Collinear {
            Some(self.next(face_edge))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Orientation::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    /// The edge list after inserting a second point into the initial
    /// symbolic triangle: the six outer edges, then the fan around vertex 2.
    fn sample_dcel() -> Dcel {
        let mut d = Dcel::from_points(&[p(1., 2.), p(4., 5.), p(5., 6.)]);
        for e in [
            HalfEdge::new(1, 4, 7, 8, 1),
            HalfEdge::new(POINT_MINUS_2, 6, 9, 10, 2),
            HalfEdge::new(POINT_MINUS_1, 5, 11, 12, 3),
            HalfEdge::new(POINT_MINUS_2, 1, 6, 5, 0),
            HalfEdge::new(1, 3, 4, 6, 0),
            HalfEdge::new(POINT_MINUS_1, 2, 5, 4, 0),
            HalfEdge::new(2, 12, 8, 1, 1),
            HalfEdge::new(POINT_MINUS_2, 9, 1, 7, 1),
            HalfEdge::new(2, 8, 10, 2, 2),
            HalfEdge::new(POINT_MINUS_1, 11, 2, 9, 2),
            HalfEdge::new(2, 10, 12, 3, 3),
            HalfEdge::new(1, 7, 3, 11, 3),
        ] {
            d.push_half_edge(e);
        }
        d
    }

    #[test]
    fn test_external_edges() {
        let d = sample_dcel();
        for e in 1..=6 {
            assert!(d.is_external(e));
        }
        for e in 7..=12 {
            assert!(!d.is_external(e));
        }
    }

    #[test]
    fn test_symbolic_vertices() {
        let d = sample_dcel();
        assert!(!d.has_symbolic_vertex(7));
        assert!(!d.has_symbolic_vertex(12));
        for e in (1..=12).filter(|&e| e != 7 && e != 12) {
            assert!(d.has_symbolic_vertex(e));
        }
    }

    #[test]
    fn test_highest_vertex() {
        let highest = |points: &[DVec2]| Dcel::from_points(points).highest_vertex_index();
        assert_eq!(highest(&[p(1., 2.), p(4., 5.), p(5., 6.)]), 2);
        assert_eq!(highest(&[p(1., 2.), p(5., 6.), p(4., 5.)]), 1);
        assert_eq!(highest(&[p(5., 6.), p(1., 2.), p(4., 5.)]), 0);
        // Same height: the larger x coordinate wins.
        assert_eq!(highest(&[p(5., 6.), p(6., 6.), p(4., 5.)]), 1);
        assert_eq!(highest(&[p(5., 6.), p(6., 6.), p(10., 6.)]), 2);
        assert_eq!(highest(&[p(-5., 6.), p(1., 2.), p(4., 5.)]), 0);

        let mut d = Dcel::from_points(&[p(5., 6.), p(60., 5.), p(70., 3.)]);
        assert_eq!(d.highest_vertex_index(), 0);
        d.push_vertex(Vertex::new(p(7., 4.)));
        assert_eq!(d.highest_vertex_index(), 0);
        d.push_vertex(Vertex::new(p(7., 9.)));
        assert_eq!(d.highest_vertex_index(), d.vertex_count() - 1);
    }

    #[test]
    fn test_orient_sym_real() {
        let d = Dcel::from_points(&[
            p(0., 0.),
            p(2., 0.),
            p(0., 2.),
            p(2., 2.),
            p(3., 0.),
            p(0., 3.),
            p(3., 3.),
        ]);

        assert_eq!(d.orient_sym(p(0., 0.), 2, 3), Positive);
        assert_eq!(d.orient_sym(p(0., 0.), 3, 2), Negative);
        assert_eq!(d.orient_sym(p(2., 0.), 3, 1), Positive);
        assert_eq!(d.orient_sym(p(2., 0.), 1, 3), Negative);

        assert_eq!(d.orient_sym(p(0., 0.), 2, 5), Collinear);
        assert_eq!(d.orient_sym(p(0., 0.), 3, 6), Collinear);
        assert_eq!(d.orient_sym(p(0., 0.), 4, 7), Collinear);
        assert_eq!(d.orient_sym(p(0., 0.), 1, 1), Collinear);
    }

    #[test]
    fn test_orient_sym_symbolic() {
        let d = Dcel::from_points(&[p(0., 10.), p(4., 8.), p(5., 7.)]);

        // Real source, P₋₂ destination: above the source means negative.
        assert_eq!(d.orient_sym(p(5., 9.), 2, POINT_MINUS_2), Negative);
        assert_eq!(d.orient_sym(p(5., 7.), 2, POINT_MINUS_2), Positive);
        assert_eq!(d.orient_sym(p(5., 8.), 2, POINT_MINUS_2), Negative);
        assert_eq!(d.orient_sym(p(3., 8.), 2, POINT_MINUS_2), Positive);

        // Real source, P₋₁ destination: above the source means positive.
        assert_eq!(d.orient_sym(p(5., 9.), 2, POINT_MINUS_1), Positive);
        assert_eq!(d.orient_sym(p(5., 7.), 2, POINT_MINUS_1), Negative);
        assert_eq!(d.orient_sym(p(5., 8.), 2, POINT_MINUS_1), Positive);
        assert_eq!(d.orient_sym(p(3., 8.), 2, POINT_MINUS_1), Negative);

        // Between the two symbolic points the orientation is fixed.
        assert_eq!(d.orient_sym(p(3., 8.), POINT_MINUS_2, POINT_MINUS_1), Positive);
        assert_eq!(d.orient_sym(p(3., 8.), POINT_MINUS_1, POINT_MINUS_2), Negative);

        // P₋₂ source, real destination.
        assert_eq!(d.orient_sym(p(5., 9.), POINT_MINUS_2, 2), Positive);
        assert_eq!(d.orient_sym(p(5., 7.), POINT_MINUS_2, 2), Negative);
        assert_eq!(d.orient_sym(p(5., 8.), POINT_MINUS_2, 2), Positive);
        assert_eq!(d.orient_sym(p(3., 8.), POINT_MINUS_2, 2), Negative);

        // P₋₁ source, real destination.
        assert_eq!(d.orient_sym(p(5., 9.), POINT_MINUS_1, 2), Negative);
        assert_eq!(d.orient_sym(p(5., 7.), POINT_MINUS_1, 2), Positive);
        assert_eq!(d.orient_sym(p(5., 8.), POINT_MINUS_1, 2), Negative);
        assert_eq!(d.orient_sym(p(3., 8.), POINT_MINUS_1, 2), Positive);
    }
}
