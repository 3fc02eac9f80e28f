//! Incremental Delaunay triangulation.
//!
//! The construction starts from a triangle spanned by the highest input
//! point and the two symbolic points at infinity, which contains every input
//! point. Points are then inserted one by one: locate the containing
//! triangle through the search DAG, split it (or the two triangles flanking
//! the containing edge), and restore the Delaunay property by recursive edge
//! flips. The symbolic points never receive coordinates; all predicates
//! against them go through [`Dcel::orient_sym`].

use glam::DVec2;
use thiserror::Error;

use crate::dcel::{
    Dcel, EdgeId, Face, FaceId, HalfEdge, VertexId, EXTERNAL_FACE, POINT_MINUS_1, POINT_MINUS_2,
};
use crate::geometry::{self, Aabb, LineSegment, Orientation};

mod search_dag;

use search_dag::{Node, SearchDag};

/// Errors reported by the triangulation build.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// A triangulation needs at least three points.
    #[error("a triangulation needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    /// A topological invariant did not hold. This never fires on valid input
    /// and indicates a bug in the construction.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(&'static str),
}

/// Where a point lies relative to a triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    Interior,
    Boundary,
    Outside,
}

/// A finished Delaunay triangulation over a set of input points.
#[derive(Debug)]
pub struct Delaunay {
    dcel: Dcel,
    dag: SearchDag,
}

impl Delaunay {
    /// Triangulate the given points.
    ///
    /// Points are inserted in input order (after moving the lexicographically
    /// highest point to the front). Exact duplicate points produce undefined
    /// geometry and are the caller's responsibility, as is an input in which
    /// all points are collinear.
    pub fn build(points: &[DVec2]) -> Result<Self, TriangulationError> {
        if points.len() < 3 {
            return Err(TriangulationError::TooFewPoints(points.len()));
        }

        let mut dcel = Dcel::from_points(points);
        dcel.swap_highest_first();
        dcel.vertex_mut(1).set_incident_edge(1);

        // The six half-edges of the triangle (1, P₋₂, P₋₁) and its external
        // twins, wired by hand.
        dcel.push_half_edge(HalfEdge::new(1, 4, 3, 2, 1));
        dcel.push_half_edge(HalfEdge::new(POINT_MINUS_2, 6, 1, 3, 1));
        dcel.push_half_edge(HalfEdge::new(POINT_MINUS_1, 5, 2, 1, 1));
        dcel.push_half_edge(HalfEdge::new(POINT_MINUS_2, 1, 6, 5, EXTERNAL_FACE));
        dcel.push_half_edge(HalfEdge::new(1, 3, 4, 6, EXTERNAL_FACE));
        dcel.push_half_edge(HalfEdge::new(POINT_MINUS_1, 2, 5, 4, EXTERNAL_FACE));
        dcel.push_face(Face::new(4));
        dcel.push_face(Face::new(1));

        let mut dag = SearchDag::default();
        dag.add(Node::new([1, POINT_MINUS_2, POINT_MINUS_1], 1));

        let mut delaunay = Self { dcel, dag };
        // Vertex 1 is already part of the initial triangle.
        for index in 1..delaunay.dcel.vertex_count() {
            delaunay.insert(index as VertexId + 1)?;
        }
        Ok(delaunay)
    }

    /// The underlying DCEL of the finished triangulation.
    pub fn dcel(&self) -> &Dcel {
        &self.dcel
    }

    /// The triangulation edges, omitting faces incident to a symbolic point.
    ///
    /// Edges are collected per internal face, so every interior edge appears
    /// once for each of the two triangles sharing it.
    pub fn edges(&self) -> Vec<LineSegment> {
        let mut result = vec![];
        for face in 1..self.dcel.face_count() as FaceId {
            let first = self.dcel.face(face).edge;
            let mut segments = vec![];
            let mut valid = true;
            let mut edge = first;
            loop {
                if self.dcel.origin(edge) <= 0 || self.dcel.destination(edge) <= 0 {
                    valid = false;
                    break;
                }
                segments.push(LineSegment::new(
                    self.dcel.origin_point(edge),
                    self.dcel.origin_point(self.dcel.twin(edge)),
                ));
                edge = self.dcel.next(edge);
                if edge == first {
                    break;
                }
            }
            if valid {
                result.extend(segments);
            }
        }
        result
    }

    /// The bounding box of the input points.
    pub fn extent(&self) -> Aabb {
        Aabb::from_points(self.dcel.vertices().iter().map(|v| v.point()))
    }

    /// Classify `point` against the triangle stored in a DAG node.
    fn position(&self, point: DVec2, node_index: usize) -> Position {
        use Orientation::Negative;
        use Orientation::Positive;

        let [v1, v2, v3] = self.dag.node(node_index).vertices();
        let turn1 = self.dcel.orient_sym(point, v1, v2);
        let turn2 = self.dcel.orient_sym(point, v2, v3);
        let turn3 = self.dcel.orient_sym(point, v3, v1);

        if turn1 == Positive && turn2 == Positive && turn3 == Positive {
            Position::Interior
        } else if turn1 != Negative && turn2 != Negative && turn3 != Negative {
            Position::Boundary
        } else {
            Position::Outside
        }
    }

    /// Walk the DAG from the root to a leaf whose triangle contains `point`.
    fn locate(&self, point: DVec2) -> Result<usize, TriangulationError> {
        let mut current = 0;
        while !self.dag.node(current).is_leaf() {
            current = self
                .dag
                .node(current)
                .children()
                .iter()
                .copied()
                .find(|&child| self.position(point, child) != Position::Outside)
                .ok_or(TriangulationError::InternalInvariantViolation(
                    "point location found no containing child triangle",
                ))?;
        }
        Ok(current)
    }

    /// Insert the vertex with the given id into the triangulation.
    fn insert(&mut self, vertex: VertexId) -> Result<(), TriangulationError> {
        let point = self.dcel.point(vertex);
        let node_index = self.locate(point)?;

        match self.position(point, node_index) {
            Position::Interior => {
                self.split_interior(vertex, node_index);
                Ok(())
            }
            Position::Boundary => self.split_boundary(vertex, node_index),
            Position::Outside => Err(TriangulationError::InternalInvariantViolation(
                "located triangle does not contain the new point",
            )),
        }
    }

    /// Split the triangle of `node_index` into three by fanning edges from
    /// the strictly interior new vertex.
    fn split_interior(&mut self, vertex: VertexId, node_index: usize) {
        let face = self.dag.node(node_index).face();

        let ab = self.dcel.face(face).edge;
        let bc = self.dcel.next(ab);
        let ca = self.dcel.previous(ab);
        let a = self.dcel.origin(ab);
        let b = self.dcel.origin(bc);
        let c = self.dcel.origin(ca);

        // Triangle ABC with the new vertex D inside becomes BDA (reusing the
        // old face), CDB and ADC.
        let e = self.dcel.next_edge_id();
        let new_face = self.dcel.next_face_id();
        let (da, bd, db, cd, dc, ad) = (e, e + 1, e + 2, e + 3, e + 4, e + 5);

        self.dcel.push_half_edge(HalfEdge::new(vertex, ad, bd, ab, face));
        self.dcel.push_half_edge(HalfEdge::new(b, db, ab, da, face));
        self.dcel.push_half_edge(HalfEdge::new(vertex, bd, cd, bc, new_face));
        self.dcel.push_half_edge(HalfEdge::new(c, dc, bc, db, new_face));
        self.dcel.push_half_edge(HalfEdge::new(vertex, cd, ad, ca, new_face + 1));
        self.dcel.push_half_edge(HalfEdge::new(a, da, ca, dc, new_face + 1));

        self.dcel.vertex_mut(vertex).set_incident_edge(da);

        let edge = self.dcel.half_edge_mut(ab);
        edge.previous = da;
        edge.next = bd;

        let edge = self.dcel.half_edge_mut(bc);
        edge.previous = db;
        edge.next = cd;
        edge.face = new_face;

        let edge = self.dcel.half_edge_mut(ca);
        edge.previous = dc;
        edge.next = ad;
        edge.face = new_face + 1;

        self.dcel.push_face(Face::new(db));
        self.dcel.push_face(Face::new(dc));

        let n = self.dag.len();
        self.dag.node_mut(node_index).set_children(vec![n, n + 1, n + 2]);
        self.dag.add(Node::new([b, vertex, a], face));
        self.dag.add(Node::new([c, vertex, b], new_face));
        self.dag.add(Node::new([a, vertex, c], new_face + 1));

        // The edges fanning out of the new vertex cannot be illegal yet;
        // only the boundary of the old triangle needs checking.
        self.try_flip(ab);
        self.try_flip(ca);
        self.try_flip(bc);
    }

    /// Split the two triangles flanking the boundary edge the new vertex
    /// lies on into four.
    fn split_boundary(
        &mut self,
        vertex: VertexId,
        node_index: usize,
    ) -> Result<(), TriangulationError> {
        let point = self.dcel.point(vertex);
        let face = self.dag.node(node_index).face();

        // The new vertex E lies on the edge BD shared by triangles ABD and
        // BCD; the four triangles afterwards are ABE, EDA, CDE and EBC.
        let bd = self.dcel.collinear_edge(point, face).ok_or(
            TriangulationError::InternalInvariantViolation(
                "boundary point lies on no edge of its triangle",
            ),
        )?;
        let db = self.dcel.twin(bd);

        let first_old_face = self.dcel.edge_face(bd);
        let second_old_face = self.dcel.edge_face(db);
        let old_node1 = self.dag.node_for_face(first_old_face);
        let old_node2 = self.dag.node_for_face(second_old_face);

        let ab = self.dcel.previous(bd);
        let da = self.dcel.next(bd);
        let cd = self.dcel.previous(db);
        let bc = self.dcel.next(db);
        let a = self.dcel.origin(ab);
        let b = self.dcel.origin(bd);
        let c = self.dcel.origin(cd);
        let d = self.dcel.origin(db);

        let e = self.dcel.next_edge_id();
        let new_face = self.dcel.next_face_id();
        let (ed, ae, ea, eb, ce, ec) = (e, e + 1, e + 2, e + 3, e + 4, e + 5);

        // First side: ABD becomes ABE (new face) and EDA (old face).
        self.dcel.push_half_edge(HalfEdge::new(vertex, db, ae, da, first_old_face));
        self.dcel.push_half_edge(HalfEdge::new(a, ea, da, ed, first_old_face));
        self.dcel.push_half_edge(HalfEdge::new(vertex, ae, bd, ab, new_face));

        self.dcel.vertex_mut(vertex).set_incident_edge(ea);

        // BD keeps its slot and becomes BE.
        let edge = self.dcel.half_edge_mut(bd);
        edge.next = ea;
        edge.twin = eb;
        edge.face = new_face;

        let edge = self.dcel.half_edge_mut(da);
        edge.previous = ed;
        edge.next = ae;

        let edge = self.dcel.half_edge_mut(ab);
        edge.previous = ea;
        edge.face = new_face;

        self.dcel.face_mut(first_old_face).edge = ae;
        self.dcel.push_face(Face::new(ea));

        let n = self.dag.len();
        self.dag.node_mut(old_node1).set_children(vec![n, n + 1]);
        self.dag.add(Node::new([a, b, vertex], new_face));
        self.dag.add(Node::new([vertex, d, a], first_old_face));

        // Second side: BCD becomes CDE (old face) and EBC (new face).
        self.dcel.push_half_edge(HalfEdge::new(vertex, bd, ce, bc, new_face + 1));
        self.dcel.push_half_edge(HalfEdge::new(c, ec, bc, eb, new_face + 1));
        self.dcel.push_half_edge(HalfEdge::new(vertex, ce, db, cd, second_old_face));

        // DB keeps its slot and becomes DE.
        let edge = self.dcel.half_edge_mut(db);
        edge.next = ec;
        edge.twin = ed;

        let edge = self.dcel.half_edge_mut(bc);
        edge.previous = eb;
        edge.next = ce;
        edge.face = new_face + 1;

        let edge = self.dcel.half_edge_mut(cd);
        edge.previous = ec;

        self.dcel.face_mut(second_old_face).edge = ec;
        self.dcel.push_face(Face::new(ce));

        self.dag.node_mut(old_node2).set_children(vec![n + 2, n + 3]);
        self.dag.add(Node::new([c, d, vertex], second_old_face));
        self.dag.add(Node::new([vertex, b, c], new_face + 1));

        self.try_flip(ab);
        self.try_flip(da);
        self.try_flip(cd);
        self.try_flip(bc);
        Ok(())
    }

    /// Flip `edge` if it violates the local Delaunay criterion, then recheck
    /// the edges that may have become illegal.
    fn try_flip(&mut self, edge: EdgeId) {
        if self.dcel.is_external(edge) {
            return;
        }

        let a = self.dcel.origin(edge);
        let c = self.dcel.destination(edge);
        let d = self.dcel.origin(self.dcel.previous(edge));
        let b = self.dcel.origin(self.dcel.previous(self.dcel.twin(edge)));

        if d < 0 || b < 0 {
            // The edge already separates two imaginary faces.
            return;
        }

        let flip = if a < 0 || c < 0 {
            // One endpoint at infinity (both would make the edge external):
            // flip exactly when the edge would pull the hull boundary inside
            // the quadrilateral spanned by the two real opposite points.
            let mut d_point = self.dcel.point(d);
            let mut b_point = self.dcel.point(b);
            if d_point.y < b_point.y {
                std::mem::swap(&mut d_point, &mut b_point);
            }
            let (symbolic, q) = if a < 0 {
                (a, self.dcel.point(c))
            } else {
                (c, self.dcel.point(a))
            };

            let turn = geometry::orient(d_point, b_point, q);
            if symbolic == POINT_MINUS_2 {
                turn == Orientation::Positive
            } else {
                turn == Orientation::Negative
            }
        } else {
            // All four points are real: the strict empty-circle criterion.
            geometry::in_circle(
                self.dcel.point(a),
                self.dcel.point(c),
                self.dcel.point(d),
                self.dcel.point(b),
            )
        };

        if flip {
            self.flip(edge);
        }
    }

    /// Rotate the diagonal AC of the quadrilateral ABCD to BD.
    fn flip(&mut self, edge: EdgeId) {
        let ac = edge;
        let ca = self.dcel.twin(ac);
        let cd = self.dcel.next(ac);
        let da = self.dcel.previous(ac);
        let ab = self.dcel.next(ca);
        let bc = self.dcel.previous(ca);

        let a = self.dcel.origin(ac);
        let c = self.dcel.origin(ca);
        let d = self.dcel.origin(da);
        let b = self.dcel.origin(bc);

        let face1 = self.dcel.edge_face(ac);
        let face2 = self.dcel.edge_face(ca);
        let old_node1 = self.dag.node_for_face(face1);
        let old_node2 = self.dag.node_for_face(face2);

        // The demoted endpoints may have pointed at the flipped edge.
        if a > 0 {
            self.dcel.vertex_mut(a).set_incident_edge(ab);
        }
        if c > 0 {
            self.dcel.vertex_mut(c).set_incident_edge(cd);
        }

        // AC becomes BD bounding triangle ABD (face 1); CA becomes DB
        // bounding triangle CDB (face 2). AB and CD switch faces.
        let bd = ac;
        let db = ca;
        *self.dcel.half_edge_mut(bd) = HalfEdge::new(b, db, ab, da, face1);
        *self.dcel.half_edge_mut(db) = HalfEdge::new(d, bd, cd, bc, face2);

        let edge = self.dcel.half_edge_mut(da);
        edge.previous = bd;
        edge.next = ab;

        let edge = self.dcel.half_edge_mut(ab);
        edge.previous = da;
        edge.next = bd;
        edge.face = face1;

        let edge = self.dcel.half_edge_mut(bc);
        edge.previous = db;
        edge.next = cd;

        let edge = self.dcel.half_edge_mut(cd);
        edge.previous = bc;
        edge.next = db;
        edge.face = face2;

        self.dcel.face_mut(face1).edge = bd;
        self.dcel.face_mut(face2).edge = db;

        let n = self.dag.len();
        self.dag.node_mut(old_node1).set_children(vec![n, n + 1]);
        self.dag.node_mut(old_node2).set_children(vec![n, n + 1]);
        self.dag.add(Node::new([a, b, d], face1));
        self.dag.add(Node::new([c, d, b], face2));

        // Only the two edges opposite the rotated diagonal can have become
        // illegal.
        self.try_flip(ab);
        self.try_flip(bc);
    }
}
