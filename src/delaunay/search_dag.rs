//! The point-location history structure of the incremental construction: a
//! rooted DAG of triangles in which every non-leaf triangle is the union of
//! its children. Splits add 2 or 3 children to one node; a flip gives the
//! same two children to both affected nodes.

use crate::dcel::{FaceId, VertexId};

/// A triangle that exists or existed during the construction, together with
/// the face id it occupied and the nodes it was subdivided into.
#[derive(Debug)]
pub(crate) struct Node {
    vertices: [VertexId; 3],
    face: FaceId,
    children: Vec<usize>,
}

impl Node {
    pub fn new(vertices: [VertexId; 3], face: FaceId) -> Self {
        Self {
            vertices,
            face,
            children: vec![],
        }
    }

    /// The vertex id triple, ordered so consecutive pairs are directed edges
    /// of the face cycle.
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    pub fn face(&self) -> FaceId {
        self.face
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// A leaf references a live face of the triangulation.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn set_children(&mut self, children: Vec<usize>) {
        self.children = children;
    }
}

/// The append-only DAG plus a face → latest-node map.
///
/// The map is updated when a node is *inserted*, never when a node gains
/// children. After a flip both old nodes become internal and the map already
/// points at the new leaves, so resolving a face always yields the live leaf.
#[derive(Default, Debug)]
pub(crate) struct SearchDag {
    nodes: Vec<Node>,
    face_to_node: Vec<usize>,
}

impl SearchDag {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Append a node and register it as the latest node of its face.
    pub fn add(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        if node.face() > 0 {
            let face = node.face() as usize;
            if self.face_to_node.len() <= face {
                self.face_to_node.resize(face + 1, usize::MAX);
            }
            self.face_to_node[face] = index;
        }
        self.nodes.push(node);
        index
    }

    /// The latest node occupying the given face.
    pub fn node_for_face(&self, face: FaceId) -> usize {
        let index = self.face_to_node[face as usize];
        debug_assert!(index != usize::MAX, "face {} never entered the DAG", face);
        index
    }
}
