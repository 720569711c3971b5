//! Element type metadata: shape, node count and interpolation order.
//!
//! `ElemType` is a closed set. Everything that varies per type is either a
//! `match` in this file or a constant table in [`crate::topology::registry`],
//! so algorithms written once over `(ElemType, node array)` work for the
//! whole family.

use crate::mesh_error::MeshError;

/// Reference shape of an element, independent of its node count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// 0D point.
    Point,
    /// 1D segment.
    Segment,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quadrilateral,
    /// 3D simplex.
    Tetrahedron,
    /// 3D tensor-product cell.
    Hexahedron,
    /// 3D wedge: triangle extruded along `zeta`.
    Prism,
    /// 3D pyramid with a quadrilateral base.
    Pyramid,
}

impl Shape {
    /// Topological dimension.
    pub const fn dim(self) -> usize {
        match self {
            Shape::Point => 0,
            Shape::Segment => 1,
            Shape::Triangle | Shape::Quadrilateral => 2,
            Shape::Tetrahedron | Shape::Hexahedron | Shape::Prism | Shape::Pyramid => 3,
        }
    }

    /// Number of corner nodes.
    pub const fn n_vertices(self) -> usize {
        match self {
            Shape::Point => 1,
            Shape::Segment => 2,
            Shape::Triangle => 3,
            Shape::Quadrilateral | Shape::Tetrahedron => 4,
            Shape::Pyramid => 5,
            Shape::Prism => 6,
            Shape::Hexahedron => 8,
        }
    }

    /// Number of codimension-1 facets.
    pub const fn n_sides(self) -> usize {
        match self {
            Shape::Point => 0,
            Shape::Segment => 2,
            Shape::Triangle => 3,
            Shape::Quadrilateral | Shape::Tetrahedron => 4,
            Shape::Prism | Shape::Pyramid => 5,
            Shape::Hexahedron => 6,
        }
    }

    /// Number of edges. Segments have none; for 2D shapes the edges are the sides.
    pub const fn n_edges(self) -> usize {
        match self {
            Shape::Point | Shape::Segment => 0,
            Shape::Triangle => 3,
            Shape::Quadrilateral => 4,
            Shape::Tetrahedron => 6,
            Shape::Pyramid => 8,
            Shape::Prism => 9,
            Shape::Hexahedron => 12,
        }
    }

    /// Children produced by one level of isotropic refinement, if the shape
    /// has a registered subdivision.
    pub const fn n_children(self) -> Option<usize> {
        match self {
            Shape::Segment => Some(2),
            Shape::Triangle | Shape::Quadrilateral => Some(4),
            Shape::Tetrahedron | Shape::Hexahedron | Shape::Prism => Some(8),
            Shape::Point | Shape::Pyramid => None,
        }
    }
}

/// Default polynomial order of the geometric map.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
pub enum Order {
    First,
    Second,
}

/// Topological role of a local node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeRole {
    /// Corner node.
    Vertex,
    /// Node in the interior of an edge (for 1D types: of the element).
    Edge,
    /// Node in the interior of a face (for 2D types: of the element).
    Face,
    /// Node in the interior of a 3D cell.
    Interior,
}

/// Counts of local nodes per role. Nodes are numbered vertices first, then
/// edge nodes, face nodes and interior nodes, in that order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeLayout {
    pub vertices: usize,
    pub edge_nodes: usize,
    pub face_nodes: usize,
    pub interior_nodes: usize,
}

impl NodeLayout {
    /// Role of local node `i`, or `None` past the end.
    pub fn role(&self, i: usize) -> Option<NodeRole> {
        let edge_end = self.vertices + self.edge_nodes;
        let face_end = edge_end + self.face_nodes;
        let end = face_end + self.interior_nodes;
        if i < self.vertices {
            Some(NodeRole::Vertex)
        } else if i < edge_end {
            Some(NodeRole::Edge)
        } else if i < face_end {
            Some(NodeRole::Face)
        } else if i < end {
            Some(NodeRole::Interior)
        } else {
            None
        }
    }

    pub const fn total(&self) -> usize {
        self.vertices + self.edge_nodes + self.face_nodes + self.interior_nodes
    }
}

/// Supported element types (shape + node count).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum ElemType {
    NodeElem,
    Edge2,
    Edge3,
    Tri3,
    Tri6,
    Quad4,
    Quad8,
    Quad9,
    Tet4,
    Tet10,
    Hex8,
    Hex20,
    Hex27,
    Prism6,
    Prism15,
    Prism18,
    Pyramid5,
    Pyramid13,
    Pyramid14,
}

impl ElemType {
    /// Every supported type, in declaration order (`ALL[t.index()] == t`).
    pub const ALL: [ElemType; 19] = [
        ElemType::NodeElem,
        ElemType::Edge2,
        ElemType::Edge3,
        ElemType::Tri3,
        ElemType::Tri6,
        ElemType::Quad4,
        ElemType::Quad8,
        ElemType::Quad9,
        ElemType::Tet4,
        ElemType::Tet10,
        ElemType::Hex8,
        ElemType::Hex20,
        ElemType::Hex27,
        ElemType::Prism6,
        ElemType::Prism15,
        ElemType::Prism18,
        ElemType::Pyramid5,
        ElemType::Pyramid13,
        ElemType::Pyramid14,
    ];

    /// Dense index used by the per-type lazy tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn shape(self) -> Shape {
        match self {
            ElemType::NodeElem => Shape::Point,
            ElemType::Edge2 | ElemType::Edge3 => Shape::Segment,
            ElemType::Tri3 | ElemType::Tri6 => Shape::Triangle,
            ElemType::Quad4 | ElemType::Quad8 | ElemType::Quad9 => Shape::Quadrilateral,
            ElemType::Tet4 | ElemType::Tet10 => Shape::Tetrahedron,
            ElemType::Hex8 | ElemType::Hex20 | ElemType::Hex27 => Shape::Hexahedron,
            ElemType::Prism6 | ElemType::Prism15 | ElemType::Prism18 => Shape::Prism,
            ElemType::Pyramid5 | ElemType::Pyramid13 | ElemType::Pyramid14 => Shape::Pyramid,
        }
    }

    /// Topological dimension.
    #[inline]
    pub const fn dim(self) -> usize {
        self.shape().dim()
    }

    pub const fn n_nodes(self) -> usize {
        self.layout().total()
    }

    #[inline]
    pub const fn n_vertices(self) -> usize {
        self.shape().n_vertices()
    }

    #[inline]
    pub const fn n_sides(self) -> usize {
        self.shape().n_sides()
    }

    #[inline]
    pub const fn n_edges(self) -> usize {
        self.shape().n_edges()
    }

    /// Node counts per role.
    pub const fn layout(self) -> NodeLayout {
        let (vertices, edge_nodes, face_nodes, interior_nodes) = match self {
            ElemType::NodeElem => (1, 0, 0, 0),
            ElemType::Edge2 => (2, 0, 0, 0),
            ElemType::Edge3 => (2, 1, 0, 0),
            ElemType::Tri3 => (3, 0, 0, 0),
            ElemType::Tri6 => (3, 3, 0, 0),
            ElemType::Quad4 => (4, 0, 0, 0),
            ElemType::Quad8 => (4, 4, 0, 0),
            ElemType::Quad9 => (4, 4, 1, 0),
            ElemType::Tet4 => (4, 0, 0, 0),
            ElemType::Tet10 => (4, 6, 0, 0),
            ElemType::Hex8 => (8, 0, 0, 0),
            ElemType::Hex20 => (8, 12, 0, 0),
            ElemType::Hex27 => (8, 12, 6, 1),
            ElemType::Prism6 => (6, 0, 0, 0),
            ElemType::Prism15 => (6, 9, 0, 0),
            ElemType::Prism18 => (6, 9, 3, 0),
            ElemType::Pyramid5 => (5, 0, 0, 0),
            ElemType::Pyramid13 => (5, 8, 0, 0),
            ElemType::Pyramid14 => (5, 8, 1, 0),
        };
        NodeLayout {
            vertices,
            edge_nodes,
            face_nodes,
            interior_nodes,
        }
    }

    pub const fn default_order(self) -> Order {
        if self.n_nodes() > self.n_vertices() {
            Order::Second
        } else {
            Order::First
        }
    }

    /// The first-order member of the same family.
    pub const fn first_order(self) -> ElemType {
        match self.shape() {
            Shape::Point => ElemType::NodeElem,
            Shape::Segment => ElemType::Edge2,
            Shape::Triangle => ElemType::Tri3,
            Shape::Quadrilateral => ElemType::Quad4,
            Shape::Tetrahedron => ElemType::Tet4,
            Shape::Hexahedron => ElemType::Hex8,
            Shape::Prism => ElemType::Prism6,
            Shape::Pyramid => ElemType::Pyramid5,
        }
    }

    /// Whether every node of the refinement children coincides with a node of
    /// this type, so its children can serve as linear sub-elements.
    pub const fn is_lagrange_complete(self) -> bool {
        matches!(
            self,
            ElemType::Edge3
                | ElemType::Tri6
                | ElemType::Quad9
                | ElemType::Tet10
                | ElemType::Hex27
                | ElemType::Prism18
        )
    }

    /// Number of linear sub-elements used for visualization output.
    pub fn n_sub_elements(self) -> usize {
        if self.is_lagrange_complete() {
            self.shape().n_children().unwrap_or(1)
        } else {
            1
        }
    }

    /// Whether an embedding matrix is registered for this type.
    #[inline]
    pub const fn supports_refinement(self) -> bool {
        self.shape().n_children().is_some()
    }

    /// Number of refinement children, if refinement is supported.
    #[inline]
    pub const fn n_children(self) -> Option<usize> {
        self.shape().n_children()
    }

    /// Element type built on side `s`.
    pub fn side_type(self, s: usize) -> Result<ElemType, MeshError> {
        let n_sides = self.n_sides();
        if s >= n_sides {
            return Err(MeshError::IndexOutOfRange {
                elem_type: self,
                what: "side",
                index: s,
                len: n_sides,
            });
        }
        Ok(self.side_type_unchecked(s))
    }

    pub(crate) fn side_type_unchecked(self, s: usize) -> ElemType {
        let second = matches!(self.default_order(), Order::Second);
        match self.shape() {
            Shape::Point => unreachable!("points have no sides"),
            Shape::Segment => ElemType::NodeElem,
            Shape::Triangle | Shape::Quadrilateral => {
                if second {
                    ElemType::Edge3
                } else {
                    ElemType::Edge2
                }
            }
            Shape::Tetrahedron => {
                if second {
                    ElemType::Tri6
                } else {
                    ElemType::Tri3
                }
            }
            Shape::Hexahedron => match self {
                ElemType::Hex8 => ElemType::Quad4,
                ElemType::Hex20 => ElemType::Quad8,
                _ => ElemType::Quad9,
            },
            Shape::Prism => {
                let triangle = s == 0 || s == 4;
                match (self, triangle) {
                    (ElemType::Prism6, true) => ElemType::Tri3,
                    (ElemType::Prism6, false) => ElemType::Quad4,
                    (_, true) => ElemType::Tri6,
                    (ElemType::Prism15, false) => ElemType::Quad8,
                    (_, false) => ElemType::Quad9,
                }
            }
            Shape::Pyramid => {
                let triangle = s < 4;
                match (self, triangle) {
                    (ElemType::Pyramid5, true) => ElemType::Tri3,
                    (ElemType::Pyramid5, false) => ElemType::Quad4,
                    (_, true) => ElemType::Tri6,
                    (ElemType::Pyramid13, false) => ElemType::Quad8,
                    (_, false) => ElemType::Quad9,
                }
            }
        }
    }

    /// Element type built on an edge, or `None` when the type has no edges.
    pub const fn edge_type(self) -> Option<ElemType> {
        if self.n_edges() == 0 {
            return None;
        }
        match self.default_order() {
            Order::First => Some(ElemType::Edge2),
            Order::Second => Some(ElemType::Edge3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_indexed_by_discriminant() {
        for (i, t) in ElemType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn prism15_static_sizes() {
        let t = ElemType::Prism15;
        assert_eq!(t.n_nodes(), 15);
        assert_eq!(t.n_vertices(), 6);
        assert_eq!(t.n_sides(), 5);
        assert_eq!(t.n_edges(), 9);
        assert_eq!(t.n_sub_elements(), 1);
        assert_eq!(t.default_order(), Order::Second);
        assert_eq!(t.side_type(0).unwrap(), ElemType::Tri6);
        assert_eq!(t.side_type(1).unwrap(), ElemType::Quad8);
        assert_eq!(t.edge_type(), Some(ElemType::Edge3));
    }

    #[test]
    fn node_counts_match_conventional_names() {
        let expected = [1, 2, 3, 3, 6, 4, 8, 9, 4, 10, 8, 20, 27, 6, 15, 18, 5, 13, 14];
        for (t, n) in ElemType::ALL.iter().zip(expected) {
            assert_eq!(t.n_nodes(), n, "{t:?}");
        }
    }

    #[test]
    fn side_type_rejects_out_of_range() {
        assert!(matches!(
            ElemType::Hex8.side_type(6),
            Err(MeshError::IndexOutOfRange { what: "side", index: 6, len: 6, .. })
        ));
    }
}
