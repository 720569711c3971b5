//! Geometric primitive registry: per-shape constant tables.
//!
//! Each shape stores its tables once, for the richest member of the family.
//! Every side and edge row lists vertices first, then edge nodes, then the face
//! node, so the lower-order members simply take the row prefix whose length is
//! the node count of their side (or edge) type. Node numbering is shared by
//! the whole family for the same reason: `Prism15` is the first 15 nodes of
//! `Prism18`.
//!
//! These accessors are trusted internal lookups. An out-of-range key is a
//! programming error and panics; the checked, `Result`-returning queries live
//! on [`ElemType`](crate::topology::elem_type::ElemType) and
//! [`ElemView`](crate::topology::elem::ElemView).

pub mod hexahedron;
pub mod point;
pub mod prism;
pub mod pyramid;
pub mod quadrilateral;
pub mod segment;
pub mod tetrahedron;
pub mod triangle;

use crate::topology::elem_type::{ElemType, Order, Shape};

/// Local node indices of side `s`, in the side type's own node order.
///
/// # Panics
/// Panics if `s >= t.n_sides()`.
pub fn side_nodes(t: ElemType, s: usize) -> &'static [usize] {
    assert!(s < t.n_sides(), "side {s} out of range for {t:?}");
    let row: &'static [usize] = match t.shape() {
        Shape::Point => unreachable!("points have no sides"),
        Shape::Segment => segment::SIDE_NODES[s],
        Shape::Triangle => triangle::SIDE_NODES[s],
        Shape::Quadrilateral => quadrilateral::SIDE_NODES[s],
        Shape::Tetrahedron => tetrahedron::SIDE_NODES[s],
        Shape::Hexahedron => hexahedron::SIDE_NODES[s],
        Shape::Prism => prism::SIDE_NODES[s],
        Shape::Pyramid => pyramid::SIDE_NODES[s],
    };
    &row[..t.side_type_unchecked(s).n_nodes()]
}

/// Local node indices of edge `e`: the two end vertices, then the mid-edge
/// node for second-order types. For 2D types this is the side row.
///
/// # Panics
/// Panics if `e >= t.n_edges()`.
pub fn edge_nodes(t: ElemType, e: usize) -> &'static [usize] {
    assert!(e < t.n_edges(), "edge {e} out of range for {t:?}");
    let len = match t.default_order() {
        Order::First => 2,
        Order::Second => 3,
    };
    let row: &'static [usize; 3] = match t.shape() {
        Shape::Point | Shape::Segment => unreachable!("no edges below 2D"),
        Shape::Triangle | Shape::Quadrilateral => return side_nodes(t, e),
        Shape::Tetrahedron => &tetrahedron::EDGE_NODES[e],
        Shape::Hexahedron => &hexahedron::EDGE_NODES[e],
        Shape::Prism => &prism::EDGE_NODES[e],
        Shape::Pyramid => &pyramid::EDGE_NODES[e],
    };
    &row[..len]
}

/// Vertices that second-order node `n` is built from: the two ends of its
/// edge, the corners of its face, or every vertex for the cell center.
///
/// # Panics
/// Panics unless `t.n_vertices() <= n < t.n_nodes()`.
pub fn second_order_adjacent_vertices(t: ElemType, n: usize) -> &'static [usize] {
    let nv = t.n_vertices();
    assert!(
        n >= nv && n < t.n_nodes(),
        "node {n} is not a second-order node of {t:?}"
    );
    let k = n - nv;
    match t.shape() {
        Shape::Point => unreachable!("points have no second-order nodes"),
        Shape::Segment => segment::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Triangle => triangle::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Quadrilateral => quadrilateral::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Tetrahedron => tetrahedron::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Hexahedron => hexahedron::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Prism => prism::SECOND_ORDER_ADJACENT_VERTICES[k],
        Shape::Pyramid => pyramid::SECOND_ORDER_ADJACENT_VERTICES[k],
    }
}

/// Reference coordinates of the type's nodes, padded to 3 components.
pub fn reference_nodes(t: ElemType) -> &'static [[f64; 3]] {
    let all: &'static [[f64; 3]] = match t.shape() {
        Shape::Point => &point::REFERENCE_NODES,
        Shape::Segment => &segment::REFERENCE_NODES,
        Shape::Triangle => &triangle::REFERENCE_NODES,
        Shape::Quadrilateral => &quadrilateral::REFERENCE_NODES,
        Shape::Tetrahedron => &tetrahedron::REFERENCE_NODES,
        Shape::Hexahedron => &hexahedron::REFERENCE_NODES,
        Shape::Prism => &prism::REFERENCE_NODES,
        Shape::Pyramid => &pyramid::REFERENCE_NODES,
    };
    &all[..t.n_nodes()]
}

/// `dim + 1` vertices whose reference positions span the reference element;
/// used to fit the candidate affine map.
pub fn affine_frame(t: ElemType) -> &'static [usize] {
    match t.shape() {
        Shape::Point => &point::AFFINE_FRAME,
        Shape::Segment => &segment::AFFINE_FRAME,
        Shape::Triangle => &triangle::AFFINE_FRAME,
        Shape::Quadrilateral => &quadrilateral::AFFINE_FRAME,
        Shape::Tetrahedron => &tetrahedron::AFFINE_FRAME,
        Shape::Hexahedron => &hexahedron::AFFINE_FRAME,
        Shape::Prism => &prism::AFFINE_FRAME,
        Shape::Pyramid => &pyramid::AFFINE_FRAME,
    }
}

static_assertions::const_assert_eq!(ElemType::Prism15.n_nodes(), 15);
static_assertions::const_assert_eq!(ElemType::Hex27.n_nodes(), 27);
static_assertions::const_assert_eq!(ElemType::ALL.len(), ElemType::Pyramid14 as usize + 1);
