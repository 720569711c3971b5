//! Isotropic refinement templates and the queries derived from them.
//!
//! Everything here is driven by the [`EmbeddingMatrix`] of an element type:
//! child node positions, prolongation of nodal data, the mapping of
//! second-order parent nodes onto child vertices, and which parent side a
//! child side lies on. Applying refinement to a mesh lives in
//! [`crate::mesh::Mesh::refine`].

pub mod embedding;

pub use embedding::{EmbeddingMatrix, embedding_matrix};

use crate::geometry::bounds::{FieldValue, Real, cast};
use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::elem_type::ElemType;
use crate::topology::registry;

fn check_index(t: ElemType, what: &'static str, index: usize, len: usize) -> Result<(), MeshError> {
    if index < len {
        Ok(())
    } else {
        Err(MeshError::IndexOutOfRange {
            elem_type: t,
            what,
            index,
            len,
        })
    }
}

/// Nodal values of child `c` interpolated from the parent's nodal values:
/// `child[j] = sum_k embedding[c][j][k] * parent[k]`.
///
/// Works for any [`FieldValue`]: coordinates, real or complex scalars.
pub fn prolong<T, V>(t: ElemType, c: usize, parent: &[V]) -> Result<Vec<V>, MeshError>
where
    T: Real,
    V: FieldValue<T>,
{
    let m = embedding_matrix(t)?;
    check_index(t, "child", c, m.n_children())?;
    if parent.len() != t.n_nodes() {
        return Err(MeshError::NodeCountMismatch {
            elem_type: t,
            expected: t.n_nodes(),
            found: parent.len(),
        });
    }
    Ok((0..m.n_nodes())
        .map(|j| {
            m.row(c, j)
                .iter()
                .zip(parent)
                .filter(|(w, _)| **w != 0.0)
                .fold(V::zero(), |acc, (&w, &v)| acc + v * cast::<T>(w))
        })
        .collect())
}

/// Nodal values of every child, in child order.
pub fn prolong_all<T, V>(t: ElemType, parent: &[V]) -> Result<Vec<Vec<V>>, MeshError>
where
    T: Real,
    V: FieldValue<T>,
{
    let n = embedding_matrix(t)?.n_children();
    (0..n).map(|c| prolong::<T, V>(t, c, parent)).collect()
}

/// Node positions of every child of an element with nodes at `points`.
pub fn refine_points<T: Real>(t: ElemType, points: &[Point<T>]) -> Result<Vec<Vec<Point<T>>>, MeshError> {
    prolong_all::<T, Point<T>>(t, points)
}

/// Child and child-vertex that coincide with second-order node `n`.
///
/// Children are searched in order and the first match is returned.
///
/// # Errors
/// - [`MeshError::IndexOutOfRange`] if `n >= t.n_nodes()`.
/// - [`MeshError::NotSecondOrderNode`] if `n` is a vertex.
/// - [`MeshError::RefinementUnsupported`] if `t` has no embedding matrix.
pub fn second_order_child_vertex(t: ElemType, n: usize) -> Result<(usize, usize), MeshError> {
    check_index(t, "node", n, t.n_nodes())?;
    if n < t.n_vertices() {
        return Err(MeshError::NotSecondOrderNode { elem_type: t, node: n });
    }
    let m = embedding_matrix(t)?;
    (0..m.n_children())
        .flat_map(|c| (0..t.n_vertices()).map(move |v| (c, v)))
        .find(|&(c, v)| m.coincident_parent_node(c, v) == Some(n))
        .ok_or(MeshError::NotSecondOrderNode { elem_type: t, node: n })
}

/// Parent side that side `s` of child `c` lies on, or `None` for a side
/// interior to the parent.
pub fn child_side_on_parent_side(t: ElemType, c: usize, s: usize) -> Result<Option<usize>, MeshError> {
    let linear = t.first_order();
    let m = embedding_matrix(linear)?;
    check_index(t, "child", c, m.n_children())?;
    check_index(t, "side", s, t.n_sides())?;
    let child_side = registry::side_nodes(linear, s);
    Ok((0..linear.n_sides()).find(|&p| {
        let parent_side = registry::side_nodes(linear, p);
        child_side.iter().all(|&v| {
            m.row(c, v)
                .iter()
                .enumerate()
                .all(|(k, &w)| w == 0.0 || parent_side.contains(&k))
        })
    }))
}

/// Parent node indices of the vertices of child `c`, for types whose child
/// vertices all coincide with parent nodes.
pub fn child_vertex_nodes(t: ElemType, c: usize) -> Result<Option<Vec<usize>>, MeshError> {
    let m = embedding_matrix(t)?;
    check_index(t, "child", c, m.n_children())?;
    Ok((0..t.n_vertices())
        .map(|v| m.coincident_parent_node(c, v))
        .collect())
}
