//! Embedding matrices for isotropic refinement.
//!
//! `embedding[c][j][k]` is the weight of parent node `k` in the position of
//! node `j` of child `c`. Rows are the parent's shape functions evaluated at
//! the child node's image in the parent's reference element, so every row
//! sums to one and a child node that coincides with a parent node has a unit
//! row.
//!
//! Children are described once per shape by their vertices, given as node
//! indices of the family's richest member (`Tri6`, `Quad9`, `Tet10`,
//! `Hex27`, `Prism18`). Higher-order child nodes follow from the first-order
//! map of the child, so the same subdivision serves every member.

use crate::geometry::reference::{shape_basis, snap};
use crate::mesh_error::MeshError;
use crate::topology::elem_type::{ElemType, Shape};
use crate::topology::registry;
use once_cell::sync::Lazy;

const SEGMENT_CHILDREN: [[usize; 2]; 2] = [[0, 2], [2, 1]];

const TRIANGLE_CHILDREN: [[usize; 3]; 4] = [[0, 3, 5], [3, 1, 4], [5, 4, 2], [3, 4, 5]];

/// Lexicographic in `(xi, eta)`: lower-left, lower-right, upper-left, upper-right.
const QUADRILATERAL_CHILDREN: [[usize; 4]; 4] =
    [[0, 4, 8, 7], [4, 1, 5, 8], [7, 8, 6, 3], [8, 5, 2, 6]];

/// Four corner tets, then the inner octahedron split along the 6-8 diagonal.
const TETRAHEDRON_CHILDREN: [[usize; 4]; 8] = [
    [0, 4, 6, 7],
    [4, 1, 5, 8],
    [6, 5, 2, 9],
    [7, 8, 9, 3],
    [4, 8, 6, 7],
    [4, 5, 6, 8],
    [6, 7, 8, 9],
    [6, 8, 5, 9],
];

/// Octants, `c = ix + 2 iy + 4 iz`.
const HEXAHEDRON_CHILDREN: [[usize; 8]; 8] = [
    [0, 8, 20, 11, 12, 21, 26, 24],
    [8, 1, 9, 20, 21, 13, 22, 26],
    [11, 20, 10, 3, 24, 26, 23, 15],
    [20, 9, 2, 10, 26, 22, 14, 23],
    [12, 21, 26, 24, 4, 16, 25, 19],
    [21, 13, 22, 26, 16, 5, 17, 25],
    [24, 26, 23, 15, 19, 25, 18, 7],
    [26, 22, 14, 23, 25, 17, 6, 18],
];

/// Triangle subdivision of each half-height layer, `c = tri_child + 4 * layer`.
const PRISM_CHILDREN: [[usize; 6]; 8] = [
    [0, 6, 8, 9, 15, 17],
    [6, 1, 7, 15, 10, 16],
    [8, 7, 2, 17, 16, 11],
    [6, 7, 8, 15, 16, 17],
    [9, 15, 17, 3, 12, 14],
    [15, 10, 16, 12, 4, 13],
    [17, 16, 11, 14, 13, 5],
    [15, 16, 17, 12, 13, 14],
];

/// Reference positions of every child's vertices, or `None` if the shape has
/// no registered subdivision.
fn child_vertices(shape: Shape) -> Option<Vec<Vec<[f64; 3]>>> {
    fn lookup<const N: usize>(t: ElemType, children: &[[usize; N]]) -> Vec<Vec<[f64; 3]>> {
        let nodes = registry::reference_nodes(t);
        children
            .iter()
            .map(|child| child.iter().map(|&i| nodes[i]).collect())
            .collect()
    }
    match shape {
        Shape::Segment => Some(lookup(ElemType::Edge3, &SEGMENT_CHILDREN)),
        Shape::Triangle => Some(lookup(ElemType::Tri6, &TRIANGLE_CHILDREN)),
        Shape::Quadrilateral => Some(lookup(ElemType::Quad9, &QUADRILATERAL_CHILDREN)),
        Shape::Tetrahedron => Some(lookup(ElemType::Tet10, &TETRAHEDRON_CHILDREN)),
        Shape::Hexahedron => Some(lookup(ElemType::Hex27, &HEXAHEDRON_CHILDREN)),
        Shape::Prism => Some(lookup(ElemType::Prism18, &PRISM_CHILDREN)),
        Shape::Point | Shape::Pyramid => None,
    }
}

/// Dense `n_children x n_nodes x n_nodes` weight table of one element type.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    elem_type: ElemType,
    n_children: usize,
    n_nodes: usize,
    weights: Vec<f64>,
}

impl EmbeddingMatrix {
    fn build(t: ElemType) -> Option<Self> {
        let children = child_vertices(t.shape())?;
        let linear = shape_basis(t.first_order());
        let basis = shape_basis(t);
        let nodes = registry::reference_nodes(t);
        let n = t.n_nodes();
        let mut weights = Vec::with_capacity(children.len() * n * n);
        for child in &children {
            for &xi in nodes {
                let mut x = [0.0; 3];
                for (l, v) in linear.values(xi).iter().zip(child) {
                    for d in 0..3 {
                        x[d] += l * v[d];
                    }
                }
                weights.extend(basis.values(x).into_iter().map(snap));
            }
        }
        Some(EmbeddingMatrix {
            elem_type: t,
            n_children: children.len(),
            n_nodes: n,
            weights,
        })
    }

    pub fn elem_type(&self) -> ElemType {
        self.elem_type
    }

    pub fn n_children(&self) -> usize {
        self.n_children
    }

    /// Nodes per child, equal to nodes per parent.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Weights of every parent node for node `j` of child `c`.
    ///
    /// # Panics
    /// Panics if `c` or `j` is out of range.
    pub fn row(&self, c: usize, j: usize) -> &[f64] {
        assert!(
            c < self.n_children && j < self.n_nodes,
            "embedding row ({c}, {j}) out of range for {:?}",
            self.elem_type
        );
        let start = (c * self.n_nodes + j) * self.n_nodes;
        &self.weights[start..start + self.n_nodes]
    }

    /// Checked `embedding[c][j][k]`.
    pub fn weight(&self, c: usize, j: usize, k: usize) -> Result<f64, MeshError> {
        let check = |what, index, len| {
            if index < len {
                Ok(())
            } else {
                Err(MeshError::IndexOutOfRange {
                    elem_type: self.elem_type,
                    what,
                    index,
                    len,
                })
            }
        };
        check("child", c, self.n_children)?;
        check("child node", j, self.n_nodes)?;
        check("parent node", k, self.n_nodes)?;
        Ok(self.row(c, j)[k])
    }

    /// Parent node that child node `(c, j)` coincides with, if its row is a
    /// unit row.
    pub fn coincident_parent_node(&self, c: usize, j: usize) -> Option<usize> {
        let row = self.row(c, j);
        let k = row.iter().position(|&w| w == 1.0)?;
        row.iter()
            .enumerate()
            .all(|(i, &w)| i == k || w == 0.0)
            .then_some(k)
    }
}

static EMBEDDINGS: Lazy<Vec<Option<EmbeddingMatrix>>> = Lazy::new(|| {
    log::trace!("building embedding matrices");
    ElemType::ALL.iter().map(|&t| EmbeddingMatrix::build(t)).collect()
});

/// Embedding matrix of `t`.
///
/// # Errors
/// [`MeshError::RefinementUnsupported`] for `NodeElem` and the pyramids.
pub fn embedding_matrix(t: ElemType) -> Result<&'static EmbeddingMatrix, MeshError> {
    EMBEDDINGS[t.index()]
        .as_ref()
        .ok_or(MeshError::RefinementUnsupported(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rows_sum_to_one() {
        for t in ElemType::ALL.into_iter().filter(|t| t.supports_refinement()) {
            let m = embedding_matrix(t).unwrap();
            assert_eq!(Some(m.n_children()), t.n_children());
            for c in 0..m.n_children() {
                for j in 0..m.n_nodes() {
                    let sum: f64 = m.row(c, j).iter().sum();
                    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn prism15_first_child() {
        let m = embedding_matrix(ElemType::Prism15).unwrap();
        assert_eq!(m.coincident_parent_node(0, 0), Some(0));
        assert_eq!(m.coincident_parent_node(0, 1), Some(6));
        assert_eq!(m.coincident_parent_node(0, 3), Some(9));
        let expected = [
            -0.25, -0.25, 0.0, -0.25, -0.25, 0.0, 0.5, 0.0, 0.0, 0.5, 0.5, 0.0, 0.5, 0.0, 0.0,
        ];
        assert_eq!(m.row(0, 4), &expected);
    }

    #[test]
    fn pyramids_have_no_embedding() {
        for t in [ElemType::Pyramid5, ElemType::Pyramid13, ElemType::Pyramid14, ElemType::NodeElem] {
            assert_eq!(embedding_matrix(t), Err(MeshError::RefinementUnsupported(t)));
        }
    }

    #[test]
    fn checked_weight_reports_the_bad_index() {
        let m = embedding_matrix(ElemType::Tri3).unwrap();
        assert!(matches!(
            m.weight(4, 0, 0),
            Err(MeshError::IndexOutOfRange { what: "child", index: 4, len: 4, .. })
        ));
        assert_eq!(m.weight(3, 0, 0), Ok(0.5));
        assert_eq!(m.weight(3, 0, 2), Ok(0.0));
    }
}
