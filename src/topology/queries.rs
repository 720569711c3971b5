//! Checked topology queries on [`ElemType`].
//!
//! These are the bounds-checked counterparts of the raw registry lookups.
//! Every index is validated against the type's declared counts and reported
//! as [`MeshError::IndexOutOfRange`] instead of panicking.

use crate::mesh_error::MeshError;
use crate::topology::elem_type::{ElemType, NodeRole};
use crate::topology::refine;
use crate::topology::registry;

impl ElemType {
    fn check(self, what: &'static str, index: usize, len: usize) -> Result<(), MeshError> {
        if index < len {
            Ok(())
        } else {
            Err(MeshError::IndexOutOfRange {
                elem_type: self,
                what,
                index,
                len,
            })
        }
    }

    /// Role of local node `i`.
    pub fn node_role(self, i: usize) -> Result<NodeRole, MeshError> {
        self.check("node", i, self.n_nodes())?;
        self.layout()
            .role(i)
            .ok_or(MeshError::IndexOutOfRange {
                elem_type: self,
                what: "node",
                index: i,
                len: self.n_nodes(),
            })
    }

    pub fn is_vertex(self, i: usize) -> Result<bool, MeshError> {
        Ok(self.node_role(i)? == NodeRole::Vertex)
    }

    pub fn is_edge(self, i: usize) -> Result<bool, MeshError> {
        Ok(self.node_role(i)? == NodeRole::Edge)
    }

    /// True for face nodes and for the cell-center node, so that vertex,
    /// edge and face predicates partition the local nodes.
    pub fn is_face(self, i: usize) -> Result<bool, MeshError> {
        Ok(matches!(self.node_role(i)?, NodeRole::Face | NodeRole::Interior))
    }

    pub fn is_interior(self, i: usize) -> Result<bool, MeshError> {
        Ok(self.node_role(i)? == NodeRole::Interior)
    }

    /// Local node indices of side `s`, in the side type's node order.
    pub fn nodes_on_side(self, s: usize) -> Result<&'static [usize], MeshError> {
        self.check("side", s, self.n_sides())?;
        Ok(registry::side_nodes(self, s))
    }

    /// Local node indices of edge `e`.
    pub fn nodes_on_edge(self, e: usize) -> Result<&'static [usize], MeshError> {
        self.check("edge", e, self.n_edges())?;
        Ok(registry::edge_nodes(self, e))
    }

    pub fn is_node_on_side(self, n: usize, s: usize) -> Result<bool, MeshError> {
        self.check("node", n, self.n_nodes())?;
        Ok(self.nodes_on_side(s)?.contains(&n))
    }

    pub fn is_node_on_edge(self, n: usize, e: usize) -> Result<bool, MeshError> {
        self.check("node", n, self.n_nodes())?;
        Ok(self.nodes_on_edge(e)?.contains(&n))
    }

    /// Element-local index of local node `side_node` of side `side`.
    pub fn which_node_am_i(self, side: usize, side_node: usize) -> Result<usize, MeshError> {
        let row = self.nodes_on_side(side)?;
        self.check("side node", side_node, row.len())?;
        Ok(row[side_node])
    }

    fn check_second_order(self, n: usize) -> Result<(), MeshError> {
        self.check("node", n, self.n_nodes())?;
        if n < self.n_vertices() {
            return Err(MeshError::NotSecondOrderNode {
                elem_type: self,
                node: n,
            });
        }
        Ok(())
    }

    /// Number of vertices second-order node `n` is built from: 2 for an edge
    /// node, the face's corner count for a face node, all vertices for an
    /// interior node.
    pub fn n_second_order_adjacent_vertices(self, n: usize) -> Result<usize, MeshError> {
        self.check_second_order(n)?;
        Ok(registry::second_order_adjacent_vertices(self, n).len())
    }

    /// The `v`-th vertex adjacent to second-order node `n`.
    pub fn second_order_adjacent_vertex(self, n: usize, v: usize) -> Result<usize, MeshError> {
        self.check_second_order(n)?;
        let row = registry::second_order_adjacent_vertices(self, n);
        self.check("adjacent vertex", v, row.len())?;
        Ok(row[v])
    }

    /// `(child, child vertex)` coinciding with second-order node `n` after
    /// refinement.
    pub fn second_order_child_vertex(self, n: usize) -> Result<(usize, usize), MeshError> {
        refine::second_order_child_vertex(self, n)
    }
}
