//! Side and edge elements built from a parent element.
//!
//! A side can be handed out either as an [`ElemProxy`], which borrows the
//! parent's node array and reads it through a static local-index row, or as
//! an owned [`Elem`] with its own copy of the node ids. Both implement
//! [`ElemView`], and [`BoundaryElem`] lets builders return either.

use crate::mesh_error::MeshError;
use crate::topology::elem::{Elem, ElemView};
use crate::topology::elem_type::ElemType;
use crate::topology::ids::NodeId;

/// Borrowed view of a side of a parent element.
///
/// The proxy cannot outlive the parent's node array; node edits on the
/// parent require `&mut` and therefore end every proxy borrow.
#[derive(Clone, Copy, Debug)]
pub struct ElemProxy<'a> {
    elem_type: ElemType,
    parent_nodes: &'a [NodeId],
    local: &'static [usize],
}

impl<'a> ElemProxy<'a> {
    pub(crate) fn new(elem_type: ElemType, parent_nodes: &'a [NodeId], local: &'static [usize]) -> Self {
        debug_assert_eq!(local.len(), elem_type.n_nodes());
        ElemProxy {
            elem_type,
            parent_nodes,
            local,
        }
    }

    /// Parent-local indices of this side's nodes.
    pub fn local_nodes(&self) -> &'static [usize] {
        self.local
    }

    /// Copies the node ids into a standalone element.
    pub fn to_elem(&self) -> Elem {
        Elem::from_nodes_unchecked(self.elem_type, self.node_ids())
    }
}

impl ElemView for ElemProxy<'_> {
    #[inline]
    fn elem_type(&self) -> ElemType {
        self.elem_type
    }

    #[inline]
    fn local_node_id(&self, i: usize) -> Option<NodeId> {
        self.local
            .get(i)
            .and_then(|&p| self.parent_nodes.get(p))
            .copied()
    }
}

/// A side or edge handed out by a builder.
#[derive(Clone, Debug)]
pub enum BoundaryElem<'a> {
    Proxy(ElemProxy<'a>),
    Owned(Elem),
}

impl BoundaryElem<'_> {
    pub fn is_proxy(&self) -> bool {
        matches!(self, BoundaryElem::Proxy(_))
    }

    /// Detaches from the parent, copying node ids if needed.
    pub fn into_owned(self) -> Elem {
        match self {
            BoundaryElem::Proxy(p) => p.to_elem(),
            BoundaryElem::Owned(e) => e,
        }
    }
}

impl ElemView for BoundaryElem<'_> {
    fn elem_type(&self) -> ElemType {
        match self {
            BoundaryElem::Proxy(p) => p.elem_type(),
            BoundaryElem::Owned(e) => e.elem_type(),
        }
    }

    fn local_node_id(&self, i: usize) -> Option<NodeId> {
        match self {
            BoundaryElem::Proxy(p) => p.local_node_id(i),
            BoundaryElem::Owned(e) => e.local_node_id(i),
        }
    }
}

/// Side `i` of `elem`; see [`Elem::build_side_ptr`].
pub fn build_side_ptr(elem: &Elem, i: usize, proxy: bool) -> Result<BoundaryElem<'_>, MeshError> {
    elem.build_side_ptr(i, proxy)
}

/// Edge `i` of `elem`; see [`Elem::build_edge_ptr`].
pub fn build_edge_ptr(elem: &Elem, i: usize) -> Result<BoundaryElem<'_>, MeshError> {
    elem.build_edge_ptr(i)
}
