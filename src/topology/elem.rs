//! Elements: the owned [`Elem`] and the read-only [`ElemView`] interface it
//! shares with borrowed side proxies.
//!
//! An element is an [`ElemType`] plus a node-id array of exactly
//! `n_nodes()` entries in local order, and the refinement links that place
//! it in a mesh hierarchy. Every query an element answers is a function of
//! `(type, node ids)`, so the provided methods of [`ElemView`] are written
//! once and serve owned elements and proxies alike.

use crate::geometry::bounds::Real;
use crate::geometry::metrics;
use crate::geometry::point::Point;
use crate::io::{self, IoPackage};
use crate::mesh_error::MeshError;
use crate::topology::cache::{InvalidateCache, SideKey, TopologyCache};
use crate::topology::elem_type::{ElemType, Order};
use crate::topology::ids::{ElemId, NodeId};
use crate::topology::node::NodeStore;
use crate::topology::registry;
use crate::topology::side::{BoundaryElem, ElemProxy};
use std::borrow::Cow;

/// Read-only element interface.
pub trait ElemView {
    fn elem_type(&self) -> ElemType;

    /// Node id at local index `i`, or `None` past the end.
    fn local_node_id(&self, i: usize) -> Option<NodeId>;

    /// Checked node id at local index `i`.
    fn node_id(&self, i: usize) -> Result<NodeId, MeshError> {
        self.local_node_id(i).ok_or(MeshError::IndexOutOfRange {
            elem_type: self.elem_type(),
            what: "node",
            index: i,
            len: self.n_nodes(),
        })
    }

    /// All node ids in local order.
    fn node_ids(&self) -> Vec<NodeId> {
        (0..self.n_nodes())
            .filter_map(|i| self.local_node_id(i))
            .collect()
    }

    /// Local index of `id` in this element, if present.
    fn local_node(&self, id: NodeId) -> Option<usize> {
        (0..self.n_nodes()).find(|&i| self.local_node_id(i) == Some(id))
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.local_node(id).is_some()
    }

    fn dim(&self) -> usize {
        self.elem_type().dim()
    }

    fn n_nodes(&self) -> usize {
        self.elem_type().n_nodes()
    }

    fn n_vertices(&self) -> usize {
        self.elem_type().n_vertices()
    }

    fn n_sides(&self) -> usize {
        self.elem_type().n_sides()
    }

    fn n_edges(&self) -> usize {
        self.elem_type().n_edges()
    }

    fn n_sub_elements(&self) -> usize {
        self.elem_type().n_sub_elements()
    }

    fn default_order(&self) -> Order {
        self.elem_type().default_order()
    }

    fn is_vertex(&self, i: usize) -> Result<bool, MeshError> {
        self.elem_type().is_vertex(i)
    }

    fn is_edge(&self, i: usize) -> Result<bool, MeshError> {
        self.elem_type().is_edge(i)
    }

    fn is_face(&self, i: usize) -> Result<bool, MeshError> {
        self.elem_type().is_face(i)
    }

    fn is_interior(&self, i: usize) -> Result<bool, MeshError> {
        self.elem_type().is_interior(i)
    }

    fn is_node_on_side(&self, n: usize, s: usize) -> Result<bool, MeshError> {
        self.elem_type().is_node_on_side(n, s)
    }

    fn is_node_on_edge(&self, n: usize, e: usize) -> Result<bool, MeshError> {
        self.elem_type().is_node_on_edge(n, e)
    }

    fn which_node_am_i(&self, side: usize, side_node: usize) -> Result<usize, MeshError> {
        self.elem_type().which_node_am_i(side, side_node)
    }

    fn n_second_order_adjacent_vertices(&self, n: usize) -> Result<usize, MeshError> {
        self.elem_type().n_second_order_adjacent_vertices(n)
    }

    fn second_order_adjacent_vertex(&self, n: usize, v: usize) -> Result<usize, MeshError> {
        self.elem_type().second_order_adjacent_vertex(n, v)
    }

    fn second_order_child_vertex(&self, n: usize) -> Result<(usize, usize), MeshError> {
        self.elem_type().second_order_child_vertex(n)
    }

    /// Node positions in local order.
    fn points<T, S>(&self, store: &S) -> Result<Vec<Point<T>>, MeshError>
    where
        Self: Sized,
        T: Real,
        S: NodeStore<T> + ?Sized,
    {
        store.points_of(self.node_ids())
    }

    /// Signed volume (3D), area (2D), length (1D) or zero (`NodeElem`).
    fn volume<T, S>(&self, store: &S) -> Result<T, MeshError>
    where
        Self: Sized,
        T: Real,
        S: NodeStore<T> + ?Sized,
    {
        metrics::volume(self.elem_type(), &self.points(store)?)
    }

    fn has_affine_map<T, S>(&self, store: &S, tol: T) -> Result<bool, MeshError>
    where
        Self: Sized,
        T: Real,
        S: NodeStore<T> + ?Sized,
    {
        metrics::has_affine_map(self.elem_type(), &self.points(store)?, tol)
    }

    fn centroid<T, S>(&self, store: &S) -> Result<Point<T>, MeshError>
    where
        Self: Sized,
        T: Real,
        S: NodeStore<T> + ?Sized,
    {
        metrics::centroid(self.elem_type(), &self.points(store)?)
    }

    /// Node ids of sub-element `sc` in the export package's cell order.
    fn connectivity(&self, sc: usize, iop: IoPackage) -> Result<Vec<NodeId>, MeshError> {
        io::local_connectivity(self.elem_type(), sc, iop)?
            .into_iter()
            .map(|i| self.node_id(i))
            .collect()
    }
}

/// An owned element.
#[derive(Clone, Debug)]
pub struct Elem {
    elem_type: ElemType,
    nodes: Vec<NodeId>,
    parent: Option<ElemId>,
    children: Vec<ElemId>,
    level: u32,
    cache: Option<TopologyCache>,
}

impl Elem {
    /// Creates an element from its node ids in local order.
    ///
    /// # Errors
    /// [`MeshError::NodeCountMismatch`] unless `nodes.len() == elem_type.n_nodes()`.
    pub fn new(elem_type: ElemType, nodes: Vec<NodeId>) -> Result<Self, MeshError> {
        if nodes.len() != elem_type.n_nodes() {
            return Err(MeshError::NodeCountMismatch {
                elem_type,
                expected: elem_type.n_nodes(),
                found: nodes.len(),
            });
        }
        Ok(Self::from_nodes_unchecked(elem_type, nodes))
    }

    /// Callers guarantee `nodes.len() == elem_type.n_nodes()`.
    pub(crate) fn from_nodes_unchecked(elem_type: ElemType, nodes: Vec<NodeId>) -> Self {
        debug_assert_eq!(nodes.len(), elem_type.n_nodes());
        Elem {
            elem_type,
            nodes,
            parent: None,
            children: Vec::new(),
            level: 0,
            cache: None,
        }
    }

    /// Enables (or drops) the lazily filled side-key cache.
    pub fn with_topology_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(TopologyCache::default);
        self
    }

    pub(crate) fn with_parent(mut self, parent: ElemId, level: u32) -> Self {
        self.parent = Some(parent);
        self.level = level;
        self
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn parent(&self) -> Option<ElemId> {
        self.parent
    }

    pub fn children(&self) -> &[ElemId] {
        &self.children
    }

    /// Refinement depth: 0 for elements with no parent.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// An element is active while it has no children.
    pub fn is_active(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_topology_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub(crate) fn set_children(&mut self, children: Vec<ElemId>) {
        self.children = children;
    }

    pub(crate) fn take_children(&mut self) -> Vec<ElemId> {
        std::mem::take(&mut self.children)
    }

    /// Replaces local node `i`, invalidating any cached topology.
    pub fn set_node(&mut self, i: usize, id: NodeId) -> Result<(), MeshError> {
        let len = self.nodes.len();
        let slot = self.nodes.get_mut(i).ok_or(MeshError::IndexOutOfRange {
            elem_type: self.elem_type,
            what: "node",
            index: i,
            len,
        })?;
        *slot = id;
        self.invalidate_cache();
        Ok(())
    }

    /// Key identifying side `s` independently of orientation.
    pub fn side_key(&self, s: usize) -> Result<SideKey, MeshError> {
        let st = self.elem_type.side_type(s)?;
        let row = registry::side_nodes(self.elem_type, s);
        Ok(SideKey::new(
            row[..st.n_vertices()].iter().map(|&i| self.nodes[i]).collect(),
        ))
    }

    fn compute_side_keys(&self) -> Vec<SideKey> {
        (0..self.n_sides())
            .filter_map(|s| self.side_key(s).ok())
            .collect()
    }

    /// Keys of every side, from the cache when enabled.
    pub fn side_keys(&self) -> Cow<'_, [SideKey]> {
        match &self.cache {
            Some(cache) => Cow::Borrowed(cache.side_keys(|| self.compute_side_keys())),
            None => Cow::Owned(self.compute_side_keys()),
        }
    }

    /// Side `i` as a boundary element: a borrowing proxy when `proxy` is
    /// true, otherwise an owned element with copied node ids.
    pub fn build_side_ptr(&self, i: usize, proxy: bool) -> Result<BoundaryElem<'_>, MeshError> {
        let side_type = self.elem_type.side_type(i)?;
        let p = ElemProxy::new(side_type, &self.nodes, registry::side_nodes(self.elem_type, i));
        Ok(if proxy {
            BoundaryElem::Proxy(p)
        } else {
            BoundaryElem::Owned(p.to_elem())
        })
    }

    /// Edge `i` as an `Edge2`/`Edge3` proxy; call
    /// [`BoundaryElem::into_owned`] to keep it.
    pub fn build_edge_ptr(&self, i: usize) -> Result<BoundaryElem<'_>, MeshError> {
        let local = self.elem_type.nodes_on_edge(i)?;
        let edge_type = self.elem_type.edge_type().ok_or(MeshError::IndexOutOfRange {
            elem_type: self.elem_type,
            what: "edge",
            index: i,
            len: 0,
        })?;
        Ok(BoundaryElem::Proxy(ElemProxy::new(edge_type, &self.nodes, local)))
    }
}

impl ElemView for Elem {
    #[inline]
    fn elem_type(&self) -> ElemType {
        self.elem_type
    }

    #[inline]
    fn local_node_id(&self, i: usize) -> Option<NodeId> {
        self.nodes.get(i).copied()
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }
}

impl InvalidateCache for Elem {
    fn invalidate_cache(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.invalidate_cache();
        }
    }
}

static_assertions::assert_impl_all!(Elem: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<NodeId> {
        (0..n).map(NodeId::new).collect()
    }

    #[test]
    fn construction_checks_node_count() {
        assert!(Elem::new(ElemType::Prism15, ids(15)).is_ok());
        assert_eq!(
            Elem::new(ElemType::Prism15, ids(14)).unwrap_err(),
            MeshError::NodeCountMismatch {
                elem_type: ElemType::Prism15,
                expected: 15,
                found: 14
            }
        );
    }

    #[test]
    fn node_access_is_checked() {
        let e = Elem::new(ElemType::Tri3, vec![NodeId::new(7), NodeId::new(3), NodeId::new(9)]).unwrap();
        assert_eq!(e.node_id(1).unwrap(), NodeId::new(3));
        assert!(e.node_id(3).is_err());
        assert_eq!(e.local_node(NodeId::new(9)), Some(2));
        assert!(!e.contains_node(NodeId::new(0)));
    }

    #[test]
    fn side_keys_follow_node_edits() {
        let mut e = Elem::new(ElemType::Quad4, ids(4)).unwrap().with_topology_cache(true);
        assert_eq!(e.side_keys()[1].vertices(), &[NodeId::new(1), NodeId::new(2)]);
        e.set_node(2, NodeId::new(10)).unwrap();
        assert_eq!(e.side_keys()[1].vertices(), &[NodeId::new(1), NodeId::new(10)]);
        assert!(e.set_node(4, NodeId::new(0)).is_err());
    }

    #[test]
    fn side_keys_use_vertices_only() {
        let e = Elem::new(ElemType::Hex20, ids(20)).unwrap();
        let key = e.side_key(5).unwrap();
        assert_eq!(key.vertices(), &ids(8)[4..]);
    }
}
