//! `Mesh<T>`: an arena of nodes and elements with hierarchical refinement.
//!
//! Elements refer to nodes by [`NodeId`] and to their parent and children by
//! [`ElemId`]. Refinement never removes anything from the arena; coarsening
//! clears the children's slots, and their ids are not reused.
//!
//! Nodes created by refinement are keyed by the parent nodes and weights
//! that produced them, so siblings, neighbours sharing a side, and a later
//! re-refinement of the same element all reuse one node per position.

use crate::config::KernelConfig;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::bounds::{Real, cast};
use crate::geometry::metrics;
use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::cache::{InvalidateCache, SideKey};
use crate::topology::elem::{Elem, ElemView};
use crate::topology::elem_type::ElemType;
use crate::topology::ids::{ElemId, NodeId};
use crate::topology::node::NodeStore;
use crate::topology::refine::{embedding_matrix, refine_points};
use std::collections::HashMap;

/// Refinement weights are dyadic, so `w * 4096` is an exact integer.
const WEIGHT_SCALE: f64 = 4096.0;

/// Parent nodes with the (quantised) weights that place a refinement node.
type RefinementKey = Vec<(NodeId, i64)>;

#[derive(Clone, Debug)]
pub struct Mesh<T: Real = f64> {
    nodes: Vec<Point<T>>,
    elems: Vec<Option<Elem>>,
    refinement_nodes: HashMap<RefinementKey, NodeId>,
    config: KernelConfig,
}

impl<T: Real> Default for Mesh<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            elems: Vec::new(),
            refinement_nodes: HashMap::new(),
            config: KernelConfig::default(),
        }
    }
}

impl<T: Real> Mesh<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with the given settings.
    ///
    /// # Errors
    /// [`MeshError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: KernelConfig) -> Result<Self, MeshError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn add_node(&mut self, point: Point<T>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(point);
        id
    }

    pub fn node(&self, id: NodeId) -> Result<Point<T>, MeshError> {
        self.point(id).ok_or(MeshError::UnknownNode(id))
    }

    pub fn nodes(&self) -> &[Point<T>] {
        &self.nodes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Adds a level-0 element.
    ///
    /// # Errors
    /// - [`MeshError::NodeCountMismatch`] if `nodes` has the wrong length.
    /// - [`MeshError::UnknownNode`] if a node id is not in this mesh.
    pub fn add_elem(&mut self, elem_type: ElemType, nodes: Vec<NodeId>) -> Result<ElemId, MeshError> {
        if let Some(&bad) = nodes.iter().find(|n| n.index() >= self.nodes.len()) {
            return Err(MeshError::UnknownNode(bad));
        }
        let elem = Elem::new(elem_type, nodes)?.with_topology_cache(self.config.topology_cache);
        Ok(self.push_elem(elem))
    }

    fn push_elem(&mut self, elem: Elem) -> ElemId {
        let id = ElemId::from_index(self.elems.len());
        self.elems.push(Some(elem));
        id
    }

    pub fn elem(&self, id: ElemId) -> Result<&Elem, MeshError> {
        self.elems
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(MeshError::UnknownElem(id))
    }

    fn elem_mut(&mut self, id: ElemId) -> Result<&mut Elem, MeshError> {
        self.elems
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(MeshError::UnknownElem(id))
    }

    /// Every live element with its id, ancestors included.
    pub fn elems(&self) -> impl Iterator<Item = (ElemId, &Elem)> + '_ {
        self.elems
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (ElemId::from_index(i), e)))
    }

    pub fn elem_ids(&self) -> impl Iterator<Item = ElemId> + '_ {
        self.elems().map(|(id, _)| id)
    }

    /// Ids of elements without children.
    pub fn active_elem_ids(&self) -> impl Iterator<Item = ElemId> + '_ {
        self.elems().filter(|(_, e)| e.is_active()).map(|(id, _)| id)
    }

    pub fn n_elems(&self) -> usize {
        self.elems().count()
    }

    pub fn n_active_elems(&self) -> usize {
        self.active_elem_ids().count()
    }

    /// Replaces local node `i` of element `id`, invalidating its topology
    /// cache.
    pub fn set_elem_node(&mut self, id: ElemId, i: usize, node: NodeId) -> Result<(), MeshError> {
        if node.index() >= self.nodes.len() {
            return Err(MeshError::UnknownNode(node));
        }
        self.elem_mut(id)?.set_node(i, node)?;
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn side_key(&self, id: ElemId, s: usize) -> Result<SideKey, MeshError> {
        self.elem(id)?.side_key(s)
    }

    pub fn elem_points(&self, id: ElemId) -> Result<Vec<Point<T>>, MeshError> {
        self.elem(id)?.points(self)
    }

    pub fn volume(&self, id: ElemId) -> Result<T, MeshError> {
        self.elem(id)?.volume(self)
    }

    /// Affine check with the mesh's configured tolerance.
    pub fn has_affine_map(&self, id: ElemId) -> Result<bool, MeshError> {
        let tol = cast::<T>(self.config.affine_tolerance);
        self.elem(id)?.has_affine_map(self, tol)
    }

    /// Sum of the volumes of the active elements.
    #[cfg(not(feature = "rayon"))]
    pub fn total_volume(&self) -> Result<T, MeshError> {
        self.active_elem_ids()
            .try_fold(T::zero(), |acc, id| -> Result<T, MeshError> {
                Ok(acc + self.volume(id)?)
            })
    }

    /// Sum of the volumes of the active elements, computed in parallel.
    #[cfg(feature = "rayon")]
    pub fn total_volume(&self) -> Result<T, MeshError> {
        use rayon::prelude::*;
        let ids: Vec<ElemId> = self.active_elem_ids().collect();
        let volumes = ids
            .par_iter()
            .map(|&id| self.volume(id))
            .collect::<Result<Vec<T>, MeshError>>()?;
        Ok(volumes.into_iter().fold(T::zero(), |a, b| a + b))
    }

    /// Refines element `id` into its children and returns their ids.
    ///
    /// Child node positions come from the element type's embedding matrix.
    /// Child nodes that coincide with a parent node reuse it.
    ///
    /// # Errors
    /// - [`MeshError::AlreadyRefined`] if the element has children.
    /// - [`MeshError::RefinementUnsupported`] for types without an embedding.
    /// - With `check_geometry`, the first child that fails
    ///   [`metrics::validate_geometry`]. The mesh is unchanged on error.
    pub fn refine(&mut self, id: ElemId) -> Result<Vec<ElemId>, MeshError> {
        let parent = self.elem(id)?;
        if !parent.is_active() {
            return Err(MeshError::AlreadyRefined(id));
        }
        let elem_type = parent.elem_type();
        let level = parent.level();
        let parent_nodes = parent.nodes().to_vec();
        let m = embedding_matrix(elem_type)?;
        let child_points = self.checked_child_points(id)?;

        let mut children = Vec::with_capacity(m.n_children());
        for (c, pts) in child_points.into_iter().enumerate() {
            let nodes: Vec<NodeId> = pts
                .into_iter()
                .enumerate()
                .map(|(j, p)| match m.coincident_parent_node(c, j) {
                    Some(k) => parent_nodes[k],
                    None => self.refinement_node(&parent_nodes, m.row(c, j), p),
                })
                .collect();
            let child = Elem::from_nodes_unchecked(elem_type, nodes)
                .with_topology_cache(self.config.topology_cache)
                .with_parent(id, level + 1);
            children.push(self.push_elem(child));
        }
        log::debug!(
            "refined {elem_type:?} {id} into {} children at level {}",
            children.len(),
            level + 1
        );
        self.elem_mut(id)?.set_children(children.clone());
        self.debug_assert_invariants();
        Ok(children)
    }

    /// Child node positions of `id`, validated when `check_geometry` is set.
    fn checked_child_points(&self, id: ElemId) -> Result<Vec<Vec<Point<T>>>, MeshError> {
        let elem = self.elem(id)?;
        let elem_type = elem.elem_type();
        let child_points = refine_points(elem_type, &self.points_of(elem.nodes().iter().copied())?)?;
        if self.config.check_geometry {
            for (c, pts) in child_points.iter().enumerate() {
                if let Err(e) = metrics::validate_geometry(elem_type, pts) {
                    log::warn!("refining {id}: child {c} rejected: {e}");
                    return Err(e);
                }
            }
        }
        Ok(child_points)
    }

    /// Node placed at `point` by the weights `row` over `parent_nodes`,
    /// created on first request.
    fn refinement_node(&mut self, parent_nodes: &[NodeId], row: &[f64], point: Point<T>) -> NodeId {
        let mut key: RefinementKey = parent_nodes
            .iter()
            .zip(row)
            .filter(|(_, w)| **w != 0.0)
            .map(|(&n, &w)| (n, (w * WEIGHT_SCALE).round() as i64))
            .collect();
        key.sort_unstable();
        let nodes = &mut self.nodes;
        *self.refinement_nodes.entry(key).or_insert_with(|| {
            let id = NodeId::from_index(nodes.len());
            nodes.push(point);
            log::trace!("created refinement node {id}");
            id
        })
    }

    /// Refines every active element `levels` times; returns how many
    /// elements were refined.
    ///
    /// Each level is checked before any element of it is refined: if one
    /// element cannot be refined, that level is left untouched and the error
    /// is returned. Levels already completed are kept.
    pub fn refine_uniformly(&mut self, levels: usize) -> Result<usize, MeshError> {
        let mut refined = 0;
        for level in 0..levels {
            let active: Vec<ElemId> = self.active_elem_ids().collect();
            for &id in &active {
                let checked = if self.config.check_geometry {
                    self.checked_child_points(id).map(drop)
                } else {
                    embedding_matrix(self.elem(id)?.elem_type()).map(drop)
                };
                if let Err(e) = checked {
                    log::warn!("uniform refinement pass {level} stopped at {id}: {e}");
                    return Err(e);
                }
            }
            for id in active {
                self.refine(id)?;
                refined += 1;
            }
        }
        Ok(refined)
    }

    /// Removes the children of `id`, making it active again.
    ///
    /// Nodes created by the refinement stay in the mesh and keep their
    /// refinement keys, so refining `id` again reuses them.
    ///
    /// # Errors
    /// - [`MeshError::NotRefined`] if `id` has no children.
    /// - [`MeshError::ChildrenRefined`] if any child has children itself.
    pub fn coarsen(&mut self, id: ElemId) -> Result<(), MeshError> {
        let parent = self.elem(id)?;
        if parent.is_active() {
            return Err(MeshError::NotRefined(id));
        }
        for &c in parent.children() {
            if !self.elem(c)?.is_active() {
                return Err(MeshError::ChildrenRefined(id));
            }
        }
        let children = self.elem_mut(id)?.take_children();
        for c in &children {
            self.elems[c.index()] = None;
        }
        log::debug!("coarsened {id}: removed {} children", children.len());
        self.debug_assert_invariants();
        Ok(())
    }

    /// Drops every element's cached topology.
    pub fn clear_topology_caches(&mut self) {
        for e in self.elems.iter_mut().flatten() {
            e.invalidate_cache();
        }
        log::trace!("cleared element topology caches");
    }
}

impl<T: Real> NodeStore<T> for Mesh<T> {
    #[inline]
    fn point(&self, id: NodeId) -> Option<Point<T>> {
        self.nodes.get(id.index()).copied()
    }
}

impl<T: Real> DebugInvariants for Mesh<T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (id, e) in self.elems() {
            if e.nodes().len() != e.n_nodes() {
                return Err(MeshError::NodeCountMismatch {
                    elem_type: e.elem_type(),
                    expected: e.n_nodes(),
                    found: e.nodes().len(),
                });
            }
            if let Some(&bad) = e.nodes().iter().find(|n| n.index() >= self.nodes.len()) {
                return Err(MeshError::UnknownNode(bad));
            }
            for &c in e.children() {
                let child = self.elem(c)?;
                if child.parent() != Some(id) || child.level() != e.level() + 1 {
                    return Err(MeshError::BrokenHierarchy {
                        parent: id,
                        child: c,
                    });
                }
            }
            if let Some(p) = e.parent() {
                if !self.elem(p)?.children().contains(&id) {
                    return Err(MeshError::BrokenHierarchy { parent: p, child: id });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> (Mesh<f64>, ElemId) {
        let mut mesh = Mesh::new();
        let ids: Vec<NodeId> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .map(|&[x, y]| mesh.add_node(Point::new(x, y, 0.0)))
            .collect();
        let e = mesh.add_elem(ElemType::Quad4, ids).unwrap();
        (mesh, e)
    }

    #[test]
    fn refine_creates_shared_nodes() {
        let (mut mesh, e) = unit_square();
        let children = mesh.refine(e).unwrap();
        assert_eq!(children.len(), 4);
        // 4 corners + 4 edge midpoints + center
        assert_eq!(mesh.n_nodes(), 9);
        assert_eq!(mesh.n_active_elems(), 4);
        assert_eq!(mesh.elem(children[2]).unwrap().level(), 1);
        assert_relative_eq!(mesh.total_volume().unwrap(), 1.0, epsilon = 1e-12);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn refine_twice_is_an_error() {
        let (mut mesh, e) = unit_square();
        mesh.refine(e).unwrap();
        assert_eq!(mesh.refine(e), Err(MeshError::AlreadyRefined(e)));
    }

    #[test]
    fn coarsen_restores_the_parent_and_reuses_nodes() {
        let (mut mesh, e) = unit_square();
        let children = mesh.refine(e).unwrap();
        assert_eq!(mesh.coarsen(children[0]), Err(MeshError::NotRefined(children[0])));
        mesh.refine(children[0]).unwrap();
        assert_eq!(mesh.coarsen(e), Err(MeshError::ChildrenRefined(e)));
        mesh.coarsen(children[0]).unwrap();
        mesh.coarsen(e).unwrap();
        assert!(mesh.elem(e).unwrap().is_active());
        assert_eq!(mesh.elem(children[1]).unwrap_err(), MeshError::UnknownElem(children[1]));
        let n = mesh.n_nodes();
        mesh.refine(e).unwrap();
        assert_eq!(mesh.n_nodes(), n);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn set_elem_node_checks_ids() {
        let (mut mesh, e) = unit_square();
        let extra = mesh.add_node(Point::new(2.0, 2.0, 0.0));
        mesh.set_elem_node(e, 2, extra).unwrap();
        assert_eq!(mesh.elem(e).unwrap().nodes()[2], extra);
        assert_eq!(
            mesh.set_elem_node(e, 2, NodeId::new(99)),
            Err(MeshError::UnknownNode(NodeId::new(99)))
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = KernelConfig {
            affine_tolerance: f64::NAN,
            ..KernelConfig::default()
        };
        assert!(matches!(Mesh::<f64>::with_config(cfg), Err(MeshError::InvalidConfig(_))));
    }
}
