//! Boundary side detection and boundary-id assignment.
//!
//! A side of an active element is on the boundary when no other element
//! shares it, either directly or, for sides of refined children, through the
//! ancestor side it lies on. Boundary sides can then be tagged with ids by
//! position and outward normal.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;

use crate::geometry::bounds::Real;
use crate::geometry::metrics;
use crate::geometry::point::Point;
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cache::SideKey;
use crate::topology::elem::{Elem, ElemView};
use crate::topology::ids::ElemId;
use crate::topology::node::NodeStore;
use crate::topology::refine::child_side_on_parent_side;

/// Identifier attached to boundary sides.
pub type BoundaryId = i16;

/// Active `(element, side)` pairs with no neighbour, in element order.
pub fn boundary_sides<T: Real>(mesh: &Mesh<T>) -> Result<Vec<(ElemId, usize)>, MeshError> {
    // Ancestors are included so that a child side can find a coarse
    // neighbour through the parent side it lies on.
    let owners: HashMap<SideKey, Vec<ElemId>> = mesh
        .elems()
        .flat_map(|(id, e)| e.side_keys().into_owned().into_iter().map(move |k| (k, id)))
        .into_group_map();
    // An element and its own ancestor can carry the same key (segment end
    // points), which does not make the side shared.
    let shared = |key: &SideKey| {
        owners.get(key).is_some_and(|ids| {
            ids.iter()
                .tuple_combinations()
                .any(|(&a, &b)| !is_ancestor(mesh, a, b) && !is_ancestor(mesh, b, a))
        })
    };

    let mut out = Vec::new();
    for id in mesh.active_elem_ids() {
        let elem = mesh.elem(id)?;
        for s in 0..elem.n_sides() {
            if !is_shared_through_ancestors(mesh, id, elem, s, &shared)? {
                out.push((id, s));
            }
        }
    }
    Ok(out)
}

/// Whether `ancestor` lies on the parent chain of `id`.
fn is_ancestor<T: Real>(mesh: &Mesh<T>, ancestor: ElemId, id: ElemId) -> bool {
    let mut cur = mesh.elem(id).ok().and_then(|e| e.parent());
    while let Some(p) = cur {
        if p == ancestor {
            return true;
        }
        cur = mesh.elem(p).ok().and_then(|e| e.parent());
    }
    false
}

fn is_shared_through_ancestors<T: Real>(
    mesh: &Mesh<T>,
    id: ElemId,
    elem: &Elem,
    side: usize,
    shared: &impl Fn(&SideKey) -> bool,
) -> Result<bool, MeshError> {
    let (mut id, mut elem, mut side) = (id, elem, side);
    loop {
        if shared(&elem.side_key(side)?) {
            return Ok(true);
        }
        let Some(parent_id) = elem.parent() else {
            return Ok(false);
        };
        let parent = mesh.elem(parent_id)?;
        let Some(c) = parent.children().iter().position(|&ch| ch == id) else {
            return Err(MeshError::BrokenHierarchy {
                parent: parent_id,
                child: id,
            });
        };
        match child_side_on_parent_side(parent.elem_type(), c, side)? {
            Some(ps) => {
                id = parent_id;
                elem = parent;
                side = ps;
            }
            // A side inside the parent is always shared with a sibling.
            None => return Ok(true),
        }
    }
}

/// Outward unit normal of side `s`, evaluated at the side's reference
/// centroid.
pub fn outward_normal<T, S>(elem: &Elem, s: usize, store: &S) -> Result<Point<T>, MeshError>
where
    T: Real,
    S: NodeStore<T> + ?Sized,
{
    let pts = elem.points(store)?;
    Ok(metrics::side_point_and_normal(elem.elem_type(), &pts, s)?.1)
}

/// Physical point at the reference centroid of side `s`.
pub fn side_point<T, S>(elem: &Elem, s: usize, store: &S) -> Result<Point<T>, MeshError>
where
    T: Real,
    S: NodeStore<T> + ?Sized,
{
    let pts = elem.points(store)?;
    Ok(metrics::side_point_and_normal(elem.elem_type(), &pts, s)?.0)
}

/// Boundary ids of element sides. A side carries at most one id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryInfo {
    sides: BTreeMap<(ElemId, usize), BoundaryId>,
}

impl BoundaryInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags `(elem, side)` with `id`, replacing any previous id.
    pub fn add_side(&mut self, elem: ElemId, side: usize, id: BoundaryId) {
        self.sides.insert((elem, side), id);
    }

    /// Removes the tag of `(elem, side)`, returning it.
    pub fn remove_side(&mut self, elem: ElemId, side: usize) -> Option<BoundaryId> {
        self.sides.remove(&(elem, side))
    }

    pub fn boundary_id(&self, elem: ElemId, side: usize) -> Option<BoundaryId> {
        self.sides.get(&(elem, side)).copied()
    }

    /// Every tagged side as `(elem, side, id)`, ordered by element and side.
    pub fn side_list(&self) -> Vec<(ElemId, usize, BoundaryId)> {
        self.sides.iter().map(|(&(e, s), &id)| (e, s, id)).collect()
    }

    /// The distinct ids in use.
    pub fn boundary_ids(&self) -> BTreeSet<BoundaryId> {
        self.sides.values().copied().collect()
    }

    pub fn n_sides(&self) -> usize {
        self.sides.len()
    }
}

/// Selection criteria for [`assign_boundary_ids`].
///
/// Bounds are strict and open: a side is selected when every component of
/// its point lies strictly between `min` and `max`, and likewise for its
/// outward normal. The defaults are unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideSelector<T> {
    pub min: Point<T>,
    pub max: Point<T>,
    pub normal_min: Point<T>,
    pub normal_max: Point<T>,
    /// `Some(Some(id))` selects only sides tagged `id`; `Some(None)` only
    /// untagged sides; `None` ignores the current tag.
    pub old_id: Option<Option<BoundaryId>>,
}

impl<T: Real> Default for SideSelector<T> {
    fn default() -> Self {
        let lo = Point([T::neg_infinity(); 3]);
        let hi = Point([T::infinity(); 3]);
        Self {
            min: lo,
            max: hi,
            normal_min: lo,
            normal_max: hi,
            old_id: None,
        }
    }
}

impl<T: Real> SideSelector<T> {
    pub fn with_bounds(mut self, min: Point<T>, max: Point<T>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_normal_bounds(mut self, min: Point<T>, max: Point<T>) -> Self {
        self.normal_min = min;
        self.normal_max = max;
        self
    }

    pub fn with_old_id(mut self, old_id: Option<BoundaryId>) -> Self {
        self.old_id = Some(old_id);
        self
    }

    fn inside(p: &Point<T>, lo: &Point<T>, hi: &Point<T>) -> bool {
        (0..3).all(|d| p[d] > lo[d] && p[d] < hi[d])
    }

    pub fn matches(&self, point: &Point<T>, normal: &Point<T>, current: Option<BoundaryId>) -> bool {
        if let Some(wanted) = self.old_id {
            if wanted != current {
                return false;
            }
        }
        Self::inside(point, &self.min, &self.max)
            && Self::inside(normal, &self.normal_min, &self.normal_max)
    }
}

/// Tags every boundary side accepted by `selector` with `new_id`, replacing
/// its previous id, and returns how many sides were tagged.
pub fn assign_boundary_ids<T: Real>(
    mesh: &Mesh<T>,
    selector: &SideSelector<T>,
    new_id: BoundaryId,
    info: &mut BoundaryInfo,
) -> Result<usize, MeshError> {
    let mut tagged = 0;
    for (id, s) in boundary_sides(mesh)? {
        let elem = mesh.elem(id)?;
        let pts = elem.points(mesh)?;
        let (point, normal) = metrics::side_point_and_normal(elem.elem_type(), &pts, s)?;
        if selector.matches(&point, &normal, info.boundary_id(id, s)) {
            info.remove_side(id, s);
            info.add_side(id, s, new_id);
            tagged += 1;
        }
    }
    if tagged == 0 {
        log::warn!("no boundary side matched the selection for id {new_id}");
    } else {
        log::debug!("tagged {tagged} boundary sides with id {new_id}");
    }
    Ok(tagged)
}
