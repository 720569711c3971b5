//! Nodes and node storage.
//!
//! Elements hold [`NodeId`]s only; positions are resolved through a
//! [`NodeStore`], which can be a plain slice of points or a
//! [`Mesh`](crate::mesh::Mesh).

use crate::geometry::bounds::Real;
use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::ids::NodeId;

/// Read access to node positions by id.
pub trait NodeStore<T: Real> {
    fn point(&self, id: NodeId) -> Option<Point<T>>;

    /// Positions of `ids`, in order.
    ///
    /// # Errors
    /// [`MeshError::UnknownNode`] for the first id the store does not hold.
    fn points_of<I>(&self, ids: I) -> Result<Vec<Point<T>>, MeshError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter()
            .map(|id| self.point(id).ok_or(MeshError::UnknownNode(id)))
            .collect()
    }
}

/// A slice is a store indexed by `NodeId::index`.
impl<T: Real> NodeStore<T> for [Point<T>] {
    #[inline]
    fn point(&self, id: NodeId) -> Option<Point<T>> {
        self.get(id.index()).copied()
    }
}

impl<T: Real> NodeStore<T> for Vec<Point<T>> {
    #[inline]
    fn point(&self, id: NodeId) -> Option<Point<T>> {
        self.as_slice().point(id)
    }
}
