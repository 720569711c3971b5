//! Cache invalidation utilities and the per-element topology cache.

use crate::topology::ids::NodeId;
use once_cell::sync::OnceCell;

/// Anything that caches derived topology (side keys, boundary maps, …)
/// should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

// Blanket impl for Box<T>
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

/// Orientation-free identity of a side: its sorted vertex ids.
///
/// Two elements share a side exactly when their side keys are equal, whatever
/// the order or polynomial degree of the side.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SideKey(Vec<NodeId>);

impl SideKey {
    pub fn new(mut vertices: Vec<NodeId>) -> Self {
        vertices.sort_unstable();
        SideKey(vertices)
    }

    pub fn vertices(&self) -> &[NodeId] {
        &self.0
    }
}

/// Lazily computed side keys of one element.
///
/// Filled on first use and shared by later queries; any change to the
/// element's nodes must go through [`InvalidateCache::invalidate_cache`].
#[derive(Clone, Debug, Default)]
pub struct TopologyCache {
    side_keys: OnceCell<Vec<SideKey>>,
}

impl TopologyCache {
    pub fn side_keys(&self, compute: impl FnOnce() -> Vec<SideKey>) -> &[SideKey] {
        self.side_keys.get_or_init(|| {
            log::trace!("filling side-key cache");
            compute()
        })
    }

    pub fn is_populated(&self) -> bool {
        self.side_keys.get().is_some()
    }
}

impl InvalidateCache for TopologyCache {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.side_keys.take();
    }
}
