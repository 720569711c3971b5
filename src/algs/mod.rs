//! Mesh-level algorithms built on the element kernel.

pub mod boundary;

pub use boundary::{BoundaryId, BoundaryInfo, SideSelector, assign_boundary_ids, boundary_sides};
