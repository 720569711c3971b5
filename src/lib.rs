#![cfg_attr(docsrs, feature(doc_cfg))]
//! # elem-kernel
//!
//! elem-kernel is the element layer of an unstructured finite-element mesh
//! library. It describes nineteen element types (points, lines, triangles,
//! quadrilaterals, tetrahedra, hexahedra, prisms and pyramids at first and
//! second order) through static topology tables, and builds everything else
//! on top of them.
//!
//! ## Features
//! - Checked topology predicates: node roles, side and edge membership,
//!   second-order adjacency
//! - Side and edge elements, either as zero-copy proxies into the parent's
//!   node list or as detached copies
//! - Geometric map, signed volume, affine detection and outward normals for
//!   curved and straight-sided elements
//! - Embedding matrices for isotropic refinement, prolongation of nodal data
//!   (points, real or complex scalars) and a hierarchical [`mesh::Mesh`]
//! - Boundary detection and boundary-id assignment
//! - Export connectivity for Tecplot and VTK
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! elem-kernel = "0.1"
//! # Optional features:
//! # features = ["rayon", "strict-invariants"]
//! ```
//!
//! ```
//! use elem_kernel::prelude::*;
//!
//! let mut mesh = Mesh::<f64>::new();
//! let n: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
//!     .iter()
//!     .map(|&[x, y]| mesh.add_node(Point::new(x, y, 0.0)))
//!     .collect();
//! let quad = mesh.add_elem(ElemType::Quad4, n)?;
//! mesh.refine(quad)?;
//! assert_eq!(mesh.n_active_elems(), 4);
//! assert!((mesh.total_volume()? - 1.0).abs() < 1e-12);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Errors
//! Every public operation that takes an index or geometry returns
//! `Result<_, MeshError>`. Only the raw [`topology::registry`] tables panic,
//! and only on indices that the checked queries reject first.

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{
        BoundaryId, BoundaryInfo, SideSelector, assign_boundary_ids, boundary_sides,
    };
    pub use crate::config::KernelConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::bounds::{FieldValue, Real};
    pub use crate::geometry::point::Point;
    pub use crate::io::{IoPackage, local_connectivity};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::elem::{Elem, ElemView};
    pub use crate::topology::elem_type::{ElemType, NodeRole};
    pub use crate::topology::ids::{ElemId, NodeId};
    pub use crate::topology::node::NodeStore;
    pub use crate::topology::refine::{EmbeddingMatrix, embedding_matrix, prolong, prolong_all};
    pub use crate::topology::side::{BoundaryElem, ElemProxy};
}
