//! MeshError: Unified error type for elem-kernel public APIs
//!
//! Bounds violations, geometric-validity failures and unsupported capabilities
//! are all surfaced through this type so callers decide how to react. The raw
//! registry tables are the one exception: they are trusted internal data and
//! panic on out-of-range keys.

use crate::io::IoPackage;
use crate::topology::elem_type::ElemType;
use crate::topology::ids::{ElemId, NodeId};
use thiserror::Error;

/// Unified error type for element and mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A side, edge, node, child or sub-element index exceeded its declared count.
    #[error("{what} index {index} out of range for {elem_type:?} (valid: 0..{len})")]
    IndexOutOfRange {
        elem_type: ElemType,
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// A node array did not match the element type's node count.
    #[error("{elem_type:?} needs {expected} nodes, got {found}")]
    NodeCountMismatch {
        elem_type: ElemType,
        expected: usize,
        found: usize,
    },
    /// A second-order query was made for a vertex (or a first-order type).
    #[error("node {node} of {elem_type:?} is not a second-order node")]
    NotSecondOrderNode { elem_type: ElemType, node: usize },
    /// A node id was not present in the node store.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// An element id was not present (or was removed) in the mesh.
    #[error("unknown element {0}")]
    UnknownElem(ElemId),
    /// The element measure is zero within tolerance.
    #[error("degenerate {elem_type:?}: measure {measure:e}")]
    DegenerateElement { elem_type: ElemType, measure: f64 },
    /// The element volume is negative (node ordering inverted).
    #[error("inverted {elem_type:?}: signed volume {volume:e}")]
    InvertedElement { elem_type: ElemType, volume: f64 },
    /// No embedding matrix is registered for this type.
    #[error("refinement is not supported for {0:?}")]
    RefinementUnsupported(ElemType),
    /// The export package has no ordering for this type.
    #[error("{package:?} export has no cell type for {elem_type:?}")]
    UnsupportedExport {
        package: IoPackage,
        elem_type: ElemType,
    },
    /// `refine` was called on an element that already has children.
    #[error("element {0} is already refined")]
    AlreadyRefined(ElemId),
    /// `coarsen` was called on an active element.
    #[error("element {0} has no children to coarsen")]
    NotRefined(ElemId),
    /// `coarsen` was called while some children are themselves refined.
    #[error("element {0} has refined children; coarsen them first")]
    ChildrenRefined(ElemId),
    /// Parent and child links of the refinement hierarchy disagree.
    #[error("broken refinement link between parent {parent} and child {child}")]
    BrokenHierarchy { parent: ElemId, child: ElemId },
    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
