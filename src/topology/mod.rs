//! Element topology: types, the static registry, checked queries, element
//! views, side/edge builders and refinement templates.
//!
//! - [`elem_type::ElemType`] names a supported element type and carries its
//!   counts; [`registry`] holds the per-type node tables.
//! - [`elem::ElemView`] is the query surface shared by stored elements
//!   ([`elem::Elem`]) and side/edge proxies ([`side::ElemProxy`]).
//! - [`refine`] derives child geometry and topology from embedding matrices.

pub mod cache;
pub mod elem;
pub mod elem_type;
pub mod ids;
pub mod node;
mod queries;
pub mod refine;
pub mod registry;
pub mod side;

pub use cache::{InvalidateCache, SideKey};
pub use elem::{Elem, ElemView};
pub use elem_type::{ElemType, NodeRole, Order, Shape};
pub use ids::{ElemId, NodeId};
pub use node::NodeStore;
pub use side::{BoundaryElem, ElemProxy};
