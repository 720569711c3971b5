//! Geometry of the element map: points, shape bases, quadrature and the
//! metrics built on them.

pub mod bounds;
pub mod metrics;
pub mod point;
pub mod quadrature;
pub mod reference;
