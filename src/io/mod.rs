//! Export connectivity: translating local node order into the cell
//! conventions of external visualization packages.
//!
//! Only the node sequences are produced here; writing files is left to the
//! caller.

pub mod tecplot;
pub mod vtk;

use crate::mesh_error::MeshError;
use crate::topology::elem_type::ElemType;

/// External package whose cell conventions [`local_connectivity`] targets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum IoPackage {
    /// Linear bricks/quads/lines with repeated nodes for collapsed shapes,
    /// one per sub-element.
    Tecplot,
    /// Legacy VTK cells, one per element, including quadratic cell types.
    Vtk,
}

/// Local node indices of sub-element `sc` of a `t` element, ordered for
/// `iop`.
///
/// # Errors
/// - [`MeshError::IndexOutOfRange`] if `sc` exceeds the number of
///   sub-elements the package uses for `t`.
/// - [`MeshError::UnsupportedExport`] if the package has no cell for `t`.
pub fn local_connectivity(t: ElemType, sc: usize, iop: IoPackage) -> Result<Vec<usize>, MeshError> {
    match iop {
        IoPackage::Tecplot => tecplot::connectivity(t, sc),
        IoPackage::Vtk => vtk::connectivity(t, sc),
    }
}

pub(crate) fn check_sub_element(t: ElemType, sc: usize, len: usize) -> Result<(), MeshError> {
    if sc < len {
        Ok(())
    } else {
        Err(MeshError::IndexOutOfRange {
            elem_type: t,
            what: "sub-element",
            index: sc,
            len,
        })
    }
}
