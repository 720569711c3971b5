//! Legacy VTK cell types and node orders.
//!
//! VTK numbers the mid-edge nodes of hexahedra and prisms by edge groups
//! (bottom, top, vertical) and reverses the prism's winding, so those types
//! need an explicit permutation. Every other type maps one-to-one.

use crate::io::{IoPackage, check_sub_element};
use crate::mesh_error::MeshError;
use crate::topology::elem_type::ElemType;

const HEX20_ORDER: [usize; 20] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 12, 13, 14, 15];

const HEX27_ORDER: [usize; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 12, 13, 14, 15, 24, 22, 21, 23, 20, 25, 26,
];

const PRISM6_ORDER: [usize; 6] = [0, 2, 1, 3, 5, 4];

const PRISM15_ORDER: [usize; 15] = [0, 2, 1, 3, 5, 4, 8, 7, 6, 14, 13, 12, 9, 11, 10];

const PRISM18_ORDER: [usize; 18] = [0, 2, 1, 3, 5, 4, 8, 7, 6, 14, 13, 12, 9, 11, 10, 17, 16, 15];

/// VTK cell type id, or `None` if VTK has no matching cell.
pub fn vtk_cell_type(t: ElemType) -> Option<u8> {
    match t {
        ElemType::NodeElem => Some(1),
        ElemType::Edge2 => Some(3),
        ElemType::Edge3 => Some(21),
        ElemType::Tri3 => Some(5),
        ElemType::Tri6 => Some(22),
        ElemType::Quad4 => Some(9),
        ElemType::Quad8 => Some(23),
        ElemType::Quad9 => Some(28),
        ElemType::Tet4 => Some(10),
        ElemType::Tet10 => Some(24),
        ElemType::Hex8 => Some(12),
        ElemType::Hex20 => Some(25),
        ElemType::Hex27 => Some(29),
        ElemType::Prism6 => Some(13),
        ElemType::Prism15 => Some(26),
        ElemType::Prism18 => Some(32),
        ElemType::Pyramid5 => Some(14),
        ElemType::Pyramid13 => Some(27),
        ElemType::Pyramid14 => None,
    }
}

pub fn connectivity(t: ElemType, sc: usize) -> Result<Vec<usize>, MeshError> {
    check_sub_element(t, sc, 1)?;
    if vtk_cell_type(t).is_none() {
        return Err(MeshError::UnsupportedExport {
            package: IoPackage::Vtk,
            elem_type: t,
        });
    }
    Ok(match t {
        ElemType::Hex20 => HEX20_ORDER.to_vec(),
        ElemType::Hex27 => HEX27_ORDER.to_vec(),
        ElemType::Prism6 => PRISM6_ORDER.to_vec(),
        ElemType::Prism15 => PRISM15_ORDER.to_vec(),
        ElemType::Prism18 => PRISM18_ORDER.to_vec(),
        _ => (0..t.n_nodes()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_are_permutations() {
        for t in ElemType::ALL.into_iter().filter(|&t| vtk_cell_type(t).is_some()) {
            let mut order = connectivity(t, 0).unwrap();
            order.sort_unstable();
            assert_eq!(order, (0..t.n_nodes()).collect::<Vec<_>>(), "{t:?}");
        }
    }

    #[test]
    fn prism15_reverses_winding() {
        let order = connectivity(ElemType::Prism15, 0).unwrap();
        assert_eq!(&order[..6], &[0, 2, 1, 3, 5, 4]);
        assert_eq!(vtk_cell_type(ElemType::Prism15), Some(26));
    }

    #[test]
    fn unsupported_and_out_of_range() {
        assert_eq!(
            connectivity(ElemType::Pyramid14, 0),
            Err(MeshError::UnsupportedExport {
                package: IoPackage::Vtk,
                elem_type: ElemType::Pyramid14
            })
        );
        assert!(connectivity(ElemType::Hex8, 1).is_err());
    }
}
