//! Tecplot connectivity.
//!
//! Tecplot zones hold a single linear cell kind per dimension (line,
//! quadrilateral, brick), so triangles, tetrahedra, prisms and pyramids are
//! written as collapsed quads and bricks by repeating vertices. Types whose
//! refinement children are made entirely of parent nodes are split into
//! those children, giving a piecewise-linear picture of the curved element.

use crate::io::{IoPackage, check_sub_element};
use crate::mesh_error::MeshError;
use crate::topology::elem_type::{ElemType, Shape};
use crate::topology::refine;

/// Positions in the vertex list that fill the package cell for each shape.
fn padding(shape: Shape) -> &'static [usize] {
    match shape {
        Shape::Point => &[0],
        Shape::Segment => &[0, 1],
        Shape::Triangle => &[0, 1, 2, 2],
        Shape::Quadrilateral => &[0, 1, 2, 3],
        Shape::Tetrahedron => &[0, 1, 2, 2, 3, 3, 3, 3],
        Shape::Hexahedron => &[0, 1, 2, 3, 4, 5, 6, 7],
        Shape::Prism => &[0, 1, 2, 2, 3, 4, 5, 5],
        Shape::Pyramid => &[0, 1, 2, 3, 4, 4, 4, 4],
    }
}

pub fn connectivity(t: ElemType, sc: usize) -> Result<Vec<usize>, MeshError> {
    check_sub_element(t, sc, t.n_sub_elements())?;
    let vertices = if t.is_lagrange_complete() {
        refine::child_vertex_nodes(t, sc)?.ok_or(MeshError::UnsupportedExport {
            package: IoPackage::Tecplot,
            elem_type: t,
        })?
    } else {
        (0..t.n_vertices()).collect()
    };
    Ok(padding(t.shape()).iter().map(|&i| vertices[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_cells() {
        assert_eq!(connectivity(ElemType::Prism15, 0).unwrap(), [0, 1, 2, 2, 3, 4, 5, 5]);
        assert_eq!(connectivity(ElemType::Tet4, 0).unwrap(), [0, 1, 2, 2, 3, 3, 3, 3]);
        assert_eq!(connectivity(ElemType::Pyramid14, 0).unwrap(), [0, 1, 2, 3, 4, 4, 4, 4]);
        assert!(matches!(
            connectivity(ElemType::Prism15, 1),
            Err(MeshError::IndexOutOfRange { what: "sub-element", index: 1, len: 1, .. })
        ));
    }

    #[test]
    fn lagrange_complete_types_split_into_children() {
        assert_eq!(ElemType::Quad9.n_sub_elements(), 4);
        assert_eq!(connectivity(ElemType::Quad9, 0).unwrap(), [0, 4, 8, 7]);
        assert_eq!(connectivity(ElemType::Tri6, 3).unwrap(), [3, 4, 5, 5]);
        assert_eq!(connectivity(ElemType::Edge3, 1).unwrap(), [2, 1]);
        assert_eq!(
            connectivity(ElemType::Prism18, 0).unwrap(),
            [0, 6, 8, 8, 9, 15, 17, 17]
        );
        assert_eq!(
            connectivity(ElemType::Hex27, 7).unwrap(),
            [26, 22, 14, 23, 25, 17, 6, 18]
        );
    }
}
