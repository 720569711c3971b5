use elem_kernel::io::vtk::vtk_cell_type;
use elem_kernel::prelude::*;

fn elem(t: ElemType) -> Elem {
    Elem::new(t, (0..t.n_nodes() as u32).map(|i| NodeId::new(10 + i)).collect()).unwrap()
}

#[test]
fn tecplot_cells_cover_every_sub_element() {
    for t in ElemType::ALL {
        let cell_len = match t.dim() {
            0 => 1,
            1 => 2,
            2 => 4,
            _ => 8,
        };
        for sc in 0..t.n_sub_elements() {
            let conn = local_connectivity(t, sc, IoPackage::Tecplot).unwrap();
            assert_eq!(conn.len(), cell_len, "{t:?} sub-element {sc}");
            assert!(conn.iter().all(|&n| n < t.n_nodes()));
        }
        assert!(matches!(
            local_connectivity(t, t.n_sub_elements(), IoPackage::Tecplot),
            Err(MeshError::IndexOutOfRange { what: "sub-element", .. })
        ));
    }
}

#[test]
fn quad9_splits_into_four_bilinear_cells() {
    let e = elem(ElemType::Quad9);
    assert_eq!(e.n_sub_elements(), 4);
    let cells: Vec<Vec<u32>> = (0..4)
        .map(|sc| {
            e.connectivity(sc, IoPackage::Tecplot)
                .unwrap()
                .into_iter()
                .map(u32::from)
                .collect()
        })
        .collect();
    assert_eq!(
        cells,
        [[10, 14, 18, 17], [14, 11, 15, 18], [17, 18, 16, 13], [18, 15, 12, 16]]
    );
}

#[test]
fn vtk_orders_are_permutations() {
    for t in ElemType::ALL.into_iter().filter(|&t| vtk_cell_type(t).is_some()) {
        let e = elem(t);
        let mut conn = e.connectivity(0, IoPackage::Vtk).unwrap();
        conn.sort_unstable();
        assert_eq!(conn, e.node_ids(), "{t:?}");
        assert!(e.connectivity(1, IoPackage::Vtk).is_err());
    }
}

#[test]
fn vtk_prism15_and_hex20() {
    assert_eq!(
        local_connectivity(ElemType::Prism15, 0, IoPackage::Vtk).unwrap(),
        [0, 2, 1, 3, 5, 4, 8, 7, 6, 14, 13, 12, 9, 11, 10]
    );
    let hex20 = local_connectivity(ElemType::Hex20, 0, IoPackage::Vtk).unwrap();
    assert_eq!(&hex20[12..], &[16, 17, 18, 19, 12, 13, 14, 15]);
    assert_eq!(vtk_cell_type(ElemType::Hex27), Some(29));
}

#[test]
fn pyramid14_has_no_vtk_cell() {
    let e = elem(ElemType::Pyramid14);
    assert_eq!(
        e.connectivity(0, IoPackage::Vtk),
        Err(MeshError::UnsupportedExport {
            package: IoPackage::Vtk,
            elem_type: ElemType::Pyramid14
        })
    );
    assert_eq!(e.connectivity(0, IoPackage::Tecplot).unwrap().len(), 8);
}
