use approx::assert_relative_eq;
use elem_kernel::geometry::metrics;
use elem_kernel::prelude::*;
use elem_kernel::topology::refine::{child_side_on_parent_side, refine_points};
use elem_kernel::topology::registry::reference_nodes;
use num_complex::Complex64;

fn refinable() -> impl Iterator<Item = ElemType> {
    ElemType::ALL.into_iter().filter(|t| t.supports_refinement())
}

/// Reference nodes pushed through a fixed, orientation-preserving affine map.
fn skewed_nodes(t: ElemType) -> Vec<Point<f64>> {
    reference_nodes(t)
        .iter()
        .map(|&[x, y, z]| {
            Point::new(
                1.5 * x + 0.25 * y + 0.1 * z + 3.0,
                0.2 * x + 1.1 * y - 0.3 * z - 1.0,
                0.1 * x + 0.05 * y + 0.9 * z + 0.5,
            )
        })
        .collect()
}

fn single_elem_mesh(t: ElemType, points: &[Point<f64>]) -> (Mesh<f64>, ElemId) {
    let mut mesh = Mesh::new();
    let ids: Vec<NodeId> = points.iter().map(|&p| mesh.add_node(p)).collect();
    let id = mesh.add_elem(t, ids).unwrap();
    (mesh, id)
}

#[test]
fn embedding_rows_sum_to_one() {
    for t in refinable() {
        let m = embedding_matrix(t).unwrap();
        assert_eq!(m.n_nodes(), t.n_nodes());
        assert_eq!(Some(m.n_children()), t.n_children());
        for c in 0..m.n_children() {
            for j in 0..m.n_nodes() {
                let sum: f64 = m.row(c, j).iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn pyramids_and_points_cannot_refine() {
    for t in [ElemType::NodeElem, ElemType::Pyramid5, ElemType::Pyramid13, ElemType::Pyramid14] {
        assert_eq!(embedding_matrix(t), Err(MeshError::RefinementUnsupported(t)));
        let points = vec![Point::new(0.0, 0.0, 0.0); t.n_nodes()];
        assert!(refine_points(t, &points).is_err());
    }
    let (mut mesh, id) = single_elem_mesh(ElemType::Pyramid5, &skewed_nodes(ElemType::Pyramid5));
    assert_eq!(mesh.refine(id), Err(MeshError::RefinementUnsupported(ElemType::Pyramid5)));
    assert_eq!(mesh.n_elems(), 1);
}

#[test]
fn refinement_conserves_volume() {
    for t in refinable() {
        let points = skewed_nodes(t);
        let parent = metrics::volume(t, &points).unwrap();
        let (mut mesh, _) = single_elem_mesh(t, &points);
        mesh.refine_uniformly(1).unwrap();
        assert_eq!(Some(mesh.n_active_elems()), t.n_children());
        assert_relative_eq!(mesh.total_volume().unwrap(), parent, max_relative = 1e-10);
    }
}

#[test]
fn two_levels_compose() {
    for t in [ElemType::Tri6, ElemType::Quad9, ElemType::Tet4, ElemType::Hex8, ElemType::Prism6] {
        let points = skewed_nodes(t);
        let parent = metrics::volume(t, &points).unwrap();
        let (mut mesh, root) = single_elem_mesh(t, &points);
        let n = t.n_children().unwrap();
        assert_eq!(mesh.refine_uniformly(2).unwrap(), 1 + n);
        assert_eq!(mesh.n_active_elems(), n * n);
        assert_relative_eq!(mesh.total_volume().unwrap(), parent, max_relative = 1e-10);

        // a grandchild's nodes are the prolongation of its parent's
        let child = mesh.elem(root).unwrap().children()[1];
        let grandchild = mesh.elem(child).unwrap().children()[2];
        let expected = prolong::<f64, Point<f64>>(t, 2, &mesh.elem_points(child).unwrap()).unwrap();
        for (p, q) in mesh.elem_points(grandchild).unwrap().iter().zip(&expected) {
            assert!(p.abs_diff_le(q, 1e-12));
        }
        mesh.validate_invariants().unwrap();
    }
}

#[test]
fn curved_quadratic_elements_keep_their_area() {
    // bulge the edge 0-1 midpoint outwards
    let mut tri = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.5, -0.15, 0.0),
        Point::new(0.5, 0.5, 0.0),
        Point::new(0.0, 0.5, 0.0),
    ];
    let area = metrics::volume(ElemType::Tri6, &tri).unwrap();
    assert!(area > 0.5);
    let (mut mesh, _) = single_elem_mesh(ElemType::Tri6, &tri);
    mesh.refine_uniformly(2).unwrap();
    assert_relative_eq!(mesh.total_volume().unwrap(), area, max_relative = 1e-10);

    tri[3] = Point::new(0.5, 0.0, 0.0);
    assert_relative_eq!(metrics::volume(ElemType::Tri6, &tri).unwrap(), 0.5, epsilon = 1e-12);
}

#[test]
fn refinement_shares_nodes() {
    for (t, expected) in [
        (ElemType::Quad4, 9),
        (ElemType::Quad9, 25),
        (ElemType::Tri6, 15),
        (ElemType::Tet10, 35),
        (ElemType::Hex8, 27),
        (ElemType::Hex27, 125),
    ] {
        let (mut mesh, _) = single_elem_mesh(t, &skewed_nodes(t));
        mesh.refine_uniformly(1).unwrap();
        assert_eq!(mesh.n_nodes(), expected, "{t:?}");
    }
}

#[test]
fn neighbours_share_midside_nodes() {
    let mut mesh = Mesh::<f64>::new();
    let n: Vec<NodeId> = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]
        .iter()
        .map(|&[x, y]| mesh.add_node(Point::new(x, y, 0.0)))
        .collect();
    let a = mesh.add_elem(ElemType::Quad4, vec![n[0], n[1], n[4], n[3]]).unwrap();
    let b = mesh.add_elem(ElemType::Quad4, vec![n[1], n[2], n[5], n[4]]).unwrap();
    mesh.refine(a).unwrap();
    mesh.refine(b).unwrap();
    assert_eq!(mesh.n_nodes(), 15);
}

#[test]
fn second_order_nodes_land_on_child_vertices() {
    for t in refinable().filter(|t| t.n_nodes() > t.n_vertices()) {
        let xi = reference_nodes(t);
        let parent: Vec<Point<f64>> = xi.iter().map(|&p| Point(p)).collect();
        let children = refine_points(t, &parent).unwrap();
        for n in t.n_vertices()..t.n_nodes() {
            let (c, v) = t.second_order_child_vertex(n).unwrap();
            assert!(children[c][v].abs_diff_le(&parent[n], 1e-12), "{t:?} node {n}");
        }
    }
}

#[test]
fn child_sides_lie_on_parent_sides() {
    // every parent side is covered by as many child sides as the side type
    // has children
    for t in refinable().filter(|t| t.dim() >= 2) {
        let n_children = t.n_children().unwrap();
        for s in 0..t.n_sides() {
            let covering = (0..n_children)
                .flat_map(|c| (0..t.n_sides()).map(move |cs| (c, cs)))
                .filter(|&(c, cs)| child_side_on_parent_side(t, c, cs).unwrap() == Some(s))
                .count();
            let expected = t.side_type(s).unwrap().n_children().unwrap();
            assert_eq!(covering, expected, "{t:?} side {s}");
        }
    }
}

#[test]
fn complex_fields_prolong_linearly() {
    let f = |p: [f64; 3]| {
        Complex64::new(1.0, 2.0) * p[0] + Complex64::new(3.0, -1.0) * p[1] + Complex64::new(0.0, 1.0)
    };
    for t in [ElemType::Quad4, ElemType::Tri6, ElemType::Hex20] {
        let xi = reference_nodes(t);
        let values: Vec<Complex64> = xi.iter().map(|&p| f(p)).collect();
        let points: Vec<Point<f64>> = xi.iter().map(|&p| Point(p)).collect();
        let child_points = refine_points(t, &points).unwrap();
        for (c, pts) in child_points.iter().enumerate() {
            let child = prolong::<f64, Complex64>(t, c, &values).unwrap();
            for (v, p) in child.iter().zip(pts) {
                let exact = f(p.0);
                assert!((*v - exact).norm() < 1e-12, "{t:?} child {c}");
            }
        }
    }
}

#[test]
fn prolong_checks_its_input() {
    let values = vec![1.0f64; 3];
    assert!(matches!(
        prolong::<f64, f64>(ElemType::Quad4, 0, &values),
        Err(MeshError::NodeCountMismatch { expected: 4, found: 3, .. })
    ));
    assert!(matches!(
        prolong::<f64, f64>(ElemType::Tri3, 4, &values),
        Err(MeshError::IndexOutOfRange { what: "child", index: 4, .. })
    ));
}

#[test]
fn coarsening_restores_the_parent() {
    let t = ElemType::Hex8;
    let (mut mesh, root) = single_elem_mesh(t, &skewed_nodes(t));
    let children = mesh.refine(root).unwrap();
    mesh.refine(children[0]).unwrap();
    assert_eq!(mesh.coarsen(root), Err(MeshError::ChildrenRefined(root)));
    mesh.coarsen(children[0]).unwrap();
    mesh.coarsen(root).unwrap();
    assert_eq!(mesh.n_active_elems(), 1);
    assert!(mesh.elem(children[3]).is_err());
    assert_eq!(mesh.coarsen(root), Err(MeshError::NotRefined(root)));
    let nodes = mesh.n_nodes();
    mesh.refine(root).unwrap();
    assert_eq!(mesh.n_nodes(), nodes);
}

#[test]
fn uniform_refinement_leaves_a_mixed_mesh_alone_on_error() {
    let mut mesh = Mesh::<f64>::new();
    for (t, shift) in [(ElemType::Hex8, 0.0), (ElemType::Pyramid5, 3.0)] {
        let ids: Vec<NodeId> = reference_nodes(t)
            .iter()
            .map(|&[x, y, z]| mesh.add_node(Point::new(x + shift, y, z)))
            .collect();
        mesh.add_elem(t, ids).unwrap();
    }
    let (elems, nodes) = (mesh.n_elems(), mesh.n_nodes());
    assert_eq!(
        mesh.refine_uniformly(1),
        Err(MeshError::RefinementUnsupported(ElemType::Pyramid5))
    );
    assert_eq!(mesh.n_elems(), elems);
    assert_eq!(mesh.n_nodes(), nodes);
    assert_eq!(mesh.n_active_elems(), 2);
}

#[test]
fn uniform_refinement_keeps_completed_levels() {
    let (mut mesh, root) = single_elem_mesh(ElemType::Quad4, &skewed_nodes(ElemType::Quad4));
    assert_eq!(mesh.refine_uniformly(2), Ok(5));
    assert_eq!(mesh.n_active_elems(), 16);
    assert_eq!(mesh.elem(root).unwrap().children().len(), 4);
}
