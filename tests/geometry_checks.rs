use approx::assert_relative_eq;
use elem_kernel::geometry::metrics;
use elem_kernel::prelude::*;
use elem_kernel::topology::registry::reference_nodes;
use proptest::prelude::*;

fn mapped(t: ElemType, a: &[f64; 9], b: &[f64; 3]) -> Vec<Point<f64>> {
    reference_nodes(t)
        .iter()
        .map(|&[x, y, z]| {
            Point::new(
                a[0] * x + a[1] * y + a[2] * z + b[0],
                a[3] * x + a[4] * y + a[5] * z + b[1],
                a[6] * x + a[7] * y + a[8] * z + b[2],
            )
        })
        .collect()
}

fn reference(t: ElemType) -> Vec<Point<f64>> {
    reference_nodes(t).iter().map(|&p| Point(p)).collect()
}

/// How the map `x -> A x + b` scales a `dim`-dimensional measure.
fn measure_factor(dim: usize, a: &[f64; 9]) -> f64 {
    let col = |j: usize| Point::new(a[j], a[3 + j], a[6 + j]);
    match dim {
        1 => col(0).norm(),
        2 => col(0).cross(&col(1)).norm(),
        _ => col(0).cross(&col(1)).dot(&col(2)),
    }
}

fn perturbation() -> impl Strategy<Value = [f64; 9]> {
    prop::array::uniform9(-0.3f64..0.3).prop_map(|mut a| {
        a[0] += 1.0;
        a[4] += 1.0;
        a[8] += 1.0;
        a
    })
}

proptest! {
    #[test]
    fn affine_images_stay_affine(
        which in 1usize..ElemType::ALL.len(),
        a in perturbation(),
        b in prop::array::uniform3(-5.0f64..5.0),
    ) {
        let t = ElemType::ALL[which];
        let points = mapped(t, &a, &b);
        prop_assert!(metrics::has_affine_map(t, &points, 1e-8).unwrap());

        let expected = metrics::volume(t, &reference(t)).unwrap() * measure_factor(t.dim(), &a);
        let got = metrics::volume(t, &points).unwrap();
        prop_assert!((got - expected).abs() <= 1e-9 * expected.abs(), "{t:?}: {got} vs {expected}");
    }
}

#[test]
fn reference_measures() {
    let expected = [
        (ElemType::Edge3, 2.0),
        (ElemType::Tri6, 0.5),
        (ElemType::Quad9, 4.0),
        (ElemType::Tet10, 1.0 / 6.0),
        (ElemType::Hex27, 8.0),
        (ElemType::Prism18, 1.0),
        (ElemType::Pyramid14, 4.0 / 3.0),
    ];
    for (t, v) in expected {
        assert_relative_eq!(metrics::volume(t, &reference(t)).unwrap(), v, epsilon = 1e-12);
    }
    assert_eq!(metrics::volume(ElemType::NodeElem, &reference(ElemType::NodeElem)).unwrap(), 0.0);
}

#[test]
fn moved_midside_nodes_break_affinity() {
    for t in ElemType::ALL.into_iter().filter(|t| t.n_nodes() > t.n_vertices()) {
        let mut points = reference(t);
        let n = t.n_vertices();
        points[n] = points[n] + Point::new(0.05, 0.05, 0.05);
        assert!(!metrics::has_affine_map(t, &points, 1e-6).unwrap(), "{t:?}");
        // still a valid element
        assert!(metrics::validate_geometry(t, &points).is_ok(), "{t:?}");
    }
}

#[test]
fn non_parallelogram_quads_and_hexes_are_not_affine() {
    let mut quad = reference(ElemType::Quad4);
    quad[2] = Point::new(1.5, 1.0, 0.0);
    assert!(!metrics::has_affine_map(ElemType::Quad4, &quad, 1e-6).unwrap());

    let mut hex = reference(ElemType::Hex8);
    hex[6] = hex[6] * 1.2;
    assert!(!metrics::has_affine_map(ElemType::Hex8, &hex, 1e-6).unwrap());
}

#[test]
fn inverted_and_degenerate_elements() {
    let mut hex = reference(ElemType::Hex8);
    hex.swap(0, 4);
    hex.swap(1, 5);
    hex.swap(2, 6);
    hex.swap(3, 7);
    assert!(matches!(
        metrics::volume(ElemType::Hex8, &hex),
        Err(MeshError::InvertedElement { elem_type: ElemType::Hex8, .. })
    ));

    let flat: Vec<Point<f64>> = reference(ElemType::Prism6)
        .into_iter()
        .map(|p| Point::new(p.x(), p.y(), 0.0))
        .collect();
    assert!(matches!(
        metrics::validate_geometry(ElemType::Prism6, &flat),
        Err(MeshError::DegenerateElement { .. })
    ));

    let line = vec![Point::new(1.0, 1.0, 1.0); 2];
    assert!(metrics::volume(ElemType::Edge2, &line).is_err());
}

#[test]
fn mesh_uses_its_affine_tolerance() {
    let mut points = reference(ElemType::Quad8);
    points[4] = points[4] + Point::new(0.0, 1e-4, 0.0);

    let loose = KernelConfig {
        affine_tolerance: 1e-3,
        ..KernelConfig::default()
    };
    for (config, affine) in [(KernelConfig::default(), false), (loose, true)] {
        let mut mesh = Mesh::<f64>::with_config(config).unwrap();
        let ids: Vec<NodeId> = points.iter().map(|&p| mesh.add_node(p)).collect();
        let id = mesh.add_elem(ElemType::Quad8, ids).unwrap();
        assert_eq!(mesh.has_affine_map(id).unwrap(), affine);
    }
}

#[test]
fn single_precision_volumes() {
    let points: Vec<Point<f32>> = reference_nodes(ElemType::Tet4)
        .iter()
        .map(|&[x, y, z]| Point::new(2.0 * x as f32, 2.0 * y as f32, 2.0 * z as f32))
        .collect();
    let v = metrics::volume(ElemType::Tet4, &points).unwrap();
    assert_relative_eq!(v, 8.0 / 6.0, epsilon = 1e-5);
}

#[test]
fn centroids_average_vertices() {
    let mut quad = reference(ElemType::Quad9);
    quad[8] = Point::new(0.3, 0.3, 0.0);
    let c = metrics::centroid(ElemType::Quad9, &quad).unwrap();
    assert!(c.abs_diff_le(&Point::new(0.0, 0.0, 0.0), 1e-15));
}
