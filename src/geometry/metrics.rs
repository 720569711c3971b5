//! Geometry metrics evaluated through the element's geometric map.
//!
//! All functions take an element type and the physical positions of its nodes
//! in local node order. The reference elements are:
//! - Segment: `xi` in `[-1, 1]`.
//! - Triangle / tetrahedron: the unit simplex.
//! - Quadrilateral / hexahedron: `[-1, 1]^d`.
//! - Prism: the unit triangle in `(xi, eta)` times `zeta` in `[-1, 1]`.
//! - Pyramid: base `[-1, 1]^2` at `zeta = 0`, apex at `(0, 0, 1)`.
//!
//! Volumes are integrated with the tabulated rule from
//! [`quadrature`](crate::geometry::quadrature), so curved second-order
//! elements are measured through their full map rather than their corners.

use crate::geometry::bounds::{Real, cast, to_f64};
use crate::geometry::point::Point;
use crate::geometry::reference::{self, shape_basis};
use crate::mesh_error::MeshError;
use crate::topology::elem_type::ElemType;
use crate::topology::registry;
use num_traits::Zero;

/// Relative size below which a measure counts as zero: `|vol| <= EPS * h^dim`.
const EPS: f64 = 1e-12;

fn check_len<T>(t: ElemType, points: &[Point<T>]) -> Result<(), MeshError> {
    if points.len() != t.n_nodes() {
        return Err(MeshError::NodeCountMismatch {
            elem_type: t,
            expected: t.n_nodes(),
            found: points.len(),
        });
    }
    Ok(())
}

/// Columns `dx/dxi`, `dx/deta`, `dx/dzeta` from tabulated shape gradients.
/// Columns past the element dimension are zero.
fn jacobian_from_gradients<T: Real>(points: &[Point<T>], grads: &[[f64; 3]]) -> [Point<T>; 3] {
    let mut cols = [Point::zero(); 3];
    for (p, g) in points.iter().zip(grads) {
        for (col, &gd) in cols.iter_mut().zip(g) {
            if gd != 0.0 {
                *col = *col + *p * cast::<T>(gd);
            }
        }
    }
    cols
}

/// Jacobian columns of the geometric map at reference point `xi`.
pub fn jacobian<T: Real>(
    t: ElemType,
    points: &[Point<T>],
    xi: [f64; 3],
) -> Result<[Point<T>; 3], MeshError> {
    check_len(t, points)?;
    Ok(jacobian_from_gradients(points, &shape_basis(t).gradients(xi)))
}

/// Image of reference point `xi` under the geometric map.
pub fn reference_to_physical<T: Real>(
    t: ElemType,
    points: &[Point<T>],
    xi: [f64; 3],
) -> Result<Point<T>, MeshError> {
    check_len(t, points)?;
    let values = shape_basis(t).values(xi);
    Ok(points
        .iter()
        .zip(values)
        .fold(Point::zero(), |acc, (p, v)| acc + *p * cast::<T>(v)))
}

/// Diagonal of the bounding box of the element's vertices; the length scale
/// used to make tolerances relative.
pub fn characteristic_length<T: Real>(t: ElemType, points: &[Point<T>]) -> T {
    let nv = t.n_vertices().min(points.len());
    let Some(first) = points.first() else {
        return T::zero();
    };
    let (mut lo, mut hi) = (first.0, first.0);
    for p in &points[1..nv] {
        for d in 0..3 {
            lo[d] = lo[d].min(p.0[d]);
            hi[d] = hi[d].max(p.0[d]);
        }
    }
    Point(hi).distance(&Point(lo))
}

/// Unsigned-or-signed measure without validity checks: signed volume in
/// 3D, area in 2D, length in 1D.
fn raw_measure<T: Real>(t: ElemType, points: &[Point<T>]) -> T {
    let dim = t.dim();
    if dim == 0 {
        return T::zero();
    }
    let table = reference::gradient_table(t);
    table
        .weights
        .iter()
        .zip(&table.gradients)
        .fold(T::zero(), |acc, (&w, grads)| {
            let [a, b, c] = jacobian_from_gradients(points, grads);
            let m = match dim {
                1 => a.norm(),
                2 => a.cross(&b).norm(),
                _ => a.cross(&b).dot(&c),
            };
            acc + cast::<T>(w) * m
        })
}

/// Element measure: signed volume for 3D types, area for 2D, length for 1D
/// and zero for `NodeElem`.
///
/// # Errors
/// - [`MeshError::NodeCountMismatch`] if `points` has the wrong length.
/// - [`MeshError::InvertedElement`] if a 3D volume is negative.
/// - [`MeshError::DegenerateElement`] if the measure is zero relative to the
///   element size.
pub fn volume<T: Real>(t: ElemType, points: &[Point<T>]) -> Result<T, MeshError> {
    check_len(t, points)?;
    let dim = t.dim();
    if dim == 0 {
        return Ok(T::zero());
    }
    let vol = raw_measure(t, points);
    let h = characteristic_length(t, points);
    let floor = cast::<T>(EPS) * h.powi(dim as i32);
    if dim == 3 && vol < -floor {
        return Err(MeshError::InvertedElement {
            elem_type: t,
            volume: to_f64(vol),
        });
    }
    if !vol.is_finite() || vol.abs() <= floor {
        return Err(MeshError::DegenerateElement {
            elem_type: t,
            measure: to_f64(vol),
        });
    }
    Ok(vol)
}

/// Checks that the element is neither degenerate nor inverted.
pub fn validate_geometry<T: Real>(t: ElemType, points: &[Point<T>]) -> Result<(), MeshError> {
    volume(t, points).map(|_| ())
}

/// Whether the geometric map is affine to within `tol` relative to the
/// element size.
///
/// The candidate affine map is the one through the type's affine frame
/// (`dim + 1` spanning vertices); every node must sit on it within
/// `tol * h`, with `h` the vertex bounding-box diagonal.
pub fn has_affine_map<T: Real>(t: ElemType, points: &[Point<T>], tol: T) -> Result<bool, MeshError> {
    check_len(t, points)?;
    let dim = t.dim();
    if dim == 0 {
        return Ok(true);
    }
    let frame = registry::affine_frame(t);
    let nodes = registry::reference_nodes(t);
    let inv = reference::frame_inverse(t);
    let origin_ref = nodes[frame[0]];
    let origin = points[frame[0]];
    let edges: Vec<Point<T>> = frame[1..].iter().map(|&v| points[v] - origin).collect();
    let bound = tol * characteristic_length(t, points);

    for (xi, p) in nodes.iter().zip(points) {
        let d: Vec<f64> = (0..dim).map(|r| xi[r] - origin_ref[r]).collect();
        let mut predicted = origin;
        for (k, edge) in edges.iter().enumerate() {
            let lambda: f64 = (0..dim).map(|r| inv[k][r] * d[r]).sum();
            predicted = predicted + *edge * cast::<T>(lambda);
        }
        if !predicted.abs_diff_le(p, bound) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Arithmetic mean of the vertex positions.
pub fn centroid<T: Real>(t: ElemType, points: &[Point<T>]) -> Result<Point<T>, MeshError> {
    check_len(t, points)?;
    let nv = t.n_vertices();
    let sum = points[..nv].iter().fold(Point::zero(), |acc, p| acc + *p);
    Ok(sum * cast::<T>(1.0 / nv as f64))
}

/// Physical point at the reference centroid of side `s` and the outward unit
/// normal there.
///
/// For a 2D element the normal lies in the element's plane; for a 1D element
/// it is the unit tangent, pointing away from the element.
pub fn side_point_and_normal<T: Real>(
    t: ElemType,
    points: &[Point<T>],
    s: usize,
) -> Result<(Point<T>, Point<T>), MeshError> {
    check_len(t, points)?;
    let st = t.side_type(s)?;
    let side_points: Vec<Point<T>> = registry::side_nodes(t, s).iter().map(|&i| points[i]).collect();
    let side_center = reference::reference_centroid(st);
    let point = reference_to_physical(st, &side_points, side_center)?;

    let raw = match t.dim() {
        3 => {
            let [a, b, _] = jacobian(st, &side_points, side_center)?;
            a.cross(&b)
        }
        2 => {
            let [tangent, _, _] = jacobian(st, &side_points, side_center)?;
            let [a, b, _] = jacobian(t, points, reference::reference_centroid(t))?;
            tangent.cross(&a.cross(&b))
        }
        _ => {
            let at = registry::reference_nodes(t)[registry::side_nodes(t, s)[0]];
            let [tangent, _, _] = jacobian(t, points, at)?;
            if s == 0 { -tangent } else { tangent }
        }
    };
    let normal = raw.normalized().ok_or(MeshError::DegenerateElement {
        elem_type: st,
        measure: 0.0,
    })?;
    Ok((point, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scaled_reference(t: ElemType, s: f64) -> Vec<Point<f64>> {
        registry::reference_nodes(t)
            .iter()
            .map(|&[x, y, z]| Point::new(s * x, s * y, s * z))
            .collect()
    }

    #[test]
    fn reference_volumes() {
        let cases = [
            (ElemType::Edge3, 2.0),
            (ElemType::Tri6, 0.5),
            (ElemType::Quad8, 4.0),
            (ElemType::Tet10, 1.0 / 6.0),
            (ElemType::Hex27, 8.0),
            (ElemType::Prism15, 1.0),
            (ElemType::Pyramid13, 4.0 / 3.0),
        ];
        for (t, v) in cases {
            let vol = volume(t, &scaled_reference(t, 1.0)).unwrap();
            assert_relative_eq!(vol, v, epsilon = 1e-12);
            let vol2 = volume(t, &scaled_reference(t, 2.0)).unwrap();
            assert_relative_eq!(vol2, v * 2f64.powi(t.dim() as i32), epsilon = 1e-11);
        }
    }

    #[test]
    fn node_elem_has_zero_measure() {
        assert_eq!(volume(ElemType::NodeElem, &[Point::new(1.0, 2.0, 3.0)]).unwrap(), 0.0);
    }

    #[test]
    fn wrong_node_count_is_rejected() {
        let pts = scaled_reference(ElemType::Tet4, 1.0);
        assert!(matches!(
            volume(ElemType::Tet10, &pts),
            Err(MeshError::NodeCountMismatch { expected: 10, found: 4, .. })
        ));
    }

    #[test]
    fn inverted_and_collapsed_tets() {
        let mut pts = scaled_reference(ElemType::Tet4, 1.0);
        pts.swap(1, 2);
        assert!(matches!(
            volume(ElemType::Tet4, &pts),
            Err(MeshError::InvertedElement { .. })
        ));
        pts[3] = Point::new(0.3, 0.3, 0.0);
        assert!(matches!(
            volume(ElemType::Tet4, &pts),
            Err(MeshError::DegenerateElement { .. })
        ));
    }

    #[test]
    fn affine_detection() {
        let t = ElemType::Prism15;
        let mut pts = scaled_reference(t, 1.0);
        for p in &mut pts {
            *p = Point::new(2.0 * p.x() + 0.5 * p.z(), p.y() - p.x(), 3.0 * p.z() + 1.0);
        }
        assert!(has_affine_map(t, &pts, 1e-6).unwrap());
        pts[7] = pts[7] + Point::new(0.0, 0.0, 0.1);
        assert!(!has_affine_map(t, &pts, 1e-6).unwrap());

        // A trapezoid is bilinear but not affine.
        let quad = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(1.5, 1.0, 0.0),
            Point::new(0.5, 1.0, 0.0),
        ];
        assert!(!has_affine_map(ElemType::Quad4, &quad, 1e-6).unwrap());
    }

    #[test]
    fn curved_edge_changes_area() {
        let t = ElemType::Tri6;
        let mut pts = scaled_reference(t, 1.0);
        // bulge the hypotenuse midpoint outward
        pts[4] = Point::new(0.6, 0.6, 0.0);
        let area = volume(t, &pts).unwrap();
        // quadratic edge adds 2/3 * base * sagitta
        let sagitta = (0.1f64 * 0.1 * 2.0).sqrt();
        assert_relative_eq!(area, 0.5 + 2.0 / 3.0 * 2f64.sqrt() * sagitta, epsilon = 1e-12);
    }

    #[test]
    fn side_normals_point_outward() {
        let t = ElemType::Hex8;
        let pts = scaled_reference(t, 1.0);
        let (p, n) = side_point_and_normal(t, &pts, 0).unwrap();
        assert!(p.abs_diff_le(&Point::new(0.0, 0.0, -1.0), 1e-12));
        assert!(n.abs_diff_le(&Point::new(0.0, 0.0, -1.0), 1e-12));

        let (p, n) = side_point_and_normal(ElemType::Quad4, &scaled_reference(ElemType::Quad4, 1.0), 1).unwrap();
        assert!(p.abs_diff_le(&Point::new(1.0, 0.0, 0.0), 1e-12));
        assert!(n.abs_diff_le(&Point::new(1.0, 0.0, 0.0), 1e-12));

        let (_, n) = side_point_and_normal(ElemType::Edge2, &scaled_reference(ElemType::Edge2, 1.0), 0).unwrap();
        assert!(n.abs_diff_le(&Point::new(-1.0, 0.0, 0.0), 1e-12));
    }
}
