//! Quadrature rules on the reference shapes.
//!
//! Tensor-product shapes use Gauss–Legendre rules directly. Simplices and the
//! pyramid are integrated with collapsed (Duffy) rules: a tensor rule on the
//! unit cube pulled back through a degenerate map, with the map's Jacobian
//! folded into the weights. The weights of every rule sum to the measure of
//! its reference element.

use crate::topology::elem_type::Shape;
use std::f64::consts::PI;

/// Points per direction used by the geometric integrals.
pub const DEFAULT_POINTS: usize = 6;

/// Reference points (padded to 3 components) and matching weights.
#[derive(Clone, Debug)]
pub struct QuadratureRule {
    pub points: Vec<[f64; 3]>,
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the weights, i.e. the measure of the reference element.
    pub fn measure(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// `n`-point Gauss–Legendre abscissae and weights on `[-1, 1]`, in
/// ascending order.
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut x = vec![0.0; n];
    let mut w = vec![0.0; n];
    let nf = n as f64;
    for i in 0..n {
        // Newton iteration on P_n from the Chebyshev-like initial guess.
        let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        let mut dp = 1.0;
        for _ in 0..100 {
            let mut p_prev = 1.0;
            let mut p = z;
            for k in 2..=n {
                let kf = k as f64;
                let next = ((2.0 * kf - 1.0) * z * p - (kf - 1.0) * p_prev) / kf;
                p_prev = p;
                p = next;
            }
            dp = nf * (z * p - p_prev) / (z * z - 1.0);
            let dz = p / dp;
            z -= dz;
            if dz.abs() < 1e-15 {
                break;
            }
        }
        x[n - 1 - i] = z;
        w[n - 1 - i] = 2.0 / ((1.0 - z * z) * dp * dp);
    }
    (x, w)
}

/// Gauss–Legendre rule mapped to `[0, 1]`.
fn unit_interval(n: usize) -> (Vec<f64>, Vec<f64>) {
    let (x, w) = gauss_legendre(n);
    (
        x.into_iter().map(|g| 0.5 * (g + 1.0)).collect(),
        w.into_iter().map(|g| 0.5 * g).collect(),
    )
}

/// Rule with `n` points per collapsed direction on the reference `shape`.
pub fn rule(shape: Shape, n: usize) -> QuadratureRule {
    let mut points = Vec::new();
    let mut weights = Vec::new();
    let (g, gw) = gauss_legendre(n);
    let (u, uw) = unit_interval(n);
    match shape {
        Shape::Point => {
            points.push([0.0; 3]);
            weights.push(1.0);
        }
        Shape::Segment => {
            for (&x, &w) in g.iter().zip(&gw) {
                points.push([x, 0.0, 0.0]);
                weights.push(w);
            }
        }
        Shape::Quadrilateral => {
            for (&y, &wy) in g.iter().zip(&gw) {
                for (&x, &wx) in g.iter().zip(&gw) {
                    points.push([x, y, 0.0]);
                    weights.push(wx * wy);
                }
            }
        }
        Shape::Hexahedron => {
            for (&z, &wz) in g.iter().zip(&gw) {
                for (&y, &wy) in g.iter().zip(&gw) {
                    for (&x, &wx) in g.iter().zip(&gw) {
                        points.push([x, y, z]);
                        weights.push(wx * wy * wz);
                    }
                }
            }
        }
        Shape::Triangle => {
            for ([x, y], w) in collapsed_triangle(&u, &uw) {
                points.push([x, y, 0.0]);
                weights.push(w);
            }
        }
        Shape::Prism => {
            let tri = collapsed_triangle(&u, &uw);
            for (&z, &wz) in g.iter().zip(&gw) {
                for &([x, y], w) in &tri {
                    points.push([x, y, z]);
                    weights.push(w * wz);
                }
            }
        }
        Shape::Tetrahedron => {
            for (&c, &wc) in u.iter().zip(&uw) {
                for (&b, &wb) in u.iter().zip(&uw) {
                    for (&a, &wa) in u.iter().zip(&uw) {
                        let jac = (1.0 - b) * (1.0 - c) * (1.0 - c);
                        points.push([a * (1.0 - b) * (1.0 - c), b * (1.0 - c), c]);
                        weights.push(wa * wb * wc * jac);
                    }
                }
            }
        }
        Shape::Pyramid => {
            for (&c, &wc) in u.iter().zip(&uw) {
                for (&b, &wb) in g.iter().zip(&gw) {
                    for (&a, &wa) in g.iter().zip(&gw) {
                        let s = 1.0 - c;
                        points.push([a * s, b * s, c]);
                        weights.push(wa * wb * wc * s * s);
                    }
                }
            }
        }
    }
    QuadratureRule { points, weights }
}

fn collapsed_triangle(u: &[f64], uw: &[f64]) -> Vec<([f64; 2], f64)> {
    let mut out = Vec::with_capacity(u.len() * u.len());
    for (&b, &wb) in u.iter().zip(uw) {
        for (&a, &wa) in u.iter().zip(uw) {
            out.push(([a * (1.0 - b), b], wa * wb * (1.0 - b)));
        }
    }
    out
}
