//! Nodal shape functions of the geometric map.
//!
//! Each element type interpolates its node positions with a Lagrange basis
//! over a fixed monomial space. The basis is obtained once per type by
//! inverting the Vandermonde matrix of that space at the reference nodes; the
//! results are cached for the lifetime of the process.
//!
//! Pyramid spaces contain rational terms `x^a y^b / (1 - z)^r`. They are
//! bounded on the reference pyramid and are taken to be zero at the apex,
//! where every such term vanishes in the limit along the element.

use crate::geometry::quadrature::{self, DEFAULT_POINTS};
use crate::topology::elem_type::ElemType;
use crate::topology::registry;
use nalgebra::DMatrix;
use once_cell::sync::Lazy;

/// `x^px y^py z^pz / (1 - z)^pr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Monomial {
    px: i32,
    py: i32,
    pz: i32,
    pr: i32,
}

const fn mono(px: i32, py: i32, pz: i32) -> Monomial {
    Monomial { px, py, pz, pr: 0 }
}

const fn rational(px: i32, py: i32, pr: i32) -> Monomial {
    Monomial { px, py, pz: 0, pr }
}

#[inline]
fn pw(v: f64, e: i32) -> f64 {
    if e == 0 { 1.0 } else { v.powi(e) }
}

/// `e * v^(e-1)`, the derivative of `v^e`.
#[inline]
fn dpw(v: f64, e: i32) -> f64 {
    if e == 0 { 0.0 } else { e as f64 * pw(v, e - 1) }
}

const APEX_TOL: f64 = 1e-14;

impl Monomial {
    fn value(&self, [x, y, z]: [f64; 3]) -> f64 {
        let base = pw(x, self.px) * pw(y, self.py) * pw(z, self.pz);
        if self.pr == 0 {
            return base;
        }
        let s = 1.0 - z;
        if s.abs() < APEX_TOL { 0.0 } else { base / pw(s, self.pr) }
    }

    fn gradient(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let (fx, fy, fz) = (pw(x, self.px), pw(y, self.py), pw(z, self.pz));
        let (gx, gy, gz) = (dpw(x, self.px), dpw(y, self.py), dpw(z, self.pz));
        if self.pr == 0 {
            return [gx * fy * fz, fx * gy * fz, fx * fy * gz];
        }
        let s = 1.0 - z;
        if s.abs() < APEX_TOL {
            return [0.0; 3];
        }
        let inv = 1.0 / pw(s, self.pr);
        let dz = gz * inv + self.pr as f64 * fz * inv / s;
        [gx * fy * fz * inv, fx * gy * fz * inv, fx * fy * dz]
    }
}

/// Monomials of total degree `<= degree` in the first `dim` variables.
fn complete(dim: usize, degree: i32) -> Vec<Monomial> {
    let mut out = Vec::new();
    for pz in 0..=if dim > 2 { degree } else { 0 } {
        for py in 0..=if dim > 1 { degree } else { 0 } {
            for px in 0..=degree {
                if px + py + pz <= degree {
                    out.push(mono(px, py, pz));
                }
            }
        }
    }
    out
}

/// Tensor-product monomials with every exponent `<= degree`.
fn tensor(dim: usize, degree: i32) -> Vec<Monomial> {
    let mut out = Vec::new();
    for pz in 0..=if dim > 2 { degree } else { 0 } {
        for py in 0..=if dim > 1 { degree } else { 0 } {
            for px in 0..=degree {
                out.push(mono(px, py, pz));
            }
        }
    }
    out
}

/// Quadratic serendipity space: tensor-quadratic monomials in which at most
/// one variable appears squared.
fn serendipity(dim: usize) -> Vec<Monomial> {
    tensor(dim, 2)
        .into_iter()
        .filter(|m| [m.px, m.py, m.pz].iter().filter(|&&e| e == 2).count() <= 1)
        .collect()
}

/// Triangle space of `tri_degree` in `(x, y)` times each listed power of `z`.
fn wedge(tri_degree: i32, z_powers: &[i32]) -> Vec<Monomial> {
    let mut out = Vec::new();
    for &pz in z_powers {
        out.extend(
            complete(2, tri_degree)
                .into_iter()
                .map(|m| mono(m.px, m.py, pz)),
        );
    }
    out
}

fn space(t: ElemType) -> Vec<Monomial> {
    match t {
        ElemType::NodeElem => vec![mono(0, 0, 0)],
        ElemType::Edge2 => complete(1, 1),
        ElemType::Edge3 => complete(1, 2),
        ElemType::Tri3 => complete(2, 1),
        ElemType::Tri6 => complete(2, 2),
        ElemType::Quad4 => tensor(2, 1),
        ElemType::Quad8 => serendipity(2),
        ElemType::Quad9 => tensor(2, 2),
        ElemType::Tet4 => complete(3, 1),
        ElemType::Tet10 => complete(3, 2),
        ElemType::Hex8 => tensor(3, 1),
        ElemType::Hex20 => serendipity(3),
        ElemType::Hex27 => tensor(3, 2),
        ElemType::Prism6 => wedge(1, &[0, 1]),
        ElemType::Prism15 => {
            let mut s = wedge(2, &[0, 1]);
            s.extend(wedge(1, &[2]));
            s
        }
        ElemType::Prism18 => wedge(2, &[0, 1, 2]),
        ElemType::Pyramid5 => {
            let mut s = complete(3, 1);
            s.push(rational(1, 1, 1));
            s
        }
        ElemType::Pyramid13 => {
            let mut s = complete(3, 2);
            s.extend([rational(1, 1, 1), rational(2, 1, 1), rational(1, 2, 1)]);
            s
        }
        ElemType::Pyramid14 => {
            let mut s = complete(3, 2);
            s.extend([
                rational(1, 1, 1),
                rational(2, 1, 1),
                rational(1, 2, 1),
                rational(2, 2, 2),
            ]);
            s
        }
    }
}

/// Snaps values within `1e-10` of a multiple of `1/4096` onto it, so that
/// exact dyadic coefficients survive the matrix inversion exactly.
pub(crate) fn snap(v: f64) -> f64 {
    let scaled = (v * 4096.0).round() / 4096.0;
    if (v - scaled).abs() < 1e-10 { scaled } else { v }
}

/// Lagrange basis of one element type: `N_i(xi) = sum_j m_j(xi) * C[j][i]`.
#[derive(Debug)]
pub struct ShapeBasis {
    monomials: Vec<Monomial>,
    /// Row-major `n x n` coefficient matrix `C`.
    coeffs: Vec<f64>,
}

impl ShapeBasis {
    fn build(t: ElemType) -> Self {
        let monomials = space(t);
        let nodes = registry::reference_nodes(t);
        let n = nodes.len();
        debug_assert_eq!(monomials.len(), n, "{t:?} space size");
        let vandermonde = DMatrix::<f64>::from_fn(n, n, |i, j| monomials[j].value(nodes[i]));
        let inverse = match vandermonde.try_inverse() {
            Some(m) => m,
            // The spaces are unisolvent on their nodes; reaching this is a
            // broken table, not bad input.
            None => panic!("{t:?} monomial space is not unisolvent on its nodes"),
        };
        let mut coeffs = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                coeffs.push(snap(inverse[(j, i)]));
            }
        }
        ShapeBasis { monomials, coeffs }
    }

    pub fn n_shapes(&self) -> usize {
        self.monomials.len()
    }

    /// Shape function values at reference point `xi`.
    pub fn values(&self, xi: [f64; 3]) -> Vec<f64> {
        let n = self.n_shapes();
        let mut out = vec![0.0; n];
        for (j, m) in self.monomials.iter().enumerate() {
            let v = m.value(xi);
            if v != 0.0 {
                for (o, c) in out.iter_mut().zip(&self.coeffs[j * n..(j + 1) * n]) {
                    *o += v * c;
                }
            }
        }
        out
    }

    /// Reference-coordinate gradients of every shape function at `xi`.
    pub fn gradients(&self, xi: [f64; 3]) -> Vec<[f64; 3]> {
        let n = self.n_shapes();
        let mut out = vec![[0.0; 3]; n];
        for (j, m) in self.monomials.iter().enumerate() {
            let g = m.gradient(xi);
            for (o, c) in out.iter_mut().zip(&self.coeffs[j * n..(j + 1) * n]) {
                for d in 0..3 {
                    o[d] += g[d] * c;
                }
            }
        }
        out
    }
}

static BASES: Lazy<Vec<ShapeBasis>> = Lazy::new(|| {
    log::trace!("building shape bases for {} element types", ElemType::ALL.len());
    ElemType::ALL.iter().map(|&t| ShapeBasis::build(t)).collect()
});

/// Shape basis of `t`.
pub fn shape_basis(t: ElemType) -> &'static ShapeBasis {
    &BASES[t.index()]
}

/// Quadrature weights with the shape gradients tabulated at each point.
#[derive(Debug)]
pub(crate) struct GradientTable {
    pub weights: Vec<f64>,
    pub gradients: Vec<Vec<[f64; 3]>>,
}

static GRADIENT_TABLES: Lazy<Vec<GradientTable>> = Lazy::new(|| {
    ElemType::ALL
        .iter()
        .map(|&t| {
            let rule = quadrature::rule(t.shape(), DEFAULT_POINTS);
            let basis = shape_basis(t);
            GradientTable {
                gradients: rule.points.iter().map(|&p| basis.gradients(p)).collect(),
                weights: rule.weights,
            }
        })
        .collect()
});

pub(crate) fn gradient_table(t: ElemType) -> &'static GradientTable {
    &GRADIENT_TABLES[t.index()]
}

/// Inverse of the `dim x dim` matrix whose columns are the reference edge
/// vectors of the affine frame, padded to 3x3 (row-major).
static FRAME_INVERSES: Lazy<Vec<[[f64; 3]; 3]>> = Lazy::new(|| {
    ElemType::ALL
        .iter()
        .map(|&t| {
            let dim = t.dim();
            let mut out = [[0.0; 3]; 3];
            if dim == 0 {
                return out;
            }
            let frame = registry::affine_frame(t);
            let nodes = registry::reference_nodes(t);
            let m = DMatrix::<f64>::from_fn(dim, dim, |r, c| {
                nodes[frame[c + 1]][r] - nodes[frame[0]][r]
            });
            if let Some(inv) = m.try_inverse() {
                for (r, row) in out.iter_mut().enumerate().take(dim) {
                    for (c, v) in row.iter_mut().enumerate().take(dim) {
                        *v = inv[(r, c)];
                    }
                }
            }
            out
        })
        .collect()
});

pub(crate) fn frame_inverse(t: ElemType) -> &'static [[f64; 3]; 3] {
    &FRAME_INVERSES[t.index()]
}

/// Reference-space centroid of the type's vertices.
pub fn reference_centroid(t: ElemType) -> [f64; 3] {
    let nv = t.n_vertices();
    let mut c = [0.0; 3];
    for p in &registry::reference_nodes(t)[..nv] {
        for d in 0..3 {
            c[d] += p[d];
        }
    }
    c.map(|v| v / nv as f64)
}
