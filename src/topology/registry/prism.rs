//! Prism family (`Prism6`, `Prism15`, `Prism18`): the unit triangle in
//! `(xi, eta)` extruded over `zeta in [-1, 1]`.
//!
//! ```text
//!   top (zeta = 1)           bottom (zeta = -1)
//!   5                        2
//!   | \                      | \
//!  14   13                   8   7
//!   |     \                  |     \
//!   3 -12- 4                 0 - 6 - 1
//! ```
//!
//! Vertical edge midpoints are 9 (0-3), 10 (1-4) and 11 (2-5). The
//! `Prism18` quad-face centers are 15 (side 1), 16 (side 2) and 17 (side 3).

pub static REFERENCE_NODES: [[f64; 3]; 18] = [
    [0.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.5, 0.0, -1.0],
    [0.5, 0.5, -1.0],
    [0.0, 0.5, -1.0],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.5, 0.0, 1.0],
    [0.5, 0.5, 1.0],
    [0.0, 0.5, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
];

/// Outward-oriented faces. Sides 0 and 4 are triangles (`Tri6` rows), sides
/// 1-3 quadrilaterals (`Quad9` rows; `Prism15` uses the first eight entries).
pub static SIDE_NODES: [&[usize]; 5] = [
    &[0, 2, 1, 8, 7, 6],
    &[0, 1, 4, 3, 6, 10, 12, 9, 15],
    &[1, 2, 5, 4, 7, 11, 13, 10, 16],
    &[2, 0, 3, 5, 8, 9, 14, 11, 17],
    &[3, 4, 5, 12, 13, 14],
];

pub static EDGE_NODES: [[usize; 3]; 9] = [
    [0, 1, 6],
    [1, 2, 7],
    [0, 2, 8],
    [0, 3, 9],
    [1, 4, 10],
    [2, 5, 11],
    [3, 4, 12],
    [4, 5, 13],
    [3, 5, 14],
];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 12] = [
    &[0, 1],
    &[1, 2],
    &[0, 2],
    &[0, 3],
    &[1, 4],
    &[2, 5],
    &[3, 4],
    &[4, 5],
    &[3, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
];

pub static AFFINE_FRAME: [usize; 4] = [0, 1, 2, 3];
