//! Tetrahedron family (`Tet4`, `Tet10`) on the unit simplex.
//!
//! Edge nodes follow the edge table: 4 on 0-1, 5 on 1-2, 6 on 0-2,
//! 7 on 0-3, 8 on 1-3, 9 on 2-3.

pub static REFERENCE_NODES: [[f64; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
];

/// Outward-oriented faces as `Tri6` rows.
pub static SIDE_NODES: [&[usize]; 4] = [
    &[0, 2, 1, 6, 5, 4],
    &[0, 1, 3, 4, 8, 7],
    &[1, 2, 3, 5, 9, 8],
    &[2, 0, 3, 6, 7, 9],
];

pub static EDGE_NODES: [[usize; 3]; 6] = [
    [0, 1, 4],
    [1, 2, 5],
    [0, 2, 6],
    [0, 3, 7],
    [1, 3, 8],
    [2, 3, 9],
];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 6] =
    [&[0, 1], &[1, 2], &[0, 2], &[0, 3], &[1, 3], &[2, 3]];

pub static AFFINE_FRAME: [usize; 4] = [0, 1, 2, 3];
