//! Pyramid family (`Pyramid5`, `Pyramid13`, `Pyramid14`): base `[-1, 1]^2`
//! at `zeta = 0`, apex at `(0, 0, 1)`.
//!
//! Base edge midpoints 5-8 follow the base vertices, 9-12 are the midpoints
//! of the lateral edges towards the apex, 13 the base center.

pub static REFERENCE_NODES: [[f64; 3]; 14] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.0, 0.0, 0.0],
];

/// Sides 0-3 are the lateral triangles, side 4 the base (outward, so it runs
/// clockwise seen from the apex).
pub static SIDE_NODES: [&[usize]; 5] = [
    &[0, 1, 4, 5, 10, 9],
    &[1, 2, 4, 6, 11, 10],
    &[2, 3, 4, 7, 12, 11],
    &[3, 0, 4, 8, 9, 12],
    &[0, 3, 2, 1, 8, 7, 6, 5, 13],
];

pub static EDGE_NODES: [[usize; 3]; 8] = [
    [0, 1, 5],
    [1, 2, 6],
    [2, 3, 7],
    [0, 3, 8],
    [0, 4, 9],
    [1, 4, 10],
    [2, 4, 11],
    [3, 4, 12],
];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 9] = [
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[0, 3],
    &[0, 4],
    &[1, 4],
    &[2, 4],
    &[3, 4],
    &[0, 3, 2, 1],
];

pub static AFFINE_FRAME: [usize; 4] = [0, 1, 3, 4];
