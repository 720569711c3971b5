//! Hexahedron family (`Hex8`, `Hex20`, `Hex27`) on `[-1, 1]^3`.
//!
//! Vertices 0-3 form the bottom face (`zeta = -1`) counter-clockwise seen from
//! above, 4-7 the top face. Nodes 8-11 are bottom edge midpoints, 12-15
//! vertical edge midpoints, 16-19 top edge midpoints, 20-25 face centers in
//! side order and 26 the cell center.

pub static REFERENCE_NODES: [[f64; 3]; 27] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [0.0, -1.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 0.0],
];

/// Outward-oriented faces as `Quad9` rows.
pub static SIDE_NODES: [&[usize]; 6] = [
    &[0, 3, 2, 1, 11, 10, 9, 8, 20],
    &[0, 1, 5, 4, 8, 13, 16, 12, 21],
    &[1, 2, 6, 5, 9, 14, 17, 13, 22],
    &[2, 3, 7, 6, 10, 15, 18, 14, 23],
    &[3, 0, 4, 7, 11, 12, 19, 15, 24],
    &[4, 5, 6, 7, 16, 17, 18, 19, 25],
];

pub static EDGE_NODES: [[usize; 3]; 12] = [
    [0, 1, 8],
    [1, 2, 9],
    [2, 3, 10],
    [0, 3, 11],
    [0, 4, 12],
    [1, 5, 13],
    [2, 6, 14],
    [3, 7, 15],
    [4, 5, 16],
    [5, 6, 17],
    [6, 7, 18],
    [4, 7, 19],
];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 19] = [
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[0, 3],
    &[0, 4],
    &[1, 5],
    &[2, 6],
    &[3, 7],
    &[4, 5],
    &[5, 6],
    &[6, 7],
    &[4, 7],
    &[0, 3, 2, 1],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
    &[4, 5, 6, 7],
    &[0, 1, 2, 3, 4, 5, 6, 7],
];

pub static AFFINE_FRAME: [usize; 4] = [0, 1, 3, 4];
