//! Quadrilateral family (`Quad4`, `Quad8`, `Quad9`) on `[-1, 1]^2`.
//!
//! ```text
//! 3 - 6 - 2
//! |       |
//! 7   8   5
//! |       |
//! 0 - 4 - 1
//! ```

pub static REFERENCE_NODES: [[f64; 3]; 9] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
];

pub static SIDE_NODES: [&[usize]; 4] = [&[0, 1, 4], &[1, 2, 5], &[2, 3, 6], &[3, 0, 7]];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 5] =
    [&[0, 1], &[1, 2], &[2, 3], &[0, 3], &[0, 1, 2, 3]];

pub static AFFINE_FRAME: [usize; 3] = [0, 1, 3];
