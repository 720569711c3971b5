//! Triangle family (`Tri3`, `Tri6`) on the unit right triangle.
//!
//! ```text
//! 2
//! | \
//! 5   4
//! |     \
//! 0 - 3 - 1
//! ```

pub static REFERENCE_NODES: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
];

/// Counter-clockwise sides: `[v0, v1, mid]`.
pub static SIDE_NODES: [&[usize]; 3] = [&[0, 1, 3], &[1, 2, 4], &[2, 0, 5]];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 3] = [&[0, 1], &[1, 2], &[0, 2]];

pub static AFFINE_FRAME: [usize; 3] = [0, 1, 2];
