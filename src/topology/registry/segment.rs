//! Segment family (`Edge2`, `Edge3`) on `xi in [-1, 1]`.
//!
//! ```text
//! 0 ----- 2 ----- 1
//! ```

pub static REFERENCE_NODES: [[f64; 3]; 3] = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];

/// Side `s` of a segment is the point node `s`.
pub static SIDE_NODES: [&[usize]; 2] = [&[0], &[1]];

pub static SECOND_ORDER_ADJACENT_VERTICES: [&[usize]; 1] = [&[0, 1]];

pub static AFFINE_FRAME: [usize; 2] = [0, 1];
