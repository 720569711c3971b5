//! Point (`NodeElem`) tables.

pub static REFERENCE_NODES: [[f64; 3]; 1] = [[0.0, 0.0, 0.0]];

pub static AFFINE_FRAME: [usize; 1] = [0];
