//! Kernel configuration.

use crate::mesh_error::MeshError;

/// Settings shared by every element of a [`Mesh`](crate::mesh::Mesh).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Relative tolerance for [`has_affine_map`](crate::mesh::Mesh::has_affine_map).
    pub affine_tolerance: f64,
    /// When enabled, elements memoize their side keys.
    pub topology_cache: bool,
    /// When enabled, refinement rejects degenerate or inverted children.
    pub check_geometry: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            affine_tolerance: 1e-6,
            topology_cache: true,
            check_geometry: false,
        }
    }
}

impl KernelConfig {
    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.affine_tolerance.is_finite() || self.affine_tolerance < 0.0 {
            return Err(MeshError::InvalidConfig(format!(
                "affine_tolerance must be finite and non-negative, got {}",
                self.affine_tolerance
            )));
        }
        Ok(())
    }
}
