//! Bulk material metadata attached to a cell.

use serde::{Deserialize, Serialize};

/// Material properties the attenuation integrators need alongside the
/// geometry: which material fills the cell, how dense it is, and at what
/// temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Caller-side material id.
    pub id: i32,
    /// Number density in the caller's native units.
    pub number_density: f64,
    /// Temperature in kelvin.
    pub temperature: f64,
}

impl Material {
    /// Create a material record.
    pub fn new(id: i32, number_density: f64, temperature: f64) -> Self {
        Self {
            id,
            number_density,
            temperature,
        }
    }
}
