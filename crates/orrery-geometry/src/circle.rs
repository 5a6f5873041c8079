//! Circle ring tessellation (outline only, no fill).

use std::f32::consts::TAU;

use serde::Serialize;

use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::numeric::{normalize_center, snap_zero};

/// Parametric description of a circle in the XY-plane of its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleParams {
    /// Homogeneous center; a nonzero `w` normalizes the spatial components.
    pub center: [f32; 4],
    /// Circle radius, strictly positive.
    pub radius: f32,
    /// Ring segments, at least 3.
    pub segments: u32,
}

impl CircleParams {
    /// Check the generator invariants without generating anything.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.segments < 3 {
            return Err(GeometryError::TooFewSegments(self.segments));
        }
        if !(self.radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(self.radius));
        }
        Ok(())
    }
}

/// Generate a circle ring of exactly `segments` vertices.
///
/// Emits no index buffer: consumers draw the vertices in order as a closed
/// line loop. Each final component is snapped, so axis crossings land on
/// exact zeros.
pub fn generate_circle(params: &CircleParams) -> Result<Mesh, GeometryError> {
    params.validate()?;
    let center = normalize_center(params.center);
    let segments = params.segments;

    let mut vertices = Vec::with_capacity(segments as usize * 4);
    for m in 0..segments {
        let angle = TAU * m as f32 / segments as f32;
        vertices.extend_from_slice(&[
            snap_zero(center.x + params.radius * angle.cos()),
            snap_zero(center.y + params.radius * angle.sin()),
            center.z,
            1.0,
        ]);
    }

    Ok(Mesh {
        vertices,
        indices: None,
    })
}
