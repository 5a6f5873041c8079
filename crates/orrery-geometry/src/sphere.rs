//! UV-sphere tessellation and the wireframe overlay derived from it.

use std::f32::consts::{PI, TAU};

use serde::Serialize;

use crate::error::GeometryError;
use crate::mesh::{Mesh, MeshIndices};
use crate::numeric::{normalize_center, snap_zero};

/// Parametric description of a UV-sphere.
///
/// The field order is fixed; it doubles as the cache fingerprint order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphereParams {
    /// Homogeneous center; a nonzero `w` normalizes the spatial components.
    pub center: [f32; 4],
    /// Sphere radius, strictly positive.
    pub radius: f32,
    /// Longitude segments per ring, at least 3.
    pub width_segments: u32,
    /// Latitude bands pole to pole, at least 1.
    pub height_segments: u32,
}

impl SphereParams {
    /// Check the generator invariants without generating anything.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.width_segments < 3 {
            return Err(GeometryError::TooFewSegments(self.width_segments));
        }
        if self.height_segments == 0 {
            return Err(GeometryError::NoLatitudeBands(self.height_segments));
        }
        if !(self.radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(self.radius));
        }
        Ok(())
    }
}

/// Generate a UV-sphere as a single triangle strip.
///
/// The sphere is tessellated pole to pole: an apex ring of `W` duplicate
/// vertices, `H - 1` interior latitude bands of `W` vertices each, and an
/// antipodal ring of `W` duplicates - `W · (H + 1)` vertices total. The
/// pole rings are degenerate on purpose so every band has the same ring
/// width and the strip indexing stays uniform.
///
/// Each band contributes `2W + 2` strip indices; the repeated closing pair
/// both closes the band's seam and stitches it to the next band with
/// degenerate triangles, producing one continuous strip of `H · (2W + 2)`
/// indices.
pub fn generate_sphere(params: &SphereParams) -> Result<Mesh, GeometryError> {
    params.validate()?;
    let w = params.width_segments as usize;
    let h = params.height_segments as usize;
    let center = normalize_center(params.center);
    let r = params.radius;

    let vertex_count = w * (h + 1);
    let mut vertices = Vec::with_capacity(vertex_count * 4);

    for _ in 0..w {
        vertices.extend_from_slice(&[center.x, center.y + r, center.z, 1.0]);
    }
    for m in 1..h {
        let y_angle = PI * m as f32 / h as f32;
        let y = snap_zero(r * y_angle.cos());
        let ring_radius = r * y_angle.sin();
        for n in 0..w {
            let x_angle = TAU * n as f32 / w as f32;
            vertices.extend_from_slice(&[
                center.x + snap_zero(ring_radius * x_angle.cos()),
                center.y + y,
                center.z + snap_zero(ring_radius * x_angle.sin()),
                1.0,
            ]);
        }
    }
    for _ in 0..w {
        vertices.extend_from_slice(&[center.x, center.y - r, center.z, 1.0]);
    }

    let mut indices = Vec::with_capacity(h * (2 * w + 2));
    for m in 0..h {
        let ring = (w * m) as u32;
        let next = (w * (m + 1)) as u32;
        indices.push(ring);
        indices.push(next);
        for n in 1..w as u32 {
            indices.push(ring + n);
            indices.push(next + n);
        }
        indices.push(ring);
        indices.push(next);
    }

    Ok(Mesh {
        vertices,
        indices: Some(MeshIndices::for_vertex_count(indices, vertex_count)),
    })
}

/// Derive line indices outlining a sphere's latitude and longitude rings.
///
/// Produces no vertices: the traversal addresses the vertex layout that
/// [`generate_sphere`] emits for the same segment counts, so a wireframe
/// overlay can reuse the solid sphere's vertex buffer with its own index
/// buffer. Per band the path zigzags between the previous and current
/// ring (longitude lines), then walks the current ring (latitude line),
/// closing each loop back to its start.
pub fn generate_wireframe_indices(
    width_segments: u32,
    height_segments: u32,
) -> Result<MeshIndices, GeometryError> {
    if width_segments < 3 {
        return Err(GeometryError::TooFewSegments(width_segments));
    }
    if height_segments == 0 {
        return Err(GeometryError::NoLatitudeBands(height_segments));
    }
    let w = width_segments;
    let h = height_segments;

    let mut indices = Vec::with_capacity((h * (3 * w + 3)) as usize);
    for band in 1..=h {
        let ring = w * band;
        let prev = ring - w;
        indices.push(ring);
        for n in 0..w {
            indices.push(prev + n);
            indices.push(ring + n);
        }
        indices.push(prev);
        for n in 0..w {
            indices.push(ring + n);
        }
        indices.push(ring);
    }

    let vertex_count = (w * (h + 1)) as usize;
    Ok(MeshIndices::for_vertex_count(indices, vertex_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere(width_segments: u32, height_segments: u32) -> SphereParams {
        SphereParams {
            center: [0.0, 0.0, 0.0, 0.0],
            radius: 1.0,
            width_segments,
            height_segments,
        }
    }

    #[test]
    fn test_vertex_and_index_counts() {
        for (w, h) in [(3, 1), (4, 2), (32, 32), (5, 7)] {
            let mesh = generate_sphere(&unit_sphere(w, h)).unwrap();
            assert_eq!(mesh.vertex_count(), (w * (h + 1)) as usize, "W={w} H={h}");
            let indices = mesh.indices.as_ref().unwrap();
            assert_eq!(indices.len(), (h * (2 * w + 2)) as usize, "W={w} H={h}");
        }
    }

    #[test]
    fn test_unit_sphere_poles_and_equator() {
        // W=4, H=2: apex ring, one equatorial band, antipodal ring.
        let mesh = generate_sphere(&unit_sphere(4, 2)).unwrap();
        assert_eq!(mesh.vertex_count(), 12);

        for i in 0..4 {
            assert_eq!(mesh.position(i), [0.0, 1.0, 0.0, 1.0]);
        }
        for i in 8..12 {
            assert_eq!(mesh.position(i), [0.0, -1.0, 0.0, 1.0]);
        }
        // Equator ring lies on the unit circle in the XZ-plane at y = 0,
        // with the near-zero trig results snapped exactly.
        for i in 4..8 {
            let [x, y, z, w] = mesh.position(i);
            assert_eq!(y, 0.0, "vertex {i}");
            assert_eq!(w, 1.0);
            assert!(((x * x + z * z).sqrt() - 1.0).abs() < 1e-6, "vertex {i}");
        }
        assert_eq!(mesh.position(4), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.position(5), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(mesh.position(6), [-1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.position(7), [0.0, 0.0, -1.0, 1.0]);
    }

    #[test]
    fn test_strip_bands_close_on_their_first_columns() {
        let mesh = generate_sphere(&unit_sphere(6, 3)).unwrap();
        let indices = mesh.indices.as_ref().unwrap();
        let band_len = 2 * 6 + 2;
        for m in 0..3u32 {
            let base = (m * band_len as u32) as usize;
            assert_eq!(indices.get(base), Some(6 * m));
            assert_eq!(indices.get(base + 1), Some(6 * (m + 1)));
            // The closing pair repeats the opening pair.
            assert_eq!(indices.get(base + band_len - 2), Some(6 * m));
            assert_eq!(indices.get(base + band_len - 1), Some(6 * (m + 1)));
        }
    }

    #[test]
    fn test_all_indices_address_valid_vertices() {
        let mesh = generate_sphere(&unit_sphere(8, 5)).unwrap();
        let limit = mesh.vertex_count() as u32;
        for idx in mesh.indices.as_ref().unwrap().iter() {
            assert!(idx < limit);
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let too_flat = generate_sphere(&unit_sphere(2, 4));
        assert_eq!(too_flat.unwrap_err(), GeometryError::TooFewSegments(2));

        let no_bands = generate_sphere(&unit_sphere(8, 0));
        assert_eq!(no_bands.unwrap_err(), GeometryError::NoLatitudeBands(0));

        let mut flat = unit_sphere(8, 4);
        flat.radius = 0.0;
        assert_eq!(
            generate_sphere(&flat).unwrap_err(),
            GeometryError::NonPositiveRadius(0.0)
        );
        flat.radius = -1.0;
        assert!(matches!(
            generate_sphere(&flat),
            Err(GeometryError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_generation_is_bit_deterministic() {
        let params = SphereParams {
            center: [0.3, -0.7, 0.1, 0.0],
            radius: 0.01593,
            width_segments: 32,
            height_segments: 32,
        };
        let a = generate_sphere(&params).unwrap();
        let b = generate_sphere(&params).unwrap();
        assert_eq!(a.vertices.len(), b.vertices.len());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.to_bits(), vb.to_bits());
        }
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_homogeneous_center_is_normalized_without_mutation() {
        let params = SphereParams {
            center: [2.0, 4.0, 6.0, 2.0],
            radius: 0.5,
            width_segments: 4,
            height_segments: 2,
        };
        let mesh = generate_sphere(&params).unwrap();
        // Effective center is (1, 2, 3); the apex sits radius above it.
        assert_eq!(mesh.position(0), [1.0, 2.5, 3.0, 1.0]);
        // The caller's record is untouched.
        assert_eq!(params.center, [2.0, 4.0, 6.0, 2.0]);
    }

    #[test]
    fn test_index_width_tracks_vertex_count() {
        // 256 · (254 + 1) = 65280 vertices: narrow indices suffice.
        let narrow = generate_sphere(&unit_sphere(256, 254)).unwrap();
        assert!(matches!(narrow.indices, Some(MeshIndices::U16(_))));

        // 256 · (256 + 1) = 65792 vertices: must go wide.
        let wide = generate_sphere(&unit_sphere(256, 256)).unwrap();
        assert!(matches!(wide.indices, Some(MeshIndices::U32(_))));
    }

    #[test]
    fn test_wireframe_count_and_bounds() {
        let (w, h) = (6u32, 4u32);
        let indices = generate_wireframe_indices(w, h).unwrap();
        assert_eq!(indices.len(), (h * (3 * w + 3)) as usize);

        let limit = w * (h + 1);
        let mut max_seen = 0;
        for idx in indices.iter() {
            assert!(idx < limit);
            max_seen = max_seen.max(idx);
        }
        // The last ring's final column is reached.
        assert_eq!(max_seen, limit - 1);
    }

    #[test]
    fn test_wireframe_band_structure() {
        let indices = generate_wireframe_indices(4, 2).unwrap();
        // First band (h=1): ring = 4, prev = 0.
        let expected: Vec<u32> = vec![4, 0, 4, 1, 5, 2, 6, 3, 7, 0, 4, 5, 6, 7, 4];
        let actual: Vec<u32> = indices.iter().take(expected.len()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_wireframe_rejects_invalid_segments() {
        assert_eq!(
            generate_wireframe_indices(2, 4).unwrap_err(),
            GeometryError::TooFewSegments(2)
        );
        assert_eq!(
            generate_wireframe_indices(4, 0).unwrap_err(),
            GeometryError::NoLatitudeBands(0)
        );
    }
}
