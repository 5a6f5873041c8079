//! Per-tick draw-graph construction.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use serde::Serialize;

use orrery_cache::FingerprintCache;
use orrery_geometry::{
    CircleParams, Mesh, MeshIndices, SphereParams, generate_circle, generate_sphere,
    generate_wireframe_indices,
};

use crate::bodies::{BodyKind, SceneParams};
use crate::color::{MOON_COLOR, TRACE_COLOR, WIREFRAME_COLOR, earth_colors, flat_colors};
use crate::submission::{DrawSubmission, Topology};
use crate::view_state::ViewState;

/// Per-frame ephemeral state, recomputed at the start of every tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Frame counter, incremented once per tick.
    pub tick: u64,
    /// Fixed camera at the origin looking down -Z, +Y up.
    pub view_matrix: Mat4,
    /// Shared scale/drag transform each body clones before adding its spin.
    pub base_transform: Mat4,
}

/// Cache key for the earth's speckled color buffer.
#[derive(Serialize)]
struct EarthColorKey {
    vertex_count: usize,
    base: [f32; 4],
    seed: u64,
}

/// Cache key for uniform color buffers.
#[derive(Serialize)]
struct FlatColorKey {
    vertex_count: usize,
    rgba: [f32; 4],
}

/// Cache key for wireframe index derivation.
#[derive(Serialize)]
struct WireframeKey {
    width_segments: u32,
    height_segments: u32,
}

/// Builds the ordered draw-submission list for each animation tick.
///
/// Owns the fingerprint cache and the tick counter; both live exactly as
/// long as the animation session. Geometry and color buffers are fetched
/// through the cache, so a given parameter set is generated at most once
/// no matter how many frames it stays on screen.
pub struct FrameComposer {
    cache: FingerprintCache,
    tick: u64,
    /// Viewport height over width; corrects the X axis so spheres stay round.
    aspect: f32,
}

impl FrameComposer {
    /// Create a composer for a viewport of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut composer = Self {
            cache: FingerprintCache::new(),
            tick: 0,
            aspect: 1.0,
        };
        composer.set_viewport(width, height);
        composer
    }

    /// Update the aspect correction after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = height.max(1) as f32 / width.max(1) as f32;
    }

    /// Ticks composed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of cached geometry/color entries (diagnostics).
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Compose one frame: advance the tick and assemble the ordered
    /// submission list for the current view and scene parameters.
    ///
    /// A generator failure (malformed parameters) drops that body for this
    /// tick only - the remaining bodies still render, and the next tick
    /// retries with whatever corrected parameters are current.
    pub fn compose(&mut self, view: &ViewState, params: &SceneParams) -> Vec<DrawSubmission> {
        self.tick += 1;
        let frame = self.frame_state(view);

        let mut submissions = Vec::with_capacity(4);
        if let Some(earth) = self.earth_submission(&frame, params) {
            submissions.push(earth);
        }
        if let Some(moon) = self.moon_submission(&frame, params) {
            submissions.push(moon);
        }
        if let Some(trace) = self.trace_submission(&frame, params) {
            submissions.push(trace);
        }
        if params.wireframe
            && let Some(wire) = self.wireframe_submission(&frame, params)
        {
            submissions.push(wire);
        }
        submissions
    }

    /// Recompute the per-frame state from the current view accumulators.
    fn frame_state(&self, view: &ViewState) -> FrameState {
        let view_matrix = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let s = view.scale();
        let base_transform = Mat4::from_scale(Vec3::new(self.aspect * s, s, s))
            * Mat4::from_rotation_y(view.rotation_x())
            * Mat4::from_rotation_x(view.rotation_y());
        FrameState {
            tick: self.tick,
            view_matrix,
            base_transform,
        }
    }

    /// This body's transform: its own copy of the base with its spin applied.
    fn body_transform(frame: &FrameState, body: BodyKind) -> Mat4 {
        match body.spin() {
            Some(spin) => {
                frame.base_transform
                    * Mat4::from_axis_angle(spin.axis, frame.tick as f32 * spin.rate)
            }
            None => frame.base_transform,
        }
    }

    fn earth_submission(
        &mut self,
        frame: &FrameState,
        params: &SceneParams,
    ) -> Option<DrawSubmission> {
        let mesh = self.cached_sphere(BodyKind::Earth, &sphere_params(params, BodyKind::Earth))?;
        let colors = self.cached_earth_colors(mesh.vertex_count(), params)?;
        let element_count = mesh.indices.as_ref().map_or(0, MeshIndices::len) as u32;
        Some(DrawSubmission {
            body: BodyKind::Earth,
            vertices: mesh,
            index_override: None,
            colors,
            transform: Self::body_transform(frame, BodyKind::Earth),
            view: frame.view_matrix,
            topology: Topology::TriangleStrip,
            element_count,
        })
    }

    fn moon_submission(
        &mut self,
        frame: &FrameState,
        params: &SceneParams,
    ) -> Option<DrawSubmission> {
        let mesh = self.cached_sphere(BodyKind::Moon, &sphere_params(params, BodyKind::Moon))?;
        let colors = self.cached_flat_colors(mesh.vertex_count(), MOON_COLOR)?;
        let element_count = mesh.indices.as_ref().map_or(0, MeshIndices::len) as u32;
        Some(DrawSubmission {
            body: BodyKind::Moon,
            vertices: mesh,
            index_override: None,
            colors,
            transform: Self::body_transform(frame, BodyKind::Moon),
            view: frame.view_matrix,
            topology: Topology::TriangleStrip,
            element_count,
        })
    }

    fn trace_submission(
        &mut self,
        frame: &FrameState,
        params: &SceneParams,
    ) -> Option<DrawSubmission> {
        let circle = CircleParams {
            center: [0.0, 0.0, 0.0, 0.0],
            radius: params.moon_distance,
            segments: params.trace_segments,
        };
        let mesh = match self
            .cache
            .get_or_try_insert("circle", &circle, generate_circle)
        {
            Ok(mesh) => mesh,
            Err(err) => {
                log::warn!("skipping trace ring this tick: {err}");
                return None;
            }
        };
        let colors = self.cached_flat_colors(mesh.vertex_count(), TRACE_COLOR)?;
        let element_count = mesh.vertex_count() as u32;
        Some(DrawSubmission {
            body: BodyKind::Trace,
            vertices: mesh,
            index_override: None,
            colors,
            transform: Self::body_transform(frame, BodyKind::Trace),
            view: frame.view_matrix,
            topology: Topology::LineLoop,
            element_count,
        })
    }

    /// The wireframe reuses the earth's vertex buffer with its own indices.
    fn wireframe_submission(
        &mut self,
        frame: &FrameState,
        params: &SceneParams,
    ) -> Option<DrawSubmission> {
        let mesh = self.cached_sphere(BodyKind::Earth, &sphere_params(params, BodyKind::Earth))?;
        let key = WireframeKey {
            width_segments: params.width_segments,
            height_segments: params.height_segments,
        };
        let indices = match self.cache.get_or_try_insert("wireframe", &key, |k| {
            generate_wireframe_indices(k.width_segments, k.height_segments)
        }) {
            Ok(indices) => indices,
            Err(err) => {
                log::warn!("skipping wireframe overlay this tick: {err}");
                return None;
            }
        };
        let colors = self.cached_flat_colors(mesh.vertex_count(), WIREFRAME_COLOR)?;
        let element_count = indices.len() as u32;
        Some(DrawSubmission {
            body: BodyKind::Wireframe,
            vertices: mesh,
            index_override: Some(indices),
            colors,
            transform: Self::body_transform(frame, BodyKind::Wireframe),
            view: frame.view_matrix,
            topology: Topology::LineStrip,
            element_count,
        })
    }

    fn cached_sphere(&mut self, body: BodyKind, params: &SphereParams) -> Option<Arc<Mesh>> {
        match self.cache.get_or_try_insert("sphere", params, generate_sphere) {
            Ok(mesh) => Some(mesh),
            Err(err) => {
                log::warn!("skipping {body:?} this tick: {err}");
                None
            }
        }
    }

    fn cached_earth_colors(
        &mut self,
        vertex_count: usize,
        params: &SceneParams,
    ) -> Option<Arc<Vec<f32>>> {
        let key = EarthColorKey {
            vertex_count,
            base: params.earth_color,
            seed: params.color_seed,
        };
        match self.cache.get_or_insert("earth-colors", &key, |k| {
            earth_colors(k.vertex_count, k.base, k.seed)
        }) {
            Ok(colors) => Some(colors),
            Err(err) => {
                log::warn!("skipping earth colors this tick: {err}");
                None
            }
        }
    }

    fn cached_flat_colors(&mut self, vertex_count: usize, rgba: [f32; 4]) -> Option<Arc<Vec<f32>>> {
        let key = FlatColorKey { vertex_count, rgba };
        match self
            .cache
            .get_or_insert("flat-colors", &key, |k| flat_colors(k.vertex_count, k.rgba))
        {
            Ok(colors) => Some(colors),
            Err(err) => {
                log::warn!("skipping color buffer this tick: {err}");
                None
            }
        }
    }
}

/// Geometry parameters for one of the two spheres.
fn sphere_params(params: &SceneParams, body: BodyKind) -> SphereParams {
    let (center_x, radius) = match body {
        BodyKind::Moon => (params.moon_distance, params.moon_radius),
        _ => (0.0, params.earth_radius),
    };
    SphereParams {
        center: [center_x, 0.0, 0.0, 0.0],
        radius,
        width_segments: params.width_segments,
        height_segments: params.height_segments,
    }
}
