//! Draw submissions - one unit of work for the rendering backend.

use std::sync::Arc;

use glam::Mat4;

use orrery_geometry::{Mesh, MeshIndices};

use crate::bodies::BodyKind;

/// Backend-agnostic primitive topology.
///
/// `LineLoop` has no wgpu equivalent; the backend lowers it to a line
/// strip with a synthesized closing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleStrip,
    LineStrip,
    LineLoop,
}

/// One draw call's worth of state, assembled per tick.
///
/// Geometry and colors are shared `Arc`s out of the fingerprint cache;
/// the transform is this body's own copy - each body layers its spin onto
/// the shared base transform without mutating its siblings'.
#[derive(Debug, Clone)]
pub struct DrawSubmission {
    pub body: BodyKind,
    /// Vertex buffer source (and its embedded indices, when drawn solid).
    pub vertices: Arc<Mesh>,
    /// Replacement index buffer for overlays that reuse another body's
    /// vertex layout (the wireframe over the earth).
    pub index_override: Option<Arc<MeshIndices>>,
    /// RGBA f32 quadruples, one per vertex.
    pub colors: Arc<Vec<f32>>,
    pub transform: Mat4,
    pub view: Mat4,
    pub topology: Topology,
    /// Indices drawn for indexed topologies, vertices for loops.
    pub element_count: u32,
}

impl DrawSubmission {
    /// The index buffer this submission draws with, if any.
    pub fn indices(&self) -> Option<&MeshIndices> {
        self.index_override
            .as_deref()
            .or(self.vertices.indices.as_ref())
    }
}
