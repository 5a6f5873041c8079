//! Procedural geometry for the orrery scene.
//!
//! Pure generators that turn parametric descriptions (center, radius,
//! tessellation resolution) into CPU-side vertex and index buffers: a
//! UV-sphere tessellated pole to pole as one triangle strip, a circle
//! consumed as a closed line loop, and a wireframe index overlay that
//! reuses the sphere's vertex layout. Nothing here touches the GPU.

mod circle;
mod error;
mod mesh;
mod numeric;
mod sphere;

pub use circle::{CircleParams, generate_circle};
pub use error::GeometryError;
pub use mesh::{Mesh, MeshIndices};
pub use numeric::{SNAP_EPSILON, normalize_center, snap_zero};
pub use sphere::{SphereParams, generate_sphere, generate_wireframe_indices};
