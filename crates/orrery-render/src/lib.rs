//! wgpu rendering backend: GPU context, flat-color pipelines, and the
//! per-frame sink that uploads draw submissions and issues draw calls.

pub mod context;
pub mod frame;
pub mod pipeline;
pub mod shader;

pub use context::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use frame::FrameRenderer;
pub use pipeline::{FlatPipeline, PipelineSet, SceneUniform};
pub use shader::{BindingDecl, BindingRole, FLAT_SHADER, ShaderError, ShaderSpec};
