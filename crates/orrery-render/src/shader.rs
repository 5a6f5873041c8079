//! Flat-color shader pair with an explicit binding declaration table.
//!
//! Binding roles are declared statically next to the shader source - a
//! fixed map from role to name and slot - so the pipeline layer never has
//! to discover bindings by scanning shader text.

use thiserror::Error;

/// Error types for shader compilation.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The shader failed wgpu validation. Fatal to this program's
    /// rendering; there is no automatic retry.
    #[error("shader '{name}' failed to compile: {message}")]
    CompilationFailed { name: String, message: String },
}

/// What a declared binding feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole {
    /// Per-vertex input stream.
    Attribute,
    /// Uniform block.
    Uniform,
    /// Element index buffer.
    Index,
}

/// One entry of a shader's binding declaration table.
#[derive(Debug, Clone, Copy)]
pub struct BindingDecl {
    /// Name as declared in the shader source.
    pub name: &'static str,
    pub role: BindingRole,
    /// Shader-visible slot: vertex buffer slot for attributes, bind group
    /// binding for uniforms; unused for the index buffer.
    pub slot: u32,
}

/// A shader pair (vertex + fragment stages in one WGSL module) together
/// with its binding declarations.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSpec {
    pub name: &'static str,
    pub source: &'static str,
    pub bindings: &'static [BindingDecl],
}

impl ShaderSpec {
    /// Compile the module, converting validation failures into
    /// [`ShaderError::CompilationFailed`] via a wgpu error scope.
    pub fn compile(&self, device: &wgpu::Device) -> Result<wgpu::ShaderModule, ShaderError> {
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.name),
            source: wgpu::ShaderSource::Wgsl(self.source.into()),
        });
        if let Some(error) = pollster::block_on(error_scope.pop()) {
            return Err(ShaderError::CompilationFailed {
                name: self.name.to_string(),
                message: error.to_string(),
            });
        }
        log::info!("Compiled shader '{}'", self.name);
        Ok(module)
    }

    /// Vertex buffer slot for a declared attribute name.
    pub fn attribute_slot(&self, name: &str) -> Option<u32> {
        self.bindings
            .iter()
            .find(|b| b.role == BindingRole::Attribute && b.name == name)
            .map(|b| b.slot)
    }

    /// Bind group binding for a declared uniform name.
    pub fn uniform_slot(&self, name: &str) -> Option<u32> {
        self.bindings
            .iter()
            .find(|b| b.role == BindingRole::Uniform && b.name == name)
            .map(|b| b.slot)
    }
}

/// The flat vertex-color shader: clip position from view and transform
/// matrices, color passed through untouched.
pub const FLAT_SHADER: ShaderSpec = ShaderSpec {
    name: "flat",
    source: FLAT_SHADER_SOURCE,
    bindings: &[
        BindingDecl {
            name: "position",
            role: BindingRole::Attribute,
            slot: 0,
        },
        BindingDecl {
            name: "color",
            role: BindingRole::Attribute,
            slot: 1,
        },
        BindingDecl {
            name: "scene",
            role: BindingRole::Uniform,
            slot: 0,
        },
        BindingDecl {
            name: "index",
            role: BindingRole::Index,
            slot: 0,
        },
    ],
};

/// The WGSL source code for the flat shader.
pub const FLAT_SHADER_SOURCE: &str = r#"
struct SceneUniform {
    view: mat4x4<f32>,
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniform;

struct VertexInput {
    @location(0) position: vec4<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = scene.view * scene.transform * in.position;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
