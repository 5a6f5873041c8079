//! Flat-color render pipelines for the scene's primitive topologies.
//!
//! Positions and colors arrive as two separate vertex streams of
//! homogeneous `vec4<f32>` quadruples, matching the draw submission's
//! split buffers. Strip topologies bake the index format into pipeline
//! state, so the set carries one pipeline per (topology, index width)
//! combination.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use orrery_scene::Topology;

use crate::shader::ShaderSpec;

/// Uniform block: camera view matrix plus the per-body transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    pub view: [[f32; 4]; 4],
    pub transform: [[f32; 4]; 4],
}

impl SceneUniform {
    /// Pack the two matrices in shader layout order.
    pub fn new(view: Mat4, transform: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            transform: transform.to_cols_array_2d(),
        }
    }
}

/// One compiled flat-color pipeline.
pub struct FlatPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

/// All flat-color pipeline variants plus the shared uniform layout.
pub struct PipelineSet {
    pub scene_bind_group_layout: wgpu::BindGroupLayout,
    triangle_strip_u16: FlatPipeline,
    triangle_strip_u32: FlatPipeline,
    line_strip_u16: FlatPipeline,
    line_strip_u32: FlatPipeline,
}

impl PipelineSet {
    /// Build every topology/index-width variant from one shader module.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        spec: &ShaderSpec,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scene-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: spec.uniform_slot("scene").unwrap_or(0),
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(128), // two mat4x4<f32>
                    },
                    count: None,
                }],
            });

        let build = |topology: wgpu::PrimitiveTopology, index_format: wgpu::IndexFormat| {
            build_pipeline(
                device,
                shader,
                spec,
                surface_format,
                &scene_bind_group_layout,
                topology,
                index_format,
            )
        };

        let triangle_strip_u16 = build(
            wgpu::PrimitiveTopology::TriangleStrip,
            wgpu::IndexFormat::Uint16,
        );
        let triangle_strip_u32 = build(
            wgpu::PrimitiveTopology::TriangleStrip,
            wgpu::IndexFormat::Uint32,
        );
        let line_strip_u16 = build(wgpu::PrimitiveTopology::LineStrip, wgpu::IndexFormat::Uint16);
        let line_strip_u32 = build(wgpu::PrimitiveTopology::LineStrip, wgpu::IndexFormat::Uint32);

        Self {
            scene_bind_group_layout,
            triangle_strip_u16,
            triangle_strip_u32,
            line_strip_u16,
            line_strip_u32,
        }
    }

    /// Pipeline for a submission's topology and index width.
    ///
    /// `LineLoop` draws as a line strip; the caller is responsible for the
    /// synthesized closing index.
    pub fn for_draw(&self, topology: Topology, index_format: wgpu::IndexFormat) -> &FlatPipeline {
        match (topology, index_format) {
            (Topology::TriangleStrip, wgpu::IndexFormat::Uint16) => &self.triangle_strip_u16,
            (Topology::TriangleStrip, wgpu::IndexFormat::Uint32) => &self.triangle_strip_u32,
            (Topology::LineStrip | Topology::LineLoop, wgpu::IndexFormat::Uint16) => {
                &self.line_strip_u16
            }
            (Topology::LineStrip | Topology::LineLoop, wgpu::IndexFormat::Uint32) => {
                &self.line_strip_u32
            }
        }
    }
}

/// Layout of one homogeneous `vec4<f32>` vertex stream.
fn vec4_stream_layout(shader_location: u32) -> wgpu::VertexBufferLayout<'static> {
    const ATTR_SLOT_0: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x4,
    }];
    const ATTR_SLOT_1: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x4,
    }];
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 4) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: if shader_location == 0 {
            &ATTR_SLOT_0
        } else {
            &ATTR_SLOT_1
        },
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    spec: &ShaderSpec,
    surface_format: wgpu::TextureFormat,
    scene_bind_group_layout: &wgpu::BindGroupLayout,
    topology: wgpu::PrimitiveTopology,
    index_format: wgpu::IndexFormat,
) -> FlatPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat-pipeline-layout"),
        bind_group_layouts: &[scene_bind_group_layout],
        immediate_size: 0,
    });

    let position_slot = spec.attribute_slot("position").unwrap_or(0);
    let color_slot = spec.attribute_slot("color").unwrap_or(1);
    let buffers = [
        vec4_stream_layout(position_slot),
        vec4_stream_layout(color_slot),
    ];

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat-pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: Some(index_format),
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None, // strips are stitched with degenerate triangles
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    });

    FlatPipeline { pipeline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::FLAT_SHADER;

    fn create_test_device() -> Option<wgpu::Device> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            let (device, _queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                    experimental_features: Default::default(),
                    trace: Default::default(),
                })
                .await
                .ok()?;
            Some(device)
        })
    }

    #[test]
    fn test_scene_uniform_is_128_bytes() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 128);
    }

    #[test]
    fn test_scene_uniform_packs_column_major() {
        let view = Mat4::IDENTITY;
        let transform = Mat4::from_scale(glam::Vec3::new(2.0, 3.0, 4.0));
        let uniform = SceneUniform::new(view, transform);
        assert_eq!(uniform.view[0][0], 1.0);
        assert_eq!(uniform.transform[0][0], 2.0);
        assert_eq!(uniform.transform[1][1], 3.0);
        assert_eq!(uniform.transform[2][2], 4.0);
    }

    #[test]
    fn test_vertex_stream_layouts() {
        let position = vec4_stream_layout(0);
        assert_eq!(position.array_stride, 16);
        assert_eq!(position.attributes[0].shader_location, 0);
        assert_eq!(
            position.attributes[0].format,
            wgpu::VertexFormat::Float32x4
        );

        let color = vec4_stream_layout(1);
        assert_eq!(color.attributes[0].shader_location, 1);
    }

    #[test]
    fn test_pipeline_set_creation() {
        let Some(device) = create_test_device() else {
            return;
        };
        let module = FLAT_SHADER.compile(&device).unwrap();
        let set = PipelineSet::new(
            &device,
            &module,
            &FLAT_SHADER,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        );
        // Every topology/width combination resolves to a pipeline.
        for topology in [Topology::TriangleStrip, Topology::LineStrip, Topology::LineLoop] {
            for format in [wgpu::IndexFormat::Uint16, wgpu::IndexFormat::Uint32] {
                let _ = set.for_draw(topology, format);
            }
        }
    }
}
