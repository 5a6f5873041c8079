//! Per-frame sink: upload draw submissions and issue their draw calls.

use wgpu::util::DeviceExt;

use orrery_geometry::MeshIndices;
use orrery_scene::{DrawSubmission, Topology};

use crate::context::{RenderContext, SurfaceError};
use crate::pipeline::{PipelineSet, SceneUniform};
use crate::shader::{FLAT_SHADER, ShaderError};

/// Consumes ordered draw submissions, one frame at a time.
///
/// Compiles the flat shader once at construction; per frame it uploads
/// each submission's vertex, color, index, and uniform data and records
/// one draw per submission in order. Mesh reuse across frames is the
/// fingerprint cache's job one layer up; the sink itself is stateless
/// plumbing.
pub struct FrameRenderer {
    pipelines: PipelineSet,
}

/// GPU-side state for one submission, alive for the length of the pass.
struct GpuDraw {
    position: wgpu::Buffer,
    color: wgpu::Buffer,
    index: wgpu::Buffer,
    index_format: wgpu::IndexFormat,
    index_count: u32,
    scene_bind_group: wgpu::BindGroup,
    topology: Topology,
}

impl FrameRenderer {
    /// Compile the shader pair and build the pipeline set.
    pub fn new(context: &RenderContext) -> Result<Self, ShaderError> {
        let module = FLAT_SHADER.compile(&context.device)?;
        let pipelines = PipelineSet::new(
            &context.device,
            &module,
            &FLAT_SHADER,
            context.surface_format,
        );
        Ok(Self { pipelines })
    }

    /// Render one frame: clear to black, then draw every submission in
    /// the order given.
    pub fn render(
        &self,
        context: &RenderContext,
        submissions: &[DrawSubmission],
    ) -> Result<(), SurfaceError> {
        let surface_texture = context.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draws: Vec<GpuDraw> = submissions
            .iter()
            .filter_map(|submission| self.prepare(context, submission))
            .collect();

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orrery-frame"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orrery-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for draw in &draws {
                let pipeline = self.pipelines.for_draw(draw.topology, draw.index_format);
                pass.set_pipeline(&pipeline.pipeline);
                pass.set_bind_group(0, &draw.scene_bind_group, &[]);
                pass.set_vertex_buffer(0, draw.position.slice(..));
                pass.set_vertex_buffer(1, draw.color.slice(..));
                pass.set_index_buffer(draw.index.slice(..), draw.index_format);
                pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Upload one submission's buffers. Returns `None` (and logs) for
    /// submissions whose data is inconsistent; the rest of the frame
    /// still renders.
    fn prepare(&self, context: &RenderContext, submission: &DrawSubmission) -> Option<GpuDraw> {
        let device = &context.device;
        let vertex_count = submission.vertices.vertex_count();

        if submission.colors.len() != vertex_count * 4 {
            log::warn!(
                "{:?}: color buffer holds {} values for {} vertices, skipping",
                submission.body,
                submission.colors.len(),
                vertex_count
            );
            return None;
        }

        // wgpu has no line-loop topology; closing the loop is one extra
        // index through the start vertex.
        let synthesized;
        let indices: &MeshIndices = match submission.topology {
            Topology::LineLoop => {
                synthesized = close_loop_indices(vertex_count);
                &synthesized
            }
            Topology::TriangleStrip | Topology::LineStrip => match submission.indices() {
                Some(indices) => indices,
                None => {
                    log::warn!(
                        "{:?}: indexed topology without an index buffer, skipping",
                        submission.body
                    );
                    return None;
                }
            },
        };

        let position = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-positions"),
            contents: submission.vertices.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-colors"),
            contents: bytemuck::cast_slice(&submission.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-indices"),
            contents: indices.as_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = SceneUniform::new(submission.view, submission.transform);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-scene-uniform"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery-scene-bind-group"),
            layout: &self.pipelines.scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Some(GpuDraw {
            position,
            color,
            index,
            index_format: index_format(indices),
            index_count: indices.len() as u32,
            scene_bind_group,
            topology: submission.topology,
        })
    }
}

/// Map stored index width to the wgpu format.
fn index_format(indices: &MeshIndices) -> wgpu::IndexFormat {
    match indices {
        MeshIndices::U16(_) => wgpu::IndexFormat::Uint16,
        MeshIndices::U32(_) => wgpu::IndexFormat::Uint32,
    }
}

/// Indices for a closed loop over `vertex_count` vertices: the sequence
/// in order plus one closing index back to the start.
fn close_loop_indices(vertex_count: usize) -> MeshIndices {
    let values: Vec<u32> = (0..vertex_count as u32).chain(std::iter::once(0)).collect();
    MeshIndices::for_vertex_count(values, vertex_count)
}
