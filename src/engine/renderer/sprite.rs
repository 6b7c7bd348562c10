// Sprite quad batching

use wgpu::util::DeviceExt;

use super::camera::ScreenUniform;
use super::texture::{FrameHandle, FrameStore};
use super::vertex::Vertex;

/// One textured rectangle to draw this frame, in screen pixels.
///
/// `mirrored` flips the texture horizontally; geometry is unchanged, so a
/// character faces left or right without a second set of frames.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub frame: FrameHandle,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mirrored: bool,
}

/// Expand a quad into two triangles with flip-aware texture coordinates
pub fn quad_vertices(quad: &Quad) -> [Vertex; 6] {
    let (x0, y0) = (quad.x, quad.y);
    let (x1, y1) = (quad.x + quad.width, quad.y + quad.height);
    let (u0, u1) = if quad.mirrored {
        (1.0, 0.0)
    } else {
        (0.0, 1.0)
    };

    [
        Vertex::new(x0, y0, u0, 0.0),
        Vertex::new(x1, y0, u1, 0.0),
        Vertex::new(x1, y1, u1, 1.0),
        Vertex::new(x0, y0, u0, 0.0),
        Vertex::new(x1, y1, u1, 1.0),
        Vertex::new(x0, y1, u0, 1.0),
    ]
}

/// Pipeline and shared GPU state for drawing sprite quads
pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-flipping projection inverts winding, so no culling
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::cast_slice(&[ScreenUniform {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            texture_layout,
        }
    }

    /// Layout frame textures must be bound with
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    pub fn globals_buffer(&self) -> &wgpu::Buffer {
        &self.globals_buffer
    }

    /// Build the vertex buffer for this frame's quads
    pub fn build_vertices(&self, device: &wgpu::Device, quads: &[Quad]) -> wgpu::Buffer {
        let mut vertices = Vec::with_capacity(quads.len() * 6);
        for quad in quads {
            vertices.extend_from_slice(&quad_vertices(quad));
        }

        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }

    /// Record draw calls, one per quad in submission order
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        vertices: &'a wgpu::Buffer,
        quads: &[Quad],
        frames: &'a FrameStore,
    ) {
        if quads.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertices.slice(..));

        for (i, quad) in quads.iter().enumerate() {
            let Some(frame) = frames.get(quad.frame) else {
                continue;
            };
            render_pass.set_bind_group(1, &frame.bind_group, &[]);
            let start = (i * 6) as u32;
            render_pass.draw(start..start + 6, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_quad(mirrored: bool) -> Quad {
        Quad {
            frame: FrameHandle(0),
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            mirrored,
        }
    }

    #[test]
    fn test_quad_vertex_positions() {
        let verts = quad_vertices(&test_quad(false));
        assert_relative_eq!(verts[0].position[0], 10.0);
        assert_relative_eq!(verts[0].position[1], 20.0);
        assert_relative_eq!(verts[2].position[0], 110.0);
        assert_relative_eq!(verts[2].position[1], 70.0);
    }

    #[test]
    fn test_upright_quad_uvs() {
        let verts = quad_vertices(&test_quad(false));
        // Top-left vertex samples the texture's top-left corner
        assert_relative_eq!(verts[0].tex_coords[0], 0.0);
        assert_relative_eq!(verts[0].tex_coords[1], 0.0);
        assert_relative_eq!(verts[2].tex_coords[0], 1.0);
        assert_relative_eq!(verts[2].tex_coords[1], 1.0);
    }

    #[test]
    fn test_mirrored_quad_flips_u_only() {
        let upright = quad_vertices(&test_quad(false));
        let mirrored = quad_vertices(&test_quad(true));
        for (a, b) in upright.iter().zip(mirrored.iter()) {
            assert_relative_eq!(a.position[0], b.position[0]);
            assert_relative_eq!(a.position[1], b.position[1]);
            assert_relative_eq!(a.tex_coords[0], 1.0 - b.tex_coords[0]);
            assert_relative_eq!(a.tex_coords[1], b.tex_coords[1]);
        }
    }
}
