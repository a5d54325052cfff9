use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use litscene_render::{ColorVertex, FrameBatch, LitVertex};
use litscene_scene::Light;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light_position: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
    attenuation: [f32; 4],
    global_ambient: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: Mat4, eye: glam::Vec3, light: &Light) -> Self {
        let a = light.attenuation;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            light_position: light.position.extend(1.0).to_array(),
            light_ambient: light.ambient.0,
            light_diffuse: light.diffuse.0,
            light_specular: light.specular.0,
            attenuation: [a.constant, a.linear, a.quadratic, 0.0],
            global_ambient: light.global_ambient.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuColorVertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl From<&ColorVertex> for GpuColorVertex {
    fn from(v: &ColorVertex) -> Self {
        Self {
            position: v.position,
            color: v.color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuLitVertex {
    position: [f32; 3],
    normal: [f32; 3],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    shininess: f32,
}

impl From<&LitVertex> for GpuLitVertex {
    fn from(v: &LitVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            ambient: v.material.ambient.0,
            diffuse: v.material.diffuse.0,
            specular: v.material.specular.0,
            shininess: v.material.shininess,
        }
    }
}

/// A vertex buffer created for one frame.
struct FrameBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

fn upload<T: Pod>(device: &wgpu::Device, label: &str, vertices: &[T]) -> Option<FrameBuffer> {
    if vertices.is_empty() {
        return None;
    }
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    Some(FrameBuffer {
        buffer,
        count: vertices.len() as u32,
    })
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    lit_pipeline: wgpu::RenderPipeline,
    unlit_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(
                Mat4::IDENTITY,
                glam::Vec3::ZERO,
                &Light::default(),
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });
        let color_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("color_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::COLOR_SHADER.into()),
        });

        let lit_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuLitVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32,
            ],
        };
        let color_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x4,
            ],
        };

        // Two-sided lighting: nothing is culled.
        let lit_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &lit_shader,
            ("vs_lit", "fs_lit"),
            lit_layout,
            wgpu::PrimitiveTopology::TriangleList,
            surface_format,
            "lit_pipeline",
        );
        let unlit_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &color_shader,
            ("vs_color", "fs_color"),
            color_layout.clone(),
            wgpu::PrimitiveTopology::TriangleList,
            surface_format,
            "unlit_pipeline",
        );
        let line_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &color_shader,
            ("vs_color", "fs_color"),
            color_layout,
            wgpu::PrimitiveTopology::LineList,
            surface_format,
            "line_pipeline",
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            lit_pipeline,
            unlit_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Upload and draw one batched frame into `view`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        batch: &FrameBatch,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(batch.view_projection, batch.eye, &batch.light)),
        );

        let lines: Vec<GpuColorVertex> = batch.lines.iter().map(Into::into).collect();
        let unlit: Vec<GpuColorVertex> = batch.unlit_triangles.iter().map(Into::into).collect();
        let lit: Vec<GpuLitVertex> = batch.lit_triangles.iter().map(Into::into).collect();

        let line_buffer = upload(device, "line_vertex_buffer", &lines);
        let unlit_buffer = upload(device, "unlit_vertex_buffer", &unlit);
        let lit_buffer = upload(device, "lit_vertex_buffer", &lit);

        tracing::trace!(
            lines = batch.line_count(),
            triangles = batch.triangle_count(),
            "uploading frame"
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = batch.clear_color.0;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            for (pipeline, buffer) in [
                (&self.line_pipeline, &line_buffer),
                (&self.unlit_pipeline, &unlit_buffer),
                (&self.lit_pipeline, &lit_buffer),
            ] {
                if let Some(frame_buffer) = buffer {
                    pass.set_pipeline(pipeline);
                    pass.set_vertex_buffer(0, frame_buffer.buffer.slice(..));
                    pass.draw(0..frame_buffer.count, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[allow(clippy::too_many_arguments)]
fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    topology: wgpu::PrimitiveTopology,
    surface_format: wgpu::TextureFormat,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}
