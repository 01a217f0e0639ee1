//! wgpu Context
//!
//! [`WgpuContext`] holds the core GPU handles (device, queue, surface,
//! config) plus the single textured-quad pipeline every node draws with,
//! and implements the [`GraphicsContext`] boundary on top of them.
//!
//! Draws recorded between `begin_frame` and `end_frame` are replayed in one
//! render pass whose load op applies the frame's clear color.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;
use log::warn;
use wgpu::util::DeviceExt;

use crate::errors::{Result, ViewerError};
use crate::gfx::{BufferHandle, DrawCall, GraphicsContext, TextureDesc, TextureHandle};

const QUAD_SHADER: &str = r"
struct QuadUniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> quad: QuadUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = quad.mvp * vec4<f32>(position, 1.0);
    out.uv = uv;
    return out;
}

@group(1) @binding(0) var quad_texture: texture_2d<f32>;
@group(1) @binding(1) var quad_sampler: sampler;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(quad_texture, quad_sampler, in.uv);
}
";

/// Per-draw uniform block: the combined view-projection × model matrix.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadUniforms {
    mvp: [[f32; 4]; 4],
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// A draw recorded during the frame, replayed at `end_frame`.
struct PendingDraw {
    positions: BufferHandle,
    tex_coords: BufferHandle,
    indices: Option<BufferHandle>,
    texture: TextureHandle,
    element_count: u32,
    uniform_bind_group: wgpu::BindGroup,
}

/// Core wgpu context implementing the [`GraphicsContext`] boundary.
///
/// Resources handed out through the boundary are tracked by opaque handle;
/// they live until the context is dropped. The context owns exactly one
/// pipeline: position + uv vertex buffers, a per-draw MVP uniform, and a
/// texture/sampler bind group.
pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    textures: HashMap<u64, GpuTexture>,
    buffers: HashMap<u64, wgpu::Buffer>,
    next_handle: u64,

    view_proj: Mat4,
    clear_color: wgpu::Color,
    draws: Vec<PendingDraw>,
}

impl WgpuContext {
    /// Creates a context bound to `window`'s surface.
    pub async fn new(window: Arc<winit::window::Window>, width: u32, height: u32) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ViewerError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Viewer Device"),
                ..Default::default()
            })
            .await?;

        let mut config = surface.get_default_config(&adapter, width, height).ok_or_else(|| {
            ViewerError::AdapterRequestFailed("Surface not supported by adapter".to_string())
        })?;
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(QUAD_SHADER.into()),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Uniform Layout"),
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
            label: Some("Quad Texture Layout"),
            entries: &[
                // Binding 0: Texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Binding 1: Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[Some(&uniform_layout), Some(&texture_layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: 12,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: 8,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 1,
                        }],
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quad Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            device,
            queue,
            surface,
            config,
            pipeline,
            uniform_layout,
            texture_layout,
            sampler,
            textures: HashMap::new(),
            buffers: HashMap::new(),
            next_handle: 0,
            view_proj: Mat4::IDENTITY,
            clear_color: wgpu::Color::BLACK,
            draws: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Returns the current surface dimensions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn alloc_handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl GraphicsContext for WgpuContext {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        if desc.width == 0 || desc.height == 0 {
            return Err(ViewerError::ResourceAllocationFailed(format!(
                "texture dimensions must be positive, got {}x{}",
                desc.width, desc.height
            )));
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(desc.label),
            size: wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(desc.label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.alloc_handle());
        self.textures.insert(handle.0, GpuTexture { texture, bind_group });
        Ok(handle)
    }

    fn write_texture(&mut self, handle: TextureHandle, pixels: &[u8]) -> Result<()> {
        let entry = self.textures.get(&handle.0).ok_or_else(|| {
            ViewerError::ResourceAllocationFailed(format!("unknown texture handle {}", handle.0))
        })?;

        let (width, height) = (entry.texture.width(), entry.texture.height());
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ViewerError::ResourceAllocationFailed(format!(
                "texture upload holds {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &entry.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    fn create_vertex_buffer(&mut self, label: &'static str, data: &[u8]) -> Result<BufferHandle> {
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: data,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let handle = BufferHandle(self.alloc_handle());
        self.buffers.insert(handle.0, buffer);
        Ok(handle)
    }

    fn create_index_buffer(&mut self, label: &'static str, data: &[u8]) -> Result<BufferHandle> {
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: data,
            usage: wgpu::BufferUsages::INDEX,
        });
        let handle = BufferHandle(self.alloc_handle());
        self.buffers.insert(handle.0, buffer);
        Ok(handle)
    }

    fn begin_frame(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
        self.draws.clear();
    }

    fn clear(&mut self, color: [f64; 4]) {
        self.clear_color = wgpu::Color {
            r: color[0],
            g: color[1],
            b: color[2],
            a: color[3],
        };
    }

    fn draw(&mut self, call: &DrawCall) {
        let mvp = self.view_proj * call.model;
        let uniforms = QuadUniforms {
            mvp: mvp.to_cols_array_2d(),
        };
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let uniform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Uniforms"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        self.draws.push(PendingDraw {
            positions: call.positions,
            tex_coords: call.tex_coords,
            indices: call.indices,
            texture: call.texture,
            element_count: call.element_count,
            uniform_bind_group,
        });
    }

    fn end_frame(&mut self) {
        let output = match self.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            // Resize is handled by the event loop.
            wgpu::CurrentSurfaceTexture::Lost => return,
            other => {
                warn!("Skipping frame presentation: {other:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            for draw in &self.draws {
                let (Some(gpu_texture), Some(positions), Some(tex_coords)) = (
                    self.textures.get(&draw.texture.0),
                    self.buffers.get(&draw.positions.0),
                    self.buffers.get(&draw.tex_coords.0),
                ) else {
                    // Stale handle; nothing sensible to draw.
                    continue;
                };

                pass.set_bind_group(0, &draw.uniform_bind_group, &[]);
                pass.set_bind_group(1, &gpu_texture.bind_group, &[]);
                pass.set_vertex_buffer(0, positions.slice(..));
                pass.set_vertex_buffer(1, tex_coords.slice(..));
                match draw.indices.and_then(|handle| self.buffers.get(&handle.0)) {
                    Some(index_buffer) => {
                        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                        pass.draw_indexed(0..draw.element_count, 0, 0..1);
                    }
                    None => pass.draw(0..draw.element_count, 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.draws.clear();
    }
}
