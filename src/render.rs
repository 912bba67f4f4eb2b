use crate::constants::CLEAR_COLOR;
use globe_core::mesh::{unit_cylinder, uv_sphere};
use globe_core::texture::TextureImage;
use globe_core::{
    rgb_from_hex, Camera, MarkerSet, AMBIENT_LIGHT_COLOR, ATMOSPHERE_COLOR, ATMOSPHERE_OPACITY,
    ATMOSPHERE_RADIUS, GLOBE_RADIUS, GLOBE_SEGMENTS, MARKER_RADIUS, MARKER_SEGMENTS,
    SUN_DIRECTION, SUN_INTENSITY,
};
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod mesh;
mod targets;
use helpers::PipelineDesc;
use mesh::{GpuMesh, Vertex};
use targets::DepthTarget;

// Shaders bundled as string constants
static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");
static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");
static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    sun: [f32; 4],
    ambient: [f32; 4],
    atmosphere: [f32; 4],
    radii: [f32; 4],
}

/// Per-marker instance data: model matrix columns and colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl MarkerInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4, 7 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Instance list for the current marker state, hover colours included.
pub fn marker_instances(markers: &MarkerSet) -> Vec<MarkerInstance> {
    markers
        .iter()
        .map(|m| {
            let [r, g, b] = m.color();
            MarkerInstance {
                model: m.model_matrix().to_cols_array_2d(),
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

const STAR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    globe_texture: wgpu::Texture,
    globe_bind_group: wgpu::BindGroup,

    globe_pipeline: wgpu::RenderPipeline,
    atmosphere_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    sphere: GpuMesh,
    cylinder: GpuMesh,
    star_buffer: wgpu::Buffer,
    star_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        stars: &[Vec3],
        marker_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        // Group 0: scene uniforms shared by every pipeline
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Group 1: globe texture + sampler
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globe_texture_bgl"),
            entries: &[
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
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("globe_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let fallback = TextureImage::fallback();
        let (globe_texture, globe_view) = helpers::upload_rgba_texture(
            &device,
            &queue,
            "globe_fallback",
            fallback.width,
            fallback.height,
            &fallback.rgba,
        );
        let globe_bind_group =
            texture_bind_group(&device, &texture_bgl, &globe_view, &sampler);

        let globe_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });
        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers_shader"),
            source: wgpu::ShaderSource::Wgsl(MARKERS_WGSL.into()),
        });
        let star_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(STARS_WGSL.into()),
        });

        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_layout"),
            bind_group_layouts: &[&scene_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });

        let vertex_layouts = [Vertex::layout()];
        let marker_layouts = [Vertex::layout(), MarkerInstance::layout()];
        let star_layouts = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &STAR_ATTRS,
        }];

        let globe_pipeline = helpers::make_scene_pipeline(
            &device,
            &PipelineDesc {
                label: "globe_pipeline",
                layout: &textured_layout,
                shader: &globe_shader,
                vs_entry: "vs_globe",
                fs_entry: "fs_globe",
                buffers: &vertex_layouts,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                color_format: format,
                blend: None,
                depth_write: true,
            },
        );
        // Inside faces only, blended over the globe without writing depth
        let atmosphere_pipeline = helpers::make_scene_pipeline(
            &device,
            &PipelineDesc {
                label: "atmosphere_pipeline",
                layout: &scene_layout,
                shader: &globe_shader,
                vs_entry: "vs_atmosphere",
                fs_entry: "fs_atmosphere",
                buffers: &vertex_layouts,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Front),
                color_format: format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
        );
        let marker_pipeline = helpers::make_scene_pipeline(
            &device,
            &PipelineDesc {
                label: "marker_pipeline",
                layout: &scene_layout,
                shader: &marker_shader,
                vs_entry: "vs_marker",
                fs_entry: "fs_marker",
                buffers: &marker_layouts,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                color_format: format,
                blend: None,
                depth_write: true,
            },
        );
        let star_pipeline = helpers::make_scene_pipeline(
            &device,
            &PipelineDesc {
                label: "star_pipeline",
                layout: &scene_layout,
                shader: &star_shader,
                vs_entry: "vs_star",
                fs_entry: "fs_star",
                buffers: &star_layouts,
                topology: wgpu::PrimitiveTopology::PointList,
                cull_mode: None,
                color_format: format,
                blend: None,
                depth_write: false,
            },
        );

        // The sphere mesh is unit-sized; the shaders scale it per layer.
        let sphere = GpuMesh::upload(
            &device,
            "sphere_mesh",
            &uv_sphere(1.0, GLOBE_SEGMENTS, GLOBE_SEGMENTS),
        );
        let cylinder = GpuMesh::upload(
            &device,
            "marker_mesh",
            &unit_cylinder(MARKER_RADIUS, MARKER_SEGMENTS),
        );
        let star_points: Vec<[f32; 3]> = stars.iter().map(|s| s.to_array()).collect();
        let star_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_points"),
            contents: bytemuck::cast_slice(&star_points),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = marker_count.max(1);
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        log::info!(
            "[gpu] ready {}x{} format {:?}, {} stars",
            width,
            height,
            format,
            star_points.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            uniform_buffer,
            scene_bind_group,
            texture_bgl,
            sampler,
            globe_texture,
            globe_bind_group,
            globe_pipeline,
            atmosphere_pipeline,
            marker_pipeline,
            star_pipeline,
            sphere,
            cylinder,
            star_buffer,
            star_count: star_points.len() as u32,
            instance_buffer,
            instance_capacity,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Swap the untextured fallback for a decoded globe image.
    pub fn set_globe_texture(&mut self, image: &TextureImage) {
        let (texture, view) = helpers::upload_rgba_texture(
            &self.device,
            &self.queue,
            "globe_texture",
            image.width,
            image.height,
            &image.rgba,
        );
        self.globe_bind_group =
            texture_bind_group(&self.device, &self.texture_bgl, &view, &self.sampler);
        let old = std::mem::replace(&mut self.globe_texture, texture);
        old.destroy();
        log::info!("[gpu] globe texture {}x{}", image.width, image.height);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, self.width, self.height);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        instances: &[MarkerInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        if instances.len() > self.instance_capacity {
            self.instance_buffer.destroy();
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&scene_uniforms(camera)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            // Stars first, behind everything and without depth writes
            if self.star_count > 0 {
                rpass.set_pipeline(&self.star_pipeline);
                rpass.set_vertex_buffer(0, self.star_buffer.slice(..));
                rpass.draw(0..self.star_count, 0..1);
            }

            rpass.set_pipeline(&self.globe_pipeline);
            rpass.set_bind_group(1, &self.globe_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.sphere.index_count, 0, 0..1);

            if !instances.is_empty() {
                rpass.set_pipeline(&self.marker_pipeline);
                rpass.set_vertex_buffer(0, self.cylinder.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                rpass.set_index_buffer(
                    self.cylinder.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                rpass.draw_indexed(0..self.cylinder.index_count, 0, 0..instances.len() as u32);
            }

            rpass.set_pipeline(&self.atmosphere_pipeline);
            rpass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.sphere.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release every GPU resource this state owns. The surface goes with `self`.
    pub fn dispose(self) {
        self.globe_texture.destroy();
        self.depth.tex.destroy();
        self.sphere.destroy();
        self.cylinder.destroy();
        self.star_buffer.destroy();
        self.instance_buffer.destroy();
        self.uniform_buffer.destroy();
        log::info!("[gpu] disposed");
    }
}

fn scene_uniforms(camera: &Camera) -> SceneUniforms {
    let sun = Vec3::from_array(SUN_DIRECTION).normalize_or_zero();
    let [ar, ag, ab] = rgb_from_hex(AMBIENT_LIGHT_COLOR);
    let [sr, sg, sb] = rgb_from_hex(ATMOSPHERE_COLOR);
    SceneUniforms {
        view_proj: camera.view_projection().to_cols_array_2d(),
        eye: camera.eye.extend(1.0).to_array(),
        sun: sun.extend(SUN_INTENSITY).to_array(),
        ambient: [ar, ag, ab, 1.0],
        atmosphere: [sr, sg, sb, ATMOSPHERE_OPACITY],
        radii: [GLOBE_RADIUS, ATMOSPHERE_RADIUS, 0.0, 0.0],
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("marker_instances"),
        size: (capacity * std::mem::size_of::<MarkerInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globe_texture_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
