use crate::constants::{
    AMBIENT_LEVEL, BACKGROUND_COLOR, BRIGHT_THRESHOLD, DISC_CENTER, DISC_COLOR, DISC_EMISSIVE,
    DISC_RADIUS, FILL_LIGHT_INTENSITY, FILL_LIGHT_POS, GODRAYS_DECAY, GODRAYS_DENSITY,
    GODRAYS_EXPOSURE, GODRAYS_WEIGHT, KEY_LIGHT_INTENSITY, KEY_LIGHT_POS, LIGHT_COLOR, TEXT_COLOR,
    TEXT_POSITION, WIREFRAME_COLOR,
};
use crate::core::{TextDisplay, TextGeometry};
use glam::{Mat4, Vec3, Vec4};
use web_sys as web;
use wgpu::util::DeviceExt;

/// Per-star GPU instance, written every frame with the field roll applied.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub brightness: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
    light_color: [f32; 4],
    disc_center: [f32; 4],
    disc_color: [f32; 4],
    text_params: [f32; 4],
    text_color: [f32; 4],
    wire_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PostUniforms {
    resolution: [f32; 2],
    light_uv: [f32; 2],
    density: f32,
    decay: f32,
    weight: f32,
    exposure: f32,
    threshold: f32,
    _pad: f32,
}

const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

struct RenderTargets {
    hdr_view: wgpu::TextureView,
    shaft_a_view: wgpu::TextureView,
    shaft_b_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
}

fn color_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: HDR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

impl RenderTargets {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let half_w = (width.max(1) / 2).max(1);
        let half_h = (height.max(1) / 2).max(1);
        let depth_view = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("depth_tex"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            hdr_view: color_target(device, "hdr_tex", width, height),
            shaft_a_view: color_target(device, "shaft_a", half_w, half_h),
            shaft_b_view: color_target(device, "shaft_b", half_w, half_h),
            depth_view,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    quad_vb: wgpu::Buffer,
    star_instance_vb: wgpu::Buffer,
    star_capacity: usize,

    text_vb: wgpu::Buffer,
    text_ib: wgpu::Buffer,
    text_index_count: u32,
    wire_vb: wgpu::Buffer,
    wire_ib: wgpu::Buffer,
    wire_index_count: u32,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    star_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post_bgl0: wgpu::BindGroupLayout,
    post_bgl1: wgpu::BindGroupLayout,
    post_uniform_buffer: wgpu::Buffer,
    bg_hdr: wgpu::BindGroup,
    bg_from_shaft_a: wgpu::BindGroup,
    bg_shaft_b_only: wgpu::BindGroup,
    bright_pipeline: wgpu::RenderPipeline,
    godrays_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

fn scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    vs: &str,
    fs: &str,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn post_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    fs: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        star_capacity: usize,
        text: &TextGeometry,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Default limits on web to avoid passing unknown fields to older WebGPU impls
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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);

        // ---------------- scene resources ----------------
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
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
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });

        // Shared unit quad (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let star_instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star_instance_vb"),
            size: (std::mem::size_of::<StarInstance>() * star_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        };
        let star_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 16,
                    shader_location: 3,
                },
            ],
        };
        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 6) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };
        let wire_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        };

        let star_pipeline = scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "star_pipeline",
            "vs_star",
            "fs_star",
            &[quad_layout.clone(), star_instance_layout],
            wgpu::PrimitiveTopology::TriangleList,
            ADDITIVE,
            false,
        );
        let disc_pipeline = scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "disc_pipeline",
            "vs_disc",
            "fs_disc",
            &[quad_layout],
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::REPLACE,
            true,
        );
        let mesh_pipeline = scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "mesh_pipeline",
            "vs_mesh",
            "fs_mesh",
            &[mesh_layout],
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::REPLACE,
            true,
        );
        let wire_pipeline = scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "wire_pipeline",
            "vs_wire",
            "fs_wire",
            &[wire_layout],
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::REPLACE,
            true,
        );

        // Text geometry is built once at bootstrap and uploaded here.
        let text_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("text_vb"),
            contents: bytemuck::cast_slice(&text.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let text_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("text_ib"),
            contents: bytemuck::cast_slice(&text.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let wire_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_vb"),
            contents: bytemuck::cast_slice(&text.edge_positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let wire_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_ib"),
            contents: bytemuck::cast_slice(&text.edge_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // ---------------- post resources ----------------
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post_bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let post_bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
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
        let post_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("post_uniforms"),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let post_pl0 = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl0"),
            bind_group_layouts: &[&post_bgl0],
            push_constant_ranges: &[],
        });
        let post_pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl_composite"),
            bind_group_layouts: &[&post_bgl0, &post_bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = post_pipeline(
            &device,
            &post_pl0,
            &post_shader,
            "bright_pipeline",
            "fs_bright",
            HDR_FORMAT,
        );
        let godrays_pipeline = post_pipeline(
            &device,
            &post_pl0,
            &post_shader,
            "godrays_pipeline",
            "fs_godrays",
            HDR_FORMAT,
        );
        let composite_pipeline = post_pipeline(
            &device,
            &post_pl_composite,
            &post_shader,
            "composite_pipeline",
            "fs_composite",
            format,
        );

        let (bg_hdr, bg_from_shaft_a, bg_shaft_b_only) = build_post_bind_groups(
            &device,
            &post_bgl0,
            &post_bgl1,
            &post_uniform_buffer,
            &linear_sampler,
            &targets,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad_vb,
            star_instance_vb,
            star_capacity,
            text_vb,
            text_ib,
            text_index_count: text.indices.len() as u32,
            wire_vb,
            wire_ib,
            wire_index_count: text.edge_indices.len() as u32,
            scene_uniform_buffer,
            scene_bind_group,
            star_pipeline,
            disc_pipeline,
            mesh_pipeline,
            wire_pipeline,
            targets,
            linear_sampler,
            post_bgl0,
            post_bgl1,
            post_uniform_buffer,
            bg_hdr,
            bg_from_shaft_a,
            bg_shaft_b_only,
            bright_pipeline,
            godrays_pipeline,
            composite_pipeline,
            width,
            height,
            clear_color: wgpu::Color {
                r: BACKGROUND_COLOR[0],
                g: BACKGROUND_COLOR[1],
                b: BACKGROUND_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets = RenderTargets::new(&self.device, width, height);
            let (bg_hdr, bg_from_shaft_a, bg_shaft_b_only) = build_post_bind_groups(
                &self.device,
                &self.post_bgl0,
                &self.post_bgl1,
                &self.post_uniform_buffer,
                &self.linear_sampler,
                &self.targets,
            );
            self.bg_hdr = bg_hdr;
            self.bg_from_shaft_a = bg_from_shaft_a;
            self.bg_shaft_b_only = bg_shaft_b_only;
        }
    }

    pub fn render(
        &mut self,
        stars: &[StarInstance],
        display: TextDisplay,
        proj: Mat4,
        view: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let key_dir = -Vec3::from(KEY_LIGHT_POS).normalize();
        let fill_dir = -Vec3::from(FILL_LIGHT_POS).normalize();
        let scene = SceneUniforms {
            proj: proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            key_light: [key_dir.x, key_dir.y, key_dir.z, KEY_LIGHT_INTENSITY],
            fill_light: [fill_dir.x, fill_dir.y, fill_dir.z, FILL_LIGHT_INTENSITY],
            light_color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], AMBIENT_LEVEL],
            disc_center: [DISC_CENTER[0], DISC_CENTER[1], DISC_CENTER[2], DISC_RADIUS],
            disc_color: [DISC_COLOR[0], DISC_COLOR[1], DISC_COLOR[2], DISC_EMISSIVE],
            text_params: [TEXT_POSITION[0], TEXT_POSITION[1], TEXT_POSITION[2], 0.0],
            text_color: [TEXT_COLOR[0], TEXT_COLOR[1], TEXT_COLOR[2], 1.0],
            wire_color: [
                WIREFRAME_COLOR[0],
                WIREFRAME_COLOR[1],
                WIREFRAME_COLOR[2],
                1.0,
            ],
        };
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&scene));

        let count = stars.len().min(self.star_capacity);
        self.queue.write_buffer(
            &self.star_instance_vb,
            0,
            bytemuck::cast_slice(&stars[..count]),
        );

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
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

            rpass.set_pipeline(&self.disc_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.draw(0..6, 0..1);

            // exactly one of the two text forms is drawn
            if display.solid_visible() {
                rpass.set_pipeline(&self.mesh_pipeline);
                rpass.set_vertex_buffer(0, self.text_vb.slice(..));
                rpass.set_index_buffer(self.text_ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.text_index_count, 0, 0..1);
            } else {
                rpass.set_pipeline(&self.wire_pipeline);
                rpass.set_vertex_buffer(0, self.wire_vb.slice(..));
                rpass.set_index_buffer(self.wire_ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.wire_index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.star_instance_vb.slice(..));
            rpass.draw(0..6, 0..count as u32);
        }

        // Light position on screen drives the radial march; behind the
        // camera the shafts are switched off for the frame.
        let clip = proj * view * Vec4::new(DISC_CENTER[0], DISC_CENTER[1], DISC_CENTER[2], 1.0);
        let (light_uv, exposure) = if clip.w > 0.0 {
            let ndc_x = clip.x / clip.w;
            let ndc_y = clip.y / clip.w;
            (
                [ndc_x * 0.5 + 0.5, 1.0 - (ndc_y * 0.5 + 0.5)],
                GODRAYS_EXPOSURE,
            )
        } else {
            ([0.5, 0.5], 0.0)
        };

        // One uniform write per frame: queue writes land before the encoder
        // is submitted, so per-pass values would all read the same anyway.
        // Only the composite pass samples `resolution`.
        let post = PostUniforms {
            resolution: [self.width as f32, self.height as f32],
            light_uv,
            density: GODRAYS_DENSITY,
            decay: GODRAYS_DECAY,
            weight: GODRAYS_WEIGHT,
            exposure,
            threshold: BRIGHT_THRESHOLD,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.post_uniform_buffer, 0, bytemuck::bytes_of(&post));

        // bright pass -> shaft_a
        self.blit(
            &mut encoder,
            "bright_pass",
            &self.targets.shaft_a_view,
            &self.bright_pipeline,
            &self.bg_hdr,
            None,
        );
        // radial march shaft_a -> shaft_b
        self.blit(
            &mut encoder,
            "godrays_pass",
            &self.targets.shaft_b_view,
            &self.godrays_pipeline,
            &self.bg_from_shaft_a,
            None,
        );

        // composite to the swapchain at full resolution
        self.blit(
            &mut encoder,
            "composite",
            &frame_view,
            &self.composite_pipeline,
            &self.bg_hdr,
            Some(&self.bg_shaft_b_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn blit(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        bg0: &wgpu::BindGroup,
        bg1: Option<&wgpu::BindGroup>,
    ) {
        let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        r.set_pipeline(pipeline);
        r.set_bind_group(0, bg0, &[]);
        if let Some(g1) = bg1 {
            r.set_bind_group(1, g1, &[]);
        }
        r.draw(0..3, 0..1);
        drop(r);
    }
}

fn build_post_bind_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> (wgpu::BindGroup, wgpu::BindGroup, wgpu::BindGroup) {
    let full = |label: &str, view: &wgpu::TextureView| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    };
    let bg_hdr = full("bg_hdr", &targets.hdr_view);
    let bg_from_shaft_a = full("bg_from_shaft_a", &targets.shaft_a_view);
    let bg_shaft_b_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_shaft_b_only"),
        layout: bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.shaft_b_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    (bg_hdr, bg_from_shaft_a, bg_shaft_b_only)
}
