#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use std::borrow::Cow;
    use std::collections::HashMap;
    use std::num::NonZeroU64;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use gpu::mesh_cache::interleave;
    use gpu::uniforms::draw_stride;
    use gpu::{DrawUniforms, FrameUniforms, MeshCache, MeshKey, RenderFrame, ShaderKind, Vertex};
    use scene::components::{BlendMode, CullMode, MeshKind, PassState};

    const DEPTH_FORMAT: ::wgpu::TextureFormat = ::wgpu::TextureFormat::Depth24PlusStencil8;
    const INITIAL_DRAW_CAPACITY: u64 = 64;

    #[derive(Debug)]
    struct GpuMesh {
        vertex_buffer: ::wgpu::Buffer,
        index_buffer: Option<::wgpu::Buffer>,
        /// Index count when indexed, vertex count otherwise.
        count: u32,
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    struct PipelineKey {
        shader: ShaderKind,
        pass: PassState,
    }

    #[derive(Debug)]
    pub struct WgpuContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub _canvas: web_sys::HtmlCanvasElement,
        pub clear_color: ::wgpu::Color,
        depth_view: ::wgpu::TextureView,
        frame_buffer: ::wgpu::Buffer,
        frame_bind_group: ::wgpu::BindGroup,
        draw_layout: ::wgpu::BindGroupLayout,
        draw_buffer: ::wgpu::Buffer,
        draw_bind_group: ::wgpu::BindGroup,
        draw_capacity: u64,
        draw_stride: u64,
        pipeline_layout: ::wgpu::PipelineLayout,
        shaders: HashMap<ShaderKind, ::wgpu::ShaderModule>,
        pipelines: HashMap<PipelineKey, ::wgpu::RenderPipeline>,
        meshes: HashMap<MeshKey, GpuMesh>,
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("solar-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn create_draw_buffer(
        device: &::wgpu::Device,
        layout: &::wgpu::BindGroupLayout,
        capacity: u64,
        stride: u64,
    ) -> (::wgpu::Buffer, ::wgpu::BindGroup) {
        let buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("solar-draw-uniforms"),
            size: capacity * stride,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("solar-draw-bg"),
            layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: ::wgpu::BindingResource::Buffer(::wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn uniform_layout_entry(dynamic: bool, size: usize) -> ::wgpu::BindGroupLayoutEntry {
        ::wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: ::wgpu::BindingType::Buffer {
                ty: ::wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: NonZeroU64::new(size as u64),
            },
            count: None,
        }
    }

    pub async fn init_wgpu_from_canvas_id(canvas_id: &str) -> Result<WgpuContext, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document missing"))?;
        let canvas_elem = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas missing"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let width = canvas_elem.width();
        let height = canvas_elem.height();

        // The surface must not outlive its instance; the instance lives for the app.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("solar-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| JsValue::from_str("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let shaders = ShaderKind::ALL
            .into_iter()
            .map(|kind| {
                let module = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
                    label: Some(kind.label()),
                    source: ::wgpu::ShaderSource::Wgsl(Cow::Owned(kind.source())),
                });
                (kind, module)
            })
            .collect::<HashMap<_, _>>();

        let frame_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("solar-frame-bgl"),
            entries: &[uniform_layout_entry(false, std::mem::size_of::<FrameUniforms>())],
        });
        let draw_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("solar-draw-bgl"),
            entries: &[uniform_layout_entry(true, std::mem::size_of::<DrawUniforms>())],
        });

        let frame_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("solar-frame-uniforms"),
            contents: bytemuck::bytes_of(&<FrameUniforms as bytemuck::Zeroable>::zeroed()),
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("solar-frame-bg"),
            layout: &frame_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let stride = draw_stride(device.limits().min_uniform_buffer_offset_alignment);
        let (draw_buffer, draw_bind_group) =
            create_draw_buffer(&device, &draw_layout, INITIAL_DRAW_CAPACITY, stride);

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("solar-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout],
            immediate_size: 0,
        });

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas_elem,
            clear_color: ::wgpu::Color {
                r: 0.004,
                g: 0.006,
                b: 0.02,
                a: 1.0,
            },
            depth_view,
            frame_buffer,
            frame_bind_group,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_capacity: INITIAL_DRAW_CAPACITY,
            draw_stride: stride,
            pipeline_layout,
            shaders,
            pipelines: HashMap::new(),
            meshes: HashMap::new(),
        })
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        ctx.config.width = width.max(1);
        ctx.config.height = height.max(1);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    pub fn surface_size(ctx: &WgpuContext) -> (u32, u32) {
        (ctx.config.width, ctx.config.height)
    }

    fn blend_state(blend: BlendMode) -> ::wgpu::BlendState {
        match blend {
            BlendMode::Opaque => ::wgpu::BlendState::REPLACE,
            BlendMode::Alpha => ::wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => ::wgpu::BlendState {
                color: ::wgpu::BlendComponent {
                    src_factor: ::wgpu::BlendFactor::SrcAlpha,
                    dst_factor: ::wgpu::BlendFactor::One,
                    operation: ::wgpu::BlendOperation::Add,
                },
                alpha: ::wgpu::BlendComponent {
                    src_factor: ::wgpu::BlendFactor::Zero,
                    dst_factor: ::wgpu::BlendFactor::One,
                    operation: ::wgpu::BlendOperation::Add,
                },
            },
        }
    }

    fn cull_face(cull: CullMode) -> Option<::wgpu::Face> {
        match cull {
            CullMode::None => None,
            CullMode::Back => Some(::wgpu::Face::Back),
            CullMode::Front => Some(::wgpu::Face::Front),
        }
    }

    fn create_pipeline(ctx: &WgpuContext, key: PipelineKey) -> Option<::wgpu::RenderPipeline> {
        let module = ctx.shaders.get(&key.shader)?;
        let topology = if key.shader.is_point_list() {
            ::wgpu::PrimitiveTopology::PointList
        } else {
            ::wgpu::PrimitiveTopology::TriangleList
        };

        Some(
            ctx.device
                .create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
                    label: Some(key.shader.label()),
                    layout: Some(&ctx.pipeline_layout),
                    vertex: ::wgpu::VertexState {
                        module,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[::wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<Vertex>() as ::wgpu::BufferAddress,
                            step_mode: ::wgpu::VertexStepMode::Vertex,
                            attributes: &[
                                ::wgpu::VertexAttribute {
                                    format: ::wgpu::VertexFormat::Float32x3,
                                    offset: 0,
                                    shader_location: 0,
                                },
                                ::wgpu::VertexAttribute {
                                    format: ::wgpu::VertexFormat::Float32x3,
                                    offset: 12,
                                    shader_location: 1,
                                },
                                ::wgpu::VertexAttribute {
                                    format: ::wgpu::VertexFormat::Float32x2,
                                    offset: 24,
                                    shader_location: 2,
                                },
                            ],
                        }],
                    },
                    fragment: Some(::wgpu::FragmentState {
                        module,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(::wgpu::ColorTargetState {
                            format: ctx.config.format,
                            blend: Some(blend_state(key.pass.blend)),
                            write_mask: ::wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: ::wgpu::PrimitiveState {
                        topology,
                        strip_index_format: None,
                        front_face: ::wgpu::FrontFace::Ccw,
                        cull_mode: cull_face(key.pass.cull),
                        polygon_mode: ::wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: Some(::wgpu::DepthStencilState {
                        format: DEPTH_FORMAT,
                        depth_write_enabled: key.pass.depth_write,
                        depth_compare: if key.pass.depth_test {
                            ::wgpu::CompareFunction::LessEqual
                        } else {
                            ::wgpu::CompareFunction::Always
                        },
                        stencil: ::wgpu::StencilState::default(),
                        bias: ::wgpu::DepthBiasState::default(),
                    }),
                    multisample: ::wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                }),
        )
    }

    fn upload_mesh(ctx: &mut WgpuContext, cache: &mut MeshCache, kind: &MeshKind) {
        let key = MeshKey::from(kind);
        if ctx.meshes.contains_key(&key) {
            return;
        }
        let (_, data) = cache.get_or_build(kind);
        let vertices = interleave(data);
        let vertex_buffer = ctx
            .device
            .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("solar-mesh-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: ::wgpu::BufferUsages::VERTEX,
            });
        let (index_buffer, count) = if data.indices.is_empty() {
            (None, vertices.len() as u32)
        } else {
            let buffer = ctx
                .device
                .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                    label: Some("solar-mesh-indices"),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: ::wgpu::BufferUsages::INDEX,
                });
            (Some(buffer), data.indices.len() as u32)
        };
        ctx.meshes.insert(
            key,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                count,
            },
        );
    }

    fn ensure_draw_capacity(ctx: &mut WgpuContext, needed: u64) {
        if needed <= ctx.draw_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        let (buffer, bind_group) =
            create_draw_buffer(&ctx.device, &ctx.draw_layout, capacity, ctx.draw_stride);
        ctx.draw_buffer = buffer;
        ctx.draw_bind_group = bind_group;
        ctx.draw_capacity = capacity;
    }

    /// Uploads whatever `frame` needs that is not resident yet, then draws it
    /// in command order inside one depth-tested pass.
    pub fn render_frame(
        ctx: &mut WgpuContext,
        cache: &mut MeshCache,
        frame: &RenderFrame,
        globals: &FrameUniforms,
    ) -> Result<(), JsValue> {
        ensure_draw_capacity(ctx, frame.commands.len() as u64);
        for cmd in &frame.commands {
            upload_mesh(ctx, cache, &cmd.drawable.mesh);
            let key = PipelineKey {
                shader: cmd.shader,
                pass: cmd.drawable.pass,
            };
            if !ctx.pipelines.contains_key(&key)
                && let Some(pipeline) = create_pipeline(ctx, key)
            {
                ctx.pipelines.insert(key, pipeline);
            }
        }

        ctx.queue
            .write_buffer(&ctx.frame_buffer, 0, bytemuck::bytes_of(globals));
        let stride = ctx.draw_stride as usize;
        let mut staging = vec![0u8; frame.commands.len() * stride];
        for (i, cmd) in frame.commands.iter().enumerate() {
            let block = DrawUniforms::from_command(cmd);
            let bytes = bytemuck::bytes_of(&block);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            ctx.queue.write_buffer(&ctx.draw_buffer, 0, &staging);
        }

        let surface_tex = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = surface_tex
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("solar-frame-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("solar-scene-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(ctx.clear_color),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_bind_group(0, &ctx.frame_bind_group, &[]);
            for (i, cmd) in frame.commands.iter().enumerate() {
                let Some(mesh) = ctx.meshes.get(&MeshKey::from(&cmd.drawable.mesh)) else {
                    continue;
                };
                let key = PipelineKey {
                    shader: cmd.shader,
                    pass: cmd.drawable.pass,
                };
                let Some(pipeline) = ctx.pipelines.get(&key) else {
                    continue;
                };
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(1, &ctx.draw_bind_group, &[(i * stride) as u32]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index_buffer {
                    Some(indices) => {
                        rpass.set_index_buffer(indices.slice(..), ::wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..mesh.count, 0, 0..1);
                    }
                    None => rpass.draw(0..mesh.count, 0..1),
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{FrameUniforms, MeshCache, RenderFrame};
    use wasm_bindgen::prelude::JsValue;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas_id(_canvas_id: &str) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn surface_size(_ctx: &WgpuContext) -> (u32, u32) {
        (0, 0)
    }

    pub fn render_frame(
        _ctx: &mut WgpuContext,
        _cache: &mut MeshCache,
        _frame: &RenderFrame,
        _globals: &FrameUniforms,
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{WgpuContext, init_wgpu_from_canvas_id, render_frame, resize_wgpu, surface_size};
