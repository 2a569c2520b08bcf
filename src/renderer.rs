//! Draws frames into the window.
//!
//! Pixels are shaded on a rayon pool in double precision by [`escape::evaluate_frame`],
//! uploaded into a texture the size of the viewport, and put on screen with a single
//! full-screen quad. Presentation waits for vsync.

use std::num::NonZeroU32;

use log::{debug, info, trace};
use winit::window::Window;

use crate::{
    colour::Rgba8,
    command_encoder::{self, CommandEncoderExt},
    error::Error,
    escape,
    frame::FrameUniforms,
    screen,
};

const FRAME_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Texture holding the shaded frame, plus the bind group that exposes it to the shader.
struct FrameTexture {
    size: screen::Size,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl FrameTexture {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, size: screen::Size) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FRAME_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        });

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture_view),
            }],
        });

        Self {
            size,
            texture,
            bind_group,
        }
    }

    fn upload(&self, queue: &wgpu::Queue, texels: &[Rgba8]) {
        debug_assert_eq!(texels.len(), self.size.pixel_count());
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(texels),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(self.size.width * std::mem::size_of::<Rgba8>() as u32),
                rows_per_image: NonZeroU32::new(self.size.height),
            },
            extent(self.size),
        );
    }

    fn destroy(self) {
        self.texture.destroy()
    }
}

fn extent(size: screen::Size) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}

pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    render_pipeline: wgpu::RenderPipeline,
    frame_texture: FrameTexture,
    texels: Vec<Rgba8>,
    workers: rayon::ThreadPool,
}

impl Renderer {
    /// Set up the GPU for `window`. The window must outlive the renderer.
    pub fn new(window: &Window) -> Result<Self, Error> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        // A minimised window can start out at zero size, which a surface can't be.
        let size = screen::Size::from(window.inner_size());
        let size = screen::Size::new(size.width.max(1), size.height.max(1));
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(Error::NoAdapter)?;
        let adapter_info = adapter.get_info();
        info!(
            "using adapter {:?} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        // Frame texels are already display values; an sRGB target would re-encode them.
        let formats = surface.get_supported_formats(&adapter);
        let format = formats
            .iter()
            .copied()
            .find(|format| !format.describe().srgb)
            .or_else(|| formats.first().copied())
            .ok_or(Error::NoSurfaceFormat)?;
        debug!("surface format {:?}", format);

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("present-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("present-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("present-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let frame_texture = FrameTexture::new(&device, &bind_group_layout, size);

        let worker_count = num_cpus::get();
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("mandelbrot-worker-{}", index))
            .build()?;
        info!("shading frames on {} workers", worker_count);

        Ok(Self {
            surface,
            device,
            queue,
            surface_configuration,
            bind_group_layout,
            render_pipeline,
            frame_texture,
            texels: Vec::with_capacity(size.pixel_count()),
            workers,
        })
    }

    /// Match the surface and frame texture to a new window size. Empty sizes are ignored.
    pub fn resize(&mut self, size: screen::Size) {
        if size.is_empty() {
            debug!("ignoring resize to {:?}", size);
            return;
        }
        debug!("resizing to {:?}", size);

        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.surface.configure(&self.device, &self.surface_configuration);

        if size != self.frame_texture.size {
            let frame_texture = FrameTexture::new(&self.device, &self.bind_group_layout, size);
            std::mem::replace(&mut self.frame_texture, frame_texture).destroy();
        }
    }

    /// Configure the surface again after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        debug!("reconfiguring surface");
        self.surface.configure(&self.device, &self.surface_configuration);
    }

    pub fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), wgpu::SurfaceError> {
        if uniforms.viewport != self.frame_texture.size {
            self.resize(uniforms.viewport);
        }

        trace!("begin render");

        let texels = &mut self.texels;
        texels.resize(uniforms.viewport.pixel_count(), Rgba8::default());
        self.workers
            .install(|| escape::evaluate_frame(uniforms, texels));
        self.frame_texture.upload(&self.queue, &self.texels);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let command_buffer = command_encoder::record(&self.device, "frame", |command_encoder| {
            command_encoder.with_debug_group("present-pass", |command_encoder| {
                command_encoder.with_render_pass(
                    &wgpu::RenderPassDescriptor {
                        label: Some("present-pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &surface_texture_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: true,
                            },
                        })],
                        depth_stencil_attachment: None,
                    },
                    |render_pass| {
                        render_pass.set_pipeline(&self.render_pipeline);
                        render_pass.set_bind_group(0, &self.frame_texture.bind_group, &[]);
                        render_pass.draw(0..4, 0..1);
                    },
                )
            })
        });

        self.queue.submit([command_buffer]);
        surface_texture.present();

        trace!("end render");
        Ok(())
    }
}
