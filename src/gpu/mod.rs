//! wgpu state and per-frame rendering.
//!
//! All animation runs on the CPU; the GPU side is two instanced passes
//! (point sprites and thin-quad lines) fed from rewritten buffers each
//! frame. Which passes draw depends on the router's active mode.

mod lines;
mod points;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::config::Capacities;
use crate::error::GpuError;
use crate::router::{Mode, Router};
use lines::LinePass;
use points::{PointInstance, PointPass};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-pass opacities of the translucent materials.
const FIELD_OPACITY: f32 = 0.8;
const BURST_OPACITY: f32 = 0.9;
/// Wireframe edge opacity while the mesh is visible.
const MESH_LINE_OPACITY: f32 = 0.7;
const MESH_LINE_HALF_WIDTH: f32 = 0.004;
const CONNECTION_HALF_WIDTH: f32 = 0.002;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    time: f32,
    delta_time: f32,
    _padding: [f32; 2],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    field_points: PointPass,
    burst_points: PointPass,
    mesh_lines: LinePass,
    burst_lines: LinePass,
    instance_scratch: Vec<PointInstance>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, caps: &Capacities) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let uniforms = Uniforms {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            time: 0.0,
            delta_time: 0.0,
            _padding: [0.0; 2],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let field_points =
            PointPass::new(&device, &uniform_buffer, surface_format, caps.particle_count);
        let burst_points =
            PointPass::new(&device, &uniform_buffer, surface_format, caps.burst_capacity);
        // Icosphere edge count is fixed; 128 leaves headroom.
        let mesh_lines = LinePass::new(
            &device,
            &uniform_buffer,
            surface_format,
            128,
            MESH_LINE_HALF_WIDTH,
        );
        let burst_lines = LinePass::new(
            &device,
            &uniform_buffer,
            surface_format,
            caps.max_connections,
            CONNECTION_HALF_WIDTH,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            depth_texture,
            field_points,
            burst_points,
            mesh_lines,
            burst_lines,
            instance_scratch: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Upload this frame's scene from the router and draw it.
    pub fn render(
        &mut self,
        router: &Router,
        time: f32,
        delta_time: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let uniforms = Uniforms {
            view_proj: router.camera.view_proj().to_cols_array_2d(),
            time,
            delta_time,
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        // Pointer tilt is applied on top of each object's own rotation.
        let tilt = router.tilt();
        let tilt_mat = Mat4::from_euler(EulerRot::XYZ, tilt.x, tilt.y, 0.0);

        match router.mode() {
            Mode::Particles => {
                let field = router.field();
                self.instance_scratch.clear();
                self.instance_scratch.extend(
                    field
                        .particles()
                        .iter()
                        .zip(field.colors())
                        .map(|(p, &c)| PointInstance::new(p.current, field.point_size(), c)),
                );
                self.field_points.upload(
                    &self.queue,
                    &self.instance_scratch,
                    tilt_mat * field.model_matrix(),
                    FIELD_OPACITY,
                );
                self.burst_points.clear();
                self.mesh_lines.clear();
                self.burst_lines.clear();
            }
            Mode::Wireframe => {
                let body = router.body();
                self.field_points.clear();

                if body.is_mesh_visible() {
                    self.mesh_lines.upload(
                        &self.queue,
                        body.edges(),
                        tilt_mat * body.mesh_model_matrix(),
                        body.color(),
                        MESH_LINE_OPACITY,
                    );
                } else {
                    self.mesh_lines.clear();
                }

                if body.particles().is_empty() {
                    self.burst_points.clear();
                    self.burst_lines.clear();
                } else {
                    let burst_model = tilt_mat * body.burst_model_matrix();
                    self.instance_scratch.clear();
                    self.instance_scratch.extend(body.particles().iter().map(|p| {
                        PointInstance::new(p.current, body.burst_point_size(), body.color())
                    }));
                    self.burst_points.upload(
                        &self.queue,
                        &self.instance_scratch,
                        burst_model,
                        BURST_OPACITY,
                    );
                    self.burst_lines.upload(
                        &self.queue,
                        body.connections(),
                        burst_model,
                        body.color(),
                        body.connection_opacity(),
                    );
                }
            }
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.05,
                            a: 1.0,
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.mesh_lines.draw(&mut render_pass);
            self.burst_lines.draw(&mut render_pass);
            self.field_points.draw(&mut render_pass);
            self.burst_points.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
