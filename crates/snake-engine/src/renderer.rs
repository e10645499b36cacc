//! GPU renderer using wgpu.
//!
//! Owns the surface, device and the grid pipeline. Implements
//! [`RenderSink`] so the game loop can hand it the occupancy rows directly.

#![allow(unsafe_code)]

use anyhow::{Context, Result};
use snake_common::{GpuError, GpuResult, GRID_HEIGHT};
use snake_gameplay::RenderSink;
use snake_kernel::{gpu_instance_flags, handle_device_error, GridRenderPipeline, BACKGROUND_COLOR};
use tracing::{debug, info, warn};
use winit::{dpi::PhysicalSize, window::Window};

/// Main renderer that manages GPU resources and rendering.
pub struct Renderer {
    /// wgpu surface for presenting to the window
    surface: wgpu::Surface<'static>,
    /// wgpu device for GPU operations
    device: wgpu::Device,
    /// wgpu queue for submitting commands
    queue: wgpu::Queue,
    /// Surface configuration
    config: wgpu::SurfaceConfiguration,
    /// Grid render pipeline
    grid_pipeline: GridRenderPipeline,
}

impl Renderer {
    /// Creates a new renderer for the given window.
    ///
    /// The window must outlive the renderer.
    pub async fn new(window: &Window, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: wgpu::Dx12Compiler::Fxc,
            flags: gpu_instance_flags(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        // SAFETY: The app drops the renderer before the window it draws to
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::from_window(window)?)?
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find a suitable GPU adapter")?;

        info!("Using GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Snake Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| GpuError::InitFailed(e.to_string()))
            .context("Failed to create GPU device")?;

        device.on_uncaptured_error(Box::new(|e: wgpu::Error| handle_device_error(&e)));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| GpuError::Surface("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        info!("Initializing grid pipeline...");
        let grid_pipeline =
            GridRenderPipeline::new(&device, surface_format, config.width, config.height).await?;

        info!("Renderer initialized successfully");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            grid_pipeline,
        })
    }

    /// Resizes the renderer to match the new window size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            self.grid_pipeline
                .set_screen_size(&self.queue, new_size.width, new_size.height);
        }
    }

    /// Draws the last uploaded grid and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped.
    pub fn present(&mut self) -> GpuResult<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            },
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface acquire timed out, skipping frame");
                return Ok(());
            },
            Err(e) => return Err(GpuError::Surface(e.to_string())),
        };

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
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.grid_pipeline.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl RenderSink for Renderer {
    fn draw(&mut self, _grid_width: u32, _grid_height: u32, rows: &[u32; GRID_HEIGHT]) {
        self.grid_pipeline.update(&self.queue, rows);
    }
}
