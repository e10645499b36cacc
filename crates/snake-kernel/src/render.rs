//! Grid render pipeline.
//!
//! Draws the 32x32 occupancy mask with a single fullscreen triangle. The
//! fragment shader looks up its cell in a uniform holding one `u32` per row
//! and lights the pixel when the matching bit is set. Row 0 is drawn at the
//! bottom of the window.

use bytemuck::{Pod, Zeroable};
use snake_common::{GpuResult, GRID_HEIGHT, GRID_WIDTH};
use tracing::info;
use wgpu::{util::DeviceExt, Device, Queue};

use crate::validation::with_validation;

/// Background color, also used as the render pass clear color.
pub const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

/// Uniform block read by [`GRID_RENDER_SHADER`].
///
/// `rows` is declared as `array<vec4<u32>, 8>` on the shader side to satisfy
/// the 16-byte array stride of uniform buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct GridUniform {
    /// Surface width in pixels
    pub screen_width: u32,
    /// Surface height in pixels
    pub screen_height: u32,
    /// Columns on the board
    pub grid_width: u32,
    /// Rows on the board
    pub grid_height: u32,
    /// Occupancy bits, `rows[y] >> x & 1`
    pub rows: [u32; GRID_HEIGHT],
}

impl GridUniform {
    /// Creates an empty board for a surface of the given size.
    #[must_use]
    pub const fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            grid_width: GRID_WIDTH as u32,
            grid_height: GRID_HEIGHT as u32,
            rows: [0; GRID_HEIGHT],
        }
    }

    /// Returns whether cell `(x, y)` will be lit.
    #[must_use]
    pub const fn is_lit(&self, x: usize, y: usize) -> bool {
        x < GRID_WIDTH && y < GRID_HEIGHT && (self.rows[y] >> x) & 1 == 1
    }
}

impl Default for GridUniform {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

/// WGSL source for the grid.
pub const GRID_RENDER_SHADER: &str = r"
struct GridUniform {
    screen_width: u32,
    screen_height: u32,
    grid_width: u32,
    grid_height: u32,
    rows: array<vec4<u32>, 8>,
}

@group(0) @binding(0) var<uniform> params: GridUniform;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

// Fullscreen triangle
@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    return out;
}

const BACKGROUND: vec4<f32> = vec4<f32>(0.02, 0.02, 0.05, 1.0);
const LIT: vec4<f32> = vec4<f32>(0.85, 0.9, 0.85, 1.0);
const GAP: f32 = 0.06;

fn row_bits(row: u32) -> u32 {
    return params.rows[row / 4u][row % 4u];
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let grid = vec2<f32>(f32(params.grid_width), f32(params.grid_height));
    let screen = vec2<f32>(f32(params.screen_width), f32(params.screen_height));

    // Square cells, board centered in the window
    let cell_size = min(screen.x / grid.x, screen.y / grid.y);
    let origin = (screen - cell_size * grid) * 0.5;
    let local = (in.position.xy - origin) / cell_size;

    if local.x < 0.0 || local.y < 0.0 || local.x >= grid.x || local.y >= grid.y {
        return BACKGROUND;
    }

    let inner = fract(local);
    if inner.x < GAP || inner.y < GAP || inner.x > 1.0 - GAP || inner.y > 1.0 - GAP {
        return BACKGROUND;
    }

    // Framebuffer y grows downward, board y grows upward
    let cell_x = u32(local.x);
    let cell_y = params.grid_height - 1u - u32(local.y);

    if ((row_bits(cell_y) >> cell_x) & 1u) == 1u {
        return LIT;
    }
    return BACKGROUND;
}
";

/// Render pipeline for the occupancy grid.
pub struct GridRenderPipeline {
    /// Render pipeline
    pipeline: wgpu::RenderPipeline,
    /// Uniform buffer
    uniform_buffer: wgpu::Buffer,
    /// Bind group over the uniform buffer
    bind_group: wgpu::BindGroup,
    /// CPU copy of the uniform
    uniform: GridUniform,
}

impl GridRenderPipeline {
    /// Creates the grid pipeline for the given surface format.
    ///
    /// # Errors
    ///
    /// Returns [`snake_common::GpuError::ShaderError`] if the shader or
    /// pipeline fails validation.
    pub async fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        screen_width: u32,
        screen_height: u32,
    ) -> GpuResult<Self> {
        info!("Creating grid render pipeline...");

        let pipeline = with_validation(device, |device| {
            build_pipeline(device, surface_format)
        })
        .await?;

        let uniform = GridUniform::new(screen_width, screen_height);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        info!("Grid render pipeline created successfully");

        Ok(Self {
            pipeline,
            uniform_buffer,
            bind_group,
            uniform,
        })
    }

    /// Uploads the occupancy rows for the next draw.
    pub fn update(&mut self, queue: &Queue, rows: &[u32; GRID_HEIGHT]) {
        self.uniform.rows = *rows;
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniform));
    }

    /// Sets the surface size.
    pub fn set_screen_size(&mut self, queue: &Queue, width: u32, height: u32) {
        self.uniform.screen_width = width;
        self.uniform.screen_height = height;
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniform));
    }

    /// Draws the grid into the given render pass.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1); // Fullscreen triangle
    }

    /// Returns the current uniform contents.
    #[must_use]
    pub const fn uniform(&self) -> &GridUniform {
        &self.uniform
    }
}

fn build_pipeline(device: &Device, surface_format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Grid Render Shader"),
        source: wgpu::ShaderSource::Wgsl(GRID_RENDER_SHADER.into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Grid Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<GridUniform>() as u64),
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Grid Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Grid Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
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
        cache: None,
    })
}
