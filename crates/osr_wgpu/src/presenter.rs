use std::borrow::Cow;
use std::sync::Arc;

use log::trace;
use osr_renderer::TextureId;
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::backend::WgpuTextureBackend;

/// Position and uv of one quad corner.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

/// Full-viewport quad as a triangle strip. Frame row 0 is the top row.
const QUAD: [QuadVertex; 4] = [
    QuadVertex {
        position: [-1.0, 1.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [-1.0, -1.0],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        position: [1.0, 1.0],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [1.0, -1.0],
        uv: [1.0, 1.0],
    },
];

const FRAME_SHADER_WGSL: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0) var t_frame: texture_2d<f32>;
@group(0) @binding(1) var t_sampler: sampler;

@vertex
fn vs_main(@location(0) pos: vec2<f32>, @location(1) uv: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(pos, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    // Engine frames carry premultiplied alpha.
    return textureSample(t_frame, t_sampler, in.uv);
}
"#;

/// Engine frames are premultiplied.
const FRAME_BLEND: BlendState = BlendState {
    color: BlendComponent {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        operation: BlendOperation::Add,
    },
    alpha: BlendComponent {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        operation: BlendOperation::Add,
    },
};

fn build_frame_pipeline(
    device: &Device,
    shader: &ShaderModule,
    layout: &PipelineLayout,
    render_format: TextureFormat,
    blend: BlendState,
) -> RenderPipeline {
    let vbuf = [VertexBufferLayout {
        array_stride: size_of::<QuadVertex>() as BufferAddress,
        step_mode: VertexStepMode::Vertex,
        attributes: &[
            VertexAttribute {
                format: VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            },
            VertexAttribute {
                format: VertexFormat::Float32x2,
                offset: 8,
                shader_location: 1,
            },
        ],
    }];
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("osr-frame-pipeline"),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vbuf,
            compilation_options: Default::default(),
        },
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: render_format,
                blend: Some(blend),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}

/// Draws a browser frame texture over the whole viewport of a render pass.
///
/// Two pipelines are kept: one blending the premultiplied frame over what is
/// already in the target, one replacing it. The backend's blend flag, set by
/// transparent surfaces, picks between them.
pub struct TexturePresenter {
    device: Arc<Device>,
    blended: RenderPipeline,
    opaque: RenderPipeline,
    bind_layout: BindGroupLayout,
    sampler: Sampler,
    vertex_buffer: Buffer,
    bound: Option<(TextureId, u64, BindGroup)>,
}

impl TexturePresenter {
    pub fn new(device: Arc<Device>, render_format: TextureFormat) -> Self {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("osr-frame-shader"),
            source: ShaderSource::Wgsl(Cow::Borrowed(FRAME_SHADER_WGSL)),
        });
        let bind_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("osr-frame-bind-layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("osr-frame-pipeline-layout"),
            bind_group_layouts: &[&bind_layout],
            push_constant_ranges: &[],
        });
        let blended = build_frame_pipeline(&device, &shader, &pipeline_layout, render_format, FRAME_BLEND);
        let opaque = build_frame_pipeline(&device, &shader, &pipeline_layout, render_format, BlendState::REPLACE);
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("osr-frame-sampler"),
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Nearest,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            ..Default::default()
        });
        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("osr-frame-quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: BufferUsages::VERTEX,
        });
        Self {
            device,
            blended,
            opaque,
            bind_layout,
            sampler,
            vertex_buffer,
            bound: None,
        }
    }

    /// Record the draw for `texture`. Does nothing until the texture has
    /// received its first frame.
    pub fn draw(&mut self, backend: &WgpuTextureBackend, texture: TextureId, pass: &mut RenderPass<'_>) {
        let Some((view, generation)) = backend.view(texture) else {
            trace!(target: "osr_wgpu", "texture {} has no storage yet", texture.get());
            return;
        };
        let stale = self
            .bound
            .as_ref()
            .is_none_or(|(bound, bound_generation, _)| *bound != texture || *bound_generation != generation);
        if stale {
            let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
                label: Some("osr-frame-bind-group"),
                layout: &self.bind_layout,
                entries: &[
                    BindGroupEntry {
                        binding: 0,
                        resource: BindingResource::TextureView(view),
                    },
                    BindGroupEntry {
                        binding: 1,
                        resource: BindingResource::Sampler(&self.sampler),
                    },
                ],
            });
            self.bound = Some((texture, generation, bind_group));
        }
        let Some((_, _, bind_group)) = self.bound.as_ref() else {
            return;
        };
        let pipeline = if backend.blend_enabled() {
            &self.blended
        } else {
            &self.opaque
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..4, 0..1);
    }

    /// Forget the cached bind group, e.g. after the surface closed.
    pub fn release(&mut self) {
        self.bound = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_viewport_top_row_first() {
        assert_eq!(size_of::<QuadVertex>(), 16);
        let top_left = QUAD[0];
        assert_eq!(top_left.position, [-1.0, 1.0]);
        assert_eq!(top_left.uv, [0.0, 0.0]);
        let bottom_right = QUAD[3];
        assert_eq!(bottom_right.position, [1.0, -1.0]);
        assert_eq!(bottom_right.uv, [1.0, 1.0]);
    }
}
