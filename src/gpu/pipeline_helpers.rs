//! Shared wgpu boilerplate for the cube pipelines.

use super::texture::DEPTH_FORMAT;

/// Vertex-visible uniform buffer binding.
#[must_use]
pub fn uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Depth test with writes, nearer fragments win.
#[must_use]
pub fn depth_stencil_state(bias: wgpu::DepthBiasState) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias,
    }
}

/// What differs between the pipelines that draw the cube.
pub struct MeshPipelineDesc<'a> {
    /// Debug label prefix.
    pub label: &'a str,
    /// Triangles for faces, lines for edges and axes.
    pub topology: wgpu::PrimitiveTopology,
    /// Fragment entry point.
    pub fragment_entry: &'a str,
    /// Back-face culling for closed triangle meshes.
    pub cull_mode: Option<wgpu::Face>,
    /// Depth offset; must be zero for line topologies.
    pub depth_bias: wgpu::DepthBiasState,
}

/// Create a depth-tested pipeline with `vs_main`, the given fragment entry
/// point and a single opaque color target.
#[must_use]
pub fn create_mesh_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    vertex_buffers: &[wgpu::VertexBufferLayout<'_>],
    desc: &MeshPipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", desc.label)),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: vertex_buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(desc.fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state(desc.depth_bias)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
