//! The one mesh in the scene: a colored box drawn once per limb.
//!
//! The box spans `x, z ∈ [-0.5, 0.5]` and `y ∈ [-1, 0]`, so its origin
//! sits at the centre of the top face where a limb hangs from its joint.
//! Faces, black edges and the local XYZ axes share one vertex buffer and
//! one index buffer, drawn as three index ranges with instancing over the
//! limbs' model matrices.

use std::ops::Range;

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_helpers::{self, MeshPipelineDesc};
use super::render_context::RenderContext;
use super::texture::DepthTarget;
use crate::scene::{FrameMatrices, LimbId};

/// Vertex of the cube or axis mesh.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Linear RGBA.
    pub color: [f32; 4],
}

const ORANGE: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.5, 1.0, 1.0];
const AXIS_X: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const AXIS_Y: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const AXIS_Z: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

const fn vertex(position: [f32; 3], color: [f32; 4]) -> CubeVertex {
    CubeVertex { position, color }
}

/// Eight box corners followed by three axis segments.
pub const VERTICES: [CubeVertex; 14] = [
    vertex([-0.5, 0.0, 0.5], ORANGE),
    vertex([-0.5, -1.0, 0.5], ORANGE),
    vertex([0.5, -1.0, 0.5], BLUE),
    vertex([0.5, 0.0, 0.5], BLUE),
    vertex([-0.5, 0.0, -0.5], ORANGE),
    vertex([-0.5, -1.0, -0.5], ORANGE),
    vertex([0.5, -1.0, -0.5], BLUE),
    vertex([0.5, 0.0, -0.5], BLUE),
    vertex([0.0, 0.0, 0.0], AXIS_X),
    vertex([1.0, 0.0, 0.0], AXIS_X),
    vertex([0.0, 0.0, 0.0], AXIS_Y),
    vertex([0.0, 1.0, 0.0], AXIS_Y),
    vertex([0.0, 0.0, 0.0], AXIS_Z),
    vertex([0.0, 0.0, 1.0], AXIS_Z),
];

/// Face triangles, counter-clockwise seen from outside.
pub const FACE_INDICES: [u16; 36] = [
    0, 1, 2, 7, 6, 5, 3, 2, 6, 4, 0, 3, 4, 5, 1, 1, 5, 6, 0, 2, 3, 7, 5, 4, 3, 6, 7, 4, 3, 7, 4, 1,
    0, 1, 6, 2,
];

/// The twelve box edges as line pairs.
pub const EDGE_INDICES: [u16; 24] = [
    0, 1, 1, 2, 2, 3, 3, 0, 0, 4, 4, 7, 7, 6, 6, 2, 6, 5, 5, 4, 5, 1, 7, 3,
];

/// X, Y and Z axis segments as line pairs.
pub const AXIS_INDICES: [u16; 6] = [8, 9, 10, 11, 12, 13];

const FACES: Range<u32> = 0..36;
const EDGES: Range<u32> = 36..60;
const AXES: Range<u32> = 60..66;

/// View and projection, shared by every instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    /// World to camera.
    pub view: [[f32; 4]; 4],
    /// Camera to clip (GL depth range, remapped in the shader).
    pub projection: [[f32; 4]; 4],
}

impl FrameUniform {
    /// Column arrays of the frame's camera matrices.
    #[must_use]
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// One limb's model matrix as instance data.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LimbInstance {
    /// Model matrix columns.
    pub model: [[f32; 4]; 4],
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
];

fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: size_of::<LimbInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        },
    ]
}

/// Which parts of each box to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeStyle {
    /// Local XYZ axes.
    pub axes: bool,
    /// Black edges.
    pub edges: bool,
}

/// Draws every limb as a colored box.
pub struct CubeRenderer {
    face_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    axis_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    /// Parts drawn in addition to the faces.
    pub style: CubeStyle,
}

impl CubeRenderer {
    /// Upload the mesh and build the three pipelines.
    #[must_use]
    pub fn new(context: &RenderContext, style: CubeStyle) -> Self {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/cube.wgsl"));

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube Frame Layout"),
            entries: &[pipeline_helpers::uniform_buffer(0)],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });

        let layouts = vertex_layouts();
        let build = |desc: MeshPipelineDesc<'_>| {
            pipeline_helpers::create_mesh_pipeline(
                device,
                &shader,
                &pipeline_layout,
                context.format(),
                &layouts,
                &desc,
            )
        };
        // Faces are pushed back slightly so coplanar edges win the depth test.
        let face_pipeline = build(MeshPipelineDesc {
            label: "Cube Faces",
            topology: wgpu::PrimitiveTopology::TriangleList,
            fragment_entry: "fs_main",
            cull_mode: Some(wgpu::Face::Back),
            depth_bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 1.0,
                clamp: 0.0,
            },
        });
        let edge_pipeline = build(MeshPipelineDesc {
            label: "Cube Edges",
            topology: wgpu::PrimitiveTopology::LineList,
            fragment_entry: "fs_black",
            cull_mode: None,
            depth_bias: wgpu::DepthBiasState::default(),
        });
        let axis_pipeline = build(MeshPipelineDesc {
            label: "Cube Axes",
            topology: wgpu::PrimitiveTopology::LineList,
            fragment_entry: "fs_main",
            cull_mode: None,
            depth_bias: wgpu::DepthBiasState::default(),
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertices"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = [&FACE_INDICES[..], &EDGE_INDICES[..], &AXIS_INDICES[..]].concat();
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Limb Instances"),
            size: (size_of::<LimbInstance>() * LimbId::COUNT) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Frame Uniform"),
            contents: bytemuck::bytes_of(&FrameUniform::new(Mat4::IDENTITY, Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let (width, height) = context.size();
        Self {
            face_pipeline,
            edge_pipeline,
            axis_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_count: 0,
            frame_buffer,
            frame_bind_group,
            depth: DepthTarget::new(device, width, height),
            style,
        }
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 && self.depth.size() != (width, height) {
            self.depth = DepthTarget::new(device, width, height);
        }
    }

    /// Upload the frame's camera matrices and limb transforms.
    pub fn prepare(&mut self, queue: &wgpu::Queue, frame: &FrameMatrices) {
        let uniform = FrameUniform::new(frame.view, frame.projection);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniform));

        let instances: Vec<LimbInstance> = frame
            .limbs
            .iter()
            .take(LimbId::COUNT)
            .map(|limb| LimbInstance {
                model: limb.model.to_cols_array_2d(),
            })
            .collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        self.instance_count = instances.len() as u32;
    }

    /// Clear `target` and draw every limb into it.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cube Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
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

        if self.instance_count == 0 {
            return;
        }

        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        let instances = 0..self.instance_count;
        pass.set_pipeline(&self.face_pipeline);
        pass.draw_indexed(FACES, 0, instances.clone());
        if self.style.axes {
            pass.set_pipeline(&self.axis_pipeline);
            pass.draw_indexed(AXES, 0, instances.clone());
        }
        if self.style.edges {
            pass.set_pipeline(&self.edge_pipeline);
            pass.draw_indexed(EDGES, 0, instances);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn position(i: u16) -> Vec3 {
        Vec3::from_array(VERTICES[usize::from(i)].position)
    }

    #[test]
    fn faces_wind_outward() {
        let centre = Vec3::new(0.0, -0.5, 0.0);
        for tri in FACE_INDICES.chunks_exact(3) {
            let (a, b, c) = (position(tri[0]), position(tri[1]), position(tri[2]));
            let normal = (b - a).cross(c - a);
            let outward = (a + b + c) / 3.0 - centre;
            assert!(normal.dot(outward) > 0.0, "{tri:?}");
        }
    }

    #[test]
    fn edges_are_unit_length_box_edges() {
        for pair in EDGE_INDICES.chunks_exact(2) {
            assert!(pair.iter().all(|&i| i < 8));
            let len = (position(pair[0]) - position(pair[1])).length();
            assert!((len - 1.0).abs() < 1e-6, "{pair:?}");
        }
    }

    #[test]
    fn axes_start_at_origin_and_match_colors() {
        let expected = [AXIS_X, AXIS_Y, AXIS_Z];
        for (pair, color) in AXIS_INDICES.chunks_exact(2).zip(expected) {
            assert_eq!(position(pair[0]), Vec3::ZERO);
            assert!((position(pair[1]).length() - 1.0).abs() < 1e-6);
            assert_eq!(VERTICES[usize::from(pair[1])].color, color);
        }
    }

    #[test]
    fn draw_ranges_cover_index_tables() {
        assert_eq!(FACES.len(), FACE_INDICES.len());
        assert_eq!(EDGES.len(), EDGE_INDICES.len());
        assert_eq!(AXES.len(), AXIS_INDICES.len());
        assert_eq!(FACES.end, EDGES.start);
        assert_eq!(EDGES.end, AXES.start);
    }

    #[test]
    fn uniform_layout_is_two_matrices() {
        assert_eq!(size_of::<FrameUniform>(), 128);
        assert_eq!(size_of::<LimbInstance>(), 64);
        assert_eq!(size_of::<CubeVertex>(), 28);
    }
}
