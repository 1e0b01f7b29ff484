//! Unit meshes for the two primitive shapes.
//!
//! Both are centred on the origin with unit extent; per-instance scale
//! turns them into panels, sleeves, teeth and snaps.

use std::f32::consts::TAU;

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::garment::Shape;

/// Segments around the cylinder.
pub const CYLINDER_SEGMENTS: u16 = 16;

/// Mesh vertex: position and outward normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout (slot 0).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// CPU-side indexed triangle list with counter-clockwise front faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle indices.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Mesh for `shape` at unit size.
    #[must_use]
    pub fn for_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Cuboid { .. } => unit_cube(),
            Shape::Cylinder { .. } => unit_cylinder(CYLINDER_SEGMENTS),
        }
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u16;
        self.vertices
            .extend(corners.iter().map(|&c| Vertex::new(c, normal)));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// 1×1×1 cube, four vertices per face so each face has a flat normal.
#[must_use]
pub fn unit_cube() -> MeshData {
    // (normal, u, v) with u × v = normal.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in FACES {
        let c = n * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);
        mesh.push_quad([c - u - v, c + u - v, c + u + v, c - u + v], n);
    }
    mesh
}

/// Cylinder of diameter 1 and height 1 along Y, capped at both ends.
#[must_use]
pub fn unit_cylinder(segments: u16) -> MeshData {
    let segments = segments.max(3);
    let ring: Vec<Vec3> = (0..=segments)
        .map(|i| {
            let a = f32::from(i) / f32::from(segments) * TAU;
            Vec3::new(a.sin(), 0.0, a.cos())
        })
        .collect();
    let top = Vec3::Y * 0.5;
    let mut mesh = MeshData::default();

    for pair in ring.windows(2) {
        let (d0, d1) = (pair[0], pair[1]);
        let (b0, b1) = (d0 * 0.5 - top, d1 * 0.5 - top);
        let (t0, t1) = (d0 * 0.5 + top, d1 * 0.5 + top);
        let base = mesh.vertices.len() as u16;
        mesh.vertices.extend([
            Vertex::new(b0, d0),
            Vertex::new(b1, d1),
            Vertex::new(t1, d1),
            Vertex::new(t0, d0),
        ]);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    for (cap, normal) in [(top, Vec3::Y), (-top, Vec3::NEG_Y)] {
        let centre = mesh.vertices.len() as u16;
        mesh.vertices.push(Vertex::new(cap, normal));
        for d in &ring {
            mesh.vertices.push(Vertex::new(*d * 0.5 + cap, normal));
        }
        for i in 0..segments {
            let (a, b) = (centre + 1 + i, centre + 2 + i);
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }
    mesh
}

/// Mesh uploaded to vertex and index buffers.
pub struct GpuMesh {
    /// Vertex buffer (slot 0).
    pub vertex_buffer: wgpu::Buffer,
    /// `u16` index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload `data`.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}
