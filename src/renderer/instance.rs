//! Per-instance data for the garment pass.

use std::ops::Range;

use glam::{Mat3, Mat4};

use crate::animation::Poses;
use crate::garment::{Garment, Shape};

/// One placed primitive.
///
/// NOTE: Must match `InstanceInput` in `assets/shaders/garment.wgsl`
/// (144 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GarmentInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3×3, padded to `vec4` columns.
    pub normal: [[f32; 4]; 3],
    /// Linear RGB and final opacity.
    pub color: [f32; 4],
    /// Metalness, roughness, double-sided flag, unused.
    pub material: [f32; 4],
}

impl GarmentInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4,
        10 => Float32x4,
    ];

    /// Instance buffer layout (slot 1).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Final opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.color[3]
    }
}

fn normal_matrix(model: Mat4) -> [[f32; 4]; 3] {
    let m = Mat3::from_mat4(model);
    let n = if m.determinant().abs() > f32::EPSILON {
        m.inverse().transpose()
    } else {
        m
    };
    [
        n.x_axis.extend(0.0).to_array(),
        n.y_axis.extend(0.0).to_array(),
        n.z_axis.extend(0.0).to_array(),
    ]
}

/// Which mesh and pass an instance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    /// Cube, depth-writing pass.
    OpaqueCube,
    /// Cylinder, depth-writing pass.
    OpaqueCylinder,
    /// Cube, blended pass.
    TranslucentCube,
    /// Cylinder, blended pass.
    TranslucentCylinder,
}

impl Batch {
    /// Draw order: opaque geometry first so blended surfaces composite over
    /// it.
    pub const ORDER: [Self; 4] = [
        Self::OpaqueCube,
        Self::OpaqueCylinder,
        Self::TranslucentCube,
        Self::TranslucentCylinder,
    ];

    fn of(shape: &Shape, translucent: bool) -> Self {
        match (shape, translucent) {
            (Shape::Cuboid { .. }, false) => Self::OpaqueCube,
            (Shape::Cylinder { .. }, false) => Self::OpaqueCylinder,
            (Shape::Cuboid { .. }, true) => Self::TranslucentCube,
            (Shape::Cylinder { .. }, true) => Self::TranslucentCylinder,
        }
    }

    /// Whether the batch is drawn with blending.
    #[must_use]
    pub fn is_translucent(self) -> bool {
        matches!(self, Self::TranslucentCube | Self::TranslucentCylinder)
    }

    /// Whether the batch uses the cylinder mesh.
    #[must_use]
    pub fn is_cylinder(self) -> bool {
        matches!(self, Self::OpaqueCylinder | Self::TranslucentCylinder)
    }
}

/// Every primitive of the garment for one frame, grouped by [`Batch`] in
/// [`Batch::ORDER`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBatches {
    /// All instances, contiguous per batch.
    pub instances: Vec<GarmentInstance>,
    /// Instance range of each batch, indexed like [`Batch::ORDER`].
    pub ranges: [Range<u32>; 4],
}

impl InstanceBatches {
    /// Place every primitive of `garment` at `poses` under `object`.
    ///
    /// A primitive goes to the blended pass if its material is translucent
    /// or its final opacity is below 1. Fully transparent primitives are
    /// skipped.
    #[must_use]
    pub fn build(garment: &Garment, poses: &Poses, object: Mat4) -> Self {
        let mut buckets: [Vec<GarmentInstance>; 4] = Default::default();
        for (part, pose) in garment.parts().iter().zip(poses.as_slice()) {
            let group = object * pose.matrix();
            for primitive in part.primitives() {
                let material = primitive.material;
                let model = group * primitive.local_matrix();
                let opacity = (material.opacity * pose.opacity).clamp(0.0, 1.0);
                if opacity <= 0.0 {
                    continue;
                }
                let batch = Batch::of(&primitive.shape, material.translucent || opacity < 1.0);
                let slot = Batch::ORDER.iter().position(|b| *b == batch).unwrap_or(0);
                buckets[slot].push(GarmentInstance {
                    model: model.to_cols_array_2d(),
                    normal: normal_matrix(model),
                    color: [material.color[0], material.color[1], material.color[2], opacity],
                    material: [
                        material.metalness,
                        material.roughness,
                        if material.double_sided { 1.0 } else { 0.0 },
                        0.0,
                    ],
                });
            }
        }

        let mut out = Self::default();
        for (slot, bucket) in buckets.into_iter().enumerate() {
            let start = out.instances.len() as u32;
            out.instances.extend(bucket);
            out.ranges[slot] = start..out.instances.len() as u32;
        }
        out
    }

    /// Instance range for `batch`.
    #[must_use]
    pub fn range(&self, batch: Batch) -> Range<u32> {
        Batch::ORDER
            .iter()
            .position(|b| *b == batch)
            .map_or(0..0, |slot| self.ranges[slot].clone())
    }

    /// Total instance count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
