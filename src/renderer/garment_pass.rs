//! The instanced garment draw pass.

use super::instance::{Batch, GarmentInstance, InstanceBatches};
use super::mesh::{unit_cube, unit_cylinder, GpuMesh, Vertex, CYLINDER_SEGMENTS};
use super::pipeline_util;
use crate::error::AtelierError;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::shader_composer::{ShaderComposer, GARMENT_SHADER};

/// Bind groups the pass reads, in group order.
pub struct DrawBindGroups<'a> {
    /// Camera uniform (group 0).
    pub camera: &'a wgpu::BindGroup,
    /// Lighting uniform (group 1).
    pub lighting: &'a wgpu::BindGroup,
}

/// Two pipelines (opaque, blended) over two unit meshes, fed by one
/// instance buffer.
pub struct GarmentPass {
    opaque: wgpu::RenderPipeline,
    blended: wgpu::RenderPipeline,
    cube: GpuMesh,
    cylinder: GpuMesh,
    instances: DynamicBuffer<GarmentInstance>,
    ranges: [std::ops::Range<u32>; 4],
}

impl GarmentPass {
    /// Compose the shader and build both pipelines for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Shader`] if the garment shader fails to
    /// compose.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        composer: &mut ShaderComposer,
    ) -> Result<Self, AtelierError> {
        let shader = composer.compose(device, "Garment Shader", GARMENT_SHADER, "garment.wgsl")?;
        let layouts = [camera_layout, lighting_layout];
        let buffers = [Vertex::layout(), GarmentInstance::layout()];
        let opaque = pipeline_util::create_garment_pipeline(
            device,
            "Garment Opaque",
            &shader,
            format,
            false,
            &layouts,
            &buffers,
        );
        let blended = pipeline_util::create_garment_pipeline(
            device,
            "Garment Blended",
            &shader,
            format,
            true,
            &layouts,
            &buffers,
        );
        Ok(Self {
            opaque,
            blended,
            cube: GpuMesh::new(device, "Unit Cube", &unit_cube()),
            cylinder: GpuMesh::new(device, "Unit Cylinder", &unit_cylinder(CYLINDER_SEGMENTS)),
            instances: DynamicBuffer::with_capacity(
                device,
                "Garment Instances",
                32,
                wgpu::BufferUsages::VERTEX,
            ),
            ranges: Default::default(),
        })
    }

    /// Upload this frame's instances.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batches: &InstanceBatches,
    ) {
        let _ = self.instances.write(device, queue, &batches.instances);
        self.ranges = batches.ranges.clone();
    }

    /// Record draws: opaque batches, then blended ones.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        bind_groups: &DrawBindGroups<'a>,
    ) {
        if self.instances.is_empty() {
            return;
        }
        render_pass.set_bind_group(0, bind_groups.camera, &[]);
        render_pass.set_bind_group(1, bind_groups.lighting, &[]);
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));

        for (batch, range) in Batch::ORDER.iter().zip(&self.ranges) {
            if range.is_empty() {
                continue;
            }
            let pipeline = if batch.is_translucent() { &self.blended } else { &self.opaque };
            let mesh = if batch.is_cylinder() { &self.cylinder } else { &self.cube };
            render_pass.set_pipeline(pipeline);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..mesh.index_count, 0, range.clone());
        }
    }
}
