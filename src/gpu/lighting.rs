use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::options::LightingOptions;

/// Studio lighting shared by every garment instance.
///
/// NOTE: Must match `LightingUniform` in
/// `assets/shaders/modules/lighting.wgsl` exactly (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Direction towards the key light (normalized).
    pub key_dir: [f32; 3],
    /// Key light intensity.
    pub key_intensity: f32,
    /// Direction towards the rim light (normalized).
    pub rim_dir: [f32; 3],
    /// Rim light intensity.
    pub rim_intensity: f32,
    /// Spot light world position.
    pub spot_position: [f32; 3],
    /// Spot light intensity.
    pub spot_intensity: f32,
    /// Cosine of the spot cone's outer half-angle.
    pub spot_cos_outer: f32,
    /// Cosine of the angle where the penumbra starts.
    pub spot_cos_inner: f32,
    /// Ambient term.
    pub ambient: f32,
    /// Padding to 16-byte alignment.
    pub _pad: f32,
}

impl LightingUniform {
    /// Pack lighting options. Directional lights point from their position
    /// towards the origin; the spot is aimed straight at the origin too.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        let inner = options.spot_angle * (1.0 - options.spot_penumbra.clamp(0.0, 1.0));
        Self {
            key_dir: towards(options.key_position),
            key_intensity: options.key_intensity,
            rim_dir: towards(options.rim_position),
            rim_intensity: options.rim_intensity,
            spot_position: options.spot_position,
            spot_intensity: options.spot_intensity,
            spot_cos_outer: options.spot_angle.cos(),
            spot_cos_inner: inner.cos(),
            ambient: options.ambient,
            _pad: 0.0,
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

fn towards(position: [f32; 3]) -> [f32; 3] {
    Vec3::from_array(position)
        .try_normalize()
        .unwrap_or(Vec3::Y)
        .to_array()
}

/// Lighting uniform buffer and its bind group (group 1).
pub struct Lighting {
    /// CPU copy of the uploaded uniform.
    pub uniform: LightingUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Upload `options` into a fresh uniform buffer.
    #[must_use]
    pub fn new(device: &wgpu::Device, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Lighting Bind Group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Replace the lighting rig. Skips the upload when nothing changed.
    pub fn set_options(&mut self, queue: &wgpu::Queue, options: &LightingOptions) {
        let uniform = LightingUniform::from_options(options);
        if uniform == self.uniform {
            return;
        }
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
