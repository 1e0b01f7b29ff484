//! Depth attachment sized to the surface.

use super::render_context::SurfaceSize;

/// Depth buffer format shared by the texture and the pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A depth texture and its default view.
///
/// Recreated on resize; nothing else in the scene depends on the surface
/// size.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    size: SurfaceSize,
}

impl DepthTexture {
    /// Allocate a depth texture of `size`.
    #[must_use]
    pub fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    /// Size this texture was allocated at.
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Reallocate if `size` differs from the current allocation.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: SurfaceSize) {
        if size != self.size {
            *self = Self::new(device, size);
        }
    }
}
