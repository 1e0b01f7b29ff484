//! GPU rendering of the garment.
//!
//! [`Renderer`] owns every GPU resource. It knows nothing about scroll or
//! progress: each frame it receives a camera and a set of placed
//! instances and draws them.

mod garment_pass;
pub mod instance;
pub mod mesh;
pub(crate) mod pipeline_util;

pub use garment_pass::{DrawBindGroups, GarmentPass};
pub use instance::{Batch, GarmentInstance, InstanceBatches};

use crate::camera::{Camera, CameraBinding};
use crate::error::AtelierError;
use crate::garment::srgb_hex_to_linear;
use crate::gpu::lighting::Lighting;
use crate::gpu::render_context::{RenderContext, SurfaceSize};
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::options::{LightingOptions, Options};

/// Clear colour from packed sRGB `0xRRGGBB`, converted for an sRGB surface.
#[must_use]
pub fn clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b] = srgb_hex_to_linear(hex);
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

/// Owns the render context and everything drawn into it.
pub struct Renderer {
    context: RenderContext,
    depth: DepthTexture,
    camera: CameraBinding,
    lighting: Lighting,
    pass: GarmentPass,
    clear: wgpu::Color,
}

impl Renderer {
    /// Build GPU resources on top of an acquired context.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Shader`] if shader composition fails.
    pub fn new(
        context: RenderContext,
        options: &Options,
        camera: &Camera,
    ) -> Result<Self, AtelierError> {
        let mut composer = ShaderComposer::new()?;
        let device = &context.device;
        let camera = CameraBinding::new(device, camera);
        let lighting = Lighting::new(device, &options.lighting);
        let pass = GarmentPass::new(
            device,
            context.format(),
            &camera.layout,
            &lighting.layout,
            &mut composer,
        )?;
        let depth = DepthTexture::new(device, context.size());
        log::debug!(
            "renderer ready: {:?} {}x{}",
            context.format(),
            context.config.width,
            context.config.height
        );
        Ok(Self {
            depth,
            camera,
            lighting,
            pass,
            clear: clear_color(options.render.background),
            context,
        })
    }

    /// Acquire a GPU context for `target` and build the renderer on it.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Gpu`] if no adapter, device or surface is
    /// available, or [`AtelierError::Shader`] if shader composition fails.
    pub async fn for_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
        options: &Options,
        camera: &Camera,
    ) -> Result<Self, AtelierError> {
        let context = RenderContext::new(target, size).await?;
        Self::new(context, options, camera)
    }

    /// Current surface size.
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.context.size()
    }

    /// Resize the surface and depth buffer. Scene resources are kept.
    pub fn resize(&mut self, size: SurfaceSize) {
        if self.context.resize(size) {
            self.depth.ensure_size(&self.context.device, size);
        }
    }

    /// Replace the lighting rig.
    pub fn set_lighting(&mut self, options: &LightingOptions) {
        self.lighting.set_options(&self.context.queue, options);
    }

    /// Replace the clear colour.
    pub fn set_background(&mut self, hex: u32) {
        self.clear = clear_color(hex);
    }

    /// Draw one frame.
    ///
    /// Returns `Ok(false)` when the frame was skipped because the surface
    /// needed reconfiguring or timed out.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] for unrecoverable surface failures.
    pub fn render(
        &mut self,
        camera: &Camera,
        batches: &InstanceBatches,
    ) -> Result<bool, wgpu::SurfaceError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.context.reconfigure();
                return Ok(false);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let queue = &self.context.queue;
        self.camera.update(queue, camera);
        self.pass
            .write_instances(&self.context.device, queue, batches);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Garment Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.clear),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.pass.draw(
                &mut render_pass,
                &DrawBindGroups {
                    camera: &self.camera.bind_group,
                    lighting: &self.lighting.bind_group,
                },
            );
        }
        self.context.submit(encoder);
        frame.present();
        Ok(true)
    }
}
