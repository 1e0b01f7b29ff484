//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, growable instance buffers,
//! the depth attachment, the lighting uniform, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Lighting uniform and bind group.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth attachment.
pub mod texture;
