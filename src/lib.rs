// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-synchronized exploded view of a procedural leather jacket,
//! rendered with wgpu.
//!
//! Scrolling the host page produces a single progress value in `[0, 1]`.
//! Every part of the garment, the camera and the label annotations are pure
//! functions of that value: at the top of the page the jacket is
//! assembled, at the bottom each component sits at its exploded offset
//! with the lining fully revealed.
//!
//! # Key entry points
//!
//! - [`ExplodedViewEngine`] - owns the scene and computes each frame
//! - [`garment::build_garment`] - the procedural part arena
//! - [`scroll::ScrollTracker`] - scroll geometry to progress
//! - [`options::Options`] - runtime configuration (scroll, camera, motion,
//!   lighting, surface)
//! - [`Viewer`] - standalone window (`viewer` feature)
//! - `web::mount` - browser host (`web` feature, wasm32 only)
//!
//! # Architecture
//!
//! Host events only publish progress. Once per display frame the engine
//! reads the latest value, interpolates part poses, positions the camera,
//! projects labels and hands an instance list to the [`renderer`], which
//! draws every primitive in two batches: opaque parts first, then the
//! translucent ones with depth writes off.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod garment;
pub mod gpu;
pub mod options;
pub mod overlay;
pub mod renderer;
pub mod schedule;
pub mod scroll;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{ExplodedViewEngine, FrameState};
pub use error::AtelierError;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder, VirtualPage};
