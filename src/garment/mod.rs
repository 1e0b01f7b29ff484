//! Procedural garment: an arena of value-only [`Part`] records.
//!
//! The garment is built once per mount by [`build_garment`] and never
//! mutated afterwards. Per-frame state (poses, opacity) lives outside the
//! arena and is derived from it by [`crate::animation`].

mod builder;
mod material;
mod part;

pub use builder::build_garment;
use glam::{Mat4, Quat, Vec3};
pub use material::{srgb_hex_to_linear, Material, Palette};
pub use part::{euler_xyz, Part, PartId, Primitive, Shape, SoftOpacity};
use rustc_hash::FxHashMap;

/// Stable part names.
pub mod names {
    /// Leather torso with front panels.
    pub const BODY: &str = "body";
    /// Left sleeve with cuff.
    pub const LEFT_SLEEVE: &str = "left_sleeve";
    /// Right sleeve with cuff.
    pub const RIGHT_SLEEVE: &str = "right_sleeve";
    /// Collar with lapel flaps.
    pub const COLLAR: &str = "collar";
    /// Interior viscose lining (soft).
    pub const LINING: &str = "lining";
    /// Seam lines along the sides and hem (soft, fades in).
    pub const STITCHING: &str = "stitching";
    /// Main front zipper: teeth and pull.
    pub const ZIPPER: &str = "zipper";
    /// Left pocket zipper.
    pub const LEFT_POCKET_ZIPPER: &str = "left_pocket_zipper";
    /// Right pocket zipper.
    pub const RIGHT_POCKET_ZIPPER: &str = "right_pocket_zipper";
    /// Left collar snap button.
    pub const LEFT_COLLAR_SNAP: &str = "left_collar_snap";
    /// Right collar snap button.
    pub const RIGHT_COLLAR_SNAP: &str = "right_collar_snap";

    /// Every part, in build order.
    pub const ALL: [&str; 11] = [
        BODY,
        LEFT_SLEEVE,
        RIGHT_SLEEVE,
        COLLAR,
        LINING,
        STITCHING,
        ZIPPER,
        LEFT_POCKET_ZIPPER,
        RIGHT_POCKET_ZIPPER,
        LEFT_COLLAR_SNAP,
        RIGHT_COLLAR_SNAP,
    ];
}

/// Placement of the whole object in the world.
///
/// Yaw is supplied per frame (idle oscillation plus the progress-driven
/// turn); position and scale are fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// World position of the garment origin.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -0.5, 0.0),
            scale: 0.9,
        }
    }
}

impl ObjectTransform {
    /// World matrix of the garment for a given yaw (radians about +Y).
    #[must_use]
    pub fn matrix(&self, yaw: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(yaw),
            self.position,
        )
    }
}

/// The built object: parts in build order plus a name index.
#[derive(Debug, Clone, PartialEq)]
pub struct Garment {
    parts: Vec<Part>,
    index: FxHashMap<&'static str, PartId>,
    object: ObjectTransform,
}

impl Garment {
    /// Parts in build order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the garment has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Part by id.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.index())
    }

    /// Id of the part called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PartId> {
        self.index.get(name).copied()
    }

    /// Part called `name`.
    #[must_use]
    pub fn part_named(&self, name: &str) -> Option<&Part> {
        self.find(name).and_then(|id| self.part(id))
    }

    /// Whole-object placement.
    #[must_use]
    pub fn object(&self) -> ObjectTransform {
        self.object
    }

    /// Total number of primitives across all parts.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.parts.iter().map(|p| p.primitives().len()).sum()
    }
}
