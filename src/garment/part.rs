use glam::{EulerRot, Mat4, Quat, Vec3};

use super::material::Material;

/// Stable identifier of a part: its index in the garment arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub(super) u32);

impl PartId {
    /// Arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opacity bounds of a soft part, interpolated with progress.
///
/// The fade runs over the progress window `[from, until]`; outside it the
/// opacity holds at `base` or `full`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftOpacity {
    /// Opacity when assembled.
    pub base: f32,
    /// Opacity when fully exploded.
    pub full: f32,
    /// Progress at which the fade starts.
    pub from: f32,
    /// Progress at which the fade completes.
    pub until: f32,
}

impl SoftOpacity {
    /// Fade position in `[0, 1]` for progress `t`.
    ///
    /// Exactly 0 at or before `from` and exactly 1 at or after `until`.
    #[must_use]
    pub fn ramp(&self, t: f32) -> f32 {
        if t <= self.from {
            0.0
        } else if t >= self.until {
            1.0
        } else {
            ((t - self.from) / (self.until - self.from)).clamp(0.0, 1.0)
        }
    }
}

/// Geometry of a primitive, in its own local frame before placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box with the given full extents.
    Cuboid {
        /// Width, height, depth.
        size: Vec3,
    },
    /// Y-aligned cylinder.
    Cylinder {
        /// Radius of both caps.
        radius: f32,
        /// Length along Y.
        height: f32,
    },
}

impl Shape {
    /// Scale applied to the unit mesh (unit cube / unit cylinder of
    /// diameter 1 and height 1, both centred on the origin).
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        match *self {
            Self::Cuboid { size } => size,
            Self::Cylinder { radius, height } => {
                Vec3::new(radius * 2.0, height, radius * 2.0)
            }
        }
    }
}

/// One sub-shape of a part with its fixed placement inside the part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Geometry.
    pub shape: Shape,
    /// Offset from the part origin.
    pub translation: Vec3,
    /// Fixed Euler XYZ rotation in radians, baked into the sub-shape.
    pub rotation: Vec3,
    /// Surface material.
    pub material: Material,
}

impl Primitive {
    /// Box centred on the part origin.
    #[must_use]
    pub fn cuboid(size: Vec3, material: Material) -> Self {
        Self {
            shape: Shape::Cuboid { size },
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            material,
        }
    }

    /// Cylinder centred on the part origin.
    #[must_use]
    pub fn cylinder(radius: f32, height: f32, material: Material) -> Self {
        Self {
            shape: Shape::Cylinder { radius, height },
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            material,
        }
    }

    /// Move the primitive inside its part.
    #[must_use]
    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Bake a fixed rotation into the primitive.
    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Part-local transform: `T · R_fixed · S`.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.shape.scale(),
            euler_xyz(self.rotation),
            self.translation,
        )
    }
}

/// A node of the garment: resting transform, explode metadata and its
/// sub-shapes.
///
/// Only the [`builder`](super::build_garment) constructs parts; all fields
/// are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: PartId,
    name: &'static str,
    assembled_position: Vec3,
    assembled_rotation: Vec3,
    explode_offset: Vec3,
    rotation_offset: Vec3,
    soft: Option<SoftOpacity>,
    primitives: Vec<Primitive>,
}

impl Part {
    pub(super) fn new(id: PartId, name: &'static str, position: Vec3) -> Self {
        Self {
            id,
            name,
            assembled_position: position,
            assembled_rotation: Vec3::ZERO,
            explode_offset: Vec3::ZERO,
            rotation_offset: Vec3::ZERO,
            soft: None,
            primitives: Vec::new(),
        }
    }

    pub(super) fn exploding(mut self, offset: Vec3) -> Self {
        self.explode_offset = offset;
        self
    }

    pub(super) fn turning(mut self, offset: Vec3) -> Self {
        self.rotation_offset = offset;
        self
    }

    pub(super) fn soft(self, base: f32, full: f32) -> Self {
        self.fading(base, full, 0.0, 1.0)
    }

    pub(super) fn fading(mut self, base: f32, full: f32, from: f32, until: f32) -> Self {
        self.soft = Some(SoftOpacity {
            base,
            full,
            from,
            until,
        });
        self
    }

    pub(super) fn with(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Stable name, unique within the garment.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resting position (progress 0).
    #[must_use]
    pub fn assembled_position(&self) -> Vec3 {
        self.assembled_position
    }

    /// Resting Euler XYZ rotation.
    #[must_use]
    pub fn assembled_rotation(&self) -> Vec3 {
        self.assembled_rotation
    }

    /// Displacement reached at progress 1.
    #[must_use]
    pub fn explode_offset(&self) -> Vec3 {
        self.explode_offset
    }

    /// Additional Euler XYZ rotation reached at progress 1.
    #[must_use]
    pub fn rotation_offset(&self) -> Vec3 {
        self.rotation_offset
    }

    /// Opacity bounds when the part is soft.
    #[must_use]
    pub fn soft_opacity(&self) -> Option<SoftOpacity> {
        self.soft
    }

    /// Whether opacity depends on progress.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.soft.is_some()
    }

    /// Sub-shapes in build order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Position when fully exploded.
    #[must_use]
    pub fn exploded_position(&self) -> Vec3 {
        self.assembled_position + self.explode_offset
    }
}

/// Quaternion for an intrinsic X-then-Y-then-Z Euler rotation.
#[must_use]
pub fn euler_xyz(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garment::material::Palette;

    #[test]
    fn cylinder_scale_uses_diameter() {
        let shape = Shape::Cylinder {
            radius: 0.08,
            height: 0.05,
        };
        assert_eq!(shape.scale(), Vec3::new(0.16, 0.05, 0.16));
    }

    #[test]
    fn primitive_matrix_places_scaled_geometry() {
        let brass = Palette::default().brass;
        let tooth = Primitive::cuboid(Vec3::new(0.18, 0.08, 0.06), brass)
            .at(Vec3::new(0.0, -1.3, 0.0));
        let corner = tooth.local_matrix().transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(0.09, -1.26, 0.03)).length() < 1e-6);
    }

    #[test]
    fn fixed_rotation_is_baked_into_the_primitive() {
        let leather = Palette::default().leather_dark;
        let sleeve = Primitive::cuboid(Vec3::ONE, leather)
            .rotated(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        let x = sleeve.local_matrix().transform_vector3(Vec3::X);
        assert!((x - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn fade_window_holds_outside_and_ramps_inside() {
        let fade = SoftOpacity {
            base: 0.0,
            full: 0.7,
            from: 0.2,
            until: 0.5,
        };
        assert_eq!(fade.ramp(0.0), 0.0);
        assert_eq!(fade.ramp(0.2), 0.0);
        assert!((fade.ramp(0.35) - 0.5).abs() < 1e-6);
        assert_eq!(fade.ramp(0.5), 1.0);
        assert_eq!(fade.ramp(1.0), 1.0);
    }

    #[test]
    fn full_window_fade_is_the_identity() {
        let fade = SoftOpacity {
            base: 0.2,
            full: 1.0,
            from: 0.0,
            until: 1.0,
        };
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(fade.ramp(t), t);
        }
    }
}
