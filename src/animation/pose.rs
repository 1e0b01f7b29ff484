use glam::{Mat4, Vec3};

use super::interpolation::{lerp_f32, offset_by, scale_angles};
use crate::garment::{euler_xyz, Garment, Part};
use crate::scroll::Progress;

/// Transform and opacity of one part at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPose {
    /// Part origin in object space.
    pub position: Vec3,
    /// Progress-driven Euler XYZ rotation of the part group, in radians.
    /// Composes with each primitive's fixed rotation.
    pub rotation: Vec3,
    /// Opacity multiplier (1 for rigid parts).
    pub opacity: f32,
}

impl PartPose {
    /// Object-space matrix of the part group: `T(position) · R(rotation)`.
    ///
    /// Primitives are placed by `pose.matrix() * primitive.local_matrix()`.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(euler_xyz(self.rotation), self.position)
    }
}

/// Pose of `part` at `progress`.
///
/// Linear in progress and free of hidden state: the same inputs always
/// give the same pose. The resting transform recorded at construction is
/// the only origin ever used.
#[must_use]
pub fn pose_at(part: &Part, progress: Progress) -> PartPose {
    let t = progress.value();
    let opacity = part
        .soft_opacity()
        .map_or(1.0, |soft| lerp_f32(soft.base, soft.full, soft.ramp(t)));
    PartPose {
        position: offset_by(
            part.assembled_position(),
            part.explode_offset(),
            t,
        ),
        rotation: part.assembled_rotation()
            + scale_angles(part.rotation_offset(), t),
        opacity,
    }
}

/// Poses of every part, indexed like [`Garment::parts`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Poses {
    poses: Vec<PartPose>,
    progress: Progress,
}

impl Poses {
    /// Progress these poses were evaluated at.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Pose of the part at arena index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PartPose> {
        self.poses.get(index)
    }

    /// All poses in build order.
    #[must_use]
    pub fn as_slice(&self) -> &[PartPose] {
        &self.poses
    }
}

/// Evaluate every part of `garment` at `progress`.
#[must_use]
pub fn interpolate(garment: &Garment, progress: Progress) -> Poses {
    Poses {
        poses: garment
            .parts()
            .iter()
            .map(|part| pose_at(part, progress))
            .collect(),
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garment::{build_garment, names};

    #[test]
    fn assembled_at_zero_for_every_part() {
        let garment = build_garment();
        for part in garment.parts() {
            let pose = pose_at(part, Progress::START);
            assert_eq!(pose.position, part.assembled_position(), "{}", part.name());
            assert_eq!(pose.rotation, part.assembled_rotation());
        }
    }

    #[test]
    fn exploded_at_one_for_every_part() {
        let garment = build_garment();
        for part in garment.parts() {
            let pose = pose_at(part, Progress::END);
            assert_eq!(
                pose.position,
                part.assembled_position() + part.explode_offset(),
                "{}",
                part.name()
            );
            assert_eq!(
                pose.rotation,
                part.assembled_rotation() + part.rotation_offset()
            );
        }
    }

    #[test]
    fn interpolation_is_idempotent() {
        let garment = build_garment();
        let progress = Progress::new(0.4);
        let first = interpolate(&garment, progress);
        let second = interpolate(&garment, progress);
        assert_eq!(first, second);
    }

    #[test]
    fn revisiting_progress_does_not_drift() {
        let garment = build_garment();
        let before = interpolate(&garment, Progress::new(0.4));
        for raw in [0.9, 0.1, 1.0, 0.0, 0.65] {
            let _ = interpolate(&garment, Progress::new(raw));
        }
        assert_eq!(interpolate(&garment, Progress::new(0.4)), before);
    }

    #[test]
    fn soft_opacity_spans_base_to_full() {
        let garment = build_garment();
        let Some(lining) = garment.part_named(names::LINING) else {
            panic!("lining missing");
        };
        let Some(soft) = lining.soft_opacity() else {
            panic!("lining is not soft");
        };
        assert_eq!(pose_at(lining, Progress::START).opacity, soft.base);
        assert_eq!(pose_at(lining, Progress::END).opacity, soft.full);
        let mid = pose_at(lining, Progress::new(0.5)).opacity;
        assert!((mid - 0.6).abs() < 1e-6);
    }

    #[test]
    fn stitching_fades_in_over_its_window() {
        let garment = build_garment();
        let Some(stitching) = garment.part_named(names::STITCHING) else {
            panic!("stitching missing");
        };
        let opacity = |p: f32| pose_at(stitching, Progress::new(p)).opacity;
        assert_eq!(opacity(0.0), 0.0);
        assert_eq!(opacity(0.2), 0.0);
        assert!((opacity(0.35) - 0.35).abs() < 1e-6);
        assert_eq!(opacity(0.5), 0.7);
        assert_eq!(opacity(1.0), 0.7);
    }

    #[test]
    fn rigid_parts_stay_opaque() {
        let garment = build_garment();
        let poses = interpolate(&garment, Progress::new(0.7));
        for (part, pose) in garment.parts().iter().zip(poses.as_slice()) {
            if !part.is_soft() {
                assert_eq!(pose.opacity, 1.0);
            }
        }
    }

    #[test]
    fn group_rotation_composes_with_fixed_rotation() {
        let garment = build_garment();
        let Some(sleeve) = garment.part_named(names::LEFT_SLEEVE) else {
            panic!("sleeve missing");
        };
        let pose = pose_at(sleeve, Progress::END);
        let shape = sleeve.primitives()[0];
        let world = pose.matrix() * shape.local_matrix();
        // Fixed +0.2 about Z plus the group's -0.4 leaves -0.2 overall.
        let (_, rotation, _) = world.to_scale_rotation_translation();
        let (_, _, z) = rotation.to_euler(glam::EulerRot::XYZ);
        assert!((z - (-0.2)).abs() < 1e-5, "z = {z}");
    }

    #[test]
    fn poses_follow_arena_order() {
        let garment = build_garment();
        let poses = interpolate(&garment, Progress::new(0.3));
        assert_eq!(poses.as_slice().len(), garment.len());
        assert_eq!(poses.progress(), Progress::new(0.3));
        for part in garment.parts() {
            assert_eq!(
                poses.get(part.id().index()),
                Some(&pose_at(part, Progress::new(0.3)))
            );
        }
    }
}
