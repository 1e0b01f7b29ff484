use glam::{Mat4, UVec2, Vec2, Vec3};

use crate::animation::Poses;
use crate::garment::{names, Garment, PartId};
use crate::scroll::Progress;

/// A text annotation pinned to a part.
///
/// The anchor is in the part's local frame, so the label travels with the
/// part as it explodes and turns.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    /// Name of the part the label follows.
    pub part: &'static str,
    /// Progress at which the label appears (inclusive).
    pub threshold: f32,
    /// Display text.
    pub text: &'static str,
    /// Part-local anchor offset.
    pub anchor: Vec3,
}

impl LabelSpec {
    /// The four callouts of the leather jacket page.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                part: names::LINING,
                threshold: 0.3,
                text: "VISCOSE LINING",
                anchor: Vec3::new(0.0, 0.5, 0.1),
            },
            Self {
                part: names::STITCHING,
                threshold: 0.4,
                text: "DOUBLE STITCHED",
                anchor: Vec3::new(-1.5, 0.0, 0.0),
            },
            Self {
                part: names::ZIPPER,
                threshold: 0.5,
                text: "YKK BRASS ZIPPER",
                anchor: Vec3::new(0.5, 0.0, 0.1),
            },
            Self {
                part: names::LEFT_COLLAR_SNAP,
                threshold: 0.7,
                text: "BRASS SNAPS",
                anchor: Vec3::new(0.0, 0.2, 0.0),
            },
        ]
    }
}

/// One label's state for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnnotation {
    /// Display text.
    pub text: &'static str,
    /// Anchor in world space at the current pose.
    pub world: Vec3,
    /// Anchor in viewport pixels (origin top-left), `None` when the anchor
    /// is behind the camera. Hosts skip labels without a screen position.
    pub screen: Option<Vec2>,
    /// Whether progress has reached the label's threshold.
    pub visible: bool,
}

impl LabelAnnotation {
    /// Where to draw the label this frame, if anywhere.
    #[must_use]
    pub fn placement(&self) -> Option<Vec2> {
        self.screen.filter(|_| self.visible)
    }

    /// `{text, x, y, visible}`, with `x`/`y` null off screen.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.text,
            "x": self.screen.map(|at| at.x),
            "y": self.screen.map(|at| at.y),
            "visible": self.visible,
        })
    }
}

/// Remembers which labels were drawn last frame.
#[derive(Debug, Clone, Default)]
pub struct LabelVisibility {
    shown: Vec<bool>,
}

impl LabelVisibility {
    /// Record this frame's labels and return the ones that appeared
    /// (`true`) or disappeared (`false`) since the previous call.
    pub fn update(&mut self, labels: &[LabelAnnotation]) -> Vec<(&'static str, bool)> {
        self.shown.resize(labels.len(), false);
        labels
            .iter()
            .zip(self.shown.iter_mut())
            .filter_map(|(label, was)| {
                let now = label.placement().is_some();
                (std::mem::replace(was, now) != now).then_some((label.text, now))
            })
            .collect()
    }
}

/// Resolves label specs against the current poses and camera.
#[derive(Debug, Clone)]
pub struct LabelOverlay {
    labels: Vec<(PartId, LabelSpec)>,
    enabled: bool,
}

impl LabelOverlay {
    /// Overlay over `specs`. Specs naming a part the garment does not have
    /// are dropped with a warning.
    #[must_use]
    pub fn new(garment: &Garment, specs: Vec<LabelSpec>) -> Self {
        let labels = specs
            .into_iter()
            .filter_map(|spec| match garment.find(spec.part) {
                Some(id) => Some((id, spec)),
                None => {
                    log::warn!("label {:?} targets unknown part {:?}", spec.text, spec.part);
                    None
                }
            })
            .collect();
        Self {
            labels,
            enabled: true,
        }
    }

    /// Overlay with the default callouts.
    #[must_use]
    pub fn with_defaults(garment: &Garment) -> Self {
        Self::new(garment, LabelSpec::defaults())
    }

    /// Turn annotation output on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether annotations are produced.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of resolved labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no label resolved to a part.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Annotations for this frame, in label order. Empty when disabled.
    ///
    /// `object` is the whole-garment transform (including yaw), `view_proj`
    /// the camera matrix, and `viewport` the target size in pixels.
    #[must_use]
    pub fn update(
        &self,
        poses: &Poses,
        object: Mat4,
        view_proj: Mat4,
        viewport: UVec2,
        progress: Progress,
    ) -> Vec<LabelAnnotation> {
        if !self.enabled {
            return Vec::new();
        }
        self.labels
            .iter()
            .filter_map(|(id, spec)| {
                let pose = poses.get(id.index())?;
                let world = (object * pose.matrix()).transform_point3(spec.anchor);
                let screen = project_to_viewport(view_proj, world, viewport);
                Some(LabelAnnotation {
                    text: spec.text,
                    world,
                    screen,
                    visible: progress.reached(spec.threshold),
                })
            })
            .collect()
    }
}

/// Project a world point to viewport pixels, `None` if it lies behind the
/// eye.
#[must_use]
pub fn project_to_viewport(view_proj: Mat4, world: Vec3, viewport: UVec2) -> Option<Vec2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let size = viewport.as_vec2();
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * size.x,
        (0.5 - ndc.y * 0.5) * size.y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::interpolate;
    use crate::camera::{Camera, CameraRig};
    use crate::garment::build_garment;
    use crate::options::CameraOptions;

    const VIEWPORT: UVec2 = UVec2::new(1280, 720);

    fn frame(progress: f32) -> Vec<LabelAnnotation> {
        let garment = build_garment();
        let overlay = LabelOverlay::with_defaults(&garment);
        let p = Progress::new(progress);
        let poses = interpolate(&garment, p);
        let rig = CameraRig::new(CameraOptions::default(), 16.0 / 9.0);
        overlay.update(
            &poses,
            garment.object().matrix(0.0),
            rig.camera_at(p).build_matrix(),
            VIEWPORT,
            p,
        )
    }

    fn visible(annotations: &[LabelAnnotation]) -> Vec<&'static str> {
        annotations.iter().filter(|a| a.visible).map(|a| a.text).collect()
    }

    #[test]
    fn all_hidden_when_assembled() {
        let annotations = frame(0.0);
        assert_eq!(annotations.len(), 4);
        assert!(visible(&annotations).is_empty());
    }

    #[test]
    fn all_visible_when_exploded() {
        assert_eq!(
            visible(&frame(1.0)),
            ["VISCOSE LINING", "DOUBLE STITCHED", "YKK BRASS ZIPPER", "BRASS SNAPS"]
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(!visible(&frame(0.499_99)).contains(&"YKK BRASS ZIPPER"));
        assert!(visible(&frame(0.5)).contains(&"YKK BRASS ZIPPER"));
    }

    #[test]
    fn labels_follow_their_part() {
        let early = frame(0.3);
        let late = frame(0.9);
        assert!(late[0].world.z > early[0].world.z);
        assert!(late[0].screen.is_some());
    }

    #[test]
    fn disabled_overlay_is_silent() {
        let garment = build_garment();
        let mut overlay = LabelOverlay::with_defaults(&garment);
        overlay.set_enabled(false);
        let poses = interpolate(&garment, Progress::END);
        let out = overlay.update(
            &poses,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            VIEWPORT,
            Progress::END,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_part_is_dropped() {
        let garment = build_garment();
        let overlay = LabelOverlay::new(
            &garment,
            vec![LabelSpec {
                part: "hood",
                threshold: 0.0,
                text: "HOOD",
                anchor: Vec3::ZERO,
            }],
        );
        assert!(overlay.is_empty());
    }

    #[test]
    fn visibility_ignores_whether_the_anchor_is_on_screen() {
        let garment = build_garment();
        let overlay = LabelOverlay::with_defaults(&garment);
        let poses = interpolate(&garment, Progress::END);
        let facing_away = Camera {
            eye: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::new(0.0, 0.0, 21.0),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 1000.0,
        };
        let out = overlay.update(
            &poses,
            garment.object().matrix(0.0),
            facing_away.build_matrix(),
            VIEWPORT,
            Progress::END,
        );
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|a| a.visible && a.screen.is_none()));
    }

    #[test]
    fn stitching_label_travels_with_the_seams() {
        let garment = build_garment();
        let overlay = LabelOverlay::with_defaults(&garment);
        let at = |p: Progress| {
            let poses = interpolate(&garment, p);
            overlay.update(&poses, Mat4::IDENTITY, Mat4::IDENTITY, VIEWPORT, p)[1].world
        };
        assert!((at(Progress::START) - Vec3::new(-1.5, 0.0, 0.0)).length() < 1e-6);
        assert!((at(Progress::END) - Vec3::new(-1.5, 0.0, -1.6)).length() < 1e-6);
    }

    fn annotation(text: &'static str, screen: Option<Vec2>, visible: bool) -> LabelAnnotation {
        LabelAnnotation { text, world: Vec3::ZERO, screen, visible }
    }

    #[test]
    fn placement_needs_threshold_and_screen_position() {
        let at = Some(Vec2::new(10.0, 20.0));
        assert_eq!(annotation("A", at, true).placement(), at);
        assert_eq!(annotation("A", at, false).placement(), None);
        assert_eq!(annotation("A", None, true).placement(), None);
    }

    #[test]
    fn annotation_json_nulls_missing_position() {
        let on = annotation("A", Some(Vec2::new(1.5, 2.0)), true).to_json();
        assert_eq!(on["text"], "A");
        assert_eq!(on["x"], 1.5);
        assert_eq!(on["y"], 2.0);
        let off = annotation("B", None, true).to_json();
        assert!(off["x"].is_null() && off["y"].is_null());
        assert_eq!(off["visible"], true);
    }

    #[test]
    fn visibility_reports_only_transitions() {
        let at = Some(Vec2::ZERO);
        let mut shown = LabelVisibility::default();
        let hidden = [annotation("A", at, false), annotation("B", at, false)];
        assert!(shown.update(&hidden).is_empty());

        let first = [annotation("A", at, true), annotation("B", at, false)];
        assert_eq!(shown.update(&first), [("A", true)]);
        assert!(shown.update(&first).is_empty());

        let swapped = [annotation("A", None, true), annotation("B", at, true)];
        assert_eq!(shown.update(&swapped), [("A", false), ("B", true)]);
    }

    #[test]
    fn points_behind_the_eye_have_no_screen_position() {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::new(0.0, 0.0, 4.0),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 1000.0,
        };
        let vp = camera.build_matrix();
        assert!(project_to_viewport(vp, Vec3::new(0.0, 0.0, 9.0), VIEWPORT).is_none());
        let centre = project_to_viewport(vp, Vec3::ZERO, VIEWPORT).unwrap();
        assert!((centre - Vec2::new(640.0, 360.0)).length() < 1e-3);
    }
}
