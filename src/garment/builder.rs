//! Procedural construction of the jacket.
//!
//! Offsets are authored so that, fully exploded, the layers fan out front
//! to back (hardware, lining, shell, collar) and the sleeves swing
//! outwards without intersecting the body.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::material::Palette;
use super::part::{Part, PartId, Primitive};
use super::{names, Garment, ObjectTransform};

/// Number of teeth on the main zipper.
const ZIPPER_TEETH: u32 = 12;

struct GarmentBuilder {
    parts: Vec<Part>,
}

impl GarmentBuilder {
    fn new() -> Self {
        Self { parts: Vec::new() }
    }

    fn next_id(&self) -> PartId {
        PartId(self.parts.len() as u32)
    }

    fn add(&mut self, name: &'static str, position: Vec3, f: impl FnOnce(Part) -> Part) {
        let part = f(Part::new(self.next_id(), name, position));
        self.parts.push(part);
    }

    fn finish(self, object: ObjectTransform) -> Garment {
        let index: FxHashMap<&'static str, PartId> =
            self.parts.iter().map(|p| (p.name(), p.id())).collect();
        Garment {
            parts: self.parts,
            index,
            object,
        }
    }
}

/// Build the garment hierarchy.
///
/// Deterministic and infallible: two calls produce identical garments.
#[must_use]
pub fn build_garment() -> Garment {
    let palette = Palette::default();
    let mut b = GarmentBuilder::new();

    add_shell(&mut b, &palette);
    add_sleeves(&mut b, &palette);
    add_collar(&mut b, &palette);

    b.add(names::LINING, Vec3::new(0.0, 0.0, 0.4), |p| {
        p.exploding(Vec3::new(0.0, 0.0, 2.0))
            .soft(0.2, 1.0)
            .with(Primitive::cuboid(
                Vec3::new(2.2, 2.8, 0.08),
                palette.lining,
            ))
    });

    add_stitching(&mut b, &palette);
    add_hardware(&mut b, &palette);

    let garment = b.finish(ObjectTransform::default());
    log::debug!("built garment with {} parts", garment.len());
    garment
}

fn add_shell(b: &mut GarmentBuilder, palette: &Palette) {
    let panel = Vec3::new(0.9, 2.8, 0.05);
    b.add(names::BODY, Vec3::ZERO, |p| {
        p.exploding(Vec3::new(0.0, 0.0, -2.0))
            .with(Primitive::cuboid(Vec3::new(2.4, 3.0, 0.9), palette.leather))
            .with(
                Primitive::cuboid(panel, palette.leather_dark)
                    .at(Vec3::new(-0.5, 0.0, 0.46)),
            )
            .with(
                Primitive::cuboid(panel, palette.leather_dark)
                    .at(Vec3::new(0.5, 0.0, 0.46)),
            )
    });
}

fn add_sleeves(b: &mut GarmentBuilder, palette: &Palette) {
    let sleeve = Vec3::new(1.4, 2.6, 0.7);
    let cuff = Vec3::new(1.5, 0.3, 0.75);
    for (name, side) in [(names::LEFT_SLEEVE, -1.0), (names::RIGHT_SLEEVE, 1.0)] {
        b.add(name, Vec3::new(1.6 * side, 0.1, 0.0), |p| {
            p.exploding(Vec3::new(1.5 * side, 0.4, -1.0))
                .turning(Vec3::new(0.0, 0.0, 0.4 * side))
                .with(
                    Primitive::cuboid(sleeve, palette.leather_dark)
                        .rotated(Vec3::new(0.0, 0.0, -0.2 * side)),
                )
                .with(
                    Primitive::cuboid(cuff, palette.collar)
                        .at(Vec3::new(0.0, -1.4, 0.0)),
                )
        });
    }
}

fn add_collar(b: &mut GarmentBuilder, palette: &Palette) {
    let flap = Vec3::new(0.7, 0.5, 0.15);
    b.add(names::COLLAR, Vec3::new(0.0, 1.7, 0.15), |p| {
        p.exploding(Vec3::new(0.0, 1.2, -1.2))
            .with(Primitive::cuboid(Vec3::new(2.0, 0.6, 1.0), palette.collar))
            .with(
                Primitive::cuboid(flap, palette.collar)
                    .at(Vec3::new(-0.6, 0.1, 0.4))
                    .rotated(Vec3::new(0.3, 0.0, -0.2)),
            )
            .with(
                Primitive::cuboid(flap, palette.collar)
                    .at(Vec3::new(0.6, 0.1, 0.4))
                    .rotated(Vec3::new(0.3, 0.0, 0.2)),
            )
    });
}

fn add_stitching(b: &mut GarmentBuilder, palette: &Palette) {
    let side_seam = Vec3::new(0.02, 2.8, 0.82);
    b.add(names::STITCHING, Vec3::ZERO, |p| {
        p.exploding(Vec3::new(0.0, 0.0, -1.6))
            .fading(0.0, 0.7, 0.2, 0.5)
            .with(Primitive::cuboid(side_seam, palette.thread).at(Vec3::new(-1.1, 0.0, 0.0)))
            .with(Primitive::cuboid(side_seam, palette.thread).at(Vec3::new(1.1, 0.0, 0.0)))
            .with(
                Primitive::cuboid(Vec3::new(2.2, 0.02, 0.82), palette.thread)
                    .at(Vec3::new(0.0, -1.35, 0.0)),
            )
    });
}

fn add_hardware(b: &mut GarmentBuilder, palette: &Palette) {
    b.add(names::ZIPPER, Vec3::new(0.0, 0.0, 0.5), |mut p| {
        p = p.exploding(Vec3::new(0.0, 0.0, 3.0));
        for i in 0..ZIPPER_TEETH {
            p = p.with(
                Primitive::cuboid(Vec3::new(0.18, 0.08, 0.06), palette.brass)
                    .at(Vec3::new(0.0, -1.3 + i as f32 * 0.25, 0.0)),
            );
        }
        p.with(
            Primitive::cuboid(Vec3::new(0.15, 0.35, 0.12), palette.brass)
                .at(Vec3::new(0.0, 1.6, 0.08)),
        )
    });

    let bar = Vec3::new(0.6, 0.06, 0.05);
    for (name, side) in [
        (names::LEFT_POCKET_ZIPPER, -1.0),
        (names::RIGHT_POCKET_ZIPPER, 1.0),
    ] {
        b.add(name, Vec3::new(0.6 * side, -0.5, 0.45), |p| {
            p.exploding(Vec3::new(0.8 * side, -0.3, 2.0))
                .turning(Vec3::new(0.0, 0.0, -0.2 * side))
                .with(
                    Primitive::cuboid(bar, palette.brass)
                        .rotated(Vec3::new(0.0, 0.0, -0.3 * side)),
                )
        });
    }

    for (name, side) in [
        (names::LEFT_COLLAR_SNAP, -1.0),
        (names::RIGHT_COLLAR_SNAP, 1.0),
    ] {
        b.add(name, Vec3::new(0.4 * side, 1.6, 0.5), |p| {
            p.exploding(Vec3::new(0.5 * side, 0.8, 1.8)).with(
                Primitive::cylinder(0.08, 0.05, palette.brass)
                    .rotated(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
            )
        });
    }
}
