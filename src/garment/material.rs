/// Surface parameters of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base colour in linear RGB.
    pub color: [f32; 3],
    /// PBR metalness (0 = dielectric, 1 = metal).
    pub metalness: f32,
    /// PBR roughness (0 = mirror, 1 = matte).
    pub roughness: f32,
    /// Multiplied with the part's pose opacity.
    pub opacity: f32,
    /// Drawn in the blended pass rather than the opaque one.
    pub translucent: bool,
    /// Both faces are shaded (no back-face culling).
    pub double_sided: bool,
}

impl Material {
    /// Opaque, single-sided material from an sRGB hex colour.
    #[must_use]
    pub fn opaque(hex: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color: srgb_hex_to_linear(hex),
            metalness,
            roughness,
            opacity: 1.0,
            translucent: false,
            double_sided: false,
        }
    }

    /// Blended, double-sided variant of this material.
    #[must_use]
    pub fn translucent(mut self) -> Self {
        self.translucent = true;
        self.double_sided = true;
        self
    }
}

/// The fixed set of materials the garment is built from.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Exterior body leather.
    pub leather: Material,
    /// Darker leather for panels and sleeves.
    pub leather_dark: Material,
    /// Collar and cuff leather.
    pub collar: Material,
    /// Viscose interior lining.
    pub lining: Material,
    /// Polished brass hardware.
    pub brass: Material,
    /// Dark seam thread, blended but single-sided.
    pub thread: Material,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            leather: Material::opaque(0x3a_20_1d, 0.15, 0.75),
            leather_dark: Material::opaque(0x47_28_25, 0.1, 0.8),
            collar: Material::opaque(0x2a_18_15, 0.2, 0.7),
            lining: Material::opaque(0xd3_ab_80, 0.05, 0.9).translucent(),
            brass: Material::opaque(0xb8_86_0b, 0.95, 0.15),
            thread: Material {
                translucent: true,
                ..Material::opaque(0x1a_0f_0d, 0.0, 1.0)
            },
        }
    }
}

/// Convert a packed `0xRRGGBB` sRGB colour to linear RGB.
#[must_use]
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion_hits_the_extremes() {
        assert_eq!(srgb_hex_to_linear(0x00_00_00), [0.0, 0.0, 0.0]);
        let white = srgb_hex_to_linear(0xff_ff_ff);
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn mid_grey_is_darker_in_linear_space() {
        let [r, g, b] = srgb_hex_to_linear(0x80_80_80);
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn only_lining_and_thread_are_translucent() {
        let palette = Palette::default();
        assert!(palette.lining.translucent);
        assert!(palette.lining.double_sided);
        assert!(palette.thread.translucent);
        assert!(!palette.thread.double_sided);
        for m in [
            palette.leather,
            palette.leather_dark,
            palette.collar,
            palette.brass,
        ] {
            assert!(!m.translucent);
        }
    }
}
