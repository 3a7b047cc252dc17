/// 8-bit RGB color, as the page stylesheet writes them (`#rrggbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Normalized channels (0.0 - 1.0).
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Inactive particles and unknown species.
    pub const GRAY: Self = Self::hex(0xaaaaaa);
    /// Reaction green, also used for bond glyphs.
    pub const MINT: Self = Self::hex(0x00ff88);
    pub const AZURE: Self = Self::hex(0x4488ff);
}

impl Default for Rgb {
    fn default() -> Self {
        Self::GRAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_channels() {
        let c = Rgb::hex(0xff8844);
        assert_eq!((c.r, c.g, c.b), (0xff, 0x88, 0x44));
        assert_eq!(c.to_hex(), 0xff8844);
    }

    #[test]
    fn normalized_channels() {
        let [r, g, b] = Rgb::hex(0xff0000).to_f32();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert_eq!(b, 0.0);
    }
}
