use std::fmt;

/// Golden-angle step that spreads consecutive hues around the colour wheel.
const GOLDEN_ANGLE: f64 = 137.5;
const SATURATION: u8 = 70;
const LIGHTNESS: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    /// Converts to 8-bit sRGB channels for terminal rendering.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = self.hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Produces `count` visually distinct chart colours.
pub fn generate_colors(count: usize) -> Vec<Hsl> {
    (0..count)
        .map(|i| Hsl {
            hue: (i as f64 * GOLDEN_ANGLE) % 360.0,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        })
        .collect()
}
