//! Tile colors
//!
//! Every clip gets a random color from the "dark" luminosity band so white
//! tile text stays readable. The band follows the classic random-color
//! scheme: pick a hue, find its color family, then pick saturation and
//! brightness from the dark end of that family's range.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hands out one color per clip
pub trait ColorAssigner: Send + Sync {
    /// A fresh color as `#rrggbb`
    fn assign_color(&self) -> String;
}

/// Dark colors from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDark;

impl ColorAssigner for RandomDark {
    fn assign_color(&self) -> String {
        dark_color(&mut rand::thread_rng()).to_hex()
    }
}

/// Dark colors from a seeded RNG; the same seed yields the same sequence
#[derive(Debug)]
pub struct SeededDark {
    rng: Mutex<StdRng>,
}

impl SeededDark {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ColorAssigner for SeededDark {
    fn assign_color(&self) -> String {
        dark_color(&mut *self.rng.lock()).to_hex()
    }
}

/// Build the assigner for an optional seed
pub fn assigner_for(seed: Option<u64>) -> Box<dyn ColorAssigner> {
    match seed {
        Some(seed) => Box::new(SeededDark::new(seed)),
        None => Box::new(RandomDark),
    }
}

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#rrggbb`, lowercase, zero padded
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// COLOR FAMILIES
// =============================================================================

struct Family {
    /// Inclusive hue range in degrees; red wraps below zero
    hue: (i32, i32),
    /// (saturation, minimum brightness) curve, saturation ascending
    lower_bounds: &'static [(i32, i32)],
}

impl Family {
    fn saturation_range(&self) -> (i32, i32) {
        let first = self.lower_bounds[0];
        let last = self.lower_bounds[self.lower_bounds.len() - 1];
        (first.0, last.0)
    }

    fn minimum_brightness(&self, saturation: i32) -> i32 {
        for pair in self.lower_bounds.windows(2) {
            let (s1, v1) = pair[0];
            let (s2, v2) = pair[1];
            if saturation >= s1 && saturation <= s2 {
                let m = (v2 - v1) as f64 / (s2 - s1) as f64;
                let b = v1 as f64 - m * s1 as f64;
                return (m * saturation as f64 + b).round() as i32;
            }
        }
        0
    }
}

const FAMILIES: &[Family] = &[
    // red
    Family {
        hue: (-26, 18),
        lower_bounds: &[
            (20, 100),
            (30, 92),
            (40, 89),
            (50, 85),
            (60, 78),
            (70, 70),
            (80, 60),
            (90, 55),
            (100, 50),
        ],
    },
    // orange
    Family {
        hue: (18, 46),
        lower_bounds: &[
            (20, 100),
            (30, 93),
            (40, 88),
            (50, 86),
            (60, 85),
            (70, 70),
            (100, 70),
        ],
    },
    // yellow
    Family {
        hue: (46, 62),
        lower_bounds: &[
            (25, 100),
            (40, 94),
            (50, 89),
            (60, 86),
            (70, 84),
            (80, 82),
            (90, 80),
            (100, 75),
        ],
    },
    // green
    Family {
        hue: (62, 178),
        lower_bounds: &[
            (30, 100),
            (40, 90),
            (50, 85),
            (60, 81),
            (70, 74),
            (80, 64),
            (90, 50),
            (100, 40),
        ],
    },
    // blue
    Family {
        hue: (178, 257),
        lower_bounds: &[
            (20, 100),
            (30, 86),
            (40, 80),
            (50, 74),
            (60, 60),
            (70, 52),
            (80, 44),
            (90, 39),
            (100, 35),
        ],
    },
    // purple
    Family {
        hue: (257, 282),
        lower_bounds: &[
            (20, 100),
            (30, 87),
            (40, 79),
            (50, 70),
            (60, 65),
            (70, 59),
            (80, 52),
            (90, 45),
            (100, 42),
        ],
    },
    // pink
    Family {
        hue: (282, 334),
        lower_bounds: &[
            (20, 100),
            (30, 90),
            (40, 86),
            (60, 84),
            (80, 80),
            (90, 75),
            (100, 73),
        ],
    },
];

fn family_for(hue: i32) -> &'static Family {
    let hue = if hue >= 334 { hue - 360 } else { hue };
    FAMILIES
        .iter()
        .find(|f| hue >= f.hue.0 && hue <= f.hue.1)
        .unwrap_or(&FAMILIES[0])
}

/// Pick a random color in the dark band
pub fn dark_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let hue = rng.gen_range(0..=360);
    let family = family_for(hue);

    let (_, s_max) = family.saturation_range();
    let saturation = rng.gen_range(s_max - 10..=s_max);

    let b_min = family.minimum_brightness(saturation);
    let brightness = rng.gen_range(b_min..=b_min + 20).min(100);

    hsv_to_rgb(hue, saturation, brightness)
}

/// HSV (degrees, percent, percent) to RGB
fn hsv_to_rgb(hue: i32, saturation: i32, value: i32) -> Rgb {
    // 0 and 360 are the same hue; keep both out of the sector edges
    let h = hue.clamp(1, 359) as f64 / 360.0;
    let s = saturation as f64 / 100.0;
    let v = value as f64 / 100.0;

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: (r * 255.0).floor() as u8,
        g: (g * 255.0).floor() as u8,
        b: (b * 255.0).floor() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_padded_lowercase() {
        let rgb = Rgb {
            r: 0x0a,
            g: 0xff,
            b: 0x00,
        };
        assert_eq!(rgb.to_hex(), "#0aff00");
    }

    #[test]
    fn test_hex_shape() {
        let assigner = RandomDark;
        for _ in 0..500 {
            let color = assigner.assign_color();
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededDark::new(42);
        let b = SeededDark::new(42);
        let first: Vec<String> = (0..10).map(|_| a.assign_color()).collect();
        let second: Vec<String> = (0..10).map(|_| b.assign_color()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_colors_are_dark() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = 2000;
        let total: u32 = (0..samples)
            .map(|_| {
                let rgb = dark_color(&mut rng);
                rgb.r.max(rgb.g).max(rgb.b) as u32
            })
            .sum();
        // HSV value averages around 60% across the dark band
        assert!(total / samples < 190, "average value {}", total / samples);
    }

    #[test]
    fn test_family_lookup_wraps_red() {
        assert_eq!(family_for(350).hue, (-26, 18));
        assert_eq!(family_for(0).hue, (-26, 18));
        assert_eq!(family_for(200).hue, (178, 257));
    }

    #[test]
    fn test_minimum_brightness_interpolates() {
        let blue = family_for(200);
        assert_eq!(blue.minimum_brightness(20), 100);
        assert_eq!(blue.minimum_brightness(100), 35);
        assert_eq!(blue.minimum_brightness(95), 37);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(120, 100, 100), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240, 100, 100), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(hsv_to_rgb(200, 0, 0), Rgb { r: 0, g: 0, b: 0 });
    }
}
