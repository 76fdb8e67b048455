use crate::foundation::error::{LowPolyError, LowPolyResult};

pub use kurbo::{Point, Vec2};

/// 0-based index into an animation's frame history.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// Index of the frame that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Visible canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas with both dimensions strictly positive.
    pub fn new(width: u32, height: u32) -> LowPolyResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> LowPolyResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LowPolyError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }

    /// Center of the canvas in pixel space.
    pub fn center(&self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> LowPolyResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> LowPolyResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| LowPolyError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(LowPolyError::validation("hex color must be ascii"));
        }

        match s.len() {
            6 => Ok(Self::opaque(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(LowPolyError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Componentwise linear interpolation in straight sRGB, `t` clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        let t = t.clamp(0.0, 1.0);
        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
        let c = Canvas::new(400, 300).unwrap();
        assert_eq!(c.center(), Point::new(200.0, 150.0));
    }

    #[test]
    fn hex_parses_with_and_without_alpha() {
        assert_eq!(
            Rgba8::from_hex("#d53e4f").unwrap(),
            Rgba8::opaque(0xd5, 0x3e, 0x4f)
        );
        assert_eq!(
            Rgba8::from_hex("FFFFFF80").unwrap(),
            Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 128
            }
        );
        assert!(Rgba8::from_hex("#abc").is_err());
        assert!(Rgba8::from_hex("#gg0000").is_err());
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Rgba8::opaque(10, 20, 30);
        let b = Rgba8::opaque(200, 210, 220);
        assert_eq!(Rgba8::lerp(a, b, 0.0), a);
        assert_eq!(Rgba8::lerp(a, b, 1.0), b);
        assert_eq!(Rgba8::lerp(a, b, 0.5), Rgba8::opaque(105, 115, 125));
    }
}
