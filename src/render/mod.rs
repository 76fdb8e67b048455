pub mod cpu;

pub use cpu::CpuRenderer;

use crate::foundation::error::{LowPolyError, LowPolyResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert premultiplied pixels to straight alpha. No-op when already straight.
    pub fn into_straight(mut self) -> Self {
        if !self.premultiplied {
            return self;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
        self
    }

    /// Straight-alpha image, ready for encoding.
    pub fn into_image(self) -> LowPolyResult<image::RgbaImage> {
        let frame = self.into_straight();
        let (w, h) = (frame.width, frame.height);
        let data = frame.data;
        image::RgbaImage::from_raw(w, h, data)
            .ok_or_else(|| LowPolyError::render(format!("frame buffer does not match {w}x{h}")))
    }
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub clear_rgba: Option<[u8; 4]>,
    /// Outline width for triangles, drawn in the fill color.
    pub stroke_width: f64,
    /// Outline color for strip overlays.
    pub strip_rgba: [u8; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: Some([0, 0, 0, 255]),
            stroke_width: 1.0,
            strip_rgba: [0, 0, 255, 255],
        }
    }
}
