use crate::colorize::ColoredTriangle;
use crate::effects::StripSet;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::render::{FrameRGBA, RenderSettings};

/// Draws colored triangles with `vello_cpu`.
pub struct CpuRenderer {
    settings: RenderSettings,
    width: u16,
    height: u16,
}

impl CpuRenderer {
    pub fn new(canvas: Canvas, settings: RenderSettings) -> LowPolyResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| LowPolyError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| LowPolyError::render("canvas height exceeds u16"))?;
        if !settings.stroke_width.is_finite() || settings.stroke_width < 0.0 {
            return Err(LowPolyError::validation("stroke_width must be finite and >= 0"));
        }
        Ok(Self {
            settings,
            width,
            height,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[tracing::instrument(skip_all, fields(triangles = triangles.len()))]
    pub fn render(&self, triangles: &[ColoredTriangle]) -> LowPolyResult<FrameRGBA> {
        self.render_with_strips(triangles, None)
    }

    /// Like [`Self::render`], then outlines the visible and wide strips on top.
    pub fn render_with_strips(
        &self,
        triangles: &[ColoredTriangle],
        strips: Option<&StripSet>,
    ) -> LowPolyResult<FrameRGBA> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }

        let stroke = self.settings.stroke_width;
        if stroke > 0.0 {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke));
        }
        for tri in triangles {
            let c = tri.color;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            let path = triangle_path(tri.vertices);
            ctx.fill_path(&path);
            if stroke > 0.0 {
                ctx.stroke_path(&path);
            }
        }

        if let Some(set) = strips {
            let [r, g, b, a] = self.settings.strip_rgba;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.max(1.0)));
            for quad in set.visible.iter().chain(&set.wide) {
                ctx.stroke_path(&quad_path(quad.corners()));
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn triangle_path([a, b, c]: [Point; 3]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(b));
    out.line_to(point_to_cpu(c));
    out.line_to(point_to_cpu(a));
    out.close_path();
    out
}

fn quad_path(corners: [Point; 4]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(corners[0]));
    for &p in &corners[1..] {
        out.line_to(point_to_cpu(p));
    }
    out.close_path();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Rgba8;
    use crate::mesh::Triad;

    fn digest_u64(bytes: &[u8]) -> u64 {
        fn mix64(mut z: u64) -> u64 {
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        for chunk in bytes.chunks(8) {
            let mut v = 0u64;
            for (i, &b) in chunk.iter().enumerate() {
                v |= (b as u64) << (i * 8);
            }
            state = mix64(state ^ v);
        }
        state
    }

    fn red_triangle() -> ColoredTriangle {
        ColoredTriangle {
            triad: Triad::new(0, 1, 2),
            vertices: [
                Point::new(0.0, 0.0),
                Point::new(64.0, 0.0),
                Point::new(0.0, 64.0),
            ],
            color: Rgba8::opaque(255, 0, 0),
        }
    }

    #[test]
    fn rejects_oversized_canvas() {
        let canvas = Canvas::new(70_000, 10).unwrap();
        assert!(CpuRenderer::new(canvas, RenderSettings::default()).is_err());
    }

    #[test]
    fn render_is_deterministic_and_nonempty() {
        let renderer =
            CpuRenderer::new(Canvas::new(64, 64).unwrap(), RenderSettings::default()).unwrap();
        let a = renderer.render(&[red_triangle()]).unwrap();
        let b = renderer.render(&[red_triangle()]).unwrap();
        assert_eq!((a.width, a.height), (64, 64));
        assert_eq!(a.data.len(), 64 * 64 * 4);
        assert_eq!(digest_u64(&a.data), digest_u64(&b.data));

        // Near the covered corner the triangle color wins over the black clear.
        let img = a.into_image().unwrap();
        assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(60, 60).0, [0, 0, 0, 255]);
    }

    #[test]
    fn strip_outlines_are_drawn_over_the_clear() {
        let canvas = Canvas::new(80, 60).unwrap();
        let settings = RenderSettings {
            clear_rgba: Some([255, 255, 255, 255]),
            ..RenderSettings::default()
        };
        let renderer = CpuRenderer::new(canvas, settings).unwrap();
        let set = crate::effects::strip_overlays(0, 4, canvas).unwrap();
        let plain = renderer.render(&[]).unwrap();
        let outlined = renderer.render_with_strips(&[], Some(&set)).unwrap();
        assert!(plain.data.iter().all(|&b| b == 255));
        assert_ne!(digest_u64(&plain.data), digest_u64(&outlined.data));
    }
}
