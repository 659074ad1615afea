use crate::{
    animation::scale::{divide_scale, sinify},
    config::RenderConfig,
    foundation::{
        core::{BezPath, Circle},
        error::OdotsResult,
    },
    render::surface::{LineCap, Surface},
    scene::{SIZE_FACTOR, STROKE_FACTOR, Scene},
};
use kurbo::Shape;

const GLYPH: &str = "O";

/// The "O" glyph with two filled dot accents.
///
/// Three progress segments: the dots swing horizontally in from both sides
/// (segment 0), descend to the glyph's midline (segment 1), then split
/// vertically in mirror (segment 2), ending as a vertical dot pair across
/// the "O" that reads as a cross pattern. The whole motion retraces as the
/// sine pulse falls back to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotGlyph;

impl Scene for DotGlyph {
    fn segments(&self) -> u32 {
        3
    }

    fn draw(
        &self,
        config: &RenderConfig,
        surface: &mut Surface,
        progress: f64,
    ) -> OdotsResult<()> {
        let n = config.segments;
        let side = config.canvas.min_side();
        let size = side / SIZE_FACTOR;

        let sf = sinify(progress);
        let sf1 = divide_scale(sf, 0, n);
        let sf2 = divide_scale(sf, 1, n);
        let sf3 = divide_scale(sf, 2, n);

        surface.set_fill(config.foreground);
        surface.set_stroke_color(config.foreground);
        surface.set_line_cap(LineCap::Round);
        surface.set_line_width(side / STROKE_FACTOR);
        surface.set_font_size(size);

        let metrics = surface.measure_text(GLYPH)?;

        surface.save();
        surface.translate(
            f64::from(config.canvas.width) / 2.0,
            f64::from(config.canvas.height) / 2.0,
        );

        // Glyph body, centered on the canvas. Hosts that shape no glyphs
        // (no usable font) get an equivalent vector outline instead.
        let tw = if metrics.width > 0.0 {
            surface.fill_text(GLYPH, -metrics.width / 2.0, -metrics.height / 2.0)?;
            metrics.width
        } else {
            let tw = size * 0.7;
            surface.fill_path(&ring_outline(tw / 2.0, size / 9.0));
            tw
        };

        for j in 0..2u32 {
            let mirror = 1.0 - 2.0 * f64::from(j);
            surface.save();
            surface.scale(mirror, 1.0);
            let x = -(0.7 * tw) * (1.0 - sf1);
            let y = -0.7 * size + 0.7 * size * sf2 - 0.7 * size * mirror * sf3;
            surface.fill_circle(x, y, size / 9.0);
            surface.restore();
        }

        surface.restore();
        Ok(())
    }
}

/// Ring approximating the "O" outline: outer circle plus a reversed inner
/// circle so the non-zero fill rule leaves the middle open.
fn ring_outline(radius: f64, thickness: f64) -> BezPath {
    let mut path = BezPath::new();
    for el in Circle::new((0.0, 0.0), radius).path_elements(0.1) {
        path.push(el);
    }

    let mut inner = BezPath::new();
    for el in Circle::new((0.0, 0.0), (radius - thickness).max(0.0)).path_elements(0.1) {
        inner.push(el);
    }
    for &el in inner.reverse_subpaths().elements() {
        path.push(el);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::foundation::core::Rgba8;

    fn render_at(progress: f64) -> crate::render::FrameRGBA {
        let config = Variant::Glyph.config();
        let mut surface = Surface::new(config.canvas).unwrap();
        surface.begin_frame(config.background);
        DotGlyph.draw(&config, &mut surface, progress).unwrap();
        surface.snapshot()
    }

    #[test]
    fn draws_foreground_content_at_rest() {
        let frame = render_at(0.0);
        let bg = Rgba8::BLACK.premultiply();
        assert!(
            frame.data.chunks_exact(4).any(|px| px != bg),
            "glyph frame must not be pure background"
        );
    }

    #[test]
    fn is_deterministic_per_progress_value() {
        assert_eq!(render_at(0.25).data, render_at(0.25).data);
    }

    #[test]
    fn midpoint_frame_differs_from_rest_frame() {
        assert_ne!(render_at(0.0).data, render_at(0.5).data);
    }

    #[test]
    fn ring_outline_is_closed_and_nonempty() {
        let path = ring_outline(50.0, 10.0);
        assert!(path.elements().len() > 4);
        let bbox = path.bounding_box();
        assert!(bbox.width() > 90.0 && bbox.width() < 110.0);
    }
}
