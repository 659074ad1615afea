use crate::{
    animation::scale::{divide_scale, sinify},
    config::RenderConfig,
    foundation::error::OdotsResult,
    render::surface::{LineCap, Surface},
    scene::{SIZE_FACTOR, STROKE_FACTOR, Scene},
};

/// Growing ring with outlined dots and four cross arms.
///
/// Eight progress segments: the ring grows from the center (segment 0), the
/// two outlined dots swing in, descend and split like the glyph variant's
/// accents (segments 1–3), and four arms grow outward from the ring rim
/// (segments 4–7), one per direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingDots;

const ARM_DIRS: [(f64, f64); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

impl Scene for RingDots {
    fn segments(&self) -> u32 {
        8
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
        let sub = |i: u32| divide_scale(sf, i, n);

        surface.set_fill(config.foreground);
        surface.set_stroke_color(config.foreground);
        surface.set_line_cap(LineCap::Round);
        surface.set_line_width(side / STROKE_FACTOR);

        surface.save();
        surface.translate(
            f64::from(config.canvas.width) / 2.0,
            f64::from(config.canvas.height) / 2.0,
        );

        let ring_r = (size / 2.0) * sub(0);
        if ring_r > 0.0 {
            surface.stroke_circle(0.0, 0.0, ring_r);
        }

        for j in 0..2u32 {
            let mirror = 1.0 - 2.0 * f64::from(j);
            surface.save();
            surface.scale(mirror, 1.0);
            let x = -(0.8 * size) * (1.0 - sub(1));
            let y = -0.8 * size + 0.8 * size * sub(2) - 0.8 * size * mirror * sub(3);
            surface.stroke_circle(x, y, size / 9.0);
            surface.restore();
        }

        for (k, (dx, dy)) in ARM_DIRS.iter().enumerate() {
            let grow = sub(4 + k as u32);
            if grow > 0.0 {
                let r0 = size / 2.0;
                let r1 = r0 + (size / 2.0) * grow;
                surface.stroke_line(dx * r0, dy * r0, dx * r1, dy * r1);
            }
        }

        surface.restore();
        Ok(())
    }
}
