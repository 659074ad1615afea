use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::OdotsResult,
    },
    render::{
        FrameRGBA,
        text::{TextLayoutEngine, TextMetrics},
    },
};
use kurbo::{Affine, BezPath, Circle, PathEl, Shape};

/// Stroke end-cap shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Current paint state, saved and restored together with the transform.
#[derive(Clone, Copy, Debug)]
struct Style {
    fill: Rgba8,
    stroke: Rgba8,
    line_width: f64,
    line_cap: LineCap,
    font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Rgba8::WHITE,
            stroke: Rgba8::WHITE,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            font_size: 16.0,
        }
    }
}

/// Canvas-style 2D drawing surface over the CPU rasterizer.
///
/// One surface is created per session and mutated in place every tick: the
/// driver repaints the background via [`Surface::begin_frame`], the scene
/// issues draw calls, and [`Surface::snapshot`] rasterizes the recorded
/// frame. The backing pixmap is reused across ticks.
pub struct Surface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    transform: Affine,
    style: Style,
    saved: Vec<(Affine, Style)>,
    text: TextLayoutEngine,
}

impl Surface {
    pub fn new(canvas: Canvas) -> OdotsResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let w = canvas.width as u16;
        let h = canvas.height as u16;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            transform: Affine::IDENTITY,
            style: Style::default(),
            saved: Vec::new(),
            text: TextLayoutEngine::new(),
        })
    }

    /// Reset recorded state and repaint the full surface with `background`.
    ///
    /// Must be called at the start of every tick; skipping it accumulates the
    /// prior frame's content.
    pub fn begin_frame(&mut self, background: Rgba8) {
        self.ctx.reset();
        self.transform = Affine::IDENTITY;
        self.style = Style::default();
        self.saved.clear();

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(background));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    pub fn set_fill(&mut self, color: Rgba8) {
        self.style.fill = color;
    }

    pub fn set_stroke_color(&mut self, color: Rgba8) {
        self.style.stroke = color;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.style.line_width = width;
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.style.line_cap = cap;
    }

    pub fn set_font_size(&mut self, size_px: f64) {
        self.style.font_size = size_px;
    }

    /// Push the current transform and style.
    pub fn save(&mut self) {
        self.saved.push((self.transform, self.style));
    }

    /// Pop the most recently saved transform and style; no-op on an empty
    /// stack.
    pub fn restore(&mut self) {
        if let Some((transform, style)) = self.saved.pop() {
            self.transform = transform;
            self.style = style;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translate((dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.apply_transform();
        self.ctx.set_paint(color_to_cpu(self.style.fill));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
    }

    /// Filled circular dot.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.apply_transform();
        self.ctx.set_paint(color_to_cpu(self.style.fill));
        self.ctx.fill_path(&bezpath_to_cpu(&circle_path(cx, cy, r)));
    }

    /// Outlined circular dot.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.apply_transform();
        self.apply_stroke();
        self.ctx.set_paint(color_to_cpu(self.style.stroke));
        self.ctx
            .stroke_path(&bezpath_to_cpu(&circle_path(cx, cy, r)));
    }

    /// Straight stroked line segment.
    pub fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let mut path = BezPath::new();
        path.move_to((x1, y1));
        path.line_to((x2, y2));

        self.apply_transform();
        self.apply_stroke();
        self.ctx.set_paint(color_to_cpu(self.style.stroke));
        self.ctx.stroke_path(&bezpath_to_cpu(&path));
    }

    /// Fill an arbitrary path with the current fill color.
    pub fn fill_path(&mut self, path: &BezPath) {
        self.apply_transform();
        self.ctx.set_paint(color_to_cpu(self.style.fill));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Measure `text` at the current font size.
    pub fn measure_text(&mut self, text: &str) -> OdotsResult<TextMetrics> {
        self.text.measure(text, self.style.font_size)
    }

    /// Fill `text` with its layout box's top-left corner at `(x, y)`.
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) -> OdotsResult<()> {
        let transform = self.transform * Affine::translate((x, y));
        self.ctx.set_transform(affine_to_cpu(transform));
        self.text
            .fill(&mut self.ctx, text, self.style.font_size, self.style.fill)
    }

    /// Rasterize everything recorded since [`Surface::begin_frame`] and
    /// return the pixels.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn apply_transform(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
    }

    fn apply_stroke(&mut self) {
        let cap = match self.style.line_cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
        };
        let stroke = vello_cpu::kurbo::Stroke::new(self.style.line_width)
            .with_caps(cap)
            .with_join(vello_cpu::kurbo::Join::Round);
        self.ctx.set_stroke(stroke);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    let mut path = BezPath::new();
    for el in Circle::new((cx, cy), r).path_elements(0.1) {
        path.push(el);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * frame.width + x) * 4) as usize;
        [
            frame.data[idx],
            frame.data[idx + 1],
            frame.data[idx + 2],
            frame.data[idx + 3],
        ]
    }

    fn small_surface() -> Surface {
        Surface::new(Canvas {
            width: 64,
            height: 64,
        })
        .unwrap()
    }

    #[test]
    fn snapshot_has_expected_shape() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        let frame = s.snapshot();
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 64);
        assert_eq!(frame.data.len(), 64 * 64 * 4);
        assert!(frame.premultiplied);
    }

    #[test]
    fn begin_frame_paints_uniform_background() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        let frame = s.snapshot();
        assert!(
            frame
                .data
                .chunks_exact(4)
                .all(|px| px == [0, 0, 0, 255])
        );
    }

    #[test]
    fn fill_rect_paints_interior_only() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_fill(Rgba8::WHITE);
        s.fill_rect(16.0, 16.0, 16.0, 16.0);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 24, 24), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 4, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn begin_frame_discards_previous_content() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_fill(Rgba8::WHITE);
        s.fill_rect(0.0, 0.0, 64.0, 64.0);
        let _ = s.snapshot();

        s.begin_frame(Rgba8::BLACK);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 32, 32), [0, 0, 0, 255]);
    }

    #[test]
    fn translate_moves_drawing_and_restore_undoes_it() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_fill(Rgba8::WHITE);
        s.save();
        s.translate(32.0, 32.0);
        s.fill_rect(0.0, 0.0, 8.0, 8.0);
        s.restore();
        s.fill_rect(0.0, 0.0, 8.0, 8.0);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 36, 36), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 4, 4), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 20, 20), [0, 0, 0, 255]);
    }

    #[test]
    fn mirror_scale_flips_x() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_fill(Rgba8::WHITE);
        s.translate(32.0, 32.0);
        s.scale(-1.0, 1.0);
        s.fill_rect(8.0, -4.0, 8.0, 8.0);
        let frame = s.snapshot();
        // Drawn at +x in mirrored space, lands at -x of center.
        assert_eq!(pixel(&frame, 20, 32), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 44, 32), [0, 0, 0, 255]);
    }

    #[test]
    fn fill_circle_covers_center() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_fill(Rgba8::WHITE);
        s.fill_circle(32.0, 32.0, 10.0);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 32, 32), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 32, 12), [0, 0, 0, 255]);
    }

    #[test]
    fn stroke_circle_leaves_center_unpainted() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_stroke_color(Rgba8::WHITE);
        s.set_line_width(4.0);
        s.stroke_circle(32.0, 32.0, 16.0);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 32, 32), [0, 0, 0, 255]);
        // A point on the rim is painted.
        assert_eq!(pixel(&frame, 47, 32), [255, 255, 255, 255]);
    }

    #[test]
    fn stroke_line_paints_along_segment() {
        let mut s = small_surface();
        s.begin_frame(Rgba8::BLACK);
        s.set_stroke_color(Rgba8::WHITE);
        s.set_line_width(4.0);
        s.set_line_cap(LineCap::Round);
        s.stroke_line(8.0, 32.0, 56.0, 32.0);
        let frame = s.snapshot();
        assert_eq!(pixel(&frame, 32, 32), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 32, 8), [0, 0, 0, 255]);
    }
}
