use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::{
    core::Rgba8,
    error::{OdotsError, OdotsResult},
};

/// Font stack requested for all text; resolved against whatever the host
/// exposes. On machines with no usable fonts the layout simply produces no
/// glyph runs, which callers observe as zero-width metrics.
const FONT_STACK: &str = "sans-serif";

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Measured extents of a laid-out text box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Laid-out width in pixels; 0 when nothing shaped.
    pub width: f64,
    /// Laid-out height in pixels.
    pub height: f64,
}

/// Stateful helper for shaping text and rasterizing glyph runs.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    // Resolved fonts converted for the rasterizer, keyed by blob identity.
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font_cache: HashMap::new(),
        }
    }

    fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> OdotsResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(OdotsError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Borrowed(FONT_STACK)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measure `text` at `size_px` without drawing it.
    pub(crate) fn measure(&mut self, text: &str, size_px: f64) -> OdotsResult<TextMetrics> {
        let layout = self.layout_plain(text, size_px as f32, TextBrushRgba8::default())?;
        Ok(TextMetrics {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }

    /// Shape `text` and fill its glyph runs into `ctx`.
    ///
    /// The caller positions the layout's top-left corner via the context
    /// transform. Hosts without fonts shape zero runs and draw nothing.
    pub(crate) fn fill(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f64,
        color: Rgba8,
    ) -> OdotsResult<()> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.layout_plain(text, size_px as f32, brush)?;

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let brush = glyph_run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let run = glyph_run.run();
                let font = run.font();
                let key = (font.data.id(), font.index);
                let font_data = match self.font_cache.get(&key) {
                    Some(f) => f.clone(),
                    None => {
                        let blob =
                            vello_cpu::peniko::Blob::from(font.data.as_ref().to_vec());
                        let converted = vello_cpu::peniko::FontData::new(blob, font.index);
                        self.font_cache.insert(key, converted.clone());
                        converted
                    }
                };

                let glyphs = glyph_run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.font_size())
                    .fill_glyphs(glyphs);
            }
        }

        Ok(())
    }
}
