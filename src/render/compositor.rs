use std::collections::BTreeMap;

use crate::caption::model::{CaptionText, FontFamily, StyleConfig};
use crate::foundation::core::{Point, RGBA_CHANNELS, Raster, Rect};
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::blend::layer_over_straight;
use crate::render::geometry::{
    CaptionPlacement, CaptionSlot, baseline_for, caption_anchor_x, run_start_x, stroke_width,
};
use crate::text::fonts::{FontBook, FontSource};
use crate::text::layout::{ShapedLine, TextBrushRgba8, TextLayoutEngine};

/// Extra margin around a caption's advance box, in ems, for glyph ink that overhangs it.
const GLYPH_OVERHANG_EM: f64 = 0.25;

const OUTLINE_RGBA: [u8; 4] = [0, 0, 0, 255];

/// One font file: its own shaping engine plus the outlines the rasterizer draws.
struct LoadedFont {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

struct FamilySlot {
    font: usize,
    is_fallback: bool,
}

/// Burns top/bottom captions onto a base raster.
///
/// Output depends only on `(base, caption, style)` and the fonts handed to [`Compositor::new`].
/// `&mut self` on the drawing methods is for reusable shaping contexts, not for observable state.
pub struct Compositor {
    fonts: Vec<LoadedFont>,
    families: BTreeMap<FontFamily, FamilySlot>,
}

impl Compositor {
    /// Register every font in `book`. Fails when the book cannot supply any font at all or when a
    /// font file cannot be parsed.
    pub fn new(book: &FontBook) -> MemeResult<Self> {
        if book.is_empty() {
            return Err(MemeError::font(
                "font book is empty; register at least one caption font",
            ));
        }

        let mut fonts: Vec<LoadedFont> = Vec::new();
        let mut sources: Vec<&FontSource> = Vec::new();
        let mut families = BTreeMap::new();

        for family in FontFamily::ALL {
            let Some(resolved) = book.resolve(family) else {
                continue;
            };
            let font = match sources.iter().position(|s| *s == resolved.source) {
                Some(i) => i,
                None => {
                    let engine =
                        TextLayoutEngine::for_font(resolved.source.bytes()).map_err(|e| {
                            MemeError::font(format!("'{}': {e}", resolved.source.origin()))
                        })?;
                    let data = vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(resolved.source.bytes().to_vec()),
                        0,
                    );
                    tracing::debug!(
                        family = %family,
                        registered_as = engine.family_name(),
                        origin = resolved.source.origin(),
                        "loaded caption font"
                    );
                    sources.push(resolved.source);
                    fonts.push(LoadedFont { engine, data });
                    fonts.len() - 1
                }
            };
            families.insert(
                family,
                FamilySlot {
                    font,
                    is_fallback: resolved.is_fallback,
                },
            );
        }

        Ok(Self {
            fonts,
            families,
        })
    }

    /// Whether `family` is drawn with the fallback font instead of its own.
    pub fn uses_fallback(&self, family: FontFamily) -> bool {
        self.families
            .get(&family)
            .is_none_or(|slot| slot.is_fallback)
    }

    /// Compose captions onto a copy of `base`.
    ///
    /// The output has exactly the base dimensions. Empty captions are skipped, so an empty
    /// [`CaptionText`] returns a pixel-identical copy. Text that runs past the image edges is
    /// clipped.
    #[tracing::instrument(
        skip_all,
        fields(width = base.width(), height = base.height(), font = %style.font_family)
    )]
    pub fn composite(
        &mut self,
        base: &Raster,
        caption: &CaptionText,
        style: &StyleConfig,
    ) -> Raster {
        let mut out = base.clone();
        for (slot, text) in caption_slots(caption) {
            let (shaped, placement, font) = self.shape(slot, text, base, style);
            draw_caption(&mut out, &shaped, &placement, &self.fonts[font].data, style);
        }
        out
    }

    /// Placements that [`Compositor::composite`] would draw for this request, top first.
    pub fn placements(
        &mut self,
        base: &Raster,
        caption: &CaptionText,
        style: &StyleConfig,
    ) -> Vec<CaptionPlacement> {
        caption_slots(caption)
            .map(|(slot, text)| self.shape(slot, text, base, style).1)
            .collect()
    }

    fn font_for(&self, family: FontFamily) -> usize {
        let slot = &self.families[&family];
        if slot.is_fallback {
            tracing::warn!(family = %family, "font family not registered; using fallback font");
        }
        slot.font
    }

    fn shape(
        &mut self,
        slot: CaptionSlot,
        text: &str,
        base: &Raster,
        style: &StyleConfig,
    ) -> (ShapedLine, CaptionPlacement, usize) {
        let font = self.font_for(style.font_family);
        let shaped = self.fonts[font].engine.layout_line(
            text,
            style.font_size.as_f32(),
            TextBrushRgba8::from(style.text_color),
        );
        let anchor = Point::new(
            caption_anchor_x(base.width(), style.text_align),
            baseline_for(slot, style.font_size, base.height()),
        );
        let advance = f64::from(shaped.metrics.advance);
        let placement = CaptionPlacement {
            slot,
            anchor,
            run_start_x: run_start_x(anchor.x, advance, style.text_align),
            advance,
            stroke_width: stroke_width(style.font_size),
        };
        (shaped, placement, font)
    }
}

fn caption_slots(caption: &CaptionText) -> impl Iterator<Item = (CaptionSlot, &str)> {
    [
        (CaptionSlot::Top, caption.top_text.as_str()),
        (CaptionSlot::Bottom, caption.bottom_text.as_str()),
    ]
    .into_iter()
    .filter(|(_, text)| !text.is_empty())
}

struct GlyphRunCpu {
    font_size: f32,
    brush: TextBrushRgba8,
    glyphs: Vec<vello_cpu::Glyph>,
}

fn glyph_runs(shaped: &ShapedLine) -> Vec<GlyphRunCpu> {
    let mut runs = Vec::new();
    for line in shaped.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            runs.push(GlyphRunCpu {
                font_size: run.run().font_size(),
                brush: run.style().brush,
                glyphs: run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect(),
            });
        }
    }
    runs
}

/// Rasterize one caption into a pixmap covering only its clipped box, then blend it in.
fn draw_caption(
    out: &mut Raster,
    shaped: &ShapedLine,
    placement: &CaptionPlacement,
    font: &vello_cpu::peniko::FontData,
    style: &StyleConfig,
) {
    let m = shaped.metrics;
    let pad = placement.stroke_width + f64::from(style.font_size.px()) * GLYPH_OVERHANG_EM;
    let line_top = placement.anchor.y - f64::from(m.baseline);
    let ink = Rect::new(
        placement.run_start_x - pad,
        line_top - pad,
        placement.run_end_x() + pad,
        line_top + f64::from(m.height) + pad,
    );
    let clip = ink.intersect(out.bounds());
    if clip.width() <= 0.0 || clip.height() <= 0.0 {
        tracing::debug!(slot = ?placement.slot, "caption lies entirely outside the image");
        return;
    }

    let x0 = clip.x0.floor().max(0.0) as u32;
    let y0 = clip.y0.floor().max(0.0) as u32;
    let x1 = (clip.x1.ceil() as u32).min(out.width());
    let y1 = (clip.y1.ceil() as u32).min(out.height());
    let pw = (x1 - x0).min(u32::from(u16::MAX)) as u16;
    let ph = (y1 - y0).min(u32::from(u16::MAX)) as u16;
    if pw == 0 || ph == 0 {
        return;
    }

    let runs = glyph_runs(shaped);
    let transform = kurbo::Affine::translate((
        placement.run_start_x - f64::from(x0),
        line_top - f64::from(y0),
    ));

    let mut ctx = vello_cpu::RenderContext::new(pw, ph);
    ctx.set_transform(affine_to_cpu(transform));

    // Outline first so the fill sits on top of the inner half of the stroke.
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(placement.stroke_width));
    let [r, g, b, a] = OUTLINE_RGBA;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    for run in &runs {
        ctx.glyph_run(font)
            .font_size(run.font_size)
            .stroke_glyphs(run.glyphs.iter().copied());
    }

    for run in &runs {
        let brush = run.brush;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            brush.r, brush.g, brush.b, brush.a,
        ));
        ctx.glyph_run(font)
            .font_size(run.font_size)
            .fill_glyphs(run.glyphs.iter().copied());
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(pw, ph);
    ctx.render_to_pixmap(&mut pixmap);

    let layer = pixmap.data_as_u8_slice();
    debug_assert_eq!(layer.len(), usize::from(pw) * usize::from(ph) * RGBA_CHANNELS);
    layer_over_straight(out, layer, u32::from(pw), u32::from(ph), x0, y0);
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
