use std::borrow::Cow;

use crate::caption::model::TextColor;
use crate::foundation::error::{MemeError, MemeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<TextColor> for TextBrushRgba8 {
    fn from(c: TextColor) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Metrics of a shaped single-line caption, in layout space.
///
/// Layout space has its origin at the top-left of the line box; `baseline` is measured down from
/// that origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Horizontal advance of the whole run.
    pub advance: f32,
    /// Distance from the top of the line box down to the baseline.
    pub baseline: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Height of the line box.
    pub height: f32,
}

/// Shaped caption ready for rasterization.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) metrics: LineMetrics,
}

/// Shaping engine bound to exactly one font file.
///
/// Each engine owns its own font collection, so the face Parley shapes with is always the face the
/// rasterizer draws with, no matter which other fonts share its family name. The contexts are
/// scratch state: shaping the same text at the same size always produces the same glyph positions.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` in a fresh collection.
    pub(crate) fn for_font(font_bytes: &[u8]) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MemeError::font("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name Parley knows the font by.
    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` as one unwrapped line. Line breaks in `text` are drawn as spaces.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ShapedLine {
        let line = single_line(text);
        let text: &str = &line;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        // No wrapping: captions wider than the image simply run past its edges.
        layout.break_all_lines(None);

        let metrics = match layout.lines().next() {
            Some(line) => {
                let m = line.metrics();
                LineMetrics {
                    advance: layout.width(),
                    baseline: m.baseline,
                    ascent: m.ascent,
                    descent: m.descent,
                    height: layout.height(),
                }
            }
            None => LineMetrics {
                advance: 0.0,
                baseline: 0.0,
                ascent: 0.0,
                descent: 0.0,
                height: 0.0,
            },
        };

        ShapedLine { layout, metrics }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Replace every line break character with a space so Parley never starts a second line.
pub(crate) fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(is_line_break) {
        Cow::Owned(
            text.chars()
                .map(|c| if is_line_break(c) { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
