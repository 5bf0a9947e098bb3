use crate::caption::model::{FontSize, TextAlign};
use crate::foundation::core::Point;

/// Distance between a caption and the image edge it is attached to.
pub const EDGE_INSET_PX: f64 = 20.0;

/// Which edge a caption hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptionSlot {
    /// Baseline one font size plus the inset below the top edge.
    Top,
    /// Baseline the inset above the bottom edge.
    Bottom,
}

/// Horizontal anchor shared by both captions.
///
/// `Left` insets from the left edge, `Right` from the right edge, `Center` is the exact middle
/// (a half pixel for odd widths).
pub fn caption_anchor_x(width: u32, align: TextAlign) -> f64 {
    let w = f64::from(width);
    match align {
        TextAlign::Left => EDGE_INSET_PX,
        TextAlign::Right => w - EDGE_INSET_PX,
        TextAlign::Center => w / 2.0,
    }
}

/// Baseline of the top caption: one font size plus the inset below the top edge.
pub fn top_baseline(font_size: FontSize) -> f64 {
    f64::from(font_size.px()) + EDGE_INSET_PX
}

/// Baseline of the bottom caption: the inset above the bottom edge.
pub fn bottom_baseline(height: u32) -> f64 {
    f64::from(height) - EDGE_INSET_PX
}

/// Baseline `y` for `slot`.
pub fn baseline_for(slot: CaptionSlot, font_size: FontSize, height: u32) -> f64 {
    match slot {
        CaptionSlot::Top => top_baseline(font_size),
        CaptionSlot::Bottom => bottom_baseline(height),
    }
}

/// Outline stroke width: one twentieth of the font size.
pub fn stroke_width(font_size: FontSize) -> f64 {
    f64::from(font_size.px()) / 20.0
}

/// X where the glyph run starts so that it is anchored at `anchor_x`.
pub fn run_start_x(anchor_x: f64, advance: f64, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - advance / 2.0,
        TextAlign::Right => anchor_x - advance,
    }
}

/// Where and how wide one caption is drawn, in raster pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPlacement {
    /// Edge the caption hangs from.
    pub slot: CaptionSlot,
    /// `x` is the alignment anchor, `y` the baseline.
    pub anchor: Point,
    /// Left edge of the shaped run.
    pub run_start_x: f64,
    /// Width of the shaped run, without the outline.
    pub advance: f64,
    /// Outline width in pixels.
    pub stroke_width: f64,
}

impl CaptionPlacement {
    /// Right edge of the shaped run.
    pub fn run_end_x(&self) -> f64 {
        self.run_start_x + self.advance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
