use crate::caption::config::CaptionConfig;
use crate::caption::model::{CaptionText, FontFamily, FontSize, StyleConfig, TextAlign, TextColor};
use crate::codec::decode::decode_validated;
use crate::codec::encode::{Export, export};
use crate::foundation::core::Raster;
use crate::foundation::error::{MemeError, MemeResult};
use crate::input::validate::ValidatedFile;
use crate::render::compositor::Compositor;
use crate::session::sink::PreviewSink;

/// Interactive editing state: one base image, the current caption and style, and the live preview.
///
/// Every change re-composes from the original base image, never from the previous preview. A
/// failed operation leaves all state as it was.
pub struct MemeSession<S: PreviewSink = ()> {
    compositor: Compositor,
    sink: S,
    base: Option<Raster>,
    preview: Option<Raster>,
    caption: CaptionText,
    style: StyleConfig,
}

impl MemeSession<()> {
    pub fn without_sink(compositor: Compositor) -> Self {
        Self::new(compositor, ())
    }
}

impl<S: PreviewSink> MemeSession<S> {
    pub fn new(compositor: Compositor, sink: S) -> Self {
        Self {
            compositor,
            sink,
            base: None,
            preview: None,
            caption: CaptionText::default(),
            style: StyleConfig::default(),
        }
    }

    /// Decode and adopt a new base image, discarding the previous one and its preview.
    pub fn load_image(&mut self, file: &ValidatedFile) -> MemeResult<()> {
        let raster = decode_validated(file)?;
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            "loaded base image"
        );
        self.replace_base(raster);
        Ok(())
    }

    /// Adopt an already decoded raster as the base image.
    pub fn load_raster(&mut self, raster: Raster) {
        self.replace_base(raster);
    }

    /// Drop the base image and preview. Caption and style are kept.
    pub fn clear(&mut self) {
        if self.base.take().is_some() {
            self.preview = None;
            self.sink.preview_cleared();
        }
    }

    pub fn base(&self) -> Option<&Raster> {
        self.base.as_ref()
    }

    pub fn preview(&self) -> Option<&Raster> {
        self.preview.as_ref()
    }

    pub fn caption(&self) -> &CaptionText {
        &self.caption
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn set_top_text(&mut self, text: impl Into<String>) {
        self.caption.top_text = text.into();
        self.recompose();
    }

    pub fn set_bottom_text(&mut self, text: impl Into<String>) {
        self.caption.bottom_text = text.into();
        self.recompose();
    }

    pub fn set_caption(&mut self, caption: CaptionText) {
        self.caption = caption;
        self.recompose();
    }

    pub fn set_font_size(&mut self, px: u32) -> MemeResult<()> {
        self.style.font_size = FontSize::new(px)?;
        self.recompose();
        Ok(())
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        self.style.font_family = family;
        self.recompose();
    }

    /// Accepts the color picker value and hand-typed hex alike.
    pub fn set_text_color(&mut self, hex: &str) -> MemeResult<()> {
        self.style.text_color = TextColor::from_hex(hex)?;
        self.recompose();
        Ok(())
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.style.text_align = align;
        self.recompose();
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.recompose();
    }

    /// Replace caption and style in one step, composing once.
    pub fn apply_config(&mut self, config: CaptionConfig) {
        self.caption = config.caption;
        self.style = config.style;
        self.recompose();
    }

    /// Encode the current preview as `meme.png`.
    pub fn export(&self) -> MemeResult<Export> {
        let preview = self
            .preview
            .as_ref()
            .ok_or_else(|| MemeError::config("no image loaded"))?;
        Ok(export(preview)?)
    }

    fn replace_base(&mut self, raster: Raster) {
        if self.base.is_some() {
            self.preview = None;
            self.sink.preview_cleared();
        }
        self.base = Some(raster);
        self.recompose();
    }

    fn recompose(&mut self) {
        let Some(base) = self.base.as_ref() else {
            return;
        };
        let preview = self.compositor.composite(base, &self.caption, &self.style);
        let preview = self.preview.insert(preview);
        self.sink.preview_updated(preview);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
