use crate::foundation::core::Raster;

/// Observer for freshly composed previews.
///
/// Called once per successful recomposition, after the session has stored the new preview.
pub trait PreviewSink {
    fn preview_updated(&mut self, preview: &Raster);

    /// Called when the session drops its image (a new load or [`super::editor::MemeSession::clear`]).
    fn preview_cleared(&mut self) {}
}

/// Sink that ignores every update.
impl PreviewSink for () {
    fn preview_updated(&mut self, _preview: &Raster) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPreviewSink {
    updates: usize,
    clears: usize,
    last: Option<Raster>,
}

impl InMemoryPreviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews received.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn last(&self) -> Option<&Raster> {
        self.last.as_ref()
    }
}

impl PreviewSink for InMemoryPreviewSink {
    fn preview_updated(&mut self, preview: &Raster) {
        self.updates += 1;
        self.last = Some(preview.clone());
    }

    fn preview_cleared(&mut self) {
        self.clears += 1;
        self.last = None;
    }
}
