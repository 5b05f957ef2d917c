//! Text rendering of summaries, counts and errors.

use std::io::Write;

use neowatch_scene::{EntityHandle, EntitySummary, SummaryDetail, SummaryDisplay};
use tracing::warn;

/// [`SummaryDisplay`] that writes to a terminal (or any writer).
///
/// Repeated hovers over the same asteroid print once; the panel state is
/// tracked so hiding an already hidden panel stays quiet.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    visible: Option<(EntityHandle, SummaryDetail)>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, visible: None }
    }

    pub fn is_showing(&self) -> bool {
        self.visible.is_some()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a line that is not part of the summary panel.
    pub fn print(&mut self, text: &str) {
        self.emit(text);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "console write failed");
        }
    }
}

impl<W: Write> SummaryDisplay for ConsoleDisplay<W> {
    fn show_summary(&mut self, handle: EntityHandle, summary: &EntitySummary, detail: SummaryDetail) {
        let key = (handle, detail);
        if self.visible.as_ref() == Some(&key) {
            return;
        }
        let text = match detail {
            SummaryDetail::Short => summary.short_text(),
            SummaryDetail::Full => summary.full_text(),
        };
        self.emit(&text);
        self.visible = Some(key);
    }

    fn hide_summary(&mut self) {
        self.visible = None;
    }

    fn show_count(&mut self, count: usize) {
        self.emit(&format!("Asteroid Count: {count}"));
    }

    fn report_error(&mut self, message: &str) {
        self.emit(message);
    }
}
