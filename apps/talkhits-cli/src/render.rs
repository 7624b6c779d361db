use std::io::Write;

use talkhits_core::traits::HitRenderer;
use talkhits_core::types::{DisplayItem, EmptyGroupPolicy, GroupedPage, RenderKind, TranscriptEntry};

/// One JSON document per page.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HitRenderer for JsonRenderer<W> {
    fn render(&mut self, page: &GroupedPage) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, page)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Terminal listing: plain hits on one line, transcripts with their segments below.
pub struct TextRenderer<W: Write> {
    out: W,
    policy: EmptyGroupPolicy,
    snippet_width: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, policy: EmptyGroupPolicy, snippet_width: usize) -> Self {
        Self { out, policy, snippet_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_item(&mut self, item: &DisplayItem) -> anyhow::Result<()> {
        let record = item.record();
        let title = record.title().unwrap_or("(untitled)");
        match item.render_kind(self.policy) {
            RenderKind::Plain => writeln!(self.out, "{}  {}", record.object_id, title)?,
            RenderKind::Transcript => {
                let mut entries: Vec<&TranscriptEntry> =
                    item.transcriptions().map(|t| t.values().collect()).unwrap_or_default();
                entries.sort_by(|a, b| a.start.total_cmp(&b.start));
                writeln!(self.out, "{}  {}  ({} matching segments)", record.object_id, title, entries.len())?;
                for entry in entries {
                    let snippet = truncate(&entry.snippet_result.text.value, self.snippet_width);
                    writeln!(self.out, "    [{}] {}", timestamp(entry.start), snippet)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> HitRenderer for TextRenderer<W> {
    fn render(&mut self, page: &GroupedPage) -> anyhow::Result<()> {
        for item in &page.items {
            self.render_item(item)?;
        }
        if page.has_more {
            writeln!(self.out, "-- more results available --")?;
        }
        Ok(())
    }
}

/// `mm:ss`; minutes are not wrapped into hours.
pub fn timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
