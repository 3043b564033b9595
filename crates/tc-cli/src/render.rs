//! Terminal renderers: turn snapshots into text.
//!
//! Image and video output are left to external consumers of the JSON-lines
//! stream.

use std::io::Write;

use anyhow::Result;
use tc_core::{Snapshot, export_jsonl_line};

/// Rows shown by the debug renderer, regardless of display limit.
const DEBUG_TOP_ROWS: usize = 20;
/// Longest `#` bar in the debug renderer.
const DEBUG_BAR_CAP: usize = 30;

pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Called once after the last snapshot.
    fn finish(&mut self) -> Result<()>;
}

/// Drive a snapshot stream into a renderer, then finish it.
///
/// Pulls one snapshot at a time, so the engine advances only as fast as the
/// renderer consumes.
pub fn render_all<R, I>(renderer: &mut R, snapshots: I) -> Result<usize>
where
    R: Renderer + ?Sized,
    I: IntoIterator<Item = Snapshot>,
{
    let mut count = 0;
    for snapshot in snapshots {
        renderer.render(&snapshot)?;
        count += 1;
    }
    renderer.finish()?;
    Ok(count)
}

/// Prints a full state dump every `show_every` snapshots.
pub struct DebugRenderer<W> {
    out: W,
    capacity: usize,
    show_every: usize,
    state_count: usize,
}

impl<W: Write> DebugRenderer<W> {
    pub fn new(out: W, capacity: usize, show_every: usize) -> Self {
        Self {
            out,
            capacity,
            show_every: show_every.max(1),
            state_count: 0,
        }
    }
}

impl<W: Write> Renderer for DebugRenderer<W> {
    fn render(&mut self, snap: &Snapshot) -> Result<()> {
        self.state_count += 1;
        if self.state_count % self.show_every != 0 {
            return Ok(());
        }

        let out = &mut self.out;
        writeln!(out, "\n{}", "=".repeat(60))?;
        writeln!(out, "State #{}", self.state_count)?;
        writeln!(out, "Words processed: {}", snap.total_processed)?;
        writeln!(out, "Queue size: {}/{}", snap.window_size, self.capacity)?;
        writeln!(
            out,
            "Latest word: '{}'",
            snap.latest_token.as_deref().unwrap_or("")
        )?;
        writeln!(out, "Unique words in window: {}", snap.distinct_tokens())?;

        let rows = snap.top.len().min(DEBUG_TOP_ROWS);
        writeln!(out, "\nTop {rows} words:")?;
        writeln!(out, "{}", "-".repeat(40))?;
        for (i, (word, count)) in snap.top.iter().take(rows).enumerate() {
            let bar = "#".repeat((*count).min(DEBUG_BAR_CAP));
            writeln!(out, "{:3}. {word:<20} {count:4} {bar}", i + 1)?;
        }
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(60))?;
        writeln!(
            self.out,
            "Debug rendering complete. Total states: {}",
            self.state_count
        )?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rewrites a single status line per snapshot.
pub struct ProgressRenderer<W> {
    out: W,
    total_words: Option<usize>,
    state_count: usize,
}

impl<W: Write> ProgressRenderer<W> {
    pub fn new(out: W, total_words: Option<usize>) -> Self {
        Self {
            out,
            total_words,
            state_count: 0,
        }
    }
}

impl<W: Write> Renderer for ProgressRenderer<W> {
    fn render(&mut self, snap: &Snapshot) -> Result<()> {
        self.state_count += 1;
        let latest = snap.latest_token.as_deref().unwrap_or("");

        match self.total_words {
            Some(total) if total > 0 => {
                let pct = snap.total_processed as f64 / total as f64 * 100.0;
                write!(
                    self.out,
                    "\rProcessing: {}/{total} ({pct:.1}%) | Queue: {} | Latest: {latest:<15}",
                    snap.total_processed, snap.window_size
                )?;
            }
            _ => {
                write!(
                    self.out,
                    "\rProcessing: {} words | Queue: {} | Latest: {latest:<15}",
                    snap.total_processed, snap.window_size
                )?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "\nComplete! Processed {} states.",
            self.state_count
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per snapshot per line, for dashboards and animators.
pub struct JsonLinesRenderer<W> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, snap: &Snapshot) -> Result<()> {
        let line = export_jsonl_line(snap)?;
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::TimeCloud;

    fn snapshots(tokens: &[&str], capacity: usize) -> Vec<Snapshot> {
        let mut cloud = TimeCloud::new(capacity, 50).unwrap();
        cloud.process(tokens.iter().copied()).collect()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_debug_prints_every_nth_state() {
        let mut buf = Vec::new();
        let mut r = DebugRenderer::new(&mut buf, 3, 2);
        let n = render_all(&mut r, snapshots(&["cat", "dog", "cat", "bird", "cat"], 3)).unwrap();
        assert_eq!(n, 5);

        let text = output(buf);
        assert!(text.contains("State #2"));
        assert!(text.contains("State #4"));
        assert!(!text.contains("State #1\n"));
        assert!(!text.contains("State #3"));
        assert!(text.contains("Queue size: 3/3"));
        assert!(text.contains("Latest word: 'bird'"));
        assert!(text.contains("Debug rendering complete. Total states: 5"));
    }

    #[test]
    fn test_debug_bar_is_capped() {
        let tokens = vec!["same"; 40];
        let mut buf = Vec::new();
        let mut r = DebugRenderer::new(&mut buf, 100, 40);
        render_all(&mut r, snapshots(&tokens, 100)).unwrap();

        let text = output(buf);
        let row = text.lines().find(|l| l.starts_with("  1.")).unwrap();
        assert!(row.contains("  40 "));
        assert!(row.ends_with(&"#".repeat(30)));
        assert!(!row.contains(&"#".repeat(31)));
    }

    #[test]
    fn test_progress_with_total() {
        let mut buf = Vec::new();
        let mut r = ProgressRenderer::new(&mut buf, Some(4));
        render_all(&mut r, snapshots(&["a", "b", "c", "d"], 2)).unwrap();

        let text = output(buf);
        assert!(text.contains("Processing: 2/4 (50.0%) | Queue: 2"));
        assert!(text.contains("Processing: 4/4 (100.0%)"));
        assert!(text.contains("Complete! Processed 4 states."));
    }

    #[test]
    fn test_progress_without_total() {
        let mut buf = Vec::new();
        let mut r = ProgressRenderer::new(&mut buf, None);
        render_all(&mut r, snapshots(&["a"], 2)).unwrap();
        assert!(output(buf).contains("Processing: 1 words | Queue: 1 | Latest: a"));
    }

    #[test]
    fn test_jsonl_one_line_per_snapshot() {
        let mut buf = Vec::new();
        let mut r = JsonLinesRenderer::new(&mut buf);
        render_all(&mut r, snapshots(&["x", "y", "x"], 5)).unwrap();

        let text = output(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let last: Snapshot = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last.count("x"), 2);
        assert_eq!(last.total_processed, 3);
    }

    #[test]
    fn test_render_all_works_through_trait_object() {
        let mut buf = Vec::new();
        {
            let mut boxed: Box<dyn Renderer + '_> = Box::new(JsonLinesRenderer::new(&mut buf));
            render_all(boxed.as_mut(), snapshots(&["a", "b"], 5)).unwrap();
        }
        assert_eq!(output(buf).lines().count(), 2);
    }
}
