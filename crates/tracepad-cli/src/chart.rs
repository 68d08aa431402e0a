//! Horizontal bar chart drawn as text.

use std::io::{self, Write};

use tracepad_core::{ChartDataset, ChartHost};

const BAR_WIDTH: usize = 40;

/// Draws charts onto a text writer (stdout in the binary).
pub struct TerminalChart<W: Write> {
    out: W,
    next_id: usize,
    live: Option<usize>,
    failed: Option<io::Error>,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W) -> Self {
        TerminalChart {
            out,
            next_id: 0,
            live: None,
            failed: None,
        }
    }

    /// Returns the first write error since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.failed.take()
    }
}

impl<W: Write> ChartHost for TerminalChart<W> {
    type Handle = usize;

    fn draw(&mut self, dataset: &ChartDataset) -> usize {
        self.next_id += 1;
        self.live = Some(self.next_id);
        let written = self
            .out
            .write_all(render(dataset).as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            self.failed.get_or_insert(err);
        }
        self.next_id
    }

    fn dispose(&mut self, handle: usize) {
        if self.live == Some(handle) {
            self.live = None;
        }
    }
}

/// Renders one row per x-value, bars scaled to the largest y-value.
pub fn render(dataset: &ChartDataset) -> String {
    let max = dataset
        .y_values
        .iter()
        .copied()
        .filter(|y| y.is_finite())
        .fold(0.0_f64, f64::max);

    let mut text = format!("{}\n", dataset.label);
    for (x, y) in dataset.x_values.iter().zip(&dataset.y_values) {
        let len = if max > 0.0 && y.is_finite() {
            ((y / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        text.push_str(&format!(
            "  {:>3} | {:<width$} {}\n",
            x,
            "#".repeat(len),
            y,
            width = BAR_WIDTH
        ));
    }
    text.push_str(&format!("  x: {}, y: {}\n", dataset.x_title, dataset.y_title));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracepad_core::{ChartSlot, ComplexityReport};

    #[test]
    fn bars_scale_to_maximum() {
        let report = ComplexityReport::new("O(n)", 1.0);
        let text = render(&report.dataset);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Time Complexity (O(n))");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1].matches('#').count(), 8);
        assert_eq!(lines[5].matches('#').count(), BAR_WIDTH);
        assert!(lines[6].contains("Input Size"));
    }

    #[test]
    fn zero_time_draws_empty_bars() {
        let report = ComplexityReport::new("O(1)", 0.0);
        assert_eq!(render(&report.dataset).matches('#').count(), 0);
    }

    #[test]
    fn slot_redraw_replaces_live_chart() {
        let mut slot = ChartSlot::new(TerminalChart::new(Vec::new()));
        slot.redraw(&ComplexityReport::new("O(1)", 1.0).dataset);
        slot.redraw(&ComplexityReport::new("O(n^2)", 1.0).dataset);
        assert_eq!(slot.host().live, Some(2));
        slot.clear();
        assert_eq!(slot.host().live, None);
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_kept_for_the_caller() {
        let mut slot = ChartSlot::new(TerminalChart::new(Closed));
        slot.redraw(&ComplexityReport::new("O(n)", 1.0).dataset);
        let err = slot.host_mut().take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(slot.host_mut().take_error().is_none());
    }
}
