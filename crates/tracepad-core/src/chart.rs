//! Single-instance chart slot.
//!
//! A [`ChartHost`] draws datasets onto some surface. [`ChartSlot`] guarantees
//! at most one live chart per slot: the previous handle is always disposed
//! before the next draw.

use crate::projector::ChartDataset;

/// Rendering surface for line charts.
pub trait ChartHost {
    /// Opaque handle for one drawn chart.
    type Handle;

    fn draw(&mut self, dataset: &ChartDataset) -> Self::Handle;

    fn dispose(&mut self, handle: Self::Handle);
}

/// Owns the current chart on a host.
pub struct ChartSlot<H: ChartHost> {
    host: H,
    current: Option<H::Handle>,
}

impl<H: ChartHost> ChartSlot<H> {
    pub fn new(host: H) -> Self {
        ChartSlot {
            host,
            current: None,
        }
    }

    /// Disposes any live chart, then draws `dataset`.
    pub fn redraw(&mut self, dataset: &ChartDataset) {
        self.clear();
        self.current = Some(self.host.draw(dataset));
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            self.host.dispose(handle);
        }
    }

    pub fn is_drawn(&self) -> bool {
        self.current.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::ComplexityReport;

    #[derive(Default)]
    struct Recorder {
        next: u32,
        live: Vec<u32>,
        log: Vec<String>,
    }

    impl ChartHost for Recorder {
        type Handle = u32;

        fn draw(&mut self, dataset: &ChartDataset) -> u32 {
            self.next += 1;
            self.live.push(self.next);
            self.log.push(format!("draw {} {}", self.next, dataset.label));
            self.next
        }

        fn dispose(&mut self, handle: u32) {
            self.live.retain(|h| *h != handle);
            self.log.push(format!("dispose {}", handle));
        }
    }

    #[test]
    fn previous_chart_disposed_before_next_draw() {
        let mut slot = ChartSlot::new(Recorder::default());
        slot.redraw(&ComplexityReport::new("O(1)", 1.0).dataset);
        slot.redraw(&ComplexityReport::new("O(n)", 1.0).dataset);
        assert_eq!(slot.host().live, vec![2]);
        assert_eq!(
            slot.host().log,
            vec![
                "draw 1 Time Complexity (O(1))",
                "dispose 1",
                "draw 2 Time Complexity (O(n))",
            ]
        );
    }

    #[test]
    fn clear_disposes_once() {
        let mut slot = ChartSlot::new(Recorder::default());
        slot.redraw(&ComplexityReport::new("O(1)", 1.0).dataset);
        slot.clear();
        slot.clear();
        assert!(!slot.is_drawn());
        assert!(slot.host().live.is_empty());
        assert_eq!(slot.host().log.len(), 2);
    }
}
