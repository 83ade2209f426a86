use crate::chart::Chart;
use crate::data::model::Species;
use crate::data::stats::GroupedMeans;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Charts in presentation order.
    pub charts: Vec<Chart>,

    /// Index of the chart on screen.
    pub selected: usize,

    /// Number of observations the charts were built from.
    pub row_count: usize,

    /// Mean petal length per species.
    pub means: GroupedMeans,
}

impl AppState {
    pub fn new(charts: Vec<Chart>, row_count: usize, means: GroupedMeans) -> Self {
        Self {
            charts,
            selected: 0,
            row_count,
            means,
        }
    }

    pub fn selected_chart(&self) -> Option<&Chart> {
        self.charts.get(self.selected)
    }

    /// Show chart `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.charts.len() {
            self.selected = index;
        }
    }

    /// Advance to the next chart, wrapping around.
    pub fn next(&mut self) {
        if !self.charts.is_empty() {
            self.selected = (self.selected + 1) % self.charts.len();
        }
    }

    /// Go back one chart, wrapping around.
    pub fn previous(&mut self) {
        if !self.charts.is_empty() {
            self.selected = (self.selected + self.charts.len() - 1) % self.charts.len();
        }
    }

    pub fn longest(&self) -> (Species, f64) {
        self.means.max_category()
    }
}
