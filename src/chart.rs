use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;

use crate::color::{self, ColorMap};
use crate::data::model::{Measurement, ObservationTable, Species};
use crate::data::stats::GroupedMeans;

/// Bin count of the sepal length histogram.
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Chart values
// ---------------------------------------------------------------------------
//
// Every chart is plain data computed from the table; drawing lives in
// `ui::plot`.

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub series_name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub x: f64,
    pub height: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub fill: Color32,
    pub edge: Color32,
}

/// Points of one category, drawn in one colour with one legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Line(LineChart),
    Bars(Vec<BarSpec>),
    Histogram(Histogram),
    Scatter(Vec<ScatterGroup>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

impl Chart {
    fn new(title: &str, x_label: &str, y_label: &str, body: ChartBody) -> Self {
        Chart {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Sepal length against row index.
pub fn trend_line(table: &ObservationTable) -> Chart {
    let points = table
        .indexed_values(Measurement::SepalLength)
        .into_iter()
        .map(|(i, v)| [i as f64, v])
        .collect();

    Chart::new(
        "Sepal Length Trend",
        "Index",
        "Sepal Length (cm)",
        ChartBody::Line(LineChart {
            series_name: "Sepal Length".to_string(),
            color: color::line_color(),
            points,
        }),
    )
}

/// One bar per species, height = mean petal length.
pub fn grouped_bar(means: &GroupedMeans) -> Chart {
    let bars = means
        .groups()
        .iter()
        .enumerate()
        .map(|(i, &(species, mean))| BarSpec {
            label: species.name().to_string(),
            x: i as f64,
            height: mean,
            color: color::bar_color(i),
        })
        .collect();

    Chart::new(
        "Average Petal Length per Species",
        "Species",
        "Petal Length (cm)",
        ChartBody::Bars(bars),
    )
}

/// Sepal length distribution over [`HISTOGRAM_BINS`] equal-width bins.
pub fn histogram(table: &ObservationTable) -> Chart {
    let values = table.values(Measurement::SepalLength);
    Chart::new(
        "Sepal Length Distribution",
        "Sepal Length (cm)",
        "Count",
        ChartBody::Histogram(Histogram {
            bins: bin_values(&values, HISTOGRAM_BINS),
            fill: color::histogram_fill(),
            edge: color::histogram_edge(),
        }),
    )
}

/// Split `[min, max]` into `n` equal bins and count values per bin. The last
/// bin includes its right edge. A degenerate range is widened by 0.5 on each
/// side; no values gives zero counts over `[0, 1]`.
pub fn bin_values(values: &[f64], n: usize) -> Vec<HistogramBin> {
    let n = n.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        (lo, hi) = (0.0, 1.0);
    } else if lo == hi {
        (lo, hi) = (lo - 0.5, hi + 0.5);
    }

    let width = (hi - lo) / n as f64;
    let mut counts = vec![0usize; n];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(n - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == n { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Sepal length against petal length, coloured by category code.
pub fn scatter(table: &ObservationTable) -> Chart {
    let mut by_code: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for row in table.rows() {
        let (Some(code), Some(x), Some(y)) = (
            row.target,
            row.value(Measurement::SepalLength),
            row.value(Measurement::PetalLength),
        ) else {
            continue;
        };
        by_code.entry(code).or_default().push([x, y]);
    }

    let codes: BTreeSet<i64> = by_code.keys().copied().collect();
    let color_map = ColorMap::new(&codes);

    let groups = by_code
        .into_iter()
        .map(|(code, points)| ScatterGroup {
            label: Species::from_code(code)
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| code.to_string()),
            color: color_map.color_for(code),
            points,
        })
        .collect();

    Chart::new(
        "Sepal vs Petal Length",
        "Sepal Length (cm)",
        "Petal Length (cm)",
        ChartBody::Scatter(groups),
    )
}

/// All four charts in presentation order.
pub fn build_all(table: &ObservationTable, means: &GroupedMeans) -> Vec<Chart> {
    let charts = vec![
        trend_line(table),
        grouped_bar(means),
        histogram(table),
        scatter(table),
    ];
    log::debug!("Built {} charts from {} rows", charts.len(), table.len());
    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_bundled, parse_observations};
    use crate::data::stats::grouped_mean;

    #[test]
    fn charts_do_not_mutate_the_table() {
        let table = load_bundled().unwrap();
        let before = table.clone();
        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();

        let _ = trend_line(&table);
        assert_eq!(table, before);
        let _ = grouped_bar(&means);
        assert_eq!(table, before);
        let _ = histogram(&table);
        assert_eq!(table, before);
        let _ = scatter(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn charts_are_reproducible() {
        let table = load_bundled().unwrap();
        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();
        assert_eq!(build_all(&table, &means), build_all(&table, &means));
    }

    #[test]
    fn trend_line_follows_row_index() {
        let table = load_bundled().unwrap();
        let ChartBody::Line(line) = trend_line(&table).body else {
            panic!("expected a line chart");
        };
        assert_eq!(line.points.len(), 150);
        assert_eq!(line.points[0], [0.0, 5.1]);
        assert_eq!(line.points[149], [149.0, 5.9]);
    }

    #[test]
    fn trend_line_keeps_labels_of_dropped_rows() {
        let csv = "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target\n\
                   5.1,3.5,1.4,0.2,0\n\
                   4.9,,1.4,0.2,0\n\
                   6.3,3.3,6.0,2.5,2\n";
        let table = parse_observations(csv.as_bytes()).unwrap().drop_nulls();
        let ChartBody::Line(line) = trend_line(&table).body else {
            panic!("expected a line chart");
        };
        assert_eq!(line.points, vec![[0.0, 5.1], [2.0, 6.3]]);
    }

    #[test]
    fn bars_follow_species_order_and_colors() {
        let table = load_bundled().unwrap();
        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();
        let ChartBody::Bars(bars) = grouped_bar(&means).body else {
            panic!("expected bars");
        };

        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
        assert_eq!(bars[2].color, color::bar_color(2));
        assert!((bars[2].height - 5.552).abs() < 1e-9);
    }

    #[test]
    fn histogram_counts_every_value() {
        let table = load_bundled().unwrap();
        let ChartBody::Histogram(hist) = histogram(&table).body else {
            panic!("expected a histogram");
        };

        assert_eq!(hist.bins.len(), HISTOGRAM_BINS);
        assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 150);
        assert_eq!(hist.bins[0].start, 4.3);
        assert_eq!(hist.bins[19].end, 7.9);
        assert!((hist.bins[0].width() - 0.18).abs() < 1e-9);
    }

    #[test]
    fn bin_edge_cases() {
        let bins = bin_values(&[1.0, 2.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);

        let bins = bin_values(&[3.0, 3.0], 4);
        assert_eq!(bins[0].start, 2.5);
        assert_eq!(bins[3].end, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);

        let bins = bin_values(&[], 5);
        assert_eq!((bins[0].start, bins[4].end), (0.0, 1.0));
        assert!(bins.iter().all(|b| b.count == 0));
    }

    #[test]
    fn scatter_groups_by_code() {
        let table = load_bundled().unwrap();
        let ChartBody::Scatter(groups) = scatter(&table).body else {
            panic!("expected a scatter chart");
        };

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.points.len() == 50));
        assert_eq!(groups[0].label, "setosa");
        assert_eq!(groups[0].color, color::viridis(0.0));
        assert_eq!(groups[2].color, color::viridis(1.0));
        assert_eq!(groups[0].points[0], [5.1, 1.4]);
    }
}
