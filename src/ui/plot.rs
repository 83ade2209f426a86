use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{Chart, ChartBody};

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render one chart in the central panel.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    Plot::new(("chart_plot", chart.title.as_str()))
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match &chart.body {
            ChartBody::Line(line) => {
                let points: PlotPoints = line.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&line.series_name)
                        .color(line.color)
                        .width(1.5),
                );
            }
            ChartBody::Bars(bars) => {
                // One chart per bar so each category gets its own legend entry.
                for bar in bars {
                    let b = Bar::new(bar.x, bar.height)
                        .name(&bar.label)
                        .fill(bar.color)
                        .width(0.5);
                    plot_ui.bar_chart(BarChart::new(vec![b]).name(&bar.label).color(bar.color));
                }
            }
            ChartBody::Histogram(hist) => {
                let bars: Vec<Bar> = hist
                    .bins
                    .iter()
                    .map(|bin| {
                        Bar::new(bin.center(), bin.count as f64)
                            .width(bin.width())
                            .fill(hist.fill)
                            .stroke(Stroke::new(1.0, hist.edge))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(hist.fill));
            }
            ChartBody::Scatter(groups) => {
                for group in groups {
                    let points: PlotPoints = group.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&group.label)
                            .color(group.color)
                            .radius(3.0),
                    );
                }
            }
        });
}
