use eframe::egui::{self, RichText, Ui};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Iris Dataset");
    ui.separator();

    ui.label(format!("{} observations", state.row_count));
    ui.add_space(8.0);

    ui.strong("Average petal length");
    for (i, (species, mean)) in state.means.groups().iter().enumerate() {
        let text = RichText::new(format!("{species}: {mean:.3} cm")).color(color::bar_color(i));
        ui.label(text);
    }
    ui.separator();

    let (longest, mean) = state.longest();
    ui.label("Longest average petals:");
    ui.label(RichText::new(format!("🌸 {longest} ({mean:.3} cm)")).strong());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the chart selector toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("◀").clicked() {
            state.previous();
        }
        if ui.button("▶").clicked() {
            state.next();
        }

        ui.separator();

        let titles: Vec<String> = state.charts.iter().map(|c| c.title.clone()).collect();
        for (i, title) in titles.iter().enumerate() {
            if ui.selectable_label(state.selected == i, title.as_str()).clicked() {
                state.select(i);
            }
        }
    });
}
