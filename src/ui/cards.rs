use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::data::summary::AgeSummary;
use crate::state::AppState;
use crate::ui::plot;

/// Shown for a statistic that is undefined because no rows matched.
const PLACEHOLDER: &str = "–";

// ---------------------------------------------------------------------------
// Central panel layout
// ---------------------------------------------------------------------------

/// Render the summary cards, charts, record table and footer.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(snapshot) = &state.snapshot else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded.");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if snapshot.is_empty() {
                ui.label(
                    RichText::new("No patients match the current filters.")
                        .color(egui::Color32::from_rgb(0xd0, 0x80, 0x20)),
                );
                ui.add_space(4.0);
            }
            ui.columns(3, |cols: &mut [Ui]| {
                card(&mut cols[0], "Age Statistics", |ui| age_statistics(ui, &snapshot.age));
                card(&mut cols[1], &snapshot.gender_pie.title, |ui| {
                    plot::gender_pie(ui, &snapshot.gender_pie)
                });
                card(&mut cols[2], "Drug Distribution", |ui| {
                    plot::drug_bar(ui, &snapshot.drug_bar)
                });
            });

            ui.separator();
            ui.heading("Detailed Visualizations");

            ui.columns(2, |cols: &mut [Ui]| {
                card(&mut cols[0], "Na_to_K vs Age", |ui| plot::scatter(ui, &snapshot.scatter));
                card(&mut cols[1], "Blood Pressure and Cholesterol Levels", |ui| {
                    plot::bp_cholesterol_count(ui, &snapshot.bp_cholesterol)
                });
            });

            ui.separator();
            egui::CollapsingHeader::new(
                RichText::new(format!("Filtered records ({})", snapshot.row_count())).strong(),
            )
            .id_salt("filtered_records")
            .default_open(false)
            .show(ui, |ui: &mut Ui| record_table(ui, &snapshot.rows));

            ui.separator();
            insights(ui);
        });
}

fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.heading(title);
        ui.add_space(4.0);
        add_contents(ui);
    });
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

fn age_statistics(ui: &mut Ui, age: &AgeSummary) {
    metric(ui, "Average Age", age.mean.map(|m| format!("{m:.1}")));
    metric(ui, "Minimum Age", age.min.map(|m| m.to_string()));
    metric(ui, "Maximum Age", age.max.map(|m| m.to_string()));
}

fn metric(ui: &mut Ui, label: &str, value: Option<String>) {
    ui.label(RichText::new(label).weak());
    ui.label(
        RichText::new(value.as_deref().unwrap_or(PLACEHOLDER))
            .size(28.0)
            .strong(),
    );
    ui.add_space(6.0);
}

fn record_table(ui: &mut Ui, rows: &[Record]) {
    if rows.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(70.0), 6)
        .header(20.0, |mut header| {
            for name in ["Age", "Sex", "BP", "Cholesterol", "Na_to_K", "Drug"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.age.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.sex.display_name());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.bp.display_name());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.cholesterol.display_name());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.3}", rec.na_to_k));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.drug.as_str());
                });
            });
        });
}

fn insights(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Insights");
        ui.label("Analyze the impact of age and Na_to_K ratio on drug prescriptions.");
        ui.label(
            "Explore the relationship between blood pressure, cholesterol levels, and drug recommendations.",
        );
    });
}
