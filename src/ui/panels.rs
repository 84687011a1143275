use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::{BloodPressure, Cholesterol, Sex};
use crate::state::{AppState, FilterColumn};

const TITLE_GREEN: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// What the user did in one multi-select group this frame.
enum SelectAction<T> {
    Toggle(T),
    SelectAll,
    SelectNone,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.label("Refine the dataset by using the filters below.");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Copy the domains out so state can be mutated inside the closure.
    let (age_lo, age_hi) = dataset.age_bounds.unwrap_or((0, 0));
    let sexes = dataset.sexes.clone();
    let blood_pressures = dataset.blood_pressures.clone();
    let cholesterols = dataset.cholesterols.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Age range ----
            ui.strong("Select Age Range");
            let range = &mut state.criteria.age_range;
            let mut age_changed = ui
                .add(Slider::new(&mut range.min, age_lo..=age_hi).text("From"))
                .on_hover_text("Youngest patient age to include.")
                .changed();
            age_changed |= ui
                .add(Slider::new(&mut range.max, age_lo..=age_hi).text("To"))
                .on_hover_text("Oldest patient age to include.")
                .changed();
            if range.min > range.max {
                ui.label(RichText::new("From is above To: no patients match.").color(Color32::RED));
            }
            if age_changed {
                state.refilter();
            }
            ui.separator();

            // ---- Categorical multi-selects ----
            let action = multi_select(ui, "Select Gender", &sexes, &state.criteria.sexes, |s: Sex| {
                s.display_name()
            });
            match action {
                Some(SelectAction::Toggle(sex)) => state.toggle_sex(sex),
                Some(SelectAction::SelectAll) => state.select_all(FilterColumn::Sex),
                Some(SelectAction::SelectNone) => state.select_none(FilterColumn::Sex),
                None => {}
            }

            let action = multi_select(
                ui,
                "Select Blood Pressure Levels",
                &blood_pressures,
                &state.criteria.blood_pressures,
                |bp: BloodPressure| bp.display_name(),
            );
            match action {
                Some(SelectAction::Toggle(bp)) => state.toggle_blood_pressure(bp),
                Some(SelectAction::SelectAll) => state.select_all(FilterColumn::BloodPressure),
                Some(SelectAction::SelectNone) => state.select_none(FilterColumn::BloodPressure),
                None => {}
            }

            let action = multi_select(
                ui,
                "Select Cholesterol Levels",
                &cholesterols,
                &state.criteria.cholesterols,
                |level: Cholesterol| level.display_name(),
            );
            match action {
                Some(SelectAction::Toggle(level)) => state.toggle_cholesterol(level),
                Some(SelectAction::SelectAll) => state.select_all(FilterColumn::Cholesterol),
                Some(SelectAction::SelectNone) => state.select_none(FilterColumn::Cholesterol),
                None => {}
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            // ---- Drug colour legend ----
            ui.separator();
            ui.strong("Drug colours");
            for (drug, color) in state.drug_colors.legend_entries() {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color));
                    ui.label(drug);
                });
            }
        });
}

/// A collapsible checkbox group with All / None buttons.
fn multi_select<T: Copy + Ord>(
    ui: &mut Ui,
    title: &str,
    options: &[T],
    selected: &BTreeSet<T>,
    label: impl Fn(T) -> &'static str,
) -> Option<SelectAction<T>> {
    let mut action = None;
    // Show count of selected / total in the header
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    action = Some(SelectAction::SelectAll);
                }
                if ui.small_button("None").clicked() {
                    action = Some(SelectAction::SelectNone);
                }
            });

            for &value in options {
                let mut checked = selected.contains(&value);
                if ui.checkbox(&mut checked, label(value)).changed() {
                    action = Some(SelectAction::Toggle(value));
                }
            }
        });

    action
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with loaded / visible row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new("Drug Analysis Dashboard").strong().color(TITLE_GREEN));

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.snapshot.as_ref().map_or(0, |s| s.row_count());
            ui.label(format!("{} records loaded, {visible} visible", ds.len()));
        }
    });
}
