use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Mesh, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::charts::{BarSpec, GroupedCountSpec, PieSpec, ScatterSpec};

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Empty frame drawn in place of a chart whose view has no rows.
fn no_data(ui: &mut Ui, height: f32) {
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    ui.painter()
        .rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::GRAY), egui::StrokeKind::Inside);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        "No data",
        FontId::proportional(16.0),
        Color32::GRAY,
    );
}

/// Axis formatter that prints a category name under each integer tick.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(15.0));
}

/// Heading for the plot legend, which `egui_plot` draws without a title.
fn legend_caption(legend_title: &str) -> String {
    format!("Colour: {legend_title}")
}

fn legend_heading(ui: &mut Ui, legend_title: &str) {
    ui.label(RichText::new(legend_caption(legend_title)).weak());
}

// ---------------------------------------------------------------------------
// Gender pie
// ---------------------------------------------------------------------------

/// Slices start at twelve o'clock and run clockwise.
pub fn gender_pie(ui: &mut Ui, spec: &PieSpec) {
    if spec.is_empty() {
        no_data(ui, PLOT_HEIGHT);
        return;
    }

    let size = ui.available_width().min(PLOT_HEIGHT - 30.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.45;

    let mut start = -FRAC_PI_2;
    for slice in &spec.slices {
        let sweep = slice.fraction as f32 * TAU;
        let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as u32;

        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, slice.color);
        for k in 0..=steps {
            let angle = start + sweep * k as f32 / steps as f32;
            mesh.colored_vertex(center + radius * egui::vec2(angle.cos(), angle.sin()), slice.color);
        }
        for k in 0..steps {
            mesh.add_triangle(0, k + 1, k + 2);
        }
        painter.add(Shape::mesh(mesh));

        let mid = start + sweep / 2.0;
        let label_pos = if spec.slices.len() == 1 {
            center
        } else {
            center + radius * 0.6 * egui::vec2(mid.cos(), mid.sin())
        };
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            &slice.percent_label,
            FontId::proportional(14.0),
            Color32::BLACK,
        );
        start += sweep;
    }

    // Legend
    ui.horizontal(|ui: &mut Ui| {
        for slice in &spec.slices {
            ui.label(RichText::new("■").color(slice.color));
            ui.label(format!("{} ({})", slice.label, slice.count));
        }
    });
}

// ---------------------------------------------------------------------------
// Drug bar chart
// ---------------------------------------------------------------------------

pub fn drug_bar(ui: &mut Ui, spec: &BarSpec) {
    chart_title(ui, &spec.title);
    if spec.is_empty() {
        no_data(ui, PLOT_HEIGHT);
        return;
    }

    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .width(0.6)
                .fill(b.color)
                .name(&b.drug)
        })
        .collect();
    let labels = spec.bars.iter().map(|b| b.drug.clone()).collect();

    Plot::new("drug_bar")
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(spec.y_label.as_str()));
            for (i, b) in spec.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, b.count as f64),
                        RichText::new(&b.count_label).strong(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Na_to_K vs Age scatter
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, spec: &ScatterSpec) {
    chart_title(ui, &spec.title);
    if spec.is_empty() {
        no_data(ui, PLOT_HEIGHT);
        return;
    }

    legend_heading(ui, &spec.legend_title);
    Plot::new("na_to_k_scatter")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.drug)
                    .color(series.color)
                    .radius(4.0)
                    .filled(true);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// BP / cholesterol grouped count
// ---------------------------------------------------------------------------

pub fn bp_cholesterol_count(ui: &mut Ui, spec: &GroupedCountSpec) {
    chart_title(ui, &spec.title);
    if spec.is_empty() {
        no_data(ui, PLOT_HEIGHT);
        return;
    }

    // Every group carries the same hues in the same order.
    let hues = spec.groups.first().map_or(0, |g| g.bars.len()).max(1);
    let width = 0.8 / hues as f64;
    let labels = spec.groups.iter().map(|g| g.label.clone()).collect();

    legend_heading(ui, &spec.legend_title);
    Plot::new("bp_cholesterol_count")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for hue in 0..hues {
                let mut name = String::new();
                let mut color = Color32::GRAY;
                let bars: Vec<Bar> = spec
                    .groups
                    .iter()
                    .enumerate()
                    .filter_map(|(gi, group)| {
                        let bar = group.bars.get(hue)?;
                        name.clone_from(&bar.label);
                        color = bar.color;
                        let offset = (hue as f64 - (hues as f64 - 1.0) / 2.0) * width;
                        Some(
                            Bar::new(gi as f64 + offset, bar.count as f64)
                                .width(width * 0.95)
                                .fill(bar.color)
                                .stroke(Stroke::new(1.0, Color32::BLACK))
                                .name(format!("{} / {}", group.label, bar.label)),
                        )
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_caption_names_the_colour_key() {
        assert_eq!(legend_caption("Drug"), "Colour: Drug");
        assert_eq!(legend_caption("Cholesterol"), "Colour: Cholesterol");
    }
}
