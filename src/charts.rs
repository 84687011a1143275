//! Chart builders: pure functions from a filtered view to declarative chart
//! specs. Drawing is left to `ui::plot`.

use eframe::egui::Color32;

use crate::color::{cholesterol_color, ColorMap, PIE_PALETTE};
use crate::data::filter::FilteredView;
use crate::data::model::{BloodPressure, Cholesterol};
use crate::data::summary::{count_by, count_by_key, Field};

// ---------------------------------------------------------------------------
// Gender pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the view in `0.0..=1.0`.
    pub fraction: f64,
    /// Percentage text drawn on the slice, e.g. `"52.0%"`.
    pub percent_label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

pub fn render_gender_pie(view: &FilteredView<'_>) -> PieSpec {
    let total = view.len();
    let slices = count_by(view, Field::Sex)
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let fraction = count as f64 / total as f64;
            PieSlice {
                label,
                count,
                fraction,
                percent_label: format!("{:.1}%", fraction * 100.0),
                color: PIE_PALETTE[i % PIE_PALETTE.len()],
            }
        })
        .collect();

    PieSpec {
        title: "Gender Distribution".to_string(),
        slices,
    }
}

// ---------------------------------------------------------------------------
// Drug bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DrugBar {
    pub drug: String,
    pub count: usize,
    /// Annotation drawn above the bar.
    pub count_label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<DrugBar>,
}

impl BarSpec {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

pub fn render_drug_bar(view: &FilteredView<'_>, colors: &ColorMap) -> BarSpec {
    let bars = count_by(view, Field::Drug)
        .into_iter()
        .map(|(drug, count)| DrugBar {
            color: colors.color_for(&drug),
            count_label: count.to_string(),
            drug,
            count,
        })
        .collect();

    BarSpec {
        title: "Drug Distribution".to_string(),
        x_label: "Drug Type".to_string(),
        y_label: "Count".to_string(),
        bars,
    }
}

// ---------------------------------------------------------------------------
// Na_to_K vs Age scatter
// ---------------------------------------------------------------------------

/// All points of one drug, drawn in one colour under one legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub drug: String,
    pub color: Color32,
    /// `[age, na_to_k]` pairs in view order.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterSpec {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

pub fn render_scatter(view: &FilteredView<'_>, colors: &ColorMap) -> ScatterSpec {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for rec in view.iter() {
        let point = [f64::from(rec.age), rec.na_to_k];
        match series.iter_mut().find(|s| s.drug == rec.drug) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                drug: rec.drug.clone(),
                color: colors.color_for(&rec.drug),
                points: vec![point],
            }),
        }
    }

    ScatterSpec {
        title: "Na_to_K vs Age".to_string(),
        x_label: "Age".to_string(),
        y_label: "Na_to_K".to_string(),
        legend_title: "Drug".to_string(),
        series,
    }
}

// ---------------------------------------------------------------------------
// BP / cholesterol grouped count
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountBar {
    pub cholesterol: Cholesterol,
    pub label: String,
    pub count: usize,
    pub color: Color32,
}

/// Bars sharing one blood-pressure level on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CountGroup {
    pub bp: BloodPressure,
    pub label: String,
    pub bars: Vec<CountBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCountSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub groups: Vec<CountGroup>,
}

impl GroupedCountSpec {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Count every (BP, cholesterol) combination. Groups and hues follow the
/// order they first appear in the view; absent combinations get a zero bar.
pub fn render_bp_cholesterol_count(view: &FilteredView<'_>) -> GroupedCountSpec {
    let mut bps: Vec<BloodPressure> = Vec::new();
    let mut levels: Vec<Cholesterol> = Vec::new();
    for rec in view.iter() {
        if !bps.contains(&rec.bp) {
            bps.push(rec.bp);
        }
        if !levels.contains(&rec.cholesterol) {
            levels.push(rec.cholesterol);
        }
    }
    let pairs = count_by_key(view, |rec| (rec.bp, rec.cholesterol));

    let groups = bps
        .into_iter()
        .map(|bp| CountGroup {
            bp,
            label: bp.display_name().to_string(),
            bars: levels
                .iter()
                .map(|&level| CountBar {
                    cholesterol: level,
                    label: level.display_name().to_string(),
                    count: pairs
                        .iter()
                        .find(|(key, _)| *key == (bp, level))
                        .map_or(0, |(_, n)| *n),
                    color: cholesterol_color(level),
                })
                .collect(),
        })
        .collect();

    GroupedCountSpec {
        title: "BP and Cholesterol Distribution".to_string(),
        x_label: "Blood Pressure Levels".to_string(),
        y_label: "Count".to_string(),
        legend_title: "Cholesterol".to_string(),
        groups,
    }
}
