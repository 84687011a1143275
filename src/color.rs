use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Cholesterol;

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

/// Two-colour palette for the gender pie, assigned by slice position.
pub const PIE_PALETTE: [Color32; 2] = [
    Color32::from_rgb(0xff, 0x99, 0x99),
    Color32::from_rgb(0x66, 0xb3, 0xff),
];

/// Muted bar colour per cholesterol level.
pub fn cholesterol_color(level: Cholesterol) -> Color32 {
    match level {
        Cholesterol::Normal => Color32::from_rgb(0x48, 0x78, 0xd0),
        Cholesterol::High => Color32::from_rgb(0xee, 0x85, 0x4a),
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a categorical column to distinct colours.
///
/// Built once from the full dataset so a label keeps its colour no matter
/// how the view is filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the labels, sorted so the assignment does not
    /// depend on row order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(unique.len());
        let mapping: BTreeMap<String, Color32> = unique.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        let unique: BTreeSet<[u8; 4]> = colours.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn mapping_ignores_label_order() {
        let a = ColorMap::new(["drugX", "DrugY", "drugA"]);
        let b = ColorMap::new(["drugA", "drugX", "DrugY", "drugX"]);
        assert_eq!(a, b);
        assert_eq!(a.color_for("DrugY"), b.color_for("DrugY"));
        assert_eq!(a.legend_entries().len(), 3);
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let map = ColorMap::new(["drugA"]);
        assert_eq!(map.color_for("drugZ"), Color32::GRAY);
        assert_ne!(map.color_for("drugA"), Color32::GRAY);
    }
}
