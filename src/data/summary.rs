use super::filter::FilteredView;
use super::model::Record;

// ---------------------------------------------------------------------------
// Age statistics
// ---------------------------------------------------------------------------

/// Mean / min / max age of a view. All fields are `None` for an empty view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgeSummary {
    /// Arithmetic mean rounded to one decimal place.
    pub mean: Option<f64>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

pub fn summarize_age(view: &FilteredView<'_>) -> AgeSummary {
    let (Some(min), Some(max)) = (view.iter().map(|r| r.age).min(), view.iter().map(|r| r.age).max())
    else {
        return AgeSummary::default();
    };
    let total: u64 = view.iter().map(|r| u64::from(r.age)).sum();
    let mean = total as f64 / view.len() as f64;

    AgeSummary {
        mean: Some((mean * 10.0).round() / 10.0),
        min: Some(min),
        max: Some(max),
    }
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Labelled columns shown as value counts. Other columns are counted with
/// [`count_by_key`] on their typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sex,
    Drug,
}

impl Field {
    /// Human-readable category label of `rec` for this column.
    pub fn label(self, rec: &Record) -> String {
        match self {
            Field::Sex => rec.sex.display_name().to_string(),
            Field::Drug => rec.drug.clone(),
        }
    }
}

/// Category → occurrence count, most frequent first.
pub type ValueCounts = Vec<(String, usize)>;

/// Count occurrences of each key, ordered by descending count. Ties keep the
/// order in which keys were first seen.
pub fn count_by_key<'a, K, F>(view: &FilteredView<'a>, key: F) -> Vec<(K, usize)>
where
    K: PartialEq,
    F: Fn(&'a Record) -> K,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for rec in view.iter() {
        let k = key(rec);
        match counts.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, n)) => *n += 1,
            None => counts.push((k, 1)),
        }
    }
    // `sort_by` is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Value counts of a categorical column, labelled for display.
pub fn count_by(view: &FilteredView<'_>, field: Field) -> ValueCounts {
    count_by_key(view, |rec| field.label(rec))
}
