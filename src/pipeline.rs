use crate::charts::{
    render_bp_cholesterol_count, render_drug_bar, render_gender_pie, render_scatter, BarSpec,
    GroupedCountSpec, PieSpec, ScatterSpec,
};
use crate::color::ColorMap;
use crate::data::filter::{filter_dataset, FilterCriteria};
use crate::data::model::{Dataset, Record};
use crate::data::summary::{count_by, summarize_age, AgeSummary, Field, ValueCounts};

// ---------------------------------------------------------------------------
// One full render pass
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one set of filter criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Filtered rows, copied out so the snapshot owns its data.
    pub rows: Vec<Record>,
    pub age: AgeSummary,
    pub gender_counts: ValueCounts,
    pub drug_counts: ValueCounts,
    pub gender_pie: PieSpec,
    pub drug_bar: BarSpec,
    pub scatter: ScatterSpec,
    pub bp_cholesterol: GroupedCountSpec,
}

impl DashboardSnapshot {
    /// Filter `dataset`, then derive the summaries and every chart from the
    /// resulting view.
    pub fn compute(dataset: &Dataset, criteria: &FilterCriteria, drug_colors: &ColorMap) -> Self {
        let view = filter_dataset(dataset, criteria);
        log::debug!("Filter matched {} of {} records", view.len(), dataset.len());

        let age = summarize_age(&view);
        let gender_counts = count_by(&view, Field::Sex);
        let drug_counts = count_by(&view, Field::Drug);

        DashboardSnapshot {
            rows: view.iter().cloned().collect(),
            age,
            gender_counts,
            drug_counts,
            gender_pie: render_gender_pie(&view),
            drug_bar: render_drug_bar(&view, drug_colors),
            scatter: render_scatter(&view, drug_colors),
            bp_cholesterol: render_bp_cholesterol_count(&view),
        }
    }

    /// Number of rows that passed the filter.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
