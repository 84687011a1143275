use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{AgeRange, FilterCriteria};
use crate::data::loader;
use crate::data::model::{BloodPressure, Cholesterol, Dataset, Sex};
use crate::pipeline::DashboardSnapshot;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None if loading failed).
    pub dataset: Option<Dataset>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Age range the criteria are reset to.
    pub default_age_range: AgeRange,

    /// Drug → colour, fixed for the lifetime of the dataset.
    pub drug_colors: ColorMap,

    /// Output of the last pipeline run.
    pub snapshot: Option<DashboardSnapshot>,

    /// Fatal error message shown instead of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the dataset named by `config`. A failure leaves the state without
    /// a dataset and with the error message set.
    pub fn load(config: &DashboardConfig) -> Self {
        match loader::load(&config.data_path) {
            Ok(dataset) => Self::from_dataset(dataset, config.default_age_range),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                let kind = if e.is_schema_error() {
                    "Dataset does not match the expected schema"
                } else {
                    "Dataset unavailable"
                };
                Self {
                    dataset: None,
                    criteria: FilterCriteria {
                        age_range: config.default_age_range,
                        sexes: Default::default(),
                        blood_pressures: Default::default(),
                        cholesterols: Default::default(),
                    },
                    default_age_range: config.default_age_range,
                    drug_colors: ColorMap::new(Vec::<String>::new()),
                    snapshot: None,
                    status_message: Some(format!("{kind}: {e}")),
                }
            }
        }
    }

    /// Ingest a loaded dataset, initialise filters and colours, and run the
    /// first render pass.
    pub fn from_dataset(dataset: Dataset, default_age_range: AgeRange) -> Self {
        let mut criteria = FilterCriteria::defaults_for(&dataset);
        criteria.age_range = default_age_range;
        let drug_colors = ColorMap::new(dataset.drugs.iter().cloned());

        let mut state = Self {
            dataset: Some(dataset),
            criteria,
            default_age_range,
            drug_colors,
            snapshot: None,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Rerun the pipeline for the current criteria, replacing the previous
    /// snapshot.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.snapshot = Some(DashboardSnapshot::compute(ds, &self.criteria, &self.drug_colors));
        }
    }

    /// Restore the start-up selection.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::defaults_for(ds);
            self.criteria.age_range = self.default_age_range;
            self.refilter();
        }
    }

    /// Select all observed values of every categorical filter.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(ds) = &self.dataset {
            match column {
                FilterColumn::Sex => self.criteria.sexes = ds.sexes.iter().copied().collect(),
                FilterColumn::BloodPressure => {
                    self.criteria.blood_pressures = ds.blood_pressures.iter().copied().collect()
                }
                FilterColumn::Cholesterol => {
                    self.criteria.cholesterols = ds.cholesterols.iter().copied().collect()
                }
            }
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        match column {
            FilterColumn::Sex => self.criteria.sexes.clear(),
            FilterColumn::BloodPressure => self.criteria.blood_pressures.clear(),
            FilterColumn::Cholesterol => self.criteria.cholesterols.clear(),
        }
        self.refilter();
    }

    pub fn toggle_sex(&mut self, sex: Sex) {
        toggle(&mut self.criteria.sexes, sex);
        self.refilter();
    }

    pub fn toggle_blood_pressure(&mut self, bp: BloodPressure) {
        toggle(&mut self.criteria.blood_pressures, bp);
        self.refilter();
    }

    pub fn toggle_cholesterol(&mut self, level: Cholesterol) {
        toggle(&mut self.criteria.cholesterols, level);
        self.refilter();
    }
}

/// Categorical columns with a multi-select filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Sex,
    BloodPressure,
    Cholesterol,
}

fn toggle<T: Ord>(set: &mut std::collections::BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::filter::DEFAULT_AGE_RANGE;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        let ds = Dataset::from_records(vec![
            record(23, Sex::Female, BloodPressure::High, Cholesterol::High, 25.355, "DrugY"),
            record(47, Sex::Male, BloodPressure::Low, Cholesterol::High, 13.093, "drugC"),
            record(28, Sex::Female, BloodPressure::Normal, Cholesterol::Normal, 7.798, "drugX"),
        ]);
        AppState::from_dataset(ds, DEFAULT_AGE_RANGE)
    }

    fn visible(state: &AppState) -> usize {
        state.snapshot.as_ref().map_or(0, |s| s.row_count())
    }

    #[test]
    fn initial_pass_uses_defaults() {
        let state = state();
        assert_eq!(visible(&state), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggles_and_bulk_selection_refilter() {
        let mut state = state();
        state.toggle_sex(Sex::Male);
        assert_eq!(visible(&state), 2);
        state.toggle_sex(Sex::Male);
        assert_eq!(visible(&state), 3);

        state.select_none(FilterColumn::Cholesterol);
        assert_eq!(visible(&state), 0);
        state.toggle_cholesterol(Cholesterol::Normal);
        assert_eq!(visible(&state), 1);
        state.select_all(FilterColumn::Cholesterol);
        assert_eq!(visible(&state), 3);

        state.toggle_blood_pressure(BloodPressure::High);
        state.criteria.age_range = AgeRange { min: 40, max: 50 };
        state.refilter();
        assert_eq!(visible(&state), 1);

        state.reset_filters();
        assert_eq!(visible(&state), 3);
        assert_eq!(state.criteria.age_range, DEFAULT_AGE_RANGE);
    }

    #[test]
    fn failed_load_keeps_message_and_no_dashboard() {
        let config = DashboardConfig {
            data_path: PathBuf::from("no/such/dir/Classification.csv"),
            ..DashboardConfig::default()
        };
        let state = AppState::load(&config);
        assert!(state.dataset.is_none());
        assert!(state.snapshot.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Dataset unavailable"));
    }
}
