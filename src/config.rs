use std::path::PathBuf;

use crate::data::filter::{AgeRange, DEFAULT_AGE_RANGE};

/// Fixed start-up settings. There are no flags or config files; everything
/// comes from [`Default`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV file read once at start-up, relative to the working directory.
    pub data_path: PathBuf,
    pub default_age_range: AgeRange,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Classification.csv"),
            default_age_range: DEFAULT_AGE_RANGE,
            window_title: "Drug Analysis Dashboard".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}
