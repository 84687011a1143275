use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Patient sex as recorded in the `Sex` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Sex {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Sex {
    pub fn display_name(self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "F"),
            Sex::Male => write!(f, "M"),
        }
    }
}

/// Blood pressure level from the `BP` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum BloodPressure {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "HIGH")]
    High,
}

impl BloodPressure {
    pub fn display_name(self) -> &'static str {
        match self {
            BloodPressure::Low => "Low",
            BloodPressure::Normal => "Normal",
            BloodPressure::High => "High",
        }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BloodPressure::Low => write!(f, "LOW"),
            BloodPressure::Normal => write!(f, "NORMAL"),
            BloodPressure::High => write!(f, "HIGH"),
        }
    }
}

/// Cholesterol level from the `Cholesterol` column. Only two levels exist in
/// the source data; any other token is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Cholesterol {
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "HIGH")]
    High,
}

impl Cholesterol {
    pub fn display_name(self) -> &'static str {
        match self {
            Cholesterol::Normal => "Normal",
            Cholesterol::High => "High",
        }
    }
}

impl fmt::Display for Cholesterol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cholesterol::Normal => write!(f, "NORMAL"),
            Cholesterol::High => write!(f, "HIGH"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the CSV file
// ---------------------------------------------------------------------------

/// A single patient row. Field names map onto the case-sensitive CSV header
/// `Age,Sex,BP,Cholesterol,Na_to_K,Drug`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    /// Patient age in years.
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "BP")]
    pub bp: BloodPressure,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: Cholesterol,
    /// Sodium to potassium ratio in blood.
    #[serde(rename = "Na_to_K")]
    pub na_to_k: f64,
    /// Prescribed drug class.
    #[serde(rename = "Drug")]
    pub drug: String,
}

/// Column names every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Age", "Sex", "BP", "Cholesterol", "Na_to_K", "Drug"];

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the observed domain of each column.
///
/// Domains keep first-encountered order so selectors list options the way
/// they appear in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Smallest and largest age in the file, `None` for an empty file.
    pub age_bounds: Option<(u32, u32)>,
    pub sexes: Vec<Sex>,
    pub blood_pressures: Vec<BloodPressure>,
    pub cholesterols: Vec<Cholesterol>,
    pub drugs: Vec<String>,
}

impl Dataset {
    /// Build column domains from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut sexes = Vec::new();
        let mut blood_pressures = Vec::new();
        let mut cholesterols = Vec::new();
        let mut drugs: Vec<String> = Vec::new();
        let mut age_bounds: Option<(u32, u32)> = None;

        for rec in &records {
            push_unique(&mut sexes, rec.sex);
            push_unique(&mut blood_pressures, rec.bp);
            push_unique(&mut cholesterols, rec.cholesterol);
            if !drugs.iter().any(|d| d == &rec.drug) {
                drugs.push(rec.drug.clone());
            }
            age_bounds = Some(match age_bounds {
                Some((lo, hi)) => (lo.min(rec.age), hi.max(rec.age)),
                None => (rec.age, rec.age),
            });
        }

        Dataset {
            records,
            age_bounds,
            sexes,
            blood_pressures,
            cholesterols,
            drugs,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        age: u32,
        sex: Sex,
        bp: BloodPressure,
        cholesterol: Cholesterol,
        na_to_k: f64,
        drug: &str,
    ) -> Record {
        Record {
            age,
            sex,
            bp,
            cholesterol,
            na_to_k,
            drug: drug.to_string(),
        }
    }

    #[test]
    fn domains_keep_first_encountered_order() {
        let ds = Dataset::from_records(vec![
            record(47, Sex::Male, BloodPressure::Low, Cholesterol::High, 13.1, "drugC"),
            record(23, Sex::Female, BloodPressure::High, Cholesterol::High, 25.4, "DrugY"),
            record(61, Sex::Female, BloodPressure::Low, Cholesterol::Normal, 18.0, "DrugY"),
        ]);

        assert_eq!(ds.sexes, vec![Sex::Male, Sex::Female]);
        assert_eq!(ds.blood_pressures, vec![BloodPressure::Low, BloodPressure::High]);
        assert_eq!(ds.cholesterols, vec![Cholesterol::High, Cholesterol::Normal]);
        assert_eq!(ds.drugs, vec!["drugC".to_string(), "DrugY".to_string()]);
        assert_eq!(ds.age_bounds, Some((23, 61)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_age_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.age_bounds, None);
        assert!(ds.drugs.is_empty());
    }

    #[test]
    fn display_uses_source_tokens() {
        assert_eq!(Sex::Female.to_string(), "F");
        assert_eq!(BloodPressure::Normal.to_string(), "NORMAL");
        assert_eq!(Cholesterol::High.to_string(), "HIGH");
        assert_eq!(Cholesterol::High.display_name(), "High");
    }
}
