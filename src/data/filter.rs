use std::collections::BTreeSet;

use super::model::{BloodPressure, Cholesterol, Dataset, Record, Sex};

// ---------------------------------------------------------------------------
// FilterCriteria – the combined sidebar selection
// ---------------------------------------------------------------------------

/// Age range applied when the dashboard opens, independent of the data.
pub const DEFAULT_AGE_RANGE: AgeRange = AgeRange { min: 20, max: 60 };

/// Inclusive age bounds. A range with `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

/// Inclusion constraints chosen by the user.
///
/// An empty set selects nothing for that column; there is no implicit
/// "empty means all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub age_range: AgeRange,
    pub sexes: BTreeSet<Sex>,
    pub blood_pressures: BTreeSet<BloodPressure>,
    pub cholesterols: BTreeSet<Cholesterol>,
}

impl FilterCriteria {
    /// Everything observed in `dataset` selected, age limited to
    /// [`DEFAULT_AGE_RANGE`].
    pub fn defaults_for(dataset: &Dataset) -> Self {
        FilterCriteria {
            age_range: DEFAULT_AGE_RANGE,
            sexes: dataset.sexes.iter().copied().collect(),
            blood_pressures: dataset.blood_pressures.iter().copied().collect(),
            cholesterols: dataset.cholesterols.iter().copied().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate + filtered view
// ---------------------------------------------------------------------------

/// Build the row predicate for `criteria`: the conjunction of the age range
/// and the three set memberships.
pub fn build_predicate(criteria: &FilterCriteria) -> impl Fn(&Record) -> bool + '_ {
    move |rec: &Record| {
        criteria.age_range.contains(rec.age)
            && criteria.sexes.contains(&rec.sex)
            && criteria.blood_pressures.contains(&rec.bp)
            && criteria.cholesterols.contains(&rec.cholesterol)
    }
}

/// Read-only subset of a [`Dataset`], in source order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> FromIterator<&'a Record> for FilteredView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        FilteredView {
            records: iter.into_iter().collect(),
        }
    }
}

/// Keep the records of `dataset` that pass `predicate`, preserving order.
pub fn apply<'a, P>(dataset: &'a Dataset, predicate: P) -> FilteredView<'a>
where
    P: Fn(&Record) -> bool,
{
    dataset.records().iter().filter(|rec| predicate(rec)).collect()
}

/// Convenience wrapper: build the predicate and apply it in one step.
pub fn filter_dataset<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    apply(dataset, build_predicate(criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn five_ages() -> Dataset {
        Dataset::from_records(
            [15, 25, 35, 45, 55]
                .into_iter()
                .map(|age| record(age, Sex::Female, BloodPressure::Normal, Cholesterol::Normal, 10.0, "drugX"))
                .collect(),
        )
    }

    fn mixed() -> Dataset {
        Dataset::from_records(vec![
            record(23, Sex::Female, BloodPressure::High, Cholesterol::High, 25.355, "DrugY"),
            record(47, Sex::Male, BloodPressure::Low, Cholesterol::High, 13.093, "drugC"),
            record(47, Sex::Male, BloodPressure::Low, Cholesterol::Normal, 10.114, "drugC"),
            record(28, Sex::Female, BloodPressure::Normal, Cholesterol::High, 7.798, "drugX"),
            record(61, Sex::Female, BloodPressure::Low, Cholesterol::High, 18.043, "DrugY"),
            record(22, Sex::Male, BloodPressure::Normal, Cholesterol::High, 8.607, "drugX"),
            record(49, Sex::Female, BloodPressure::Normal, Cholesterol::High, 16.275, "DrugY"),
            record(41, Sex::Male, BloodPressure::Low, Cholesterol::Normal, 11.037, "drugC"),
        ])
    }

    #[test]
    fn age_range_is_inclusive_and_ordered() {
        let ds = five_ages();
        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.age_range = AgeRange { min: 20, max: 50 };

        let view = filter_dataset(&ds, &criteria);
        let ages: Vec<u32> = view.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![25, 35, 45]);

        criteria.age_range = AgeRange { min: 25, max: 45 };
        let ages: Vec<u32> = filter_dataset(&ds, &criteria).iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![25, 35, 45]);
    }

    #[test]
    fn defaults_select_observed_domain_with_fixed_age_range() {
        let ds = mixed();
        let criteria = FilterCriteria::defaults_for(&ds);
        assert_eq!(criteria.age_range, AgeRange { min: 20, max: 60 });
        assert_eq!(criteria.sexes.len(), 2);
        assert_eq!(criteria.blood_pressures.len(), 3);
        assert_eq!(criteria.cholesterols.len(), 2);

        // 61 falls outside the default age range.
        assert_eq!(filter_dataset(&ds, &criteria).len(), 7);
    }

    #[test]
    fn empty_set_selects_nothing() {
        let ds = mixed();
        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.age_range = AgeRange { min: 0, max: 200 };
        criteria.sexes.clear();
        assert!(filter_dataset(&ds, &criteria).is_empty());

        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.cholesterols.clear();
        assert!(filter_dataset(&ds, &criteria).is_empty());
    }

    #[test]
    fn inverted_age_range_matches_nothing() {
        let ds = mixed();
        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.age_range = AgeRange { min: 50, max: 30 };
        assert!(filter_dataset(&ds, &criteria).is_empty());
    }

    #[test]
    fn every_row_satisfies_the_conjunction() {
        let ds = mixed();
        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.age_range = AgeRange { min: 21, max: 48 };
        criteria.sexes = [Sex::Male].into_iter().collect();
        criteria.blood_pressures = [BloodPressure::Low, BloodPressure::Normal].into_iter().collect();
        criteria.cholesterols = [Cholesterol::High].into_iter().collect();

        let view = filter_dataset(&ds, &criteria);
        assert_eq!(view.len(), 2);
        for rec in view.iter() {
            assert!(criteria.age_range.contains(rec.age));
            assert_eq!(rec.sex, Sex::Male);
            assert_ne!(rec.bp, BloodPressure::High);
            assert_eq!(rec.cholesterol, Cholesterol::High);
        }
    }

    #[test]
    fn filtering_is_stable() {
        let ds = mixed();
        let mut criteria = FilterCriteria::defaults_for(&ds);
        criteria.age_range = AgeRange { min: 0, max: 100 };
        criteria.sexes = [Sex::Female].into_iter().collect();

        let view = filter_dataset(&ds, &criteria);
        let positions: Vec<usize> = view
            .iter()
            .map(|rec| ds.records().iter().position(|r| std::ptr::eq(r, rec)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert_eq!(positions, vec![0, 3, 4, 6]);
    }

    #[test]
    fn apply_accepts_any_predicate() {
        let ds = mixed();
        let view = apply(&ds, |rec| rec.na_to_k > 15.0);
        let drugs: Vec<&str> = view.iter().map(|r| r.drug.as_str()).collect();
        assert_eq!(drugs, vec!["DrugY", "DrugY", "DrugY"]);
    }
}
