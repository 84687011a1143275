/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  Classification.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, observed column domains
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → predicate → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  age statistics, value counts
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod summary;
