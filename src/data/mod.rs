/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, payload bounds, site index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload-range predicates → matching indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
