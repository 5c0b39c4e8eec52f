/// Data layer: core types, loading, and querying.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate + derive absolute_error → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, immutable, shared as Arc
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  categories, products, lookup, MAE/MAPE, top-N
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod query;

pub use error::{LoadError, QueryError, SchemaError};
pub use loader::{load_csv_reader, load_file, load_json_reader};
pub use model::{Dataset, ErrorPercent, ErrorSource, GlobalMetrics, Record, RecordMetrics};
pub use query::{
    global_metrics, list_categories, list_products, lookup, top_by_error, CategoryFilter,
    FilterSelection,
};
