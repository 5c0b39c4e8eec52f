use std::collections::BTreeSet;
use std::fmt;

use super::error::QueryError;
use super::model::{price_error, Dataset, ErrorPercent, GlobalMetrics, Record, RecordMetrics};

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// Category part of a filter: everything, or one exact category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn as_option(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All categories"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}

/// What the user picked: a category scope and, once chosen, a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    pub product_name: Option<String>,
}

impl FilterSelection {
    /// Look up the selected product.  `None` until a product has been picked.
    pub fn resolve(&self, dataset: &Dataset) -> Option<Result<RecordMetrics, QueryError>> {
        let product = self.product_name.as_deref()?;
        Some(lookup(dataset, self.category.as_option(), product))
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

fn in_scope<'a>(dataset: &'a Dataset, category: Option<&'a str>) -> impl Iterator<Item = (usize, &'a Record)> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(move |(_, r)| category.map_or(true, |c| r.category == c))
}

/// Distinct categories, ascending.  The "all" choice is up to the caller.
pub fn list_categories(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|r| r.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct product names within `category` (or everywhere), ascending.
///
/// Category matching is exact and case-sensitive; an unknown category gives
/// an empty list.
pub fn list_products(dataset: &Dataset, category: Option<&str>) -> Vec<String> {
    in_scope(dataset, category)
        .map(|(_, r)| r.product_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find the first record (in dataset order) named `product_name`, optionally
/// within `category`, and compute its comparison metrics.
///
/// Product names are not unique; when several records match, the first one
/// wins and the others are not reported.
pub fn lookup(
    dataset: &Dataset,
    category: Option<&str>,
    product_name: &str,
) -> Result<RecordMetrics, QueryError> {
    let (index, record) = in_scope(dataset, category)
        .find(|(_, r)| r.product_name == product_name)
        .ok_or_else(|| QueryError::NotFound {
            category: category.map(str::to_string),
            product_name: product_name.to_string(),
        })?;

    let absolute_error = price_error(record.discounted_price, record.predicted_discounted_price);
    Ok(RecordMetrics {
        index,
        record: record.clone(),
        absolute_error,
        error_percent: ErrorPercent::of(absolute_error, record.discounted_price),
    })
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// MAE over every record and MAPE over records with a non-zero price.
pub fn global_metrics(dataset: &Dataset) -> Result<GlobalMetrics, QueryError> {
    let records = dataset.records();
    if records.is_empty() {
        return Err(QueryError::EmptyDataset);
    }

    let mae = records.iter().map(|r| r.absolute_error).sum::<f64>() / records.len() as f64;

    let (ratio_sum, priced) = records
        .iter()
        .filter(|r| r.discounted_price != 0.0)
        .fold((0.0, 0usize), |(sum, n), r| {
            (sum + r.absolute_error / r.discounted_price, n + 1)
        });
    let mape = if priced == 0 {
        ErrorPercent::Undefined
    } else {
        ErrorPercent::Defined(ratio_sum / priced as f64)
    };

    Ok(GlobalMetrics {
        mae,
        mape,
        record_count: records.len(),
        zero_price_count: records.len() - priced,
    })
}

/// The `n` records with the largest `absolute_error`, largest first.
///
/// Ties keep dataset order, so repeated calls return the same sequence.
pub fn top_by_error(dataset: &Dataset, n: usize) -> Result<Vec<&Record>, QueryError> {
    if n == 0 {
        return Err(QueryError::InvalidArgument {
            name: "n",
            reason: "must be at least 1",
        });
    }

    let mut ranked: Vec<&Record> = dataset.records().iter().collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.absolute_error.total_cmp(&a.absolute_error));
    ranked.truncate(n);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ErrorSource;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new("Widget", "Home", 100.0, 80.0, 4.5, 10),
            Record::new("Gadget", "Home", 50.0, 55.0, 3.0, 5),
            Record::new("Cable", "Electronics", 10.0, 12.0, 4.1, 300),
            Record::new("Widget", "Garden", 30.0, 30.0, 3.9, 2),
        ])
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        assert_eq!(
            list_categories(&sample()),
            vec!["Electronics", "Garden", "Home"]
        );
    }

    #[test]
    fn products_are_scoped_by_category() {
        let ds = sample();
        assert_eq!(list_products(&ds, Some("Home")), vec!["Gadget", "Widget"]);
        assert_eq!(
            list_products(&ds, None),
            vec!["Cable", "Gadget", "Widget"]
        );
        assert!(list_products(&ds, Some("home")).is_empty());
    }

    #[test]
    fn lookup_takes_first_match_in_scope() {
        let ds = sample();
        let everywhere = lookup(&ds, None, "Widget").unwrap();
        assert_eq!(everywhere.index, 0);

        let garden = lookup(&ds, Some("Garden"), "Widget").unwrap();
        assert_eq!(garden.index, 3);
        assert_eq!(garden.absolute_error, 0.0);
        assert_eq!(garden.error_percent, ErrorPercent::Defined(0.0));
    }

    #[test]
    fn lookup_recomputes_error_from_prices() {
        let stale = Record::new("Lamp", "Home", 40.0, 30.0, 4.0, 1).with_absolute_error(99.0);
        let ds = Dataset::new(vec![stale], ErrorSource::Sourced, false);
        let m = lookup(&ds, None, "Lamp").unwrap();
        assert_eq!(m.absolute_error, 10.0);
        assert_eq!(m.record.absolute_error, 99.0);
    }

    #[test]
    fn lookup_outside_category_is_not_found() {
        let err = lookup(&sample(), Some("Electronics"), "Widget").unwrap_err();
        assert_eq!(
            err,
            QueryError::NotFound {
                category: Some("Electronics".into()),
                product_name: "Widget".into(),
            }
        );
    }

    #[test]
    fn selection_without_product_resolves_to_nothing() {
        let selection = FilterSelection {
            category: CategoryFilter::Only("Home".into()),
            product_name: None,
        };
        assert!(selection.resolve(&sample()).is_none());

        let picked = FilterSelection {
            product_name: Some("Gadget".into()),
            ..selection
        };
        let m = picked.resolve(&sample()).unwrap().unwrap();
        assert_eq!(m.record.product_name, "Gadget");
    }

    #[test]
    fn mape_undefined_when_every_price_is_zero() {
        let ds = Dataset::from_records(vec![Record::new("Freebie", "Promo", 0.0, 2.0, 4.0, 1)]);
        let g = global_metrics(&ds).unwrap();
        assert_eq!(g.mae, 2.0);
        assert_eq!(g.mape, ErrorPercent::Undefined);
        assert_eq!(g.zero_price_count, 1);
    }

    #[test]
    fn top_by_error_rejects_zero() {
        assert!(matches!(
            top_by_error(&sample(), 0),
            Err(QueryError::InvalidArgument { name: "n", .. })
        ));
    }

    #[test]
    fn top_by_error_caps_at_dataset_size() {
        let ds = sample();
        let top = top_by_error(&ds, 10).unwrap();
        assert_eq!(top.len(), 4);
        assert_eq!(top[0].product_name, "Widget");
        assert_eq!(top[1].product_name, "Gadget");
    }

    #[test]
    fn category_filter_display() {
        assert_eq!(CategoryFilter::All.to_string(), "All categories");
        assert_eq!(CategoryFilter::Only("Home".into()).to_string(), "Home");
    }
}
