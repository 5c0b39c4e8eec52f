use std::fmt;

// ---------------------------------------------------------------------------
// Record – one row of the scored dataset
// ---------------------------------------------------------------------------

/// One scored product: observed price, model prediction and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub product_name: String,
    pub category: String,
    /// Actual observed price.
    pub discounted_price: f64,
    /// Model output for `discounted_price`.
    pub predicted_discounted_price: f64,
    pub rating: f64,
    pub rating_count: u64,
    /// Average review sentiment, when the source provides it.
    pub sentiment: Option<f64>,
    /// Either taken from the source or `|actual - predicted|`.
    pub absolute_error: f64,
}

impl Record {
    /// Build a record, deriving `absolute_error` from the two prices.
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        discounted_price: f64,
        predicted_discounted_price: f64,
        rating: f64,
        rating_count: u64,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            category: category.into(),
            discounted_price,
            predicted_discounted_price,
            rating,
            rating_count,
            sentiment: None,
            absolute_error: price_error(discounted_price, predicted_discounted_price),
        }
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Override the derived error, as a source-provided column would.
    pub fn with_absolute_error(mut self, absolute_error: f64) -> Self {
        self.absolute_error = absolute_error;
        self
    }
}

/// `|actual - predicted|`.
pub fn price_error(actual: f64, predicted: f64) -> f64 {
    (actual - predicted).abs()
}

// ---------------------------------------------------------------------------
// ErrorPercent – a ratio that may be undefined
// ---------------------------------------------------------------------------

/// Relative error as a fraction (0.2 == 20 %).
///
/// A zero actual price has no defined percentage; that case is carried as
/// `Undefined` so it can never be mistaken for a 0 % error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorPercent {
    Defined(f64),
    Undefined,
}

impl ErrorPercent {
    /// `error / actual`, or `Undefined` when `actual` is zero.
    pub fn of(error: f64, actual: f64) -> Self {
        if actual == 0.0 {
            ErrorPercent::Undefined
        } else {
            ErrorPercent::Defined(error / actual)
        }
    }

    pub fn as_fraction(&self) -> Option<f64> {
        match self {
            ErrorPercent::Defined(v) => Some(*v),
            ErrorPercent::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ErrorPercent::Defined(_))
    }
}

impl fmt::Display for ErrorPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPercent::Defined(v) => write!(f, "{:.2}%", v * 100.0),
            ErrorPercent::Undefined => write!(f, "n/a"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded, immutable table
// ---------------------------------------------------------------------------

/// Where the `absolute_error` values of a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    /// The source carried an absolute-error column; values were passed through.
    Sourced,
    /// Computed at load time from the two price columns.
    Computed,
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSource::Sourced => write!(f, "from source"),
            ErrorSource::Computed => write!(f, "computed"),
        }
    }
}

/// The full scored dataset, in source order.
///
/// Fields are private: once built, a dataset is only ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    error_source: ErrorSource,
    has_sentiment: bool,
}

impl Dataset {
    pub fn new(records: Vec<Record>, error_source: ErrorSource, has_sentiment: bool) -> Self {
        Self {
            records,
            error_source,
            has_sentiment,
        }
    }

    /// Wrap records whose errors were derived by [`Record::new`].
    pub fn from_records(records: Vec<Record>) -> Self {
        let has_sentiment = records.iter().any(|r| r.sentiment.is_some());
        Self::new(records, ErrorSource::Computed, has_sentiment)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn error_source(&self) -> ErrorSource {
        self.error_source
    }

    /// Whether the source had a sentiment column.
    pub fn has_sentiment(&self) -> bool {
        self.has_sentiment
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

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// A looked-up record with its freshly computed comparison metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMetrics {
    /// Position of the record in the dataset.
    pub index: usize,
    pub record: Record,
    /// Recomputed from the record's prices, not read from `absolute_error`.
    pub absolute_error: f64,
    pub error_percent: ErrorPercent,
}

/// Whole-dataset model performance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Mean absolute percentage error over records with a non-zero price.
    pub mape: ErrorPercent,
    pub record_count: usize,
    /// Records left out of `mape` because their actual price is zero.
    pub zero_price_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_derives_absolute_error() {
        let r = Record::new("Gadget", "Home", 50.0, 55.0, 3.0, 5);
        assert_eq!(r.absolute_error, 5.0);
        assert_eq!(r.sentiment, None);
    }

    #[test]
    fn error_percent_of_zero_price_is_undefined() {
        assert_eq!(ErrorPercent::of(3.0, 0.0), ErrorPercent::Undefined);
        assert_eq!(ErrorPercent::of(0.0, 10.0), ErrorPercent::Defined(0.0));
        assert_ne!(ErrorPercent::of(0.0, 0.0), ErrorPercent::Defined(0.0));
    }

    #[test]
    fn error_percent_display() {
        assert_eq!(ErrorPercent::Defined(0.2).to_string(), "20.00%");
        assert_eq!(ErrorPercent::Undefined.to_string(), "n/a");
    }

    #[test]
    fn from_records_detects_sentiment() {
        let plain = Dataset::from_records(vec![Record::new("A", "X", 1.0, 1.0, 4.0, 1)]);
        assert!(!plain.has_sentiment());

        let scored = Dataset::from_records(vec![
            Record::new("A", "X", 1.0, 1.0, 4.0, 1),
            Record::new("B", "X", 2.0, 1.0, 4.0, 1).with_sentiment(0.4),
        ]);
        assert!(scored.has_sentiment());
        assert_eq!(scored.error_source(), ErrorSource::Computed);
    }

    #[test]
    fn dataset_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
    }
}
