use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{LoadError, SchemaError};
use super::model::{price_error, Dataset, ErrorSource, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a scored dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the scored-product columns
/// * `.json`    – `[{ "product_name": ..., "category": ..., ... }, ...]`
/// * `.parquet` – one column per field, string or numeric types
///
/// The whole file is validated; any bad row fails the load and nothing is
/// returned.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::debug!("loading {} as .{ext}", path.display());

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(open(path)?)?,
        "json" => load_json_reader(open(path)?)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded {} records from {} (absolute error {})",
        dataset.len(),
        path.display(),
        dataset.error_source()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// A field of [`Record`] as it appears in the source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ProductName,
    Category,
    DiscountedPrice,
    PredictedDiscountedPrice,
    Rating,
    RatingCount,
    Sentiment,
    AbsoluteError,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::ProductName => "product_name",
            Field::Category => "category",
            Field::DiscountedPrice => "discounted_price",
            Field::PredictedDiscountedPrice => "predicted_discounted_price",
            Field::Rating => "rating",
            Field::RatingCount => "rating_count",
            Field::Sentiment => "sentiment",
            Field::AbsoluteError => "absolute_error",
        }
    }

    /// Header spellings accepted for this field, canonical name first.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Sentiment => &["sentiment", "sentimiento"],
            Field::AbsoluteError => &["absolute_error", "Error_Absoluto"],
            Field::ProductName => &["product_name"],
            Field::Category => &["category"],
            Field::DiscountedPrice => &["discounted_price"],
            Field::PredictedDiscountedPrice => &["predicted_discounted_price"],
            Field::Rating => &["rating"],
            Field::RatingCount => &["rating_count"],
        }
    }
}

/// Positions of each field within a header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnLayout {
    product_name: usize,
    category: usize,
    discounted_price: usize,
    predicted_discounted_price: usize,
    rating: usize,
    rating_count: usize,
    sentiment: Option<usize>,
    absolute_error: Option<usize>,
}

impl ColumnLayout {
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, SchemaError> {
        let find = |field: Field| {
            headers.iter().position(|h| {
                let h = h.as_ref().trim_start_matches('\u{feff}').trim();
                field.aliases().iter().any(|alias| *alias == h)
            })
        };
        let require = |field: Field| {
            find(field).ok_or(SchemaError::MissingColumn {
                column: field.name(),
            })
        };

        Ok(Self {
            product_name: require(Field::ProductName)?,
            category: require(Field::Category)?,
            discounted_price: require(Field::DiscountedPrice)?,
            predicted_discounted_price: require(Field::PredictedDiscountedPrice)?,
            rating: require(Field::Rating)?,
            rating_count: require(Field::RatingCount)?,
            sentiment: find(Field::Sentiment),
            absolute_error: find(Field::AbsoluteError),
        })
    }

    fn error_source(&self) -> ErrorSource {
        if self.absolute_error.is_some() {
            ErrorSource::Sourced
        } else {
            ErrorSource::Computed
        }
    }

    /// Turn one row into a [`Record`].  `cell(i)` returns the cell in column `i`.
    fn build_record<'a>(
        &self,
        row: usize,
        cell: impl Fn(usize) -> Cell<'a>,
    ) -> Result<Record, SchemaError> {
        let discounted_price = non_negative(row, Field::DiscountedPrice, cell(self.discounted_price))?;
        let predicted_discounted_price = non_negative(
            row,
            Field::PredictedDiscountedPrice,
            cell(self.predicted_discounted_price),
        )?;

        let absolute_error = match self.absolute_error {
            Some(col) => non_negative(row, Field::AbsoluteError, cell(col))?,
            None => price_error(discounted_price, predicted_discounted_price),
        };
        let sentiment = match self.sentiment {
            Some(col) => optional_number(row, Field::Sentiment, cell(col))?,
            None => None,
        };

        Ok(Record {
            product_name: text(row, Field::ProductName, cell(self.product_name))?,
            category: text(row, Field::Category, cell(self.category))?,
            discounted_price,
            predicted_discounted_price,
            rating: number(row, Field::Rating, cell(self.rating))?,
            rating_count: count(row, Field::RatingCount, cell(self.rating_count))?,
            sentiment,
            absolute_error,
        })
    }
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// A single source cell, before it is typed.
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Null,
    Text(Cow<'a, str>),
    Number(f64),
    /// A column type that cannot hold any record field.
    Unsupported(String),
}

impl Cell<'_> {
    fn raw(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(s) => s.to_string(),
            Cell::Number(n) => number_to_text(*n),
            Cell::Unsupported(ty) => ty.clone(),
        }
    }
}

fn invalid(row: usize, field: Field, cell: &Cell<'_>, reason: &'static str) -> SchemaError {
    SchemaError::InvalidField {
        row,
        field: field.name(),
        value: cell.raw(),
        reason,
    }
}

/// Integral floats render without a fractional part, like `astype(str)` on ints.
fn number_to_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn text(row: usize, field: Field, cell: Cell<'_>) -> Result<String, SchemaError> {
    match &cell {
        Cell::Text(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Cell::Number(n) => Ok(number_to_text(*n)),
        Cell::Unsupported(_) => Err(invalid(row, field, &cell, "unsupported column type")),
        _ => Err(invalid(row, field, &cell, "empty value")),
    }
}

fn number(row: usize, field: Field, cell: Cell<'_>) -> Result<f64, SchemaError> {
    let value = match &cell {
        Cell::Number(n) => *n,
        Cell::Text(s) if s.trim().is_empty() => {
            return Err(invalid(row, field, &cell, "empty value"))
        }
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(row, field, &cell, "not a number"))?,
        Cell::Null => return Err(invalid(row, field, &cell, "empty value")),
        Cell::Unsupported(_) => {
            return Err(invalid(row, field, &cell, "unsupported column type"))
        }
    };
    if !value.is_finite() {
        return Err(invalid(row, field, &cell, "not a finite number"));
    }
    Ok(value)
}

fn non_negative(row: usize, field: Field, cell: Cell<'_>) -> Result<f64, SchemaError> {
    let raw = cell.clone();
    let value = number(row, field, cell)?;
    if value < 0.0 {
        return Err(invalid(row, field, &raw, "negative value"));
    }
    Ok(value)
}

fn optional_number(row: usize, field: Field, cell: Cell<'_>) -> Result<Option<f64>, SchemaError> {
    match &cell {
        Cell::Null => Ok(None),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        _ => number(row, field, cell).map(Some),
    }
}

fn count(row: usize, field: Field, cell: Cell<'_>) -> Result<u64, SchemaError> {
    if let Cell::Text(s) = &cell {
        if let Ok(n) = s.trim().parse::<u64>() {
            return Ok(n);
        }
    }
    let raw = cell.clone();
    let value = number(row, field, cell)?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(invalid(row, field, &raw, "not a non-negative integer"));
    }
    Ok(value as u64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a scored dataset from CSV text.  The first line is the header.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, SchemaError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SchemaError::Unreadable {
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let layout = ColumnLayout::resolve(&headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let line = result.map_err(|e| SchemaError::Malformed {
            row,
            message: e.to_string(),
        })?;
        let record = layout.build_record(row, |col| match line.get(col) {
            Some(value) => Cell::Text(Cow::Borrowed(value)),
            None => Cell::Null,
        })?;
        records.push(record);
    }

    Ok(finish(records, &layout))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "product_name": "USB-C cable",
///     "category": "Electronics",
///     "discounted_price": 199.0,
///     "predicted_discounted_price": 240.5,
///     "rating": 4.2,
///     "rating_count": 24269
///   },
///   ...
/// ]
/// ```
///
/// The column set is taken from the first object.  An empty array loads as
/// an empty dataset.
pub fn load_json_reader<R: Read>(reader: R) -> Result<Dataset, SchemaError> {
    let root: JsonValue = serde_json::from_reader(reader).map_err(|e| SchemaError::Unreadable {
        message: e.to_string(),
    })?;

    let rows = root.as_array().ok_or_else(|| SchemaError::Unreadable {
        message: "expected a top-level JSON array".into(),
    })?;

    let Some(first) = rows.first() else {
        return Ok(Dataset::new(Vec::new(), ErrorSource::Computed, false));
    };
    let headers: Vec<String> = first
        .as_object()
        .ok_or_else(|| SchemaError::Malformed {
            row: 0,
            message: "not a JSON object".into(),
        })?
        .keys()
        .cloned()
        .collect();
    let layout = ColumnLayout::resolve(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or_else(|| SchemaError::Malformed {
            row,
            message: "not a JSON object".into(),
        })?;
        let record = layout.build_record(row, |col| json_cell(obj.get(&headers[col])))?;
        records.push(record);
    }

    Ok(finish(records, &layout))
}

fn json_cell(value: Option<&JsonValue>) -> Cell<'_> {
    match value {
        None | Some(JsonValue::Null) => Cell::Null,
        Some(JsonValue::String(s)) => Cell::Text(Cow::Borrowed(s)),
        Some(JsonValue::Number(n)) => match n.as_f64() {
            Some(f) => Cell::Number(f),
            None => Cell::Text(Cow::Owned(n.to_string())),
        },
        Some(JsonValue::Bool(b)) => Cell::Text(Cow::Owned(b.to_string())),
        Some(JsonValue::Array(_)) => Cell::Unsupported("array".into()),
        Some(JsonValue::Object(_)) => Cell::Unsupported("object".into()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let layout = ColumnLayout::resolve(&headers)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();
        for row in 0..batch.num_rows() {
            let record = layout.build_record(offset + row, |col| arrow_cell(batch.column(col), row))?;
            records.push(record);
        }
    }

    Ok(finish(records, &layout))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Cell<'_> {
    if col.is_null(row) {
        return Cell::Null;
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| Cell::Text(Cow::Borrowed(a.value(row)))),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| Cell::Text(Cow::Borrowed(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| Cell::Number(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| Cell::Text(Cow::Owned(a.value(row).to_string()))),
        _ => None,
    };
    cell.unwrap_or_else(|| Cell::Unsupported(format!("{:?}", col.data_type())))
}

fn finish(records: Vec<Record>, layout: &ColumnLayout) -> Dataset {
    Dataset::new(records, layout.error_source(), layout.sentiment.is_some())
}
