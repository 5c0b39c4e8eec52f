use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One generated row, in the column order the dashboard reads.
#[derive(Debug, Serialize)]
struct ScoredRow {
    product_name: String,
    category: String,
    discounted_price: f64,
    predicted_discounted_price: f64,
    rating: f64,
    rating_count: i64,
    sentiment: f64,
}

/// (category, typical price, products per category)
const CATEGORIES: [(&str, f64, usize); 5] = [
    ("Electronics|Headphones", 1500.0, 12),
    ("Electronics|Mobiles", 12000.0, 8),
    ("Computers&Accessories|Cables", 300.0, 15),
    ("Home&Kitchen|Appliances", 2500.0, 10),
    ("OfficeProducts|Stationery", 150.0, 6),
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng) -> Vec<ScoredRow> {
    let mut rows = Vec::new();
    for &(category, base_price, count) in &CATEGORIES {
        let short = category.rsplit('|').next().unwrap_or(category);
        for i in 0..count {
            let actual = round2((base_price * rng.uniform(0.4, 1.8)).max(0.0));
            // Model error grows with price, with the occasional bad miss.
            let spread = if rng.next_f64() < 0.1 { 0.6 } else { 0.12 };
            let predicted = round2((actual * (1.0 + rng.gauss(0.0, spread))).max(0.0));

            rows.push(ScoredRow {
                product_name: format!("{short} model {}", i + 1),
                category: category.to_string(),
                discounted_price: actual,
                predicted_discounted_price: predicted,
                rating: round2(rng.uniform(3.0, 5.0)),
                rating_count: (rng.uniform(0.0, 1.0).powi(3) * 50_000.0) as i64,
                sentiment: (rng.uniform(-0.2, 0.9) * 1000.0).round() / 1000.0,
            });
        }
    }
    rows
}

fn write_csv(rows: &[ScoredRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[ScoredRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("product_name", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("discounted_price", DataType::Float64, false),
        Field::new("predicted_discounted_price", DataType::Float64, false),
        Field::new("rating", DataType::Float64, false),
        Field::new("rating_count", DataType::Int64, false),
        Field::new("sentiment", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.product_name.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.discounted_price).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.predicted_discounted_price).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.rating).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.rating_count).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.sentiment).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_scored.csv")?;
    write_parquet(&rows, "sample_scored.parquet")?;

    log::info!("generated {} rows", rows.len());
    println!(
        "Wrote {} scored products in {} categories to sample_scored.csv and sample_scored.parquet",
        rows.len(),
        CATEGORIES.len()
    );
    Ok(())
}
