use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use launchboard::data::loader::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS, COL_PAYLOAD, COL_SITE,
};

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];
const CATEGORIES: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];
const FLIGHTS: usize = 90;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SampleRow {
    site: String,
    payload_mass_kg: f64,
    class: i64,
    booster_version: String,
    booster_category: String,
}

/// Synthesize a plausible launch history: payloads grow over the campaign,
/// success rate improves with flight number, booster categories progress
/// through the eras.
fn sample_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    (0..FLIGHTS)
        .map(|i| {
            let progress = i as f64 / FLIGHTS as f64;

            let era = ((progress * CATEGORIES.len() as f64) as usize).min(CATEGORIES.len() - 1);
            let category = CATEGORIES[era];

            // Payloads: 300 kg smallsats up to ~9600 kg, skewed upward late.
            let payload = 300.0 + rng.next_f64() * (3000.0 + 6600.0 * progress);
            let payload = (payload / 50.0).round() * 50.0;

            let p_success = 0.35 + 0.55 * progress;
            let class = i64::from(rng.next_f64() < p_success);

            SampleRow {
                site: rng.pick(&SITES).to_string(),
                payload_mass_kg: payload,
                class,
                booster_version: format!("F9 {category}  B{:04}", 1000 + i),
                booster_category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        COL_SITE,
        COL_PAYLOAD,
        COL_CLASS,
        COL_BOOSTER_VERSION,
        COL_BOOSTER_CATEGORY,
    ])?;
    for row in rows {
        let payload = format!("{:.1}", row.payload_mass_kg);
        let class = row.class.to_string();
        writer.write_record([
            row.site.as_str(),
            payload.as_str(),
            class.as_str(),
            row.booster_version.as_str(),
            row.booster_category.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, true),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.site.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.payload_mass_kg),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = sample_rows(&mut rng);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    let successes: i64 = rows.iter().map(|r| r.class).sum();
    println!(
        "wrote {} launches ({successes} successes) to spacex_launch_dash.csv / .parquet",
        rows.len()
    );
    Ok(())
}
