use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DatasetError, LaunchRecord, LaunchTable, Outcome};

/// Dataset file name the binaries read from the working directory.
pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

// Column names as they appear in the source file's header.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row + one record per line (the original dataset)
/// * `.json`    – records-oriented array: `[{ "Launch Site": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns with the same names
///
/// Any missing required column, unparsable cell, or empty dataset is a hard
/// error: the dashboard cannot start without its table.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming at least `Launch Site`, `Payload Mass (kg)`
/// and `class`. `Booster Version Category` / `Booster Version` are picked up
/// when present; an empty cell in either counts as absent.
fn load_csv(path: &Path) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let required = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name).into())
    };
    let site_idx = required(COL_SITE)?;
    let payload_idx = required(COL_PAYLOAD)?;
    let class_idx = required(COL_CLASS)?;
    let category_idx = headers.iter().position(|h| h == COL_BOOSTER_CATEGORY);
    let version_idx = headers.iter().position(|h| h == COL_BOOSTER_VERSION);

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row}"))?;

        let site = record.get(site_idx).unwrap_or("").trim().to_string();
        let payload_mass_kg = record
            .get(payload_idx)
            .unwrap_or("")
            .trim()
            .parse::<f64>()
            .with_context(|| format!("row {row}: '{COL_PAYLOAD}' is not a number"))?;
        let class = record
            .get(class_idx)
            .unwrap_or("")
            .trim()
            .parse::<i64>()
            .with_context(|| format!("row {row}: '{COL_CLASS}' is not an integer"))?;

        records.push(LaunchRecord {
            site,
            payload_mass_kg,
            outcome: Outcome::from_class(class, row)?,
            booster_category: category_idx.and_then(|i| non_empty(record.get(i))),
            booster_version: version_idx.and_then(|i| non_empty(record.get(i))),
        });
    }

    Ok(LaunchTable::from_records(records)?)
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    let s = cell.unwrap_or("").trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2490.0,
///     "class": 0,
///     "Booster Version Category": "v1.0",
///     "Booster Version": "F9 v1.0  B0005"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .with_context(|| format!("row {row} is not a JSON object"))?;

        let site = obj
            .get(COL_SITE)
            .and_then(|v| v.as_str())
            .ok_or(DatasetError::MissingColumn(COL_SITE))
            .with_context(|| format!("row {row}"))?
            .to_string();
        let payload_mass_kg = obj
            .get(COL_PAYLOAD)
            .and_then(|v| v.as_f64())
            .ok_or(DatasetError::MissingColumn(COL_PAYLOAD))
            .with_context(|| format!("row {row}"))?;
        let class = obj
            .get(COL_CLASS)
            .and_then(|v| v.as_i64())
            .ok_or(DatasetError::MissingColumn(COL_CLASS))
            .with_context(|| format!("row {row}"))?;

        records.push(LaunchRecord {
            site,
            payload_mass_kg,
            outcome: Outcome::from_class(class, row)?,
            booster_category: json_opt_string(obj.get(COL_BOOSTER_CATEGORY)),
            booster_version: json_opt_string(obj.get(COL_BOOSTER_VERSION)),
        });
    }

    Ok(LaunchTable::from_records(records)?)
}

fn json_opt_string(value: Option<&JsonValue>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat scalar column per dataset column.
/// Works with files written by Pandas (`df.to_parquet()`), Polars
/// (`df.write_parquet()`) and our own `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let site_idx = schema
            .index_of(COL_SITE)
            .map_err(|_| DatasetError::MissingColumn(COL_SITE))?;
        let payload_idx = schema
            .index_of(COL_PAYLOAD)
            .map_err(|_| DatasetError::MissingColumn(COL_PAYLOAD))?;
        let class_idx = schema
            .index_of(COL_CLASS)
            .map_err(|_| DatasetError::MissingColumn(COL_CLASS))?;
        let category_idx = schema.index_of(COL_BOOSTER_CATEGORY).ok();
        let version_idx = schema.index_of(COL_BOOSTER_VERSION).ok();

        let site_col = batch.column(site_idx);
        let payload_col = batch.column(payload_idx);
        let class_col = batch.column(class_idx);

        for i in 0..batch.num_rows() {
            let site = scalar_string(site_col, i)
                .with_context(|| format!("row {row}: reading '{COL_SITE}'"))?;
            let payload_mass_kg = scalar_f64(payload_col, i)
                .with_context(|| format!("row {row}: reading '{COL_PAYLOAD}'"))?;
            let class = scalar_i64(class_col, i)
                .with_context(|| format!("row {row}: reading '{COL_CLASS}'"))?;

            records.push(LaunchRecord {
                site,
                payload_mass_kg,
                outcome: Outcome::from_class(class, row)?,
                booster_category: category_idx
                    .and_then(|idx| scalar_opt_string(batch.column(idx), i)),
                booster_version: version_idx
                    .and_then(|idx| scalar_opt_string(batch.column(idx), i)),
            });
            row += 1;
        }
    }

    Ok(LaunchTable::from_records(records)?)
}

// -- Arrow scalar helpers --

fn scalar_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in required string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn scalar_opt_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    scalar_string(col, row).ok().filter(|s| !s.is_empty())
}

fn scalar_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in required numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn scalar_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in required integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            Ok(arr.value(row) as i64)
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn csv_with_booster_columns_loads() {
        let (_dir, path) = write_temp(
            "launches.csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,CCAFS LC-40,1,525.0,F9 v1.0  B0004,v1.0\n\
             3,KSC LC-39A,1,2490.0,F9 FT B1021.2,FT\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.payload_bounds(), (0.0, 2490.0));
        assert_eq!(table.records[2].site, "KSC LC-39A");
        assert_eq!(table.records[2].booster_category.as_deref(), Some("FT"));
        assert_eq!(
            table.records[0].booster_version.as_deref(),
            Some("F9 v1.0  B0003")
        );
        assert!(table.records[1].outcome.is_success());
    }

    #[test]
    fn csv_without_booster_columns_degrades_to_none() {
        let (_dir, path) = write_temp(
            "bare.csv",
            "Launch Site,Payload Mass (kg),class\nVAFB SLC-4E,500.0,1\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.records[0].booster_category, None);
        assert_eq!(table.records[0].booster_version, None);
        assert!(table.booster_categories.is_empty());
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let (_dir, path) = write_temp(
            "broken.csv",
            "Launch Site,Payload Mass (kg)\nCCAFS LC-40,100.0\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("class"), "unexpected error: {err:#}");
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_file(Path::new("/nonexistent/launches.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn json_records_load() {
        let (_dir, path) = write_temp(
            "launches.json",
            r#"[
              {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 2490.0, "class": 0,
               "Booster Version Category": "v1.0", "Booster Version": "F9 v1.0  B0005"},
              {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300.0, "class": 1,
               "Booster Version Category": null, "Booster Version": null}
            ]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].booster_category.as_deref(), Some("v1.0"));
        assert_eq!(table.records[1].booster_category, None);
        assert_eq!(table.payload_bounds(), (2490.0, 5300.0));
    }
}
