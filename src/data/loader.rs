use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Frame, Observation, ObservationTable, Species};

/// The Iris dataset shipped with the binary.
const BUNDLED_IRIS: &str = include_str!("../../assets/iris.csv");

// ---------------------------------------------------------------------------
// Bundled dataset
// ---------------------------------------------------------------------------

/// Cell spellings read as missing, matching `pandas.read_csv` defaults.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

#[derive(Debug, Deserialize)]
struct IrisRecord {
    #[serde(rename = "sepal length (cm)", deserialize_with = "na_float")]
    sepal_length: Option<f64>,
    #[serde(rename = "sepal width (cm)", deserialize_with = "na_float")]
    sepal_width: Option<f64>,
    #[serde(rename = "petal length (cm)", deserialize_with = "na_float")]
    petal_length: Option<f64>,
    #[serde(rename = "petal width (cm)", deserialize_with = "na_float")]
    petal_width: Option<f64>,
    #[serde(deserialize_with = "na_int")]
    target: Option<i64>,
}

/// Float cell where NA tokens and non-finite values are missing.
fn na_float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw = String::deserialize(d)?;
    if is_na(raw.trim()) {
        return Ok(None);
    }
    let v: f64 = raw.trim().parse().map_err(de::Error::custom)?;
    Ok(v.is_finite().then_some(v))
}

/// Integer cell where NA tokens are missing.
fn na_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let raw = String::deserialize(d)?;
    if is_na(raw.trim()) {
        return Ok(None);
    }
    raw.trim().parse().map(Some).map_err(de::Error::custom)
}

/// Load the bundled Iris table.
pub fn load_bundled() -> Result<ObservationTable> {
    let table = parse_observations(BUNDLED_IRIS.as_bytes())?;
    log::info!("Loaded {} observations from bundled dataset", table.len());
    Ok(table)
}

/// Parse observations from CSV text with the Iris header.
///
/// Empty cells, NA tokens and non-finite numbers become nulls; a category
/// code outside the known species is rejected.
pub fn parse_observations<R: Read>(input: R) -> Result<ObservationTable> {
    let mut reader = csv::Reader::from_reader(input);
    let mut rows = Vec::new();

    for (row_no, result) in reader.deserialize::<IrisRecord>().enumerate() {
        let rec = result.with_context(|| format!("dataset row {row_no}"))?;

        if let Some(code) = rec.target {
            if Species::from_code(code).is_none() {
                bail!("Row {row_no}: unknown category code {code}");
            }
        }

        rows.push(Observation {
            measurements: [
                rec.sepal_length,
                rec.sepal_width,
                rec.petal_length,
                rec.petal_width,
            ],
            target: rec.target,
        });
    }

    Ok(ObservationTable::new(rows))
}

// ---------------------------------------------------------------------------
// User-supplied files
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("No columns to parse from file")]
    Empty,
    #[error("{0}")]
    Malformed(String),
}

/// Load a generic table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – scalar columns
/// * `.json`            – `[{ "col": value, ... }, ...]`
/// * anything else      – CSV with a header row
pub fn load_file(path: &Path) -> Result<Frame, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let frame = match ext.as_str() {
        "parquet" | "pq" => load_parquet(file)?,
        "json" => load_json(file)?,
        _ => load_csv(file)?,
    };
    log::debug!(
        "Read {} rows with columns {:?} from {}",
        frame.len(),
        frame.columns,
        path.display()
    );
    Ok(frame)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Short records are padded with nulls; records with more fields than the
/// header are an error.
fn load_csv(file: File) -> Result<Frame, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    if columns.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(LoadError::Malformed(format!(
                "Error tokenizing data. Expected {} fields in line {line}, saw {}",
                columns.len(),
                record.len()
            )));
        }
        let mut row: Vec<CellValue> = record.iter().map(guess_cell_type).collect();
        row.resize(columns.len(), CellValue::Null);
        rows.push(row);
    }

    Ok(Frame { columns, rows })
}

fn guess_cell_type(s: &str) -> CellValue {
    if is_na(s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    match s {
        "True" | "TRUE" | "true" => CellValue::Bool(true),
        "False" | "FALSE" | "false" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "sepal length (cm)": 5.1, "target": 0 },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys are null.
fn load_json(file: File) -> Result<Frame, LoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(file))?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    if columns.is_empty() {
        return Err(LoadError::Empty);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Frame { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(file: File) -> Result<Frame, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    if columns.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let arrays: Vec<&ArrayRef> = batch.columns().iter().collect();
        for row in 0..batch.num_rows() {
            rows.push(arrays.iter().map(|col| extract_cell(col, row)).collect());
        }
    }

    Ok(Frame { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::String(format!("{:?}", col.data_type())))
}
