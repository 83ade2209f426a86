use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COLUMNS: [&str; 4] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// Per-species (mean, std dev) of each measurement, roughly matching Iris.
const CENTROIDS: [[(f64, f64); 4]; 3] = [
    [(5.01, 0.35), (3.43, 0.38), (1.46, 0.17), (0.25, 0.11)],
    [(5.94, 0.52), (2.77, 0.31), (4.26, 0.47), (1.33, 0.20)],
    [(6.59, 0.64), (2.97, 0.32), (5.55, 0.55), (2.03, 0.27)],
];

const ROWS_PER_SPECIES: usize = 50;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Column-major sample: four measurement columns plus the category code.
struct Sample {
    measurements: [Vec<f64>; 4],
    target: Vec<i64>,
}

fn generate(rng: &mut SimpleRng) -> Sample {
    let mut measurements: [Vec<f64>; 4] = Default::default();
    let mut target = Vec::new();

    for (code, centroid) in CENTROIDS.iter().enumerate() {
        for _ in 0..ROWS_PER_SPECIES {
            for (column, &(mean, std_dev)) in measurements.iter_mut().zip(centroid) {
                // One decimal place like the real data; never below 0.1 cm.
                let v = (rng.gauss(mean, std_dev) * 10.0).round() / 10.0;
                column.push(v.max(0.1));
            }
            target.push(code as i64);
        }
    }

    Sample {
        measurements,
        target,
    }
}

fn write_csv(path: &Path, sample: &Sample) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.push("target");
    writer.write_record(&header)?;

    for (row, code) in sample.target.iter().enumerate() {
        let mut record: Vec<String> = sample
            .measurements
            .iter()
            .map(|col| format!("{:.1}", col[row]))
            .collect();
        record.push(code.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, sample: &Sample) -> Result<()> {
    let mut fields: Vec<Field> = COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, false))
        .collect();
    fields.push(Field::new("target", DataType::Int64, false));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<arrow::array::ArrayRef> = sample
        .measurements
        .iter()
        .map(|col| Arc::new(Float64Array::from(col.clone())) as arrow::array::ArrayRef)
        .collect();
    arrays.push(Arc::new(Int64Array::from(sample.target.clone())));

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args().nth(1).unwrap_or_else(|| "mydata.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let sample = generate(&mut rng);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(path, &sample)?,
        _ => write_csv(path, &sample)?,
    }

    println!(
        "Wrote {} observations ({} species) to {output}",
        sample.target.len(),
        CENTROIDS.len()
    );
    Ok(())
}
