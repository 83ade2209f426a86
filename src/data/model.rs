use std::fmt;

// ---------------------------------------------------------------------------
// Measurement – one of the four numeric feature columns
// ---------------------------------------------------------------------------

/// A flower measurement, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measurement {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Measurement {
    /// Column header as it appears in the dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::SepalLength => "sepal length (cm)",
            Measurement::SepalWidth => "sepal width (cm)",
            Measurement::PetalLength => "petal length (cm)",
            Measurement::PetalWidth => "petal width (cm)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Species – the categorical label
// ---------------------------------------------------------------------------

/// One of the three iris species, encoded in the dataset as `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Decode a category code. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed column set of the observation table
// ---------------------------------------------------------------------------

/// Every column of an [`ObservationTable`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Measurement(Measurement),
    /// Integer category code.
    Target,
    /// Category name decoded from `Target`.
    Species,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Measurement(Measurement::SepalLength),
        Column::Measurement(Measurement::SepalWidth),
        Column::Measurement(Measurement::PetalLength),
        Column::Measurement(Measurement::PetalWidth),
        Column::Target,
        Column::Species,
    ];

    /// Columns that carry numbers (everything except the decoded name).
    pub const NUMERIC: [Column; 5] = [
        Column::Measurement(Measurement::SepalLength),
        Column::Measurement(Measurement::SepalWidth),
        Column::Measurement(Measurement::PetalLength),
        Column::Measurement(Measurement::PetalWidth),
        Column::Target,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Measurement(m) => m.column_name(),
            Column::Target => "target",
            Column::Species => "species",
        }
    }

    /// Pandas-style dtype label used in the info report.
    pub fn dtype(self) -> &'static str {
        match self {
            Column::Measurement(_) => "float64",
            Column::Target => "int64",
            Column::Species => "object",
        }
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the table
// ---------------------------------------------------------------------------

/// A single flower record. Fields are optional so that incomplete rows can
/// be represented (and then dropped) rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub measurements: [Option<f64>; 4],
    pub target: Option<i64>,
}

impl Observation {
    /// A measurement, with NaN treated as missing.
    pub fn value(&self, measurement: Measurement) -> Option<f64> {
        self.measurements[measurement.index()].filter(|v| !v.is_nan())
    }

    /// The decoded category name; always derived from `target`.
    pub fn species(&self) -> Option<Species> {
        self.target.and_then(Species::from_code)
    }

    pub fn is_null(&self, column: Column) -> bool {
        match column {
            Column::Measurement(m) => self.value(m).is_none(),
            Column::Target => self.target.is_none(),
            Column::Species => self.species().is_none(),
        }
    }

    pub fn is_complete(&self) -> bool {
        Column::ALL.iter().all(|&c| !self.is_null(c))
    }

    /// Numeric value of a column, if any.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Measurement(m) => self.value(m),
            Column::Target => self.target.map(|t| t as f64),
            Column::Species => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The in-memory dataset: an ordered sequence of observations with a fixed
/// column set. Each row keeps the label it was loaded with, so labels have
/// gaps once incomplete rows are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    labels: Vec<usize>,
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Rows are labelled `0..rows.len()`.
    pub fn new(rows: Vec<Observation>) -> Self {
        ObservationTable {
            labels: (0..rows.len()).collect(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows with their labels (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> impl Iterator<Item = (usize, &Observation)> + '_ {
        self.labels.iter().copied().zip(&self.rows).take(n)
    }

    /// Non-null values of a measurement paired with their row label.
    pub fn indexed_values(&self, measurement: Measurement) -> Vec<(usize, f64)> {
        self.labels
            .iter()
            .zip(&self.rows)
            .filter_map(|(&label, row)| row.value(measurement).map(|v| (label, v)))
            .collect()
    }

    /// Non-null values of a measurement in row order.
    pub fn values(&self, measurement: Measurement) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.value(measurement)).collect()
    }

    /// Count of null cells per column, in column order.
    pub fn null_counts(&self) -> Vec<(Column, usize)> {
        Column::ALL
            .iter()
            .map(|&col| (col, self.rows.iter().filter(|r| r.is_null(col)).count()))
            .collect()
    }

    /// Copy of the table without rows that have any null field. Surviving
    /// rows keep their labels.
    pub fn drop_nulls(&self) -> Self {
        let (labels, rows): (Vec<usize>, Vec<Observation>) = self
            .labels
            .iter()
            .zip(&self.rows)
            .filter(|(_, r)| r.is_complete())
            .map(|(&label, r)| (label, r.clone()))
            .unzip();
        let dropped = self.rows.len() - rows.len();
        if dropped > 0 {
            log::info!("Dropped {dropped} incomplete rows");
        }
        ObservationTable { labels, rows }
    }
}

// ---------------------------------------------------------------------------
// CellValue / Frame – generic tables read from user-supplied files
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

/// A schema-less table: column names plus rows of cells, each row holding
/// exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cells of one row rendered as text, for previews.
    pub fn row_text(&self, row: usize) -> Option<Vec<String>> {
        self.rows
            .get(row)
            .map(|cells| cells.iter().map(|c| c.to_string()).collect())
    }
}
