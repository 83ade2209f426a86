//! Console reports.  Each function renders a block of text; the caller
//! decides where to print it.

use std::fmt::Write;

use crate::data::model::{Column, Observation, ObservationTable};
use crate::data::stats::{DescribeStats, GroupedMeans};

/// Rows shown by the preview.
pub const HEAD_ROWS: usize = 5;

fn cell_text(row: &Observation, col: Column) -> String {
    match col {
        Column::Measurement(m) => row
            .value(m)
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "NaN".to_string()),
        Column::Target => row
            .target
            .map(|t| t.to_string())
            .unwrap_or_else(|| "NaN".to_string()),
        Column::Species => row
            .species()
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| "NaN".to_string()),
    }
}

/// Right-aligned preview of the first `n` rows with their row labels.
pub fn head(table: &ObservationTable, n: usize) -> String {
    let (labels, cells): (Vec<usize>, Vec<Vec<String>>) = table
        .head(n)
        .map(|(label, row)| {
            let cells: Vec<String> = Column::ALL.iter().map(|&c| cell_text(row, c)).collect();
            (label, cells)
        })
        .unzip();

    let index_width = labels
        .iter()
        .map(|l| l.to_string().len())
        .max()
        .unwrap_or(1);
    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(j, col)| {
            cells
                .iter()
                .map(|r| r[j].len())
                .fold(col.name().len(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (col, &w) in Column::ALL.iter().zip(&widths) {
        let _ = write!(out, "  {:>w$}", col.name());
    }
    for (label, row) in labels.iter().zip(&cells) {
        let _ = write!(out, "\n{label:<index_width$}");
        for (cell, &w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
    }
    out
}

/// Schema summary: index range, then per column its non-null count and dtype.
pub fn info(table: &ObservationTable) -> String {
    let n = table.len();
    let mut out = String::new();
    if n == 0 {
        let _ = writeln!(out, "RangeIndex: 0 entries");
    } else {
        let _ = writeln!(out, "RangeIndex: {n} entries, 0 to {}", n - 1);
    }
    let _ = writeln!(out, "Data columns (total {} columns):", Column::ALL.len());

    let name_width = Column::ALL
        .iter()
        .map(|c| c.name().len())
        .fold("Column".len(), usize::max);
    let _ = writeln!(
        out,
        " #   {:<name_width$}  Non-Null Count  Dtype",
        "Column"
    );
    let _ = write!(
        out,
        "---  {:<name_width$}  --------------  -----",
        "------"
    );

    for (i, (col, nulls)) in table.null_counts().into_iter().enumerate() {
        let non_null = format!("{} non-null", n - nulls);
        let _ = write!(
            out,
            "\n {i:<3} {:<name_width$}  {non_null:<14}  {}",
            col.name(),
            col.dtype()
        );
    }
    out
}

/// Null count per column.
pub fn missing_values(table: &ObservationTable) -> String {
    let counts = table.null_counts();
    let name_width = counts.iter().map(|(c, _)| c.name().len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(col, n)| format!("{:<name_width$}    {n}", col.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// describe() table: statistics as rows, numeric columns as columns.
pub fn summary_statistics(summary: &[(Column, DescribeStats)]) -> String {
    let rows: [(&str, fn(&DescribeStats) -> f64); 8] = [
        ("count", |s: &DescribeStats| s.count as f64),
        ("mean", |s: &DescribeStats| s.mean),
        ("std", |s: &DescribeStats| s.std),
        ("min", |s: &DescribeStats| s.min),
        ("25%", |s: &DescribeStats| s.q25),
        ("50%", |s: &DescribeStats| s.q50),
        ("75%", |s: &DescribeStats| s.q75),
        ("max", |s: &DescribeStats| s.max),
    ];
    let widths: Vec<usize> = summary
        .iter()
        .map(|(col, _)| col.name().len().max(10))
        .collect();

    let mut out = format!("{:5}", "");
    for ((col, _), &w) in summary.iter().zip(&widths) {
        let _ = write!(out, "  {:>w$}", col.name());
    }
    for (label, stat) in rows {
        let _ = write!(out, "\n{label:<5}");
        for ((_, stats), &w) in summary.iter().zip(&widths) {
            let _ = write!(out, "  {:>w$.6}", stat(stats));
        }
    }
    out
}

/// Grouped means as a labelled series.
pub fn grouped_means(means: &GroupedMeans) -> String {
    let name_width = means
        .groups()
        .iter()
        .map(|(s, _)| s.name().len())
        .fold("species".len(), usize::max);

    let mut out = String::from("species");
    for (species, mean) in means.groups() {
        let _ = write!(out, "\n{:<name_width$}    {mean:.3}", species.name());
    }
    let _ = write!(
        out,
        "\nName: {}, dtype: float64",
        means.measurement.column_name()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::data::model::Measurement;
    use crate::data::stats::{describe, grouped_mean};

    #[test]
    fn head_shows_five_rows_and_header() {
        let table = load_bundled().unwrap();
        let text = head(&table, HEAD_ROWS);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("sepal length (cm)"));
        assert!(lines[0].ends_with("species"));
        assert!(lines[1].starts_with('0'));
        assert!(lines[1].ends_with("setosa"));
        assert!(lines[1].contains("5.1"));
    }

    #[test]
    fn info_lists_every_column() {
        let table = load_bundled().unwrap();
        let text = info(&table);

        assert!(text.starts_with("RangeIndex: 150 entries, 0 to 149"));
        assert!(text.contains("total 6 columns"));
        assert_eq!(text.matches("150 non-null").count(), 6);
        assert!(text.contains("int64"));
        assert!(text.contains("object"));
    }

    #[test]
    fn missing_values_are_zero_for_bundled_data() {
        let table = load_bundled().unwrap();
        let text = missing_values(&table);
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().all(|l| l.ends_with(" 0")));
    }

    #[test]
    fn summary_has_eight_statistics() {
        let table = load_bundled().unwrap();
        let text = summary_statistics(&describe(&table).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("count"));
        assert!(lines[1].contains("150.000000"));
        assert!(lines[8].starts_with("max"));
    }

    #[test]
    fn grouped_means_text() {
        let table = load_bundled().unwrap();
        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();
        let text = grouped_means(&means);

        assert!(text.contains("virginica     5.552"));
        assert!(text.ends_with("Name: petal length (cm), dtype: float64"));
    }

    #[test]
    fn head_uses_row_labels_after_drop() {
        let table = ObservationTable::new(vec![
            Observation {
                measurements: [Some(5.1), None, Some(1.4), Some(0.2)],
                target: Some(0),
            },
            Observation {
                measurements: [Some(6.3), Some(3.3), Some(6.0), Some(2.5)],
                target: Some(2),
            },
        ])
        .drop_nulls();

        let text = head(&table, HEAD_ROWS);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with('1'));
        assert!(lines[1].ends_with("virginica"));
    }

    #[test]
    fn empty_table_reports() {
        let table = ObservationTable::default();
        assert_eq!(head(&table, HEAD_ROWS).lines().count(), 1);
        assert!(info(&table).starts_with("RangeIndex: 0 entries"));
    }
}
