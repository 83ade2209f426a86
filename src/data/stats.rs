use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{Column, Measurement, ObservationTable, Species};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("empty dataset: no observations to aggregate")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean of one measurement per species, ordered by species name.
///
/// Never empty: construction fails with [`AnalysisError::EmptyDataset`]
/// when there is nothing to group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMeans {
    pub measurement: Measurement,
    groups: Vec<(Species, f64)>,
}

impl GroupedMeans {
    /// Build from precomputed means. Groups are re-sorted by name and groups
    /// with a NaN mean are left out.
    pub fn from_groups(
        measurement: Measurement,
        mut groups: Vec<(Species, f64)>,
    ) -> Result<Self, AnalysisError> {
        groups.retain(|(_, mean)| !mean.is_nan());
        if groups.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        groups.sort_by(|a, b| a.0.name().cmp(b.0.name()));
        Ok(GroupedMeans {
            measurement,
            groups,
        })
    }

    pub fn groups(&self) -> &[(Species, f64)] {
        &self.groups
    }

    /// The species with the largest mean. Ties go to the first group in
    /// name order.
    pub fn max_category(&self) -> (Species, f64) {
        let (mut best, mut best_mean) = self.groups[0];
        for &(species, mean) in &self.groups[1..] {
            if mean > best_mean {
                best = species;
                best_mean = mean;
            }
        }
        (best, best_mean)
    }
}

/// Arithmetic mean of `measurement` for each species.
///
/// Rows with a null value or null category are skipped, as are species with
/// no values at all.
pub fn grouped_mean(
    table: &ObservationTable,
    measurement: Measurement,
) -> Result<GroupedMeans, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let mut sums: BTreeMap<Species, (f64, usize)> = BTreeMap::new();
    for row in table.rows() {
        let (Some(species), Some(value)) = (row.species(), row.value(measurement)) else {
            continue;
        };
        let entry = sums.entry(species).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let groups = sums
        .into_iter()
        .map(|(species, (sum, count))| (species, sum / count as f64))
        .collect();
    let means = GroupedMeans::from_groups(measurement, groups)?;
    log::debug!(
        "Grouped {} means: {:?}",
        measurement.column_name(),
        means.groups()
    );
    Ok(means)
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics from describe()
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarise a sample. `std` uses n-1 and is NaN for a single value.
pub fn describe_values(values: &[f64]) -> Result<DescribeStats, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(DescribeStats {
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    })
}

/// Linear interpolation between closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// [`describe_values`] for every numeric column of the table.
pub fn describe(table: &ObservationTable) -> Result<Vec<(Column, DescribeStats)>, AnalysisError> {
    Column::NUMERIC
        .iter()
        .map(|&col| {
            let values: Vec<f64> = table.rows().iter().filter_map(|r| r.numeric(col)).collect();
            describe_values(&values).map(|stats| (col, stats))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_bundled, parse_observations};
    use crate::data::model::Observation;

    fn mean_of(means: &GroupedMeans, species: Species) -> f64 {
        means
            .groups()
            .iter()
            .find(|(s, _)| *s == species)
            .map(|&(_, m)| m)
            .unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn bundled_petal_length_means() {
        let table = load_bundled().unwrap();
        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();

        let names: Vec<&str> = means.groups().iter().map(|(s, _)| s.name()).collect();
        assert_eq!(names, vec!["setosa", "versicolor", "virginica"]);
        assert_close(mean_of(&means, Species::Setosa), 1.462);
        assert_close(mean_of(&means, Species::Versicolor), 4.26);
        assert_close(mean_of(&means, Species::Virginica), 5.552);
        assert_eq!(means.max_category().0, Species::Virginica);
    }

    #[test]
    fn empty_table_is_an_explicit_error() {
        let table = ObservationTable::default();
        assert_eq!(
            grouped_mean(&table, Measurement::PetalLength),
            Err(AnalysisError::EmptyDataset)
        );
        assert_eq!(describe(&table), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn all_null_values_is_empty() {
        let table = ObservationTable::new(vec![Observation {
            measurements: [Some(5.0), None, None, None],
            target: Some(1),
        }]);
        assert_eq!(
            grouped_mean(&table, Measurement::PetalLength),
            Err(AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn tie_goes_to_first_name() {
        let means = GroupedMeans::from_groups(
            Measurement::PetalLength,
            vec![(Species::Virginica, 2.0), (Species::Versicolor, 2.0), (Species::Setosa, 1.0)],
        )
        .unwrap();
        assert_eq!(means.max_category(), (Species::Versicolor, 2.0));
    }

    #[test]
    fn nan_means_are_skipped() {
        let means = GroupedMeans::from_groups(
            Measurement::PetalLength,
            vec![(Species::Setosa, f64::NAN), (Species::Virginica, 6.0)],
        )
        .unwrap();
        assert_eq!(means.groups().len(), 1);
        assert_eq!(means.max_category(), (Species::Virginica, 6.0));

        assert_eq!(
            GroupedMeans::from_groups(Measurement::PetalLength, vec![(Species::Setosa, f64::NAN)]),
            Err(AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn nan_cell_is_dropped_before_grouping() {
        let csv = "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target\n\
                   5.1,3.5,NaN,0.2,0\n\
                   6.3,3.3,6.0,2.5,2\n";
        let table = parse_observations(csv.as_bytes()).unwrap().drop_nulls();
        assert_eq!(table.len(), 1);

        let means = grouped_mean(&table, Measurement::PetalLength).unwrap();
        assert_eq!(means.groups(), &[(Species::Virginica, 6.0)]);
        assert_eq!(means.max_category().0, Species::Virginica);
    }

    #[test]
    fn describe_matches_pandas_quantiles() {
        let stats = describe_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_close(stats.mean, 2.5);
        assert_close(stats.std, (5.0f64 / 3.0).sqrt());
        assert_close(stats.q25, 1.75);
        assert_close(stats.q50, 2.5);
        assert_close(stats.q75, 3.25);
        assert_eq!((stats.min, stats.max), (1.0, 4.0));

        assert!(describe_values(&[1.0]).unwrap().std.is_nan());
    }

    #[test]
    fn describe_bundled_sepal_length() {
        let table = load_bundled().unwrap();
        let summary = describe(&table).unwrap();
        assert_eq!(summary.len(), 5);

        let (col, sepal) = &summary[0];
        assert_eq!(col.name(), "sepal length (cm)");
        assert_eq!(sepal.count, 150);
        assert!((sepal.mean - 5.843333).abs() < 1e-6);
        assert!((sepal.std - 0.828066).abs() < 1e-6);
        assert_eq!((sepal.min, sepal.q50, sepal.max), (4.3, 5.8, 7.9));
    }
}
