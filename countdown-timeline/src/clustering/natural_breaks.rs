//! Natural-breaks partitioning of one-dimensional values
//!
//! The clustering pipeline only depends on the [`NaturalBreaks`] contract:
//! sorted values in, `k` class representatives out. [`JenksBreaks`] is the
//! bundled Fisher-Jenks implementation.

/// Partitions sorted values into `k` classes with minimal within-class variance
/// and returns one representative value per class, in ascending order.
pub trait NaturalBreaks {
    fn partition(&self, sorted_values: &[f64], k: usize) -> Vec<f64>;
}

impl<F> NaturalBreaks for F
where
    F: Fn(&[f64], usize) -> Vec<f64>,
{
    fn partition(&self, sorted_values: &[f64], k: usize) -> Vec<f64> {
        self(sorted_values, k)
    }
}

/// Exact Fisher-Jenks optimal partition, returning class means.
///
/// `k` is clamped to the number of values. Runs in O(k·n²), which is fine for
/// the handful of events visible at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct JenksBreaks;

impl NaturalBreaks for JenksBreaks {
    fn partition(&self, sorted_values: &[f64], k: usize) -> Vec<f64> {
        optimal_classes(sorted_values, k)
            .into_iter()
            .map(|class| {
                let members = &sorted_values[class];
                members.iter().sum::<f64>() / members.len() as f64
            })
            .collect()
    }
}

/// Index ranges of the optimal `k`-class partition of `values`.
fn optimal_classes(values: &[f64], k: usize) -> Vec<std::ops::Range<usize>> {
    let n = values.len();
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }

    // Prefix sums for O(1) sum of squared deviations over any slice. Values
    // are shifted to the first one to keep epoch-sized squares precise.
    let origin = values[0];
    let mut sums = vec![0.0; n + 1];
    let mut squares = vec![0.0; n + 1];
    for (i, value) in values.iter().map(|v| v - origin).enumerate() {
        sums[i + 1] = sums[i] + value;
        squares[i + 1] = squares[i] + value * value;
    }
    let deviation = |from: usize, to: usize| -> f64 {
        let count = (to - from) as f64;
        let sum = sums[to] - sums[from];
        (squares[to] - squares[from] - sum * sum / count).max(0.0)
    };

    // cost[c][j]: best cost of splitting values[..j] into c classes.
    let mut cost = vec![vec![f64::INFINITY; n + 1]; k + 1];
    let mut split = vec![vec![0usize; n + 1]; k + 1];
    cost[0][0] = 0.0;

    for classes in 1..=k {
        for end in classes..=n {
            for start in (classes - 1)..end {
                let previous = cost[classes - 1][start];
                if !previous.is_finite() {
                    continue;
                }
                let candidate = previous + deviation(start, end);
                if candidate < cost[classes][end] {
                    cost[classes][end] = candidate;
                    split[classes][end] = start;
                }
            }
        }
    }

    let mut ranges = Vec::with_capacity(k);
    let mut end = n;
    for classes in (1..=k).rev() {
        let start = split[classes][end];
        ranges.push(start..end);
        end = start;
    }
    ranges.reverse();
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_obvious_groups() {
        let values = [1.0, 2.0, 3.0, 100.0, 101.0, 102.0, 500.0];
        let centroids = JenksBreaks.partition(&values, 3);
        assert_eq!(centroids, vec![2.0, 101.0, 500.0]);
    }

    #[test]
    fn clamps_class_count_to_value_count() {
        let centroids = JenksBreaks.partition(&[5.0, 9.0], 10);
        assert_eq!(centroids, vec![5.0, 9.0]);
    }

    #[test]
    fn empty_input_has_no_classes() {
        assert!(JenksBreaks.partition(&[], 4).is_empty());
        assert!(JenksBreaks.partition(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn single_class_is_the_mean() {
        assert_eq!(JenksBreaks.partition(&[2.0, 4.0, 9.0], 1), vec![5.0]);
    }

    #[test]
    fn classes_cover_every_value_once() {
        let values: Vec<f64> = (0..40).map(|i| (i * i) as f64).collect();
        let ranges = optimal_classes(&values, 6);
        assert_eq!(ranges.len(), 6);
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, values.len());
        assert!(ranges.windows(2).all(|w| w[0].end == w[1].start && !w[1].is_empty()));
    }

    #[test]
    fn closures_satisfy_the_contract() {
        let fixed = |_: &[f64], k: usize| vec![0.0; k];
        assert_eq!(fixed.partition(&[1.0], 3), vec![0.0, 0.0, 0.0]);
    }
}
