use serde::{Deserialize, Serialize};

/// Descriptive statistics over a number sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Summarize a sequence of numbers.
///
/// Returns `None` for empty input; "nothing to summarize" is a valid outcome,
/// not an error. The median of an even-length sequence is the mean of the two
/// middle elements of the sorted input; no further interpolation is done.
///
/// Purely computed: no I/O, no stored state.
pub fn summarize(numbers: &[f64]) -> Option<Summary> {
    if numbers.is_empty() {
        return None;
    }

    let mut sorted = numbers.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    Some(Summary {
        count,
        sum,
        mean: sum / count as f64,
        min: sorted[0],
        max: sorted[count - 1],
        median,
    })
}
