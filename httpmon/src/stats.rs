use httpmon_common::{HttpMonError, Result};

/// Five-number summary of a sample set, in the unit of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    /// All five values converted from seconds to whole milliseconds (truncated).
    pub fn to_millis(&self) -> [u64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max].map(|s| (s * 1000.0) as u64)
    }
}

/// Sort `samples` ascending and return min, q1, median, q3 and max.
///
/// The median of a range of length m is the element at (m-1)/2 when m is odd,
/// or the mean of the two middle elements otherwise. q1 is the median of the
/// first n/2 elements and q3 the median of the elements from n/2 to the end,
/// so for odd n the middle element belongs to the upper half only.
pub fn quartiles(samples: &mut [f64]) -> Result<Quartiles> {
    let n = samples.len();
    if n == 0 {
        return Err(HttpMonError::NoData);
    }
    samples.sort_unstable_by(|a, b| a.total_cmp(b));

    Ok(Quartiles {
        min: samples[0],
        q1: median_of(&samples[..n / 2]).unwrap_or(samples[0]),
        median: median_of(samples).unwrap_or(samples[0]),
        q3: median_of(&samples[n / 2..]).unwrap_or(samples[n - 1]),
        max: samples[n - 1],
    })
}

/// Median of an already sorted slice; `None` when empty.
fn median_of(sorted: &[f64]) -> Option<f64> {
    let m = sorted.len();
    if m == 0 {
        return None;
    }
    let mid = (m - 1) / 2;
    if (m - 1) % 2 == 0 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid] + sorted[mid + 1]) / 2.0)
    }
}
