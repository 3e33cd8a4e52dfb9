use ncollide2d::na::RealField;

/// Returns the index `i` of the last element in a sorted slice for which `slice[i] <= test_value`,
/// clamped to 0 when the value precedes the whole slice. Used to find the bracketing interval of
/// a query before linear interpolation.
pub fn preceding_index_search<N: RealField + Copy>(slice: &[N], test_value: N) -> usize {
    if slice.len() <= 1 || slice[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = slice.len() - 1;
    if slice[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= slice[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}

/// Linear interpolation between two samples. Returns `y0` when the interval is degenerate.
pub fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    let span = x1 - x0;
    if span.abs() <= f64::EPSILON {
        y0
    } else {
        y0 + (y1 - y0) * (x - x0) / span
    }
}

/// `n` equally spaced values from `start` to `end`, both included. The last value is exactly
/// `end` so that joined chains close without round-off gaps.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
