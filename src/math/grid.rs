//! Evenly spaced quantity grids.

/// `n` evenly spaced values over the closed interval `[start, end]`.
///
/// Values are computed as `start + i * step` with the last value pinned to `end`,
/// so integer-spaced ranges (e.g. `[1, 2000]` with 2000 points) are exact.
/// `n == 1` yields `[start]`; `n == 0` yields an empty grid.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_grid_is_integer_spaced() {
        let q = linspace(1.0, 2000.0, 2000);
        assert_eq!(q.len(), 2000);
        assert_eq!(q[0], 1.0);
        assert_eq!(q[49], 50.0);
        assert_eq!(q[1999], 2000.0);
    }

    #[test]
    fn display_grid_endpoints() {
        let q = linspace(0.0, 10.0, 400);
        assert_eq!(q[0], 0.0);
        assert_eq!(q[399], 10.0);
        assert!(q.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn degenerate_sizes() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }
}
