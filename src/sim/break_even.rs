//! Break-even detection on a sampled grid.
//!
//! A break-even event sits between samples `i` and `i + 1` when the sign of
//! `revenue - cost` differs; we report `Q[i]`, the left edge of that interval, so
//! results are accurate to the grid step.
//!
//! Zero differences: a sample with `revenue == cost` carries the sign of the
//! previous nonzero sample (leading zeros take the first nonzero sign). A curve
//! that crosses through an exact zero therefore produces one event, reported at
//! the zero sample, and a curve that only touches zero produces none.

/// Quantities at which revenue and cost cross, in grid order.
///
/// Slices must be index-aligned; extra trailing elements are ignored.
pub fn find_break_even(quantity: &[f64], revenue: &[f64], cost: &[f64]) -> Vec<f64> {
    let diff: Vec<f64> = revenue.iter().zip(cost).map(|(r, c)| r - c).collect();
    let signs = carried_signs(&diff);

    signs
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .filter_map(|(i, _)| quantity.get(i).copied())
        .collect()
}

/// Sign of each difference with zeros resolved to a neighbouring nonzero sign.
///
/// An all-zero input maps to all zeros (no crossings).
fn carried_signs(diff: &[f64]) -> Vec<i8> {
    let first_nonzero = diff.iter().copied().find_map(sign).unwrap_or(0);

    let mut current = first_nonzero;
    diff.iter()
        .map(|&d| {
            if let Some(s) = sign(d) {
                current = s;
            }
            current
        })
        .collect()
}

fn sign(d: f64) -> Option<i8> {
    if d > 0.0 {
        Some(1)
    } else if d < 0.0 {
        Some(-1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;

    #[test]
    fn single_crossing_at_fifty() {
        let q = linspace(1.0, 2000.0, 2000);
        // Revenue above cost until Q = 50.5, below after.
        let revenue: Vec<f64> = q.iter().map(|&q| 100.0 - (q - 50.5)).collect();
        let cost = vec![100.0; q.len()];
        let found = find_break_even(&q, &revenue, &cost);
        assert_eq!(found.len(), 1);
        assert!((found[0] - 50.0).abs() <= 1.0, "{found:?}");
    }

    #[test]
    fn no_crossing_is_empty() {
        let q = linspace(1.0, 10.0, 10);
        let revenue = vec![5.0; 10];
        let cost = vec![1.0; 10];
        assert!(find_break_even(&q, &revenue, &cost).is_empty());
    }

    #[test]
    fn two_crossings_in_order() {
        let q = linspace(0.0, 10.0, 11);
        // Profit window (3, 7): revenue - cost = -(q-3)(q-7) offset to avoid exact zeros.
        let revenue: Vec<f64> = q.iter().map(|&q| -(q - 3.5) * (q - 7.5)).collect();
        let cost = vec![0.0; q.len()];
        assert_eq!(find_break_even(&q, &revenue, &cost), vec![3.0, 7.0]);
    }

    #[test]
    fn exact_zero_crossing_reports_once_at_zero_sample() {
        let q = [1.0, 2.0, 3.0];
        let revenue = [-1.0, 0.0, 1.0];
        let cost = [0.0; 3];
        assert_eq!(find_break_even(&q, &revenue, &cost), vec![2.0]);
    }

    #[test]
    fn touching_zero_is_not_a_crossing() {
        let q = [1.0, 2.0, 3.0];
        let revenue = [-1.0, 0.0, -1.0];
        let cost = [0.0; 3];
        assert!(find_break_even(&q, &revenue, &cost).is_empty());
    }

    #[test]
    fn leading_zeros_take_first_nonzero_sign() {
        let q = [1.0, 2.0, 3.0, 4.0];
        let revenue = [0.0, 0.0, 1.0, -1.0];
        let cost = [0.0; 4];
        assert_eq!(find_break_even(&q, &revenue, &cost), vec![3.0]);
    }

    #[test]
    fn all_zero_difference_has_no_break_even() {
        let q = [1.0, 2.0, 3.0];
        assert!(find_break_even(&q, &[2.0; 3], &[2.0; 3]).is_empty());
    }
}
