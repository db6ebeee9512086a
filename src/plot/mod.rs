//! Terminal rendering of chart descriptions.

pub mod ascii;

pub use ascii::*;

use crate::domain::{Chart, QuantityWindow};

/// Axis ranges for drawing one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }
}

/// The quantity window on x; y spans every finite point inside it, padded 5%.
pub fn chart_bounds(chart: &Chart, window: &QuantityWindow) -> Bounds {
    let x_min = window.q_min as f64;
    let x_max = window.q_max as f64;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for series in chart.lines.iter().chain(&chart.scatter) {
        for &(x, y) in &series.points {
            if x >= x_min && x <= x_max && y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
    }

    let (y_min, y_max) = if y_min.is_finite() && y_max.is_finite() && y_max > y_min {
        (y_min, y_max)
    } else if y_min.is_finite() {
        (y_min - 1.0, y_min + 1.0)
    } else {
        (0.0, 1.0)
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    Bounds {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Series;

    #[test]
    fn bounds_ignore_points_outside_window() {
        let chart = Chart {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            lines: vec![Series::new("l", vec![(0.0, 100.0), (2.0, 1.0), (4.0, 3.0)])],
            scatter: Vec::new(),
            verticals: Vec::new(),
        };
        let b = chart_bounds(&chart, &QuantityWindow { q_min: 1, q_max: 4 });
        assert_eq!((b.x_min, b.x_max), (1.0, 4.0));
        assert!((b.y_min - 0.9).abs() < 1e-12);
        assert!((b.y_max - 3.1).abs() < 1e-12);
    }

    #[test]
    fn flat_chart_gets_a_nonzero_span() {
        let chart = Chart {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            lines: vec![Series::new("l", vec![(0.0, 5.0), (1.0, 5.0)])],
            scatter: Vec::new(),
            verticals: Vec::new(),
        };
        let b = chart_bounds(&chart, &QuantityWindow { q_min: 0, q_max: 1 });
        assert!(b.y_min < 5.0 && b.y_max > 5.0);
    }
}
