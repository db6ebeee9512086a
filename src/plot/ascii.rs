//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - fitted/simulated curves: `-`, `=`, `~`, `+` (one per series)
//! - break-even verticals: `|`
//! - observed points and markers: `o`

use super::{Bounds, chart_bounds};
use crate::domain::{Chart, ChartSet, QuantityWindow};

const LINE_CHARS: [char; 4] = ['-', '=', '~', '+'];
const SCATTER_CHAR: char = 'o';
const VERTICAL_CHAR: char = '|';

/// Render every chart of a run, separated by blank lines.
pub fn render_charts(charts: &ChartSet, window: &QuantityWindow, width: usize, height: usize) -> String {
    charts
        .iter()
        .map(|chart| render_chart(chart, window, width, height))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one chart clipped to the quantity window.
pub fn render_chart(chart: &Chart, window: &QuantityWindow, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let bounds = chart_bounds(chart, window);

    let mut grid = vec![vec![' '; width]; height];

    // Curves first; later layers only fill blanks except scatter, which overlays.
    for (i, series) in chart.lines.iter().enumerate() {
        draw_curve(&mut grid, &series.points, &bounds, LINE_CHARS[i % LINE_CHARS.len()]);
    }

    for &x in &chart.verticals {
        if !bounds.contains_x(x) {
            continue;
        }
        let col = map_x(x, &bounds, width);
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = VERTICAL_CHAR;
            }
        }
    }

    for series in &chart.scatter {
        for &(x, y) in &series.points {
            if bounds.contains_x(x) && y.is_finite() {
                grid[map_y(y, &bounds, height)][map_x(x, &bounds, width)] = SCATTER_CHAR;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}: {}=[{:.1}, {:.1}] | {}=[{:.2}, {:.2}]\n",
        chart.title, chart.x_label, bounds.x_min, bounds.x_max, chart.y_label, bounds.y_min, bounds.y_max
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (i, series) in chart.lines.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", LINE_CHARS[i % LINE_CHARS.len()], series.label));
    }
    for series in &chart.scatter {
        out.push_str(&format!("  {SCATTER_CHAR} {}\n", series.label));
    }
    if !chart.verticals.is_empty() {
        let at: Vec<String> = chart.verticals.iter().map(|x| format!("{x:.2}")).collect();
        out.push_str(&format!("  {VERTICAL_CHAR} Break-even Q={}\n", at.join(", ")));
    }

    out
}

fn map_x(x: f64, b: &Bounds, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - b.x_min) / (b.x_max - b.x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, b: &Bounds, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - b.y_min) / (b.y_max - b.y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Polyline through the points inside the window; leaving the window breaks it.
fn draw_curve(grid: &mut [Vec<char>], points: &[(f64, f64)], b: &Bounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        if !b.contains_x(x) || !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, b, width);
        let row = map_y(y, b, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None if grid[row][col] == ' ' => grid[row][col] = ch,
            None => {}
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
