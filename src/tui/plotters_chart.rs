//! Plotters-powered chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Chart;
use crate::plot::Bounds;

/// Line colors, assigned to a chart's line series in order.
const LINE_PALETTE: [RGBColor; 4] = [
    RGBColor(0, 255, 255), // cyan
    RGBColor(255, 215, 0), // gold
    RGBColor(255, 0, 255), // magenta
    RGBColor(0, 255, 0),   // green
];
const VERTICAL_COLOR: RGBColor = RGBColor(255, 80, 80);

/// Render-only view of one chart description; bounds are computed by the caller.
pub struct ChartWidget<'a> {
    pub chart: &'a Chart,
    pub bounds: Bounds,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for ChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(area.x, area.y, "Too small (resize).", Style::default().fg(Color::Yellow));
            return;
        }

        let Bounds {
            x_min: x0,
            x_max: x1,
            y_min: y0,
            y_max: y1,
        } = self.bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let chart_desc = self.chart;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(chart_desc.x_label.as_str())
                .y_desc(chart_desc.y_label.as_str())
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let in_x = |&(x, y): &(f64, f64)| x >= x0 && x <= x1 && y.is_finite();

            for (i, series) in chart_desc.lines.iter().enumerate() {
                let color = LINE_PALETTE[i % LINE_PALETTE.len()];
                chart.draw_series(LineSeries::new(series.points.iter().copied().filter(in_x), &color))?;
            }

            for &x in chart_desc.verticals.iter().filter(|&&x| x >= x0 && x <= x1) {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &VERTICAL_COLOR))?;
            }

            // `Circle` radii come out far too large through this backend, so
            // scatter points are single pixels.
            for series in &chart_desc.scatter {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .copied()
                        .filter(in_x)
                        .map(|(x, y)| Pixel::new((x, y), WHITE)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Ratatui color matching the palette entry of line series `i` (for legends).
pub fn line_color(i: usize) -> Color {
    let RGBColor(r, g, b) = LINE_PALETTE[i % LINE_PALETTE.len()];
    Color::Rgb(r, g, b)
}
