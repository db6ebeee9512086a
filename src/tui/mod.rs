//! Ratatui-based terminal UI.
//!
//! Shows the three charts of a run side by side above a summary panel. The
//! observations come either from files or from a seeded synthetic sample;
//! the quantity window and the sample seed can be adjusted live.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::warn;

use crate::app::pipeline::compute_with_config;
use crate::cli::TuiArgs;
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{Chart, ComputeConfig, ComputeOutput};
use crate::error::AppError;
use crate::io::ingest::read_text_file;
use crate::plot::{Bounds, chart_bounds};
use crate::report::format_profit;

mod plotters_chart;

use plotters_chart::{ChartWidget, line_color};

const Q_MAX_STEP: i64 = 10;

/// Start the TUI.
pub fn run(args: TuiArgs, config: ComputeConfig) -> Result<(), AppError> {
    // Load inputs before touching the terminal so errors print normally.
    let mut app = App::new(&args, config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Files { cost_text: String, revenue_text: String },
    Synthetic { seed: u64 },
}

struct App {
    source: Source,
    config: ComputeConfig,
    q_max: i64,
    focus: usize,
    status: String,
    output: Option<ComputeOutput>,
}

impl App {
    fn new(args: &TuiArgs, config: ComputeConfig) -> Result<Self, AppError> {
        let source = match (&args.cost, &args.revenue) {
            (Some(cost), Some(revenue)) => Source::Files {
                cost_text: read_text_file(cost)?,
                revenue_text: read_text_file(revenue)?,
            },
            _ => Source::Synthetic { seed: args.seed },
        };

        let mut app = Self {
            source,
            config,
            q_max: args.q_max.max(1),
            focus: 1,
            status: String::new(),
            output: None,
        };
        // A failed first run is fatal: there is nothing to show.
        app.output = Some(app.recompute()?);
        app.status = app.describe_source();
        Ok(app)
    }

    fn recompute(&self) -> Result<ComputeOutput, AppError> {
        match &self.source {
            Source::Files {
                cost_text,
                revenue_text,
            } => compute_with_config(cost_text, revenue_text, 0, self.q_max, &self.config),
            Source::Synthetic { seed } => {
                let sample = generate_sample(&SampleConfig {
                    seed: *seed,
                    ..SampleConfig::default()
                })?;
                compute_with_config(&sample.cost_text, &sample.revenue_text, 0, self.q_max, &self.config)
            }
        }
    }

    /// Rerun the pipeline, keeping the last good output on failure.
    fn refresh(&mut self) {
        match self.recompute() {
            Ok(output) => {
                self.output = Some(output);
                self.status = self.describe_source();
            }
            Err(err) => {
                warn!(%err, "recompute failed");
                self.status = format!("Error: {err}");
            }
        }
    }

    fn describe_source(&self) -> String {
        match &self.source {
            Source::Files { .. } => format!("files | Q max: {}", self.q_max),
            Source::Synthetic { seed } => format!("synthetic seed {seed} | Q max: {}", self.q_max),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => {
                let next = (self.q_max - Q_MAX_STEP).max(1);
                if next != self.q_max {
                    self.q_max = next;
                    self.refresh();
                }
            }
            KeyCode::Right => {
                self.q_max = self.q_max.saturating_add(Q_MAX_STEP);
                self.refresh();
            }
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            KeyCode::Char('r') => {
                let Source::Synthetic { seed } = &mut self.source else {
                    self.status = "Resampling needs a synthetic sample (run without --cost/--revenue).".to_string();
                    return false;
                };
                *seed = seed.wrapping_add(1);
                self.refresh();
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("pc", Style::default().fg(Color::Cyan)),
            Span::raw(" - profit & break-even  "),
        ];
        if let Some(out) = &self.output {
            spans.push(Span::styled(
                format!(
                    "cost n={} | price n={} | window Q=[{}, {}]",
                    out.cost_observations.len(),
                    out.price_observations.len(),
                    out.window.q_min,
                    out.window.q_max,
                ),
                Style::default().fg(Color::Gray),
            ));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        let Some(out) = &self.output else {
            let msg = Paragraph::new("Waiting for data...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, chunks[0]);
            return;
        };

        let widths: Vec<Constraint> = (0..3)
            .map(|i| Constraint::Percentage(if i == self.focus { 50 } else { 25 }))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(chunks[0]);

        for (i, (chart, rect)) in out.charts.iter().zip(columns.iter()).enumerate() {
            draw_chart(frame, *rect, chart, chart_bounds(chart, &out.window), i == self.focus);
        }

        self.draw_summary(frame, chunks[1], out);
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect, out: &ComputeOutput) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let profit_lines: Vec<Line> = format_profit(&out.summary)
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        let profit = Paragraph::new(Text::from(profit_lines))
            .block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(profit, halves[0]);

        let fit_lines: Vec<Line> = [&out.fits.linear_cost, &out.fits.quadratic_cost, &out.fits.price]
            .into_iter()
            .map(|fit| {
                let params: Vec<String> = fit.params.iter().map(|p| format!("{p:.4}")).collect();
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", fit.kind.display_name()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("[{}] rmse={:.4}", params.join(", "), fit.quality.rmse)),
                ])
            })
            .collect();
        let fits = Paragraph::new(Text::from(fit_lines)).block(Block::default().title("Fits").borders(Borders::ALL));
        frame.render_widget(fits, halves[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ Q max  Tab focus  r resample  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_chart(frame: &mut ratatui::Frame<'_>, area: Rect, chart: &Chart, bounds: Bounds, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(chart.title.as_str())
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let legend_height = legend_len(chart).min(inner.height as usize / 3) as u16;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(legend_height)])
        .split(inner);

    let (chart_rect, insets) = chart_layout(parts[0]);
    let widget = ChartWidget {
        chart,
        bounds,
        fmt_x: fmt_axis_x,
        fmt_y: fmt_axis_y,
    };
    frame.render_widget(widget, chart_rect);
    if let Some(insets) = insets {
        draw_axis_ticks(frame, parts[0], chart_rect, insets, chart, bounds);
    }

    frame.render_widget(Paragraph::new(Text::from(legend(chart))), parts[1]);
}

fn legend_len(chart: &Chart) -> usize {
    chart.lines.len() + chart.scatter.len() + usize::from(!chart.verticals.is_empty())
}

fn legend(chart: &Chart) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = chart
        .lines
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled("── ", Style::default().fg(line_color(i))),
                Span::raw(s.label.clone()),
            ])
        })
        .collect();
    lines.extend(chart.scatter.iter().map(|s| Line::from(format!("·  {}", s.label))));
    if !chart.verticals.is_empty() {
        let at: Vec<String> = chart.verticals.iter().map(|x| format!("{x:.1}")).collect();
        lines.push(Line::from(vec![
            Span::styled("│  ", Style::default().fg(Color::LightRed)),
            Span::raw(format!("Break-even Q={}", at.join(", "))),
        ]));
    }
    lines
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart_rect: Rect,
    insets: AxisInsets,
    chart: &Chart,
    bounds: Bounds,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = bounds.x_min + u * (bounds.x_max - bounds.x_min);
        let x = chart_rect.x + ((chart_rect.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_x(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart_rect.y + chart_rect.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = bounds.y_min + u * (bounds.y_max - bounds.y_min);
        let y = chart_rect.y + (chart_rect.height - 1) - ((chart_rect.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(chart.x_label.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart_rect.x,
        y: chart_rect.y + chart_rect.height + 1,
        width: chart_rect.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(chart.y_label.as_str())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
