use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use super::components::{dismiss_hint, render_no_data, render_title, styled_percentage_change};
use super::layout::ChartLayout;
use super::ChartView;
use crate::models::PriceHistory;

/// Line chart of closing price against date
#[derive(Debug)]
pub struct PriceChart {
    history: PriceHistory,
}

impl PriceChart {
    pub fn new(history: PriceHistory) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Points as (days since first close, close)
    fn series(&self) -> Vec<(f64, f64)> {
        let Some(first) = self.history.points.first() else {
            return Vec::new();
        };
        self.history
            .points
            .iter()
            .map(|p| ((p.date - first.date).num_days() as f64, p.close))
            .collect()
    }

    fn x_bounds(series: &[(f64, f64)]) -> [f64; 2] {
        let last = series.last().map(|(x, _)| *x).unwrap_or(0.0);
        if last > 0.0 {
            [0.0, last]
        } else {
            [0.0, 1.0]
        }
    }

    /// Close range padded by 5% so the line never touches the frame
    fn y_bounds(series: &[(f64, f64)]) -> [f64; 2] {
        let min = series.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
        let max = series.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
        let pad = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            (max - min) * 0.05
        };
        [min - pad, max + pad]
    }

    fn date_labels(&self) -> Vec<Span<'static>> {
        let points = &self.history.points;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Vec::new();
        };
        let middle = first.date + (last.date - first.date) / 2;

        [first.date, middle, last.date]
            .iter()
            .map(|d| Span::raw(d.format("%Y-%m-%d").to_string()))
            .collect()
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some(summary) = self.history.summary() {
            spans.push(Span::styled(
                format!(
                    "First ${:.2} • Last ${:.2} • High ${:.2} • Low ${:.2} • Return ",
                    summary.first, summary.last, summary.high, summary.low
                ),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(styled_percentage_change(summary.total_return));
            spans.push(Span::styled(
                format!(" • {} records   ", summary.records),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.extend(dismiss_hint().spans);

        let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl ChartView for PriceChart {
    fn title(&self) -> String {
        self.history.title()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let layout = ChartLayout::new(area);
        render_title(f, layout.title, &self.title());
        self.render_footer(f, layout.footer);

        if self.history.is_empty() {
            render_no_data(
                f,
                layout.main_content,
                "Close Price",
                &format!("No data returned for {} over {}", self.history.symbol, self.history.period),
            );
            return;
        }

        let series = self.series();
        let x_bounds = Self::x_bounds(&series);
        let y_bounds = Self::y_bounds(&series);
        let y_mid = (y_bounds[0] + y_bounds[1]) / 2.0;
        let y_ticks = [y_bounds[0], y_mid, y_bounds[1]];
        let x_mid = (x_bounds[0] + x_bounds[1]) / 2.0;

        // Faint grid lines through each axis tick
        let grid: Vec<[(f64, f64); 2]> = y_ticks
            .iter()
            .map(|y| [(x_bounds[0], *y), (x_bounds[1], *y)])
            .chain([x_bounds[0], x_mid, x_bounds[1]].iter().map(|x| [(*x, y_bounds[0]), (*x, y_bounds[1])]))
            .collect();

        let mut datasets: Vec<Dataset> = grid
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::DarkGray))
                    .data(line)
            })
            .collect();

        datasets.push(
            Dataset::default()
                .name("Close Price")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&series),
        );

        let axis_style = Style::default().fg(Color::Gray);
        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", axis_style.add_modifier(Modifier::BOLD)))
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(self.date_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Stock Price (USD)", axis_style.add_modifier(Modifier::BOLD)))
                    .style(axis_style)
                    .bounds(y_bounds)
                    .labels(y_ticks.iter().map(|y| Span::raw(format!("{:.2}", y))).collect::<Vec<_>>()),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

        f.render_widget(chart, layout.main_content);
    }
}
