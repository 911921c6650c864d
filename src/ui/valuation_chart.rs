use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
    Frame,
};

use super::components::{dismiss_hint, format_ratio, render_no_data, render_title};
use super::layout::ChartLayout;
use super::ChartView;
use crate::models::{MetricTable, ValuationMetric};

/// Bars hold hundredths so fractional ratios keep two decimals of height
const SCALE: f64 = 100.0;
const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 10;
/// Bar labels take the last row of the panel
const LABEL_ROWS: u16 = 1;

fn scaled(value: f64) -> u64 {
    (value.max(0.0) * SCALE).round() as u64
}

/// 2x2 grid of bar charts comparing valuation ratios across companies
#[derive(Debug)]
pub struct ValuationChart {
    table: MetricTable,
    industry_pe: f64,
}

impl ValuationChart {
    pub fn new(table: MetricTable, industry_pe: f64) -> Self {
        Self { table, industry_pe }
    }

    pub fn table(&self) -> &MetricTable {
        &self.table
    }

    pub fn industry_pe(&self) -> f64 {
        self.industry_pe
    }

    fn metric_color(metric: ValuationMetric) -> Color {
        match metric {
            ValuationMetric::ForwardPe => Color::Blue,
            ValuationMetric::PriceToSales => Color::Green,
            ValuationMetric::EvToEbitda => Color::Magenta,
            ValuationMetric::PriceToBook => Color::Yellow,
        }
    }

    /// Largest value the panel's y-scale has to fit, including the reference line
    fn panel_max(&self, metric: ValuationMetric, values: &[Option<f64>]) -> f64 {
        let data_max = values.iter().flatten().fold(0.0_f64, |acc, v| acc.max(*v));
        let max = match metric {
            ValuationMetric::ForwardPe => data_max.max(self.industry_pe),
            _ => data_max,
        };
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    fn bar_width(inner_width: u16, bars: usize) -> u16 {
        if bars == 0 {
            return 1;
        }
        let slot = inner_width / u16::try_from(bars).unwrap_or(u16::MAX);
        slot.saturating_sub(BAR_GAP).clamp(1, MAX_BAR_WIDTH)
    }

    fn render_panel(&self, f: &mut Frame, area: Rect, metric: ValuationMetric) {
        if self.table.is_empty() {
            render_no_data(f, area, metric.title(), "No companies with a P/E ratio to compare");
            return;
        }

        let tickers = self.table.tickers();
        let values = self.table.values(metric);
        let color = Self::metric_color(metric);
        let max = self.panel_max(metric, &values);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", metric.title(), metric.axis_label()))
            .title_bottom(Line::from("Companies").centered());
        let inner = block.inner(area);
        let bar_width = Self::bar_width(inner.width, tickers.len());

        let bars: Vec<Bar> = tickers
            .iter()
            .zip(values.iter())
            .map(|(ticker, value)| {
                Bar::default()
                    .value(value.map(scaled).unwrap_or(0))
                    .text_value(format_ratio(*value))
                    .label(Line::from(ticker.clone()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .max(scaled(max).max(1));
        f.render_widget(chart, area);

        // Zero-height bars get no value text from the bar chart itself
        let flat_bars: Vec<(usize, String)> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.map(scaled).unwrap_or(0) == 0)
            .map(|(i, value)| (i, format_ratio(*value)))
            .collect();

        let reference = match metric {
            ValuationMetric::ForwardPe => Some(ReferenceLine {
                value: self.industry_pe,
                label: format!("Industry Avg P/E: {:.1}", self.industry_pe),
            }),
            _ => None,
        };

        f.render_widget(
            PanelOverlay {
                max,
                bar_width,
                flat_bars,
                reference,
            },
            inner,
        );
    }
}

impl ChartView for ValuationChart {
    fn title(&self) -> String {
        "Valuation Metrics Comparison".to_string()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let layout = ChartLayout::new(area);
        render_title(f, layout.title, &self.title());

        for (panel, metric) in layout.quadrants().into_iter().zip(ValuationMetric::ALL) {
            self.render_panel(f, panel, metric);
        }

        let footer = Paragraph::new(dismiss_hint())
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, layout.footer);
    }
}

/// Horizontal benchmark drawn across a bar panel
struct ReferenceLine {
    value: f64,
    label: String,
}

/// Annotations drawn over a rendered bar chart's inner area
struct PanelOverlay {
    max: f64,
    bar_width: u16,
    /// Bar index and the text to show for bars with no visible height
    flat_bars: Vec<(usize, String)>,
    reference: Option<ReferenceLine>,
}

impl PanelOverlay {
    /// Row just above the bar labels, where bars start growing
    fn baseline(area: Rect) -> Option<u16> {
        let bars_bottom = area.bottom().checked_sub(LABEL_ROWS)?;
        (bars_bottom > area.top()).then(|| bars_bottom - 1)
    }

    /// Row where a bar of `value` would end
    fn row_for(&self, area: Rect, value: f64) -> Option<u16> {
        let baseline = Self::baseline(area)?;
        let bar_rows = baseline + 1 - area.top();
        let rows = ((value.max(0.0) / self.max) * bar_rows as f64).round() as u16;
        Some(baseline.saturating_sub(rows.saturating_sub(1)).max(area.top()))
    }
}

impl Widget for PanelOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(baseline) = Self::baseline(area) else {
            return;
        };

        for (index, text) in &self.flat_bars {
            let offset = u16::try_from(*index)
                .unwrap_or(u16::MAX)
                .saturating_mul(self.bar_width + BAR_GAP);
            let x = area.left().saturating_add(offset);
            if x >= area.right() {
                continue;
            }
            let width = self.bar_width.min(area.right() - x) as usize;
            buf.set_stringn(x, baseline, text, width, Style::default().fg(Color::DarkGray));
        }

        let Some(reference) = &self.reference else {
            return;
        };
        let Some(row) = self.row_for(area, reference.value) else {
            return;
        };
        let line_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        // Only draw through empty cells so bars stay visible
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, row)) {
                if cell.symbol() == " " {
                    cell.set_symbol("┄").set_style(line_style);
                }
            }
        }

        let label_width = reference.label.chars().count() as u16;
        if label_width < area.width {
            let label_row = if row > area.top() { row - 1 } else { row };
            let x = area.right() - label_width;
            buf.set_string(x, label_row, &reference.label, line_style);
        }
    }
}
