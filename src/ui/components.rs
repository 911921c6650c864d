/// UI components and utilities shared by the chart views
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the chart title bar
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(paragraph, area);
}

/// Render a bordered notice in place of a chart that has nothing to plot
pub fn render_no_data(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let notice = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(notice, area);
}

/// Hint line telling the user how to close the view
pub fn dismiss_hint() -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Gray)),
        Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(" or ", Style::default().fg(Color::Gray)),
        Span::styled("Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::Gray)),
    ])
}

/// Create a percentage change span with + or - prefix
pub fn styled_percentage_change(value: f64) -> Span<'static> {
    let formatted = if value >= 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    };

    if value >= 0.0 {
        Span::styled(formatted, Style::default().fg(Color::Green))
    } else {
        Span::styled(formatted, Style::default().fg(Color::Red))
    }
}

/// Short label for a ratio value, `n/a` when missing
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "n/a".to_string(),
    }
}
