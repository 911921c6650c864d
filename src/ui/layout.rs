use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Title / chart / footer split shared by every chart view
pub struct ChartLayout {
    pub title: Rect,
    pub main_content: Rect,
    pub footer: Rect,
}

impl ChartLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Chart
                Constraint::Length(3), // Footer
            ])
            .split(area);

        Self {
            title: chunks[0],
            main_content: chunks[1],
            footer: chunks[2],
        }
    }

    /// Split the chart area into a 2x2 grid, returned as
    /// top-left, top-right, bottom-left, bottom-right
    pub fn quadrants(&self) -> [Rect; 4] {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(self.main_content);

        let split_row = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row)
        };

        let top = split_row(rows[0]);
        let bottom = split_row(rows[1]);
        [top[0], top[1], bottom[0], bottom[1]]
    }
}
