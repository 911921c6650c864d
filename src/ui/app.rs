use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tracing::{debug, warn};

use super::ChartView;

/// Keys that close a chart view
pub fn is_dismiss_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

/// Draw one frame of the view over the whole terminal
pub fn draw_view<B: Backend, V: ChartView + ?Sized>(terminal: &mut Terminal<B>, view: &V) -> Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        view.render(f, area);
    })?;
    Ok(())
}

fn event_loop<B: Backend, V: ChartView + ?Sized>(terminal: &mut Terminal<B>, view: &V) -> Result<()> {
    loop {
        draw_view(terminal, view)?;

        // Any other event (resize included) just triggers a redraw
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_dismiss_key(key.code) {
                return Ok(());
            }
        }
    }
}

/// Runs its closure when dropped, including while unwinding from a panic
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

/// Put the terminal back in cooked mode on the main screen; each step runs even if the other fails
fn restore_terminal() {
    let raw = disable_raw_mode();
    let screen = io::stdout().execute(LeaveAlternateScreen).map(|_| ());

    // Logged only once both steps ran, so nothing lands on the alternate screen
    for err in [raw, screen].into_iter().filter_map(|step| step.err()) {
        warn!("Failed to restore terminal: {}", err);
    }
}

/// Show a chart full-screen and block until the user dismisses it
pub fn show<V: ChartView + ?Sized>(view: &V) -> Result<()> {
    debug!("Showing chart: {}", view.title());

    // Setup terminal
    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);
    io::stdout().execute(EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, view)
}
