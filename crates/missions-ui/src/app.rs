//! Main application state and TUI event loop for Space Missions.
//!
//! [`App`] owns the theme, the shared canonical table and the report of the
//! section currently selected in the sidebar. Switching sections recomputes
//! that report from the table.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info};

use missions_core::models::{LaunchTable, Section};
use missions_data::sections::{build_report, Chart, SectionReport};

use crate::chart_view;
use crate::components::header::Header;
use crate::components::sidebar::{Sidebar, SIDEBAR_WIDTH};
use crate::themes::Theme;

/// Rows moved by one PgUp/PgDn.
pub const PAGE_SIZE: usize = 10;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Space Missions TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    table: Arc<LaunchTable>,
    reference_year: i32,
    /// Section highlighted in the sidebar.
    pub section: Section,
    /// Report of [`Self::section`], rebuilt on every switch.
    pub report: SectionReport,
    /// Index of the chart shown within the report.
    pub chart_index: usize,
    /// Rows or bars skipped at the top of the current chart.
    pub scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(
        table: Arc<LaunchTable>,
        theme_name: &str,
        section: Section,
        reference_year: i32,
    ) -> Self {
        let report = build_report(&table, section, reference_year);
        Self {
            theme: Theme::from_name(theme_name),
            table,
            reference_year,
            section,
            report,
            chart_index: 0,
            scroll: 0,
            should_quit: false,
        }
    }

    /// The chart currently on screen, `None` for a report without charts.
    pub fn current_chart(&self) -> Option<&Chart> {
        self.report.charts.get(self.chart_index)
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    pub fn select_section(&mut self, section: Section) {
        if section == self.section {
            return;
        }
        info!(section = section.slug(), "switching section");
        self.section = section;
        self.report = build_report(&self.table, section, self.reference_year);
        self.chart_index = 0;
        self.scroll = 0;
    }

    pub fn next_chart(&mut self) {
        let n = self.report.charts.len();
        if n > 0 {
            self.chart_index = (self.chart_index + 1) % n;
            self.scroll = 0;
        }
    }

    pub fn prev_chart(&mut self) {
        let n = self.report.charts.len();
        if n > 0 {
            self.chart_index = (self.chart_index + n - 1) % n;
            self.scroll = 0;
        }
    }

    fn scroll_down(&mut self, by: usize) {
        let limit = self.current_chart().map_or(0, |c| c.len().saturating_sub(1));
        self.scroll = (self.scroll + by).min(limit);
    }

    fn scroll_up(&mut self, by: usize) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_section(self.section.next()),
            KeyCode::Up | KeyCode::Char('k') => self.select_section(self.section.prev()),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.next_chart(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.prev_chart(),
            KeyCode::PageDown => self.scroll_down(PAGE_SIZE),
            KeyCode::PageUp => self.scroll_up(PAGE_SIZE),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(section) = Section::ALL.get(idx) {
                    self.select_section(*section);
                }
            }
            other => debug!(?other, "unbound key"),
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so that resizes
    /// are redrawn promptly. The terminal is restored even if drawing fails.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Header::new(
            self.section.title(),
            self.table.len(),
            self.table.year_span(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[1]);

        Sidebar::new(self.section, &self.theme).render(frame, body[0]);

        match self.current_chart() {
            Some(chart) => chart_view::render_chart(frame, body[1], chart, self.scroll, &self.theme),
            None => chart_view::render_empty(frame, body[1], &self.theme),
        }

        frame.render_widget(Paragraph::new(self.footer_line()), rows[2]);
    }

    fn footer_line(&self) -> Line<'_> {
        let position = format!(
            "{}/{}",
            (self.chart_index + 1).min(self.report.charts.len()),
            self.report.charts.len()
        );
        Line::from(vec![
            Span::styled(" ↑/↓", self.theme.bold),
            Span::styled(" section  ", self.theme.dim),
            Span::styled("←/→", self.theme.bold),
            Span::styled(" chart ", self.theme.dim),
            Span::styled(position, self.theme.value),
            Span::styled("  PgUp/PgDn", self.theme.bold),
            Span::styled(" scroll  ", self.theme.dim),
            Span::styled("q", self.theme.bold),
            Span::styled(" quit", self.theme.dim),
        ])
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
