// Terminal table viewer
// Scrollable grid on the alternate screen, closed with q / Esc / Enter

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState,
    },
    Frame, Terminal,
};
use std::io;
use std::ops::Range;
use tracing::{error, info};

use super::console::fit;
use super::TableViewer;
use crate::config::ViewerConfig;
use crate::error::{LogParserError, LogResult};
use crate::logging::ConsolePause;
use crate::model::ParsedTable;

const BORDER: Color = Color::Rgb(64, 64, 64);
const ACCENT: Color = Color::Rgb(58, 128, 200);
const TEXT_MUTED: Color = Color::Rgb(120, 120, 120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Left,
    Right,
}

pub fn action_for(key: KeyEvent) -> Option<ViewerAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Some(ViewerAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(ViewerAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(ViewerAction::Down),
        KeyCode::PageUp => Some(ViewerAction::PageUp),
        KeyCode::PageDown => Some(ViewerAction::PageDown),
        KeyCode::Home => Some(ViewerAction::Home),
        KeyCode::End => Some(ViewerAction::End),
        KeyCode::Left | KeyCode::Char('h') => Some(ViewerAction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(ViewerAction::Right),
        _ => None,
    }
}

/// Cursor row, first visible row and first visible column
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub selected: usize,
    pub first_column: usize,
    pub page: usize,
    first_row: usize,
    row_count: usize,
    column_count: usize,
}

impl ViewState {
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            selected: 0,
            first_column: 0,
            page: 10,
            first_row: 0,
            row_count,
            column_count,
        }
    }

    /// Apply an action; returns true when the viewer should close
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        let last_row = self.row_count.saturating_sub(1);
        let last_column = self.column_count.saturating_sub(1);

        match action {
            ViewerAction::Quit => return true,
            ViewerAction::Up => self.selected = self.selected.saturating_sub(1),
            ViewerAction::Down => self.selected = (self.selected + 1).min(last_row),
            ViewerAction::PageUp => self.selected = self.selected.saturating_sub(self.page),
            ViewerAction::PageDown => self.selected = (self.selected + self.page).min(last_row),
            ViewerAction::Home => self.selected = 0,
            ViewerAction::End => self.selected = last_row,
            ViewerAction::Left => self.first_column = self.first_column.saturating_sub(1),
            ViewerAction::Right => self.first_column = (self.first_column + 1).min(last_column),
        }
        false
    }

    /// Rows that fit on one page, scrolled so the cursor stays inside
    pub fn window(&mut self) -> Range<usize> {
        let page = self.page.max(1);
        if self.selected < self.first_row {
            self.first_row = self.selected;
        } else if self.selected >= self.first_row + page {
            self.first_row = self.selected + 1 - page;
        }
        self.first_row..(self.first_row + page).min(self.row_count)
    }
}

pub struct TerminalViewer {
    title: String,
    column_cells: u16,
}

impl TerminalViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            title: config.title.clone(),
            column_cells: config.column_cells(),
        }
    }

    fn run_loop<B: Backend>(&self, terminal: &mut Terminal<B>, table: &ParsedTable) -> io::Result<()> {
        let headings = table.display_headings();
        let mut state = ViewState::new(table.row_count(), headings.len());
        let mut table_state = TableState::default();

        loop {
            terminal.draw(|frame| {
                self.draw(frame, table, &headings, &mut state, &mut table_state);
            })?;

            if let Event::Key(key) = event::read()? {
                if let Some(action) = action_for(key) {
                    if state.apply(action) {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn draw(
        &self,
        frame: &mut Frame,
        table: &ParsedTable,
        headings: &[String],
        state: &mut ViewState,
        table_state: &mut TableState,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.size());

        let grid_area = chunks[0];
        state.page = grid_area.height.saturating_sub(3).max(1) as usize;

        let width = self.column_cells;
        let visible = ((grid_area.width.saturating_sub(2) + 1) / (width + 1)).max(1) as usize;
        let columns = state.first_column..(state.first_column + visible).min(headings.len());

        let header = Row::new(
            headings[columns.clone()]
                .iter()
                .map(|h| centered(&fit(h, width as usize))),
        )
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

        let window = state.window();
        let rows = table.rows()[window.clone()].iter().map(|row| {
            Row::new(columns.clone().map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                centered(&fit(cell, width as usize))
            }))
        });

        let grid = Table::new(rows, vec![Constraint::Length(width); columns.len()])
            .header(header)
            .column_spacing(1)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(BORDER))
                    .title(format!(" {} ", self.title)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        *table_state.offset_mut() = 0;
        table_state.select(if window.is_empty() {
            None
        } else {
            Some(state.selected - window.start)
        });
        frame.render_stateful_widget(grid, grid_area, table_state);

        render_scrollbars(frame, grid_area, state, table.row_count(), headings.len());

        let status = format!(
            " row {}/{}  col {}/{}  ↑↓ PgUp PgDn Home End  ←→ columns  q close",
            if table.is_empty() { 0 } else { state.selected + 1 },
            table.row_count(),
            state.first_column + 1,
            headings.len()
        );
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(TEXT_MUTED)),
            chunks[1],
        );
    }
}

fn centered(text: &str) -> Cell<'static> {
    Cell::from(Line::from(text.to_string()).alignment(Alignment::Center))
}

fn render_scrollbars(frame: &mut Frame, area: Rect, state: &ViewState, rows: usize, columns: usize) {
    let mut vertical = ScrollbarState::new(rows).position(state.selected);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(&Margin { vertical: 1, horizontal: 0 }),
        &mut vertical,
    );

    let mut horizontal = ScrollbarState::new(columns).position(state.first_column);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::HorizontalBottom),
        area.inner(&Margin { vertical: 0, horizontal: 1 }),
        &mut horizontal,
    );
}

impl TableViewer for TerminalViewer {
    fn show(&mut self, table: &ParsedTable) -> LogResult<()> {
        info!(rows = table.row_count(), "Opening terminal viewer");
        let _quiet = ConsolePause::start();

        let setup = || -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        };
        let mut terminal = setup().map_err(|e| LogParserError::viewer(e.to_string()))?;

        let result = self.run_loop(&mut terminal, table);

        // Cleanup
        let cleanup = disable_raw_mode()
            .and_then(|_| execute!(terminal.backend_mut(), LeaveAlternateScreen))
            .and_then(|_| terminal.show_cursor());

        if let Err(err) = &result {
            error!("Terminal viewer error: {:?}", err);
        }

        result
            .and(cleanup)
            .map_err(|e| LogParserError::viewer(e.to_string()))
    }
}
