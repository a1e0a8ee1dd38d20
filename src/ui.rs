// 🖥️ Workbook Viewer - browse a written SQLite workbook sheet by sheet

use crate::report::{Report, Sheet};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

const PAGE_SIZE: usize = 20;
const MAX_COLUMN_WIDTH: usize = 40;

pub struct App {
    pub report: Report,
    pub source: String,
    pub current: usize,
    pub states: Vec<TableState>,
    pub show_detail: bool,
}

impl App {
    pub fn new(report: Report, source: &str) -> Self {
        let states = report
            .sheets
            .iter()
            .map(|sheet| {
                let mut state = TableState::default();
                if !sheet.rows.is_empty() {
                    state.select(Some(0));
                }
                state
            })
            .collect();

        Self {
            report,
            source: source.to_string(),
            current: 0,
            states,
            show_detail: false,
        }
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.report.sheets.get(self.current)
    }

    fn row_count(&self) -> usize {
        self.sheet().map(|s| s.rows.len()).unwrap_or(0)
    }

    pub fn selected(&self) -> Option<usize> {
        self.states.get(self.current).and_then(|s| s.selected())
    }

    fn select(&mut self, row: Option<usize>) {
        if let Some(state) = self.states.get_mut(self.current) {
            state.select(row);
        }
    }

    pub fn selected_row(&self) -> Option<&Vec<String>> {
        let row = self.selected()?;
        self.sheet()?.rows.get(row)
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_sheet(&mut self) {
        if !self.report.sheets.is_empty() {
            self.current = (self.current + 1) % self.report.sheets.len();
        }
    }

    pub fn previous_sheet(&mut self) {
        let len = self.report.sheets.len();
        if len > 0 {
            self.current = (self.current + len - 1) % len;
        }
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = self
            .selected()
            .map(|i| (i + PAGE_SIZE).min(len - 1))
            .unwrap_or(0);
        self.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.row_count() == 0 {
            return;
        }
        let i = self.selected().map(|i| i.saturating_sub(PAGE_SIZE)).unwrap_or(0);
        self.select(Some(i));
    }

    pub fn first(&mut self) {
        if self.row_count() > 0 {
            self.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let len = self.row_count();
        if len > 0 {
            self.select(Some(len - 1));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::BackTab => app.previous_sheet(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_sheet();
                    } else {
                        app.next_sheet();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Sheet tabs
            Constraint::Min(0),    // Sheet
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, sheet) in app.report.sheets.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if i == app.current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(sheet.title.clone(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", app.source)),
    );

    f.render_widget(header, area);
}

fn severity_color(severity: &str) -> Color {
    match severity {
        "High" => Color::Red,
        "Medium" => Color::Yellow,
        "Warning" => Color::Magenta,
        "Low" => Color::Cyan,
        "Info" => Color::Gray,
        _ => Color::White,
    }
}

/// Width of each column: widest cell, capped
pub fn column_widths(sheet: &Sheet) -> Vec<u16> {
    sheet
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = sheet
                .rows
                .iter()
                .filter_map(|r| r.get(col))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (widest.min(MAX_COLUMN_WIDTH) + 2) as u16
        })
        .collect()
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(sheet) = app.report.sheets.get(app.current) else {
        let empty = Paragraph::new("Workbook has no sheets")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let header_cells = sheet.headers.iter().map(|h| {
        Cell::from(h.clone()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let severity_col = sheet.headers.iter().position(|h| h == "Severity");

    let rows = sheet.rows.iter().map(|row| {
        let color = severity_col
            .and_then(|c| row.get(c))
            .map(|s| severity_color(s))
            .unwrap_or(Color::White);

        let cells = row
            .iter()
            .map(|value| Cell::from(truncate(value, MAX_COLUMN_WIDTH)));

        Row::new(cells).style(Style::default().fg(color)).height(1)
    });

    let widths: Vec<Constraint> = column_widths(sheet)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ({} rows) ", sheet.title, sheet.rows.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    if let Some(state) = app.states.get_mut(app.current) {
        f.render_stateful_widget(table, area, state);
    }
}

/// Selected row as "Header: value" lines
pub fn detail_lines(headers: &[String], row: &[String]) -> Vec<(String, String)> {
    headers
        .iter()
        .zip(row.iter())
        .map(|(h, v)| (h.clone(), v.clone()))
        .collect()
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match (app.sheet(), app.selected_row()) {
        (Some(sheet), Some(row)) => detail_lines(&sheet.headers, row)
            .into_iter()
            .flat_map(|(header, value)| {
                vec![
                    Line::from(Span::styled(
                        format!("{}:", header),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("  {}", if value.is_empty() { "-" } else { value.as_str() })),
                ]
            })
            .collect(),
        _ => vec![Line::from("No row selected")],
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Details "),
        );

    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.row_count();

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("Tab/Shift-Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Sheet | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
