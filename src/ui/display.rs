use crate::models::MonitorConfig;
use crate::state::{read_state, AppState, AppStateInner};
use crate::ui::colors::ColorScheme;
use crate::ui::format::{format_bytes, format_cpu, truncate};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::rows::{build_rows, DisplayRow, RowKind};
use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tokio::sync::Notify;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// PID、CPU、MEMORY、CHILD 列宽加列间距和边框
const FIXED_COLUMNS_WIDTH: u16 = 8 + 8 + 11 + 6 + 4 + 2;

pub struct Display {
    colors: ColorScheme,
    cpu_threshold: f64,
    memory_threshold_mb: u64,
}

impl Display {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            colors: ColorScheme::new(),
            cpu_threshold: config.cpu_threshold_percent,
            memory_threshold_mb: config.memory_threshold_bytes / (1024 * 1024),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppStateInner) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        self.render_header(frame, header, state);
        self.render_processes(frame, body, state);
        self.render_footer(frame, footer, state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppStateInner) {
        let (status, status_color) = if state.paused {
            ("⏸ PAUSED", self.colors.warning)
        } else {
            ("✓ RUNNING", self.colors.success)
        };

        let title = Line::from(vec![
            Span::styled(
                format!(
                    "Processes >{:.1}% CPU or >{}MB RAM  ",
                    self.cpu_threshold, self.memory_threshold_mb
                ),
                Style::default().fg(self.colors.header),
            ),
            Span::styled(status, Style::default().fg(status_color)),
        ]);

        let sys = &state.system;
        let summary = match &state.last_error {
            Some(error) => Line::from(Span::styled(format!("⚠ {}", error), Style::default().fg(self.colors.warning))),
            None => Line::from(Span::styled(
                format!(
                    "CPU {} ({} cores) │ MEM {} / {} ({:.1}%), {} avail │ SWAP {} / {} ({:.1}%)",
                    format_cpu(sys.cpu_percent),
                    sys.cpu_cores,
                    format_bytes(sys.memory_used),
                    format_bytes(sys.memory_total),
                    sys.memory_percent(),
                    format_bytes(sys.memory_available),
                    format_bytes(sys.swap_used),
                    format_bytes(sys.swap_total),
                    sys.swap_percent(),
                ),
                Style::default().fg(self.colors.muted),
            )),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.border))
            .title(" brieftop ");
        frame.render_widget(Paragraph::new(vec![title, summary]).block(block), area);
    }

    fn render_processes(&self, frame: &mut Frame, area: Rect, state: &AppStateInner) {
        let (rows, selected_row) = build_rows(&state.processes, state.selected, state.show_threads);
        let name_width = area.width.saturating_sub(FIXED_COLUMNS_WIDTH) as usize;

        let header = Row::new(["PID", "CPU", "MEMORY", "CHILD", "PROCESS NAME"])
            .style(Style::default().fg(self.colors.accent));

        let table_rows: Vec<Row> = rows.iter().map(|row| self.table_row(row, name_width)).collect();

        let table = Table::new(
            table_rows,
            [
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(11),
                Constraint::Length(6),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.colors.border)),
        );

        let mut table_state = TableState::default().with_selected(selected_row);
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn table_row<'a>(&self, row: &'a DisplayRow, name_width: usize) -> Row<'a> {
        let color = match row.kind {
            RowKind::Process(level) => self.colors.process_color(level),
            RowKind::Parent => self.colors.text,
            RowKind::Thread => self.colors.thread,
            RowKind::Child => self.colors.child_process,
        };

        Row::new(vec![
            Cell::from(row.pid.as_str()),
            Cell::from(row.cpu.as_str()),
            Cell::from(row.memory.as_str()),
            Cell::from(row.children.as_str()),
            Cell::from(truncate(&row.name, name_width)),
        ])
        .style(self.colors.style(color, row.selected))
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppStateInner) {
        let controls = ["↑↓ Navigate", "⏎ Expand", "␣ Pause", "r Refresh", "q Quit"].join(" │ ");
        let line = Line::from(vec![
            Span::styled(controls, Style::default().fg(self.colors.accent)),
            Span::styled(
                format!("   Showing {} processes", state.processes.len()),
                Style::default().fg(self.colors.muted),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.border));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// 渲染 + 输入循环，运行在阻塞线程中
pub fn event_loop(
    terminal: &mut DefaultTerminal,
    state: &AppState,
    force: &Notify,
    config: &MonitorConfig,
) -> anyhow::Result<()> {
    let display = Display::new(config);

    loop {
        {
            let inner = read_state(state);
            terminal
                .draw(|frame| display.render(frame, &inner))
                .context("failed to draw frame")?;
        }

        if !event::poll(FRAME_INTERVAL).context("failed to poll terminal events")? {
            continue;
        }

        match event::read().context("failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(key, state, force) == InputAction::Quit {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}
