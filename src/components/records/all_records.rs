//! All-records viewer: every record across types, with filter toggles and
//! per-name history search.

use crate::app::SelectedView;
use crate::components::records::{render_confirm_dialog, render_notices, Notices};
use crate::components::Component;
use crate::export;
use crate::fields::{self, FieldSpec};
use crate::models::{PatientRecord, PatientType};
use crate::report;
use crate::store::{RecordFilter, RecordStore};
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use std::path::Path;

// Focus indices inside the history panel
const HISTORY_INPUT: usize = 0;
const HISTORY_RESULTS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmAction {
    DeleteOne(u64),
    DeleteAllInFilter,
}

/// Lists all records with an optional type filter, per-record delete,
/// delete-all-in-filter, print, CSV export, and a history search panel.
pub struct AllRecords {
    store: RecordStore,
    filter: Option<PatientType>,
    records: Vec<PatientRecord>,
    table_state: TableState,
    confirm: Option<ConfirmAction>,
    confirm_selected: usize, // 0 for Yes, 1 for No
    show_history: bool,
    history_focus: usize,
    history_query: String,
    /// `None` until a search has run; `Some` holds the last results.
    history_results: Option<Vec<PatientRecord>>,
    history_state: TableState,
    pub(crate) notices: Notices,
}

impl AllRecords {
    pub fn new() -> Result<Self> {
        let mut viewer = Self {
            store: RecordStore::open_default(),
            filter: None,
            records: Vec::new(),
            table_state: TableState::default(),
            confirm: None,
            confirm_selected: 1,
            show_history: false,
            history_focus: HISTORY_INPUT,
            history_query: String::new(),
            history_results: None,
            history_state: TableState::default(),
            notices: Notices::default(),
        };
        viewer.refresh()?;
        Ok(viewer)
    }

    fn scope(&self) -> RecordFilter {
        match self.filter {
            Some(record_type) => RecordFilter::all().of_type(record_type),
            None => RecordFilter::all(),
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.records = self.store.list(&self.scope())?;
        if self.records.is_empty() {
            self.table_state.select(None);
        } else {
            let selection = self
                .table_state
                .selected()
                .unwrap_or(0)
                .min(self.records.len() - 1);
            self.table_state.select(Some(selection));
        }
        Ok(())
    }

    fn set_filter(&mut self, filter: Option<PatientType>) -> Result<()> {
        self.filter = filter;
        self.hide_history();
        self.refresh()
    }

    fn filter_label(&self) -> &'static str {
        match self.filter {
            None => "All",
            Some(PatientType::Guest) => "Guest",
            Some(PatientType::Employee) => "Employee",
        }
    }

    fn field_specs(&self) -> Vec<FieldSpec> {
        fields::all_record_fields(self.filter)
    }

    fn selected_record(&self) -> Option<&PatientRecord> {
        self.table_state.selected().and_then(|i| self.records.get(i))
    }

    fn confirm_and_execute(&mut self, action: ConfirmAction) -> Result<()> {
        match action {
            ConfirmAction::DeleteOne(id) => {
                if self.store.delete_by_id(id)? {
                    self.notices.set_success("Record deleted successfully!");
                } else {
                    self.notices.set_error("Record not found.");
                }
            }
            ConfirmAction::DeleteAllInFilter => {
                // With a type filter only that type is removed; with no
                // filter the whole store is cleared.
                let removed = self.store.delete_where(&self.scope())?;
                self.notices.set_success(format!(
                    "{} record{} deleted successfully!",
                    removed,
                    if removed == 1 { "" } else { "s" }
                ));
            }
        }
        self.refresh()
    }

    fn export_csv(&mut self) -> Result<()> {
        let records = self.store.list(&self.scope())?;
        if records.is_empty() {
            self.notices.set_error("No records to export.");
            return Ok(());
        }
        export::export_records(
            &self.field_specs(),
            &records,
            Path::new(export::ALL_RECORDS_FILE_NAME),
        )?;
        self.notices
            .set_success(format!("Exported to {}", export::ALL_RECORDS_FILE_NAME));
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        let records = self.store.list(&self.scope())?;
        if records.is_empty() {
            self.notices.set_error("No records to print.");
            return Ok(());
        }
        report::print_table(
            &format!("Patient Records ({})", self.filter_label()),
            &self.field_specs(),
            &records,
            Path::new(report::TABLE_PRINT_FILE),
        )?;
        self.notices.set_success(format!(
            "Print document written to {}",
            report::TABLE_PRINT_FILE
        ));
        Ok(())
    }

    fn open_history(&mut self) {
        self.show_history = true;
        self.history_focus = HISTORY_INPUT;
        self.history_query.clear();
        self.history_results = None;
        self.history_state.select(None);
    }

    fn hide_history(&mut self) {
        self.show_history = false;
        self.history_query.clear();
        self.history_results = None;
        self.history_state.select(None);
    }

    fn run_history_search(&mut self) -> Result<()> {
        let query = self.history_query.trim().to_string();
        if query.is_empty() {
            self.notices
                .set_error("Please enter a patient name to search.");
            return Ok(());
        }
        let results = self
            .store
            .list(&RecordFilter::all().name_contains(query))?;
        if results.is_empty() {
            self.history_state.select(None);
        } else {
            self.history_state.select(Some(0));
            self.history_focus = HISTORY_RESULTS;
        }
        self.history_results = Some(results);
        Ok(())
    }

    fn print_history_record(&mut self) -> Result<()> {
        let record = self
            .history_state
            .selected()
            .and_then(|i| self.history_results.as_ref().and_then(|r| r.get(i)))
            .cloned();
        let Some(record) = record else {
            self.notices.set_error("Patient record not found.");
            return Ok(());
        };
        let file_name = report::history_print_file(record.id);
        report::print_record(&record, Path::new(&file_name))?;
        self.notices
            .set_success(format!("Print document written to {}", file_name));
        Ok(())
    }

    fn handle_history_input(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.hide_history(),
            KeyCode::Tab => {
                self.history_focus = 1 - self.history_focus;
            }
            KeyCode::Enter => {
                if self.history_focus == HISTORY_INPUT {
                    self.run_history_search()?;
                } else {
                    self.print_history_record()?;
                }
            }
            KeyCode::Char(c) if self.history_focus == HISTORY_INPUT => {
                self.history_query.push(c);
            }
            KeyCode::Backspace if self.history_focus == HISTORY_INPUT => {
                self.history_query.pop();
            }
            KeyCode::Down if self.history_focus == HISTORY_RESULTS => {
                if let Some(results) = &self.history_results {
                    if !results.is_empty() {
                        let i = match self.history_state.selected() {
                            Some(i) if i >= results.len() - 1 => 0,
                            Some(i) => i + 1,
                            None => 0,
                        };
                        self.history_state.select(Some(i));
                    }
                }
            }
            KeyCode::Up if self.history_focus == HISTORY_RESULTS => {
                if let Some(results) = &self.history_results {
                    if !results.is_empty() {
                        let i = match self.history_state.selected() {
                            Some(0) | None => results.len() - 1,
                            Some(i) => i - 1,
                        };
                        self.history_state.select(Some(i));
                    }
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P')
                if self.history_focus == HISTORY_RESULTS =>
            {
                self.print_history_record()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_confirm_input(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                self.confirm_selected = 1 - self.confirm_selected;
            }
            KeyCode::Enter => {
                let action = self.confirm.take();
                if self.confirm_selected == 0 {
                    if let Some(action) = action {
                        self.confirm_and_execute(action)?;
                    }
                }
            }
            KeyCode::Esc => {
                self.confirm = None;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Component for AllRecords {
    fn handle_input(&mut self, key: KeyEvent) -> Result<Option<SelectedView>> {
        if self.confirm.is_some() {
            self.handle_confirm_input(key)?;
            return Ok(None);
        }
        if self.show_history {
            self.handle_history_input(key)?;
            return Ok(None);
        }

        match key.code {
            KeyCode::Down => {
                if !self.records.is_empty() {
                    let i = match self.table_state.selected() {
                        Some(i) if i >= self.records.len() - 1 => 0,
                        Some(i) => i + 1,
                        None => 0,
                    };
                    self.table_state.select(Some(i));
                }
            }
            KeyCode::Up => {
                if !self.records.is_empty() {
                    let i = match self.table_state.selected() {
                        Some(0) | None => self.records.len() - 1,
                        Some(i) => i - 1,
                    };
                    self.table_state.select(Some(i));
                }
            }
            KeyCode::Char('1') => self.set_filter(None)?,
            KeyCode::Char('2') => self.set_filter(Some(PatientType::Guest))?,
            KeyCode::Char('3') => self.set_filter(Some(PatientType::Employee))?,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                let selected_id = self.selected_record().map(|r| r.id);
                if let Some(id) = selected_id {
                    self.confirm = Some(ConfirmAction::DeleteOne(id));
                    self.confirm_selected = 1;
                } else {
                    self.notices.set_error("No record selected.");
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.confirm = Some(ConfirmAction::DeleteAllInFilter);
                self.confirm_selected = 1;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.print()?,
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_csv()?,
            KeyCode::Char('h') | KeyCode::Char('H') => self.open_history(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh()?,
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => {
                return Ok(Some(SelectedView::None));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 16, 28))),
            area,
        );

        let mut constraints = vec![
            Constraint::Length(3), // Header
            Constraint::Length(2), // Instructions
            Constraint::Min(8),    // Table
        ];
        if self.show_history {
            constraints.push(Constraint::Length(11)); // History panel
        }
        constraints.push(Constraint::Length(1)); // Message area

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .margin(1)
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Rgb(75, 75, 120)))
            .style(Style::default().bg(Color::Rgb(16, 16, 28)));
        frame.render_widget(header_block, layout[0]);

        let title = Paragraph::new(format!("All Patient Records ({})", self.filter_label()))
            .style(
                Style::default()
                    .fg(Color::Rgb(230, 230, 250))
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::Rgb(16, 16, 28)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(title, layout[0]);

        let instructions = Paragraph::new(
            "1: All  2: Guest  3: Employee | ↑↓: Navigate | D: Delete | A: Delete All | P: Print | E: Export | H: History | Esc: Back",
        )
        .style(Style::default().fg(Color::Rgb(140, 140, 170)))
        .alignment(Alignment::Center);
        frame.render_widget(instructions, layout[1]);

        let field_specs = self.field_specs();
        let header_cells = fields::header_labels(&field_specs)
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Rgb(230, 230, 250))));
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Rgb(26, 26, 36)))
            .height(1)
            .bottom_margin(1);

        let rows: Vec<Row> = if self.records.is_empty() {
            // Placeholder row for an empty result set.
            let mut cells = vec![Cell::from("No patient records found.")
                .style(Style::default().fg(Color::Rgb(180, 180, 200)))];
            cells.resize_with(field_specs.len(), || Cell::from(""));
            vec![Row::new(cells)]
        } else {
            self.records
                .iter()
                .map(|record| {
                    Row::new(
                        fields::row_values(&field_specs, record)
                            .into_iter()
                            .map(Cell::from)
                            .collect::<Vec<_>>(),
                    )
                    .height(1)
                })
                .collect()
        };

        let widths = vec![
            Constraint::Ratio(1, field_specs.len() as u32);
            field_specs.len()
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(" Patient Records ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Rgb(75, 75, 120)))
                    .style(Style::default().bg(Color::Rgb(22, 22, 35))),
            )
            .row_highlight_style(
                Style::default()
                    .bg(Color::Rgb(40, 40, 65))
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");

        frame.render_stateful_widget(table, layout[2], &mut self.table_state.clone());

        if self.show_history {
            self.render_history_panel(frame, layout[3]);
        }

        render_notices(&self.notices, frame, layout[layout.len() - 1]);

        if let Some(action) = self.confirm {
            let (title, message) = match action {
                ConfirmAction::DeleteOne(_) => (
                    "Delete Record",
                    "Are you sure you want to delete this record?",
                ),
                ConfirmAction::DeleteAllInFilter => {
                    ("Delete All", "Delete all displayed records?")
                }
            };
            render_confirm_dialog(frame, title, message, self.confirm_selected);
        }
    }
}

impl AllRecords {
    fn render_history_panel(&self, frame: &mut Frame, area: Rect) {
        let panel_block = Block::default()
            .title(" Patient History Search ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(230, 230, 250))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(140, 140, 200)))
            .style(Style::default().bg(Color::Rgb(22, 22, 35)));

        let inner = panel_block.inner(area);
        frame.render_widget(panel_block, area);

        let panel_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(inner);

        let input_style = if self.history_focus == HISTORY_INPUT {
            Style::default()
                .fg(Color::Rgb(250, 250, 110))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(200, 200, 220))
        };
        let input = Paragraph::new(format!("Name: {}_", self.history_query)).style(input_style);
        frame.render_widget(input, panel_layout[0]);

        match &self.history_results {
            None => {
                let hint = Paragraph::new(
                    "Type a patient name and press Enter | Tab: Switch focus | Esc: Close",
                )
                .style(Style::default().fg(Color::Rgb(140, 140, 170)));
                frame.render_widget(hint, panel_layout[1]);
            }
            Some(results) if results.is_empty() => {
                let empty = Paragraph::new("No records found.")
                    .style(Style::default().fg(Color::Rgb(180, 180, 200)));
                frame.render_widget(empty, panel_layout[1]);
            }
            Some(results) => {
                let history_specs = fields::history_fields();
                let header_cells = fields::header_labels(&history_specs)
                    .into_iter()
                    .map(|h| Cell::from(h).style(Style::default().fg(Color::Rgb(230, 230, 250))));
                let header = Row::new(header_cells)
                    .style(Style::default().bg(Color::Rgb(26, 26, 36)))
                    .height(1);

                let rows = results.iter().map(|record| {
                    Row::new(
                        fields::row_values(&history_specs, record)
                            .into_iter()
                            .map(Cell::from)
                            .collect::<Vec<_>>(),
                    )
                });

                let highlight_style = if self.history_focus == HISTORY_RESULTS {
                    Style::default()
                        .bg(Color::Rgb(40, 40, 65))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().bg(Color::Rgb(30, 30, 45))
                };

                let table = Table::new(
                    rows,
                    [
                        Constraint::Percentage(40),
                        Constraint::Percentage(30),
                        Constraint::Percentage(30),
                    ],
                )
                .header(header)
                .row_highlight_style(highlight_style)
                .highlight_symbol(if self.history_focus == HISTORY_RESULTS {
                    "► "
                } else {
                    "  "
                });

                frame.render_stateful_widget(
                    table,
                    panel_layout[1],
                    &mut self.history_state.clone(),
                );
            }
        }
    }
}
