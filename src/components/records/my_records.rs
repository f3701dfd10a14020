//! Single-type record viewer: the session user's guest or employee records.

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

/// Pending delete action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmAction {
    DeleteOne(u64),
    DeleteAll,
}

/// Lists one record type owned by the logged-in user, with delete, print,
/// CSV export, and stats export.
pub struct MyRecords {
    store: RecordStore,
    username: String,
    record_type: PatientType,
    records: Vec<PatientRecord>,
    table_state: TableState,
    confirm: Option<ConfirmAction>,
    confirm_selected: usize, // 0 for Yes, 1 for No
    pub(crate) notices: Notices,
}

impl MyRecords {
    pub fn new(username: String, record_type: PatientType) -> Result<Self> {
        let mut viewer = Self {
            store: RecordStore::open_default(),
            username,
            record_type,
            records: Vec::new(),
            table_state: TableState::default(),
            confirm: None,
            confirm_selected: 1,
            notices: Notices::default(),
        };
        viewer.refresh()?;
        Ok(viewer)
    }

    fn title(&self) -> String {
        format!("View My {} Records", self.record_type.label())
    }

    /// Records in this viewer's scope: fixed type, owned by the session user.
    fn scope(&self) -> RecordFilter {
        RecordFilter::all()
            .of_type(self.record_type)
            .saved_by(self.username.clone())
    }

    /// Re-reads the store; the list is never cached across actions.
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

    fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= self.records.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.records.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn selected_record(&self) -> Option<&PatientRecord> {
        self.table_state.selected().and_then(|i| self.records.get(i))
    }

    fn field_specs(&self) -> Vec<FieldSpec> {
        fields::my_record_fields(self.record_type)
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
            ConfirmAction::DeleteAll => {
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
        let file_name = export::records_file_name(self.record_type, &self.username);
        export::export_records(&self.field_specs(), &records, Path::new(&file_name))?;
        self.notices.set_success(format!("Exported to {}", file_name));
        Ok(())
    }

    fn export_stats(&mut self) -> Result<()> {
        let records = self.store.list(&self.scope())?;
        if records.is_empty() {
            self.notices.set_error("No records to generate stats from.");
            return Ok(());
        }
        let file_name = export::stats_file_name(self.record_type, &self.username);
        export::export_stats(&records, Path::new(&file_name))?;
        self.notices.set_success(format!("Stats written to {}", file_name));
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        let records = self.store.list(&self.scope())?;
        if records.is_empty() {
            self.notices.set_error("No records to print.");
            return Ok(());
        }
        report::print_table(
            &self.title(),
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

impl Component for MyRecords {
    fn handle_input(&mut self, key: KeyEvent) -> Result<Option<SelectedView>> {
        if self.confirm.is_some() {
            self.handle_confirm_input(key)?;
            return Ok(None);
        }

        match key.code {
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
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
                self.confirm = Some(ConfirmAction::DeleteAll);
                self.confirm_selected = 1;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.print()?,
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_csv()?,
            KeyCode::Char('s') | KeyCode::Char('S') => self.export_stats()?,
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

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Table
                Constraint::Length(2), // Help text
                Constraint::Length(1), // Message area
            ])
            .margin(1)
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Rgb(75, 75, 120)))
            .style(Style::default().bg(Color::Rgb(16, 16, 28)));
        frame.render_widget(header_block, layout[0]);

        let title = Paragraph::new(self.title())
            .style(
                Style::default()
                    .fg(Color::Rgb(230, 230, 250))
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::Rgb(16, 16, 28)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(title, layout[0]);

        let field_specs = self.field_specs();
        let header_cells = fields::header_labels(&field_specs)
            .into_iter()
            .chain(std::iter::once("Timestamp"))
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Rgb(230, 230, 250))));
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Rgb(26, 26, 36)))
            .height(1)
            .bottom_margin(1);

        let rows = self.records.iter().map(|record| {
            let cells: Vec<Cell> = fields::row_values(&field_specs, record)
                .into_iter()
                .chain(std::iter::once(record.timestamp.clone()))
                .map(Cell::from)
                .collect();
            Row::new(cells).height(1)
        });

        let column_count = field_specs.len() + 1;
        let widths =
            vec![Constraint::Ratio(1, column_count as u32); column_count];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" {} Records ", self.record_type.label()))
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

        frame.render_stateful_widget(table, layout[1], &mut self.table_state.clone());

        let help_text = Paragraph::new(
            "↑↓: Navigate | D: Delete | A: Delete All | P: Print | E: Export CSV | S: Stats CSV | R: Refresh | Esc: Back",
        )
        .style(Style::default().fg(Color::Rgb(140, 140, 170)))
        .alignment(Alignment::Center);
        frame.render_widget(help_text, layout[2]);

        render_notices(&self.notices, frame, layout[3]);

        if let Some(action) = self.confirm {
            let (title, message) = match action {
                ConfirmAction::DeleteOne(_) => (
                    "Delete Record".to_string(),
                    "Are you sure you want to delete this record?".to_string(),
                ),
                ConfirmAction::DeleteAll => (
                    format!("Delete All {} Records", self.record_type.label()),
                    format!(
                        "Delete ALL your {} records? This action cannot be undone.",
                        self.record_type.as_str()
                    ),
                ),
            };
            render_confirm_dialog(frame, &title, &message, self.confirm_selected);
        }
    }
}
