//! Record viewer screens.
//!
//! Two independent viewers share the record store: the single-type viewer
//! for the session user's guest or employee records, and the all-records
//! viewer with filter toggles and history search.

use crate::app::SelectedView;
use crate::components::Component;
use crate::models::PatientType;
use crate::session::Session;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

pub mod all_records;
pub mod my_records;

use all_records::AllRecords;
use my_records::MyRecords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsState {
    MyRecords,
    AllRecords,
}

/// Dispatches to whichever viewer is active.
pub struct RecordsApp {
    pub state: RecordsState,
    pub my_records: Option<MyRecords>,
    pub all_records: Option<AllRecords>,
}

impl RecordsApp {
    /// Opens the single-type viewer for the session user.
    pub fn my_records(session: &Session, record_type: PatientType) -> Result<Self> {
        Ok(Self {
            state: RecordsState::MyRecords,
            my_records: Some(MyRecords::new(session.username.clone(), record_type)?),
            all_records: None,
        })
    }

    /// Opens the all-records viewer.
    pub fn all_records(_session: &Session) -> Result<Self> {
        Ok(Self {
            state: RecordsState::AllRecords,
            my_records: None,
            all_records: Some(AllRecords::new()?),
        })
    }

    /// Periodic update hook; expires timed messages.
    pub fn tick(&mut self) {
        if let Some(my_records) = &mut self.my_records {
            my_records.notices.tick();
        }
        if let Some(all_records) = &mut self.all_records {
            all_records.notices.tick();
        }
    }
}

impl Component for RecordsApp {
    fn handle_input(&mut self, event: KeyEvent) -> Result<Option<SelectedView>> {
        match self.state {
            RecordsState::MyRecords => {
                if let Some(my_records) = &mut self.my_records {
                    return my_records.handle_input(event);
                }
            }
            RecordsState::AllRecords => {
                if let Some(all_records) = &mut self.all_records {
                    return all_records.handle_input(event);
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame) {
        match self.state {
            RecordsState::MyRecords => {
                if let Some(my_records) = &self.my_records {
                    my_records.render(frame);
                }
            }
            RecordsState::AllRecords => {
                if let Some(all_records) = &self.all_records {
                    all_records.render(frame);
                }
            }
        }
    }
}

/// Timed error/success messages, cleared after five seconds.
#[derive(Default)]
pub struct Notices {
    error: Option<String>,
    success: Option<String>,
    error_timer: Option<Instant>,
    success_timer: Option<Instant>,
}

impl Notices {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.error_timer = Some(Instant::now());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.success_timer = Some(Instant::now());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn tick(&mut self) {
        if let Some(timer) = self.error_timer {
            if timer.elapsed() > Duration::from_secs(5) {
                self.error = None;
                self.error_timer = None;
            }
        }
        if let Some(timer) = self.success_timer {
            if timer.elapsed() > Duration::from_secs(5) {
                self.success = None;
                self.success_timer = None;
            }
        }
    }
}

/// Renders a timed message into `area`, success taking precedence.
pub(crate) fn render_notices(notices: &Notices, frame: &mut Frame, area: Rect) {
    if let Some(success) = notices.success() {
        let paragraph = Paragraph::new(success)
            .style(
                Style::default()
                    .fg(Color::Rgb(140, 219, 140))
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    } else if let Some(error) = notices.error() {
        let paragraph = Paragraph::new(error)
            .style(
                Style::default()
                    .fg(Color::Rgb(240, 100, 100))
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

/// Centered Yes/No confirmation dialog shared by the delete actions.
pub(crate) fn render_confirm_dialog(
    frame: &mut Frame,
    title: &str,
    message: &str,
    selected: usize,
) {
    let area = frame.area();
    let dialog_width = 54;
    let dialog_height = 8;
    let dialog_area = Rect::new(
        (area.width.saturating_sub(dialog_width)) / 2,
        (area.height.saturating_sub(dialog_height)) / 2,
        dialog_width,
        dialog_height,
    );

    frame.render_widget(Clear, dialog_area);

    let dialog_block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Rgb(230, 230, 250))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(140, 140, 200)))
        .style(Style::default().bg(Color::Rgb(30, 30, 46)));

    frame.render_widget(dialog_block.clone(), dialog_area);

    let inner_area = dialog_block.inner(dialog_area);
    let content_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(inner_area);

    let message = Paragraph::new(message)
        .style(Style::default().fg(Color::Rgb(220, 220, 240)))
        .add_modifier(Modifier::BOLD)
        .alignment(Alignment::Center);
    frame.render_widget(message, content_layout[0]);

    let buttons_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content_layout[1]);

    let yes_style = if selected == 0 {
        Style::default()
            .fg(Color::Rgb(140, 219, 140))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(180, 180, 200))
    };
    let no_style = if selected == 1 {
        Style::default()
            .fg(Color::Rgb(255, 100, 100))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(180, 180, 200))
    };

    let yes_text = if selected == 0 { "► Yes ◄" } else { "  Yes  " };
    let no_text = if selected == 1 { "► No ◄" } else { "  No  " };

    frame.render_widget(
        Paragraph::new(yes_text)
            .style(yes_style)
            .alignment(Alignment::Center),
        buttons_layout[0],
    );
    frame.render_widget(
        Paragraph::new(no_text)
            .style(no_style)
            .alignment(Alignment::Center),
        buttons_layout[1],
    );
}
