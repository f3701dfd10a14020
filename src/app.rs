//! The main application state and logic for MediView.
//!
//! Wires the dashboard menu to the two record viewer screens and owns the
//! event/render loop.

use crate::components::records::RecordsApp;
use crate::components::{dashboard::Dashboard, Component};
use crate::models::PatientType;
use crate::session::Session;
use crate::tui::{self, Tui};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// The views reachable from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedView {
    /// The single-type viewer for the session user's records.
    MyRecords(PatientType),
    /// The all-records viewer with filter toggles and history search.
    AllRecords,
    /// Back to the dashboard.
    None,
    /// Quit the application.
    Quit,
}

/// Top-level application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Dashboard,
    Running(SelectedView),
}

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    pub session: Session,
    pub dashboard: Dashboard,
    /// The records viewer, only present while a viewer is active.
    pub records: Option<RecordsApp>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let dashboard = Dashboard::new(session.username.clone());
        Self {
            state: AppState::Dashboard,
            should_quit: false,
            session,
            dashboard,
            records: None,
        }
    }

    /// Runs the main loop: draw, then handle one event, until quit.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.should_quit {
            tui.draw(|frame| self.render_ui(frame))?;
            self.handle_input(tui)?;
        }
        Ok(())
    }

    fn handle_input(&mut self, tui: &mut Tui) -> Result<()> {
        match tui.next_event()? {
            tui::Event::Input(event) => {
                // Global keybinding: Ctrl+Q to quit
                if let crossterm::event::Event::Key(KeyEvent {
                    code: KeyCode::Char('q'),
                    modifiers: crossterm::event::KeyModifiers::CONTROL,
                    ..
                }) = event
                {
                    self.should_quit = true;
                    return Ok(());
                }

                let key = match event {
                    crossterm::event::Event::Key(key) => key,
                    _ => return Ok(()),
                };

                match self.state {
                    AppState::Dashboard => {
                        if let Some(selected) = self.dashboard.handle_input(key)? {
                            match selected {
                                SelectedView::MyRecords(record_type) => {
                                    self.records =
                                        Some(RecordsApp::my_records(&self.session, record_type)?);
                                    self.state = AppState::Running(selected);
                                }
                                SelectedView::AllRecords => {
                                    self.records = Some(RecordsApp::all_records(&self.session)?);
                                    self.state = AppState::Running(selected);
                                }
                                SelectedView::Quit => {
                                    self.should_quit = true;
                                }
                                SelectedView::None => {}
                            }
                        }
                    }
                    AppState::Running(_) => {
                        if let Some(records) = &mut self.records {
                            if let Some(SelectedView::None) = records.handle_input(key)? {
                                // Back to the dashboard; drop the viewer.
                                self.state = AppState::Dashboard;
                                self.records = None;
                            }
                        } else {
                            self.state = AppState::Dashboard;
                        }
                    }
                }
            }
            tui::Event::Tick => {
                if let Some(records) = &mut self.records {
                    records.tick();
                }
            }
        }
        Ok(())
    }

    fn render_ui(&self, frame: &mut crate::tui::Frame<'_>) {
        match self.state {
            AppState::Dashboard => self.dashboard.render(frame),
            AppState::Running(_) => {
                if let Some(records) = &self.records {
                    records.render(frame);
                }
            }
        }
    }
}
