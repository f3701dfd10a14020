//! Dashboard menu: entry point to the two record viewers.

use crate::app::SelectedView;
use crate::components::Component;
use crate::models::PatientType;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Padding, Paragraph},
};

const MENU: [&str; 3] = [
    "View My Guest Records",
    "View My Employee Records",
    "View All Patient Records",
];

pub struct Dashboard {
    username: String,
    selected_index: usize,
    show_quit_dialog: bool,
    quit_dialog_selected: usize, // 0 for Yes, 1 for No
}

impl Dashboard {
    pub fn new(username: String) -> Self {
        Self {
            username,
            selected_index: 0,
            show_quit_dialog: false,
            quit_dialog_selected: 1,
        }
    }

    fn handle_quit_dialog_input(&mut self, key: KeyEvent) -> Result<Option<SelectedView>> {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                self.quit_dialog_selected = 1 - self.quit_dialog_selected;
            }
            KeyCode::Enter => {
                self.show_quit_dialog = false;
                if self.quit_dialog_selected == 0 {
                    return Ok(Some(SelectedView::Quit));
                }
            }
            KeyCode::Esc => {
                self.show_quit_dialog = false;
            }
            _ => {}
        }
        Ok(None)
    }
}

impl Component for Dashboard {
    fn handle_input(&mut self, key: KeyEvent) -> Result<Option<SelectedView>> {
        if self.show_quit_dialog {
            return self.handle_quit_dialog_input(key);
        }

        match key.code {
            KeyCode::Up => {
                self.selected_index = if self.selected_index == 0 {
                    MENU.len() - 1
                } else {
                    self.selected_index - 1
                };
            }
            KeyCode::Down => {
                self.selected_index = (self.selected_index + 1) % MENU.len();
            }
            KeyCode::Enter => {
                return Ok(Some(match self.selected_index {
                    0 => SelectedView::MyRecords(PatientType::Guest),
                    1 => SelectedView::MyRecords(PatientType::Employee),
                    _ => SelectedView::AllRecords,
                }));
            }
            KeyCode::Esc => {
                self.show_quit_dialog = true;
                self.quit_dialog_selected = 1;
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

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let welcome_text = Line::from(vec![
            Span::styled(
                "Welcome to MediView, ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.username.as_str(),
                Style::default()
                    .fg(Color::Rgb(129, 199, 245))
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let welcome_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(75, 75, 120)))
            .style(Style::default().bg(Color::Rgb(24, 24, 40)));

        let welcome_inner = welcome_block.inner(main_layout[0]);
        frame.render_widget(welcome_block, main_layout[0]);

        let welcome_paragraph = Paragraph::new(welcome_text)
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
        frame.render_widget(welcome_paragraph, welcome_inner);

        let instruction = Paragraph::new("Please select a view:")
            .style(Style::default().fg(Color::Rgb(180, 190, 254)))
            .alignment(Alignment::Center);
        frame.render_widget(instruction, main_layout[1]);

        let menu_block = Block::default()
            .title(" Patient Records ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(230, 230, 250))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(140, 140, 200)))
            .style(Style::default().bg(Color::Rgb(22, 22, 35)));

        let menu_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(main_layout[2])[1];

        frame.render_widget(menu_block.clone(), menu_area);
        let menu_inner = menu_block.inner(menu_area);

        let items: Vec<ListItem> = MENU
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let style = if idx == self.selected_index {
                    Style::default()
                        .fg(Color::Rgb(250, 250, 110))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Rgb(200, 200, 220))
                };
                let prefix = if idx == self.selected_index {
                    " ► "
                } else {
                    "   "
                };
                ListItem::new(format!("{}{}", prefix, option)).style(style)
            })
            .collect();

        let menu_list = List::new(items)
            .block(Block::default().padding(Padding::new(2, 0, 1, 0)))
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(40, 40, 65))
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(menu_list, menu_inner);

        let help_paragraph = Paragraph::new("↑↓: Navigate | Enter: Select | Esc: Quit")
            .style(Style::default().fg(Color::Rgb(140, 140, 170)))
            .alignment(Alignment::Center);
        frame.render_widget(help_paragraph, main_layout[3]);

        if self.show_quit_dialog {
            self.render_quit_dialog(frame, area);
        }
    }
}

impl Dashboard {
    fn render_quit_dialog(&self, frame: &mut Frame, area: Rect) {
        let dialog_width = 40;
        let dialog_height = 8;

        let dialog_area = Rect::new(
            (area.width.saturating_sub(dialog_width)) / 2,
            (area.height.saturating_sub(dialog_height)) / 2,
            dialog_width,
            dialog_height,
        );

        frame.render_widget(Clear, dialog_area);

        let dialog_block = Block::default()
            .title(" Confirm Quit ")
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

        let message = Paragraph::new("Are you sure you want to quit?")
            .style(Style::default().fg(Color::Rgb(220, 220, 240)))
            .add_modifier(Modifier::BOLD)
            .alignment(Alignment::Center);
        frame.render_widget(message, content_layout[0]);

        let buttons_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(content_layout[1]);

        let yes_style = if self.quit_dialog_selected == 0 {
            Style::default()
                .fg(Color::Rgb(140, 219, 140))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(180, 180, 200))
        };
        let no_style = if self.quit_dialog_selected == 1 {
            Style::default()
                .fg(Color::Rgb(255, 100, 100))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(180, 180, 200))
        };

        let yes_text = if self.quit_dialog_selected == 0 {
            "► Yes ◄"
        } else {
            "  Yes  "
        };
        let no_text = if self.quit_dialog_selected == 1 {
            "► No ◄"
        } else {
            "  No  "
        };

        let yes_button = Paragraph::new(yes_text)
            .style(yes_style)
            .alignment(Alignment::Center);
        let no_button = Paragraph::new(no_text)
            .style(no_style)
            .alignment(Alignment::Center);

        frame.render_widget(yes_button, buttons_layout[0]);
        frame.render_widget(no_button, buttons_layout[1]);
    }
}
