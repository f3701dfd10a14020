use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod dashboard;
pub mod records;

pub trait Component {
    fn handle_input(&mut self, event: KeyEvent) -> Result<Option<crate::app::SelectedView>>;
    fn render(&self, frame: &mut Frame);
}
