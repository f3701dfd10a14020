//! Terminal plumbing: raw mode, alternate screen, and event polling.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

/// Input polling timeout; a quiet interval becomes a `Tick`.
const TICK_RATE: Duration = Duration::from_millis(33);

/// Smallest terminal the viewer tables fit into.
const MIN_SIZE: (u16, u16) = (100, 30);

#[derive(Debug, Clone)]
pub enum Event {
    Input(event::Event),
    Tick,
}

pub type Frame<'a> = ratatui::Frame<'a>;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    pub fn new(terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Self {
        Self { terminal }
    }

    pub fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;

        let (width, height) = MIN_SIZE;
        let (current_width, current_height) = terminal::size()?;
        if current_width < width || current_height < height {
            io::stdout().execute(terminal::SetSize(width, height))?;
        }
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.terminal.show_cursor()?;
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Blocks for at most one tick; returns the next input event or a tick.
    pub fn next_event(&self) -> Result<Event> {
        if event::poll(TICK_RATE)? {
            return Ok(Event::Input(event::read()?));
        }
        Ok(Event::Tick)
    }
}
