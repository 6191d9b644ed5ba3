mod screens;

use std::io;

use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use termduel::{MatchState, MenuOption, Renderer};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    restored: bool,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Arena size for a new match: the whole terminal.
    pub fn arena_size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn draw_menu(&mut self, selected: MenuOption) -> io::Result<()> {
        self.terminal
            .draw(|frame| screens::render_menu(frame, selected))?;
        Ok(())
    }

    pub fn draw_waiting(&mut self, title: &str, lines: &[String]) -> io::Result<()> {
        self.terminal
            .draw(|frame| screens::render_waiting(frame, title, lines))?;
        Ok(())
    }

    pub fn draw_address_prompt(&mut self, input: &str) -> io::Result<()> {
        self.terminal
            .draw(|frame| screens::render_address_prompt(frame, input))?;
        Ok(())
    }

    pub fn draw_end(&mut self, state: Option<&MatchState>, message: &str) -> io::Result<()> {
        self.terminal
            .draw(|frame| screens::render_end(frame, state, message))?;
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl Renderer for Tui {
    fn render(&mut self, state: &MatchState) -> io::Result<()> {
        self.terminal
            .draw(|frame| screens::render_match(frame, state))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
