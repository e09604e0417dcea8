use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use gauge_core::AppViewModel;

use super::render::{render, LineStyle};

/// Raw-mode alternate screen; the previous terminal state is restored on drop.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut terminal = Self { out: io::stdout() };
        execute!(terminal.out, EnterAlternateScreen, EnableBracketedPaste, Hide)?;
        Ok(terminal)
    }

    pub fn draw(&mut self, view: &AppViewModel) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in render(view, width, height).iter().enumerate() {
            let Ok(row) = u16::try_from(row) else { break };
            if row >= height {
                break;
            }
            let text: String = line.text.chars().take(usize::from(width)).collect();
            queue!(self.out, MoveTo(0, row))?;
            match line.style {
                LineStyle::Title => queue!(self.out, SetAttribute(Attribute::Bold))?,
                LineStyle::Normal => {}
                LineStyle::Dim => queue!(self.out, SetForegroundColor(Color::DarkGrey))?,
                LineStyle::Accent => queue!(self.out, SetForegroundColor(Color::Blue))?,
                LineStyle::Warning => queue!(self.out, SetForegroundColor(Color::Yellow))?,
                LineStyle::Error => queue!(self.out, SetForegroundColor(Color::Red))?,
            }
            queue!(
                self.out,
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, DisableBracketedPaste, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
