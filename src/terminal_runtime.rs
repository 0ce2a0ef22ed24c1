use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};

use crate::input::ByteSource;
use crate::renderer::{BoardFrame, Display};

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                return Err(error);
            }
        };

        let mut session = Self { terminal };
        session.terminal.clear()?;
        Ok(session)
    }
}

impl Display for TerminalSession {
    fn present(&mut self, board: &BoardFrame) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            let lines: Vec<Line<'_>> = board
                .lines()
                .iter()
                .map(|line| Line::from(line.as_str()))
                .collect();

            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines), centered(area, board));
        })?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal; safe to call more than once.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

fn centered(area: Rect, board: &BoardFrame) -> Rect {
    let width = u16::try_from(board.width()).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(board.height()).unwrap_or(u16::MAX).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Keyboard input re-encoded as the raw byte protocol the decoder expects.
///
/// Arrow keys become `ESC [ A..D` and characters their UTF-8 bytes, queued so
/// one key press is always available as a whole to the decoder.
#[derive(Debug, Default)]
pub struct KeyboardBytes {
    pending: VecDeque<u8>,
}

impl ByteSource for KeyboardBytes {
    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        while self.pending.is_empty() && event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.pending.extend(key_bytes(key));
            }
        }

        Ok(self.pending.pop_front())
    }
}

fn key_bytes(key: KeyEvent) -> Vec<u8> {
    if key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => vec![0x03],
        KeyCode::Char(ch) => {
            let mut buf = [0; 4];
            ch.encode_utf8(&mut buf).as_bytes().to_vec()
        }
        KeyCode::Up => b"\x1b[A".to_vec(),
        KeyCode::Down => b"\x1b[B".to_vec(),
        KeyCode::Right => b"\x1b[C".to_vec(),
        KeyCode::Left => b"\x1b[D".to_vec(),
        KeyCode::Esc => vec![0x1b],
        _ => Vec::new(),
    }
}
