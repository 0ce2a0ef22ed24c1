use std::collections::VecDeque;
use std::io;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step `(dx, dy)`; y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Decoded commands consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    /// No input was available, or the input had no meaning.
    Idle,
    Quit,
    Restart,
    Move(Direction),
}

/// Non-blocking source of raw input bytes.
pub trait ByteSource {
    /// Returns the next byte if one is available right now, without waiting.
    fn poll_byte(&mut self) -> io::Result<Option<u8>>;
}

/// In-memory byte feed, drained front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBytes {
    bytes: VecDeque<u8>,
}

impl ScriptedBytes {
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for ScriptedBytes {
    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}

/// Turns raw keyboard bytes into [`Command`]s, one command per call.
///
/// Arrow keys arrive as `ESC [ A..D`. The decoder never waits for the tail
/// of an escape sequence: if a follow-up byte is not already available the
/// partial sequence is dropped and the call yields [`Command::Idle`]. A byte
/// read after `ESC` that does not continue a sequence is kept for the next
/// call.
#[derive(Debug)]
pub struct InputDecoder<S> {
    source: S,
    held: Option<u8>,
}

impl<S: ByteSource> InputDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source, held: None }
    }

    /// Reads at most one command's worth of bytes from the source.
    pub fn next_command(&mut self) -> io::Result<Command> {
        let Some(byte) = self.next_byte()? else {
            return Ok(Command::Idle);
        };

        if byte == ESC {
            return self.decode_escape();
        }

        Ok(decode_byte(byte))
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// True when a byte is held back for the next call.
    #[must_use]
    pub fn has_held_byte(&self) -> bool {
        self.held.is_some()
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.held.take() {
            Some(byte) => Ok(Some(byte)),
            None => self.source.poll_byte(),
        }
    }

    fn decode_escape(&mut self) -> io::Result<Command> {
        match self.source.poll_byte()? {
            Some(b'[') => {}
            Some(other) => {
                self.held = Some(other);
                return Ok(Command::Idle);
            }
            None => return Ok(Command::Idle),
        }

        let command = match self.source.poll_byte()? {
            Some(b'A') => Command::Move(Direction::Up),
            Some(b'B') => Command::Move(Direction::Down),
            Some(b'C') => Command::Move(Direction::Right),
            Some(b'D') => Command::Move(Direction::Left),
            _ => Command::Idle,
        };
        Ok(command)
    }
}

fn decode_byte(byte: u8) -> Command {
    match byte {
        b'w' | b'W' => Command::Move(Direction::Up),
        b's' | b'S' => Command::Move(Direction::Down),
        b'a' | b'A' => Command::Move(Direction::Left),
        b'd' | b'D' => Command::Move(Direction::Right),
        b'q' | b'Q' | CTRL_C => Command::Quit,
        b'r' | b'R' => Command::Restart,
        _ => Command::Idle,
    }
}
