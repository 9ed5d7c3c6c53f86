use std::io::{self, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Char(char),
    /// Input is closed
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextField,
    PrevField,
    Select,
    Quit,
}

impl Command {
    ///
    /// Maps a key to a menu command; unmapped keys give `None`.
    ///
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Down | Key::Right | Key::Char('n') => Some(Command::NextField),
            Key::Up | Key::Left | Key::Char('p') => Some(Command::PrevField),
            Key::Enter | Key::Char('s') | Key::Char(' ') => Some(Command::Select),
            Key::Char('q') | Key::Eof => Some(Command::Quit),
            Key::Char(_) => None,
        }
    }
}

///
/// Source of key presses, polled in the style of `embedded-hal`:
/// `WouldBlock` means no key is ready yet.
///
pub trait KeySource {
    fn poll_key(&mut self) -> nb::Result<Key, io::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Esc,
    Bracket,
}

///
/// Decodes keys from a byte stream such as a terminal's standard input,
/// including the `ESC [ A..D` arrow key sequences. A carriage return is
/// the Enter key; line feeds are skipped so line-buffered input works.
///
pub struct ByteKeys<R> {
    reader: R,
    escape: Escape,
}

impl<R: Read> ByteKeys<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            escape: Escape::None,
        }
    }
}

impl<R: Read> KeySource for ByteKeys<R> {
    fn poll_key(&mut self) -> nb::Result<Key, io::Error> {
        let mut byte = [0u8; 1];
        let read = match self.reader.read(&mut byte) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Err(nb::Error::WouldBlock),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Err(nb::Error::WouldBlock),
            Err(e) => return Err(nb::Error::Other(e)),
        };
        if read == 0 {
            return Ok(Key::Eof);
        }

        let byte = byte[0];
        match (self.escape, byte) {
            (_, 0x1b) => {
                self.escape = Escape::Esc;
                Err(nb::Error::WouldBlock)
            }
            (Escape::Esc, b'[') => {
                self.escape = Escape::Bracket;
                Err(nb::Error::WouldBlock)
            }
            (Escape::Bracket, b'A'..=b'D') => {
                self.escape = Escape::None;
                Ok(match byte {
                    b'A' => Key::Up,
                    b'B' => Key::Down,
                    b'C' => Key::Right,
                    _ => Key::Left,
                })
            }
            (_, b'\r') => {
                self.escape = Escape::None;
                Ok(Key::Enter)
            }
            (_, b'\n') => {
                self.escape = Escape::None;
                Err(nb::Error::WouldBlock)
            }
            _ => {
                self.escape = Escape::None;
                Ok(Key::Char(byte as char))
            }
        }
    }
}
