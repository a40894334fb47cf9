//! Decoding of raw input bytes into prompt keys.
//!
//! Raw mode turns off terminal signals, so Ctrl-C and Ctrl-D reach the
//! prompt as plain bytes. They end the prompt with nothing selected, the same
//! as closed input, instead of being ignored like other unbound bytes.

use std::io::{self, ErrorKind, Read};

const ESCAPE: u8 = 0x1b;
/// Ctrl-C; raw mode delivers it as a byte instead of a signal
const END_OF_TEXT: u8 = 0x03;
/// Ctrl-D
const END_OF_TRANSMISSION: u8 = 0x04;

/// A keystroke the choice prompt reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Up,
    Down,
    Space,
    /// Ctrl-C or Ctrl-D, handled like the input closing
    Interrupt,
    Other(u8),
}

/// Reads the next key, one byte at a time.
///
/// Returns `None` once the input is closed, including in the middle of an
/// escape sequence.
///
/// # Errors
///
/// Returns any read error other than [`ErrorKind::Interrupted`].
pub fn read_key(input: &mut impl Read) -> io::Result<Option<Key>> {
    let Some(byte) = read_byte(input)? else {
        return Ok(None);
    };

    let key = match byte {
        b'\n' | b'\r' => Key::Enter,
        b' ' => Key::Space,
        END_OF_TEXT | END_OF_TRANSMISSION => Key::Interrupt,
        ESCAPE => {
            // ESC is followed by two bytes, e.g. `[A`; only the second matters
            if read_byte(input)?.is_none() {
                return Ok(None);
            }
            match read_byte(input)? {
                None => return Ok(None),
                Some(b'A') => Key::Up,
                Some(_) => Key::Down,
            }
        }
        other => Key::Other(other),
    };

    Ok(Some(key))
}

fn read_byte(input: &mut impl Read) -> io::Result<Option<u8>> {
    let mut buffer = [0u8; 1];
    loop {
        match input.read(&mut buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
