//! Move cue playback
//!
//! The game emits one cue per tick in which the snake moved. A terminal has no
//! mixer, so the audible cue is the bell character.

use std::io::Write;

use anyhow::{Context, Result};

pub trait MoveCue {
    fn play(&mut self) -> Result<()>;
}

/// Rings the terminal bell on the wrapped writer
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MoveCue for TerminalBell<W> {
    fn play(&mut self) -> Result<()> {
        self.out.write_all(b"\x07").context("Failed to ring bell")?;
        self.out.flush().context("Failed to flush bell")
    }
}

pub struct Silent;

impl MoveCue for Silent {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Pick the cue sink for the configured sound setting
pub fn move_cue(sound: bool) -> Box<dyn MoveCue> {
    if sound {
        Box::new(TerminalBell::new(std::io::stderr()))
    } else {
        Box::new(Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_writes_bel() {
        let mut buffer = Vec::new();
        {
            let mut bell = TerminalBell::new(&mut buffer);
            bell.play().unwrap();
            bell.play().unwrap();
        }
        assert_eq!(buffer, b"\x07\x07");
    }

    #[test]
    fn test_silent() {
        assert!(Silent.play().is_ok());
    }
}
