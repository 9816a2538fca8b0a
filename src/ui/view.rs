//! Rendering engine snapshots.
//!
//! The engine knows nothing about output. A [`View`] receives a
//! [`Snapshot`] after each command (or line) and draws it.

use std::io::{self, Write};

use crate::calculator::Snapshot;

/// Something that can show the display and trail.
pub trait View {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    /// Show a message that is not engine output, e.g. an unknown key.
    fn notice(&mut self, message: &str) -> io::Result<()>;

    /// Called before waiting for the next line of input.
    fn prompt(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<V: View + ?Sized> View for Box<V> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        (**self).render(snapshot)
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        (**self).notice(message)
    }

    fn prompt(&mut self) -> io::Result<()> {
        (**self).prompt()
    }
}

/// Human-readable output: the trail, then `= <display>`.
pub struct TextView<W> {
    out: W,
    show_trail: bool,
    prompt: String,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W, show_trail: bool) -> Self {
        Self {
            out,
            show_trail,
            prompt: String::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for TextView<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.show_trail && !snapshot.trail.is_empty() {
            writeln!(self.out, "  {}", snapshot.trail)?;
        }
        writeln!(self.out, "{}", snapshot.result_line())?;
        self.out.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "? {}", message)?;
        self.out.flush()
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.prompt.is_empty() {
            return Ok(());
        }
        write!(self.out, "{}", self.prompt)?;
        self.out.flush()
    }
}

/// One JSON object per line, for scripting.
pub struct JsonView<W> {
    out: W,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for JsonView<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &serde_json::json!({ "notice": message }))?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
