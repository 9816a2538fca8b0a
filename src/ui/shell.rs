//! Line-oriented keypad shell.
//!
//! Each input line is a sequence of key labels. The shell applies them to
//! its [`Engine`] and re-renders through a [`View`].

use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::debug;

use crate::calculator::{Engine, parse_keys};

use super::view::View;

/// Drives an [`Engine`] from lines of key labels and renders through a [`View`].
pub struct Shell<V> {
    engine: Engine,
    view: V,
    render_each: bool,
}

impl<V: View> Shell<V> {
    /// With `render_each`, the view is redrawn after every command instead
    /// of once per line.
    pub fn new(view: V, render_each: bool) -> Self {
        Self {
            engine: Engine::new(),
            view,
            render_each,
        }
    }

    /// The engine being driven.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Give back the view, e.g. to inspect what was written.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Apply one line of key labels.
    ///
    /// Returns `false` when the line asks the shell to stop. A line with
    /// an unknown label is reported and otherwise ignored.
    pub fn run_line(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            return Ok(false);
        }
        if line.is_empty() {
            return Ok(true);
        }

        let commands = match parse_keys(line) {
            Ok(commands) => commands,
            Err(err) => {
                debug!(%err, line, "rejected input line");
                self.view.notice(&err.to_string())?;
                return Ok(true);
            }
        };

        if self.render_each {
            for command in commands {
                self.engine.apply(command);
                self.view.render(&self.engine.snapshot())?;
            }
        } else {
            self.engine.apply_all(commands);
            self.view.render(&self.engine.snapshot())?;
        }

        Ok(true)
    }

    /// Read lines until EOF or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.view.prompt()?;
        for line in input.lines() {
            let line = line.context("failed to read input line")?;
            if !self.run_line(&line)? {
                break;
            }
            self.view.prompt()?;
        }
        Ok(())
    }
}
