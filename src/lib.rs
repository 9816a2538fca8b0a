//! Scientific calculator engine.
//!
//! [`calculator::Engine`] takes keypad [`calculator::Command`]s one at a
//! time and exposes two strings: the display value and the expression
//! trail. The [`ui`] module drives it headlessly from typed key labels.

pub mod calculator;
pub mod config;
pub mod ui;
