pub mod shell;
pub mod view;

pub use shell::Shell;
pub use view::{JsonView, TextView, View};

use std::io::Write;

use crate::config::{OutputConfig, OutputFormat};

/// Build the view selected by the output configuration.
pub fn make_view<'a, W: Write + 'a>(
    output: &OutputConfig,
    prompt: &str,
    out: W,
) -> Box<dyn View + 'a> {
    match output.format {
        OutputFormat::Text => {
            Box::new(TextView::new(out, output.show_trail).with_prompt(prompt))
        }
        OutputFormat::Json => Box::new(JsonView::new(out)),
    }
}
