use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use scicalc::config::{Config, OutputFormat};
use scicalc::ui::{Shell, make_view};

/// Scientific calculator driven by keypad labels
#[derive(Parser, Debug)]
#[command(name = "scicalc", version, about, long_about = None)]
struct Cli {
    /// Key labels applied as a single line, e.g. `2 x^y 10 =`.
    /// Without them, lines are read from stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Config file (default: <config dir>/scicalc/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Render after every command instead of after every line
    #[arg(long)]
    each: bool,

    /// Hide the expression trail in text output
    #[arg(long)]
    no_trail: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.no_trail {
        config.output.show_trail = false;
    }

    init_logging(&config.logging.level);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let interactive = cli.keys.is_empty() && io::stdin().is_terminal();
    let prompt = if interactive {
        config.output.prompt.as_str()
    } else {
        ""
    };
    debug!(?config, interactive, "starting shell");

    let view = make_view(&config.output, prompt, io::stdout().lock());
    let mut shell = Shell::new(view, cli.each);

    if cli.keys.is_empty() {
        shell.run(io::stdin().lock())?;
    } else {
        shell.run_line(&cli.keys.join(" "))?;
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scicalc={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
