#![deny(unsafe_code)]
//! Windowed binary for the quadblur demos.
//!
//! Subcommands:
//! - `single` — two overlapping colored quads drawn straight at the window
//! - `blur` — the same scene rendered offscreen, then box-blurred onto
//!   the window through a second pass
//!
//! Both run until the escape key is pressed or the window is closed.

mod error;
mod window;

use clap::{Parser, Subcommand};
use std::process;
use window::Variant;

#[derive(Parser)]
#[command(name = "quadblur", about = "Two overlapping quads, optionally blurred through an offscreen pass")]
struct Cli {
    /// Log filter, e.g. "info" or "quadblur_core=debug". Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Draw the two colored quads directly to the window.
    Single,
    /// Render the quads offscreen, then blur them onto the window.
    Blur,
}

impl Command {
    fn variant(self) -> Variant {
        match self {
            Command::Single => Variant::SinglePass,
            Command::Blur => Variant::TwoPass,
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    match filter {
        Some(f) => {
            builder.parse_filters(f);
        }
        None => {
            builder.parse_default_env();
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    if let Err(e) = window::run(cli.command.variant()) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn single_subcommand_selects_the_single_pass_variant() {
        let cli = Cli::try_parse_from(["quadblur", "single"]).unwrap();
        assert_eq!(cli.command.variant(), Variant::SinglePass);
    }

    #[test]
    fn blur_subcommand_selects_the_two_pass_variant() {
        let cli = Cli::try_parse_from(["quadblur", "blur"]).unwrap();
        assert_eq!(cli.command.variant(), Variant::TwoPass);
    }

    #[test]
    fn log_filter_is_optional() {
        let cli = Cli::try_parse_from(["quadblur", "--log", "debug", "blur"]).unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));

        let cli = Cli::try_parse_from(["quadblur", "single"]).unwrap();
        assert!(cli.log.is_none());
    }

    #[test]
    fn missing_subcommand_is_a_parse_error() {
        assert!(Cli::try_parse_from(["quadblur"]).is_err());
    }
}
