//! Command dispatch logic for quake-tracker

use super::{InitArgs, InteractiveArgs, ShowArgs, init_config, run_interactive, show_events};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "quake-tracker", author, version, long_about = None)]
#[command(about = "Live view of global earthquake activity from the USGS feeds")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: QuakeSubcommand,
}

#[derive(Subcommand, Debug)]
enum QuakeSubcommand {
    /// Show the earthquakes of one time window and write reports
    Show(Box<ShowArgs>),
    /// Answer a series of requests typed at the prompt, sharing one feed cache
    Interactive(InteractiveArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// Help and version requests are printed and return success. Any other failure is
/// written to the host's error stream before being returned.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(host.output(), "{e}");
            return Ok(());
        }
        Err(e) => {
            let _ = write!(host.error(), "{e}");
            return Err(ohno::app_err!("invalid command line"));
        }
    };

    let result = match &cli.command {
        QuakeSubcommand::Show(show_args) => show_events(host, show_args).await,
        QuakeSubcommand::Interactive(interactive_args) => run_interactive(host, interactive_args).await,
        QuakeSubcommand::Init(init_args) => init_config(host, init_args),
    };

    if let Err(e) = &result {
        let _ = writeln!(host.error(), "error: {e:#}");
    }

    result
}
