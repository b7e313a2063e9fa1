use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::feed::TimeWindow;
use crate::pipeline::{MinMagnitude, Request};
use clap::Parser;
use ohno::{IntoAppError, app_err};
use std::io::Write;

const PROMPT: &str = "quake> ";

const USAGE: &str = "Enter '<period> [min-mag]' (period is day, week, or month; min-mag is 0.0 to 8.0), or 'quit' to leave.";

#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Show(Request),
    Help,
    Quit,
    Nothing,
}

fn parse_line(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();

    let Some(first) = words.next() else {
        return Ok(Command::Nothing);
    };

    match first.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(Command::Quit),
        "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    let window: TimeWindow = first.parse()?;
    let min_magnitude = match words.next() {
        Some(word) => word.parse::<MinMagnitude>()?,
        None => MinMagnitude::default(),
    };

    if let Some(extra) = words.next() {
        return Err(app_err!("unexpected input '{extra}'"));
    }

    Ok(Command::Show(Request { window, min_magnitude }))
}

pub async fn run_interactive<H: Host>(host: &mut H, args: &InteractiveArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let _ = writeln!(common.host.output(), "{USAGE}");

    loop {
        let _ = write!(common.host.output(), "{PROMPT}");
        let _ = common.host.output().flush();

        let mut line = String::new();
        let read = common.host.read_line(&mut line).into_app_err("reading input")?;
        if read == 0 {
            let _ = writeln!(common.host.output());
            return Ok(());
        }

        match parse_line(&line) {
            Ok(Command::Show(request)) => match common.render(request).await {
                Ok(outcome) => common.print_console(&request, &outcome)?,
                Err(e) => {
                    let _ = writeln!(common.host.error(), "error: {e:#}");
                }
            },
            Ok(Command::Help) => {
                let _ = writeln!(common.host.output(), "{USAGE}");
            }
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Nothing) => {}
            Err(e) => {
                let _ = writeln!(common.host.error(), "error: {e:#}");
                let _ = writeln!(common.host.error(), "{USAGE}");
            }
        }
    }
}
