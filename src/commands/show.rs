use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::feed::TimeWindow;
use crate::pipeline::{EventTable, MinMagnitude, Outcome, Request, parse_min_magnitude};
use crate::reports::{generate_csv, generate_deck, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::fs;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Time window of the feed to show
    #[arg(long, short = 'p', value_name = "PERIOD", default_value = "week")]
    pub period: TimeWindow,

    /// Only show events of at least this magnitude (0.0 to 8.0, in steps of 0.1)
    #[arg(long, short = 'm', value_name = "MAG", default_value = "3.0", value_parser = parse_min_magnitude)]
    pub min_mag: MinMagnitude,

    /// Output events to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output events to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output a deck.gl scatterplot layer descriptor to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub deck: Option<Utf8PathBuf>,

    /// Output events to the console. Implied when no file report is requested.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ShowArgs {
    const fn generating_reports(&self) -> bool {
        self.csv.is_some() || self.json.is_some() || self.deck.is_some()
    }
}

pub async fn show_events<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    let request = Request {
        window: args.period,
        min_magnitude: args.min_mag,
    };

    let mut common = Common::new(host, &args.common)?;
    let outcome = common.render(request).await?;

    match &outcome {
        Outcome::Events(table) => {
            if args.console || !args.generating_reports() {
                common.print_console(&request, &outcome)?;
            }
            write_reports(args, table, &request)
        }
        Outcome::NoData(reason) => {
            common.print_no_data(&request, *reason);
            Ok(())
        }
    }
}

fn write_reports(args: &ShowArgs, table: &EventTable, request: &Request) -> Result<()> {
    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(table, &mut csv_output)?;
        write_report(filename, &csv_output)?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(table, request, &mut json_output)?;
        write_report(filename, &json_output)?;
    }

    if let Some(filename) = &args.deck {
        let mut deck_output = String::new();
        generate_deck(table, request, &mut deck_output)?;
        write_report(filename, &deck_output)?;
    }

    Ok(())
}

fn write_report(filename: &Utf8Path, contents: &str) -> Result<()> {
    fs::write(filename, contents).into_app_err_with(|| format!("writing report to '{filename}'"))
}
