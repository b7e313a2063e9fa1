//! A tool to watch recent global earthquake activity from the USGS feeds.
//!
//! # Quick Start
//!
//! Show this week's earthquakes of magnitude 3.0 and above:
//!
//! ```bash
//! quake-tracker show
//! ```
//!
//! Export today's events of magnitude 4.5 and above for a web globe:
//!
//! ```bash
//! quake-tracker show --period day --min-mag 4.5 --deck quakes.json
//! ```
//!
//! Explore several windows without re-downloading the feeds:
//!
//! ```bash
//! quake-tracker interactive
//! quake> week 5.0
//! quake> day 2.5
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use quake_tracker::{Host, run};
use std::io::{BufRead, Write};
use std::io::{stderr, stdin, stdout};

/// Default host that talks to the real terminal.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        stdin().lock().read_line(buf)
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main(flavor = "current_thread")]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() {
    let mut host = RealHost;
    if run(&mut host, std::env::args()).await.is_err() {
        host.exit(1);
    }
}
