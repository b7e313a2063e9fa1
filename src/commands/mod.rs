//! Command-line interface and orchestration for quake-tracker
//!
//! This module implements the CLI commands and wires the feed client, cache,
//! pipeline, and report generators together. It handles argument parsing,
//! configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **show**: Render one request (time window and minimum magnitude) to the
//!   console and/or to CSV, JSON, and deck.gl report files
//! - **interactive**: Read requests line by line from the host's input and render
//!   each to the console. The pipeline, and therefore its feed cache, lives for the
//!   whole session
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The `common` module sets up logging,
//! loads the configuration, and builds the [`Pipeline`](crate::pipeline::Pipeline)
//! that the show and interactive commands drive.
//!
//! All terminal I/O goes through the [`Host`] trait so commands can be exercised
//! in tests with in-memory buffers.

mod common;
mod config;
mod host;
mod init;
mod interactive;
mod run;
mod show;

pub use common::{ColorMode, CommonArgs, LogLevel};
pub use config::{Config, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use interactive::{InteractiveArgs, run_interactive};
pub use run::run;
pub use show::{ShowArgs, show_events};
