//! quake-tracker crate
//!
//! This crate is an implementation detail of the `quake-tracker` tool. It fetches the USGS
//! earthquake summary feeds, flattens them into a table of events, derives per-event visual
//! encodings and hands the filtered table to the report generators.
//!
//! # Module Organization
//!
//! - [`feed`]: Remote feed retrieval, shape validation and the per-window cache
//! - [`events`]: Normalization of raw features into event records
//! - [`encoding`]: Magnitude to color/radius mapping
//! - [`pipeline`]: Fetch, normalize, encode and filter orchestration
//! - [`reports`]: Console, CSV, JSON and deck.gl output
//! - [`commands`]: Command-line interface

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod encoding;
pub mod events;
pub mod feed;
pub mod pipeline;
pub mod reports;

pub use crate::commands::{Host, run};
