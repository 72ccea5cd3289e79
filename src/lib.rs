//! sirup - Procurement plan (RUP) progress monitor
//!
//! Tracks how much of each work unit's (OPD) procurement budget has been
//! announced in SiRUP, grouped by channel, and renders it as a public recap,
//! an official signed report and a live TV monitor. Data lives in a `.sirup/`
//! directory and is edited through the `sirup` command line; `sirup serve`
//! publishes the read-only pages and a JSON API.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod web;

pub use error::MonitorError;
