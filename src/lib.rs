//! deskview: view models for support-desk screens
//!
//! The core is pure: [`domain::present`] flattens a category forest into
//! rows and [`domain::contrasting_text_color`] picks readable badge text.
//! Catalog loading, configuration and the command-line front end sit on top.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
