//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::BroadcastStatus;

/// View models for support-desk screens: category trees, tags, broadcasts and status pages
#[derive(Parser, Debug)]
#[command(name = "deskview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the help-center category tree
    Tree {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        catalog: PathBuf,
        /// Highlight this category
        #[arg(short, long)]
        selected: Option<String>,
        /// Expand category (repeatable, toggles configured defaults)
        #[arg(short, long)]
        expand: Vec<String>,
        /// Expand every category
        #[arg(long, conflicts_with = "expand")]
        expand_all: bool,
        /// Print the whole forest as an outline instead of rows
        #[arg(long)]
        outline: bool,
    },

    /// Text color readable on the given background colors
    Contrast {
        /// Background colors (#RRGGBB)
        #[arg(required = true)]
        colors: Vec<String>,
    },

    /// List tags with their badge colors
    Tags {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        catalog: PathBuf,
        /// Only tags whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List broadcast campaigns
    Broadcasts {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        catalog: PathBuf,
        /// Only campaigns with this status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show an HTTP status page
    Status {
        #[command(subcommand)]
        command: StatusCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// 403 page
    Forbidden {
        /// Role of the current user
        #[arg(long)]
        role: Option<String>,
        /// Resource that was denied
        #[arg(long)]
        resource: Option<String>,
    },

    /// 429 page with retry countdown
    RateLimited {
        /// Seconds until retry is allowed
        #[arg(long)]
        retry_after: u64,
        /// Run the countdown until retry is allowed
        #[arg(short, long)]
        watch: bool,
    },

    /// Maintenance page
    Maintenance {
        /// Estimated return time (RFC 3339 / ISO-8601)
        #[arg(long)]
        until: Option<String>,
        /// Custom message
        #[arg(long)]
        message: Option<String>,
        /// Support contact
        #[arg(long)]
        contact: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show {
        /// Directory with a local .deskview.toml
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
    /// Print a config template
    Template,
    /// Show config file locations
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

impl From<StatusArg> for BroadcastStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => BroadcastStatus::Draft,
            StatusArg::Scheduled => BroadcastStatus::Scheduled,
            StatusArg::Sent => BroadcastStatus::Sent,
            StatusArg::Failed => BroadcastStatus::Failed,
        }
    }
}
