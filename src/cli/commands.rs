//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sirup")]
#[command(about = "Procurement plan (SiRUP) progress monitor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new data directory
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Fiscal year (TA) the data covers
        #[arg(long, default_value = "2026")]
        fiscal_year: String,

        /// Username of the first admin
        #[arg(long, default_value = "admin")]
        admin_user: String,

        /// Password of the first admin (default: "admin")
        #[arg(long, env = "SIRUP_ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: Option<String>,
    },

    /// Log in for commands that change data
    Login {
        username: String,

        #[arg(long, env = "SIRUP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage work units (OPD)
    #[command(subcommand)]
    Opd(OpdCommand),

    /// Enter and import daily progress
    #[command(subcommand)]
    Progress(ProgressCommand),

    /// Manage public announcements
    #[command(subcommand)]
    News(NewsCommand),

    /// Manage users (admin only)
    #[command(subcommand)]
    User(UserCommand),

    /// View or modify report signature settings
    Settings {
        /// Setting key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all settings
        #[arg(short, long)]
        list: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Public recap table with province statistics
    Recap(ListingArgs),

    /// Official report table; --html writes the printable document
    Report {
        #[command(flatten)]
        listing: ListingArgs,

        /// Write the full printable report to this file
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Live monitor summary
    Tv,

    /// Export or restore the full data snapshot
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Serve the public pages and JSON API
    Serve {
        /// Listen address (default: listen_addr from config)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    /// Filter by OPD name (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: page_size from config)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum OpdCommand {
    /// List work units
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a work unit
    Add {
        #[arg(long)]
        name: String,
        /// Budget ceiling in millions of rupiah
        #[arg(long)]
        pagu: f64,
        /// Explicit id (default: next opd-NNN)
        #[arg(long)]
        id: Option<String>,
    },
    /// Change name or budget
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        pagu: Option<f64>,
    },
    /// Remove a work unit and its progress row
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommand {
    /// Show one progress row
    Show { opd_id: String },
    /// Set channel values of one row
    Set {
        opd_id: String,
        #[arg(long)]
        penyedia_paket: Option<u32>,
        #[arg(long)]
        penyedia_pagu: Option<f64>,
        #[arg(long)]
        swakelola_paket: Option<u32>,
        #[arg(long)]
        swakelola_pagu: Option<f64>,
        #[arg(long)]
        pds_paket: Option<u32>,
        #[arg(long)]
        pds_pagu: Option<f64>,
    },
    /// Write the CSV input template
    Template {
        /// Output file (default: TEMPLATE_INPUT_SIRUP_<ta>.csv; "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a filled-in CSV template
    Import { file: PathBuf },
    /// Move today's percentages into the previous column
    Finalize {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
    /// List announcements, newest first
    List,
    /// Show one announcement
    Show { id: String },
    /// Publish an announcement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        excerpt: String,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit an announcement
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an announcement
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users
    List,
    /// Create a user
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// admin or operator
        #[arg(long, default_value = "operator")]
        role: String,
    },
    /// Change name, password or role
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a user
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Write the snapshot to a JSON file
    Export { file: PathBuf },
    /// Replace all data with a JSON backup
    Restore { file: PathBuf },
}
