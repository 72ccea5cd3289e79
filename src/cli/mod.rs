//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{
    BackupCommand, Cli, Commands, ListingArgs, NewsCommand, OpdCommand, ProgressCommand,
    UserCommand,
};
pub use output::{
    format_config, format_news_item, format_news_list, format_opd_list, format_progress_page,
    format_progress_row, format_settings, format_summary, format_tv, format_user_list,
};
