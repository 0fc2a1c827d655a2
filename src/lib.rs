//! SamiPro library root.
//! Exposes the CLI parser, the high-level run() function and the
//! payroll, storage and export modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::context::AppContext;
use errors::{AppError, AppResult};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    use crate::cli::commands as c;

    let cmd = &cli.command;
    match cmd {
        Commands::Init => c::init::handle(cli, ctx),
        Commands::Config { .. } => c::config::handle(cmd, ctx),
        Commands::Db { .. } => c::db::handle(cmd, ctx),
        Commands::Worker { .. } => c::worker::handle(cmd, ctx),
        Commands::Pay { .. } => c::pay::handle(cmd, ctx),
        Commands::Alerts => c::alerts::handle(cmd, ctx),
        Commands::Notify { .. } => c::notify::handle(cmd, ctx),
        Commands::Supervisor { .. } => c::supervisor::handle(cmd, ctx),
        Commands::Branch { .. } => c::branch::handle(cmd, ctx),
        Commands::Msg { .. } => c::msg::handle(cmd, ctx),
        Commands::Request { .. } => c::request::handle(cmd, ctx),
        Commands::Me => c::me::handle(cmd, ctx),
        Commands::Dashboard => c::dashboard::handle(cmd, ctx),
        Commands::Report { .. } => c::report::handle(cmd, ctx),
        Commands::Backup { .. } => c::backup::handle(cmd, ctx),
        Commands::Restore { .. } => c::restore::handle(cmd, ctx),
        Commands::Log { .. } => c::log::handle(cmd, ctx),
        Commands::Reset { .. } => c::reset::handle(cmd, ctx),
        Commands::Passwd { .. } => c::passwd::handle(cmd, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let today = match &cli.today {
        Some(raw) => Some(
            utils::date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
        ),
        None => None,
    };

    let ctx = AppContext::new(cfg, today, cli.login.clone(), cli.password.clone());
    dispatch(&cli, &ctx)
}
