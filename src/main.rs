//! site-deploy CLI - promote staged websites to live hosts
//!
//! Usage: site-deploy <COMMAND>
//!
//! Commands:
//!   deploy   Deploy a hosted domain from staging to its live server
//!   domains  Manage domain records (list, add, remove, host)
//!   hosts    List configured hosts

mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use site_deploy::config::OutputSettings;
use site_deploy::presentation::{Cli, Commands};

use crate::ui::context::UiContext;
use crate::ui::error::{error_json, render_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            // Settings may be what failed, so render with default output settings.
            let ui = UiContext::new(cli.json, cli.verbose, cli.color, &OutputSettings::default());
            if ui.json {
                println!("{}", error_json(&err));
            } else {
                eprint!("{}", render_error(&err, ui.color, ui.unicode));
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    let loaded = commands::load_settings(cli.config.as_deref())?;
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &loaded.settings.output);
    commands::print_config_warnings(&loaded, &ui);
    let settings = &loaded.settings;

    match &cli.command {
        Commands::Deploy {
            name_or_id,
            strict,
            yes,
        } => commands::deploy::cmd_deploy(settings, &ui, name_or_id, *strict, *yes),
        Commands::Domains { action } => {
            commands::domains::cmd_domains(settings, &ui, action).map(|()| true)
        }
        Commands::Hosts => commands::hosts::cmd_hosts(settings, &ui).map(|()| true),
    }
}
