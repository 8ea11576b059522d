//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - Destructive commands prompt unless `--yes` is given or stdin is not a terminal

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// site-deploy - promote staged websites to live hosts with snapshot and rollback
#[derive(Parser, Debug)]
#[command(name = "site-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./site-deploy.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a hosted domain from staging to its live server
    Deploy {
        /// Domain name or numeric id
        name_or_id: String,

        /// Abort and roll back on the first per-file failure
        #[arg(long)]
        strict: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage domain records
    Domains {
        #[command(subcommand)]
        action: DomainsCommand,
    },

    /// List configured hosts
    Hosts,
}

#[derive(Subcommand, Debug)]
pub enum DomainsCommand {
    /// List registered domains
    List,

    /// Register a domain
    Add {
        /// Domain name, e.g. example.com
        name: String,
    },

    /// Remove a domain record
    Remove {
        /// Numeric domain id
        id: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Assign a live server and create the staging directory
    Host {
        /// Domain name or numeric id
        name_or_id: String,

        /// Live host id (defaults to the least loaded live host)
        #[arg(long)]
        server: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_parses_flags() {
        let cli = Cli::try_parse_from(["site-deploy", "deploy", "site.com", "--strict", "-y"])
            .unwrap();
        match cli.command {
            Commands::Deploy {
                name_or_id,
                strict,
                yes,
            } => {
                assert_eq!(name_or_id, "site.com");
                assert!(strict);
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "site-deploy",
            "domains",
            "list",
            "--json",
            "-vv",
            "--color",
            "never",
            "--config",
            "alt.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(
            cli.command,
            Commands::Domains {
                action: DomainsCommand::List
            }
        ));
    }

    #[test]
    fn remove_requires_numeric_id() {
        assert!(Cli::try_parse_from(["site-deploy", "domains", "remove", "site.com"]).is_err());
        let cli = Cli::try_parse_from(["site-deploy", "domains", "remove", "3", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Domains {
                action: DomainsCommand::Remove { id: 3, yes: true }
            }
        ));
    }

    #[test]
    fn host_accepts_server() {
        let cli = Cli::try_parse_from([
            "site-deploy",
            "domains",
            "host",
            "2",
            "--server",
            "az201",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Domains {
                action: DomainsCommand::Host { ref name_or_id, server: Some(ref s) }
            } if name_or_id == "2" && s == "az201"
        ));
    }
}
