//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use courtside_core::{Season, SeasonType};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Collect NBA statistics into checkpointed CSV tables", long_about = None)]
pub(crate) struct Cli {
    /// Project root holding data/ and logging/ (defaults to settings, then current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Season to collect, e.g. 2024-25
    #[arg(short, long, global = true)]
    pub season: Option<Season>,

    /// Season types, comma separated (e.g. "Regular Season,Playoffs")
    #[arg(short = 't', long, global = true, value_delimiter = ',')]
    pub season_types: Option<Vec<SeasonType>>,

    /// Settings file (defaults to ~/.config/courtside/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to this file instead of <root>/logging/ (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long, global = true, conflicts_with = "logfile")]
    pub no_logfile: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch all six box score tables for every game in scope
    Boxscores,

    /// Resume an interrupted box score run from its checkpoints
    Rerun,

    /// Fetch the league schedule for the season
    Schedule,

    /// Fetch player and team details
    Info {
        /// Only fetch players
        #[arg(long, conflicts_with = "teams_only")]
        players_only: bool,

        /// Only fetch teams
        #[arg(long)]
        teams_only: bool,
    },

    /// Merge main-run checkpoints with rerun outputs into final box score files
    Append,

    /// Project raw tables into processed warehouse tables
    Transform {
        /// Tables to process (e.g. advanced,hustle). Defaults to all.
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where they come from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with every default spelled out
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
