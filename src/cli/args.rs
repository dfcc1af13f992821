//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Browse an anime saga/arc/episode dataset: collapsible hierarchy and filterable episode table
#[derive(Parser, Debug)]
#[command(name = "sagatree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory or http(s) URL the dataset candidates are relative to
    #[arg(short, long, global = true)]
    pub base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show series summary
    Info,

    /// Show saga/arc hierarchy as tree
    Tree {
        /// Expand every saga
        #[arg(short, long, conflicts_with = "expand")]
        all: bool,
        /// Expand sagas by name (case-insensitive, repeatable)
        #[arg(short, long)]
        expand: Vec<String>,
        /// Show super saga and episode ranges
        #[arg(short, long)]
        details: bool,
        /// Print the hierarchy as JSON for an external layout engine
        #[arg(long, conflicts_with_all = ["all", "expand", "details"])]
        json: bool,
    },

    /// List episodes, filtered
    Episodes {
        /// Match title or romanized title (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Saga id
        #[arg(long)]
        saga: Option<String>,
        /// Arc id (without --saga, its owning saga is selected too)
        #[arg(long)]
        arc: Option<String>,
    },

    /// List sagas
    Sagas,

    /// List arcs selectable for a saga
    Arcs {
        /// Saga id
        #[arg(long)]
        saga: Option<String>,
    },

    /// Select saga and arc interactively (fzf), then list episodes
    Select {
        /// Match title or romanized title (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show saga cards from the per-saga detail files
    Cards,

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
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,

    /// Print config template
    Template,
}
