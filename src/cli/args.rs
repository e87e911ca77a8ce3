//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::Side;

/// Family tree manager: build, edit, and persist ancestor trees
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more verbosity (-d -d …)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Which family tree to operate on (default from config)
    #[arg(short, long, global = true, value_enum)]
    pub side: Option<Side>,

    /// Snapshot directory (default: platform data dir)
    #[arg(long, global = true, env = "KINTREE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a generated child under an existing node
    Add {
        /// Id of the parent node
        parent_id: u64,
    },

    /// Change name and/or image of a node
    Set {
        /// Id of the node to edit
        id: u64,
        /// New display name (blank keeps the current name)
        #[arg(short, long)]
        name: Option<String>,
        /// New image reference (URL or data blob)
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Delete a node and its entire subtree
    Remove {
        /// Id of the node to delete
        id: u64,
    },

    /// List all nodes in display order
    List,

    /// Render the tree in the terminal
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show author and version
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file path
    Path,
}
