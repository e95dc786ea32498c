//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepub")]
#[command(about = "Note store with publish state synchronization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// On/off value for option toggles
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new note store
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Create a note
    New {
        /// Note identifier (letters, digits, '-' and '_')
        id: String,

        /// Initial note text
        #[arg(short, long, default_value = "")]
        content: String,

        /// Treat the note text as markdown
        #[arg(short, long)]
        markdown: bool,
    },

    /// Show a note's preview and options
    Show {
        id: String,
    },

    /// List stored notes
    List,

    /// Pin or unpin a note
    Pin {
        id: String,
        #[arg(value_enum)]
        state: Switch,
    },

    /// Turn markdown rendering on or off for a note
    Markdown {
        id: String,
        #[arg(value_enum)]
        state: Switch,
    },

    /// Replay publish requests and sync confirmations from a scenario file
    Sync {
        /// Scenario TOML file with [[event]] entries
        scenario: PathBuf,
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
}
