use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogz")]
#[command(about = "Manage a blogstore content store from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./blogz.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base directory; overrides `base_path` from the config
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a sequence number as an id
    Encode { sequence: u64 },

    /// Decode an id to its sequence number
    Decode { id: String },

    #[command(flatten)]
    Store(StoreCommand),
}

/// Commands that open the store.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Create the store (or check an existing one)
    Init,

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only entries carrying this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only entries by this author
        #[arg(short, long)]
        author: Option<String>,

        /// Text to look for in name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Include deleted entries
        #[arg(long)]
        deleted: bool,

        #[arg(long, value_enum, default_value_t = SortArg::Index)]
        sort: SortArg,

        /// Page number, 1-based
        #[arg(long, requires = "per_page")]
        page: Option<usize>,

        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show an entry with its body
    #[command(alias = "v")]
    Show { id: String },

    /// Create a new, unpublished entry
    #[command(alias = "n")]
    Create {
        name: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Body text
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Publish an entry now
    Publish { id: String },

    /// Mark an entry deleted
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Index,
    Newest,
    Oldest,
    Name,
}
