use crate::client::FetchPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(
    author,
    version,
    about = "A GraphQL bookshelf: server, polling client and terminal UI"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .shelf.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint of the server (overrides config)
    #[arg(long, global = true, env = "SHELF_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new bookshelf project in the current directory
    Init,

    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all books from the server
    #[command(visible_alias = "ls")]
    Books {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a book through the server
    #[command(visible_alias = "c", visible_alias = "new")]
    Create {
        /// Title of the book (at most 100 characters)
        title: String,

        /// Author (at most 50 characters)
        #[arg(short, long)]
        author: String,

        /// Content (at least 10 characters; use '-' to read from stdin)
        #[arg(short, long)]
        content: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Keep the book list up to date and print it whenever it changes
    Watch {
        /// Only fetch on start; press Enter to refetch
        #[arg(long)]
        manual: bool,

        /// Polling interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Cache policy for the initial load (overrides config)
        #[arg(long, value_enum)]
        policy: Option<FetchPolicyArg>,
    },

    /// Show the schema's queries and mutations
    Schema {
        /// Print this binary's SDL instead of asking the server
        #[arg(long)]
        sdl: bool,
    },

    /// Execute a GraphQL query against the local database
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation against the local database (wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Open the interactive TUI
    Tui {
        /// Refresh only on demand instead of polling
        #[arg(long)]
        manual: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchPolicyArg {
    CacheFirst,
    CacheAndNetwork,
    NetworkOnly,
}

impl From<FetchPolicyArg> for FetchPolicy {
    fn from(arg: FetchPolicyArg) -> Self {
        match arg {
            FetchPolicyArg::CacheFirst => FetchPolicy::CacheFirst,
            FetchPolicyArg::CacheAndNetwork => FetchPolicy::CacheAndNetwork,
            FetchPolicyArg::NetworkOnly => FetchPolicy::NetworkOnly,
        }
    }
}
