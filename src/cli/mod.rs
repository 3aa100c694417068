//! Command-line interface for Movio.

mod commands;

pub use commands::{cmd_init, cmd_set_admin};

use clap::{Parser, Subcommand};

/// Movio - streaming catalog server
#[derive(Parser)]
#[command(name = "movio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Grant administrator access to an account
    Promote {
        /// Account email
        email: String,
    },

    /// Revoke administrator access from an account
    Demote {
        /// Account email
        email: String,
    },
}
