//! Clap adapter for the `templgen` command line.
//!
//! Compiled only with the `cli` Cargo feature (on by default). The only bridge
//! to the core is [`Cli::into_action()`], which turns parsed arguments into an
//! [`Action`](crate::Action). Everything after that goes through the
//! clap-free [`Templgen::handle()`](crate::Templgen::handle).

use clap::{ArgAction, Parser, Subcommand};

use crate::types::Action;

/// Manage global and per-project templgen settings and user profiles.
#[derive(Debug, Parser)]
#[command(name = "templgen", version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a local config for the current directory from the global one
    #[command(name = "initlocal")]
    InitLocal,

    /// Add a new user profile
    #[command(name = "adduser")]
    AddUser {
        name: String,
        /// Add the user to the current project only
        #[arg(long)]
        local: bool,
        /// Use default values instead of asking for each field
        #[arg(short = 'd', long = "default")]
        use_defaults: bool,
    },

    /// Delete a user profile
    #[command(name = "deluser")]
    DeleteUser {
        name: String,
        /// Delete the user from the current project only
        #[arg(long)]
        local: bool,
        /// Do not ask for confirmation
        #[arg(long)]
        confirmed: bool,
    },

    /// List global and local users and show the current user
    #[command(name = "list-users", alias = "listusers")]
    ListUsers,

    /// Switch the current user
    #[command(name = "swuser")]
    SwitchUser {
        name: String,
        /// Switch the user for the current project only
        #[arg(long)]
        local: bool,
    },

    /// Open a user's profile in the text editor (current user by default)
    #[command(name = "edit-user")]
    EditUser {
        name: Option<String>,
        /// Prefer the current project's profile
        #[arg(long)]
        local: bool,
    },

    /// Open the configuration in the text editor
    #[command(name = "edit-config")]
    EditConfig {
        /// Edit the current project's configuration
        #[arg(long)]
        local: bool,
    },

    /// Print effective settings for the current directory
    Get {
        /// Setting names; `SECTION.name` addresses a section other than GENERAL
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    /// Convert clap-parsed args into a framework-agnostic [`Action`].
    pub fn into_action(self) -> Action {
        match self.command {
            Command::InitLocal => Action::InitLocal,
            Command::AddUser {
                name,
                local,
                use_defaults,
            } => Action::AddUser {
                name,
                local,
                interactive: !use_defaults,
            },
            Command::DeleteUser {
                name,
                local,
                confirmed,
            } => Action::DeleteUser {
                name,
                local,
                confirmed,
            },
            Command::ListUsers => Action::ListUsers,
            Command::SwitchUser { name, local } => Action::SwitchUser { name, local },
            Command::EditUser { name, local } => Action::EditUser { name, local },
            Command::EditConfig { local } => Action::EditConfig { local },
            Command::Get { names } => Action::Get { keys: names },
        }
    }
}
