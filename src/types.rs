//! Shared vocabulary: scopes and actions.
//!
//! # Scopes
//!
//! Settings and user profiles live under a `.templgen` directory in one of two
//! places:
//!
//! ```text
//! Global        ~/.templgen/            user-wide defaults and profiles
//!    ↑ overridden by
//! Local(path)   <path>/.templgen/       project-specific overrides and profiles
//! ```
//!
//! [`Scope`] names one of them explicitly. There is no "empty path means
//! global" convention: a project rooted at the home directory is still
//! `Local(home)` if the caller says so.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::layout::ScopeLayout;

/// Which settings root an operation addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The `.templgen` directory under the user's home directory.
    Global,
    /// The `.templgen` directory under a project directory.
    Local(PathBuf),
}

impl Scope {
    pub fn is_local(&self) -> bool {
        matches!(self, Scope::Local(_))
    }

    /// Directory that holds this scope's `.templgen` directory.
    pub fn base_dir<'a>(&'a self, home: &'a Path) -> &'a Path {
        match self {
            Scope::Global => home,
            Scope::Local(path) => path,
        }
    }

    pub fn layout(&self, home: &Path) -> ScopeLayout {
        ScopeLayout::new(self.base_dir(home))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Local(path) => write!(f, "local ({})", path.display()),
        }
    }
}

/// A templgen operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this; `local` flags address the
/// working directory passed to [`Templgen::handle`](crate::Templgen::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InitLocal,
    AddUser {
        name: String,
        local: bool,
        interactive: bool,
    },
    DeleteUser {
        name: String,
        local: bool,
        confirmed: bool,
    },
    ListUsers,
    SwitchUser {
        name: String,
        local: bool,
    },
    EditUser {
        name: Option<String>,
        local: bool,
    },
    EditConfig {
        local: bool,
    },
    Get {
        keys: Vec<String>,
    },
}
