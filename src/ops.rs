//! Results of templgen operations and key addressing for `get`.
//!
//! [`Outcome`] is what [`Templgen::handle`](crate::Templgen::handle) returns;
//! its `Display` impl is the text the command line prints.

use std::fmt;
use std::path::PathBuf;

use crate::defaults::GENERAL_SECTION;

/// Result of an operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A local scope was created for this directory.
    LocalInitialized { path: PathBuf },
    UserAdded { name: String },
    UserDeleted { name: String },
    /// A confirmation was declined; nothing changed.
    Canceled,
    /// Profiles in both scopes and the current user of the working directory.
    UserListing {
        global: Vec<String>,
        local: Vec<String>,
        current: String,
    },
    UserSwitched { name: String },
    /// A file was opened in the editor.
    Edited { path: PathBuf },
    /// Effective values, in the order they were asked for.
    Values { entries: Vec<(String, String)> },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::LocalInitialized { path } => write!(
                f,
                "Success: created local config for directory '{}'",
                path.display()
            ),
            Outcome::UserAdded { name } => write!(f, "Successfully added new user '{name}'"),
            Outcome::UserDeleted { name } => write!(f, "Successfully deleted user '{name}'"),
            Outcome::Canceled => write!(f, "Operation canceled"),
            Outcome::UserListing {
                global,
                local,
                current,
            } => {
                match (global.is_empty(), local.is_empty()) {
                    (true, true) => writeln!(f, "No users found")?,
                    (true, false) => writeln!(f, "No global users found")?,
                    (false, _) => writeln!(f, "Global users: {global:?}")?,
                }
                if !local.is_empty() {
                    writeln!(f, "Local users: {local:?}")?;
                }
                write!(f, "Current user: {current}")
            }
            Outcome::UserSwitched { name } => {
                write!(f, "Successfully switched user to '{name}'")
            }
            Outcome::Edited { path } => write!(f, "Edited {}", path.display()),
            Outcome::Values { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Split a `get` argument into `(section, key)`. A bare key addresses the
/// GENERAL section; `SECTION.key` addresses another one.
pub(crate) fn split_key(key: &str) -> (&str, &str) {
    match key.split_once('.') {
        Some((section, name)) => (section, name),
        None => (GENERAL_SECTION, key),
    }
}
