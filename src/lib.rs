//! Layered settings and user profiles for the templgen template generator.
//!
//! templgen keeps its configuration in two tiers. A global tier lives in
//! `~/.templgen/` and is always present; any project directory may carry its
//! own `.templgen/` that overrides it key by key. Both tiers hold the same
//! things: a `main.cfg` INI file, a `users/` directory of named profiles and a
//! `templates/` directory.
//!
//! ```ignore
//! let mut templgen = Templgen::builder().build()?;
//! templgen.ensure_integrity()?;
//! let outcome = templgen.handle(&Action::ListUsers, &std::env::current_dir()?)?;
//! println!("{outcome}");
//! ```
//!
//! # Layout
//!
//! ```text
//! <base>/.templgen/
//!     main.cfg                     [GENERAL] current_user, text_editor
//!     users/<name>/user.cfg        [GENERAL] full_name, email, site
//!     users/<name>/templ_config/
//!     templates/
//! ```
//!
//! `<base>` is the home directory for the global scope and the project
//! directory for a local one. See [`ScopeLayout`].
//!
//! # Resolution
//!
//! ```text
//! ~/.templgen/main.cfg          lowest priority
//!        ↑ overridden by
//! <project>/.templgen/main.cfg  only when the project has a local scope
//! ```
//!
//! A request for a project without a local scope silently resolves as global.
//! Writes go to whichever scope the request resolved to, so switching the
//! current user inside a project with a local scope never touches the global
//! file. See [`Settings`] for the session and dirty-flag rules.
//!
//! # Defaults as structs
//!
//! The contents of a fresh `main.cfg` and of a new profile's `user.cfg` are
//! declared as confique structs ([`MainConfig`], [`UserConfig`]). Defaults
//! come from `#[config(default = ...)]`, and each field's `///` comment is
//! written next to the key as a documentation entry (`key*** = text`) and
//! reused as the question asked when a profile is created interactively.
//! Documentation entries are kept in the files but never appear in resolved
//! settings.
//!
//! # Profiles
//!
//! [`UserManager`] adds, deletes, lists, switches and edits profiles. Adding
//! and switching treat a name as taken if it exists in either scope. Deletion
//! asks for a literal `yes` unless told the user already confirmed, and a
//! declined confirmation is reported as [`Removal::Canceled`] rather than an
//! error.
//!
//! # Core library and CLI
//!
//! All operations are reachable through [`Templgen::handle`] with an
//! [`Action`], which returns a displayable [`Outcome`]. The clap adapter
//! ([`Cli`], behind the `cli` feature, on by default) only parses arguments
//! into an `Action`. Filesystem access and prompting go through the
//! [`FileSystem`] and [`Prompt`] traits so embedders and tests can replace
//! them.
//!
//! # Error handling
//!
//! All fallible operations return [`TemplgenError`]. Use
//! [`kind()`](TemplgenError::kind) to branch on the category (not found,
//! already exists, precondition, invalid input, filesystem, malformed config)
//! instead of matching every variant.

pub mod defaults;
pub mod document;
pub mod error;
pub mod layout;
pub mod types;

mod builder;
#[cfg(feature = "cli")]
mod cli;
mod file;
mod fs;
pub(crate) mod merge;
mod ops;
mod persist;
mod prompt;
mod settings;
mod users;

#[cfg(test)]
mod fixtures;

pub use builder::{Templgen, TemplgenBuilder};
#[cfg(feature = "cli")]
pub use cli::{Cli, Command};
pub use defaults::{MainConfig, UserConfig};
pub use document::{ConfigDocument, Entry, EntryKind, Section};
pub use error::{ErrorKind, TemplgenError};
pub use file::read_document;
pub use fs::{FileSystem, LocalFs};
pub use layout::ScopeLayout;
pub use ops::Outcome;
pub use persist::{render_document, write_document};
pub use prompt::{AFFIRMATIVE, Prompt, TerminalPrompt};
pub use settings::Settings;
pub use types::{Action, Scope};
pub use users::{Removal, UserManager};
