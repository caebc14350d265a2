//! On-disk layout of a scope root.
//!
//! ```text
//! <base>/.templgen/
//!     main.cfg
//!     users/<name>/user.cfg
//!     users/<name>/templ_config/
//!     templates/
//! ```

use std::path::{Path, PathBuf};

pub const TEMPLGEN_DIR: &str = ".templgen";
pub const USERS_DIR: &str = "users";
pub const TEMPLATES_DIR: &str = "templates";
pub const TEMPL_CONFIG_DIR: &str = "templ_config";
pub const MAIN_CONFIG_FILE: &str = "main.cfg";
pub const USER_CONFIG_FILE: &str = "user.cfg";

/// Paths inside one `.templgen` directory. Pure path arithmetic, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLayout {
    root: PathBuf,
}

impl ScopeLayout {
    pub fn new(base: &Path) -> Self {
        Self {
            root: base.join(TEMPLGEN_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(MAIN_CONFIG_FILE)
    }

    pub fn users_dir(&self) -> PathBuf {
        self.root.join(USERS_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn user_dir(&self, name: &str) -> PathBuf {
        self.users_dir().join(name)
    }

    pub fn user_config_file(&self, name: &str) -> PathBuf {
        self.user_dir(name).join(USER_CONFIG_FILE)
    }

    pub fn user_templ_config_dir(&self, name: &str) -> PathBuf {
        self.user_dir(name).join(TEMPL_CONFIG_DIR)
    }
}
