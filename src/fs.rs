//! Filesystem and process access.
//!
//! Everything the settings engine and the user manager do to directories, plus
//! home-directory discovery and external command execution, goes through the
//! [`FileSystem`] trait. Config file contents are read and written by
//! [`crate::file`] and [`crate::persist`] directly.
//!
//! [`LocalFs`] is the real implementation. Tests wrap it to record commands
//! instead of spawning editors.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::TemplgenError;

pub trait FileSystem {
    fn home_dir(&self) -> Result<PathBuf, TemplgenError>;
    fn dir_exists(&self, path: &Path) -> bool;
    fn file_exists(&self, path: &Path) -> bool;
    /// Create `path` and any missing parents.
    fn create_path(&self, path: &Path) -> Result<(), TemplgenError>;
    /// Remove `path` recursively.
    fn remove_dir(&self, path: &Path) -> Result<(), TemplgenError>;
    /// Copy the directory tree at `src` to `dst`, creating `dst`.
    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), TemplgenError>;
    /// Names of the immediate subdirectories of `path`, sorted.
    fn list_subdirs(&self, path: &Path) -> Result<Vec<String>, TemplgenError>;
    /// Run `argv[0]` with the remaining arguments and extra environment
    /// variables, blocking until it exits.
    fn run_command(&self, argv: &[String], env: &[(String, String)])
    -> Result<(), TemplgenError>;
}

/// [`FileSystem`] backed by `std::fs` and `std::process`.
#[derive(Debug, Clone, Default)]
pub struct LocalFs {
    home: Option<PathBuf>,
}

impl LocalFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `home` instead of the platform home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }
}

impl FileSystem for LocalFs {
    fn home_dir(&self) -> Result<PathBuf, TemplgenError> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }
        let user = directories::UserDirs::new().ok_or(TemplgenError::HomeDirNotFound)?;
        Ok(user.home_dir().to_path_buf())
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_path(&self, path: &Path) -> Result<(), TemplgenError> {
        std::fs::create_dir_all(path).map_err(|e| TemplgenError::io(path, e))
    }

    fn remove_dir(&self, path: &Path) -> Result<(), TemplgenError> {
        std::fs::remove_dir_all(path).map_err(|e| TemplgenError::io(path, e))
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), TemplgenError> {
        self.create_path(dst)?;
        let entries = std::fs::read_dir(src).map_err(|e| TemplgenError::io(src, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| TemplgenError::io(src, e))?;
            let from = entry.path();
            let to = dst.join(entry.file_name());
            let file_type = entry.file_type().map_err(|e| TemplgenError::io(&from, e))?;
            if file_type.is_dir() {
                self.copy_dir(&from, &to)?;
            } else {
                std::fs::copy(&from, &to).map_err(|e| TemplgenError::io(&from, e))?;
            }
        }
        Ok(())
    }

    fn list_subdirs(&self, path: &Path) -> Result<Vec<String>, TemplgenError> {
        let entries = std::fs::read_dir(path).map_err(|e| TemplgenError::io(path, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TemplgenError::io(path, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn run_command(
        &self,
        argv: &[String],
        env: &[(String, String)],
    ) -> Result<(), TemplgenError> {
        let (program, args) = argv.split_first().ok_or_else(|| TemplgenError::CommandFailed {
            command: String::new(),
            reason: "empty command".into(),
        })?;
        let command = argv.join(" ");
        tracing::debug!(%command, "running external command");

        let status = Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|e| TemplgenError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(TemplgenError::CommandFailed {
                command,
                reason: format!("exited with {status}"),
            })
        }
    }
}
