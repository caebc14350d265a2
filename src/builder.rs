use std::path::{Path, PathBuf};

use crate::defaults::CURRENT_USER_KEY;
use crate::error::TemplgenError;
use crate::fs::{FileSystem, LocalFs};
use crate::ops::{self, Outcome};
use crate::prompt::{Prompt, TerminalPrompt};
use crate::settings::Settings;
use crate::types::{Action, Scope};
use crate::users::{Removal, UserManager};

/// Entry point: a settings session plus the prompt used for interactive
/// operations.
pub struct Templgen {
    settings: Settings,
    prompt: Box<dyn Prompt>,
}

impl Templgen {
    pub fn builder() -> TemplgenBuilder {
        TemplgenBuilder::new()
    }

    /// Make sure the global scope exists and has a `main.cfg`. Every command
    /// runs this first.
    pub fn ensure_integrity(&self) -> Result<(), TemplgenError> {
        self.settings.ensure_integrity(&Scope::Global)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn users(&mut self) -> UserManager<'_> {
        UserManager::new(&mut self.settings, self.prompt.as_ref())
    }

    /// Run an [`Action`] with `cwd` as the project directory for local
    /// operations.
    pub fn handle(&mut self, action: &Action, cwd: &Path) -> Result<Outcome, TemplgenError> {
        let scope_for = |local: bool| {
            if local {
                Scope::Local(cwd.to_path_buf())
            } else {
                Scope::Global
            }
        };

        match action {
            Action::InitLocal => {
                self.settings.init_local(cwd)?;
                Ok(Outcome::LocalInitialized {
                    path: cwd.to_path_buf(),
                })
            }
            Action::AddUser {
                name,
                local,
                interactive,
            } => {
                self.users().add_user(name, &scope_for(*local), *interactive)?;
                Ok(Outcome::UserAdded { name: name.clone() })
            }
            Action::DeleteUser {
                name,
                local,
                confirmed,
            } => match self.users().delete_user(name, &scope_for(*local), *confirmed)? {
                Removal::Deleted => Ok(Outcome::UserDeleted { name: name.clone() }),
                Removal::Canceled => Ok(Outcome::Canceled),
            },
            Action::ListUsers => {
                let project = Scope::Local(cwd.to_path_buf());
                let users = self.users();
                let global = users.list_users(&Scope::Global)?;
                let local = users.list_users(&project)?;
                self.settings.read_settings_for_path(&project)?;
                let current = self.settings.get(CURRENT_USER_KEY)?.to_string();
                Ok(Outcome::UserListing {
                    global,
                    local,
                    current,
                })
            }
            Action::SwitchUser { name, local } => {
                if *local {
                    self.require_local(cwd)?;
                }
                self.users().switch_user(name, &scope_for(*local))?;
                Ok(Outcome::UserSwitched { name: name.clone() })
            }
            Action::EditUser { name, local } => {
                let path = self.users().edit_user(name.as_deref(), &scope_for(*local))?;
                Ok(Outcome::Edited { path })
            }
            Action::EditConfig { local } => {
                if *local {
                    self.require_local(cwd)?;
                }
                let path = self.settings.edit_config(&scope_for(*local))?;
                Ok(Outcome::Edited { path })
            }
            Action::Get { keys } => {
                self.settings.read_settings_for_path(&Scope::Local(cwd.to_path_buf()))?;
                let entries = keys
                    .iter()
                    .map(|key| {
                        let (section, name) = ops::split_key(key);
                        let value = self.settings.get_in(section, name)?;
                        Ok((key.clone(), value.to_string()))
                    })
                    .collect::<Result<Vec<_>, TemplgenError>>()?;
                Ok(Outcome::Values { entries })
            }
        }
    }

    fn require_local(&self, cwd: &Path) -> Result<(), TemplgenError> {
        if self.settings.has_local_settings(cwd) {
            Ok(())
        } else {
            Err(TemplgenError::LocalScopeMissing {
                path: cwd.to_path_buf(),
            })
        }
    }
}

/// Builder for [`Templgen`].
///
/// Everything is optional: by default the home directory comes from the
/// platform, files are real and questions go to the terminal.
#[derive(Default)]
pub struct TemplgenBuilder {
    home_dir: Option<PathBuf>,
    file_system: Option<Box<dyn FileSystem>>,
    prompt: Option<Box<dyn Prompt>>,
}

impl TemplgenBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Use `path` instead of the user's home directory for global settings.
    /// Ignored when a custom [`file_system`](Self::file_system) is supplied.
    pub fn home_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(path.into());
        self
    }

    pub fn file_system(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.file_system = Some(fs);
        self
    }

    pub fn prompt(mut self, prompt: Box<dyn Prompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn build(self) -> Result<Templgen, TemplgenError> {
        let home_dir = self.home_dir;
        let fs = self.file_system.unwrap_or_else(|| {
            Box::new(match home_dir {
                Some(home) => LocalFs::with_home(home),
                None => LocalFs::new(),
            })
        });
        let prompt = self
            .prompt
            .unwrap_or_else(|| Box::new(TerminalPrompt) as Box<dyn Prompt>);
        Ok(Templgen {
            settings: Settings::new(fs)?,
            prompt,
        })
    }
}
