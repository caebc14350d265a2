//! User profiles: named directories under a scope's `users/` directory.
//!
//! A profile is either present or absent in a given scope; `add_user` and
//! `delete_user` are the only transitions. A name may be present locally,
//! globally, or both. [`exists`](UserManager::exists) answers "present in
//! either", which is what adding and switching check; deletion only looks at
//! the scope it is asked to delete from.

use std::path::{Path, PathBuf};

use crate::defaults::{self, CURRENT_USER_KEY, UserConfig};
use crate::error::TemplgenError;
use crate::layout::ScopeLayout;
use crate::persist::write_document;
use crate::prompt::Prompt;
use crate::settings::Settings;
use crate::types::Scope;

/// What [`UserManager::delete_user`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// The confirmation prompt was declined; nothing was removed.
    Canceled,
}

/// Profile operations, borrowing the settings session they persist through.
pub struct UserManager<'a> {
    settings: &'a mut Settings,
    prompt: &'a dyn Prompt,
}

impl<'a> UserManager<'a> {
    pub fn new(settings: &'a mut Settings, prompt: &'a dyn Prompt) -> Self {
        Self { settings, prompt }
    }

    /// Create a profile. Local scopes are initialized on demand.
    pub fn add_user(
        &mut self,
        name: &str,
        scope: &Scope,
        interactive: bool,
    ) -> Result<(), TemplgenError> {
        validate_name(name)?;
        if scope.is_local() {
            self.settings.ensure_integrity(scope)?;
        }
        if self.exists(name, scope) {
            return Err(TemplgenError::UserAlreadyExists(name.into()));
        }

        let document = if interactive {
            defaults::prompt_document::<UserConfig>(self.prompt)?
        } else {
            defaults::default_document::<UserConfig>()?
        };

        let layout = self.settings.layout(scope);
        let fs = self.settings.fs();
        fs.create_path(&layout.user_dir(name))?;
        fs.create_path(&layout.user_templ_config_dir(name))?;
        write_document(&layout.user_config_file(name), &document)?;

        tracing::info!(user = name, %scope, "user added");
        Ok(())
    }

    /// Remove a profile directory, asking first unless `confirmed`.
    pub fn delete_user(
        &mut self,
        name: &str,
        scope: &Scope,
        confirmed: bool,
    ) -> Result<Removal, TemplgenError> {
        validate_name(name)?;
        if scope.is_local() {
            self.settings.ensure_integrity(scope)?;
        }
        let user_dir = self.settings.layout(scope).user_dir(name);
        if !self.settings.fs().dir_exists(&user_dir) {
            return Err(TemplgenError::UserNotFound(name.into()));
        }

        if !confirmed {
            let question = match scope {
                Scope::Global => {
                    format!("Do you confirm deleting user '{name}' globally (yes/no)?")
                }
                Scope::Local(project) => format!(
                    "Do you confirm deleting user '{name}' locally for '{}' (yes/no)?",
                    project.display()
                ),
            };
            if !self.prompt.confirm(&question)? {
                tracing::debug!(user = name, "deletion declined");
                return Ok(Removal::Canceled);
            }
        }

        self.settings.fs().remove_dir(&user_dir)?;
        tracing::info!(user = name, %scope, "user deleted");
        Ok(Removal::Deleted)
    }

    /// Profile names in `scope`, sorted. Empty when the scope has no users
    /// directory.
    pub fn list_users(&self, scope: &Scope) -> Result<Vec<String>, TemplgenError> {
        let users_dir = self.settings.layout(scope).users_dir();
        let fs = self.settings.fs();
        if !fs.dir_exists(&users_dir) {
            return Ok(Vec::new());
        }
        fs.list_subdirs(&users_dir)
    }

    /// Make `name` the current user of `scope`, persisting immediately.
    pub fn switch_user(&mut self, name: &str, scope: &Scope) -> Result<(), TemplgenError> {
        validate_name(name)?;
        self.settings.read_settings_for_path(scope)?;
        if !self.exists(name, scope) {
            return Err(TemplgenError::UserNotFound(name.into()));
        }
        self.settings.set(CURRENT_USER_KEY, name)?;
        tracing::info!(user = name, %scope, "current user switched");
        Ok(())
    }

    /// Open a profile's `user.cfg` in the configured editor. Without a name,
    /// the current user of `scope` is edited. Returns the edited path.
    pub fn edit_user(
        &mut self,
        name: Option<&str>,
        scope: &Scope,
    ) -> Result<PathBuf, TemplgenError> {
        self.settings.read_settings_for_path(scope)?;
        let name = match name {
            Some(name) => name.to_string(),
            None => self.settings.get(CURRENT_USER_KEY)?.to_string(),
        };
        validate_name(&name)?;
        let path = self
            .user_config_file(&name, scope)
            .ok_or_else(|| TemplgenError::UserNotFound(name.clone()))?;
        self.settings.open_in_editor(&path)?;
        Ok(path)
    }

    /// `user.cfg` of the profile visible from `scope`; a local profile shadows
    /// a global one with the same name.
    pub fn user_config_file(&self, name: &str, scope: &Scope) -> Option<PathBuf> {
        if let Scope::Local(project) = scope
            && self.exists_locally(name, project)
        {
            return Some(ScopeLayout::new(project).user_config_file(name));
        }
        if self.exists_globally(name) {
            return Some(self.settings.layout(&Scope::Global).user_config_file(name));
        }
        None
    }

    pub fn exists_locally(&self, name: &str, project: &Path) -> bool {
        if !is_profile_name(name) {
            return false;
        }
        let dir = ScopeLayout::new(project).user_dir(name);
        self.settings.fs().dir_exists(&dir)
    }

    pub fn exists_globally(&self, name: &str) -> bool {
        if !is_profile_name(name) {
            return false;
        }
        let dir = self.settings.layout(&Scope::Global).user_dir(name);
        self.settings.fs().dir_exists(&dir)
    }

    /// Present in `scope` or globally.
    pub fn exists(&self, name: &str, scope: &Scope) -> bool {
        match scope {
            Scope::Local(project) => {
                self.exists_locally(name, project) || self.exists_globally(name)
            }
            Scope::Global => self.exists_globally(name),
        }
    }
}

/// Profile names become directory names, so anything that would resolve to
/// another directory is not a name.
fn is_profile_name(name: &str) -> bool {
    !(name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0'))
}

fn validate_name(name: &str) -> Result<(), TemplgenError> {
    if is_profile_name(name) {
        Ok(())
    } else {
        Err(TemplgenError::InvalidUserName(name.into()))
    }
}
