//! Settings resolution: merge global and local `main.cfg` into one effective
//! view, and write changes back.
//!
//! [`Settings`] is a session object with a single-writer contract: every
//! operation that touches the resolved view takes `&mut self`, and nothing is
//! shared across threads or processes. Concurrent invocations of the tool
//! against the same scope are not coordinated; the last writer wins.
//!
//! # Resolution
//!
//! [`read_settings_for_path`](Settings::read_settings_for_path) picks the
//! effective scope for a request, then merges:
//!
//! ```text
//! ~/.templgen/main.cfg          values only, lowest priority
//!        ↑ overridden by
//! <project>/.templgen/main.cfg  only when the project has a local scope
//! ```
//!
//! A `Local` request whose project directory does not exist, or which has no
//! `.templgen` directory, resolves as `Global`. Documentation entries never
//! enter the effective view.
//!
//! # Dirty flag
//!
//! [`set_in`](Settings::set_in) with `persist = false` leaves the session dirty.
//! Resolving another path while dirty fails with
//! [`UnsavedChanges`](TemplgenError::UnsavedChanges) until the caller either
//! [`save`](Settings::save)s or [`discard_changes`](Settings::discard_changes).
//!
//! # Saving
//!
//! `save` merges the whole effective view over the resolved scope's file, so
//! values inherited from global settings are written into the local file too.
//! That is how a local override becomes durable.

use std::path::{Path, PathBuf};

use crate::defaults::{
    self, FALLBACK_EDITOR, GENERAL_SECTION, MainConfig, TEXT_EDITOR_KEY,
};
use crate::document::ConfigDocument;
use crate::error::TemplgenError;
use crate::file::read_document;
use crate::fs::FileSystem;
use crate::layout::ScopeLayout;
use crate::merge::merge;
use crate::persist::write_document;
use crate::types::Scope;

#[derive(Debug, Clone)]
struct Resolved {
    scope: Scope,
    effective: ConfigDocument,
}

pub struct Settings {
    fs: Box<dyn FileSystem>,
    home: PathBuf,
    resolved: Option<Resolved>,
    dirty: bool,
}

impl Settings {
    pub fn new(fs: Box<dyn FileSystem>) -> Result<Self, TemplgenError> {
        let home = fs.home_dir()?;
        Ok(Self {
            fs,
            home,
            resolved: None,
            dirty: false,
        })
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn home_dir(&self) -> &Path {
        &self.home
    }

    pub fn layout(&self, scope: &Scope) -> ScopeLayout {
        scope.layout(&self.home)
    }

    /// Create the scope root and default config if they are missing.
    ///
    /// A missing root is initialized from scratch (see [`init`](Self::init)); an
    /// existing root only gets `main.cfg` rewritten when that file is absent.
    pub fn ensure_integrity(&self, scope: &Scope) -> Result<(), TemplgenError> {
        let layout = self.layout(scope);
        if !self.fs.dir_exists(layout.root()) {
            tracing::info!(path = %layout.root().display(), "initializing settings directory");
            return self.init(scope);
        }
        let config_file = layout.config_file();
        if !self.fs.file_exists(&config_file) {
            tracing::info!(path = %config_file.display(), "restoring missing config file");
            write_default_config(&config_file)?;
        }
        Ok(())
    }

    pub fn has_local_settings(&self, project: &Path) -> bool {
        self.fs.dir_exists(ScopeLayout::new(project).root())
    }

    /// Recreate the scope root from scratch. Any existing settings, profiles and
    /// templates under it are removed first.
    pub fn init(&self, scope: &Scope) -> Result<(), TemplgenError> {
        let layout = self.layout(scope);
        if self.fs.dir_exists(layout.root()) {
            tracing::info!(path = %layout.root().display(), "removing existing settings directory");
            self.fs.remove_dir(layout.root())?;
        }
        self.fs.create_path(&layout.users_dir())?;
        self.fs.create_path(&layout.templates_dir())?;
        write_default_config(&layout.config_file())
    }

    /// Scope a request actually resolves to. See the module docs.
    pub fn effective_scope(&self, scope: &Scope) -> Scope {
        match scope {
            Scope::Local(project) if !self.fs.dir_exists(project) => {
                tracing::debug!(path = %project.display(), "project path missing, using global settings");
                Scope::Global
            }
            Scope::Local(project) if !self.has_local_settings(project) => Scope::Global,
            other => other.clone(),
        }
    }

    /// Resolve the effective settings for `scope`, replacing any previous
    /// resolution. Fails without touching the session if it has unsaved changes.
    pub fn read_settings_for_path(
        &mut self,
        scope: &Scope,
    ) -> Result<&ConfigDocument, TemplgenError> {
        if self.dirty {
            return Err(TemplgenError::UnsavedChanges);
        }
        let target = self.effective_scope(scope);

        let mut effective = load_values(&self.layout(&Scope::Global).config_file())?;
        if target.is_local() {
            let local = load_values(&self.layout(&target).config_file())?;
            effective = merge(effective, local);
        }
        tracing::debug!(scope = %target, "settings resolved");

        let resolved = self.resolved.insert(Resolved {
            scope: target,
            effective,
        });
        Ok(&resolved.effective)
    }

    /// Scope of the current resolution, if any.
    pub fn resolved_scope(&self) -> Option<&Scope> {
        self.resolved.as_ref().map(|r| &r.scope)
    }

    pub fn effective(&self) -> Option<&ConfigDocument> {
        self.resolved.as_ref().map(|r| &r.effective)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Look up `key` in the GENERAL section.
    pub fn get(&self, key: &str) -> Result<&str, TemplgenError> {
        self.get_in(GENERAL_SECTION, key)
    }

    pub fn get_in(&self, section: &str, key: &str) -> Result<&str, TemplgenError> {
        let effective = self.effective().ok_or(TemplgenError::SettingsNotResolved)?;
        let found = effective
            .section(section)
            .ok_or_else(|| TemplgenError::SectionNotFound(section.into()))?;
        found.get(key).ok_or_else(|| TemplgenError::KeyNotFound {
            section: section.into(),
            key: key.into(),
        })
    }

    /// Set `key` in the GENERAL section and save immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TemplgenError> {
        self.set_in(GENERAL_SECTION, key, value, true)
    }

    pub fn set_in(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        persist: bool,
    ) -> Result<(), TemplgenError> {
        let resolved = self
            .resolved
            .as_mut()
            .ok_or(TemplgenError::SettingsNotResolved)?;
        resolved.effective.set(section, key, value);
        self.dirty = true;
        if persist {
            self.save()?;
        }
        Ok(())
    }

    /// Write the effective settings into the resolved scope's config file.
    pub fn save(&mut self) -> Result<(), TemplgenError> {
        if !self.dirty {
            return Ok(());
        }
        let resolved = self
            .resolved
            .as_ref()
            .ok_or(TemplgenError::SettingsNotResolved)?;
        let path = resolved.scope.layout(&self.home).config_file();

        let on_disk = read_document(&path)?.unwrap_or_default();
        let merged = merge(on_disk, resolved.effective.clone());
        write_document(&path, &merged)?;

        tracing::debug!(scope = %resolved.scope, "settings saved");
        self.dirty = false;
        Ok(())
    }

    /// Drop the current resolution together with any unsaved changes.
    pub fn discard_changes(&mut self) {
        if self.dirty {
            tracing::debug!("discarding unsaved settings");
        }
        self.resolved = None;
        self.dirty = false;
    }

    /// Create a local scope for `project` as a copy of the global one.
    pub fn init_local(&self, project: &Path) -> Result<(), TemplgenError> {
        if self.has_local_settings(project) {
            return Err(TemplgenError::LocalScopeExists {
                path: project.to_path_buf(),
            });
        }
        self.ensure_integrity(&Scope::Global)?;
        let global = self.layout(&Scope::Global);
        let local = ScopeLayout::new(project);
        tracing::info!(path = %local.root().display(), "copying global settings");
        self.fs.copy_dir(global.root(), local.root())
    }

    /// Configured editor command, or [`FALLBACK_EDITOR`].
    pub fn text_editor(&self) -> String {
        match self.get(TEXT_EDITOR_KEY) {
            Ok(editor) if !editor.trim().is_empty() => editor.trim().to_string(),
            _ => FALLBACK_EDITOR.to_string(),
        }
    }

    /// Open `path` in the configured editor and wait for it to exit.
    pub fn open_in_editor(&self, path: &Path) -> Result<(), TemplgenError> {
        let argv = vec![self.text_editor(), path.display().to_string()];
        self.fs.run_command(&argv, &[])
    }

    /// Resolve `scope` and open its `main.cfg` in the configured editor.
    /// Returns the path that was edited.
    pub fn edit_config(&mut self, scope: &Scope) -> Result<PathBuf, TemplgenError> {
        self.read_settings_for_path(scope)?;
        let target = self
            .resolved_scope()
            .ok_or(TemplgenError::SettingsNotResolved)?;
        let path = self.layout(target).config_file();
        self.open_in_editor(&path)?;
        Ok(path)
    }
}

fn write_default_config(path: &Path) -> Result<(), TemplgenError> {
    write_document(path, &defaults::default_document::<MainConfig>()?)
}

fn load_values(path: &Path) -> Result<ConfigDocument, TemplgenError> {
    Ok(read_document(path)?.unwrap_or_default().values_only())
}
