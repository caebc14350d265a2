//! Default contents of `main.cfg` and `user.cfg`, declared as confique structs.
//!
//! Each struct is the single source of truth for one file: nested fields are
//! INI sections (field name uppercased), leaf fields are keys,
//! `#[config(default = ...)]` gives the default value and the `///` doc comment
//! becomes both the documentation entry written next to the key and the
//! question asked when a profile is created interactively.
//!
//! Adding a field here is enough for it to appear in new files, in prompts,
//! and in the documentation entries.

use confique::Config;
use confique::meta::{FieldKind, Meta};
use serde::Serialize;

use crate::document::{ConfigDocument, Entry};
use crate::error::TemplgenError;
use crate::prompt::Prompt;

/// Section holding `current_user` and `text_editor`.
pub const GENERAL_SECTION: &str = "GENERAL";
pub const CURRENT_USER_KEY: &str = "current_user";
pub const TEXT_EDITOR_KEY: &str = "text_editor";

/// Editor used when `text_editor` is unset, empty or unreadable.
pub const FALLBACK_EDITOR: &str = "nano";

/// Layout of `main.cfg`.
#[derive(Config, Serialize, Debug)]
pub struct MainConfig {
    #[config(nested)]
    pub general: MainGeneral,
}

#[derive(Config, Serialize, Debug)]
pub struct MainGeneral {
    /// Name of currently selected user
    #[config(default = "")]
    pub current_user: String,

    /// Command used to open config files for editing
    #[config(default = "gedit")]
    pub text_editor: String,
}

/// Layout of a profile's `user.cfg`.
#[derive(Config, Serialize, Debug)]
pub struct UserConfig {
    #[config(nested)]
    pub general: UserGeneral,
}

#[derive(Config, Serialize, Debug)]
pub struct UserGeneral {
    /// User full name
    #[config(default = "")]
    pub full_name: String,

    /// Email
    #[config(default = "")]
    pub email: String,

    /// Personal site
    #[config(default = "")]
    pub site: String,
}

/// Document holding every field of `C` at its default value, each preceded by
/// its documentation entry.
pub fn default_document<C: Config + Serialize>() -> Result<ConfigDocument, TemplgenError> {
    build_document::<C, _>(|_, default| Ok(default))
}

/// Like [`default_document`] but asks for every field. An empty answer keeps
/// the default.
pub fn prompt_document<C: Config + Serialize>(
    prompt: &dyn Prompt,
) -> Result<ConfigDocument, TemplgenError> {
    build_document::<C, _>(|question, default| {
        let answer = prompt.prompt_line(&format!("{question}: "))?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default
        } else {
            answer.to_string()
        })
    })
}

fn build_document<C, F>(mut fill: F) -> Result<ConfigDocument, TemplgenError>
where
    C: Config + Serialize,
    F: FnMut(&str, String) -> Result<String, TemplgenError>,
{
    let config = C::builder().load()?;
    let value = toml::Value::try_from(&config).map_err(|e| TemplgenError::InvalidValue {
        key: C::META.name.into(),
        reason: e.to_string(),
    })?;
    let table = value.as_table().ok_or_else(|| TemplgenError::InvalidValue {
        key: C::META.name.into(),
        reason: "defaults did not serialize to a table".into(),
    })?;

    let mut document = ConfigDocument::new();
    for field in C::META.fields {
        // Top-level leaves have no section to live in.
        let FieldKind::Nested { meta, .. } = &field.kind else {
            continue;
        };
        let values = table.get(field.name).and_then(toml::Value::as_table);
        let section = document.section_mut(&field.name.to_uppercase());

        for leaf in leaf_fields(meta) {
            let doc = doc_text(leaf.doc);
            let default = values
                .and_then(|t| t.get(leaf.name))
                .map(format_value)
                .unwrap_or_default();
            let question = if doc.is_empty() { leaf.name } else { doc.as_str() };
            let value = fill(question, default)?;

            if !doc.is_empty() {
                section.insert(Entry::doc(leaf.name, doc.as_str()));
            }
            section.insert(Entry::value(leaf.name, value));
        }
    }
    Ok(document)
}

fn leaf_fields(meta: &'static Meta) -> impl Iterator<Item = &'static confique::meta::Field> {
    meta.fields
        .iter()
        .filter(|field| !matches!(field.kind, FieldKind::Nested { .. }))
}

fn doc_text(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a TOML value as an INI value.
fn format_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
