//! In-memory model of an INI config file.
//!
//! A [`ConfigDocument`] is an ordered list of [`Section`]s, each an ordered list
//! of [`Entry`]s. Order is insertion order and is what the writer emits.
//!
//! Every entry is either a value or a documentation note ([`EntryKind`]).
//! Documentation entries exist for humans reading the file; lookups through
//! [`ConfigDocument::get`] only ever see values. A value and a documentation
//! note may share a key without shadowing each other. On disk the distinction
//! is encoded as a trailing [`DOC_MARKER`] on the key (see [`crate::persist`]).

/// Trailing character that marks a documentation key on disk.
pub const DOC_MARKER: char = '*';

/// Suffix appended to documentation keys when writing.
pub const DOC_SUFFIX: &str = "***";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Value,
    Doc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: EntryKind::Value,
        }
    }

    pub fn doc(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: text.into(),
            kind: EntryKind::Doc,
        }
    }

    pub fn is_doc(&self) -> bool {
        self.kind == EntryKind::Doc
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Value stored under `key`, ignoring documentation entries.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key, EntryKind::Value)
            .map(|entry| entry.value.as_str())
    }

    /// Documentation text stored for `key`, if any.
    pub fn doc(&self, key: &str) -> Option<&str> {
        self.find(key, EntryKind::Doc).map(|entry| entry.value.as_str())
    }

    pub fn contains(&self, key: &str, kind: EntryKind) -> bool {
        self.find(key, kind).is_some()
    }

    /// Insert an entry, replacing in place any entry with the same key and kind.
    pub fn insert(&mut self, entry: Entry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.key == entry.key && e.kind == entry.kind)
        {
            Some(existing) => existing.value = entry.value,
            None => self.entries.push(entry),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.insert(Entry::value(key, value));
    }

    pub(crate) fn last_entry_mut(&mut self) -> Option<&mut Entry> {
        self.entries.last_mut()
    }

    fn find(&self, key: &str, kind: EntryKind) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.key == key && entry.kind == kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Section named `name`, appended empty if missing.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.section_mut(section).set(key, value);
    }

    /// Copy of this document with documentation entries removed.
    /// Sections left without entries are kept.
    pub fn values_only(&self) -> ConfigDocument {
        let sections = self
            .sections
            .iter()
            .map(|section| Section {
                name: section.name.clone(),
                entries: section
                    .entries
                    .iter()
                    .filter(|entry| !entry.is_doc())
                    .cloned()
                    .collect(),
            })
            .collect();
        ConfigDocument { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_entries_are_invisible_to_get() {
        let mut doc = ConfigDocument::new();
        doc.section_mut("GENERAL")
            .insert(Entry::doc("current_user", "Name of currently selected user"));
        assert_eq!(doc.get("GENERAL", "current_user"), None);

        doc.set("GENERAL", "current_user", "alice");
        assert_eq!(doc.get("GENERAL", "current_user"), Some("alice"));
        assert_eq!(
            doc.section("GENERAL").unwrap().doc("current_user"),
            Some("Name of currently selected user")
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut section = Section::new("GENERAL");
        section.set("a", "1");
        section.set("b", "2");
        section.set("a", "3");
        let keys: Vec<&str> = section.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(section.get("a"), Some("3"));
    }

    #[test]
    fn section_mut_appends_in_order() {
        let mut doc = ConfigDocument::new();
        doc.section_mut("B");
        doc.section_mut("A");
        doc.section_mut("B");
        let names: Vec<&str> = doc.sections().iter().map(Section::name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn values_only_strips_docs() {
        let mut doc = ConfigDocument::new();
        let general = doc.section_mut("GENERAL");
        general.insert(Entry::doc("text_editor", "Editor command"));
        general.set("text_editor", "vim");

        let values = doc.values_only();
        let general = values.section("GENERAL").unwrap();
        assert_eq!(general.entries().len(), 1);
        assert_eq!(general.get("text_editor"), Some("vim"));
    }
}
