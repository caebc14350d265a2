//! Config persistence: render a [`ConfigDocument`] as INI text and write it.
//!
//! Writes go to a temporary file in the destination directory which is then
//! renamed over the target, so an interrupted write leaves the previous file
//! intact. Parent directories are created as needed.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::document::{ConfigDocument, DOC_MARKER, DOC_SUFFIX, EntryKind};
use crate::error::TemplgenError;

/// Pure function: render a document in section/entry insertion order.
///
/// Sections are separated by a blank line. Documentation entries get the
/// [`DOC_SUFFIX`] marker; multi-line values continue on tab-indented lines.
///
/// Fails with [`TemplgenError::InvalidValue`] for section names, keys or
/// values that would read back as a different document.
pub fn render_document(document: &ConfigDocument) -> Result<String, TemplgenError> {
    let mut out = String::new();
    for section in document.sections() {
        check_section(section.name())?;
        out.push('[');
        out.push_str(section.name());
        out.push_str("]\n");
        for entry in section.entries() {
            check_entry(section.name(), &entry.key, &entry.value)?;
            out.push_str(&entry.key);
            if entry.kind == EntryKind::Doc {
                out.push_str(DOC_SUFFIX);
                if entry.value.is_empty() {
                    out.push('\n');
                    continue;
                }
            }
            out.push_str(" =");
            if !entry.value.is_empty() {
                out.push(' ');
                out.push_str(&entry.value.replace('\n', "\n\t"));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    Ok(out)
}

fn check_section(name: &str) -> Result<(), TemplgenError> {
    let reason = if name.is_empty() {
        "section name is empty"
    } else if name.trim() != name {
        "section name has surrounding whitespace"
    } else if name.contains('\n') {
        "section name spans lines"
    } else {
        return Ok(());
    };
    Err(TemplgenError::InvalidValue {
        key: format!("[{name}]"),
        reason: reason.into(),
    })
}

/// Keys must be single-line, trimmed, free of `=` and `:`, must not end in the
/// documentation marker and must not look like a comment or header. Every
/// line of a value must be trimmed, and a multi-line value has no empty lines.
fn check_entry(section: &str, key: &str, value: &str) -> Result<(), TemplgenError> {
    let key_reason = if key.is_empty() {
        Some("key is empty")
    } else if key.trim() != key || key.contains('\n') {
        Some("key has surrounding whitespace or spans lines")
    } else if key.contains(['=', ':']) {
        Some("key contains a delimiter ('=' or ':')")
    } else if key.ends_with(DOC_MARKER) {
        Some("key ends with the documentation marker '*'")
    } else if key.starts_with(['#', ';', '[']) {
        Some("key starts with a comment or header character")
    } else {
        None
    };

    let lines: Vec<&str> = value.split('\n').collect();
    let value_reason = if lines.iter().any(|line| line.trim() != *line) {
        Some("value line has surrounding whitespace")
    } else if lines.len() > 1 && lines.iter().any(|line| line.is_empty()) {
        Some("multi-line value contains an empty line")
    } else {
        None
    };

    match key_reason.or(value_reason) {
        Some(reason) => Err(TemplgenError::InvalidValue {
            key: format!("{section}.{key}"),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

/// I/O wrapper: render `document` and atomically replace the file at `path`.
/// Nothing is written when the document cannot be rendered.
pub fn write_document(path: &Path, document: &ConfigDocument) -> Result<(), TemplgenError> {
    let text = render_document(document)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| TemplgenError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| TemplgenError::io(parent, e))?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| TemplgenError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| TemplgenError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), "config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Entry;
    use crate::file::{parse_document, read_document};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> ConfigDocument {
        let mut doc = ConfigDocument::new();
        let general = doc.section_mut("GENERAL");
        general.insert(Entry::doc("current_user", "Name of currently selected user"));
        general.set("current_user", "");
        general.set("text_editor", "gedit");
        doc.set("PATHS", "templates", "/srv/templates");
        doc
    }

    #[test]
    fn renders_in_insertion_order() {
        let text = render_document(&sample()).unwrap();
        assert_eq!(
            text,
            "[GENERAL]\n\
             current_user*** = Name of currently selected user\n\
             current_user =\n\
             text_editor = gedit\n\
             \n\
             [PATHS]\n\
             templates = /srv/templates\n\
             \n"
        );
    }

    #[test]
    fn doc_entry_without_text_has_no_delimiter() {
        let mut doc = ConfigDocument::new();
        doc.section_mut("GENERAL").insert(Entry::doc("note", ""));
        assert_eq!(render_document(&doc).unwrap(), "[GENERAL]\nnote***\n\n");
    }

    #[test]
    fn rendered_text_parses_back() {
        let mut doc = sample();
        doc.set("GENERAL", "motd", "line one\nline two");
        let parsed = parse_document(&render_document(&doc).unwrap(), Path::new("x.cfg")).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn comment_markers_in_continuation_round_trip() {
        let mut doc = sample();
        doc.set("GENERAL", "motd", "a\n# b\n; c");
        let parsed = parse_document(&render_document(&doc).unwrap(), Path::new("x.cfg")).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.get("GENERAL", "motd"), Some("a\n# b\n; c"));
    }

    fn render_error(section: &str, key: &str, value: &str) -> String {
        let mut doc = ConfigDocument::new();
        doc.set(section, key, value);
        match render_document(&doc) {
            Err(TemplgenError::InvalidValue { key, .. }) => key,
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_in_value_is_rejected() {
        assert_eq!(render_error("GENERAL", "motd", "a\n\nb"), "GENERAL.motd");
        render_error("GENERAL", "motd", "a\n   \nb");
    }

    #[test]
    fn unrepresentable_keys_are_rejected() {
        assert_eq!(render_error("GENERAL", "rating*", "5"), "GENERAL.rating*");
        render_error("GENERAL", "a=b", "1");
        render_error("GENERAL", "a:b", "1");
        render_error("GENERAL", "# x", "1");
        render_error("GENERAL", "[x", "1");
        render_error("GENERAL", " padded", "1");
        render_error("GENERAL", "", "1");
    }

    #[test]
    fn untrimmed_values_are_rejected() {
        render_error("GENERAL", "editor", "vim ");
        render_error("GENERAL", "editor", "vim\n trailing ");
    }

    #[test]
    fn bad_section_names_are_rejected() {
        assert_eq!(render_error(" G", "k", "v"), "[ G]");
        render_error("", "k", "v");
        render_error("A\nB", "k", "v");
    }

    #[test]
    fn write_rejects_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        fs::write(&path, "[GENERAL]\nx = 1\n").unwrap();
        let mut doc = ConfigDocument::new();
        doc.set("GENERAL", "motd", "a\n\nb");
        assert!(matches!(
            write_document(&path, &doc),
            Err(TemplgenError::InvalidValue { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[GENERAL]\nx = 1\n");
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(render_document(&ConfigDocument::new()).unwrap(), "");
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("main.cfg");
        write_document(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        fs::write(&path, "[OLD]\nstale = yes\n[MORE]\nx = 1\n").unwrap();

        let mut doc = ConfigDocument::new();
        doc.set("GENERAL", "current_user", "bob");
        write_document(&path, &doc).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        let read = read_document(&path).unwrap().unwrap();
        assert_eq!(read, doc);
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        write_document(&path, &sample()).unwrap();
        write_document(&path, &sample()).unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("main.cfg")]);
    }
}
