//! Reading and parsing INI config files.
//!
//! The accepted dialect:
//!
//! ```text
//! # full-line comment (also ';')
//! [GENERAL]
//! current_user*** = Name of currently selected user
//! current_user = alice
//! text_editor: vim
//! bare_key
//! description = first line
//!     continued on an indented line
//! ```
//!
//! Keys ending in `*` are documentation entries; the marker characters are
//! stripped and the entry is flagged [`EntryKind::Doc`]. A documentation key
//! needs no value. A bare (non-documentation) key has an empty value.
//!
//! Structural problems are reported as [`TemplgenError::ParseError`] with the
//! 1-based line number: entries before the first section header, unterminated
//! or empty headers, duplicate sections, duplicate keys within a section,
//! content that is not UTF-8.
//!
//! An indented line directly below an entry always continues it, even when it
//! starts with `#` or `;`. A blank line ends the continuation.
//!
//! A missing file is not an error here; [`read_document`] returns `None` and
//! the caller decides what absence means.

use std::path::Path;

use crate::document::{ConfigDocument, DOC_MARKER, Entry, EntryKind, Section};
use crate::error::TemplgenError;

/// Read and parse the config file at `path`. `Ok(None)` if it does not exist.
pub fn read_document(path: &Path) -> Result<Option<ConfigDocument>, TemplgenError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(TemplgenError::io(path, e)),
    };
    let content = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        TemplgenError::ParseError {
            path: path.to_path_buf(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            reason: "invalid UTF-8".into(),
        }
    })?;
    parse_document(&content, path).map(Some)
}

/// Pure function: parse INI text. `path` is only used for error messages.
pub fn parse_document(content: &str, path: &Path) -> Result<ConfigDocument, TemplgenError> {
    let mut document = ConfigDocument::new();
    let mut current: Option<Section> = None;
    // Continuation lines only attach to the entry on the line directly above.
    let mut can_continue = false;

    let fail = |line: usize, reason: String| TemplgenError::ParseError {
        path: path.to_path_buf(),
        line,
        reason,
    };

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            can_continue = false;
            continue;
        }
        if raw.starts_with(char::is_whitespace)
            && can_continue
            && let Some(entry) = current.as_mut().and_then(Section::last_entry_mut)
        {
            if !entry.value.is_empty() {
                entry.value.push('\n');
            }
            entry.value.push_str(line);
            continue;
        }

        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| fail(line_no, format!("unterminated section header '{line}'")))?
                .trim();
            if name.is_empty() {
                return Err(fail(line_no, "empty section name".into()));
            }
            if let Some(done) = current.take() {
                document.push_section(done);
            }
            if document.has_section(name) {
                return Err(fail(line_no, format!("duplicate section '{name}'")));
            }
            current = Some(Section::new(name));
            can_continue = false;
            continue;
        }

        let section = current
            .as_mut()
            .ok_or_else(|| fail(line_no, format!("entry '{line}' outside of any section")))?;

        let (raw_key, value) = match line.find(['=', ':']) {
            Some(pos) => (line[..pos].trim(), line[pos + 1..].trim()),
            None => (line, ""),
        };

        let entry = match raw_key.strip_suffix(DOC_MARKER) {
            Some(_) => Entry::doc(raw_key.trim_end_matches(DOC_MARKER).trim_end(), value),
            None => Entry::value(raw_key, value),
        };
        if entry.key.is_empty() {
            return Err(fail(line_no, "empty key".into()));
        }
        if section.contains(&entry.key, entry.kind) {
            let what = match entry.kind {
                EntryKind::Value => "key",
                EntryKind::Doc => "documentation key",
            };
            return Err(fail(
                line_no,
                format!("duplicate {what} '{}' in section '{}'", entry.key, section.name()),
            ));
        }
        section.insert(entry);
        can_continue = true;
    }

    if let Some(done) = current {
        document.push_section(done);
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<ConfigDocument, TemplgenError> {
        parse_document(content, Path::new("test.cfg"))
    }

    fn parse_error_line(content: &str) -> usize {
        match parse(content) {
            Err(TemplgenError::ParseError { line, .. }) => line,
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn parses_sections_and_values() {
        let doc = parse("[GENERAL]\ncurrent_user = alice\ntext_editor: vim\n\n[OTHER]\nx=1\n")
            .unwrap();
        assert_eq!(doc.get("GENERAL", "current_user"), Some("alice"));
        assert_eq!(doc.get("GENERAL", "text_editor"), Some("vim"));
        assert_eq!(doc.get("OTHER", "x"), Some("1"));
    }

    #[test]
    fn empty_content_is_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n\n").unwrap().is_empty());
    }

    #[test]
    fn doc_keys_are_flagged_and_stripped() {
        let doc = parse(
            "[GENERAL]\ncurrent_user*** = Name of currently selected user\ncurrent_user = \n",
        )
        .unwrap();
        let general = doc.section("GENERAL").unwrap();
        assert_eq!(general.entries().len(), 2);
        assert_eq!(general.doc("current_user"), Some("Name of currently selected user"));
        assert_eq!(general.get("current_user"), Some(""));
    }

    #[test]
    fn doc_key_without_value() {
        let doc = parse("[GENERAL]\nsee the docs*\n").unwrap();
        let general = doc.section("GENERAL").unwrap();
        assert_eq!(general.doc("see the docs"), Some(""));
        assert_eq!(general.get("see the docs"), None);
    }

    #[test]
    fn bare_key_has_empty_value() {
        let doc = parse("[GENERAL]\nflag\n").unwrap();
        assert_eq!(doc.get("GENERAL", "flag"), Some(""));
    }

    #[test]
    fn value_keeps_later_delimiters() {
        let doc = parse("[GENERAL]\nsite = https://example.com/a=b\n").unwrap();
        assert_eq!(doc.get("GENERAL", "site"), Some("https://example.com/a=b"));
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let doc = parse("[GENERAL]\nnote = first\n    second\n\tthird\n").unwrap();
        assert_eq!(doc.get("GENERAL", "note"), Some("first\nsecond\nthird"));
    }

    #[test]
    fn comments_are_skipped() {
        let doc = parse("; header\n[GENERAL]\n# note\nx = 1\n").unwrap();
        assert_eq!(doc.section("GENERAL").unwrap().entries().len(), 1);
    }

    #[test]
    fn entry_before_section_is_error() {
        assert_eq!(parse_error_line("x = 1\n"), 1);
    }

    #[test]
    fn unterminated_header_is_error() {
        assert_eq!(parse_error_line("[GENERAL]\nx = 1\n[BROKEN\n"), 3);
    }

    #[test]
    fn duplicate_section_is_error() {
        assert_eq!(parse_error_line("[A]\nx = 1\n[A]\n"), 3);
    }

    #[test]
    fn duplicate_key_is_error() {
        assert_eq!(parse_error_line("[A]\nx = 1\nx = 2\n"), 3);
    }

    #[test]
    fn empty_key_is_error() {
        assert_eq!(parse_error_line("[A]\n= 1\n"), 2);
    }

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = read_document(&dir.path().join("missing.cfg")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn read_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        fs::write(&path, "[GENERAL]\ntext_editor = vim\n").unwrap();
        let doc = read_document(&path).unwrap().unwrap();
        assert_eq!(doc.get("GENERAL", "text_editor"), Some("vim"));
    }

    #[test]
    fn indented_comment_marker_continues_value() {
        let doc = parse("[GENERAL]\nnote = first\n\t# second\n\t; third\n# real comment\n")
            .unwrap();
        assert_eq!(doc.get("GENERAL", "note"), Some("first\n# second\n; third"));
        assert_eq!(doc.section("GENERAL").unwrap().entries().len(), 1);
    }

    #[test]
    fn invalid_utf8_is_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        fs::write(&path, b"[GENERAL]\nname = \xff\n").unwrap();
        let err = read_document(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedConfig);
        assert!(matches!(err, TemplgenError::ParseError { line: 2, .. }));
    }

    #[test]
    fn read_malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.cfg");
        fs::write(&path, "orphan = 1\n").unwrap();
        match read_document(&path) {
            Err(TemplgenError::ParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }
}
