use crate::document::ConfigDocument;

/// Merge `overlay` on top of `base`.
/// Sections missing from `base` are appended; within a section each overlay
/// entry replaces the base entry with the same key and kind, or is appended.
/// A documentation entry never replaces a value entry, and vice versa.
pub fn merge(mut base: ConfigDocument, overlay: ConfigDocument) -> ConfigDocument {
    for section in overlay.into_sections() {
        let target = base.section_mut(section.name());
        for entry in section.into_entries() {
            target.insert(entry);
        }
    }
    base
}
