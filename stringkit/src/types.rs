//! Entries and catalogs produced by the parsers.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// A single localization key with its translation and recovered comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Entry {
    /// The key exactly as decoded from the catalog.
    pub key: String,

    /// The translated text. Placeholders are left untouched.
    pub translation: String,

    /// Developer comment found right before the key in the raw file.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// The key split on the configured separator, e.g. `["alert", "title"]`
    /// for `alert.title` with a `.` separator.
    pub key_structure: Vec<String>,
}

impl Entry {
    /// Builds an entry without a comment, splitting `key` on `separator`.
    pub fn new(key: impl Into<String>, translation: impl Into<String>, separator: &str) -> Self {
        let key = key.into();
        let key_structure = split_key(&key, separator);
        Entry {
            key,
            translation: translation.into(),
            comment: None,
            key_structure,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ key: {}, translation: {}, comment: {:?} }}",
            self.key, self.translation, self.comment
        )
    }
}

/// Empty components are dropped; a key with no usable component keeps itself
/// as the only one.
fn split_key(key: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![key.to_string()];
    }

    let components = key
        .split(separator)
        .filter(|component| !component.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    if components.is_empty() {
        vec![key.to_string()]
    } else {
        components
    }
}

/// Everything parsed from one catalog file.
///
/// `entries` are in no particular order; sort them if order matters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    /// The file the catalog was read from.
    pub path: PathBuf,

    /// Table name, i.e. the file stem (`Localizable` for `Localizable.strings`).
    pub table: String,

    /// Language of the enclosing `<language>.lproj` directory, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub language: Option<String>,

    pub entries: Vec<Entry>,
}

impl Catalog {
    pub fn new<P: AsRef<Path>>(path: P, entries: Vec<Entry>) -> Self {
        let path = path.as_ref();
        let table = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Catalog {
            path: path.to_path_buf(),
            table,
            language: infer_language_from_path(path),
            entries,
        }
    }

    /// Looks up an entry by its exact key.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language.as_deref()?.parse().ok()
    }

    /// Sorts entries by key. The parsers never do this on their own.
    pub fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

/// Looks for the nearest `{lang}.lproj` directory above `path`.
///
/// `Base.lproj` is kept as is; other names must be valid language identifiers.
fn infer_language_from_path(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    parent.components().rev().find_map(|component| {
        let name = component.as_os_str().to_str()?.strip_suffix(".lproj")?;
        if name == "Base" || name.parse::<LanguageIdentifier>().is_ok() {
            Some(name.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_structure_uses_separator() {
        let entry = Entry::new("alert.title", "Title", ".");
        assert_eq!(entry.key_structure, vec!["alert", "title"]);
        assert_eq!(entry.comment, None);

        let entry = Entry::new("alert__message", "Body", "__");
        assert_eq!(entry.key_structure, vec!["alert", "message"]);
    }

    #[test]
    fn test_entry_key_structure_drops_empty_components() {
        let entry = Entry::new("a..b.", "x", ".");
        assert_eq!(entry.key_structure, vec!["a", "b"]);

        let entry = Entry::new("...", "x", ".");
        assert_eq!(entry.key_structure, vec!["..."]);
    }

    #[test]
    fn test_entry_empty_separator_keeps_whole_key() {
        let entry = Entry::new("apples.count", "%d apples", "");
        assert_eq!(entry.key_structure, vec!["apples.count"]);
    }

    #[test]
    fn test_entry_serialization_skips_missing_comment() {
        let entry = Entry::new("a", "x", ".");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("comment").is_none());

        let entry = entry.with_comment(Some("note".to_string()));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["comment"], "note");
    }

    #[test]
    fn test_catalog_infers_table_and_language() {
        let catalog = Catalog::new("App/fr.lproj/Localizable.strings", Vec::new());
        assert_eq!(catalog.table, "Localizable");
        assert_eq!(catalog.language.as_deref(), Some("fr"));
        assert_eq!(
            catalog.parse_language_identifier().unwrap().to_string(),
            "fr"
        );

        let catalog = Catalog::new("Base.lproj/Main.strings", Vec::new());
        assert_eq!(catalog.language.as_deref(), Some("Base"));
        assert!(catalog.parse_language_identifier().is_none());

        let catalog = Catalog::new("Resources/Localizable.strings", Vec::new());
        assert_eq!(catalog.language, None);
    }

    #[test]
    fn test_catalog_ignores_invalid_lproj_names() {
        let catalog = Catalog::new("not a language!.lproj/Localizable.strings", Vec::new());
        assert_eq!(catalog.language, None);
    }

    #[test]
    fn test_catalog_lookup_and_sort() {
        let mut catalog = Catalog::new(
            "Localizable.strings",
            vec![Entry::new("b", "2", "."), Entry::new("a", "1", ".")],
        );
        assert_eq!(catalog.entry("a").unwrap().translation, "1");
        assert!(catalog.entry("c").is_none());

        catalog.sort_entries();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
