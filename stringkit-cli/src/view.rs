use std::fmt::Write;

use stringkit::Catalog;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Values wider than this many terminal columns are truncated unless `full` is set.
const MAX_VALUE_WIDTH: usize = 50;

fn truncate(value: &str, full: bool) -> String {
    let value = value.replace('\n', "\\n");
    if full || value.width() <= MAX_VALUE_WIDTH {
        return value;
    }

    let mut truncated = String::new();
    let mut width = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > MAX_VALUE_WIDTH {
            break;
        }
        width += w;
        truncated.push(c);
    }
    truncated.push_str("...");
    truncated
}

/// Render a human-readable view of the catalogs, in the order given.
pub fn render_view(catalogs: &[Catalog], full: bool) -> String {
    let mut out = String::new();

    for (i, catalog) in catalogs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match &catalog.language {
            Some(language) => {
                let _ = writeln!(out, "=== {} ({}) ===", catalog.table, language);
            }
            None => {
                let _ = writeln!(out, "=== {} ===", catalog.table);
            }
        }
        let _ = writeln!(out, "Path: {}", catalog.path.display());
        let _ = writeln!(out, "Entries: {}", catalog.entries.len());

        for entry in &catalog.entries {
            let _ = writeln!(out, "\n  {}", entry.key);
            if let Some(comment) = &entry.comment {
                let _ = writeln!(out, "    Comment: {}", comment.replace('\n', " "));
            }
            let _ = writeln!(out, "    Value: {}", truncate(&entry.translation, full));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringkit::Entry;

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("short", false), "short");

        let long = "a".repeat(60);
        assert_eq!(truncate(&long, false), format!("{}...", "a".repeat(50)));
        assert_eq!(truncate(&long, true), long);

        // Each CJK character is two columns wide.
        let wide = "語".repeat(30);
        assert_eq!(truncate(&wide, false), format!("{}...", "語".repeat(25)));
    }

    #[test]
    fn test_truncate_escapes_newlines() {
        assert_eq!(truncate("a\nb", false), "a\\nb");
    }

    #[test]
    fn test_render_view_lists_entries() {
        let catalog = Catalog::new(
            "en.lproj/Localizable.strings",
            vec![
                Entry::new("greeting", "hi", ".").with_comment(Some("A greeting".to_string())),
                Entry::new("plain", "text", "."),
            ],
        );
        let view = render_view(&[catalog], false);

        assert!(view.starts_with("=== Localizable (en) ===\n"));
        assert!(view.contains("Entries: 2"));
        assert!(view.contains("  greeting\n    Comment: A greeting\n    Value: hi\n"));
        assert!(view.contains("  plain\n    Value: text\n"));
    }
}
