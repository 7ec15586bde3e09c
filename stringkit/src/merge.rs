//! Overlays recovered comments onto decoded entries.

use std::collections::HashMap;

use tracing::debug;

use crate::types::Entry;

/// Builds one entry per decoded key and attaches the comment recorded under
/// the exact same key, if any.
///
/// Keys that only the scanner saw are dropped; they never become entries.
pub fn merge(
    decoded: HashMap<String, String>,
    mut comments: HashMap<String, String>,
    separator: &str,
) -> Vec<Entry> {
    let entries = decoded
        .into_iter()
        .map(|(key, translation)| {
            let comment = comments.remove(&key);
            Entry::new(key, translation, separator).with_comment(comment)
        })
        .collect::<Vec<_>>();

    if !comments.is_empty() {
        debug!(
            orphaned = comments.len(),
            "dropping comments whose key was not decoded"
        );
    }

    entries
}
