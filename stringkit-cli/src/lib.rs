//! Library half of the `stringkit` binary, split out so the pieces can be tested.

pub mod config;
pub mod json;
pub mod path_glob;
pub mod view;

use stringkit::Catalog;

pub use config::{Config, load_config};
pub use json::render_json;
pub use path_glob::expand_inputs;
pub use view::render_view;

/// Orders catalogs by table, then language, then path, and each catalog's
/// entries by key.
pub fn sort_catalogs(catalogs: &mut [Catalog]) {
    catalogs.sort_by(|a, b| {
        a.table
            .cmp(&b.table)
            .then_with(|| a.language.cmp(&b.language))
            .then_with(|| a.path.cmp(&b.path))
    });
    for catalog in catalogs.iter_mut() {
        catalog.sort_entries();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringkit::Entry;

    #[test]
    fn test_sort_catalogs() {
        let mut catalogs = vec![
            Catalog::new(
                "fr.lproj/Localizable.strings",
                vec![Entry::new("b", "B", "."), Entry::new("a", "A", ".")],
            ),
            Catalog::new("en.lproj/Localizable.strings", Vec::new()),
            Catalog::new("en.lproj/InfoPlist.strings", Vec::new()),
        ];
        sort_catalogs(&mut catalogs);

        let order: Vec<_> = catalogs
            .iter()
            .map(|c| (c.table.as_str(), c.language.as_deref()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("InfoPlist", Some("en")),
                ("Localizable", Some("en")),
                ("Localizable", Some("fr")),
            ]
        );
        assert_eq!(catalogs[2].keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
