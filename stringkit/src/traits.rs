//! Traits for parsing one kind of catalog file.

use std::path::Path;

use crate::{error::Error, options::ParserOptions, types::Entry};

/// A parser for a single file type, selected by extension.
///
/// # Example
///
/// ```rust,no_run
/// use stringkit::{FileTypeParser, ParserOptions, StringsFileParser};
///
/// let parser = StringsFileParser::new(ParserOptions::default());
/// let entries = parser.parse_file("en.lproj/Localizable.strings")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait FileTypeParser {
    /// Lowercase file extensions handled by this parser, without the dot.
    const EXTENSIONS: &'static [&'static str];

    fn new(options: ParserOptions) -> Self
    where
        Self: Sized;

    /// Parse every entry of the file at `path`.
    fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Entry>, Error>;

    /// Whether `path` has one of [`Self::EXTENSIONS`].
    fn supports<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|extension| {
                Self::EXTENSIONS
                    .iter()
                    .any(|supported| extension.eq_ignore_ascii_case(supported))
            })
    }
}
