//! Parsers for single `.strings` files and for directories of them.
//!
//! [`StringsFileParser`] runs the two passes over one file: the structured
//! decode, which is mandatory, then the comment scan, which is best-effort.
//! [`StringsParser`] feeds files or whole directories through it and keeps
//! one [`Catalog`] per table.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    decoder,
    error::Error,
    merge,
    options::ParserOptions,
    scanner::{self, ScanError},
    traits::FileTypeParser,
    types::{Catalog, Entry},
};

/// Parser for Apple `.strings` files.
///
/// `.strings` files are generally UTF-16, not UTF-8, so every read goes
/// through the encoding-aware helpers in [`crate::text`].
#[derive(Debug, Clone, Default)]
pub struct StringsFileParser {
    options: ParserOptions,
}

impl FileTypeParser for StringsFileParser {
    const EXTENSIONS: &'static [&'static str] = &["strings"];

    fn new(options: ParserOptions) -> Self {
        StringsFileParser { options }
    }

    /// Decodes the file, then re-reads it to recover comments.
    ///
    /// Fails only when the file cannot be read or decoded. Entries come back
    /// in no particular order.
    fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Entry>, Error> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = decoder::decode(&bytes).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), keys = decoded.len(), "decoded catalog");

        Ok(self.attach_comments(path, decoded, scanner::scan_file(path)))
    }
}

impl StringsFileParser {
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Merges the scan result into the decoded entries. A failed scan leaves
    /// every entry without a comment.
    fn attach_comments(
        &self,
        path: &Path,
        decoded: HashMap<String, String>,
        scanned: Result<HashMap<String, String>, ScanError>,
    ) -> Vec<Entry> {
        let comments = scanned.unwrap_or_else(|error| {
            debug!(path = %path.display(), %error, "continuing without comments");
            HashMap::new()
        });
        merge::merge(decoded, comments, &self.options.separator)
    }

    /// Like [`FileTypeParser::parse_file`], but keeps the file's table name
    /// and language alongside the entries.
    pub fn parse_catalog<P: AsRef<Path>>(&self, path: P) -> Result<Catalog, Error> {
        let entries = self.parse_file(&path)?;
        Ok(Catalog::new(path, entries))
    }
}

/// Collects catalogs from files and directories, one per table name.
#[derive(Debug, Default)]
pub struct StringsParser {
    file_parser: StringsFileParser,
    tables: BTreeMap<String, Catalog>,
}

impl StringsParser {
    pub fn new(options: ParserOptions) -> Self {
        StringsParser {
            file_parser: StringsFileParser::new(options),
            tables: BTreeMap::new(),
        }
    }

    /// Parses a single catalog file, or every supported file directly inside
    /// a directory.
    ///
    /// Inside a directory, files of other types are skipped; a file passed
    /// explicitly must be supported.
    pub fn parse<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();

        if !path.is_dir() {
            if !StringsFileParser::supports(path) {
                return Err(Error::UnsupportedFile(path.to_path_buf()));
            }
            return self.parse_into_tables(path);
        }

        let load_error = |source| Error::Load {
            path: path.to_path_buf(),
            source,
        };
        let mut files = fs::read_dir(path)
            .map_err(load_error)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<PathBuf>, _>>()
            .map_err(load_error)?;
        files.retain(|file| file.is_file() && StringsFileParser::supports(file));
        files.sort();

        for file in files {
            self.parse_into_tables(&file)?;
        }
        Ok(())
    }

    fn parse_into_tables(&mut self, path: &Path) -> Result<(), Error> {
        let catalog = self.file_parser.parse_catalog(path)?;
        if let Some(existing) = self.tables.get(&catalog.table) {
            return Err(Error::DuplicateTable {
                table: catalog.table,
                first: existing.path.clone(),
                second: catalog.path,
            });
        }
        self.tables.insert(catalog.table.clone(), catalog);
        Ok(())
    }

    /// Catalogs parsed so far, keyed by table name.
    pub fn tables(&self) -> &BTreeMap<String, Catalog> {
        &self.tables
    }

    pub fn into_tables(self) -> BTreeMap<String, Catalog> {
        self.tables
    }
}
