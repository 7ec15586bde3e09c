#![forbid(unsafe_code)]
//! Apple `.strings` catalog reader that keeps developer comments.
//!
//! A `.strings` file is decoded as a property list, which is the authority on
//! keys and translations but loses every `/* comment */`. The file is then
//! scanned a second time as plain text to pair each comment with the key that
//! follows it, and the two results are merged by exact key.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringkit::{FileTypeParser, ParserOptions, StringsFileParser};
//!
//! let parser = StringsFileParser::new(ParserOptions::default());
//! let mut catalog = parser.parse_catalog("en.lproj/Localizable.strings")?;
//!
//! // Entries come back unordered.
//! catalog.sort_entries();
//! for entry in &catalog.entries {
//!     println!("{} = {} ({:?})", entry.key, entry.translation, entry.comment);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Failure model
//!
//! - Reading or decoding the file can fail; the [`Error`] names the file.
//! - Recovering comments cannot fail. If the text cannot be read or a comment
//!   is malformed, affected entries simply have no comment.

pub mod decoder;
pub mod error;
pub mod merge;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod text;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::{DecodeError, Error},
    options::ParserOptions,
    parser::{StringsFileParser, StringsParser},
    traits::FileTypeParser,
    types::{Catalog, Entry},
};
