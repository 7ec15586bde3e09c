//! Structured decoding of catalog bytes into a key/translation mapping.
//!
//! This is the authoritative pass: every key and value the parsers return
//! comes from here, and any failure aborts the parse of the file.

pub mod binary;
pub mod openstep;
pub mod xml;

use std::collections::HashMap;

use crate::{error::DecodeError, text};

const BINARY_MAGIC: &[u8] = b"bplist";

/// The textual property-list flavours a catalog may be stored as.
///
/// Binary documents are recognised from their magic bytes before any text
/// decoding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Old-style `"key" = "value";` text, optionally wrapped in `{ }`.
    OpenStep,
    /// XML property list.
    Xml,
}

impl DocumentKind {
    /// Identifies the document kind from decoded text.
    pub fn detect(text: &str) -> Self {
        let head = text.trim_start();
        if head.starts_with("<?xml")
            || head.starts_with("<!DOCTYPE plist")
            || head.starts_with("<plist")
        {
            DocumentKind::Xml
        } else {
            DocumentKind::OpenStep
        }
    }
}

/// Decodes catalog bytes into a mapping from key to translation.
///
/// The top level must be a dictionary whose values are all strings, and keys
/// must be unique.
pub fn decode(bytes: &[u8]) -> Result<HashMap<String, String>, DecodeError> {
    if bytes.starts_with(BINARY_MAGIC) {
        return binary::decode(bytes);
    }

    let text = text::decode_bytes(bytes)?;
    match DocumentKind::detect(&text) {
        DocumentKind::Xml => xml::decode(&text),
        DocumentKind::OpenStep => openstep::decode(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_document_kind() {
        let xml = "\n<?xml version=\"1.0\"?><plist><dict/></plist>";
        assert_eq!(DocumentKind::detect(xml), DocumentKind::Xml);
        assert_eq!(DocumentKind::detect("<plist><dict/></plist>"), DocumentKind::Xml);
        assert_eq!(
            DocumentKind::detect("\"a\" = \"<plist>\";"),
            DocumentKind::OpenStep
        );
    }

    #[test]
    fn test_decode_accepts_binary() {
        let mut dict = plist::Dictionary::new();
        dict.insert("greeting".to_string(), plist::Value::String("hi".to_string()));
        let mut bytes = Vec::new();
        plist::Value::Dictionary(dict)
            .to_writer_binary(&mut bytes)
            .unwrap();

        let mapping = decode(&bytes).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["greeting"], "hi");
    }

    #[test]
    fn test_decode_dispatches_by_kind() {
        let mapping = decode(b"\"greeting\" = \"hi\";").unwrap();
        assert_eq!(mapping["greeting"], "hi");

        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>greeting</key><string>hi</string></dict></plist>"#;
        let mapping = decode(xml).unwrap();
        assert_eq!(mapping["greeting"], "hi");
    }

    #[test]
    fn test_decode_reports_bad_encoding() {
        assert!(matches!(
            decode(&[b'"', 0xC3, 0x28, b'"']),
            Err(DecodeError::InvalidEncoding { .. })
        ));
    }
}
