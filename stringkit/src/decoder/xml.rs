//! XML property lists holding a single string dictionary.
//!
//! Some tools export `.strings` files as XML plists. Only a top-level `<dict>`
//! of `<key>`/`<string>` pairs is accepted.

use std::{collections::HashMap, fmt::Display};

use quick_xml::{
    Reader,
    events::{BytesStart, BytesText, Event},
};

use crate::error::DecodeError;

pub fn decode(text: &str) -> Result<HashMap<String, String>, DecodeError> {
    let mut reader = Reader::from_str(text);

    loop {
        match next_element(&mut reader)? {
            Element::Start(name) if name == "plist" => {}
            Element::Start(name) if name == "dict" => return decode_dict(&mut reader),
            Element::Empty(name) if name == "dict" => return Ok(HashMap::new()),
            Element::Start(name) | Element::Empty(name) => {
                return Err(DecodeError::UnexpectedType {
                    expected: "dictionary",
                    found: name,
                });
            }
            Element::End(_) => {}
            Element::Eof => return Err(DecodeError::Xml("missing root <dict>".to_string())),
        }
    }
}

enum Element {
    Start(String),
    Empty(String),
    End(String),
    Eof,
}

fn xml_error(error: impl Display) -> DecodeError {
    DecodeError::Xml(error.to_string())
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn is_blank(text: &BytesText) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Reads up to the next element boundary, skipping prolog, comments and
/// whitespace between elements.
fn next_element(reader: &mut Reader<&[u8]>) -> Result<Element, DecodeError> {
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => return Ok(Element::Start(element_name(&e))),
            Event::Empty(e) => return Ok(Element::Empty(element_name(&e))),
            Event::End(e) => {
                return Ok(Element::End(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ));
            }
            Event::Eof => return Ok(Element::Eof),
            Event::Text(t) if is_blank(&t) => {}
            Event::Text(_) | Event::CData(_) => {
                return Err(DecodeError::Xml(
                    "unexpected text between elements".to_string(),
                ));
            }
            _ => {}
        }
    }
}

fn decode_dict(reader: &mut Reader<&[u8]>) -> Result<HashMap<String, String>, DecodeError> {
    let mut mapping = HashMap::new();

    loop {
        let key = match next_element(reader)? {
            Element::Start(name) if name == "key" => read_text(reader, "key")?,
            Element::Empty(name) if name == "key" => String::new(),
            Element::End(name) if name == "dict" => return Ok(mapping),
            Element::Start(name) | Element::Empty(name) => {
                return Err(DecodeError::Xml(format!("expected <key>, found <{name}>")));
            }
            Element::End(name) => {
                return Err(DecodeError::Xml(format!("unexpected </{name}>")));
            }
            Element::Eof => {
                return Err(DecodeError::Xml("unterminated <dict>".to_string()));
            }
        };

        let value = match next_element(reader)? {
            Element::Start(name) if name == "string" => read_text(reader, "string")?,
            Element::Empty(name) if name == "string" => String::new(),
            Element::Start(name) | Element::Empty(name) => {
                return Err(DecodeError::UnexpectedType {
                    expected: "string",
                    found: name,
                });
            }
            Element::End(_) | Element::Eof => {
                return Err(DecodeError::Xml(format!("missing value for key `{key}`")));
            }
        };

        if mapping.contains_key(&key) {
            return Err(DecodeError::DuplicateKey(key));
        }
        mapping.insert(key, value);
    }
}

/// Collects the text content of the element just opened, unescaped and with
/// whitespace preserved.
fn read_text(reader: &mut Reader<&[u8]>, element: &str) -> Result<String, DecodeError> {
    let mut value = String::new();
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Text(t) => value.push_str(&t.unescape().map_err(xml_error)?),
            Event::CData(c) => value.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::Comment(_) => {}
            Event::End(e) if e.name().as_ref() == element.as_bytes() => return Ok(value),
            Event::Eof => return Err(DecodeError::Xml(format!("unterminated <{element}>"))),
            _ => {
                return Err(DecodeError::Xml(format!(
                    "unexpected markup inside <{element}>"
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn plist(body: &str) -> String {
        format!(
            indoc! {r#"
                <?xml version="1.0" encoding="UTF-8"?>
                <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
                <plist version="1.0">
                {}
                </plist>
            "#},
            body
        )
    }

    #[test]
    fn test_decode_string_dictionary() {
        let text = plist(indoc! {r#"
            <dict>
                <!-- ignored -->
                <key>greeting</key>
                <string>Hello &amp; welcome</string>
                <key>empty</key>
                <string/>
            </dict>
        "#});
        let mapping = decode(&text).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["greeting"], "Hello & welcome");
        assert_eq!(mapping["empty"], "");
    }

    #[test]
    fn test_decode_preserves_whitespace_and_cdata() {
        let text = plist("<dict><key>k</key><string>  padded <![CDATA[<raw>]]> </string></dict>");
        assert_eq!(decode(&text).unwrap()["k"], "  padded <raw> ");
    }

    #[test]
    fn test_decode_empty_dictionary() {
        assert!(decode(&plist("<dict/>")).unwrap().is_empty());
        assert!(decode(&plist("<dict></dict>")).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_dictionary_root() {
        let err = decode(&plist("<array><string>a</string></array>")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedType {
                expected: "dictionary",
                found: "array".to_string()
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_string_values() {
        let err = decode(&plist("<dict><key>n</key><integer>3</integer></dict>")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedType {
                expected: "string",
                found: "integer".to_string()
            }
        );

        let err = decode(&plist("<dict><key>d</key><dict/></dict>")).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedType { expected: "string", .. }));
    }

    #[test]
    fn test_decode_rejects_duplicate_keys() {
        let text = plist(
            "<dict><key>a</key><string>1</string><key>a</key><string>2</string></dict>",
        );
        assert_eq!(
            decode(&text).unwrap_err(),
            DecodeError::DuplicateKey("a".to_string())
        );
    }

    #[test]
    fn test_decode_reports_malformed_xml() {
        let err = decode("<plist><dict><key>a</key><string>b</dict></plist>").unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));

        let err = decode("<plist><dict><key>a</key>").unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));
    }
}
