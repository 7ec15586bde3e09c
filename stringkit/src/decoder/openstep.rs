//! Old-style (OpenStep) `.strings` documents.
//!
//! Accepts the strings-file dialect of the old-style property list: a
//! dictionary body with or without enclosing braces, `key = value;` and
//! `key;` pairs, quoted or unquoted strings, and `//` or `/* */` comments
//! wherever whitespace is allowed. Escapes follow CoreFoundation, including
//! octal and `\U` sequences.

use std::collections::HashMap;

use crate::error::DecodeError;

pub fn decode(text: &str) -> Result<HashMap<String, String>, DecodeError> {
    let mut reader = Reader::new(text);
    let mut mapping = HashMap::new();

    reader.skip_trivia()?;
    match reader.peek() {
        Some('(') => return Err(unexpected("dictionary", "array")),
        Some('<') => return Err(unexpected("dictionary", "data")),
        _ => {}
    }
    let braced = reader.eat('{');

    loop {
        reader.skip_trivia()?;
        match reader.peek() {
            None if braced => return Err(reader.error("expected `}` before end of input")),
            None => break,
            Some('}') if braced => {
                reader.bump();
                break;
            }
            Some(_) => {}
        }

        let key = reader.parse_string()?;
        reader.skip_trivia()?;

        let value = match reader.peek() {
            // `"key";` is shorthand for `"key" = "key";`
            Some(';') => key.clone(),
            Some('=') => {
                reader.bump();
                reader.skip_trivia()?;
                let value = reader.parse_value()?;
                reader.skip_trivia()?;
                value
            }
            None if !braced && mapping.is_empty() => {
                return Err(unexpected("dictionary", "string"));
            }
            _ => return Err(reader.error("expected `=` or `;` after key")),
        };

        if !reader.eat(';') {
            return Err(reader.error("expected `;` after value"));
        }
        if mapping.contains_key(&key) {
            return Err(DecodeError::DuplicateKey(key));
        }
        mapping.insert(key, value);
    }

    reader.skip_trivia()?;
    if reader.peek().is_some() {
        return Err(reader.error("unexpected content after `}`"));
    }

    Ok(mapping)
}

fn unexpected(expected: &'static str, found: &str) -> DecodeError {
    DecodeError::UnexpectedType {
        expected,
        found: found.to_string(),
    }
}

fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

/// Position in the source, 1-based.
#[derive(Debug, Clone, Copy)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

struct Reader<'a> {
    text: &'a str,
    mark: Mark,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Reader {
            text,
            mark: Mark {
                position: 0,
                line: 1,
                column: 1,
            },
        }
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.mark.position..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.mark.position += c.len_utf8();
        if c == '\n' {
            self.mark.line += 1;
            self.mark.column = 1;
        } else {
            self.mark.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> DecodeError {
        self.error_at(self.mark, message)
    }

    fn error_at(&self, mark: Mark, message: &str) -> DecodeError {
        DecodeError::syntax(mark.line, mark.column, message)
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), DecodeError> {
        loop {
            while self
                .peek()
                .is_some_and(|c| c.is_whitespace() || c == '\u{feff}')
            {
                self.bump();
            }

            let rest = self.remaining();
            if rest.starts_with("//") {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else if rest.starts_with("/*") {
                let start = self.mark;
                let Some(end) = rest[2..].find("*/") else {
                    return Err(self.error_at(start, "unterminated comment"));
                };
                // `/*` + body + `*/`, counted in chars to keep columns right.
                let length = rest[..end + 4].chars().count();
                for _ in 0..length {
                    self.bump();
                }
            } else {
                return Ok(());
            }
        }
    }

    fn parse_value(&mut self) -> Result<String, DecodeError> {
        match self.peek() {
            Some('{') => Err(unexpected("string", "dictionary")),
            Some('(') => Err(unexpected("string", "array")),
            Some('<') => Err(unexpected("string", "data")),
            _ => self.parse_string(),
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote),
            Some(c) if is_unquoted_char(c) => Ok(self.parse_unquoted()),
            Some(_) => Err(self.error("expected a string")),
            None => Err(self.error("expected a string before end of input")),
        }
    }

    fn parse_unquoted(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek().filter(|c| is_unquoted_char(*c)) {
            value.push(c);
            self.bump();
        }
        value
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, DecodeError> {
        let start = self.mark;
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error_at(start, "unterminated quoted string")),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    let Some(c) = self.parse_escape() else {
                        return Err(self.error_at(start, "unterminated quoted string"));
                    };
                    value.push(c);
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Decodes the escape after a backslash. `None` at end of input.
    fn parse_escape(&mut self) -> Option<char> {
        let c = match self.bump()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            digit @ '0'..='7' => self.parse_octal(digit),
            'u' | 'U' => self.parse_unicode(),
            other => other,
        };
        Some(c)
    }

    /// Up to three octal digits naming one byte in the NeXTSTEP encoding.
    /// Values past `\377` wrap around, so `\400` is NUL.
    fn parse_octal(&mut self, first: char) -> char {
        let mut byte = first.to_digit(8).unwrap_or_default() as u8;
        for _ in 0..2 {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(8)) else {
                break;
            };
            byte = byte.wrapping_mul(8).wrapping_add(digit as u8);
            self.bump();
        }
        nextstep_char(byte)
    }

    /// Up to four hex digits naming a UTF-16 code unit. A high surrogate
    /// followed by an escaped low surrogate yields one character.
    fn parse_unicode(&mut self) -> char {
        let high = self.parse_hex_unit();
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(u32::from(high)).unwrap_or(char::REPLACEMENT_CHARACTER);
        }

        let saved = self.mark;
        if self.remaining().starts_with("\\u") || self.remaining().starts_with("\\U") {
            self.bump();
            self.bump();
            let low = self.parse_hex_unit();
            if (0xDC00..0xE000).contains(&low) {
                return char::decode_utf16([high, low])
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
            }
            self.mark = saved;
        }
        char::REPLACEMENT_CHARACTER
    }

    fn parse_hex_unit(&mut self) -> u16 {
        let mut unit = 0u16;
        for _ in 0..4 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    unit = unit * 16 + digit as u16;
                    self.bump();
                }
                None => break,
            }
        }
        unit
    }
}

/// NeXTSTEP encoding for bytes `0x80..=0xFF`; the lower half is ASCII.
#[rustfmt::skip]
const NEXTSTEP_HIGH: [char; 128] = [
    '\u{A0}', 'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
    'Ð', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', 'Ù', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'µ', '×', '÷',
    '©', '¡', '¢', '£', '⁄', '¥', 'ƒ', '§', '¤', '\u{2019}', '\u{201C}', '«', '‹', '›', 'ﬁ', 'ﬂ',
    '®', '–', '†', '‡', '·', '¦', '¶', '•', '‚', '„', '\u{201D}', '»', '…', '‰', '¬', '¿',
    '¹', 'ˋ', '´', 'ˆ', '˜', '¯', '˘', '˙', '¨', '²', '˚', '¸', '³', '˝', '˛', 'ˇ',
    '—', '±', '¼', '½', '¾', 'à', 'á', 'â', 'ã', 'ä', 'å', 'ç', 'è', 'é', 'ê', 'ë',
    'ì', 'Æ', 'í', 'ª', 'î', 'ï', 'ð', 'ñ', 'Ł', 'Ø', 'Œ', 'º', 'ò', 'ó', 'ô', 'õ',
    'ö', 'æ', 'ù', 'ú', 'û', 'ı', 'ü', 'ý', 'ł', 'ø', 'œ', 'ß', 'þ', 'ÿ', '\u{FFFD}', '\u{FFFD}',
];

fn nextstep_char(byte: u8) -> char {
    if byte < 0x80 {
        char::from(byte)
    } else {
        NEXTSTEP_HIGH[usize::from(byte - 0x80)]
    }
}
