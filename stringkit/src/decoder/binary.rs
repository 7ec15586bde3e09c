//! Binary property lists (`bplist00`), as Xcode writes them when a target
//! asks for binary `.strings` output.

use std::{collections::HashMap, io::Cursor};

use plist::Value;

use crate::error::DecodeError;

/// Decodes a binary property list whose top level is a dictionary of strings.
pub fn decode(bytes: &[u8]) -> Result<HashMap<String, String>, DecodeError> {
    let value =
        Value::from_reader(Cursor::new(bytes)).map_err(|e| DecodeError::Binary(e.to_string()))?;

    let Value::Dictionary(dict) = value else {
        return Err(DecodeError::UnexpectedType {
            expected: "dictionary",
            found: kind(&value).to_string(),
        });
    };

    let mut mapping = HashMap::with_capacity(dict.len());
    for (key, value) in dict {
        match value {
            Value::String(translation) => {
                mapping.insert(key, translation);
            }
            other => {
                return Err(DecodeError::UnexpectedType {
                    expected: "string",
                    found: kind(&other).to_string(),
                });
            }
        }
    }
    Ok(mapping)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Dictionary(_) => "dictionary",
        Value::Boolean(_) => "boolean",
        Value::Data(_) => "data",
        Value::Date(_) => "date",
        Value::Real(_) | Value::Integer(_) => "number",
        Value::String(_) => "string",
        _ => "value",
    }
}
