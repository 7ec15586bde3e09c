use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use stringkit::{Entry, FileTypeParser, ParserOptions, StringsFileParser};
use tempfile::TempDir;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_.]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{0,30}").expect("valid value regex")
}

fn comment_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(
        proptest::string::string_regex("[A-Za-z0-9 ,\\.\n]{0,30}").expect("valid comment regex"),
    )
}

type Dataset = BTreeMap<String, (String, Option<String>)>;

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::btree_map(key_strategy(), (value_strategy(), comment_strategy()), 0..10)
}

fn render(dataset: &Dataset) -> String {
    let mut content = String::new();
    for (key, (value, comment)) in dataset {
        if let Some(comment) = comment {
            content.push_str(&format!("/* {} */\n", comment));
        }
        content.push_str(&format!("\"{}\" = \"{}\";\n\n", key, value));
    }
    content
}

fn encode(content: &str, utf16: bool) -> Vec<u8> {
    if utf16 {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(content.encode_utf16().flat_map(u16::to_le_bytes));
        bytes
    } else {
        content.as_bytes().to_vec()
    }
}

fn expected_comment(comment: &Option<String>) -> Option<String> {
    comment
        .as_deref()
        .map(str::trim)
        .filter(|comment| !comment.is_empty())
        .map(str::to_string)
}

fn parse(dataset: &Dataset, utf16: bool) -> Vec<Entry> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Localizable.strings");
    fs::write(&path, encode(&render(dataset), utf16)).unwrap();

    StringsFileParser::new(ParserOptions::default())
        .parse_file(&path)
        .unwrap()
}

proptest! {
    #[test]
    fn prop_entry_keys_match_decoded_keys(dataset in dataset_strategy(), utf16 in any::<bool>()) {
        let entries = parse(&dataset, utf16);

        let keys = entries.iter().map(|e| e.key.clone()).collect::<BTreeSet<_>>();
        prop_assert_eq!(entries.len(), dataset.len());
        prop_assert_eq!(keys, dataset.keys().cloned().collect::<BTreeSet<_>>());
    }

    #[test]
    fn prop_comments_match_preceding_blocks(dataset in dataset_strategy(), utf16 in any::<bool>()) {
        let entries = parse(&dataset, utf16);

        for entry in entries {
            let (value, comment) = &dataset[&entry.key];
            prop_assert_eq!(&entry.translation, value);
            prop_assert_eq!(entry.comment, expected_comment(comment));
        }
    }

    #[test]
    fn prop_parsing_twice_gives_same_entries(dataset in dataset_strategy()) {
        let mut first = parse(&dataset, false);
        let mut second = parse(&dataset, false);
        first.sort_by(|a, b| a.key.cmp(&b.key));
        second.sort_by(|a, b| a.key.cmp(&b.key));
        prop_assert_eq!(first, second);
    }
}
