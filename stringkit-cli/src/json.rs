use stringkit::Catalog;

/// Serialize the catalogs as pretty-printed JSON.
pub fn render_json(catalogs: &[Catalog]) -> Result<String, String> {
    serde_json::to_string_pretty(catalogs).map_err(|e| format!("Error serializing to JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringkit::Entry;

    #[test]
    fn test_render_json_shape() {
        let catalog = Catalog::new(
            "Localizable.strings",
            vec![Entry::new("alert.title", "Title", ".").with_comment(Some("Shown on top".to_string()))],
        );
        let json = render_json(&[catalog]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["table"], "Localizable");
        assert!(value[0].get("language").is_none());
        let entry = &value[0]["entries"][0];
        assert_eq!(entry["key"], "alert.title");
        assert_eq!(entry["translation"], "Title");
        assert_eq!(entry["comment"], "Shown on top");
        assert_eq!(entry["key_structure"], serde_json::json!(["alert", "title"]));
    }
}
