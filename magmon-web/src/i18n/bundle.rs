use once_cell::sync::Lazy;
use serde_json::Value;

/// Language of the embedded bundle.
pub const LANG: &str = "en";

static TRANSLATIONS: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../i18n/en.json")).unwrap_or_else(|err| {
        log::error!("i18n bundle failed to parse: {err}");
        Value::Object(serde_json::Map::new())
    })
});

pub(super) fn translations() -> &'static Value {
    &TRANSLATIONS
}

pub(super) fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

/// Whether `key` resolves to a string in the bundle.
#[must_use]
pub fn has_key(key: &str) -> bool {
    lookup(translations(), key).is_some_and(Value::is_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_parses_to_an_object() {
        assert!(translations().is_object());
        assert!(has_key("nav.brand"));
        assert!(!has_key("nav"));
    }

    #[test]
    fn nested_lookup_walks_dots() {
        let value: Value = serde_json::json!({"a": {"b": {"c": "deep"}}});
        assert_eq!(lookup(&value, "a.b.c").and_then(Value::as_str), Some("deep"));
        assert!(lookup(&value, "a.x").is_none());
    }
}
