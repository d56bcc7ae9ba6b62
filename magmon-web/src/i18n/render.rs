use crate::i18n::bundle::{lookup, translations};
use serde_json::Value;
use std::collections::BTreeMap;

fn plural_category(count: f64) -> &'static str {
    if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else if count.abs() < f64::EPSILON {
        "zero"
    } else {
        "other"
    }
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<f64>().ok());
            count
                .and_then(|n| map.get(plural_category(n)))
                .or_else(|| map.get("other"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{{{k}}}}}"), v);
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

/// Translate a key; unknown keys render as themselves.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, substituting `{name}` placeholders from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    lookup(translations(), key)
        .and_then(|value| render_value(value, args))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_selection_defaults() {
        let value = serde_json::json!({"one": "{count} player", "other": "{count} players"});
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(render_value(&value, Some(&args)).as_deref(), Some("1 player"));
        args.insert("count", "4");
        assert_eq!(render_value(&value, Some(&args)).as_deref(), Some("4 players"));
    }

    #[test]
    fn interpolation_handles_braced_forms() {
        let value = Value::String("Welcome, {name}! {{name}}!".into());
        let mut args = BTreeMap::new();
        args.insert("name", "Ana");
        assert_eq!(
            render_value(&value, Some(&args)).as_deref(),
            Some("Welcome, Ana! Ana!")
        );
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        assert_eq!(t("nope.missing"), "nope.missing");
        assert_eq!(t("nav.brand"), "MagMon");
    }
}
