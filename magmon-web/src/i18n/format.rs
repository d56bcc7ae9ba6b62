use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar date for display, e.g. `2025-03-14` → `Mar 14, 2025`.
///
/// Timestamps are cut to their date part; anything unparseable is shown as is.
#[must_use]
pub fn fmt_date(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok())
}

/// Timestamp in the browser's locale, with a fixed host fallback.
#[must_use]
pub fn fmt_datetime(raw: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
        if !date.get_time().is_nan() {
            if let Some(text) = date
                .to_locale_string(super::LANG, &wasm_bindgen::JsValue::UNDEFINED)
                .as_string()
            {
                return text;
            }
        }
    }
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_in_long_form() {
        assert_eq!(fmt_date("2025-03-14"), "Mar 14, 2025");
        assert_eq!(fmt_date("2025-03-04T19:00:00"), "Mar 4, 2025");
        assert_eq!(fmt_date("soon"), "soon");
    }

    #[test]
    fn timestamps_fall_back_on_host() {
        assert_eq!(fmt_datetime("2025-03-14T19:05:00"), "2025-03-14 19:05");
        assert_eq!(fmt_datetime("2025-03-14T19:05:00.123456"), "2025-03-14 19:05");
        assert_eq!(fmt_datetime("2025-03-14T19:05:00+00:00"), "2025-03-14 19:05");
        assert_eq!(fmt_datetime("2025-03-14 19:05:00"), "2025-03-14 19:05");
        assert_eq!(fmt_datetime("never"), "never");
    }
}
