//! Formatting utilities for file sizes and timestamps.

use wasm_bindgen::JsValue;

/// Format a byte count in kilobytes with two decimals (e.g., "2.00 KB").
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Format an epoch-millisecond timestamp in the browser's locale and time zone.
pub fn format_timestamp(epoch_ms: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(epoch_ms as f64));
    String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
}

/// Format an optional expiry timestamp; missing expiry reads "Never".
pub fn format_expiry(epoch_ms: Option<i64>) -> String {
    epoch_ms.map_or_else(|| "Never".to_string(), format_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size_kb(0), "0.00 KB");
        assert_eq!(format_size_kb(2048), "2.00 KB");
        assert_eq!(format_size_kb(1500), "1.46 KB");
    }

    #[test]
    fn test_missing_expiry_reads_never() {
        assert_eq!(format_expiry(None), "Never");
    }
}
