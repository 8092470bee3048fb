use serde_json::Value;

pub const DEFAULT_SORT_ORDER: i64 = 0;

/// Trim a string field, treating empty-after-trim as absent.
pub fn trim_to_option(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Treat empty query values as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse the leading integer of `raw` (`"12abc"` -> 12), falling back to `default`
/// when there is none.
pub fn parse_int_lenient(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(default)
}

/// Canonical integer sort order from whatever the client sent.
///
/// Integers pass through, finite floats are truncated, numeric strings are
/// parsed; anything else yields [`DEFAULT_SORT_ORDER`].
pub fn normalize_sort_order(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(DEFAULT_SORT_ORDER),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(DEFAULT_SORT_ORDER)
        }
        _ => DEFAULT_SORT_ORDER,
    }
}

/// Default logo for an http(s) URL: the favicon service base followed by the
/// URL's host segment. The built-in service gets a larger-image modifier.
pub fn derive_logo(url: &str, icon_api: &str, explicitly_configured: bool) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split('/').next().unwrap_or_default();
    // No host, no favicon: `https:///x` stores no logo at all
    if host.is_empty() {
        return None;
    }

    let mut logo = format!("{}{}", icon_api, host);
    if !explicitly_configured {
        logo.push_str(crate::config::DEFAULT_ICON_SUFFIX);
    }
    Some(logo)
}
