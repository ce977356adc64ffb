const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens user-provided text for logging and redacts credential-like values.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let cut: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", cut, total)
    } else {
        trimmed.to_string()
    };

    redact(&visible)
}

fn redact(text: &str) -> String {
    let mut result = text.to_string();
    for prefix in SENSITIVE_PREFIXES {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(prefix) {
            let value_start = search_from + found + prefix.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }
    result
}
