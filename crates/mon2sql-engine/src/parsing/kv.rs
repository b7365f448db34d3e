/// Value that only opens a nested block and carries no data.
pub const OPEN_BRACE: &str = "{";

/// Result of splitting an interior line into key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValue {
    /// No colon on the line: closes the innermost nested block.
    NoSeparator,
    /// Colon found but no quoted key before it.
    MissingKey,
    /// Normalized key and cleaned value.
    Pair { key: String, value: String },
}

/// Splits an interior line on its first colon.
pub fn split_key_value(line: &str) -> KeyValue {
    let Some((key_segment, value_segment)) = line.split_once(':') else {
        return KeyValue::NoSeparator;
    };

    match quoted(key_segment) {
        Some(raw_key) => KeyValue::Pair {
            key: normalize_key(raw_key),
            value: clean_value(value_segment),
        },
        None => KeyValue::MissingKey,
    }
}

/// Text between the first pair of double quotes.
pub fn quoted(segment: &str) -> Option<&str> {
    let (_, after_open) = segment.split_once('"')?;
    let (inner, _) = after_open.split_once('"')?;
    Some(inner)
}

/// `" Total Batches-Created "` becomes `total_batches_created`.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace([' ', '-'], "_").to_lowercase()
}

/// Strips layout noise from a raw value: surrounding whitespace, box-drawing
/// characters, quotes, and trailing commas.
pub fn clean_value(raw: &str) -> String {
    let without_noise: String = raw
        .trim()
        .chars()
        .filter(|c| !is_box_drawing(*c) && *c != '"')
        .collect();
    without_noise
        .trim()
        .trim_end_matches(',')
        .trim()
        .to_string()
}

fn is_box_drawing(c: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&c)
}
