const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Parses a file size limit like "50MB" or "1GB" into bytes.
///
/// Returns `None` for empty or unrecognized input; absence of a limit is not
/// an error.
pub fn parse_file_size_limit(text: &str) -> Option<u64> {
    let text = text.trim().to_ascii_uppercase();
    if text.is_empty() {
        return None;
    }

    let digits_end = text.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }

    let value: u64 = text[..digits_end].parse().ok()?;
    let rest = &text[digits_end..];

    // Absurdly large values overflow u64; treat them like any other
    // unrecognized input rather than panicking.
    if rest.starts_with("MB") {
        value.checked_mul(1024 * 1024)
    } else if rest.starts_with("GB") {
        value.checked_mul(1024 * 1024 * 1024)
    } else {
        None
    }
}

/// Formats a byte count as a human-readable string ("1.50 KB").
///
/// Returns `None` for a zero or missing size, mirroring the unknown-size
/// fields in resolver output.
pub fn human_readable_size(size_bytes: Option<u64>) -> Option<String> {
    let bytes = size_bytes.filter(|b| *b > 0)?;

    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return Some(format!("{size:.2} {unit}"));
        }
        size /= 1024.0;
    }

    Some(format!("{size:.2} PB"))
}

/// Extracts the first run of digits from a resolution label.
///
/// "1280x720" -> 1280, "720p" -> 720, no digits -> `None`.
pub fn resolution_to_number(label: &str) -> Option<u32> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let rest = &label[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    rest[..end].parse().ok()
}
