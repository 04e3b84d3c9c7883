/// Derive an UPPER_SNAKE_CASE constant name from a class name segment.
///
/// `MainActivity` -> `MAIN_ACTIVITY`, `HTTPClientActivity` -> `HTTP_CLIENT_ACTIVITY`,
/// `Outer$Inner` -> `OUTER_INNER`.
pub fn constant_name(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }

        out.extend(c.to_uppercase());
    }

    let trimmed = out.trim_end_matches('_');
    match trimmed.chars().next() {
        None => "_".to_string(),
        Some(first) if first.is_numeric() => format!("_{}", trimmed),
        Some(_) => trimmed.to_string(),
    }
}

/// Constant name for `class_name` qualified with its last `depth` package segments.
///
/// `depth` is clamped to the number of package segments available.
pub fn qualified_constant_name(class_name: &str, depth: usize) -> String {
    let segments: Vec<&str> = class_name.split('.').collect();
    let depth = depth.min(segments.len().saturating_sub(1));
    let mut parts: Vec<String> = segments[segments.len() - 1 - depth..]
        .iter()
        .map(|s| constant_name(s))
        .collect();

    // Leading underscores only make sense at the very front
    for part in parts.iter_mut().skip(1) {
        if let Some(stripped) = part.strip_prefix('_') {
            *part = stripped.to_string();
        }
    }
    parts.join("_")
}
