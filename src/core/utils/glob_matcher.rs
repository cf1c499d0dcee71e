//! Wildcard matching for keys declared in `i18n-keys` annotations.

/// Check if a key pattern contains wildcards.
pub fn is_key_pattern(pattern: &str) -> bool {
    pattern.contains('*')
}

/// Expand a key pattern against the keys of one namespace.
///
/// `*` never crosses a `.` boundary:
/// - `bmi.*` matches `bmi.low`, `bmi.high` but not `bmi.range.low`
/// - `steps[*].label` matches `steps[0].label`, `steps[1].label`
///
/// The result is sorted and contains each key once.
pub fn expand_key_pattern<'a>(
    pattern: &str,
    available_keys: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let pattern_segments: Vec<&str> = pattern.split('.').collect();

    let mut matched: Vec<String> = available_keys
        .into_iter()
        .filter(|key| matches_pattern(&pattern_segments, key))
        .map(str::to_string)
        .collect();
    matched.sort();
    matched.dedup();
    matched
}

fn matches_pattern(pattern_segments: &[&str], key: &str) -> bool {
    let key_segments: Vec<&str> = key.split('.').collect();

    pattern_segments.len() == key_segments.len()
        && pattern_segments
            .iter()
            .zip(&key_segments)
            .all(|(pattern, text)| segment_matches(pattern, text))
}

/// Match one segment, `*` matching zero or more characters.
fn segment_matches(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    let Some((first, rest)) = pattern.split_once('*') else {
        return pattern == text;
    };
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };

    let mut parts: Vec<&str> = rest.split('*').collect();
    let last = parts.pop().unwrap_or("");

    for part in parts {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(found) => remaining = &remaining[found + part.len()..],
            None => return false,
        }
    }

    remaining.ends_with(last)
}
