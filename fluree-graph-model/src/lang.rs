//! BCP-47 language tag normalization
//!
//! Only the common shape is handled: a 2-3 letter primary language followed
//! by optional script, region, and variant subtags. Case is normalized the
//! conventional way (`en-us` → `en-US`, `zh-hant-tw` → `zh-Hant-TW`).

/// Normalize a language tag, or `None` when it cannot be parsed
pub fn normalize_language(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    let mut subtags = tag.split(['-', '_']);
    let primary = subtags.next()?;
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut out = primary.to_ascii_lowercase();
    for subtag in subtags {
        let normalized = normalize_subtag(subtag)?;
        out.push('-');
        out.push_str(&normalized);
    }
    Some(out)
}

fn normalize_subtag(subtag: &str) -> Option<String> {
    let alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
    let digits = subtag.chars().all(|c| c.is_ascii_digit());
    let alnum = subtag.chars().all(|c| c.is_ascii_alphanumeric());
    match subtag.len() {
        // region
        2 if alpha => Some(subtag.to_ascii_uppercase()),
        3 if digits => Some(subtag.to_string()),
        // script
        4 if alpha => {
            let lower = subtag.to_ascii_lowercase();
            let mut chars = lower.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        }
        // variant
        4..=8 if alnum => Some(subtag.to_ascii_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case() {
        assert_eq!(normalize_language("EN").as_deref(), Some("en"));
        assert_eq!(normalize_language("en-us").as_deref(), Some("en-US"));
        assert_eq!(normalize_language("en_gb").as_deref(), Some("en-GB"));
        assert_eq!(normalize_language("zh-hant-tw").as_deref(), Some("zh-Hant-TW"));
        assert_eq!(normalize_language("es-419").as_deref(), Some("es-419"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(normalize_language(""), None);
        assert_eq!(normalize_language("english"), None);
        assert_eq!(normalize_language("e"), None);
        assert_eq!(normalize_language("en--us"), None);
        assert_eq!(normalize_language("en-u$"), None);
    }
}
