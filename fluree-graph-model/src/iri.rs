//! IRI text helpers: legalization and identifier casing

use percent_encoding::percent_encode_byte;

/// Generic delimiters and sub-delimiters reserved by RFC 3986
const RESERVED_OFFICIAL: &str = ":/?#[]@!$&'()*+,;=";

/// Characters that are not reserved but never valid unescaped in an IRI
const RESERVED_UNOFFICIAL: &str = " {}<>";

/// Reserved characters that are only encoded inside an authority segment
const AUTHORITY_ONLY: &str = "@():";

fn is_reserved(c: char, authority: bool) -> bool {
    if !authority && AUTHORITY_ONLY.contains(c) {
        return false;
    }
    RESERVED_OFFICIAL.contains(c) || RESERVED_UNOFFICIAL.contains(c)
}

/// Percent-encode the reserved ASCII characters of `text`
///
/// Non-ASCII text is kept as-is; IRIs allow it.
///
/// ```
/// use fluree_graph_model::iri::legalize;
///
/// assert_eq!(legalize("a b/c", false), "a%20b%2Fc");
/// assert_eq!(legalize("user@host", false), "user@host");
/// assert_eq!(legalize("user@host", true), "user%40host");
/// ```
pub fn legalize(text: &str, authority: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() && is_reserved(c, authority) {
            out.push_str(percent_encode_byte(c as u8));
        } else {
            out.push(c);
        }
    }
    out
}

/// Legalize each `/`-separated segment of a path, keeping the separators
pub fn legalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| legalize(segment, false))
        .collect::<Vec<_>>()
        .join("/")
}

/// Local name of an IRI: the text after the last `#` or `/`
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['#', '/']);
    match trimmed.rfind(['#', '/']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Split an identifier into words
///
/// Boundaries are non-alphanumeric characters, a lowercase letter or digit
/// followed by an uppercase letter, and the last capital of an acronym
/// followed by a lowercase letter (`HTTPServer` → `HTTP`, `Server`).
fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|j| chars.get(j)) {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = (prev.is_lowercase() || prev.is_numeric()) && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            if (lower_to_upper || acronym_end) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    // acronyms stay as written
    if word.chars().all(|c| !c.is_lowercase()) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Class-style identifier: `"research paper"` → `"ResearchPaper"`
pub fn pascal_case(text: &str) -> String {
    split_words(text).iter().map(|w| capitalize(w)).collect()
}

/// Property-style identifier: `"Has Author"` → `"hasAuthor"`
pub fn camel_case(text: &str) -> String {
    let pascal = pascal_case(text);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legalize_reserved() {
        assert_eq!(legalize("a#b?c", false), "a%23b%3Fc");
        assert_eq!(legalize("{x}<y>", false), "%7Bx%7D%3Cy%3E");
        assert_eq!(legalize("f(x):y", false), "f(x):y");
        assert_eq!(legalize("f(x):y", true), "f%28x%29%3Ay");
        assert_eq!(legalize("l'été", false), "l%27été");
    }

    #[test]
    fn test_legalize_path_keeps_separators() {
        assert_eq!(legalize_path("Class/Person Name"), "Class/Person%20Name");
        assert_eq!(legalize_path("/a//b/"), "a/b");
        assert_eq!(legalize_path(""), "");
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://www.w3.org/2000/01/rdf-schema#Resource"), "Resource");
        assert_eq!(local_name("http://example.org/a/b"), "b");
        assert_eq!(local_name("http://example.org/a/"), "a");
        assert_eq!(local_name("plain"), "plain");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("person"), "Person");
        assert_eq!(pascal_case("research paper"), "ResearchPaper");
        assert_eq!(pascal_case("research_paper"), "ResearchPaper");
        assert_eq!(pascal_case("HTTPServer"), "HTTPServer");
        assert_eq!(pascal_case("ResearchPaper"), "ResearchPaper");
        assert_eq!(pascal_case("  -leading"), "Leading");
        assert_eq!(pascal_case("version2name"), "Version2name");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("has author"), "hasAuthor");
        assert_eq!(camel_case("HasAuthor"), "hasAuthor");
        assert_eq!(camel_case("hasAuthor"), "hasAuthor");
        assert_eq!(camel_case("is-part-of"), "isPartOf");
        assert_eq!(camel_case(""), "");
    }
}
