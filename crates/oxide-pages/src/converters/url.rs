//! URL string helpers shared by the emitters.

use std::cmp::Ordering;

/// Characters `encodePath`-style encoding leaves untouched besides ASCII
/// alphanumerics.
const PATH_SAFE: &[char] = &[
    '-', '_', '.', '~', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', ':', '@', '/', '|',
];

/// Percent-encodes static path text, leaving URL path punctuation intact,
/// then escapes literal colons so routers do not read them as params.
#[must_use]
pub fn encode_path(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || PATH_SAFE.contains(&c) {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    encoded.replace(':', "\\:")
}

/// Joins two URL fragments with exactly one slash between them.
///
/// An empty or `/` fragment leaves the base unchanged.
#[must_use]
pub fn join_url(base: &str, input: &str) -> String {
    if input.is_empty() || input == "/" {
        return base.to_string();
    }
    if base.is_empty() {
        return input.to_string();
    }
    let input = input.strip_prefix("./").or_else(|| input.strip_prefix('/')).unwrap_or(input);
    if base.ends_with('/') {
        format!("{base}{input}")
    } else {
        format!("{base}/{input}")
    }
}

/// Prefixes a slash unless one is already present.
#[must_use]
pub fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Alphabetical comparison close to a root-locale collation: punctuation
/// sorts before digits, digits before letters, case is ignored first, then
/// lowercase comes before uppercase.
///
/// Unlike full collation, punctuation is never ignored and characters
/// compare one at a time.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let folded = a.chars().map(collation_key).cmp(b.chars().map(collation_key));
    folded.then_with(|| b.cmp(a))
}

/// Sort key of one character: its class, then its case-folded value.
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("about"), "about");
        assert_eq!(encode_path("hello world"), "hello%20world");
        assert_eq!(encode_path("a:b"), "a\\:b");
        assert_eq!(encode_path("café"), "caf%C3%A9");
        assert_eq!(encode_path("a#b?c"), "a%23b%3Fc");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "/about"), "/about");
        assert_eq!(join_url("/parent", "/child"), "/parent/child");
        assert_eq!(join_url("/parent/", "/child"), "/parent/child");
        assert_eq!(join_url("/parent", "/"), "/parent");
        assert_eq!(join_url("", "/"), "");
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("about", "Blog"), Ordering::Less);
        assert_eq!(natural_cmp("a", "A"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_character_classes() {
        assert_eq!(natural_cmp("[id].vue", "1.vue"), Ordering::Less);
        assert_eq!(natural_cmp("1.vue", "about.vue"), Ordering::Less);
        assert_eq!(natural_cmp("foo-bar", "foo/bar"), Ordering::Less);
        assert_eq!(natural_cmp("a-b", "ab"), Ordering::Less);
    }
}
