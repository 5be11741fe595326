//! Strips markup from free-text input before it is sent to the API: script and
//! style blocks are dropped with their content, any other tag is removed,
//! and `javascript:` URLs are neutralized. Text between tags is kept.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};
use tracing::warn;

static BLOCKS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(r"(?is)<\s*(script|style|iframe|object)\b.*?(<\s*/\s*(script|style|iframe|object)\s*>|$)")
});

static TAGS: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"(?s)</?[A-Za-z!][^>]*>?"));

static SCHEMES: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\b(javascript|vbscript|data)\s*:"));

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|err| warn!("invalid sanitizer pattern {pattern}: {err}"))
        .ok()
}

fn strip<'a>(regex: &LazyLock<Option<Regex>>, input: &'a str) -> Cow<'a, str> {
    match &**regex {
        Some(regex) => regex.replace_all(input, ""),
        None => Cow::Borrowed(input),
    }
}

#[must_use]
pub fn sanitize_input(input: &str) -> String {
    let without_blocks = strip(&BLOCKS, input);
    let without_tags = strip(&TAGS, &without_blocks);
    strip(&SCHEMES, &without_tags).into_owned()
}

/// Sanitized and trimmed; used for identifiers such as names and emails.
#[must_use]
pub fn sanitize_field(input: &str) -> String {
    sanitize_input(input).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert!(BLOCKS.is_some());
        assert!(TAGS.is_some());
        assert!(SCHEMES.is_some());
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_input("Ada Lovelace"), "Ada Lovelace");
        assert_eq!(sanitize_input("p@ss w0rd!<3"), "p@ss w0rd!<3");
        assert_eq!(sanitize_input("a < b && c > d"), "a < b && c > d");
    }

    #[test]
    fn script_blocks_are_removed_with_content() {
        assert_eq!(
            sanitize_input("Ada<script>alert('x')</script> L"),
            "Ada L"
        );
        assert_eq!(sanitize_input("x<SCRIPT src=a.js>"), "x");
    }

    #[test]
    fn tags_are_stripped_but_text_kept() {
        assert_eq!(sanitize_input("<b>bold</b> move"), "bold move");
        assert_eq!(sanitize_input("<img src=x onerror=alert(1)>hi"), "hi");
    }

    #[test]
    fn script_urls_are_neutralized() {
        assert_eq!(sanitize_input("javascript:alert(1)"), "alert(1)");
    }

    #[test]
    fn sanitize_field_trims() {
        assert_eq!(sanitize_field("  a@x.com <i></i> "), "a@x.com");
    }
}
