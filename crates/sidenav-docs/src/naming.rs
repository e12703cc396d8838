//! Name conventions shared by providers and sidebar generation.
//!
//! File and directory names may carry an ordering prefix: `02-guides`,
//! `010_setup.md`. The number becomes a sort position and is stripped from
//! ids and labels. Names without a prefix are left alone.

/// Result of splitting a `NNN-name` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPrefix<'a> {
    /// Number prefix if present (e.g., `2` for `02-guides`).
    pub number: Option<u32>,
    /// Name after the prefix. The full input when there is no prefix.
    pub name: &'a str,
}

/// Split a numeric ordering prefix from an entry name.
///
/// The prefix is one or more ASCII digits followed by `-`, `_` or `.`, and
/// must leave a non-empty name behind.
///
/// - `"02-guides"` → number 2, name "guides"
/// - `"010_setup"` → number 10, name "setup"
/// - `"1.intro"` → number 1, name "intro"
/// - `"2024-review"` → number 2024, name "review"
/// - `"guides"` → no number, name "guides"
/// - `"01-"` → no number, name "01-"
pub fn parse_number_prefix(name: &str) -> NumberPrefix<'_> {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = name[digits..].strip_prefix(['-', '_', '.'])
        && !rest.is_empty()
        && let Ok(number) = name[..digits].parse::<u32>()
    {
        return NumberPrefix { number: Some(number), name: rest };
    }
    NumberPrefix { number: None, name }
}

/// Strip a numeric ordering prefix, keeping the rest of the name.
#[must_use]
pub fn strip_number_prefix(name: &str) -> &str {
    parse_number_prefix(name).name
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
///
/// # Examples
///
/// ```
/// use sidenav_docs::naming::titlecase_from_slug;
///
/// assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
/// assert_eq!(titlecase_from_slug("my_page"), "My Page");
/// ```
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Human-readable label for a directory or file name.
///
/// Strips the number prefix, then title-cases the remainder.
#[must_use]
pub fn humanize_name(name: &str) -> String {
    titlecase_from_slug(strip_number_prefix(name))
}

/// Lowercase, dash-separated form of a label, suitable for URLs and keys.
///
/// # Examples
///
/// ```
/// use sidenav_docs::naming::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  API / v2  "), "api-v2");
/// ```
#[must_use]
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Returns true if a document name marks the index of its directory.
///
/// Matches `index`, `readme`, or the directory's own name, ignoring case and
/// number prefixes on both sides.
///
/// # Examples
///
/// ```
/// use sidenav_docs::naming::is_index_doc_name;
///
/// assert!(is_index_doc_name("README", "guides"));
/// assert!(is_index_doc_name("guides", "02-guides"));
/// assert!(!is_index_doc_name("setup", "guides"));
/// ```
#[must_use]
pub fn is_index_doc_name(name: &str, dir_name: &str) -> bool {
    let name = strip_number_prefix(name);
    let dir_name = strip_number_prefix(dir_name);
    name.eq_ignore_ascii_case("index")
        || name.eq_ignore_ascii_case("readme")
        || (!dir_name.is_empty() && name.to_lowercase() == dir_name.to_lowercase())
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
