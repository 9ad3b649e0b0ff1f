//! Slug generation for new items.

/// Turns a human title into a directory-safe slug.
///
/// Lowercases the title, drops everything except ASCII letters, digits,
/// whitespace and dashes, then joins words with single dashes.
///
/// # Examples
///
/// ```
/// # use constellation_content::slugify;
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Generative   Audio -- Lab "), "generative-audio-lab");
/// ```
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
