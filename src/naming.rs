//! Filename and heading conventions for markdown content.
//!
//! Blog posts live in `blog/NNN-slug.md`: the number orders the listing and
//! the rest becomes the URL slug. Titles come from the first `# heading` of the
//! body, falling back to the slug with dashes turned into spaces:
//!
//! - `010-spring-wedding-trends.md` → number 10, slug `spring-wedding-trends`
//! - `privacy.md` without a heading → title "privacy"

/// Result of parsing a stem like `010-spring-wedding-trends`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-spring-wedding-trends`)
    pub number: Option<u32>,
    /// Part after `NNN-`, dashes preserved. The full input when unnumbered.
    pub slug: String,
    /// Slug with dashes converted to spaces.
    pub display_title: String,
}

/// Parse a file stem following the `NNN-slug` convention.
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_digit())
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            slug: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    ParsedName {
        number: None,
        slug: stem.to_string(),
        display_title: stem.replace('-', " "),
    }
}

/// Text of the first level-one heading (`# Title`), if any.
pub fn heading_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Markdown body with its leading `# heading` removed, so the title is not
/// rendered twice on pages that show it separately.
pub fn strip_heading(markdown: &str) -> &str {
    let trimmed = markdown.trim_start();
    if trimmed.starts_with("# ") {
        match trimmed.find('\n') {
            Some(pos) => trimmed[pos + 1..].trim_start(),
            None => "",
        }
    } else {
        markdown
    }
}
