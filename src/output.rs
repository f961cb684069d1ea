//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Every record is listed by its positional index and title, with where it
//! came from as indented context. The output reads as a content inventory
//! while still letting an editor trace a line back to its file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Portfolio
//! 001 The Anderson Wedding [wedding, large, featured]
//!     A Garden Romance
//! 002 TechCorp Annual Gala [corporate, medium]
//!
//! Testimonials
//! 001 Sarah Anderson ★★★★★
//!
//! Blog
//! 001 Spring Wedding Trends → /blog/spring-wedding-trends
//!     Weddings · 5 min read
//!
//! Pages
//! 001 Our Story
//!     Source: about.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Elevate Events → index.html
//! Portfolio → portfolio/index.html
//!     001 The Anderson Wedding → portfolio/1/index.html
//!
//! Assets: 1 copied
//! style.css?v=3f2a9c0d41be
//! site.js?v=8be1d07aa9c2
//! Generated 19 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::carousel::stars;
use crate::contact::{ContactError, ContactSubmission};
use crate::generate::GenerateReport;
use crate::masonry::MasonryLayout;
use crate::scan::Manifest;
use crate::types::SizeHint;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with optional bracketed tags.
///
/// ```text
/// 001 The Anderson Wedding [wedding, large, featured]
/// 001 Our Story
/// ```
fn entity_header(index: usize, title: &str, tags: &[&str]) -> String {
    if tags.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} [{}]", format_index(index), title, tags.join(", "))
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn size_name(size: SizeHint) -> &'static str {
    match size {
        SizeHint::Small => "small",
        SizeHint::Medium => "medium",
        SizeHint::Large => "large",
    }
}

fn star_line(rating: u8) -> String {
    stars(rating)
        .iter()
        .map(|&filled| if filled { '★' } else { '☆' })
        .collect()
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: every record the manifest holds, section by section.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Portfolio".to_string());
    for (i, item) in manifest.portfolio.iter().enumerate() {
        let mut tags = vec![item.category.as_str(), size_name(item.size)];
        if item.featured {
            tags.push("featured");
        }
        lines.push(entity_header(i + 1, &item.title, &tags));
        if let Some(sub) = &item.subtitle {
            lines.push(format!("{}{}", indent(1), sub));
        }
    }

    if !manifest.testimonials.is_empty() {
        lines.push(String::new());
        lines.push("Testimonials".to_string());
        for (i, t) in manifest.testimonials.iter().enumerate() {
            lines.push(format!(
                "{} {} {}",
                format_index(i + 1),
                t.name,
                star_line(t.rating)
            ));
        }
    }

    if !manifest.services.is_empty() {
        lines.push(String::new());
        lines.push("Services".to_string());
        for (i, s) in manifest.services.iter().enumerate() {
            lines.push(format!(
                "{} {} ({} features)",
                format_index(i + 1),
                s.title,
                s.features.len()
            ));
        }
    }

    if !manifest.team.is_empty() {
        lines.push(String::new());
        lines.push("Team".to_string());
        for (i, m) in manifest.team.iter().enumerate() {
            lines.push(format!("{} {} ({})", format_index(i + 1), m.name, m.role));
        }
    }

    if !manifest.posts.is_empty() {
        lines.push(String::new());
        lines.push("Blog".to_string());
        for (i, post) in manifest.posts.iter().enumerate() {
            lines.push(format!(
                "{} {} → /blog/{}",
                format_index(i + 1),
                post.title,
                post.slug
            ));
            let details: Vec<&str> = [post.meta.category.as_str(), post.meta.read_time.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !details.is_empty() {
                lines.push(format!("{}{}", indent(1), details.join(" · ")));
            }
            if !post.meta.excerpt.is_empty() {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    truncate_desc(post.meta.excerpt.trim(), 60)
                ));
            }
        }
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            lines.push(entity_header(i + 1, &page.title, &[]));
            lines.push(format!("{}Source: {}.md", indent(1), page.slug));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join("assets").is_dir() {
        lines.push(format!("{}assets/", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generate output: each page with its output file. Detail pages are
/// numbered and nested under their listing.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for page in &report.pages {
        if page.route.parent().is_some() {
            position += 1;
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(position),
                page.title,
                page.file
            ));
        } else {
            position = 0;
            lines.push(format!("{} → {}", page.title, page.file));
        }
    }

    lines.push(String::new());
    lines.push(format!("Assets: {} copied", report.assets));
    lines.push(format!("style.css?v={}", report.css_hash));
    lines.push(format!("site.js?v={}", report.js_hash));
    lines.push(format!("Generated {} pages", report.pages.len()));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Layout output
// ============================================================================

/// Format a masonry layout as one line per tile.
///
/// ```text
/// 3 columns, 872px tall
///     001 #1 → column 1, top 0px, 400px
/// ```
pub fn format_layout(layout: &MasonryLayout) -> Vec<String> {
    let mut lines = vec![format!(
        "{} columns, {}px tall",
        layout.columns, layout.total_height
    )];
    for p in &layout.placements {
        lines.push(format!(
            "{}{} #{} → column {}, top {}px, {}px",
            indent(1),
            format_index(p.index + 1),
            p.id,
            p.column + 1,
            p.top,
            p.height
        ));
    }
    lines
}

pub fn print_layout(layout: &MasonryLayout) {
    for line in format_layout(layout) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact output
// ============================================================================

/// Format a validated enquiry. Nothing is sent anywhere; this is the whole
/// delivery path.
pub fn format_contact_submission(submission: &ContactSubmission) -> Vec<String> {
    let mut lines = vec![format!("Enquiry from {} <{}>", submission.name, submission.email)];
    let optional = [
        ("Phone", submission.phone.clone()),
        ("Event", submission.event_type.map(|t| t.label().to_string())),
        ("Date", submission.date.clone()),
        ("Guests", submission.guest_count.map(|n| n.to_string())),
        ("Budget", submission.budget.clone()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{}{}: {}", indent(1), label, value));
        }
    }
    lines.push(format!(
        "{}Message: {}",
        indent(1),
        truncate_desc(&submission.message, 60)
    ));
    lines
}

pub fn format_contact_errors(errors: &[ContactError]) -> Vec<String> {
    let mut lines = vec![format!("{} problem(s) with the enquiry", errors.len())];
    for e in errors {
        lines.push(format!("{}{}", indent(1), e));
    }
    lines
}

pub fn print_contact_submission(submission: &ContactSubmission) {
    for line in format_contact_submission(submission) {
        println!("{}", line);
    }
}

pub fn print_contact_errors(errors: &[ContactError]) {
    for line in format_contact_errors(errors) {
        eprintln!("{}", line);
    }
}
