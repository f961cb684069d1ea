//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory into a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── portfolio.toml               # [[items]] past events for the gallery
//! ├── testimonials.toml            # [[testimonials]] carousel quotes
//! ├── services.toml                # [[services]] service cards
//! ├── team.toml                    # [[members]], [[stats]], [[values]]
//! ├── about.md                     # Story section of the about page
//! ├── privacy.md                   # Legal pages
//! ├── terms.md
//! ├── blog/
//! │   ├── 010-spring-trends.md     # Post (number orders the listing)
//! │   ├── 010-spring-trends.toml   # Optional metadata sidecar
//! │   └── 020-venue-guide.md
//! └── assets/                      # Copied verbatim to the output root
//! ```
//!
//! Every data file is optional; a missing file scans as an empty list.
//!
//! ## Validation
//!
//! - Portfolio, testimonial and service ids are unique within their file
//! - Post numbers and slugs are unique
//! - Testimonial ratings are within 0..=5
//! - Portfolio categories are non-empty single tokens and never `all`
//!   (the filter's catch-all value)

use crate::config::{self, SiteConfig};
use crate::naming::{heading_title, parse_entry_name};
use crate::types::{
    BlogPost, NavItem, Page, PortfolioItem, PostMeta, Service, Stat, TeamMember, Testimonial,
    Value, primary_nav,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate {kind} id {id:?}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Duplicate post number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Testimonial {id:?} has rating {rating}; ratings run from 0 to 5")]
    InvalidRating { id: String, rating: u8 },
    #[error("Portfolio item {id:?} has invalid category {category:?}")]
    InvalidCategory { id: String, category: String },
}

/// Everything the generate stage needs, serialized between stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub portfolio: Vec<PortfolioItem>,
    pub testimonials: Vec<Testimonial>,
    pub services: Vec<Service>,
    pub team: Vec<TeamMember>,
    pub stats: Vec<Stat>,
    pub values: Vec<Value>,
    pub posts: Vec<BlogPost>,
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn portfolio_item(&self, id: &str) -> Option<&PortfolioItem> {
        self.portfolio.iter().find(|i| i.id == id)
    }
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PortfolioFile {
    items: Vec<PortfolioItem>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct TestimonialsFile {
    testimonials: Vec<Testimonial>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ServicesFile {
    services: Vec<Service>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct TeamFile {
    members: Vec<TeamMember>,
    stats: Vec<Stat>,
    values: Vec<Value>,
}

/// Markdown pages read from the content root, in output order.
const PAGE_SLUGS: &[&str] = &["about", "privacy", "terms"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let portfolio = read_toml::<PortfolioFile>(&root.join("portfolio.toml"))?.items;
    check_unique("portfolio item", portfolio.iter().map(|i| i.id.as_str()))?;
    for item in &portfolio {
        check_category(item)?;
    }

    let testimonials = read_toml::<TestimonialsFile>(&root.join("testimonials.toml"))?.testimonials;
    check_unique("testimonial", testimonials.iter().map(|t| t.id.as_str()))?;
    if let Some(bad) = testimonials.iter().find(|t| t.rating > 5) {
        return Err(ScanError::InvalidRating {
            id: bad.id.clone(),
            rating: bad.rating,
        });
    }

    let services = read_toml::<ServicesFile>(&root.join("services.toml"))?.services;
    check_unique("service", services.iter().map(|s| s.id.as_str()))?;

    let team = read_toml::<TeamFile>(&root.join("team.toml"))?;

    let posts = scan_posts(&root.join("blog"))?;
    let pages = parse_pages(root)?;

    Ok(Manifest {
        navigation: primary_nav(),
        portfolio,
        testimonials,
        services,
        team: team.members,
        stats: team.stats,
        values: team.values,
        posts,
        pages,
        config,
    })
}

/// Parse a TOML data file; a missing file yields the type's default.
fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ScanError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ScanError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ScanError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScanError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_category(item: &PortfolioItem) -> Result<(), ScanError> {
    let c = &item.category;
    if c.is_empty() || c == "all" || c.chars().any(char::is_whitespace) {
        return Err(ScanError::InvalidCategory {
            id: item.id.clone(),
            category: c.clone(),
        });
    }
    Ok(())
}

/// Read `blog/*.md` with their optional `.toml` sidecars.
///
/// Numbered posts are listed by number; unnumbered posts follow, in filename
/// order.
fn scan_posts(dir: &Path) -> Result<Vec<BlogPost>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut md_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_extension(p, "md"))
        .collect();
    md_files.sort();

    let mut numbered: BTreeMap<u32, BlogPost> = BTreeMap::new();
    let mut unnumbered = Vec::new();
    let mut slugs = HashSet::new();

    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = parse_entry_name(&stem);

        if !slugs.insert(parsed.slug.clone()) {
            return Err(ScanError::DuplicateId {
                kind: "blog post",
                id: parsed.slug,
            });
        }

        let body = fs::read_to_string(md_path)?;
        let meta: PostMeta = read_toml(&md_path.with_extension("toml"))?;
        let title = heading_title(&body).unwrap_or_else(|| parsed.display_title.clone());

        let post = BlogPost {
            slug: parsed.slug,
            number: parsed.number.unwrap_or(u32::MAX),
            title,
            meta,
            body,
        };

        match parsed.number {
            Some(n) => {
                if numbered.insert(n, post).is_some() {
                    return Err(ScanError::DuplicateNumber(n, dir.to_path_buf()));
                }
            }
            None => unnumbered.push(post),
        }
    }

    let mut posts: Vec<BlogPost> = numbered.into_values().collect();
    posts.extend(unnumbered);
    Ok(posts)
}

/// Read the fixed set of markdown pages that exist in the content root.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut pages = Vec::new();
    for slug in PAGE_SLUGS {
        let path = root.join(format!("{slug}.md"));
        if !path.is_file() {
            continue;
        }
        let body = fs::read_to_string(&path)?;
        let title = heading_title(&body).unwrap_or_else(|| slug.replace('-', " "));
        pages.push(Page {
            slug: slug.to_string(),
            title,
            body,
        });
    }
    Ok(pages)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::SizeHint;
    use tempfile::TempDir;

    #[test]
    fn scan_reads_every_data_file() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.portfolio.len(), 7);
        assert_eq!(manifest.testimonials.len(), 3);
        assert_eq!(manifest.services.len(), 3);
        assert_eq!(manifest.team.len(), 2);
        assert_eq!(manifest.stats.len(), 3);
        assert_eq!(manifest.values.len(), 3);
        assert_eq!(manifest.posts.len(), 3);
        assert_eq!(manifest.pages.len(), 3);
    }

    #[test]
    fn navigation_is_primary_nav() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let labels: Vec<&str> = manifest.navigation.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Home", "About", "Services", "Portfolio", "Blog", "Contact"]
        );
    }

    #[test]
    fn portfolio_defaults_apply() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let item = find_item(&manifest, "6");
        assert_eq!(item.size, SizeHint::Small);
        let item = find_item(&manifest, "7");
        assert_eq!(item.size, SizeHint::Medium);
        assert!(!item.featured);
    }

    #[test]
    fn portfolio_detail_fields() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let item = find_item(&manifest, "1");
        assert_eq!(item.guest_count, Some(180));
        assert!(item.testimonial.is_some());
    }

    #[test]
    fn posts_sorted_by_number_with_sidecar_meta() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            post_slugs(&manifest),
            vec!["spring-wedding-trends", "corporate-gala-planning", "intimate-celebrations"]
        );
        let first = find_post(&manifest, "spring-wedding-trends");
        assert_eq!(first.title, "Spring Wedding Trends");
        assert_eq!(first.meta.category, "Weddings");
        assert!(first.meta.featured);
    }

    #[test]
    fn post_without_sidecar_has_default_meta() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let post = find_post(&manifest, "intimate-celebrations");
        assert_eq!(post.meta, PostMeta::default());
    }

    #[test]
    fn post_title_falls_back_to_slug() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("blog")).unwrap();
        fs::write(tmp.path().join("blog/005-venue-guide.md"), "No heading here").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.posts[0].title, "venue guide");
        assert_eq!(manifest.posts[0].number, 5);
    }

    #[test]
    fn unnumbered_posts_follow_numbered() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("aaa-draft.md"), "# Draft").unwrap();
        fs::write(blog.join("020-second.md"), "# Second").unwrap();
        fs::write(blog.join("010-first.md"), "# First").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(post_slugs(&manifest), vec!["first", "second", "aaa-draft"]);
    }

    #[test]
    fn pages_read_with_heading_titles() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_page(&manifest, "privacy").title, "Privacy Policy");
        assert_eq!(find_page(&manifest, "about").title, "Our Story");
    }

    #[test]
    fn empty_directory_scans_to_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.portfolio.is_empty());
        assert!(manifest.posts.is_empty());
        assert!(manifest.pages.is_empty());
        assert_eq!(manifest.config.site.name, "Elevate Events");
    }

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.carousel.interval_ms, 6000);
        // untouched keys keep stock values
        assert_eq!(manifest.config.gallery.gap, 24);
    }

    // =========================================================================
    // Validation errors
    // =========================================================================

    #[test]
    fn duplicate_portfolio_id_is_error() {
        let tmp = TempDir::new().unwrap();
        let item = r#"
[[items]]
id = "1"
title = "A"
category = "wedding"
image = "a.jpg"
description = ""
"#;
        fs::write(tmp.path().join("portfolio.toml"), format!("{item}{item}")).unwrap();
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::DuplicateId { kind: "portfolio item", .. })
        ));
    }

    #[test]
    fn reserved_category_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("portfolio.toml"),
            r#"
[[items]]
id = "1"
title = "A"
category = "all"
image = "a.jpg"
description = ""
"#,
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::InvalidCategory { .. })
        ));
    }

    #[test]
    fn rating_above_five_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("testimonials.toml"),
            r#"
[[testimonials]]
id = "t1"
name = "Sam"
role = "Bride"
company = ""
image = "sam.jpg"
quote = "Wonderful"
rating = 6
"#,
        )
        .unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::InvalidRating { rating: 6, .. })));
    }

    #[test]
    fn duplicate_post_number_is_error() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("010-one.md"), "# One").unwrap();
        fs::write(blog.join("010-two.md"), "# Two").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateNumber(10, _))
        ));
    }

    #[test]
    fn unknown_field_reports_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("services.toml"),
            "[[services]]\nid = \"x\"\ntitle = \"X\"\ndescription = \"\"\nprice = 10\n",
        )
        .unwrap();
        match scan(tmp.path()) {
            Err(ScanError::Toml { path, .. }) => assert!(path.ends_with("services.toml")),
            other => panic!("expected toml error, got {other:?}"),
        }
    }

    #[test]
    fn manifest_survives_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.posts, manifest.posts);
        assert_eq!(back.portfolio, manifest.portfolio);
    }
}
