//! Shared test utilities for the elevate-site test suite.
//!
//! Provides fixture setup and lookup helpers over the scan [`Manifest`].
//! Lookups panic with the available keys on a miss, so a failing test says
//! what it could have found instead.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest, "spring-wedding-trends");
//! assert_eq!(post.meta.category, "Weddings");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{BlogPost, Page, PortfolioItem};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

/// Find a portfolio item by id. Panics if not found.
pub fn find_item<'a>(manifest: &'a Manifest, id: &str) -> &'a PortfolioItem {
    manifest.portfolio_item(id).unwrap_or_else(|| {
        let ids: Vec<&str> = manifest.portfolio.iter().map(|i| i.id.as_str()).collect();
        panic!("portfolio item '{id}' not found. Available: {ids:?}")
    })
}

/// Find a blog post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a BlogPost {
    manifest.post(slug).unwrap_or_else(|| {
        let slugs = post_slugs(manifest);
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest.page(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All post slugs in listing order.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Read a generated file relative to the output root. Panics if missing.
pub fn read_output(dist: &Path, rel: &str) -> String {
    std::fs::read_to_string(dist.join(rel))
        .unwrap_or_else(|e| panic!("expected output file '{rel}': {e}"))
}
