//! # Elevate Site
//!
//! Static site generator and behaviour library for the Elevate Events
//! marketing site. Content lives in a directory of TOML data files and
//! markdown; the output is a plain static site with a small browser script.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so each stage can be inspected and
//! tested on its own.
//!
//! Alongside the pipeline sit pure behaviour modules: the page-level
//! animation context, the masonry gallery, the testimonial carousel, section
//! dividers and the contact form. They model interactive state with explicit
//! timestamps, so every rule is unit-testable without a browser. The
//! generator uses them to precompute what the browser script replays.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads data files, posts and pages into the manifest |
//! | [`generate`] | Stage 2: renders every route with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Content records shared between stages |
//! | [`naming`] | `NNN-slug` filename convention and markdown headings |
//! | [`routes`] | URL paths, output files and link targets |
//! | [`events`] | Listener sets with drop-to-unsubscribe handles |
//! | [`motion`] | Scroll, mouse and visibility tracking; reveal animations |
//! | [`masonry`] | Shortest-column masonry layout |
//! | [`gallery`] | Category filter, hover, lightbox and scroll lock |
//! | [`carousel`] | Auto-advancing testimonial carousel |
//! | [`divider`] | SVG section divider shapes and parallax |
//! | [`contact`] | Contact form fields and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are Rust
//! expressions, checked at compile time, and all interpolation is escaped.
//!
//! ## Build-Time Layout
//!
//! The gallery's masonry positions depend only on the item list, the active
//! filter and the column count. All combinations are computed at build time
//! and embedded as JSON, so the browser never measures images.
//!
//! ## Scoped Listeners
//!
//! Every callback registration returns a guard. Dropping the guard (or the
//! context that owns the listener set) unregisters it, so nothing outlives
//! the page view that created it.

pub mod carousel;
pub mod config;
pub mod contact;
pub mod divider;
pub mod events;
pub mod gallery;
pub mod generate;
pub mod masonry;
pub mod motion;
pub mod naming;
pub mod output;
pub mod routes;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
