//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and renders the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, services, featured work, stats,
//!   testimonial carousel, latest posts
//! - **About** (`/about/`): story from `about.md`, values, team
//! - **Services** (`/services/`): one card per service
//! - **Portfolio** (`/portfolio/`): category filter, masonry gallery, lightbox
//! - **Portfolio detail** (`/portfolio/{id}/`): one case study per item
//! - **Blog** (`/blog/`) and **posts** (`/blog/{slug}/`)
//! - **Contact** (`/contact/`): enquiry form and contact details
//! - **Legal** (`/privacy/`, `/terms/`): markdown pages
//! - **Not found** (`/404.html`): generic page plus per-section fallbacks
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about/index.html
//! ├── portfolio/
//! │   ├── index.html
//! │   └── 1/index.html
//! ├── blog/
//! │   ├── index.html
//! │   └── spring-wedding-trends/index.html
//! ├── ...
//! ├── 404.html
//! ├── style.css                  # Palette + gallery vars + static/style.css
//! ├── site.js                    # static/site.js
//! ├── build.json                 # Content hashes of style.css and site.js
//! └── robots.txt                 # Anything under content/assets/
//! ```
//!
//! ## Behaviour
//!
//! Everything the browser script needs is decided here and embedded as data:
//! reveal options on each animated element, precomputed masonry layouts for
//! every filter and column count, carousel timing. `static/site.js` only
//! replays those decisions against live events.
//!
//! Pages are independent, so they are rendered in parallel on the rayon pool.

use crate::carousel::{self, Carousel, CarouselState};
use crate::config::{self, SiteConfig};
use crate::contact::{BUDGET_RANGES, EventType, Field};
use crate::divider::{self, DividerKind, Placement as DividerPlacement};
use crate::gallery::{self, CategoryFilter};
use crate::masonry;
use crate::motion::{
    AnimationContext, AnimationScope, Rect, RevealKind, parallax_offset, reveal_style,
    stagger_delays,
};
use crate::naming::strip_heading;
use crate::routes::{Route, href, href_path};
use crate::scan::Manifest;
use crate::types::{BlogPost, NavItem, PortfolioItem, Service, legal_nav};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A page written by a generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub route: Route,
    /// Output file relative to the dist root.
    pub file: String,
    pub title: String,
}

/// What a generate run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Rendered pages, in route order.
    pub pages: Vec<GeneratedPage>,
    /// Files copied from `assets/`.
    pub assets: usize,
    pub css_hash: String,
    pub js_hash: String,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Viewport assumed when building the animation context at render time.
const RENDER_VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1280.0,
    height: 800.0,
};

/// Hero background drift relative to the page.
const HERO_PARALLAX: f64 = 0.5;

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let css = site_css(&manifest.config);
    let css_hash = fingerprint(&css);
    let js_hash = fingerprint(JS);
    fs::write(output_dir.join("style.css"), &css)?;
    fs::write(output_dir.join("site.js"), JS)?;

    let build_info = serde_json::json!({
        "style.css": css_hash,
        "site.js": js_hash,
    });
    fs::write(
        output_dir.join("build.json"),
        serde_json::to_string_pretty(&build_info)?,
    )?;

    let assets = copy_assets(&source_dir.join("assets"), output_dir)?;

    let site = Site {
        manifest: &manifest,
        css_href: format!("/style.css?v={css_hash}"),
        js_href: format!("/site.js?v={js_hash}"),
    };

    let routes = site_routes(&manifest);
    let rendered: Vec<(GeneratedPage, String)> = routes
        .into_par_iter()
        .map(|route| {
            let (title, html) = render_route(&site, &route);
            let page = GeneratedPage {
                file: route.output_file(),
                route,
                title,
            };
            (page, html.into_string())
        })
        .collect();

    let mut pages = Vec::with_capacity(rendered.len());
    for (page, html) in rendered {
        let path = output_dir.join(&page.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        pages.push(page);
    }

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        assets,
        css_hash,
        js_hash,
    })
}

/// Full stylesheet: config-driven custom properties, then the static rules.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_gallery_css(&config.gallery),
        CSS_STATIC
    )
}

/// Short content hash used as a cache buster.
pub fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex = format!("{digest:x}");
    hex[..12].to_string()
}

/// Copy `assets/` (if present) into the output root, preserving structure.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(assets_dir)
            .unwrap_or(entry.path());
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Every route that gets an output file, in a stable order.
pub fn site_routes(manifest: &Manifest) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::About, Route::Services, Route::Portfolio];
    routes.extend(
        manifest
            .portfolio
            .iter()
            .map(|i| Route::PortfolioItem(i.id.clone())),
    );
    routes.push(Route::Blog);
    routes.extend(manifest.posts.iter().map(|p| Route::BlogPost(p.slug.clone())));
    routes.extend([Route::Contact, Route::Privacy, Route::Terms, Route::NotFound]);
    routes
}

// ============================================================================
// Resolution
// ============================================================================

/// What a request path shows.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Page(Route),
    PortfolioItem(&'a PortfolioItem),
    BlogPost(&'a BlogPost),
    /// A detail route whose record does not exist.
    Missing { listing: Route },
    NotFound,
}

pub fn resolve<'a>(manifest: &'a Manifest, path: &str) -> View<'a> {
    match Route::parse(path) {
        Route::PortfolioItem(id) => match manifest.portfolio_item(&id) {
            Some(item) => View::PortfolioItem(item),
            None => View::Missing {
                listing: Route::Portfolio,
            },
        },
        Route::BlogPost(slug) => match manifest.post(&slug) {
            Some(post) => View::BlogPost(post),
            None => View::Missing {
                listing: Route::Blog,
            },
        },
        Route::NotFound => View::NotFound,
        route => View::Page(route),
    }
}

// ============================================================================
// Shared rendering context
// ============================================================================

struct Site<'a> {
    manifest: &'a Manifest,
    css_href: String,
    js_href: String,
}

impl Site<'_> {
    fn config(&self) -> &SiteConfig {
        &self.manifest.config
    }
}

/// Render one route. Returns the page heading and the full document.
fn render_route(site: &Site, route: &Route) -> (String, Markup) {
    // One animation context per page view, dropped with it.
    let ctx = AnimationContext::new(&site.config().motion, RENDER_VIEWPORT);
    let scope = AnimationScope::provided(&ctx);
    let name = &site.config().site.name;

    let (title, crumbs, content) = match resolve(site.manifest, &route.path()) {
        View::Page(Route::Home) => (name.clone(), None, render_home(site, scope)),
        View::Page(Route::About) => (
            "About".to_string(),
            Some(vec![]),
            render_about(site, scope),
        ),
        View::Page(Route::Services) => (
            "Services".to_string(),
            Some(vec![]),
            render_services(site, scope),
        ),
        View::Page(Route::Portfolio) => (
            "Portfolio".to_string(),
            Some(vec![]),
            render_portfolio(site, scope),
        ),
        View::Page(Route::Blog) => ("Blog".to_string(), Some(vec![]), render_blog(site, scope)),
        View::Page(Route::Contact) => (
            "Contact".to_string(),
            Some(vec![]),
            render_contact(site, scope),
        ),
        View::Page(Route::Privacy) => legal_page(site, scope, "privacy", "Privacy Policy"),
        View::Page(Route::Terms) => legal_page(site, scope, "terms", "Terms of Service"),
        View::PortfolioItem(item) => (
            item.title.clone(),
            Some(vec![item.title.clone()]),
            render_portfolio_item(site, scope, item),
        ),
        View::BlogPost(post) => (
            post.title.clone(),
            Some(vec![post.title.clone()]),
            render_post(site, scope, post),
        ),
        View::Page(_) | View::NotFound | View::Missing { .. } => (
            "Page Not Found".to_string(),
            None,
            render_not_found(scope),
        ),
    };

    let page_title = if route == &Route::Home {
        title.clone()
    } else {
        format!("{title} | {name}")
    };

    let breadcrumb = crumbs.map(|tail| render_breadcrumb(route, &title, &tail));
    let body = html! {
        (site_header(site, route))
        @if let Some(b) = breadcrumb { (b) }
        main #main { (content) }
        (site_footer(site))
    };
    (title, base_document(site, &page_title, body))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site, title: &str, content: Markup) -> Markup {
    let motion = &site.config().motion;
    html! {
        (DOCTYPE)
        html.no-js lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.config().site.tagline);
                title { (title) }
                link rel="stylesheet" href=(site.css_href);
            }
            body
                data-throttle=(motion.throttle_ms)
                data-scroll-idle=(motion.scroll_idle_ms)
                data-mouse-range=(motion.mouse_range)
            {
                a.skip-link href="#main" { "Skip to content" }
                (content)
                script src=(site.js_href) defer {}
            }
        }
    }
}

/// Renders the site header with brand and navigation
fn site_header(site: &Site, route: &Route) -> Markup {
    html! {
        header.site-header {
            div.container.header-inner {
                a.brand href="/" { (site.config().site.name) }
                nav.site-nav aria-label="Primary" {
                    (render_nav(&site.manifest.navigation, route))
                }
            }
        }
    }
}

/// Renders the navigation menu (hamburger on small screens)
pub fn render_nav(items: &[NavItem], route: &Route) -> Markup {
    let current = route.nav_section();
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        ul.nav-list {
            @for item in items {
                @let is_current = current == Some(item.path.as_str());
                li class=[is_current.then_some("current")] {
                    a href=(href_path(&item.path))
                        aria-current=[is_current.then_some("page")] { (item.label) }
                }
            }
        }
    }
}

/// Home › Section › Item
fn render_breadcrumb(route: &Route, title: &str, tail: &[String]) -> Markup {
    let section = route.parent();
    html! {
        nav.breadcrumb.container aria-label="Breadcrumb" {
            a href="/" { "Home" }
            @match section {
                Some(listing) => {
                    " › "
                    a href=(href(&listing)) { (section_label(&listing)) }
                    @for crumb in tail { " › " span { (crumb) } }
                }
                None => {
                    " › "
                    span { (title) }
                }
            }
        }
    }
}

fn section_label(route: &Route) -> &'static str {
    match route {
        Route::Portfolio => "Portfolio",
        Route::Blog => "Blog",
        _ => "",
    }
}

fn site_footer(site: &Site) -> Markup {
    let brand = &site.config().site;
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div.footer-brand {
                    a.brand href="/" { (brand.name) }
                    p { (brand.tagline) }
                }
                nav.footer-links aria-label="Footer" {
                    h4 { "Explore" }
                    ul {
                        @for item in &site.manifest.navigation {
                            li { a href=(href_path(&item.path)) { (item.label) } }
                        }
                    }
                }
                div.footer-contact {
                    h4 { "Contact" }
                    p { a href={ "mailto:" (brand.email) } { (brand.email) } }
                    p { (brand.phone) }
                    p { (brand.address) }
                }
                div.footer-social {
                    h4 { "Follow" }
                    ul {
                        @for social in &brand.social {
                            li { a href=(social.url) target="_blank" rel="noopener" { (social.name) } }
                        }
                    }
                }
            }
            div.container.footer-legal {
                p { "© " (brand.name) ". All rights reserved." }
                ul {
                    @for item in legal_nav() {
                        li { a href=(href_path(&item.path)) { (item.label) } }
                    }
                }
            }
        }
    }
}

/// Wraps content in an element revealed on scroll.
fn reveal(scope: AnimationScope<'_>, kind: RevealKind, delay_ms: u64, content: Markup) -> Markup {
    let ctx = scope.animations();
    let options = ctx.reveal_options(delay_ms, true);
    html! {
        div class=(kind.hidden_classes())
            data-reveal=(kind.name())
            data-threshold=(options.threshold)
            data-root-margin=(ctx.motion().root_margin)
            data-once=(options.trigger_once)
            style=(reveal_style(delay_ms))
        {
            (content)
        }
    }
}

/// Delays for a list revealed one item after another.
fn staggered(scope: AnimationScope<'_>, count: usize) -> Vec<u64> {
    stagger_delays(count, scope.animations().motion().stagger_ms)
}

fn section_header(title: &str, subtitle: Option<&str>) -> Markup {
    html! {
        header.section-header {
            h2 { (title) }
            div.section-rule {}
            @if let Some(sub) = subtitle { p { (sub) } }
        }
    }
}

fn render_divider(kind: DividerKind, placement: DividerPlacement, color: &str) -> Markup {
    let (w, h) = (divider::DEFAULT_WIDTH, divider::DEFAULT_HEIGHT);
    let d = divider::path(kind, w, h);
    let gradient = kind.gradient_id();
    let [glow_a, glow_b] = divider::highlight_paths(w, h);
    let placement_name = match placement {
        DividerPlacement::Top => "top",
        DividerPlacement::Bottom => "bottom",
    };
    html! {
        div.divider data-divider=(placement_name) style={ "height: " (h) "px; color: " (color) ";" } {
            svg viewBox={ "0 0 " (w) " " (h) } preserveAspectRatio="none"
                xmlns="http://www.w3.org/2000/svg" aria-hidden="true"
                style={ "transform: " (divider::transform(placement, 0.0)) ";" }
            {
                defs {
                    linearGradient id=(gradient) x1="0%" y1="0%" x2="100%" y2="0%" {
                        stop offset="0%" stop-color="currentColor" stop-opacity="0.9" {}
                        stop offset="50%" stop-color="currentColor" stop-opacity="1" {}
                        stop offset="100%" stop-color="currentColor" stop-opacity="0.9" {}
                    }
                }
                path d=(d) fill={ "url(#" (gradient) ")" } {}
                circle.divider-glow r="2" fill="currentColor" {
                    animateMotion dur="8s" repeatCount="indefinite" path=(glow_a) {}
                }
                circle.divider-glow r="1.5" fill="currentColor" {
                    animateMotion dur="6s" begin="2s" repeatCount="indefinite" path=(glow_b) {}
                }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

/// Serialize data for an inline `<script type="application/json">`.
fn json_script<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

// ============================================================================
// Cards
// ============================================================================

fn service_card(service: &Service) -> Markup {
    html! {
        article class={ "card service-card " (service.material.class()) } {
            h3 { (service.title) }
            p { (service.description) }
            @if !service.features.is_empty() {
                ul.feature-list {
                    @for feature in &service.features { li { (feature) } }
                }
            }
            a.card-cta href=(href(&Route::Contact)) { (service.cta) " →" }
        }
    }
}

fn work_card(item: &PortfolioItem) -> Markup {
    html! {
        a.card.work-card href=(href(&Route::PortfolioItem(item.id.clone()))) {
            img src=(item.image) alt=(item.title) loading="lazy";
            div.work-card-body {
                span.eyebrow { (item.category) }
                h3 { (item.title) }
                @if let Some(sub) = &item.subtitle { p { (sub) } }
            }
        }
    }
}

fn post_card(post: &BlogPost) -> Markup {
    html! {
        article.card.post-card {
            @if !post.meta.image.is_empty() {
                img src=(post.meta.image) alt=(post.title) loading="lazy";
            }
            div.post-card-body {
                p.post-meta {
                    @if !post.meta.category.is_empty() { span.eyebrow { (post.meta.category) } }
                    @if !post.meta.date.is_empty() { span { (post.meta.date) } }
                    @if !post.meta.read_time.is_empty() { span { (post.meta.read_time) } }
                }
                h3 { a href=(href(&Route::BlogPost(post.slug.clone()))) { (post.title) } }
                @if !post.meta.excerpt.is_empty() { p { (post.meta.excerpt) } }
            }
        }
    }
}

fn stats_band(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let stats = &site.manifest.stats;
    let delays = staggered(scope, stats.len());
    html! {
        @if !stats.is_empty() {
            section.stats-band {
                div.container.stats-grid {
                    @for (stat, delay) in stats.iter().zip(delays) {
                        (reveal(scope, RevealKind::ScaleIn, delay, html! {
                            div.stat-card {
                                span.stat-value { (stat.value) }
                                span.stat-label { (stat.label) }
                            }
                        }))
                    }
                }
            }
        }
    }
}

// ============================================================================
// Testimonial carousel
// ============================================================================

const STAR_PATH: &str = "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z";

fn render_stars(rating: u8) -> Markup {
    html! {
        div.stars aria-label={ (rating) " out of 5 stars" } {
            @for filled in carousel::stars(rating) {
                svg.star.filled[filled] width="16" height="16" viewBox="0 0 24 24"
                    fill=(if filled { "currentColor" } else { "none" })
                    stroke="currentColor" stroke-width="1"
                {
                    path d=(STAR_PATH) {}
                }
            }
        }
    }
}

fn render_carousel(site: &Site) -> Markup {
    let testimonials = &site.manifest.testimonials;
    let cfg = &site.config().carousel;
    let state = Carousel::new(testimonials.len(), cfg, 0);
    if state.is_empty() {
        return html! {};
    }
    let playing = state.state() == CarouselState::Playing;
    html! {
        section.carousel
            data-carousel
            data-autoplay=(playing)
            data-interval=(cfg.interval_ms)
        {
            div.container {
                (section_header("Client Experiences", None))
                div.carousel-track {
                    @for (i, t) in testimonials.iter().enumerate() {
                        figure.slide.active[i == state.index()] data-index=(i)
                            aria-hidden=(i != state.index())
                        {
                            blockquote { p { (t.quote) } }
                            (render_stars(t.rating))
                            figcaption {
                                img.avatar src=(t.image) alt=(t.name) loading="lazy";
                                strong { (t.name) }
                                span.role { (t.role) }
                                @if !t.company.is_empty() { span.company { (t.company) } }
                            }
                        }
                    }
                }
                @if cfg.show_arrows && state.has_controls() {
                    button.carousel-arrow.prev type="button" data-carousel-prev aria-label="Previous testimonial" { "‹" }
                    button.carousel-arrow.next type="button" data-carousel-next aria-label="Next testimonial" { "›" }
                }
                div.carousel-progress {
                    div.carousel-progress-bar style=(state.progress_style()) {}
                }
                @if cfg.show_dots && state.has_controls() {
                    div.carousel-dots {
                        @for i in 0..state.count() {
                            button.dot.active[i == state.index()] type="button"
                                data-carousel-dot=(i) aria-label={ "Go to testimonial " (i + 1) } {}
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Masonry gallery
// ============================================================================

#[derive(Serialize)]
struct LightboxItem<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    image: &'a str,
    description: &'a str,
    href: String,
}

#[derive(Serialize)]
struct GalleryData<'a> {
    lightbox: bool,
    layouts: gallery::LayoutTable,
    items: Vec<LightboxItem<'a>>,
}

fn render_gallery(site: &Site) -> Markup {
    let items = &site.manifest.portfolio;
    let cfg = &site.config().gallery;
    let categories = gallery::categories(items);
    let all: Vec<&PortfolioItem> = gallery::filter_items(items, &CategoryFilter::All);
    // Widest layout up front; the script swaps in the one for the viewport.
    let initial = masonry::layout(&all, 3, cfg);
    let hover = masonry::hover_style(true);

    let data = GalleryData {
        lightbox: cfg.lightbox,
        layouts: gallery::layout_table(items, cfg),
        items: items
            .iter()
            .map(|i| LightboxItem {
                id: &i.id,
                title: &i.title,
                category: &i.category,
                image: &i.image,
                description: &i.description,
                href: href(&Route::PortfolioItem(i.id.clone())),
            })
            .collect(),
    };

    html! {
        div.gallery-filters role="group" aria-label="Filter by category" {
            button.filter.active type="button" data-filter="all" aria-pressed="true" {
                (cfg.label("all"))
            }
            @for category in &categories {
                button.filter type="button" data-filter=(category) aria-pressed="false" {
                    (cfg.label(category))
                }
            }
        }
        div.masonry
            data-gallery
            style={ "height: " (initial.total_height) "px; --hover-scale: " (hover.scale) "; --hover-z: " (hover.z_index) ";" }
        {
            @for p in &initial.placements {
                @let item = all[p.index];
                a.tile href=(href(&Route::PortfolioItem(item.id.clone())))
                    data-id=(item.id) data-category=(item.category)
                    style=(p.style())
                {
                    img src=(item.image) alt=(item.title) loading="lazy";
                    div.tile-overlay {
                        span.eyebrow { (cfg.label(&item.category)) }
                        h3 { (item.title) }
                    }
                }
            }
        }
        @if cfg.lightbox {
            div.lightbox hidden role="dialog" aria-modal="true" aria-label="Project preview" data-lightbox {
                div.lightbox-panel {
                    button.lightbox-close type="button" data-lightbox-close aria-label="Close" { "×" }
                    img data-lightbox-image alt="";
                    div.lightbox-body {
                        span.eyebrow data-lightbox-category {}
                        h3 data-lightbox-title {}
                        p data-lightbox-description {}
                        a.button data-lightbox-link href="#" { "View Project Details" }
                    }
                }
            }
        }
        script type="application/json" id="gallery-data" { (PreEscaped(json_script(&data))) }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let m = site.manifest;
    let brand = &site.config().site;
    let hero_image = m
        .portfolio
        .iter()
        .find(|i| i.featured)
        .or_else(|| m.portfolio.first())
        .map(|i| i.image.as_str());
    let mut featured: Vec<&PortfolioItem> = m.portfolio.iter().filter(|i| i.featured).collect();
    if featured.is_empty() {
        featured = m.portfolio.iter().take(3).collect();
    }
    let service_delays = staggered(scope, m.services.len());
    let work_delays = staggered(scope, featured.len());
    let latest: Vec<&BlogPost> = m.posts.iter().take(3).collect();
    let post_delays = staggered(scope, latest.len());

    html! {
        section.hero {
            @if let Some(image) = hero_image {
                div.hero-backdrop data-parallax=(HERO_PARALLAX)
                    style={ "background-image: url('" (image) "'); transform: translateY(" (parallax_offset(0.0, HERO_PARALLAX)) "px);" } {}
            }
            div.hero-content.container {
                (reveal(scope, RevealKind::FadeUp, 0, html! {
                    p.eyebrow { (brand.name) }
                    h1 { (brand.tagline) }
                }))
                (reveal(scope, RevealKind::FadeUp, 200, html! {
                    div.hero-actions {
                        a.button href=(href(&Route::Contact)) { "Start Planning" }
                        a.button.ghost href=(href(&Route::Portfolio)) { "View Our Work" }
                    }
                }))
            }
        }
        (render_divider(DividerKind::Wave, DividerPlacement::Bottom, "var(--color-cream)"))
        @if !m.services.is_empty() {
            section.section.container {
                (section_header("What We Do", Some("Celebrations of every scale, planned with care.")))
                div.card-grid {
                    @for (service, delay) in m.services.iter().zip(service_delays) {
                        (reveal(scope, RevealKind::FadeUp, delay, service_card(service)))
                    }
                }
            }
        }
        @if !featured.is_empty() {
            section.section.container {
                (section_header("Featured Work", None))
                div.card-grid {
                    @for (item, delay) in featured.iter().zip(work_delays) {
                        (reveal(scope, RevealKind::ScaleIn, delay, work_card(item)))
                    }
                }
                p.section-more { a href=(href(&Route::Portfolio)) { "See the full portfolio →" } }
            }
        }
        (stats_band(site, scope))
        (render_carousel(site))
        @if !latest.is_empty() {
            section.section.container {
                (section_header("From the Journal", None))
                div.card-grid {
                    @for (post, delay) in latest.iter().zip(post_delays) {
                        (reveal(scope, RevealKind::FadeUp, delay, post_card(post)))
                    }
                }
            }
        }
        (render_divider(DividerKind::Organic, DividerPlacement::Top, "var(--color-deep-charcoal)"))
        (cta_band(scope))
    }
}

fn cta_band(scope: AnimationScope<'_>) -> Markup {
    html! {
        section.cta-band {
            div.container {
                (reveal(scope, RevealKind::FadeUp, 0, html! {
                    h2 { "Let's Create Something Unforgettable" }
                    a.button href=(href(&Route::Contact)) { "Get in Touch" }
                }))
            }
        }
    }
}

fn render_about(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let m = site.manifest;
    let story = m.page("about");
    let value_delays = staggered(scope, m.values.len());
    let team_delays = staggered(scope, m.team.len());
    html! {
        section.page-hero.container {
            h1 { (story.map(|p| p.title.as_str()).unwrap_or("About Us")) }
        }
        @if let Some(page) = story {
            section.section.container.prose {
                (reveal(scope, RevealKind::FadeLeft, 0, html! {
                    (PreEscaped(markdown_to_html(strip_heading(&page.body))))
                }))
            }
        }
        @if !m.values.is_empty() {
            section.section.container {
                (section_header("What We Believe", None))
                div.card-grid {
                    @for (value, delay) in m.values.iter().zip(value_delays) {
                        (reveal(scope, RevealKind::FadeUp, delay, html! {
                            article.card.value-card {
                                h3 { (value.title) }
                                p { (value.description) }
                            }
                        }))
                    }
                }
            }
        }
        (stats_band(site, scope))
        @if !m.team.is_empty() {
            section.section.container {
                (section_header("Meet the Team", None))
                div.card-grid {
                    @for (member, delay) in m.team.iter().zip(team_delays) {
                        (reveal(scope, RevealKind::FadeRight, delay, html! {
                            article.card.team-card {
                                img src=(member.image) alt=(member.name) loading="lazy";
                                h3 { (member.name) }
                                p.role { (member.role) }
                                @if !member.bio.is_empty() { p { (member.bio) } }
                            }
                        }))
                    }
                }
            }
        }
    }
}

fn render_services(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let services = &site.manifest.services;
    let delays = staggered(scope, services.len());
    html! {
        section.page-hero.container {
            h1 { "Our Services" }
            p { "Every event is different. Here is how we can help with yours." }
        }
        section.section.container {
            div.card-grid {
                @for (service, delay) in services.iter().zip(delays) {
                    (reveal(scope, RevealKind::FadeUp, delay, service_card(service)))
                }
            }
        }
        (cta_band(scope))
    }
}

fn render_portfolio(site: &Site, scope: AnimationScope<'_>) -> Markup {
    html! {
        section.page-hero.container {
            h1 { "Our Portfolio" }
            p { "A selection of celebrations we have had the joy of creating." }
        }
        section.section.container {
            (reveal(scope, RevealKind::FadeUp, 0, render_gallery(site)))
        }
        (render_carousel(site))
    }
}

fn render_portfolio_item(site: &Site, scope: AnimationScope<'_>, item: &PortfolioItem) -> Markup {
    let cfg = &site.config().gallery;
    html! {
        article.case-study.container {
            header.page-hero {
                span.eyebrow { (cfg.label(&item.category)) }
                h1 { (item.title) }
                @if let Some(sub) = &item.subtitle { p.subtitle { (sub) } }
            }
            (reveal(scope, RevealKind::ScaleIn, 0, html! {
                img.case-image src=(item.image) alt=(item.title);
            }))
            dl.case-facts {
                @if let Some(location) = &item.location {
                    dt { "Location" } dd { (location) }
                }
                @if let Some(guests) = item.guest_count {
                    dt { "Guests" } dd { (guests) }
                }
            }
            p.lead { (item.description) }
            @if let Some(quote) = &item.testimonial {
                (reveal(scope, RevealKind::FadeUp, 100, html! {
                    blockquote.case-quote {
                        p { "\u{201c}" (quote.quote) "\u{201d}" }
                        cite { "— " (quote.author) }
                    }
                }))
            }
            p { a href=(href(&Route::Portfolio)) { "← Back to Portfolio" } }
        }
    }
}

fn render_blog(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let posts = &site.manifest.posts;
    let featured = posts.iter().find(|p| p.meta.featured);
    let rest: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| featured.is_none_or(|f| f.slug != p.slug))
        .collect();
    let delays = staggered(scope, rest.len());
    html! {
        section.page-hero.container {
            h1 { "The Journal" }
            p { "Ideas, trends and behind-the-scenes stories." }
        }
        section.section.container {
            @if let Some(post) = featured {
                (reveal(scope, RevealKind::FadeUp, 0, html! {
                    div.featured-post { (post_card(post)) }
                }))
            }
            @if posts.is_empty() {
                p.empty { "New stories are on their way." }
            }
            div.card-grid {
                @for (post, delay) in rest.iter().zip(delays) {
                    (reveal(scope, RevealKind::FadeUp, delay, post_card(post)))
                }
            }
        }
    }
}

fn render_post(site: &Site, scope: AnimationScope<'_>, post: &BlogPost) -> Markup {
    let related: Vec<&BlogPost> = site
        .manifest
        .posts
        .iter()
        .filter(|p| p.slug != post.slug && p.meta.category == post.meta.category)
        .take(2)
        .collect();
    html! {
        article.post.container {
            header.page-hero {
                @if !post.meta.category.is_empty() { span.eyebrow { (post.meta.category) } }
                h1 { (post.title) }
                p.post-meta {
                    @if !post.meta.date.is_empty() { span { (post.meta.date) } }
                    @if !post.meta.read_time.is_empty() { span { (post.meta.read_time) } }
                }
            }
            @if !post.meta.image.is_empty() {
                img.post-image src=(post.meta.image) alt=(post.title);
            }
            div.prose {
                (PreEscaped(markdown_to_html(strip_heading(&post.body))))
            }
            p { a href=(href(&Route::Blog)) { "← Back to Blog" } }
        }
        @if !related.is_empty() {
            section.section.container {
                (section_header("Related Stories", None))
                div.card-grid {
                    @for post in related {
                        (reveal(scope, RevealKind::FadeUp, 0, post_card(post)))
                    }
                }
            }
        }
    }
}

fn render_contact(site: &Site, scope: AnimationScope<'_>) -> Markup {
    let brand = &site.config().site;
    html! {
        section.page-hero.container {
            h1 { "Contact Us" }
            p { "Tell us about your event and we'll be in touch within one business day." }
        }
        section.section.container.contact-grid {
            (reveal(scope, RevealKind::FadeLeft, 0, html! {
                form.contact-form data-contact-form novalidate {
                    @for field in Field::ALL {
                        div.field data-field=(field.name()) {
                            label for=(field.name()) {
                                (field.label())
                                @if field.required() { span.required aria-hidden="true" { " *" } }
                            }
                            (form_control(field))
                            p.field-error aria-live="polite" {}
                        }
                    }
                    button.button type="submit" { "Send Message" }
                    p.form-status role="status" hidden {}
                }
            }))
            (reveal(scope, RevealKind::FadeRight, 100, html! {
                aside.contact-details {
                    h2 { "Contact Details" }
                    p { strong { "Phone: " } (brand.phone) }
                    p { strong { "Email: " } a href={ "mailto:" (brand.email) } { (brand.email) } }
                    p { strong { "Address: " } (brand.address) }
                    @if !brand.hours.is_empty() {
                        h3 { "Office Hours" }
                        ul { @for line in &brand.hours { li { (line) } } }
                    }
                    @if !brand.social.is_empty() {
                        h3 { "Social Media" }
                        ul.social-links {
                            @for social in &brand.social {
                                li { a href=(social.url) target="_blank" rel="noopener" { (social.name) } }
                            }
                        }
                    }
                }
            }))
        }
    }
}

fn form_control(field: Field) -> Markup {
    let name = field.name();
    let required = field.required();
    html! {
        @match field {
            Field::Name => {
                input id=(name) name=(name) type="text" required[required] autocomplete="name";
            }
            Field::Email => {
                input id=(name) name=(name) type="email" required[required] autocomplete="email";
            }
            Field::Phone => {
                input id=(name) name=(name) type="tel" autocomplete="tel";
            }
            Field::Date => {
                input id=(name) name=(name) type="date";
            }
            Field::GuestCount => {
                input id=(name) name=(name) type="number" min="1" step="1" inputmode="numeric";
            }
            Field::EventType => {
                select id=(name) name=(name) {
                    option value="" { "Select an event type" }
                    @for t in EventType::ALL { option value=(t.value()) { (t.label()) } }
                }
            }
            Field::Budget => {
                select id=(name) name=(name) {
                    option value="" { "Select a range" }
                    @for range in BUDGET_RANGES { option value=(range) { (range) } }
                }
            }
            Field::Message => {
                textarea id=(name) name=(name) rows="6" required[required] {}
            }
        }
    }
}

fn legal_page(
    site: &Site,
    scope: AnimationScope<'_>,
    slug: &str,
    fallback_title: &str,
) -> (String, Option<Vec<String>>, Markup) {
    let page = site.manifest.page(slug);
    let title = page
        .map(|p| p.title.clone())
        .unwrap_or_else(|| fallback_title.to_string());
    let content = html! {
        section.page-hero.container { h1 { (title) } }
        section.section.container.prose {
            (reveal(scope, RevealKind::FadeUp, 0, html! {
                @if let Some(page) = page {
                    (PreEscaped(markdown_to_html(strip_heading(&page.body))))
                } @else {
                    p { "This page is being updated. Please check back soon." }
                }
            }))
        }
    };
    (title, Some(vec![]), content)
}

/// Fallback shown for a detail route whose record does not exist.
fn render_missing(listing: &Route) -> Markup {
    let (noun, label) = match listing {
        Route::Portfolio => ("project", "Portfolio"),
        Route::Blog => ("post", "Blog"),
        _ => ("page", "Home"),
    };
    html! {
        h1 { "We couldn't find that " (noun) }
        p { "It may have been moved or removed." }
        a.button href=(href(listing)) { "Back to " (label) }
    }
}

fn render_not_found(scope: AnimationScope<'_>) -> Markup {
    html! {
        section.page-hero.container.not-found {
            (reveal(scope, RevealKind::FadeUp, 0, html! {
                div data-fallback="page" {
                    h1 { "Page Not Found" }
                    p { "The page you're looking for doesn't exist." }
                    a.button href="/" { "Return Home" }
                }
                div data-fallback="portfolio" hidden { (render_missing(&Route::Portfolio)) }
                div data-fallback="blog" hidden { (render_missing(&Route::Blog)) }
            }))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture_manifest() -> Manifest {
        let tmp = setup_fixtures();
        scan(tmp.path()).unwrap()
    }

    fn site(manifest: &Manifest) -> Site<'_> {
        Site {
            manifest,
            css_href: "/style.css?v=test".into(),
            js_href: "/site.js?v=test".into(),
        }
    }

    fn render(manifest: &Manifest, path: &str) -> String {
        render_route(&site(manifest), &Route::parse(path)).1.into_string()
    }

    /// Scan fixtures and run the full generate stage into a temp dir.
    fn build_fixtures() -> (TempDir, TempDir, GenerateReport) {
        let source = setup_fixtures();
        let manifest = scan(source.path()).unwrap();
        let out = TempDir::new().unwrap();
        let manifest_path = out.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();
        let report = generate(&manifest_path, source.path(), &out.path().join("dist")).unwrap();
        (source, out, report)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    #[test]
    fn resolve_known_and_missing_details() {
        let m = fixture_manifest();
        assert!(matches!(resolve(&m, "/portfolio/2"), View::PortfolioItem(i) if i.id == "2"));
        assert_eq!(
            resolve(&m, "/portfolio/99"),
            View::Missing {
                listing: Route::Portfolio
            }
        );
        assert_eq!(
            resolve(&m, "/blog/nope"),
            View::Missing {
                listing: Route::Blog
            }
        );
        assert_eq!(resolve(&m, "/contact"), View::Page(Route::Contact));
        assert_eq!(resolve(&m, "/pricing"), View::NotFound);
    }

    #[test]
    fn routes_cover_every_record() {
        let m = fixture_manifest();
        let routes = site_routes(&m);
        assert_eq!(routes.len(), 4 + 7 + 1 + 3 + 4);
        assert!(routes.contains(&Route::PortfolioItem("7".into())));
        assert!(routes.contains(&Route::BlogPost("intimate-celebrations".into())));
        assert_eq!(routes.last(), Some(&Route::NotFound));
    }

    // =========================================================================
    // Shell
    // =========================================================================

    #[test]
    fn every_page_has_shell() {
        let m = fixture_manifest();
        for route in site_routes(&m) {
            let html = render_route(&site(&m), &route).1.into_string();
            assert!(html.starts_with("<!DOCTYPE html>"), "{route}");
            assert!(html.contains("site-header"), "{route}");
            assert!(html.contains("site-footer"), "{route}");
            assert!(html.contains("/site.js?v=test"), "{route}");
        }
    }

    #[test]
    fn nav_marks_current_section() {
        let m = fixture_manifest();
        let html = render_nav(&m.navigation, &Route::BlogPost("x".into())).into_string();
        assert!(html.contains(r#"<li class="current"><a href="/blog/" aria-current="page">"#));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn page_titles_include_brand() {
        let m = fixture_manifest();
        assert!(render(&m, "/services").contains("<title>Services | Elevate Events</title>"));
        assert!(render(&m, "/").contains("<title>Elevate Events</title>"));
    }

    #[test]
    fn breadcrumb_on_detail_pages() {
        let m = fixture_manifest();
        let html = render(&m, "/portfolio/3");
        assert!(html.contains(r#"<a href="/portfolio/">Portfolio</a>"#));
        assert!(html.contains("The Martinez Anniversary"));
        assert!(!render(&m, "/").contains("breadcrumb"));
    }

    #[test]
    fn footer_has_legal_and_social_links() {
        let m = fixture_manifest();
        let html = render(&m, "/");
        assert!(html.contains(r#"href="/privacy/""#));
        assert!(html.contains(r#"href="/terms/""#));
        assert!(html.contains("https://instagram.com/elevatevents"));
    }

    #[test]
    #[should_panic(expected = "outside of an AnimationScope provider")]
    fn reveal_outside_provider_panics() {
        reveal(AnimationScope::detached(), RevealKind::FadeUp, 0, html! {});
    }

    #[test]
    fn reveal_carries_observer_options() {
        let ctx = AnimationContext::new(&Default::default(), RENDER_VIEWPORT);
        let html = reveal(AnimationScope::provided(&ctx), RevealKind::ScaleIn, 200, html! { "x" })
            .into_string();
        assert!(html.contains(r#"class="reveal hidden-scale""#));
        assert!(html.contains(r#"data-reveal="scale-in""#));
        assert!(html.contains(r#"data-threshold="0.1""#));
        assert!(html.contains(r#"data-root-margin="0px 0px -50px 0px""#));
        assert!(html.contains("transition-delay: 200ms"));
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn home_has_sections() {
        let m = fixture_manifest();
        let html = render(&m, "/");
        assert!(html.contains("Celebrations crafted with intention"));
        assert!(html.contains("What We Do"));
        assert!(html.contains("Featured Work"));
        assert!(html.contains("data-carousel"));
        assert!(html.contains("data-parallax=\"0.5\""));
        assert!(html.contains("divider-gradient-wave"));
    }

    #[test]
    fn services_are_staggered() {
        let m = fixture_manifest();
        let html = render(&m, "/services");
        assert!(html.contains("transition-delay: 0ms"));
        assert!(html.contains("transition-delay: 100ms"));
        assert!(html.contains("transition-delay: 200ms"));
        assert!(html.contains("card-silk"));
        assert!(html.contains("Plan Your Wedding"));
    }

    #[test]
    fn about_renders_story_markdown() {
        let m = fixture_manifest();
        let html = render(&m, "/about");
        assert!(html.contains("<h1>Our Story</h1>"));
        assert!(html.contains("<strong>hundreds</strong>"));
        assert!(html.contains("Meet the Team"));
        assert!(html.contains("Olivia Hart"));
    }

    #[test]
    fn portfolio_embeds_layouts_and_filters() {
        let m = fixture_manifest();
        let html = render(&m, "/portfolio");
        assert!(html.contains(r#"data-filter="all""#));
        assert!(html.contains(">All Events<"));
        assert!(html.contains(">Private Parties<"));
        assert!(html.contains(r#"id="gallery-data""#));
        assert!(html.contains("\"small_breakpoint\":768"));
        // 7-item three-column layout
        assert!(html.contains("height: 872px;"));
        assert!(html.contains("top: 548px; left: 66.666667%; width: 33.333333%; height: 300px;"));
        assert!(html.contains("data-lightbox"));
    }

    #[test]
    fn portfolio_without_lightbox_has_no_overlay() {
        let mut m = fixture_manifest();
        m.config.gallery.lightbox = false;
        let html = render(&m, "/portfolio");
        assert!(!html.contains("role=\"dialog\""));
        assert!(html.contains("\"lightbox\":false"));
    }

    #[test]
    fn case_study_shows_details() {
        let m = fixture_manifest();
        let html = render(&m, "/portfolio/1");
        assert!(html.contains("The Hamptons, NY"));
        assert!(html.contains("<dd>180</dd>"));
        assert!(html.contains("Sarah &amp; Michael Anderson"));
    }

    #[test]
    fn carousel_controls_and_stars() {
        let m = fixture_manifest();
        let html = render(&m, "/");
        assert!(html.contains(r#"data-interval="6000""#));
        assert!(html.contains(r#"data-autoplay="true""#));
        assert_eq!(html.matches("data-carousel-dot=").count(), 3);
        assert!(html.contains("data-carousel-prev"));
        assert!(html.contains("transform: scaleX(1); transition-duration: 6000ms;"));
        assert!(html.contains("4 out of 5 stars"));
    }

    #[test]
    fn single_testimonial_has_no_controls() {
        let mut m = fixture_manifest();
        m.testimonials.truncate(1);
        let html = render(&m, "/");
        assert!(html.contains(r#"data-autoplay="false""#));
        assert!(!html.contains("data-carousel-dot="));
        assert!(!html.contains("data-carousel-next"));
    }

    #[test]
    fn empty_carousel_renders_nothing() {
        let mut m = fixture_manifest();
        m.testimonials.clear();
        assert!(!render(&m, "/").contains("data-carousel"));
    }

    #[test]
    fn blog_lists_featured_first() {
        let m = fixture_manifest();
        let html = render(&m, "/blog");
        let featured = html.find("featured-post").unwrap();
        let corporate = html.find("Planning a Corporate Gala").unwrap();
        assert!(featured < corporate);
        assert!(html.contains("5 min read"));
    }

    #[test]
    fn post_body_rendered_without_duplicate_heading() {
        let m = fixture_manifest();
        let html = render(&m, "/blog/spring-wedding-trends");
        assert_eq!(html.matches("Spring Wedding Trends</h1>").count(), 1);
        assert!(html.contains("<h2>Florals</h2>"));
        assert!(html.contains("<em>long-table</em>"));
        assert!(html.contains("← Back to Blog"));
    }

    #[test]
    fn contact_form_fields() {
        let m = fixture_manifest();
        let html = render(&m, "/contact");
        for field in Field::ALL {
            assert!(html.contains(&format!(r#"name="{}""#, field.name())), "{field:?}");
        }
        assert!(html.contains(r#"<option value="private-party">Private Party</option>"#));
        assert!(html.contains("Monday - Friday: 9am - 6pm"));
        assert_eq!(html.matches(" required").count(), 3);
    }

    #[test]
    fn legal_page_falls_back_without_markdown() {
        let mut m = fixture_manifest();
        m.pages.retain(|p| p.slug != "terms");
        let html = render(&m, "/terms");
        assert!(html.contains("<h1>Terms of Service</h1>"));
        assert!(html.contains("being updated"));
    }

    #[test]
    fn not_found_has_section_fallbacks() {
        let m = fixture_manifest();
        let html = render(&m, "/404");
        assert!(html.contains(r#"data-fallback="portfolio""#));
        assert!(html.contains("Back to Portfolio"));
        assert!(html.contains("Back to Blog"));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut m = fixture_manifest();
        m.portfolio[0].title = "<script>alert('xss')</script>".into();
        let html = render(&m, "/portfolio/1");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn json_script_cannot_close_tag() {
        assert_eq!(json_script(&"</script>"), r#""<\/script>""#);
    }

    // =========================================================================
    // Full generate stage
    // =========================================================================

    #[test]
    fn generate_writes_every_page() {
        let (_source, out, report) = build_fixtures();
        assert_eq!(report.pages.len(), 19);
        assert_eq!(report.assets, 1);
        let post = report
            .pages
            .iter()
            .find(|p| p.route == Route::BlogPost("corporate-gala-planning".into()))
            .unwrap();
        assert_eq!(post.title, "Planning a Corporate Gala");
        let dist = out.path().join("dist");
        for file in [
            "index.html",
            "about/index.html",
            "services/index.html",
            "portfolio/index.html",
            "portfolio/4/index.html",
            "blog/index.html",
            "blog/corporate-gala-planning/index.html",
            "contact/index.html",
            "privacy/index.html",
            "terms/index.html",
            "404.html",
            "style.css",
            "site.js",
            "build.json",
        ] {
            assert!(dist.join(file).is_file(), "missing {file}");
        }
    }

    #[test]
    fn generate_copies_assets() {
        let (_source, out, _) = build_fixtures();
        let robots = read_output(&out.path().join("dist"), "robots.txt");
        assert!(robots.contains("User-agent"));
    }

    #[test]
    fn build_json_matches_cache_busters() {
        let (_source, out, _) = build_fixtures();
        let dist = out.path().join("dist");
        let info: serde_json::Value =
            serde_json::from_str(&read_output(&dist, "build.json")).unwrap();
        let css_hash = info["style.css"].as_str().unwrap();
        assert_eq!(css_hash.len(), 12);
        assert_eq!(css_hash, fingerprint(&read_output(&dist, "style.css")));
        let index = read_output(&dist, "index.html");
        assert!(index.contains(&format!("/style.css?v={css_hash}")));
    }

    #[test]
    fn stylesheet_carries_palette_and_gallery_vars() {
        let css = site_css(&SiteConfig::default());
        assert!(css.contains("--color-taupe: #a89080"));
        assert!(css.contains("--gallery-gap: 24px"));
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
        // sha256("abc") = ba7816bf8f01...
        assert_eq!(fingerprint("abc"), "ba7816bf8f01");
    }
}
