//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered over stock defaults, so a config file only needs the keys it wants
//! to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── portfolio.toml
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Elevate Events"
//! tagline = "Unforgettable celebrations, thoughtfully designed"
//! email = "hello@elevateevents.com"
//! phone = "(555) 123-4567"
//! address = "123 Event Street, New York, NY 10001"
//!
//! [colors]
//! cream = "#f5f1eb"
//! charcoal = "#2c2c2c"
//! deep_charcoal = "#1a1a1a"
//! taupe = "#a89080"
//! moss = "#7d8471"
//! soft_white = "#faf8f5"
//!
//! [gallery]
//! small_breakpoint = 768    # Below this: 1 column
//! medium_breakpoint = 1024  # Below this: 2 columns, otherwise 3
//! gap = 24                  # Vertical gap between tiles (px)
//! lightbox = true
//!
//! [gallery.heights]
//! small = 200
//! medium = 300
//! large = 400
//!
//! [gallery.labels]          # Filter button labels
//! wedding = "Weddings"
//!
//! [motion]
//! throttle_ms = 16
//! scroll_idle_ms = 150
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! mouse_range = 2.0
//! stagger_ms = 100
//!
//! [carousel]
//! autoplay = true
//! interval_ms = 5000
//! show_dots = true
//! show_arrows = true
//!
//! [build]
//! max_threads = 4           # Omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::motion::RootMargin;
use crate::types::SizeHint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand and contact details.
    pub site: BrandConfig,
    /// Palette, emitted as CSS custom properties.
    pub colors: ColorConfig,
    /// Masonry gallery and lightbox settings.
    pub gallery: GalleryConfig,
    /// Scroll/visibility animation settings.
    pub motion: MotionConfig,
    /// Testimonial carousel settings.
    pub carousel: CarouselConfig,
    /// Build pipeline settings.
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.small_breakpoint >= self.gallery.medium_breakpoint {
            return Err(ConfigError::Validation(
                "gallery.small_breakpoint must be below gallery.medium_breakpoint".into(),
            ));
        }
        let h = &self.gallery.heights;
        if h.small == 0 || h.medium == 0 || h.large == 0 {
            return Err(ConfigError::Validation(
                "gallery.heights values must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.motion.threshold) {
            return Err(ConfigError::Validation(
                "motion.threshold must be between 0 and 1".into(),
            ));
        }
        if RootMargin::parse(&self.motion.root_margin).is_err() {
            return Err(ConfigError::Validation(format!(
                "motion.root_margin is not a valid margin: {:?}",
                self.motion.root_margin
            )));
        }
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// A social profile link shown in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Brand and contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Office hours, one line per entry.
    pub hours: Vec<String>,
    pub social: Vec<SocialLink>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        let social = |name: &str, url: &str| SocialLink {
            name: name.to_string(),
            url: url.to_string(),
        };
        Self {
            name: "Elevate Events".to_string(),
            tagline: "Unforgettable celebrations, thoughtfully designed".to_string(),
            email: "hello@elevateevents.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "123 Event Street, New York, NY 10001".to_string(),
            hours: vec![
                "Monday - Friday: 9am - 6pm".to_string(),
                "Saturday: 10am - 4pm".to_string(),
                "Sunday: Closed".to_string(),
            ],
            social: vec![
                social("Instagram", "https://instagram.com/elevatevents"),
                social("Facebook", "https://facebook.com/elevatevents"),
                social("LinkedIn", "https://linkedin.com/company/elevatevents"),
                social("Pinterest", "https://pinterest.com/elevatevents"),
            ],
        }
    }
}

/// Site palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Section background.
    pub cream: String,
    /// Primary text.
    pub charcoal: String,
    /// Footer and carousel background.
    pub deep_charcoal: String,
    /// Accent (links, stars, active dots).
    pub taupe: String,
    /// Secondary accent.
    pub moss: String,
    /// Page background and text on dark sections.
    pub soft_white: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            cream: "#f5f1eb".to_string(),
            charcoal: "#2c2c2c".to_string(),
            deep_charcoal: "#1a1a1a".to_string(),
            taupe: "#a89080".to_string(),
            moss: "#7d8471".to_string(),
            soft_white: "#faf8f5".to_string(),
        }
    }
}

/// Pixel heights for each masonry size bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileHeights {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl TileHeights {
    pub fn for_hint(&self, hint: SizeHint) -> u32 {
        match hint {
            SizeHint::Small => self.small,
            SizeHint::Medium => self.medium,
            SizeHint::Large => self.large,
        }
    }
}

impl Default for TileHeights {
    fn default() -> Self {
        Self {
            small: 200,
            medium: 300,
            large: 400,
        }
    }
}

/// Masonry gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Viewports narrower than this get a single column.
    pub small_breakpoint: u32,
    /// Viewports narrower than this (and at least `small_breakpoint`) get two.
    pub medium_breakpoint: u32,
    /// Vertical gap added below each tile (px).
    pub gap: u32,
    pub heights: TileHeights,
    /// Open clicked tiles in a full-screen overlay.
    pub lightbox: bool,
    /// Filter button labels by category; unlisted categories are capitalized.
    pub labels: BTreeMap<String, String>,
}

impl GalleryConfig {
    /// Button label for a filter key (`"all"` or a category).
    pub fn label(&self, category: &str) -> String {
        if let Some(label) = self.labels.get(category) {
            return label.clone();
        }
        let mut chars = category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            small_breakpoint: 768,
            medium_breakpoint: 1024,
            gap: 24,
            heights: TileHeights::default(),
            lightbox: true,
            labels: [
                ("all", "All Events"),
                ("wedding", "Weddings"),
                ("corporate", "Corporate"),
                ("private", "Private Parties"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}

/// Scroll and reveal animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Minimum spacing between accepted scroll samples.
    pub throttle_ms: u64,
    /// Quiet period after which scrolling counts as stopped.
    pub scroll_idle_ms: u64,
    /// Visible fraction at which an element is revealed.
    pub threshold: f64,
    /// CSS margin applied to the viewport when testing visibility.
    pub root_margin: String,
    /// Scale of the normalized mouse position (`range` spans `-range/2..range/2`).
    pub mouse_range: f64,
    /// Delay step between consecutive items of a staggered list.
    pub stagger_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            scroll_idle_ms: 150,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            mouse_range: 2.0,
            stagger_ms: 100,
        }
    }
}

/// Testimonial carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay: bool,
    pub interval_ms: u64,
    pub show_dots: bool,
    pub show_arrows: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 5000,
            show_dots: true,
            show_arrows: true,
        }
    }
}

/// Build pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of page-rendering threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, and at least one
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_threads
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Elevate Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Brand and contact details
# ---------------------------------------------------------------------------
[site]
name = "Elevate Events"
tagline = "Unforgettable celebrations, thoughtfully designed"
email = "hello@elevateevents.com"
phone = "(555) 123-4567"
address = "123 Event Street, New York, NY 10001"
hours = [
    "Monday - Friday: 9am - 6pm",
    "Saturday: 10am - 4pm",
    "Sunday: Closed",
]

[[site.social]]
name = "Instagram"
url = "https://instagram.com/elevatevents"

[[site.social]]
name = "Facebook"
url = "https://facebook.com/elevatevents"

[[site.social]]
name = "LinkedIn"
url = "https://linkedin.com/company/elevatevents"

[[site.social]]
name = "Pinterest"
url = "https://pinterest.com/elevatevents"

# ---------------------------------------------------------------------------
# Palette (emitted as CSS custom properties)
# ---------------------------------------------------------------------------
[colors]
cream = "#f5f1eb"
charcoal = "#2c2c2c"
deep_charcoal = "#1a1a1a"
taupe = "#a89080"
moss = "#7d8471"
soft_white = "#faf8f5"

# ---------------------------------------------------------------------------
# Masonry portfolio gallery
# ---------------------------------------------------------------------------
[gallery]
# Viewport widths (px) that switch between 1, 2 and 3 columns.
small_breakpoint = 768
medium_breakpoint = 1024

# Vertical gap (px) added below each tile.
gap = 24

# Open clicked tiles in a full-screen lightbox.
lightbox = true

# Tile heights (px) for each size hint.
[gallery.heights]
small = 200
medium = 300
large = 400

# Filter button labels. Categories not listed are shown capitalized.
[gallery.labels]
all = "All Events"
wedding = "Weddings"
corporate = "Corporate"
private = "Private Parties"

# ---------------------------------------------------------------------------
# Scroll and reveal animations
# ---------------------------------------------------------------------------
[motion]
# Minimum spacing (ms) between processed scroll events (~60 per second).
throttle_ms = 16

# Scrolling counts as stopped after this many ms without a scroll event.
scroll_idle_ms = 150

# Visible fraction (0-1) at which an element is revealed.
threshold = 0.1

# CSS margin applied to the viewport when testing visibility.
root_margin = "0px 0px -50px 0px"

# Range of the normalized mouse position used for parallax.
mouse_range = 2.0

# Delay step (ms) between items of a staggered list.
stagger_ms = 100

# ---------------------------------------------------------------------------
# Testimonial carousel
# ---------------------------------------------------------------------------
[carousel]
autoplay = true
interval_ms = 5000
show_dots = true
show_arrows = true

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Maximum page-rendering threads.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}

/// Generate CSS custom properties from the palette and gallery settings.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-cream: {cream};
    --color-charcoal: {charcoal};
    --color-deep-charcoal: {deep_charcoal};
    --color-taupe: {taupe};
    --color-moss: {moss};
    --color-soft-white: {soft_white};
}}"#,
        cream = colors.cream,
        charcoal = colors.charcoal,
        deep_charcoal = colors.deep_charcoal,
        taupe = colors.taupe,
        moss = colors.moss,
        soft_white = colors.soft_white,
    )
}

/// Generate CSS custom properties for gallery geometry.
pub fn generate_gallery_css(gallery: &GalleryConfig) -> String {
    format!(
        r#":root {{
    --gallery-gap: {gap}px;
    --tile-small: {small}px;
    --tile-medium: {medium}px;
    --tile-large: {large}px;
}}"#,
        gap = gallery.gap,
        small = gallery.heights.small,
        medium = gallery.heights.medium,
        large = gallery.heights.large,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_brand() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Elevate Events");
        assert_eq!(config.site.social.len(), 4);
    }

    #[test]
    fn default_gallery_matches_breakpoints() {
        let config = SiteConfig::default();
        assert_eq!(config.gallery.small_breakpoint, 768);
        assert_eq!(config.gallery.medium_breakpoint, 1024);
        assert_eq!(config.gallery.gap, 24);
        assert_eq!(config.gallery.heights.for_hint(SizeHint::Small), 200);
        assert_eq!(config.gallery.heights.for_hint(SizeHint::Medium), 300);
        assert_eq!(config.gallery.heights.for_hint(SizeHint::Large), 400);
    }

    #[test]
    fn gallery_labels_fall_back_to_capitalized() {
        let mut gallery = GalleryConfig::default();
        assert_eq!(gallery.label("all"), "All Events");
        assert_eq!(gallery.label("private"), "Private Parties");
        assert_eq!(gallery.label("virtual"), "Virtual");
        gallery.labels.insert("virtual".into(), "Online".into());
        assert_eq!(gallery.label("virtual"), "Online");
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
taupe = "#998877"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.taupe, "#998877");
        assert_eq!(config.colors.cream, "#f5f1eb");
        assert_eq!(config.carousel.interval_ms, 5000);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.motion.throttle_ms, 16);
        assert_eq!(config.motion.scroll_idle_ms, 150);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
name = "Bloom & Co"

[carousel]
interval_ms = 8000
autoplay = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Bloom & Co");
        assert_eq!(config.site.email, "hello@elevateevents.com");
        assert_eq!(config.carousel.interval_ms, 8000);
        assert!(!config.carousel.autoplay);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[gallery]
colums = 3
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[analytics]\nid = \"x\"\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validate_breakpoint_order() {
        let mut config = SiteConfig::default();
        config.gallery.small_breakpoint = 1200;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_threshold_range() {
        let mut config = SiteConfig::default();
        config.motion.threshold = 1.0;
        assert!(config.validate().is_ok());
        config.motion.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_root_margin() {
        let mut config = SiteConfig::default();
        config.motion.root_margin = "ten pixels".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_interval() {
        let mut config = SiteConfig::default();
        config.carousel.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[gallery.heights]\nsmall = 0\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.site.social, defaults.site.social);
        assert_eq!(config.motion.root_margin, defaults.motion.root_margin);
        assert_eq!(config.build.max_threads, None);
    }

    #[test]
    fn color_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-cream:",
            "--color-charcoal:",
            "--color-deep-charcoal:",
            "--color-taupe:",
            "--color-moss:",
            "--color-soft-white:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
    }

    #[test]
    fn gallery_css_uses_heights() {
        let css = generate_gallery_css(&GalleryConfig::default());
        assert!(css.contains("--gallery-gap: 24px"));
        assert!(css.contains("--tile-large: 400px"));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = BuildConfig {
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = BuildConfig {
            max_threads: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
