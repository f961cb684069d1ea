//! Shared content records.
//!
//! These types are produced by [`crate::scan`], serialized into the manifest,
//! and consumed by [`crate::generate`] and the behaviour modules. They are
//! plain values: nothing mutates them after scanning.

use serde::{Deserialize, Serialize};

/// A navigation link (header, footer, breadcrumb).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

impl NavItem {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

/// Primary site navigation, in header order.
pub fn primary_nav() -> Vec<NavItem> {
    vec![
        NavItem::new("Home", "/"),
        NavItem::new("About", "/about"),
        NavItem::new("Services", "/services"),
        NavItem::new("Portfolio", "/portfolio"),
        NavItem::new("Blog", "/blog"),
        NavItem::new("Contact", "/contact"),
    ]
}

/// Legal links shown in the footer.
pub fn legal_nav() -> Vec<NavItem> {
    vec![
        NavItem::new("Privacy Policy", "/privacy"),
        NavItem::new("Terms of Service", "/terms"),
    ]
}

/// Height bucket for a masonry tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeHint {
    Small,
    #[default]
    Medium,
    Large,
}

/// A short client quote attached to a portfolio case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientQuote {
    pub quote: String,
    pub author: String,
}

/// A portfolio entry (one past event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub size: SizeHint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<ClientQuote>,
}

/// A client testimonial shown in the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub image: String,
    pub quote: String,
    /// Star rating, 0 through 5.
    pub rating: u8,
}

/// Card finish for a service tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Stone,
    Silk,
    Linen,
}

impl Material {
    /// CSS modifier class for the card.
    pub fn class(self) -> &'static str {
        match self {
            Material::Stone => "card-stone",
            Material::Silk => "card-silk",
            Material::Linen => "card-linen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_cta")]
    pub cta: String,
}

fn default_cta() -> String {
    "Learn More".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Value {
    pub title: String,
    pub description: String,
}

/// Metadata for a blog post, read from the `.toml` sidecar next to the post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostMeta {
    pub excerpt: String,
    pub category: String,
    pub date: String,
    pub read_time: String,
    pub image: String,
    pub featured: bool,
}

/// A blog post from `blog/NNN-slug.md`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// URL slug (filename stem with number prefix stripped)
    pub slug: String,
    /// Sort key from number prefix; posts are listed in ascending order
    pub number: u32,
    /// Title from first `# heading`, or the slug as fallback
    pub title: String,
    pub meta: PostMeta,
    /// Raw markdown body
    pub body: String,
}

/// A standalone markdown page (`about.md`, `privacy.md`, `terms.md`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    /// Title from first `# heading`, or the slug as fallback
    pub title: String,
    pub body: String,
}
