//! Portfolio gallery state: category filter, hover, masonry and lightbox.
//!
//! [`Gallery`] owns everything the portfolio grid needs between renders. The
//! layout is recomputed from scratch on every input that can change it
//! (resize, category change), which keeps it trivially consistent with the
//! current filter.
//!
//! The lightbox holds a [`ScrollLockGuard`] while open. Closing it, opening
//! another item, dropping the gallery (navigating away) all release the guard,
//! so the page scroll state after any sequence of opens and closes is the one
//! that was in effect before the first open.

use crate::config::GalleryConfig;
use crate::masonry::{self, HoverStyle, MasonryLayout};
use crate::types::PortfolioItem;
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GalleryError {
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("no portfolio item with id {0:?}")]
    UnknownItem(String),
}

/// Filter value for the category buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Key used in markup and in the layout table (`"all"` or the category).
    pub fn key(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(c) => c,
        }
    }

    pub fn matches(&self, item: &PortfolioItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => item.category == *c,
        }
    }
}

/// Distinct categories in order of first appearance.
pub fn categories(items: &[PortfolioItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

/// Parse a filter value against the known categories.
pub fn parse_filter(value: &str, categories: &[String]) -> Result<CategoryFilter, GalleryError> {
    if value == "all" {
        Ok(CategoryFilter::All)
    } else if categories.iter().any(|c| c == value) {
        Ok(CategoryFilter::Category(value.to_string()))
    } else {
        Err(GalleryError::UnknownCategory(value.to_string()))
    }
}

/// Items passing the filter, in their original relative order.
pub fn filter_items<'a>(items: &'a [PortfolioItem], filter: &CategoryFilter) -> Vec<&'a PortfolioItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

// ============================================================================
// Page scroll lock
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// The page's body-scroll setting, shared by everything that may lock it.
///
/// Scroll stays hidden while any lock is held, whatever order the locks are
/// released in.
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    locks: Rc<Cell<usize>>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflow(&self) -> Overflow {
        if self.is_locked() {
            Overflow::Hidden
        } else {
            Overflow::Auto
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locks.get() > 0
    }

    /// Disable page scroll until the guard is dropped.
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn lock(&self) -> ScrollLockGuard {
        self.locks.set(self.locks.get() + 1);
        ScrollLockGuard { page: self.clone() }
    }
}

/// One hold on the page scroll lock. Released on drop.
#[derive(Debug)]
pub struct ScrollLockGuard {
    page: PageScroll,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let locks = &self.page.locks;
        locks.set(locks.get().saturating_sub(1));
    }
}

// ============================================================================
// Lightbox
// ============================================================================

/// Full-screen overlay for one portfolio item.
#[derive(Debug)]
pub struct Lightbox {
    page: PageScroll,
    open: Option<(String, ScrollLockGuard)>,
}

impl Lightbox {
    pub fn new(page: PageScroll) -> Self {
        Self { page, open: None }
    }

    /// Show `id`. Opening while already open swaps the item and keeps the
    /// existing lock.
    pub fn open(&mut self, id: &str) {
        match &mut self.open {
            Some((current, _)) => *current = id.to_string(),
            None => self.open = Some((id.to_string(), self.page.lock())),
        }
    }

    /// Dismiss (close control, backdrop click, Escape). No-op when closed.
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.open.as_ref().map(|(id, _)| id.as_str())
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// What clicking a tile did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemClick {
    /// The lightbox now shows the item.
    Lightbox(String),
    /// Lightbox disabled: follow the item's detail route.
    Navigate(String),
}

/// Detail route for a portfolio item.
pub fn detail_path(id: &str) -> String {
    format!("/portfolio/{id}")
}

/// Interactive state of the portfolio grid.
#[derive(Debug)]
pub struct Gallery<'a> {
    items: &'a [PortfolioItem],
    categories: Vec<String>,
    config: GalleryConfig,
    filter: CategoryFilter,
    hovered: Option<String>,
    viewport_width: u32,
    layout: MasonryLayout,
    lightbox: Lightbox,
}

impl<'a> Gallery<'a> {
    pub fn new(
        items: &'a [PortfolioItem],
        config: &GalleryConfig,
        page: PageScroll,
        viewport_width: u32,
    ) -> Self {
        let mut gallery = Self {
            items,
            categories: categories(items),
            config: config.clone(),
            filter: CategoryFilter::All,
            hovered: None,
            viewport_width,
            layout: masonry::layout(&[], 1, config),
            lightbox: Lightbox::new(page),
        };
        gallery.relayout();
        gallery
    }

    fn relayout(&mut self) {
        let visible = filter_items(self.items, &self.filter);
        self.layout = masonry::layout_for_width(&visible, self.viewport_width, &self.config);
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn layout(&self) -> &MasonryLayout {
        &self.layout
    }

    pub fn visible_items(&self) -> Vec<&'a PortfolioItem> {
        filter_items(self.items, &self.filter)
    }

    /// Switch the category filter (`"all"` or a known category).
    pub fn select_category(&mut self, value: &str) -> Result<(), GalleryError> {
        self.filter = parse_filter(value, &self.categories)?;
        if let Some(hovered) = &self.hovered {
            if !self.visible_items().iter().any(|i| &i.id == hovered) {
                self.hovered = None;
            }
        }
        self.relayout();
        Ok(())
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        self.relayout();
    }

    /// Pointer entered (`Some`) or left (`None`) a tile.
    pub fn hover(&mut self, id: Option<&str>) {
        self.hovered = id.map(str::to_string);
    }

    pub fn hover_style(&self, id: &str) -> HoverStyle {
        masonry::hover_style(self.hovered.as_deref() == Some(id))
    }

    pub fn click(&mut self, id: &str) -> Result<ItemClick, GalleryError> {
        if !self.items.iter().any(|i| i.id == id) {
            return Err(GalleryError::UnknownItem(id.to_string()));
        }
        if self.config.lightbox {
            self.lightbox.open(id);
            Ok(ItemClick::Lightbox(id.to_string()))
        } else {
            Ok(ItemClick::Navigate(detail_path(id)))
        }
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    /// "View project details" inside the lightbox: close it and return the
    /// route to follow.
    pub fn view_details(&mut self) -> Option<String> {
        let id = self.lightbox.current()?.to_string();
        self.lightbox.close();
        Some(detail_path(&id))
    }
}

// ============================================================================
// Precomputed layouts
// ============================================================================

/// Layouts for every filter and every column count, embedded in the portfolio
/// page so the browser only has to pick one.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutTable {
    pub small_breakpoint: u32,
    pub medium_breakpoint: u32,
    /// Filter key → layouts for 1, 2 and 3 columns.
    pub filters: BTreeMap<String, Vec<MasonryLayout>>,
}

pub fn layout_table(items: &[PortfolioItem], config: &GalleryConfig) -> LayoutTable {
    let mut filters = BTreeMap::new();
    let all = std::iter::once(CategoryFilter::All)
        .chain(categories(items).into_iter().map(CategoryFilter::Category));
    for filter in all {
        let visible = filter_items(items, &filter);
        let layouts = (1..=3)
            .map(|columns| masonry::layout(&visible, columns, config))
            .collect();
        filters.insert(filter.key().to_string(), layouts);
    }
    LayoutTable {
        small_breakpoint: config.small_breakpoint,
        medium_breakpoint: config.medium_breakpoint,
        filters,
    }
}
