//! Greedy shortest-column masonry layout.
//!
//! Items are placed one by one into whichever column is currently shortest
//! (ties go to the lowest column index). Each placement records absolute
//! offsets, so the gallery can be positioned without any client-side
//! measuring:
//!
//! ```text
//! 3 columns, sizes [large, medium, small, medium]
//!
//!   col 0        col 1        col 2
//!   ┌──────┐     ┌──────┐     ┌──────┐
//!   │ 1 L  │     │ 2 M  │     │ 3 S  │   top = 0
//!   │      │     │      │     └──────┘
//!   │      │     └──────┘     ┌──────┐   top = 224
//!   └──────┘                  │ 4 M  │
//!                             └──────┘
//! ```
//!
//! The layout is a pure function of the item list, the column count and the
//! gallery settings: recomputing it is always safe and always gives the same
//! answer.

use crate::config::GalleryConfig;
use crate::types::{PortfolioItem, SizeHint};
use serde::Serialize;

/// Number of columns for a viewport of the given width.
///
/// One column below the small breakpoint, two below the medium breakpoint,
/// three otherwise.
pub fn columns_for_width(viewport_width: u32, config: &GalleryConfig) -> usize {
    if viewport_width < config.small_breakpoint {
        1
    } else if viewport_width < config.medium_breakpoint {
        2
    } else {
        3
    }
}

/// Position of one item within the gallery container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Index of the item in the input list.
    pub index: usize,
    pub id: String,
    pub column: usize,
    /// Offset from the container top (px).
    pub top: u32,
    /// Offset from the container left (% of container width).
    pub left: f64,
    /// Tile width (% of container width).
    pub width: f64,
    /// Tile height (px).
    pub height: u32,
}

impl Placement {
    /// Inline style positioning the tile.
    pub fn style(&self) -> String {
        format!(
            "top: {}px; left: {}%; width: {}%; height: {}px;",
            self.top,
            fmt_percent(self.left),
            fmt_percent(self.width),
            self.height
        )
    }
}

/// Result of laying out a list of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasonryLayout {
    pub columns: usize,
    pub placements: Vec<Placement>,
    /// Final accumulated height of each column (px, gaps included).
    pub column_heights: Vec<u32>,
    /// Container height: the tallest column.
    pub total_height: u32,
}

/// Lay out `items` into `columns` columns. A column count of zero is treated as one.
pub fn layout(items: &[&PortfolioItem], columns: usize, config: &GalleryConfig) -> MasonryLayout {
    let columns = columns.max(1);
    let width = 100.0 / columns as f64;
    let mut heights = vec![0u32; columns];

    let placements = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let column = shortest_column(&heights);
            let height = tile_height(item.size, config);
            let top = heights[column];
            heights[column] += height + config.gap;
            Placement {
                index,
                id: item.id.clone(),
                column,
                top,
                left: width * column as f64,
                width,
                height,
            }
        })
        .collect();

    let total_height = heights.iter().copied().max().unwrap_or(0);
    MasonryLayout {
        columns,
        placements,
        column_heights: heights,
        total_height,
    }
}

/// Lay out for a viewport width, choosing the column count from the breakpoints.
pub fn layout_for_width(
    items: &[&PortfolioItem],
    viewport_width: u32,
    config: &GalleryConfig,
) -> MasonryLayout {
    layout(items, columns_for_width(viewport_width, config), config)
}

pub fn tile_height(size: SizeHint, config: &GalleryConfig) -> u32 {
    config.heights.for_hint(size)
}

/// Index of the minimum entry; first one wins on ties.
fn shortest_column(heights: &[u32]) -> usize {
    heights
        .iter()
        .enumerate()
        .min_by_key(|&(i, h)| (*h, i))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Hover transform for a tile. Hover never moves tiles, it only lifts them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverStyle {
    pub scale: f64,
    pub z_index: u32,
}

pub fn hover_style(hovered: bool) -> HoverStyle {
    if hovered {
        HoverStyle {
            scale: 1.02,
            z_index: 20,
        }
    } else {
        HoverStyle {
            scale: 1.0,
            z_index: 1,
        }
    }
}

/// Format a percentage without trailing zeros (`33.333333`, `50`, `0`).
fn fmt_percent(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
