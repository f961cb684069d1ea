//! Organic section dividers: SVG path data and placement transforms.
//!
//! Every path is drawn in a `width × height` viewBox and closed along the
//! bottom edge, so it can be filled. A divider placed at the top of a section
//! is the same shape flipped vertically.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// ViewBox width used when the divider is rendered ahead of layout.
pub const DEFAULT_WIDTH: f64 = 2000.0;
pub const DEFAULT_HEIGHT: f64 = 120.0;

/// Pixels of vertical drift at full scroll progress.
const PARALLAX_RANGE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerKind {
    Wave,
    Curve,
    Blob,
    Zigzag,
    #[default]
    Organic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
}

impl DividerKind {
    pub fn name(self) -> &'static str {
        match self {
            DividerKind::Wave => "wave",
            DividerKind::Curve => "curve",
            DividerKind::Blob => "blob",
            DividerKind::Zigzag => "zigzag",
            DividerKind::Organic => "organic",
        }
    }

    /// Id of the fill gradient in the divider's `<defs>`.
    pub fn gradient_id(self) -> String {
        format!("divider-gradient-{}", self.name())
    }
}

/// Path data for a divider shape.
pub fn path(kind: DividerKind, width: f64, height: f64) -> String {
    let (w, h) = (width, height);
    // (x, y) as fractions of the viewBox
    let pt = |x: f64, y: f64| format!("{},{}", num(w * x), num(h * y));

    let mut d = String::new();
    match kind {
        DividerKind::Wave => {
            let _ = write!(
                d,
                "M{} C{} {} {} C{} {} {}",
                pt(0.0, 0.5),
                pt(0.25, 0.2),
                pt(0.25, 0.8),
                pt(0.5, 0.5),
                pt(0.75, 0.2),
                pt(0.75, 0.8),
                pt(1.0, 0.5)
            );
        }
        DividerKind::Curve => {
            let _ = write!(
                d,
                "M{} C{} {} {}",
                pt(0.0, 0.8),
                pt(0.2, 0.6),
                pt(0.8, 0.4),
                pt(1.0, 0.2)
            );
        }
        DividerKind::Blob => {
            d.push_str(&format!("M{}", pt(0.0, 0.9)));
            for seg in [
                [(0.1, 0.7), (0.15, 0.3), (0.3, 0.4)],
                [(0.45, 0.5), (0.35, 0.7), (0.5, 0.6)],
                [(0.65, 0.5), (0.75, 0.3), (0.9, 0.4)],
            ] {
                curve_to(&mut d, &pt, seg);
            }
        }
        DividerKind::Zigzag => {
            d.push_str(&format!("M{}", pt(0.0, 0.8)));
            let ys = [0.6, 0.7, 0.5, 0.6, 0.4, 0.5, 0.3, 0.4, 0.2, 0.3];
            for (i, y) in ys.iter().enumerate() {
                let x = (i + 1) as f64 / 10.0;
                let _ = write!(d, " L{}", pt(x, *y));
            }
        }
        DividerKind::Organic => {
            d.push_str(&format!("M{}", pt(0.0, 0.85)));
            for seg in [
                [(0.05, 0.75), (0.08, 0.65), (0.15, 0.7)],
                [(0.22, 0.75), (0.25, 0.85), (0.35, 0.8)],
                [(0.45, 0.75), (0.48, 0.6), (0.55, 0.65)],
                [(0.62, 0.7), (0.65, 0.8), (0.75, 0.75)],
                [(0.85, 0.7), (0.9, 0.5), (0.95, 0.6)],
            ] {
                curve_to(&mut d, &pt, seg);
            }
        }
    }
    let _ = write!(d, " L{} L{} Z", pt(1.0, 1.0), pt(0.0, 1.0));
    d
}

fn curve_to(d: &mut String, pt: &impl Fn(f64, f64) -> String, seg: [(f64, f64); 3]) {
    let [a, b, c] = seg;
    let _ = write!(d, " C{} {} {}", pt(a.0, a.1), pt(b.0, b.1), pt(c.0, c.1));
}

/// Motion paths for the two drifting highlight dots.
pub fn highlight_paths(width: f64, height: f64) -> [String; 2] {
    let (w, h) = (width, height);
    [
        format!(
            "M0,{} C{},{} {},{} {},{} {},{}",
            num(h * 0.5),
            num(w * 0.25),
            num(h * 0.3),
            num(w * 0.5),
            num(h * 0.6),
            num(w * 0.75),
            num(h * 0.4),
            num(w),
            num(h * 0.5)
        ),
        format!(
            "M{},{} C{},{} {},{} {},{}",
            num(w * 0.1),
            num(h * 0.6),
            num(w * 0.3),
            num(h * 0.4),
            num(w * 0.6),
            num(h * 0.7),
            num(w * 0.9),
            num(h * 0.3)
        ),
    ]
}

/// CSS transform for a divider at `placement` with the given scroll progress
/// (`0.0..=1.0`, see [`crate::motion::scroll_progress`]).
pub fn transform(placement: Placement, progress: f64) -> String {
    let offset = progress.clamp(0.0, 1.0) * PARALLAX_RANGE;
    match placement {
        Placement::Top => format!("scaleY(-1) translateY({}px)", num(-offset)),
        Placement::Bottom => format!("scaleY(1) translateY({}px)", num(offset)),
    }
}

/// Shortest decimal form, at most two fractional digits.
fn num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
