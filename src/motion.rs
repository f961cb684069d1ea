//! Scroll, mouse and visibility tracking for reveal animations.
//!
//! An [`AnimationContext`] is created for each page view and owns everything
//! the animated components read: the throttled scroll position and direction,
//! the normalized mouse position, and a [`VisibilityObserver`] that decides
//! whether each registered element renders in its revealed or hidden state.
//! Components never reach for a global; they receive an [`AnimationScope`]
//! and ask it for the context, which fails loudly when no provider exists.
//!
//! ## Time
//!
//! Nothing here reads a clock. Every input carries a `now_ms` timestamp and
//! pending work (reveal delays, the scroll idle timer) is resolved by
//! [`AnimationContext::tick`]. The same sequence of inputs therefore always
//! produces the same state, whichever order independent inputs arrive in.
//!
//! ## Visibility
//!
//! ```text
//!             ratio >= threshold             now >= reveal_at
//!   Hidden ───────────────────────▶ Pending ─────────────────▶ Visible
//!     ▲                                │                          │
//!     │   exit (trigger_once = false)  │                          │
//!     └────────────────────────────────┴──────────────────────────┘
//! ```
//!
//! With `trigger_once = true` the `Visible` state is permanent until the
//! element's [`Observation`] is dropped.

use crate::config::MotionConfig;
use crate::events::{Listeners, Subscription};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};
use thiserror::Error;

// ============================================================================
// Geometry
// ============================================================================

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right >= left && bottom >= top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            Length::Px(v) => v,
            Length::Percent(p) => basis * p / 100.0,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MarginParseError {
    #[error("root margin must have 1 to 4 values, got {0}")]
    Arity(usize),
    #[error("invalid root margin value {0:?} (expected px or %)")]
    Value(String),
}

/// Margin grown around (positive) or shrunk into (negative) the viewport
/// before intersection is tested, in CSS shorthand order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: Length::Px(0.0),
            right: Length::Px(0.0),
            bottom: Length::Px(0.0),
            left: Length::Px(0.0),
        }
    }
}

impl RootMargin {
    /// Parse CSS margin shorthand such as `"0px 0px -50px 0px"` or `"10%"`.
    pub fn parse(input: &str) -> Result<Self, MarginParseError> {
        let values = input
            .split_whitespace()
            .map(parse_length)
            .collect::<Result<Vec<_>, _>>()?;
        let [top, right, bottom, left] = match values.as_slice() {
            [a] => [*a, *a, *a, *a],
            [a, b] => [*a, *b, *a, *b],
            [a, b, c] => [*a, *b, *c, *b],
            [a, b, c, d] => [*a, *b, *c, *d],
            other => return Err(MarginParseError::Arity(other.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// The viewport rectangle after applying this margin. Percentages of the
    /// top/bottom sides resolve against height, left/right against width.
    pub fn apply(&self, viewport: Rect) -> Rect {
        let top = self.top.resolve(viewport.height);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);
        let right = self.right.resolve(viewport.width);
        Rect::new(
            viewport.x - left,
            viewport.y - top,
            viewport.width + left + right,
            viewport.height + top + bottom,
        )
    }
}

fn parse_length(token: &str) -> Result<Length, MarginParseError> {
    let invalid = || MarginParseError::Value(token.to_string());
    if let Some(num) = token.strip_suffix("px") {
        num.parse().map(Length::Px).map_err(|_| invalid())
    } else if let Some(num) = token.strip_suffix('%') {
        num.parse().map(Length::Percent).map_err(|_| invalid())
    } else if token == "0" {
        Ok(Length::Px(0.0))
    } else {
        Err(invalid())
    }
}

/// Fraction of `element` that lies inside `root`, in `0.0..=1.0`.
///
/// A zero-area element counts as fully visible when it touches the root.
pub fn intersection_ratio(element: Rect, root: Rect) -> f64 {
    match element.intersection(&root) {
        None => 0.0,
        Some(overlap) => {
            let area = element.area();
            if area == 0.0 {
                1.0
            } else {
                (overlap.area() / area).clamp(0.0, 1.0)
            }
        }
    }
}

// ============================================================================
// Visibility observer
// ============================================================================

/// Options for a single observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    pub root_margin: RootMargin,
    /// Once revealed, stay revealed.
    pub trigger_once: bool,
    /// Wait this long after entering before revealing.
    pub delay_ms: u64,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::default(),
            trigger_once: true,
            delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reveal {
    Hidden,
    Pending { reveal_at: u64 },
    Visible,
}

struct Entry {
    generation: u64,
    options: ObserveOptions,
    state: Reveal,
}

#[derive(Default)]
struct ObserverState {
    next_generation: u64,
    entries: BTreeMap<String, Entry>,
}

/// Emitted whenever an element flips between hidden and visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub key: String,
    pub visible: bool,
}

/// Tracks which registered elements are currently revealed.
pub struct VisibilityObserver {
    state: Rc<RefCell<ObserverState>>,
    changes: Listeners<VisibilityChange>,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ObserverState::default())),
            changes: Listeners::new(),
        }
    }

    /// Start tracking `key`. The element starts hidden.
    ///
    /// Observing a key that is already tracked replaces its options and
    /// resets it to hidden; the earlier [`Observation`] becomes inert.
    #[must_use = "dropping the observation immediately stops tracking the element"]
    pub fn observe(&self, key: impl Into<String>, options: ObserveOptions) -> Observation {
        let key = key.into();
        let mut state = self.state.borrow_mut();
        let generation = state.next_generation;
        state.next_generation += 1;
        state.entries.insert(
            key.clone(),
            Entry {
                generation,
                options,
                state: Reveal::Hidden,
            },
        );
        Observation {
            key,
            generation,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Subscribe to hidden/visible flips.
    #[must_use = "dropping the subscription immediately unregisters the callback"]
    pub fn on_change(&self, callback: impl FnMut(&VisibilityChange) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Report the element's current geometry against the viewport.
    pub fn update_geometry(&self, key: &str, element: Rect, viewport: Rect, now_ms: u64) {
        let margin = match self.state.borrow().entries.get(key) {
            Some(entry) => entry.options.root_margin,
            None => return,
        };
        let ratio = intersection_ratio(element, margin.apply(viewport));
        self.report_ratio(key, ratio, now_ms);
    }

    /// Report the element's current visible fraction. Unknown keys are ignored.
    pub fn report_ratio(&self, key: &str, ratio: f64, now_ms: u64) {
        let change = {
            let mut state = self.state.borrow_mut();
            let Some(entry) = state.entries.get_mut(key) else {
                return;
            };
            let entering = ratio > 0.0 && ratio >= entry.options.threshold;
            let before = entry.state;
            entry.state = match (before, entering) {
                (Reveal::Hidden, true) if entry.options.delay_ms == 0 => Reveal::Visible,
                (Reveal::Hidden, true) => Reveal::Pending {
                    reveal_at: now_ms + entry.options.delay_ms,
                },
                (Reveal::Pending { .. } | Reveal::Visible, false) if !entry.options.trigger_once => {
                    Reveal::Hidden
                }
                (current, _) => current,
            };
            flip(key, before, entry.state)
        };
        if let Some(change) = change {
            self.changes.emit(&change);
        }
    }

    /// Resolve pending reveals whose delay has elapsed.
    pub fn tick(&self, now_ms: u64) {
        let changes: Vec<VisibilityChange> = {
            let mut state = self.state.borrow_mut();
            state
                .entries
                .iter_mut()
                .filter_map(|(key, entry)| match entry.state {
                    Reveal::Pending { reveal_at } if now_ms >= reveal_at => {
                        entry.state = Reveal::Visible;
                        Some(VisibilityChange {
                            key: key.clone(),
                            visible: true,
                        })
                    }
                    _ => None,
                })
                .collect()
        };
        for change in &changes {
            self.changes.emit(change);
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.state
            .borrow()
            .entries
            .get(key)
            .is_some_and(|e| e.state == Reveal::Visible)
    }

    /// Keys of every element currently revealed.
    pub fn visible_set(&self) -> BTreeSet<String> {
        self.state
            .borrow()
            .entries
            .iter()
            .filter(|(_, e)| e.state == Reveal::Visible)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn flip(key: &str, before: Reveal, after: Reveal) -> Option<VisibilityChange> {
    let was = before == Reveal::Visible;
    let now = after == Reveal::Visible;
    (was != now).then(|| VisibilityChange {
        key: key.to_string(),
        visible: now,
    })
}

/// Handle for an observed element. Stops tracking on drop.
#[derive(Debug)]
pub struct Observation {
    key: String,
    generation: u64,
    state: Weak<RefCell<ObserverState>>,
}

impl Observation {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            if state
                .entries
                .get(&self.key)
                .is_some_and(|e| e.generation == self.generation)
            {
                state.entries.remove(&self.key);
            }
        }
    }
}

// ============================================================================
// Scroll and mouse tracking
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    None,
}

/// Normalized pointer position; the origin is the container centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MousePosition {
    pub x: f64,
    pub y: f64,
}

/// Snapshot of the ambient scroll signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub scroll_y: f64,
    pub direction: ScrollDirection,
    pub is_scrolling: bool,
    pub mouse: MousePosition,
}

/// Throttled scroll position, direction and idle detection.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    throttle_ms: u64,
    idle_ms: u64,
    last_accepted_at: Option<u64>,
    scroll_y: f64,
    direction: ScrollDirection,
    is_scrolling: bool,
    idle_at: Option<u64>,
}

impl ScrollTracker {
    pub fn new(throttle_ms: u64, idle_ms: u64) -> Self {
        Self {
            throttle_ms,
            idle_ms,
            last_accepted_at: None,
            scroll_y: 0.0,
            direction: ScrollDirection::None,
            is_scrolling: false,
            idle_at: None,
        }
    }

    /// Feed a raw scroll event. Returns `false` when the sample was dropped
    /// by the throttle.
    pub fn sample(&mut self, now_ms: u64, scroll_y: f64) -> bool {
        self.tick(now_ms);
        if let Some(last) = self.last_accepted_at {
            if now_ms.saturating_sub(last) < self.throttle_ms {
                return false;
            }
        }
        self.last_accepted_at = Some(now_ms);

        if scroll_y > self.scroll_y {
            self.direction = ScrollDirection::Down;
        } else if scroll_y < self.scroll_y {
            self.direction = ScrollDirection::Up;
        }
        self.scroll_y = scroll_y;
        self.is_scrolling = true;
        self.idle_at = Some(now_ms + self.idle_ms);
        true
    }

    /// Expire the scrolling flag once no sample arrived for the idle period.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(idle_at) = self.idle_at {
            if now_ms >= idle_at {
                self.is_scrolling = false;
                self.direction = ScrollDirection::None;
                self.idle_at = None;
            }
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }
}

/// Pointer position relative to a container, scaled to `range`.
#[derive(Debug, Clone)]
pub struct MouseTracker {
    bounds: Rect,
    range: f64,
    position: MousePosition,
}

impl MouseTracker {
    pub fn new(bounds: Rect, range: f64) -> Self {
        Self {
            bounds,
            range,
            position: MousePosition::default(),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Pointer moved to client coordinates `(x, y)`.
    pub fn move_to(&mut self, client_x: f64, client_y: f64) -> MousePosition {
        if self.bounds.width > 0.0 && self.bounds.height > 0.0 {
            self.position = MousePosition {
                x: ((client_x - self.bounds.x) / self.bounds.width - 0.5) * self.range,
                y: ((client_y - self.bounds.y) / self.bounds.height - 0.5) * self.range,
            };
        }
        self.position
    }

    /// Pointer left the container.
    pub fn leave(&mut self) {
        self.position = MousePosition::default();
    }

    pub fn position(&self) -> MousePosition {
        self.position
    }
}

// ============================================================================
// Context and scope
// ============================================================================

/// Ambient animation state for one page view.
///
/// Dropping the context tears down every listener it owns. Observations and
/// subscriptions handed out to components hold only weak references and
/// become inert.
pub struct AnimationContext {
    motion: MotionConfig,
    default_margin: RootMargin,
    scroll: ScrollTracker,
    mouse: MouseTracker,
    observer: VisibilityObserver,
    scroll_listeners: Listeners<ScrollState>,
}

impl AnimationContext {
    /// Build the context for a page whose root container occupies `container`.
    ///
    /// An unparseable configured root margin falls back to zero; configs
    /// loaded through [`crate::config::load_config`] are already validated.
    pub fn new(motion: &MotionConfig, container: Rect) -> Self {
        Self {
            default_margin: RootMargin::parse(&motion.root_margin).unwrap_or_default(),
            scroll: ScrollTracker::new(motion.throttle_ms, motion.scroll_idle_ms),
            mouse: MouseTracker::new(container, motion.mouse_range),
            observer: VisibilityObserver::new(),
            scroll_listeners: Listeners::new(),
            motion: motion.clone(),
        }
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Options for a page-wide reveal element with the given delay.
    pub fn reveal_options(&self, delay_ms: u64, trigger_once: bool) -> ObserveOptions {
        ObserveOptions {
            threshold: self.motion.threshold,
            root_margin: self.default_margin,
            trigger_once,
            delay_ms,
        }
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    /// Raw scroll event. Subscribers are notified for accepted samples only.
    pub fn on_scroll(&mut self, now_ms: u64, scroll_y: f64) {
        if self.scroll.sample(now_ms, scroll_y) {
            let state = self.state();
            self.scroll_listeners.emit(&state);
        }
    }

    pub fn on_mouse_move(&mut self, client_x: f64, client_y: f64) {
        self.mouse.move_to(client_x, client_y);
    }

    pub fn on_mouse_leave(&mut self) {
        self.mouse.leave();
    }

    pub fn on_resize(&mut self, container: Rect) {
        self.mouse.set_bounds(container);
    }

    /// Advance timers: scroll idle detection and delayed reveals.
    pub fn tick(&mut self, now_ms: u64) {
        let was_scrolling = self.scroll.is_scrolling();
        self.scroll.tick(now_ms);
        self.observer.tick(now_ms);
        if was_scrolling && !self.scroll.is_scrolling() {
            let state = self.state();
            self.scroll_listeners.emit(&state);
        }
    }

    #[must_use = "dropping the subscription immediately unregisters the callback"]
    pub fn subscribe_scroll(&self, callback: impl FnMut(&ScrollState) + 'static) -> Subscription {
        self.scroll_listeners.subscribe(callback)
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            scroll_y: self.scroll.scroll_y(),
            direction: self.scroll.direction(),
            is_scrolling: self.scroll.is_scrolling(),
            mouse: self.mouse.position(),
        }
    }
}

/// What a component receives from its parent: possibly an animation context.
///
/// Pages rendered inside the layout shell get a provided scope. Asking a
/// detached scope for the context is a programming error and panics.
#[derive(Clone, Copy)]
pub struct AnimationScope<'a> {
    context: Option<&'a AnimationContext>,
}

impl<'a> AnimationScope<'a> {
    pub fn provided(context: &'a AnimationContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn detached() -> Self {
        Self { context: None }
    }

    /// The enclosing animation context.
    ///
    /// # Panics
    ///
    /// Panics when the scope has no provider.
    pub fn animations(&self) -> &'a AnimationContext {
        match self.context {
            Some(ctx) => ctx,
            None => panic!(
                "scroll animations used outside of an AnimationScope provider; \
                 render this component inside the layout shell"
            ),
        }
    }
}

// ============================================================================
// Presentation helpers
// ============================================================================

/// Entrance animation applied to an element when it is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    #[default]
    FadeUp,
    ScaleIn,
    FadeLeft,
    FadeRight,
}

/// Classes applied once an element is revealed, whatever its kind.
pub const VISIBLE_CLASSES: &str = "reveal is-visible";

/// Transition shared by every reveal.
pub const REVEAL_TRANSITION: &str = "all 0.8s cubic-bezier(0.16, 1, 0.3, 1)";

impl RevealKind {
    /// Attribute value used in `data-reveal`.
    pub fn name(self) -> &'static str {
        match self {
            RevealKind::FadeUp => "fade-up",
            RevealKind::ScaleIn => "scale-in",
            RevealKind::FadeLeft => "fade-left",
            RevealKind::FadeRight => "fade-right",
        }
    }

    /// Classes for the hidden (pre-reveal) state.
    pub fn hidden_classes(self) -> &'static str {
        match self {
            RevealKind::FadeUp => "reveal hidden-up",
            RevealKind::ScaleIn => "reveal hidden-scale",
            RevealKind::FadeLeft => "reveal hidden-left",
            RevealKind::FadeRight => "reveal hidden-right",
        }
    }

    pub fn classes(self, visible: bool) -> &'static str {
        if visible {
            VISIBLE_CLASSES
        } else {
            self.hidden_classes()
        }
    }
}

/// Inline style for a reveal element with the given delay.
pub fn reveal_style(delay_ms: u64) -> String {
    format!("transition: {REVEAL_TRANSITION}; transition-delay: {delay_ms}ms;")
}

/// Delays for a list whose items reveal one after another.
pub fn stagger_delays(count: usize, base_delay_ms: u64) -> Vec<u64> {
    (0..count as u64).map(|i| i * base_delay_ms).collect()
}

/// Vertical parallax offset for an element moving at `speed` relative to the page.
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// How far an element has travelled up through the viewport, in `0.0..=1.0`.
pub fn scroll_progress(viewport_height: f64, element_top: f64) -> f64 {
    if viewport_height <= 0.0 {
        return 0.0;
    }
    ((viewport_height - element_top) / viewport_height).clamp(0.0, 1.0)
}
