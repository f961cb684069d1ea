//! Testimonial carousel state machine.
//!
//! ```text
//!             mouse-enter
//!   Playing ───────────────▶ Paused
//!      ▲  │                    │
//!      │  │ tick (interval)    │ mouse-leave (restarts timer)
//!      │  ▼                    │
//!   index+1 mod n  ◀───────────┘
//! ```
//!
//! With autoplay off, or fewer than two items, the carousel is `Static`: no
//! timer runs and hover has no effect. Manual navigation (arrows, dots) works
//! in every state and never changes it.

use crate::config::CarouselConfig;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CarouselError {
    #[error("slide {index} out of range for a carousel of {count}")]
    IndexOutOfRange { index: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    Playing,
    Paused,
    Static,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    count: usize,
    index: usize,
    state: CarouselState,
    interval_ms: u64,
    next_advance_at: Option<u64>,
}

impl Carousel {
    pub fn new(count: usize, config: &CarouselConfig, now_ms: u64) -> Self {
        let mut carousel = Self {
            count,
            index: 0,
            state: CarouselState::Static,
            interval_ms: config.interval_ms.max(1),
            next_advance_at: None,
        };
        if config.autoplay && count > 1 {
            carousel.play(now_ms);
        }
        carousel
    }

    fn play(&mut self, now_ms: u64) {
        self.state = CarouselState::Playing;
        self.next_advance_at = Some(now_ms.saturating_add(self.interval_ms));
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether navigation controls (arrows, dots) should be shown at all.
    pub fn has_controls(&self) -> bool {
        self.count > 1
    }

    pub fn mouse_enter(&mut self) {
        if self.state == CarouselState::Playing {
            self.state = CarouselState::Paused;
            self.next_advance_at = None;
        }
    }

    pub fn mouse_leave(&mut self, now_ms: u64) {
        if self.state == CarouselState::Paused {
            self.play(now_ms);
        }
    }

    /// Advance the timer. Each elapsed interval moves one slide forward.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(at) = self.next_advance_at else {
            return;
        };
        if now_ms < at || self.count == 0 {
            return;
        }
        let steps = (now_ms - at) / self.interval_ms + 1;
        let count = self.count as u64;
        self.index = ((self.index as u64 + steps % count) % count) as usize;
        self.next_advance_at = Some(at.saturating_add(steps.saturating_mul(self.interval_ms)));
    }

    pub fn next(&mut self) {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
    }

    pub fn previous(&mut self) {
        if self.count > 0 {
            self.index = (self.index + self.count - 1) % self.count;
        }
    }

    /// Dot click.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.count {
            return Err(CarouselError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        self.index = index;
        Ok(())
    }

    /// Inline style of the progress bar under the quote.
    pub fn progress_style(&self) -> String {
        progress_style(self.state == CarouselState::Playing, self.interval_ms)
    }
}

pub fn progress_style(playing: bool, interval_ms: u64) -> String {
    if playing {
        format!("transform: scaleX(1); transition-duration: {interval_ms}ms;")
    } else {
        "transform: scaleX(0); transition-duration: 0ms;".to_string()
    }
}

/// Filled/empty state of the five rating stars.
pub fn stars(rating: u8) -> [bool; 5] {
    std::array::from_fn(|i| i < usize::from(rating))
}
