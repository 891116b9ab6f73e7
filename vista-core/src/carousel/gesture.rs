//! Touch swipe recognition.

use crate::carousel::state::Direction;

/// Outcome of a completed touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger travelled right-to-left; shows the next slide.
    Left,
    /// Finger travelled left-to-right; shows the previous slide.
    Right,
}

impl Swipe {
    pub fn direction(self) -> Direction {
        match self {
            Swipe::Left => Direction::Next,
            Swipe::Right => Direction::Previous,
        }
    }
}

/// Tracks the two transient x samples of one touch gesture. Nothing survives
/// from one gesture to the next: no momentum, no multi-touch.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRecognizer {
    touch_start_x: Option<f32>,
    touch_end_x: Option<f32>,
    threshold: f32,
}

impl GestureRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            touch_start_x: None,
            touch_end_x: None,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start of a gesture; clears any samples left by an aborted one.
    pub fn begin(&mut self, x: f32) {
        self.touch_start_x = Some(x);
        self.touch_end_x = None;
    }

    pub fn update(&mut self, x: f32) {
        self.touch_end_x = Some(x);
    }

    /// Complete the gesture. Returns `None` for taps and for gestures that
    /// never received a move sample.
    pub fn finish(&mut self) -> Option<Swipe> {
        let start = self.touch_start_x.take();
        let end = self.touch_end_x.take();
        match (start, end) {
            (Some(start), Some(end)) => classify(start, end, self.threshold),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.touch_start_x = None;
        self.touch_end_x = None;
    }

    pub fn in_progress(&self) -> bool {
        self.touch_start_x.is_some()
    }
}

/// `distance = start - end`; strictly beyond the threshold counts as a swipe.
pub fn classify(start: f32, end: f32, threshold: f32) -> Option<Swipe> {
    let distance = start - end;
    if distance > threshold {
        Some(Swipe::Left)
    } else if distance < -threshold {
        Some(Swipe::Right)
    } else {
        None
    }
}
