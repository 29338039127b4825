//! Trailing-window smoothing

use std::collections::VecDeque;

/// Fixed-capacity FIFO of raw samples; the smoothed value is the mean of the
/// window contents. Oldest sample is dropped once the window is full.
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SmoothingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a raw sample and return the new trailing mean
    pub fn push(&mut self, value: f32) -> f32 {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.mean()
    }

    /// Mean of the current window contents (0.0 when empty)
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub fn min(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::min)
    }

    pub fn max(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
