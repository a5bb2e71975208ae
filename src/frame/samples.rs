//! Live waveform sample history.
//!
//! The simulation pushes samples at its own tick rate; the host takes one
//! snapshot per frame, and that snapshot's length is the frame's `N`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Default history length, one sample per EEG point.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 1024;

/// Bounded scrolling history of waveform samples, oldest first.
#[derive(Debug, Clone)]
pub struct WaveformSamples {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl WaveformSamples {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, dropping the oldest once full.
    pub fn push(&mut self, sample: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn extend<I: IntoIterator<Item = f32>>(&mut self, samples: I) {
        for sample in samples {
            self.push(sample);
        }
    }

    /// Replace the whole history, keeping the newest `capacity` values.
    pub fn replace(&mut self, samples: &[f32]) {
        self.samples.clear();
        let skip = samples.len().saturating_sub(self.capacity);
        self.samples.extend(samples[skip..].iter().copied());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the current history in playback order.
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }
}

impl Default for WaveformSamples {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_CAPACITY)
    }
}

/// Shared handle between a producer thread and the frame loop.
#[derive(Debug, Clone, Default)]
pub struct SampleFeed {
    inner: Arc<Mutex<WaveformSamples>>,
}

impl SampleFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(WaveformSamples::new(capacity))),
        }
    }

    /// Run `f` with exclusive access to the history.
    ///
    /// A producer that panicked mid-push leaves plain floats behind, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn with<R>(&self, f: impl FnOnce(&mut WaveformSamples) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn push(&self, sample: f32) {
        self.with(|samples| samples.push(sample));
    }

    pub fn extend(&self, samples: &[f32]) {
        self.with(|history| history.extend(samples.iter().copied()));
    }

    /// Current live samples; call once per frame.
    pub fn snapshot(&self) -> Vec<f32> {
        self.with(|samples| samples.snapshot())
    }

    pub fn len(&self) -> usize {
        self.with(|samples| samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
