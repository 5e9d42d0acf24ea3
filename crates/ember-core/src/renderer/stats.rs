// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Draw-call accounting for the rendering system.
//!
//! [`RenderStats`] is the engine's single source of truth for how many draw
//! submissions were made in the current frame and over the lifetime of the
//! process. It is created once at engine start, shared through an `Arc`, and
//! updated by whichever component intercepts draw calls (normally an
//! [`InstrumentedDevice`](super::InstrumentedDevice)). Diagnostics and HUD
//! code only ever read it.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live draw-call counters.
///
/// All updates are atomic, so several threads may submit draws concurrently
/// without losing increments. A reader that observes a per-frame increment
/// also observes the matching total increment, which keeps
/// `total_calls() >= current_frame_calls()` for every snapshot.
#[derive(Debug, Default)]
pub struct RenderStats {
    calls_this_frame: AtomicU64,
    total_calls: AtomicU64,
    peak_frame_calls: AtomicU64,
    frames: AtomicU64,
}

impl RenderStats {
    /// Creates a new set of counters, all zero.
    pub const fn new() -> Self {
        Self {
            calls_this_frame: AtomicU64::new(0),
            total_calls: AtomicU64::new(0),
            peak_frame_calls: AtomicU64::new(0),
            frames: AtomicU64::new(0),
        }
    }

    /// Records the start of a new frame: the per-frame count goes back to zero.
    ///
    /// The lifetime total is untouched.
    pub fn on_clear(&self) {
        let finished = self.calls_this_frame.swap(0, Ordering::AcqRel);
        self.peak_frame_calls.fetch_max(finished, Ordering::Relaxed);
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a single draw submission.
    pub fn on_draw(&self) {
        // Total first, so the release on the per-frame counter publishes it.
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.calls_this_frame.fetch_add(1, Ordering::Release);
    }

    /// The number of draw calls since the last clear.
    pub fn current_frame_calls(&self) -> u64 {
        self.calls_this_frame.load(Ordering::Acquire)
    }

    /// The number of draw calls over the lifetime of these counters.
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Acquire)
    }

    /// The highest per-frame count seen at a clear.
    pub fn peak_frame_calls(&self) -> u64 {
        self.peak_frame_calls.load(Ordering::Relaxed)
    }

    /// The number of clears observed.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Reads every counter into a plain value.
    pub fn snapshot(&self) -> RenderStatsSnapshot {
        let frame_draw_calls = self.current_frame_calls();
        RenderStatsSnapshot {
            frame_draw_calls,
            total_draw_calls: self.total_calls(),
            peak_frame_draw_calls: self.peak_frame_calls().max(frame_draw_calls),
            frames: self.frames(),
        }
    }
}

/// A copy of [`RenderStats`] at one instant, suitable for display or export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStatsSnapshot {
    /// Draw calls since the last clear.
    pub frame_draw_calls: u64,
    /// Draw calls over the lifetime of the counters.
    pub total_draw_calls: u64,
    /// The busiest frame so far, including the one in progress.
    pub peak_frame_draw_calls: u64,
    /// Clears observed.
    pub frames: u64,
}

impl RenderStatsSnapshot {
    /// The mean number of draw calls per completed frame.
    pub fn average_per_frame(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_draw_calls.saturating_sub(self.frame_draw_calls) as f64 / self.frames as f64
        }
    }
}
