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

use super::FrameMonitor;
use crate::metrics::registry::{CounterHandle, GaugeHandle, MetricsRegistry};
use ember_core::renderer::RenderStats;
use ember_core::telemetry::MetricsResult;
use std::borrow::Cow;
use std::sync::Arc;

/// Publishes the draw-call counters.
///
/// Registers, under the given namespace:
/// - `draw_calls.frame` (gauge): calls since the last clear.
/// - `draw_calls.total` (counter): calls over the process lifetime.
/// - `draw_calls.peak` (gauge): the busiest frame so far.
/// - `draw_calls.average` (gauge): mean calls per completed frame.
/// - `frames` (counter): clears observed.
#[derive(Debug)]
pub struct DrawCallMonitor {
    stats: Arc<RenderStats>,
    frame: GaugeHandle,
    total: CounterHandle,
    peak: GaugeHandle,
    average: GaugeHandle,
    frames: CounterHandle,
}

impl DrawCallMonitor {
    /// Registers the draw-call metrics and returns a monitor over `stats`.
    pub fn new(
        registry: &MetricsRegistry,
        namespace: &str,
        stats: Arc<RenderStats>,
    ) -> MetricsResult<Self> {
        Ok(Self {
            stats,
            frame: registry.register_gauge(
                namespace,
                "draw_calls.frame",
                "Draw calls since the last clear",
                "count",
            )?,
            total: registry.register_counter(
                namespace,
                "draw_calls.total",
                "Draw calls since startup",
            )?,
            peak: registry.register_gauge(
                namespace,
                "draw_calls.peak",
                "Draw calls in the busiest frame",
                "count",
            )?,
            average: registry.register_gauge(
                namespace,
                "draw_calls.average",
                "Mean draw calls per completed frame",
                "count",
            )?,
            frames: registry.register_counter(namespace, "frames", "Frames cleared")?,
        })
    }

    /// The counters being monitored.
    pub fn stats(&self) -> &Arc<RenderStats> {
        &self.stats
    }
}

impl FrameMonitor for DrawCallMonitor {
    fn monitor_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("draw_calls")
    }

    fn publish(&self) -> MetricsResult<()> {
        let snapshot = self.stats.snapshot();
        self.frame.set(snapshot.frame_draw_calls as f64)?;
        self.total.set(snapshot.total_draw_calls)?;
        self.peak.set(snapshot.peak_frame_draw_calls as f64)?;
        self.average.set(snapshot.average_per_frame())?;
        self.frames.set(snapshot.frames)?;
        Ok(())
    }
}
