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

//! Service driving telemetry publication once per frame.

use crate::config::TelemetryConfig;
use crate::metrics::registry::MetricsRegistry;
use crate::monitoring::{DrawCallMonitor, FrameMonitor, MonitorRegistry, PoolMonitor};
use ember_core::memory::ReusablePool;
use ember_core::renderer::RenderStats;
use ember_core::telemetry::MetricsResult;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Owns the metrics registry and the frame monitors feeding it.
#[derive(Debug)]
pub struct TelemetryService {
    config: TelemetryConfig,
    metrics: MetricsRegistry,
    monitors: MonitorRegistry,
    last_update: Instant,
}

impl TelemetryService {
    /// Creates a service with an empty registry.
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            metrics: MetricsRegistry::new(),
            monitors: MonitorRegistry::new(),
            last_update: Instant::now(),
        }
    }

    /// Should be called once per frame.
    /// Publishes every monitor if the update interval has passed.
    pub fn tick(&mut self) -> bool {
        if !self.config.enabled || self.last_update.elapsed() < self.config.update_interval() {
            return false;
        }
        self.flush();
        true
    }

    /// Publishes every monitor now, regardless of the interval.
    ///
    /// Returns the number of monitors that published.
    pub fn flush(&mut self) -> usize {
        log::trace!("Publishing all frame monitors...");
        self.last_update = Instant::now();
        self.monitors.publish_all()
    }

    /// Registers a [`DrawCallMonitor`] over `stats` in the configured namespace.
    pub fn watch_render_stats(&self, stats: Arc<RenderStats>) -> MetricsResult<()> {
        let monitor = DrawCallMonitor::new(&self.metrics, &self.config.namespace, stats)?;
        self.monitors.register(Arc::new(monitor));
        Ok(())
    }

    /// Registers a [`PoolMonitor`] labelled `name` over `pool`.
    pub fn watch_pool<T: Send + 'static>(
        &self,
        name: impl Into<String>,
        pool: Arc<ReusablePool<T>>,
    ) -> MetricsResult<()> {
        let monitor = PoolMonitor::new(&self.metrics, name, pool)?;
        self.monitors.register(Arc::new(monitor));
        Ok(())
    }

    /// Registers a custom monitor.
    pub fn register_monitor(&self, monitor: Arc<dyn FrameMonitor>) {
        self.monitors.register(monitor);
    }

    /// Returns a reference to the metrics registry.
    pub fn metrics_registry(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Returns a reference to the monitor registry.
    pub fn monitor_registry(&self) -> &MonitorRegistry {
        &self.monitors
    }

    /// The active configuration.
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Time since the last publication.
    pub fn since_last_update(&self) -> Duration {
        self.last_update.elapsed()
    }
}

impl Default for TelemetryService {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::telemetry::{MetricId, MetricValue};

    #[test]
    fn test_tick_respects_interval() {
        let mut service = TelemetryService::new(TelemetryConfig {
            update_interval_ms: 60_000,
            ..Default::default()
        });
        assert!(!service.tick());
    }

    #[test]
    fn test_tick_publishes_with_zero_interval() {
        let mut service = TelemetryService::new(TelemetryConfig {
            update_interval_ms: 0,
            ..Default::default()
        });
        let stats = Arc::new(RenderStats::new());
        service.watch_render_stats(Arc::clone(&stats)).unwrap();

        stats.on_draw();
        assert!(service.tick());

        let total = service
            .metrics_registry()
            .get_metric(&MetricId::new("renderer", "draw_calls.total"))
            .unwrap();
        assert_eq!(total.value, MetricValue::Counter(1));
    }

    #[test]
    fn test_disabled_service_never_ticks() {
        let mut service = TelemetryService::new(TelemetryConfig {
            enabled: false,
            update_interval_ms: 0,
            ..Default::default()
        });
        service
            .watch_render_stats(Arc::new(RenderStats::new()))
            .unwrap();
        assert!(!service.tick());
        assert_eq!(service.flush(), 1);
    }
}
