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
use ember_core::memory::ReusablePool;
use ember_core::telemetry::MetricsResult;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// The namespace pool metrics are registered under.
pub const POOL_NAMESPACE: &str = "pool";

/// Publishes a [`ReusablePool`]'s bookkeeping, labelled `pool=<name>`.
pub struct PoolMonitor<T> {
    name: String,
    pool: Arc<ReusablePool<T>>,
    available: GaugeHandle,
    created: CounterHandle,
    outstanding: GaugeHandle,
    hit_ratio: GaugeHandle,
    provider_failures: CounterHandle,
}

impl<T> PoolMonitor<T> {
    /// Registers the pool metrics and returns a monitor over `pool`.
    pub fn new(
        registry: &MetricsRegistry,
        name: impl Into<String>,
        pool: Arc<ReusablePool<T>>,
    ) -> MetricsResult<Self> {
        let name = name.into();
        let labels = || vec![("pool".to_string(), name.clone())];
        Ok(Self {
            available: registry.register_gauge_with_labels(
                POOL_NAMESPACE,
                "available",
                "Idle instances ready for reuse",
                "count",
                labels(),
            )?,
            created: registry.register_counter_with_labels(
                POOL_NAMESPACE,
                "created",
                "Instances ever constructed",
                labels(),
            )?,
            outstanding: registry.register_gauge_with_labels(
                POOL_NAMESPACE,
                "outstanding",
                "Instances currently handed out",
                "count",
                labels(),
            )?,
            hit_ratio: registry.register_gauge_with_labels(
                POOL_NAMESPACE,
                "hit_ratio",
                "Share of acquisitions served from the stack",
                "ratio",
                labels(),
            )?,
            provider_failures: registry.register_counter_with_labels(
                POOL_NAMESPACE,
                "provider_failures",
                "Acquisitions that failed to construct",
                labels(),
            )?,
            name,
            pool,
        })
    }

    /// The label this monitor publishes under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for PoolMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolMonitor")
            .field("name", &self.name)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> FrameMonitor for PoolMonitor<T> {
    fn monitor_id(&self) -> Cow<'static, str> {
        Cow::Owned(format!("pool:{}", self.name))
    }

    fn publish(&self) -> MetricsResult<()> {
        let stats = self.pool.stats();
        self.available.set(stats.available as f64)?;
        self.created.set(stats.created as u64)?;
        self.outstanding.set(stats.outstanding() as f64)?;
        self.hit_ratio.set(stats.hit_ratio())?;
        self.provider_failures.set(stats.provider_failures)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::telemetry::{MetricId, MetricValue};

    #[test]
    fn test_publish_reads_pool_stats() {
        let registry = MetricsRegistry::new();
        let pool = Arc::new(ReusablePool::<u32>::with_default());
        let monitor = PoolMonitor::new(&registry, "particles", Arc::clone(&pool)).unwrap();

        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        pool.release(a);
        monitor.publish().unwrap();

        let value = |name: &str| {
            registry
                .get_metric(&MetricId::new(POOL_NAMESPACE, name).with_label("pool", "particles"))
                .unwrap()
                .value
        };
        assert_eq!(value("available"), MetricValue::Gauge(1.0));
        assert_eq!(value("created"), MetricValue::Counter(2));
        assert_eq!(value("outstanding"), MetricValue::Gauge(1.0));
        assert_eq!(value("provider_failures"), MetricValue::Counter(0));
        assert_eq!(monitor.monitor_id(), "pool:particles");
    }
}
