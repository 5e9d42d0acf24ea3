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

//! Registry for managing metrics.

use crate::storage::{InMemoryBackend, MetricsBackend};
use ember_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use std::sync::Arc;

/// Central registry for the engine's metrics.
///
/// Registration hands back a typed handle bound to the metric's id; monitors
/// keep those handles and update through them every frame.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    backend: Arc<dyn MetricsBackend>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// Creates a registry on the default in-memory backend.
    pub fn new() -> Self {
        Self {
            backend: Arc::new(InMemoryBackend::new()),
        }
    }

    /// Creates a registry on a custom backend.
    pub fn with_backend(backend: Arc<dyn MetricsBackend>) -> Self {
        Self { backend }
    }

    /// Registers a counter starting at zero.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        self.register_counter_with_labels(namespace, name, description, Vec::new())
    }

    /// Registers a labelled counter starting at zero.
    pub fn register_counter_with_labels(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        labels: Vec<(String, String)>,
    ) -> MetricsResult<CounterHandle> {
        let id = labelled_id(namespace, name, labels);
        self.backend
            .put_metric(Metric::new_counter(id.clone(), description))?;
        Ok(CounterHandle::new(id, Arc::clone(&self.backend)))
    }

    /// Registers a gauge starting at zero.
    pub fn register_gauge(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> MetricsResult<GaugeHandle> {
        self.register_gauge_with_labels(namespace, name, description, unit, Vec::new())
    }

    /// Registers a labelled gauge starting at zero.
    pub fn register_gauge_with_labels(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        labels: Vec<(String, String)>,
    ) -> MetricsResult<GaugeHandle> {
        let id = labelled_id(namespace, name, labels);
        self.backend
            .put_metric(Metric::new_gauge(id.clone(), description, unit))?;
        Ok(GaugeHandle::new(id, Arc::clone(&self.backend)))
    }

    /// Gets a metric by id.
    pub fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        self.backend.get_metric(id)
    }

    /// Checks whether a metric exists.
    pub fn contains_metric(&self, id: &MetricId) -> bool {
        self.backend.contains_metric(id)
    }

    /// Returns every metric in `namespace`, ordered by id.
    pub fn namespace_metrics(&self, namespace: &str) -> Vec<Metric> {
        let mut metrics: Vec<Metric> = self
            .backend
            .list_all_metrics()
            .into_iter()
            .filter(|m| m.id.namespace == namespace)
            .collect();
        metrics.sort_by_key(|m| m.id.to_string());
        metrics
    }

    /// Returns every metric of one kind.
    pub fn metrics_of_type(&self, metric_type: MetricType) -> Vec<Metric> {
        self.backend
            .list_all_metrics()
            .into_iter()
            .filter(|m| m.metric_type() == metric_type)
            .collect()
    }

    /// The number of registered metrics.
    pub fn metric_count(&self) -> usize {
        self.backend.metric_count()
    }

    /// Removes every metric. Existing handles start failing with
    /// [`MetricsError::MetricNotFound`].
    pub fn clear_all(&self) -> MetricsResult<()> {
        self.backend.clear_all()
    }

    /// Direct access to the backend.
    pub fn backend(&self) -> &Arc<dyn MetricsBackend> {
        &self.backend
    }
}

fn labelled_id(
    namespace: impl Into<String>,
    name: impl Into<String>,
    labels: Vec<(String, String)>,
) -> MetricId {
    labels
        .into_iter()
        .fold(MetricId::new(namespace, name), |id, (key, value)| {
            id.with_label(key, value)
        })
}

/// Handle for updating a registered counter.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl CounterHandle {
    fn new(id: MetricId, backend: Arc<dyn MetricsBackend>) -> Self {
        Self { id, backend }
    }

    /// Adds one and returns the new reading.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.increment_by(1)
    }

    /// Adds `delta` and returns the new reading.
    pub fn increment_by(&self, delta: u64) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, delta)
    }

    /// Overwrites the counter with an absolute reading taken elsewhere.
    pub fn set(&self, value: u64) -> MetricsResult<()> {
        self.backend.update_value(&self.id, MetricValue::Counter(value))
    }

    /// The current reading.
    pub fn get(&self) -> MetricsResult<u64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric.value.as_counter().ok_or(MetricsError::TypeMismatch {
            expected: MetricType::Counter,
            found: metric.metric_type(),
        })
    }

    /// The id of the metric.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for updating a registered gauge.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl GaugeHandle {
    fn new(id: MetricId, backend: Arc<dyn MetricsBackend>) -> Self {
        Self { id, backend }
    }

    /// Sets the gauge.
    pub fn set(&self, value: f64) -> MetricsResult<()> {
        self.backend.update_value(&self.id, MetricValue::Gauge(value))
    }

    /// The current value.
    pub fn get(&self) -> MetricsResult<f64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric.value.as_gauge().ok_or(MetricsError::TypeMismatch {
            expected: MetricType::Gauge,
            found: metric.metric_type(),
        })
    }

    /// The id of the metric.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}
