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

use ember_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use std::fmt::Debug;

/// Interface for metric storage backends.
pub trait MetricsBackend: Send + Sync + Debug + 'static {
    /// Stores a metric, replacing any metric with the same id.
    fn put_metric(&self, metric: Metric) -> MetricsResult<()>;

    /// Retrieves a copy of a metric.
    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric>;

    /// Checks whether a metric exists.
    fn contains_metric(&self, id: &MetricId) -> bool;

    /// Returns a copy of every stored metric.
    fn list_all_metrics(&self) -> Vec<Metric>;

    /// The number of stored metrics.
    fn metric_count(&self) -> usize;

    /// Removes every metric.
    fn clear_all(&self) -> MetricsResult<()>;

    /// Replaces a metric's value, keeping its kind.
    ///
    /// The default goes through `get_metric`/`put_metric`; backends with a
    /// lock should override it to make the update atomic.
    fn update_value(&self, id: &MetricId, value: MetricValue) -> MetricsResult<()> {
        let mut metric = self.get_metric(id)?;
        metric.update(value)?;
        self.put_metric(metric)
    }

    /// Adds `delta` to a counter and returns the new reading.
    fn increment_counter(&self, id: &MetricId, delta: u64) -> MetricsResult<u64> {
        let metric = self.get_metric(id)?;
        let current = metric.value.as_counter().ok_or(MetricsError::TypeMismatch {
            expected: MetricType::Counter,
            found: metric.metric_type(),
        })?;
        let next = current.saturating_add(delta);
        self.update_value(id, MetricValue::Counter(next))?;
        Ok(next)
    }
}
