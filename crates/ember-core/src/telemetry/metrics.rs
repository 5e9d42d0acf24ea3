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

//! Abstract definitions for engine metrics.

use std::fmt::{self, Display};
use std::time::Instant;

/// A structured identifier for a metric: a namespace, a name, and sorted
/// key-value labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    /// The broad category (e.g. "renderer", "pool").
    pub namespace: String,
    /// The specific measurement (e.g. "draw_calls.frame").
    pub name: String,
    /// Dimensional labels, kept sorted by key.
    pub labels: Vec<(String, String)>,
}

impl MetricId {
    /// Creates an unlabelled id.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            labels: Vec::new(),
        }
    }

    /// Adds a label. Labels stay sorted by key so equal sets hash equally.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self.labels.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// Looks up a label value by key.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)?;
        if !self.labels.is_empty() {
            let labels = self
                .labels
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "[{labels}]")?;
        }
        Ok(())
    }
}

/// The kind of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// Only increases, or is overwritten with a larger absolute reading.
    Counter,
    /// Can go up or down.
    Gauge,
}

/// The current value of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// A counter reading.
    Counter(u64),
    /// A gauge reading.
    Gauge(f64),
}

impl MetricValue {
    /// Returns the [`MetricType`] of this value.
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Counter(_) => MetricType::Counter,
            MetricValue::Gauge(_) => MetricType::Gauge,
        }
    }

    /// Returns the value as `f64`, whatever its kind.
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Counter(v) => *v as f64,
            MetricValue::Gauge(v) => *v,
        }
    }

    /// Returns the counter reading, if this is a counter.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            MetricValue::Gauge(_) => None,
        }
    }

    /// Returns the gauge reading, if this is a gauge.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            MetricValue::Counter(_) => None,
        }
    }
}

/// A stored metric: its id, description, unit, value and last update time.
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric's identifier.
    pub id: MetricId,
    /// What the metric measures.
    pub description: String,
    /// The unit of measurement (e.g. "count", "ratio").
    pub unit: String,
    /// The current value.
    pub value: MetricValue,
    /// When the value last changed.
    pub last_updated: Instant,
}

impl Metric {
    /// Creates a counter starting at zero.
    pub fn new_counter(id: MetricId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            unit: "count".to_string(),
            value: MetricValue::Counter(0),
            last_updated: Instant::now(),
        }
    }

    /// Creates a gauge starting at zero.
    pub fn new_gauge(id: MetricId, description: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            unit: unit.into(),
            value: MetricValue::Gauge(0.0),
            last_updated: Instant::now(),
        }
    }

    /// The kind of this metric.
    pub fn metric_type(&self) -> MetricType {
        self.value.metric_type()
    }

    /// Replaces the value, refusing a change of kind.
    pub fn update(&mut self, value: MetricValue) -> MetricsResult<()> {
        if value.metric_type() != self.metric_type() {
            return Err(MetricsError::TypeMismatch {
                expected: self.metric_type(),
                found: value.metric_type(),
            });
        }
        self.value = value;
        self.last_updated = Instant::now();
        Ok(())
    }
}

/// A specialized `Result` type for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// An error raised by the metrics system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// No metric is registered under this id.
    #[error("metric not found: {0}")]
    MetricNotFound(MetricId),
    /// The operation does not fit the metric's kind.
    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// The kind the operation requires.
        expected: MetricType,
        /// The kind actually stored.
        found: MetricType,
    },
    /// The storage layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_id_labels_are_sorted() {
        let id = MetricId::new("pool", "available")
            .with_label("pool", "particles")
            .with_label("arena", "frame");

        assert_eq!(id.labels[0].0, "arena");
        assert_eq!(id.label("pool"), Some("particles"));
        assert_eq!(id.to_string(), "pool:available[arena=frame,pool=particles]");
    }

    #[test]
    fn test_metric_id_display_without_labels() {
        assert_eq!(
            MetricId::new("renderer", "draw_calls.total").to_string(),
            "renderer:draw_calls.total"
        );
    }

    #[test]
    fn test_update_rejects_kind_change() {
        let mut metric = Metric::new_counter(MetricId::new("t", "c"), "test");
        assert!(metric.update(MetricValue::Counter(3)).is_ok());
        assert_eq!(
            metric.update(MetricValue::Gauge(1.0)),
            Err(MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: MetricType::Gauge,
            })
        );
        assert_eq!(metric.value.as_counter(), Some(3));
    }
}
