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

//! # Ember Telemetry
//!
//! Collects the engine's runtime statistics into a metrics registry so that
//! diagnostics overlays and tooling can read them in one place.
//!
//! - [`metrics`]: the registry and its typed handles.
//! - [`storage`]: pluggable metric storage, in memory by default.
//! - [`monitoring`]: frame monitors publishing draw-call and pool statistics.
//! - [`service`]: the per-frame driver tying it together.
//! - [`config`] and [`logging`]: configuration loading and `env_logger` setup.

#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod metrics;
pub mod monitoring;
pub mod service;
pub mod storage;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::registry::{CounterHandle, GaugeHandle, MetricsRegistry};
pub use monitoring::{DrawCallMonitor, FrameMonitor, MonitorRegistry, PoolMonitor, POOL_NAMESPACE};
pub use service::TelemetryService;
