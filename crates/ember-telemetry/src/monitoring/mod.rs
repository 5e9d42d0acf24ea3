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

//! Frame monitors: objects that read a live engine structure and publish it
//! into the metrics registry.
//!
//! Unlike event metrics, a monitor polls state owned elsewhere (the draw-call
//! counters, a pool's bookkeeping) and overwrites its gauges with the current
//! readings.

mod draw_calls;
mod pool;
mod registry;

pub use self::draw_calls::DrawCallMonitor;
pub use self::pool::{PoolMonitor, POOL_NAMESPACE};
pub use self::registry::MonitorRegistry;

use ember_core::telemetry::MetricsResult;
use std::borrow::Cow;
use std::fmt::Debug;

/// A monitor publishing one engine structure into the metrics registry.
pub trait FrameMonitor: Send + Sync + Debug + 'static {
    /// A unique, human-readable identifier for this monitor.
    fn monitor_id(&self) -> Cow<'static, str>;

    /// Reads the monitored structure and updates the registered metrics.
    fn publish(&self) -> MetricsResult<()>;
}
