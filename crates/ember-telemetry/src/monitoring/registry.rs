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

//! Registry for frame monitors.

use super::FrameMonitor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A thread-safe collection of frame monitors.
#[derive(Debug, Clone, Default)]
pub struct MonitorRegistry {
    monitors: Arc<Mutex<Vec<Arc<dyn FrameMonitor>>>>,
}

impl MonitorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a monitor.
    pub fn register(&self, monitor: Arc<dyn FrameMonitor>) {
        let monitor_id = monitor.monitor_id();
        self.lock().push(monitor);
        log::info!("Registered frame monitor: {}", monitor_id);
    }

    /// Publishes every monitor and returns how many succeeded.
    ///
    /// A failing monitor is logged and skipped; the others still publish.
    pub fn publish_all(&self) -> usize {
        let monitors = self.lock();
        let mut published = 0;
        for monitor in monitors.iter() {
            match monitor.publish() {
                Ok(()) => published += 1,
                Err(e) => log::warn!("Monitor '{}' failed to publish: {}", monitor.monitor_id(), e),
            }
        }
        published
    }

    /// The number of registered monitors.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether no monitor is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a clone of all registered monitors.
    pub fn all_monitors(&self) -> Vec<Arc<dyn FrameMonitor>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn FrameMonitor>>> {
        self.monitors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
