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

//! A device decorator that keeps [`RenderStats`] in step with draw traffic.

use std::sync::Arc;

use super::api::{Capability, ClearColor, ClearFlags, IndexFormat, PrimitiveTopology, Viewport};
use super::error::RenderError;
use super::stats::RenderStats;
use super::traits::GraphicsDevice;

/// Wraps a [`GraphicsDevice`] and counts its clears and draws.
///
/// A successful `clear` starts a new frame in the shared [`RenderStats`];
/// every successful `draw_arrays` or `draw_elements` counts one draw call.
/// Calls the wrapped device rejects are not counted. Everything else is
/// forwarded untouched.
#[derive(Debug)]
pub struct InstrumentedDevice<D> {
    inner: D,
    stats: Arc<RenderStats>,
}

impl<D: GraphicsDevice> InstrumentedDevice<D> {
    /// Wraps `inner`, reporting into `stats`.
    pub fn new(inner: D, stats: Arc<RenderStats>) -> Self {
        log::debug!("Instrumenting '{}' device for draw-call accounting", inner.backend_name());
        Self { inner, stats }
    }

    /// The counters this device reports into.
    pub fn stats(&self) -> &Arc<RenderStats> {
        &self.stats
    }

    /// The wrapped device.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwraps the device. The counters keep their values.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: GraphicsDevice> GraphicsDevice for InstrumentedDevice<D> {
    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }

    fn clear(&self, flags: ClearFlags) -> Result<(), RenderError> {
        self.inner.clear(flags)?;
        self.stats.on_clear();
        Ok(())
    }

    fn clear_color(&self, color: ClearColor) -> Result<(), RenderError> {
        self.inner.clear_color(color)
    }

    fn set_viewport(&self, viewport: Viewport) -> Result<(), RenderError> {
        self.inner.set_viewport(viewport)
    }

    fn set_capability(&self, capability: Capability, enabled: bool) -> Result<(), RenderError> {
        self.inner.set_capability(capability, enabled)
    }

    fn is_capability_enabled(&self, capability: Capability) -> bool {
        self.inner.is_capability_enabled(capability)
    }

    fn draw_arrays(
        &self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<(), RenderError> {
        self.inner.draw_arrays(topology, first_vertex, vertex_count)?;
        self.stats.on_draw();
        Ok(())
    }

    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        index_count: u32,
        format: IndexFormat,
        offset: u64,
    ) -> Result<(), RenderError> {
        self.inner
            .draw_elements(topology, index_count, format, offset)?;
        self.stats.on_draw();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Accepts everything unless told to reject draws.
    #[derive(Debug, Default)]
    struct MockDevice {
        reject_draws: AtomicBool,
    }

    impl GraphicsDevice for MockDevice {
        fn backend_name(&self) -> &str {
            "mock"
        }

        fn clear(&self, _flags: ClearFlags) -> Result<(), RenderError> {
            Ok(())
        }

        fn clear_color(&self, _color: ClearColor) -> Result<(), RenderError> {
            Ok(())
        }

        fn set_viewport(&self, _viewport: Viewport) -> Result<(), RenderError> {
            Ok(())
        }

        fn set_capability(&self, _capability: Capability, _enabled: bool) -> Result<(), RenderError> {
            Ok(())
        }

        fn is_capability_enabled(&self, _capability: Capability) -> bool {
            false
        }

        fn draw_arrays(&self, _: PrimitiveTopology, _: u32, _: u32) -> Result<(), RenderError> {
            if self.reject_draws.load(Ordering::Relaxed) {
                Err(RenderError::DeviceLost)
            } else {
                Ok(())
            }
        }

        fn draw_elements(
            &self,
            _: PrimitiveTopology,
            _: u32,
            _: IndexFormat,
            _: u64,
        ) -> Result<(), RenderError> {
            if self.reject_draws.load(Ordering::Relaxed) {
                Err(RenderError::DeviceLost)
            } else {
                Ok(())
            }
        }
    }

    fn instrumented() -> InstrumentedDevice<MockDevice> {
        InstrumentedDevice::new(MockDevice::default(), Arc::new(RenderStats::new()))
    }

    #[test]
    fn test_draws_are_counted() {
        let device = instrumented();
        device
            .draw_arrays(PrimitiveTopology::TriangleList, 0, 3)
            .unwrap();
        device
            .draw_elements(PrimitiveTopology::TriangleList, 6, IndexFormat::Uint16, 0)
            .unwrap();

        assert_eq!(device.stats().current_frame_calls(), 2);
        assert_eq!(device.stats().total_calls(), 2);
    }

    #[test]
    fn test_clear_resets_frame_count_only() {
        let device = instrumented();
        for _ in 0..3 {
            device
                .draw_arrays(PrimitiveTopology::TriangleList, 0, 3)
                .unwrap();
        }
        device.clear(ClearFlags::ALL).unwrap();
        device
            .draw_arrays(PrimitiveTopology::LineList, 0, 2)
            .unwrap();

        assert_eq!(device.stats().current_frame_calls(), 1);
        assert_eq!(device.stats().total_calls(), 4);
    }

    #[test]
    fn test_rejected_draws_are_not_counted() {
        let device = instrumented();
        device.inner().reject_draws.store(true, Ordering::Relaxed);

        assert_eq!(
            device.draw_arrays(PrimitiveTopology::TriangleList, 0, 3),
            Err(RenderError::DeviceLost)
        );
        assert_eq!(device.stats().total_calls(), 0);
    }

    #[test]
    fn test_other_calls_do_not_touch_counters() {
        let device = instrumented();
        device.clear_color(ClearColor::BLACK).unwrap();
        device.set_viewport(Viewport::from_size(640, 480)).unwrap();
        device.set_capability(Capability::Blend, true).unwrap();

        assert_eq!(device.stats().snapshot(), Default::default());
    }

    #[test]
    fn test_stats_are_shared() {
        let stats = Arc::new(RenderStats::new());
        let device = InstrumentedDevice::new(MockDevice::default(), Arc::clone(&stats));
        device
            .draw_arrays(PrimitiveTopology::PointList, 0, 1)
            .unwrap();

        assert_eq!(stats.total_calls(), 1);
        assert_eq!(device.into_inner().backend_name(), "mock");
    }
}
