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

//! A `GraphicsDevice` with no GPU behind it.
//!
//! The headless device validates every call the way a native driver would and
//! records the accepted ones. It backs servers, CI runs and tests that need the
//! rendering code paths (and their draw-call accounting) without a window.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ember_core::renderer::{
    Capability, ClearColor, ClearFlags, GraphicsDevice, IndexFormat, PrimitiveTopology,
    RenderError, Viewport,
};

/// A call accepted by a [`HeadlessDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// `clear` with the given planes.
    Clear(ClearFlags),
    /// `clear_color`.
    ClearColor(ClearColor),
    /// `set_viewport`.
    Viewport(Viewport),
    /// `set_capability`.
    Capability(Capability, bool),
    /// `draw_arrays`.
    DrawArrays {
        /// Primitive assembly mode.
        topology: PrimitiveTopology,
        /// First vertex read.
        first_vertex: u32,
        /// Vertices drawn.
        vertex_count: u32,
    },
    /// `draw_elements`.
    DrawElements {
        /// Primitive assembly mode.
        topology: PrimitiveTopology,
        /// Indices read.
        index_count: u32,
        /// Index type.
        format: IndexFormat,
        /// Byte offset into the index buffer.
        offset: u64,
    },
}

impl DeviceCommand {
    /// Whether this command is a draw submission.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DeviceCommand::DrawArrays { .. } | DeviceCommand::DrawElements { .. }
        )
    }
}

/// Limits the headless device enforces.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Capabilities the device accepts in `set_capability`.
    pub supported_capabilities: Vec<Capability>,
    /// Size of the simulated vertex buffer, in vertices. `None` disables the check.
    pub vertex_buffer_len: Option<u32>,
    /// Size of the simulated index buffer, in bytes. `None` disables the check.
    pub index_buffer_bytes: Option<u64>,
    /// Keep a log of accepted commands.
    pub record_commands: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            supported_capabilities: Capability::ALL.to_vec(),
            vertex_buffer_len: None,
            index_buffer_bytes: None,
            record_commands: true,
        }
    }
}

#[derive(Debug)]
struct HeadlessState {
    commands: Vec<DeviceCommand>,
    enabled: HashSet<Capability>,
    clear_color: ClearColor,
    viewport: Viewport,
    lost: bool,
}

/// A software stand-in for a native graphics device.
#[derive(Debug)]
pub struct HeadlessDevice {
    config: HeadlessConfig,
    state: Mutex<HeadlessState>,
}

impl HeadlessDevice {
    /// Creates a device with the given limits.
    pub fn new(config: HeadlessConfig) -> Self {
        log::info!(
            "Headless graphics device created ({} capabilities supported)",
            config.supported_capabilities.len()
        );
        Self {
            config,
            state: Mutex::new(HeadlessState {
                commands: Vec::new(),
                enabled: HashSet::new(),
                clear_color: ClearColor::default(),
                viewport: Viewport::default(),
                lost: false,
            }),
        }
    }

    /// A copy of every accepted command, oldest first.
    pub fn commands(&self) -> Vec<DeviceCommand> {
        self.lock().commands.clone()
    }

    /// Drains the command log.
    pub fn take_commands(&self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.lock().commands)
    }

    /// The current clear color.
    pub fn current_clear_color(&self) -> ClearColor {
        self.lock().clear_color
    }

    /// The current viewport.
    pub fn current_viewport(&self) -> Viewport {
        self.lock().viewport
    }

    /// Simulates losing the device: every later call fails with
    /// [`RenderError::DeviceLost`].
    pub fn lose(&self) {
        log::warn!("Headless graphics device marked as lost");
        self.lock().lost = true;
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the state, failing if the device is lost.
    fn live_state(&self) -> Result<MutexGuard<'_, HeadlessState>, RenderError> {
        let state = self.lock();
        if state.lost {
            return Err(RenderError::DeviceLost);
        }
        Ok(state)
    }

    fn record(&self, state: &mut HeadlessState, command: DeviceCommand) {
        log::trace!("headless: {command:?}");
        if self.config.record_commands {
            state.commands.push(command);
        }
    }
}

/// Rejects a count too small to assemble a single primitive.
fn check_primitive_count(
    operation: &'static str,
    topology: PrimitiveTopology,
    count: u32,
) -> Result<(), RenderError> {
    let min = topology.min_vertices();
    if count < min {
        return Err(RenderError::invalid_argument(
            operation,
            format!("{topology:?} needs at least {min} vertices, got {count}"),
        ));
    }
    Ok(())
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn backend_name(&self) -> &str {
        "headless"
    }

    fn clear(&self, flags: ClearFlags) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        self.record(&mut state, DeviceCommand::Clear(flags));
        Ok(())
    }

    fn clear_color(&self, color: ClearColor) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        if !color.is_normalized() {
            return Err(RenderError::invalid_argument(
                "clear_color",
                format!("components must lie in [0, 1], got {color:?}"),
            ));
        }
        state.clear_color = color;
        self.record(&mut state, DeviceCommand::ClearColor(color));
        Ok(())
    }

    fn set_viewport(&self, viewport: Viewport) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        state.viewport = viewport;
        self.record(&mut state, DeviceCommand::Viewport(viewport));
        Ok(())
    }

    fn set_capability(&self, capability: Capability, enabled: bool) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        if !self.config.supported_capabilities.contains(&capability) {
            return Err(RenderError::UnsupportedCapability(capability));
        }
        if enabled {
            state.enabled.insert(capability);
        } else {
            state.enabled.remove(&capability);
        }
        self.record(&mut state, DeviceCommand::Capability(capability, enabled));
        Ok(())
    }

    fn is_capability_enabled(&self, capability: Capability) -> bool {
        self.lock().enabled.contains(&capability)
    }

    fn draw_arrays(
        &self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        check_primitive_count("draw_arrays", topology, vertex_count)?;
        let end = first_vertex.checked_add(vertex_count).ok_or_else(|| {
            RenderError::invalid_argument("draw_arrays", "vertex range overflows u32")
        })?;
        if let Some(len) = self.config.vertex_buffer_len {
            if end > len {
                return Err(RenderError::invalid_argument(
                    "draw_arrays",
                    format!("vertices {first_vertex}..{end} exceed buffer of {len}"),
                ));
            }
        }
        self.record(
            &mut state,
            DeviceCommand::DrawArrays {
                topology,
                first_vertex,
                vertex_count,
            },
        );
        Ok(())
    }

    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        index_count: u32,
        format: IndexFormat,
        offset: u64,
    ) -> Result<(), RenderError> {
        let mut state = self.live_state()?;
        check_primitive_count("draw_elements", topology, index_count)?;
        let stride = format.size_bytes();
        if offset % stride != 0 {
            return Err(RenderError::invalid_argument(
                "draw_elements",
                format!("offset {offset} is not aligned to {stride}-byte indices"),
            ));
        }
        if let Some(len) = self.config.index_buffer_bytes {
            let end = offset.saturating_add(u64::from(index_count) * stride);
            if end > len {
                return Err(RenderError::invalid_argument(
                    "draw_elements",
                    format!("index bytes {offset}..{end} exceed buffer of {len}"),
                ));
            }
        }
        self.record(
            &mut state,
            DeviceCommand::DrawElements {
                topology,
                index_count,
                format,
                offset,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_accepted_commands() {
        let device = HeadlessDevice::default();
        device.clear(ClearFlags::ALL).unwrap();
        device
            .draw_arrays(PrimitiveTopology::TriangleList, 0, 3)
            .unwrap();

        let commands = device.take_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], DeviceCommand::Clear(ClearFlags::ALL));
        assert!(commands[1].is_draw());
        assert!(device.commands().is_empty());
    }

    #[test]
    fn test_misaligned_index_offset_is_rejected() {
        let device = HeadlessDevice::default();
        let err = device
            .draw_elements(PrimitiveTopology::TriangleList, 3, IndexFormat::Uint32, 6)
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::InvalidArgument {
                operation: "draw_elements",
                ..
            }
        ));
        assert!(device.commands().is_empty());
    }

    #[test]
    fn test_buffer_bounds_are_enforced() {
        let device = HeadlessDevice::new(HeadlessConfig {
            vertex_buffer_len: Some(6),
            index_buffer_bytes: Some(12),
            ..Default::default()
        });

        assert!(device
            .draw_arrays(PrimitiveTopology::TriangleList, 3, 3)
            .is_ok());
        assert!(device
            .draw_arrays(PrimitiveTopology::TriangleList, 4, 3)
            .is_err());
        assert!(device
            .draw_elements(PrimitiveTopology::TriangleList, 6, IndexFormat::Uint16, 0)
            .is_ok());
        assert!(device
            .draw_elements(PrimitiveTopology::TriangleList, 6, IndexFormat::Uint16, 2)
            .is_err());
        assert!(device
            .draw_arrays(PrimitiveTopology::PointList, u32::MAX, 1)
            .is_err());
    }

    #[test]
    fn test_draws_below_one_primitive_are_rejected() {
        let device = HeadlessDevice::default();

        assert!(matches!(
            device.draw_arrays(PrimitiveTopology::TriangleStrip, 0, 2),
            Err(RenderError::InvalidArgument {
                operation: "draw_arrays",
                ..
            })
        ));
        assert!(matches!(
            device.draw_elements(PrimitiveTopology::LineList, 1, IndexFormat::Uint16, 0),
            Err(RenderError::InvalidArgument {
                operation: "draw_elements",
                ..
            })
        ));
        assert!(device.draw_arrays(PrimitiveTopology::PointList, 0, 1).is_ok());
        assert_eq!(device.commands().len(), 1);
    }

    #[test]
    fn test_capabilities() {
        let device = HeadlessDevice::new(HeadlessConfig {
            supported_capabilities: vec![Capability::Blend],
            ..Default::default()
        });

        device.set_capability(Capability::Blend, true).unwrap();
        assert!(device.is_capability_enabled(Capability::Blend));
        device.set_capability(Capability::Blend, false).unwrap();
        assert!(!device.is_capability_enabled(Capability::Blend));

        assert_eq!(
            device.set_capability(Capability::StencilTest, true),
            Err(RenderError::UnsupportedCapability(Capability::StencilTest))
        );
    }

    #[test]
    fn test_clear_color_and_viewport_state() {
        let device = HeadlessDevice::default();
        device.clear_color(ClearColor::CORNFLOWER_BLUE).unwrap();
        device.set_viewport(Viewport::from_size(800, 600)).unwrap();

        assert_eq!(device.current_clear_color(), ClearColor::CORNFLOWER_BLUE);
        assert_eq!(device.current_viewport(), Viewport::from_size(800, 600));
        assert!(device
            .clear_color(ClearColor::rgba(2.0, 0.0, 0.0, 1.0))
            .is_err());

        device.clear_color(ClearColor::TRANSPARENT).unwrap();
        assert_eq!(device.current_clear_color().a, 0.0);
    }

    #[test]
    fn test_lost_device_rejects_everything() {
        let device = HeadlessDevice::default();
        device.lose();

        assert_eq!(device.clear(ClearFlags::COLOR), Err(RenderError::DeviceLost));
        assert_eq!(
            device.draw_arrays(PrimitiveTopology::TriangleList, 0, 3),
            Err(RenderError::DeviceLost)
        );
    }

    #[test]
    fn test_recording_can_be_disabled() {
        let device = HeadlessDevice::new(HeadlessConfig {
            record_commands: false,
            ..Default::default()
        });
        device.clear(ClearFlags::COLOR).unwrap();
        assert!(device.commands().is_empty());
    }
}
