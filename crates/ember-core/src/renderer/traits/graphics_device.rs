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

use crate::renderer::api::{Capability, ClearColor, ClearFlags, IndexFormat, PrimitiveTopology, Viewport};
use crate::renderer::error::RenderError;
use std::fmt::Debug;

/// The engine's view of a native graphics API.
///
/// Implementations are thin bindings: every method maps onto one native call.
/// Buffer, shader and texture management live behind the backend and are not
/// part of this contract.
pub trait GraphicsDevice: Send + Sync + Debug + 'static {
    /// Returns a short human-readable name for the backend (e.g. "headless").
    fn backend_name(&self) -> &str;

    /// Clears the selected framebuffer planes.
    ///
    /// A clear marks the start of a new frame for draw-call accounting.
    /// ## Arguments
    /// * `flags` - The planes to clear.
    /// ## Errors
    /// * `RenderError` - If the backend rejects the clear.
    fn clear(&self, flags: ClearFlags) -> Result<(), RenderError>;

    /// Sets the color used by subsequent color clears.
    /// ## Arguments
    /// * `color` - The fill color.
    fn clear_color(&self, color: ClearColor) -> Result<(), RenderError>;

    /// Sets the framebuffer region rendering maps onto.
    /// ## Arguments
    /// * `viewport` - The target rectangle, in pixels.
    fn set_viewport(&self, viewport: Viewport) -> Result<(), RenderError>;

    /// Enables or disables a fixed-function capability.
    /// ## Arguments
    /// * `capability` - The feature to toggle.
    /// * `enabled` - Its new state.
    /// ## Errors
    /// * `RenderError::UnsupportedCapability` - If the device lacks the feature.
    fn set_capability(&self, capability: Capability, enabled: bool) -> Result<(), RenderError>;

    /// Indicates whether a capability is currently enabled.
    fn is_capability_enabled(&self, capability: Capability) -> bool;

    /// Submits a non-indexed draw.
    /// ## Arguments
    /// * `topology` - How vertices are assembled.
    /// * `first_vertex` - The first vertex to read.
    /// * `vertex_count` - The number of vertices to draw.
    /// ## Errors
    /// * `RenderError` - If the submission is rejected.
    fn draw_arrays(
        &self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<(), RenderError>;

    /// Submits an indexed draw using the bound index buffer.
    /// ## Arguments
    /// * `topology` - How vertices are assembled.
    /// * `index_count` - The number of indices to read.
    /// * `format` - The type of each index.
    /// * `offset` - The byte offset into the index buffer.
    /// ## Errors
    /// * `RenderError` - If the submission is rejected.
    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        index_count: u32,
        format: IndexFormat,
        offset: u64,
    ) -> Result<(), RenderError>;
}
