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

//! Error type for operations on the graphics-device boundary.

use super::api::Capability;

/// An error reported by a [`GraphicsDevice`](super::GraphicsDevice).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A call was rejected because one of its arguments is invalid.
    #[error("invalid argument to `{operation}`: {reason}")]
    InvalidArgument {
        /// The device operation that rejected the call.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
    /// The device does not support the requested capability.
    #[error("capability {0:?} is not supported by this device")]
    UnsupportedCapability(Capability),
    /// The device has been lost and can no longer accept work.
    #[error("the graphics device was lost")]
    DeviceLost,
}

impl RenderError {
    /// Shorthand for [`RenderError::InvalidArgument`].
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}
