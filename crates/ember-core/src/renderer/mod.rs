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

//! Provides the public, backend-agnostic rendering contracts for the engine.
//!
//! This module defines the narrow [`GraphicsDevice`] trait, the typed
//! constants it speaks in, and the draw-call accounting built on top of it.
//! Concrete backends live in `ember-infra`; diagnostics read [`RenderStats`]
//! through `ember-telemetry`.

pub mod api;
pub mod error;
pub mod instrumented;
pub mod stats;
pub mod traits;

pub use self::api::*;
pub use self::error::RenderError;
pub use self::instrumented::InstrumentedDevice;
pub use self::stats::{RenderStats, RenderStatsSnapshot};
pub use self::traits::GraphicsDevice;
