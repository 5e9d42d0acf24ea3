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

//! Allocation-avoidance utilities for hot paths.
//!
//! The centrepiece is [`ReusablePool`], a lazily growing, thread-safe stack of
//! pre-constructed objects. Engine subsystems that would otherwise allocate a
//! fresh object every frame (particles, scratch buffers, command records)
//! acquire one from a pool instead and release it when they are done, so the
//! steady-state frame performs no allocation at all.
//!
//! A pool grows only through its [`Provider`], the fallible factory supplied
//! at construction. Every instance the provider builds is also recorded in the
//! pool's ledger, which lets owners walk all live and idle objects at once
//! (e.g. to reset per-frame state).

mod pool;
mod provider;

pub use self::pool::{PoolStats, Pooled, ReusablePool};
pub use self::provider::{BoxError, Provider, ProviderError};
