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

//! Flags selecting which framebuffer planes a clear affects.

use std::ops::{BitOr, BitOrAssign};

/// The set of buffers cleared by [`GraphicsDevice::clear`](crate::renderer::GraphicsDevice::clear).
///
/// The bit values match the native API, so `bits()` can be handed to a
/// backend unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearFlags {
    bits: u32,
}

impl ClearFlags {
    /// Nothing.
    pub const NONE: Self = Self { bits: 0 };
    /// The depth buffer.
    pub const DEPTH: Self = Self { bits: 0x0000_0100 };
    /// The stencil buffer.
    pub const STENCIL: Self = Self { bits: 0x0000_0400 };
    /// The color buffer.
    pub const COLOR: Self = Self { bits: 0x0000_4000 };
    /// Color, depth and stencil.
    pub const ALL: Self = Self {
        bits: Self::COLOR.bits | Self::DEPTH.bits | Self::STENCIL.bits,
    };

    /// Builds flags from raw bits, dropping any bit that is not a known plane.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self {
            bits: bits & Self::ALL.bits,
        }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every plane in `other` is also in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks whether no plane is selected.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl Default for ClearFlags {
    fn default() -> Self {
        Self::COLOR.union(Self::DEPTH)
    }
}

impl BitOr for ClearFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ClearFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
