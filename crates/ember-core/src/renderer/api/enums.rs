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

//! Typed stand-ins for the native graphics API's enumeration constants.
//!
//! Each variant carries the numeric value the underlying GL-style API expects,
//! available through `gl_code()`. Backends translate with that, engine code
//! never handles raw integers.

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Consecutive vertices form a closed loop.
    LineLoop,
    /// Consecutive vertices form a connected polyline.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the first and previous.
    TriangleFan,
}

impl PrimitiveTopology {
    /// The native enumeration value.
    pub const fn gl_code(self) -> u32 {
        match self {
            PrimitiveTopology::PointList => 0x0000,
            PrimitiveTopology::LineList => 0x0001,
            PrimitiveTopology::LineLoop => 0x0002,
            PrimitiveTopology::LineStrip => 0x0003,
            PrimitiveTopology::TriangleList => 0x0004,
            PrimitiveTopology::TriangleStrip => 0x0005,
            PrimitiveTopology::TriangleFan => 0x0006,
        }
    }

    /// The smallest vertex count that produces one primitive.
    pub const fn min_vertices(self) -> u32 {
        match self {
            PrimitiveTopology::PointList => 1,
            PrimitiveTopology::LineList
            | PrimitiveTopology::LineLoop
            | PrimitiveTopology::LineStrip => 2,
            PrimitiveTopology::TriangleList
            | PrimitiveTopology::TriangleStrip
            | PrimitiveTopology::TriangleFan => 3,
        }
    }
}

/// The data type of indices in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// Indices are 8-bit unsigned integers.
    Uint8,
    /// Indices are 16-bit unsigned integers.
    #[default]
    Uint16,
    /// Indices are 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// The native enumeration value.
    pub const fn gl_code(self) -> u32 {
        match self {
            IndexFormat::Uint8 => 0x1401,
            IndexFormat::Uint16 => 0x1403,
            IndexFormat::Uint32 => 0x1405,
        }
    }

    /// The size of one index, in bytes.
    pub const fn size_bytes(self) -> u64 {
        match self {
            IndexFormat::Uint8 => 1,
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }
}

/// A fixed-function feature that can be toggled on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Color blending.
    Blend,
    /// Back/front face culling.
    CullFace,
    /// Depth testing.
    DepthTest,
    /// Scissor testing.
    ScissorTest,
    /// Stencil testing.
    StencilTest,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 5] = [
        Capability::Blend,
        Capability::CullFace,
        Capability::DepthTest,
        Capability::ScissorTest,
        Capability::StencilTest,
    ];

    /// The native enumeration value.
    pub const fn gl_code(self) -> u32 {
        match self {
            Capability::Blend => 0x0BE2,
            Capability::CullFace => 0x0B44,
            Capability::DepthTest => 0x0B71,
            Capability::ScissorTest => 0x0C11,
            Capability::StencilTest => 0x0B90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_codes() {
        assert_eq!(PrimitiveTopology::TriangleList.gl_code(), 0x0004);
        assert_eq!(IndexFormat::Uint16.gl_code(), 0x1403);
        assert_eq!(Capability::DepthTest.gl_code(), 0x0B71);
    }

    #[test]
    fn test_index_sizes() {
        assert_eq!(IndexFormat::Uint8.size_bytes(), 1);
        assert_eq!(IndexFormat::Uint16.size_bytes(), 2);
        assert_eq!(IndexFormat::Uint32.size_bytes(), 4);
    }
}
