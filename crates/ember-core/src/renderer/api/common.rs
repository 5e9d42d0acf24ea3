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

//! Small value types passed across the device boundary.

/// A linear RGBA color used to fill the color buffer on clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    /// Red, in `[0, 1]`.
    pub r: f32,
    /// Green, in `[0, 1]`.
    pub g: f32,
    /// Blue, in `[0, 1]`.
    pub b: f32,
    /// Alpha, in `[0, 1]`.
    pub a: f32,
}

impl ClearColor {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Cornflower blue, the traditional "nothing drawn yet" color.
    pub const CORNFLOWER_BLUE: Self = Self::rgba(0.392, 0.584, 0.929, 1.0);

    /// Creates a color from its components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Whether every component lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A rectangle of the framebuffer, in pixels, that rendering maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport anchored at the origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Width divided by height, or `0.0` for a degenerate viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_normalization() {
        assert!(ClearColor::CORNFLOWER_BLUE.is_normalized());
        assert!(!ClearColor::rgba(1.5, 0.0, 0.0, 1.0).is_normalized());
    }

    #[test]
    fn test_viewport_aspect_ratio() {
        assert_eq!(Viewport::from_size(1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
        assert_eq!(Viewport::from_size(10, 0).aspect_ratio(), 0.0);
    }
}
