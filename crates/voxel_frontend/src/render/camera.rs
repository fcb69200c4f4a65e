//! Orthographic camera for screen-space UI

use crate::foundation::math::Mat4;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as float
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    /// Height as float
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

/// Flipped-Y orthographic camera, one unit per pixel, origin at the top-left
#[derive(Debug, Clone)]
pub struct UiCamera {
    fov: f32,
    aspect: f32,
    /// Whether Y grows downwards
    pub flipped: bool,
}

impl UiCamera {
    /// Create a camera covering `height` pixels vertically
    pub fn new(height: f32) -> Self {
        Self {
            fov: height,
            aspect: 1.0,
            flipped: true,
        }
    }

    /// Resize to the viewport (the orthographic "fov" is its height)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.fov = viewport.height_f();
        self.aspect = if viewport.height == 0 {
            1.0
        } else {
            viewport.width_f() / viewport.height_f()
        };
    }

    /// Current vertical extent
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Combined projection-view matrix
    pub fn proj_view(&self) -> Mat4 {
        let width = self.fov * self.aspect;
        if self.flipped {
            Mat4::new_orthographic(0.0, width, self.fov, 0.0, -1.0, 1.0)
        } else {
            Mat4::new_orthographic(0.0, width, 0.0, self.fov, -1.0, 1.0)
        }
    }
}
