//! Vertex types for UI rendering

use bytemuck::{Pod, Zeroable};

/// Colored vertex for solid UI geometry (rects and lines)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UiVertex {
    /// Position in NDC coordinates
    pub position: [f32; 2],
    /// Vertex color (RGBA)
    pub color: [f32; 4],
}

impl UiVertex {
    /// Raw bytes for buffer upload
    pub fn as_bytes(vertices: &[UiVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
