//! UI Render Backend Trait
//!
//! Defines the interface between the UI system and rendering backends.
//! Keeps the UI system independent of Vulkan/OpenGL specifics.

use super::batch::DrawCommand;
use super::vertex::UiVertex;
use crate::foundation::math::Mat4;

/// Rendering failures reported by a backend
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The backend rejected a draw submission
    #[error("Submission failed: {0}")]
    Submit(String),

    /// Backend state does not allow drawing
    #[error("Backend not ready: {0}")]
    NotReady(String),
}

/// Backend-agnostic UI rendering interface
pub trait UiRenderBackend {
    /// Begin UI rendering pass with the UI projection (`u_projview`)
    fn begin_ui_pass(&mut self, proj_view: &Mat4) -> Result<(), RenderError>;

    /// Render one flushed batch
    ///
    /// # Arguments
    /// * `commands` - Recorded commands in draw order
    /// * `vertices` - Solid geometry of the same commands, ready for upload
    fn render_batch(&mut self, commands: &[DrawCommand], vertices: &[UiVertex]) -> Result<(), RenderError>;

    /// End UI rendering pass
    fn end_ui_pass(&mut self) -> Result<(), RenderError>;
}
