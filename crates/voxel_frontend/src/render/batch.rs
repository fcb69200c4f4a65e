//! Immediate-style 2D batch recorded by widgets each frame

use super::backend::{RenderError, UiRenderBackend};
use super::camera::Viewport;
use super::vertex::UiVertex;
use crate::foundation::math::{Mat4, Vec2, Vec4};
use crate::items::ItemIcon;

/// A single recorded UI draw operation (pixel coordinates, top-left origin)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle
    Rect {
        /// Top-left corner
        pos: Vec2,
        /// Width and height
        size: Vec2,
        /// Fill color
        color: Vec4,
    },
    /// Line segment
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
        /// Line color
        color: Vec4,
        /// Width in pixels
        width: f32,
    },
    /// Text run using the default UI font
    Text {
        /// Baseline-left position
        pos: Vec2,
        /// Text content
        text: String,
        /// Text color
        color: Vec4,
    },
    /// Item icon (block preview or sprite)
    ItemIcon {
        /// Top-left corner
        pos: Vec2,
        /// Icon size
        size: Vec2,
        /// What to draw
        icon: ItemIcon,
        /// Color multiplier
        tint: Vec4,
    },
    /// Restrict following commands to a rectangle
    PushScissor {
        /// Top-left corner
        pos: Vec2,
        /// Width and height
        size: Vec2,
    },
    /// Drop the most recent scissor rectangle
    PopScissor,
}

/// Recording 2D batch
#[derive(Debug, Clone)]
pub struct Batch2D {
    commands: Vec<DrawCommand>,
    color: Vec4,
    line_width: f32,
    scissor_depth: usize,
}

impl Batch2D {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            line_width: 1.0,
            scissor_depth: 0,
        }
    }

    /// Reset drawing state (color and line width); recorded commands are kept
    pub fn begin(&mut self) {
        self.color = Vec4::new(1.0, 1.0, 1.0, 1.0);
        self.line_width = 1.0;
    }

    /// Set the color used by following primitives
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Current color
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Set the width of following lines
    pub fn line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    /// Record a rectangle in the current color
    pub fn rect(&mut self, pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect { pos, size, color: self.color });
    }

    /// Record a line in the given color
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Vec4) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width: self.line_width,
        });
    }

    /// Record text in the current color
    pub fn text(&mut self, pos: Vec2, text: impl Into<String>) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            color: self.color,
        });
    }

    /// Record an item icon tinted with `tint`
    pub fn icon(&mut self, pos: Vec2, size: Vec2, icon: ItemIcon, tint: Vec4) {
        self.commands.push(DrawCommand::ItemIcon { pos, size, icon, tint });
    }

    /// Clip following commands to a rectangle
    pub fn push_scissor(&mut self, pos: Vec2, size: Vec2) {
        self.scissor_depth += 1;
        self.commands.push(DrawCommand::PushScissor { pos, size });
    }

    /// Remove the innermost clip rectangle
    pub fn pop_scissor(&mut self) {
        if self.scissor_depth == 0 {
            log::warn!("pop_scissor without matching push");
            return;
        }
        self.scissor_depth -= 1;
        self.commands.push(DrawCommand::PopScissor);
    }

    /// Commands recorded since the last flush
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every recorded command
    pub fn clear(&mut self) {
        self.commands.clear();
        self.scissor_depth = 0;
    }

    /// Triangulate solid commands (rects and lines) into NDC vertices
    pub fn vertices(&self, viewport: Viewport) -> Vec<UiVertex> {
        let width = viewport.width_f().max(1.0);
        let height = viewport.height_f().max(1.0);
        let to_ndc = |p: Vec2| [(p.x / width) * 2.0 - 1.0, 1.0 - (p.y / height) * 2.0];

        let mut vertices = Vec::new();
        for command in &self.commands {
            let (corners, color) = match command {
                DrawCommand::Rect { pos, size, color } => {
                    let max = pos + size;
                    (
                        [*pos, Vec2::new(max.x, pos.y), Vec2::new(pos.x, max.y), max],
                        color,
                    )
                }
                DrawCommand::Line { from, to, color, width } => {
                    let dir = to - from;
                    let len = dir.norm();
                    if len <= f32::EPSILON {
                        continue;
                    }
                    let normal = Vec2::new(-dir.y, dir.x) / len * (width * 0.5);
                    (
                        [from + normal, to + normal, from - normal, to - normal],
                        color,
                    )
                }
                _ => continue,
            };
            let color = [color.x, color.y, color.z, color.w];
            for index in [0usize, 1, 2, 2, 1, 3] {
                vertices.push(UiVertex {
                    position: to_ndc(corners[index]),
                    color,
                });
            }
        }
        vertices
    }

    /// Submit recorded commands to a backend and clear the batch
    pub fn flush(
        &mut self,
        backend: &mut dyn UiRenderBackend,
        proj_view: &Mat4,
        viewport: Viewport,
    ) -> Result<(), RenderError> {
        let vertices = self.vertices(viewport);
        log::debug!(
            "Flushing UI batch: {} commands, {} vertices",
            self.commands.len(),
            vertices.len()
        );
        backend.begin_ui_pass(proj_view)?;
        backend.render_batch(&self.commands, &vertices)?;
        backend.end_ui_pass()?;
        self.clear();
        Ok(())
    }
}

impl Default for Batch2D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct RecordingBackend {
        batches: Vec<(usize, usize)>,
        passes: usize,
    }

    impl UiRenderBackend for RecordingBackend {
        fn begin_ui_pass(&mut self, _proj_view: &Mat4) -> Result<(), RenderError> {
            self.passes += 1;
            Ok(())
        }

        fn render_batch(&mut self, commands: &[DrawCommand], vertices: &[UiVertex]) -> Result<(), RenderError> {
            self.batches.push((commands.len(), vertices.len()));
            Ok(())
        }

        fn end_ui_pass(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_rect_uses_current_color() {
        let mut batch = Batch2D::new();
        batch.set_color(Vec4::new(0.0, 0.0, 0.0, 0.5));
        batch.rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(
            batch.commands()[0],
            DrawCommand::Rect {
                pos: Vec2::new(1.0, 2.0),
                size: Vec2::new(3.0, 4.0),
                color: Vec4::new(0.0, 0.0, 0.0, 0.5),
            }
        );
    }

    #[test]
    fn test_rect_vertices_cover_viewport() {
        let mut batch = Batch2D::new();
        batch.rect(Vec2::zeros(), Vec2::new(100.0, 50.0));
        batch.text(Vec2::zeros(), "ignored");
        let vertices = batch.vertices(Viewport::new(100, 50));
        assert_eq!(vertices.len(), 6);
        assert_relative_eq!(vertices[0].position[0], -1.0);
        assert_relative_eq!(vertices[0].position[1], 1.0);
        assert_relative_eq!(vertices[5].position[0], 1.0);
        assert_relative_eq!(vertices[5].position[1], -1.0);
        assert_eq!(UiVertex::as_bytes(&vertices).len(), 6 * 24);
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let mut batch = Batch2D::new();
        batch.line(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert!(batch.vertices(Viewport::new(10, 10)).is_empty());
    }

    #[test]
    fn test_unbalanced_pop_is_ignored() {
        let mut batch = Batch2D::new();
        batch.pop_scissor();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_flush_submits_and_clears() {
        let mut batch = Batch2D::new();
        batch.rect(Vec2::zeros(), Vec2::new(10.0, 10.0));
        let mut backend = RecordingBackend { batches: Vec::new(), passes: 0 };
        batch
            .flush(&mut backend, &Mat4::identity(), Viewport::new(10, 10))
            .unwrap();
        assert_eq!(backend.batches, vec![(1, 6)]);
        assert_eq!(backend.passes, 1);
        assert!(batch.is_empty());
    }
}
