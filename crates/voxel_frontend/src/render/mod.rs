//! 2D rendering contract for the UI layer
//!
//! The UI never talks to a graphics API. Widgets record [`DrawCommand`]s into
//! a [`Batch2D`]; a [`UiRenderBackend`] consumes the batch.

pub mod vertex;
pub mod batch;
pub mod camera;
pub mod backend;

pub use vertex::UiVertex;
pub use batch::{Batch2D, DrawCommand};
pub use camera::{UiCamera, Viewport};
pub use backend::{UiRenderBackend, RenderError};
