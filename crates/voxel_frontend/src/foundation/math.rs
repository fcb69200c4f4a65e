//! Math types
//!
//! Thin aliases over nalgebra used by the node tree and the 2D batch.

pub use nalgebra::{Vector2, Vector3, Vector4, Matrix4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (colors, margins, paddings)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Integer ceiling division for non-negative operands
pub fn ceil_div(a: usize, b: usize) -> usize {
    if b == 0 {
        return 0;
    }
    a / b + usize::from(a % b != 0)
}
