//! Math utilities and types
//!
//! Provides the small set of math types used by the input and render paths.

pub use nalgebra::{Matrix4, Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
///
/// Clip rectangles use `(x, y, z, w) = (min_x, min_y, max_x, max_y)`.
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Component-wise division that leaves a component untouched when its divisor is zero
///
/// Window queries can report zero extents while minimized; dividing by them
/// would poison every derived value with NaN or infinity.
pub fn safe_div(value: Vec2, divisor: Vec2) -> Vec2 {
    Vec2::new(
        if divisor.x == 0.0 { value.x } else { value.x / divisor.x },
        if divisor.y == 0.0 { value.y } else { value.y / divisor.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div_regular() {
        let result = safe_div(Vec2::new(10.0, 9.0), Vec2::new(2.0, 3.0));
        assert_eq!(result, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_safe_div_zero_divisor_keeps_value() {
        let result = safe_div(Vec2::new(10.0, 9.0), Vec2::new(0.0, 3.0));
        assert_eq!(result, Vec2::new(10.0, 3.0));
    }
}
