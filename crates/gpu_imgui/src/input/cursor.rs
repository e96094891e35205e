//! Window, framebuffer and GUI coordinate conversion for the mouse

use crate::foundation::math::{safe_div, Vec2};
use crate::gui::MouseCursor;
use crate::platform::StandardCursor;

/// Scale between OS cursor coordinates and GUI coordinates
///
/// Platforms disagree on whether the framebuffer size already includes the
/// content scale. The ratio of content scale to framebuffer-to-window scale
/// corrects for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTransform {
    scale: Vec2,
}

impl CursorTransform {
    /// Build the transform from the window's current metrics
    pub fn new(window_size: Vec2, framebuffer_size: Vec2, content_scale: Vec2) -> Self {
        let framebuffer_coord_scale = safe_div(framebuffer_size, window_size);
        Self {
            scale: safe_div(content_scale, framebuffer_coord_scale),
        }
    }

    /// OS units per GUI unit
    pub const fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Convert an OS cursor position to GUI coordinates
    pub fn to_gui(&self, cursor: Vec2) -> Vec2 {
        safe_div(cursor, self.scale)
    }

    /// Convert a GUI position to an OS cursor position
    pub fn to_os(&self, position: Vec2) -> Vec2 {
        position.component_mul(&self.scale)
    }
}

/// Standard cursor shown for a GUI cursor request
///
/// Shapes without a standard equivalent fall back to the arrow.
pub const fn standard_cursor_for(cursor: MouseCursor) -> StandardCursor {
    match cursor {
        MouseCursor::TextInput => StandardCursor::IBeam,
        MouseCursor::ResizeNS => StandardCursor::VResize,
        MouseCursor::ResizeEW => StandardCursor::HResize,
        MouseCursor::Hand => StandardCursor::Hand,
        MouseCursor::Arrow
        | MouseCursor::ResizeAll
        | MouseCursor::ResizeNESW
        | MouseCursor::ResizeNWSE
        | MouseCursor::NotAllowed => StandardCursor::Arrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_retina_style_framebuffer() {
        // Framebuffer already doubled, cursor reported in window units
        let transform = CursorTransform::new(Vec2::new(800.0, 600.0), Vec2::new(1600.0, 1200.0), Vec2::new(2.0, 2.0));
        assert_relative_eq!(transform.scale(), Vec2::new(1.0, 1.0));
        assert_relative_eq!(transform.to_gui(Vec2::new(100.0, 50.0)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_scaled_window_without_framebuffer_scale() {
        // Window and framebuffer both in pixels, GUI in logical units
        let transform = CursorTransform::new(Vec2::new(1600.0, 1200.0), Vec2::new(1600.0, 1200.0), Vec2::new(2.0, 2.0));
        assert_relative_eq!(transform.to_gui(Vec2::new(300.0, 200.0)), Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_round_trip_through_os_coordinates() {
        let transform = CursorTransform::new(Vec2::new(1280.0, 720.0), Vec2::new(1280.0, 720.0), Vec2::new(1.5, 1.25));
        let requested = Vec2::new(123.4, 56.7);
        let back = transform.to_gui(transform.to_os(requested));
        assert_relative_eq!(back, requested, epsilon = 1e-4);
    }

    #[test]
    fn test_minimized_window_keeps_finite_scale() {
        let transform = CursorTransform::new(Vec2::zeros(), Vec2::zeros(), Vec2::new(1.0, 1.0));
        assert!(transform.scale().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_cursor_fallbacks() {
        assert_eq!(standard_cursor_for(MouseCursor::ResizeNESW), StandardCursor::Arrow);
        assert_eq!(standard_cursor_for(MouseCursor::TextInput), StandardCursor::IBeam);
        assert_eq!(standard_cursor_for(MouseCursor::ResizeNS), StandardCursor::VResize);
    }
}
