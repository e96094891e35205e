//! Clip rectangle projection into framebuffer space

use crate::foundation::math::{Vec2, Vec4};
use crate::gpu::{ScissorRect, Viewport};

/// Framebuffer-space rectangle produced by [`clip_to_framebuffer`]
///
/// Always non-empty and inside the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    /// Top-left corner in pixels
    pub min: Vec2,
    /// Bottom-right corner in pixels
    pub max: Vec2,
}

impl ClipRect {
    /// Width in pixels
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Scissor rectangle covering this region, truncated to whole pixels
    pub fn to_scissor(&self) -> ScissorRect {
        ScissorRect::new(self.min.x as i32, self.min.y as i32, self.width() as u32, self.height() as u32)
    }

    /// Viewport covering this region, truncated to whole pixels
    pub fn to_viewport(&self) -> Viewport {
        Viewport::new(self.min.x as u32, self.min.y as u32, self.width() as u32, self.height() as u32)
    }
}

/// Per-frame parameters mapping GUI clip rectangles to framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpace {
    /// Display origin subtracted from every clip rectangle
    pub offset: Vec2,
    /// Framebuffer pixels per GUI unit
    pub scale: Vec2,
    /// Framebuffer width in pixels
    pub framebuffer_width: i32,
    /// Framebuffer height in pixels
    pub framebuffer_height: i32,
}

impl ClipSpace {
    /// Project a clip rectangle; `None` when nothing of it is visible
    pub fn project(&self, clip_rect: Vec4) -> Option<ClipRect> {
        clip_to_framebuffer(
            clip_rect,
            self.offset,
            self.scale,
            self.framebuffer_width,
            self.framebuffer_height,
        )
    }
}

/// Project a GUI clip rectangle `(min_x, min_y, max_x, max_y)` into framebuffer pixels
///
/// The result is clamped to the framebuffer. Rectangles with no area left
/// after clamping yield `None` and must not be drawn.
pub fn clip_to_framebuffer(
    clip_rect: Vec4,
    offset: Vec2,
    scale: Vec2,
    framebuffer_width: i32,
    framebuffer_height: i32,
) -> Option<ClipRect> {
    let mut min = (Vec2::new(clip_rect.x, clip_rect.y) - offset).component_mul(&scale);
    let mut max = (Vec2::new(clip_rect.z, clip_rect.w) - offset).component_mul(&scale);

    min.x = min.x.max(0.0);
    min.y = min.y.max(0.0);
    max.x = max.x.min(framebuffer_width as f32);
    max.y = max.y.min(framebuffer_height as f32);

    if max.x <= min.x || max.y <= min.y {
        return None;
    }
    Some(ClipRect { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn space(scale: f32) -> ClipSpace {
        ClipSpace {
            offset: Vec2::zeros(),
            scale: Vec2::new(scale, scale),
            framebuffer_width: 1920,
            framebuffer_height: 1080,
        }
    }

    #[test]
    fn test_high_dpi_scaling() {
        let rect = space(2.0).project(Vec4::new(10.0, 10.0, 20.0, 20.0)).unwrap();
        assert_relative_eq!(rect.min, Vec2::new(20.0, 20.0));
        assert_relative_eq!(rect.max, Vec2::new(40.0, 40.0));
        assert_eq!(rect.to_scissor(), ScissorRect::new(20, 20, 20, 20));
    }

    #[test]
    fn test_inside_rect_is_not_clamped() {
        let rect = space(1.0).project(Vec4::new(100.5, 200.0, 300.0, 400.25)).unwrap();
        assert_relative_eq!(rect.min, Vec2::new(100.5, 200.0));
        assert_relative_eq!(rect.max, Vec2::new(300.0, 400.25));
    }

    #[test]
    fn test_outside_rects_are_rejected() {
        let space = space(1.0);
        assert!(space.project(Vec4::new(-50.0, -50.0, -10.0, -10.0)).is_none());
        assert!(space.project(Vec4::new(2000.0, 0.0, 2100.0, 100.0)).is_none());
        assert!(space.project(Vec4::new(0.0, 1080.0, 100.0, 1200.0)).is_none());
        // Zero width
        assert!(space.project(Vec4::new(10.0, 10.0, 10.0, 50.0)).is_none());
    }

    #[test]
    fn test_partial_overlap_is_clamped() {
        let rect = space(1.0).project(Vec4::new(-10.0, 1000.0, 50.0, 1200.0)).unwrap();
        assert_relative_eq!(rect.min, Vec2::new(0.0, 1000.0));
        assert_relative_eq!(rect.max, Vec2::new(50.0, 1080.0));
        assert_eq!(rect.to_viewport(), Viewport::new(0, 1000, 50, 80));
    }

    #[test]
    fn test_display_offset_is_subtracted() {
        let space = ClipSpace {
            offset: Vec2::new(100.0, 50.0),
            ..space(2.0)
        };
        let rect = space.project(Vec4::new(110.0, 60.0, 120.0, 70.0)).unwrap();
        assert_relative_eq!(rect.min, Vec2::new(20.0, 20.0));
        assert_relative_eq!(rect.max, Vec2::new(40.0, 40.0));
    }
}
