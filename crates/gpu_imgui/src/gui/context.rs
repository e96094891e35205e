//! GUI library context interface

use super::draw::{DrawData, TextureId};
use super::io::FrameInput;
use super::keys::MouseCursor;

/// RGBA32 pixels of the font atlas
#[derive(Debug, Clone, Copy)]
pub struct FontAtlasPixels<'a> {
    /// Tightly packed RGBA8 rows
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// The parts of an immediate-mode GUI context the backends drive
///
/// Dropping the context destroys it.
pub trait GuiContext {
    /// Shared per-frame input state
    fn io(&self) -> &FrameInput;

    /// Mutable per-frame input state
    fn io_mut(&mut self) -> &mut FrameInput;

    /// Cursor requested for the current frame, `None` to hide it
    fn mouse_cursor(&self) -> Option<MouseCursor>;

    /// Start a new frame; input must already be up to date
    fn new_frame(&mut self);

    /// Finish the frame and produce its draw data
    fn render(&mut self) -> &DrawData;

    /// Build the font atlas and return its pixels
    fn font_atlas_rgba32(&mut self) -> FontAtlasPixels<'_>;

    /// Record the texture identifier the renderer assigned to the font atlas
    fn set_font_texture_id(&mut self, id: TextureId);

    /// Apply the dark color scheme
    fn style_colors_dark(&mut self) {}
}
