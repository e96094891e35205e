//! Headless GUI context replaying queued frames
//!
//! Useful for driving the backends without a GUI library: tests, frame
//! captures, renderer benchmarks.

use std::collections::VecDeque;

use super::context::{FontAtlasPixels, GuiContext};
use super::draw::{DrawData, TextureId};
use super::io::FrameInput;
use super::keys::{GuiKey, MouseCursor};

/// GUI context that emits pre-built [`DrawData`] frames
#[derive(Debug)]
pub struct ReplayContext {
    io: FrameInput,
    cursor: Option<MouseCursor>,
    atlas_pixels: Vec<u8>,
    atlas_width: u32,
    atlas_height: u32,
    font_texture_id: Option<TextureId>,
    frames: VecDeque<DrawData>,
    current: DrawData,
    frame_count: u64,
    consumed_keys: Vec<(GuiKey, bool)>,
    consumed_characters: Vec<u32>,
    dark_style: bool,
}

impl Default for ReplayContext {
    fn default() -> Self {
        Self::new(vec![0xFF; 4], 1, 1)
    }
}

impl ReplayContext {
    /// Create a context whose font atlas holds the given RGBA8 pixels
    pub fn new(atlas_pixels: Vec<u8>, atlas_width: u32, atlas_height: u32) -> Self {
        Self {
            io: FrameInput::default(),
            cursor: Some(MouseCursor::Arrow),
            atlas_pixels,
            atlas_width,
            atlas_height,
            font_texture_id: None,
            frames: VecDeque::new(),
            current: DrawData::default(),
            frame_count: 0,
            consumed_keys: Vec::new(),
            consumed_characters: Vec::new(),
            dark_style: false,
        }
    }

    /// Queue a frame to be returned by a later [`render`](GuiContext::render)
    pub fn push_frame(&mut self, frame: DrawData) {
        self.frames.push_back(frame);
    }

    /// Set the cursor requested by subsequent frames
    pub fn set_mouse_cursor(&mut self, cursor: Option<MouseCursor>) {
        self.cursor = cursor;
    }

    /// Texture identifier assigned to the font atlas
    pub fn font_texture_id(&self) -> Option<TextureId> {
        self.font_texture_id
    }

    /// Number of frames started
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Key transitions consumed by [`new_frame`](GuiContext::new_frame) so far
    pub fn consumed_keys(&self) -> &[(GuiKey, bool)] {
        &self.consumed_keys
    }

    /// Text input consumed by [`new_frame`](GuiContext::new_frame) so far
    pub fn consumed_characters(&self) -> &[u32] {
        &self.consumed_characters
    }

    /// Whether the dark style was applied
    pub fn is_dark_style(&self) -> bool {
        self.dark_style
    }
}

impl GuiContext for ReplayContext {
    fn io(&self) -> &FrameInput {
        &self.io
    }

    fn io_mut(&mut self) -> &mut FrameInput {
        &mut self.io
    }

    fn mouse_cursor(&self) -> Option<MouseCursor> {
        self.cursor
    }

    fn new_frame(&mut self) {
        self.frame_count += 1;
        let keys: Vec<_> = self.io.drain_key_events().map(|event| (event.key, event.down)).collect();
        self.consumed_keys.extend(keys);
        let characters: Vec<_> = self.io.drain_input_characters().collect();
        self.consumed_characters.extend(characters);
        self.io.mouse_wheel = 0.0;
        self.io.mouse_wheel_h = 0.0;
    }

    fn render(&mut self) -> &DrawData {
        self.current = self.frames.pop_front().unwrap_or_else(|| DrawData {
            display_size: self.io.display_size,
            framebuffer_scale: self.io.display_framebuffer_scale,
            ..DrawData::default()
        });
        &self.current
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasPixels<'_> {
        FontAtlasPixels {
            pixels: &self.atlas_pixels,
            width: self.atlas_width,
            height: self.atlas_height,
        }
    }

    fn set_font_texture_id(&mut self, id: TextureId) {
        self.font_texture_id = Some(id);
    }

    fn style_colors_dark(&mut self) {
        self.dark_style = true;
    }
}
