//! One-stop GUI integration
//!
//! Owns the GUI context, the input translator and the renderer, and drives
//! them in the required order each frame:
//!
//! ```text
//! new_frame:  pump events ─▶ InputTranslator::new_frame ─▶ GuiContext::new_frame
//! (application builds its GUI)
//! render:     GuiContext::render ─▶ DrawListRenderer::render
//! ```

use log::{info, warn};

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};
use crate::gpu::{CommandEncoder, GpuDevice};
use crate::gui::GuiContext;
use crate::input::InputTranslator;
use crate::platform::Platform;
use crate::render::DrawListRenderer;

/// GUI context plus both backends
///
/// [`dispose`](Self::dispose) detaches from the window, releases the GPU
/// resources and destroys the context. It is idempotent, and dropping an
/// integration that was not disposed releases what it can.
pub struct GuiIntegration<G: GuiContext, D: GpuDevice> {
    context: Option<G>,
    translator: InputTranslator,
    renderer: DrawListRenderer<D>,
}

impl<G: GuiContext, D: GpuDevice> GuiIntegration<G, D> {
    /// Attach `context` to the window and the GPU device
    ///
    /// Applies the dark style; keyboard navigation follows
    /// [`PlatformConfig::nav_enable_keyboard`](crate::config::PlatformConfig::nav_enable_keyboard).
    pub fn new<P: Platform + ?Sized>(
        mut context: G,
        platform: &mut P,
        device: D,
        config: &BackendConfig,
    ) -> BackendResult<Self> {
        context.style_colors_dark();
        // Subscribe last so a failed renderer leaves no input subscription behind
        let renderer = DrawListRenderer::new(device, &mut context, &config.renderer)?;
        let translator = InputTranslator::new(platform, context.io_mut(), &config.platform);

        info!("GUI integration ready");
        Ok(Self {
            context: Some(context),
            translator,
            renderer,
        })
    }

    fn live_context(&mut self) -> BackendResult<&mut G> {
        self.context.as_mut().ok_or(BackendError::Disposed("GuiIntegration"))
    }

    /// Start a frame: apply pending input, refresh window state, begin the GUI frame
    pub fn new_frame<P: Platform + ?Sized>(&mut self, platform: &mut P) -> BackendResult<()> {
        let context = self.context.as_mut().ok_or(BackendError::Disposed("GuiIntegration"))?;
        self.translator.pump_events(platform, context.io_mut())?;
        let cursor = context.mouse_cursor();
        self.translator.new_frame(platform, context.io_mut(), cursor)?;
        context.new_frame();
        Ok(())
    }

    /// Finish the GUI frame and record its draw calls
    pub fn render<E: CommandEncoder<D>>(&mut self, encoder: &mut E) -> BackendResult<()> {
        let context = self.context.as_mut().ok_or(BackendError::Disposed("GuiIntegration"))?;
        let draw_data = context.render();
        self.renderer.render(encoder, draw_data)
    }

    /// The GUI context
    pub fn context(&mut self) -> BackendResult<&mut G> {
        self.live_context()
    }

    /// The renderer, for texture registration and diagnostics
    pub fn renderer(&mut self) -> BackendResult<&mut DrawListRenderer<D>> {
        self.live_context()?;
        Ok(&mut self.renderer)
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.context.is_none()
    }

    /// Detach from the window, release GPU resources and destroy the context
    ///
    /// Later calls do nothing.
    pub fn dispose<P: Platform + ?Sized>(&mut self, platform: &mut P) -> BackendResult<()> {
        let Some(mut context) = self.context.take() else {
            return Ok(());
        };
        self.translator.dispose(platform, context.io_mut())?;
        self.renderer.dispose(context.io_mut())?;
        drop(context);

        info!("GUI integration disposed");
        Ok(())
    }
}

impl<G: GuiContext, D: GpuDevice> Drop for GuiIntegration<G, D> {
    fn drop(&mut self) {
        if let Some(mut context) = self.context.take() {
            warn!("GUI integration dropped without dispose; window input stays subscribed");
            if let Err(err) = self.renderer.dispose(context.io_mut()) {
                warn!("Failed to release GUI renderer: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::recording::{RecordingDevice, RecordingEncoder};
    use crate::gui::{ConfigFlags, ReplayContext};
    use crate::platform::HeadlessPlatform;

    #[test]
    fn test_setup_applies_defaults() {
        let mut platform = HeadlessPlatform::default();
        let mut gui = GuiIntegration::new(
            ReplayContext::default(),
            &mut platform,
            RecordingDevice::new(),
            &BackendConfig::default(),
        )
        .unwrap();

        let context = gui.context().unwrap();
        assert!(context.is_dark_style());
        assert!(context.io().config_flags.contains(ConfigFlags::NAV_ENABLE_KEYBOARD));
        assert!(context.font_texture_id().is_some());
    }

    #[test]
    fn test_frame_then_dispose_twice() {
        let mut platform = HeadlessPlatform::default();
        let mut gui = GuiIntegration::new(
            ReplayContext::default(),
            &mut platform,
            RecordingDevice::new(),
            &BackendConfig::default(),
        )
        .unwrap();

        gui.new_frame(&mut platform).unwrap();
        gui.render(&mut RecordingEncoder::new()).unwrap();
        assert_eq!(gui.context().unwrap().frame_count(), 1);

        gui.dispose(&mut platform).unwrap();
        gui.dispose(&mut platform).unwrap();
        assert!(gui.is_disposed());
        assert!(!platform.subscribed);
        assert!(matches!(gui.new_frame(&mut platform), Err(BackendError::Disposed(_))));
        assert!(matches!(gui.render(&mut RecordingEncoder::new()), Err(BackendError::Disposed(_))));
    }

    #[test]
    fn test_failed_renderer_leaves_window_unsubscribed() {
        let mut platform = HeadlessPlatform::default();
        let device = RecordingDevice::new();
        device.set_fail_creation(true);

        let result = GuiIntegration::new(ReplayContext::default(), &mut platform, device, &BackendConfig::default());
        assert!(matches!(result, Err(BackendError::Gpu(_))));
        assert!(!platform.subscribed);
    }
}
