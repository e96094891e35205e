use std::rc::Rc;

use log::{debug, info, trace};

use super::clip::ClipSpace;
use super::pipeline::{PipelineDescriptor, SamplerDescriptor};
use super::pool::ResourcePool;
use super::projection::{ortho_projection, CoordinateSystem, VertUniforms};
use super::stats::RenderStats;
use super::textures::TextureRegistry;
use crate::config::RendererConfig;
use crate::error::{BackendError, BackendResult};
use crate::gpu::{
    CommandEncoder, GpuBuffer, GpuDevice, GpuError, GpuTexture, ScissorRect, ShaderInstance, TextureFormat, Viewport,
};
use crate::gui::{BackendFlags, CallbackFlags, DrawCallback, DrawData, FrameInput, GuiContext, TextureId};

/// Resources created at construction and released on disposal
struct RendererResources<D: GpuDevice> {
    pipeline: D::Pipeline,
    uniforms: D::UniformBuffer,
    sampler: D::Sampler,
    font_texture: Rc<D::Texture>,
    font_texture_id: TextureId,
    placeholder: Rc<D::Texture>,
    textures: TextureRegistry<D::Texture>,
    pool: ResourcePool<D>,
}

/// Translates GUI draw data into GPU draw calls
///
/// Owns the GUI pipeline, the projection uniform buffer, the font texture and
/// a 1x1 placeholder texture, plus the pooled per-frame buffers. Every
/// operation after [`dispose`](Self::dispose) fails with
/// [`BackendError::Disposed`].
pub struct DrawListRenderer<D: GpuDevice> {
    device: D,
    backend_name: String,
    coordinate_system: CoordinateSystem,
    resources: Option<RendererResources<D>>,
    last_stats: RenderStats,
    frame_count: u64,
}

impl<D: GpuDevice> DrawListRenderer<D> {
    /// Create the GPU resources and register with the GUI context
    ///
    /// Uploads the font atlas, hands its texture identifier to the context and
    /// advertises vertex offset support.
    pub fn new<G: GuiContext + ?Sized>(device: D, gui: &mut G, config: &RendererConfig) -> BackendResult<Self> {
        let pipeline = device.create_pipeline(&PipelineDescriptor::gui_overlay())?;
        let uniforms = device.create_uniform_buffer(1)?;
        let sampler = device.create_sampler(&SamplerDescriptor::linear())?;

        let mut placeholder = device.create_texture()?;
        placeholder.set_data(&[0; 4], 1, 1, TextureFormat::Rgba8Unorm)?;

        let mut textures = TextureRegistry::new();
        let font_texture = Rc::new(create_font_texture(&device, gui)?);
        let font_texture_id = textures.register(&font_texture);
        gui.set_font_texture_id(font_texture_id);

        let io = gui.io_mut();
        io.backend_renderer_name = Some(config.backend_name.clone());
        io.backend_flags |= BackendFlags::RENDERER_HAS_VTX_OFFSET;

        info!(
            "GUI renderer created ({}, font atlas {}x{})",
            config.backend_name,
            font_texture.width(),
            font_texture.height()
        );

        Ok(Self {
            device,
            backend_name: config.backend_name.clone(),
            coordinate_system: config.coordinate_system,
            resources: Some(RendererResources {
                pipeline,
                uniforms,
                sampler,
                font_texture,
                font_texture_id,
                placeholder: Rc::new(placeholder),
                textures,
                pool: ResourcePool::new(),
            }),
            last_stats: RenderStats::default(),
            frame_count: 0,
        })
    }

    fn resources(&self) -> BackendResult<&RendererResources<D>> {
        self.resources.as_ref().ok_or(BackendError::Disposed("DrawListRenderer"))
    }

    fn resources_mut(&mut self) -> BackendResult<&mut RendererResources<D>> {
        self.resources.as_mut().ok_or(BackendError::Disposed("DrawListRenderer"))
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.resources.is_none()
    }

    /// Record the draw calls for one frame
    ///
    /// A zero-sized framebuffer (minimized window) records nothing. Commands
    /// whose clip rectangle is empty are skipped; textures that no longer
    /// resolve, or resolve to a zero-sized texture, are drawn with the
    /// placeholder.
    pub fn render<E: CommandEncoder<D>>(&mut self, encoder: &mut E, draw_data: &DrawData) -> BackendResult<()> {
        let coordinate_system = self.coordinate_system;
        let device = &self.device;
        let resources = self.resources.as_mut().ok_or(BackendError::Disposed("DrawListRenderer"))?;

        let (fb_width, fb_height) = draw_data.framebuffer_size();
        if fb_width <= 0 || fb_height <= 0 {
            trace!("Skipping GUI frame, framebuffer is {}x{}", fb_width, fb_height);
            return Ok(());
        }

        let projection = ortho_projection(draw_data.display_pos, draw_data.display_size, coordinate_system);
        resources.uniforms.write(&[VertUniforms::new(&projection)])?;

        let clip_space = ClipSpace {
            offset: draw_data.display_pos,
            scale: draw_data.framebuffer_scale,
            framebuffer_width: fb_width,
            framebuffer_height: fb_height,
        };
        let full_viewport = Viewport::new(0, 0, fb_width as u32, fb_height as u32);
        let full_scissor = ScissorRect::new(0, 0, fb_width as u32, fb_height as u32);

        let RendererResources {
            pipeline,
            uniforms,
            sampler,
            placeholder,
            textures,
            pool,
            ..
        } = resources;
        let mut stats = RenderStats::default();

        for list in &draw_data.draw_lists {
            stats.draw_lists += 1;
            stats.vertices += list.vtx_buffer.len();
            stats.indices += list.idx_buffer.len();

            pool.acquire_vertex_buffer(device, list.vtx_buffer.len())?
                .write(&list.vtx_buffer)?;
            pool.acquire_index_buffer(device, list.idx_buffer.len())?
                .write(&list.idx_buffer)?;

            for cmd in &list.cmd_buffer {
                match &cmd.callback {
                    Some(DrawCallback::ResetRenderState) => {
                        encoder.set_viewport(full_viewport);
                        encoder.set_scissor(full_scissor);
                        stats.callbacks += 1;
                    }
                    Some(DrawCallback::User { callback, data }) => {
                        let flags = CallbackFlags::from_user_data(*data);
                        if !flags.is_empty() {
                            let Some(rect) = clip_space.project(cmd.clip_rect) else {
                                stats.skipped_commands += 1;
                                continue;
                            };
                            if flags.contains(CallbackFlags::SCISSOR) {
                                encoder.set_scissor(rect.to_scissor());
                            }
                            if flags.contains(CallbackFlags::VIEWPORT) {
                                encoder.set_viewport(rect.to_viewport());
                            }
                        }
                        (**callback)(list, cmd, encoder);
                        stats.callbacks += 1;
                    }
                    None => {
                        let Some(rect) = clip_space.project(cmd.clip_rect) else {
                            stats.skipped_commands += 1;
                            continue;
                        };
                        encoder.set_scissor(rect.to_scissor());

                        let resolved = textures.resolve(cmd.texture_id);
                        let texture: &D::Texture = match &resolved {
                            Some(texture) if !texture.is_zero_sized() => &**texture,
                            _ => {
                                debug!("Texture {:?} unavailable, drawing placeholder", cmd.texture_id);
                                stats.placeholder_substitutions += 1;
                                &**placeholder
                            }
                        };

                        let vertex_offset = i32::try_from(cmd.vtx_offset)
                            .map_err(|_| GpuError::InvalidData(format!("vertex offset {} too large", cmd.vtx_offset)))?;

                        let bindings = pool.acquire_draw_bindings(device)?;
                        bindings.instance.set_vertex_buffer(bindings.vertex_buffer);
                        bindings.instance.set_uniforms(uniforms);
                        bindings.instance.set_texture(texture);
                        bindings.instance.set_sampler(sampler);

                        encoder.set_viewport(full_viewport);
                        encoder.set_pipeline(pipeline, bindings.instance);
                        encoder.draw_indexed(
                            bindings.index_buffer,
                            cmd.elem_count,
                            1,
                            cmd.idx_offset,
                            vertex_offset,
                            0,
                        );
                        stats.draw_calls += 1;
                    }
                }
            }
        }

        pool.swap();
        self.last_stats = stats;
        self.frame_count += 1;
        trace!(
            "GUI frame {}: {} lists, {} draws, {} skipped",
            self.frame_count,
            stats.draw_lists,
            stats.draw_calls,
            stats.skipped_commands
        );
        Ok(())
    }

    /// Create a texture from RGBA8 pixels and register it
    ///
    /// The caller owns the returned texture; the identifier stops resolving
    /// once it is dropped.
    pub fn upload_texture(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> BackendResult<(TextureId, Rc<D::Texture>)> {
        self.resources()?;
        let mut texture = self.device.create_texture()?;
        texture.set_data(pixels, width, height, TextureFormat::Rgba8Unorm)?;
        let texture = Rc::new(texture);
        let id = self.resources_mut()?.textures.register(&texture);
        debug!("Registered {}x{} texture as {:?}", width, height, id);
        Ok((id, texture))
    }

    /// Register an existing texture without taking ownership
    pub fn register_texture(&mut self, texture: &Rc<D::Texture>) -> BackendResult<TextureId> {
        Ok(self.resources_mut()?.textures.register(texture))
    }

    /// Forget a texture identifier; returns whether it was registered
    pub fn unregister_texture(&mut self, id: TextureId) -> BackendResult<bool> {
        Ok(self.resources_mut()?.textures.unregister(id))
    }

    /// Re-upload the font atlas after the GUI context rebuilt it
    ///
    /// The previous font texture identifier stops resolving.
    pub fn rebuild_font_texture<G: GuiContext + ?Sized>(&mut self, gui: &mut G) -> BackendResult<TextureId> {
        self.resources()?;
        let font_texture = Rc::new(create_font_texture(&self.device, gui)?);

        let resources = self.resources_mut()?;
        resources.textures.unregister(resources.font_texture_id);
        resources.textures.purge();
        let id = resources.textures.register(&font_texture);
        resources.font_texture = font_texture;
        resources.font_texture_id = id;
        gui.set_font_texture_id(id);

        info!("Font texture rebuilt as {:?}", id);
        Ok(id)
    }

    /// Identifier of the font atlas texture
    pub fn font_texture_id(&self) -> BackendResult<TextureId> {
        Ok(self.resources()?.font_texture_id)
    }

    /// Counters from the last rendered frame
    pub fn last_stats(&self) -> BackendResult<RenderStats> {
        self.resources()?;
        Ok(self.last_stats)
    }

    /// Append human-readable diagnostics as key/value pairs
    pub fn diagnostic_info(&self, out: &mut Vec<(&'static str, String)>) -> BackendResult<()> {
        let resources = self.resources()?;
        let pool = resources.pool.stats();
        out.push(("Renderer", self.backend_name.clone()));
        out.push(("Frames rendered", self.frame_count.to_string()));
        out.push(("Draw lists", self.last_stats.draw_lists.to_string()));
        out.push(("Draw calls", self.last_stats.draw_calls.to_string()));
        out.push(("Skipped commands", self.last_stats.skipped_commands.to_string()));
        out.push(("Placeholder draws", self.last_stats.placeholder_substitutions.to_string()));
        out.push(("Vertices", self.last_stats.vertices.to_string()));
        out.push(("Indices", self.last_stats.indices.to_string()));
        out.push(("Pooled vertex buffers", pool.vertex_buffers.to_string()));
        out.push(("Pooled index buffers", pool.index_buffers.to_string()));
        out.push(("Pooled shader instances", pool.shader_instances.to_string()));
        out.push(("Registered textures", resources.textures.len().to_string()));
        out.push((
            "Font atlas",
            format!("{}x{}", resources.font_texture.width(), resources.font_texture.height()),
        ));
        Ok(())
    }

    /// Release every GPU resource and withdraw from the frame input
    ///
    /// A second call fails with [`BackendError::Disposed`].
    pub fn dispose(&mut self, io: &mut FrameInput) -> BackendResult<()> {
        let mut resources = self.resources.take().ok_or(BackendError::Disposed("DrawListRenderer"))?;
        resources.pool.clear();
        resources.textures.clear();
        drop(resources);

        if io.backend_renderer_name.as_deref() == Some(self.backend_name.as_str()) {
            io.backend_renderer_name = None;
        }
        io.backend_flags.remove(BackendFlags::RENDERER_HAS_VTX_OFFSET);

        info!("GUI renderer disposed after {} frames", self.frame_count);
        Ok(())
    }
}

fn create_font_texture<D: GpuDevice, G: GuiContext + ?Sized>(device: &D, gui: &mut G) -> BackendResult<D::Texture> {
    let atlas = gui.font_atlas_rgba32();
    let mut texture = device.create_texture()?;
    texture.set_data(atlas.pixels, atlas.width, atlas.height, TextureFormat::Rgba8Unorm)?;
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec4};
    use crate::gpu::recording::{RecordedCommand, RecordingDevice, RecordingEncoder};
    use crate::gui::{DrawCmd, DrawList, DrawVert, ReplayContext};

    fn quad_list(clip: Vec4, texture_id: TextureId) -> DrawList {
        DrawList {
            vtx_buffer: vec![DrawVert::default(); 4],
            idx_buffer: vec![0, 1, 2, 0, 2, 3],
            cmd_buffer: vec![DrawCmd::new(clip, texture_id, 0, 6)],
        }
    }

    fn frame(lists: Vec<DrawList>) -> DrawData {
        DrawData {
            display_size: Vec2::new(640.0, 480.0),
            draw_lists: lists,
            ..DrawData::default()
        }
    }

    fn renderer() -> (DrawListRenderer<RecordingDevice>, ReplayContext, RecordingDevice) {
        let device = RecordingDevice::new();
        let mut gui = ReplayContext::new(vec![0xFF; 16], 2, 2);
        let renderer = DrawListRenderer::new(device.clone(), &mut gui, &RendererConfig::default()).unwrap();
        (renderer, gui, device)
    }

    #[test]
    fn test_construction_registers_font_atlas() {
        let (renderer, gui, device) = renderer();
        let font_id = renderer.font_texture_id().unwrap();

        assert_eq!(gui.font_texture_id(), Some(font_id));
        assert!(gui.io().backend_flags.contains(BackendFlags::RENDERER_HAS_VTX_OFFSET));
        assert_eq!(gui.io().backend_renderer_name.as_deref(), Some("gpu_imgui_renderer"));

        let counts = device.creation_counts();
        assert_eq!(counts.pipelines, 1);
        assert_eq!(counts.uniform_buffers, 1);
        assert_eq!(counts.textures, 2);
    }

    #[test]
    fn test_draw_binds_font_texture() {
        let (mut renderer, _gui, _device) = renderer();
        let font_id = renderer.font_texture_id().unwrap();
        let mut encoder = RecordingEncoder::new();

        renderer
            .render(&mut encoder, &frame(vec![quad_list(Vec4::new(0.0, 0.0, 100.0, 100.0), font_id)]))
            .unwrap();

        let commands = encoder.commands();
        assert_eq!(commands[0], RecordedCommand::SetScissor(ScissorRect::new(0, 0, 100, 100)));
        assert_eq!(commands[1], RecordedCommand::SetViewport(Viewport::new(0, 0, 640, 480)));
        match &commands[2] {
            RecordedCommand::SetPipeline { texture, .. } => {
                assert_eq!(texture.map(|t| (t.width, t.height)), Some((2, 2)));
            }
            other => panic!("expected pipeline bind, got {other:?}"),
        }
        assert!(matches!(
            commands[3],
            RecordedCommand::DrawIndexed {
                index_count: 6,
                instance_count: 1,
                first_index: 0,
                vertex_offset: 0,
                first_instance: 0,
                ..
            }
        ));
        assert_eq!(renderer.last_stats().unwrap().draw_calls, 1);
    }

    #[test]
    fn test_degenerate_clip_is_skipped() {
        let (mut renderer, _gui, _device) = renderer();
        let font_id = renderer.font_texture_id().unwrap();
        let mut encoder = RecordingEncoder::new();

        renderer
            .render(&mut encoder, &frame(vec![quad_list(Vec4::new(700.0, 0.0, 800.0, 50.0), font_id)]))
            .unwrap();

        assert_eq!(encoder.draw_calls().count(), 0);
        assert_eq!(renderer.last_stats().unwrap().skipped_commands, 1);
    }

    #[test]
    fn test_stale_texture_uses_placeholder() {
        let (mut renderer, _gui, _device) = renderer();
        let (id, texture) = renderer.upload_texture(&[7; 16], 2, 2).unwrap();
        drop(texture);
        let mut encoder = RecordingEncoder::new();

        renderer
            .render(&mut encoder, &frame(vec![quad_list(Vec4::new(0.0, 0.0, 10.0, 10.0), id)]))
            .unwrap();

        let bound = encoder.commands().iter().find_map(|command| match command {
            RecordedCommand::SetPipeline { texture, .. } => *texture,
            _ => None,
        });
        assert_eq!(bound.map(|t| (t.width, t.height)), Some((1, 1)));
        assert_eq!(renderer.last_stats().unwrap().placeholder_substitutions, 1);
    }

    #[test]
    fn test_rebuild_font_texture_replaces_id() {
        let (mut renderer, mut gui, _device) = renderer();
        let old_id = renderer.font_texture_id().unwrap();

        let new_id = renderer.rebuild_font_texture(&mut gui).unwrap();
        assert_ne!(old_id, new_id);
        assert_eq!(gui.font_texture_id(), Some(new_id));
    }

    #[test]
    fn test_diagnostics_report_pool_sizes() {
        let (mut renderer, _gui, _device) = renderer();
        let font_id = renderer.font_texture_id().unwrap();
        renderer
            .render(
                &mut RecordingEncoder::new(),
                &frame(vec![quad_list(Vec4::new(0.0, 0.0, 10.0, 10.0), font_id)]),
            )
            .unwrap();

        let mut info = Vec::new();
        renderer.diagnostic_info(&mut info).unwrap();
        let lookup = |key: &str| info.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());
        assert_eq!(lookup("Pooled vertex buffers"), Some("1"));
        assert_eq!(lookup("Font atlas"), Some("2x2"));
    }
}
