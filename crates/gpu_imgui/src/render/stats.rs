/// Counters for the last rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Command buffers processed
    pub draw_lists: usize,
    /// Indexed draw calls issued
    pub draw_calls: usize,
    /// User callbacks invoked, including render-state resets
    pub callbacks: usize,
    /// Commands skipped because their clip rectangle was empty
    pub skipped_commands: usize,
    /// Draws that fell back to the placeholder texture
    pub placeholder_substitutions: usize,
    /// Vertices uploaded
    pub vertices: usize,
    /// Indices uploaded
    pub indices: usize,
}
