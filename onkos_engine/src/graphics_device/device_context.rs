/// DeviceContext trait - immediate-mode pipeline binding and draw calls

use std::sync::Arc;
use crate::error::NativeResult;
use crate::graphics_device::{
    NativeBuffer, Shader, InputLayout, ShaderResourceView, SamplerState,
    RenderTargetView, DepthStencilView,
    BufferRegion, ClearFlags, IndexFormat, PrimitiveTopology, Viewport,
};

/// Stateful command interface of the native graphics API
///
/// Every call overwrites the corresponding slot of the bound pipeline state.
/// Nothing bound here is guaranteed to survive a present; callers re-assert
/// what they depend on.
pub trait DeviceContext: Send {
    // ===== INPUT ASSEMBLER =====

    fn ia_set_input_layout(&mut self, layout: &Arc<dyn InputLayout>) -> NativeResult<()>;

    /// Bind vertex buffers starting at `start_slot`
    ///
    /// `strides` and `offsets` hold one entry per buffer.
    fn ia_set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
        strides: &[u32],
        offsets: &[u32],
    ) -> NativeResult<()>;

    fn ia_set_index_buffer(
        &mut self,
        buffer: &dyn NativeBuffer,
        format: IndexFormat,
        offset: u32,
    ) -> NativeResult<()>;

    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology) -> NativeResult<()>;

    // ===== SHADER STAGES =====

    fn vs_set_shader(&mut self, shader: &Arc<dyn Shader>) -> NativeResult<()>;

    fn vs_set_constant_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
    ) -> NativeResult<()>;

    fn ps_set_shader(&mut self, shader: &Arc<dyn Shader>) -> NativeResult<()>;

    fn ps_set_constant_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
    ) -> NativeResult<()>;

    fn ps_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Arc<dyn ShaderResourceView>],
    ) -> NativeResult<()>;

    fn ps_set_samplers(
        &mut self,
        start_slot: u32,
        samplers: &[Arc<dyn SamplerState>],
    ) -> NativeResult<()>;

    // ===== OUTPUT MERGER / RASTERIZER =====

    fn om_set_render_targets(
        &mut self,
        views: &[Arc<dyn RenderTargetView>],
        depth_stencil: Option<&Arc<dyn DepthStencilView>>,
    ) -> NativeResult<()>;

    fn rs_set_viewports(&mut self, viewports: &[Viewport]) -> NativeResult<()>;

    // ===== RESOURCE UPDATES =====

    /// Copy CPU memory into a buffer
    ///
    /// # Arguments
    ///
    /// * `dst` - Destination buffer
    /// * `dst_subresource` - Destination subresource index (0 for buffers)
    /// * `dst_region` - Byte range to overwrite, `None` for the whole buffer
    /// * `src` - Source bytes
    /// * `src_row_pitch` - Row pitch of the source data
    /// * `src_depth_pitch` - Depth pitch of the source data
    fn update_subresource(
        &mut self,
        dst: &dyn NativeBuffer,
        dst_subresource: u32,
        dst_region: Option<&BufferRegion>,
        src: &[u8],
        src_row_pitch: u32,
        src_depth_pitch: u32,
    ) -> NativeResult<()>;

    fn clear_render_target_view(
        &mut self,
        view: &Arc<dyn RenderTargetView>,
        color: [f32; 4],
    ) -> NativeResult<()>;

    fn clear_depth_stencil_view(
        &mut self,
        view: &Arc<dyn DepthStencilView>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) -> NativeResult<()>;

    // ===== DRAW =====

    /// Draw indexed primitives
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices to draw
    /// * `start_index_location` - First index read from the index buffer
    /// * `base_vertex_location` - Value added to each index before reading a vertex
    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index_location: u32,
        base_vertex_location: i32,
    ) -> NativeResult<()>;
}
