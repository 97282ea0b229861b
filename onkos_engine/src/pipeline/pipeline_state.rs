/// Explicit pipeline state
///
/// Everything a draw call implicitly reads from the device context, other
/// than the per-draw buffers, lives in this value. The binder re-asserts it
/// in full before every draw.

use std::sync::Arc;
use crate::graphics_device::{
    InputLayout, Shader, ShaderResourceView, SamplerState, RenderTargetView,
    DepthStencilView, PrimitiveTopology, Viewport,
};
use crate::resource::{GpuBuffer, MeshBuffers};

/// Shared pipeline bindings for a group of draws
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub input_layout: Option<Arc<dyn InputLayout>>,
    pub topology: PrimitiveTopology,
    pub vertex_shader: Option<Arc<dyn Shader>>,
    pub pixel_shader: Option<Arc<dyn Shader>>,
    /// Pixel-stage shader resource views, bound from slot 0
    pub shader_resources: Vec<Arc<dyn ShaderResourceView>>,
    /// Pixel-stage sampler, bound at slot 0
    pub sampler: Option<Arc<dyn SamplerState>>,
    pub render_targets: Vec<Arc<dyn RenderTargetView>>,
    pub depth_stencil: Option<Arc<dyn DepthStencilView>>,
    pub viewport: Option<Viewport>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            input_layout: None,
            topology: PrimitiveTopology::TriangleList,
            vertex_shader: None,
            pixel_shader: None,
            shader_resources: Vec::new(),
            sampler: None,
            render_targets: Vec::new(),
            depth_stencil: None,
            viewport: None,
        }
    }
}

/// Constant buffer attached to one register of a shader stage
#[derive(Debug, Clone, Copy)]
pub struct ConstantSlot<'a> {
    pub slot: u32,
    pub buffer: &'a GpuBuffer,
}

impl<'a> ConstantSlot<'a> {
    pub fn new(slot: u32, buffer: &'a GpuBuffer) -> Self {
        Self { slot, buffer }
    }
}

/// Per-draw inputs: geometry plus the constant buffers each stage reads
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub mesh: &'a MeshBuffers,
    pub vs_constants: &'a [ConstantSlot<'a>],
    pub ps_constants: &'a [ConstantSlot<'a>],
    /// Overrides `PipelineState::shader_resources` when set
    pub shader_resources: Option<&'a [Arc<dyn ShaderResourceView>]>,
}

impl<'a> DrawItem<'a> {
    pub fn new(mesh: &'a MeshBuffers) -> Self {
        Self { mesh, vs_constants: &[], ps_constants: &[], shader_resources: None }
    }
}
