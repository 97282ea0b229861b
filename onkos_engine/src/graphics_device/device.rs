/// Device trait - resource factory of the native graphics API

use std::sync::Arc;
use crate::error::NativeResult;
use crate::graphics_device::{
    NativeBuffer, NativeTexture, Shader, InputLayout, ShaderResourceView,
    SamplerState, RenderTargetView, DepthStencilView,
    BufferDesc, TextureDesc, SamplerDesc, ShaderBytecode, ShaderStage, InputElementDesc,
};

/// Resource factory
///
/// The engine only consumes the handles this trait hands back; creation and
/// destruction of the native objects stay inside the backend.
pub trait Device: Send + Sync {
    /// True once the native device has been created and not lost
    fn is_ready(&self) -> bool;

    /// Allocate a GPU buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Size, usage and bind flags
    /// * `initial_data` - Bytes copied into the buffer at creation (length must match `desc.byte_width`)
    fn allocate_buffer(
        &mut self,
        desc: &BufferDesc,
        initial_data: Option<&[u8]>,
    ) -> NativeResult<Box<dyn NativeBuffer>>;

    /// Create a 2D texture
    fn create_texture(&mut self, desc: &TextureDesc) -> NativeResult<Arc<dyn NativeTexture>>;

    /// Create a render target view over a texture
    fn create_render_target_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn RenderTargetView>>;

    /// Create a depth-stencil view over a depth texture
    fn create_depth_stencil_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn DepthStencilView>>;

    /// Create a shader resource view over a sampled texture
    fn create_shader_resource_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn ShaderResourceView>>;

    /// Create a shader object from compiled bytecode
    fn create_shader(
        &mut self,
        stage: ShaderStage,
        bytecode: &ShaderBytecode,
    ) -> NativeResult<Arc<dyn Shader>>;

    /// Create an input layout validated against a vertex shader's bytecode
    fn create_input_layout(
        &mut self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &ShaderBytecode,
    ) -> NativeResult<Arc<dyn InputLayout>>;

    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> NativeResult<Arc<dyn SamplerState>>;
}
